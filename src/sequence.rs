use std::fmt;
use std::str::FromStr;

/// A normalized biological sequence: uppercase ASCII letters only.
///
/// Construction never fails: every non-letter byte is dropped and the
/// remaining letters are uppercased in input order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Sequence {
    data: Vec<u8>,
}

impl Sequence {
    pub fn new(raw: &[u8]) -> Self {
        Self {
            data: normalize(raw),
        }
    }

    /// Splits FASTA-style text into one sequence per `>` record, skipping
    /// `;` comment lines and normalizing each body.
    ///
    /// Text before the first header only forms a record when it holds
    /// letters, so plain unlabelled input yields a single sequence. A header
    /// with no body still yields an (empty) record.
    pub fn records_from_fasta_text(text: &str) -> Vec<Self> {
        let mut records = Vec::new();
        let mut body: Vec<u8> = Vec::new();
        let mut in_record = false;

        for line in text.lines().map(str::trim_start) {
            if line.starts_with('>') {
                if in_record || !normalize(&body).is_empty() {
                    records.push(Self::new(&body));
                }
                body.clear();
                in_record = true;
            } else if !line.starts_with(';') {
                body.extend_from_slice(line.as_bytes());
            }
        }
        if in_record || !normalize(&body).is_empty() {
            records.push(Self::new(&body));
        }
        records
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Strips every non-letter byte and uppercases the rest.
pub fn normalize(raw: &[u8]) -> Vec<u8> {
    raw.iter()
        .filter(|b| b.is_ascii_alphabetic())
        .map(u8::to_ascii_uppercase)
        .collect()
}

impl From<&str> for Sequence {
    fn from(raw: &str) -> Self {
        Self::new(raw.as_bytes())
    }
}

impl From<&[u8]> for Sequence {
    fn from(raw: &[u8]) -> Self {
        Self::new(raw)
    }
}

impl FromStr for Sequence {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl AsRef<[u8]> for Sequence {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Only ASCII letters survive normalization.
        f.write_str(&String::from_utf8_lossy(&self.data))
    }
}
