use std::panic::{self, AssertUnwindSafe};
use std::thread;

use crossbeam_channel::{unbounded, Receiver, Sender};
use log::{debug, warn};

use crate::{Aligner, AlignerError, AlignmentResult, ScoringConfig, Sequence};

/// Aligns many independent pairs on a fixed pool of worker threads.
///
/// Every request gets its own DP matrices inside the worker that picks it
/// up; nothing is shared between requests except the scoring configuration.
pub struct BatchAligner {
    work_tx: Option<Sender<WorkItem>>,
    result_rx: Receiver<WorkResult>,
    workers: Vec<thread::JoinHandle<()>>,
}

struct WorkItem {
    index: usize,
    seq_a: Sequence,
    seq_b: Sequence,
}

struct WorkResult {
    index: usize,
    result: Result<AlignmentResult, AlignerError>,
}

impl BatchAligner {
    pub fn new(workers: usize, config: ScoringConfig) -> Result<Self, AlignerError> {
        if workers == 0 {
            return Err(AlignerError::WorkerError(
                "worker count must be at least 1".to_string(),
            ));
        }
        let aligner = Aligner::new(config)?;

        let (work_tx, work_rx) = unbounded::<WorkItem>();
        let (result_tx, result_rx) = unbounded::<WorkResult>();

        let mut handles = Vec::with_capacity(workers);
        for worker_id in 0..workers {
            let aligner = aligner.clone();
            let work_rx = work_rx.clone();
            let result_tx = result_tx.clone();
            let handle = thread::Builder::new()
                .name(format!("align-worker-{}", worker_id))
                .spawn(move || Self::worker(worker_id, aligner, work_rx, result_tx))
                .map_err(|e| AlignerError::WorkerError(e.to_string()))?;
            handles.push(handle);
        }

        Ok(Self {
            work_tx: Some(work_tx),
            result_rx,
            workers: handles,
        })
    }

    pub fn workers(&self) -> usize {
        self.workers.len()
    }

    fn worker(
        worker_id: usize,
        aligner: Aligner,
        work_rx: Receiver<WorkItem>,
        result_tx: Sender<WorkResult>,
    ) {
        while let Ok(work) = work_rx.recv() {
            let result = panic::catch_unwind(AssertUnwindSafe(|| {
                aligner.align(&work.seq_a, &work.seq_b)
            }))
            .unwrap_or_else(|_| {
                Err(AlignerError::WorkerError(format!(
                    "worker {} panicked on pair {}",
                    worker_id, work.index
                )))
            });

            if result_tx
                .send(WorkResult {
                    index: work.index,
                    result,
                })
                .is_err()
            {
                break;
            }
        }
        debug!("worker {} exiting", worker_id);
    }

    /// Aligns every pair and returns the results in input order.
    ///
    /// All pairs are processed; if any failed, the error of the earliest
    /// failing pair is returned.
    pub fn align_all(
        &mut self,
        pairs: Vec<(Sequence, Sequence)>,
    ) -> Result<Vec<AlignmentResult>, AlignerError> {
        let work_tx = self
            .work_tx
            .as_ref()
            .ok_or_else(|| AlignerError::WorkerError("work queue closed".to_string()))?;

        let total = pairs.len();
        for (index, (seq_a, seq_b)) in pairs.into_iter().enumerate() {
            work_tx
                .send(WorkItem {
                    index,
                    seq_a,
                    seq_b,
                })
                .map_err(|e| AlignerError::WorkerError(e.to_string()))?;
        }
        debug!("queued {} pairs on {} workers", total, self.workers.len());

        let mut slots: Vec<Option<Result<AlignmentResult, AlignerError>>> =
            (0..total).map(|_| None).collect();
        for _ in 0..total {
            let work_result = self
                .result_rx
                .recv()
                .map_err(|e| AlignerError::WorkerError(e.to_string()))?;
            slots[work_result.index] = Some(work_result.result);
        }

        slots
            .into_iter()
            .enumerate()
            .map(|(index, slot)| {
                slot.unwrap_or_else(|| {
                    Err(AlignerError::WorkerError(format!(
                        "no result for pair {}",
                        index
                    )))
                })
            })
            .collect()
    }
}

/// Pairs the records of two inputs for batch alignment.
///
/// Equal counts pair record `k` with record `k`; a single record on either
/// side is aligned against every record of the other side.
pub fn pair_records(
    records_a: Vec<Sequence>,
    records_b: Vec<Sequence>,
) -> Result<Vec<(Sequence, Sequence)>, AlignerError> {
    match (records_a.len(), records_b.len()) {
        (0, _) => Err(AlignerError::EmptySequence("A")),
        (_, 0) => Err(AlignerError::EmptySequence("B")),
        (n, m) if n == m => Ok(records_a.into_iter().zip(records_b).collect()),
        (1, _) => {
            let a = &records_a[0];
            Ok(records_b.into_iter().map(|b| (a.clone(), b)).collect())
        }
        (_, 1) => {
            let b = &records_b[0];
            Ok(records_a.into_iter().map(|a| (a, b.clone())).collect())
        }
        (n, m) => Err(AlignerError::RecordCountMismatch(n, m)),
    }
}

impl Drop for BatchAligner {
    fn drop(&mut self) {
        // Closing the queue stops the workers
        self.work_tx.take();

        while let Some(worker) = self.workers.pop() {
            if worker.join().is_err() {
                warn!("alignment worker terminated abnormally");
            }
        }
    }
}
