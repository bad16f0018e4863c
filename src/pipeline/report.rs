//! Run report and the accumulator workers write into.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crossbeam::queue::SegQueue;
use serde::Serialize;

use crate::asset::FileOutcome;

use super::AssetError;

/// A single failed asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    /// Path relative to the source root
    pub path: PathBuf,
    /// `decode`, `encode` or `io`
    pub category: &'static str,
    /// Error with its full cause chain
    pub cause: String,
}

/// Overall result of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// No failures
    Success,
    /// Some assets failed, at least one succeeded or was current
    CompletedWithErrors,
    /// Every attempted asset failed
    Failed,
}

/// Summary of one pipeline run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    /// Files discovered under the source root
    pub discovered: usize,
    /// Assets whose outputs were (re)generated or copied
    pub processed: usize,
    /// Assets whose outputs were already current
    pub skipped: usize,
    /// Files with an unrecognized extension
    pub ignored: usize,
    /// Individual output files written
    pub written: usize,
    /// Failed assets, sorted by path
    pub failed: Vec<Failure>,
    /// Run stopped early on a shutdown request
    pub cancelled: bool,
}

impl RunReport {
    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }

    pub fn status(&self) -> RunStatus {
        if self.failed.is_empty() {
            RunStatus::Success
        } else if self.processed + self.skipped > 0 {
            RunStatus::CompletedWithErrors
        } else {
            RunStatus::Failed
        }
    }
}

/// Lock-free parallel result collector using `SegQueue`
pub struct ParallelCollector<T> {
    queue: SegQueue<T>,
}

impl<T> ParallelCollector<T> {
    /// Create a new empty collector.
    #[inline]
    pub fn new() -> Self {
        Self {
            queue: SegQueue::new(),
        }
    }

    /// Push an item (lock-free, wait-free).
    #[inline]
    pub fn push(&self, item: T) {
        self.queue.push(item);
    }

    /// Drain all items into a Vec.
    pub fn drain(self) -> Vec<T> {
        let mut results = Vec::with_capacity(self.queue.len());
        while let Some(item) = self.queue.pop() {
            results.push(item);
        }
        results
    }
}

/// Shared sink for per-file outcomes across worker threads.
pub(super) struct ReportAccumulator {
    processed: AtomicUsize,
    skipped: AtomicUsize,
    ignored: AtomicUsize,
    written: AtomicUsize,
    cancelled: AtomicBool,
    failures: ParallelCollector<Failure>,
}

impl ReportAccumulator {
    pub fn new() -> Self {
        Self {
            processed: AtomicUsize::new(0),
            skipped: AtomicUsize::new(0),
            ignored: AtomicUsize::new(0),
            written: AtomicUsize::new(0),
            cancelled: AtomicBool::new(false),
            failures: ParallelCollector::new(),
        }
    }

    pub fn record(&self, path: PathBuf, result: Result<FileOutcome, AssetError>) {
        match result {
            Ok(FileOutcome::Processed { written }) => {
                self.processed.fetch_add(1, Ordering::Relaxed);
                self.written.fetch_add(written, Ordering::Relaxed);
            }
            Ok(FileOutcome::Skipped) => {
                self.skipped.fetch_add(1, Ordering::Relaxed);
            }
            Ok(FileOutcome::Ignored) => {
                self.ignored.fetch_add(1, Ordering::Relaxed);
            }
            Err(err) => {
                self.failures.push(Failure {
                    path,
                    category: err.category(),
                    cause: err.chain(),
                });
            }
        }
    }

    pub fn mark_cancelled(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn finish(self, discovered: usize) -> RunReport {
        let mut failed = self.failures.drain();
        failed.sort_by(|a, b| a.path.cmp(&b.path));

        RunReport {
            discovered,
            processed: self.processed.into_inner(),
            skipped: self.skipped.into_inner(),
            ignored: self.ignored.into_inner(),
            written: self.written.into_inner(),
            failed,
            cancelled: self.cancelled.into_inner(),
        }
    }
}
