//! Variant generation pipeline.
//!
//! ```text
//! discover → classify ─┬─ ignored     → (nothing)
//!                      ├─ raster      → gate → decode → resize × N+1 → encode
//!                      └─ passthrough → gate → copy
//! ```
//!
//! Each discovered file is an independent unit of work. Files run on a rayon
//! pool; outcomes land in a shared accumulator and never abort the batch.
//! Cancellation is checked at every file boundary.

mod error;
mod plan;
mod report;
mod request;

pub use error::AssetError;
pub use report::{RunReport, RunStatus};
pub use request::{GenerationRequest, PipelineOptions, RequestError};

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use rayon::prelude::*;

use crate::asset::{
    AssetKind, FileOutcome, ScanOptions, VariantSet, copy_passthrough, discover_files,
    map_destinations, process_raster,
};
use crate::core::shutdown_flag;
use crate::{debug, log};

use report::ReportAccumulator;

/// A validated generation run.
pub struct Pipeline<'a> {
    request: &'a GenerationRequest,
    options: &'a PipelineOptions,
    cancel: &'a AtomicBool,
}

impl<'a> Pipeline<'a> {
    /// Validate `request` and build a pipeline bound to the Ctrl+C flag.
    pub fn new(
        request: &'a GenerationRequest,
        options: &'a PipelineOptions,
    ) -> Result<Self, RequestError> {
        request.validate()?;
        Ok(Self {
            request,
            options,
            cancel: shutdown_flag(),
        })
    }

    /// Use a different cancellation flag.
    pub fn with_cancel(mut self, cancel: &'a AtomicBool) -> Self {
        self.cancel = cancel;
        self
    }

    /// Discover every source file, respecting the scan filters.
    pub fn discover(&self) -> Vec<PathBuf> {
        let exclude = self
            .request
            .dest_root
            .starts_with(&self.request.source_root)
            .then_some(self.request.dest_root.as_path());

        discover_files(
            &self.request.source_root,
            ScanOptions {
                exclude,
                skip_density_dirs: self.options.skip_density_dirs,
                cancel: Some(self.cancel),
            },
        )
    }

    /// Run the pipeline over every discovered file.
    pub fn run(&self) -> RunReport {
        let files = self.discover();
        let acc = ReportAccumulator::new();
        if self.cancel.load(Ordering::Relaxed) {
            acc.mark_cancelled();
        }

        let work = || {
            files.par_iter().for_each(|path| {
                if self.cancel.load(Ordering::Relaxed) {
                    acc.mark_cancelled();
                    return;
                }
                let relative = self.relative(path).to_path_buf();
                let result = self.process_file(path);
                match &result {
                    Ok(FileOutcome::Processed { written }) => {
                        debug!("generate"; "{} ({} file{})", relative.display(), written,
                            crate::utils::plural_s(*written));
                    }
                    Ok(FileOutcome::Skipped) => {
                        debug!("skip"; "{}", relative.display());
                    }
                    Ok(FileOutcome::Ignored) => {}
                    Err(e) => log!("error"; "{}: {}", relative.display(), e.chain()),
                }
                acc.record(relative, result);
            });
        };

        match self.build_pool() {
            Some(pool) => pool.install(work),
            None => work(),
        }

        acc.finish(files.len())
    }

    /// Process a single source file end to end.
    pub fn process_file(&self, path: &Path) -> Result<FileOutcome, AssetError> {
        let set = self.variant_set(path);
        match set.kind {
            AssetKind::Ignored => Ok(FileOutcome::Ignored),
            AssetKind::Raster => {
                process_raster(path, &set, self.options.gate, self.options.encode)
            }
            AssetKind::PassThrough => copy_passthrough(path, &set),
        }
    }

    /// Classify `path` and compute its destinations.
    pub fn variant_set(&self, path: &Path) -> VariantSet {
        let kind = self.options.classifier.classify_path(path);
        map_destinations(
            &self.request.dest_root,
            self.relative(path),
            kind,
            &self.request.scales,
            self.request.base_width,
        )
    }

    fn relative<'p>(&self, path: &'p Path) -> &'p Path {
        path.strip_prefix(&self.request.source_root)
            .unwrap_or(path)
    }

    fn build_pool(&self) -> Option<rayon::ThreadPool> {
        if self.options.jobs == 0 {
            return None;
        }
        match rayon::ThreadPoolBuilder::new()
            .num_threads(self.options.jobs)
            .build()
        {
            Ok(pool) => Some(pool),
            Err(e) => {
                debug!("generate"; "falling back to global pool: {}", e);
                None
            }
        }
    }
}
