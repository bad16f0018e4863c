//! `densify generate`: run the pipeline and summarize the outcome.

use std::fs;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};

use crate::config::Config;
use crate::log;
use crate::pipeline::{Pipeline, RunReport, RunStatus};
use crate::utils::plural_count;

/// Generate every variant the config asks for.
///
/// Returns the report; the caller decides the exit code.
pub fn generate(config: &Config, clean: bool) -> Result<RunReport> {
    let request = config.request();
    let options = config.pipeline_options();
    let pipeline = Pipeline::new(&request, &options)?;

    prepare_dirs(&request.source_root, &request.dest_root, clean)?;

    if let Some(path) = &config.config_path {
        crate::debug!("config"; "loaded {}", path.display());
    }
    log!(
        "generate";
        "{} → {} (base {}px, {})",
        display_rel(&request.source_root, &config.root),
        display_rel(&request.dest_root, &config.root),
        request.base_width,
        request
            .scales
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    );

    let started = Instant::now();
    let report = pipeline.run();
    log_summary(&report, started);

    Ok(report)
}

/// Create the source root if missing; wipe the destination on `--clean`.
fn prepare_dirs(source: &Path, dest: &Path, clean: bool) -> Result<()> {
    if !source.exists() {
        fs::create_dir_all(source).with_context(|| {
            format!("failed to create source directory: {}", source.display())
        })?;
        log!("generate"; "created empty source directory {}", source.display());
    }

    if clean && dest.exists() {
        fs::remove_dir_all(dest).with_context(|| {
            format!("failed to clear destination directory: {}", dest.display())
        })?;
    }
    Ok(())
}

fn log_summary(report: &RunReport, started: Instant) {
    if report.cancelled {
        log!("warning"; "interrupted, remaining assets were not processed");
    }

    if report.discovered == 0 {
        log!("warning"; "no files found in the source directory");
        return;
    }

    let mut parts = vec![
        format!("{} generated", plural_count(report.processed, "asset")),
        format!("{} up to date", report.skipped),
    ];
    if report.ignored > 0 {
        parts.push(format!("{} ignored", report.ignored));
    }
    if report.has_failures() {
        parts.push(format!("{} failed", report.failed.len()));
    }

    log!(
        "generate";
        "{} ({} written) in {:.2}s",
        parts.join(", "),
        plural_count(report.written, "file"),
        started.elapsed().as_secs_f64()
    );

    match report.status() {
        RunStatus::Success => {}
        RunStatus::CompletedWithErrors | RunStatus::Failed => {
            log!("error"; "{} could not be processed:", plural_count(report.failed.len(), "asset"));
            for failure in &report.failed {
                eprintln!("- {} [{}]: {}", failure.path.display(), failure.category, failure.cause);
            }
        }
    }
}

/// Show `path` relative to the project root when it lies inside it.
fn display_rel(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}
