//! Mtime-based freshness detection for generated variants.
//!
//! # Gate policies
//!
//! - [`GatePolicy::Base`]: a raster asset is checked once against its base
//!   output; if the base is current, every scaled variant is assumed current
//!   too. A scaled variant deleted out-of-band stays missing until the
//!   source is touched.
//! - [`GatePolicy::Each`]: every output is checked on its own and only stale
//!   ones are regenerated.
//!
//! Pass-through copies only have one output, so both policies agree there.

use std::path::Path;
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

/// How raster variant groups are checked for freshness.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum GatePolicy {
    /// Base output gates the whole variant group.
    #[default]
    Base,
    /// Each output is gated independently.
    Each,
}

/// Get the modification time of a file
///
/// Returns `None` if the file doesn't exist or mtime cannot be read
pub fn get_mtime(path: &Path) -> Option<SystemTime> {
    path.metadata().and_then(|m| m.modified()).ok()
}

/// Check whether regenerating `output` from `source` can be skipped
///
/// Returns `true` iff the output exists and its mtime is not older than the
/// source's. A source whose mtime cannot be read never skips.
pub fn should_skip(source: &Path, output: &Path) -> bool {
    let (Some(source_time), Some(output_time)) = (get_mtime(source), get_mtime(output)) else {
        return false;
    };
    output_time >= source_time
}
