//! Per-asset processing with side effects (resizing, copying).

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

use image::{DynamicImage, ImageError, ImageReader};
use smallvec::SmallVec;

use crate::freshness::{GatePolicy, should_skip};
use crate::pipeline::AssetError;
use crate::raster::{EncodeOptions, OutputFormat, encode_to_file, resize_to_width};

use super::route::{ScaledOutput, VariantSet};

/// Result of processing one asset that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    /// Outputs were (re)generated; `written` counts files written
    Processed { written: usize },
    /// Every output was already current
    Skipped,
    /// Unrecognized extension
    Ignored,
}

/// Generate the density variants of a raster asset.
///
/// Scaled variants are written before the base so that, under
/// [`GatePolicy::Base`], a run that fails halfway never leaves a fresh base
/// in front of missing variants. Variants with a non-positive target width
/// are silently not written.
pub fn process_raster(
    source: &Path,
    set: &VariantSet,
    gate: GatePolicy,
    options: EncodeOptions,
) -> Result<FileOutcome, AssetError> {
    let format =
        OutputFormat::from_path(&set.base).ok_or_else(|| AssetError::unsupported(&set.base))?;

    let Some((pending, base_pending)) = pending_outputs(source, set, gate) else {
        return Ok(FileOutcome::Skipped);
    };

    let img = decode(source)?;
    let mut written = 0;

    for variant in pending {
        if write_variant(&img, variant.width, &variant.output, format, options)? {
            written += 1;
        }
    }

    if base_pending
        && write_variant(&img, i64::from(set.base_width), &set.base, format, options)?
    {
        written += 1;
    }

    Ok(FileOutcome::Processed { written })
}

/// Copy a pass-through asset byte-for-byte to its base destination.
pub fn copy_passthrough(source: &Path, set: &VariantSet) -> Result<FileOutcome, AssetError> {
    if should_skip(source, &set.base) {
        return Ok(FileOutcome::Skipped);
    }

    copy_file(source, &set.base).map_err(|e| AssetError::io(&set.base, e))?;
    Ok(FileOutcome::Processed { written: 1 })
}

/// Copy `source` to `dest`, creating parent directories.
///
/// On failure the partially written file is removed, so a truncated copy
/// can never look fresh to the incremental gate.
fn copy_file(source: &Path, dest: &Path) -> io::Result<()> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut reader = File::open(source)?;
    let result = File::create(dest).and_then(|mut writer| {
        io::copy(&mut reader, &mut writer)?;
        writer.flush()
    });
    if result.is_err() {
        let _ = fs::remove_file(dest);
    }
    result
}

/// Check whether a raster's outputs are all current under `gate`.
pub fn is_raster_fresh(source: &Path, set: &VariantSet, gate: GatePolicy) -> bool {
    pending_outputs(source, set, gate).is_none()
}

/// Outputs that need writing, or `None` when everything is current.
///
/// Variants that would never be written (non-positive width) are not
/// counted as pending, otherwise `Each` would decode them on every run.
fn pending_outputs<'a>(
    source: &Path,
    set: &'a VariantSet,
    gate: GatePolicy,
) -> Option<(SmallVec<[&'a ScaledOutput; 4]>, bool)> {
    let writable = set.scaled.iter().filter(|v| v.width > 0);

    match gate {
        GatePolicy::Base => {
            if should_skip(source, &set.base) {
                None
            } else {
                Some((writable.collect(), true))
            }
        }
        GatePolicy::Each => {
            let pending: SmallVec<[_; 4]> =
                writable.filter(|v| !should_skip(source, &v.output)).collect();
            let base_pending = set.base_width > 0 && !should_skip(source, &set.base);
            if pending.is_empty() && !base_pending {
                None
            } else {
                Some((pending, base_pending))
            }
        }
    }
}

/// Decode by content, falling back to the extension when sniffing fails.
fn decode(source: &Path) -> Result<DynamicImage, AssetError> {
    ImageReader::open(source)
        .and_then(ImageReader::with_guessed_format)
        .map_err(ImageError::IoError)
        .and_then(ImageReader::decode)
        .map_err(|e| AssetError::decode(source, e))
}

/// Resize and encode one output. Returns `false` when nothing was written.
fn write_variant(
    img: &DynamicImage,
    width: i64,
    output: &Path,
    format: OutputFormat,
    options: EncodeOptions,
) -> Result<bool, AssetError> {
    let Some(resized) = resize_to_width(img, width) else {
        return Ok(false);
    };
    encode_to_file(&resized, output, format, options).map_err(|e| AssetError::encode(output, e))?;
    Ok(true)
}
