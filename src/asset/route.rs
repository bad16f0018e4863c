//! Variant routing: source relative path → destination paths.
//!
//! ```text
//! source/sub/dir/icon.png, base_width = 300, scales = [2, 3]
//!
//! dest/sub/dir/icon.png        300px  (base)
//! dest/2.0x/sub/dir/icon.png   600px
//! dest/3.0x/sub/dir/icon.png   900px
//! ```
//!
//! Filenames are preserved; only the directory prefix changes. Pass-through
//! assets get the base destination only.

use std::path::{Path, PathBuf};

use serde::Serialize;
use smallvec::SmallVec;

use crate::core::Scale;

use super::AssetKind;

/// One scaled output of a raster asset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScaledOutput {
    pub scale: Scale,
    /// Target pixel width; zero or negative means the variant is not written
    pub width: i64,
    pub output: PathBuf,
}

/// All destinations for one source asset.
///
/// This is the single source of truth for asset path mapping, used by both
/// the generator and `plan`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariantSet {
    /// Path relative to the source root
    pub relative: PathBuf,
    pub kind: AssetKind,
    /// Base (1.0x) output at `dest/<relative>`
    pub base: PathBuf,
    /// Base pixel width; unused for pass-through assets
    pub base_width: u32,
    /// One entry per configured scale, in configuration order
    pub scaled: SmallVec<[ScaledOutput; 4]>,
}

impl VariantSet {
    /// Every output path, base first.
    pub fn outputs(&self) -> impl Iterator<Item = &Path> {
        std::iter::once(self.base.as_path()).chain(self.scaled.iter().map(|s| s.output.as_path()))
    }
}

/// Compute destination paths for a source asset.
pub fn map_destinations(
    dest_root: &Path,
    relative: &Path,
    kind: AssetKind,
    scales: &[Scale],
    base_width: u32,
) -> VariantSet {
    let scaled = match kind {
        AssetKind::Raster => scales
            .iter()
            .map(|&scale| ScaledOutput {
                scale,
                width: scale.target_width(base_width),
                output: dest_root.join(scale.dir_name()).join(relative),
            })
            .collect(),
        AssetKind::PassThrough | AssetKind::Ignored => SmallVec::new(),
    };

    VariantSet {
        relative: relative.to_path_buf(),
        kind,
        base: dest_root.join(relative),
        base_width,
        scaled,
    }
}
