//! Dry-run planning: what a run would write, without writing it.

use std::path::PathBuf;

use serde::Serialize;

use crate::asset::{AssetKind, VariantSet, is_raster_fresh};
use crate::freshness::should_skip;

use super::Pipeline;

/// One discovered file and its planned outputs.
#[derive(Debug, Clone, Serialize)]
pub struct PlannedAsset {
    /// Absolute source path
    pub source: PathBuf,
    #[serde(flatten)]
    pub set: VariantSet,
    /// Whether the incremental gate would skip it; `None` for ignored files
    pub fresh: Option<bool>,
}

impl Pipeline<'_> {
    /// Classify and map every discovered file, in discovery order.
    pub fn plan(&self) -> Vec<PlannedAsset> {
        self.discover()
            .into_iter()
            .map(|source| {
                let set = self.variant_set(&source);
                let fresh = match set.kind {
                    AssetKind::Raster => Some(is_raster_fresh(&source, &set, self.options.gate)),
                    AssetKind::PassThrough => Some(should_skip(&source, &set.base)),
                    AssetKind::Ignored => None,
                };
                PlannedAsset { source, set, fresh }
            })
            .collect()
    }
}
