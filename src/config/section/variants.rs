//! `[variants]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [variants]
//! base_width = 300          # Width of the 1.0x variant, in pixels
//! scales = [2.0, 3.0, 4.0]  # Extra densities, written under `<N.N>x/`
//! gate = "base"             # "base" or "each", see below
//! ```
//!
//! `gate = "base"` treats a raster as current when its base output is
//! current. `gate = "each"` checks every variant and regenerates the
//! missing or stale ones.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::core::Scale;
use crate::freshness::GatePolicy;

/// Variant geometry and freshness policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VariantsConfig {
    pub base_width: u32,
    pub scales: Vec<Scale>,
    pub gate: GatePolicy,
}

impl Default for VariantsConfig {
    fn default() -> Self {
        Self {
            base_width: 300,
            scales: [2.0, 3.0, 4.0].map(Scale::new_unchecked).to_vec(),
            gate: GatePolicy::default(),
        }
    }
}

impl VariantsConfig {
    const BASE_WIDTH: FieldPath = FieldPath::new("variants.base_width");
    const SCALES: FieldPath = FieldPath::new("variants.scales");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.base_width == 0 {
            diag.error(Self::BASE_WIDTH, "base width must be greater than 0");
        }

        if self.scales.is_empty() {
            diag.error_with_hint(
                Self::SCALES,
                "no scales configured",
                "add at least one density, e.g. `scales = [2.0]`",
            );
            return;
        }

        let mut seen = FxHashSet::default();
        for scale in &self.scales {
            if !scale.is_valid() {
                diag.error(
                    Self::SCALES,
                    format!("{} is not a finite positive number", scale.get()),
                );
                continue;
            }

            let dir = scale.dir_name();
            if !seen.insert(dir.clone()) {
                diag.error_with_hint(
                    Self::SCALES,
                    format!("{} maps to `{dir}/` more than once", scale.get()),
                    "directory names keep one decimal digit; use distinct values",
                );
            } else if scale.get() == 1.0 {
                diag.warn(
                    Self::SCALES,
                    "1.0 duplicates the base variant under `1.0x/`",
                );
            }
        }
    }
}
