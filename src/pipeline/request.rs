//! Pipeline inputs.

use std::path::PathBuf;

use thiserror::Error;

use crate::asset::Classifier;
use crate::core::Scale;
use crate::freshness::GatePolicy;
use crate::raster::EncodeOptions;

/// What to generate: roots, base width and additional scales.
///
/// Scale order does not affect output; each scale is independent.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub source_root: PathBuf,
    pub dest_root: PathBuf,
    /// Pixel width of the 1.0x variant
    pub base_width: u32,
    /// Additional density scales, each written under `<N.N>x/`
    pub scales: Vec<Scale>,
}

/// Fatal problems detected before any file is touched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RequestError {
    #[error("base width must be greater than 0")]
    ZeroBaseWidth,

    #[error("no scales configured, nothing to generate beyond the base")]
    NoScales,

    #[error("invalid scale {0}: must be a finite positive number")]
    InvalidScale(f64),

    #[error("destination must differ from the source root")]
    SameRoots,
}

impl GenerationRequest {
    /// Validate the request eagerly; the pipeline never starts on error.
    pub fn validate(&self) -> Result<(), RequestError> {
        if self.base_width == 0 {
            return Err(RequestError::ZeroBaseWidth);
        }
        if self.scales.is_empty() {
            return Err(RequestError::NoScales);
        }
        if let Some(bad) = self.scales.iter().find(|s| !s.is_valid()) {
            return Err(RequestError::InvalidScale(bad.get()));
        }
        if self.source_root == self.dest_root {
            return Err(RequestError::SameRoots);
        }
        Ok(())
    }
}

/// How to generate: classification, gating, encoding and parallelism.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub classifier: Classifier,
    pub gate: GatePolicy,
    pub encode: EncodeOptions,
    /// Worker threads; 0 uses one per CPU core
    pub jobs: usize,
    /// Skip `<N.N>x/` directories directly under the source root
    pub skip_density_dirs: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            classifier: Classifier::default(),
            gate: GatePolicy::default(),
            encode: EncodeOptions::default(),
            jobs: 0,
            skip_density_dirs: true,
        }
    }
}
