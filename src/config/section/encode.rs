//! `[encode]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [encode]
//! jpeg_quality = 85   # 1-100, lossy targets only
//! jobs = 0            # Worker threads, 0 = one per core
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::raster::{DEFAULT_JPEG_QUALITY, EncodeOptions};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodeConfig {
    pub jpeg_quality: u8,
    pub jobs: usize,
}

impl Default for EncodeConfig {
    fn default() -> Self {
        Self {
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            jobs: 0,
        }
    }
}

impl EncodeConfig {
    const JPEG_QUALITY: FieldPath = FieldPath::new("encode.jpeg_quality");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if !(1..=100).contains(&self.jpeg_quality) {
            diag.error(
                Self::JPEG_QUALITY,
                format!("quality must be within 1..=100, got {}", self.jpeg_quality),
            );
        }
    }

    pub const fn options(&self) -> EncodeOptions {
        EncodeOptions {
            jpeg_quality: self.jpeg_quality,
        }
    }
}
