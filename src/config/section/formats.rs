//! `[formats]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [formats]
//! raster = ["png", "jpg", "jpeg", "webp"]
//! passthrough = ["svg", "json", "riv", "glb", "bin"]
//! ```
//!
//! Extensions are matched case-insensitively, without the leading dot.
//! Anything in neither list is ignored.

use serde::{Deserialize, Serialize};

use crate::asset::normalize_ext;
use crate::config::{ConfigDiagnostics, FieldPath};
use crate::raster::OutputFormat;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatsConfig {
    /// Decoded, resized and re-encoded per scale
    pub raster: Vec<String>,
    /// Copied byte-for-byte to the base location only
    pub passthrough: Vec<String>,
}

impl Default for FormatsConfig {
    fn default() -> Self {
        Self {
            raster: OutputFormat::EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
            passthrough: ["svg", "json", "riv", "glb", "bin"]
                .map(String::from)
                .to_vec(),
        }
    }
}

impl FormatsConfig {
    const RASTER: FieldPath = FieldPath::new("formats.raster");
    const PASSTHROUGH: FieldPath = FieldPath::new("formats.passthrough");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        for ext in &self.raster {
            if OutputFormat::from_extension(&normalize_ext(ext)).is_none() {
                diag.error_with_hint(
                    Self::RASTER,
                    format!("`{ext}` cannot be encoded"),
                    format!(
                        "supported raster formats: {}; list it under `passthrough` to copy it",
                        OutputFormat::EXTENSIONS.join(", ")
                    ),
                );
            }
        }

        for ext in &self.passthrough {
            let ext = normalize_ext(ext);
            if self.raster.iter().any(|r| normalize_ext(r) == ext) {
                diag.error(
                    Self::PASSTHROUGH,
                    format!("`{ext}` is listed as both raster and pass-through"),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::{AssetKind, Classifier};
    use crate::config::test_parse_config;

    fn validate(toml: &str) -> ConfigDiagnostics {
        let config = test_parse_config(toml);
        let mut diag = ConfigDiagnostics::new();
        config.formats.validate(&mut diag);
        diag
    }

    #[test]
    fn test_formats_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.formats.raster, ["png", "jpg", "jpeg", "webp"]);
        assert!(config.formats.passthrough.iter().any(|e| e == "svg"));
        assert!(!validate("").has_errors());
    }

    #[test]
    fn test_unsupported_raster_extension() {
        let diag = validate("[formats]\nraster = [\"png\", \"gif\"]");
        assert_eq!(diag.errors().len(), 1);
    }

    #[test]
    fn test_overlapping_sets() {
        let diag = validate("[formats]\nraster = [\"png\"]\npassthrough = [\".PNG\", \"svg\"]");
        assert_eq!(diag.errors().len(), 1);
    }

    #[test]
    fn test_leading_dot_accepted() {
        assert!(!validate("[formats]\nraster = [\".png\", \"JPG\"]").has_errors());
    }

    #[test]
    fn test_padded_entries_classify_like_they_validate() {
        let config = test_parse_config("[formats]\nraster = [\" png\"]\npassthrough = [\"json \"]");
        let mut diag = ConfigDiagnostics::new();
        config.formats.validate(&mut diag);
        assert!(!diag.has_errors());

        let classifier = Classifier::from_config(&config.formats);
        assert_eq!(classifier.classify("png"), AssetKind::Raster);
        assert_eq!(classifier.classify("json"), AssetKind::PassThrough);
    }

    #[test]
    fn test_overlap_detected_through_padding() {
        let diag = validate("[formats]\nraster = [\"png\"]\npassthrough = [\" PNG\"]");
        assert_eq!(diag.errors().len(), 1);
    }
}
