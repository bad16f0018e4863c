//! Asset classification by file extension.

use std::path::Path;

use rustc_hash::FxHashSet;
use serde::Serialize;

use crate::config::FormatsConfig;

/// Kind of source asset, determines processing strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    /// Decodable bitmap - resized into every density variant
    Raster,
    /// Copied verbatim to the base destination only
    PassThrough,
    /// Unrecognized - no output, no error
    Ignored,
}

/// Maps file extensions to [`AssetKind`].
///
/// Extension sets are stored lowercased and without the leading dot, so
/// lookups are case-insensitive. Raster takes precedence if a set overlap
/// slips past config validation.
#[derive(Debug, Clone)]
pub struct Classifier {
    raster: FxHashSet<String>,
    passthrough: FxHashSet<String>,
}

impl Classifier {
    pub fn new<R, P>(raster: R, passthrough: P) -> Self
    where
        R: IntoIterator,
        R::Item: AsRef<str>,
        P: IntoIterator,
        P::Item: AsRef<str>,
    {
        Self {
            raster: raster.into_iter().map(|e| normalize_ext(e.as_ref())).collect(),
            passthrough: passthrough
                .into_iter()
                .map(|e| normalize_ext(e.as_ref()))
                .collect(),
        }
    }

    pub fn from_config(formats: &FormatsConfig) -> Self {
        Self::new(&formats.raster, &formats.passthrough)
    }

    /// Classify a bare extension (`"PNG"`, `"json"`, `".svg"`).
    pub fn classify(&self, ext: &str) -> AssetKind {
        let ext = normalize_ext(ext);
        if self.raster.contains(&ext) {
            AssetKind::Raster
        } else if self.passthrough.contains(&ext) {
            AssetKind::PassThrough
        } else {
            AssetKind::Ignored
        }
    }

    /// Classify a file path by its extension. No extension means ignored.
    pub fn classify_path(&self, path: &Path) -> AssetKind {
        path.extension()
            .and_then(|e| e.to_str())
            .map_or(AssetKind::Ignored, |ext| self.classify(ext))
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::from_config(&FormatsConfig::default())
    }
}

/// Canonical form of a configured or discovered extension: trimmed,
/// lowercased, without the leading dot.
pub fn normalize_ext(ext: &str) -> String {
    ext.trim().trim_start_matches('.').to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_raster_extensions_case_insensitive() {
        let classifier = Classifier::default();
        for ext in ["png", "PNG", "jpg", "Jpeg", "webp", "WEBP"] {
            assert_eq!(classifier.classify(ext), AssetKind::Raster, "{ext}");
        }
    }

    #[test]
    fn test_passthrough_extensions() {
        let classifier = Classifier::default();
        assert_eq!(classifier.classify("svg"), AssetKind::PassThrough);
        assert_eq!(classifier.classify("JSON"), AssetKind::PassThrough);
        assert_eq!(classifier.classify("gif"), AssetKind::Ignored);
    }

    #[test]
    fn test_leading_dot_accepted() {
        let classifier = Classifier::new([".PNG"], [".Json"]);
        assert_eq!(classifier.classify("png"), AssetKind::Raster);
        assert_eq!(classifier.classify(".json"), AssetKind::PassThrough);
    }

    #[test]
    fn test_padded_config_entries_still_match() {
        let classifier = Classifier::new([" png", "webp "], ["\tjson"]);
        assert_eq!(classifier.classify("png"), AssetKind::Raster);
        assert_eq!(classifier.classify("WEBP"), AssetKind::Raster);
        assert_eq!(classifier.classify("json"), AssetKind::PassThrough);
    }

    #[test]
    fn test_classify_path() {
        let classifier = Classifier::default();
        assert_eq!(
            classifier.classify_path(&PathBuf::from("sub/dir/icon.png")),
            AssetKind::Raster
        );
        assert_eq!(
            classifier.classify_path(&PathBuf::from("data/stats.json")),
            AssetKind::PassThrough
        );
        assert_eq!(
            classifier.classify_path(&PathBuf::from("README")),
            AssetKind::Ignored
        );
        assert_eq!(
            classifier.classify_path(&PathBuf::from("notes.txt")),
            AssetKind::Ignored
        );
    }

    #[test]
    fn test_configured_sets_replace_defaults() {
        let classifier = Classifier::new(["png"], ["ttf"]);
        assert_eq!(classifier.classify("jpg"), AssetKind::Ignored);
        assert_eq!(classifier.classify("ttf"), AssetKind::PassThrough);
        assert_eq!(classifier.classify("svg"), AssetKind::Ignored);
    }

    #[test]
    fn test_exactly_one_kind() {
        let classifier = Classifier::default();
        for ext in ["png", "svg", "json", "txt", "", "tar.gz"] {
            let kind = classifier.classify(ext);
            let matches = [AssetKind::Raster, AssetKind::PassThrough, AssetKind::Ignored]
                .iter()
                .filter(|k| **k == kind)
                .count();
            assert_eq!(matches, 1);
        }
    }
}
