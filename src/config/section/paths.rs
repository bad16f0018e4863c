//! `[paths]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [paths]
//! source = "assets_source"     # Original, full-resolution assets
//! dest = "assets/images"       # Generated variants
//! skip_density_dirs = true     # Ignore `2.0x/`-style dirs under source
//! ```
//!
//! Relative paths resolve against the directory holding `densify.toml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

/// Source and destination roots.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub source: PathBuf,
    pub dest: PathBuf,

    /// Skip `<N.N>x/` directories directly under the source root, so a
    /// source that once held generated output is not re-ingested.
    pub skip_density_dirs: bool,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            source: "assets_source".into(),
            dest: "assets/images".into(),
            skip_density_dirs: true,
        }
    }
}

impl PathsConfig {
    const SOURCE: FieldPath = FieldPath::new("paths.source");
    const DEST: FieldPath = FieldPath::new("paths.dest");

    /// Resolve both roots against `root`, expanding a leading `~`.
    pub fn normalize(&mut self, root: &Path) {
        self.source = resolve(root, &self.source);
        self.dest = resolve(root, &self.dest);
    }

    /// Check root relationships. Expects normalized paths.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.source == self.dest {
            diag.error_with_hint(
                Self::DEST,
                format!(
                    "destination is the source root `{}`",
                    self.dest.display()
                ),
                "generated variants must live outside the originals",
            );
        } else if self.source.starts_with(&self.dest) {
            diag.error_with_hint(
                Self::DEST,
                format!(
                    "destination `{}` contains the source root",
                    self.dest.display()
                ),
                "a clean run would delete the originals; pick a sibling directory",
            );
        }

        if self.source.is_file() {
            diag.error(
                Self::SOURCE,
                format!("`{}` is a file, not a directory", self.source.display()),
            );
        }
    }
}

fn resolve(root: &Path, path: &Path) -> PathBuf {
    let expanded = shellexpand::tilde(&path.to_string_lossy()).into_owned();
    crate::utils::normalize_path(&root.join(expanded))
}
