//! Config file discovery.

use std::path::{Path, PathBuf};

/// Find the config file by searching upward from `start`.
///
/// An absolute `config_name` is returned as-is when it exists.
///
/// ```text
/// /home/user/app/assets_source/icons/  ← start
/// /home/user/app/densify.toml          ← found
/// ```
pub fn find_config_file(config_name: &Path, start: &Path) -> Option<PathBuf> {
    if config_name.is_absolute() {
        return config_name.is_file().then(|| config_name.to_path_buf());
    }

    start
        .ancestors()
        .map(|dir| dir.join(config_name))
        .find(|candidate| candidate.is_file())
}
