//! `densify init`: write a default config next to the current directory.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::config::Config;
use crate::log;

/// Write `config_name` with every default spelled out, then create the
/// default source directory. Refuses to overwrite an existing config.
pub fn init_project(root: &Path, config_name: &Path) -> Result<()> {
    let config_path = root.join(config_name);
    if config_path.exists() {
        bail!("{} already exists", config_path.display());
    }

    let config = Config::default();
    let content = toml::to_string_pretty(&config).context("failed to serialize default config")?;
    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&config_path, content)
        .with_context(|| format!("failed to write {}", config_path.display()))?;

    let source = root.join(&config.paths.source);
    fs::create_dir_all(&source)
        .with_context(|| format!("failed to create {}", source.display()))?;

    log!("init"; "wrote {}", config_path.display());
    log!("init"; "put original assets in {}, then run `densify generate`", config.paths.source.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_writes_loadable_config() {
        let dir = tempfile::tempdir().unwrap();
        init_project(dir.path(), Path::new("densify.toml")).unwrap();

        let content = fs::read_to_string(dir.path().join("densify.toml")).unwrap();
        let (config, ignored) = Config::from_str(&content).unwrap();
        assert!(ignored.is_empty());
        assert_eq!(config.variants.base_width, 300);
        assert!(dir.path().join("assets_source").is_dir());
    }

    #[test]
    fn test_init_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("densify.toml"), "# mine").unwrap();

        assert!(init_project(dir.path(), Path::new("densify.toml")).is_err());
        assert_eq!(
            fs::read_to_string(dir.path().join("densify.toml")).unwrap(),
            "# mine"
        );
    }
}
