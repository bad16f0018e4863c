//! Project configuration management.
//!
//! Handles loading and validating `densify.toml`.
//!
//! # Lookup
//!
//! The config file is searched upward from the current directory. When
//! none is found the built-in defaults apply and paths resolve against
//! the current directory. Naming a config explicitly with `-C` makes a
//! missing file an error.
//!
//! # Precedence
//!
//! Command-line flags override file values, which override defaults.
//! Path flags (`--src`, `--dest`) resolve against the current directory,
//! file paths against the config file's directory.

mod section;
mod types;
mod util;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::asset::Classifier;
use crate::cli::{Cli, RunArgs};
use crate::core::Scale;
use crate::pipeline::{GenerationRequest, PipelineOptions};
use crate::{debug, log};

pub use section::{EncodeConfig, FormatsConfig, PathsConfig, VariantsConfig};
pub use types::{ConfigDiagnostics, ConfigError, FieldPath};
pub use util::find_config_file;

/// Config file name looked up when `-C` is not given.
pub const DEFAULT_CONFIG_NAME: &str = "densify.toml";

/// Root configuration, one field per `densify.toml` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Loaded config file, `None` when running on defaults
    #[serde(skip)]
    pub config_path: Option<PathBuf>,

    /// Directory relative paths in the file resolve against
    #[serde(skip)]
    pub root: PathBuf,

    pub paths: PathsConfig,
    pub variants: VariantsConfig,
    pub formats: FormatsConfig,
    pub encode: EncodeConfig,
}

impl Config {
    /// Load configuration for a `generate` or `plan` run.
    ///
    /// Collects every problem (file values and flags alike) and fails
    /// with all of them before any file is touched.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current working directory")?;

        let mut config = match find_config_file(&cli.config, &cwd) {
            Some(path) => {
                debug!("config"; "using {}", path.display());
                let mut config = Self::from_path(&path)?;
                config.root = path.parent().map(Path::to_path_buf).unwrap_or_default();
                config.config_path = Some(path);
                config
            }
            None if cli.config != Path::new(DEFAULT_CONFIG_NAME) => {
                bail!("config file `{}` not found", cli.config.display());
            }
            None => {
                debug!("config"; "no {} found, using defaults", DEFAULT_CONFIG_NAME);
                Self {
                    root: cwd.clone(),
                    ..Self::default()
                }
            }
        };

        let mut diag = ConfigDiagnostics::new();
        if let Some(args) = cli.run_args() {
            config.apply_run_args(args, &cwd, &mut diag);
        }
        config.normalize_paths();
        config.validate(&mut diag);

        diag.print_warnings();
        diag.into_result().map_err(ConfigError::Diagnostics)?;
        Ok(config)
    }

    /// Parse configuration from a TOML string, reporting unknown keys.
    pub fn from_str(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::from_str(&content)
            .with_context(|| format!("failed to parse `{}`", path.display()))?;

        if !ignored.is_empty() {
            log!("warning"; "unknown fields in {}, ignoring:", path.display());
            for field in &ignored {
                eprintln!("- {field}");
            }
        }

        Ok(config)
    }

    // ========================================================================
    // command-line overrides
    // ========================================================================

    fn apply_run_args(&mut self, args: &RunArgs, cwd: &Path, diag: &mut ConfigDiagnostics) {
        if let Some(src) = &args.src {
            self.paths.source = cwd.join(src);
        }
        if let Some(dest) = &args.dest {
            self.paths.dest = cwd.join(dest);
        }
        Self::update_option(&mut self.variants.base_width, args.base_width.as_ref());
        Self::update_option(&mut self.variants.gate, args.gate.as_ref());
        Self::update_option(&mut self.encode.jobs, args.jobs.as_ref());
        Self::update_option(&mut self.encode.jpeg_quality, args.quality.as_ref());

        if let Some(list) = &args.scales {
            match Scale::parse_list(list) {
                Ok(scales) => self.variants.scales = scales,
                Err(err) => diag.error_with_hint(
                    FieldPath::new("--scales"),
                    err.to_string(),
                    "pass a comma-separated list, e.g. `--scales 2,3,4`",
                ),
            }
        }
    }

    #[inline]
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    fn normalize_paths(&mut self) {
        self.root = crate::utils::normalize_path(&self.root);
        self.paths.normalize(&self.root);
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate every section into one diagnostics batch.
    fn validate(&self, diag: &mut ConfigDiagnostics) {
        self.paths.validate(diag);
        self.variants.validate(diag);
        self.formats.validate(diag);
        self.encode.validate(diag);
    }

    // ========================================================================
    // pipeline inputs
    // ========================================================================

    pub fn request(&self) -> GenerationRequest {
        GenerationRequest {
            source_root: self.paths.source.clone(),
            dest_root: self.paths.dest.clone(),
            base_width: self.variants.base_width,
            scales: self.variants.scales.clone(),
        }
    }

    pub fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions {
            classifier: Classifier::from_config(&self.formats),
            gate: self.variants.gate,
            encode: self.encode.options(),
            jobs: self.encode.jobs,
            skip_density_dirs: self.paths.skip_density_dirs,
        }
    }
}

// ============================================================================
// Test Helpers
// ============================================================================

#[cfg(test)]
pub fn test_parse_config(content: &str) -> Config {
    Config::from_str(content)
        .map(|(config, _)| config)
        .expect("test config should parse")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::AssetKind;
    use crate::freshness::GatePolicy;

    fn run_args() -> RunArgs {
        RunArgs {
            src: None,
            dest: None,
            base_width: None,
            scales: None,
            gate: None,
            jobs: None,
            quality: None,
        }
    }

    fn resolved(content: &str, args: &RunArgs) -> (Config, ConfigDiagnostics) {
        let dir = tempfile::tempdir().unwrap();
        let (mut config, _) = Config::from_str(content).unwrap();
        config.root = dir.path().to_path_buf();

        let mut diag = ConfigDiagnostics::new();
        config.apply_run_args(args, dir.path(), &mut diag);
        config.normalize_paths();
        config.validate(&mut diag);
        (config, diag)
    }

    #[test]
    fn test_unknown_fields_reported() {
        let (config, ignored) =
            Config::from_str("[variants]\nbase_width = 64\ncolour = \"red\"\n[extra]\nx = 1")
                .unwrap();
        assert_eq!(config.variants.base_width, 64);
        assert_eq!(ignored, ["variants.colour", "extra"]);
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            Config::from_str("[variants\nbase_width = 1"),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn test_cli_overrides_file() {
        let args = RunArgs {
            base_width: Some(120),
            scales: Some("1.5,2".into()),
            gate: Some(GatePolicy::Each),
            jobs: Some(3),
            quality: Some(70),
            ..run_args()
        };
        let (config, diag) = resolved("[variants]\nbase_width = 64\nscales = [4.0]", &args);

        assert!(!diag.has_errors());
        assert_eq!(config.variants.base_width, 120);
        assert_eq!(config.variants.scales.len(), 2);
        assert_eq!(config.variants.gate, GatePolicy::Each);
        assert_eq!(config.encode.jobs, 3);
        assert_eq!(config.encode.jpeg_quality, 70);
    }

    #[test]
    fn test_bad_scale_flag_is_a_diagnostic() {
        let args = RunArgs {
            scales: Some("2,three".into()),
            base_width: Some(0),
            ..run_args()
        };
        let (_, diag) = resolved("", &args);
        // both the flag and the zero width are reported together
        assert_eq!(diag.errors().len(), 2);
    }

    #[test]
    fn test_file_paths_resolve_against_root() {
        let (config, diag) = resolved("[paths]\nsource = \"raw\"\ndest = \"public/img\"", &run_args());
        assert!(!diag.has_errors());
        assert!(config.paths.source.starts_with(&config.root));
        assert!(config.paths.dest.ends_with("public/img"));
    }

    #[test]
    fn test_same_roots_rejected() {
        let (_, diag) = resolved("[paths]\nsource = \"a\"\ndest = \"./a\"", &run_args());
        assert!(diag.has_errors());
    }

    #[test]
    fn test_request_and_options() {
        let (config, _) = resolved(
            "[variants]\nbase_width = 48\nscales = [2.0]\n[formats]\npassthrough = [\"txt\"]\n[encode]\njobs = 2",
            &run_args(),
        );

        let request = config.request();
        assert_eq!(request.base_width, 48);
        assert_eq!(request.scales[0].dir_name(), "2.0x");
        assert!(request.validate().is_ok());

        let options = config.pipeline_options();
        assert_eq!(options.jobs, 2);
        assert_eq!(options.classifier.classify("txt"), AssetKind::PassThrough);
        assert_eq!(options.classifier.classify("svg"), AssetKind::Ignored);
        assert_eq!(options.classifier.classify("PNG"), AssetKind::Raster);
    }

    #[test]
    fn test_defaults_serialize_back() {
        let text = toml::to_string_pretty(&Config::default()).unwrap();
        assert!(text.contains("[variants]"));
        assert!(!text.contains("root"));

        let (parsed, ignored) = Config::from_str(&text).unwrap();
        assert!(ignored.is_empty());
        assert_eq!(parsed.variants.base_width, 300);
    }
}
