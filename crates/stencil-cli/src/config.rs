//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `STENCIL_<SECTION>__<KEY>`, e.g.
//!    `STENCIL_TEMPLATES__DIR` or `STENCIL_GENERATE__CONFIRM`
//! 3. Config file (`--config`, or the platform config directory)
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Template catalog settings.
    pub templates: TemplatesConfig,
    /// Output settings.
    pub output: OutputConfig,
    /// Generation defaults.
    pub generate: GenerateConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplatesConfig {
    /// Catalog directory used when `--templates` is not given.
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "human".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateConfig {
    /// Output directory used when `--out` is not given. Without either, the
    /// definition's `distPath` applies.
    pub out_dir: Option<PathBuf>,
    /// Ask before writing into the output tree.
    pub confirm: bool,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            out_dir: None,
            confirm: true,
        }
    }
}

impl AppConfig {
    /// Load configuration from file and environment on top of the defaults.
    ///
    /// An explicit `config_file` must exist; the default location is
    /// optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let (path, required) = match config_file {
            Some(path) => (path.clone(), true),
            None => (Self::config_path(), false),
        };
        Self::load_from(&path, required, Environment::with_prefix("STENCIL"))
    }

    fn load_from(path: &Path, required: bool, env: Environment) -> anyhow::Result<Self> {
        let settings = Config::builder()
            .add_source(File::new(&path.to_string_lossy(), FileFormat::Toml).required(required))
            .add_source(
                env.prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("failed to read configuration from {}", path.display()))?;

        settings
            .try_deserialize()
            .with_context(|| format!("invalid configuration in {}", path.display()))
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.stencil.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "stencil", "stencil")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".stencil.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn no_env() -> Environment {
        Environment::with_prefix("STENCIL").source(Some(config::Map::new()))
    }

    #[test]
    fn defaults_confirm_and_keep_colors() {
        let cfg = AppConfig::default();
        assert!(cfg.generate.confirm);
        assert!(!cfg.output.no_color);
        assert!(cfg.templates.dir.is_none());
    }

    #[test]
    fn missing_optional_file_returns_defaults() {
        let tmp = TempDir::new().unwrap();
        let cfg = AppConfig::load_from(&tmp.path().join("none.toml"), false, no_env()).unwrap();
        assert_eq!(cfg.output.format, "human");
    }

    #[test]
    fn missing_required_file_is_error() {
        let tmp = TempDir::new().unwrap();
        assert!(AppConfig::load_from(&tmp.path().join("none.toml"), true, no_env()).is_err());
    }

    #[test]
    fn file_values_override_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(
            &path,
            "[templates]\ndir = \"/srv/templates\"\n\n[generate]\nconfirm = false\n",
        )
        .unwrap();

        let cfg = AppConfig::load_from(&path, true, no_env()).unwrap();
        assert_eq!(cfg.templates.dir, Some(PathBuf::from("/srv/templates")));
        assert!(!cfg.generate.confirm);
        assert!(!cfg.output.no_color);
    }

    #[test]
    fn environment_overrides_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "[output]\nno_color = false\n").unwrap();

        let mut vars = config::Map::new();
        vars.insert("STENCIL_OUTPUT__NO_COLOR".to_string(), "true".to_string());
        vars.insert("STENCIL_GENERATE__OUT_DIR".to_string(), "/tmp/out".to_string());
        let env = Environment::with_prefix("STENCIL").source(Some(vars));
        let cfg = AppConfig::load_from(&path, true, env).unwrap();
        assert!(cfg.output.no_color);
        assert_eq!(cfg.generate.out_dir, Some(PathBuf::from("/tmp/out")));
    }

    #[test]
    fn config_path_is_not_empty() {
        assert!(!AppConfig::config_path().as_os_str().is_empty());
    }
}
