//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (applied at the call-site, not here)
//! 2. Environment variables prefixed `TRACKER__`, e.g. `TRACKER__VALIDATION__MODE`
//! 3. TOML config file (`--config`, else the platform config dir)
//! 4. Built-in defaults
//!
//! Unset validation and identifier keys defer to the bundle and the preheat
//! snapshot respectively.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::{Deserialize, Serialize};
use tracker_core::domain::{IdScheme, ImportStrategy, TrackerIdentifierParams, ValidationMode};

const ENV_PREFIX: &str = "TRACKER";
const ENV_SEPARATOR: &str = "__";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub validation: ValidationConfig,
    pub identifiers: IdentifierConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<ValidationMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub import_strategy: Option<ImportStrategy>,
}

/// Per-kind identifier scheme overrides.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentifierConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub org_unit: Option<IdScheme>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub program: Option<IdScheme>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub program_stage: Option<IdScheme>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_option_combo: Option<IdScheme>,
}

impl IdentifierConfig {
    /// Overlay the configured schemes on `base`.
    pub fn apply(&self, base: TrackerIdentifierParams) -> TrackerIdentifierParams {
        TrackerIdentifierParams {
            org_unit: self.org_unit.unwrap_or(base.org_unit),
            program: self.program.unwrap_or(base.program),
            program_stage: self.program_stage.unwrap_or(base.program_stage),
            category_option_combo: self
                .category_option_combo
                .unwrap_or(base.category_option_combo),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    /// Default report format: `table`, `json` or `codes`.
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "table".into(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration, layering file and environment over the defaults.
    ///
    /// An explicit `config_file` must exist; the default location is optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let (path, required) = match config_file {
            Some(path) => (path.clone(), true),
            None => (Self::config_path(), false),
        };
        Self::load_from(&path, required)
    }

    fn load_from(path: &Path, required: bool) -> anyhow::Result<Self> {
        let defaults = config::Config::try_from(&Self::default())
            .context("Failed to encode built-in defaults")?;

        config::Config::builder()
            .add_source(defaults)
            .add_source(
                config::File::from(path)
                    .format(config::FileFormat::Toml)
                    .required(required),
            )
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator(ENV_SEPARATOR)
                    .separator(ENV_SEPARATOR),
            )
            .build()
            .with_context(|| format!("Failed to read configuration from {}", path.display()))?
            .try_deserialize()
            .context("Invalid configuration value")
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.tracker.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("org", "tracker", "tracker")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".tracker.toml"))
    }
}
