//! Configuration System
//!
//! Layered configuration for synthesis runs: built-in defaults, then an
//! optional `unicdk.toml` in the workspace, then `UNICDK_*` environment
//! variables (`__` separates nested keys, e.g. `UNICDK_SYNTH__FORCE_CLEAN`).

use crate::error::AppError;
use crate::logging::LoggingConfig;
use config::{Config, ConfigBuilder, Environment, File};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Workspace config file name
pub const CONFIG_FILE: &str = "unicdk.toml";

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UnicdkConfig {
    #[serde(default)]
    pub synth: SynthConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Synthesis settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SynthConfig {
    /// Directory the default `<kind>.<id>.o` outdirs are created in
    #[serde(default = "default_out_root")]
    pub out_root: PathBuf,

    /// Remove each app's outdir before synthesizing into it
    #[serde(default)]
    pub force_clean: bool,
}

fn default_out_root() -> PathBuf {
    PathBuf::from(".")
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            out_root: default_out_root(),
            force_clean: false,
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub enum ValidationError {
    Synth(String),
    Logging(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::Synth(msg) => write!(f, "Synth: {}", msg),
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl UnicdkConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.synth.out_root.as_os_str().is_empty() {
            errors.push(ValidationError::Synth(
                "out_root cannot be empty".to_string(),
            ));
        }
        if let Err(e) = self.logging.validate() {
            errors.push(ValidationError::Logging(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Loads [`UnicdkConfig`] from files and the environment
pub struct ConfigLoader;

impl ConfigLoader {
    /// Defaults, then `<workspace_root>/unicdk.toml` if present, then env.
    pub fn load(workspace_root: &Path) -> Result<UnicdkConfig, AppError> {
        let builder = builder_with_defaults()?
            .add_source(File::from(workspace_root.join(CONFIG_FILE)).required(false));
        Self::finish(builder)
    }

    /// Defaults, then the given file (which must exist), then env.
    pub fn load_from_file(path: &Path) -> Result<UnicdkConfig, AppError> {
        let builder = builder_with_defaults()?.add_source(File::from(path).required(true));
        Self::finish(builder)
    }

    fn finish(
        builder: ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<UnicdkConfig, AppError> {
        let config: UnicdkConfig = builder
            .add_source(
                Environment::with_prefix("UNICDK")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            AppError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                error_msgs.join("\n")
            ))
        })?;
        Ok(config)
    }
}

fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, AppError> {
    Ok(Config::builder()
        .set_default("synth.out_root", ".")?
        .set_default("synth.force_clean", false)?)
}
