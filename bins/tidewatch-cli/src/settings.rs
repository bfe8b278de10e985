//! Engine settings resolution for the CLI.
//!
//! Layers, lowest precedence first: built-in defaults, the config file,
//! `TIDEWATCH_*` environment variables, then command-line flags.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use tidewatch_core::{ConfigUpdate, EngineConfig};

pub const ENV_PREFIX: &str = "TIDEWATCH";

/// `<config_dir>/tidewatch/engine.toml`, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("tidewatch").join("engine.toml"))
}

/// Read a partial engine config from `path` and the environment.
///
/// An explicit `path` must exist. Without one the default path is used if
/// present. `env` replaces the process environment (tests only).
pub fn load_update(
    path: Option<&Path>,
    env: Option<config::Map<String, String>>,
) -> Result<ConfigUpdate> {
    let mut builder = Config::builder();

    match path {
        Some(path) => {
            builder = builder.add_source(File::from(path).required(true));
        }
        None => {
            if let Some(default) = default_config_path() {
                builder = builder.add_source(File::from(default).required(false));
            }
        }
    }

    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .try_parsing(true)
            .source(env),
    );

    let layered = builder.build().context("Failed to load engine config")?;
    layered
        .try_deserialize::<ConfigUpdate>()
        .context("Invalid engine config")
}

/// Defaults merged with the file/env layer and then the CLI overrides,
/// range-checked.
pub fn resolve(layered: &ConfigUpdate, overrides: &ConfigUpdate) -> Result<EngineConfig> {
    let config = EngineConfig::default().merged(layered).merged(overrides);
    config.validate().context("Engine config out of range")?;
    Ok(config)
}
