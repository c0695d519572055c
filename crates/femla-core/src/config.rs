//! Process-wide kernel configuration.
//!
//! The only run-time knob is the ambient ("world") spatial dimension returned
//! by the [`GeoIndex::World`](crate::geometry::GeoIndex::World) geometry kind.
//! It is fixed the first time it is read, so that every geometry-sized
//! container created during a run agrees on it.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::error::{LinalgError, Result};
use crate::geometry::MAX_DIM;

/// Environment variable read by [`Config::from_env`].
pub const WORLD_DIM_ENV: &str = "FEMLA_WORLD_DIM";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Dimension of the ambient space, `1..=3`.
    pub world_dim: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self { world_dim: MAX_DIM }
    }
}

impl Config {
    /// Check that every field is inside its supported range.
    pub fn validate(&self) -> Result<()> {
        if self.world_dim == 0 || self.world_dim > MAX_DIM {
            return Err(LinalgError::InvalidConfig {
                reason: format!(
                    "world_dim must be in 1..={MAX_DIM}, got {}",
                    self.world_dim
                ),
            });
        }
        Ok(())
    }

    /// Build a configuration from the process environment.
    ///
    /// Unset variables keep their default value.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(raw) = lookup(WORLD_DIM_ENV) {
            config.world_dim =
                raw.trim()
                    .parse()
                    .map_err(|_| LinalgError::InvalidConfig {
                        reason: format!("{WORLD_DIM_ENV} is not an unsigned integer: {raw:?}"),
                    })?;
        }
        config.validate()?;
        Ok(config)
    }
}

static GLOBAL: OnceLock<Config> = OnceLock::new();

/// Install the process-wide configuration.
///
/// Succeeds when nothing has been installed or read yet, or when `config`
/// equals the configuration already in use.
pub fn install(config: Config) -> Result<()> {
    config.validate()?;
    let current = *GLOBAL.get_or_init(|| config);
    if current != config {
        return Err(LinalgError::ConfigFrozen {
            world_dim: current.world_dim,
        });
    }
    log::debug!("femla configuration installed: {config:?}");
    Ok(())
}

/// The configuration in use. Freezes the default if none was installed.
pub fn get() -> Config {
    *GLOBAL.get_or_init(Config::default)
}

/// Shorthand for `get().world_dim`.
pub fn world_dim() -> usize {
    get().world_dim
}
