//! Emitter configuration
//!
//! # Hierarchy
//!
//! Configuration is layered (later overrides earlier):
//! 1. Built-in defaults
//! 2. TOML file, when the caller has one (`load_toml_file`)
//! 3. Environment variables: `AIRPLANE_CHUNK_SIZE`, `AIRPLANE_FLUSH_ON_EMIT`
//!
//! # Example Config
//!
//! ```toml
//! chunk_size = 8192
//! flush_on_emit = true
//! ```
//!
//! All operations return new instances rather than mutating in place.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Bytes of line content carried per frame. The runner expects this value.
pub const DEFAULT_CHUNK_SIZE: usize = 8192;

pub const CHUNK_SIZE_ENV: &str = "AIRPLANE_CHUNK_SIZE";
pub const FLUSH_ON_EMIT_ENV: &str = "AIRPLANE_FLUSH_ON_EMIT";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitterConfig {
    /// Line content per frame; framing overhead is not counted.
    pub chunk_size: usize,
    /// Flush the sink after every emission.
    pub flush_on_emit: bool,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl EmitterConfig {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            flush_on_emit: true,
        }
    }

    #[must_use]
    pub const fn with_chunk_size(self, chunk_size: usize) -> Self {
        Self { chunk_size, ..self }
    }

    #[must_use]
    pub const fn with_flush_on_emit(self, flush_on_emit: bool) -> Self {
        Self {
            flush_on_emit,
            ..self
        }
    }

    /// Defaults, then environment overrides, validated.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if an environment value does not parse or the
    /// result fails validation.
    pub fn from_env() -> Result<Self> {
        Self::new().apply_env_vars()
    }

    /// Defaults, then the TOML file at `path`, then environment overrides.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file cannot be read and `InvalidConfig` if it is
    /// malformed or the merged result fails validation.
    pub fn load(path: &Path) -> Result<Self> {
        load_toml_file(path)?.apply_env_vars()
    }

    /// Apply `AIRPLANE_*` environment overrides.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` for values that do not parse or fail validation.
    pub fn apply_env_vars(self) -> Result<Self> {
        let config = match std::env::var(CHUNK_SIZE_ENV) {
            Ok(raw) => self.with_chunk_size(parse_env(CHUNK_SIZE_ENV, &raw)?),
            Err(_) => self,
        };

        let config = match std::env::var(FLUSH_ON_EMIT_ENV) {
            Ok(raw) => config.with_flush_on_emit(parse_env(FLUSH_ON_EMIT_ENV, &raw)?),
            Err(_) => config,
        };

        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns `InvalidConfig` if `chunk_size` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(Error::invalid_config(
                "chunk_size must be greater than zero",
            ));
        }
        Ok(())
    }
}

fn parse_env<T>(name: &str, raw: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e| Error::invalid_config(format!("{name}={raw:?}: {e}")))
}

/// Load a TOML file into a config, with defaults for missing keys.
///
/// # Errors
///
/// Returns error if:
/// - File cannot be read
/// - File is not valid TOML for this config
/// - Parsed values fail validation
pub fn load_toml_file(path: &Path) -> Result<EmitterConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::io_error(format!("Failed to read config {}: {e}", path.display())))?;

    let config: EmitterConfig = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}
