//! TOML configuration
//!
//! ```toml
//! [storage]
//! path = "./dreams.json"
//! seed_samples = true
//!
//! [server]
//! addr = "127.0.0.1:3000"
//!
//! [log]
//! level = "info"
//! ```
//!
//! Every section and key is optional; missing ones take the defaults.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{Error, Result, DEFAULT_ADDR, DEFAULT_STORE_PATH};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub storage: Storage,
    pub server: Server,
    pub log: Log,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Storage {
    /// JSON store file
    pub path: String,
    /// Write the sample dreams into a store that does not exist yet
    pub seed_samples: bool,
}

impl Default for Storage {
    fn default() -> Self {
        Self {
            path: DEFAULT_STORE_PATH.to_string(),
            seed_samples: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Server {
    pub addr: String,
}

impl Default for Server {
    fn default() -> Self {
        Self {
            addr: DEFAULT_ADDR.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Log {
    /// `EnvFilter` directive, overridden by `RUST_LOG`
    pub level: String,
}

impl Default for Log {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Read, parse and validate a config file
pub fn load(path: &Path) -> Result<Config> {
    let raw = fs::read_to_string(path).map_err(|source| Error::ReadConfig {
        path: path.to_path_buf(),
        source,
    })?;

    let cfg = parse(&raw).map_err(|err| match err {
        ParseError::Toml(source) => Error::ParseConfig {
            path: path.to_path_buf(),
            source,
        },
        ParseError::Invalid(err) => err,
    })?;

    Ok(cfg)
}

enum ParseError {
    Toml(toml::de::Error),
    Invalid(Error),
}

fn parse(raw: &str) -> std::result::Result<Config, ParseError> {
    let cfg: Config = toml::from_str(raw).map_err(ParseError::Toml)?;
    validate(&cfg).map_err(ParseError::Invalid)?;
    Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
    if cfg.storage.path.trim().is_empty() {
        return Err(Error::Validation {
            message: "storage.path must be non-empty.".to_string(),
        });
    }
    if cfg.server.addr.trim().is_empty() {
        return Err(Error::Validation {
            message: "server.addr must be non-empty.".to_string(),
        });
    }
    if cfg.log.level.trim().is_empty() {
        return Err(Error::Validation {
            message: "log.level must be non-empty.".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
