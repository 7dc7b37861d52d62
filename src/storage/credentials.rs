//! The credential file.
//!
//! Connection details live in a flat JSON object written with four-space
//! indentation. The file is read once at startup and written once during
//! onboarding; it is not encrypted.

use std::{
    io,
    path::{Path, PathBuf},
};

use serde::Serialize;
use tracing::debug;

use crate::Config;

/// File name used when no path is given.
pub const DEFAULT_FILE: &str = "secret_config.json";

/// Reads and writes the configuration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialStore {
    path: PathBuf,
}

impl Default for CredentialStore {
    fn default() -> Self {
        Self::new(DEFAULT_FILE)
    }
}

impl CredentialStore {
    /// A store backed by the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the backing file exists.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Loads the configuration.
    ///
    /// Returns `Ok(None)` when the file does not exist, which is the signal to
    /// run onboarding.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(&self) -> Result<Option<Config>, Error> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(Error::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let config = serde_json::from_str(&content).map_err(|source| Error::Parse {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), "loaded configuration");
        Ok(Some(config))
    }

    /// Writes the configuration, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized or the file
    /// cannot be written.
    pub fn save(&self, config: &Config) -> Result<(), Error> {
        let content = render(config)?;
        std::fs::write(&self.path, content).map_err(|source| Error::Write {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), "saved configuration");
        Ok(())
    }
}

fn render(config: &Config) -> Result<Vec<u8>, Error> {
    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    config.serialize(&mut serializer).map_err(Error::Serialize)?;
    Ok(buffer)
}

/// Errors reading or writing the credential file.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The file exists but could not be read.
    #[error("Failed to read config file {}: {source}", path.display())]
    Read {
        /// The file.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },

    /// The file is not a valid configuration.
    #[error("Failed to parse config file {}: {source}", path.display())]
    Parse {
        /// The file.
        path: PathBuf,
        /// The underlying JSON error.
        source: serde_json::Error,
    },

    /// The configuration could not be serialized.
    #[error("Failed to serialize config: {0}")]
    Serialize(serde_json::Error),

    /// The file could not be written.
    #[error("Failed to write config file {}: {source}", path.display())]
    Write {
        /// The file.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },
}
