//! Secret lookup for the note service login.
//!
//! Lookup order:
//! 1. `NOTEWALL_SECRET` environment variable
//! 2. Credentials file (TOML), one table per service:
//!
//! ```toml
//! [notes]
//! "me@example.com" = "secret"
//! ```

use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const SECRET_ENV: &str = "NOTEWALL_SECRET";
pub const SERVICE: &str = "notes";

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("no secret stored for {username} ({service}); set NOTEWALL_SECRET or add it to {path}")]
    NotFound {
        service: String,
        username: String,
        path: PathBuf,
    },
    #[error("failed to read credentials from {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse credentials from {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Resolves the secret for an account
pub trait CredentialStore {
    fn secret(&self, service: &str, username: &str) -> Result<String, CredentialError>;
}

#[derive(Debug, Default, Deserialize)]
#[serde(transparent)]
struct CredentialFile {
    services: HashMap<String, HashMap<String, String>>,
}

/// Environment variable first, then a TOML file
#[derive(Debug, Clone)]
pub struct FileCredentials {
    env_secret: Option<String>,
    path: PathBuf,
}

impl FileCredentials {
    pub fn new(env_secret: Option<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            env_secret: env_secret.filter(|s| !s.is_empty()),
            path: path.into(),
        }
    }

    /// Read the environment once, file at `path`
    pub fn from_env(path: impl Into<PathBuf>) -> Self {
        Self::new(std::env::var(SECRET_ENV).ok(), path)
    }

    /// `~/.config/notewall/credentials.toml`
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("notewall")
            .join("credentials.toml")
    }

    fn load(path: &Path) -> Result<CredentialFile, CredentialError> {
        if !path.exists() {
            return Ok(CredentialFile::default());
        }
        let content = std::fs::read_to_string(path).map_err(|source| CredentialError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| CredentialError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl CredentialStore for FileCredentials {
    fn secret(&self, service: &str, username: &str) -> Result<String, CredentialError> {
        if let Some(secret) = &self.env_secret {
            return Ok(secret.clone());
        }
        Self::load(&self.path)?
            .services
            .get(service)
            .and_then(|accounts| accounts.get(username))
            .cloned()
            .ok_or_else(|| CredentialError::NotFound {
                service: service.to_string(),
                username: username.to_string(),
                path: self.path.clone(),
            })
    }
}
