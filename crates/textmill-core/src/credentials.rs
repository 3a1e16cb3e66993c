//! OpenAI API key resolution and storage.
//!
//! The environment variable wins; otherwise the key comes from a small JSON
//! file under the platform config directory, written from the settings panel.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::json;
use thiserror::Error;

const KEY_ENV_VAR: &str = "OPENAI_API_KEY";
const KEY_FIELD: &str = "openai_api_key";

#[derive(Debug, Error)]
pub enum CredentialsError {
    #[error("could not determine a config directory")]
    NoConfigDir,
    #[error("credentials io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed credentials file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("no API key configured; set OPENAI_API_KEY or save one in settings")]
    Missing,
}

/// Credential storage rooted at a config directory.
pub struct CredentialsStore {
    path: PathBuf,
}

impl CredentialsStore {
    /// Store under the platform config directory.
    pub fn default_location() -> Result<Self, CredentialsError> {
        let base = dirs::config_dir()
            .or_else(dirs::home_dir)
            .ok_or(CredentialsError::NoConfigDir)?;
        Ok(Self::at(base.join("textmill")))
    }

    /// Store rooted at an explicit directory.
    pub fn at(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join("credentials.json"),
        }
    }

    pub fn save_api_key(&self, key: &str) -> Result<(), CredentialsError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = json!({ KEY_FIELD: key }).to_string();
        fs::write(&self.path, contents)?;
        log::info!("saved API key to {}", self.path.display());
        Ok(())
    }

    pub fn load_api_key(&self) -> Result<String, CredentialsError> {
        if !self.path.exists() {
            return Err(CredentialsError::Missing);
        }
        let contents = fs::read_to_string(&self.path)?;
        let value: serde_json::Value = serde_json::from_str(&contents)?;
        value
            .get(KEY_FIELD)
            .and_then(serde_json::Value::as_str)
            .filter(|key| !key.is_empty())
            .map(str::to_string)
            .ok_or(CredentialsError::Missing)
    }

    /// Environment variable first, stored key second.
    pub fn resolve_api_key(&self) -> Result<String, CredentialsError> {
        if let Ok(key) = std::env::var(KEY_ENV_VAR) {
            if !key.is_empty() {
                log::debug!("using API key from {KEY_ENV_VAR}");
                return Ok(key);
            }
        }
        self.load_api_key()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempdir().unwrap();
        let store = CredentialsStore::at(dir.path());
        store.save_api_key("sk-test-123").unwrap();
        assert_eq!(store.load_api_key().unwrap(), "sk-test-123");
    }

    #[test]
    fn missing_file_reports_missing() {
        let dir = tempdir().unwrap();
        let store = CredentialsStore::at(dir.path());
        assert!(matches!(
            store.load_api_key(),
            Err(CredentialsError::Missing)
        ));
    }

    #[test]
    fn empty_key_in_file_reports_missing() {
        let dir = tempdir().unwrap();
        let store = CredentialsStore::at(dir.path());
        store.save_api_key("").unwrap();
        assert!(matches!(
            store.load_api_key(),
            Err(CredentialsError::Missing)
        ));
    }

    #[test]
    fn garbage_file_reports_parse_error() {
        let dir = tempdir().unwrap();
        let store = CredentialsStore::at(dir.path());
        fs::create_dir_all(dir.path()).unwrap();
        fs::write(dir.path().join("credentials.json"), "not json").unwrap();
        assert!(matches!(
            store.load_api_key(),
            Err(CredentialsError::Parse(_))
        ));
    }
}
