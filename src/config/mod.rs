//! Settings and configuration utilities.
//!
//! Reads settings from $HOME/.review-triage/settings.json and uses them as a
//! fallback for environment variables. Also owns the bounded request timeout
//! applied to the outbound backend call.

use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::error::TriageError;

/// Environment variables consulted for the backend credential, in order.
pub const API_KEY_VARS: &[&str] = &["REVIEW_TRIAGE_API_KEY", "OPENAI_API_KEY"];

/// Environment variable overriding the backend base URL.
pub const BASE_URL_VAR: &str = "REVIEW_TRIAGE_BASE_URL";

/// Default bound on the outbound request, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Settings loaded from $HOME/.review-triage/settings.json.
#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    /// Environment variable overrides.
    #[serde(default)]
    pub env: HashMap<String, String>,
    /// Bound on the outbound request, in seconds.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl Settings {
    /// Loads settings from the default location.
    pub fn load() -> Result<Self> {
        let settings_path = Self::settings_path()?;
        Self::load_from_path(&settings_path)
    }

    /// Loads settings from a specific path. A missing file yields defaults.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;

        serde_json::from_str::<Settings>(&content)
            .with_context(|| format!("Failed to parse settings file: {}", path.display()))
    }

    /// Returns the default settings path.
    pub fn settings_path() -> Result<PathBuf> {
        let home_dir = dirs::home_dir().context("Failed to determine home directory")?;

        Ok(home_dir.join(".review-triage").join("settings.json"))
    }

    /// Returns an environment variable with fallback to settings.
    pub fn get_env_var(&self, key: &str) -> Option<String> {
        match env::var(key) {
            Ok(value) => Some(value),
            Err(_) => self.env.get(key).cloned(),
        }
    }

    /// Resolves the backend credential from [`API_KEY_VARS`].
    pub fn api_key(&self) -> Result<String> {
        for key in API_KEY_VARS {
            if let Some(value) = self.get_env_var(key) {
                return Ok(value);
            }
        }

        Err(TriageError::ApiKeyNotFound.into())
    }

    /// Returns the backend base URL override, if any.
    pub fn base_url(&self) -> Option<String> {
        self.get_env_var(BASE_URL_VAR)
    }

    /// Bounded timeout for the outbound call.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }
}
