//! TOML config file schema
//!
//! Mirrors the on-disk `[backend]` / `[chat]` sections one to one.
//! Enum-typed values stay strings here and are parsed through the domain,
//! so a bad value is a validation issue rather than a deserialization
//! failure that loses the rest of the file.

use coach_domain::Mode;
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Backend connection settings
    pub backend: FileBackendConfig,
    /// Chat defaults
    pub chat: FileChatConfig,
}

/// `[backend]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBackendConfig {
    /// Resolved backend base origin, including any path prefix.
    pub base_url: String,
    /// Per-request timeout. Keeps a dead backend from wedging the
    /// session-starting state indefinitely.
    pub timeout_secs: u64,
}

impl Default for FileBackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api".to_string(),
            timeout_secs: 30,
        }
    }
}

/// `[chat]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileChatConfig {
    /// Mode used when none is given on the command line.
    pub default_mode: String,
}

impl Default for FileChatConfig {
    fn default() -> Self {
        Self {
            default_mode: Mode::default().as_str().to_string(),
        }
    }
}

impl FileConfig {
    /// Validate the configuration, returning all detected issues.
    /// An empty list means the configuration is usable.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if let Err(e) = self.chat.default_mode.parse::<Mode>() {
            issues.push(format!("chat.default_mode: {e}"));
        }
        if self.backend.timeout_secs == 0 {
            issues.push("backend.timeout_secs: must be greater than zero".to_string());
        }
        if reqwest::Url::parse(&self.backend.base_url).is_err() {
            issues.push(format!(
                "backend.base_url: '{}' is not a valid URL",
                self.backend.base_url
            ));
        }

        issues
    }

    /// Default mode, falling back to the domain default when the configured
    /// string does not parse (validation reports the issue separately).
    pub fn default_mode(&self) -> Mode {
        self.chat.default_mode.parse().unwrap_or_default()
    }
}
