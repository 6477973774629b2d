//! Collector endpoint configuration.

use serde::{Deserialize, Serialize};
use url::Url;

use tracker_core::{Error, Result};

/// Remote collector configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectorConfig {
    /// Collector base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Bearer token from the host application's session
    #[serde(default)]
    pub api_token: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:8787".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_token: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl CollectorConfig {
    /// Checks the base URL parses before any request is attempted.
    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.base_url)
            .map_err(|e| Error::config(format!("invalid collector base_url: {e}")))?;
        Ok(())
    }
}
