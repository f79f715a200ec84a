//! CLI configuration.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use trtech_api::{ApiConfig, RetryPolicy, TimeoutConfig, BASE_URL_ENV, DEFAULT_BASE_URL};
use trtech_commerce::checkout::{HandoffLink, DEFAULT_CONTACT, DEFAULT_ENDPOINT};
use trtech_observability::LoggingConfig;

/// Config file names searched for, in order.
pub const CONFIG_NAMES: [&str; 3] = ["trtech.toml", ".trtech.toml", "trtech.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CliConfig {
    /// Backend connection.
    #[serde(default)]
    pub api: ApiSection,

    /// WhatsApp hand-off.
    #[serde(default)]
    pub whatsapp: WhatsAppSection,

    /// Log output.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content, is_json(path))
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    fn parse(content: &str, json: bool) -> Result<Self> {
        if json {
            Ok(serde_json::from_str(content)?)
        } else {
            Ok(toml::from_str(content)?)
        }
    }

    /// `TRTECH_API_URL` wins over the file.
    pub fn apply_env(&mut self) {
        if let Ok(url) = std::env::var(BASE_URL_ENV) {
            if !url.trim().is_empty() {
                self.api.base_url = url;
            }
        }
    }

    /// Backend client settings.
    pub fn api_config(&self) -> Result<ApiConfig> {
        let config = ApiConfig::new(&self.api.base_url)
            .with_context(|| format!("Invalid api.base_url: {}", self.api.base_url))?;
        Ok(config
            .with_timeout(TimeoutConfig::from_millis(self.api.timeout_ms))
            .with_retry(RetryPolicy::new(self.api.max_retries)))
    }

    /// Deep-link builder for the configured WhatsApp number.
    pub fn handoff_link(&self) -> Result<HandoffLink> {
        HandoffLink::new(&self.whatsapp.endpoint, &self.whatsapp.contact)
            .context("Invalid [whatsapp] section")
    }

    /// Problems that make the config unusable, then ones worth a warning.
    pub fn check(&self) -> (Vec<String>, Vec<String>) {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        if let Err(e) = ApiConfig::new(&self.api.base_url) {
            errors.push(format!("api.base_url: {e}"));
        }
        if self.api.timeout_ms == 0 {
            errors.push("api.timeout_ms must be greater than 0".to_string());
        } else if self.api.timeout_ms < 500 {
            warnings.push(format!(
                "api.timeout_ms = {} is very short for a remote backend",
                self.api.timeout_ms
            ));
        }
        if self.api.max_retries > 10 {
            warnings.push("api.max_retries above 10 makes failures slow to report".to_string());
        }
        if let Err(e) = HandoffLink::new(&self.whatsapp.endpoint, &self.whatsapp.contact) {
            errors.push(format!("whatsapp: {e}"));
        }
        if self.whatsapp.handoff_attempts == 0 {
            errors.push("whatsapp.handoff_attempts must be at least 1".to_string());
        }
        if self.api.base_url.starts_with("http://") && !self.api.base_url.contains("localhost") {
            warnings.push("api.base_url uses plain http for a remote host".to_string());
        }

        (errors, warnings)
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

/// `[api]` section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiSection {
    /// Base URL including the `/api` prefix.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Whole-request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Retries for reads after the first attempt.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_max_retries() -> u32 {
    2
}

impl Default for ApiSection {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
            max_retries: default_max_retries(),
        }
    }
}

/// `[whatsapp]` section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WhatsAppSection {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Number in international format without `+`.
    #[serde(default = "default_contact")]
    pub contact: String,

    /// Total attempts to open the link.
    #[serde(default = "default_handoff_attempts")]
    pub handoff_attempts: u32,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_contact() -> String {
    DEFAULT_CONTACT.to_string()
}

fn default_handoff_attempts() -> u32 {
    3
}

impl Default for WhatsAppSection {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            contact: default_contact(),
            handoff_attempts: default_handoff_attempts(),
        }
    }
}

/// Generate a default trtech.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# TR-Tech CLI configuration

[api]
base_url = "{base_url}"
timeout_ms = 10000
max_retries = 2

[whatsapp]
endpoint = "{endpoint}"
contact = "{contact}"
handoff_attempts = 3

[logging]
# trace | debug | info | warn | error
level = "info"
# compact | json
format = "compact"
"#,
        base_url = DEFAULT_BASE_URL,
        endpoint = DEFAULT_ENDPOINT,
        contact = DEFAULT_CONTACT,
    )
}
