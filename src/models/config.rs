//! Application configuration structures.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::OutputLayer;

/// Root application configuration.
///
/// Credentials, `users`, `max` and `output_layer` are top-level keys; HTTP
/// and sink settings live in the `[api]` and `[output]` tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// OAuth 1.0a credentials
    #[serde(flatten)]
    pub credentials: Credentials,

    /// Screen names whose timelines are loaded, in order
    #[serde(default)]
    pub users: Vec<String>,

    /// Maximum number of posts fetched per user
    #[serde(default = "defaults::max")]
    pub max: u32,

    /// Layer the generated documents are classified under
    #[serde(default)]
    pub output_layer: OutputLayer,

    /// Twitter API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Document sink settings
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            AppError::config(format!("Cannot read configuration {}: {e}", path.display()))
        })?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load and validate configuration, logging the effective values.
    pub fn load_validated(path: impl AsRef<Path>) -> Result<Self> {
        let config = Self::load(path)?;
        config.validate()?;
        config.log_values();
        Ok(config)
    }

    /// Validate mandatory parameters and value ranges.
    pub fn validate(&self) -> Result<()> {
        let creds = &self.credentials;
        require("access_secret", &creds.access_secret)?;
        if self.users.is_empty() {
            return Err(AppError::config("Parameter users is mandatory"));
        }
        if self.users.iter().any(|u| u.trim().is_empty()) {
            return Err(AppError::config("Parameter users contains an empty handle"));
        }
        require("consumer_secret", &creds.consumer_secret)?;
        require("consumer_key", &creds.consumer_key)?;
        require("access_key", &creds.access_key)?;

        if self.max == 0 {
            return Err(AppError::config("Parameter max must be > 0"));
        }
        if self.api.timeout_secs == 0 {
            return Err(AppError::config("api.timeout_secs must be > 0"));
        }
        if self.api.base_url.trim().is_empty() {
            return Err(AppError::config("api.base_url is empty"));
        }
        Ok(())
    }

    /// Log every parameter at debug level, with secrets masked.
    pub fn log_values(&self) {
        log::debug!("Parameter credentials has value: {:?}", self.credentials);
        log::debug!("Parameter users has value: {:?}", self.users);
        log::debug!("Parameter output_layer has value: {}", self.output_layer);
        log::debug!("Parameter max has value: {}", self.max);
        log::debug!("Parameter api.base_url has value: {}", self.api.base_url);
        log::debug!("Parameter output.dir has value: {}", self.output.dir);
    }
}

fn require(name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AppError::config(format!("Parameter {name} is mandatory")));
    }
    Ok(())
}

/// OAuth 1.0a consumer and access credentials.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub consumer_key: String,

    #[serde(default)]
    pub consumer_secret: String,

    #[serde(default)]
    pub access_key: String,

    #[serde(default)]
    pub access_secret: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("consumer_key", &mask(&self.consumer_key))
            .field("consumer_secret", &mask(&self.consumer_secret))
            .field("access_key", &mask(&self.access_key))
            .field("access_secret", &mask(&self.access_secret))
            .finish()
    }
}

/// Keep the first four characters of a secret for log correlation.
fn mask(secret: &str) -> String {
    let visible: String = secret.chars().take(4).collect();
    if secret.chars().count() <= 4 {
        "****".to_string()
    } else {
        format!("{visible}****")
    }
}

/// Twitter API client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the REST API
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Call the credential verification endpoint when opening a session
    #[serde(default = "defaults::verify_credentials")]
    pub verify_credentials: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            timeout_secs: defaults::timeout(),
            user_agent: defaults::user_agent(),
            verify_credentials: defaults::verify_credentials(),
        }
    }
}

/// Local document sink settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Root directory of the local sink
    #[serde(default = "defaults::output_dir")]
    pub dir: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: defaults::output_dir(),
        }
    }
}

mod defaults {
    pub fn max() -> u32 {
        100
    }

    pub fn base_url() -> String {
        "https://api.twitter.com".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn user_agent() -> String {
        format!("tweetload/{}", env!("CARGO_PKG_VERSION"))
    }
    pub fn verify_credentials() -> bool {
        true
    }

    pub fn output_dir() -> String {
        "output".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"
        consumer_key = "ck"
        consumer_secret = "cs"
        access_key = "ak"
        access_secret = "as"
        users = ["antidot", "rustlang"]
    "#;

    #[test]
    fn parses_flat_keys_and_defaults() {
        let config = Config::from_toml(FULL).unwrap();
        assert_eq!(config.credentials.consumer_key, "ck");
        assert_eq!(config.credentials.access_secret, "as");
        assert_eq!(config.users, vec!["antidot", "rustlang"]);
        assert_eq!(config.max, 100);
        assert_eq!(config.output_layer, OutputLayer::Contents);
        assert_eq!(config.api.base_url, "https://api.twitter.com");
        assert!(config.api.verify_credentials);
        assert_eq!(config.output.dir, "output");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parses_optional_sections() {
        let toml = format!(
            "{FULL}\nmax = 5\noutput_layer = \"original\"\n[api]\nbase_url = \"http://localhost:9\"\ntimeout_secs = 3\n[output]\ndir = \"/tmp/docs\"\n"
        );
        let config = Config::from_toml(&toml).unwrap();
        assert_eq!(config.max, 5);
        assert_eq!(config.output_layer, OutputLayer::Original);
        assert_eq!(config.api.base_url, "http://localhost:9");
        assert_eq!(config.api.timeout_secs, 3);
        assert_eq!(config.output.dir, "/tmp/docs");
    }

    #[test]
    fn validate_rejects_missing_consumer_key() {
        let toml = FULL.replace("consumer_key = \"ck\"", "");
        let config = Config::from_toml(&toml).unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("consumer_key is mandatory"));
    }

    #[test]
    fn validate_rejects_blank_secret() {
        let mut config = Config::from_toml(FULL).unwrap();
        config.credentials.access_secret = "   ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_empty_users() {
        let mut config = Config::from_toml(FULL).unwrap();
        config.users.clear();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("users is mandatory"));

        config.users = vec!["ok".into(), " ".into()];
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_max() {
        let mut config = Config::from_toml(FULL).unwrap();
        config.max = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn unknown_output_layer_is_rejected() {
        let toml = format!("{FULL}\noutput_layer = \"bogus\"\n");
        assert!(Config::from_toml(&toml).is_err());
    }

    #[test]
    fn credentials_debug_masks_secrets() {
        let creds = Credentials {
            consumer_key: "abcdefgh".into(),
            consumer_secret: "xy".into(),
            ..Default::default()
        };
        let shown = format!("{creds:?}");
        assert!(shown.contains("abcd****"));
        assert!(!shown.contains("abcdefgh"));
        assert!(!shown.contains("\"xy\""));
    }

    #[test]
    fn load_reports_missing_file() {
        let err = Config::load("/nonexistent/tweetload.toml").unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }
}
