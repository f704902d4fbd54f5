use crate::Result;
use camino::{Utf8Path, Utf8PathBuf};
use core::time::Duration;
use ohno::{IntoAppError, app_err};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use url::Url;

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../default_config.toml");

/// Name of the configuration file looked up when no explicit path is given
pub const CONFIG_FILE_NAME: &str = "fitbit-sync.toml";

/// Largest page the ECG list endpoint accepts
pub const MAX_ECG_PAGE_SIZE: u32 = 10;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Base URL of the Fitbit Web API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// OAuth2 token endpoint
    #[serde(default = "default_token_url")]
    pub token_url: String,

    /// User whose data is collected, `-` for the owner of the access token
    #[serde(default = "default_user_id")]
    pub user_id: String,

    /// Timeout applied to every HTTP request
    #[serde(default = "default_request_timeout", with = "humantime_serde")]
    pub request_timeout: Duration,

    /// Number of ECG readings requested per run
    #[serde(default = "default_ecg_page_size")]
    pub ecg_page_size: u32,

    /// Collection to subscribe to, empty for all collections
    #[serde(default)]
    pub subscription_collection: String,

    /// Subscriber id from the developer console, empty for the default subscriber
    #[serde(default)]
    pub subscriber_id: String,
}

fn default_api_base_url() -> String {
    "https://api.fitbit.com".to_string()
}

fn default_token_url() -> String {
    "https://api.fitbit.com/oauth2/token".to_string()
}

fn default_user_id() -> String {
    "-".to_string()
}

const fn default_request_timeout() -> Duration {
    Duration::from_secs(30)
}

const fn default_ecg_page_size() -> u32 {
    MAX_ECG_PAGE_SIZE
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// When `config_path` is `None`, `fitbit-sync.toml` is looked up in `base_dir` and
    /// the defaults are used if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or fails validation
    pub fn load(base_dir: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<Self> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading fitbit-sync configuration file '{path}'"))?;
            (path.clone(), text)
        } else {
            let path = base_dir.join(CONFIG_FILE_NAME);
            match fs::read_to_string(&path) {
                Ok(text) => (path, text),
                Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
                Err(e) => return Err(e).into_app_err_with(|| format!("reading fitbit-sync configuration file '{path}'")),
            }
        };

        let config: Self = toml::from_str(&text).into_app_err_with(|| format!("parsing configuration file '{final_path}'"))?;
        config.validate()?;

        Ok(config)
    }

    /// Save the default configuration to a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save_default(output_path: &Utf8Path) -> Result<()> {
        fs::write(output_path, DEFAULT_CONFIG_TOML).into_app_err_with(|| format!("writing default configuration to {output_path}"))?;
        Ok(())
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error if a URL is malformed or a numeric setting is out of range
    pub fn validate(&self) -> Result<()> {
        validate_http_url("api_base_url", &self.api_base_url)?;
        validate_http_url("token_url", &self.token_url)?;

        if self.user_id.trim().is_empty() {
            return Err(app_err!("user_id must not be empty, use '-' for the token owner"));
        }

        if self.request_timeout.is_zero() {
            return Err(app_err!("request_timeout must be greater than zero"));
        }

        if !(1..=MAX_ECG_PAGE_SIZE).contains(&self.ecg_page_size) {
            return Err(app_err!(
                "ecg_page_size must be between 1 and {MAX_ECG_PAGE_SIZE}, got {}",
                self.ecg_page_size
            ));
        }

        Ok(())
    }

    /// The configured subscriber id, if any
    #[must_use]
    pub fn subscriber_id(&self) -> Option<&str> {
        non_empty(&self.subscriber_id)
    }

    /// The configured subscription collection, if any
    #[must_use]
    pub fn subscription_collection(&self) -> Option<&str> {
        non_empty(&self.subscription_collection)
    }
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_TOML).expect("default_config.toml should be valid TOML that deserializes to Config")
    }
}

fn validate_http_url(key: &str, value: &str) -> Result<()> {
    let url = Url::parse(value).into_app_err_with(|| format!("{key} is not a valid URL: '{value}'"))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(app_err!("{key} must use http or https, got '{other}'")),
    }
}

fn non_empty(value: &str) -> Option<&str> {
    let value = value.trim();
    if value.is_empty() { None } else { Some(value) }
}
