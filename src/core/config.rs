use anyhow::{Context, Result};
use directories::ProjectDirs;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::{env, fmt, fs, path::PathBuf};
use tracing::debug;

use super::error::AlertError;

pub const DEFAULT_ALPHAVANTAGE_URL: &str = "https://www.alphavantage.co";
pub const DEFAULT_NEWSAPI_URL: &str = "https://newsapi.org";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AlphaVantageProviderConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct NewsApiProviderConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProvidersConfig {
    pub alphavantage: Option<AlphaVantageProviderConfig>,
    pub newsapi: Option<NewsApiProviderConfig>,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        ProvidersConfig {
            alphavantage: Some(AlphaVantageProviderConfig {
                base_url: DEFAULT_ALPHAVANTAGE_URL.to_string(),
            }),
            newsapi: Some(NewsApiProviderConfig {
                base_url: DEFAULT_NEWSAPI_URL.to_string(),
            }),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
}

impl Default for SmtpConfig {
    fn default() -> Self {
        SmtpConfig {
            host: "smtp.gmail.com".to_string(),
            port: 465,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub ticker: String,
    pub company: String,
    /// Fractional move that triggers an alert, e.g. `0.03` for 3%.
    pub threshold: Decimal,
    pub providers: ProvidersConfig,
    pub smtp: SmtpConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            ticker: "TSLA".to_string(),
            company: "Tesla".to_string(),
            threshold: Decimal::new(3, 2),
            providers: ProvidersConfig::default(),
            smtp: SmtpConfig::default(),
        }
    }
}

impl AppConfig {
    /// Loads the config from the default location, falling back to built-in defaults
    /// when no file has been set up.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(
                "No config at {}, using built-in defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("org", "stockalert", "stockalert")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    pub fn alphavantage_url(&self) -> &str {
        self.providers
            .alphavantage
            .as_ref()
            .map_or(DEFAULT_ALPHAVANTAGE_URL, |p| &p.base_url)
    }

    pub fn newsapi_url(&self) -> &str {
        self.providers
            .newsapi
            .as_ref()
            .map_or(DEFAULT_NEWSAPI_URL, |p| &p.base_url)
    }
}

/// Secrets read from the environment once at startup. Unset variables stay `None`
/// until a component actually needs them.
#[derive(Clone, Default)]
pub struct Credentials {
    pub alphavantage_key: Option<String>,
    pub newsapi_key: Option<String>,
    pub from_email: Option<String>,
    pub to_email: Option<String>,
    pub app_password: Option<String>,
}

impl Credentials {
    pub const ALPHAVANTAGE_KEY: &'static str = "AV_KEY";
    pub const NEWSAPI_KEY: &'static str = "NEWS_KEY";
    pub const FROM_EMAIL: &'static str = "FROM_EMAIL";
    pub const TO_EMAIL: &'static str = "TO_EMAIL";
    pub const APP_PASSWORD: &'static str = "APP_PASSWORD";

    pub fn from_env() -> Self {
        Credentials {
            alphavantage_key: env::var(Self::ALPHAVANTAGE_KEY).ok(),
            newsapi_key: env::var(Self::NEWSAPI_KEY).ok(),
            from_email: env::var(Self::FROM_EMAIL).ok(),
            to_email: env::var(Self::TO_EMAIL).ok(),
            app_password: env::var(Self::APP_PASSWORD).ok(),
        }
    }

    /// Returns the value or a `MissingCredential` error naming the variable.
    pub fn require<'a>(
        value: &'a Option<String>,
        name: &'static str,
    ) -> Result<&'a str, AlertError> {
        value
            .as_deref()
            .filter(|v| !v.is_empty())
            .ok_or(AlertError::MissingCredential(name))
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = |v: &Option<String>| if v.is_some() { "set" } else { "unset" };
        f.debug_struct("Credentials")
            .field(Self::ALPHAVANTAGE_KEY, &state(&self.alphavantage_key))
            .field(Self::NEWSAPI_KEY, &state(&self.newsapi_key))
            .field(Self::FROM_EMAIL, &self.from_email)
            .field(Self::TO_EMAIL, &self.to_email)
            .field(Self::APP_PASSWORD, &state(&self.app_password))
            .finish()
    }
}
