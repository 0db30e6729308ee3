//! Storefront configuration
//!
//! Loaded from a TOML file (every section optional) and then overlaid by
//! environment variables:
//!
//! | Variable                | Field                          |
//! |-------------------------|--------------------------------|
//! | `REEL_BACKEND_URL`      | `backend.url`                  |
//! | `REEL_BACKEND_ANON_KEY` | `backend.anon_key`             |
//! | `REEL_ENV`              | `environment`                  |
//! | `REEL_LOCK_THRESHOLD`   | `entitlement.lock_threshold`   |

use crate::error::ConfigError;
use reel_entitlement::EntitlementPolicy;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Backend URL used when production runs without configured keys
pub const PLACEHOLDER_BACKEND_URL: &str = "https://placeholder.supabase.co";

/// Anon key used when production runs without configured keys
pub const PLACEHOLDER_ANON_KEY: &str = "placeholder-key";

/// Deployment environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    /// Parse from an env value; anything other than `production`/`prod` is development
    #[must_use]
    pub fn from_env_value(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }
}

/// Hosted backend connection settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub url: Option<String>,
    pub anon_key: Option<String>,
}

/// Resolved backend endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackendEndpoint {
    pub url: String,
    pub anon_key: String,
    /// Whether placeholder values were substituted
    pub placeholder: bool,
}

/// Home screen settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HomeConfig {
    /// Series shown in the trending strip
    pub trending_limit: usize,
    /// Category chips, in display order; `All` disables filtering
    pub categories: Vec<String>,
}

impl Default for HomeConfig {
    fn default() -> Self {
        Self {
            trending_limit: 5,
            categories: ["All", "Drama", "Action", "Romance", "Sci-Fi"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

/// Player settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Query parameters appended to every embed URL
    pub autoplay_params: String,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            autoplay_params: "autoplay=1&mute=0".to_string(),
        }
    }
}

/// Admin console settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Emails granted console access regardless of profile role
    pub allowlisted_emails: Vec<String>,
}

impl AdminConfig {
    /// Case-insensitive allow-list check
    #[must_use]
    pub fn is_allowlisted(&self, email: &str) -> bool {
        self.allowlisted_emails
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(email.trim()))
    }
}

/// Storefront configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorefrontConfig {
    pub environment: Environment,
    pub backend: BackendConfig,
    pub entitlement: EntitlementPolicy,
    pub home: HomeConfig,
    pub player: PlayerConfig,
    pub admin: AdminConfig,
}

impl StorefrontConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With environment
    #[inline]
    #[must_use]
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// With backend URL and anon key
    #[inline]
    #[must_use]
    pub fn with_backend(mut self, url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        self.backend = BackendConfig {
            url: Some(url.into()),
            anon_key: Some(anon_key.into()),
        };
        self
    }

    /// With entitlement policy
    #[inline]
    #[must_use]
    pub fn with_policy(mut self, policy: EntitlementPolicy) -> Self {
        self.entitlement = policy;
        self
    }

    /// With an allow-listed admin email
    #[inline]
    #[must_use]
    pub fn with_admin_email(mut self, email: impl Into<String>) -> Self {
        self.admin.allowlisted_emails.push(email.into());
        self
    }

    /// Parse from TOML text
    ///
    /// # Errors
    /// `ConfigError::Parse` on malformed TOML
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Read a TOML file
    ///
    /// # Errors
    /// `ConfigError::Io` if the file cannot be read, `ConfigError::Parse` on malformed TOML
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text =
            std::fs::read_to_string(path).map_err(|e| ConfigError::io_error(path, e))?;
        Self::from_toml_str(&text)
    }

    /// Load optional file, overlay process environment, validate
    ///
    /// # Errors
    /// Any read, parse, override or validation failure
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        let config = config.with_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        tracing::debug!(environment = ?config.environment, "Loaded storefront config");
        Ok(config)
    }

    /// Overlay values from an environment lookup
    ///
    /// # Errors
    /// `ConfigError::Invalid` when `REEL_LOCK_THRESHOLD` is not an integer
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("REEL_BACKEND_URL") {
            self.backend.url = Some(url);
        }
        if let Some(key) = lookup("REEL_BACKEND_ANON_KEY") {
            self.backend.anon_key = Some(key);
        }
        if let Some(env) = lookup("REEL_ENV") {
            self.environment = Environment::from_env_value(&env);
        }
        if let Some(raw) = lookup("REEL_LOCK_THRESHOLD") {
            let threshold = raw.trim().parse::<i32>().map_err(|e| {
                ConfigError::invalid("entitlement.lock_threshold", e.to_string())
            })?;
            self.entitlement = self.entitlement.with_lock_threshold(threshold);
        }
        Ok(self)
    }

    /// Check value ranges
    ///
    /// # Errors
    /// `ConfigError::Invalid` for a threshold below 1 or a zero trending limit
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.entitlement.lock_threshold < 1 {
            return Err(ConfigError::invalid(
                "entitlement.lock_threshold",
                "must be at least 1",
            ));
        }
        if self.home.trending_limit == 0 {
            return Err(ConfigError::invalid(
                "home.trending_limit",
                "must be at least 1",
            ));
        }
        Ok(())
    }

    /// Resolve the backend endpoint
    ///
    /// Missing keys fail outside production. In production they are replaced
    /// by placeholders and a warning is logged, so the storefront still
    /// starts and every backend call fails instead.
    ///
    /// # Errors
    /// `ConfigError::MissingBackendKeys` outside production
    pub fn backend_endpoint(&self) -> Result<BackendEndpoint, ConfigError> {
        let url = self.backend.url.as_deref().filter(|v| !v.trim().is_empty());
        let key = self.backend.anon_key.as_deref().filter(|v| !v.trim().is_empty());

        match (url, key) {
            (Some(url), Some(key)) => Ok(BackendEndpoint {
                url: url.to_string(),
                anon_key: key.to_string(),
                placeholder: false,
            }),
            _ if self.environment == Environment::Production => {
                tracing::warn!("Backend keys missing in production, using placeholders");
                Ok(BackendEndpoint {
                    url: url.unwrap_or(PLACEHOLDER_BACKEND_URL).to_string(),
                    anon_key: key.unwrap_or(PLACEHOLDER_ANON_KEY).to_string(),
                    placeholder: true,
                })
            }
            _ => Err(ConfigError::MissingBackendKeys),
        }
    }
}
