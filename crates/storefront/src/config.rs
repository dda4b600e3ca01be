//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `HEEN_DATA_DIR` - Directory holding the stored documents (default: `.heen`)
//! - `HEEN_ADMIN_EMAIL` - Email that signs in as administrator (default: `admin@heein.com`)
//! - `HEEN_ADMIN_PASSWORD` - Password for the administrator email (default: `adminlucas`)
//! - `HEEN_LOG_FORMAT` - `pretty` (default) or `json`

use std::path::PathBuf;
use std::str::FromStr;

use heen_core::Email;
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

const DEFAULT_DATA_DIR: &str = ".heen";
const DEFAULT_ADMIN_EMAIL: &str = "admin@heein.com";
const DEFAULT_ADMIN_PASSWORD: &str = "adminlucas";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Log output format for the binary's subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" | "" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("expected `pretty` or `json`, got `{other}`")),
        }
    }
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Directory for file storage
    pub data_dir: PathBuf,
    /// Mock administrator credential
    pub admin: AdminCredential,
    /// Log output format
    pub log_format: LogFormat,
}

/// The single email/password pair that grants the admin role.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone)]
pub struct AdminCredential {
    /// Validated as an [`Email`] when loaded.
    pub email: String,
    pub password: SecretString,
}

impl AdminCredential {
    /// Whether `email`/`password` are exactly this credential.
    #[must_use]
    pub fn matches(&self, email: &str, password: &str) -> bool {
        self.email == email && self.password.expose_secret() == password
    }
}

impl std::fmt::Debug for AdminCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredential")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl Default for AdminCredential {
    fn default() -> Self {
        Self {
            email: DEFAULT_ADMIN_EMAIL.to_owned(),
            password: SecretString::from(DEFAULT_ADMIN_PASSWORD),
        }
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            admin: AdminCredential::default(),
            log_format: LogFormat::default(),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// Unset and empty variables take their defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let data_dir = get("HEEN_DATA_DIR")
            .map_or_else(|| PathBuf::from(DEFAULT_DATA_DIR), PathBuf::from);

        let admin_email = match get("HEEN_ADMIN_EMAIL") {
            Some(value) => Email::parse(&value)
                .map_err(|e| {
                    ConfigError::InvalidEnvVar("HEEN_ADMIN_EMAIL".to_string(), e.to_string())
                })?
                .into(),
            None => DEFAULT_ADMIN_EMAIL.to_owned(),
        };
        let admin_password = get("HEEN_ADMIN_PASSWORD")
            .map_or_else(|| SecretString::from(DEFAULT_ADMIN_PASSWORD), SecretString::from);

        let log_format = get("HEEN_LOG_FORMAT")
            .map(|v| v.parse::<LogFormat>())
            .transpose()
            .map_err(|e| ConfigError::InvalidEnvVar("HEEN_LOG_FORMAT".to_string(), e))?
            .unwrap_or_default();

        Ok(Self {
            data_dir,
            admin: AdminCredential {
                email: admin_email,
                password: admin_password,
            },
            log_format,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Result<StorefrontConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        StorefrontConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.data_dir, PathBuf::from(".heen"));
        assert_eq!(config.admin.email, "admin@heein.com");
        assert!(config.admin.matches("admin@heein.com", "adminlucas"));
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("HEEN_DATA_DIR", "/var/lib/heen"),
            ("HEEN_ADMIN_EMAIL", "dono@heein.com"),
            ("HEEN_ADMIN_PASSWORD", "s3gr3d0"),
            ("HEEN_LOG_FORMAT", "JSON"),
        ])
        .unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/var/lib/heen"));
        assert!(config.admin.matches("dono@heein.com", "s3gr3d0"));
        assert!(!config.admin.matches("admin@heein.com", "adminlucas"));
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_admin_email_must_match_exactly() {
        let admin = AdminCredential::default();
        assert!(admin.matches("admin@heein.com", "adminlucas"));
        assert!(!admin.matches("ADMIN@heein.com", "adminlucas"));
        assert!(!admin.matches("  admin@heein.com ", "adminlucas"));
        assert!(!admin.matches("admin@heein.com", "adminlucas "));
    }

    #[test]
    fn test_empty_values_use_defaults() {
        let config = config_from(&[("HEEN_DATA_DIR", ""), ("HEEN_ADMIN_PASSWORD", " ")]).unwrap();
        assert_eq!(config.data_dir, PathBuf::from(".heen"));
        assert!(config.admin.matches("admin@heein.com", "adminlucas"));
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            config_from(&[("HEEN_ADMIN_EMAIL", "not-an-email")]),
            Err(ConfigError::InvalidEnvVar(var, _)) if var == "HEEN_ADMIN_EMAIL"
        ));
        assert!(matches!(
            config_from(&[("HEEN_LOG_FORMAT", "xml")]),
            Err(ConfigError::InvalidEnvVar(var, _)) if var == "HEEN_LOG_FORMAT"
        ));
    }

    #[test]
    fn test_password_matches_exactly() {
        let admin = AdminCredential::default();
        assert!(!admin.matches("admin@heein.com", "AdminLucas"));
        assert!(!admin.matches("admin@heein.com", ""));
    }

    #[test]
    fn test_debug_redacts_password() {
        let debug = format!("{:?}", StorefrontConfig::default());
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("adminlucas"));
    }
}
