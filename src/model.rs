//! Ready-made configuration sections shared by Fulcrum services.
//!
//! These records are meant to be embedded in a service's own root config
//! and resolved through [`ConfigBuilder`](crate::ConfigBuilder).

use crate::ConfigError;
use crate::builder::{EnvBind, EnvField, EnvSlot, Validate};
use log::LevelFilter;
use serde::{Deserialize, Serialize};

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct LogConfig {
    /// Output format, `text` or `json`. Empty means the service default.
    #[serde(default)]
    pub format: String,
    /// Level name, one of `silent`, `error`, `warn`, `info`.
    #[serde(default)]
    pub level: String,
}

impl LogConfig {
    /// Convert the configured level name to a `log::LevelFilter`.
    pub fn level_filter(&self) -> LevelFilter {
        level_filter(&self.level)
    }
}

impl EnvBind for LogConfig {
    fn env_fields(&mut self) -> Vec<EnvField<'_>> {
        vec![
            EnvField::bound("format", "LOG_FORMAT", EnvSlot::String(&mut self.format)),
            EnvField::bound("level", "LOG_LEVEL", EnvSlot::String(&mut self.level)),
        ]
    }
}

impl Validate for LogConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        ensure_one_of("log.format", &self.format, &["text", "json"])?;
        ensure_one_of("log.level", &self.level, &["silent", "error", "warn", "info"])?;
        Ok(())
    }
}

/// Database configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DbConfig {
    /// Connection string. Required.
    #[serde(default)]
    pub dsn: String,
    /// Level name for statement logging.
    #[serde(default)]
    pub log_level: String,
    /// Output format for statement logging, `text` or `json`.
    #[serde(default)]
    pub log_format: String,
}

impl DbConfig {
    /// Convert the configured statement-log level to a `log::LevelFilter`.
    pub fn level_filter(&self) -> LevelFilter {
        level_filter(&self.log_level)
    }
}

impl EnvBind for DbConfig {
    fn env_fields(&mut self) -> Vec<EnvField<'_>> {
        vec![
            EnvField::bound("dsn", "DB_DSN", EnvSlot::String(&mut self.dsn)),
            EnvField::bound(
                "log_level",
                "DB_LOG_LEVEL",
                EnvSlot::String(&mut self.log_level),
            ),
            EnvField::bound(
                "log_format",
                "DB_LOG_FORMAT",
                EnvSlot::String(&mut self.log_format),
            ),
        ]
    }
}

impl Validate for DbConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.dsn.is_empty() {
            return Err(ConfigError::InvalidField {
                path: "db.dsn".to_string(),
                message: "required".to_string(),
            });
        }
        ensure_one_of("db.logLevel", &self.log_level, &["silent", "error", "warn", "info"])?;
        ensure_one_of("db.logFormat", &self.log_format, &["text", "json"])?;
        Ok(())
    }
}

/// OAuth/Keycloak client configuration used by the identity verifier.
///
/// Only the record lives here; the verifier itself is a separate crate.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OAuthConfig {
    /// Base URL of the Keycloak server.
    #[serde(default)]
    pub keycloak_url: String,
    /// Realm the service authenticates against.
    #[serde(default)]
    pub realm: String,
    /// OAuth client identifier.
    #[serde(default)]
    pub client_id: String,
    /// OAuth client secret.
    #[serde(default)]
    pub client_secret: String,
    /// JWKS cache lifetime in seconds.
    #[serde(default, rename = "jwksCacheTtl")]
    pub jwks_cache_ttl_secs: u64,
    /// Whether token issuers are checked against [`OAuthConfig::issuer`].
    #[serde(default)]
    pub validate_issuer: bool,
}

impl OAuthConfig {
    /// JWKS endpoint URL for the configured realm.
    pub fn jwks_url(&self) -> String {
        format!(
            "{}/realms/{}/protocol/openid_connect/certs",
            self.keycloak_url, self.realm
        )
    }

    /// Expected issuer for tokens minted by the configured realm.
    pub fn issuer(&self) -> String {
        format!("{}/realms/{}", self.keycloak_url, self.realm)
    }
}

impl EnvBind for OAuthConfig {
    fn env_fields(&mut self) -> Vec<EnvField<'_>> {
        vec![
            EnvField::bound(
                "keycloak_url",
                "OAUTH_KEYCLOAK_URL",
                EnvSlot::String(&mut self.keycloak_url),
            ),
            EnvField::bound("realm", "OAUTH_REALM", EnvSlot::String(&mut self.realm)),
            EnvField::bound(
                "client_id",
                "OAUTH_CLIENT_ID",
                EnvSlot::String(&mut self.client_id),
            ),
            EnvField::bound(
                "client_secret",
                "OAUTH_CLIENT_SECRET",
                EnvSlot::String(&mut self.client_secret),
            ),
            EnvField::bound(
                "jwks_cache_ttl_secs",
                "OAUTH_JWKS_CACHE_TTL",
                EnvSlot::U64(&mut self.jwks_cache_ttl_secs),
            ),
            EnvField::bound(
                "validate_issuer",
                "OAUTH_VALIDATE_ISSUER",
                EnvSlot::Bool(&mut self.validate_issuer),
            ),
        ]
    }
}

impl Validate for OAuthConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.keycloak_url.is_empty() {
            return Err(ConfigError::InvalidField {
                path: "oauth.keycloakUrl".to_string(),
                message: "required".to_string(),
            });
        }
        if self.realm.is_empty() {
            return Err(ConfigError::InvalidField {
                path: "oauth.realm".to_string(),
                message: "required".to_string(),
            });
        }
        if self.client_id.is_empty() {
            return Err(ConfigError::InvalidField {
                path: "oauth.clientId".to_string(),
                message: "required".to_string(),
            });
        }
        if self.jwks_cache_ttl_secs == 0 {
            return Err(ConfigError::InvalidField {
                path: "oauth.jwksCacheTtl".to_string(),
                message: "must be positive".to_string(),
            });
        }
        Ok(())
    }
}

/// Map a level name to a `log::LevelFilter`. Empty and unknown names
/// default to `Info`; `silent` disables logging entirely.
fn level_filter(value: &str) -> LevelFilter {
    match value {
        "silent" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        _ => LevelFilter::Info,
    }
}

/// Allow the empty string (use the default) or one of the listed values.
fn ensure_one_of(path: &str, value: &str, allowed: &[&str]) -> Result<(), ConfigError> {
    if value.is_empty() || allowed.contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidField {
            path: path.to_string(),
            message: format!("expected one of {allowed:?}"),
        })
    }
}
