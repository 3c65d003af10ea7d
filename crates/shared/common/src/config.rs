//! Process settings loaded once at startup.
//!
//! [`Settings`] is built explicitly and handed to the components that need
//! it. Loading is eager: a missing required variable or an unparsable value
//! fails immediately with a [`ConfigError`] naming the variable.

use std::env;

use serde::Serialize;
use thiserror::Error;

// =============================================================================
// Environment Variables
// =============================================================================

pub const ENV_NODE_ENV: &str = "NODE_ENV";
pub const ENV_APP_ORIGIN: &str = "APP_ORIGIN";
pub const ENV_PORT: &str = "PORT";
pub const ENV_BASE_PATH: &str = "BASE_PATH";
pub const ENV_DATABASE_URL: &str = "DATABASE_URL";
pub const ENV_DATABASE_MAX_CONNECTIONS: &str = "DATABASE_MAX_CONNECTIONS";
pub const ENV_DATABASE_MIN_CONNECTIONS: &str = "DATABASE_MIN_CONNECTIONS";
pub const ENV_DATABASE_TLS: &str = "DATABASE_TLS";

/// Variables that must be present for the process to start
pub const REQUIRED_VARS: &[&str] = &[
    ENV_NODE_ENV,
    ENV_APP_ORIGIN,
    ENV_PORT,
    ENV_BASE_PATH,
    ENV_DATABASE_URL,
];

const PRODUCTION: &str = "production";

/// Configuration loading errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variable(s): {}", .0.join(", "))]
    Missing(Vec<&'static str>),

    #[error("invalid value '{value}' for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Database pool and transport options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatabaseOptions {
    pub max_connections: u32,
    pub min_connections: u32,
    /// Require TLS on the database connection
    pub tls: bool,
}

impl Default for DatabaseOptions {
    fn default() -> Self {
        Self {
            max_connections: 10,
            min_connections: 1,
            tls: true,
        }
    }
}

/// Immutable application settings.
#[derive(Clone, Serialize)]
pub struct Settings {
    /// Deployment environment name (`development`, `production`, ...)
    pub node_env: String,
    /// Origin the application is served from
    pub app_origin: String,
    /// Port the application listens on
    pub port: u16,
    /// Path prefix for every route
    pub base_path: String,
    #[serde(skip_serializing)]
    database_url: String,
    pub database: DatabaseOptions,
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("node_env", &self.node_env)
            .field("app_origin", &self.app_origin)
            .field("port", &self.port)
            .field("base_path", &self.base_path)
            .field("database_url", &"[REDACTED]")
            .field("database", &self.database)
            .finish()
    }
}

impl Settings {
    /// Load settings from the process environment, reading `.env` first.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                tracing::warn!("Ignoring unreadable .env file: {}", e);
            }
        }
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load settings through an arbitrary variable lookup.
    ///
    /// Blank values are treated as absent. Every missing required variable is
    /// reported at once.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let missing: Vec<&'static str> = REQUIRED_VARS
            .iter()
            .copied()
            .filter(|key| get(*key).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(ConfigError::Missing(missing));
        }

        let required = |key: &'static str| get(key).ok_or(ConfigError::Missing(vec![key]));

        let port: u16 = parse(ENV_PORT, required(ENV_PORT)?)?;
        if port == 0 {
            return Err(invalid(ENV_PORT, "0", "port must be non-zero"));
        }

        let defaults = DatabaseOptions::default();
        let database = DatabaseOptions {
            max_connections: get(ENV_DATABASE_MAX_CONNECTIONS)
                .map(|v| parse(ENV_DATABASE_MAX_CONNECTIONS, v))
                .transpose()?
                .unwrap_or(defaults.max_connections),
            min_connections: get(ENV_DATABASE_MIN_CONNECTIONS)
                .map(|v| parse(ENV_DATABASE_MIN_CONNECTIONS, v))
                .transpose()?
                .unwrap_or(defaults.min_connections),
            tls: get(ENV_DATABASE_TLS)
                .map(|v| parse_flag(ENV_DATABASE_TLS, v))
                .transpose()?
                .unwrap_or(defaults.tls),
        };
        if database.max_connections == 0 {
            return Err(invalid(
                ENV_DATABASE_MAX_CONNECTIONS,
                "0",
                "pool needs at least one connection",
            ));
        }
        if database.min_connections > database.max_connections {
            return Err(invalid(
                ENV_DATABASE_MIN_CONNECTIONS,
                database.min_connections.to_string(),
                format!("exceeds {} ({})", ENV_DATABASE_MAX_CONNECTIONS, database.max_connections),
            ));
        }

        Ok(Self {
            node_env: required(ENV_NODE_ENV)?,
            app_origin: required(ENV_APP_ORIGIN)?,
            port,
            base_path: required(ENV_BASE_PATH)?,
            database_url: required(ENV_DATABASE_URL)?,
            database,
        })
    }

    /// Database connection string.
    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn is_production(&self) -> bool {
        self.node_env.eq_ignore_ascii_case(PRODUCTION)
    }

    /// Bind address for the application.
    pub fn server_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

fn invalid(key: &'static str, value: impl Into<String>, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        key,
        value: value.into(),
        reason: reason.into(),
    }
}

fn parse<T>(key: &'static str, value: String) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|e: T::Err| invalid(key, value.clone(), e.to_string()))
}

fn parse_flag(key: &'static str, value: String) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(invalid(key, value, "expected true or false")),
    }
}
