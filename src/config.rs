//! Runtime configuration loaded from environment variables.
//!
//! Every setting has a default, so an empty environment yields a working
//! configuration. A `.env` file in the working directory is read first when
//! present.

use std::fmt;
use std::str::FromStr;

use axum::http::HeaderValue;
use thiserror::Error;

/// Errors raised while reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// An environment variable holds a value that cannot be used.
    #[error("invalid value for {key}: {message}")]
    InvalidValue {
        /// Name of the offending variable.
        key: &'static str,
        /// Why the value was rejected.
        message: String,
    },
}

impl ConfigError {
    fn invalid(key: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            key,
            message: message.into(),
        }
    }
}

/// Deployment environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    /// Local development; error responses include diagnostic traces.
    Development,
    /// Production deployment.
    #[default]
    Production,
    /// Automated test runs.
    Test,
}

impl Environment {
    /// Whether diagnostic traces may be exposed to clients.
    #[must_use]
    pub const fn is_development(self) -> bool {
        matches!(self, Self::Development)
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            "test" => Ok(Self::Test),
            other => Err(format!(
                "expected development, production or test, got {other:?}"
            )),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Development => "development",
            Self::Production => "production",
            Self::Test => "test",
        })
    }
}

/// Which repository implementation backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageBackend {
    /// Diesel over a PostgreSQL connection pool.
    #[default]
    Postgres,
    /// Process-local store; contents vanish on restart.
    Memory,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" | "in-memory" => Ok(Self::Memory),
            other => Err(format!("expected postgres or memory, got {other:?}")),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("expected pretty or json, got {other:?}")),
        }
    }
}

/// Origins allowed by the CORS layer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CorsOrigin {
    /// Any origin (`*`).
    #[default]
    Any,
    /// A single exact origin.
    Exact(HeaderValue),
}

impl FromStr for CorsOrigin {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed == "*" {
            return Ok(Self::Any);
        }
        HeaderValue::from_str(trimmed)
            .map(Self::Exact)
            .map_err(|err| err.to_string())
    }
}

/// Complete runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Listen address.
    pub host: String,
    /// Listen port.
    pub port: u16,
    /// Deployment environment.
    pub environment: Environment,
    /// Prefix under which every API route is mounted; empty mounts at the
    /// root.
    pub api_prefix: String,
    /// Allowed CORS origin.
    pub cors_origin: CorsOrigin,
    /// Repository implementation.
    pub storage_backend: StorageBackend,
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// Maximum number of pooled connections.
    pub pool_max_size: u32,
    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_owned(),
            port: 3000,
            environment: Environment::default(),
            api_prefix: "/api".to_owned(),
            cors_origin: CorsOrigin::default(),
            storage_backend: StorageBackend::default(),
            database_url: compose_database_url(&DatabaseParts::default()),
            pool_max_size: 20,
            log_format: LogFormat::default(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when a variable is set to a
    /// value that cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            tracing::warn!(error = %err, "failed to read .env file");
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when a variable is set to a
    /// value that cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let database_url = match get("DATABASE_URL") {
            Some(url) => url,
            None => {
                let fallback = DatabaseParts::default();
                compose_database_url(&DatabaseParts {
                    host: get("DB_HOST").unwrap_or(fallback.host),
                    port: parse_or("DB_PORT", get("DB_PORT"), fallback.port)?,
                    user: get("DB_USER").unwrap_or(fallback.user),
                    password: get("DB_PASS").unwrap_or(fallback.password),
                    name: get("DB_NAME").unwrap_or(fallback.name),
                })
            }
        };

        let pool_max_size = parse_or("DB_POOL_MAX", get("DB_POOL_MAX"), defaults.pool_max_size)?;
        if pool_max_size == 0 {
            return Err(ConfigError::invalid("DB_POOL_MAX", "must be at least 1"));
        }

        Ok(Self {
            host: get("HOST").unwrap_or(defaults.host),
            port: parse_or("PORT", get("PORT"), defaults.port)?,
            environment: parse_or("APP_ENV", get("APP_ENV"), defaults.environment)?,
            api_prefix: normalize_prefix(
                &lookup("API_PREFIX").unwrap_or(defaults.api_prefix),
            )?,
            cors_origin: parse_or("CORS_ORIGIN", get("CORS_ORIGIN"), defaults.cors_origin)?,
            storage_backend: parse_or(
                "STORAGE_BACKEND",
                get("STORAGE_BACKEND"),
                defaults.storage_backend,
            )?,
            database_url,
            pool_max_size,
            log_format: parse_or("LOG_FORMAT", get("LOG_FORMAT"), defaults.log_format)?,
        })
    }

    /// Address the server binds to.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

struct DatabaseParts {
    host: String,
    port: u16,
    user: String,
    password: String,
    name: String,
}

impl Default for DatabaseParts {
    fn default() -> Self {
        Self {
            host: "localhost".to_owned(),
            port: 5432,
            user: "postgres".to_owned(),
            password: "postgres".to_owned(),
            name: "todos".to_owned(),
        }
    }
}

fn compose_database_url(parts: &DatabaseParts) -> String {
    format!(
        "postgres://{}:{}@{}:{}/{}",
        parts.user, parts.password, parts.host, parts.port, parts.name
    )
}

fn parse_or<T>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    raw.map_or(Ok(default), |value| {
        value
            .trim()
            .parse()
            .map_err(|err: T::Err| ConfigError::invalid(key, err.to_string()))
    })
}

/// Trims surrounding whitespace and trailing slashes. An empty or `/`
/// prefix mounts routes at the root.
fn normalize_prefix(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Ok(String::new());
    }
    if !trimmed.starts_with('/') {
        return Err(ConfigError::invalid("API_PREFIX", "must start with '/'"));
    }
    Ok(trimmed.to_owned())
}
