use std::str::FromStr;

use anyhow::{anyhow, bail, Context};

use crate::auth::jwt::JwtConfig;
use crate::auth::provider::Credentials;

/// Log output format selected with `LOG_FORMAT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(anyhow!("unknown log format '{other}', expected 'text' or 'json'")),
        }
    }
}

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8080`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// PostgreSQL connection string for the employee store.
    pub database_url: String,
    /// MongoDB connection string for the project store.
    pub mongodb_uri: String,
    pub mongodb_database: String,
    pub jwt: JwtConfig,
    /// Demo account holding the `admin` role.
    pub admin: Credentials,
    /// Demo account holding the `user` role.
    pub user: Credentials,
    pub log_format: LogFormat,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                  | Default                 |
    /// |--------------------------|-------------------------|
    /// | `HOST`                   | `0.0.0.0`               |
    /// | `PORT`                   | `8080`                  |
    /// | `CORS_ORIGINS`           | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`   | `30`                    |
    /// | `DATABASE_URL`           | required                |
    /// | `MONGODB_URI`            | required                |
    /// | `MONGODB_DATABASE`       | `staffhub`              |
    /// | `JWT_SECRET`             | required                |
    /// | `JWT_ACCESS_EXPIRY_MINS` | `60`                    |
    /// | `ADMIN_USERNAME`         | `admin`                 |
    /// | `ADMIN_PASSWORD`         | `admin`                 |
    /// | `USER_USERNAME`          | `user`                  |
    /// | `USER_PASSWORD`          | `password`              |
    /// | `LOG_FORMAT`             | `text`                  |
    pub fn from_env() -> anyhow::Result<Self> {
        let cors_origins: Vec<String> = env_or("CORS_ORIGINS", "http://localhost:5173")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let secret = required("JWT_SECRET")?;
        let jwt = JwtConfig {
            secret,
            access_token_expiry_mins: parse_env("JWT_ACCESS_EXPIRY_MINS", "60")?,
        };

        Ok(Self {
            host: env_or("HOST", "0.0.0.0"),
            port: parse_env("PORT", "8080")?,
            cors_origins,
            request_timeout_secs: parse_env("REQUEST_TIMEOUT_SECS", "30")?,
            database_url: required("DATABASE_URL")?,
            mongodb_uri: required("MONGODB_URI")?,
            mongodb_database: env_or("MONGODB_DATABASE", "staffhub"),
            jwt,
            admin: Credentials {
                username: env_or("ADMIN_USERNAME", "admin"),
                password: env_or("ADMIN_PASSWORD", "admin"),
            },
            user: Credentials {
                username: env_or("USER_USERNAME", "user"),
                password: env_or("USER_PASSWORD", "password"),
            },
            log_format: env_or("LOG_FORMAT", "text").parse()?,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn required(key: &str) -> anyhow::Result<String> {
    let value = std::env::var(key).with_context(|| format!("{key} must be set"))?;
    if value.trim().is_empty() {
        bail!("{key} must not be empty");
    }
    Ok(value)
}

fn parse_env<T>(key: &str, default: &str) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    env_or(key, default)
        .trim()
        .parse()
        .with_context(|| format!("{key} must be a valid {}", std::any::type_name::<T>()))
}
