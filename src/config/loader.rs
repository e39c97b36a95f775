//! Load [`Settings`] from the process environment (after `.env`) or any key lookup.

use crate::config::settings::{DatabaseSettings, Settings, StoreKind};
use crate::error::ConfigError;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_DB_HOST: &str = "localhost";
pub const DEFAULT_DB_PORT: u16 = 5432;
pub const DEFAULT_DB_NAME: &str = "student_db";
pub const DEFAULT_DB_USER: &str = "postgres";
pub const DEFAULT_DB_PASSWORD: &str = "password";
pub const DEFAULT_API_PREFIX: &str = "/api/v1";
pub const DEFAULT_PROJECT_NAME: &str = "Student Management System";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

impl Settings {
    /// Read `.env` if present, then the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let text = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        let database = DatabaseSettings {
            host: text("DB_HOST", DEFAULT_DB_HOST),
            port: parse_or(&get, "DB_PORT", DEFAULT_DB_PORT)?,
            name: text("DB_NAME", DEFAULT_DB_NAME),
            user: text("DB_USER", DEFAULT_DB_USER),
            password: text("DB_PASSWORD", DEFAULT_DB_PASSWORD),
            url: get("DATABASE_URL"),
            max_connections: parse_or(&get, "DB_MAX_CONNECTIONS", 5u32)?,
            acquire_timeout: Duration::from_secs(parse_or(&get, "DB_ACQUIRE_TIMEOUT_SECS", 5u64)?),
        };

        let bind_raw = text("BIND_ADDR", DEFAULT_BIND_ADDR);
        let bind_addr = SocketAddr::from_str(&bind_raw).map_err(|_| ConfigError::BindAddr(bind_raw))?;

        Ok(Settings {
            store: parse_or(&get, "STORE", StoreKind::Postgres)?,
            database,
            api_prefix: normalize_prefix(&text("API_V1_STR", DEFAULT_API_PREFIX)),
            project_name: text("PROJECT_NAME", DEFAULT_PROJECT_NAME),
            bind_addr,
            request_timeout: Duration::from_secs(parse_or(&get, "REQUEST_TIMEOUT_SECS", 30u64)?),
            max_body_bytes: parse_or(&get, "MAX_BODY_BYTES", 64 * 1024usize)?,
            auto_migrate: parse_bool_or(&get, "AUTO_MIGRATE", true)?,
            ensure_database: parse_bool_or(&get, "ENSURE_DATABASE", false)?,
        })
    }
}

fn parse_or<T, G>(get: &G, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        None => Ok(default),
        Some(v) => v.parse().map_err(|_| ConfigError::Invalid { key, value: v }),
    }
}

fn parse_bool_or<G>(get: &G, key: &'static str, default: bool) -> Result<bool, ConfigError>
where
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        None => Ok(default),
        Some(v) => match v.to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::Invalid { key, value: v }),
        },
    }
}

/// Leading slash, no trailing slash; "/" and "" collapse to "" (no prefix).
fn normalize_prefix(raw: &str) -> String {
    let trimmed = raw.trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}
