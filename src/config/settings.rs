//! Process-wide settings, built once at start and passed explicitly.

use sqlx::postgres::PgConnectOptions;
use std::net::SocketAddr;
use std::time::Duration;

/// Store connection parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseSettings {
    pub host: String,
    pub port: u16,
    pub name: String,
    pub user: String,
    pub password: String,
    /// When set, used instead of the individual parts above.
    pub url: Option<String>,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl DatabaseSettings {
    /// Connect options for the configured database.
    pub fn connect_options(&self) -> Result<PgConnectOptions, sqlx::Error> {
        match &self.url {
            Some(url) => url.parse(),
            None => Ok(PgConnectOptions::new()
                .host(&self.host)
                .port(self.port)
                .database(&self.name)
                .username(&self.user)
                .password(&self.password)),
        }
    }

    /// Connection string for logs; never includes the password.
    pub fn display_target(&self) -> String {
        match &self.url {
            Some(_) => "DATABASE_URL".to_string(),
            None => format!("postgres://{}@{}:{}/{}", self.user, self.host, self.port, self.name),
        }
    }
}

/// Which repository backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Postgres,
    /// In-process, lost on exit. No pool is opened and no migrations run.
    Memory,
}

impl std::str::FromStr for StoreKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(StoreKind::Postgres),
            "memory" | "mem" => Ok(StoreKind::Memory),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub store: StoreKind,
    pub database: DatabaseSettings,
    /// Prefix the classroom routes are nested under, e.g. `/api/v1`.
    pub api_prefix: String,
    pub project_name: String,
    pub bind_addr: SocketAddr,
    pub request_timeout: Duration,
    pub max_body_bytes: usize,
    pub auto_migrate: bool,
    pub ensure_database: bool,
}
