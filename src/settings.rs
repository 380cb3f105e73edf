//! Process settings, read once at startup from the environment.

use crate::error::SettingsError;
use std::net::SocketAddr;

pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost/trip_planner";
pub const DEFAULT_NAMESPACE: &str = "trip_planner";
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8001";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

#[derive(Clone, Debug)]
pub struct Settings {
    /// Store connection string (`DATABASE_URL`).
    pub database_url: String,
    /// Store namespace (`STORE_NAMESPACE`): the PostgreSQL schema holding the collections.
    pub namespace: String,
    pub max_connections: u32,
    pub listen_addr: SocketAddr,
    pub backend: StoreBackend,
}

impl Settings {
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup. Missing keys take defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into());

        let namespace = lookup("STORE_NAMESPACE").unwrap_or_else(|| DEFAULT_NAMESPACE.into());
        if !is_identifier(&namespace) {
            return Err(SettingsError::Invalid {
                key: "STORE_NAMESPACE",
                reason: format!("'{}' is not a plain identifier", namespace),
            });
        }

        let max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => raw
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| SettingsError::Invalid {
                    key: "DATABASE_MAX_CONNECTIONS",
                    reason: format!("'{}' is not a positive integer", raw),
                })?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let listen_addr = lookup("LISTEN_ADDR")
            .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.into())
            .parse::<SocketAddr>()
            .map_err(|e| SettingsError::Invalid {
                key: "LISTEN_ADDR",
                reason: e.to_string(),
            })?;

        let backend = match lookup("STORE_BACKEND").map(|s| s.to_lowercase()).as_deref() {
            None | Some("postgres") => StoreBackend::Postgres,
            Some("memory") => StoreBackend::Memory,
            Some(other) => {
                return Err(SettingsError::Invalid {
                    key: "STORE_BACKEND",
                    reason: format!("unknown backend '{}' (expected postgres or memory)", other),
                })
            }
        };

        Ok(Settings {
            database_url,
            namespace,
            max_connections,
            listen_addr,
            backend,
        })
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        && s.len() <= 63
}
