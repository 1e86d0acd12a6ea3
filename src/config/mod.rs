//! Process configuration from the environment (after loading `.env` when present).

use crate::error::ConfigError;

const DEFAULT_SCHEMA: &str = "public";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    /// Base URL of the managed backend; the auth API lives under `/auth/v1`.
    pub backend_url: String,
    pub anon_key: String,
    /// Privileged key, used only for account deletion.
    pub service_role_key: String,
    pub schema: String,
    pub bind_addr: String,
    pub max_connections: u32,
    /// Create the library tables at startup.
    pub ensure_tables: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; empty values count as missing.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let required = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let max_connections = match get("DATABASE_MAX_CONNECTIONS") {
            Some(v) => v.parse().map_err(|_| ConfigError::Invalid {
                key: "DATABASE_MAX_CONNECTIONS",
                value: v,
            })?,
            None => DEFAULT_MAX_CONNECTIONS,
        };
        let ensure_tables = match get("LIBRARY_ENSURE_TABLES") {
            Some(v) => v.parse().map_err(|_| ConfigError::Invalid {
                key: "LIBRARY_ENSURE_TABLES",
                value: v,
            })?,
            None => false,
        };

        Ok(Config {
            database_url: required("DATABASE_URL")?,
            backend_url: required("BACKEND_URL")?,
            anon_key: required("BACKEND_ANON_KEY")?,
            service_role_key: required("BACKEND_SERVICE_ROLE_KEY")?,
            schema: get("LIBRARY_SCHEMA").unwrap_or_else(|| DEFAULT_SCHEMA.into()),
            bind_addr: get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.into()),
            max_connections,
            ensure_tables,
        })
    }
}
