use std::env;
use std::net::SocketAddr;
use thiserror::Error;

const DEFAULT_BIND_ADDRESS: ([u8; 4], u16) = ([127, 0, 0, 1], 3000);
const DEFAULT_BASE_PATH: &str = "/console";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("DATABASE_URL is not set; point it at the PostgreSQL database to inspect")]
    MissingDatabaseUrl,

    #[error("{name} has an invalid value {value:?}: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Server settings, read from the environment
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub bind_address: SocketAddr,
    pub base_path: String,
    pub max_connections: u32,
}

impl ServerConfig {
    /// Reads `DATABASE_URL` (required), `CONSOLE_BIND_ADDRESS`,
    /// `CONSOLE_BASE_PATH` and `DATABASE_MAX_CONNECTIONS`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or(ConfigError::MissingDatabaseUrl)?;

        let bind_address = parse_or(&lookup, "CONSOLE_BIND_ADDRESS", SocketAddr::from(DEFAULT_BIND_ADDRESS))?;
        let max_connections = parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?;
        let base_path = lookup("CONSOLE_BASE_PATH").unwrap_or_else(|| DEFAULT_BASE_PATH.to_string());

        Ok(Self {
            database_url,
            bind_address,
            base_path,
            max_connections,
        })
    }
}

fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        Some(value) => value.parse().map_err(|error: T::Err| ConfigError::Invalid {
            name,
            reason: error.to_string(),
            value,
        }),
        None => Ok(default),
    }
}
