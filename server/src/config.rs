//! Server configuration read from the environment (and `.env`).

use std::env;
use std::num::ParseIntError;

use derive_more::{Display, Error};

/// Configuration errors.
#[derive(Debug, Display, Error)]
pub enum ConfigError {
    #[display("invalid SERVER_PORT {value:?}: {source}")]
    InvalidPort { value: String, source: ParseIntError },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Realm of the Basic challenge. `None` leaves `WWW-Authenticate` off.
    pub realm: Option<String>,
}

impl ServerConfig {
    /// Loads `.env` if present, then reads `SERVER_HOST`, `SERVER_PORT` and
    /// `SECURITY_REALM`.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("SERVER_PORT") {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|source| ConfigError::InvalidPort { value, source })?,
            None => 8080,
        };

        Ok(ServerConfig {
            host: lookup("SERVER_HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port,
            realm: lookup("SECURITY_REALM").filter(|realm| !realm.is_empty()),
        })
    }

    pub fn bind_address(&self) -> (&str, u16) {
        (&self.host, self.port)
    }
}
