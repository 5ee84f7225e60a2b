//! Server configuration read from the environment.
//!
//! `main` loads `.env.local` / `.env` first, then calls
//! [`ServerConfig::from_env`]. Parsing goes through a lookup closure so tests
//! never touch the process environment.

use std::net::SocketAddr;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DB_PATH: &str = "ballotbox.db";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid {name} value '{value}'")]
    Invalid { name: &'static str, value: String },
}

/// Which origins the CORS layer lets through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsOrigins {
    Any,
    List(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub db_path: String,
    /// `None` disables the CORS layer.
    pub cors: Option<CorsOrigins>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            db_path: DEFAULT_DB_PATH.to_string(),
            cors: None,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let host = get("SERVER_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match get("SERVER_PORT").or_else(|| get("PORT")) {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                name: "SERVER_PORT",
                value: raw,
            })?,
            None => DEFAULT_PORT,
        };
        let db_path = get("BALLOTBOX_DB").unwrap_or_else(|| DEFAULT_DB_PATH.to_string());
        let cors = get("CORS_ALLOWED_ORIGINS").and_then(|raw| parse_cors(&raw));

        Ok(Self {
            host,
            port,
            db_path,
            cors,
        })
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| ConfigError::Invalid {
                name: "SERVER_HOST",
                value: self.host.clone(),
            })
    }
}

fn parse_cors(raw: &str) -> Option<CorsOrigins> {
    if raw == "*" {
        return Some(CorsOrigins::Any);
    }
    let origins: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    if origins.is_empty() {
        None
    } else {
        Some(CorsOrigins::List(origins))
    }
}
