use std::env;

use thiserror::Error;

/// The default port the server will listen on.
pub const DEFAULT_PORT: u16 = 5000;

/// The environment variable the port is read from.
pub const PORT_VARIABLE: &str = "WATCHPARTY_SERVER_PORT";

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("WATCHPARTY_SERVER_PORT must be a port number, got \"{0}\"")]
    InvalidPort(String),
}

impl ServerConfig {
    /// Reads the configuration from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_port(env::var(PORT_VARIABLE).ok())
    }

    fn from_port(port: Option<String>) -> Result<Self, ConfigError> {
        let port = match port {
            Some(value) => value
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(value))?,
            None => DEFAULT_PORT,
        };

        Ok(Self { port })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: DEFAULT_PORT }
    }
}
