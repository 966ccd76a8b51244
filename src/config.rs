use serde::Deserialize;
use std::env;
use std::sync::OnceLock;
use thiserror::Error;

/// Errors encountered while loading configuration from environment variables.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Environment variable contained a value that could not be parsed.
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
    /// Configuration was installed more than once.
    #[error("Configuration already initialized")]
    AlreadyInitialized,
}

/// Runtime configuration for the car registry server.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Optional override for the HTTP server port.
    pub server_port: Option<u16>,
    /// Payload returned by a successful registration.
    pub register_response: RegisterResponse,
}

/// What `PUT /car` returns when a registration succeeds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegisterResponse {
    /// The stored record, including its assigned id.
    #[default]
    Record,
    /// A fixed acknowledgement payload.
    Ack,
}

impl Config {
    /// Load configuration from environment variables, performing validation along the way.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            server_port: load_env_optional("SERVER_PORT")
                .map(|value| {
                    value
                        .parse()
                        .map_err(|_| ConfigError::InvalidValue("SERVER_PORT".into()))
                })
                .transpose()?,
            register_response: load_env_optional("REGISTER_RESPONSE")
                .map(|value| {
                    value
                        .parse()
                        .map_err(|()| ConfigError::InvalidValue("REGISTER_RESPONSE".into()))
                })
                .transpose()?
                .unwrap_or_default(),
        })
    }
}

fn load_env_optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

impl std::str::FromStr for RegisterResponse {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "record" => Ok(Self::Record),
            "ack" => Ok(Self::Ack),
            _ => Err(()),
        }
    }
}

/// Global configuration cache populated during process start.
pub static CONFIG: OnceLock<Config> = OnceLock::new();

/// Retrieve the loaded configuration, falling back to defaults when none was installed.
pub fn get_config() -> &'static Config {
    CONFIG.get_or_init(Config::default)
}

/// Load configuration from the environment and install it in the global cache.
pub fn init_config() -> Result<&'static Config, ConfigError> {
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;
    tracing::debug!(
        server_port = ?config.server_port,
        register_response = ?config.register_response,
        "Loaded configuration"
    );
    CONFIG
        .set(config)
        .map_err(|_| ConfigError::AlreadyInitialized)?;
    Ok(get_config())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_response_parses_case_insensitively() {
        assert_eq!("record".parse::<RegisterResponse>(), Ok(RegisterResponse::Record));
        assert_eq!(" ACK ".parse::<RegisterResponse>(), Ok(RegisterResponse::Ack));
        assert_eq!("both".parse::<RegisterResponse>(), Err(()));
    }

    #[test]
    fn defaults_return_stored_record_on_any_port() {
        let config = Config::default();
        assert_eq!(config.server_port, None);
        assert_eq!(config.register_response, RegisterResponse::Record);
    }
}
