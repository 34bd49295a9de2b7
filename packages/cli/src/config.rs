// ABOUTME: Environment-derived configuration for the Blueprint server
// ABOUTME: A missing API key is a hard boot error; everything else has defaults

use std::env;
use std::num::ParseIntError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid port number: {0}")]
    InvalidPort(#[from] ParseIntError),
    #[error("Port {0} is out of valid range (1-65535)")]
    PortOutOfRange(u16),
    #[error("GEMINI_API_KEY is not set; the generation backend cannot start")]
    MissingApiKey,
}

#[derive(Debug)]
pub struct Config {
    pub port: u16,
    pub cors_origin: String,
    pub api_key: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let port_str = env::var("BLUEPRINT_PORT").unwrap_or_else(|_| "4001".to_string());

        let port = port_str.parse::<u16>()?;
        if port == 0 {
            return Err(ConfigError::PortOutOfRange(port));
        }

        let cors_origin = env::var("BLUEPRINT_CORS_ORIGIN")
            .unwrap_or_else(|_| "http://localhost:5173".to_string());

        let api_key = env::var("GEMINI_API_KEY").map_err(|_| ConfigError::MissingApiKey)?;
        if api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }

        Ok(Config {
            port,
            cors_origin,
            api_key,
        })
    }
}
