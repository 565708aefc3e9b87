//! Server configuration read from the environment.

use std::net::SocketAddr;

use playground_stories::domain::story_set::DEFAULT_EVENT_BUFFER_CAPACITY;

use crate::error::AppError;

/// Runtime configuration for the API server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Height sessions render at unless the request sets one.
    pub base_height: String,
    /// Membership events buffered per session before it lags.
    pub event_buffer: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_owned(),
            port: 3000,
            base_height: "100%".to_owned(),
            event_buffer: DEFAULT_EVENT_BUFFER_CAPACITY,
        }
    }
}

impl ApiConfig {
    /// Reads `HOST`, `PORT`, `PLAYGROUND_BASE_HEIGHT` and
    /// `PLAYGROUND_EVENT_BUFFER`, falling back to defaults when unset.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ApiConfig::from_env`] with a custom variable source.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let defaults = Self::default();

        let host = lookup("HOST").unwrap_or(defaults.host);
        let port = match lookup("PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|e| AppError::Config(format!("PORT must be a valid u16: {e}")))?,
            None => defaults.port,
        };
        let base_height = match lookup("PLAYGROUND_BASE_HEIGHT") {
            Some(raw) if raw.trim().is_empty() => {
                return Err(AppError::Config(
                    "PLAYGROUND_BASE_HEIGHT must not be empty".into(),
                ));
            }
            Some(raw) => raw,
            None => defaults.base_height,
        };
        let event_buffer = match lookup("PLAYGROUND_EVENT_BUFFER") {
            Some(raw) => match raw.parse::<usize>() {
                Ok(0) => {
                    return Err(AppError::Config(
                        "PLAYGROUND_EVENT_BUFFER must be at least 1".into(),
                    ));
                }
                Ok(capacity) => capacity,
                Err(e) => {
                    return Err(AppError::Config(format!(
                        "PLAYGROUND_EVENT_BUFFER must be a positive integer: {e}"
                    )));
                }
            },
            None => defaults.event_buffer,
        };

        Ok(Self {
            host,
            port,
            base_height,
            event_buffer,
        })
    }

    /// Socket address built from `host` and `port`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the combination does not parse.
    pub fn socket_addr(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))
    }
}
