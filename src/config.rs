use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use warp::http::Uri;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_CORS_ALLOWED_ORIGIN: &str = "http://localhost:5173";

/// Configuration for the relay, loaded from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Listen port (PORT)
    pub port: u16,
    /// Origin allowed to call the query endpoints (CORS_ALLOWED_ORIGIN)
    pub cors_allowed_origin: String,
}

impl Config {
    /// Create a new Config instance from environment variables,
    /// falling back to documented defaults for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = match std::env::var("PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            Err(_) => DEFAULT_PORT,
        };

        let cors_allowed_origin = std::env::var("CORS_ALLOWED_ORIGIN")
            .unwrap_or_else(|_| DEFAULT_CORS_ALLOWED_ORIGIN.to_string());
        validate_origin(&cors_allowed_origin)?;

        Ok(Config {
            port,
            cors_allowed_origin,
        })
    }

    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), self.port)
    }
}

/// An origin must be `*` or `scheme://host[:port]`; warp's CORS layer
/// panics on anything else, so the check happens at startup instead.
fn validate_origin(origin: &str) -> Result<(), ConfigError> {
    if origin == "*" {
        return Ok(());
    }
    let uri: Uri = origin
        .parse()
        .map_err(|_| ConfigError::InvalidOrigin(origin.to_string()))?;
    if uri.scheme().is_none() || uri.authority().is_none() {
        return Err(ConfigError::InvalidOrigin(origin.to_string()));
    }
    Ok(())
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("PORT must be a number between 1 and 65535, got '{0}'")]
    InvalidPort(String),

    #[error("CORS_ALLOWED_ORIGIN must be '*' or an origin like 'http://host:port', got '{0}'")]
    InvalidOrigin(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Tests that modify environment variables must run serially
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_config_defaults() {
        let _lock = ENV_LOCK.lock().unwrap();
        std::env::remove_var("PORT");
        std::env::remove_var("CORS_ALLOWED_ORIGIN");

        let config = Config::from_env().unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.cors_allowed_origin, DEFAULT_CORS_ALLOWED_ORIGIN);
        assert_eq!(config.listen_addr().to_string(), "0.0.0.0:3000");
    }

    #[test]
    fn test_config_from_env() {
        let _lock = ENV_LOCK.lock().unwrap();
        std::env::set_var("PORT", "8080");
        std::env::set_var("CORS_ALLOWED_ORIGIN", "http://dashboard.local:4000");

        let config = Config::from_env().unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.cors_allowed_origin, "http://dashboard.local:4000");

        std::env::remove_var("PORT");
        std::env::remove_var("CORS_ALLOWED_ORIGIN");
    }

    #[test]
    fn test_config_invalid_port() {
        let _lock = ENV_LOCK.lock().unwrap();
        std::env::set_var("PORT", "not-a-port");

        let result = Config::from_env();
        assert!(matches!(result, Err(ConfigError::InvalidPort(_))));

        std::env::remove_var("PORT");
    }

    #[test]
    fn test_config_invalid_origin() {
        let _lock = ENV_LOCK.lock().unwrap();
        std::env::remove_var("PORT");
        std::env::set_var("CORS_ALLOWED_ORIGIN", "not an origin");

        let result = Config::from_env();
        assert!(matches!(result, Err(ConfigError::InvalidOrigin(_))));

        std::env::remove_var("CORS_ALLOWED_ORIGIN");
    }

    #[test]
    fn test_config_wildcard_origin() {
        let _lock = ENV_LOCK.lock().unwrap();
        std::env::remove_var("PORT");
        std::env::set_var("CORS_ALLOWED_ORIGIN", "*");

        let config = Config::from_env().unwrap();
        assert_eq!(config.cors_allowed_origin, "*");

        std::env::remove_var("CORS_ALLOWED_ORIGIN");
    }
}
