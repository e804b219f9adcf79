//! Server configuration.
//!
//! Loaded from (in order of precedence):
//! 1. Environment variables (`PORT`, `HOST`, `LOG_LEVEL`, `LOG_FORMAT`)
//! 2. Default values

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use figment::{
    providers::{Env, Serialized},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Environment variables the server reads.
const ENV_KEYS: [&str; 4] = ["PORT", "HOST", "LOG_LEVEL", "LOG_FORMAT"];

/// Log line format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Runtime configuration for the server binary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address.
    #[serde(default = "default_host")]
    pub host: IpAddr,

    /// Listen port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Default log filter, used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

fn default_port() -> u16 {
    3000
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            log_format: LogFormat::default(),
        }
    }
}

impl ServerConfig {
    /// Loads configuration from the process environment over the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// The provider stack behind [`ServerConfig::from_env`].
    pub fn figment() -> Figment {
        Figment::new()
            .merge(Serialized::defaults(ServerConfig::default()))
            .merge(Env::raw().only(&ENV_KEYS))
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn json_logs(&self) -> bool {
        self.log_format == LogFormat::Json
    }
}

#[cfg(test)]
mod tests {
    use figment::Jail;

    use super::*;

    #[test]
    fn defaults_when_unset() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            let config = ServerConfig::from_env().unwrap();
            assert_eq!(config, ServerConfig::default());
            assert_eq!(config.addr().to_string(), "0.0.0.0:3000");
            assert!(!config.json_logs());
            Ok(())
        });
    }

    #[test]
    fn reads_port_and_host() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            jail.set_env("PORT", "8080");
            jail.set_env("HOST", "127.0.0.1");
            let config = ServerConfig::from_env().unwrap();
            assert_eq!(config.addr().to_string(), "127.0.0.1:8080");
            Ok(())
        });
    }

    #[test]
    fn invalid_port_is_an_error() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            jail.set_env("PORT", "http");
            assert!(matches!(ServerConfig::from_env(), Err(ConfigError::Invalid(_))));

            jail.set_env("PORT", "70000");
            assert!(matches!(ServerConfig::from_env(), Err(ConfigError::Invalid(_))));
            Ok(())
        });
    }

    #[test]
    fn invalid_host_is_an_error() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            jail.set_env("HOST", "localhost:3000");
            assert!(matches!(ServerConfig::from_env(), Err(ConfigError::Invalid(_))));
            Ok(())
        });
    }

    #[test]
    fn log_settings() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            jail.set_env("LOG_LEVEL", "todo_server=debug");
            jail.set_env("LOG_FORMAT", "json");
            let config = ServerConfig::from_env().unwrap();
            assert_eq!(config.log_level, "todo_server=debug");
            assert!(config.json_logs());
            Ok(())
        });
    }

    #[test]
    fn unrelated_variables_are_ignored() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            jail.set_env("LOG_FORMATS", "not-a-format");
            jail.set_env("TODO_PORT", "not-a-port");
            assert_eq!(ServerConfig::from_env().unwrap(), ServerConfig::default());
            Ok(())
        });
    }
}
