//! Configuration management for the todo-gen server.
//!
//! Loaded once at startup from environment variables. Empty values count as
//! unset.

use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;

/// Default Redis endpoint.
pub const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379";
/// Default listen address.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
/// Default deadline for store and generator calls, in seconds.
pub const DEFAULT_BACKEND_TIMEOUT_SECS: u64 = 10;

/// Configuration errors. Any of these stops the process before it binds.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is unset or empty.
    #[error("{0} environment variable not set")]
    Missing(&'static str),

    /// A variable is set but cannot be used.
    #[error("invalid {var} {value:?}: {reason}")]
    Invalid {
        /// Variable name
        var: &'static str,
        /// Offending value
        value: String,
        /// Why it was rejected
        reason: String,
    },
}

/// Application configuration loaded from environment variables.
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    /// `AWS_REGION`: region of the Bedrock runtime endpoint
    pub region: String,
    /// `TODO_TABLE`: key namespace of the todos in the store
    pub table: String,
    /// `REDIS_URL`
    pub redis_url: String,
    /// `AWS_BEDROCK_MODEL_NAME`
    pub model_id: String,
    /// `AWS_BEARER_TOKEN_BEDROCK`
    pub bedrock_api_key: Option<String>,
    /// `BEDROCK_ENDPOINT`: overrides the regional endpoint
    pub bedrock_endpoint: Option<String>,
    /// `MOTD`
    pub motd: Option<String>,
    /// `PATH_PREFIX`, as configured (normalised by the web layer)
    pub path_prefix: String,
    /// `BIND_ADDR`
    pub bind_addr: SocketAddr,
    /// `BACKEND_TIMEOUT_SECS`
    pub backend_timeout: Duration,
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a required variable is missing or a value
    /// cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a required variable is missing or a value
    /// cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|value| !value.is_empty());
        let require = |var: &'static str| get(var).ok_or(ConfigError::Missing(var));

        let bind_addr = match get("BIND_ADDR") {
            Some(value) => match value.parse::<SocketAddr>() {
                Ok(addr) => addr,
                Err(e) => {
                    return Err(ConfigError::Invalid {
                        var: "BIND_ADDR",
                        value,
                        reason: e.to_string(),
                    });
                }
            },
            None => SocketAddr::from(([0, 0, 0, 0], 8080)),
        };

        let backend_timeout_secs = match get("BACKEND_TIMEOUT_SECS") {
            Some(value) => match value.parse::<u64>() {
                Ok(0) => {
                    return Err(ConfigError::Invalid {
                        var: "BACKEND_TIMEOUT_SECS",
                        value,
                        reason: "must be at least 1".to_string(),
                    });
                }
                Ok(secs) => secs,
                Err(e) => {
                    return Err(ConfigError::Invalid {
                        var: "BACKEND_TIMEOUT_SECS",
                        value,
                        reason: e.to_string(),
                    });
                }
            },
            None => DEFAULT_BACKEND_TIMEOUT_SECS,
        };

        let path_prefix = get("PATH_PREFIX").unwrap_or_else(|| "/".to_string());
        if let Some(ch) = path_prefix.chars().find(|c| matches!(c, '*' | ':')) {
            return Err(ConfigError::Invalid {
                var: "PATH_PREFIX",
                value: path_prefix,
                reason: format!("route parameters are not allowed (found {ch:?})"),
            });
        }

        Ok(Self {
            region: require("AWS_REGION")?,
            table: require("TODO_TABLE")?,
            redis_url: get("REDIS_URL").unwrap_or_else(|| DEFAULT_REDIS_URL.to_string()),
            model_id: get("AWS_BEDROCK_MODEL_NAME")
                .unwrap_or_else(|| todo_gen_bedrock::DEFAULT_MODEL_ID.to_string()),
            bedrock_api_key: get("AWS_BEARER_TOKEN_BEDROCK"),
            bedrock_endpoint: get("BEDROCK_ENDPOINT"),
            motd: get("MOTD"),
            path_prefix,
            bind_addr,
            backend_timeout: Duration::from_secs(backend_timeout_secs),
        })
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("region", &self.region)
            .field("table", &self.table)
            .field("redis_url", &self.redis_url)
            .field("model_id", &self.model_id)
            .field(
                "bedrock_api_key",
                &self.bedrock_api_key.as_ref().map(|_| "<redacted>"),
            )
            .field("bedrock_endpoint", &self.bedrock_endpoint)
            .field("motd", &self.motd)
            .field("path_prefix", &self.path_prefix)
            .field("bind_addr", &self.bind_addr)
            .field("backend_timeout", &self.backend_timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)] // Test code

    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        Config::from_lookup(|var| vars.get(var).cloned())
    }

    const REQUIRED: [(&str, &str); 2] = [("AWS_REGION", "us-east-1"), ("TODO_TABLE", "todos")];

    #[test]
    fn test_defaults() {
        let config = load(&REQUIRED).unwrap();

        assert_eq!(config.redis_url, DEFAULT_REDIS_URL);
        assert_eq!(config.model_id, "amazon.titan-text-lite-v1");
        assert_eq!(config.bind_addr.to_string(), DEFAULT_BIND_ADDR);
        assert_eq!(config.backend_timeout, Duration::from_secs(10));
        assert_eq!(config.path_prefix, "/");
        assert_eq!(config.motd, None);
        assert_eq!(config.bedrock_api_key, None);
    }

    #[test]
    fn test_required_variables() {
        assert_eq!(
            load(&[("TODO_TABLE", "todos")]).unwrap_err(),
            ConfigError::Missing("AWS_REGION")
        );
        assert_eq!(
            load(&[("AWS_REGION", "us-east-1"), ("TODO_TABLE", "")]).unwrap_err(),
            ConfigError::Missing("TODO_TABLE")
        );
    }

    #[test]
    fn test_empty_optional_values_are_unset() {
        let mut vars = REQUIRED.to_vec();
        vars.extend([("MOTD", ""), ("AWS_BEDROCK_MODEL_NAME", "")]);

        let config = load(&vars).unwrap();

        assert_eq!(config.motd, None);
        assert_eq!(config.model_id, "amazon.titan-text-lite-v1");
    }

    #[test]
    fn test_overrides() {
        let mut vars = REQUIRED.to_vec();
        vars.extend([
            ("MOTD", "Hello"),
            ("AWS_BEDROCK_MODEL_NAME", "amazon.titan-text-express-v1"),
            ("BIND_ADDR", "127.0.0.1:3000"),
            ("BACKEND_TIMEOUT_SECS", "3"),
            ("PATH_PREFIX", "/test/"),
        ]);

        let config = load(&vars).unwrap();

        assert_eq!(config.motd.as_deref(), Some("Hello"));
        assert_eq!(config.model_id, "amazon.titan-text-express-v1");
        assert_eq!(config.bind_addr.port(), 3000);
        assert_eq!(config.backend_timeout, Duration::from_secs(3));
        assert_eq!(config.path_prefix, "/test/");
    }

    #[test]
    fn test_bad_numbers_are_errors() {
        let mut vars = REQUIRED.to_vec();
        vars.push(("BACKEND_TIMEOUT_SECS", "soon"));
        assert!(matches!(
            load(&vars).unwrap_err(),
            ConfigError::Invalid {
                var: "BACKEND_TIMEOUT_SECS",
                ..
            }
        ));

        let mut vars = REQUIRED.to_vec();
        vars.push(("BACKEND_TIMEOUT_SECS", "0"));
        assert!(load(&vars).is_err());

        let mut vars = REQUIRED.to_vec();
        vars.push(("BIND_ADDR", ":8080"));
        assert!(matches!(
            load(&vars).unwrap_err(),
            ConfigError::Invalid {
                var: "BIND_ADDR",
                ..
            }
        ));
    }

    #[test]
    fn test_prefix_with_route_parameters_is_rejected() {
        for prefix in ["/*x/", "/:id/", "/todos/*"] {
            let mut vars = REQUIRED.to_vec();
            vars.push(("PATH_PREFIX", prefix));
            assert!(
                matches!(
                    load(&vars).unwrap_err(),
                    ConfigError::Invalid {
                        var: "PATH_PREFIX",
                        ..
                    }
                ),
                "accepted {prefix}"
            );
        }
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let mut vars = REQUIRED.to_vec();
        vars.push(("AWS_BEARER_TOKEN_BEDROCK", "secret-key"));

        let debug = format!("{:?}", load(&vars).unwrap());

        assert!(!debug.contains("secret-key"));
    }
}
