// This file is part of the product EVE Routes.
// SPDX-FileCopyrightText: 2026 EVE Routes contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::pathfinder::DEFAULT_MAX_ROUTES;

#[derive(Debug)]
pub enum ConfigError {
    LoadError(String),
    ValidationError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::LoadError(msg) => write!(f, "Configuration load error: {}", msg),
            ConfigError::ValidationError(msg) => {
                write!(f, "Configuration validation error: {}", msg)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    pub app: AppConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    #[serde(default)]
    pub routes: RoutesConfig,
    #[serde(default)]
    pub client: ClientConfig,
}

#[derive(Debug, Clone)]
pub struct ValidatedConfig {
    pub app: AppConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub log_level: LevelFilter,
    pub routes: RoutesConfig,
    pub client: ClientConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default = "default_workers")]
    pub workers: usize,
}

fn default_workers() -> usize {
    4
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RoutesConfig {
    #[serde(default = "default_base_path")]
    pub base_path: String,
    #[serde(default = "default_system_data_file")]
    pub system_data_file: String,
    #[serde(default = "default_max_routes")]
    pub max_routes: usize,
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            base_path: default_base_path(),
            system_data_file: default_system_data_file(),
            max_routes: default_max_routes(),
        }
    }
}

fn default_base_path() -> String {
    "/eve-routes".to_string()
}

fn default_system_data_file() -> String {
    "systems.yaml".to_string()
}

fn default_max_routes() -> usize {
    DEFAULT_MAX_ROUTES
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ClientConfig {
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

fn default_timeout_seconds() -> u64 {
    10
}

pub fn parse_log_level(level: &str) -> Option<LevelFilter> {
    match level.trim().to_lowercase().as_str() {
        "trace" => Some(LevelFilter::Trace),
        "debug" => Some(LevelFilter::Debug),
        "info" => Some(LevelFilter::Info),
        "warn" => Some(LevelFilter::Warn),
        "error" => Some(LevelFilter::Error),
        "off" => Some(LevelFilter::Off),
        _ => None,
    }
}

impl Config {
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let config_path = root.join("config.yaml");
        let config_content = fs::read_to_string(&config_path).map_err(|e| {
            ConfigError::LoadError(format!(
                "Failed to read config file '{}': {}",
                config_path.display(),
                e
            ))
        })?;
        Self::from_yaml(&config_content).map_err(|e| match e {
            ConfigError::LoadError(msg) => ConfigError::LoadError(format!(
                "Failed to parse config file '{}': {}",
                config_path.display(),
                msg
            )),
            other => other,
        })
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content).map_err(|e| ConfigError::LoadError(e.to_string()))
    }

    /// Loads and validates configuration at startup. If validation fails, the
    /// application should not start.
    pub fn load_and_validate(root: &Path) -> Result<ValidatedConfig, ConfigError> {
        Self::load(root)?.validate()
    }

    pub fn validate(self) -> Result<ValidatedConfig, ConfigError> {
        Self::validate_server(&self.server)?;
        let log_level = Self::validate_logging(&self.logging)?;
        Self::validate_routes(&self.routes)?;

        if self.client.timeout_seconds == 0 {
            return Err(ConfigError::ValidationError(
                "client.timeout_seconds must be at least 1".to_string(),
            ));
        }

        Ok(ValidatedConfig {
            app: self.app,
            server: self.server,
            logging: self.logging,
            log_level,
            routes: self.routes,
            client: self.client,
        })
    }

    fn validate_server(server: &ServerConfig) -> Result<(), ConfigError> {
        if server.host.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "server.host cannot be empty".to_string(),
            ));
        }
        if server.port == 0 {
            return Err(ConfigError::ValidationError(
                "server.port must be greater than 0".to_string(),
            ));
        }
        if server.workers == 0 {
            return Err(ConfigError::ValidationError(
                "server.workers must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    fn validate_logging(logging: &LoggingConfig) -> Result<LevelFilter, ConfigError> {
        parse_log_level(&logging.level).ok_or_else(|| {
            ConfigError::ValidationError(format!(
                "logging.level must be one of trace, debug, info, warn, error, off; got: {}",
                logging.level
            ))
        })
    }

    fn validate_routes(routes: &RoutesConfig) -> Result<(), ConfigError> {
        let base_path = &routes.base_path;
        if !base_path.starts_with('/') {
            return Err(ConfigError::ValidationError(format!(
                "routes.base_path must start with '/', got: {}",
                base_path
            )));
        }
        if base_path.len() > 1 && base_path.ends_with('/') {
            return Err(ConfigError::ValidationError(format!(
                "routes.base_path must not end with '/', got: {}",
                base_path
            )));
        }
        if routes.system_data_file.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "routes.system_data_file cannot be empty".to_string(),
            ));
        }
        if routes.max_routes == 0 {
            return Err(ConfigError::ValidationError(
                "routes.max_routes must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl ValidatedConfig {
    /// Prefix used for the page and API routes; empty when mounted at the root.
    pub fn route_prefix(&self) -> &str {
        if self.routes.base_path == "/" {
            ""
        } else {
            &self.routes.base_path
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::test_fixtures::{SAMPLE_CONFIG_YAML, TestFixtureRoot};
    use std::fs;

    fn sample_config() -> Config {
        Config::from_yaml(SAMPLE_CONFIG_YAML).expect("sample config")
    }

    #[test]
    fn sample_config_validates_with_defaults() {
        let config = sample_config().validate().expect("valid");
        assert_eq!(config.routes.base_path, "/eve-routes");
        assert_eq!(config.routes.max_routes, DEFAULT_MAX_ROUTES);
        assert_eq!(config.client.timeout_seconds, 10);
        assert_eq!(config.log_level, LevelFilter::Info);
        assert_eq!(config.route_prefix(), "/eve-routes");
    }

    #[test]
    fn root_base_path_has_empty_prefix() {
        let mut config = sample_config();
        config.routes.base_path = "/".to_string();
        let config = config.validate().expect("valid");
        assert_eq!(config.route_prefix(), "");
    }

    #[test]
    fn rejects_unknown_log_level() {
        let mut config = sample_config();
        config.logging.level = "chatty".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn rejects_base_path_without_leading_slash() {
        let mut config = sample_config();
        config.routes.base_path = "eve-routes".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_base_path_with_trailing_slash() {
        let mut config = sample_config();
        config.routes.base_path = "/eve-routes/".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_zero_port_and_workers() {
        let mut config = sample_config();
        config.server.port = 0;
        assert!(config.validate().is_err());

        let mut config = sample_config();
        config.server.workers = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_zero_max_routes() {
        let mut config = sample_config();
        config.routes.max_routes = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_reports_missing_file() {
        let fixture = TestFixtureRoot::new_unique("config-missing").expect("fixture");
        match Config::load(fixture.path()) {
            Err(ConfigError::LoadError(msg)) => assert!(msg.contains("config.yaml")),
            other => panic!("expected load error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn load_and_validate_reads_config_yaml() {
        let fixture = TestFixtureRoot::new_unique("config-load").expect("fixture");
        fs::write(fixture.path().join("config.yaml"), SAMPLE_CONFIG_YAML).expect("write");
        let config = Config::load_and_validate(fixture.path()).expect("config");
        assert_eq!(config.app.name, "EVE Routes");
    }
}
