// This file is part of the product Atelier.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

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
pub struct DatabaseConfig {
    #[serde(default = "default_database_file")]
    pub file: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            file: default_database_file(),
        }
    }
}

fn default_database_file() -> String {
    "profiles.db".to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_jwt_issuer")]
    pub issuer: String,
    #[serde(default = "default_jwt_audience")]
    pub audience: String,
    #[serde(default = "default_jwt_expiration_hours")]
    pub expiration_hours: u64,
}

fn default_jwt_issuer() -> String {
    "atelier".to_string()
}

fn default_jwt_audience() -> String {
    "atelier-users".to_string()
}

fn default_jwt_expiration_hours() -> u64 {
    12
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AuthConfig {
    pub jwt: JwtConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    pub app: AppConfig,
}

/// Configuration that passed startup validation. Handed out read-only to the
/// request path; nothing revalidates at request time.
#[derive(Debug, Clone)]
pub struct ValidatedConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub logging: LoggingConfig,
    pub app: AppConfig,
}

const MIN_JWT_SECRET_LENGTH: usize = 16;

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
        let config: Config = serde_yaml::from_str(&config_content).map_err(|e| {
            ConfigError::LoadError(format!(
                "Failed to parse config file '{}': {}",
                config_path.display(),
                e
            ))
        })?;
        Ok(config)
    }

    /// Loads and validates configuration at startup. If validation fails, the application should not start.
    pub fn load_and_validate(root: &Path) -> Result<ValidatedConfig, ConfigError> {
        let config = Self::load(root)?;
        config.validate()
    }

    pub fn validate(self) -> Result<ValidatedConfig, ConfigError> {
        validate_jwt(&self.auth.jwt)?;
        validate_logging(&self.logging)?;

        if self.server.workers < 1 {
            return Err(ConfigError::ValidationError(
                "server.workers must be at least 1".to_string(),
            ));
        }

        if self.database.file.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "database.file must not be empty".to_string(),
            ));
        }

        if self.app.name.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "app.name must not be empty".to_string(),
            ));
        }

        Ok(ValidatedConfig {
            server: self.server,
            database: self.database,
            auth: self.auth,
            logging: self.logging,
            app: self.app,
        })
    }
}

fn validate_jwt(jwt: &JwtConfig) -> Result<(), ConfigError> {
    if jwt.secret.len() < MIN_JWT_SECRET_LENGTH {
        return Err(ConfigError::ValidationError(format!(
            "JWT secret must be at least {} characters",
            MIN_JWT_SECRET_LENGTH
        )));
    }

    if jwt.expiration_hours < 1 {
        return Err(ConfigError::ValidationError(format!(
            "JWT expiration_hours must be at least 1, got: {}",
            jwt.expiration_hours
        )));
    }

    if jwt.issuer.trim().is_empty() || jwt.audience.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "JWT issuer and audience must not be empty".to_string(),
        ));
    }

    Ok(())
}

fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
    match logging.level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        other => Err(ConfigError::ValidationError(format!(
            "Unknown logging level '{}'; expected trace, debug, info, warn or error",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn parse_config(yaml: &str) -> Config {
        serde_yaml::from_str(yaml).expect("config should parse")
    }

    fn minimal_yaml(secret: &str) -> String {
        format!(
            "server:\n  host: \"127.0.0.1\"\n  port: 7080\n\nauth:\n  jwt:\n    secret: \"{}\"\n\napp:\n  name: \"Atelier\"\n  description: \"User profile API\"\n",
            secret
        )
    }

    #[test]
    fn minimal_config_validates_with_defaults() {
        let config = parse_config(&minimal_yaml("0123456789abcdef"));
        let validated = config.validate().expect("valid config");

        assert_eq!(validated.server.workers, 4);
        assert_eq!(validated.database.file, "profiles.db");
        assert_eq!(validated.auth.jwt.issuer, "atelier");
        assert_eq!(validated.auth.jwt.audience, "atelier-users");
        assert_eq!(validated.auth.jwt.expiration_hours, 12);
        assert_eq!(validated.logging.level, "info");
    }

    #[test]
    fn validate_rejects_short_jwt_secret() {
        let config = parse_config(&minimal_yaml("short"));
        let err = config.validate().expect_err("short secret must fail");
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn validate_rejects_zero_expiration() {
        let mut config = parse_config(&minimal_yaml("0123456789abcdef"));
        config.auth.jwt.expiration_hours = 0;
        let err = config.validate().expect_err("zero expiration must fail");
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn validate_rejects_unknown_logging_level() {
        let mut config = parse_config(&minimal_yaml("0123456789abcdef"));
        config.logging.level = "verbose".to_string();
        let err = config.validate().expect_err("unknown level must fail");
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn validate_rejects_zero_workers() {
        let mut config = parse_config(&minimal_yaml("0123456789abcdef"));
        config.server.workers = 0;
        let err = config.validate().expect_err("zero workers must fail");
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn load_and_validate_reads_config_yaml_from_root() {
        let temp = tempfile::tempdir().expect("tempdir");
        fs::write(
            temp.path().join("config.yaml"),
            minimal_yaml("0123456789abcdef"),
        )
        .expect("write config");

        let validated = Config::load_and_validate(temp.path()).expect("load config");
        assert_eq!(validated.server.host, "127.0.0.1");
        assert_eq!(validated.server.port, 7080);
        assert_eq!(validated.app.name, "Atelier");
    }

    #[test]
    fn load_reports_missing_config_file() {
        let temp = tempfile::tempdir().expect("tempdir");
        let err = Config::load(temp.path()).expect_err("missing file must fail");
        assert!(matches!(err, ConfigError::LoadError(_)));
    }
}
