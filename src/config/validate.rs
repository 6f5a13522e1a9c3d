use std::net::SocketAddr;

use thiserror::Error;

use super::schema::Config;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
    #[error("invalid config: {0}")]
    Validation(String),
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.alert_topic.trim().is_empty() {
            return Err(ConfigError::Validation(
                "alert_topic must not be empty".to_string(),
            ));
        }
        if self.listen_addr.parse::<SocketAddr>().is_err() {
            return Err(ConfigError::Validation(
                "listen_addr must be a valid socket address".to_string(),
            ));
        }
        if self.metric_types.is_empty() {
            return Err(ConfigError::Validation(
                "metric_types must not be empty".to_string(),
            ));
        }
        if self.metric_types.iter().any(|tag| tag.trim().is_empty()) {
            return Err(ConfigError::Validation(
                "metric_types entries must not be empty".to_string(),
            ));
        }
        if !self.simulation.enabled && self.monitoring.base_url.trim().is_empty() {
            return Err(ConfigError::Validation(
                "monitoring.base_url must not be empty when simulation is disabled".to_string(),
            ));
        }
        if self.monitoring.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "monitoring.timeout_secs must be greater than 0".to_string(),
            ));
        }
        if !(1..=100).contains(&self.monitoring.page_size) {
            return Err(ConfigError::Validation(
                "monitoring.page_size must be between 1 and 100".to_string(),
            ));
        }
        if self.retry.max_attempts == 0 {
            return Err(ConfigError::Validation(
                "retry.max_attempts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
