use serde::Deserialize;

use super::defaults::*;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Alert-target identifier stamped on every created alarm.
    pub alert_topic: String,
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
    /// Metric types swapped per deployment, in this order.
    #[serde(default = "default_metric_types")]
    pub metric_types: Vec<String>,
    #[serde(default)]
    pub monitoring: Monitoring,
    #[serde(default)]
    pub retry: Retry,
    #[serde(default)]
    pub simulation: Simulation,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Monitoring {
    #[serde(default)]
    pub base_url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_monitoring_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_monitoring_page_size")]
    pub page_size: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Retry {
    #[serde(default = "default_retry_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_retry_base_delay_ms")]
    pub base_delay_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Simulation {
    #[serde(default)]
    pub enabled: bool,
}
