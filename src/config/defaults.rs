use super::schema::{Monitoring, Retry, Simulation};

pub(super) fn default_listen_addr() -> String {
    "0.0.0.0:8080".to_string()
}

pub(super) fn default_metric_types() -> Vec<String> {
    vec![
        "CPU".to_string(),
        "StatusCheck".to_string(),
        "Memory".to_string(),
    ]
}

pub(super) fn default_monitoring_timeout_secs() -> u64 {
    30
}

pub(super) fn default_monitoring_page_size() -> u32 {
    100
}

pub(super) fn default_retry_max_attempts() -> u32 {
    3
}

pub(super) fn default_retry_base_delay_ms() -> u64 {
    200
}

impl Default for Monitoring {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_key: String::new(),
            timeout_secs: default_monitoring_timeout_secs(),
            page_size: default_monitoring_page_size(),
        }
    }
}

impl Default for Retry {
    fn default() -> Self {
        Self {
            max_attempts: default_retry_max_attempts(),
            base_delay_ms: default_retry_base_delay_ms(),
        }
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self { enabled: false }
    }
}
