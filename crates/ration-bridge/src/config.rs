use serde::{Deserialize, Serialize};

/// Global application configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Base URL of the remote data service, without a trailing slash.
    pub api_endpoint: String,
    /// Timeout applied to every data-service request, in seconds.
    pub request_timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_endpoint: "http://localhost:8000/api".to_string(),
            request_timeout_seconds: 30,
        }
    }
}
