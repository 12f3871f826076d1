use std::time::Duration;

use awc::Client;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DashboardConfig {
    pub api_url: String,
    pub timeout: Duration,
}

impl DashboardConfig {
    pub fn new(api_url: impl Into<String>, timeout: Duration) -> DashboardConfig {
        DashboardConfig {
            api_url: api_url.into(),
            timeout,
        }
    }

    /// The dashboard routes all hang off `/api/dashboard`.
    pub fn api_base(&self) -> String {
        format!("{}/api/dashboard", self.api_url.trim().trim_end_matches('/'))
    }

    pub fn http_client(&self) -> Client {
        Client::builder().timeout(self.timeout).finish()
    }
}

impl Default for DashboardConfig {
    fn default() -> DashboardConfig {
        DashboardConfig::new(DEFAULT_API_URL, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }
}
