//! Core configuration types

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Dashboard configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DashboardConfig {
    /// Address the HTTP server listens on
    pub bind_addr: String,
    /// Fraud-detection endpoint (`FINSEC_API_URL`)
    pub api_url: Option<String>,
    /// Bearer token for the endpoint (`FINSEC_API_KEY`)
    pub api_key: Option<String>,
    /// Per-row detection timeout in seconds
    pub timeout_secs: u64,
    /// Alert webhook timeout in seconds
    pub webhook_timeout_secs: u64,
    /// Rows shown in the upload preview
    pub preview_rows: usize,
    /// Largest accepted upload body
    pub max_upload_bytes: usize,
    /// Seconds a signed-in session may sit unused before it is dropped
    pub session_idle_secs: u64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8501".to_string(),
            api_url: None,
            api_key: None,
            timeout_secs: 10,
            webhook_timeout_secs: 5,
            preview_rows: 5,
            max_upload_bytes: 10 * 1024 * 1024,
            session_idle_secs: 30 * 60,
        }
    }
}

/// Endpoint and token for remote detection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoteEndpoint<'a> {
    pub url: &'a str,
    pub api_key: &'a str,
}

impl DashboardConfig {
    /// Remote detection target, when both URL and key are configured
    pub fn remote_endpoint(&self) -> Option<RemoteEndpoint<'_>> {
        match (self.api_url.as_deref(), self.api_key.as_deref()) {
            (Some(url), Some(api_key)) if !url.is_empty() && !api_key.is_empty() => {
                Some(RemoteEndpoint { url, api_key })
            }
            _ => None,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn webhook_timeout(&self) -> Duration {
        Duration::from_secs(self.webhook_timeout_secs)
    }

    pub fn session_idle(&self) -> Duration {
        Duration::from_secs(self.session_idle_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_have_no_remote_endpoint() {
        let config = DashboardConfig::default();
        assert_eq!(config.remote_endpoint(), None);
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert_eq!(config.preview_rows, 5);
        assert_eq!(config.session_idle(), Duration::from_secs(1800));
    }

    #[test]
    fn test_remote_endpoint_needs_url_and_key() {
        let mut config = DashboardConfig {
            api_url: Some("https://detect.example.com".into()),
            ..Default::default()
        };
        assert_eq!(config.remote_endpoint(), None);

        config.api_key = Some(String::new());
        assert_eq!(config.remote_endpoint(), None);

        config.api_key = Some("k".into());
        assert_eq!(
            config.remote_endpoint(),
            Some(RemoteEndpoint {
                url: "https://detect.example.com",
                api_key: "k"
            })
        );
    }
}
