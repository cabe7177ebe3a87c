//! Analysis alert delivery

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::{
    config::default_user_agent,
    error::{HttpError, Result},
};

/// Summary posted to the alert webhook after an analysis flags rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisAlert {
    /// Email recorded at login, if any
    pub recipient: Option<String>,
    pub total_rows: usize,
    pub flagged_rows: usize,
    /// "remote" or "local"
    pub scoring: String,
    pub analyzed_at: DateTime<Utc>,
}

/// Mockable alert sink
#[async_trait]
pub trait AlertNotifier: Send + Sync {
    /// Deliver one alert to `webhook`
    async fn notify(&self, webhook: &str, alert: &AnalysisAlert) -> Result<()>;
}

/// Posts alerts as JSON to a webhook URL
pub struct WebhookNotifier {
    inner: reqwest::Client,
}

impl WebhookNotifier {
    pub fn new(timeout: Duration) -> Result<Self> {
        let inner = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(default_user_agent())
            .build()
            .map_err(|e| HttpError::BuildError(e.to_string()))?;
        Ok(Self { inner })
    }
}

#[async_trait]
impl AlertNotifier for WebhookNotifier {
    async fn notify(&self, webhook: &str, alert: &AnalysisAlert) -> Result<()> {
        let url = webhook
            .parse::<Url>()
            .map_err(|e| HttpError::InvalidUrl(e.to_string()))?;
        debug!("HTTP POST: {}", url);

        let response = self.inner.post(url).json(alert).send().await?;
        if !response.status().is_success() {
            return Err(HttpError::HttpStatus {
                status: response.status(),
                message: response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string()),
            });
        }
        Ok(())
    }
}
