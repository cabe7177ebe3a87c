//! Application state for the dashboard server

use std::sync::Arc;
use std::time::Instant;

use finsec_config::DashboardConfig;
use finsec_http::{client::shared_client, AlertNotifier, DetectionClient, DetectionConfig, WebhookNotifier};

use crate::{error::DashboardResult, sessions::SessionStore};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Live browser sessions
    pub sessions: SessionStore,
    /// Remote detection client, absent when no endpoint is configured
    pub detector: Option<Arc<dyn DetectionClient>>,
    /// Alert webhook sink
    pub notifier: Arc<dyn AlertNotifier>,
    /// Loaded configuration
    pub config: Arc<DashboardConfig>,
    /// Server start time for uptime calculation
    pub start_time: Instant,
}

impl AppState {
    /// Assemble state from explicit collaborators
    pub fn new(
        config: DashboardConfig,
        detector: Option<Arc<dyn DetectionClient>>,
        notifier: Arc<dyn AlertNotifier>,
    ) -> Self {
        Self {
            sessions: SessionStore::new(config.session_idle()),
            detector,
            notifier,
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// Build the production HTTP collaborators from configuration
    pub fn from_config(config: DashboardConfig) -> DashboardResult<Self> {
        let detector = match config.remote_endpoint() {
            Some(endpoint) => {
                let detection = DetectionConfig::new(endpoint.url, endpoint.api_key)
                    .with_timeout(config.timeout());
                tracing::info!(endpoint = endpoint.url, "remote detection enabled");
                Some(shared_client(detection)?)
            }
            None => {
                tracing::info!("remote detection not configured; local scoring only");
                None
            }
        };
        let notifier: Arc<dyn AlertNotifier> =
            Arc::new(WebhookNotifier::new(config.webhook_timeout())?);

        Ok(Self::new(config, detector, notifier))
    }

    /// Whether the remote scoring path can be offered
    pub fn remote_available(&self) -> bool {
        self.detector.is_some()
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
