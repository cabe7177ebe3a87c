//! HTTP collaborators of the FinSec dashboard
//!
//! - **Detection client**: one POST per row to the fraud-detection API,
//!   returning a typed [`DetectionOutcome`] instead of swallowing failures
//! - **Alert notifier**: posts an analysis summary to a user-supplied webhook
//! - **Testing support**: both sit behind traits and are exercised with wiremock

pub mod client;
pub mod config;
pub mod error;
pub mod notifier;

pub use client::{DetectionClient, DetectionOutcome, HttpDetectionClient, TransportErrorKind};
pub use config::DetectionConfig;
pub use error::{HttpError, Result};
pub use notifier::{AlertNotifier, AnalysisAlert, WebhookNotifier};

/// Re-export commonly used types
pub use reqwest::StatusCode;
