//! FinSec configuration
//!
//! Settings come from an optional TOML file overlaid by `FINSEC_*`
//! environment variables (`FINSEC_API_URL`, `FINSEC_API_KEY`, ...).
//! Nothing secret has a built-in default: without an endpoint and key the
//! remote detection path is simply unavailable.

pub mod error;
pub mod manager;
pub mod types;

pub use error::{ConfigError, Result};
pub use manager::ConfigManager;
pub use types::{DashboardConfig, RemoteEndpoint};
