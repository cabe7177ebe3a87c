#![warn(missing_docs)]

//! FinSec dashboard server
//!
//! Serves the login gate, the five sidebar views, the upload/analyze flow and
//! CSV downloads. Every interaction is one request against the caller's
//! session; nothing runs in the background.

pub mod analysis;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod sessions;
pub mod state;
pub mod views;

pub use server::DashboardServer;
pub use state::AppState;
