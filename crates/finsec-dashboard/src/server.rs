//! Dashboard server

use std::net::SocketAddr;

use axum::Router;
use finsec_config::{ConfigError, DashboardConfig};
use tokio::net::TcpListener;

use crate::{
    error::{DashboardError, DashboardResult},
    routes::build_router,
    state::AppState,
};

/// HTTP server hosting the dashboard
pub struct DashboardServer {
    state: AppState,
    bind_addr: SocketAddr,
}

impl DashboardServer {
    /// Build the server and its HTTP collaborators from configuration
    pub fn new(config: DashboardConfig) -> DashboardResult<Self> {
        let bind_addr = config.bind_addr.parse::<SocketAddr>().map_err(|e| {
            ConfigError::Validation(format!("invalid bind address {}: {}", config.bind_addr, e))
        })?;
        let state = AppState::from_config(config)?;
        Ok(Self::with_state(state, bind_addr))
    }

    /// Serve an already assembled state
    pub fn with_state(state: AppState, bind_addr: SocketAddr) -> Self {
        Self { state, bind_addr }
    }

    /// Address the server will listen on
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    /// Router for this server's state
    pub fn router(&self) -> Router {
        build_router(self.state.clone())
    }

    /// Listen and serve until the process is stopped
    pub async fn start(self) -> DashboardResult<()> {
        let listener = TcpListener::bind(self.bind_addr)
            .await
            .map_err(|e| DashboardError::Internal(format!("failed to bind {}: {}", self.bind_addr, e)))?;
        tracing::info!("FinSec dashboard listening on http://{}", self.bind_addr);

        axum::serve(listener, self.router())
            .await
            .map_err(|e| DashboardError::Internal(format!("server error: {}", e)))
    }
}
