//! Dashboard overview

use axum::{extract::State, response::Html, Extension};
use finsec_domain::{scoring::is_suspicious, View};

use crate::{
    sessions::SessionHandle,
    state::AppState,
    views::pages::{dashboard_page, nav, DashboardMetrics},
};

/// Metrics for the latest analysis of this session
pub async fn dashboard(
    State(state): State<AppState>,
    Extension(handle): Extension<SessionHandle>,
) -> Html<String> {
    let session = handle.session.lock().await;
    let (transactions, threats) = session
        .last_result()
        .map(|result| {
            let threats = result.rows().iter().filter(|row| is_suspicious(row)).count();
            (result.len(), threats)
        })
        .unwrap_or((0, 0));

    let metrics = DashboardMetrics {
        transactions,
        threats,
        api_configured: state.remote_available(),
    };
    Html(dashboard_page(nav(View::Dashboard, session.role()), metrics))
}
