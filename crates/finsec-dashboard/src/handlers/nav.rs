//! Sidebar selection

use axum::{extract::Query, response::Redirect};
use serde::Deserialize;

use crate::error::DashboardResult;

/// Query carrying the selected sidebar label
#[derive(Debug, Deserialize)]
pub struct NavQuery {
    /// Label such as "Reports"
    pub view: String,
}

/// Route a sidebar label to its view
pub async fn navigate(Query(query): Query<NavQuery>) -> DashboardResult<Redirect> {
    let view = query.view.parse::<finsec_domain::View>()?;
    Ok(Redirect::to(view.path()))
}
