//! Reports view

use axum::{
    response::{Html, Response},
    Extension,
};
use finsec_domain::View;

use crate::{
    error::{DashboardError, DashboardResult},
    handlers::csv_download,
    sessions::SessionHandle,
    views::pages::{nav, reports_page},
};

/// Latest result table, or a notice when nothing has been analyzed
pub async fn reports(Extension(handle): Extension<SessionHandle>) -> Html<String> {
    let session = handle.session.lock().await;
    Html(reports_page(nav(View::Reports, session.role()), session.last_result()))
}

/// Download the latest result as `full_report.csv`
pub async fn download_report(Extension(handle): Extension<SessionHandle>) -> DashboardResult<Response> {
    let session = handle.session.lock().await;
    match session.last_result() {
        Some(result) => csv_download(result, "full_report.csv"),
        None => Err(DashboardError::NotFound("No results available yet.".to_string())),
    }
}
