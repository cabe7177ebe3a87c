//! Route handlers, one module per view

pub mod auth;
pub mod dashboard;
pub mod health;
pub mod nav;
pub mod reports;
pub mod settings;
pub mod upload;

use axum::{
    http::{header, HeaderValue},
    response::{IntoResponse, Redirect, Response},
};
use finsec_domain::{Session, Table};
use tokio::sync::MutexGuard;

use crate::{error::DashboardResult, sessions::SessionHandle};

/// Lock the request's session for a state change.
///
/// The login gate releases the lock before the handler runs, so a logout can
/// land in between; a signed-out session gets a redirect instead of the guard.
pub(crate) async fn lock_signed_in(
    handle: &SessionHandle,
) -> Result<MutexGuard<'_, Session>, Response> {
    let session = handle.session.lock().await;
    if !session.is_authenticated() {
        tracing::debug!(session = %handle.id, "session signed out before handler ran");
        return Err(Redirect::to("/login").into_response());
    }
    Ok(session)
}

/// CSV download of `table` as `filename`
pub(crate) fn csv_download(table: &Table, filename: &'static str) -> DashboardResult<Response> {
    let body = table.to_csv_string()?;
    let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{filename}\""))
        .unwrap_or_else(|_| HeaderValue::from_static("attachment"));
    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("text/csv")),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}
