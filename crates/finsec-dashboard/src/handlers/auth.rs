//! Login gate and logout handlers

use axum::{
    extract::State,
    http::header,
    response::{Html, IntoResponse, Redirect, Response},
    Extension, Form,
};
use finsec_domain::{DomainError, LoginForm};

use crate::{
    sessions::{expired_session_cookie, SessionHandle},
    state::AppState,
    views::{pages::login_page, Flash},
};

/// Show the login form, or skip it for sessions already signed in
pub async fn login_form(Extension(handle): Extension<SessionHandle>) -> Response {
    if handle.session.lock().await.is_authenticated() {
        return Redirect::to("/dashboard").into_response();
    }
    Html(login_page(&[])).into_response()
}

/// Submit credentials
///
/// Any non-empty username/password pair is accepted.
pub async fn login(
    Extension(handle): Extension<SessionHandle>,
    Form(form): Form<LoginForm>,
) -> Response {
    let mut session = handle.session.lock().await;
    match session.login(form) {
        Ok(()) => Redirect::to("/dashboard").into_response(),
        Err(DomainError::ValidationError { reason, .. }) => {
            Html(login_page(&[Flash::Error(reason)])).into_response()
        }
        Err(other) => Html(login_page(&[Flash::Error(other.to_string())])).into_response(),
    }
}

/// Reset the session and return to the login gate
pub async fn logout(
    State(state): State<AppState>,
    Extension(handle): Extension<SessionHandle>,
) -> Response {
    handle.session.lock().await.logout();
    state.sessions.remove(&handle.id);
    tracing::info!(session = %handle.id, "session logged out");

    (
        [(header::SET_COOKIE, expired_session_cookie())],
        Redirect::to("/login"),
    )
        .into_response()
}
