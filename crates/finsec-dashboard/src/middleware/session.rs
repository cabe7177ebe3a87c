//! Session binding and the login gate

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
    Extension,
};

use crate::{
    sessions::{session_cookie, session_id_from_headers, SessionHandle},
    state::AppState,
};

/// Attach the caller's session to the request.
///
/// Requests without a live session get a detached one. It is stored, and
/// announced with a `Set-Cookie` header, only once it is signed in.
pub async fn session_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let cookie_id = session_id_from_headers(request.headers());
    let (id, session, stored) = state.sessions.resolve(cookie_id);

    request.extensions_mut().insert(SessionHandle {
        id,
        session: session.clone(),
    });
    let mut response = next.run(request).await;

    let authenticated = {
        let mut guard = session.lock().await;
        guard.touch();
        guard.is_authenticated()
    };
    if !stored && authenticated {
        state.sessions.insert(id, session);
        response
            .headers_mut()
            .append(header::SET_COOKIE, session_cookie(id));
    }
    response
}

/// Redirect unauthenticated sessions to the login page.
pub async fn require_auth(
    Extension(handle): Extension<SessionHandle>,
    request: Request,
    next: Next,
) -> Response {
    let authenticated = handle.session.lock().await.is_authenticated();
    if !authenticated {
        return Redirect::to("/login").into_response();
    }
    next.run(request).await
}
