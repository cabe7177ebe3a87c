//! Application settings

use axum::{
    response::{Html, IntoResponse, Response},
    Extension, Form,
};
use finsec_domain::{ScoringSettings, Sensitivity, View};
use serde::Deserialize;
use url::Url;

use crate::{
    handlers::lock_signed_in,
    sessions::SessionHandle,
    views::{
        pages::{nav, settings_page},
        Flash,
    },
};

/// Submitted settings form
#[derive(Debug, Deserialize)]
pub struct SettingsForm {
    /// Blank clears the webhook
    #[serde(default)]
    pub webhook_url: String,
    /// `Low`, `Medium` or `High`
    #[serde(default)]
    pub sensitivity: Sensitivity,
    /// Checkbox; absent when unchecked
    pub email_alerts: Option<String>,
}

/// Show the current settings
pub async fn settings_form(Extension(handle): Extension<SessionHandle>) -> Html<String> {
    let session = handle.session.lock().await;
    Html(settings_page(
        nav(View::Settings, session.role()),
        session.settings(),
        &[],
    ))
}

/// Validate and store new settings for this session
pub async fn save_settings(
    Extension(handle): Extension<SessionHandle>,
    Form(form): Form<SettingsForm>,
) -> Response {
    let mut session = match lock_signed_in(&handle).await {
        Ok(session) => session,
        Err(redirect) => return redirect,
    };
    let nav = nav(View::Settings, session.role());

    let webhook_url = match parse_webhook(&form.webhook_url) {
        Ok(url) => url,
        Err(reason) => {
            return Html(settings_page(nav, session.settings(), &[Flash::Error(reason)]))
                .into_response();
        }
    };

    session.update_settings(ScoringSettings {
        sensitivity: form.sensitivity,
        webhook_url,
        email_alerts: form.email_alerts.is_some(),
    });
    tracing::debug!(sensitivity = form.sensitivity.label(), "settings updated");

    Html(settings_page(
        nav,
        session.settings(),
        &[Flash::Success("Settings saved.".to_string())],
    ))
    .into_response()
}

fn parse_webhook(raw: &str) -> Result<Option<String>, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    match Url::parse(raw) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(Some(url.to_string())),
        Ok(url) => Err(format!("Webhook URL must use http or https, not {}.", url.scheme())),
        Err(err) => Err(format!("Invalid webhook URL: {err}.")),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::{header, StatusCode};
    use finsec_domain::{Session, SessionId};
    use tokio::sync::Mutex;

    use super::*;

    #[tokio::test]
    async fn test_signed_out_session_keeps_default_settings() {
        let handle = SessionHandle {
            id: SessionId::new(),
            session: Arc::new(Mutex::new(Session::new())),
        };
        let form = SettingsForm {
            webhook_url: "https://hooks.example.com/finsec".into(),
            sensitivity: Sensitivity::High,
            email_alerts: Some("on".into()),
        };

        let response = save_settings(Extension(handle.clone()), Form(form)).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/login");
        assert_eq!(handle.session.lock().await.settings(), &ScoringSettings::default());
    }

    #[test]
    fn test_blank_webhook_clears() {
        assert_eq!(parse_webhook("   "), Ok(None));
    }

    #[test]
    fn test_http_webhook_accepted() {
        assert_eq!(
            parse_webhook("https://hooks.example.com/finsec"),
            Ok(Some("https://hooks.example.com/finsec".to_string()))
        );
    }

    #[test]
    fn test_non_http_webhook_rejected() {
        let err = parse_webhook("ftp://hooks.example.com").unwrap_err();
        assert!(err.contains("http or https"));
        assert!(parse_webhook("not a url").is_err());
    }
}
