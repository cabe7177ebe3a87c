//! Upload & Analyze flow

use axum::{
    body::Bytes,
    extract::{multipart::MultipartError, Multipart, State},
    response::{Html, IntoResponse, Response},
    Extension, Form,
};
use chrono::Utc;
use finsec_domain::{Session, Table, View};
use finsec_http::AnalysisAlert;
use serde::Deserialize;

use crate::{
    analysis::{analyze as run_analysis, AnalysisSummary, Scorer},
    error::{DashboardError, DashboardResult},
    handlers::{csv_download, lock_signed_in},
    sessions::SessionHandle,
    state::AppState,
    views::{
        pages::{nav, upload_page, UploadView},
        Flash,
    },
};

/// Analyze form; the checkbox is absent when unchecked
#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeForm {
    /// Present when "Use FinSec API" is ticked
    pub use_api: Option<String>,
}

/// Show the upload form and the current preview, if any
pub async fn upload_form(
    State(state): State<AppState>,
    Extension(handle): Extension<SessionHandle>,
) -> Html<String> {
    let session = handle.session.lock().await;
    render(&state, &session, None, Vec::new())
}

/// Decode an uploaded CSV file and keep it for analysis
pub async fn upload(
    State(state): State<AppState>,
    Extension(handle): Extension<SessionHandle>,
    mut multipart: Multipart,
) -> Response {
    let upload = read_file_field(&mut multipart).await;
    let mut session = match lock_signed_in(&handle).await {
        Ok(session) => session,
        Err(redirect) => return redirect,
    };

    let flash = match upload {
        Ok(Some(bytes)) => match Table::from_csv_bytes(&bytes) {
            Ok(table) => {
                tracing::info!(rows = table.len(), columns = table.columns().len(), "upload decoded");
                let message = format!("Loaded {} rows.", table.len());
                session.store_upload(table);
                Flash::Success(message)
            }
            Err(err) => Flash::Error(err.to_string()),
        },
        Ok(None) => Flash::Error("Choose a CSV file to upload.".to_string()),
        Err(err) => Flash::Error(format!("Upload failed: {}", err.body_text())),
    };

    render(&state, &session, None, vec![flash]).into_response()
}

/// Score every row of the uploaded table and replace the stored result
pub async fn analyze(
    State(state): State<AppState>,
    Extension(handle): Extension<SessionHandle>,
    Form(form): Form<AnalyzeForm>,
) -> Response {
    let mut session = match lock_signed_in(&handle).await {
        Ok(session) => session,
        Err(redirect) => return redirect,
    };

    let Some(upload) = session.upload().cloned() else {
        let flash = Flash::Info("Upload a CSV file before analyzing.".to_string());
        return render(&state, &session, None, vec![flash]).into_response();
    };

    // Chosen once per batch, never per row
    let scorer = if form.use_api.is_some() {
        match state.detector.as_deref() {
            Some(client) => Scorer::Remote(client),
            None => {
                let flash = Flash::Error("Remote detection is not configured.".to_string());
                return render(&state, &session, None, vec![flash]).into_response();
            }
        }
    } else {
        Scorer::Local {
            threshold: session.settings().sensitivity.threshold(),
        }
    };
    let scoring = scorer.name();

    let report = run_analysis(&upload, scorer).await;
    session.record_result(report.result);
    send_alert(&state, &session, &report.summary, scoring).await;

    let flash = Flash::Success(format!(
        "Analyzed {} rows: {} suspicious, {} API errors, {} failed.",
        report.summary.total, report.summary.suspicious, report.summary.api_errors, report.summary.failed
    ));
    let result = session.last_result();
    render(&state, &session, result, vec![flash]).into_response()
}

/// Download the latest result as `results.csv`
pub async fn download_results(Extension(handle): Extension<SessionHandle>) -> DashboardResult<Response> {
    let session = handle.session.lock().await;
    let result = session
        .last_result()
        .ok_or_else(|| DashboardError::NotFound("No results available yet.".to_string()))?;
    csv_download(result, "results.csv")
}

async fn read_file_field(multipart: &mut Multipart) -> Result<Option<Bytes>, MultipartError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }
        let unnamed = field.file_name().map_or(true, str::is_empty);
        let bytes = field.bytes().await?;
        // Browsers submit an empty, unnamed part when no file was chosen
        if unnamed && bytes.is_empty() {
            return Ok(None);
        }
        return Ok(Some(bytes));
    }
    Ok(None)
}

async fn send_alert(state: &AppState, session: &Session, summary: &AnalysisSummary, scoring: &str) {
    let Some(webhook) = session.settings().alert_webhook() else {
        return;
    };
    if summary.suspicious == 0 {
        return;
    }

    let alert = AnalysisAlert {
        recipient: Some(session.email().to_string()).filter(|email| !email.is_empty()),
        total_rows: summary.total,
        flagged_rows: summary.suspicious,
        scoring: scoring.to_string(),
        analyzed_at: session.last_analyzed_at().unwrap_or_else(Utc::now),
    };
    match state.notifier.notify(webhook, &alert).await {
        Ok(()) => tracing::info!(flagged = alert.flagged_rows, "analysis alert delivered"),
        Err(err) => tracing::warn!("analysis alert not delivered: {}", err),
    }
}

fn render(
    state: &AppState,
    session: &Session,
    result: Option<&Table>,
    flashes: Vec<Flash>,
) -> Html<String> {
    let view = UploadView {
        upload: session.upload().map(|table| (table, state.config.preview_rows)),
        result,
        remote_available: state.remote_available(),
        flashes,
    };
    Html(upload_page(nav(View::Upload, session.role()), view))
}
