//! One renderer per view

use finsec_domain::{Role, ScoringSettings, Sensitivity, Table, View};

use super::{
    layout::{escape_html, page, Flash, NavContext},
    table::{render_rows, render_table},
};

/// Login form
pub fn login_page(flashes: &[Flash]) -> String {
    let roles: String = Role::ALL
        .iter()
        .map(|role| format!(r#"<option value="{0}">{0}</option>"#, role.label()))
        .collect();

    let content = format!(
        r#"<form method="post" action="/login">
    <label>Username <input type="text" name="username"></label>
    <label>Password <input type="password" name="password"></label>
    <label>Role <select name="role">{roles}</select></label>
    <label>Email (for alerts) <input type="email" name="email"></label>
    <button type="submit">Login</button>
</form>"#
    );
    page("🔐 Login", None, flashes, &content)
}

/// Headline numbers on the Dashboard view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardMetrics {
    /// Rows in the latest result
    pub transactions: usize,
    /// Suspicious rows in the latest result
    pub threats: usize,
    /// Whether remote detection is configured
    pub api_configured: bool,
}

/// Dashboard overview
pub fn dashboard_page(nav: NavContext, metrics: DashboardMetrics) -> String {
    let api_status = if metrics.api_configured {
        "✅ Configured"
    } else {
        "⚪ Not configured"
    };
    let content = format!(
        r#"<div class="metrics">
    <div class="metric"><div class="muted">Transactions Analyzed</div><div class="value">{}</div></div>
    <div class="metric"><div class="muted">Threats Detected</div><div class="value">{}</div></div>
    <div class="metric"><div class="muted">API Status</div><div class="value">{}</div></div>
</div>"#,
        metrics.transactions, metrics.threats, api_status
    );
    page("📊 Overview", Some(nav), &[], &content)
}

/// What the Upload view currently shows
pub struct UploadView<'a> {
    /// Uploaded table and how many rows to preview
    pub upload: Option<(&'a Table, usize)>,
    /// Result of the analysis just run, if any
    pub result: Option<&'a Table>,
    /// Whether the remote toggle can be enabled
    pub remote_available: bool,
    /// Inline messages
    pub flashes: Vec<Flash>,
}

/// Upload and analyze
pub fn upload_page(nav: NavContext, view: UploadView<'_>) -> String {
    let mut content = String::from(
        r#"<form method="post" action="/upload" enctype="multipart/form-data">
    <label>Upload CSV <input type="file" name="file" accept=".csv,text/csv"></label>
    <button type="submit">Upload</button>
</form>"#,
    );

    if let Some((table, preview_rows)) = view.upload {
        content.push_str(&format!(
            r#"<h3>Preview</h3><p class="muted">{} rows loaded</p>"#,
            table.len()
        ));
        content.push_str(&render_rows(table, table.head(preview_rows)));
        content.push_str(&analyze_form(view.remote_available));
    }

    if let Some(result) = view.result {
        content.push_str("<h3>Results</h3>");
        content.push_str(&render_table(result));
        content.push_str(r#"<p><a href="/results.csv" download>📁 Download Results</a></p>"#);
    }

    page("📥 Upload Data for Analysis", Some(nav), &view.flashes, &content)
}

fn analyze_form(remote_available: bool) -> String {
    let toggle = if remote_available {
        r#"<input type="checkbox" name="use_api" checked>"#.to_string()
    } else {
        r#"<input type="checkbox" name="use_api" disabled> <span class="muted">(remote detection is not configured)</span>"#
            .to_string()
    };
    format!(
        r#"<form method="post" action="/analyze">
    <label>{toggle} Use FinSec API</label>
    <button type="submit">🚨 Analyze</button>
</form>"#
    )
}

/// Reports
pub fn reports_page(nav: NavContext, result: Option<&Table>) -> String {
    match result {
        Some(table) => {
            let content = format!(
                r#"{}<p><a href="/reports/full_report.csv" download>📥 Download CSV</a></p>"#,
                render_table(table)
            );
            page("📄 Reports", Some(nav), &[], &content)
        }
        None => page(
            "📄 Reports",
            Some(nav),
            &[Flash::Info("No results available yet.".to_string())],
            "",
        ),
    }
}

/// Application settings
pub fn settings_page(nav: NavContext, settings: &ScoringSettings, flashes: &[Flash]) -> String {
    let options: String = Sensitivity::ALL
        .iter()
        .map(|level| {
            let selected = if *level == settings.sensitivity { " selected" } else { "" };
            format!(
                r#"<option value="{0}"{selected}>{0} (threshold {1})</option>"#,
                level.label(),
                level.threshold()
            )
        })
        .collect();
    let webhook = escape_html(settings.webhook_url.as_deref().unwrap_or(""));
    let alerts = if settings.email_alerts { " checked" } else { "" };

    let content = format!(
        r#"<form method="post" action="/settings">
    <label>Webhook URL <input type="url" name="webhook_url" value="{webhook}"></label>
    <label>Risk Sensitivity <select name="sensitivity">{options}</select></label>
    <label><input type="checkbox" name="email_alerts"{alerts}> Enable Email Alerts</label>
    <button type="submit">Save</button>
</form>"#
    );
    page("⚙️ Application Settings", Some(nav), flashes, &content)
}

/// Sidebar context for `active`
pub fn nav(active: View, role: Option<Role>) -> NavContext {
    NavContext { active, role }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(view: View) -> NavContext {
        nav(view, Some(Role::Admin))
    }

    #[test]
    fn test_login_page_offers_both_roles() {
        let html = login_page(&[]);
        assert!(html.contains(r#"value="Admin""#));
        assert!(html.contains(r#"value="Financial Client""#));
        assert!(!html.contains("Navigation"));
    }

    #[test]
    fn test_reports_without_result_shows_info() {
        let html = reports_page(ctx(View::Reports), None);
        assert!(html.contains("No results available yet."));
        assert!(!html.contains("full_report.csv"));
    }

    #[test]
    fn test_upload_toggle_disabled_without_remote() {
        let table = Table::from_csv_bytes(b"amt\n1\n").unwrap();
        let html = upload_page(
            ctx(View::Upload),
            UploadView {
                upload: Some((&table, 5)),
                result: None,
                remote_available: false,
                flashes: vec![],
            },
        );
        assert!(html.contains("disabled"));
        assert!(html.contains("/analyze"));
    }

    #[test]
    fn test_settings_marks_current_sensitivity() {
        let settings = ScoringSettings {
            sensitivity: Sensitivity::High,
            ..Default::default()
        };
        let html = settings_page(ctx(View::Settings), &settings, &[]);
        assert!(html.contains(r#"<option value="High" selected>"#));
    }
}
