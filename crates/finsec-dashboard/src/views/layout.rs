//! Page shell, sidebar and message boxes

use axum::http::StatusCode;
use finsec_domain::{Role, View};

const APP_TITLE: &str = "FinSec Full Dashboard";

/// Inline message shown above page content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flash {
    /// Green confirmation
    Success(String),
    /// Blue informational note
    Info(String),
    /// Red validation or processing error
    Error(String),
}

impl Flash {
    fn render(&self) -> String {
        let (class, text) = match self {
            Flash::Success(text) => ("success", text),
            Flash::Info(text) => ("info", text),
            Flash::Error(text) => ("error", text),
        };
        format!(
            r#"<div class="flash {class}">{}</div>"#,
            escape_html(text)
        )
    }
}

/// Sidebar context for authenticated pages
#[derive(Debug, Clone, Copy)]
pub struct NavContext {
    /// Highlighted view
    pub active: View,
    /// Role shown under the navigation
    pub role: Option<Role>,
}

/// Render a full page
pub fn page(title: &str, nav: Option<NavContext>, flashes: &[Flash], content: &str) -> String {
    let sidebar = nav.map(render_sidebar).unwrap_or_default();
    let flashes: String = flashes.iter().map(Flash::render).collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} - {app}</title>
    <style>{css}</style>
</head>
<body>
    {sidebar}
    <main>
        <h1>🛡️ {app}</h1>
        <h2>{title}</h2>
        {flashes}
        {content}
    </main>
</body>
</html>"#,
        title = escape_html(title),
        app = APP_TITLE,
        css = inline_css(),
    )
}

/// Standalone error page
pub fn error_page(status: StatusCode, message: &str) -> String {
    let content = format!(
        r#"<p class="muted">HTTP {}</p><p><a href="/">Back to dashboard</a></p>"#,
        status.as_u16()
    );
    page("Error", None, &[Flash::Error(message.to_string())], &content)
}

fn render_sidebar(nav: NavContext) -> String {
    let links: String = View::ALL
        .iter()
        .map(|view| {
            let class = if *view == nav.active { " class=\"active\"" } else { "" };
            format!(
                r#"<li><a{class} href="/nav?view={label}">{icon} {label}</a></li>"#,
                icon = view.icon(),
                label = view.label(),
            )
        })
        .collect();
    let role = nav.role.map(Role::label).unwrap_or("Unknown");

    format!(
        r#"<nav class="sidebar">
        <h3>Navigation</h3>
        <ul>{links}</ul>
        <p class="muted">Logged in as: {role}</p>
    </nav>"#
    )
}

/// Escape text for HTML element and attribute content
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn inline_css() -> &'static str {
    r#"
body { background-color: #0e1117; color: #fafafa; font-family: sans-serif; margin: 0; display: flex; }
.sidebar { background-color: #1c1f26; min-height: 100vh; width: 220px; padding: 1rem; }
.sidebar ul { list-style: none; padding: 0; }
.sidebar li { margin: 0.5rem 0; }
.sidebar a { color: #fafafa; text-decoration: none; }
.sidebar a.active { font-weight: bold; color: #ff4b4b; }
main { flex: 1; padding: 1rem 2rem; }
a { color: #4da3ff; }
.muted { color: #9aa0a6; }
.flash { padding: 0.75rem 1rem; border-radius: 4px; margin: 0.75rem 0; }
.flash.success { background: #173d2a; }
.flash.info { background: #172d48; }
.flash.error { background: #4a1c1c; }
.metrics { display: flex; gap: 2rem; }
.metric { background: #1c1f26; padding: 1rem 1.5rem; border-radius: 6px; }
.metric .value { font-size: 2rem; }
table { border-collapse: collapse; margin: 1rem 0; }
th, td { border: 1px solid #30343c; padding: 0.3rem 0.6rem; text-align: left; }
th { background: #1c1f26; }
form label { display: block; margin: 0.5rem 0; }
input, select, button { background: #262730; color: #fafafa; border: 1px solid #30343c; padding: 0.3rem; }
button { cursor: pointer; }
"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">&'"#),
            "&lt;a href=&quot;x&quot;&gt;&amp;&#39;"
        );
    }

    #[test]
    fn test_sidebar_lists_all_views_and_role() {
        let html = page(
            "Overview",
            Some(NavContext {
                active: View::Dashboard,
                role: Some(Role::FinancialClient),
            }),
            &[],
            "",
        );
        for view in View::ALL {
            assert!(html.contains(&format!("/nav?view={}", view.label())));
        }
        assert!(html.contains("Logged in as: Financial Client"));
    }

    #[test]
    fn test_flash_text_is_escaped() {
        let html = page("T", None, &[Flash::Error("<script>".into())], "");
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }
}
