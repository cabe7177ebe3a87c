//! Per-browser session state and the login gate

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    errors::{DomainError, DomainResult},
    scoring::Sensitivity,
    table::Table,
};

/// Session identifier carried in the browser cookie
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(uuid::Uuid);

impl SessionId {
    /// Generate a new random session ID
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }

    /// Parse from the cookie representation
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(uuid::Uuid::parse_str(s)?))
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

/// Role picked on the login form. Recorded and displayed, never enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "Admin")]
    Admin,
    #[serde(rename = "Financial Client")]
    FinancialClient,
}

impl Role {
    pub const ALL: [Role; 2] = [Role::Admin, Role::FinancialClient];

    pub fn label(self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::FinancialClient => "Financial Client",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.label() == s)
            .ok_or_else(|| DomainError::validation("role", format!("unknown role '{s}'")))
    }
}

/// Login form as submitted by the browser
#[derive(Debug, Clone, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    pub role: Role,
    #[serde(default)]
    pub email: String,
}

/// Values from the Settings view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringSettings {
    /// Controls the local heuristic threshold
    pub sensitivity: Sensitivity,
    /// Where analysis alerts are posted
    pub webhook_url: Option<String>,
    pub email_alerts: bool,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            sensitivity: Sensitivity::default(),
            webhook_url: None,
            email_alerts: true,
        }
    }
}

impl ScoringSettings {
    /// Webhook to alert, if alerts are on and a webhook is set
    pub fn alert_webhook(&self) -> Option<&str> {
        if self.email_alerts {
            self.webhook_url.as_deref()
        } else {
            None
        }
    }
}

/// All state for one browser session
#[derive(Debug, Clone)]
pub struct Session {
    authenticated: bool,
    role: Option<Role>,
    email: String,
    upload: Option<Table>,
    last_result: Option<Table>,
    last_analyzed_at: Option<DateTime<Utc>>,
    settings: ScoringSettings,
    created_at: DateTime<Utc>,
    last_seen: DateTime<Utc>,
}

impl Session {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            authenticated: false,
            role: None,
            email: String::new(),
            upload: None,
            last_result: None,
            last_analyzed_at: None,
            settings: ScoringSettings::default(),
            created_at: now,
            last_seen: now,
        }
    }

    /// Pass the login gate.
    ///
    /// Succeeds when username and password are both non-empty; their content
    /// is never checked. On failure the session stays unauthenticated.
    pub fn login(&mut self, form: LoginForm) -> DomainResult<()> {
        if form.username.is_empty() || form.password.is_empty() {
            return Err(DomainError::validation(
                "credentials",
                "Please fill in all fields.",
            ));
        }
        self.authenticated = true;
        self.role = Some(form.role);
        self.email = form.email;
        tracing::info!(role = %form.role, "session authenticated");
        Ok(())
    }

    /// Reset to the initial unauthenticated state.
    ///
    /// Uploads, results and settings are dropped along with the credentials.
    pub fn logout(&mut self) {
        *self = Session::new();
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn role(&self) -> Option<Role> {
        self.role
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn upload(&self) -> Option<&Table> {
        self.upload.as_ref()
    }

    /// Replace the uploaded table. The previous result stays until the next analysis.
    pub fn store_upload(&mut self, table: Table) {
        self.upload = Some(table);
    }

    pub fn last_result(&self) -> Option<&Table> {
        self.last_result.as_ref()
    }

    pub fn last_analyzed_at(&self) -> Option<DateTime<Utc>> {
        self.last_analyzed_at
    }

    /// Overwrite the stored result with a fresh analysis.
    pub fn record_result(&mut self, result: Table) {
        self.last_result = Some(result);
        self.last_analyzed_at = Some(Utc::now());
    }

    pub fn settings(&self) -> &ScoringSettings {
        &self.settings
    }

    pub fn update_settings(&mut self, settings: ScoringSettings) {
        self.settings = settings;
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Record activity on this session
    pub fn touch(&mut self) {
        self.last_seen = Utc::now();
    }

    pub fn last_seen(&self) -> DateTime<Utc> {
        self.last_seen
    }

    /// Whether the session has been unused for at least `max_idle` at `now`
    pub fn is_idle_at(&self, now: DateTime<Utc>, max_idle: Duration) -> bool {
        now.signed_duration_since(self.last_seen)
            .to_std()
            .map_or(false, |idle| idle >= max_idle)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
