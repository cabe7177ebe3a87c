//! FinSec domain model
//!
//! Everything the dashboard needs that does not touch the network:
//! the per-browser session, the login gate, sidebar navigation, the
//! uploaded/result tables with their CSV codec, and the local risk
//! heuristic used when remote detection is switched off.

pub mod errors;
pub mod navigation;
pub mod scoring;
pub mod session;
pub mod table;
pub mod value;

pub use errors::{DomainError, DomainResult};
pub use navigation::View;
pub use scoring::{
    score_row, HeuristicVerdict, Recommendation, RiskStatus, Sensitivity, Severity,
    DEFAULT_THRESHOLD,
};
pub use session::{LoginForm, Role, ScoringSettings, Session, SessionId};
pub use table::{Row, Table};
pub use value::CellValue;
