//! Request middleware

pub mod logging;
pub mod session;

pub use logging::logging_middleware;
pub use session::{require_auth, session_middleware};
