//! HTML rendering
//!
//! Pages are plain strings assembled with `format!`; every dynamic value goes
//! through [`layout::escape_html`].

pub mod layout;
pub mod pages;
pub mod table;

pub use layout::{escape_html, Flash, NavContext};
