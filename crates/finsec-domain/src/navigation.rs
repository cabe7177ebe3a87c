//! Sidebar navigation

use std::fmt;
use std::str::FromStr;

use crate::errors::DomainError;

/// The five mutually exclusive views reachable from the sidebar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Dashboard,
    Upload,
    Reports,
    Settings,
    Logout,
}

impl View {
    /// Sidebar order
    pub const ALL: [View; 5] = [
        View::Dashboard,
        View::Upload,
        View::Reports,
        View::Settings,
        View::Logout,
    ];

    pub fn label(self) -> &'static str {
        match self {
            View::Dashboard => "Dashboard",
            View::Upload => "Upload",
            View::Reports => "Reports",
            View::Settings => "Settings",
            View::Logout => "Logout",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            View::Dashboard => "📊",
            View::Upload => "📥",
            View::Reports => "📁",
            View::Settings => "⚙️",
            View::Logout => "🚪",
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            View::Dashboard => "/dashboard",
            View::Upload => "/upload",
            View::Reports => "/reports",
            View::Settings => "/settings",
            View::Logout => "/logout",
        }
    }

    /// Resolve a sidebar label
    pub fn from_label(label: &str) -> Option<View> {
        let label = label.trim();
        View::ALL.into_iter().find(|view| view.label() == label)
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for View {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        View::from_label(s).ok_or_else(|| DomainError::UnknownView {
            label: s.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_label_maps_to_exactly_one_view() {
        for view in View::ALL {
            assert_eq!(View::from_label(view.label()), Some(view));
        }
        let paths: std::collections::HashSet<_> = View::ALL.iter().map(|v| v.path()).collect();
        assert_eq!(paths.len(), View::ALL.len());
    }

    #[test]
    fn test_unknown_label_rejected() {
        assert_eq!(View::from_label("Admin Panel"), None);
        assert!(matches!(
            "dashboard".parse::<View>(),
            Err(DomainError::UnknownView { .. })
        ));
    }

    #[test]
    fn test_label_whitespace_ignored() {
        assert_eq!(View::from_label("  Reports "), Some(View::Reports));
    }
}
