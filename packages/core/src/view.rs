// ABOUTME: Tagged view-state variants for the client-facing screens
// ABOUTME: All transitions funnel through a single dispatcher function

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which top-level screen the client is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ViewState {
    #[default]
    Home,
    Dashboard,
    Docs,
    Faq,
    Pricing,
}

impl fmt::Display for ViewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ViewState::Home => "home",
            ViewState::Dashboard => "dashboard",
            ViewState::Docs => "docs",
            ViewState::Faq => "faq",
            ViewState::Pricing => "pricing",
        };
        write!(f, "{}", label)
    }
}

/// Single dispatcher for view transitions. Every screen is reachable from
/// every other today; gating rules get added here, not at call sites.
pub fn navigate(_current: ViewState, target: ViewState) -> ViewState {
    target
}
