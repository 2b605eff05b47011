//! Navigation destinations reached after auth mutations.
//!
//! Routing itself belongs to the embedding application; this module only
//! names the destinations and the seam used to request a transition.

use std::fmt;
use std::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Login,
}

impl Route {
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Login => "/login",
        }
    }

    /// Reverse of [`Route::path`]. Unknown paths fall back to home, as the
    /// catch-all redirect of the router does.
    #[must_use]
    pub fn from_path(path: &str) -> Self {
        match path {
            "/login" => Self::Login,
            _ => Self::Home,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Requests a route transition from the embedding application.
pub trait Navigator: Send + Sync {
    fn push(&self, route: Route);
}

/// Navigator that records every push in memory.
#[derive(Debug, Default)]
pub struct HistoryNavigator {
    history: Mutex<Vec<Route>>,
}

impl HistoryNavigator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent destination, if any push happened.
    #[must_use]
    pub fn current(&self) -> Option<Route> {
        self.lock().last().copied()
    }

    #[must_use]
    pub fn history(&self) -> Vec<Route> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Route>> {
        self.history
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl Navigator for HistoryNavigator {
    fn push(&self, route: Route) {
        tracing::info!(route = %route, "navigate");
        self.lock().push(route);
    }
}

#[cfg(test)]
#[path = "routes_test.rs"]
mod tests;
