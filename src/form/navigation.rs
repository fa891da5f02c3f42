//! Page navigation seam

use std::sync::Mutex;

/// Changes the visible page
///
/// Owned by the host application; the form only calls it.
pub trait Navigator: Send + Sync {
    fn on_navigate(&self, route: &str);
}

/// Navigator that records visited routes like a browser history
///
/// `location()` mirrors `window.location.href`: the base URL followed by the
/// last route token.
#[derive(Debug)]
pub struct HistoryNavigator {
    base: String,
    history: Mutex<Vec<String>>,
}

impl HistoryNavigator {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            history: Mutex::new(Vec::new()),
        }
    }

    pub fn location(&self) -> String {
        let history = self.history.lock().unwrap_or_else(|e| e.into_inner());
        match history.last() {
            Some(route) => format!("{}{}", self.base, route),
            None => self.base.clone(),
        }
    }

    /// Every route navigated to, oldest first
    pub fn history(&self) -> Vec<String> {
        self.history
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl Default for HistoryNavigator {
    fn default() -> Self {
        Self::new("http://localhost/")
    }
}

impl Navigator for HistoryNavigator {
    fn on_navigate(&self, route: &str) {
        tracing::debug!(route = %route, "Navigating");
        self.history
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(route.to_string());
    }
}
