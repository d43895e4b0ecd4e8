//! Navigation capability injected into the client, the auth service and whoever
//! acts on guard decisions. Implementations decide what "go to this path" means
//! for their host: a router push, a log line, or a recorded entry in tests.

use std::sync::Mutex;
use tracing::info;

/// Application paths the data layer redirects to or reasons about.
pub mod routes {
    pub const HOME: &str = "/";
    /// Applicant login; also the target of the unauthorized redirect.
    pub const LOGIN: &str = "/login";
    pub const STAFF_LOGIN: &str = "/login/admin";
    pub const REGISTER: &str = "/register";
    pub const RESULT_LOOKUP: &str = "/cek-kelulusan";
    /// Staff area root and landing page.
    pub const ADMIN: &str = "/admin";
    /// Applicant area root and landing page.
    pub const PENDAFTAR: &str = "/pendaftar";

    /// Reachable without a session. Matched exactly.
    pub const PUBLIC: [&str; 5] = [HOME, LOGIN, STAFF_LOGIN, REGISTER, RESULT_LOOKUP];
}

pub trait Navigator: Send + Sync {
    fn navigate_to(&self, path: &str);
}

/// Reports navigation through `tracing`, for hosts without a router such as
/// the command line.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn navigate_to(&self, path: &str) {
        info!(path, "navigate");
    }
}

/// Keeps every requested path in order.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    visited: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn visited(&self) -> Vec<String> {
        self.visited
            .lock()
            .map(|visited| visited.clone())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn last(&self) -> Option<String> {
        self.visited().pop()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate_to(&self, path: &str) {
        if let Ok(mut visited) = self.visited.lock() {
            visited.push(path.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_navigator_keeps_order() {
        let navigator = RecordingNavigator::new();
        navigator.navigate_to(routes::LOGIN);
        navigator.navigate_to(routes::ADMIN);
        assert_eq!(navigator.visited(), vec!["/login", "/admin"]);
        assert_eq!(navigator.last().as_deref(), Some("/admin"));
    }

    #[test]
    fn public_routes_include_both_logins() {
        assert!(routes::PUBLIC.contains(&routes::LOGIN));
        assert!(routes::PUBLIC.contains(&routes::STAFF_LOGIN));
        assert!(!routes::PUBLIC.contains(&routes::ADMIN));
    }
}
