//! Where this client should be: installation mode, authentication, and the
//! routing decisions built on them.

mod guard;
mod resolver;

pub use guard::{setup_gate, GuardOutcome, RouteGuard};
pub use resolver::{decide, Destination, InstallMode, SessionResolver};

use tracing::{debug, warn};
use zen_api::{ApiResult, CheckStatus};

/// In-memory authentication flag. Lives as long as the [`crate::app::App`];
/// nothing is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthState {
    loading: bool,
    authenticated: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthState {
    pub fn new() -> Self {
        Self {
            loading: true,
            authenticated: false,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_authenticated(&self) -> bool {
        !self.loading && self.authenticated
    }

    pub fn begin_check(&mut self) {
        self.loading = true;
    }

    /// Applies an `/api/check` answer. A failed check counts as signed out.
    pub fn resolve(&mut self, result: &ApiResult<CheckStatus>) {
        self.authenticated = match result {
            Ok(status) => status.is_authenticated(),
            Err(e) => {
                warn!("Auth check failed, treating as signed out: {}", e);
                false
            }
        };
        self.loading = false;
        debug!(authenticated = self.authenticated, "Auth state resolved");
    }

    pub fn logged_in(&mut self) {
        self.loading = false;
        self.authenticated = true;
    }

    pub fn logged_out(&mut self) {
        self.loading = false;
        self.authenticated = false;
    }
}
