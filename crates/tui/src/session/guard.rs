use tracing::debug;
use zen_api::{ApiResult, CheckStatus};

use super::AuthState;
use crate::router::Route;

/// What a guarded view should do on this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
    /// Still waiting: render nothing, not even a flash of the protected view.
    Hold,
    Render,
    Redirect(Route),
}

/// Gate in front of routes that need a signed-in user.
#[derive(Debug, Clone, Copy, Default)]
pub struct RouteGuard;

impl RouteGuard {
    pub fn evaluate(auth: &AuthState) -> GuardOutcome {
        if auth.is_loading() {
            GuardOutcome::Hold
        } else if auth.is_authenticated() {
            GuardOutcome::Render
        } else {
            debug!("Not signed in, redirecting to login");
            GuardOutcome::Redirect(Route::Login)
        }
    }

    pub fn evaluate_route(route: Route, auth: &AuthState) -> GuardOutcome {
        if route.requires_auth() {
            Self::evaluate(auth)
        } else {
            GuardOutcome::Render
        }
    }
}

/// The wizard only opens on an installation that still needs it. A check that
/// fails outright is treated like pending setup.
pub fn setup_gate(result: &ApiResult<CheckStatus>) -> GuardOutcome {
    match result {
        Ok(CheckStatus::PendingSetup) | Err(_) => GuardOutcome::Render,
        Ok(status) => {
            debug!(?status, "Installation already set up, leaving wizard");
            GuardOutcome::Redirect(Route::Root)
        }
    }
}
