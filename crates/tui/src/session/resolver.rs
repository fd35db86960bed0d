use tracing::{debug, warn};
use zen_api::{ApiResult, CheckStatus};

use super::AuthState;
use crate::router::Route;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallMode {
    PendingSetup,
    Operational,
}

impl InstallMode {
    /// A failed check is read as pending setup: an installation that cannot
    /// answer `/api/check` is sent to onboarding.
    pub fn from_check(result: &ApiResult<CheckStatus>) -> Self {
        match result {
            Ok(CheckStatus::PendingSetup) => InstallMode::PendingSetup,
            Ok(_) => InstallMode::Operational,
            Err(e) => {
                warn!("Installation check failed, assuming pending setup: {}", e);
                InstallMode::PendingSetup
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    Setup,
    Login,
    Dashboard,
}

impl Destination {
    pub fn route(&self) -> Route {
        match self {
            Destination::Setup => Route::Setup,
            Destination::Login => Route::Login,
            Destination::Dashboard => Route::Dashboard,
        }
    }
}

pub fn decide(mode: InstallMode, authenticated: bool) -> Destination {
    match (mode, authenticated) {
        (InstallMode::PendingSetup, _) => Destination::Setup,
        (InstallMode::Operational, true) => Destination::Dashboard,
        (InstallMode::Operational, false) => Destination::Login,
    }
}

/// Join point for the two landing signals.
///
/// Each signal is stored in its own slot as it arrives, in any order. No
/// decision exists until both slots are filled.
#[derive(Debug, Clone, Default)]
pub struct SessionResolver {
    mode: Option<InstallMode>,
    authenticated: Option<bool>,
}

impl SessionResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_mode(&mut self, result: &ApiResult<CheckStatus>) {
        let mode = InstallMode::from_check(result);
        debug!(?mode, "Installation mode resolved");
        self.mode = Some(mode);
    }

    /// Takes the auth signal once it has left its loading phase.
    pub fn record_auth(&mut self, auth: &AuthState) {
        if auth.is_loading() {
            return;
        }
        self.authenticated = Some(auth.is_authenticated());
    }

    pub fn decision(&self) -> Option<Destination> {
        match (self.mode, self.authenticated) {
            (Some(mode), Some(authenticated)) => Some(decide(mode, authenticated)),
            _ => None,
        }
    }
}
