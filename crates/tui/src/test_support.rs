use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use zen_api::{ApiError, ApiResult, Backend, CheckStatus, LoginRequest, SetupPayload};

/// Scripted installation for driving the `App` without a server.
pub(crate) struct StubBackend {
    status: Mutex<Option<CheckStatus>>,
    check_delays: Mutex<VecDeque<Duration>>,
    login_rejection: Option<String>,
    logout_fails: bool,
    setup_failure: Option<String>,
    setup_calls: AtomicUsize,
    logout_calls: AtomicUsize,
}

fn rejected(status: u16, message: &str) -> ApiError {
    ApiError::Rejected {
        status,
        message: message.to_string(),
    }
}

impl StubBackend {
    pub fn with_status(status: CheckStatus) -> Self {
        Self {
            status: Mutex::new(Some(status)),
            check_delays: Mutex::new(VecDeque::new()),
            login_rejection: None,
            logout_fails: false,
            setup_failure: None,
            setup_calls: AtomicUsize::new(0),
            logout_calls: AtomicUsize::new(0),
        }
    }

    /// Every `/api/check` fails to decode.
    pub fn check_failing() -> Self {
        let backend = Self::with_status(CheckStatus::PendingSetup);
        *backend.status.lock().unwrap() = None;
        backend
    }

    /// Delays for successive `/api/check` calls, in call order. `App::start`
    /// sends the auth check before the landing route's mode check.
    pub fn with_check_delays(self, delays: &[Duration]) -> Self {
        self.check_delays.lock().unwrap().extend(delays.iter().copied());
        self
    }

    pub fn rejecting_login(mut self, message: &str) -> Self {
        self.login_rejection = Some(message.to_string());
        self
    }

    pub fn failing_logout(mut self) -> Self {
        self.logout_fails = true;
        self
    }

    pub fn failing_setup(mut self, message: &str) -> Self {
        self.setup_failure = Some(message.to_string());
        self
    }

    pub fn setup_calls(&self) -> usize {
        self.setup_calls.load(Ordering::SeqCst)
    }

    pub fn logout_calls(&self) -> usize {
        self.logout_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Backend for StubBackend {
    async fn check(&self) -> ApiResult<CheckStatus> {
        let delay = self.check_delays.lock().unwrap().pop_front();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        let status = *self.status.lock().unwrap();
        status.ok_or_else(|| ApiError::Decode("unexpected status".to_string()))
    }

    async fn login(&self, _request: &LoginRequest) -> ApiResult<()> {
        match &self.login_rejection {
            Some(message) => Err(rejected(401, message)),
            None => {
                *self.status.lock().unwrap() = Some(CheckStatus::Authenticated);
                Ok(())
            }
        }
    }

    async fn logout(&self) -> ApiResult<()> {
        self.logout_calls.fetch_add(1, Ordering::SeqCst);
        if self.logout_fails {
            return Err(rejected(500, "Logout failed"));
        }
        *self.status.lock().unwrap() = Some(CheckStatus::Unauthenticated);
        Ok(())
    }

    async fn setup(&self, _payload: &SetupPayload) -> ApiResult<()> {
        self.setup_calls.fetch_add(1, Ordering::SeqCst);
        match &self.setup_failure {
            Some(message) => Err(rejected(500, message)),
            None => {
                *self.status.lock().unwrap() = Some(CheckStatus::Unauthenticated);
                Ok(())
            }
        }
    }
}
