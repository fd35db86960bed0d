use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use zen_api::{ApiError, ApiResult, Backend, CheckStatus, LoginRequest, SetupPayload};

/// Backend double that records setup calls and answers from a script.
pub(crate) struct ScriptedBackend {
    setup_calls: AtomicUsize,
    setup_delay: Option<Duration>,
    setup_failure: Option<(u16, String)>,
    last_setup: Mutex<Option<SetupPayload>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self {
            setup_calls: AtomicUsize::new(0),
            setup_delay: None,
            setup_failure: None,
            last_setup: Mutex::new(None),
        }
    }

    pub fn with_setup_delay(mut self, delay: Duration) -> Self {
        self.setup_delay = Some(delay);
        self
    }

    pub fn failing_setup(mut self, status: u16, message: &str) -> Self {
        self.setup_failure = Some((status, message.to_string()));
        self
    }

    pub fn setup_calls(&self) -> usize {
        self.setup_calls.load(Ordering::SeqCst)
    }

    pub fn last_setup(&self) -> Option<SetupPayload> {
        self.last_setup.lock().unwrap().clone()
    }
}

#[async_trait]
impl Backend for ScriptedBackend {
    async fn check(&self) -> ApiResult<CheckStatus> {
        Ok(CheckStatus::PendingSetup)
    }

    async fn login(&self, _request: &LoginRequest) -> ApiResult<()> {
        Ok(())
    }

    async fn logout(&self) -> ApiResult<()> {
        Ok(())
    }

    async fn setup(&self, payload: &SetupPayload) -> ApiResult<()> {
        self.setup_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_setup.lock().unwrap() = Some(payload.clone());
        if let Some(delay) = self.setup_delay {
            tokio::time::sleep(delay).await;
        }
        match &self.setup_failure {
            Some((status, message)) => Err(ApiError::Rejected {
                status: *status,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}
