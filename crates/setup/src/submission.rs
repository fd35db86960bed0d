use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::time::Duration;

use tracing::{debug, info, warn};
use zen_api::{ApiError, ApiResult, Backend, SetupPayload};

pub const DEFAULT_SUBMIT_TIMEOUT: Duration = Duration::from_secs(30);
pub const TIMEOUT_MESSAGE: &str = "Setup request timed out";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmissionState {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed(String),
}

impl SubmissionState {
    pub fn is_started(&self) -> bool {
        !matches!(self, SubmissionState::Idle)
    }
}

fn fingerprint(payload: &SetupPayload) -> u64 {
    let mut hasher = DefaultHasher::new();
    payload.hash(&mut hasher);
    hasher.finish()
}

/// One-shot tracker for the final `POST /api/setup`.
///
/// [`SetupSubmission::begin`] hands out permission to send at most once; it is
/// keyed to the payload, so asking again for the same data (a redraw, a
/// remount of the completion view) never produces a second request.
#[derive(Debug, Clone, Default)]
pub struct SetupSubmission {
    state: SubmissionState,
    sent_for: Option<u64>,
}

impl SetupSubmission {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    /// Returns `true` exactly once: the caller must then send `payload`.
    pub fn begin(&mut self, payload: &SetupPayload) -> bool {
        let fp = fingerprint(payload);
        if self.sent_for == Some(fp) || self.state.is_started() {
            debug!("Setup submission already started, not sending again");
            return false;
        }
        self.sent_for = Some(fp);
        self.state = SubmissionState::Pending;
        true
    }

    pub fn finish(&mut self, result: &ApiResult<()>) {
        if self.state != SubmissionState::Pending {
            debug!(state = ?self.state, "Ignoring setup result outside of pending state");
            return;
        }
        self.state = match result {
            Ok(()) => {
                info!("Setup completed");
                SubmissionState::Succeeded
            }
            Err(e) => {
                warn!(status = ?e.status(), "Setup failed: {}", e);
                SubmissionState::Failed(e.user_message())
            }
        };
    }
}

/// Sends the setup payload, bounded by `timeout`. No retry is attempted.
pub async fn submit_setup(
    backend: &dyn Backend,
    payload: &SetupPayload,
    timeout: Duration,
) -> ApiResult<()> {
    match tokio::time::timeout(timeout, backend.setup(payload)).await {
        Ok(result) => result,
        Err(_) => Err(ApiError::Timeout(TIMEOUT_MESSAGE.to_string())),
    }
}
