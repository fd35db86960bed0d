use zen_api::{ApiResult, CheckStatus};

/// Identifies one mount of a routed view. Events carrying an older id were
/// started by a view that is gone and are dropped.
pub type MountId = u64;

pub enum AppAsyncEvent {
    /// The process-wide auth check. Not tied to any view.
    AuthChecked {
        result: ApiResult<CheckStatus>,
    },
    ModeChecked {
        mount: MountId,
        result: ApiResult<CheckStatus>,
    },
    SetupGateChecked {
        mount: MountId,
        result: ApiResult<CheckStatus>,
    },
    SetupSubmitted {
        mount: MountId,
        result: ApiResult<()>,
    },
    LoginFinished {
        mount: MountId,
        result: ApiResult<()>,
    },
    LogoutFinished {
        mount: MountId,
        result: ApiResult<()>,
    },
}

impl AppAsyncEvent {
    pub fn mount(&self) -> Option<MountId> {
        match self {
            AppAsyncEvent::AuthChecked { .. } => None,
            AppAsyncEvent::ModeChecked { mount, .. }
            | AppAsyncEvent::SetupGateChecked { mount, .. }
            | AppAsyncEvent::SetupSubmitted { mount, .. }
            | AppAsyncEvent::LoginFinished { mount, .. }
            | AppAsyncEvent::LogoutFinished { mount, .. } => Some(*mount),
        }
    }
}
