//! Per-step form controllers of the setup wizard.
//!
//! Each step owns its draft values and rules. The wizard asks the active step
//! to [`Step::validate`] when the user tries to advance; only a successful
//! validation yields [`StepData`] for the accumulated payload.

mod account;
mod apps;
mod tokens;

pub use account::{AccountField, AccountStep};
pub use apps::{row_field_key, AppField, AppsStep};
pub use tokens::{TokensField, TokensStep};

use crate::validation::ValidationResult;
use zen_api::AppSpec;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StepPhase {
    #[default]
    Idle,
    Invalid,
    Valid,
}

/// Normalized data a step hands to the wizard. Each variant only carries the
/// fields its step owns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepData {
    Account { username: String, password: String },
    Tokens { github_token: String },
    Apps { apps: Vec<AppSpec> },
}

pub trait Step {
    fn title(&self) -> &'static str;

    /// Runs every rule against the current draft. Errors are kept for display
    /// until the next call.
    fn validate(&mut self) -> Result<StepData, ValidationResult>;

    fn errors(&self) -> &ValidationResult;

    fn phase(&self) -> StepPhase;
}

/// Shared bookkeeping for a validation pass.
#[derive(Debug, Clone, Default)]
pub(crate) struct StepStatus {
    pub phase: StepPhase,
    pub errors: ValidationResult,
}

impl StepStatus {
    pub fn settle(
        &mut self,
        errors: ValidationResult,
        data: impl FnOnce() -> StepData,
    ) -> Result<StepData, ValidationResult> {
        if errors.is_valid() {
            self.phase = StepPhase::Valid;
            self.errors = ValidationResult::new();
            Ok(data())
        } else {
            tracing::debug!(fields = errors.len(), "Step validation failed");
            self.phase = StepPhase::Invalid;
            self.errors = errors.clone();
            Err(errors)
        }
    }
}
