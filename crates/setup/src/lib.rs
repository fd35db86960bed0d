pub mod steps;
pub mod submission;
pub mod validation;
pub mod wizard;

#[cfg(test)]
pub(crate) mod test_support;

pub use steps::{AccountField, AppField, AppsStep, Step, StepData, StepPhase, TokensField};
pub use submission::{submit_setup, SetupSubmission, SubmissionState, DEFAULT_SUBMIT_TIMEOUT};
pub use validation::ValidationResult;
pub use wizard::{Accumulated, Advance, SetupWizard, WizardStep};
