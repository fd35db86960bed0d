//! Setup wizard orchestrator.
//!
//! The wizard walks Account → Tokens → Apps → Completion. It only moves forward
//! when the active step validates, merges each step's data into the
//! accumulated payload, and starts the final submission once on entering
//! Completion. After that the wizard is locked.

use tracing::debug;
use zen_api::{AppSpec, ApiResult, SetupPayload};

use crate::steps::{AccountStep, AppsStep, Step, StepData, TokensStep};
use crate::submission::{SetupSubmission, SubmissionState};
use crate::validation::ValidationResult;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum WizardStep {
    #[default]
    Account,
    Tokens,
    Apps,
    Completion,
}

impl WizardStep {
    pub const ALL: [WizardStep; 4] = [
        WizardStep::Account,
        WizardStep::Tokens,
        WizardStep::Apps,
        WizardStep::Completion,
    ];

    pub fn index(&self) -> usize {
        match self {
            WizardStep::Account => 0,
            WizardStep::Tokens => 1,
            WizardStep::Apps => 2,
            WizardStep::Completion => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::Account => "Account",
            WizardStep::Tokens => "Tokens",
            WizardStep::Apps => "Apps",
            WizardStep::Completion => "Completion",
        }
    }

    fn next(&self) -> Self {
        Self::from_index(self.index() + 1).unwrap_or(WizardStep::Completion)
    }

    fn prev(&self) -> Self {
        self.index()
            .checked_sub(1)
            .and_then(Self::from_index)
            .unwrap_or(WizardStep::Account)
    }
}

/// Data collected from steps that have passed validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Accumulated {
    pub username: Option<String>,
    pub password: Option<String>,
    pub github_token: Option<String>,
    pub apps: Option<Vec<AppSpec>>,
}

impl Accumulated {
    pub fn merge(&mut self, data: StepData) {
        match data {
            StepData::Account { username, password } => {
                self.username = Some(username);
                self.password = Some(password);
            }
            StepData::Tokens { github_token } => self.github_token = Some(github_token),
            StepData::Apps { apps } => self.apps = Some(apps),
        }
    }

    /// The full payload, once every step has contributed.
    pub fn to_payload(&self) -> Option<SetupPayload> {
        Some(SetupPayload {
            username: self.username.clone()?,
            password: self.password.clone()?,
            github_token: self.github_token.clone()?,
            apps: self.apps.clone()?,
        })
    }
}

/// Result of [`SetupWizard::next`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// The active step failed validation; its errors are now visible.
    Invalid(ValidationResult),
    Moved(WizardStep),
    /// Completion reached: the caller must send this payload.
    Submit(SetupPayload),
    /// Nothing to do: the wizard is locked or already on Completion.
    Ignored,
}

#[derive(Debug, Clone, Default)]
pub struct SetupWizard {
    active: WizardStep,
    accumulated: Accumulated,
    account: AccountStep,
    tokens: TokensStep,
    apps: AppsStep,
    submission: SetupSubmission,
}

impl SetupWizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> WizardStep {
        self.active
    }

    pub fn accumulated(&self) -> &Accumulated {
        &self.accumulated
    }

    pub fn account(&self) -> &AccountStep {
        &self.account
    }

    pub fn account_mut(&mut self) -> &mut AccountStep {
        &mut self.account
    }

    pub fn tokens(&self) -> &TokensStep {
        &self.tokens
    }

    pub fn tokens_mut(&mut self) -> &mut TokensStep {
        &mut self.tokens
    }

    pub fn apps(&self) -> &AppsStep {
        &self.apps
    }

    pub fn apps_mut(&mut self) -> &mut AppsStep {
        &mut self.apps
    }

    pub fn submission(&self) -> &SubmissionState {
        self.submission.state()
    }

    /// Once the submission has started, navigation is disabled.
    pub fn is_locked(&self) -> bool {
        self.submission.state().is_started()
    }

    pub fn can_restart(&self) -> bool {
        matches!(self.submission.state(), SubmissionState::Failed(_))
    }

    fn active_controller(&mut self) -> Option<&mut dyn Step> {
        match self.active {
            WizardStep::Account => Some(&mut self.account),
            WizardStep::Tokens => Some(&mut self.tokens),
            WizardStep::Apps => Some(&mut self.apps),
            WizardStep::Completion => None,
        }
    }

    /// Errors of the active step from its last validation.
    pub fn active_errors(&self) -> Option<&ValidationResult> {
        match self.active {
            WizardStep::Account => Some(self.account.errors()),
            WizardStep::Tokens => Some(self.tokens.errors()),
            WizardStep::Apps => Some(self.apps.errors()),
            WizardStep::Completion => None,
        }
    }

    pub fn next(&mut self) -> Advance {
        if self.is_locked() {
            return Advance::Ignored;
        }

        let Some(step) = self.active_controller() else {
            return Advance::Ignored;
        };

        match step.validate() {
            Err(errors) => Advance::Invalid(errors),
            Ok(data) => {
                self.accumulated.merge(data);
                self.active = self.active.next();
                debug!(step = self.active.title(), "Wizard advanced");
                if self.active == WizardStep::Completion {
                    if let Some(payload) = self.start_submission() {
                        return Advance::Submit(payload);
                    }
                }
                Advance::Moved(self.active)
            }
        }
    }

    pub fn prev(&mut self) -> bool {
        if self.is_locked() || self.active == WizardStep::Account {
            return false;
        }
        self.active = self.active.prev();
        debug!(step = self.active.title(), "Wizard went back");
        true
    }

    /// Step indicator jump. Only already visited steps can be selected.
    pub fn jump_to(&mut self, target: WizardStep) -> bool {
        if self.is_locked() {
            return false;
        }
        if target > self.active {
            debug!(
                from = self.active.title(),
                to = target.title(),
                "Refusing to skip forward past unvalidated steps"
            );
            return false;
        }
        self.active = target;
        true
    }

    /// Payload to send if Completion is active and nothing was sent yet.
    /// Calling it again never yields the payload twice.
    pub fn start_submission(&mut self) -> Option<SetupPayload> {
        if self.active != WizardStep::Completion {
            return None;
        }
        let payload = self.accumulated.to_payload()?;
        if self.submission.begin(&payload) {
            Some(payload)
        } else {
            None
        }
    }

    pub fn finish_submission(&mut self, result: &ApiResult<()>) {
        self.submission.finish(result);
    }
}
