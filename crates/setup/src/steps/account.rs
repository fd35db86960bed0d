use super::{Step, StepData, StepPhase, StepStatus};
use crate::validation::{
    has_min_chars, is_present, validate, FieldRules, Rule, ValidationResult, MIN_PASSWORD_LEN,
    MIN_USERNAME_LEN,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountField {
    Username,
    Password,
    ConfirmPassword,
}

impl AccountField {
    pub const ALL: [AccountField; 3] = [
        AccountField::Username,
        AccountField::Password,
        AccountField::ConfirmPassword,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            AccountField::Username => "username",
            AccountField::Password => "password",
            AccountField::ConfirmPassword => "confirmPassword",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AccountField::Username => "Username",
            AccountField::Password => "Password",
            AccountField::ConfirmPassword => "Confirm Password",
        }
    }

    pub fn is_secret(&self) -> bool {
        !matches!(self, AccountField::Username)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct AccountDraft {
    username: String,
    password: String,
    confirm_password: String,
}

fn rules() -> Vec<FieldRules<AccountDraft>> {
    vec![
        FieldRules::new(
            AccountField::Username.name(),
            |d: &AccountDraft| d.username.as_str(),
            vec![
                Rule::new(|v, _| is_present(v), "Username is required"),
                Rule::new(
                    |v, _| has_min_chars(v, MIN_USERNAME_LEN),
                    "Username must be at least 3 characters",
                ),
            ],
        ),
        FieldRules::new(
            AccountField::Password.name(),
            |d: &AccountDraft| d.password.as_str(),
            vec![
                Rule::new(|v, _| is_present(v), "Password is required"),
                Rule::new(
                    |v, _| has_min_chars(v, MIN_PASSWORD_LEN),
                    "Password must be at least 8 characters",
                ),
            ],
        ),
        FieldRules::new(
            AccountField::ConfirmPassword.name(),
            |d: &AccountDraft| d.confirm_password.as_str(),
            vec![
                Rule::new(|v, _| is_present(v), "Please confirm your password"),
                Rule::new(
                    |v, all: &AccountDraft| v == all.password,
                    "Passwords do not match",
                ),
            ],
        ),
    ]
}

#[derive(Debug, Clone, Default)]
pub struct AccountStep {
    draft: AccountDraft,
    status: StepStatus,
}

impl AccountStep {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_field(&mut self, field: AccountField, value: impl Into<String>) {
        let value = value.into();
        match field {
            AccountField::Username => self.draft.username = value,
            AccountField::Password => self.draft.password = value,
            AccountField::ConfirmPassword => self.draft.confirm_password = value,
        }
    }

    pub fn field(&self, field: AccountField) -> &str {
        match field {
            AccountField::Username => &self.draft.username,
            AccountField::Password => &self.draft.password,
            AccountField::ConfirmPassword => &self.draft.confirm_password,
        }
    }
}

impl Step for AccountStep {
    fn title(&self) -> &'static str {
        "Account"
    }

    fn validate(&mut self) -> Result<StepData, ValidationResult> {
        let errors = validate(&self.draft, &rules());
        let draft = &self.draft;
        self.status.settle(errors, || StepData::Account {
            username: draft.username.clone(),
            password: draft.password.clone(),
        })
    }

    fn errors(&self) -> &ValidationResult {
        &self.status.errors
    }

    fn phase(&self) -> StepPhase {
        self.status.phase
    }
}
