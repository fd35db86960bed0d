use super::{Step, StepData, StepPhase, StepStatus};
use crate::validation::{is_present, is_repository_key, validate, FieldRules, Rule, ValidationResult};
use zen_api::{AppSpec, Provider};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppField {
    Key,
    Command,
}

impl AppField {
    pub const ALL: [AppField; 2] = [AppField::Key, AppField::Command];

    pub fn name(&self) -> &'static str {
        match self {
            AppField::Key => "key",
            AppField::Command => "command",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AppField::Key => "Key",
            AppField::Command => "Command",
        }
    }
}

fn row_rules() -> Vec<FieldRules<AppSpec>> {
    vec![
        FieldRules::new(
            AppField::Key.name(),
            |app: &AppSpec| app.key.as_str(),
            vec![
                Rule::new(|v, _| is_present(v), "Key is required"),
                Rule::new(|v, _| is_repository_key(v), "Key must be in user/repo format"),
            ],
        ),
        FieldRules::new(
            AppField::Command.name(),
            |app: &AppSpec| app.command.as_str(),
            vec![Rule::new(|v, _| is_present(v), "Command is required")],
        ),
    ]
}

/// Flattened error key for one row, e.g. `apps.2.key`.
pub fn row_field_key(index: usize, field: AppField) -> String {
    format!("apps.{}.{}", index, field.name())
}

fn flatten(row_errors: &[ValidationResult]) -> ValidationResult {
    let mut flattened = ValidationResult::new();
    for (index, row) in row_errors.iter().enumerate() {
        for field in AppField::ALL {
            if let Some(message) = row.get(field.name()) {
                flattened.insert(row_field_key(index, field), message);
            }
        }
    }
    flattened
}

/// Editable list of apps. Every row is validated with the same rules; errors
/// are kept per row.
#[derive(Debug, Clone, Default)]
pub struct AppsStep {
    apps: Vec<AppSpec>,
    row_errors: Vec<ValidationResult>,
    status: StepStatus,
}

impl AppsStep {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apps(&self) -> &[AppSpec] {
        &self.apps
    }

    pub fn len(&self) -> usize {
        self.apps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.apps.is_empty()
    }

    /// Appends a blank GitHub app and returns its index.
    pub fn add_item(&mut self) -> usize {
        self.apps.push(AppSpec {
            provider: Provider::Github,
            key: String::new(),
            command: String::new(),
        });
        self.apps.len() - 1
    }

    /// Removes the row at `index`. Out-of-range indices are ignored.
    pub fn remove_item(&mut self, index: usize) -> Option<AppSpec> {
        if index >= self.apps.len() {
            return None;
        }
        if index < self.row_errors.len() {
            self.row_errors.remove(index);
            // Later rows shift up, so their flattened keys move with them.
            self.status.errors = flatten(&self.row_errors);
        }
        Some(self.apps.remove(index))
    }

    pub fn set_field(&mut self, index: usize, field: AppField, value: impl Into<String>) {
        if let Some(app) = self.apps.get_mut(index) {
            match field {
                AppField::Key => app.key = value.into(),
                AppField::Command => app.command = value.into(),
            }
        }
    }

    pub fn field(&self, index: usize, field: AppField) -> Option<&str> {
        self.apps.get(index).map(|app| match field {
            AppField::Key => app.key.as_str(),
            AppField::Command => app.command.as_str(),
        })
    }

    /// Errors for one row from the last validation pass.
    pub fn row_errors(&self, index: usize) -> Option<&ValidationResult> {
        self.row_errors.get(index)
    }
}

impl Step for AppsStep {
    fn title(&self) -> &'static str {
        "Apps"
    }

    fn validate(&mut self) -> Result<StepData, ValidationResult> {
        let rules = row_rules();
        self.row_errors = self.apps.iter().map(|app| validate(app, &rules)).collect();

        let apps = &self.apps;
        self.status
            .settle(flatten(&self.row_errors), || StepData::Apps { apps: apps.clone() })
    }

    fn errors(&self) -> &ValidationResult {
        &self.status.errors
    }

    fn phase(&self) -> StepPhase {
        self.status.phase
    }
}
