use zen_setup::steps::row_field_key;
use zen_setup::{AccountField, AppField, SetupWizard, TokensField, WizardStep};

use crate::input::mask;

/// Whether `/setup` may show the wizard yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupGate {
    Checking,
    Open,
}

/// One editable field of the active wizard step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRef {
    Account(AccountField),
    Tokens(TokensField),
    App(usize, AppField),
}

impl FieldRef {
    pub fn label(&self) -> &'static str {
        match self {
            FieldRef::Account(field) => field.label(),
            FieldRef::Tokens(field) => field.label(),
            FieldRef::App(_, field) => field.label(),
        }
    }

    pub fn error_key(&self) -> String {
        match self {
            FieldRef::Account(field) => field.name().to_string(),
            FieldRef::Tokens(field) => field.name().to_string(),
            FieldRef::App(index, field) => row_field_key(*index, *field),
        }
    }

    pub fn is_secret(&self) -> bool {
        match self {
            FieldRef::Account(field) => field.is_secret(),
            FieldRef::Tokens(_) => true,
            FieldRef::App(..) => false,
        }
    }
}

/// The `/setup` screen: the gate check, then the wizard and field focus.
/// Dropping this value discards the wizard and everything typed into it.
#[derive(Debug, Clone)]
pub struct SetupView {
    pub gate: SetupGate,
    pub wizard: SetupWizard,
    focus: usize,
}

impl Default for SetupView {
    fn default() -> Self {
        Self::new()
    }
}

impl SetupView {
    pub fn new() -> Self {
        Self {
            gate: SetupGate::Checking,
            wizard: SetupWizard::new(),
            focus: 0,
        }
    }

    pub fn fields(&self) -> Vec<FieldRef> {
        match self.wizard.active() {
            WizardStep::Account => AccountField::ALL.into_iter().map(FieldRef::Account).collect(),
            WizardStep::Tokens => TokensField::ALL.into_iter().map(FieldRef::Tokens).collect(),
            WizardStep::Apps => (0..self.wizard.apps().len())
                .flat_map(|index| {
                    AppField::ALL
                        .into_iter()
                        .map(move |field| FieldRef::App(index, field))
                })
                .collect(),
            WizardStep::Completion => Vec::new(),
        }
    }

    pub fn focused(&self) -> Option<FieldRef> {
        self.fields().get(self.focus).copied()
    }

    pub fn focus_next(&mut self) {
        let count = self.fields().len();
        if count > 0 {
            self.focus = (self.focus + 1) % count;
        }
    }

    pub fn focus_prev(&mut self) {
        let count = self.fields().len();
        if count > 0 {
            self.focus = (self.focus + count - 1) % count;
        }
    }

    /// Called whenever the active step changes.
    pub fn reset_focus(&mut self) {
        self.focus = 0;
    }

    pub fn value(&self, field: FieldRef) -> &str {
        match field {
            FieldRef::Account(f) => self.wizard.account().field(f),
            FieldRef::Tokens(f) => self.wizard.tokens().field(f),
            FieldRef::App(index, f) => self.wizard.apps().field(index, f).unwrap_or(""),
        }
    }

    pub fn display_value(&self, field: FieldRef) -> String {
        mask(self.value(field), field.is_secret())
    }

    fn set_value(&mut self, field: FieldRef, value: String) {
        match field {
            FieldRef::Account(f) => self.wizard.account_mut().set_field(f, value),
            FieldRef::Tokens(f) => self.wizard.tokens_mut().set_field(f, value),
            FieldRef::App(index, f) => self.wizard.apps_mut().set_field(index, f, value),
        }
    }

    pub fn push_char(&mut self, c: char) {
        if let Some(field) = self.focused() {
            let mut value = self.value(field).to_string();
            value.push(c);
            self.set_value(field, value);
        }
    }

    pub fn pop_char(&mut self) {
        if let Some(field) = self.focused() {
            let mut value = self.value(field).to_string();
            value.pop();
            self.set_value(field, value);
        }
    }

    /// Appends an app row and focuses its key field.
    pub fn add_app(&mut self) {
        if self.wizard.active() != WizardStep::Apps {
            return;
        }
        let index = self.wizard.apps_mut().add_item();
        self.focus = index * AppField::ALL.len();
    }

    pub fn remove_focused_app(&mut self) {
        let Some(FieldRef::App(index, _)) = self.focused() else {
            return;
        };
        self.wizard.apps_mut().remove_item(index);
        let count = self.fields().len();
        self.focus = self.focus.min(count.saturating_sub(1));
    }

    pub fn error_for(&self, field: FieldRef) -> Option<&str> {
        self.wizard
            .active_errors()
            .and_then(|errors| errors.get(&field.error_key()))
    }
}
