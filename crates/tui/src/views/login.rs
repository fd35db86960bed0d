use zen_api::LoginRequest;
use zen_setup::validation::{is_present, validate, FieldRules, Rule};
use zen_setup::ValidationResult;

use crate::input::TextInput;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoginField {
    #[default]
    Username,
    Password,
}

impl LoginField {
    pub fn name(&self) -> &'static str {
        match self {
            LoginField::Username => "username",
            LoginField::Password => "password",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LoginField::Username => "Username",
            LoginField::Password => "Password",
        }
    }

    fn toggle(&self) -> Self {
        match self {
            LoginField::Username => LoginField::Password,
            LoginField::Password => LoginField::Username,
        }
    }
}

fn rules() -> Vec<FieldRules<LoginRequest>> {
    vec![
        FieldRules::new(
            "username",
            |r: &LoginRequest| r.username.as_str(),
            vec![Rule::new(|v, _| is_present(v), "Username is required")],
        ),
        FieldRules::new(
            "password",
            |r: &LoginRequest| r.password.as_str(),
            vec![Rule::new(|v, _| is_present(v), "Password is required")],
        ),
    ]
}

/// Sign-in form state. Remounting the login route starts from a fresh form.
#[derive(Debug, Clone)]
pub struct LoginForm {
    pub username: TextInput,
    pub password: TextInput,
    pub focus: LoginField,
    pub errors: ValidationResult,
    pub server_error: Option<String>,
    pub submitting: bool,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginForm {
    pub fn new() -> Self {
        Self {
            username: TextInput::new(),
            password: TextInput::secret(),
            focus: LoginField::Username,
            errors: ValidationResult::new(),
            server_error: None,
            submitting: false,
        }
    }

    pub fn focused_mut(&mut self) -> &mut TextInput {
        match self.focus {
            LoginField::Username => &mut self.username,
            LoginField::Password => &mut self.password,
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.toggle();
    }

    fn request(&self) -> LoginRequest {
        LoginRequest {
            username: self.username.value().to_string(),
            password: self.password.value().to_string(),
        }
    }

    /// Validates the form and, when it passes, marks it as submitting and
    /// returns the request to send. `None` while a request is in flight.
    pub fn begin_submit(&mut self) -> Option<LoginRequest> {
        if self.submitting {
            return None;
        }
        let request = self.request();
        self.errors = validate(&request, &rules());
        if !self.errors.is_valid() {
            return None;
        }
        self.server_error = None;
        self.submitting = true;
        Some(request)
    }

    pub fn fail(&mut self, message: String) {
        self.submitting = false;
        self.server_error = Some(message);
    }
}
