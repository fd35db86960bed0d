use super::{Step, StepData, StepPhase, StepStatus};
use crate::validation::{is_github_token, validate, FieldRules, Rule, ValidationResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokensField {
    GithubToken,
}

impl TokensField {
    pub const ALL: [TokensField; 1] = [TokensField::GithubToken];

    pub fn name(&self) -> &'static str {
        match self {
            TokensField::GithubToken => "githubToken",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TokensField::GithubToken => "GitHub Personal Access Token",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct TokensDraft {
    github_token: String,
}

fn rules() -> Vec<FieldRules<TokensDraft>> {
    vec![FieldRules::new(
        TokensField::GithubToken.name(),
        |d: &TokensDraft| d.github_token.as_str(),
        // Optional: only a non-empty token is checked.
        vec![Rule::new(
            |v, _| v.is_empty() || is_github_token(v),
            "Invalid GitHub token format",
        )],
    )]
}

#[derive(Debug, Clone, Default)]
pub struct TokensStep {
    draft: TokensDraft,
    status: StepStatus,
}

impl TokensStep {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_field(&mut self, field: TokensField, value: impl Into<String>) {
        match field {
            TokensField::GithubToken => self.draft.github_token = value.into(),
        }
    }

    pub fn field(&self, field: TokensField) -> &str {
        match field {
            TokensField::GithubToken => &self.draft.github_token,
        }
    }
}

impl Step for TokensStep {
    fn title(&self) -> &'static str {
        "Tokens"
    }

    fn validate(&mut self) -> Result<StepData, ValidationResult> {
        let errors = validate(&self.draft, &rules());
        let draft = &self.draft;
        self.status.settle(errors, || StepData::Tokens {
            github_token: draft.github_token.clone(),
        })
    }

    fn errors(&self) -> &ValidationResult {
        &self.status.errors
    }

    fn phase(&self) -> StepPhase {
        self.status.phase
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(token: &str) -> Result<StepData, ValidationResult> {
        let mut step = TokensStep::new();
        step.set_field(TokensField::GithubToken, token);
        step.validate()
    }

    #[test]
    fn empty_token_is_allowed() {
        assert_eq!(
            check(""),
            Ok(StepData::Tokens {
                github_token: String::new()
            })
        );
    }

    #[test]
    fn known_prefixes_are_accepted() {
        assert!(check("ghp_abc").is_ok());
        assert!(check("github_pat_xyz").is_ok());
    }

    #[test]
    fn unknown_format_is_rejected() {
        let errors = check("abc123").unwrap_err();
        assert_eq!(errors.get("githubToken"), Some("Invalid GitHub token format"));
    }
}
