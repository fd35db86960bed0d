use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    #[default]
    Github,
}

impl Provider {
    pub fn label(&self) -> &'static str {
        match self {
            Provider::Github => "GitHub",
        }
    }
}

/// One application registered during setup. `key` is a repository in
/// `owner/repo` form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AppSpec {
    pub provider: Provider,
    pub key: String,
    pub command: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetupPayload {
    pub username: String,
    pub password: String,
    pub github_token: String,
    pub apps: Vec<AppSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Installation status reported by `GET /api/check`.
///
/// Older servers answer `ready` for an installed instance without a valid
/// session; it is read as [`CheckStatus::Unauthenticated`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CheckStatus {
    PendingSetup,
    #[serde(alias = "ready")]
    Unauthenticated,
    Authenticated,
}

impl CheckStatus {
    pub fn is_pending_setup(&self) -> bool {
        matches!(self, CheckStatus::PendingSetup)
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, CheckStatus::Authenticated)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResponse {
    pub status: CheckStatus,
}

/// Error body returned by the server on non-2xx responses. Setup failures use
/// `error`, login failures use `message`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    pub error: Option<String>,
    pub message: Option<String>,
}

impl ErrorBody {
    pub fn into_message(self, fallback: &str) -> String {
        self.error
            .or(self.message)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| fallback.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setup_payload_uses_camel_case_on_the_wire() {
        let payload = SetupPayload {
            username: "admin".to_string(),
            password: "hunter22".to_string(),
            github_token: "ghp_abc".to_string(),
            apps: vec![AppSpec {
                provider: Provider::Github,
                key: "octo/app".to_string(),
                command: "make run".to_string(),
            }],
        };
        let json = serde_json::to_value(&payload).expect("serialize payload");
        assert_eq!(json["githubToken"], "ghp_abc");
        assert_eq!(json["apps"][0]["provider"], "github");
        assert_eq!(json["apps"][0]["key"], "octo/app");
    }

    #[test]
    fn check_status_accepts_ready_as_unauthenticated() {
        let parsed: CheckResponse =
            serde_json::from_str(r#"{"status":"ready"}"#).expect("parse ready");
        assert_eq!(parsed.status, CheckStatus::Unauthenticated);

        let parsed: CheckResponse =
            serde_json::from_str(r#"{"status":"pending-setup"}"#).expect("parse pending");
        assert!(parsed.status.is_pending_setup());
    }

    #[test]
    fn check_status_rejects_unknown_values() {
        let parsed = serde_json::from_str::<CheckResponse>(r#"{"status":"booting"}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn error_body_prefers_error_then_message() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"error":"Failed to complete setup","message":"x"}"#)
                .expect("parse body");
        assert_eq!(body.into_message("Setup failed"), "Failed to complete setup");

        let body: ErrorBody =
            serde_json::from_str(r#"{"message":"Invalid credentials"}"#).expect("parse body");
        assert_eq!(body.into_message("Login failed"), "Invalid credentials");

        assert_eq!(ErrorBody::default().into_message("Login failed"), "Login failed");
    }
}
