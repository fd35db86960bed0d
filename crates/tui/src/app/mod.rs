use crate::config::Config;
use crate::keybinds::Keybinds;
use crate::router::Route;
use crate::session::{setup_gate, AuthState, GuardOutcome, RouteGuard, SessionResolver};
use crate::views::{FieldRef, LoginField, LoginForm, SetupGate, SetupView};
use anyhow::Result;
use ratatui::crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::Frame;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use zen_api::Backend;
use zen_setup::validation::GITHUB_TOKEN_PREFIXES;
use zen_setup::{AccountField, Advance, SubmissionState, TokensField, WizardStep};

mod actions;
mod effects;
mod input;
mod render;
mod state;
mod types;

pub use state::{App, Mount};
pub use types::{AppAsyncEvent, MountId};

const REDACTED: &str = "[REDACTED]";

impl App {
    pub(super) fn report_error(&mut self, context: &str, error: impl std::fmt::Display) {
        let secrets = self.typed_secrets();
        let message = format!(
            "{context}: {}",
            redact_sensitive(&error.to_string(), &secrets)
        );
        self.last_error = Some(message.clone());
        warn!("{message}");
    }

    pub(super) fn clear_error(&mut self) {
        self.last_error = None;
        self.show_error_details = false;
    }

    /// Everything secret the user has typed into a live form.
    fn typed_secrets(&self) -> Vec<String> {
        let mut secrets = vec![self.login.password.value().to_string()];
        if let Some(view) = &self.setup {
            let account = view.wizard.account();
            secrets.push(account.field(AccountField::Password).to_string());
            secrets.push(account.field(AccountField::ConfirmPassword).to_string());
            secrets.push(view.wizard.tokens().field(TokensField::GithubToken).to_string());
        }
        secrets.retain(|s| !s.is_empty());
        secrets
    }

    /// Runs `future` for the process lifetime and reports its event.
    pub(super) fn spawn_app_task<F>(&self, future: F)
    where
        F: Future<Output = AppAsyncEvent> + Send + 'static,
    {
        if let Some(tx) = self.app_async_tx.clone() {
            tokio::spawn(async move {
                let event = future.await;
                let _ = tx.send(event);
            });
        }
    }

    /// Like [`App::spawn_app_task`], but the task is cancelled when the
    /// current view unmounts.
    pub(super) fn spawn_mounted_task<F>(&self, future: F)
    where
        F: Future<Output = AppAsyncEvent> + Send + 'static,
    {
        let Some(tx) = self.app_async_tx.clone() else {
            return;
        };
        let cancel = self.mount.cancel.clone();
        let mount = self.mount.id;
        tokio::spawn(async move {
            tokio::select! {
                _ = cancel.cancelled() => {
                    debug!(mount, "View unmounted, task cancelled");
                }
                event = future => {
                    let _ = tx.send(event);
                }
            }
        });
    }
}

fn redact_sensitive(input: &str, secrets: &[String]) -> String {
    let mut out = input.to_string();
    for secret in secrets {
        out = out.replace(secret.as_str(), REDACTED);
    }
    for prefix in GITHUB_TOKEN_PREFIXES {
        out = redact_token_body(&out, prefix);
    }
    out
}

/// Keeps `prefix` but hides the token characters that follow it.
fn redact_token_body(input: &str, prefix: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(pos) = rest.find(prefix) {
        let (head, tail) = rest.split_at(pos + prefix.len());
        out.push_str(head);
        let end = tail
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(tail.len());
        if end > 0 {
            out.push_str(REDACTED);
        }
        rest = &tail[end..];
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::StubBackend;
    use std::time::Duration;
    use zen_api::CheckStatus;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn ctrl(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_event(key(KeyCode::Char(c))).unwrap();
        }
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_event(key(code)).unwrap();
    }

    /// Lets spawned tasks finish and applies their events.
    async fn settle(app: &mut App) {
        for _ in 0..5 {
            tokio::time::sleep(Duration::from_millis(1)).await;
            app.process_async_events();
        }
    }

    async fn started(backend: &Arc<StubBackend>) -> App {
        let mut app = App::new(Config::default(), backend.clone());
        app.start();
        settle(&mut app).await;
        app
    }

    fn fill_account(app: &mut App) {
        type_text(app, "admin");
        press(app, KeyCode::Tab);
        type_text(app, "correct-horse");
        press(app, KeyCode::Tab);
        type_text(app, "correct-horse");
    }

    fn setup_view(app: &App) -> &SetupView {
        app.setup.as_ref().expect("setup view mounted")
    }

    #[tokio::test]
    async fn pending_installation_lands_on_setup() {
        let backend = Arc::new(StubBackend::with_status(CheckStatus::PendingSetup));
        let app = started(&backend).await;

        assert_eq!(app.route, Route::Setup);
        assert_eq!(setup_view(&app).gate, SetupGate::Open);
    }

    #[tokio::test]
    async fn signed_in_user_lands_on_dashboard() {
        let backend = Arc::new(StubBackend::with_status(CheckStatus::Authenticated));
        let app = started(&backend).await;

        assert_eq!(app.route, Route::Dashboard);
        assert!(app.auth.is_authenticated());
    }

    #[tokio::test]
    async fn signed_out_user_lands_on_login() {
        let backend = Arc::new(StubBackend::with_status(CheckStatus::Unauthenticated));
        let app = started(&backend).await;

        assert_eq!(app.route, Route::Login);
    }

    #[tokio::test]
    async fn failed_check_opens_the_wizard() {
        let backend = Arc::new(StubBackend::check_failing());
        let app = started(&backend).await;

        assert_eq!(app.route, Route::Setup);
        assert_eq!(setup_view(&app).gate, SetupGate::Open);
        assert!(!app.auth.is_authenticated());
    }

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[tokio::test(start_paused = true)]
    async fn waits_for_a_slow_auth_check() {
        // Auth check answers at 50 ms, mode check at 10 ms.
        let backend = Arc::new(
            StubBackend::with_status(CheckStatus::Authenticated)
                .with_check_delays(&[ms(50), ms(10)]),
        );
        let mut app = App::new(Config::default(), backend.clone());
        app.start();

        tokio::time::sleep(ms(20)).await;
        app.process_async_events();
        assert_eq!(app.route, Route::Root);
        assert!(app.auth.is_loading());
        assert_eq!(app.resolver.decision(), None);

        tokio::time::sleep(ms(25)).await;
        app.process_async_events();
        assert_eq!(app.route, Route::Root);

        tokio::time::sleep(ms(10)).await;
        settle(&mut app).await;
        assert_eq!(app.route, Route::Dashboard);
    }

    #[tokio::test(start_paused = true)]
    async fn waits_for_a_slow_mode_check() {
        // Auth check answers at 10 ms, mode check at 50 ms.
        let backend = Arc::new(
            StubBackend::with_status(CheckStatus::Authenticated)
                .with_check_delays(&[ms(10), ms(50)]),
        );
        let mut app = App::new(Config::default(), backend.clone());
        app.start();

        tokio::time::sleep(ms(20)).await;
        app.process_async_events();
        assert!(app.auth.is_authenticated());
        assert_eq!(app.route, Route::Root);
        assert_eq!(app.resolver.decision(), None);

        tokio::time::sleep(ms(25)).await;
        app.process_async_events();
        assert_eq!(app.route, Route::Root);

        tokio::time::sleep(ms(10)).await;
        settle(&mut app).await;
        assert_eq!(app.route, Route::Dashboard);
    }

    #[tokio::test(start_paused = true)]
    async fn leaving_root_cancels_its_check() {
        let backend = Arc::new(
            StubBackend::with_status(CheckStatus::PendingSetup)
                .with_check_delays(&[ms(20), ms(20)]),
        );
        let mut app = App::new(Config::default(), backend.clone());
        app.start();
        app.navigate(Route::Login);

        tokio::time::sleep(Duration::from_millis(30)).await;
        settle(&mut app).await;

        assert_eq!(app.route, Route::Login);
        assert!(!app.auth.is_loading());
    }

    #[tokio::test]
    async fn events_from_unmounted_views_are_dropped() {
        let backend = Arc::new(StubBackend::with_status(CheckStatus::Unauthenticated));
        let mut app = started(&backend).await;
        assert_eq!(app.route, Route::Login);

        let stale = app.mount.id - 1;
        let tx = app.app_async_tx.clone().expect("async tx");
        tx.send(AppAsyncEvent::LoginFinished {
            mount: stale,
            result: Ok(()),
        })
        .expect("send stale event");
        app.process_async_events();

        assert_eq!(app.route, Route::Login);
        assert!(!app.auth.is_authenticated());
    }

    #[tokio::test]
    async fn login_success_opens_dashboard() {
        let backend = Arc::new(StubBackend::with_status(CheckStatus::Unauthenticated));
        let mut app = started(&backend).await;

        type_text(&mut app, "admin");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "correct-horse");
        press(&mut app, KeyCode::Enter);
        assert!(app.login.submitting);
        settle(&mut app).await;

        assert_eq!(app.route, Route::Dashboard);
        assert!(app.auth.is_authenticated());
    }

    #[tokio::test]
    async fn login_failure_shows_server_message() {
        let backend = Arc::new(
            StubBackend::with_status(CheckStatus::Unauthenticated)
                .rejecting_login("Invalid credentials"),
        );
        let mut app = started(&backend).await;

        type_text(&mut app, "admin");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "nope-nope");
        press(&mut app, KeyCode::Enter);
        settle(&mut app).await;

        assert_eq!(app.route, Route::Login);
        assert_eq!(app.login.server_error.as_deref(), Some("Invalid credentials"));
        assert!(!app.login.submitting);
        assert!(app.last_error.is_some());
    }

    #[tokio::test]
    async fn empty_login_is_not_sent() {
        let backend = Arc::new(StubBackend::with_status(CheckStatus::Unauthenticated));
        let mut app = started(&backend).await;

        press(&mut app, KeyCode::Enter);

        assert!(!app.login.submitting);
        assert_eq!(app.login.errors.get("username"), Some("Username is required"));
    }

    #[tokio::test]
    async fn invalid_step_stays_put() {
        let backend = Arc::new(StubBackend::with_status(CheckStatus::PendingSetup));
        let mut app = started(&backend).await;

        press(&mut app, KeyCode::Enter);

        let view = setup_view(&app);
        assert_eq!(view.wizard.active(), WizardStep::Account);
        assert_eq!(
            view.error_for(FieldRef::Account(AccountField::Username)),
            Some("Username is required")
        );
        assert_eq!(backend.setup_calls(), 0);
    }

    #[tokio::test]
    async fn completing_the_wizard_submits_exactly_once() {
        let backend = Arc::new(StubBackend::with_status(CheckStatus::PendingSetup));
        let mut app = started(&backend).await;

        fill_account(&mut app);
        press(&mut app, KeyCode::Enter);
        assert_eq!(setup_view(&app).wizard.active(), WizardStep::Tokens);
        type_text(&mut app, "ghp_abc");
        press(&mut app, KeyCode::Enter);
        app.handle_event(ctrl('n')).unwrap();
        type_text(&mut app, "octo/site");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "npm start");
        press(&mut app, KeyCode::Enter);

        assert_eq!(setup_view(&app).wizard.active(), WizardStep::Completion);
        for _ in 0..3 {
            press(&mut app, KeyCode::Enter);
            press(&mut app, KeyCode::Esc);
        }
        settle(&mut app).await;

        assert_eq!(backend.setup_calls(), 1);
        assert_eq!(
            setup_view(&app).wizard.submission(),
            &SubmissionState::Succeeded
        );

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.route, Route::Login);
    }

    #[tokio::test]
    async fn failed_setup_can_be_restarted() {
        let backend = Arc::new(
            StubBackend::with_status(CheckStatus::PendingSetup)
                .failing_setup("Failed to complete setup"),
        );
        let mut app = started(&backend).await;

        fill_account(&mut app);
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Enter);
        settle(&mut app).await;

        assert_eq!(
            setup_view(&app).wizard.submission(),
            &SubmissionState::Failed("Failed to complete setup".to_string())
        );
        let error = app.last_error.clone().expect("error reported");
        assert!(!error.contains("correct-horse"));

        press(&mut app, KeyCode::Char('r'));
        settle(&mut app).await;

        let view = setup_view(&app);
        assert_eq!(view.wizard.active(), WizardStep::Account);
        assert_eq!(view.wizard.account().field(AccountField::Username), "");
        assert_eq!(backend.setup_calls(), 1);
    }

    #[tokio::test]
    async fn setup_redirects_home_once_installed() {
        let backend = Arc::new(StubBackend::with_status(CheckStatus::Unauthenticated));
        let mut app = started(&backend).await;

        app.navigate(Route::Setup);
        settle(&mut app).await;

        assert_eq!(app.route, Route::Login);
        assert!(app.setup.is_none());
    }

    #[tokio::test]
    async fn dashboard_redirects_signed_out_users() {
        let backend = Arc::new(StubBackend::with_status(CheckStatus::Unauthenticated));
        let mut app = started(&backend).await;

        app.navigate(Route::Dashboard);

        assert_eq!(app.route, Route::Login);
    }

    #[tokio::test]
    async fn logout_signs_out_even_when_the_request_fails() {
        let backend = Arc::new(
            StubBackend::with_status(CheckStatus::Authenticated).failing_logout(),
        );
        let mut app = started(&backend).await;
        assert_eq!(app.route, Route::Dashboard);

        press(&mut app, KeyCode::Char('l'));
        settle(&mut app).await;

        assert_eq!(backend.logout_calls(), 1);
        assert!(!app.auth.is_authenticated());
        assert_eq!(app.route, Route::Login);
    }

    #[tokio::test]
    async fn ctrl_q_quits() {
        let backend = Arc::new(StubBackend::with_status(CheckStatus::Unauthenticated));
        let mut app = App::new(Config::default(), backend);
        assert!(app.handle_event(ctrl('q')).unwrap());
    }

    #[test]
    fn redacts_tokens_and_typed_secrets() {
        let secrets = vec!["correct-horse".to_string()];
        let redacted = redact_sensitive(
            "bad token ghp_abc123 and github_pat_XYZ_9, password correct-horse",
            &secrets,
        );
        assert_eq!(
            redacted,
            "bad token ghp_[REDACTED] and github_pat_[REDACTED], password [REDACTED]"
        );
    }

    #[test]
    fn bare_prefix_is_left_alone() {
        assert_eq!(redact_sensitive("starts with ghp_", &[]), "starts with ghp_");
    }
}
