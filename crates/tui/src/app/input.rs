use super::*;

fn is_plain(key: &KeyEvent) -> bool {
    !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
}

impl App {
    pub fn handle_event(&mut self, event: Event) -> Result<bool> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key_event(key),
            _ => Ok(false),
        }
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<bool> {
        if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(true);
        }

        if key.code == KeyCode::F(1) {
            self.show_help = !self.show_help;
            return Ok(false);
        }

        if self.show_help {
            if key.code == KeyCode::Esc {
                self.show_help = false;
            }
            return Ok(false);
        }

        if key.code == KeyCode::F(2) && self.last_error.is_some() {
            self.show_error_details = !self.show_error_details;
            return Ok(false);
        }

        if self.show_error_details {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
                self.show_error_details = false;
            }
            return Ok(false);
        }

        match self.route {
            Route::Root => {}
            Route::Login => self.handle_login_key(key),
            Route::Setup => self.handle_setup_key(key),
            Route::Dashboard => {
                if key.code == KeyCode::Char('l') {
                    self.logout();
                }
            }
        }
        Ok(false)
    }

    fn handle_login_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.login.focus_next();
            }
            KeyCode::Enter => self.submit_login(),
            KeyCode::Backspace => self.login.focused_mut().handle_backspace(),
            KeyCode::Char(c) if is_plain(&key) => self.login.focused_mut().handle_char(c),
            _ => {}
        }
    }

    fn handle_setup_key(&mut self, key: KeyEvent) {
        let Some(view) = self.setup.as_mut() else {
            return;
        };
        if view.gate == SetupGate::Checking {
            return;
        }

        if view.wizard.active() == WizardStep::Completion {
            let submission = view.wizard.submission().clone();
            match (key.code, submission) {
                (KeyCode::Enter, SubmissionState::Succeeded) => self.navigate(Route::Login),
                (KeyCode::Enter | KeyCode::Char('r'), SubmissionState::Failed(_)) => {
                    self.restart_setup()
                }
                _ => {}
            }
            return;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);
        match key.code {
            KeyCode::Char(c @ '1'..='3') if alt => {
                self.jump_to_step(c as usize - '1' as usize);
            }
            KeyCode::Char('n') if ctrl => view.add_app(),
            KeyCode::Char('d') if ctrl => view.remove_focused_app(),
            KeyCode::Tab | KeyCode::Down => view.focus_next(),
            KeyCode::BackTab | KeyCode::Up => view.focus_prev(),
            KeyCode::Enter => self.advance_wizard(),
            KeyCode::Esc => self.wizard_back(),
            KeyCode::Backspace => view.pop_char(),
            KeyCode::Char(c) if is_plain(&key) => view.push_char(c),
            _ => {}
        }
    }
}
