use super::*;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

fn field_line(label: &str, value: String, focused: bool) -> Line<'static> {
    let marker = if focused { "> " } else { "  " };
    let cursor = if focused { "█" } else { "" };
    let style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    Line::from(vec![
        Span::styled(format!("{marker}{label}: "), style),
        Span::raw(format!("{value}{cursor}")),
    ])
}

fn error_line(message: &str) -> Line<'static> {
    Line::styled(format!("    {message}"), Style::default().fg(Color::Red))
}

impl App {
    pub fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();

        match self.route {
            // Nothing is drawn until the session is resolved.
            Route::Root => {}
            Route::Login => self.render_login(frame, area),
            Route::Setup => self.render_setup(frame, area),
            Route::Dashboard => {
                if RouteGuard::evaluate_route(self.route, &self.auth) == GuardOutcome::Render {
                    self.render_dashboard(frame, area);
                }
            }
        }

        if let Some(ref error) = self.last_error {
            self.render_error_line(frame, area, error);
        }

        if self.show_help {
            self.render_help(frame, area);
        }

        if self.show_error_details {
            self.render_error_details(frame, area);
        }
    }

    fn render_login(&self, frame: &mut Frame, area: Rect) {
        let form = &self.login;
        let mut lines = vec![Line::raw("")];

        for (field, input) in [
            (LoginField::Username, &form.username),
            (LoginField::Password, &form.password),
        ] {
            lines.push(field_line(field.label(), input.display(), form.focus == field));
            if let Some(message) = form.errors.get(field.name()) {
                lines.push(error_line(message));
            }
        }

        lines.push(Line::raw(""));
        if form.submitting {
            lines.push(Line::raw("  Signing in..."));
        } else if let Some(ref message) = form.server_error {
            lines.push(Line::styled(
                format!("  {message}"),
                Style::default().fg(Color::Red),
            ));
        }
        lines.push(Line::raw(""));
        lines.push(Line::raw("  [Tab] switch field, [Enter] sign in"));

        let popup_area = self.centered_rect(50, 50, area);
        frame.render_widget(Clear, popup_area);
        frame.render_widget(
            Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Sign in ")),
            popup_area,
        );
    }

    fn render_setup(&self, frame: &mut Frame, area: Rect) {
        let Some(ref view) = self.setup else {
            return;
        };
        if view.gate == SetupGate::Checking {
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(5),
                Constraint::Length(3),
            ])
            .split(area);

        self.render_stepper(frame, chunks[0], view);

        let active = view.wizard.active();
        let body = if active == WizardStep::Completion {
            self.completion_lines(view)
        } else {
            self.step_lines(view)
        };
        frame.render_widget(
            Paragraph::new(body)
                .wrap(Wrap { trim: false })
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(format!(" Setup - {} ", active.title())),
                ),
            chunks[1],
        );

        let hint = match active {
            WizardStep::Account | WizardStep::Tokens => {
                "[Enter] continue  [Esc] back  [Tab] next field  [F1] help"
            }
            WizardStep::Apps => {
                "[Enter] finish  [Esc] back  [Ctrl+N] add app  [Ctrl+D] remove app  [F1] help"
            }
            WizardStep::Completion => "[F1] help  [Ctrl+Q] quit",
        };
        frame.render_widget(
            Paragraph::new(hint).block(Block::default().borders(Borders::ALL)),
            chunks[2],
        );
    }

    fn render_stepper(&self, frame: &mut Frame, area: Rect, view: &SetupView) {
        let active = view.wizard.active();
        let mut spans = Vec::new();
        for step in WizardStep::ALL {
            let style = if step == active {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else if step < active {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            spans.push(Span::styled(
                format!(" {} {} ", step.index() + 1, step.title()),
                style,
            ));
            if step != WizardStep::Completion {
                spans.push(Span::raw("›"));
            }
        }
        frame.render_widget(
            Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL)),
            area,
        );
    }

    fn step_lines(&self, view: &SetupView) -> Vec<Line<'static>> {
        let mut lines = vec![Line::raw("")];
        let focused = view.focused();
        let fields = view.fields();

        if view.wizard.active() == WizardStep::Apps && fields.is_empty() {
            lines.push(Line::raw("  No apps yet. Press [Ctrl+N] to add one."));
        }

        for field in fields {
            if let FieldRef::App(index, zen_setup::AppField::Key) = field {
                let provider = view.wizard.apps().apps()[index].provider.label();
                lines.push(Line::styled(
                    format!("  App {} ({provider})", index + 1),
                    Style::default().add_modifier(Modifier::BOLD),
                ));
            }
            lines.push(field_line(
                field.label(),
                view.display_value(field),
                focused == Some(field),
            ));
            if let Some(message) = view.error_for(field) {
                lines.push(error_line(message));
            }
        }
        lines
    }

    fn completion_lines(&self, view: &SetupView) -> Vec<Line<'static>> {
        let text = match view.wizard.submission() {
            SubmissionState::Idle | SubmissionState::Pending => {
                "Completing setup...".to_string()
            }
            SubmissionState::Succeeded => {
                "Setup complete!\n\nPress [Enter] to sign in.".to_string()
            }
            SubmissionState::Failed(message) => {
                format!("Setup failed: {message}\n\nPress [r] to restart setup.")
            }
        };
        let mut lines = vec![Line::raw("")];
        lines.extend(text.lines().map(|line| Line::raw(format!("  {line}"))));
        lines
    }

    fn render_dashboard(&self, frame: &mut Frame, area: Rect) {
        let text = "\n\n  You are signed in.\n\n  Press [l] to log out.\n";
        frame.render_widget(
            Paragraph::new(text).block(Block::default().borders(Borders::ALL).title(" zen ")),
            area,
        );
    }

    fn render_error_line(&self, frame: &mut Frame, area: Rect, error: &str) {
        if area.height == 0 {
            return;
        }
        let line_area = Rect {
            y: area.y + area.height - 1,
            height: 1,
            ..area
        };
        frame.render_widget(
            Paragraph::new(format!(" {error}  [F2] details")).style(Style::default().fg(Color::Red)),
            line_area,
        );
    }

    fn render_help(&self, frame: &mut Frame, area: Rect) {
        let help_text = self.keybinds.help_text(self.route);
        let popup_area = self.centered_rect(60, 70, area);

        frame.render_widget(Clear, popup_area);
        frame.render_widget(
            Paragraph::new(help_text).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Help - Press F1 to close "),
            ),
            popup_area,
        );
    }

    fn render_error_details(&self, frame: &mut Frame, area: Rect) {
        let popup_area = self.centered_rect(60, 20, area);
        let details = self
            .last_error
            .as_deref()
            .unwrap_or("No error details available.");
        let text = format!("{details}\n\n[Esc] or [Enter] to close");

        frame.render_widget(Clear, popup_area);
        frame.render_widget(
            Paragraph::new(text).wrap(Wrap { trim: true }).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Error Details "),
            ),
            popup_area,
        );
    }

    fn centered_rect(&self, percent_x: u16, percent_y: u16, r: Rect) -> Rect {
        let popup_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage((100 - percent_y) / 2),
                Constraint::Percentage(percent_y),
                Constraint::Percentage((100 - percent_y) / 2),
            ])
            .split(r);

        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage((100 - percent_x) / 2),
                Constraint::Percentage(percent_x),
                Constraint::Percentage((100 - percent_x) / 2),
            ])
            .split(popup_layout[1])[1]
    }
}
