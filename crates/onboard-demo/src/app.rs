#![forbid(unsafe_code)]

//! Demo application state: focus handling, key routing, and the wiring of
//! terminal input into the form controller's input-change operation.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use onboard::prelude::*;
use onboard::{FieldValue, HttpTransport};

const HINT: &str = "Tab: next field · Space: toggle/cycle · Enter: submit · Esc: quit";

/// Choice lists for the select fields. Presentation-side only; the form
/// state stores the chosen string.
fn options_for(field: &str) -> Option<&'static [&'static str]> {
    match field {
        "role" => Some(&["", "Developer", "Designer", "Manager", "Other"]),
        "suffix" => Some(&["", "Jr.", "Sr.", "II", "III"]),
        _ => None,
    }
}

pub struct App {
    session: SubmitSession<HttpTransport>,
    /// Focused slot: field index, or `field_count` for the submit control.
    focus: usize,
    status: String,
    should_quit: bool,
}

impl App {
    pub fn new(endpoint: String) -> Self {
        let controller = FormController::new(Schema::onboarding());
        Self {
            session: SubmitSession::over_http(controller, endpoint),
            focus: 0,
            status: HINT.to_string(),
            should_quit: false,
        }
    }

    pub fn session(&self) -> &SubmitSession<HttpTransport> {
        &self.session
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    fn field_count(&self) -> usize {
        self.session.controller().schema().len()
    }

    /// Drain arrived submission outcomes. Failures stay in the log; only
    /// success changes what the user sees.
    pub fn pump(&mut self) {
        for event in self.session.pump() {
            match event {
                SubmitEvent::Succeeded { .. } => {
                    self.status = "Welcome aboard — response below.".to_string();
                }
                SubmitEvent::Failed { .. } => {
                    self.status = HINT.to_string();
                }
            }
        }
    }

    pub fn handle_event(&mut self, event: &Event) {
        if let Event::Key(key) = event
            && matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat)
        {
            self.handle_key(key);
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab | KeyCode::Down => {
                self.focus = (self.focus + 1) % (self.field_count() + 1);
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = self
                    .focus
                    .checked_sub(1)
                    .unwrap_or(self.field_count());
            }
            KeyCode::Enter => self.try_submit(),
            KeyCode::Left => self.cycle_select(-1),
            KeyCode::Right => self.cycle_select(1),
            KeyCode::Char(' ') => self.handle_space(),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.insert_char(c);
            }
            KeyCode::Backspace => self.delete_char(),
            _ => {}
        }
    }

    /// The submit control is non-interactive while the gate is disabled;
    /// `submit` refuses on its own, so a disabled Enter is a no-op.
    fn try_submit(&mut self) {
        if self.session.submit().is_some() {
            self.status = "Submitting…".to_string();
        }
    }

    fn focused_field(&self) -> Option<(String, FieldKind)> {
        self.session
            .controller()
            .schema()
            .fields()
            .get(self.focus)
            .map(|def| (def.name().to_string(), def.kind()))
    }

    fn current_text(&self, field: &str) -> String {
        self.session
            .controller()
            .value(field)
            .and_then(FieldValue::as_text)
            .unwrap_or("")
            .to_string()
    }

    fn handle_space(&mut self) {
        let Some((name, kind)) = self.focused_field() else {
            return;
        };
        if kind.is_boolean() {
            let checked = self
                .session
                .controller()
                .value(&name)
                .and_then(FieldValue::as_flag)
                .unwrap_or(false);
            let _ = self
                .session
                .controller_mut()
                .apply_change(InputChange::toggle(&name, !checked));
        } else if options_for(&name).is_some() {
            self.cycle_select(1);
        } else {
            self.insert_char(' ');
        }
    }

    fn insert_char(&mut self, c: char) {
        let Some((name, kind)) = self.focused_field() else {
            return;
        };
        if kind.is_boolean() || options_for(&name).is_some() {
            return;
        }
        let mut text = self.current_text(&name);
        text.push(c);
        let _ = self
            .session
            .controller_mut()
            .apply_change(InputChange::text(&name, &text));
    }

    fn delete_char(&mut self) {
        let Some((name, kind)) = self.focused_field() else {
            return;
        };
        if kind.is_boolean() || options_for(&name).is_some() {
            return;
        }
        let mut text = self.current_text(&name);
        if text.pop().is_some() {
            let _ = self
                .session
                .controller_mut()
                .apply_change(InputChange::text(&name, &text));
        }
    }

    fn cycle_select(&mut self, step: isize) {
        let Some((name, _)) = self.focused_field() else {
            return;
        };
        let Some(options) = options_for(&name) else {
            return;
        };
        let current = self.current_text(&name);
        let index = options
            .iter()
            .position(|option| *option == current)
            .unwrap_or(0) as isize;
        let len = options.len() as isize;
        let next = (index + step).rem_euclid(len) as usize;
        let _ = self
            .session
            .controller_mut()
            .apply_change(InputChange::text(&name, options[next]));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn app() -> App {
        // Port 9 is the discard port; nothing is dispatched in these tests.
        App::new("http://127.0.0.1:9/api/users".to_string())
    }

    #[test]
    fn tab_cycles_through_fields_and_submit_control() {
        let mut app = app();
        let slots = app.field_count() + 1;
        for expected in 1..slots {
            app.handle_event(&press(KeyCode::Tab));
            assert_eq!(app.focus(), expected);
        }
        app.handle_event(&press(KeyCode::Tab));
        assert_eq!(app.focus(), 0);
    }

    #[test]
    fn typing_edits_the_focused_field() {
        let mut app = app();
        app.handle_event(&press(KeyCode::Char('A')));
        app.handle_event(&press(KeyCode::Char('d')));
        app.handle_event(&press(KeyCode::Char('a')));
        assert_eq!(
            app.session().controller().value("name").and_then(FieldValue::as_text),
            Some("Ada")
        );

        app.handle_event(&press(KeyCode::Backspace));
        assert_eq!(
            app.session().controller().value("name").and_then(FieldValue::as_text),
            Some("Ad")
        );
    }

    #[test]
    fn space_toggles_the_terms_checkbox() {
        let mut app = app();
        // terms is the fourth field
        for _ in 0..3 {
            app.handle_event(&press(KeyCode::Tab));
        }
        app.handle_event(&press(KeyCode::Char(' ')));
        assert_eq!(
            app.session().controller().value("terms").and_then(FieldValue::as_flag),
            Some(true)
        );
        app.handle_event(&press(KeyCode::Char(' ')));
        assert_eq!(
            app.session().controller().value("terms").and_then(FieldValue::as_flag),
            Some(false)
        );
    }

    #[test]
    fn arrows_cycle_role_options() {
        let mut app = app();
        for _ in 0..4 {
            app.handle_event(&press(KeyCode::Tab));
        }
        app.handle_event(&press(KeyCode::Right));
        assert_eq!(
            app.session().controller().value("role").and_then(FieldValue::as_text),
            Some("Developer")
        );
        app.handle_event(&press(KeyCode::Left));
        assert_eq!(
            app.session().controller().value("role").and_then(FieldValue::as_text),
            Some("")
        );
    }

    #[test]
    fn enter_does_not_dispatch_while_gate_disabled() {
        let mut app = app();
        app.handle_event(&press(KeyCode::Enter));
        assert_eq!(app.session().in_flight(), 0);
        assert_eq!(app.session().phase(), SubmitPhase::Idle);
    }

    #[test]
    fn escape_quits() {
        let mut app = app();
        app.handle_event(&press(KeyCode::Esc));
        assert!(app.should_quit());
    }
}
