// ABOUTME: Event handling system for keyboard input and wizard actions

use crate::app::AppState;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Quit,
    // Step navigation
    NextStep,
    PreviousStep,
    Submit,
    // Focus movement between controls
    FocusNext,
    FocusPrevious,
    // Selectors and checkboxes
    ToggleFocused,
    CycleFocused { forward: bool },
    // Text field editing
    InputChar(char),
    Backspace,
    Delete,
    CursorLeft,
    CursorRight,
    CursorHome,
    CursorEnd,
}

pub struct EventHandler;

impl EventHandler {
    /// Map a key press to a wizard event for the current focus
    pub fn handle_key_event(key_event: KeyEvent, state: &AppState) -> Option<AppEvent> {
        if key_event.code == KeyCode::Char('c') && key_event.modifiers.contains(KeyModifiers::CONTROL) {
            return Some(AppEvent::Quit);
        }

        match key_event.code {
            KeyCode::Tab | KeyCode::Down => return Some(AppEvent::FocusNext),
            KeyCode::BackTab | KeyCode::Up => return Some(AppEvent::FocusPrevious),
            KeyCode::Enter => {
                return Some(if state.wizard.is_final_step() {
                    AppEvent::Submit
                } else {
                    AppEvent::NextStep
                });
            }
            KeyCode::Esc => {
                return Some(if state.wizard.can_go_back() {
                    AppEvent::PreviousStep
                } else {
                    AppEvent::Quit
                });
            }
            _ => {}
        }

        if state.focused_text_field().is_some() {
            debug!("Text field focused, handling edit keys");
            return Self::handle_text_keys(key_event);
        }

        match key_event.code {
            KeyCode::Char(' ') => Some(AppEvent::ToggleFocused),
            KeyCode::Left | KeyCode::Char('h') => Some(AppEvent::CycleFocused { forward: false }),
            KeyCode::Right | KeyCode::Char('l') => Some(AppEvent::CycleFocused { forward: true }),
            KeyCode::Char('j') => Some(AppEvent::FocusNext),
            KeyCode::Char('k') => Some(AppEvent::FocusPrevious),
            KeyCode::Char('q') => Some(AppEvent::Quit),
            _ => None,
        }
    }

    fn handle_text_keys(key_event: KeyEvent) -> Option<AppEvent> {
        match key_event.code {
            KeyCode::Backspace => Some(AppEvent::Backspace),
            KeyCode::Delete => Some(AppEvent::Delete),
            KeyCode::Left => Some(AppEvent::CursorLeft),
            KeyCode::Right => Some(AppEvent::CursorRight),
            KeyCode::Home => Some(AppEvent::CursorHome),
            KeyCode::End => Some(AppEvent::CursorEnd),
            KeyCode::Char(ch) if !key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(AppEvent::InputChar(ch))
            }
            _ => None,
        }
    }

    pub fn process_event(event: AppEvent, state: &mut AppState) {
        match event {
            AppEvent::Quit => state.quit(),
            AppEvent::NextStep => state.next_step(),
            AppEvent::PreviousStep => state.previous_step(),
            AppEvent::Submit => state.submit(),
            AppEvent::FocusNext => state.focus_next(),
            AppEvent::FocusPrevious => state.focus_previous(),
            AppEvent::ToggleFocused => state.toggle_focused(),
            AppEvent::CycleFocused { forward } => state.cycle_focused(forward),
            AppEvent::InputChar(ch) => state.input_char(ch),
            AppEvent::Backspace => state.backspace(),
            AppEvent::Delete => state.delete(),
            AppEvent::CursorLeft => state.cursor_left(),
            AppEvent::CursorRight => state.cursor_right(),
            AppEvent::CursorHome => state.cursor_home(),
            AppEvent::CursorEnd => state.cursor_end(),
        }
    }
}
