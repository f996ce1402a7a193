// ABOUTME: Application state for the wizard TUI
// Owns the wizard, the submission port, keyboard focus and the text cursor

use crate::catalog::{load_catalog, provider_for};
use crate::components::onboarding::{FocusTarget, OnboardingWizard, WizardStep};
use crate::config::AppConfig;
use crate::models::{Field, FieldUpdate};
use crate::submission::{port_for, Ack, SubmissionPort};
use anyhow::{Context, Result};
use tracing::{error, info};

/// Outcome line shown under the navigation footer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusMessage {
    Info(String),
    Error(String),
}

pub struct AppState {
    pub wizard: OnboardingWizard,
    submitter: Box<dyn SubmissionPort>,
    /// Index into the current step's focus targets
    pub focus_index: usize,
    /// Cursor position (in chars) inside the focused text field
    pub cursor_position: usize,
    pub status: Option<StatusMessage>,
    /// Receipt of a successful submission; the wizard is done once set
    pub receipt: Option<Ack>,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(wizard: OnboardingWizard, submitter: Box<dyn SubmissionPort>) -> Self {
        let mut state = Self {
            wizard,
            submitter,
            focus_index: 0,
            cursor_position: 0,
            status: None,
            receipt: None,
            should_quit: false,
        };
        state.reset_cursor();
        state
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn step(&self) -> WizardStep {
        self.wizard.step()
    }

    /// Focus target under the cursor, if the step has any
    pub fn focused_target(&self) -> Option<FocusTarget> {
        self.wizard.focus_targets().get(self.focus_index).copied()
    }

    /// The focused field when it is a free-text field
    pub fn focused_text_field(&self) -> Option<Field> {
        match self.focused_target() {
            Some(FocusTarget::Field(field)) if field.is_text() => Some(field),
            _ => None,
        }
    }

    pub fn focus_next(&mut self) {
        let len = self.wizard.focus_targets().len();
        if len > 0 {
            self.focus_index = (self.focus_index + 1) % len;
        }
        self.reset_cursor();
    }

    pub fn focus_previous(&mut self) {
        let len = self.wizard.focus_targets().len();
        if len > 0 {
            self.focus_index = (self.focus_index + len - 1) % len;
        }
        self.reset_cursor();
    }

    /// Keep focus inside the visible targets after visibility changed
    fn clamp_focus(&mut self) {
        let len = self.wizard.focus_targets().len();
        if self.focus_index >= len {
            self.focus_index = len.saturating_sub(1);
            self.reset_cursor();
        }
    }

    fn reset_cursor(&mut self) {
        self.cursor_position = self.text_len();
    }

    pub fn next_step(&mut self) {
        if self.wizard.advance() {
            self.focus_index = 0;
            self.status = None;
            self.reset_cursor();
        }
    }

    pub fn previous_step(&mut self) {
        if self.wizard.retreat() {
            self.focus_index = 0;
            self.status = None;
            self.reset_cursor();
        }
    }

    /// Hand the snapshot to the submission port; ignored before the final step
    pub fn submit(&mut self) {
        if !self.wizard.is_final_step() {
            return;
        }

        let snapshot = self.wizard.snapshot();
        match self.submitter.submit(&snapshot) {
            Ok(ack) => {
                info!("Onboarding submitted: {}", ack);
                self.status = Some(StatusMessage::Info(ack.to_string()));
                self.receipt = Some(ack);
                self.should_quit = true;
            }
            Err(e) => {
                error!("Onboarding submission failed: {}", e);
                self.status = Some(StatusMessage::Error(e.to_string()));
            }
        }
    }

    /// Space: flip the radio group, checkbox or list row under focus
    pub fn toggle_focused(&mut self) {
        match self.focused_target() {
            Some(FocusTarget::Field(Field::OnboardingType)) => {
                let next = self.wizard.state().onboarding_type.toggled();
                self.wizard.set_field(FieldUpdate::OnboardingType(next));
            }
            Some(FocusTarget::Field(Field::EnableFlowLogs)) => {
                let next = !self.wizard.state().enable_flow_logs;
                self.wizard.set_field(FieldUpdate::EnableFlowLogs(next));
            }
            Some(FocusTarget::Field(Field::SubscriptionId)) => self.wizard.cycle_subscription(true),
            Some(FocusTarget::Item(collection, index)) => {
                self.wizard.toggle_item(collection, index);
            }
            _ => {}
        }
        self.clamp_focus();
    }

    /// Left/Right on a selector
    pub fn cycle_focused(&mut self, forward: bool) {
        match self.focused_target() {
            Some(FocusTarget::Field(Field::OnboardingType)) => {
                let next = self.wizard.state().onboarding_type.toggled();
                self.wizard.set_field(FieldUpdate::OnboardingType(next));
            }
            Some(FocusTarget::Field(Field::SubscriptionId)) => {
                self.wizard.cycle_subscription(forward);
            }
            _ => {}
        }
        self.clamp_focus();
    }

    fn edit_text<F>(&mut self, edit: F)
    where
        F: FnOnce(&mut Vec<char>, &mut usize),
    {
        let Some(field) = self.focused_text_field() else {
            return;
        };
        let mut chars: Vec<char> = self
            .wizard
            .state()
            .text(field)
            .unwrap_or_default()
            .chars()
            .collect();
        let mut cursor = self.cursor_position.min(chars.len());
        edit(&mut chars, &mut cursor);

        if let Some(update) = FieldUpdate::text(field, chars.into_iter().collect()) {
            self.wizard.set_field(update);
        }
        self.cursor_position = cursor;
    }

    /// Handle text input character
    pub fn input_char(&mut self, c: char) {
        self.edit_text(|chars, cursor| {
            chars.insert(*cursor, c);
            *cursor += 1;
        });
    }

    /// Handle backspace
    pub fn backspace(&mut self) {
        self.edit_text(|chars, cursor| {
            if *cursor > 0 {
                *cursor -= 1;
                chars.remove(*cursor);
            }
        });
    }

    /// Handle delete key
    pub fn delete(&mut self) {
        self.edit_text(|chars, cursor| {
            if *cursor < chars.len() {
                chars.remove(*cursor);
            }
        });
    }

    fn text_len(&self) -> usize {
        self.focused_text_field()
            .and_then(|field| self.wizard.state().text(field))
            .map_or(0, |text| text.chars().count())
    }

    /// Move cursor left
    pub fn cursor_left(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    /// Move cursor right
    pub fn cursor_right(&mut self) {
        if self.cursor_position < self.text_len() {
            self.cursor_position += 1;
        }
    }

    /// Move cursor to start
    pub fn cursor_home(&mut self) {
        self.cursor_position = 0;
    }

    /// Move cursor to end
    pub fn cursor_end(&mut self) {
        self.cursor_position = self.text_len();
    }
}

/// Top-level application: the state plus whatever drives it
pub struct App {
    pub state: AppState,
}

impl App {
    pub fn new(wizard: OnboardingWizard, submitter: Box<dyn SubmissionPort>) -> Self {
        Self {
            state: AppState::new(wizard, submitter),
        }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let (wizard, submitter) = build_wizard(config)?;
        Ok(Self::new(wizard, submitter))
    }
}

/// Wire the catalog, the configured defaults and the submission port together
pub fn build_wizard(config: &AppConfig) -> Result<(OnboardingWizard, Box<dyn SubmissionPort>)> {
    let provider = provider_for(&config.catalog).context("Failed to open catalog")?;
    let catalog = load_catalog(provider.as_ref()).context("Failed to load catalog")?;
    let submitter = port_for(&config.submission, &catalog)?;

    info!(
        sink = submitter.name(),
        validate = config.submission.validate,
        "Wizard ready"
    );
    let wizard = OnboardingWizard::with_state(config.defaults.initial_state(), catalog);
    Ok((wizard, submitter))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{load_catalog, StaticCatalog};
    use crate::models::{MultiSelect, OnboardingType, WizardState};
    use crate::submission::{MockSubmissionPort, SubmissionError};

    fn state_with(submitter: MockSubmissionPort) -> AppState {
        let catalog = load_catalog(&StaticCatalog::sample()).unwrap();
        AppState::new(OnboardingWizard::new(catalog), Box::new(submitter))
    }

    fn idle_state() -> AppState {
        let mut submitter = MockSubmissionPort::new();
        submitter.expect_submit().never();
        state_with(submitter)
    }

    #[test]
    fn test_initial_focus_on_type_selector() {
        let state = idle_state();
        assert_eq!(state.focused_target(), Some(FocusTarget::Field(Field::OnboardingType)));
        assert_eq!(state.step(), WizardStep::Onboarding);
    }

    #[test]
    fn test_focus_wraps() {
        let mut state = idle_state();
        state.focus_previous();
        assert_eq!(state.focused_target(), Some(FocusTarget::Field(Field::AppName)));
        state.focus_next();
        assert_eq!(state.focused_target(), Some(FocusTarget::Field(Field::OnboardingType)));
    }

    #[test]
    fn test_text_editing_routes_through_set_field() {
        let mut state = idle_state();
        state.focus_previous(); // app name
        assert_eq!(state.cursor_position, "IllumioIntegration".len());

        state.input_char('2');
        assert_eq!(state.wizard.state().app_name, "IllumioIntegration2");

        state.cursor_home();
        state.delete();
        state.input_char('i');
        assert_eq!(state.wizard.state().app_name, "illumioIntegration2");

        state.cursor_end();
        state.backspace();
        assert_eq!(state.wizard.state().app_name, "illumioIntegration");
    }

    #[test]
    fn test_typing_ignored_off_text_field() {
        let mut state = idle_state();
        state.input_char('x');
        assert_eq!(state.wizard.snapshot(), WizardState::new());
    }

    #[test]
    fn test_toggle_type_reveals_tenant_field() {
        let mut state = idle_state();
        state.toggle_focused();
        assert_eq!(state.wizard.state().onboarding_type, OnboardingType::Tenant);
        state.focus_next();
        assert_eq!(state.focused_target(), Some(FocusTarget::Field(Field::TenantId)));
    }

    #[test]
    fn test_focus_clamped_when_vnets_hidden() {
        let mut state = idle_state();
        state.next_step();
        // Focus the last storage account row, then hide the VNet list
        state.focus_previous();
        assert_eq!(
            state.focused_target(),
            Some(FocusTarget::Item(MultiSelect::StorageAccounts, 1))
        );
        state.focus_index = 0;
        state.toggle_focused();
        assert!(!state.wizard.state().enable_flow_logs);

        state.focus_index = 5;
        state.clamp_focus();
        assert_eq!(state.focus_index, 2);
    }

    #[test]
    fn test_submit_ignored_before_final_step() {
        let mut state = idle_state();
        state.submit();
        assert!(state.receipt.is_none());
        assert!(!state.should_quit);
    }

    #[test]
    fn test_submit_failure_keeps_state() {
        let mut submitter = MockSubmissionPort::new();
        submitter
            .expect_submit()
            .times(1)
            .returning(|_| Err(SubmissionError::Rejected("backend offline".to_string())));
        let mut state = state_with(submitter);
        state.next_step();
        state.submit();

        assert!(!state.should_quit);
        assert!(state.receipt.is_none());
        assert_eq!(
            state.status,
            Some(StatusMessage::Error("Submission rejected: backend offline".to_string()))
        );
        assert_eq!(state.step(), WizardStep::NetworkSettings);
    }
}
