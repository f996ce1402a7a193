// ABOUTME: Keyboard-driven tests walking the wizard from first key press to submission

use cloud_onboard::app::{AppEvent, AppState, EventHandler, StatusMessage};
use cloud_onboard::catalog::{load_catalog, StaticCatalog};
use cloud_onboard::components::onboarding::{OnboardingWizard, WizardStep};
use cloud_onboard::models::{OnboardingType, WizardState};
use cloud_onboard::submission::{FileSubmitter, LogSubmitter, SubmissionPort};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tempfile::TempDir;

const fn create_key_event(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn create_state(submitter: Box<dyn SubmissionPort>) -> AppState {
    let catalog = load_catalog(&StaticCatalog::sample()).unwrap();
    AppState::new(OnboardingWizard::new(catalog), submitter)
}

fn press(state: &mut AppState, code: KeyCode) {
    if let Some(event) = EventHandler::handle_key_event(create_key_event(code), state) {
        EventHandler::process_event(event, state);
    }
}

fn type_text(state: &mut AppState, text: &str) {
    for ch in text.chars() {
        press(state, KeyCode::Char(ch));
    }
}

#[test]
fn test_quit_key_events() {
    let state = create_state(Box::new(LogSubmitter::new()));

    let esc = EventHandler::handle_key_event(create_key_event(KeyCode::Esc), &state);
    assert_eq!(esc, Some(AppEvent::Quit));

    let ctrl_c = EventHandler::handle_key_event(
        KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        &state,
    );
    assert_eq!(ctrl_c, Some(AppEvent::Quit));
}

#[test]
fn test_navigation_key_events() {
    let state = create_state(Box::new(LogSubmitter::new()));

    for code in [KeyCode::Tab, KeyCode::Down, KeyCode::Char('j')] {
        assert_eq!(
            EventHandler::handle_key_event(create_key_event(code), &state),
            Some(AppEvent::FocusNext)
        );
    }
    for code in [KeyCode::BackTab, KeyCode::Up, KeyCode::Char('k')] {
        assert_eq!(
            EventHandler::handle_key_event(create_key_event(code), &state),
            Some(AppEvent::FocusPrevious)
        );
    }
}

#[test]
fn test_subscription_flow_writes_request() {
    let temp_dir = TempDir::new().unwrap();
    let mut state = create_state(Box::new(FileSubmitter::new(temp_dir.path())));

    // Subscription selector: pick the second entry
    press(&mut state, KeyCode::Tab);
    press(&mut state, KeyCode::Right);
    press(&mut state, KeyCode::Right);
    assert_eq!(state.wizard.state().subscription_id, "sub-2");

    // App name: replace the default
    press(&mut state, KeyCode::Tab);
    for _ in 0.."IllumioIntegration".len() {
        press(&mut state, KeyCode::Backspace);
    }
    type_text(&mut state, "SecureLink");
    assert_eq!(state.wizard.state().app_name, "SecureLink");

    press(&mut state, KeyCode::Enter);
    assert_eq!(state.step(), WizardStep::NetworkSettings);

    // First VNet and second storage account
    press(&mut state, KeyCode::Tab);
    press(&mut state, KeyCode::Char(' '));
    for _ in 0..4 {
        press(&mut state, KeyCode::Tab);
    }
    press(&mut state, KeyCode::Char(' '));

    press(&mut state, KeyCode::Enter);
    assert!(state.should_quit);
    let ack = state.receipt.clone().expect("submission should be acknowledged");
    assert!(matches!(state.status, Some(StatusMessage::Info(_))));

    let path = ack.location.expect("file sink reports a location");
    let written: WizardState = serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
    assert_eq!(written.onboarding_type, OnboardingType::Subscription);
    assert_eq!(written.subscription_id, "sub-2");
    assert_eq!(written.app_name, "SecureLink");
    assert!(written.selected_vnets.contains("vnet-1"));
    assert_eq!(written.selected_vnets.len(), 1);
    assert!(written.selected_storage_accounts.contains("sa-2"));
    assert_eq!(written.selected_storage_accounts.len(), 1);
}

#[test]
fn test_tenant_flow_and_back_navigation() {
    let mut state = create_state(Box::new(LogSubmitter::new()));

    press(&mut state, KeyCode::Char(' '));
    assert_eq!(state.wizard.state().onboarding_type, OnboardingType::Tenant);

    press(&mut state, KeyCode::Enter);
    assert_eq!(state.step(), WizardStep::NetworkSettings);

    // Turn flow logs off, go back, come forward again: the choice sticks
    press(&mut state, KeyCode::Char(' '));
    assert!(!state.wizard.state().enable_flow_logs);
    press(&mut state, KeyCode::Esc);
    assert_eq!(state.step(), WizardStep::Onboarding);
    assert!(!state.should_quit);
    press(&mut state, KeyCode::Enter);
    assert!(!state.wizard.state().enable_flow_logs);

    press(&mut state, KeyCode::Enter);
    assert!(state.receipt.is_some());
}

#[test]
fn test_q_is_text_in_app_name() {
    let mut state = create_state(Box::new(LogSubmitter::new()));
    press(&mut state, KeyCode::BackTab);
    press(&mut state, KeyCode::Char('q'));

    assert!(!state.should_quit);
    assert_eq!(state.wizard.state().app_name, "IllumioIntegrationq");
}
