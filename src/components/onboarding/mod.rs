// ABOUTME: Onboarding wizard module for configuring the cloud security integration
// Two steps: scope selection (subscription or tenant) and network settings

pub mod component;
pub mod state;

pub use component::OnboardingComponent;
pub use state::{focus_targets, visible_fields, FocusTarget, OnboardingWizard, WizardStep};
