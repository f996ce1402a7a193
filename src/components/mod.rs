// ABOUTME: UI components for the TUI interface

pub mod onboarding;

pub use onboarding::OnboardingComponent;
