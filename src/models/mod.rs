// ABOUTME: Core data models for the onboarding wizard: form record and catalogs

pub mod catalog;
pub mod wizard;

pub use catalog::{Catalog, CatalogItem, CatalogKind};
pub use wizard::{
    DEFAULT_APP_NAME, DEFAULT_TENANT_ID, Field, FieldUpdate, MultiSelect, OnboardingType,
    WizardState,
};
