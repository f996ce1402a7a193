// ABOUTME: Wizard form record holding every onboarding field
// Fields are replaced one at a time through FieldUpdate; nothing here validates

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Tenant id pre-filled into a fresh wizard
pub const DEFAULT_TENANT_ID: &str = "72f988bf-86f1-41af-91ab-2d7cd011db47";

/// App registration name pre-filled into a fresh wizard
pub const DEFAULT_APP_NAME: &str = "IllumioIntegration";

/// Scope of the integration: one subscription or a whole tenant
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OnboardingType {
    #[default]
    Subscription,
    Tenant,
}

impl OnboardingType {
    pub fn all() -> &'static [OnboardingType] {
        &[Self::Subscription, Self::Tenant]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Subscription => "Subscription",
            Self::Tenant => "Tenant",
        }
    }

    /// The other option of the radio group
    pub fn toggled(&self) -> Self {
        match self {
            Self::Subscription => Self::Tenant,
            Self::Tenant => Self::Subscription,
        }
    }
}

impl fmt::Display for OnboardingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Subscription => write!(f, "subscription"),
            Self::Tenant => write!(f, "tenant"),
        }
    }
}

impl FromStr for OnboardingType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "subscription" => Ok(Self::Subscription),
            "tenant" => Ok(Self::Tenant),
            other => Err(format!("unknown onboarding type: {other}")),
        }
    }
}

/// Names every field of [`WizardState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    OnboardingType,
    SubscriptionId,
    TenantId,
    AppName,
    EnableFlowLogs,
    SelectedVNets,
    SelectedStorageAccounts,
}

impl Field {
    pub fn label(&self) -> &'static str {
        match self {
            Self::OnboardingType => "Onboarding Type",
            Self::SubscriptionId => "Select Subscription",
            Self::TenantId => "Tenant ID",
            Self::AppName => "App Registration Name",
            Self::EnableFlowLogs => "Enable Flow Logs",
            Self::SelectedVNets => "Select VNets for Flow Logs",
            Self::SelectedStorageAccounts => "Select Storage Accounts",
        }
    }

    /// Free-text fields accept typed characters
    pub fn is_text(&self) -> bool {
        matches!(self, Self::TenantId | Self::AppName)
    }
}

/// The two multi-select collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MultiSelect {
    VirtualNetworks,
    StorageAccounts,
}

/// A replacement value for exactly one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    OnboardingType(OnboardingType),
    SubscriptionId(String),
    TenantId(String),
    AppName(String),
    EnableFlowLogs(bool),
    SelectedVNets(BTreeSet<String>),
    SelectedStorageAccounts(BTreeSet<String>),
}

impl FieldUpdate {
    pub fn field(&self) -> Field {
        match self {
            Self::OnboardingType(_) => Field::OnboardingType,
            Self::SubscriptionId(_) => Field::SubscriptionId,
            Self::TenantId(_) => Field::TenantId,
            Self::AppName(_) => Field::AppName,
            Self::EnableFlowLogs(_) => Field::EnableFlowLogs,
            Self::SelectedVNets(_) => Field::SelectedVNets,
            Self::SelectedStorageAccounts(_) => Field::SelectedStorageAccounts,
        }
    }

    /// Build a text update for a text field, `None` for any other field
    pub fn text(field: Field, value: String) -> Option<Self> {
        match field {
            Field::SubscriptionId => Some(Self::SubscriptionId(value)),
            Field::TenantId => Some(Self::TenantId(value)),
            Field::AppName => Some(Self::AppName(value)),
            _ => None,
        }
    }
}

/// Flat record of all onboarding form values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardState {
    pub onboarding_type: OnboardingType,
    pub subscription_id: String,
    pub tenant_id: String,
    pub app_name: String,
    pub enable_flow_logs: bool,
    #[serde(rename = "selectedVNets")]
    pub selected_vnets: BTreeSet<String>,
    pub selected_storage_accounts: BTreeSet<String>,
}

impl WizardState {
    pub fn new() -> Self {
        Self {
            onboarding_type: OnboardingType::Subscription,
            subscription_id: String::new(),
            tenant_id: DEFAULT_TENANT_ID.to_string(),
            app_name: DEFAULT_APP_NAME.to_string(),
            enable_flow_logs: true,
            selected_vnets: BTreeSet::new(),
            selected_storage_accounts: BTreeSet::new(),
        }
    }

    /// Replace a single field, leaving the rest untouched
    pub fn apply(&mut self, update: FieldUpdate) {
        match update {
            FieldUpdate::OnboardingType(v) => self.onboarding_type = v,
            FieldUpdate::SubscriptionId(v) => self.subscription_id = v,
            FieldUpdate::TenantId(v) => self.tenant_id = v,
            FieldUpdate::AppName(v) => self.app_name = v,
            FieldUpdate::EnableFlowLogs(v) => self.enable_flow_logs = v,
            FieldUpdate::SelectedVNets(v) => self.selected_vnets = v,
            FieldUpdate::SelectedStorageAccounts(v) => self.selected_storage_accounts = v,
        }
    }

    /// Current value of a text field
    pub fn text(&self, field: Field) -> Option<&str> {
        match field {
            Field::SubscriptionId => Some(&self.subscription_id),
            Field::TenantId => Some(&self.tenant_id),
            Field::AppName => Some(&self.app_name),
            _ => None,
        }
    }

    pub fn selection(&self, collection: MultiSelect) -> &BTreeSet<String> {
        match collection {
            MultiSelect::VirtualNetworks => &self.selected_vnets,
            MultiSelect::StorageAccounts => &self.selected_storage_accounts,
        }
    }
}

impl Default for WizardState {
    fn default() -> Self {
        Self::new()
    }
}
