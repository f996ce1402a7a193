// ABOUTME: State management for the onboarding wizard
// Tracks the current step, the form record, and which fields each step shows

use crate::models::{Catalog, CatalogKind, Field, FieldUpdate, MultiSelect, WizardState};
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// Steps in the onboarding wizard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WizardStep {
    #[default]
    Onboarding,
    NetworkSettings,
}

impl WizardStep {
    /// Get all steps in order
    pub fn all() -> &'static [WizardStep] {
        &[Self::Onboarding, Self::NetworkSettings]
    }

    /// Zero-based position of this step
    pub fn index(&self) -> usize {
        match self {
            Self::Onboarding => 0,
            Self::NetworkSettings => 1,
        }
    }

    /// Step at `index`, clamped into the valid range
    pub fn from_index(index: usize) -> Self {
        let all = Self::all();
        all[index.min(all.len() - 1)]
    }

    /// Index of the last step
    pub fn max_index() -> usize {
        Self::all().len() - 1
    }

    /// Get display title for this step
    pub fn title(&self) -> &'static str {
        match self {
            Self::Onboarding => "Illumio Onboarding",
            Self::NetworkSettings => "Network Settings",
        }
    }

    pub fn is_final(&self) -> bool {
        self.index() == Self::max_index()
    }
}

/// Fields shown on `step` for the given form values, in display order
pub fn visible_fields(state: &WizardState, step: WizardStep) -> Vec<Field> {
    use crate::models::OnboardingType;

    match step {
        WizardStep::Onboarding => {
            let mut fields = vec![Field::OnboardingType];
            match state.onboarding_type {
                OnboardingType::Subscription => fields.push(Field::SubscriptionId),
                OnboardingType::Tenant => fields.push(Field::TenantId),
            }
            fields.push(Field::AppName);
            fields
        }
        WizardStep::NetworkSettings => {
            let mut fields = vec![Field::EnableFlowLogs];
            if state.enable_flow_logs {
                fields.push(Field::SelectedVNets);
            }
            fields.push(Field::SelectedStorageAccounts);
            fields
        }
    }
}

/// Something the keyboard focus can rest on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    /// A single-valued control
    Field(Field),
    /// One row of a multi-select list (index into the catalog list)
    Item(MultiSelect, usize),
}

/// Focusable targets for the visible fields, multi-selects expanded per catalog row
pub fn focus_targets(state: &WizardState, step: WizardStep, catalog: &Catalog) -> Vec<FocusTarget> {
    let mut targets = Vec::new();
    for field in visible_fields(state, step) {
        match field {
            Field::SelectedVNets => {
                let rows = catalog.items(CatalogKind::VirtualNetworks).len();
                targets.extend((0..rows).map(|i| FocusTarget::Item(MultiSelect::VirtualNetworks, i)));
            }
            Field::SelectedStorageAccounts => {
                let rows = catalog.items(CatalogKind::StorageAccounts).len();
                targets.extend((0..rows).map(|i| FocusTarget::Item(MultiSelect::StorageAccounts, i)));
            }
            other => targets.push(FocusTarget::Field(other)),
        }
    }
    targets
}

fn catalog_kind(collection: MultiSelect) -> CatalogKind {
    match collection {
        MultiSelect::VirtualNetworks => CatalogKind::VirtualNetworks,
        MultiSelect::StorageAccounts => CatalogKind::StorageAccounts,
    }
}

/// Full onboarding wizard state: current step, form values and the catalog they select from
#[derive(Debug, Clone)]
pub struct OnboardingWizard {
    step: WizardStep,
    state: WizardState,
    catalog: Catalog,
}

impl OnboardingWizard {
    pub fn new(catalog: Catalog) -> Self {
        Self::with_state(WizardState::new(), catalog)
    }

    /// Start from pre-filled form values (configured defaults)
    pub fn with_state(state: WizardState, catalog: Catalog) -> Self {
        Self {
            step: WizardStep::Onboarding,
            state,
            catalog,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Copy of the form values as they are right now
    pub fn snapshot(&self) -> WizardState {
        self.state.clone()
    }

    /// Move to the next step, stopping at the last one
    pub fn advance(&mut self) -> bool {
        let next = WizardStep::from_index(self.step.index() + 1);
        self.move_to(next)
    }

    /// Move to the previous step, stopping at the first one
    pub fn retreat(&mut self) -> bool {
        let prev = WizardStep::from_index(self.step.index().saturating_sub(1));
        self.move_to(prev)
    }

    fn move_to(&mut self, step: WizardStep) -> bool {
        if step == self.step {
            return false;
        }
        debug!("Wizard step {:?} -> {:?}", self.step, step);
        self.step = step;
        true
    }

    /// Replace one field's value; every control routes through here
    pub fn set_field(&mut self, update: FieldUpdate) {
        debug!("Setting field {:?}", update.field());
        self.state.apply(update);
    }

    /// Add (`included`) or remove `id` from a multi-select
    ///
    /// Ids that are not in the matching catalog are ignored and `false` is
    /// returned. Adding a present id or removing an absent one changes nothing.
    pub fn toggle_membership(&mut self, collection: MultiSelect, id: &str, included: bool) -> bool {
        if !self.catalog.contains(catalog_kind(collection), id) {
            warn!("Ignoring unknown {:?} id '{}'", collection, id);
            return false;
        }

        let mut selection: BTreeSet<String> = self.state.selection(collection).clone();
        if included {
            selection.insert(id.to_string());
        } else {
            selection.remove(id);
        }

        let update = match collection {
            MultiSelect::VirtualNetworks => FieldUpdate::SelectedVNets(selection),
            MultiSelect::StorageAccounts => FieldUpdate::SelectedStorageAccounts(selection),
        };
        self.set_field(update);
        true
    }

    /// Flip membership of the catalog row at `index`
    pub fn toggle_item(&mut self, collection: MultiSelect, index: usize) -> bool {
        let Some(id) = self
            .catalog
            .items(catalog_kind(collection))
            .get(index)
            .map(|item| item.id.clone())
        else {
            return false;
        };
        let included = !self.state.selection(collection).contains(&id);
        self.toggle_membership(collection, &id, included)
    }

    /// Step through "no selection" followed by each catalog subscription
    pub fn cycle_subscription(&mut self, forward: bool) {
        let mut options: Vec<String> = vec![String::new()];
        options.extend(
            self.catalog
                .items(CatalogKind::Subscriptions)
                .iter()
                .map(|item| item.id.clone()),
        );

        let current = options
            .iter()
            .position(|id| *id == self.state.subscription_id)
            .unwrap_or(0);
        let len = options.len();
        let next = if forward {
            (current + 1) % len
        } else {
            (current + len - 1) % len
        };
        self.set_field(FieldUpdate::SubscriptionId(options.swap_remove(next)));
    }

    pub fn visible_fields(&self) -> Vec<Field> {
        visible_fields(&self.state, self.step)
    }

    pub fn focus_targets(&self) -> Vec<FocusTarget> {
        focus_targets(&self.state, self.step, &self.catalog)
    }

    /// Check if we're on the final step
    pub fn is_final_step(&self) -> bool {
        self.step.is_final()
    }

    /// Check if we can go back
    pub fn can_go_back(&self) -> bool {
        self.step.index() > 0
    }
}
