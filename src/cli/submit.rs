// ABOUTME: CLI submit command - fill in the wizard from flags and submit without the TUI
//
// Walks the same operations the interactive wizard uses: field updates on the
// first step, membership toggles on the network step, then submission.

use super::{OutputFormat, SubmitArgs};
use crate::app::build_wizard;
use crate::components::onboarding::OnboardingWizard;
use crate::config::AppConfig;
use crate::models::{FieldUpdate, MultiSelect, OnboardingType};
use anyhow::{bail, Result};
use serde_json::json;
use tracing::info;

/// Execute the submit command
pub fn execute(args: SubmitArgs, config: &AppConfig, format: OutputFormat) -> Result<()> {
    let (mut wizard, submitter) = build_wizard(config)?;
    fill_wizard(&mut wizard, &args)?;

    let snapshot = wizard.snapshot();
    let ack = submitter.submit(&snapshot)?;
    info!("Headless submission accepted: {}", ack);

    match format {
        OutputFormat::Json => {
            let out = json!({ "ack": ack, "request": snapshot });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Text => println!("{ack}"),
    }
    Ok(())
}

/// Apply the flags to a wizard and leave it on the final step
pub fn fill_wizard(wizard: &mut OnboardingWizard, args: &SubmitArgs) -> Result<()> {
    if args.tenant {
        wizard.set_field(FieldUpdate::OnboardingType(OnboardingType::Tenant));
    } else if args.subscription.is_some() {
        wizard.set_field(FieldUpdate::OnboardingType(OnboardingType::Subscription));
    }
    if let Some(subscription) = &args.subscription {
        wizard.set_field(FieldUpdate::SubscriptionId(subscription.clone()));
    }
    if let Some(tenant_id) = &args.tenant_id {
        wizard.set_field(FieldUpdate::TenantId(tenant_id.clone()));
    }
    if let Some(app_name) = &args.app_name {
        wizard.set_field(FieldUpdate::AppName(app_name.clone()));
    }

    wizard.advance();

    if args.no_flow_logs {
        wizard.set_field(FieldUpdate::EnableFlowLogs(false));
    }
    for id in &args.vnets {
        if !wizard.toggle_membership(MultiSelect::VirtualNetworks, id, true) {
            bail!("Unknown virtual network '{id}'");
        }
    }
    for id in &args.storage_accounts {
        if !wizard.toggle_membership(MultiSelect::StorageAccounts, id, true) {
            bail!("Unknown storage account '{id}'");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{load_catalog, StaticCatalog};
    use crate::models::WizardState;
    use pretty_assertions::assert_eq;

    fn wizard() -> OnboardingWizard {
        OnboardingWizard::new(load_catalog(&StaticCatalog::sample()).unwrap())
    }

    #[test]
    fn test_fill_subscription_request() {
        let mut wizard = wizard();
        let args = SubmitArgs {
            subscription: Some("sub-2".to_string()),
            vnets: vec!["vnet-1".to_string(), "vnet-3".to_string()],
            storage_accounts: vec!["sa-2".to_string()],
            ..SubmitArgs::default()
        };
        fill_wizard(&mut wizard, &args).unwrap();

        assert!(wizard.is_final_step());
        let mut expected = WizardState::new();
        expected.subscription_id = "sub-2".to_string();
        expected.selected_vnets = ["vnet-1", "vnet-3"].iter().map(ToString::to_string).collect();
        expected.selected_storage_accounts = std::iter::once("sa-2".to_string()).collect();
        assert_eq!(wizard.snapshot(), expected);
    }

    #[test]
    fn test_fill_tenant_request() {
        let mut wizard = wizard();
        let args = SubmitArgs {
            tenant: true,
            tenant_id: Some("00000000-0000-0000-0000-000000000001".to_string()),
            no_flow_logs: true,
            ..SubmitArgs::default()
        };
        fill_wizard(&mut wizard, &args).unwrap();

        let snapshot = wizard.snapshot();
        assert_eq!(snapshot.onboarding_type, OnboardingType::Tenant);
        assert_eq!(snapshot.tenant_id, "00000000-0000-0000-0000-000000000001");
        assert!(!snapshot.enable_flow_logs);
    }

    #[test]
    fn test_fill_rejects_unknown_vnet() {
        let mut wizard = wizard();
        let args = SubmitArgs {
            vnets: vec!["vnet-42".to_string()],
            ..SubmitArgs::default()
        };
        let err = fill_wizard(&mut wizard, &args).unwrap_err();
        assert_eq!(err.to_string(), "Unknown virtual network 'vnet-42'");
    }
}
