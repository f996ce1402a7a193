// ABOUTME: End-to-end tests wiring config, catalog file and submission sinks together

use cloud_onboard::app::{build_wizard, App, StatusMessage};
use cloud_onboard::cli::submit::fill_wizard;
use cloud_onboard::cli::SubmitArgs;
use cloud_onboard::config::AppConfig;
use cloud_onboard::models::{FieldUpdate, MultiSelect, WizardState};
use cloud_onboard::submission::SubmissionPort;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const CATALOG: &str = r#"
[[subscriptions]]
id = "sub-a"
name = "Analytics"

[[virtual_networks]]
id = "vnet-a"
name = "vnet-analytics"

[[storage_accounts]]
id = "sa-a"
name = "analyticslogs"
"#;

fn write_config(dir: &Path, validate: bool) -> AppConfig {
    fs::write(dir.join("catalog.toml"), CATALOG).unwrap();
    let config_path = dir.join("config.toml");
    fs::write(
        &config_path,
        format!(
            r#"
[catalog]
path = "{catalog}"

[submission]
sink = "file"
output_dir = "{out}"
validate = {validate}
"#,
            catalog = dir.join("catalog.toml").display(),
            out = dir.join("out").display(),
        ),
    )
    .unwrap();
    AppConfig::load_from(&config_path).unwrap()
}

#[test]
fn test_file_catalog_feeds_wizard() {
    let temp_dir = TempDir::new().unwrap();
    let config = write_config(temp_dir.path(), false);

    let (mut wizard, _submitter) = build_wizard(&config).unwrap();
    assert_eq!(wizard.catalog().subscriptions.len(), 1);

    wizard.advance();
    assert!(wizard.toggle_membership(MultiSelect::VirtualNetworks, "vnet-a", true));
    // Sample ids are not part of a file-backed catalog
    assert!(!wizard.toggle_membership(MultiSelect::VirtualNetworks, "vnet-1", true));
}

#[test]
fn test_validation_refuses_missing_subscription() {
    let temp_dir = TempDir::new().unwrap();
    let config = write_config(temp_dir.path(), true);

    let mut app = App::from_config(&config).unwrap();
    app.state.next_step();
    app.state.submit();

    assert!(app.state.receipt.is_none());
    assert_eq!(
        app.state.status,
        Some(StatusMessage::Error(
            "Invalid onboarding request: select a subscription".to_string()
        ))
    );
    assert!(!temp_dir.path().join("out").exists());
}

#[test]
fn test_headless_fill_submits_to_file_sink() {
    let temp_dir = TempDir::new().unwrap();
    let config = write_config(temp_dir.path(), true);

    let (mut wizard, submitter) = build_wizard(&config).unwrap();
    let args = SubmitArgs {
        subscription: Some("sub-a".to_string()),
        vnets: vec!["vnet-a".to_string()],
        storage_accounts: vec!["sa-a".to_string()],
        ..SubmitArgs::default()
    };
    fill_wizard(&mut wizard, &args).unwrap();

    let ack = submitter.submit(&wizard.snapshot()).unwrap();
    assert_eq!(ack.sink, "file");
    let path = ack.location.unwrap();
    assert!(path.starts_with(temp_dir.path().join("out")));

    let written: WizardState = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
    assert_eq!(written, wizard.snapshot());
}

#[test]
fn test_stale_vnets_survive_flow_log_toggle() {
    let temp_dir = TempDir::new().unwrap();
    let config = write_config(temp_dir.path(), false);

    let (mut wizard, _submitter) = build_wizard(&config).unwrap();
    wizard.advance();
    wizard.toggle_membership(MultiSelect::VirtualNetworks, "vnet-a", true);
    wizard.set_field(FieldUpdate::EnableFlowLogs(false));

    let snapshot = wizard.snapshot();
    assert!(!snapshot.enable_flow_logs);
    assert!(snapshot.selected_vnets.contains("vnet-a"));
}

#[test]
fn test_relative_catalog_path_loads_next_to_config() {
    let temp_dir = TempDir::new().unwrap();
    let config_dir = temp_dir.path().join("config");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("catalog.toml"), CATALOG).unwrap();
    let config_path = config_dir.join("config.toml");
    fs::write(&config_path, "[catalog]\npath = \"catalog.toml\"\n").unwrap();

    let config = AppConfig::load_from(&config_path).unwrap();
    let (wizard, _submitter) = build_wizard(&config).unwrap();
    assert_eq!(wizard.catalog().subscriptions[0].id, "sub-a");
}
