// ABOUTME: Configuration management for cloud-onboard
// Handles wizard defaults, the catalog source and the submission sink

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::{OnboardingType, WizardState, DEFAULT_APP_NAME, DEFAULT_TENANT_ID};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Values a fresh wizard starts with
    #[serde(default)]
    pub defaults: WizardDefaults,

    /// Where the selectable items come from
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Where finished requests go
    #[serde(default)]
    pub submission: SubmissionConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardDefaults {
    #[serde(default)]
    pub onboarding_type: OnboardingType,

    #[serde(default = "default_tenant_id")]
    pub tenant_id: String,

    #[serde(default = "default_app_name")]
    pub app_name: String,

    #[serde(default = "default_true")]
    pub enable_flow_logs: bool,
}

impl Default for WizardDefaults {
    fn default() -> Self {
        Self {
            onboarding_type: OnboardingType::default(),
            tenant_id: default_tenant_id(),
            app_name: default_app_name(),
            enable_flow_logs: default_true(),
        }
    }
}

impl WizardDefaults {
    /// Initial form record built from these defaults
    pub fn initial_state(&self) -> WizardState {
        WizardState {
            onboarding_type: self.onboarding_type,
            tenant_id: self.tenant_id.clone(),
            app_name: self.app_name.clone(),
            enable_flow_logs: self.enable_flow_logs,
            ..WizardState::new()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// TOML catalog file; the built-in sample catalog is used when unset
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    /// Structured log event only
    #[default]
    Log,
    /// JSON file per request
    File,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionConfig {
    #[serde(default)]
    pub sink: SinkKind,

    /// Directory for the file sink (default: ~/.cloud-onboard/requests)
    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    /// Refuse incomplete requests before they reach the sink
    #[serde(default)]
    pub validate: bool,
}

impl SubmissionConfig {
    pub fn resolved_output_dir(&self) -> Result<PathBuf> {
        match &self.output_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(base_dir()?.join("requests")),
        }
    }
}

fn default_tenant_id() -> String {
    DEFAULT_TENANT_ID.to_string()
}

fn default_app_name() -> String {
    DEFAULT_APP_NAME.to_string()
}

fn default_true() -> bool {
    true
}

/// Base directory for logs, requests and user config
pub fn base_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".cloud-onboard"))
}

impl AppConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        let mut config = Self::default();

        // Lowest precedence first so later files win
        for path in Self::get_config_paths().into_iter().rev() {
            if path.exists() {
                let file_config = Self::read(&path)?;
                config.merge(file_config);
            }
        }

        Ok(config)
    }

    /// Load a single explicit config file over the defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = Self::default();
        config.merge(Self::read(path)?);
        Ok(config)
    }

    fn read(path: &Path) -> Result<ConfigLayer> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        let mut layer: ConfigLayer = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        if let Some(dir) = path.parent() {
            layer.resolve_paths(dir);
        }
        tracing::debug!("Loaded config from {}", path.display());
        Ok(layer)
    }

    /// Get configuration file paths in order of precedence
    fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![];

        // 1. Local project config
        if let Ok(cwd) = std::env::current_dir() {
            paths.push(cwd.join(".cloud-onboard").join("config.toml"));
        }

        // 2. User config (~/.cloud-onboard/config/config.toml)
        if let Ok(base) = base_dir() {
            paths.push(base.join("config").join("config.toml"));
        }

        // 3. System config
        paths.push(PathBuf::from("/etc/cloud-onboard/config.toml"));

        paths
    }

    /// Overlay every value a config file sets
    fn merge(&mut self, layer: ConfigLayer) {
        let ConfigLayer {
            defaults,
            catalog,
            submission,
        } = layer;

        if let Some(onboarding_type) = defaults.onboarding_type {
            self.defaults.onboarding_type = onboarding_type;
        }
        if let Some(tenant_id) = defaults.tenant_id {
            self.defaults.tenant_id = tenant_id;
        }
        if let Some(app_name) = defaults.app_name {
            self.defaults.app_name = app_name;
        }
        if let Some(enable_flow_logs) = defaults.enable_flow_logs {
            self.defaults.enable_flow_logs = enable_flow_logs;
        }

        if catalog.path.is_some() {
            self.catalog.path = catalog.path;
        }

        if let Some(sink) = submission.sink {
            self.submission.sink = sink;
        }
        if submission.output_dir.is_some() {
            self.submission.output_dir = submission.output_dir;
        }
        if let Some(validate) = submission.validate {
            self.submission.validate = validate;
        }
    }
}

/// One config file as written; keys it leaves out stay `None`
#[derive(Debug, Default, Deserialize)]
struct ConfigLayer {
    #[serde(default)]
    defaults: DefaultsLayer,
    #[serde(default)]
    catalog: CatalogConfig,
    #[serde(default)]
    submission: SubmissionLayer,
}

#[derive(Debug, Default, Deserialize)]
struct DefaultsLayer {
    onboarding_type: Option<OnboardingType>,
    tenant_id: Option<String>,
    app_name: Option<String>,
    enable_flow_logs: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
struct SubmissionLayer {
    sink: Option<SinkKind>,
    output_dir: Option<PathBuf>,
    validate: Option<bool>,
}

impl ConfigLayer {
    /// Relative paths are relative to the directory holding the config file
    fn resolve_paths(&mut self, dir: &Path) {
        for path in [&mut self.catalog.path, &mut self.submission.output_dir]
            .into_iter()
            .flatten()
        {
            if path.is_relative() {
                *path = dir.join(&*path);
            }
        }
    }
}
