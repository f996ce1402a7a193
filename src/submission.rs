// ABOUTME: Submission ports that receive the finished wizard snapshot
//
// LogSubmitter emits the payload as a structured log event, FileSubmitter writes
// it as JSON, and ValidatingSubmitter checks a snapshot before delegating.

use crate::config::{SinkKind, SubmissionConfig};
use crate::models::{Catalog, CatalogKind, OnboardingType, WizardState};
use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

lazy_static! {
    // Directory (tenant) ids are plain GUIDs
    static ref GUID_RE: Regex =
        Regex::new(r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$").unwrap();
}

/// A single reason a snapshot was refused
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ValidationIssue {
    MissingSubscription,
    UnknownSubscription(String),
    MissingTenantId,
    MalformedTenantId(String),
    MissingAppName,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSubscription => write!(f, "select a subscription"),
            Self::UnknownSubscription(id) => write!(f, "unknown subscription '{id}'"),
            Self::MissingTenantId => write!(f, "tenant ID is required"),
            Self::MalformedTenantId(id) => write!(f, "tenant ID '{id}' is not a GUID"),
            Self::MissingAppName => write!(f, "app registration name is required"),
        }
    }
}

fn join_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Error, Debug)]
pub enum SubmissionError {
    #[error("Invalid onboarding request: {}", join_issues(.0))]
    Invalid(Vec<ValidationIssue>),

    #[error("Failed to serialize onboarding request: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Submission rejected: {0}")]
    Rejected(String),
}

/// Receipt handed back by a submission port
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ack {
    pub submission_id: Uuid,
    pub submitted_at: DateTime<Utc>,
    pub sink: String,
    pub location: Option<PathBuf>,
}

impl Ack {
    fn new(sink: &str, location: Option<PathBuf>) -> Self {
        Self {
            submission_id: Uuid::new_v4(),
            submitted_at: Utc::now(),
            sink: sink.to_string(),
            location,
        }
    }
}

impl fmt::Display for Ack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Submission {} accepted by {} sink", self.submission_id, self.sink)?;
        if let Some(location) = &self.location {
            write!(f, " ({})", location.display())?;
        }
        Ok(())
    }
}

/// Accepts a finished wizard snapshot
#[cfg_attr(test, mockall::automock)]
pub trait SubmissionPort {
    fn submit(&self, snapshot: &WizardState) -> Result<Ack, SubmissionError>;

    /// Short name shown in receipts and logs
    fn name(&self) -> &'static str;
}

/// Emits the payload as a structured log event
#[derive(Debug, Default)]
pub struct LogSubmitter;

impl LogSubmitter {
    pub fn new() -> Self {
        Self
    }
}

impl SubmissionPort for LogSubmitter {
    fn submit(&self, snapshot: &WizardState) -> Result<Ack, SubmissionError> {
        let payload = serde_json::to_string(snapshot)?;
        let ack = Ack::new(self.name(), None);
        info!(
            submission_id = %ack.submission_id,
            payload = %payload,
            "Form submitted"
        );
        Ok(ack)
    }

    fn name(&self) -> &'static str {
        "log"
    }
}

/// Writes each payload to `<output_dir>/onboarding-<id>.json`
#[derive(Debug, Clone)]
pub struct FileSubmitter {
    output_dir: PathBuf,
}

impl FileSubmitter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }
}

impl SubmissionPort for FileSubmitter {
    fn submit(&self, snapshot: &WizardState) -> Result<Ack, SubmissionError> {
        fs::create_dir_all(&self.output_dir)?;

        let mut ack = Ack::new(self.name(), None);
        let path = self
            .output_dir
            .join(format!("onboarding-{}.json", ack.submission_id));
        let content = serde_json::to_string_pretty(snapshot)?;
        fs::write(&path, content)?;

        info!(
            submission_id = %ack.submission_id,
            path = %path.display(),
            "Onboarding request written"
        );
        ack.location = Some(path);
        Ok(ack)
    }

    fn name(&self) -> &'static str {
        "file"
    }
}

/// Check a snapshot against the rules a provisioning backend would enforce
pub fn validate(snapshot: &WizardState, catalog: &Catalog) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    match snapshot.onboarding_type {
        OnboardingType::Subscription => {
            let id = snapshot.subscription_id.as_str();
            if id.trim().is_empty() {
                issues.push(ValidationIssue::MissingSubscription);
            } else if !catalog.contains(CatalogKind::Subscriptions, id) {
                issues.push(ValidationIssue::UnknownSubscription(id.to_string()));
            }
        }
        OnboardingType::Tenant => {
            let id = snapshot.tenant_id.as_str();
            if id.trim().is_empty() {
                issues.push(ValidationIssue::MissingTenantId);
            } else if !GUID_RE.is_match(id) {
                issues.push(ValidationIssue::MalformedTenantId(id.to_string()));
            }
        }
    }

    if snapshot.app_name.trim().is_empty() {
        issues.push(ValidationIssue::MissingAppName);
    }

    issues
}

/// Refuses invalid snapshots, hands valid ones to the wrapped port
pub struct ValidatingSubmitter {
    inner: Box<dyn SubmissionPort>,
    catalog: Catalog,
}

impl ValidatingSubmitter {
    pub fn new(inner: Box<dyn SubmissionPort>, catalog: Catalog) -> Self {
        Self { inner, catalog }
    }
}

impl SubmissionPort for ValidatingSubmitter {
    fn submit(&self, snapshot: &WizardState) -> Result<Ack, SubmissionError> {
        let issues = validate(snapshot, &self.catalog);
        if !issues.is_empty() {
            warn!("Onboarding request refused: {}", join_issues(&issues));
            return Err(SubmissionError::Invalid(issues));
        }
        self.inner.submit(snapshot)
    }

    fn name(&self) -> &'static str {
        self.inner.name()
    }
}

/// Submission port selected by configuration
pub fn port_for(config: &SubmissionConfig, catalog: &Catalog) -> anyhow::Result<Box<dyn SubmissionPort>> {
    let port: Box<dyn SubmissionPort> = match config.sink {
        SinkKind::Log => Box::new(LogSubmitter::new()),
        SinkKind::File => Box::new(FileSubmitter::new(config.resolved_output_dir()?)),
    };

    if config.validate {
        Ok(Box::new(ValidatingSubmitter::new(port, catalog.clone())))
    } else {
        Ok(port)
    }
}
