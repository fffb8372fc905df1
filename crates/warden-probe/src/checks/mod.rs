//! The ten OWASP checks.
//!
//! Each check is a free function taking the shared `ProbeClient` and
//! returning a `CheckResult`. Checks never fail as a whole: a missing
//! response or an undecodable body just means that particular heuristic
//! did not fire.

pub mod access_control;
pub mod authentication;
pub mod components;
pub mod csrf;
pub mod injection;
pub mod logging;
pub mod misconfiguration;
pub mod sensitive_data;
pub mod xss;
pub mod xxe;

use crate::client::ProbeClient;
use serde::Serialize;

/// Identifies one of the checks, in run order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckKind {
    Injection,
    BrokenAuthentication,
    SensitiveDataExposure,
    XmlExternalEntities,
    BrokenAccessControl,
    SecurityMisconfiguration,
    Xss,
    Csrf,
    KnownVulnerabilities,
    LoggingMonitoring,
}

impl CheckKind {
    /// Every check in the order they run and are reported
    pub const ALL: [CheckKind; 10] = [
        CheckKind::Injection,
        CheckKind::BrokenAuthentication,
        CheckKind::SensitiveDataExposure,
        CheckKind::XmlExternalEntities,
        CheckKind::BrokenAccessControl,
        CheckKind::SecurityMisconfiguration,
        CheckKind::Xss,
        CheckKind::Csrf,
        CheckKind::KnownVulnerabilities,
        CheckKind::LoggingMonitoring,
    ];

    /// Name used in logs and the report
    pub fn name(&self) -> &'static str {
        match self {
            CheckKind::Injection => "Injection Attacks",
            CheckKind::BrokenAuthentication => "Broken Authentication",
            CheckKind::SensitiveDataExposure => "Sensitive Data Exposure",
            CheckKind::XmlExternalEntities => "XML External Entities",
            CheckKind::BrokenAccessControl => "Broken Access Control",
            CheckKind::SecurityMisconfiguration => "Security Misconfiguration",
            CheckKind::Xss => "XSS Attacks",
            CheckKind::Csrf => "CSRF Protection",
            CheckKind::KnownVulnerabilities => "Known Vulnerabilities",
            CheckKind::LoggingMonitoring => "Logging & Monitoring",
        }
    }

    pub async fn run(self, client: &ProbeClient) -> CheckResult {
        match self {
            CheckKind::Injection => injection::run(client).await,
            CheckKind::BrokenAuthentication => authentication::run(client).await,
            CheckKind::SensitiveDataExposure => sensitive_data::run(client).await,
            CheckKind::XmlExternalEntities => xxe::run(client).await,
            CheckKind::BrokenAccessControl => access_control::run(client).await,
            CheckKind::SecurityMisconfiguration => misconfiguration::run(client).await,
            CheckKind::Xss => xss::run(client).await,
            CheckKind::Csrf => csrf::run(client).await,
            CheckKind::KnownVulnerabilities => components::run(client).await,
            CheckKind::LoggingMonitoring => logging::run(client).await,
        }
    }
}

impl std::fmt::Display for CheckKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Verdict of a single check
///
/// Only `fail` can clear `passed`, and it always records an issue with it,
/// so `passed` is true exactly when `issues` is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    name: String,
    passed: bool,
    issues: Vec<String>,
}

impl CheckResult {
    pub fn new(kind: CheckKind) -> Self {
        Self {
            name: kind.name().to_string(),
            passed: true,
            issues: Vec::new(),
        }
    }

    /// Record an observed violation
    pub fn fail(&mut self, issue: impl Into<String>) {
        self.issues.push(issue.into());
        self.passed = false;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn passed(&self) -> bool {
        self.passed
    }

    pub fn issues(&self) -> &[String] {
        &self.issues
    }
}
