use crate::checks::{CheckKind, CheckResult};
use crate::client::ProbeClient;
use crate::config::ProbeConfig;
use crate::error::{ProbeError, Result};
use crate::report::Report;
use futures_util::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use tracing::{error, info};

/// Runs the checks one after another against a single target
pub struct ProbeRunner {
    client: ProbeClient,
    checks: Vec<CheckKind>,
}

impl ProbeRunner {
    /// Runner for the full battery in its fixed order
    pub fn new(client: ProbeClient) -> Self {
        Self::with_checks(client, CheckKind::ALL.to_vec())
    }

    /// Runner for a subset of checks, run in the given order
    pub fn with_checks(client: ProbeClient, checks: Vec<CheckKind>) -> Self {
        Self { client, checks }
    }

    pub fn client(&self) -> &ProbeClient {
        &self.client
    }

    /// Run a single check, catching a panic inside it
    pub async fn run_check(&self, kind: CheckKind) -> Result<CheckResult> {
        AssertUnwindSafe(kind.run(&self.client))
            .catch_unwind()
            .await
            .map_err(|panic| ProbeError::check_panicked(kind.name(), panic_message(panic)))
    }

    /// Run every configured check. Checks that abort are logged and left out.
    pub async fn run_all(&self) -> Vec<CheckResult> {
        info!(
            "Starting OWASP security tests against {}",
            self.client.config().base_url()
        );

        let mut results = Vec::with_capacity(self.checks.len());
        for kind in &self.checks {
            match self.run_check(*kind).await {
                Ok(result) => {
                    info!(
                        "✓ {}: {}",
                        result.name(),
                        if result.passed() { "PASSED" } else { "FAILED" }
                    );
                    results.push(result);
                }
                Err(e) => error!("Test failed: {}", e),
            }
        }

        results
    }

    /// Run everything and wrap the results in a report
    pub async fn report(&self) -> Report {
        Report::new(self.run_all().await)
    }
}

/// Build the HTTP client for `config` and run the full battery against it.
///
/// A client that cannot be built is logged and yields an empty report, so a
/// caller always gets something to print and save.
pub async fn run_target(config: ProbeConfig) -> Report {
    match ProbeClient::http(config) {
        Ok(client) => ProbeRunner::new(client).report().await,
        Err(e) => {
            error!("Could not set up the HTTP client: {}", e);
            Report::new(Vec::new())
        }
    }
}

fn panic_message(panic: Box<dyn Any + Send>) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
