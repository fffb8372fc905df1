use super::{CheckKind, CheckResult};
use crate::client::ProbeClient;
use crate::types::ProbeRequest;
use tracing::info;

pub async fn run(client: &ProbeClient) -> CheckResult {
    info!("Testing logging and monitoring");
    let mut result = CheckResult::new(CheckKind::LoggingMonitoring);

    let endpoints = [
        ("/api/audit-logs", "Audit logs endpoint not found"),
        ("/api/security-events", "Security events endpoint not found"),
    ];
    for (path, issue) in endpoints {
        if let Some(resp) = client.send(ProbeRequest::get(path)).await {
            if resp.is(404) {
                result.fail(issue);
            }
        }
    }

    result
}
