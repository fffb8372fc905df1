use super::{CheckKind, CheckResult};
use crate::client::ProbeClient;
use crate::types::ProbeRequest;
use tracing::info;

pub const DEFAULT_ADMIN_PAGES: [&str; 4] = ["/admin", "/administrator", "/wp-admin", "/phpmyadmin"];

const DIRECTORY_INDEX_MARKER: &str = "<title>Index of";

pub async fn run(client: &ProbeClient) -> CheckResult {
    info!("Testing security misconfiguration");
    let mut result = CheckResult::new(CheckKind::SecurityMisconfiguration);

    if let Some(resp) = client.send(ProbeRequest::get("/health")).await {
        if resp.is_success() && resp.body.to_lowercase().contains("debug") {
            result.fail("Debug mode appears to be enabled");
        }
    }

    for page in DEFAULT_ADMIN_PAGES {
        if let Some(resp) = client.send(ProbeRequest::get(page)).await {
            if resp.is(200) {
                result.fail(format!("Default admin page accessible: {}", page));
            }
        }
    }

    if let Some(resp) = client.send(ProbeRequest::get("/uploads/")).await {
        if resp.is(200) && resp.body_contains(DIRECTORY_INDEX_MARKER) {
            result.fail("Directory listing enabled");
        }
    }

    result
}
