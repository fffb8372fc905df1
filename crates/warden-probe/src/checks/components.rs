use super::{CheckKind, CheckResult};
use crate::client::ProbeClient;
use crate::types::ProbeRequest;
use tracing::info;

pub const SERVER_PRODUCTS: [&str; 3] = ["Apache", "nginx", "IIS"];

pub async fn run(client: &ProbeClient) -> CheckResult {
    info!("Testing components with known vulnerabilities");
    let mut result = CheckResult::new(CheckKind::KnownVulnerabilities);

    let health = client.send(ProbeRequest::get("/health")).await;
    if let Some(resp) = health.filter(|r| r.is_success()) {
        for (name, value) in resp.headers.iter() {
            // Banners may carry obs-text bytes, which to_str() rejects
            let value = String::from_utf8_lossy(value.as_bytes());
            if SERVER_PRODUCTS.iter().any(|p| value.contains(p)) {
                result.fail(format!("Server version exposed: {}: {}", name, value));
            }
        }
    }

    result
}
