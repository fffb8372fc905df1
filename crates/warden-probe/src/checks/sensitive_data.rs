use super::{CheckKind, CheckResult};
use crate::client::ProbeClient;
use crate::types::ProbeRequest;
use tracing::info;

pub const REQUIRED_HEADERS: [&str; 5] = [
    "Strict-Transport-Security",
    "X-Content-Type-Options",
    "X-Frame-Options",
    "X-XSS-Protection",
    "Content-Security-Policy",
];

pub const SENSITIVE_KEYWORDS: [&str; 4] = ["password", "api_key", "secret", "token"];

pub async fn run(client: &ProbeClient) -> CheckResult {
    info!("Testing sensitive data exposure");
    let mut result = CheckResult::new(CheckKind::SensitiveDataExposure);

    if client.config().is_plaintext() {
        result.fail("Using HTTP instead of HTTPS");
    }

    let health = client.send(ProbeRequest::get("/health")).await;
    if let Some(resp) = health.filter(|r| r.is_success()) {
        for header in REQUIRED_HEADERS {
            if !resp.has_header(header) {
                result.fail(format!("Missing security header: {}", header));
            }
        }
    }

    if let Some(resp) = client.send(ProbeRequest::get("/api/users/profile")).await {
        if let Some(json) = resp.json.as_ref().filter(|_| resp.is(200)) {
            let text = json.to_string().to_lowercase();
            for keyword in SENSITIVE_KEYWORDS {
                if text.contains(keyword) {
                    result.fail(format!("Sensitive field exposed in response: {}", keyword));
                }
            }
        }
    }

    result
}
