use super::{CheckKind, CheckResult};
use crate::client::ProbeClient;
use crate::types::ProbeRequest;
use tracing::info;

pub const XSS_PAYLOADS: [&str; 4] = [
    r#"<script>alert("XSS")</script>"#,
    r#""><script>alert("XSS")</script>"#,
    r#"<img src=x onerror="alert('XSS')">"#,
    r#"<svg onload="alert('XSS')">"#,
];

pub async fn run(client: &ProbeClient) -> CheckResult {
    info!("Testing XSS attacks");
    let mut result = CheckResult::new(CheckKind::Xss);

    for payload in XSS_PAYLOADS {
        let request = ProbeRequest::get("/api/services").query("search", payload);
        if let Some(resp) = client.send(request).await {
            if resp.is(200) && resp.body_contains(payload) {
                result.fail(format!("Reflected XSS vulnerability: {}", payload));
            }
        }
    }

    result
}
