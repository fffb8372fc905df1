use super::{CheckKind, CheckResult};
use crate::client::ProbeClient;
use crate::types::ProbeRequest;
use chrono::Utc;
use serde_json::json;
use tracing::info;

pub const DEFAULT_CREDENTIALS: [(&str, &str); 3] =
    [("admin", "admin"), ("admin", "password"), ("admin", "12345")];

pub const WEAK_PASSWORDS: [&str; 5] = ["1", "12", "123", "password", "admin"];

pub async fn run(client: &ProbeClient) -> CheckResult {
    info!("Testing broken authentication");
    let mut result = CheckResult::new(CheckKind::BrokenAuthentication);

    for (username, password) in DEFAULT_CREDENTIALS {
        let request = ProbeRequest::post("/login").json(json!({
            "username": username,
            "password": password,
        }));
        if let Some(resp) = client.send(request).await {
            if resp.is(200) {
                result.fail(format!("Default credentials work: {}:{}", username, password));
            }
        }
    }

    let request = ProbeRequest::get("/api/admin/users").anonymous();
    if let Some(resp) = client.send(request).await {
        if resp.is(200) {
            result.fail("Admin endpoint accessible without authentication");
        }
    }

    for password in WEAK_PASSWORDS {
        let request = ProbeRequest::post("/api/users/register").json(json!({
            "username": format!("testuser_{}", Utc::now().timestamp()),
            "password": password,
        }));
        if let Some(resp) = client.send(request).await {
            if resp.is(201) {
                result.fail(format!("Weak password accepted: {}", password));
            }
        }
    }

    result
}
