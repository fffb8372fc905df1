use super::{CheckKind, CheckResult};
use crate::client::ProbeClient;
use crate::types::ProbeRequest;
use serde_json::Value;
use tracing::info;

pub const SQL_PAYLOADS: [&str; 3] = [
    "' OR '1'='1",
    "'; DROP TABLE users; --",
    "1 UNION SELECT NULL, NULL, NULL",
];

pub const COMMAND_PAYLOADS: [&str; 3] = ["; ls -la", "| cat /etc/passwd", "` whoami `"];

/// Markers of OS account data leaking into a response
const ACCOUNT_MARKERS: [&str; 2] = ["root", "bin"];

pub async fn run(client: &ProbeClient) -> CheckResult {
    info!("Testing injection attacks");
    let mut result = CheckResult::new(CheckKind::Injection);

    for payload in SQL_PAYLOADS {
        let request = ProbeRequest::get("/api/services").query("search", payload);
        if let Some(resp) = client.send(request).await {
            if resp.is(200) && resp.json.as_ref().and_then(non_empty) == Some(true) {
                result.fail(format!("Potential SQL injection vulnerability: {}", payload));
            }
        }
    }

    for payload in COMMAND_PAYLOADS {
        let request = ProbeRequest::get("/api/services").query("name", payload);
        if let Some(resp) = client.send(request).await {
            if resp.is(200) && ACCOUNT_MARKERS.iter().any(|m| resp.body_contains(m)) {
                result.fail(format!("Potential command injection vulnerability: {}", payload));
            }
        }
    }

    result
}

/// Whether a decoded body holds anything. Scalars other than strings have
/// no length and are treated as undecidable.
fn non_empty(value: &Value) -> Option<bool> {
    match value {
        Value::Array(items) => Some(!items.is_empty()),
        Value::Object(map) => Some(!map.is_empty()),
        Value::String(s) => Some(!s.is_empty()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::test_support::https_client;
    use crate::mock::MockReply;
    use crate::types::HttpMethod;
    use serde_json::json;

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(&json!([1])), Some(true));
        assert_eq!(non_empty(&json!([])), Some(false));
        assert_eq!(non_empty(&json!({})), Some(false));
        assert_eq!(non_empty(&json!("x")), Some(true));
        assert_eq!(non_empty(&json!(3)), None);
        assert_eq!(non_empty(&Value::Null), None);
    }

    #[tokio::test]
    async fn test_empty_listing_passes() {
        let (client, mock) = https_client();
        mock.route(HttpMethod::Get, "/api/services", MockReply::json(200, json!([])))
            .await;

        let result = run(&client).await;
        assert!(result.passed());
        // Every payload was tried
        assert_eq!(mock.requests().await.len(), 6);
    }

    #[tokio::test]
    async fn test_sql_payload_returning_rows_fires_once_per_payload() {
        let (client, mock) = https_client();
        mock.route(
            HttpMethod::Get,
            "/api/services",
            MockReply::json(200, json!([{"id": 1, "name": "svc"}])),
        )
        .await;

        let result = run(&client).await;
        assert!(!result.passed());
        assert_eq!(
            result.issues(),
            [
                "Potential SQL injection vulnerability: ' OR '1'='1",
                "Potential SQL injection vulnerability: '; DROP TABLE users; --",
                "Potential SQL injection vulnerability: 1 UNION SELECT NULL, NULL, NULL",
            ]
        );
    }

    #[tokio::test]
    async fn test_command_output_fires() {
        let (client, mock) = https_client();
        mock.route_query(
            HttpMethod::Get,
            "/api/services",
            "name",
            "| cat /etc/passwd",
            MockReply::text(200, "root:x:0:0:root:/root:/bin/bash"),
        )
        .await;

        let result = run(&client).await;
        assert_eq!(
            result.issues(),
            ["Potential command injection vulnerability: | cat /etc/passwd"]
        );
    }

    #[tokio::test]
    async fn test_non_200_ignored() {
        let (client, mock) = https_client();
        mock.route(
            HttpMethod::Get,
            "/api/services",
            MockReply::text(500, "root bin [1]"),
        )
        .await;

        assert!(run(&client).await.passed());
    }
}
