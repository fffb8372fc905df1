use super::{CheckKind, CheckResult};
use crate::client::ProbeClient;
use crate::types::ProbeRequest;
use serde_json::json;
use tracing::info;

pub const CSRF_HEADER: &str = "X-CSRF-Token";

pub async fn run(client: &ProbeClient) -> CheckResult {
    info!("Testing CSRF protection");
    let mut result = CheckResult::new(CheckKind::Csrf);

    if let Some(resp) = client.send(ProbeRequest::get("/api/services")).await {
        if resp.is_success() && !resp.has_header(CSRF_HEADER) {
            result.fail("CSRF token not present in response headers");
        }
    }

    let request = ProbeRequest::post("/api/services").json(json!({"name": "test"}));
    if let Some(resp) = client.send(request).await {
        if resp.is(201) {
            result.fail("POST request accepted without CSRF token");
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::test_support::https_client;
    use crate::mock::MockReply;
    use crate::types::HttpMethod;
    use reqwest::header::{HeaderName, HeaderValue};

    #[tokio::test]
    async fn test_missing_token_fires_on_success() {
        let (client, mock) = https_client();
        mock.route(HttpMethod::Get, "/api/services", MockReply::json(200, json!([])))
            .await;
        let result = run(&client).await;
        assert_eq!(result.issues(), ["CSRF token not present in response headers"]);
    }

    #[tokio::test]
    async fn test_error_listing_not_inspected() {
        let (client, mock) = https_client();
        mock.route(HttpMethod::Get, "/api/services", MockReply::status(401))
            .await;
        assert!(run(&client).await.passed());

        let (client, _) = https_client();
        assert!(run(&client).await.passed());
    }

    #[tokio::test]
    async fn test_protected_target_passes() {
        let (client, mock) = https_client();
        mock.route(
            HttpMethod::Get,
            "/api/services",
            MockReply::json(200, json!([])).with_header(
                HeaderName::from_static("x-csrf-token"),
                HeaderValue::from_static("abc123"),
            ),
        )
        .await;
        mock.route(HttpMethod::Post, "/api/services", MockReply::status(403))
            .await;

        assert!(run(&client).await.passed());
    }

    #[tokio::test]
    async fn test_unprotected_create_fires() {
        let (client, mock) = https_client();
        mock.route(
            HttpMethod::Get,
            "/api/services",
            MockReply::status(200).with_header(
                HeaderName::from_static("x-csrf-token"),
                HeaderValue::from_static("abc123"),
            ),
        )
        .await;
        mock.route(HttpMethod::Post, "/api/services", MockReply::status(201))
            .await;

        let result = run(&client).await;
        assert_eq!(result.issues(), ["POST request accepted without CSRF token"]);
    }
}
