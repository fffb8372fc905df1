use super::{CheckKind, CheckResult};
use crate::client::ProbeClient;
use crate::types::ProbeRequest;
use tracing::info;

/// Resource id assumed not to exist on the target
pub const MISSING_RESOURCE_ID: u32 = 999;

pub async fn run(client: &ProbeClient) -> CheckResult {
    info!("Testing broken access control");
    let mut result = CheckResult::new(CheckKind::BrokenAccessControl);

    // Two users' profiles both readable with one identity. Weak evidence only.
    if is_ok(client, ProbeRequest::get("/api/users/1/profile")).await
        && is_ok(client, ProbeRequest::get("/api/users/2/profile")).await
    {
        result.fail("Horizontal privilege escalation possible");
    }

    let path = format!("/api/services/{}", MISSING_RESOURCE_ID);
    if is_ok(client, ProbeRequest::get(path)).await {
        result.fail("Insecure Direct Object Reference (IDOR)");
    }

    if is_ok(client, ProbeRequest::get("/api/admin/settings").anonymous()).await {
        result.fail("Admin endpoint accessible without proper authorization");
    }

    result
}

async fn is_ok(client: &ProbeClient, request: ProbeRequest) -> bool {
    client
        .send(request)
        .await
        .is_some_and(|resp| resp.is(200))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::test_support::https_client;
    use crate::mock::MockReply;
    use crate::types::HttpMethod;

    #[tokio::test]
    async fn test_second_profile_only_fetched_after_first_succeeds() {
        let (client, mock) = https_client();
        let result = run(&client).await;
        assert!(result.passed());

        let paths: Vec<String> = mock
            .requests()
            .await
            .iter()
            .map(|r| r.url.path().to_string())
            .collect();
        assert_eq!(
            paths,
            ["/api/users/1/profile", "/api/services/999", "/api/admin/settings"]
        );
    }

    #[tokio::test]
    async fn test_one_profile_readable_passes() {
        let (client, mock) = https_client();
        mock.route(HttpMethod::Get, "/api/users/1/profile", MockReply::status(200))
            .await;
        mock.route(HttpMethod::Get, "/api/users/2/profile", MockReply::status(403))
            .await;

        assert!(run(&client).await.passed());
    }

    #[tokio::test]
    async fn test_all_heuristics_fire() {
        let (client, mock) = https_client();
        for path in [
            "/api/users/1/profile",
            "/api/users/2/profile",
            "/api/services/999",
            "/api/admin/settings",
        ] {
            mock.route(HttpMethod::Get, path, MockReply::status(200)).await;
        }

        let result = run(&client).await;
        assert_eq!(
            result.issues(),
            [
                "Horizontal privilege escalation possible",
                "Insecure Direct Object Reference (IDOR)",
                "Admin endpoint accessible without proper authorization",
            ]
        );
    }
}
