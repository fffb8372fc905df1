use super::{CheckKind, CheckResult};
use crate::client::ProbeClient;
use crate::types::ProbeRequest;
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use tracing::info;

pub const XXE_PAYLOAD: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE foo [<!ENTITY xxe SYSTEM "file:///etc/passwd">]>
<root>&xxe;</root>"#;

pub async fn run(client: &ProbeClient) -> CheckResult {
    info!("Testing XML external entities");
    let mut result = CheckResult::new(CheckKind::XmlExternalEntities);

    let request = ProbeRequest::post("/api/upload")
        .header(CONTENT_TYPE, HeaderValue::from_static("application/xml"))
        .text(XXE_PAYLOAD);
    if let Some(resp) = client.send(request).await {
        if resp.is(200) && resp.body_contains("root:") {
            result.fail("XXE vulnerability detected");
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::test_support::https_client;
    use crate::mock::MockReply;
    use crate::types::{HttpMethod, RequestBody};

    #[tokio::test]
    async fn test_entity_expansion_fires() {
        let (client, mock) = https_client();
        mock.route(
            HttpMethod::Post,
            "/api/upload",
            MockReply::text(200, "<root>root:x:0:0:root:/root:/bin/bash</root>"),
        )
        .await;

        let result = run(&client).await;
        assert_eq!(result.issues(), ["XXE vulnerability detected"]);

        let requests = mock.requests().await;
        assert_eq!(requests[0].headers.get(CONTENT_TYPE).unwrap(), "application/xml");
        assert_eq!(
            requests[0].body,
            Some(RequestBody::Text(XXE_PAYLOAD.to_string()))
        );
    }

    #[tokio::test]
    async fn test_rejected_upload_passes() {
        let (client, mock) = https_client();
        mock.route(
            HttpMethod::Post,
            "/api/upload",
            MockReply::text(400, "root: entity not allowed"),
        )
        .await;

        assert!(run(&client).await.passed());
    }
}
