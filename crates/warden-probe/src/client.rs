use crate::config::ProbeConfig;
use crate::error::{ProbeError, Result};
use crate::http::HttpTransport;
use crate::traits::Transport;
use crate::types::{OutgoingRequest, ProbeRequest, ProbeResponse};
use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::Url;
use std::sync::Arc;
use tracing::warn;

/// Request primitive shared by every check
///
/// Resolves paths against the configured base URL, attaches the bearer
/// credential and hands the request to the transport. A request that never
/// gets an HTTP response comes back as `None`; checks treat that as
/// inconclusive.
pub struct ProbeClient {
    config: ProbeConfig,
    transport: Arc<dyn Transport>,
}

impl ProbeClient {
    pub fn new(config: ProbeConfig, transport: Arc<dyn Transport>) -> Self {
        Self { config, transport }
    }

    /// Client backed by a real HTTP transport using the configured timeout
    pub fn http(config: ProbeConfig) -> Result<Self> {
        let transport = HttpTransport::new(config.timeout())?;
        Ok(Self::new(config, Arc::new(transport)))
    }

    pub fn config(&self) -> &ProbeConfig {
        &self.config
    }

    /// Send a request, logging and swallowing transport failures
    pub async fn send(&self, request: ProbeRequest) -> Option<ProbeResponse> {
        let method = request.method;
        let path = request.path.clone();

        let outgoing = match self.prepare(request) {
            Ok(outgoing) => outgoing,
            Err(e) => {
                warn!("Request {} {} not sent: {}", method, path, e);
                return None;
            }
        };

        match self.transport.send(&outgoing).await {
            Ok(resp) => Some(resp),
            Err(e) => {
                warn!("Request failed: {}", e);
                None
            }
        }
    }

    /// Resolve a check's request into what goes on the wire
    pub fn prepare(&self, request: ProbeRequest) -> Result<OutgoingRequest> {
        let mut url = self.resolve(&request.path)?;
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(request.query.iter());
        }

        let mut headers = request.headers;
        if let Some(token) = self.config.token() {
            if !request.anonymous && !headers.contains_key(AUTHORIZATION) {
                let value = HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|e| {
                    ProbeError::transport(
                        request.method.as_str(),
                        url.as_str(),
                        format!("invalid bearer credential: {}", e),
                    )
                })?;
                headers.insert(AUTHORIZATION, value);
            }
        }

        Ok(OutgoingRequest {
            method: request.method,
            url,
            headers,
            body: request.body,
        })
    }

    fn resolve(&self, path: &str) -> Result<Url> {
        let base_url = self.config.base_url();
        Url::parse(base_url)
            .and_then(|base| base.join(path))
            .map_err(|e| ProbeError::invalid_url(base_url, path, e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockReply, MockTransport};
    use crate::types::HttpMethod;
    use reqwest::header::HeaderMap;

    fn mock_client(config: ProbeConfig) -> (ProbeClient, Arc<MockTransport>) {
        let mock = Arc::new(MockTransport::not_found());
        (ProbeClient::new(config, mock.clone()), mock)
    }

    #[test]
    fn test_resolve_joins_absolute_paths() {
        let (client, _) = mock_client(ProbeConfig::new("http://localhost:8000/v1/"));
        let req = client.prepare(ProbeRequest::get("/health")).unwrap();
        assert_eq!(req.url.as_str(), "http://localhost:8000/health");

        let req = client.prepare(ProbeRequest::get("health")).unwrap();
        assert_eq!(req.url.as_str(), "http://localhost:8000/v1/health");
    }

    #[test]
    fn test_query_is_encoded() {
        let (client, _) = mock_client(ProbeConfig::new("http://localhost:8000"));
        let req = client
            .prepare(ProbeRequest::get("/api/services").query("search", "' OR '1'='1"))
            .unwrap();
        assert_eq!(req.url.path(), "/api/services");
        assert_eq!(req.query_param("search").as_deref(), Some("' OR '1'='1"));
    }

    #[test]
    fn test_bearer_attached_when_configured() {
        let (client, _) = mock_client(ProbeConfig::new("http://localhost:8000").with_token("t0k"));
        let req = client.prepare(ProbeRequest::get("/health")).unwrap();
        assert_eq!(req.headers.get(AUTHORIZATION).unwrap(), "Bearer t0k");

        let (client, _) = mock_client(ProbeConfig::new("http://localhost:8000"));
        let req = client.prepare(ProbeRequest::get("/health")).unwrap();
        assert!(req.headers.get(AUTHORIZATION).is_none());
    }

    #[test]
    fn test_caller_authorization_not_overwritten() {
        let (client, _) = mock_client(ProbeConfig::new("http://localhost:8000").with_token("t0k"));
        let req = client
            .prepare(
                ProbeRequest::get("/health")
                    .header(AUTHORIZATION, HeaderValue::from_static("Basic Zm9vOmJhcg==")),
            )
            .unwrap();
        assert_eq!(req.headers.get(AUTHORIZATION).unwrap(), "Basic Zm9vOmJhcg==");
    }

    #[test]
    fn test_anonymous_request_has_no_credential() {
        let (client, _) = mock_client(ProbeConfig::new("http://localhost:8000").with_token("t0k"));
        let req = client
            .prepare(ProbeRequest::get("/api/admin/users").anonymous())
            .unwrap();
        assert!(req.headers.get(AUTHORIZATION).is_none());
    }

    #[tokio::test]
    async fn test_invalid_base_url_is_no_response() {
        let (client, mock) = mock_client(ProbeConfig::new("not a url"));
        assert!(client.send(ProbeRequest::get("/health")).await.is_none());
        // Nothing reached the transport
        assert!(mock.requests().await.is_empty());
    }

    #[tokio::test]
    async fn test_transport_failure_is_no_response() {
        let mock = Arc::new(MockTransport::unreachable());
        let client = ProbeClient::new(ProbeConfig::new("http://localhost:8000"), mock.clone());
        assert!(client.send(ProbeRequest::get("/health")).await.is_none());
        assert_eq!(mock.requests().await.len(), 1);
    }

    #[tokio::test]
    async fn test_error_status_is_a_response() {
        let (client, mock) = mock_client(ProbeConfig::new("http://localhost:8000"));
        mock.route(HttpMethod::Get, "/health", MockReply::status(503))
            .await;
        let resp = client.send(ProbeRequest::get("/health")).await.unwrap();
        assert_eq!(resp.status, 503);
        assert_eq!(resp.headers, HeaderMap::new());
    }
}
