use crate::error::{ProbeError, Result};
use crate::traits::Transport;
use crate::types::{HttpMethod, OutgoingRequest, ProbeResponse};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// What an unrouted request gets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    /// Answer `404 Not Found` with an empty body
    NotFound,
    /// Fail as if the connection was refused
    Refuse,
}

/// Scripted answer for a route
#[derive(Debug, Clone)]
pub enum MockReply {
    Respond {
        status: u16,
        headers: HeaderMap,
        body: String,
    },
    Refuse,
    /// Panics inside `send`, simulating a check that blows up
    Panic(String),
}

impl MockReply {
    pub fn status(status: u16) -> Self {
        Self::text(status, "")
    }

    pub fn text(status: u16, body: impl Into<String>) -> Self {
        Self::Respond {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    pub fn json(status: u16, body: serde_json::Value) -> Self {
        Self::text(status, body.to_string())
    }

    /// Add a response header. No-op on `Refuse` and `Panic`.
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        if let Self::Respond { headers, .. } = &mut self {
            headers.append(name, value);
        }
        self
    }
}

#[derive(Debug, Clone)]
struct MockRoute {
    method: HttpMethod,
    path: String,
    query: Option<(String, String)>,
    reply: MockReply,
}

impl MockRoute {
    fn matches_path(&self, request: &OutgoingRequest) -> bool {
        self.method == request.method && self.path == request.url.path()
    }

    fn matches_query(&self, request: &OutgoingRequest) -> bool {
        match &self.query {
            Some((key, value)) => request.query_param(key).as_deref() == Some(value.as_str()),
            None => true,
        }
    }
}

/// In-memory `Transport` for tests
///
/// Routes are matched on method and path. A route registered with a query
/// parameter wins over one without when both match. Every request is logged
/// so tests can assert on what was sent.
pub struct MockTransport {
    routes: Arc<RwLock<Vec<MockRoute>>>,
    requests: Arc<RwLock<Vec<OutgoingRequest>>>,
    fallback: Fallback,
}

impl MockTransport {
    pub fn new(fallback: Fallback) -> Self {
        Self {
            routes: Arc::new(RwLock::new(Vec::new())),
            requests: Arc::new(RwLock::new(Vec::new())),
            fallback,
        }
    }

    /// Target that answers 404 everywhere
    pub fn not_found() -> Self {
        Self::new(Fallback::NotFound)
    }

    /// Target that is never reachable
    pub fn unreachable() -> Self {
        Self::new(Fallback::Refuse)
    }

    pub async fn route(&self, method: HttpMethod, path: &str, reply: MockReply) {
        self.routes.write().await.push(MockRoute {
            method,
            path: path.to_string(),
            query: None,
            reply,
        });
    }

    pub async fn route_query(
        &self,
        method: HttpMethod,
        path: &str,
        key: &str,
        value: &str,
        reply: MockReply,
    ) {
        self.routes.write().await.push(MockRoute {
            method,
            path: path.to_string(),
            query: Some((key.to_string(), value.to_string())),
            reply,
        });
    }

    /// All requests seen so far, in order
    pub async fn requests(&self) -> Vec<OutgoingRequest> {
        self.requests.read().await.clone()
    }

    async fn lookup(&self, request: &OutgoingRequest) -> Option<MockReply> {
        let routes = self.routes.read().await;
        let candidates: Vec<&MockRoute> = routes
            .iter()
            .filter(|r| r.matches_path(request) && r.matches_query(request))
            .collect();

        candidates
            .iter()
            .find(|r| r.query.is_some())
            .or_else(|| candidates.first())
            .map(|r| r.reply.clone())
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: &OutgoingRequest) -> Result<ProbeResponse> {
        self.requests.write().await.push(request.clone());

        let reply = match self.lookup(request).await {
            Some(reply) => reply,
            None => match self.fallback {
                Fallback::NotFound => MockReply::status(404),
                Fallback::Refuse => MockReply::Refuse,
            },
        };
        debug!("Mock: {} {} -> {:?}", request.method, request.url, reply);

        match reply {
            MockReply::Respond {
                status,
                headers,
                body,
            } => Ok(ProbeResponse::new(status, headers, body)),
            MockReply::Refuse => Err(ProbeError::transport(
                request.method.as_str(),
                request.url.as_str(),
                "connection refused",
            )),
            MockReply::Panic(message) => panic!("{}", message),
        }
    }
}
