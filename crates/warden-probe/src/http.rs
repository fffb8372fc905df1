use crate::error::{ProbeError, Result};
use crate::traits::Transport;
use crate::types::{OutgoingRequest, ProbeResponse, RequestBody};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// `Transport` backed by a shared reqwest client
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()
            .map_err(|e| ProbeError::client_build(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &OutgoingRequest) -> Result<ProbeResponse> {
        debug!("{} {}", request.method, request.url);

        let mut builder = self
            .client
            .request(request.method.into(), request.url.clone())
            .headers(request.headers.clone());

        builder = match &request.body {
            Some(RequestBody::Json(value)) => builder.json(value),
            Some(RequestBody::Text(text)) => builder.body(text.clone()),
            None => builder,
        };

        let resp = builder.send().await.map_err(|e| {
            ProbeError::transport(request.method.as_str(), request.url.as_str(), e.to_string())
        })?;

        let status = resp.status().as_u16();
        let headers = resp.headers().clone();
        let body = resp.text().await.map_err(|e| {
            ProbeError::transport(
                request.method.as_str(),
                request.url.as_str(),
                format!("reading body failed: {}", e),
            )
        })?;

        Ok(ProbeResponse::new(status, headers, body))
    }
}
