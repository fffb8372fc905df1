use crate::error::Result;
use crate::types::{OutgoingRequest, ProbeResponse};
use async_trait::async_trait;

/// Trait for the component that puts requests on the wire
///
/// `HttpTransport` talks to a real server; `MockTransport` answers from an
/// in-memory route table so checks can be exercised without a network.
/// Any HTTP status, including 4xx/5xx, is an `Ok` response. `Err` is reserved
/// for requests that never got one.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &OutgoingRequest) -> Result<ProbeResponse>;
}
