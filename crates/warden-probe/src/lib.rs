//! Warden Probe - OWASP Top 10 smoke tests against a running HTTP service
//!
//! This crate provides:
//! - A request primitive that never fails: transport errors become `None`
//! - Ten independent heuristic checks, one per OWASP category
//! - A sequential runner that isolates checks from each other
//! - Markdown report rendering

// Allow unused assignments for diagnostic fields - they're used by the thiserror/miette macros
#![allow(unused_assignments)]

pub mod checks;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod mock;
pub mod report;
pub mod runner;
pub mod traits;
pub mod types;

// Re-export primary types
pub use checks::{CheckKind, CheckResult};
pub use client::ProbeClient;
pub use config::{ProbeConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use error::{ProbeError, Result};
pub use http::HttpTransport;
pub use mock::{Fallback, MockReply, MockTransport};
pub use report::{Report, REPORT_FILE};
pub use runner::{run_target, ProbeRunner};
pub use traits::Transport;
pub use types::{HttpMethod, OutgoingRequest, ProbeRequest, ProbeResponse, RequestBody};
