use miette::Diagnostic;
use thiserror::Error;

/// Error type for probe runs
///
/// None of these ever abort a run. Transport errors are turned into an absent
/// response by `ProbeClient`, panicking checks are dropped from the report,
/// and a report that cannot be written is only logged.
#[derive(Error, Debug, Diagnostic)]
pub enum ProbeError {
    /// Base URL and path could not be combined into a request URL
    #[error("Cannot resolve '{path}' against base URL '{base_url}': {message}")]
    #[diagnostic(
        code(warden::probe::invalid_url),
        help("The base URL must be absolute, e.g. http://localhost:8000")
    )]
    InvalidUrl {
        #[allow(unused)]
        base_url: String,
        #[allow(unused)]
        path: String,
        #[allow(unused)]
        message: String,
    },

    /// Request never produced an HTTP response
    #[error("{method} {url} failed: {message}")]
    #[diagnostic(
        code(warden::probe::transport),
        help("Check that the target service is running and reachable from this host")
    )]
    Transport {
        #[allow(unused)]
        method: String,
        #[allow(unused)]
        url: String,
        #[allow(unused)]
        message: String,
    },

    /// HTTP client could not be constructed
    #[error("Failed to build HTTP client: {message}")]
    #[diagnostic(
        code(warden::probe::client_build),
        help("This usually means the TLS backend could not be initialised")
    )]
    ClientBuild {
        #[allow(unused)]
        message: String,
    },

    /// Report file could not be written
    #[error("Failed to write report to {path}: {message}")]
    #[diagnostic(
        code(warden::probe::report_write),
        help("Verify the working directory is writable")
    )]
    ReportWrite {
        #[allow(unused)]
        path: String,
        #[allow(unused)]
        message: String,
    },

    /// A check aborted instead of returning a result
    #[error("Check '{check}' aborted: {message}")]
    #[diagnostic(
        code(warden::probe::check_panicked),
        help("This is a bug in the check itself, not a finding about the target")
    )]
    CheckPanicked {
        #[allow(unused)]
        check: String,
        #[allow(unused)]
        message: String,
    },
}

/// Result type alias for probe operations
pub type Result<T> = std::result::Result<T, ProbeError>;

impl ProbeError {
    pub fn invalid_url(
        base_url: impl Into<String>,
        path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidUrl {
            base_url: base_url.into(),
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn transport(
        method: impl Into<String>,
        url: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Transport {
            method: method.into(),
            url: url.into(),
            message: message.into(),
        }
    }

    pub fn client_build(message: impl Into<String>) -> Self {
        Self::ClientBuild {
            message: message.into(),
        }
    }

    pub fn report_write(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ReportWrite {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn check_panicked(check: impl Into<String>, message: impl Into<String>) -> Self {
        Self::CheckPanicked {
            check: check.into(),
            message: message.into(),
        }
    }
}
