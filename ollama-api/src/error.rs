//! Error types for Ollama client operations.
//!
//! [`Error`] separates the failure modes a caller may want to handle
//! differently:
//! - precondition violations, raised before any network I/O
//! - transport failures, surfaced unchanged from `reqwest`
//! - non-2xx server responses, carrying status code, reason and body
//! - JSON encode/decode failures, including malformed stream lines

/// Result type alias for Ollama client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The error type for Ollama client operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A required argument was empty or inconsistent with the called operation.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Transport failure (connection refused, timeout, TLS, broken body).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("[{status}] {status_text} - {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Canonical reason phrase for the status code.
        status_text: String,
        /// Response body, read in full.
        body: String,
    },

    /// A request could not be encoded or a response body could not be decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A line of a streamed response was not a valid JSON object of the expected type.
    #[error("Failed to decode stream line: {source}, line: {line}")]
    Decode {
        /// The offending line, lossily converted to UTF-8.
        line: String,
        /// The underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// The configured base URL could not be parsed.
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),
}

impl Error {
    /// Create an invalid argument error.
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Create a status error.
    #[must_use]
    pub fn status(status: u16, status_text: impl Into<String>, body: impl Into<String>) -> Self {
        Self::Status {
            status,
            status_text: status_text.into(),
            body: body.into(),
        }
    }

    /// The HTTP status code carried by this error, if it is a server response error.
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Check if this error is a `404 Not Found` server response.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status_code() == Some(404)
    }
}

/// Fail with [`Error::InvalidArgument`] when `value` is empty or whitespace.
pub(crate) fn require_text(value: &str, what: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::invalid_argument(format!(
            "{what} can not be null or empty"
        )));
    }
    Ok(())
}
