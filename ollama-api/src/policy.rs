//! Status error policies for calls that answer with a boolean.
//!
//! Most operations raise every non-2xx response. The boolean calls
//! (`blob_exists`, `copy_model`, `delete_model`, `create_blob`) each name an
//! [`ErrorPolicy`] instead.

use crate::error::{Error, Result};

/// How a non-2xx response is translated for a boolean-returning call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPolicy<'a> {
    /// Every non-2xx response is an error.
    Raise,
    /// Non-2xx responses are logged and reported as `Ok(false)`.
    Suppress,
    /// Like `Suppress` for an existence check: a 404 is the ordinary "absent"
    /// answer and is only logged at `debug`.
    Probe,
    /// A 404 whose body mentions the given name counts as success; anything else raises.
    IgnoreNotFound(&'a str),
}

impl ErrorPolicy<'_> {
    /// Resolve a non-2xx response into the call's outcome.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Status`] unless the policy absorbs the response.
    pub fn resolve(self, status: u16, status_text: &str, body: &str) -> Result<bool> {
        match self {
            Self::Raise => Err(Error::status(status, status_text, body)),
            Self::Suppress | Self::Probe => Ok(false),
            Self::IgnoreNotFound(name) if status == 404 && body.contains(name) => {
                tracing::debug!("{name} is already absent, treating 404 as success");
                Ok(true)
            }
            Self::IgnoreNotFound(_) => Err(Error::status(status, status_text, body)),
        }
    }

    /// Whether a response with this status is an expected answer rather than a failure worth a warning.
    #[must_use]
    pub const fn is_routine(self, status: u16) -> bool {
        matches!(self, Self::Probe) && status == 404
    }
}
