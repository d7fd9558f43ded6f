//! Pull/push request and progress types.

use serde::{Deserialize, Serialize};

use crate::ndjson::StreamItem;

/// Request body for `/api/pull` and `/api/push`.
///
/// Credentials travel in the JSON body; this is the server's own convention,
/// not HTTP basic auth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullPushRequest {
    /// Model name, `namespace/model:tag` for pushes.
    pub name: String,
    /// Allow insecure connections to the registry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insecure: Option<bool>,
    /// Registry username.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Registry password.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Overridden by the client to match the operation.
    #[serde(default)]
    pub stream: bool,
}

impl PullPushRequest {
    /// Creates a request for the given model.
    ///
    /// `insecure` is left unset, so the server's default (TLS verified)
    /// applies. Call [`Self::insecure`] to talk to a registry without TLS.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            insecure: None,
            username: None,
            password: None,
            stream: false,
        }
    }

    /// Allows insecure registry connections. Only use this with your own registry.
    #[must_use]
    pub const fn insecure(mut self, insecure: bool) -> Self {
        self.insecure = Some(insecure);
        self
    }

    /// Sets the registry credentials.
    #[must_use]
    pub fn credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }
}

/// A pull/push status update.
///
/// Byte counts are cumulative per `digest`; `completed` is absent until the
/// first byte of a layer has been transferred.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressResponse {
    /// Human readable status (`"pulling manifest"`, `"success"`, ...).
    pub status: String,
    /// Digest of the layer being transferred.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
    /// Total size of the layer in bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    /// Bytes transferred so far.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<u64>,
}

impl StreamItem for ProgressResponse {}
