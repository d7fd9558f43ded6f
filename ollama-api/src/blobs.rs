//! Content-addressed blobs (`/api/blobs/{digest}`).

use reqwest::multipart::{Form, Part};
use tracing::info_span;

use crate::client::Ollama;
use crate::error::{Result, require_text};
use crate::policy::ErrorPolicy;

impl Ollama {
    /// Check whether the server holds a blob.
    ///
    /// Any non-2xx answer means the blob is absent and is not an error. A 404
    /// is logged at `debug`, anything else at `warn`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidArgument`] if `digest` is empty and
    /// [`crate::Error::Http`] on transport failure.
    pub async fn blob_exists(&self, digest: &str) -> Result<bool> {
        require_text(digest, "digest")?;

        let span = info_span!(
            target: "ollama_api",
            "blob_exists",
            ollama.operation = "blob_exists",
            ollama.digest = digest,
        );

        Self::fetch_status(
            self.head(&format!("api/blobs/{digest}")),
            ErrorPolicy::Probe,
            span,
        )
        .await
    }

    /// Upload a blob as a multipart form with a single `file` field.
    ///
    /// The server verifies `content` against `digest`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidArgument`] if `digest` is empty and
    /// [`crate::Error::Status`] if the server rejects the upload.
    pub async fn create_blob(&self, digest: &str, content: impl Into<Vec<u8>>) -> Result<bool> {
        require_text(digest, "digest")?;

        let content: Vec<u8> = content.into();
        let span = info_span!(
            target: "ollama_api",
            "create_blob",
            ollama.operation = "create_blob",
            ollama.digest = digest,
            ollama.size = content.len(),
        );

        let part = Part::bytes(content)
            .file_name("file")
            .mime_str("application/octet-stream")?;
        let form = Form::new().part("file", part);

        Self::fetch_status(
            self.post(&format!("api/blobs/{digest}")).multipart(form),
            ErrorPolicy::Raise,
            span,
        )
        .await
    }
}
