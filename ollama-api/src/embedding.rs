//! Embeddings (`/api/embeddings`).

use tracing::info_span;

use crate::client::Ollama;
use crate::error::{Result, require_text};
use crate::types::{EmbeddingRequest, EmbeddingResponse};

impl Ollama {
    /// Generate an embedding for the request's prompt.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidArgument`] if the model is empty and
    /// [`crate::Error::Status`] for non-2xx responses.
    pub async fn embedding(&self, request: &EmbeddingRequest) -> Result<EmbeddingResponse> {
        require_text(&request.model, "model")?;

        let span = info_span!(
            target: "ollama_api",
            "embedding",
            ollama.operation = "embedding",
            ollama.model = %request.model,
        );

        Self::fetch_json(self.post("api/embeddings").json(request), span).await
    }
}
