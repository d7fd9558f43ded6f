//! Completions (`/api/generate`).

use tracing::info_span;

use crate::client::{Ollama, ResponseStream};
use crate::error::{Error, Result, require_text};
use crate::types::{CompletionRequest, GenerateResponse};

impl Ollama {
    /// Generate a completion for the given prompt.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] without sending anything if the
    /// model is empty or `request.stream` is set, and [`Error::Status`] for
    /// non-2xx responses.
    pub async fn generate(&self, request: &CompletionRequest) -> Result<GenerateResponse> {
        require_text(&request.model, "model")?;
        if request.stream {
            return Err(Error::invalid_argument(
                "stream mode must be disabled, use generate_stream instead",
            ));
        }

        let span = info_span!(
            target: "ollama_api",
            "generate",
            ollama.operation = "generate",
            ollama.model = %request.model,
        );

        let response: GenerateResponse =
            Self::fetch_json(self.post("api/generate").json(request), span).await?;

        tracing::debug!(
            eval_count = response.eval_count,
            total_duration = response.total_duration,
            "Ollama completion finished"
        );

        Ok(response)
    }

    /// Generate a completion, streaming fragments as the model produces them.
    ///
    /// The stream ends after the chunk with `done == true`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] without sending anything if the
    /// model is empty or `request.stream` is not set. Transport and status
    /// errors arrive as the last item of the stream.
    pub fn generate_stream(
        &self,
        request: &CompletionRequest,
    ) -> Result<ResponseStream<GenerateResponse>> {
        require_text(&request.model, "model")?;
        if !request.stream {
            return Err(Error::invalid_argument(
                "request must set the stream property to true",
            ));
        }

        let span = info_span!(
            target: "ollama_api",
            "generate_stream",
            ollama.operation = "generate_stream",
            ollama.model = %request.model,
        );

        self.stream_json("api/generate", request, span)
    }
}
