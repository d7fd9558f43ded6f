//! `/api/embeddings` request and response types.

use serde::{Deserialize, Serialize};

use super::Options;

/// Request body for `/api/embeddings`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingRequest {
    /// The model to generate embeddings with.
    pub model: String,
    /// The text to embed.
    pub prompt: String,
    /// Additional model parameters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Options>,
}

impl EmbeddingRequest {
    /// Creates a request without options.
    #[must_use]
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            options: None,
        }
    }

    /// Sets the model options.
    #[must_use]
    pub fn options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }
}

/// Response from `/api/embeddings`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingResponse {
    /// The embedding vector.
    #[serde(default)]
    pub embedding: Vec<f32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_without_options() {
        let json = serde_json::to_string(&EmbeddingRequest::new("nomic-embed-text", "Hello"))
            .expect("serialization should succeed");
        assert_eq!(json, r#"{"model":"nomic-embed-text","prompt":"Hello"}"#);
    }

    #[test]
    fn response_deserialization() {
        let response: EmbeddingResponse =
            serde_json::from_str(r#"{"embedding":[0.5,-0.25,1.0]}"#)
                .expect("deserialization should succeed");
        assert_eq!(response.embedding, vec![0.5, -0.25, 1.0]);
    }
}
