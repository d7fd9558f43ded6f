//! Convenient re-exports for common types.
//!
//! ```rust,ignore
//! use ollama_api::prelude::*;
//! ```

pub use crate::client::{Ollama, ResponseStream};
pub use crate::config::OllamaConfig;
pub use crate::error::{Error, Result};
pub use crate::modelfile::ModelfileBuilder;
pub use crate::ndjson::StreamItem;
pub use crate::types::{
    CompletionRequest, CreateModelResponse, EmbeddingRequest, EmbeddingResponse,
    GenerateResponse, ModelResponse, Options, ProgressResponse, PullPushRequest, Runner,
    ShowResponse,
};
