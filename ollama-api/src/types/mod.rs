//! Ollama API request and response types.
//!
//! Field names match the wire format (snake_case). Optional fields are
//! omitted from serialized JSON when absent.

mod embedding;
mod generate;
mod model;
mod options;
mod progress;

pub use embedding::{EmbeddingRequest, EmbeddingResponse};
pub use generate::{CompletionRequest, GenerateResponse};
pub use model::{
    CopyRequest, CreateModelRequest, CreateModelResponse, DeleteRequest, ModelList, ModelResponse,
    ShowRequest, ShowResponse,
};
pub use options::{Options, Runner};
pub use progress::{ProgressResponse, PullPushRequest};
