//! Typed async client for the Ollama local LLM server.
//!
//! [`Ollama`] maps each HTTP endpoint of the server to one method taking and
//! returning the types in [`types`]. Long-running operations also come in a
//! streaming flavour that decodes the server's newline-delimited JSON into a
//! [`ResponseStream`].
//!
//! ```rust,ignore
//! use futures::StreamExt;
//! use ollama_api::prelude::*;
//!
//! let client = Ollama::with_defaults()?;
//!
//! let answer = client
//!     .generate(&CompletionRequest::new("llama3", "Why is the sky blue?"))
//!     .await?;
//! println!("{}", answer.response);
//!
//! let mut stream = client.generate_stream(&CompletionRequest::streaming("llama3", "Tell me a joke"))?;
//! while let Some(chunk) = stream.next().await {
//!     print!("{}", chunk?.response);
//! }
//! ```
//!
//! The client never retries and imposes no timeouts of its own; configure
//! those on the transport through [`OllamaConfig`] or
//! [`Ollama::with_client`].

mod blobs;
mod client;
pub mod config;
mod embedding;
pub mod error;
mod generate;
pub mod modelfile;
mod models;
pub mod ndjson;
pub mod policy;
pub mod prelude;
pub mod types;

pub use client::{Ollama, ResponseStream};
pub use config::OllamaConfig;
pub use error::{Error, Result};
pub use modelfile::ModelfileBuilder;
