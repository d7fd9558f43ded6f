//! Streaming completion using Ollama.
//!
//! ```bash
//! ollama pull llama3
//! RUST_LOG=ollama_api=debug cargo run --example generate_stream
//! ```

#![allow(clippy::print_stdout)]

use futures::StreamExt;
use ollama_api::prelude::*;
use std::io::{Write, stdout};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let client = Ollama::from_env()?;

    let request = CompletionRequest::streaming("llama3", "Write a haiku about Rust.");
    let mut stream = client.generate_stream(&request)?;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        print!("{}", chunk.response);
        stdout().flush()?;
        if chunk.done {
            println!();
            if let Some(count) = chunk.eval_count {
                println!("[{count} tokens]");
            }
        }
    }

    Ok(())
}
