//! Single-shot completion using Ollama.
//!
//! ```bash
//! ollama pull llama3
//! cargo run --example generate
//! ```

#![allow(clippy::print_stdout)]

use ollama_api::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let client = Ollama::from_env()?;

    let request = CompletionRequest::new("llama3", "Why is the sky blue? Answer in one sentence.")
        .options(Options::new().temperature(0.2).num_predict(128));

    let response = client.generate(&request).await?;

    println!("{}", response.response);
    if let Some(rate) = response.eval_rate() {
        println!("({rate:.1} tokens/s)");
    }

    Ok(())
}
