//! Pull a model and print layer progress.
//!
//! ```bash
//! cargo run --example pull_stream -- orca-mini
//! ```

#![allow(clippy::print_stdout)]

use futures::StreamExt;
use ollama_api::prelude::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let name = std::env::args().nth(1).unwrap_or_else(|| "orca-mini".to_owned());
    let client = Ollama::from_env()?;

    let mut stream = client.pull_model_stream(&PullPushRequest::new(&name))?;

    while let Some(update) = stream.next().await {
        let update = update?;
        match (update.digest.as_deref(), update.completed, update.total) {
            (Some(digest), Some(done), Some(total)) if total > 0 => {
                let pct = done as f64 / total as f64 * 100.0;
                println!("{} {digest} {pct:5.1}%", update.status);
            }
            _ => println!("{}", update.status),
        }
    }

    for model in client.list_models().await? {
        println!("{:<32} {:>12} bytes", model.name, model.size);
    }

    Ok(())
}
