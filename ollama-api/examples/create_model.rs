//! Create, inspect, copy and delete a model built from a Modelfile.
//!
//! ```bash
//! ollama pull llama3
//! cargo run --example create_model
//! ```

#![allow(clippy::print_stdout)]

use futures::StreamExt;
use ollama_api::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let client = Ollama::with_defaults()?;

    let modelfile = ModelfileBuilder::new("llama3")
        .parameter("temperature", 1)
        .system("You are Mario from Super Mario Bros. Answer as Mario only.")
        .build()?;

    let mut stream = client.create_model_stream("mario", &modelfile)?;
    while let Some(status) = stream.next().await {
        println!("{}", status?.status);
    }

    let details = client.show_model("mario").await?;
    println!("{}", details.system.unwrap_or_default());

    let copied = client.copy_model("mario", "mario-backup").await?;
    println!("copied: {copied}");

    for name in ["mario-backup", "mario"] {
        println!("deleted {name}: {}", client.delete_model(name).await?);
    }

    Ok(())
}
