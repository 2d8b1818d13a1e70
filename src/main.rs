//! sberchat CLI binary entry point.

use clap::Parser;
use sberchat::cli::Cli;
use sberchat::config::{ClientConfig, FileConfig};
use sberchat::types::{ChatRequest, Message};
use sberchat::Client;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let question = match cli.prompt {
        Some(p) => p,
        None => {
            eprintln!("Usage: sberchat \"your question here\"");
            std::process::exit(1);
        }
    };

    let credentials = FileConfig::resolve(cli.config.as_deref())?.into_credentials();
    let config = ClientConfig::builder().insecure(!cli.secure).build();
    let client = Client::new(credentials, config)?;

    client.authenticate().await?;

    // Lookup failure is not fatal; the chat call reports a bad model itself.
    match client.model(&cli.model).await {
        Ok(model) => tracing::debug!(id = %model.id, owned_by = %model.owned_by, "model found"),
        Err(e) => tracing::warn!(error = %e, model = %cli.model, "model lookup failed"),
    }

    let mut messages = Vec::new();
    if let Some(system) = cli.system {
        messages.push(Message::system(system));
    }
    messages.push(Message::user(question.clone()));

    let request = ChatRequest::builder()
        .model(cli.model)
        .messages(messages)
        .max_tokens(cli.max_tokens)
        .maybe_temperature(cli.temperature)
        .build();

    let response = client.chat(&request).await?;

    println!("Question: {question}");
    match response.first_content() {
        Some(answer) => println!("Answer: {answer}\n"),
        None => println!("No answer to this question\n"),
    }
    Ok(())
}
