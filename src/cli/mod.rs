//! Command-line arguments for the `sberchat` binary.

use std::path::PathBuf;

use clap::Parser;

/// Ask GigaChat a single question.
#[derive(Parser, Debug)]
#[command(name = "sberchat", version, about = "Ask GigaChat a question")]
pub struct Cli {
    /// Credentials file (falls back to ./sberchat.json, ./config/sberchat.json, ~/sberchat.json)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Model to use
    #[arg(short, long, default_value = "GigaChat:latest")]
    pub model: String,

    /// System prompt
    #[arg(short, long)]
    pub system: Option<String>,

    /// Temperature
    #[arg(short, long)]
    pub temperature: Option<f64>,

    /// Max tokens
    #[arg(long, default_value_t = 1000)]
    pub max_tokens: u32,

    /// Keep TLS certificate verification on
    #[arg(long)]
    pub secure: bool,

    /// Question (positional)
    pub prompt: Option<String>,
}
