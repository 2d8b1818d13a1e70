//! sberchat — async client for the GigaChat chat-completion API.
//!
//! The client exchanges client credentials for a bearer token, caches it
//! until it expires, and uses it for model lookup and chat completions.
//!
//! # Quick Start
//!
//! ```no_run
//! use sberchat::prelude::*;
//!
//! # async fn example() -> sberchat::Result<()> {
//! let creds = FileConfig::resolve(None)?.into_credentials();
//! let client = Client::new(creds, ClientConfig::insecure())?;
//! let request = ChatRequest::builder()
//!     .model("GigaChat:latest")
//!     .messages(vec![Message::user("Hello!")])
//!     .max_tokens(512)
//!     .build();
//! let response = client.chat(&request).await?;
//! println!("{}", response.first_content().unwrap_or_default());
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod config;
pub mod context;
pub mod error;
pub mod http;
pub mod prelude;
pub mod types;

#[cfg(feature = "cli")]
pub mod cli;

pub use auth::{AuthError, Credentials, Scope, Token, TokenStore};
pub use client::Client;
pub use context::RequestContext;
pub use error::{Result, SberChatError};
