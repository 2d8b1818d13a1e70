//! Convenience re-exports for common use.

pub use crate::auth::{Credentials, Scope};
pub use crate::client::Client;
pub use crate::config::{ClientConfig, FileConfig};
pub use crate::context::RequestContext;
pub use crate::error::{Result, SberChatError};
pub use crate::types::{ChatRequest, ChatResponse, Choice, Message, Model, ModelList, Role, Usage};
