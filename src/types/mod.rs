//! Request and response types for the chat API.

pub mod chat;
pub mod message;
pub mod model;
pub mod usage;

pub use chat::*;
pub use message::*;
pub use model::*;
pub use usage::*;
