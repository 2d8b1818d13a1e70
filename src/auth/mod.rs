//! Client-credential token exchange and in-process token storage.

pub mod authenticator;
pub mod credentials;
pub mod error;
pub mod store;
pub mod token;

pub use authenticator::Authenticator;
pub use credentials::{Credentials, Scope};
pub use error::AuthError;
pub use store::TokenStore;
pub use token::Token;
