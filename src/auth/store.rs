use std::time::Duration;

use tokio::sync::{Mutex, MutexGuard};

use super::token::Token;

/// In-process holder for the current bearer token.
///
/// The slot is either empty (never authenticated, or invalidated) or holds one
/// [`Token`]. Tokens are replaced wholesale, never edited. The lock is async so
/// the client can keep it across the token exchange and serialize the
/// empty-to-present transition between concurrent callers.
#[derive(Debug, Default)]
pub struct TokenStore {
    slot: Mutex<Option<Token>>,
}

impl TokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a token obtained elsewhere.
    pub fn with_token(token: Token) -> Self {
        Self {
            slot: Mutex::new(Some(token)),
        }
    }

    /// Clone of the current token, expired or not.
    pub async fn current(&self) -> Option<Token> {
        self.slot.lock().await.clone()
    }

    /// Whether a token is present and still usable given `skew`.
    pub async fn has_usable(&self, skew: Duration) -> bool {
        self.slot
            .lock()
            .await
            .as_ref()
            .is_some_and(|token| token.is_usable(skew))
    }

    /// Swap in a new token, returning the previous one.
    pub async fn replace(&self, token: Token) -> Option<Token> {
        self.slot.lock().await.replace(token)
    }

    pub async fn clear(&self) -> Option<Token> {
        self.slot.lock().await.take()
    }

    pub(crate) async fn lock(&self) -> MutexGuard<'_, Option<Token>> {
        self.slot.lock().await
    }
}
