//! Cancellation and deadline scope for a single client call.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::error::SberChatError;

/// Cancellation token plus optional deadline, honored by every network call.
///
/// `RequestContext::background()` never cancels and has no deadline; the
/// context-free client methods use it.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use sberchat::RequestContext;
///
/// let ctx = RequestContext::background().with_timeout(Duration::from_secs(5));
/// let child = ctx.clone();
/// ctx.cancel();
/// assert!(child.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    cancel: CancellationToken,
    deadline: Option<Instant>,
}

impl RequestContext {
    pub fn background() -> Self {
        Self::default()
    }

    /// Context driven by an existing cancellation token.
    pub fn with_cancellation(cancel: CancellationToken) -> Self {
        Self {
            cancel,
            deadline: None,
        }
    }

    /// Set a deadline `timeout` from now. An earlier existing deadline wins.
    /// A timeout too large to represent leaves the deadline unchanged.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        match Instant::now().checked_add(timeout) {
            Some(deadline) => self.with_deadline(deadline),
            None => self,
        }
    }

    /// Set an absolute deadline. An earlier existing deadline wins.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(match self.deadline {
            Some(current) => current.min(deadline),
            None => deadline,
        });
        self
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Fails fast when the context is already cancelled or past its deadline.
    pub fn check(&self) -> Result<(), SberChatError> {
        if self.cancel.is_cancelled() {
            return Err(SberChatError::Cancelled);
        }
        if self.deadline.is_some_and(|deadline| Instant::now() >= deadline) {
            return Err(SberChatError::DeadlineExceeded);
        }
        Ok(())
    }

    /// Drive `future` until it completes, the context is cancelled, or the
    /// deadline passes. On cancellation the future is dropped unfinished.
    pub async fn run<T, F>(&self, future: F) -> Result<T, SberChatError>
    where
        F: Future<Output = Result<T, SberChatError>>,
    {
        self.check()?;
        let deadline = async {
            match self.deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending::<()>().await,
            }
        };
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(SberChatError::Cancelled),
            _ = deadline => Err(SberChatError::DeadlineExceeded),
            result = future => result,
        }
    }
}
