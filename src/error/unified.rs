//! Error classification.

/// Broad error category, used by callers to route handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Transport,
    Authentication,
    Api,
    Server,
    Decode,
    Cancelled,
    Timeout,
    Configuration,
}
