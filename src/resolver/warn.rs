//! Warning output for failed clipboard operations.

/// Receives one warning per failed clipboard read or write.
///
/// Fire-and-forget: nothing is returned and the caller never waits.
pub trait WarningSink: Send + Sync {
    fn warn(&self, message: &str);
}

/// Forwards warnings to `tracing` at WARN level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl WarningSink for TracingSink {
    fn warn(&self, message: &str) {
        tracing::warn!(target: "clipbridge", "{message}");
    }
}
