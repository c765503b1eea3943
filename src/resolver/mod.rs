//! Resolver abstraction — pluggable host adapters.
//!
//! Extracts everything the bridge needs from its host (interaction
//! events, permission queries, clipboard access, warning output) into
//! small traits. Host adapters implement one or more of them; the
//! bridge receives them at construction through [`Environment`] and an
//! [`EventSource`].

pub mod clipboard;
pub mod event;
pub mod hub;
pub mod permission;
pub mod warn;
pub mod x11;

use std::sync::Arc;

pub use clipboard::{MemoryClipboard, SystemClipboard};
pub use event::{EventKind, EventSource, InteractionEvent, Listener};
pub use hub::EventHub;
pub use permission::{
    PermissionDescriptor, PermissionName, PermissionProbe, PermissionState, StaticPermissions,
};
pub use warn::{TracingSink, WarningSink};
pub use x11::XclipClipboard;

/// Errors returned by host adapters.
#[derive(Debug, thiserror::Error)]
pub enum ResolverError {
    /// Clipboard read or write failed (e.g. xclip not found, pipe error,
    /// access refused by the host).
    #[error("clipboard: {0}")]
    Clipboard(String),

    /// The permission query facility rejected the query.
    #[error("permission: {0}")]
    Permission(String),
}

/// Clipboard-related facilities exposed by the host.
///
/// Both facilities are optional. A missing clipboard means the host has
/// no clipboard API at all; a missing permission probe means clipboard
/// calls are attempted without asking first.
#[derive(Clone, Default)]
pub struct Environment {
    /// Reads and writes the system clipboard.
    pub clipboard: Option<Arc<dyn SystemClipboard>>,

    /// Answers permission queries for clipboard operations.
    pub permissions: Option<Arc<dyn PermissionProbe>>,
}

impl Environment {
    /// An environment with the given clipboard and no permission probe.
    pub fn with_clipboard(clipboard: Arc<dyn SystemClipboard>) -> Self {
        Self {
            clipboard: Some(clipboard),
            permissions: None,
        }
    }

    /// Attach a permission probe.
    pub fn permissions(mut self, probe: Arc<dyn PermissionProbe>) -> Self {
        self.permissions = Some(probe);
        self
    }

    /// Whether any clipboard facility is reachable.
    pub fn has_clipboard(&self) -> bool {
        self.clipboard.is_some()
    }
}

impl std::fmt::Debug for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Environment")
            .field("clipboard", &self.clipboard.is_some())
            .field("permissions", &self.permissions.is_some())
            .finish()
    }
}
