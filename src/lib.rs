//! clipbridge — keeps a remote session's clipboard and the user's
//! system clipboard in sync.
//!
//! - [`bridge`]: the synchronization object. Listens for copy, focus and
//!   gesture events on one event source and moves plain text between
//!   the session and the system clipboard.
//! - [`resolver`]: host adapter traits (event source, permission probe,
//!   clipboard, warning output) and the adapters shipped with the crate.
//! - [`console`]: line-oriented driver used by the `clipbridge` binary.

pub mod bridge;
pub mod cli;
pub mod console;
pub mod resolver;

pub use bridge::{Capability, ClipboardBridge, ClipboardBridgeBuilder, PlatformMode};
pub use resolver::{Environment, EventHub, EventKind, EventSource, InteractionEvent, ResolverError};
