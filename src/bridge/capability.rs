//! Capability gate — is any clipboard facility reachable at all.

use std::sync::OnceLock;

use crate::resolver::Environment;

/// Lazily computed "clipboard supported" flag.
///
/// The first call to [`Capability::resolve`] fixes the value for the
/// life of the process (or of the `Capability`, for private instances).
/// It is never recomputed: the host's clipboard support does not change
/// while it runs.
#[derive(Debug)]
pub struct Capability {
    supported: OnceLock<bool>,
}

impl Capability {
    /// An unresolved gate. Bridges normally use [`Capability::global`].
    pub const fn new() -> Self {
        Self {
            supported: OnceLock::new(),
        }
    }

    /// The process-wide gate shared by every bridge.
    pub fn global() -> &'static Capability {
        static GLOBAL: Capability = Capability::new();
        &GLOBAL
    }

    /// Resolve against `env` on first use and return the fixed value.
    pub fn resolve(&self, env: &Environment) -> bool {
        *self.supported.get_or_init(|| {
            let supported = env.has_clipboard();
            tracing::debug!(supported, "clipboard capability resolved");
            supported
        })
    }
}

impl Default for Capability {
    fn default() -> Self {
        Self::new()
    }
}
