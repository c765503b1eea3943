//! Clipboard bridge — keeps the remote session's clipboard and the
//! system clipboard in step.
//!
//! Copies inside the session are written to the system clipboard. When
//! the session regains focus the system clipboard is read and handed to
//! the paste callback.
//!
//! Gesture-restricted hosts only accept writes while a user gesture is
//! being handled, so in that mode copies are staged and flushed on the
//! next mouse or key release, and reads are triggered by pointer press
//! instead of focus.
//!
//! Every failure stops at the handler: permission denials are silent,
//! read/write errors become one warning each, nothing reaches the event
//! source.

pub mod capability;
pub mod staging;

use std::sync::{Arc, Mutex, MutexGuard, Weak};

use crate::resolver::{
    Environment, EventKind, EventSource, InteractionEvent, Listener, PermissionDescriptor,
    PermissionName, PermissionState, SystemClipboard, TracingSink, WarningSink,
};

pub use capability::Capability;
pub use staging::StagingQueue;

/// Whether the host restricts clipboard writes to live user gestures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlatformMode {
    #[default]
    Unrestricted,
    GestureRestricted,
}

impl PlatformMode {
    pub fn from_gesture_restricted(restricted: bool) -> Self {
        if restricted {
            PlatformMode::GestureRestricted
        } else {
            PlatformMode::Unrestricted
        }
    }

    /// Listener configuration for this mode: which event kinds trigger
    /// which handler.
    fn routes(self) -> &'static [(EventKind, Route)] {
        match self {
            PlatformMode::Unrestricted => &[
                (EventKind::Copy, Route::Copy),
                (EventKind::Focus, Route::Read),
            ],
            PlatformMode::GestureRestricted => &[
                (EventKind::Copy, Route::Copy),
                (EventKind::PointerDown, Route::Read),
                (EventKind::MouseUp, Route::Drain),
                (EventKind::KeyUp, Route::Drain),
            ],
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Route {
    Copy,
    Read,
    Drain,
}

type PasteCallback = Arc<dyn Fn(String) + Send + Sync>;

/// State reachable from listeners.
struct Shared {
    env: Environment,
    /// Present only in gesture-restricted mode.
    staging: Option<StagingQueue>,
    on_paste: Mutex<PasteCallback>,
    warnings: Arc<dyn WarningSink>,
}

impl Shared {
    /// Ask the permission probe. A missing probe or a failing query
    /// counts as `Unknown`, which does not block the operation.
    async fn probe(&self, name: PermissionName) -> PermissionState {
        let Some(probe) = &self.env.permissions else {
            return PermissionState::Unknown;
        };
        match probe.query(PermissionDescriptor::new(name)).await {
            Ok(state) => state,
            Err(e) => {
                tracing::debug!(permission = %name, error = %e, "permission query failed, proceeding");
                PermissionState::Unknown
            }
        }
    }

    fn writable(&self) -> Option<&Arc<dyn SystemClipboard>> {
        self.env.clipboard.as_ref().filter(|c| c.can_write())
    }

    fn readable(&self) -> Option<&Arc<dyn SystemClipboard>> {
        self.env.clipboard.as_ref().filter(|c| c.can_read())
    }

    async fn handle_copy(&self, text: String) {
        if !self.probe(PermissionName::ClipboardWrite).await.allows() {
            tracing::debug!("clipboard-write denied, copy dropped");
            return;
        }
        let Some(clipboard) = self.writable() else {
            return;
        };

        if let Some(staging) = &self.staging {
            staging.push(text);
            tracing::debug!(staged = staging.len(), "copy staged until next gesture");
            return;
        }

        if let Err(e) = clipboard.write_text(&text).await {
            self.warnings.warn(&format!("Couldn't write to clipboard. {e}"));
        }
    }

    async fn handle_read(&self) {
        if !self.probe(PermissionName::ClipboardRead).await.allows() {
            tracing::debug!("clipboard-read denied, paste skipped");
            return;
        }
        let Some(clipboard) = self.readable() else {
            return;
        };

        match clipboard.read_text().await {
            Ok(text) => {
                // Clone out so the callback may replace itself.
                let callback = Arc::clone(&*lock(&self.on_paste));
                callback(text);
            }
            Err(e) => {
                self.warnings.warn(&format!("Couldn't read from clipboard. {e}"));
            }
        }
    }

    async fn drain(&self) {
        let Some(staging) = &self.staging else {
            return;
        };
        if staging.is_empty() {
            return;
        }
        // Without a write call the entries stay queued for later.
        let Some(clipboard) = self.writable() else {
            return;
        };

        while let Some(text) = staging.pop() {
            if let Err(e) = clipboard.write_text(&text).await {
                self.warnings.warn(&format!("Couldn't write to clipboard. {e}"));
            }
        }
    }
}

/// Bridges interaction events from one event source to the system
/// clipboard.
///
/// Starts inactive. [`activate`](Self::activate) attaches the listeners
/// for the bridge's [`PlatformMode`]; [`deactivate`](Self::deactivate)
/// (or dropping the bridge) removes them again.
pub struct ClipboardBridge {
    target: Arc<dyn EventSource>,
    shared: Arc<Shared>,
    mode: PlatformMode,
    capability: &'static Capability,
    copy_listener: Listener,
    read_listener: Listener,
    drain_listener: Listener,
    /// Listeners attached by the current activation, `None` while
    /// inactive.
    attached: Mutex<Option<Vec<(EventKind, Listener)>>>,
}

impl ClipboardBridge {
    /// Bridge with default warning output and the process-wide
    /// capability gate.
    pub fn new(target: Arc<dyn EventSource>, env: Environment, mode: PlatformMode) -> Self {
        Self::builder(target, env).mode(mode).build()
    }

    pub fn builder(target: Arc<dyn EventSource>, env: Environment) -> ClipboardBridgeBuilder {
        ClipboardBridgeBuilder {
            target,
            env,
            mode: PlatformMode::default(),
            warnings: Arc::new(TracingSink),
            capability: Capability::global(),
        }
    }

    /// Whether the host exposes a clipboard at all. When `false`,
    /// activation and deactivation do nothing.
    pub fn is_supported(&self) -> bool {
        self.capability.resolve(&self.shared.env)
    }

    pub fn mode(&self) -> PlatformMode {
        self.mode
    }

    pub fn is_active(&self) -> bool {
        self.attached().is_some()
    }

    /// Attach listeners for this bridge's mode.
    ///
    /// No-op when unsupported or already active.
    pub fn activate(&self) {
        if !self.is_supported() {
            return;
        }
        let mut attached = self.attached();
        if attached.is_some() {
            return;
        }

        let set: Vec<(EventKind, Listener)> = self
            .mode
            .routes()
            .iter()
            .map(|&(kind, route)| (kind, self.listener(route).clone()))
            .collect();
        for (kind, listener) in &set {
            self.target.subscribe(*kind, listener.clone());
        }
        tracing::debug!(mode = ?self.mode, listeners = set.len(), "clipboard bridge activated");
        *attached = Some(set);
    }

    /// Remove exactly the listeners the last activation attached.
    ///
    /// No-op when unsupported or not active.
    pub fn deactivate(&self) {
        if !self.is_supported() {
            return;
        }
        let Some(set) = self.attached().take() else {
            return;
        };
        for (kind, listener) in &set {
            self.target.unsubscribe(*kind, listener);
        }
        tracing::debug!(mode = ?self.mode, "clipboard bridge deactivated");
    }

    /// Set the paste callback, replacing the previous one. Only the most
    /// recently set callback is invoked.
    pub fn set_on_paste<F>(&self, callback: F)
    where
        F: Fn(String) + Send + Sync + 'static,
    {
        *lock(&self.shared.on_paste) = Arc::new(callback);
    }

    /// Restore the no-op paste callback.
    pub fn clear_on_paste(&self) {
        *lock(&self.shared.on_paste) = noop_paste();
    }

    /// Number of staged writes. Always 0 in unrestricted mode.
    pub fn staged_len(&self) -> usize {
        self.shared.staging.as_ref().map_or(0, StagingQueue::len)
    }

    /// Staged writes, head first.
    pub fn staged(&self) -> Vec<String> {
        self.shared
            .staging
            .as_ref()
            .map(StagingQueue::snapshot)
            .unwrap_or_default()
    }

    fn listener(&self, route: Route) -> &Listener {
        match route {
            Route::Copy => &self.copy_listener,
            Route::Read => &self.read_listener,
            Route::Drain => &self.drain_listener,
        }
    }

    fn attached(&self) -> MutexGuard<'_, Option<Vec<(EventKind, Listener)>>> {
        lock(&self.attached)
    }
}

impl Drop for ClipboardBridge {
    fn drop(&mut self) {
        self.deactivate();
    }
}

impl std::fmt::Debug for ClipboardBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClipboardBridge")
            .field("mode", &self.mode)
            .field("env", &self.shared.env)
            .field("active", &self.is_active())
            .field("staged", &self.staged_len())
            .finish()
    }
}

/// Builder for [`ClipboardBridge`].
pub struct ClipboardBridgeBuilder {
    target: Arc<dyn EventSource>,
    env: Environment,
    mode: PlatformMode,
    warnings: Arc<dyn WarningSink>,
    capability: &'static Capability,
}

impl ClipboardBridgeBuilder {
    pub fn mode(mut self, mode: PlatformMode) -> Self {
        self.mode = mode;
        self
    }

    /// Where read/write failures are reported. Defaults to `tracing`.
    pub fn warnings(mut self, sink: Arc<dyn WarningSink>) -> Self {
        self.warnings = sink;
        self
    }

    /// Use a private capability gate instead of the process-wide one.
    pub fn capability(mut self, capability: &'static Capability) -> Self {
        self.capability = capability;
        self
    }

    pub fn build(self) -> ClipboardBridge {
        let staging = match self.mode {
            PlatformMode::GestureRestricted => Some(StagingQueue::new()),
            PlatformMode::Unrestricted => None,
        };
        let shared = Arc::new(Shared {
            env: self.env,
            staging,
            on_paste: Mutex::new(noop_paste()),
            warnings: self.warnings,
        });
        // Resolved once up front; later bridges reuse the answer.
        self.capability.resolve(&shared.env);

        let weak = Arc::downgrade(&shared);
        ClipboardBridge {
            target: self.target,
            copy_listener: route_listener(&weak, Route::Copy),
            read_listener: route_listener(&weak, Route::Read),
            drain_listener: route_listener(&weak, Route::Drain),
            shared,
            mode: self.mode,
            capability: self.capability,
            attached: Mutex::new(None),
        }
    }
}

/// Listener running one handler against the bridge state. Holds a weak
/// reference so a host keeping stale listeners does not keep the bridge
/// state alive.
fn route_listener(shared: &Weak<Shared>, route: Route) -> Listener {
    let shared = Weak::clone(shared);
    Listener::new(move |event: InteractionEvent| {
        let shared = shared.upgrade();
        async move {
            let Some(shared) = shared else {
                return;
            };
            match route {
                Route::Copy => {
                    let text = event.copied_text().unwrap_or_default().to_owned();
                    shared.handle_copy(text).await;
                }
                Route::Read => shared.handle_read().await,
                Route::Drain => shared.drain().await,
            }
        }
    })
}

fn noop_paste() -> PasteCallback {
    Arc::new(|_| {})
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}
