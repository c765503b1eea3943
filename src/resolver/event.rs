//! Interaction events and the EventSource trait.
//!
//! The vocabulary is deliberately small: the five DOM event names the
//! bridge listens for. Hosts map their own input events onto these.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;

/// Interaction kinds a listener can be registered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// The user copied inside the remote session.
    Copy,
    /// The session element gained input focus.
    Focus,
    /// Pointer pressed on the session element (gesture start).
    PointerDown,
    /// Mouse button released.
    MouseUp,
    /// Key released.
    KeyUp,
}

impl EventKind {
    pub const ALL: [EventKind; 5] = [
        EventKind::Copy,
        EventKind::Focus,
        EventKind::PointerDown,
        EventKind::MouseUp,
        EventKind::KeyUp,
    ];

    /// DOM event type name.
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Copy => "copy",
            EventKind::Focus => "focus",
            EventKind::PointerDown => "pointerdown",
            EventKind::MouseUp => "mouseup",
            EventKind::KeyUp => "keyup",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("unknown event kind: {s}"))
    }
}

/// An interaction raised by the event source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InteractionEvent {
    /// Copy with the plain-text payload, `None` if the copy carried no
    /// plain text.
    Copy { text: Option<String> },
    Focus,
    PointerDown,
    MouseUp,
    KeyUp,
}

impl InteractionEvent {
    /// Copy event carrying `text`.
    pub fn copy(text: impl Into<String>) -> Self {
        InteractionEvent::Copy {
            text: Some(text.into()),
        }
    }

    pub fn kind(&self) -> EventKind {
        match self {
            InteractionEvent::Copy { .. } => EventKind::Copy,
            InteractionEvent::Focus => EventKind::Focus,
            InteractionEvent::PointerDown => EventKind::PointerDown,
            InteractionEvent::MouseUp => EventKind::MouseUp,
            InteractionEvent::KeyUp => EventKind::KeyUp,
        }
    }

    /// Plain-text payload of a copy. Empty for a copy without text,
    /// `None` for every other kind.
    pub fn copied_text(&self) -> Option<&str> {
        match self {
            InteractionEvent::Copy { text } => Some(text.as_deref().unwrap_or_default()),
            _ => None,
        }
    }
}

/// A registered event handler.
///
/// Cheap to clone; clones share identity. Event sources compare
/// listeners by identity (like DOM `removeEventListener`), so the same
/// `Listener` value must be used to unsubscribe.
#[derive(Clone)]
pub struct Listener(Arc<dyn Fn(InteractionEvent) -> BoxFuture<'static, ()> + Send + Sync>);

impl Listener {
    pub fn new<F, Fut>(f: F) -> Self
    where
        F: Fn(InteractionEvent) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        Self(Arc::new(move |event: InteractionEvent| f(event).boxed()))
    }

    /// Invoke the handler. The returned future must be driven by the
    /// caller.
    pub fn call(&self, event: InteractionEvent) -> BoxFuture<'static, ()> {
        (self.0)(event)
    }

    /// Whether both values refer to the same handler.
    pub fn same(&self, other: &Listener) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Listener")
            .field(&Arc::as_ptr(&self.0).cast::<()>())
            .finish()
    }
}

/// Raises interaction events to subscribed listeners.
///
/// Registration follows DOM semantics: subscribing the same listener to
/// the same kind twice has no further effect, and unsubscribing a
/// listener that is not registered is a no-op.
pub trait EventSource: Send + Sync {
    fn subscribe(&self, kind: EventKind, listener: Listener);

    fn unsubscribe(&self, kind: EventKind, listener: &Listener);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_names_round_trip() {
        for kind in EventKind::ALL {
            assert_eq!(kind.as_str().parse::<EventKind>(), Ok(kind));
        }
    }

    #[test]
    fn unknown_kind_rejected() {
        assert!("pointerup".parse::<EventKind>().is_err());
        assert!("".parse::<EventKind>().is_err());
    }

    #[test]
    fn copy_without_text_yields_empty_payload() {
        let event = InteractionEvent::Copy { text: None };
        assert_eq!(event.copied_text(), Some(""));
        assert_eq!(InteractionEvent::copy("x").copied_text(), Some("x"));
        assert_eq!(InteractionEvent::Focus.copied_text(), None);
    }

    #[test]
    fn event_kind_matches_variant() {
        assert_eq!(InteractionEvent::copy("a").kind(), EventKind::Copy);
        assert_eq!(InteractionEvent::PointerDown.kind(), EventKind::PointerDown);
        assert_eq!(InteractionEvent::KeyUp.kind(), EventKind::KeyUp);
    }

    #[test]
    fn listener_identity_survives_clone() {
        let a = Listener::new(|_| async {});
        let b = Listener::new(|_| async {});
        assert!(a.same(&a.clone()));
        assert!(!a.same(&b));
    }
}
