//! X11 platform adapters.
//!
//! Only the clipboard is provided here. Interaction events come from the
//! embedding host, not from the X server.

mod clipboard;

pub use clipboard::XclipClipboard;
