//! Output formatting for the console driver.
//!
//! Pasted text goes to stdout so it can be piped; everything else goes
//! to stderr.

use crate::bridge::{ClipboardBridge, PlatformMode};

/// Print text delivered to the remote session.
pub fn print_paste(text: String) {
    println!("paste: {}", text.escape_debug());
}

/// Print the bridge's current state.
pub fn print_status(bridge: &ClipboardBridge) {
    eprintln!(
        "supported: {}  active: {}  mode: {}  staged: {}",
        yes_no(bridge.is_supported()),
        yes_no(bridge.is_active()),
        mode_name(bridge.mode()),
        bridge.staged_len(),
    );
    for (i, text) in bridge.staged().iter().enumerate() {
        eprintln!("  [{i}] {}", text.escape_debug());
    }
}

fn mode_name(mode: PlatformMode) -> &'static str {
    match mode {
        PlatformMode::Unrestricted => "unrestricted",
        PlatformMode::GestureRestricted => "gesture-restricted",
    }
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}
