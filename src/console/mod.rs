//! Console driver — feeds interaction events from stdin to a bridge.
//!
//! Stands in for the embedding host: each input line becomes one
//! interaction on an [`EventHub`] that the bridge is bound to, and text
//! the bridge pastes into the session is printed to stdout. Useful for
//! exercising a real system clipboard (via xclip) by hand or from a
//! script.

mod command;
mod format;

use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use crate::bridge::{ClipboardBridge, PlatformMode};
use crate::cli::Cli;
use crate::resolver::{
    Environment, EventHub, EventSource, MemoryClipboard, StaticPermissions, SystemClipboard,
    XclipClipboard,
};

pub use command::ConsoleCommand;

/// Console errors.
#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    #[error("{0} takes no argument")]
    UnexpectedArgument(String),
    #[error("invalid escape: \\{0}")]
    BadEscape(char),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Run the console until `quit` or end of input.
///
/// Called from `main.rs`. The bridge is activated before the first line
/// is read and deactivated on exit.
pub async fn run(cli: Cli) -> Result<(), ConsoleError> {
    let env = environment(&cli);
    let hub = Arc::new(EventHub::new());
    let bridge = ClipboardBridge::new(
        Arc::clone(&hub) as Arc<dyn EventSource>,
        env,
        PlatformMode::from_gesture_restricted(cli.gesture_restricted),
    );
    bridge.set_on_paste(format::print_paste);

    if !bridge.is_supported() {
        eprintln!("warning: no clipboard available, bridge stays inactive");
    }
    bridge.activate();
    tracing::info!(mode = ?bridge.mode(), active = bridge.is_active(), "console ready");

    let dispatched = drive(&bridge, &hub, BufReader::new(tokio::io::stdin())).await?;

    bridge.deactivate();
    tracing::info!(dispatched, "console stopped");
    Ok(())
}

/// Process commands from `reader` against `bridge` and `hub`.
///
/// Bad lines, including ones that are not valid UTF-8, are reported on
/// stderr and skipped. Returns the number of interaction events
/// dispatched.
pub async fn drive<R>(
    bridge: &ClipboardBridge,
    hub: &EventHub,
    reader: R,
) -> Result<usize, ConsoleError>
where
    R: AsyncBufRead + Unpin,
{
    let mut segments = reader.split(b'\n');
    let mut dispatched = 0;

    while let Some(segment) = segments.next_segment().await? {
        let line = match String::from_utf8(segment) {
            Ok(line) => line,
            Err(e) => {
                eprintln!("error: {e}");
                continue;
            }
        };
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }
        let command = match line.parse::<ConsoleCommand>() {
            Ok(command) => command,
            Err(e) => {
                eprintln!("error: {e}");
                continue;
            }
        };

        match command {
            ConsoleCommand::Event(event) => {
                let kind = event.kind();
                let listeners = hub.dispatch(event).await;
                tracing::debug!(%kind, listeners, "event dispatched");
                dispatched += 1;
            }
            ConsoleCommand::Activate => bridge.activate(),
            ConsoleCommand::Deactivate => bridge.deactivate(),
            ConsoleCommand::Status => format::print_status(bridge),
            ConsoleCommand::Quit => break,
        }
    }

    Ok(dispatched)
}

/// Build the host environment described by the command line.
pub fn environment(cli: &Cli) -> Environment {
    if cli.no_clipboard {
        return Environment::default();
    }

    let clipboard: Arc<dyn SystemClipboard> = if cli.memory {
        Arc::new(MemoryClipboard::new())
    } else {
        Arc::new(XclipClipboard::with_program(&cli.xclip))
    };
    let env = Environment::with_clipboard(clipboard);
    if cli.no_permissions {
        return env;
    }

    let mut policy = StaticPermissions::granted();
    if cli.deny_read {
        policy = policy.deny_read();
    }
    if cli.deny_write {
        policy = policy.deny_write();
    }
    env.permissions(Arc::new(policy))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    use crate::bridge::Capability;
    use crate::resolver::{
        PermissionDescriptor, PermissionName, PermissionProbe, PermissionState,
    };

    fn memory_bridge(mode: PlatformMode) -> (Arc<EventHub>, Arc<MemoryClipboard>, ClipboardBridge) {
        let hub = Arc::new(EventHub::new());
        let clipboard = Arc::new(MemoryClipboard::with_text("desktop text"));
        let env = Environment::with_clipboard(Arc::clone(&clipboard) as Arc<dyn SystemClipboard>);
        let bridge = ClipboardBridge::builder(Arc::clone(&hub) as Arc<dyn EventSource>, env)
            .mode(mode)
            .capability(Box::leak(Box::new(Capability::new())))
            .build();
        (hub, clipboard, bridge)
    }

    #[tokio::test]
    async fn script_copies_through_bridge() {
        let (hub, clipboard, bridge) = memory_bridge(PlatformMode::Unrestricted);
        let script = b"# comment\nactivate\ncopy from session\n\nbogus\nstatus\n";

        let dispatched = drive(&bridge, &hub, &script[..]).await.unwrap();

        assert_eq!(dispatched, 1);
        assert_eq!(clipboard.text(), "from session");
    }

    #[tokio::test]
    async fn script_stages_until_release() {
        let (hub, clipboard, bridge) = memory_bridge(PlatformMode::GestureRestricted);
        bridge.activate();

        drive(&bridge, &hub, &b"copy one\ncopy two\n"[..])
            .await
            .unwrap();
        assert_eq!(clipboard.text(), "desktop text");
        assert_eq!(bridge.staged_len(), 2);

        drive(&bridge, &hub, &b"mouseup\n"[..]).await.unwrap();
        assert_eq!(clipboard.text(), "two");
        assert_eq!(bridge.staged_len(), 0);
    }

    #[tokio::test]
    async fn focus_pastes_clipboard_text() {
        let (hub, _clipboard, bridge) = memory_bridge(PlatformMode::Unrestricted);
        bridge.activate();
        let pasted = Arc::new(std::sync::Mutex::new(Vec::new()));
        let sink = Arc::clone(&pasted);
        bridge.set_on_paste(move |text| sink.lock().unwrap().push(text));

        drive(&bridge, &hub, &b"focus\n"[..]).await.unwrap();

        assert_eq!(*pasted.lock().unwrap(), vec!["desktop text"]);
    }

    #[tokio::test]
    async fn undecodable_line_is_skipped() {
        let (hub, clipboard, bridge) = memory_bridge(PlatformMode::Unrestricted);
        bridge.activate();
        let script = b"copy \xff\xfe\ncopy after\r\n";

        let dispatched = drive(&bridge, &hub, &script[..]).await.unwrap();

        assert_eq!(dispatched, 1);
        assert_eq!(clipboard.text(), "after");
    }

    #[tokio::test]
    async fn quit_stops_reading() {
        let (hub, clipboard, bridge) = memory_bridge(PlatformMode::Unrestricted);
        bridge.activate();

        let dispatched = drive(&bridge, &hub, &b"quit\ncopy ignored\n"[..])
            .await
            .unwrap();

        assert_eq!(dispatched, 0);
        assert_eq!(clipboard.text(), "desktop text");
    }

    #[tokio::test]
    async fn deactivate_command_detaches() {
        let (hub, clipboard, bridge) = memory_bridge(PlatformMode::Unrestricted);

        drive(&bridge, &hub, &b"activate\ndeactivate\ncopy lost\n"[..])
            .await
            .unwrap();

        assert!(!bridge.is_active());
        assert_eq!(hub.total_listeners(), 0);
        assert_eq!(clipboard.text(), "desktop text");
    }

    #[test]
    fn no_clipboard_flag_yields_empty_environment() {
        let cli = Cli::parse_from(["clipbridge", "--no-clipboard"]);
        let env = environment(&cli);
        assert!(!env.has_clipboard());
        assert!(env.permissions.is_none());
    }

    #[test]
    fn no_permissions_flag_omits_probe() {
        let cli = Cli::parse_from(["clipbridge", "--memory", "--no-permissions"]);
        let env = environment(&cli);
        assert!(env.has_clipboard());
        assert!(env.permissions.is_none());
    }

    #[tokio::test]
    async fn deny_flags_shape_policy() {
        let cli = Cli::parse_from(["clipbridge", "--memory", "--deny-write"]);
        let probe = environment(&cli).permissions.unwrap();

        let write = probe
            .query(PermissionDescriptor::new(PermissionName::ClipboardWrite))
            .await
            .unwrap();
        let read = probe
            .query(PermissionDescriptor::new(PermissionName::ClipboardRead))
            .await
            .unwrap();
        assert_eq!(write, PermissionState::Denied);
        assert_eq!(read, PermissionState::Granted);
    }
}
