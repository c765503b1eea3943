//! Console command parsing.
//!
//! One command per line:
//!
//! ```text
//! copy <text>      copy inside the session (\n, \t, \\ escapes allowed)
//! focus            session element gains focus
//! pointerdown      pointer pressed on the session element
//! mouseup          mouse button released
//! keyup            key released
//! activate         attach the bridge's listeners
//! deactivate       detach them
//! status           print bridge state
//! quit             stop reading
//! ```

use std::str::FromStr;

use crate::resolver::{EventKind, InteractionEvent};

use super::ConsoleError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Event(InteractionEvent),
    Activate,
    Deactivate,
    Status,
    Quit,
}

impl FromStr for ConsoleCommand {
    type Err = ConsoleError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim_end_matches(['\r', '\n']);
        let (word, rest) = line.split_once(' ').unwrap_or((line, ""));

        let command = match word.parse::<EventKind>() {
            Ok(EventKind::Copy) if rest.is_empty() => {
                ConsoleCommand::Event(InteractionEvent::Copy { text: None })
            }
            Ok(EventKind::Copy) => ConsoleCommand::Event(InteractionEvent::copy(unescape(rest)?)),
            Ok(EventKind::Focus) => ConsoleCommand::Event(InteractionEvent::Focus),
            Ok(EventKind::PointerDown) => ConsoleCommand::Event(InteractionEvent::PointerDown),
            Ok(EventKind::MouseUp) => ConsoleCommand::Event(InteractionEvent::MouseUp),
            Ok(EventKind::KeyUp) => ConsoleCommand::Event(InteractionEvent::KeyUp),
            Err(_) => match word {
                "activate" => ConsoleCommand::Activate,
                "deactivate" => ConsoleCommand::Deactivate,
                "status" => ConsoleCommand::Status,
                "quit" | "exit" => ConsoleCommand::Quit,
                other => return Err(ConsoleError::UnknownCommand(other.to_string())),
            },
        };

        let takes_text = matches!(command, ConsoleCommand::Event(InteractionEvent::Copy { .. }));
        if !rest.is_empty() && !takes_text {
            return Err(ConsoleError::UnexpectedArgument(word.to_string()));
        }
        Ok(command)
    }
}

/// Expand `\n`, `\t` and `\\`.
fn unescape(raw: &str) -> Result<String, ConsoleError> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('\\') => out.push('\\'),
            Some(other) => return Err(ConsoleError::BadEscape(other)),
            None => return Err(ConsoleError::BadEscape('\\')),
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Result<ConsoleCommand, ConsoleError> {
        line.parse()
    }

    #[test]
    fn copy_keeps_inner_spaces() {
        assert_eq!(
            parse("copy hello  world").unwrap(),
            ConsoleCommand::Event(InteractionEvent::copy("hello  world"))
        );
    }

    #[test]
    fn bare_copy_has_no_text() {
        assert_eq!(
            parse("copy").unwrap(),
            ConsoleCommand::Event(InteractionEvent::Copy { text: None })
        );
    }

    #[test]
    fn copy_escapes() {
        assert_eq!(
            parse("copy a\\nb\\t\\\\c").unwrap(),
            ConsoleCommand::Event(InteractionEvent::copy("a\nb\t\\c"))
        );
        assert!(matches!(parse("copy x\\q"), Err(ConsoleError::BadEscape('q'))));
        assert!(matches!(parse("copy x\\"), Err(ConsoleError::BadEscape('\\'))));
    }

    #[test]
    fn event_words() {
        assert_eq!(
            parse("focus").unwrap(),
            ConsoleCommand::Event(InteractionEvent::Focus)
        );
        assert_eq!(
            parse("pointerdown").unwrap(),
            ConsoleCommand::Event(InteractionEvent::PointerDown)
        );
        assert_eq!(
            parse("mouseup\r\n").unwrap(),
            ConsoleCommand::Event(InteractionEvent::MouseUp)
        );
        assert_eq!(
            parse("keyup").unwrap(),
            ConsoleCommand::Event(InteractionEvent::KeyUp)
        );
    }

    #[test]
    fn control_words() {
        assert_eq!(parse("activate").unwrap(), ConsoleCommand::Activate);
        assert_eq!(parse("deactivate").unwrap(), ConsoleCommand::Deactivate);
        assert_eq!(parse("status").unwrap(), ConsoleCommand::Status);
        assert_eq!(parse("quit").unwrap(), ConsoleCommand::Quit);
        assert_eq!(parse("exit").unwrap(), ConsoleCommand::Quit);
    }

    #[test]
    fn unknown_command_rejected() {
        assert!(matches!(
            parse("paste"),
            Err(ConsoleError::UnknownCommand(word)) if word == "paste"
        ));
    }

    #[test]
    fn argument_on_bare_command_rejected() {
        assert!(matches!(
            parse("focus now"),
            Err(ConsoleError::UnexpectedArgument(word)) if word == "focus"
        ));
    }
}
