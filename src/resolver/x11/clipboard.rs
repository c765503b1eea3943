//! X11 clipboard provider — read/write via `xclip`.
//!
//! Wraps `xclip -selection clipboard` for clipboard access. Runs the
//! program through `tokio::process` so a slow X server stalls only the
//! handler awaiting it.

use std::ffi::OsString;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::resolver::{ResolverError, SystemClipboard};

/// X11 implementation of `SystemClipboard` via `xclip`.
#[derive(Debug, Clone)]
pub struct XclipClipboard {
    program: OsString,
    /// Arguments placed before the xclip arguments (interpreter scripts).
    leading_args: Vec<OsString>,
}

impl XclipClipboard {
    /// Use a specific xclip-compatible program, looked up in `$PATH`
    /// unless it is a path.
    pub fn with_program(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            leading_args: Vec::new(),
        }
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.leading_args);
        cmd.args(["-selection", "clipboard"]);
        cmd
    }
}

#[async_trait]
impl SystemClipboard for XclipClipboard {
    async fn read_text(&self) -> Result<String, ResolverError> {
        let output = self
            .command()
            .arg("-o")
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .await
            .map_err(|e| ResolverError::Clipboard(format!("failed to spawn xclip -o: {e}")))?;

        if !output.status.success() {
            return Err(ResolverError::Clipboard(format!(
                "xclip -o exited with status {}",
                output.status
            )));
        }

        String::from_utf8(output.stdout)
            .map_err(|e| ResolverError::Clipboard(format!("clipboard is not UTF-8 text: {e}")))
    }

    async fn write_text(&self, text: &str) -> Result<(), ResolverError> {
        let mut child = self
            .command()
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| ResolverError::Clipboard(format!("failed to spawn xclip: {e}")))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(text.as_bytes())
                .await
                .map_err(|e| ResolverError::Clipboard(format!("failed to write to xclip: {e}")))?;
            // Drop stdin to close the pipe so xclip can finish.
        }

        let status = child
            .wait()
            .await
            .map_err(|e| ResolverError::Clipboard(format!("failed to wait for xclip: {e}")))?;

        if status.success() {
            Ok(())
        } else {
            Err(ResolverError::Clipboard(format!(
                "xclip exited with status {status}"
            )))
        }
    }
}
