//! Copy-to-clipboard with a fallback path
//!
//! The system clipboard (arboard) is tried first. When it is unavailable, for
//! example on a headless session or a build without the `clipboard` feature,
//! the text is piped into an external copy program. That child process is
//! always killed and reaped before returning, whatever the outcome.

use std::io::Write;
use std::process::{Child, Command, ExitStatus, Stdio};

use tracing::{debug, warn};

use crate::config::ClipboardConfig;
use crate::errors::{Result, TinyLinkError};
use crate::system::platform::{CopyCommand, detect_copy_command, platform_name};

pub trait ClipboardSink: Send {
    fn name(&self) -> &'static str;
    fn write_text(&mut self, text: &str) -> Result<()>;
}

/// System clipboard via arboard.
#[cfg(feature = "clipboard")]
#[derive(Default)]
pub struct SystemClipboard;

#[cfg(feature = "clipboard")]
impl ClipboardSink for SystemClipboard {
    fn name(&self) -> &'static str {
        "system"
    }

    fn write_text(&mut self, text: &str) -> Result<()> {
        let mut clipboard = arboard::Clipboard::new()
            .map_err(|e| TinyLinkError::clipboard(format!("system clipboard unavailable: {}", e)))?;
        clipboard
            .set_text(text)
            .map_err(|e| TinyLinkError::clipboard(format!("system clipboard write failed: {}", e)))
    }
}

/// Stand-in primary when built without the `clipboard` feature.
#[cfg(not(feature = "clipboard"))]
#[derive(Default)]
pub struct SystemClipboard;

#[cfg(not(feature = "clipboard"))]
impl ClipboardSink for SystemClipboard {
    fn name(&self) -> &'static str {
        "system"
    }

    fn write_text(&mut self, _text: &str) -> Result<()> {
        Err(TinyLinkError::clipboard(
            "system clipboard support not compiled in",
        ))
    }
}

/// Kills and reaps the child unless it was already waited on.
struct ChildGuard {
    child: Child,
    reaped: bool,
}

impl ChildGuard {
    fn wait(&mut self) -> std::io::Result<ExitStatus> {
        let status = self.child.wait()?;
        self.reaped = true;
        Ok(status)
    }
}

impl Drop for ChildGuard {
    fn drop(&mut self) {
        if !self.reaped {
            let _ = self.child.kill();
            let _ = self.child.wait();
        }
    }
}

/// Pipes text into `pbcopy`, `clip`, `wl-copy`, `xclip`... on stdin.
pub struct CommandClipboard {
    command: Option<CopyCommand>,
}

impl CommandClipboard {
    /// `None` means auto-detect on first use.
    pub fn new(command: Option<CopyCommand>) -> Self {
        Self { command }
    }

    pub fn from_config(config: &ClipboardConfig) -> Self {
        Self::new(
            config
                .fallback_command
                .as_deref()
                .and_then(CopyCommand::parse),
        )
    }
}

impl ClipboardSink for CommandClipboard {
    fn name(&self) -> &'static str {
        "command"
    }

    fn write_text(&mut self, text: &str) -> Result<()> {
        if self.command.is_none() {
            self.command = detect_copy_command();
            debug!(
                "Detected copy program {:?} on {}",
                self.command.as_ref().map(|c| c.program.as_str()),
                platform_name()
            );
        }
        let cmd = self
            .command
            .as_ref()
            .ok_or_else(|| TinyLinkError::clipboard("no clipboard program found"))?;

        let child = Command::new(&cmd.program)
            .args(&cmd.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| TinyLinkError::clipboard(format!("failed to run {}: {}", cmd.program, e)))?;
        let mut guard = ChildGuard {
            child,
            reaped: false,
        };

        {
            let mut stdin = guard
                .child
                .stdin
                .take()
                .ok_or_else(|| TinyLinkError::clipboard("copy program has no stdin"))?;
            stdin.write_all(text.as_bytes()).map_err(|e| {
                TinyLinkError::clipboard(format!("failed to write to {}: {}", cmd.program, e))
            })?;
            // stdin 在此处关闭，子进程才能读到 EOF
        }

        let status = guard
            .wait()
            .map_err(|e| TinyLinkError::clipboard(format!("{} did not finish: {}", cmd.program, e)))?;
        if !status.success() {
            return Err(TinyLinkError::clipboard(format!(
                "{} exited with {}",
                cmd.program, status
            )));
        }
        Ok(())
    }
}

pub struct Clipboard {
    primary: Box<dyn ClipboardSink>,
    fallback: Box<dyn ClipboardSink>,
}

impl Clipboard {
    pub fn new(primary: Box<dyn ClipboardSink>, fallback: Box<dyn ClipboardSink>) -> Self {
        Self { primary, fallback }
    }

    /// System clipboard first, configured (or detected) copy program second.
    pub fn from_config(config: &ClipboardConfig) -> Self {
        Self::new(
            Box::new(SystemClipboard),
            Box::new(CommandClipboard::from_config(config)),
        )
    }

    /// Succeeds as soon as either path succeeds.
    pub fn copy_to_clipboard(&mut self, text: &str) -> Result<()> {
        let primary_err = match self.primary.write_text(text) {
            Ok(()) => {
                debug!("Copied {} bytes via {}", text.len(), self.primary.name());
                return Ok(());
            }
            Err(e) => e,
        };
        debug!(
            "{} clipboard failed ({}), trying {}",
            self.primary.name(),
            primary_err.message(),
            self.fallback.name()
        );

        match self.fallback.write_text(text) {
            Ok(()) => {
                debug!("Copied {} bytes via {}", text.len(), self.fallback.name());
                Ok(())
            }
            Err(fallback_err) => {
                warn!("Clipboard copy failed on both paths");
                Err(TinyLinkError::clipboard(format!(
                    "{}; {}",
                    primary_err.message(),
                    fallback_err.message()
                )))
            }
        }
    }
}
