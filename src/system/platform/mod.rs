//! Platform abstraction layer
//!
//! Picks the external copy program used when the system clipboard API is
//! unavailable.
//! - `unix.rs`: macOS / Wayland / X11 programs
//! - `windows.rs`: `clip.exe`

#[cfg(unix)]
mod unix;
#[cfg(windows)]
mod windows;

#[cfg(unix)]
pub use unix::*;
#[cfg(windows)]
pub use windows::*;

/// An external program plus its arguments, e.g. `xclip -selection clipboard`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl CopyCommand {
    pub fn new(program: &str, args: &[&str]) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Parse a whitespace separated command line. Returns `None` when blank.
    pub fn parse(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace();
        let program = parts.next()?.to_string();
        Some(Self {
            program,
            args: parts.map(String::from).collect(),
        })
    }
}

/// Returns true if `program` resolves to a file on `PATH`.
pub fn is_on_path(program: &str) -> bool {
    let Some(paths) = std::env::var_os("PATH") else {
        return false;
    };
    std::env::split_paths(&paths).any(|dir| {
        let candidate = dir.join(program);
        candidate.is_file() || (cfg!(windows) && candidate.with_extension("exe").is_file())
    })
}

/// First available copy program for this platform.
pub fn detect_copy_command() -> Option<CopyCommand> {
    copy_command_candidates()
        .into_iter()
        .find(|cmd| is_on_path(&cmd.program))
}

/// Get the platform name for logging/debugging
pub fn platform_name() -> &'static str {
    #[cfg(unix)]
    return "Unix/Linux";
    #[cfg(windows)]
    return "Windows";
}
