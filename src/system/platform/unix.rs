use super::CopyCommand;

/// Copy programs in preference order.
///
/// macOS always has `pbcopy`. Elsewhere Wayland sessions prefer `wl-copy`,
/// then the X11 tools.
pub fn copy_command_candidates() -> Vec<CopyCommand> {
    if cfg!(target_os = "macos") {
        return vec![CopyCommand::new("pbcopy", &[])];
    }

    let mut candidates = Vec::with_capacity(3);
    if std::env::var_os("WAYLAND_DISPLAY").is_some() {
        candidates.push(CopyCommand::new("wl-copy", &[]));
    }
    candidates.push(CopyCommand::new("xclip", &["-selection", "clipboard"]));
    candidates.push(CopyCommand::new("xsel", &["--clipboard", "--input"]));
    candidates
}
