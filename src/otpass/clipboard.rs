use crate::error::{OtpassError, Result};
use std::io::Write;
use std::process::{Command, Stdio};

/// Destination for generated codes.
pub trait Clipboard {
    fn copy(&mut self, text: &str) -> Result<()>;
}

/// The OS clipboard, driven through the platform's copy helper:
/// - macOS: pbcopy
/// - Linux: wl-copy, then xclip, then xsel
/// - Windows: clip.exe
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn copy(&mut self, text: &str) -> Result<()> {
        copy_to_clipboard(text)
    }
}

fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut last_error = None;
    for &(program, args) in HELPERS {
        match pipe_to(program, args, text) {
            Ok(()) => return Ok(()),
            Err(e) => last_error = Some(e),
        }
    }
    Err(last_error.unwrap_or_else(|| {
        OtpassError::Clipboard("Clipboard not supported on this platform".to_string())
    }))
}

type Helper = (&'static str, &'static [&'static str]);

#[cfg(target_os = "macos")]
const HELPERS: &[Helper] = &[("pbcopy", &[])];

// Wayland first, then X11
#[cfg(target_os = "linux")]
const HELPERS: &[Helper] = &[
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
];

#[cfg(target_os = "windows")]
const HELPERS: &[Helper] = &[("clip", &[])];

#[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
const HELPERS: &[Helper] = &[];

fn pipe_to(program: &str, args: &[&str], text: &str) -> Result<()> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| OtpassError::Clipboard(format!("Failed to spawn {}: {}", program, e)))?;

    if let Some(mut stdin) = child.stdin.take() {
        if let Err(e) = stdin.write_all(text.as_bytes()) {
            drop(stdin);
            let _ = child.kill();
            let _ = child.wait();
            return Err(OtpassError::Clipboard(format!(
                "Failed to write to {}: {}",
                program, e
            )));
        }
    }

    let status = child
        .wait()
        .map_err(|e| OtpassError::Clipboard(format!("Failed to wait for {}: {}", program, e)))?;

    if status.success() {
        Ok(())
    } else {
        Err(OtpassError::Clipboard(format!("{} exited with error", program)))
    }
}
