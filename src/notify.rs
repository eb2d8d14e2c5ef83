//! Block notifications for the human at the terminal
//!
//! The model reads stderr; the user only sees the controlling terminal (CLI)
//! or stdout (editor extensions). The sink is picked once, when acquired.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

/// Marker in front of every block banner
pub const BLOCKED_MARKER: &str = "🚫 BLOCKED:";

/// Where user-facing block messages go
pub enum UserSink {
    /// The interactive terminal device
    Terminal(File),

    /// Standard output, when no terminal can be opened
    Stdout,
}

impl UserSink {
    /// Open `tty_path` for writing, falling back to stdout
    pub fn acquire(tty_path: &Path) -> Self {
        match OpenOptions::new().write(true).open(tty_path) {
            Ok(file) => UserSink::Terminal(file),
            Err(_) => UserSink::Stdout,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, UserSink::Terminal(_))
    }

    /// Write the block banner. A terminal that fails mid-write falls back to
    /// stdout; stdout errors are dropped.
    pub fn notify_blocked(self, message: &str) {
        if let UserSink::Terminal(mut tty) = self {
            let banner = format!("\n{} {}\n", BLOCKED_MARKER, message);
            if tty.write_all(banner.as_bytes()).and_then(|_| tty.flush()).is_ok() {
                return;
            }
        }

        let stdout = io::stdout();
        let mut handle = stdout.lock();
        let _ = writeln!(handle, "{} {}", BLOCKED_MARKER, message);
        let _ = handle.flush();
    }
}
