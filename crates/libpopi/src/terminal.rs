// SPDX-License-Identifier: MIT OR Apache-2.0

//! terminal capability probes and the control sequences used for in-place redraws.

use std::ffi::OsStr;
use std::io;
#[cfg(windows)]
use std::sync::OnceLock;

use is_terminal::IsTerminal;

/// erases from the cursor to the end of the line.
pub const ERASE_LINE: &str = "\x1b[K";

/// moves the cursor to the start of the line `rows` lines up.
pub fn cursor_previous_line(rows: usize) -> String {
    format!("\x1b[{rows}F")
}

/// switches the windows console into virtual terminal mode once per process.
/// returns false when the console refuses, e.g. on legacy conhost.
#[cfg(windows)]
fn console_accepts_ansi() -> bool {
    static ENABLED: OnceLock<bool> = OnceLock::new();
    *ENABLED.get_or_init(|| match enable_ansi_support::enable_ansi_support() {
        Ok(()) => true,
        Err(code) => {
            log::debug!("**terminal:** could not enable virtual terminal processing ({code})");
            false
        }
    })
}

#[cfg(not(windows))]
fn console_accepts_ansi() -> bool {
    true
}

/// returns true if stdout is an interactive terminal that understands ansi sequences.
pub fn stdout_supports_ansi() -> bool {
    io::stdout().is_terminal()
        && term_allows_ansi(std::env::var_os("TERM").as_deref())
        && console_accepts_ansi()
}

/// returns true if stderr is an interactive terminal that understands ansi sequences.
pub fn stderr_supports_ansi() -> bool {
    io::stderr().is_terminal()
        && term_allows_ansi(std::env::var_os("TERM").as_deref())
        && console_accepts_ansi()
}

/// returns true if colored output should be written to stdout.
/// honors `NO_COLOR` on top of the ansi probe.
pub fn terminal_supports_color() -> bool {
    stdout_supports_ansi() && color_allowed(std::env::var_os("NO_COLOR").as_deref())
}

/// [`terminal_supports_color`] for stderr.
pub fn stderr_supports_color() -> bool {
    stderr_supports_ansi() && color_allowed(std::env::var_os("NO_COLOR").as_deref())
}

fn term_allows_ansi(term: Option<&OsStr>) -> bool {
    term.is_none_or(|t| t != "dumb")
}

fn color_allowed(no_color: Option<&OsStr>) -> bool {
    no_color.is_none_or(OsStr::is_empty)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_previous_line() {
        assert_eq!(cursor_previous_line(5), "\x1b[5F");
    }

    #[test]
    fn test_term_allows_ansi() {
        assert!(term_allows_ansi(None));
        assert!(term_allows_ansi(Some(OsStr::new("xterm-256color"))));
        assert!(!term_allows_ansi(Some(OsStr::new("dumb"))));
    }

    #[cfg(not(windows))]
    #[test]
    fn test_console_needs_no_setup_outside_windows() {
        assert!(console_accepts_ansi());
    }

    #[test]
    fn test_color_allowed() {
        assert!(color_allowed(None));
        assert!(color_allowed(Some(OsStr::new(""))));
        assert!(!color_allowed(Some(OsStr::new("1"))));
    }
}
