// SPDX-License-Identifier: MIT OR Apache-2.0

//! a `log` backend for binaries that writes colored, timestamped lines to stderr.
//!
//! the library itself only uses the `log` macros; call [`init`] from a binary
//! to see its messages.

use std::io::{self, Write};

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

use crate::terminal;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

// ── ANSI color codes ─────────────────────────────────────────────────────────

const TEAL: &str = "\x1b[38;5;30m";
const AQUA: &str = "\x1b[38;5;44m";
const GRAY: &str = "\x1b[37m";
const WHITE: &str = "\x1b[97m";
const YELLOW: &str = "\x1b[38;5;220m";
const BOLD_GREEN: &str = "\x1b[01;32m";
const BOLD_YELLOW: &str = "\x1b[01;38;5;226m";
const BOLD_RED: &str = "\x1b[31;1m";
const RESET_WEIGHT: &str = "\x1b[22m";
const RESET: &str = "\x1b[0m";

/// colors for the timestamp, the level name and the message of one level.
fn palette(level: Level) -> (&'static str, &'static str, &'static str) {
    match level {
        Level::Error => (AQUA, BOLD_RED, ""),
        Level::Warn => (AQUA, BOLD_YELLOW, YELLOW),
        Level::Info => (AQUA, BOLD_GREEN, WHITE),
        Level::Debug | Level::Trace => (TEAL, GRAY, ""),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsoleLogger {
    level: LevelFilter,
    color: bool,
}

impl ConsoleLogger {
    /// creates a logger that colors its output when stderr is a terminal.
    pub fn new(level: LevelFilter) -> Self {
        Self {
            level,
            color: terminal::stderr_supports_ansi(),
        }
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn level(&self) -> LevelFilter {
        self.level
    }

    /// formats one line as `[timestamp] LEVEL: message`, the level right-aligned to 8 columns.
    pub fn format(&self, level: Level, timestamp: &str, message: &str) -> String {
        if !self.color {
            return format!("[{timestamp}] {:>8}: {message}", level.as_str());
        }

        let (time_color, level_color, message_color) = palette(level);
        format!(
            "{time_color}[{timestamp}] {level_color}{:>8}{RESET_WEIGHT}: {message_color}{message}{RESET}",
            level.as_str()
        )
    }
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let timestamp = chrono::Local::now().format(TIME_FORMAT).to_string();
        let line = self.format(record.level(), &timestamp, &record.args().to_string());
        let mut err = io::stderr().lock();
        writeln!(err, "{line}").ok();
    }

    fn flush(&self) {
        io::stderr().flush().ok();
    }
}

/// installs a [`ConsoleLogger`] as the global logger.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    let logger: &'static ConsoleLogger = Box::leak(Box::new(ConsoleLogger::new(level)));
    log::set_logger(logger)?;
    log::set_max_level(level);
    Ok(())
}
