// SPDX-License-Identifier: MIT OR Apache-2.0

//! # libpopi
//!
//! Small terminal output helpers: bordered text frames, single-line progress
//! bars, and an inline markup language that expands to ANSI escape sequences.
//!
//! ## Features
//!
//! - **Markup**: `<b>`, `<u>`, `<red>`, `<bright_blue_bg>`, `<reset>`, ... expand to
//!   escape sequences, or are stripped when the terminal has no color
//! - **Frames**: box-drawing borders around markup text, divider rows, line edits
//!   and in-place redraws that overwrite the previous draw
//! - **Progress bars**: capped glyph sets, counts and percentages, redrawn on the
//!   current line
//! - **Presets**: a registry of named bar styles
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use libpopi::{Frame, ProgressBar};
//!
//! # fn main() -> libpopi::Result<()> {
//! let mut frame = Frame::new("<b>Hello<reset> <u>World<reset>!")
//!     .with_style("<yellow>");
//! frame.append_divider().append_line("Welcome!");
//! println!("{frame}");
//!
//! let mut bar = ProgressBar::standard(25, 25).with_precision(0);
//! for _ in 0..25 {
//!     bar.add(1).render_in_place()?;
//! }
//! bar.finish()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## In-place frames
//!
//! ```rust,no_run
//! use libpopi::Frame;
//!
//! # fn main() -> libpopi::Result<()> {
//! let mut frame = Frame::new("Downloading...");
//! let mut session = frame.display()?;
//! session.replace_line(0, "<green>Done<reset>")?;
//! session.refresh()?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod frame;
pub mod logger;
pub mod markup;
pub mod progress;
pub mod registry;
pub mod terminal;

pub use config::{ColorMode, Config, Verbosity};
pub use error::{Error, Result};
pub use frame::{DrawOutcome, Frame, FrameSession};
pub use markup::{MarkupTag, RULE, expand, strip, visible_length};
pub use progress::{BarStyle, ProgressBar};
pub use registry::{BarFactory, Registry};
pub use terminal::terminal_supports_color;

/// builds a progress bar from the preset, length and precision in `config`.
pub fn bar_from_config(registry: &Registry, config: &Config, total: u64) -> Result<ProgressBar> {
    Ok(registry
        .build(&config.bar_preset, total, config.bar_length)?
        .with_precision(config.precision)
        .with_color(config.color))
}
