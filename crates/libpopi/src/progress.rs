// SPDX-License-Identifier: MIT OR Apache-2.0

//! single-line progress bars redrawn in place with a carriage return.

use std::fmt;
use std::io::{self, Write};

use crate::{ColorMode, Result, markup, terminal};

// ── Glyphs ───────────────────────────────────────────────────────────────────

/// the glyphs a bar is drawn with.
///
/// the first and last cell of a bar can differ from the middle cells, so a bar
/// can have capped or rounded ends. unset caps fall back as follows:
/// `start_fill` and `end_fill` to `fill`; `start_empty` and `end_empty` to the
/// explicit fill cap on the same end, and otherwise to `empty`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarStyle {
    pub fill: String,
    pub empty: String,
    pub start_fill: Option<String>,
    pub end_fill: Option<String>,
    pub start_empty: Option<String>,
    pub end_empty: Option<String>,
}

impl Default for BarStyle {
    fn default() -> Self {
        Self::new("#", "-")
    }
}

impl BarStyle {
    pub fn new(fill: impl Into<String>, empty: impl Into<String>) -> Self {
        Self {
            fill: fill.into(),
            empty: empty.into(),
            start_fill: None,
            end_fill: None,
            start_empty: None,
            end_empty: None,
        }
    }

    /// sets the first and last glyph used while that end of the bar is filled.
    pub fn with_caps(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.start_fill = Some(start.into());
        self.end_fill = Some(end.into());
        self
    }

    /// sets the first and last glyph used while that end of the bar is empty.
    pub fn with_empty_caps(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.start_empty = Some(start.into());
        self.end_empty = Some(end.into());
        self
    }

    pub fn start_fill(&self) -> &str {
        self.start_fill.as_deref().unwrap_or(&self.fill)
    }

    pub fn end_fill(&self) -> &str {
        self.end_fill.as_deref().unwrap_or(&self.fill)
    }

    pub fn start_empty(&self) -> &str {
        self.start_empty
            .as_deref()
            .or(self.start_fill.as_deref())
            .unwrap_or(&self.empty)
    }

    pub fn end_empty(&self) -> &str {
        self.end_empty
            .as_deref()
            .or(self.end_fill.as_deref())
            .unwrap_or(&self.empty)
    }

    /// `#` and `-` between square brackets.
    pub fn standard() -> Self {
        Self::new("#", "-").with_caps("[", "]")
    }

    /// `#` and blanks between pipes.
    pub fn classic() -> Self {
        Self::new("#", " ").with_caps("|", "|")
    }

    /// full blocks on a blank track.
    pub fn blocks() -> Self {
        Self::new("█", " ")
    }

    /// the progress bar ligature glyphs of the fira code font (U+EE00..U+EE05).
    pub fn fira_code() -> Self {
        Self::new("\u{ee04}", "\u{ee01}")
            .with_caps("\u{ee03}", "\u{ee05}")
            .with_empty_caps("\u{ee00}", "\u{ee02}")
    }
}

// ── Bar ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressBar {
    total: u64,
    length: usize,
    progress: u64,
    style: BarStyle,
    prefix: String,
    suffix: String,
    show_percent: bool,
    show_count: bool,
    leading_zero: bool,
    precision: usize,
    color: ColorMode,
}

impl ProgressBar {
    /// creates an empty bar. `total` and `length` are raised to at least 1.
    pub fn new(total: u64, length: usize) -> Self {
        Self {
            total: total.max(1),
            length: length.max(1),
            progress: 0,
            style: BarStyle::default(),
            prefix: String::new(),
            suffix: String::new(),
            show_percent: true,
            show_count: true,
            leading_zero: true,
            precision: 2,
            color: ColorMode::default(),
        }
    }

    pub fn standard(total: u64, length: usize) -> Self {
        Self::new(total, length).with_style(BarStyle::standard())
    }

    pub fn classic(total: u64, length: usize) -> Self {
        Self::new(total, length)
            .with_style(BarStyle::classic())
            .with_prefix("Bar")
    }

    pub fn blocks(total: u64, length: usize) -> Self {
        Self::new(total, length).with_style(BarStyle::blocks())
    }

    pub fn fira_code(total: u64, length: usize) -> Self {
        Self::new(total, length).with_style(BarStyle::fira_code())
    }

    /// sets the starting progress, clamped like [`ProgressBar::set`].
    pub fn with_progress(mut self, progress: i64) -> Self {
        self.set(progress);
        self
    }

    pub fn with_style(mut self, style: BarStyle) -> Self {
        self.style = style;
        self
    }

    /// text before the bar; may contain markup.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// text right after the bar; may contain markup.
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    pub fn with_percent(mut self, show: bool) -> Self {
        self.show_percent = show;
        self
    }

    pub fn with_count(mut self, show: bool) -> Self {
        self.show_count = show;
        self
    }

    /// pads the count with zeros (the default) or, when false, with spaces.
    pub fn with_leading_zero(mut self, leading_zero: bool) -> Self {
        self.leading_zero = leading_zero;
        self
    }

    /// decimal places shown in the percentage.
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    pub fn with_color(mut self, color: ColorMode) -> Self {
        self.color = color;
        self
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn progress(&self) -> u64 {
        self.progress
    }

    pub fn style(&self) -> &BarStyle {
        &self.style
    }

    pub fn is_complete(&self) -> bool {
        self.progress == self.total
    }

    /// completed fraction in `0.0..=1.0`.
    pub fn fraction(&self) -> f64 {
        self.progress as f64 / self.total as f64
    }

    /// sets the progress, clamped to `0..=total`.
    pub fn set(&mut self, value: i64) -> &mut Self {
        self.progress = u64::try_from(value).map_or(0, |v| v.min(self.total));
        self
    }

    /// moves the progress by `delta`, clamped to `0..=total`.
    pub fn add(&mut self, delta: i64) -> &mut Self {
        let current = i64::try_from(self.progress).unwrap_or(i64::MAX);
        self.set(current.saturating_add(delta))
    }

    fn filled_cells(&self) -> usize {
        let filled = u128::from(self.progress) * self.length as u128 / u128::from(self.total);
        usize::try_from(filled).map_or(self.length, |f| f.min(self.length))
    }

    /// the bar glyphs alone, without prefix, suffix, count or percentage.
    pub fn body(&self) -> String {
        let filled = self.filled_cells();
        let empty = self.length - filled;

        let start = if filled > 0 {
            self.style.start_fill()
        } else {
            self.style.start_empty()
        };
        let end = if empty > 0 {
            self.style.end_empty()
        } else {
            self.style.end_fill()
        };

        format!(
            "{start}{}{}{end}",
            self.style.fill.repeat(filled.saturating_sub(1)),
            self.style.empty.repeat(empty.saturating_sub(1)),
        )
    }

    fn count_display(&self) -> String {
        let digits = self.total.to_string().len();
        if self.leading_zero {
            format!("({:0digits$}/{})", self.progress, self.total)
        } else {
            format!("({:digits$}/{})", self.progress, self.total)
        }
    }

    /// renders the full line, colored according to the bar's color mode.
    pub fn render(&self) -> String {
        self.render_with(self.color.enabled())
    }

    /// renders the full line with color forced on or off.
    pub fn render_with(&self, color: bool) -> String {
        let mut parts = vec![format!("{}{}{}", self.prefix, self.body(), self.suffix)];

        if self.show_count {
            parts.push(self.count_display());
        }

        if self.show_percent {
            parts.push(format!(
                "{:.prec$}%",
                self.fraction() * 100.0,
                prec = self.precision
            ));
        }

        markup::expand(&parts.join(" "), color)
    }

    /// rewrites the current stdout line with the bar.
    pub fn render_in_place(&self) -> Result<()> {
        let ansi = terminal::stdout_supports_ansi();
        self.draw(&mut io::stdout().lock(), ansi)
    }

    /// rewrites the current line of `out` with the bar. no newline is written.
    pub fn draw<W: Write>(&self, out: &mut W, ansi: bool) -> Result<()> {
        let erase = if ansi { terminal::ERASE_LINE } else { "" };
        write!(out, "\r{}{erase}", self.render())?;
        out.flush()?;
        Ok(())
    }

    /// draws the bar a last time and moves stdout to the next line.
    pub fn finish(&self) -> Result<()> {
        let ansi = terminal::stdout_supports_ansi();
        let mut out = io::stdout().lock();
        self.draw(&mut out, ansi)?;
        writeln!(out)?;
        Ok(())
    }
}

impl fmt::Display for ProgressBar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}
