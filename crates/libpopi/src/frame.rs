// SPDX-License-Identifier: MIT OR Apache-2.0

//! bordered text frames drawn with box-drawing glyphs.
//!
//! a frame owns its lines; width and row count are derived from them on every
//! render. lines may carry inline markup, and a line that is exactly [`RULE`]
//! renders as a divider row.

use std::fmt;
use std::io::{self, Stdout, Write};
use std::ops::{Deref, DerefMut};

use crate::{
    ColorMode, Error, Result,
    markup::{self, RULE},
    terminal,
};

const HORIZONTAL: &str = "─";
const VERTICAL: char = '│';

/// result of an in-place draw.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawOutcome {
    /// the rows were written to the stream.
    Drawn { rows: usize },
    /// the stream cannot handle cursor control; nothing was written.
    Skipped,
}

impl DrawOutcome {
    pub const fn is_drawn(self) -> bool {
        matches!(self, Self::Drawn { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    lines: Vec<String>,
    padding: usize,
    width: usize,
    fixed_width: Option<usize>,
    style: String,
    color: ColorMode,
    /// rows written by the last successful draw; `None` before the first one.
    drawn_rows: Option<usize>,
}

/// columns between the two vertical borders.
fn inner_width(width: usize, padding: usize) -> usize {
    width.saturating_add(padding.saturating_mul(2))
}

fn split_lines(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
}

impl Frame {
    /// creates a frame from text, one line per line break.
    pub fn new(text: &str) -> Self {
        Self::from_lines([text])
    }

    /// creates a frame from an explicit list of lines.
    /// an element holding line breaks contributes one line per break.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut frame = Self {
            lines: lines
                .into_iter()
                .flat_map(|line| split_lines(line.as_ref()).collect::<Vec<_>>())
                .collect(),
            padding: 1,
            width: 0,
            fixed_width: None,
            style: String::new(),
            color: ColorMode::default(),
            drawn_rows: None,
        };
        frame.recompute_width();
        frame
    }

    pub fn with_padding(mut self, padding: usize) -> Self {
        self.padding = padding;
        self
    }

    /// sets the content width instead of measuring it.
    /// lines wider than `width` still widen the frame so borders stay aligned.
    pub fn with_width(mut self, width: usize) -> Self {
        self.fixed_width = Some(width);
        self.recompute_width();
        self
    }

    /// sets the markup applied to every border glyph, e.g. `"<b><yellow>"`.
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = style.into();
        self
    }

    pub fn with_color(mut self, color: ColorMode) -> Self {
        self.color = color;
        self
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// content width as of the last edit or draw.
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn padding(&self) -> usize {
        self.padding
    }

    pub fn style(&self) -> &str {
        &self.style
    }

    pub fn color(&self) -> ColorMode {
        self.color
    }

    /// appends text, one line per line break.
    pub fn append_line(&mut self, text: &str) -> &mut Self {
        self.lines.extend(split_lines(text));
        self.recompute_width();
        self
    }

    /// appends an explicit list of lines, splitting elements on line breaks.
    pub fn append_lines<I, S>(&mut self, lines: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            self.lines.extend(split_lines(line.as_ref()));
        }
        self.recompute_width();
        self
    }

    /// appends a divider row.
    pub fn append_divider(&mut self) -> &mut Self {
        self.lines.push(RULE.to_string());
        self
    }

    /// overwrites the line at `index`. line breaks in `text` become spaces.
    pub fn replace_line(&mut self, index: usize, text: &str) -> Result<&mut Self> {
        let len = self.lines.len();
        let line = self
            .lines
            .get_mut(index)
            .ok_or_else(|| Error::index_out_of_range(index, len))?;

        *line = text.replace("\r\n", " ").replace(['\n', '\r'], " ");
        self.recompute_width();
        Ok(self)
    }

    /// re-measures the content and returns the new width.
    pub fn recompute_width(&mut self) -> usize {
        self.width = self.measure();
        self.width
    }

    fn measure(&self) -> usize {
        let content = self
            .lines
            .iter()
            .filter(|line| line.as_str() != RULE)
            .map(|line| markup::visible_length(line))
            .max()
            .unwrap_or(0);

        self.fixed_width.map_or(content, |fixed| fixed.max(content))
    }

    /// renders the frame rows, colored according to the frame's color mode.
    pub fn render(&self) -> Vec<String> {
        self.render_with(self.color.enabled())
    }

    /// renders the frame rows with color forced on or off.
    pub fn render_with(&self, color: bool) -> Vec<String> {
        let width = self.measure();
        let inner = inner_width(width, self.padding);
        let style_on = markup::expand(&self.style, color);
        let reset = markup::expand("<reset>", color);
        let border = |left: char, right: char| {
            format!("{style_on}{left}{}{right}{reset}", HORIZONTAL.repeat(inner))
        };

        let mut rows = Vec::with_capacity(self.lines.len() + 2);
        rows.push(border('╭', '╮'));

        for line in &self.lines {
            if line == RULE {
                rows.push(border('├', '┤'));
                continue;
            }

            let fill = width
                .saturating_sub(markup::visible_length(line))
                .saturating_add(self.padding);
            rows.push(format!(
                "{reset}{style_on}{VERTICAL}{reset}{}{}{}{reset}{style_on}{VERTICAL}{reset}",
                " ".repeat(self.padding),
                markup::expand(line, color),
                " ".repeat(fill),
            ));
        }

        rows.push(border('╰', '╯'));
        rows
    }

    /// redraws the frame on stdout over the rows written by the previous draw.
    pub fn print_in_place(&mut self) -> Result<DrawOutcome> {
        let ansi = terminal::stdout_supports_ansi();
        self.redraw(&mut io::stdout().lock(), ansi)
    }

    /// redraws the frame on `out`. when a previous draw exists the cursor is
    /// first moved up by the number of rows that draw wrote.
    ///
    /// `ansi` tells whether `out` understands cursor control; when it does not
    /// nothing is written and the frame keeps its previous draw state.
    pub fn redraw<W: Write>(&mut self, out: &mut W, ansi: bool) -> Result<DrawOutcome> {
        self.recompute_width();

        if !ansi {
            log::error!(
                "**frame:** terminal does not support ansi escape codes, frame cannot be displayed"
            );
            return Ok(DrawOutcome::Skipped);
        }

        let rows = self.render();
        let mut buf = String::new();

        if let Some(previous) = self.drawn_rows {
            buf.push_str(&terminal::cursor_previous_line(previous));
        }

        for row in &rows {
            buf.push_str(terminal::ERASE_LINE);
            buf.push_str(row);
            buf.push('\n');
        }

        // no logging around a successful draw: a line on the same tty shifts
        // the rows the next redraw moves over
        out.write_all(buf.as_bytes())?;
        out.flush()?;

        self.drawn_rows = Some(rows.len());

        Ok(DrawOutcome::Drawn { rows: rows.len() })
    }

    /// draws the frame once on `out` and returns a session for further in-place updates.
    pub fn session<W: Write>(&mut self, mut out: W, ansi: bool) -> Result<FrameSession<'_, W>> {
        self.drawn_rows = None;
        let outcome = self.redraw(&mut out, ansi)?;

        Ok(FrameSession {
            frame: self,
            out,
            ansi,
            outcome,
        })
    }

    /// [`Frame::session`] on stdout.
    pub fn display(&mut self) -> Result<FrameSession<'_, Stdout>> {
        let ansi = terminal::stdout_supports_ansi();
        self.session(io::stdout(), ansi)
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render().join("\n"))
    }
}

impl From<&str> for Frame {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

/// a frame that has been drawn once and is updated in place.
///
/// dereferences to the frame for edits; [`FrameSession::refresh`] redraws.
/// dropping the session writes nothing, so the cursor stays below the frame.
#[derive(Debug)]
pub struct FrameSession<'a, W: Write> {
    frame: &'a mut Frame,
    out: W,
    ansi: bool,
    outcome: DrawOutcome,
}

impl<W: Write> FrameSession<'_, W> {
    /// redraws the frame over its previous rows.
    pub fn refresh(&mut self) -> Result<DrawOutcome> {
        self.outcome = self.frame.redraw(&mut self.out, self.ansi)?;
        Ok(self.outcome)
    }

    /// outcome of the most recent draw.
    pub fn last_outcome(&self) -> DrawOutcome {
        self.outcome
    }

    pub fn writer(&self) -> &W {
        &self.out
    }
}

impl<W: Write> Deref for FrameSession<'_, W> {
    type Target = Frame;

    fn deref(&self) -> &Self::Target {
        self.frame
    }
}

impl<W: Write> DerefMut for FrameSession<'_, W> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(text: &str) -> Frame {
        Frame::new(text).with_color(ColorMode::Never)
    }

    fn visible_widths(frame: &Frame) -> Vec<usize> {
        frame
            .render()
            .iter()
            .map(|row| markup::visible_length(row))
            .collect()
    }

    #[test]
    fn test_render_single_line() {
        let frame = Frame::from_lines(["Hello"]).with_color(ColorMode::Never);
        assert_eq!(frame.width(), 5);
        assert_eq!(frame.render(), vec!["╭───────╮", "│ Hello │", "╰───────╯"]);
    }

    #[test]
    fn test_new_splits_on_line_breaks() {
        let frame = plain("one\r\ntwo\nthree");
        assert_eq!(frame.lines(), ["one", "two", "three"]);
        assert_eq!(frame.width(), 5);
        assert_eq!(frame.render()[1], "│ one   │");
    }

    #[test]
    fn test_from_lines_splits_elements() {
        let frame = Frame::from_lines(["a\nb", "c\r\nd"]).with_color(ColorMode::Never);
        assert_eq!(frame.lines(), ["a", "b", "c", "d"]);
        assert_eq!(frame.render().len(), 6);

        let mut frame = plain("x");
        frame.append_lines(["y\nz"]);
        assert_eq!(frame.lines(), ["x", "y", "z"]);
    }

    #[test]
    fn test_redraw_counts_split_elements() {
        let mut frame = Frame::from_lines(["a\nb"]).with_color(ColorMode::Never);
        let mut first = Vec::new();
        assert_eq!(
            frame.redraw(&mut first, true).unwrap(),
            DrawOutcome::Drawn { rows: 4 }
        );
        assert_eq!(String::from_utf8(first).unwrap().matches('\n').count(), 4);

        let mut second = Vec::new();
        assert!(frame.redraw(&mut second, true).unwrap().is_drawn());
        assert!(String::from_utf8(second).unwrap().starts_with("\x1b[4F"));
    }

    #[test]
    fn test_inner_width_saturates() {
        assert_eq!(inner_width(3, 2), 7);
        assert_eq!(inner_width(3, usize::MAX), usize::MAX);
        assert_eq!(inner_width(usize::MAX, 1), usize::MAX);
    }

    #[test]
    fn test_divider_row_matches_width() {
        let mut frame = plain("Hello").with_padding(0);
        frame.append_divider().append_line("Hi");
        let rows = frame.render();
        assert_eq!(rows[2], "├─────┤");
        assert_eq!(rows[3], "│Hi   │");
        assert_eq!(frame.width(), 5);
    }

    #[test]
    fn test_divider_does_not_widen() {
        let mut frame = plain("ab");
        frame.append_divider();
        assert_eq!(frame.width(), 2);
        assert_eq!(frame.len(), 2);
    }

    #[test]
    fn test_replace_line_out_of_range() {
        let mut frame = plain("a\nb\nc");
        let err = frame.replace_line(5, "x").unwrap_err();
        assert!(matches!(err, Error::IndexOutOfRange { index: 5, len: 3 }));
        assert!(frame.replace_line(3, "x").is_err());
        assert_eq!(frame.len(), 3);
    }

    #[test]
    fn test_replace_line_recomputes_width() {
        let mut frame = plain("a long line\nb");
        frame.replace_line(0, "a").unwrap();
        assert_eq!(frame.len(), 2);
        assert_eq!(frame.width(), 1);
        assert_eq!(frame.render(), vec!["╭───╮", "│ a │", "│ b │", "╰───╯"]);
    }

    #[test]
    fn test_replace_line_is_single_line() {
        let mut frame = plain("a\nb");
        frame.replace_line(1, "x\ny").unwrap();
        assert_eq!(frame.len(), 2);
        assert_eq!(frame.line(1), Some("x y"));
    }

    #[test]
    fn test_rows_share_visible_width_after_edits() {
        let mut frame = Frame::new("<b>Hello<reset> <u>World<reset>!")
            .with_padding(2)
            .with_style("<yellow>")
            .with_color(ColorMode::Always);
        frame
            .append_divider()
            .append_line("Welcome to the world of <bright_blue>Pyt<bright_yellow>hon<reset>!\nshort");
        frame.replace_line(3, "<red_bg>x<reset>").unwrap();

        let expected = frame.width() + 2 * frame.padding() + 2;
        assert!(visible_widths(&frame).iter().all(|w| *w == expected));
    }

    #[test]
    fn test_markup_does_not_count_toward_width() {
        let frame = plain("<b>Hi<reset>\nthere");
        assert_eq!(frame.width(), 5);
        assert_eq!(frame.render()[1], "│ Hi    │");
    }

    #[test]
    fn test_style_wraps_each_border_glyph() {
        let frame = Frame::new("x")
            .with_style("<yellow>")
            .with_color(ColorMode::Always);
        let rows = frame.render();
        assert_eq!(rows[0], "\x1b[33m╭───╮\x1b[0m");
        assert_eq!(
            rows[1],
            "\x1b[0m\x1b[33m│\x1b[0m x \x1b[0m\x1b[33m│\x1b[0m"
        );
        assert_eq!(rows[2], "\x1b[33m╰───╯\x1b[0m");
    }

    #[test]
    fn test_explicit_width() {
        let frame = plain("ab").with_width(4);
        assert_eq!(frame.width(), 4);
        assert_eq!(frame.render()[1], "│ ab   │");

        let narrow = plain("abcdef").with_width(2);
        assert_eq!(narrow.width(), 6);
        assert_eq!(narrow.render()[1], "│ abcdef │");
    }

    #[test]
    fn test_empty_frame() {
        let frame = Frame::from_lines(Vec::<String>::new()).with_color(ColorMode::Never);
        assert!(frame.is_empty());
        assert_eq!(frame.render(), vec!["╭──╮", "╰──╯"]);
    }

    #[test]
    fn test_display_joins_rows() {
        let frame = plain("Hi");
        assert_eq!(frame.to_string(), "╭────╮\n│ Hi │\n╰────╯");
    }

    #[test]
    fn test_redraw_skipped_without_ansi() {
        let mut frame = plain("Hi");
        let mut out = Vec::new();
        let outcome = frame.redraw(&mut out, false).unwrap();
        assert_eq!(outcome, DrawOutcome::Skipped);
        assert!(out.is_empty());

        // a skipped draw leaves nothing on screen to move over
        let outcome = frame.redraw(&mut out, true).unwrap();
        assert_eq!(outcome, DrawOutcome::Drawn { rows: 3 });
        assert!(String::from_utf8(out).unwrap().starts_with("\x1b[K╭"));
    }

    #[test]
    fn test_redraw_moves_over_previous_rows() {
        let mut frame = plain("Hi");
        let mut first = Vec::new();
        assert_eq!(
            frame.redraw(&mut first, true).unwrap(),
            DrawOutcome::Drawn { rows: 3 }
        );
        let first = String::from_utf8(first).unwrap();
        assert_eq!(first, "\x1b[K╭────╮\n\x1b[K│ Hi │\n\x1b[K╰────╯\n");

        frame.append_line("there");
        let mut second = Vec::new();
        let outcome = frame.redraw(&mut second, true).unwrap();
        assert_eq!(outcome, DrawOutcome::Drawn { rows: 4 });

        let second = String::from_utf8(second).unwrap();
        assert!(second.starts_with("\x1b[3F\x1b[K╭───────╮\n"));
        assert_eq!(second.matches('\n').count(), 4);

        let mut third = Vec::new();
        assert!(frame.redraw(&mut third, true).unwrap().is_drawn());
        assert!(String::from_utf8(third).unwrap().starts_with("\x1b[4F"));
    }

    #[test]
    fn test_session_draws_then_refreshes() {
        let mut frame = plain("Working");
        let mut session = frame.session(Vec::new(), true).unwrap();
        assert!(session.last_outcome().is_drawn());
        assert!(!session.writer().starts_with(b"\x1b[3F"));

        session.replace_line(0, "Done").unwrap();
        session.append_divider();
        assert_eq!(session.refresh().unwrap(), DrawOutcome::Drawn { rows: 4 });

        let written = String::from_utf8(session.writer().clone()).unwrap();
        assert_eq!(written.matches("\x1b[3F").count(), 1);
        assert!(written.ends_with("\x1b[K╰──────╯\n"));
    }

    #[test]
    fn test_session_refreshes_write_only_frame_rows() {
        let mut frame = plain("step 0");
        let mut session = frame.session(Vec::new(), true).unwrap();
        for step in 1..=3 {
            session.replace_line(0, &format!("step {step}")).unwrap();
            assert_eq!(session.refresh().unwrap(), DrawOutcome::Drawn { rows: 3 });
        }

        // each refresh moves up over exactly the rows it wrote before
        let written = String::from_utf8(session.writer().clone()).unwrap();
        assert_eq!(written.matches('\n').count(), 4 * 3);
        assert_eq!(written.matches("\x1b[3F").count(), 3);
        assert_eq!(written.matches("\x1b[K").count(), 4 * 3);
        assert!(written.ends_with("\x1b[K│ step 3 │\n\x1b[K╰────────╯\n"));
    }

    #[test]
    fn test_session_without_ansi_stays_usable() {
        let mut frame = plain("x");
        let mut session = frame.session(Vec::new(), false).unwrap();
        assert_eq!(session.last_outcome(), DrawOutcome::Skipped);
        session.append_line("y");
        assert_eq!(session.refresh().unwrap(), DrawOutcome::Skipped);
        assert!(session.writer().is_empty());
        assert_eq!(session.render().len(), 4);
    }
}
