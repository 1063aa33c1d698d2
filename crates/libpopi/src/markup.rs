// SPDX-License-Identifier: MIT OR Apache-2.0

//! inline markup tags (`<b>`, `<red>`, `<reset>`, ...) and their ansi escape sequences.

use unicode_width::UnicodeWidthStr;

/// line content that renders as a divider row inside a frame.
pub const RULE: &str = "<hr>";

/// a markup token and the escape sequence it expands to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkupTag {
    pub token: &'static str,
    pub escape: &'static str,
}

macro_rules! tag_table {
    ($($token:literal => $escape:literal),* $(,)?) => {
        &[$(MarkupTag { token: $token, escape: $escape }),*]
    };
}

// ── Vocabulary ───────────────────────────────────────────────────────────────

const TAGS: &[MarkupTag] = tag_table![
    "" => "",
    "<reset>" => "\x1b[0m",
    "<b>" => "\x1b[1m",
    "<i>" => "\x1b[3m",
    "<u>" => "\x1b[4m",
    "<black>" => "\x1b[30m",
    "<red>" => "\x1b[31m",
    "<green>" => "\x1b[32m",
    "<yellow>" => "\x1b[33m",
    "<blue>" => "\x1b[34m",
    "<magenta>" => "\x1b[35m",
    "<cyan>" => "\x1b[36m",
    "<white>" => "\x1b[37m",
    "<black_bg>" => "\x1b[40m",
    "<red_bg>" => "\x1b[41m",
    "<green_bg>" => "\x1b[42m",
    "<yellow_bg>" => "\x1b[43m",
    "<blue_bg>" => "\x1b[44m",
    "<magenta_bg>" => "\x1b[45m",
    "<cyan_bg>" => "\x1b[46m",
    "<white_bg>" => "\x1b[47m",
    "<bright_black>" => "\x1b[90m",
    "<bright_red>" => "\x1b[91m",
    "<bright_green>" => "\x1b[92m",
    "<bright_yellow>" => "\x1b[93m",
    "<bright_blue>" => "\x1b[94m",
    "<bright_magenta>" => "\x1b[95m",
    "<bright_cyan>" => "\x1b[96m",
    "<bright_white>" => "\x1b[97m",
    "<bright_black_bg>" => "\x1b[100m",
    "<bright_red_bg>" => "\x1b[101m",
    "<bright_green_bg>" => "\x1b[102m",
    "<bright_yellow_bg>" => "\x1b[103m",
    "<bright_blue_bg>" => "\x1b[104m",
    "<bright_magenta_bg>" => "\x1b[105m",
    "<bright_cyan_bg>" => "\x1b[106m",
    "<bright_white_bg>" => "\x1b[107m",
    "<hr>" => "",
];

impl MarkupTag {
    /// every known tag, in table order.
    pub const fn all() -> &'static [MarkupTag] {
        TAGS
    }

    /// looks up a full token such as `"<red_bg>"`.
    pub fn lookup(token: &str) -> Option<&'static MarkupTag> {
        TAGS.iter().find(|t| t.token == token)
    }

    /// returns true if the tag changes how text looks (`<hr>` and the empty tag do not).
    pub const fn is_style(&self) -> bool {
        !self.escape.is_empty()
    }
}

// ── Expansion ────────────────────────────────────────────────────────────────

/// replaces every known tag with its escape sequence, or with nothing when
/// `supports_color` is false. unknown `<...>` text is kept as written.
pub fn expand(input: &str, supports_color: bool) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find('<') {
        out.push_str(&rest[..start]);
        let candidate = &rest[start..];

        match match_tag(candidate) {
            Some(tag) => {
                if supports_color {
                    out.push_str(tag.escape);
                }
                rest = &candidate[tag.token.len()..];
            }
            None => {
                out.push('<');
                rest = &candidate[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

/// removes every known tag.
pub fn strip(input: &str) -> String {
    expand(input, false)
}

/// `s` starts with '<'; matches the shortest `<...>` run against the table.
fn match_tag(s: &str) -> Option<&'static MarkupTag> {
    let end = s.find('>')?;
    MarkupTag::lookup(&s[..=end])
}

// ── Width ────────────────────────────────────────────────────────────────────

/// removes raw csi sequences (`ESC [ params final`) already present in the text.
pub fn strip_escapes(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\x1b' && chars.peek() == Some(&'[') {
            chars.next();
            for c in chars.by_ref() {
                if ('\x40'..='\x7e').contains(&c) {
                    break;
                }
            }
            continue;
        }
        out.push(c);
    }

    out
}

/// display width of `input` once tags and escape sequences are removed.
pub fn visible_length(input: &str) -> usize {
    strip_escapes(&strip(input)).width()
}
