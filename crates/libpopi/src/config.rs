// SPDX-License-Identifier: MIT OR Apache-2.0

use std::str::FromStr;

use log::LevelFilter;
use serde::Deserialize;

use crate::{Error, Frame, terminal};

/// when to emit color escape sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// color only when stdout is an ansi terminal and `NO_COLOR` is unset.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// resolves the mode against the current terminal.
    pub fn enabled(self) -> bool {
        match self {
            Self::Auto => terminal::terminal_supports_color(),
            Self::Always => true,
            Self::Never => false,
        }
    }

    /// resolves the mode against stderr instead of stdout.
    pub fn enabled_on_stderr(self) -> bool {
        match self {
            Self::Auto => terminal::stderr_supports_color(),
            Self::Always => true,
            Self::Never => false,
        }
    }
}

impl std::fmt::Display for ColorMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Always => write!(f, "always"),
            Self::Never => write!(f, "never"),
        }
    }
}

impl FromStr for ColorMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "always" => Ok(Self::Always),
            "never" => Ok(Self::Never),
            other => Err(Error::invalid_value(format!(
                "color mode '{other}' (expected auto, always or never)"
            ))),
        }
    }
}

/// verbosity level for log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
}

impl Verbosity {
    pub const fn level_filter(self) -> LevelFilter {
        match self {
            Self::Quiet => LevelFilter::Error,
            Self::Normal => LevelFilter::Warn,
            Self::Verbose => LevelFilter::Debug,
        }
    }
}

impl std::fmt::Display for Verbosity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Quiet => write!(f, "quiet"),
            Self::Normal => write!(f, "normal"),
            Self::Verbose => write!(f, "verbose"),
        }
    }
}

impl FromStr for Verbosity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "quiet" => Ok(Self::Quiet),
            "normal" => Ok(Self::Normal),
            "verbose" => Ok(Self::Verbose),
            other => Err(Error::invalid_value(format!(
                "verbosity '{other}' (expected quiet, normal or verbose)"
            ))),
        }
    }
}

/// rendering defaults shared by frames and progress bars.
///
/// consumers can construct this directly; the cli fills it from its toml file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// when to emit color escape sequences.
    pub color: ColorMode,

    /// log verbosity.
    pub verbosity: Verbosity,

    /// spaces between a frame border and its content.
    pub padding: usize,

    /// markup applied to frame borders, e.g. `"<yellow>"`.
    pub frame_style: String,

    /// number of cells in a progress bar.
    pub bar_length: usize,

    /// name of the progress bar preset to use.
    pub bar_preset: String,

    /// decimal places in the percentage display.
    pub precision: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            color: ColorMode::Auto,
            verbosity: Verbosity::Normal,
            padding: 1,
            frame_style: String::new(),
            bar_length: 20,
            bar_preset: "standard".to_string(),
            precision: 2,
        }
    }
}

impl Config {
    /// creates a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_color(mut self, color: ColorMode) -> Self {
        self.color = color;
        self
    }

    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    pub fn with_padding(mut self, padding: usize) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_frame_style(mut self, style: impl Into<String>) -> Self {
        self.frame_style = style.into();
        self
    }

    pub fn with_bar_length(mut self, length: usize) -> Self {
        self.bar_length = length;
        self
    }

    pub fn with_bar_preset(mut self, preset: impl Into<String>) -> Self {
        self.bar_preset = preset.into();
        self
    }

    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// builds a frame around `text` using these defaults.
    pub fn frame(&self, text: &str) -> Frame {
        Frame::new(text)
            .with_padding(self.padding)
            .with_style(self.frame_style.clone())
            .with_color(self.color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_mode_from_str() {
        assert_eq!("auto".parse::<ColorMode>().unwrap(), ColorMode::Auto);
        assert_eq!("ALWAYS".parse::<ColorMode>().unwrap(), ColorMode::Always);
        assert_eq!("never".parse::<ColorMode>().unwrap(), ColorMode::Never);
        assert!("sometimes".parse::<ColorMode>().is_err());
    }

    #[test]
    fn test_color_mode_fixed_values() {
        assert!(ColorMode::Always.enabled());
        assert!(!ColorMode::Never.enabled());
        assert!(ColorMode::Always.enabled_on_stderr());
        assert!(!ColorMode::Never.enabled_on_stderr());
    }

    #[test]
    fn test_verbosity_level_filter() {
        assert_eq!(Verbosity::Quiet.level_filter(), LevelFilter::Error);
        assert_eq!(Verbosity::Normal.level_filter(), LevelFilter::Warn);
        assert_eq!(Verbosity::Verbose.level_filter(), LevelFilter::Debug);
        assert_eq!(Verbosity::Verbose.to_string(), "verbose");
    }

    #[test]
    fn test_config_builds_frame_with_defaults() {
        let config = Config::new()
            .with_padding(2)
            .with_color(ColorMode::Never)
            .with_frame_style("<yellow>");
        let frame = config.frame("ab");
        assert_eq!(frame.padding(), 2);
        assert_eq!(frame.style(), "<yellow>");
        assert_eq!(frame.render()[1], "│  ab  │");
    }
}
