// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fs;
use std::path::{Path, PathBuf};

use libpopi::{ColorMode, Config, Error, Result, Verbosity};
use serde::Deserialize;

const CONFIG_FILE_NAME: &str = "popi.toml";

const DEFAULT_CONTENT: &str = r#"# popi configuration
# color = "auto"          # auto, always, never
# verbosity = "normal"    # quiet, normal, verbose
# padding = 1
# frame_style = "<yellow>"
# bar_length = 20
# bar_preset = "standard" # standard, classic, blocks, fira_code
# precision = 2
"#;

fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(CONFIG_FILE_NAME))
}

#[derive(Debug, Deserialize, Default, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
struct TomlConfig {
    color: Option<ColorMode>,
    verbosity: Option<Verbosity>,
    padding: Option<usize>,
    frame_style: Option<String>,
    bar_length: Option<usize>,
    bar_preset: Option<String>,
    precision: Option<usize>,
}

impl TomlConfig {
    fn parse(content: &str, origin: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|e| {
            Error::config(format!(
                "failed to parse config file {}: {e}",
                origin.display()
            ))
        })
    }

    fn into_config(self) -> Config {
        let defaults = Config::default();

        Config {
            color: self.color.unwrap_or(defaults.color),
            verbosity: self.verbosity.unwrap_or(defaults.verbosity),
            padding: self.padding.unwrap_or(defaults.padding),
            frame_style: self.frame_style.unwrap_or(defaults.frame_style),
            bar_length: self.bar_length.unwrap_or(defaults.bar_length),
            bar_preset: self.bar_preset.unwrap_or(defaults.bar_preset),
            precision: self.precision.unwrap_or(defaults.precision),
        }
    }
}

/// cli configuration wrapper that combines toml file parsing with the library's config.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub inner: Config,
}

impl std::ops::Deref for CliConfig {
    type Target = Config;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl CliConfig {
    pub fn load() -> Result<Self> {
        let inner = Self::load_toml_config()?.into_config();
        Ok(Self { inner })
    }

    fn load_toml_config() -> Result<TomlConfig> {
        let Some(path) = config_path() else {
            return Ok(TomlConfig::default());
        };

        if !path.exists() {
            return Ok(TomlConfig::default());
        }

        let content = fs::read_to_string(&path).map_err(|e| {
            Error::config(format!(
                "failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        TomlConfig::parse(&content, &path)
    }

    pub fn edit_config() -> Result<()> {
        let Some(path) = config_path() else {
            return Err(Error::config("could not determine config directory"));
        };

        if !path.exists() {
            if let Some(dir) = path.parent() {
                fs::create_dir_all(dir).map_err(|e| {
                    Error::config(format!(
                        "failed to create config directory {}: {e}",
                        dir.display()
                    ))
                })?;
            }

            fs::write(&path, DEFAULT_CONTENT).map_err(|e| {
                Error::config(format!(
                    "failed to create config file {}: {e}",
                    path.display()
                ))
            })?;
        }

        let editor = std::env::var("EDITOR").unwrap_or_else(|_| "nano".to_string());
        std::process::Command::new(&editor)
            .arg(&path)
            .status()
            .map_err(|e| Error::other(format!("failed to open editor {editor}: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> Result<TomlConfig> {
        TomlConfig::parse(content, Path::new("popi.toml"))
    }

    #[test]
    fn test_parse_full_config() {
        let content = r#"
color = "never"
verbosity = "verbose"
padding = 2
frame_style = "<b><cyan>"
bar_length = 30
bar_preset = "blocks"
precision = 0
"#;
        let config = parse(content).unwrap().into_config();
        assert_eq!(config.color, ColorMode::Never);
        assert_eq!(config.verbosity, Verbosity::Verbose);
        assert_eq!(config.padding, 2);
        assert_eq!(config.frame_style, "<b><cyan>");
        assert_eq!(config.bar_length, 30);
        assert_eq!(config.bar_preset, "blocks");
        assert_eq!(config.precision, 0);
    }

    #[test]
    fn test_parse_partial_config_keeps_defaults() {
        let config = parse("padding = 3\n").unwrap().into_config();
        assert_eq!(config.padding, 3);
        assert_eq!(config.bar_preset, "standard");
        assert_eq!(config.color, ColorMode::Auto);
    }

    #[test]
    fn test_parse_empty_config() {
        assert_eq!(parse("").unwrap(), TomlConfig::default());
    }

    #[test]
    fn test_default_content_is_valid() {
        assert_eq!(parse(DEFAULT_CONTENT).unwrap(), TomlConfig::default());
    }

    #[test]
    fn test_parse_invalid_values() {
        assert!(parse("color = \"sometimes\"\n").is_err());
        assert!(parse("padding = -1\n").is_err());
        assert!(parse("colour = \"never\"\n").is_err());
    }
}
