// SPDX-License-Identifier: MIT OR Apache-2.0

//! named progress bar presets.
//!
//! presets are registered explicitly; [`Registry::with_builtins`] starts from
//! the presets that ship with the library.

use std::collections::BTreeMap;

use crate::{Error, ProgressBar, Result};

/// builds a bar from a total and a length.
pub type BarFactory = fn(u64, usize) -> ProgressBar;

const BUILTINS: &[(&str, BarFactory)] = &[
    ("standard", ProgressBar::standard),
    ("classic", ProgressBar::classic),
    ("blocks", ProgressBar::blocks),
    ("fira_code", ProgressBar::fira_code),
];

#[derive(Debug, Clone, Default)]
pub struct Registry {
    presets: BTreeMap<String, BarFactory>,
}

impl Registry {
    /// creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// creates a registry holding the built-in presets.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for (name, factory) in BUILTINS {
            registry.register(*name, *factory);
        }
        registry
    }

    /// registers a preset, returning the factory it replaced.
    pub fn register(&mut self, name: impl Into<String>, factory: BarFactory) -> Option<BarFactory> {
        let name = name.into();
        log::debug!("**registry:** registering preset '{name}'");
        self.presets.insert(name, factory)
    }

    pub fn get(&self, name: &str) -> Option<BarFactory> {
        self.presets.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.presets.contains_key(name)
    }

    /// builds a bar from the named preset.
    pub fn build(&self, name: &str, total: u64, length: usize) -> Result<ProgressBar> {
        self.get(name)
            .map(|factory| factory(total, length))
            .ok_or_else(|| Error::unknown_preset(name))
    }

    /// preset names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.presets.keys().map(String::as_str)
    }

    pub fn remove(&mut self, name: &str) -> Option<BarFactory> {
        self.presets.remove(name)
    }

    pub fn clear(&mut self) {
        self.presets.clear();
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ColorMode;

    #[test]
    fn test_builtins() {
        let registry = Registry::with_builtins();
        assert_eq!(
            registry.names().collect::<Vec<_>>(),
            ["blocks", "classic", "fira_code", "standard"]
        );
        let bar = registry.build("standard", 4, 4).unwrap();
        assert_eq!(bar.body(), "[---]");
    }

    #[test]
    fn test_unknown_preset() {
        let registry = Registry::with_builtins();
        let err = registry.build("rainbow", 1, 1).unwrap_err();
        assert!(matches!(err, Error::UnknownPreset(name) if name == "rainbow"));
    }

    #[test]
    fn test_register_custom_preset() {
        let mut registry = Registry::new();
        assert!(registry.is_empty());

        let previous = registry.register("dots", |total, length| {
            ProgressBar::new(total, length)
                .with_style(crate::BarStyle::new("•", "·"))
                .with_color(ColorMode::Never)
        });
        assert!(previous.is_none());
        assert!(registry.contains("dots"));

        let mut bar = registry.build("dots", 2, 3).unwrap();
        bar.set(2);
        assert_eq!(bar.body(), "••••");
    }

    #[test]
    fn test_register_replaces() {
        let mut registry = Registry::with_builtins();
        let previous = registry.register("standard", ProgressBar::blocks);
        assert!(previous.is_some());
        assert_eq!(registry.len(), 4);
        assert_eq!(registry.build("standard", 1, 1).unwrap().style().fill, "█");
    }

    #[test]
    fn test_remove_and_clear() {
        let mut registry = Registry::with_builtins();
        assert!(registry.remove("classic").is_some());
        assert!(registry.remove("classic").is_none());
        assert_eq!(registry.len(), 3);
        registry.clear();
        assert!(registry.is_empty());
    }
}
