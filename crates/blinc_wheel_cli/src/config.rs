//! Wheel configuration file handling
//!
//! A `wheel.toml` describes one picker:
//!
//! ```toml
//! initial = "wed"
//!
//! [picker]
//! infinite = true
//! visible_count = 16
//!
//! [[options]]
//! value = "mon"
//! label = "Monday"
//! ```

use anyhow::{Context, Result};
use blinc_wheel::{WheelConfig, WheelOption};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Picker description stored in wheel.toml
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct WheelFile {
    /// Value selected on mount
    #[serde(default)]
    pub initial: Option<String>,
    #[serde(default)]
    pub picker: WheelConfig,
    #[serde(default)]
    pub options: Vec<OptionEntry>,
}

/// One `[[options]]` entry
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OptionEntry {
    pub value: String,
    /// Display text; defaults to the value
    #[serde(default)]
    pub label: Option<String>,
}

impl OptionEntry {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: None,
        }
    }
}

impl WheelFile {
    /// Load a wheel description from `path`
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            anyhow::bail!("No wheel config found at {}", path.display());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        Self::parse(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Parse a wheel description from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        let file: WheelFile = toml::from_str(content)?;
        Ok(file)
    }

    /// Replace the option list with comma-separated values
    pub fn set_options_csv(&mut self, csv: &str) {
        self.options = csv
            .split(',')
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(OptionEntry::new)
            .collect();
    }

    /// Options in picker form
    pub fn wheel_options(&self) -> Vec<WheelOption<String>> {
        self.options
            .iter()
            .map(|entry| {
                let label = entry.label.clone().unwrap_or_else(|| entry.value.clone());
                WheelOption::new(entry.value.clone(), label)
            })
            .collect()
    }
}
