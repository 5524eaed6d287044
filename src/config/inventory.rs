//! Configuration structures for the inventory snapshot.
//!
//! These types control which collectors run and how the assembled report
//! is printed.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Every collector name compiled into the binary, in report order.
pub const DEFAULT_COLLECTORS: [&str; 8] = [
    "system",
    "uptime",
    "load_average",
    "cpu",
    "memory",
    "filesystem",
    "pci",
    "xdisplay",
];

/// Configuration for the set of enabled collectors.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct CollectorsConfig {
    /// Names of the collectors to run, in report order.
    ///
    /// At least one collector must be specified.
    #[validate(length(
        min = 1,
        message = "At least one collector must be enabled, possible values: system, uptime, load_average, cpu, memory, filesystem, pci, xdisplay"
    ))]
    pub enabled: Vec<String>,
}

impl Default for CollectorsConfig {
    fn default() -> Self {
        Self {
            enabled: DEFAULT_COLLECTORS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl CollectorsConfig {
    pub fn enabled_names(&self) -> Vec<&str> {
        self.enabled.iter().map(|c| c.as_str()).collect()
    }
}

/// How the snapshot report is written to stdout.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print the JSON report instead of the compact single line.
    pub pretty: bool,
}

/// Top-level inventory configuration container.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
#[serde(default)]
pub struct InventoryConfig {
    /// Which collectors run and in what order.
    #[validate(nested)]
    pub collectors: CollectorsConfig,

    /// Report output settings.
    #[validate(nested)]
    pub output: OutputConfig,
}
