//! Optional YAML defaults file (`--config` / `AIFX_CONFIG`).
//!
//! ```yaml
//! defaults:
//!   author: "Ada"
//!   contact: "ada@example.com"
//!   tier: SDA
//!   creation_mode: human-directed-ai
//!   ai_systems: ["Suno"]
//!   apps: ["Ableton Live"]
//!   toolchain_notes: "mastered by hand"
//! limits:
//!   max_text_bytes: 1048576
//! ```
//!
//! Explicit CLI flags always win over values from this file.

use aifx_container::{CreationMode, ReadLimits, ReadLimitsOverrides, Tier};
use anyhow::Context;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AifxConfig {
    #[serde(default)]
    pub defaults: PackagingDefaults,
    #[serde(default)]
    pub limits: ReadLimitsOverrides,
}

/// Fallbacks for `convert` flags the user did not pass.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PackagingDefaults {
    pub author: Option<String>,
    pub contact: Option<String>,
    pub tier: Option<Tier>,
    pub creation_mode: Option<CreationMode>,
    #[serde(default)]
    pub ai_systems: Vec<String>,
    #[serde(default)]
    pub apps: Vec<String>,
    pub toolchain_notes: Option<String>,
}

impl AifxConfig {
    pub fn read_limits(&self) -> ReadLimits {
        ReadLimits::default().apply(self.limits.clone())
    }
}

pub fn parse_config(content: &str) -> anyhow::Result<AifxConfig> {
    serde_yaml::from_str(content).context("failed to parse aifx config yaml")
}

/// Load the config file if a path was given; no path means built-in defaults.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<AifxConfig> {
    let Some(path) = path else {
        return Ok(AifxConfig::default());
    };
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config = parse_config(&content).with_context(|| format!("in {}", path.display()))?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}
