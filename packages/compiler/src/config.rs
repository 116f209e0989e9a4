//! Compiler Configuration

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::error::{CompilerError, Result};
use crate::translation::DEFAULT_DOMAIN;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompilerConfig {
    /// Development compilation: `desc` defaults are applied
    pub debug: bool,
    pub default_domain: String,
    /// Render locale; the translator's own locale when unset
    pub locale: Option<String>,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        CompilerConfig {
            debug: false,
            default_domain: DEFAULT_DOMAIN.to_string(),
            locale: None,
        }
    }
}

impl CompilerConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| CompilerError::Config(e.to_string()))
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read compiler config {}", path.display()))?;
        let config = Self::from_json_str(&content)
            .with_context(|| format!("failed to parse compiler config {}", path.display()))?;
        Ok(config)
    }
}
