//! # Site Configuration
//!
//! Explicit configuration for the build driver, loaded from an optional
//! `scriptorium.toml` and overridable per-invocation from the CLI.
//!
//! The base path is a plain value threaded through link building; there
//! is no ambient global for it.

use scriptorium_core::ScriptoriumError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Site-wide build settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Title of the site index page.
    pub title: String,

    /// Prefix for all generated links, e.g. `/corpus` when the site is
    /// served from a subdirectory. Normalized: empty, or `/`-prefixed
    /// with no trailing slash.
    pub base_path: String,

    /// Directory holding the four JSON record files.
    pub data_dir: PathBuf,

    /// Directory the rendered site is written into.
    pub out_dir: PathBuf,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Manuscript Corpus".to_string(),
            base_path: String::new(),
            data_dir: PathBuf::from("site/data"),
            out_dir: PathBuf::from("site"),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a TOML file. A missing file is not an
    /// error: defaults apply.
    pub fn load(path: &Path) -> Result<Self, ScriptoriumError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .map_err(|e| ScriptoriumError::Io(format!("cannot read {}: {e}", path.display())))?;
        let mut config: Self = toml::from_str(&text)
            .map_err(|e| ScriptoriumError::Config(format!("{}: {e}", path.display())))?;
        config.base_path = normalize_base_path(&config.base_path);
        Ok(config)
    }
}

/// Normalize a base path: `""` stays empty; anything else becomes
/// `/`-prefixed with surrounding slashes stripped.
#[must_use]
pub fn normalize_base_path(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}

// =============================================================================
// TESTS
// =============================================================================
