//! # Core Type Definitions
//!
//! This module contains all record types for the Scriptorium content graph:
//! - Raw input records (`RawRecord`, `RawDataset`)
//! - Typed entity records (`Manuscript`, `Spell`, `Category`, `CategoryLink`)
//! - The sanitized collection bundle (`Dataset`)
//! - Error types (`ScriptoriumError`)
//!
//! ## Totality Guarantees
//!
//! All field access in this module is total: a missing or absent field
//! reads as the empty string, never as an error. Record construction via
//! `from_raw` cannot fail; whether a record is well-formed enough to keep
//! is the sanitizer's decision, not the type's.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

// =============================================================================
// RAW RECORDS
// =============================================================================

/// A flat key-value record as supplied by the external loader.
///
/// The loader makes no promises about content: fields may be missing,
/// empty, or carry extra keys the engine ignores. `field` is the single
/// defaulting accessor the rest of the engine builds on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    fields: BTreeMap<String, String>,
}

impl RawRecord {
    /// Create an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record from key-value pairs.
    #[must_use]
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        let mut record = Self::new();
        for (key, value) in pairs {
            record.insert(*key, *value);
        }
        record
    }

    /// Set a field value, replacing any previous value for the key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Read a field. Absent fields read as the empty string.
    #[must_use]
    pub fn field(&self, name: &str) -> &str {
        self.fields.get(name).map(String::as_str).unwrap_or("")
    }

    /// True if the field is present and non-empty.
    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        !self.field(name).is_empty()
    }
}

/// The four raw record sequences the loader hands to the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawDataset {
    pub manuscripts: Vec<RawRecord>,
    pub spells: Vec<RawRecord>,
    pub categories: Vec<RawRecord>,
    pub links: Vec<RawRecord>,
}

// =============================================================================
// TYPED RECORDS
// =============================================================================

/// A physical source document containing spells.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manuscript {
    pub id: String,
    pub title: String,
    pub siglum: String,
    pub location: String,
    pub date: String,
    pub format: String,
    pub bibliography: String,
}

impl Manuscript {
    /// Build a manuscript from a raw record. Never fails; missing fields
    /// become empty strings.
    #[must_use]
    pub fn from_raw(raw: &RawRecord) -> Self {
        Self {
            id: raw.field("id").to_string(),
            title: raw.field("title").to_string(),
            siglum: raw.field("siglum").to_string(),
            location: raw.field("location").to_string(),
            date: raw.field("date").to_string(),
            format: raw.field("format").to_string(),
            bibliography: raw.field("bibliography").to_string(),
        }
    }
}

/// A text entry located within one manuscript.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spell {
    pub id: String,
    pub manuscript_id: String,
    pub title_en: String,
    pub title_syr: String,
    pub translation: String,
    pub page: String,
    pub scribe: String,
}

impl Spell {
    /// Build a spell from a raw record. Never fails.
    #[must_use]
    pub fn from_raw(raw: &RawRecord) -> Self {
        Self {
            id: raw.field("id").to_string(),
            manuscript_id: raw.field("manuscript_id").to_string(),
            title_en: raw.field("title_en").to_string(),
            title_syr: raw.field("title_syr").to_string(),
            translation: raw.field("translation").to_string(),
            page: raw.field("page").to_string(),
            scribe: raw.field("scribe").to_string(),
        }
    }
}

/// A node in the hierarchical classification applied to spells.
///
/// `parent_id` is normalized at construction: an absent, empty, or
/// whitespace-only parent reads as `None`. Everything downstream
/// (hierarchy resolution, validation) relies on this single
/// normalization point.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub parent_id: Option<String>,
}

impl Category {
    /// Build a category from a raw record, normalizing the parent link.
    #[must_use]
    pub fn from_raw(raw: &RawRecord) -> Self {
        Self {
            id: raw.field("id").to_string(),
            name: raw.field("name").to_string(),
            parent_id: normalize_parent(raw.field("parent_id")),
        }
    }

    /// The parent id as a borrowed option.
    #[must_use]
    pub fn parent(&self) -> Option<&str> {
        self.parent_id.as_deref()
    }
}

/// Normalize a raw parent reference: trim, and treat empty as "no parent".
#[must_use]
pub fn normalize_parent(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// A many-to-many association between a spell and a category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryLink {
    pub spell_id: String,
    pub category_id: String,
}

impl CategoryLink {
    /// Build a link from a raw record. Never fails.
    #[must_use]
    pub fn from_raw(raw: &RawRecord) -> Self {
        Self {
            spell_id: raw.field("spell_id").to_string(),
            category_id: raw.field("category_id").to_string(),
        }
    }
}

// =============================================================================
// DATASET
// =============================================================================

/// The sanitized record collections the engine operates on.
///
/// Every record in a `Dataset` has passed the sanitizer's drop rules:
/// identifying keys are non-empty. Duplicate spell/category ids may still
/// be present (the indexer resolves them later-wins; the validator
/// reports them).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    pub manuscripts: Vec<Manuscript>,
    pub spells: Vec<Spell>,
    pub categories: Vec<Category>,
    pub links: Vec<CategoryLink>,
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur around the engine.
///
/// The engine itself never raises: indexes, hierarchy, and aggregation
/// are total. These variants belong to the fallible edges (loading,
/// configuration) and to the build driver's gating decisions.
#[derive(Debug, Error)]
pub enum ScriptoriumError {
    /// An I/O error occurred while loading data or writing pages.
    #[error("I/O error: {0}")]
    Io(String),

    /// Source data could not be parsed into records.
    #[error("data error: {0}")]
    Data(String),

    /// The site configuration file is invalid.
    #[error("config error: {0}")]
    Config(String),

    /// Strict mode: validation reported errors and the build was refused.
    #[error("validation failed with {0} error(s)")]
    ValidationFailed(usize),

    /// The category hierarchy contains cycles; aggregation was refused.
    #[error("category hierarchy contains {0} cycle(s); refusing to aggregate")]
    CyclicHierarchy(usize),
}

// =============================================================================
// TESTS
// =============================================================================
