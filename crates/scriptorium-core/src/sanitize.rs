//! # Sanitizer Module
//!
//! Raw record filtering for the Scriptorium engine.
//!
//! - Drop malformed records (missing identifying keys) before indexing
//! - Put manuscripts into stable display order
//! - Deduplicate manuscript ids, first occurrence wins, with a warning
//! - No repair, no enrichment, no I/O

use crate::types::{Category, CategoryLink, Dataset, Manuscript, RawDataset, RawRecord, Spell};
use std::collections::BTreeSet;

/// Output of a sanitization pass: the typed dataset plus informational
/// warnings. Warnings never stop a build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sanitized {
    pub dataset: Dataset,
    pub warnings: Vec<String>,
}

/// The Sanitizer applies the drop rules and ordering guarantees.
///
/// Drop rules (a record missing any listed field is discarded silently):
/// - Manuscript: `id`, `title`
/// - Spell: `id`, `manuscript_id`
/// - Category: `id`, `name`
/// - Link: `spell_id`, `category_id`
///
/// Manuscripts are additionally sorted by (case-insensitive title, id)
/// and deduplicated by id. Spells, categories, and links keep source
/// order untouched.
pub struct Sanitizer;

impl Sanitizer {
    /// Sanitize the four raw record sequences.
    #[must_use]
    pub fn sanitize(raw: &RawDataset) -> Sanitized {
        let mut warnings = Vec::new();

        let mut manuscripts: Vec<Manuscript> = raw
            .manuscripts
            .iter()
            .filter(|r| r.has("id") && r.has("title"))
            .map(Manuscript::from_raw)
            .collect();

        // Stable display order: case-insensitive title, then id.
        manuscripts.sort_by(|a, b| {
            (a.title.to_lowercase(), &a.id).cmp(&(b.title.to_lowercase(), &b.id))
        });

        // First occurrence in sorted order wins; every dropped duplicate
        // is worth telling the data owner about.
        let mut seen: BTreeSet<String> = BTreeSet::new();
        manuscripts.retain(|ms| {
            if seen.contains(&ms.id) {
                warnings.push(format!("duplicate manuscript id: {}", ms.id));
                false
            } else {
                seen.insert(ms.id.clone());
                true
            }
        });

        let spells = raw
            .spells
            .iter()
            .filter(|r| r.has("id") && r.has("manuscript_id"))
            .map(Spell::from_raw)
            .collect();

        let categories = raw
            .categories
            .iter()
            .filter(|r| r.has("id") && r.has("name"))
            .map(Category::from_raw)
            .collect();

        let links = raw
            .links
            .iter()
            .filter(|r| r.has("spell_id") && r.has("category_id"))
            .map(CategoryLink::from_raw)
            .collect();

        Sanitized {
            dataset: Dataset {
                manuscripts,
                spells,
                categories,
                links,
            },
            warnings,
        }
    }
}

/// Convenience for tests and small callers: sanitize raw record slices
/// without assembling a `RawDataset` by hand.
#[must_use]
pub fn sanitize_records(
    manuscripts: Vec<RawRecord>,
    spells: Vec<RawRecord>,
    categories: Vec<RawRecord>,
    links: Vec<RawRecord>,
) -> Sanitized {
    Sanitizer::sanitize(&RawDataset {
        manuscripts,
        spells,
        categories,
        links,
    })
}

// =============================================================================
// TESTS
// =============================================================================
