//! # Relational Indexer
//!
//! O(1) lookup structures over the sanitized record collections.
//!
//! All maps use `BTreeMap` for deterministic iteration. Every accessor is
//! total: by-id lookups return `Option`, collection lookups return an
//! empty slice, counts return zero. Links that reference unknown ids are
//! retained in the adjacency maps: surfacing them is the validator's
//! job, and downstream lookups already treat absence as "not found".

use crate::types::{Category, Dataset, Manuscript, Spell};
use std::collections::{BTreeMap, BTreeSet};

/// Render-ready lookup indexes over one dataset.
///
/// Built once per dataset, then read-only. Duplicate spell/category ids
/// resolve later-wins in the by-id maps; manuscripts arrive already
/// deduplicated from the sanitizer.
#[derive(Debug, Clone, Default)]
pub struct RecordIndex {
    manuscript_by_id: BTreeMap<String, Manuscript>,
    spell_by_id: BTreeMap<String, Spell>,
    category_by_id: BTreeMap<String, Category>,
    spells_by_manuscript: BTreeMap<String, Vec<Spell>>,
    categories_of_spell: BTreeMap<String, Vec<String>>,
    spells_of_category: BTreeMap<String, Vec<String>>,
    direct_counts: BTreeMap<String, usize>,
}

impl RecordIndex {
    /// Build all indexes from a sanitized dataset.
    #[must_use]
    pub fn build(dataset: &Dataset) -> Self {
        let mut index = Self::default();

        for ms in &dataset.manuscripts {
            index.manuscript_by_id.insert(ms.id.clone(), ms.clone());
        }

        for spell in &dataset.spells {
            // Later duplicates overwrite earlier ones.
            index.spell_by_id.insert(spell.id.clone(), spell.clone());
            index
                .spells_by_manuscript
                .entry(spell.manuscript_id.clone())
                .or_default()
                .push(spell.clone());
        }

        for category in &dataset.categories {
            index
                .category_by_id
                .insert(category.id.clone(), category.clone());
        }

        for link in &dataset.links {
            index
                .categories_of_spell
                .entry(link.spell_id.clone())
                .or_default()
                .push(link.category_id.clone());
            index
                .spells_of_category
                .entry(link.category_id.clone())
                .or_default()
                .push(link.spell_id.clone());
        }

        // Direct counts: each distinct spell id counts once per category,
        // even when the same link appears multiple times.
        for (category_id, spell_ids) in &index.spells_of_category {
            let distinct: BTreeSet<&String> = spell_ids.iter().collect();
            index
                .direct_counts
                .insert(category_id.clone(), distinct.len());
        }

        index
    }

    /// Lookup a manuscript by id.
    #[must_use]
    pub fn manuscript(&self, id: &str) -> Option<&Manuscript> {
        self.manuscript_by_id.get(id)
    }

    /// Lookup a spell by id.
    #[must_use]
    pub fn spell(&self, id: &str) -> Option<&Spell> {
        self.spell_by_id.get(id)
    }

    /// Lookup a category by id.
    #[must_use]
    pub fn category(&self, id: &str) -> Option<&Category> {
        self.category_by_id.get(id)
    }

    /// Spells belonging to a manuscript, in spell input order.
    #[must_use]
    pub fn spells_in_manuscript(&self, manuscript_id: &str) -> &[Spell] {
        self.spells_by_manuscript
            .get(manuscript_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Category ids linked to a spell, in link input order.
    #[must_use]
    pub fn categories_of_spell(&self, spell_id: &str) -> &[String] {
        self.categories_of_spell
            .get(spell_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Spell ids linked to a category, in link input order.
    #[must_use]
    pub fn spells_of_category(&self, category_id: &str) -> &[String] {
        self.spells_of_category
            .get(category_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Count of distinct spell ids linked to a category.
    #[must_use]
    pub fn direct_spell_count(&self, category_id: &str) -> usize {
        self.direct_counts.get(category_id).copied().unwrap_or(0)
    }

    /// Number of indexed manuscripts.
    #[must_use]
    pub fn manuscript_count(&self) -> usize {
        self.manuscript_by_id.len()
    }

    /// Number of indexed spells (distinct ids).
    #[must_use]
    pub fn spell_count(&self) -> usize {
        self.spell_by_id.len()
    }

    /// Number of indexed categories (distinct ids).
    #[must_use]
    pub fn category_count(&self) -> usize {
        self.category_by_id.len()
    }
}

// =============================================================================
// TESTS
// =============================================================================
