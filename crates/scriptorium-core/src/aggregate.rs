//! # Aggregator Module
//!
//! Recursive per-subtree spell counts over the resolved hierarchy.
//!
//! A category's total is its direct (distinct) spell count plus the
//! totals of all its direct children, post-order. Results are memoized
//! in a map owned by the `SubtreeCounts` instance: the cache lives and
//! dies with one build's graph, never process-wide, since the graph can
//! change between builds.

use crate::hierarchy::CategoryTree;
use crate::index::RecordIndex;
use std::collections::{BTreeMap, BTreeSet};

/// Memoized recursive spell totals for every known category.
///
/// Computed eagerly at construction so the structure is frozen read-only
/// before any renderer touches it. The recursion carries an in-progress
/// set: on cyclic input a revisited category contributes zero, which
/// bounds the walk. That guard is a backstop only; the build driver is
/// expected to refuse aggregation when validation reports cycles.
#[derive(Debug, Clone, Default)]
pub struct SubtreeCounts {
    totals: BTreeMap<String, usize>,
}

impl SubtreeCounts {
    /// Compute totals for every category in the tree.
    #[must_use]
    pub fn compute(tree: &CategoryTree, index: &RecordIndex) -> Self {
        let mut totals = BTreeMap::new();
        let mut in_progress = BTreeSet::new();

        for category in tree.categories() {
            total_for(&category.id, tree, index, &mut totals, &mut in_progress);
        }

        Self { totals }
    }

    /// Total spell count for a category's entire subtree.
    /// Unknown ids count zero.
    #[must_use]
    pub fn total(&self, category_id: &str) -> usize {
        self.totals.get(category_id).copied().unwrap_or(0)
    }

    /// Number of categories with a computed total.
    #[must_use]
    pub fn len(&self) -> usize {
        self.totals.len()
    }

    /// True if no totals were computed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }
}

/// Post-order total for one category, memoized in `totals`.
fn total_for(
    id: &str,
    tree: &CategoryTree,
    index: &RecordIndex,
    totals: &mut BTreeMap<String, usize>,
    in_progress: &mut BTreeSet<String>,
) -> usize {
    if let Some(&total) = totals.get(id) {
        return total;
    }
    if !in_progress.insert(id.to_string()) {
        // Revisit within the current walk: cyclic input. Contribute
        // nothing and let the walk unwind.
        return 0;
    }

    let mut total = index.direct_spell_count(id);
    for child in tree.children(id) {
        total = total.saturating_add(total_for(&child.id, tree, index, totals, in_progress));
    }

    in_progress.remove(id);
    totals.insert(id.to_string(), total);
    total
}

// =============================================================================
// TESTS
// =============================================================================
