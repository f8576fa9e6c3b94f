//! # Category Graph Resolver
//!
//! Parent/child adjacency and ancestor-chain resolution over the
//! category records.
//!
//! The parent graph comes from dirty data and may contain unknown parent
//! ids or outright cycles. Adjacency construction accepts everything;
//! the ancestor walk defends itself with a visited set so it terminates
//! on any input. Cycles are the validator's to report; nothing here
//! repairs or hides them.

use crate::types::Category;
use std::collections::{BTreeMap, BTreeSet};

/// The resolved category hierarchy.
///
/// Child lists are sorted by (case-insensitive name, id) ascending; this
/// ordering is load-bearing for deterministic page output.
///
/// A category whose `parent_id` names no known category is NOT promoted
/// to the root list: it stays keyed under the unknown parent id, appears
/// in no tree listing, and is reachable only directly by id. The
/// validator flags the situation as an orphan warning.
#[derive(Debug, Clone, Default)]
pub struct CategoryTree {
    category_by_id: BTreeMap<String, Category>,
    roots: Vec<Category>,
    children_by_parent: BTreeMap<String, Vec<Category>>,
}

impl CategoryTree {
    /// Build the hierarchy from sanitized categories.
    ///
    /// Duplicate category ids resolve later-wins in the by-id map, but
    /// every occurrence lands in its parent's child list, mirroring how
    /// the indexer treats the same duplication.
    #[must_use]
    pub fn build(categories: &[Category]) -> Self {
        let mut category_by_id = BTreeMap::new();
        let mut roots = Vec::new();
        let mut children_by_parent: BTreeMap<String, Vec<Category>> = BTreeMap::new();

        for category in categories {
            category_by_id.insert(category.id.clone(), category.clone());
            match category.parent() {
                None => roots.push(category.clone()),
                Some(parent_id) => children_by_parent
                    .entry(parent_id.to_string())
                    .or_default()
                    .push(category.clone()),
            }
        }

        sort_siblings(&mut roots);
        for siblings in children_by_parent.values_mut() {
            sort_siblings(siblings);
        }

        Self {
            category_by_id,
            roots,
            children_by_parent,
        }
    }

    /// Lookup a category by id.
    #[must_use]
    pub fn category(&self, id: &str) -> Option<&Category> {
        self.category_by_id.get(id)
    }

    /// Root categories (no parent), in display order.
    #[must_use]
    pub fn roots(&self) -> &[Category] {
        &self.roots
    }

    /// Direct children of a parent id, in display order.
    #[must_use]
    pub fn children(&self, parent_id: &str) -> &[Category] {
        self.children_by_parent
            .get(parent_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// All known categories in id order.
    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.category_by_id.values()
    }

    /// Number of known categories (distinct ids).
    #[must_use]
    pub fn len(&self) -> usize {
        self.category_by_id.len()
    }

    /// True if the tree holds no categories.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.category_by_id.is_empty()
    }

    /// Ancestor chain of a category: root first, the category itself last.
    ///
    /// Walks child-to-root through parent links, then reverses. A visited
    /// set stops the walk the moment a node repeats, so cyclic parent
    /// data yields a truncated, best-effort chain instead of a hang —
    /// callers must not assume completeness when the data is cyclic.
    /// Unknown ids return an empty chain.
    #[must_use]
    pub fn ancestors(&self, id: &str) -> Vec<Category> {
        let mut chain = Vec::new();
        let mut seen: BTreeSet<&str> = BTreeSet::new();
        let mut current = self.category_by_id.get(id);

        while let Some(category) = current {
            if !seen.insert(&category.id) {
                break;
            }
            chain.push(category.clone());
            current = category.parent().and_then(|pid| self.category_by_id.get(pid));
        }

        chain.reverse();
        chain
    }
}

/// Sort a sibling list by (case-insensitive name, id) ascending.
fn sort_siblings(siblings: &mut [Category]) {
    siblings.sort_by(|a, b| {
        (a.name.to_lowercase(), &a.id).cmp(&(b.name.to_lowercase(), &b.id))
    });
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn cat(id: &str, name: &str, parent: Option<&str>) -> Category {
        Category {
            id: id.to_string(),
            name: name.to_string(),
            parent_id: parent.map(str::to_string),
        }
    }

    #[test]
    fn roots_and_children_sorted_by_name_then_id() {
        let tree = CategoryTree::build(&[
            cat("r2", "beta", None),
            cat("r1", "Alpha", None),
            cat("k2", "zeal", Some("r1")),
            cat("k1", "Ardor", Some("r1")),
        ]);

        let root_ids: Vec<&str> = tree.roots().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(root_ids, vec!["r1", "r2"]);

        let child_ids: Vec<&str> = tree.children("r1").iter().map(|c| c.id.as_str()).collect();
        assert_eq!(child_ids, vec!["k1", "k2"]);
        assert!(tree.children("r2").is_empty());
    }

    #[test]
    fn ancestors_root_first_self_last() {
        let tree = CategoryTree::build(&[
            cat("a", "A", None),
            cat("b", "B", Some("a")),
            cat("c", "C", Some("b")),
        ]);

        let chain = tree.ancestors("c");
        let ids: Vec<&str> = chain.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn ancestors_of_root_is_itself() {
        let tree = CategoryTree::build(&[cat("a", "A", None)]);
        let chain = tree.ancestors("a");
        assert_eq!(chain.len(), 1);
        assert_eq!(chain[0].id, "a");
    }

    #[test]
    fn ancestors_unknown_id_is_empty() {
        let tree = CategoryTree::build(&[cat("a", "A", None)]);
        assert!(tree.ancestors("ghost").is_empty());
    }

    #[test]
    fn ancestors_terminate_on_cycle() {
        let tree = CategoryTree::build(&[cat("a", "A", Some("b")), cat("b", "B", Some("a"))]);

        // The walk must stop on the first revisit; partial chain, no hang.
        let chain = tree.ancestors("a");
        let ids: Vec<&str> = chain.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn orphan_parent_not_promoted_to_root() {
        let tree = CategoryTree::build(&[cat("a", "A", None), cat("x", "X", Some("missing"))]);

        // x is keyed under its unknown parent, not in the root list.
        let root_ids: Vec<&str> = tree.roots().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(root_ids, vec!["a"]);
        let orphan_ids: Vec<&str> = tree
            .children("missing")
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(orphan_ids, vec!["x"]);

        // And its ancestor chain is just itself.
        let chain = tree.ancestors("x");
        assert_eq!(chain.len(), 1);
        assert_eq!(chain[0].id, "x");
    }

    #[test]
    fn rebuild_is_idempotent_including_order() {
        let categories = vec![
            cat("r1", "Root", None),
            cat("b", "b-name", Some("r1")),
            cat("a", "A-name", Some("r1")),
        ];
        let t1 = CategoryTree::build(&categories);
        let t2 = CategoryTree::build(&categories);

        let ids1: Vec<&str> = t1.children("r1").iter().map(|c| c.id.as_str()).collect();
        let ids2: Vec<&str> = t2.children("r1").iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids1, ids2);
        assert_eq!(t1.roots().len(), t2.roots().len());
    }
}
