//! # Validator Module
//!
//! Referential integrity and hierarchy checks over the sanitized
//! collections.
//!
//! - Collect, don't throw: every finding lands in the report, the build
//!   never stops here
//! - Errors are data that would corrupt page generation (dangling
//!   references, hierarchy cycles); everything else is a warning
//! - All rules run independently; one finding never suppresses another

use crate::types::Dataset;
use std::collections::{BTreeMap, BTreeSet};

/// How many example ids a duplicate warning lists before eliding.
pub const MAX_DUPLICATE_EXAMPLES: usize = 10;

/// The outcome of a validation pass.
///
/// `cycles` repeats the cycle findings from `errors` as ordered id
/// sequences so the build driver can gate aggregation without parsing
/// message strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub cycles: Vec<Vec<String>>,
}

impl ValidationReport {
    /// True if any error was found.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// True if the category hierarchy contains at least one cycle.
    #[must_use]
    pub fn has_cycles(&self) -> bool {
        !self.cycles.is_empty()
    }

    /// True if nothing at all was found.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

/// The Validator cross-checks the four collections.
pub struct Validator;

impl Validator {
    /// Validate a sanitized dataset. Pure: no mutation, no I/O.
    #[must_use]
    pub fn validate(dataset: &Dataset) -> ValidationReport {
        let mut report = ValidationReport::default();

        check_duplicates(dataset, &mut report);
        check_spell_references(dataset, &mut report);
        check_link_references(dataset, &mut report);
        check_parent_references(dataset, &mut report);
        check_cycles(dataset, &mut report);

        report
    }
}

// =============================================================================
// RULE 1: DUPLICATE IDS
// =============================================================================

/// Sorted duplicate ids in a sequence, empty ids excluded.
fn find_duplicates<'a>(ids: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen: BTreeSet<&str> = BTreeSet::new();
    let mut dupes: BTreeSet<&str> = BTreeSet::new();
    for id in ids {
        if !seen.insert(id) {
            dupes.insert(id);
        }
    }
    dupes
        .into_iter()
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}

/// Format a duplicate warning, listing at most `MAX_DUPLICATE_EXAMPLES`
/// ids with an ellipsis marker when more exist.
fn duplicate_warning(kind: &str, dupes: &[String]) -> String {
    let shown: Vec<&str> = dupes
        .iter()
        .take(MAX_DUPLICATE_EXAMPLES)
        .map(String::as_str)
        .collect();
    let marker = if dupes.len() > MAX_DUPLICATE_EXAMPLES {
        " ..."
    } else {
        ""
    };
    format!("duplicate {kind} ids: {}{marker}", shown.join(", "))
}

fn check_duplicates(dataset: &Dataset, report: &mut ValidationReport) {
    let dup_ms = find_duplicates(dataset.manuscripts.iter().map(|m| m.id.as_str()));
    let dup_sp = find_duplicates(dataset.spells.iter().map(|s| s.id.as_str()));
    let dup_cat = find_duplicates(dataset.categories.iter().map(|c| c.id.as_str()));

    if !dup_ms.is_empty() {
        report.warnings.push(duplicate_warning("manuscript", &dup_ms));
    }
    if !dup_sp.is_empty() {
        report.warnings.push(duplicate_warning("spell", &dup_sp));
    }
    if !dup_cat.is_empty() {
        report.warnings.push(duplicate_warning("category", &dup_cat));
    }
}

// =============================================================================
// RULE 2: SPELL -> MANUSCRIPT REFERENCES
// =============================================================================

fn check_spell_references(dataset: &Dataset, report: &mut ValidationReport) {
    let known: BTreeSet<&str> = dataset
        .manuscripts
        .iter()
        .map(|m| m.id.as_str())
        .filter(|id| !id.is_empty())
        .collect();

    for spell in &dataset.spells {
        let mid = spell.manuscript_id.as_str();
        if !mid.is_empty() && !known.contains(mid) {
            report.errors.push(format!(
                "spell {} references missing manuscript_id={mid}",
                spell.id
            ));
        }
    }
}

// =============================================================================
// RULE 3: LINK REFERENCES (BOTH SIDES)
// =============================================================================

fn check_link_references(dataset: &Dataset, report: &mut ValidationReport) {
    let spell_ids: BTreeSet<&str> = dataset
        .spells
        .iter()
        .map(|s| s.id.as_str())
        .filter(|id| !id.is_empty())
        .collect();
    let category_ids: BTreeSet<&str> = dataset
        .categories
        .iter()
        .map(|c| c.id.as_str())
        .filter(|id| !id.is_empty())
        .collect();

    for link in &dataset.links {
        let sid = link.spell_id.as_str();
        let cid = link.category_id.as_str();
        if !sid.is_empty() && !spell_ids.contains(sid) {
            report
                .errors
                .push(format!("link references missing spell_id={sid}"));
        }
        if !cid.is_empty() && !category_ids.contains(cid) {
            report
                .errors
                .push(format!("link references missing category_id={cid}"));
        }
    }
}

// =============================================================================
// RULE 4: ORPHANED PARENT REFERENCES
// =============================================================================

fn check_parent_references(dataset: &Dataset, report: &mut ValidationReport) {
    let category_ids: BTreeSet<&str> = dataset
        .categories
        .iter()
        .map(|c| c.id.as_str())
        .filter(|id| !id.is_empty())
        .collect();

    for category in &dataset.categories {
        if let Some(pid) = category.parent() {
            if !category_ids.contains(pid) {
                report.warnings.push(format!(
                    "category {} has parent_id={pid} which does not exist",
                    category.id
                ));
            }
        }
    }
}

// =============================================================================
// RULE 5: HIERARCHY CYCLE DETECTION
// =============================================================================

/// Single linear pass over the parent graph. Every category touched by a
/// walk joins the global done-set, so no node is walked twice across the
/// whole detection run. A node reappearing in the current path closes a
/// cycle, reported once as the ordered id sequence.
fn check_cycles(dataset: &Dataset, report: &mut ValidationReport) {
    // Later duplicates win, matching the by-id maps downstream.
    let mut parent_by_id: BTreeMap<&str, Option<&str>> = BTreeMap::new();
    for category in &dataset.categories {
        if category.id.is_empty() {
            continue;
        }
        parent_by_id.insert(category.id.as_str(), category.parent());
    }

    let mut done: BTreeSet<&str> = BTreeSet::new();

    for &start in parent_by_id.keys() {
        if done.contains(start) {
            continue;
        }

        let mut path: Vec<&str> = Vec::new();
        let mut pos: BTreeMap<&str, usize> = BTreeMap::new();
        let mut current = Some(start);

        while let Some(id) = current {
            if let Some(&at) = pos.get(id) {
                let mut cycle: Vec<String> = path[at..].iter().map(|s| s.to_string()).collect();
                cycle.push(id.to_string());
                report
                    .errors
                    .push(format!("category cycle detected: {}", cycle.join(" -> ")));
                report.cycles.push(cycle);
                break;
            }
            if done.contains(id) {
                break;
            }

            pos.insert(id, path.len());
            path.push(id);

            current = parent_by_id.get(id).copied().flatten();
        }

        done.extend(path);
    }
}

// =============================================================================
// TESTS
// =============================================================================
