//! # scriptorium-core
//!
//! The deterministic content-graph engine for Scriptorium - THE ENGINE.
//!
//! This crate turns four flat record collections (manuscripts, spells,
//! categories, spell-category links) into everything a static-site
//! renderer needs: O(1) lookup indexes, a resolved category hierarchy
//! with ancestor chains, recursive per-subtree spell counts, and a
//! validation report over the whole dataset.
//!
//! ## Pipeline
//!
//! ```text
//! Loader (external) -> Sanitizer -> Indexer + Graph Resolver
//!                                     -> Aggregator -> Renderer (external)
//!                                     -> Validator
//! ```
//!
//! ## Architectural Constraints
//!
//! The ENGINE:
//! - Is pure: no I/O, no async, no network dependencies
//! - Is deterministic: `BTreeMap`/`BTreeSet` only, identical input yields
//!   identical structures including iteration order
//! - Is total: lookups return empty/zero/default instead of failing, so
//!   the renderer never has to handle an engine fault
//! - Collects data problems into the `ValidationReport`; it never raises
//!   mid-computation and never halts a build
//!
//! Cyclic category data is the one hazard: the ancestor walk and the
//! aggregator both carry visited-set guards so they terminate on any
//! input, but a build driver must treat a non-empty cycle list as a
//! precondition failure and refuse to aggregate over that dataset.

// =============================================================================
// MODULES
// =============================================================================

pub mod aggregate;
pub mod hierarchy;
pub mod index;
pub mod sanitize;
pub mod types;
pub mod validate;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{
    Category, CategoryLink, Dataset, Manuscript, RawDataset, RawRecord, ScriptoriumError, Spell,
};

// =============================================================================
// RE-EXPORTS: Engine
// =============================================================================

pub use aggregate::SubtreeCounts;
pub use hierarchy::CategoryTree;
pub use index::RecordIndex;
pub use sanitize::{Sanitized, Sanitizer};
pub use validate::{ValidationReport, Validator};
