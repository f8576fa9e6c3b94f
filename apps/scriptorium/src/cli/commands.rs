//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.
//!
//! The build command owns the one safety-critical ordering decision of
//! the whole pipeline: validation runs before aggregation, and a
//! non-empty cycle list aborts the build before `SubtreeCounts` is ever
//! constructed. The aggregator's own cycle guard is a backstop, not the
//! mechanism.

use crate::config::SiteConfig;
use crate::loader;
use crate::render::SiteBuilder;
use scriptorium_core::{
    CategoryTree, Dataset, RecordIndex, Sanitizer, ScriptoriumError, SubtreeCounts,
    ValidationReport, Validator,
};
use std::path::Path;

// =============================================================================
// BUILD COMMAND
// =============================================================================

/// Build the static site.
pub fn cmd_build(
    config: &SiteConfig,
    clean: bool,
    validate: bool,
    strict: bool,
) -> Result<(), ScriptoriumError> {
    if clean {
        clean_site(&config.out_dir)?;
    }

    let (dataset, report) = load_and_validate(config)?;

    if validate || strict {
        print_report(&report);
    } else {
        // Warnings still reach the build log even when the report
        // itself was not requested.
        for warning in &report.warnings {
            tracing::warn!("{warning}");
        }
    }

    if strict && report.has_errors() {
        return Err(ScriptoriumError::ValidationFailed(report.errors.len()));
    }
    // Aggregation is only safe over an acyclic hierarchy. This gate runs
    // whether or not the caller asked to see the report.
    if report.has_cycles() {
        return Err(ScriptoriumError::CyclicHierarchy(report.cycles.len()));
    }

    let index = RecordIndex::build(&dataset);
    let tree = CategoryTree::build(&dataset.categories);
    let counts = SubtreeCounts::compute(&tree, &index);

    SiteBuilder::new(config, &dataset, &index, &tree, &counts).build_all()?;

    tracing::info!(
        manuscripts = index.manuscript_count(),
        spells = index.spell_count(),
        categories = index.category_count(),
        out_dir = %config.out_dir.display(),
        "site build complete"
    );

    Ok(())
}

/// Remove generated HTML, leaving source data in place.
fn clean_site(out_dir: &Path) -> Result<(), ScriptoriumError> {
    for sub in ["manuscripts", "spells", "categories"] {
        let dir = out_dir.join(sub);
        if let Err(e) = std::fs::remove_dir_all(&dir) {
            if e.kind() != std::io::ErrorKind::NotFound {
                return Err(ScriptoriumError::Io(format!(
                    "cannot remove {}: {e}",
                    dir.display()
                )));
            }
        }
    }
    let index = out_dir.join("index.html");
    if let Err(e) = std::fs::remove_file(&index) {
        if e.kind() != std::io::ErrorKind::NotFound {
            return Err(ScriptoriumError::Io(format!(
                "cannot remove {}: {e}",
                index.display()
            )));
        }
    }
    Ok(())
}

// =============================================================================
// CHECK COMMAND
// =============================================================================

/// Validate the data without building.
pub fn cmd_check(
    config: &SiteConfig,
    strict: bool,
    json_mode: bool,
) -> Result<(), ScriptoriumError> {
    let (_, report) = load_and_validate(config)?;

    if json_mode {
        let output = serde_json::json!({
            "errors": report.errors,
            "warnings": report.warnings,
            "cycles": report.cycles,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
    } else {
        print_report(&report);
        println!(
            "{} error(s), {} warning(s)",
            report.errors.len(),
            report.warnings.len()
        );
    }

    if strict && report.has_errors() {
        return Err(ScriptoriumError::ValidationFailed(report.errors.len()));
    }
    Ok(())
}

// =============================================================================
// STATS COMMAND
// =============================================================================

/// Show dataset and index statistics.
pub fn cmd_stats(config: &SiteConfig, json_mode: bool) -> Result<(), ScriptoriumError> {
    let raw = loader::load_raw(&config.data_dir)?;
    let sanitized = Sanitizer::sanitize(&raw);
    let dataset = sanitized.dataset;

    let index = RecordIndex::build(&dataset);
    let tree = CategoryTree::build(&dataset.categories);

    if json_mode {
        let output = serde_json::json!({
            "data_dir": config.data_dir.display().to_string(),
            "manuscripts": index.manuscript_count(),
            "spells": index.spell_count(),
            "categories": index.category_count(),
            "links": dataset.links.len(),
            "root_categories": tree.roots().len(),
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    println!("Scriptorium Dataset");
    println!("===================");
    println!("Data dir: {}", config.data_dir.display());
    println!();
    println!("Manuscripts:     {}", index.manuscript_count());
    println!("Spells:          {}", index.spell_count());
    println!("Categories:      {}", index.category_count());
    println!("Links:           {}", dataset.links.len());
    println!("Root categories: {}", tree.roots().len());

    Ok(())
}

// =============================================================================
// SHARED HELPERS
// =============================================================================

/// Load, sanitize, and validate. Sanitizer warnings are folded into the
/// report so every caller prints one consistent picture.
fn load_and_validate(
    config: &SiteConfig,
) -> Result<(Dataset, ValidationReport), ScriptoriumError> {
    let raw = loader::load_raw(&config.data_dir)?;
    let sanitized = Sanitizer::sanitize(&raw);

    let mut report = Validator::validate(&sanitized.dataset);
    let mut warnings = sanitized.warnings;
    warnings.extend(report.warnings);
    report.warnings = warnings;

    Ok((sanitized.dataset, report))
}

/// Print a validation report in build-log form.
fn print_report(report: &ValidationReport) {
    for warning in &report.warnings {
        println!("WARNING: {warning}");
    }
    for error in &report.errors {
        println!("ERROR: {error}");
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn write(dir: &Path, name: &str, content: &str) {
        std::fs::write(dir.join(name), content).expect("write");
    }

    fn config_for(dir: &Path) -> SiteConfig {
        SiteConfig {
            data_dir: dir.join("data"),
            out_dir: dir.join("site"),
            ..SiteConfig::default()
        }
    }

    fn seed(dir: &Path, categories_json: &str) {
        let data = dir.join("data");
        std::fs::create_dir_all(&data).expect("mkdir");
        write(
            &data,
            "manuscripts.json",
            r#"[{"id": "m1", "title": "Codex A"}]"#,
        );
        write(
            &data,
            "spells.json",
            r#"[{"id": "s1", "manuscript_id": "m1", "title_en": "Binding"}]"#,
        );
        write(&data, "categories.json", categories_json);
        write(
            &data,
            "spell_categories.json",
            r#"[{"spell_id": "s1", "category_id": "c1"}]"#,
        );
    }

    #[test]
    fn build_writes_all_page_families() {
        let dir = tempfile::tempdir().expect("tempdir");
        seed(
            dir.path(),
            r#"[{"id": "c1", "name": "Healing"}, {"id": "c2", "name": "Fevers", "parent_id": "c1"}]"#,
        );
        let config = config_for(dir.path());

        cmd_build(&config, false, false, false).expect("build");

        for page in [
            "index.html",
            "manuscripts/m1.html",
            "spells/s1.html",
            "categories/c1.html",
            "categories/c2.html",
            "categories/index.html",
        ] {
            assert!(config.out_dir.join(page).is_file(), "missing {page}");
        }
    }

    #[test]
    fn cyclic_hierarchy_aborts_before_aggregation() {
        let dir = tempfile::tempdir().expect("tempdir");
        seed(
            dir.path(),
            r#"[{"id": "c1", "name": "A", "parent_id": "c2"}, {"id": "c2", "name": "B", "parent_id": "c1"}]"#,
        );
        let config = config_for(dir.path());

        let result = cmd_build(&config, false, false, false);
        assert!(matches!(result, Err(ScriptoriumError::CyclicHierarchy(1))));
        // Nothing was rendered.
        assert!(!config.out_dir.join("index.html").exists());
    }

    #[test]
    fn strict_build_fails_on_dangling_reference() {
        let dir = tempfile::tempdir().expect("tempdir");
        let data = dir.path().join("data");
        std::fs::create_dir_all(&data).expect("mkdir");
        write(&data, "manuscripts.json", r#"[{"id": "m1", "title": "A"}]"#);
        write(
            &data,
            "spells.json",
            r#"[{"id": "s1", "manuscript_id": "ghost"}]"#,
        );
        write(&data, "categories.json", "[]");
        write(&data, "spell_categories.json", "[]");
        let config = config_for(dir.path());

        let result = cmd_build(&config, false, false, true);
        assert!(matches!(
            result,
            Err(ScriptoriumError::ValidationFailed(1))
        ));

        // The same data passes without --strict: errors are collected,
        // not fatal, and the dangling lookup renders a placeholder.
        cmd_build(&config, false, false, false).expect("non-strict build");
        assert!(config.out_dir.join("spells/s1.html").is_file());
    }

    #[test]
    fn clean_removes_stale_pages() {
        let dir = tempfile::tempdir().expect("tempdir");
        seed(dir.path(), r#"[{"id": "c1", "name": "Healing"}]"#);
        let config = config_for(dir.path());

        cmd_build(&config, false, false, false).expect("build");
        let stale = config.out_dir.join("manuscripts/old.html");
        std::fs::write(&stale, "stale").expect("write stale");

        cmd_build(&config, true, false, false).expect("clean build");
        assert!(!stale.exists());
        assert!(config.out_dir.join("manuscripts/m1.html").is_file());
    }

    #[test]
    fn check_passes_clean_data_in_strict_mode() {
        let dir = tempfile::tempdir().expect("tempdir");
        seed(dir.path(), r#"[{"id": "c1", "name": "Healing"}]"#);
        let config = config_for(dir.path());
        cmd_check(&config, true, false).expect("check");
    }

    #[test]
    fn stats_runs_over_seeded_data() {
        let dir = tempfile::tempdir().expect("tempdir");
        seed(dir.path(), r#"[{"id": "c1", "name": "Healing"}]"#);
        let config = config_for(dir.path());
        cmd_stats(&config, true).expect("stats");
    }

    #[test]
    fn missing_data_dir_is_an_io_error() {
        let config = SiteConfig {
            data_dir: PathBuf::from("/no/such/data"),
            ..SiteConfig::default()
        };
        assert!(matches!(
            cmd_build(&config, false, false, false),
            Err(ScriptoriumError::Io(_))
        ));
    }
}
