//! # Record Loader
//!
//! Reads the four JSON record files into a `RawDataset` for the engine.
//!
//! Tolerance rules:
//! - Each file must be a JSON array; anything else is a data error
//! - Non-object array entries are skipped
//! - String values pass through; numbers and booleans are coerced to
//!   their display form; null and nested values read as unset
//!
//! This is the only fallible edge of the pipeline; past here the engine
//! is total.

use scriptorium_core::{RawDataset, RawRecord, ScriptoriumError};
use std::path::Path;

/// Load all four record collections from a data directory.
pub fn load_raw(data_dir: &Path) -> Result<RawDataset, ScriptoriumError> {
    Ok(RawDataset {
        manuscripts: read_records(&data_dir.join("manuscripts.json"))?,
        spells: read_records(&data_dir.join("spells.json"))?,
        categories: read_records(&data_dir.join("categories.json"))?,
        links: read_records(&data_dir.join("spell_categories.json"))?,
    })
}

/// Read one JSON array of flat objects into raw records.
fn read_records(path: &Path) -> Result<Vec<RawRecord>, ScriptoriumError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| ScriptoriumError::Io(format!("cannot read {}: {e}", path.display())))?;
    let value: serde_json::Value = serde_json::from_str(&text)
        .map_err(|e| ScriptoriumError::Data(format!("{}: {e}", path.display())))?;

    let Some(items) = value.as_array() else {
        return Err(ScriptoriumError::Data(format!(
            "{}: expected a JSON array of records",
            path.display()
        )));
    };

    let mut records = Vec::with_capacity(items.len());
    for item in items {
        let Some(object) = item.as_object() else {
            continue;
        };
        let mut record = RawRecord::new();
        for (key, val) in object {
            match val {
                serde_json::Value::String(s) => record.insert(key.as_str(), s.as_str()),
                serde_json::Value::Number(n) => record.insert(key.as_str(), n.to_string()),
                serde_json::Value::Bool(b) => record.insert(key.as_str(), b.to_string()),
                // Null and nested values read as unset.
                _ => {}
            }
        }
        records.push(record);
    }
    Ok(records)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, name: &str, content: &str) {
        std::fs::write(dir.join(name), content).expect("write");
    }

    #[test]
    fn loads_four_collections() {
        let dir = tempfile::tempdir().expect("tempdir");
        write(
            dir.path(),
            "manuscripts.json",
            r#"[{"id": "m1", "title": "Codex A"}]"#,
        );
        write(
            dir.path(),
            "spells.json",
            r#"[{"id": "s1", "manuscript_id": "m1"}]"#,
        );
        write(dir.path(), "categories.json", r#"[{"id": "c1", "name": "Healing"}]"#);
        write(
            dir.path(),
            "spell_categories.json",
            r#"[{"spell_id": "s1", "category_id": "c1"}]"#,
        );

        let raw = load_raw(dir.path()).expect("load");
        assert_eq!(raw.manuscripts.len(), 1);
        assert_eq!(raw.spells.len(), 1);
        assert_eq!(raw.categories.len(), 1);
        assert_eq!(raw.links.len(), 1);
        assert_eq!(raw.manuscripts[0].field("title"), "Codex A");
    }

    #[test]
    fn scalar_values_coerced_null_and_nested_skipped() {
        let dir = tempfile::tempdir().expect("tempdir");
        write(
            dir.path(),
            "manuscripts.json",
            r#"[{"id": 7, "title": true, "date": null, "extra": {"nested": 1}}]"#,
        );
        for name in ["spells.json", "categories.json", "spell_categories.json"] {
            write(dir.path(), name, "[]");
        }

        let raw = load_raw(dir.path()).expect("load");
        let record = &raw.manuscripts[0];
        assert_eq!(record.field("id"), "7");
        assert_eq!(record.field("title"), "true");
        assert_eq!(record.field("date"), "");
        assert_eq!(record.field("extra"), "");
    }

    #[test]
    fn non_object_entries_skipped() {
        let dir = tempfile::tempdir().expect("tempdir");
        write(
            dir.path(),
            "manuscripts.json",
            r#"[{"id": "m1", "title": "A"}, "stray", 42, null]"#,
        );
        for name in ["spells.json", "categories.json", "spell_categories.json"] {
            write(dir.path(), name, "[]");
        }

        let raw = load_raw(dir.path()).expect("load");
        assert_eq!(raw.manuscripts.len(), 1);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let result = load_raw(dir.path());
        assert!(matches!(result, Err(ScriptoriumError::Io(_))));
    }

    #[test]
    fn non_array_root_is_a_data_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        write(dir.path(), "manuscripts.json", r#"{"not": "an array"}"#);
        for name in ["spells.json", "categories.json", "spell_categories.json"] {
            write(dir.path(), name, "[]");
        }

        let result = load_raw(dir.path());
        assert!(matches!(result, Err(ScriptoriumError::Data(_))));
    }
}
