//! Loading class snapshots from disk.

use ctorchain_model::{ClassModel, FirstStatement, ModelSources};
use std::path::Path;
use tempfile::TempDir;

fn write_snapshot(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn loads_and_merges_snapshot_files() {
    let temp = TempDir::new().unwrap();
    let base = write_snapshot(
        temp.path(),
        "base.json",
        r#"{ "classes": [ { "name": "lib.Base", "constructors": [ { "parameters": [] } ] } ] }"#,
    );
    let app = write_snapshot(
        temp.path(),
        "app.json",
        r#"{ "classes": [ { "name": "app.Widget", "superclass": "lib.Base", "constructors": [
            { "parameters": ["int"], "body": { "kind": "super", "target": { "parameters": [] } } }
        ] } ] }"#,
    );

    let mut sources = ModelSources::new();
    sources.add_file(&app).unwrap();
    sources.add_file(&base).unwrap();
    let hierarchy = sources.build().unwrap();

    let widget = hierarchy.find_class("app.Widget").unwrap();
    let base_class = hierarchy.find_class("lib.Base").unwrap();
    let ctor = hierarchy.constructors_of(widget)[0];
    assert_eq!(
        hierarchy.first_statement_of(ctor),
        FirstStatement::super_call(hierarchy.constructors_of(base_class)[0])
    );
}

#[test]
fn missing_file_reports_path() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("nope.json");
    let mut sources = ModelSources::new();
    let err = sources.add_file(&missing).unwrap_err();
    assert!(err.to_string().contains("nope.json"), "got: {err}");
}

#[test]
fn empty_snapshot_builds_empty_hierarchy() {
    let temp = TempDir::new().unwrap();
    let path = write_snapshot(temp.path(), "empty.json", "{}");
    let mut sources = ModelSources::new();
    sources.add_file(&path).unwrap();
    let hierarchy = sources.build().unwrap();
    assert_eq!(hierarchy.class_count(), 0);
}
