use std::path::{Path, PathBuf};

use reachy_core::{load, parse_document_str, DocumentFormat, LoadError, OperationDefinition};
use tempfile::TempDir;

fn shipped_catalog() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../catalog")
}

fn write(dir: &Path, rel: &str, contents: &str) {
    let path = dir.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("mkdir");
    }
    std::fs::write(path, contents).expect("write");
}

fn definition_json(name: &str) -> String {
    format!(
        r#"{{
  "name": "{name}",
  "description": "does {name}",
  "parameters": {{
    "required": [],
    "optional": [{{ "name": "duration", "type": "number", "default": 1.0 }}]
  }},
  "execution": {{ "type": "builtin", "unit": "{name}" }}
}}"#
    )
}

#[test]
fn shipped_catalog_loads_in_index_order() {
    let catalog = load(&shipped_catalog()).unwrap();
    let names: Vec<&str> = catalog.definitions().iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names.len(), 18);
    assert_eq!(names[0], "turn_on_robot");
    assert!(names.contains(&"perform_gesture"));
    assert!(names.contains(&"nod_head"));
}

#[test]
fn yaml_index_and_definitions_are_accepted() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "index.yaml",
        "operations:\n  - name: wave\n    definition: defs/wave.yaml\n",
    );
    write(
        dir.path(),
        "defs/wave.yaml",
        r#"
name: wave
description: Wave the antennas
parameters:
  optional:
    - name: times
      type: integer
      default: 2
execution:
  type: builtin
  unit: wave
"#,
    );
    let catalog = load(dir.path()).unwrap();
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.definitions()[0].defaults()["times"], 2);
}

#[test]
fn disabled_entries_are_skipped_without_reading_the_definition() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "index.json",
        r#"{ "operations": [
            { "name": "a", "definition": "a.json" },
            { "name": "b", "definition": "missing.json", "enabled": false }
        ] }"#,
    );
    write(dir.path(), "a.json", &definition_json("a"));
    let catalog = load(dir.path()).unwrap();
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.disabled().to_vec(), vec!["b".to_string()]);
}

#[test]
fn duplicate_names_are_rejected_not_overwritten() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "index.json",
        r#"{ "operations": [
            { "name": "a", "definition": "a.json" },
            { "name": "a", "definition": "a.json" }
        ] }"#,
    );
    write(dir.path(), "a.json", &definition_json("a"));
    let err = match load(dir.path()).unwrap_err() {
        LoadError::Validation(err) => err,
        other => panic!("expected validation error, got {other}"),
    };
    assert!(err
        .violations
        .iter()
        .any(|v| v.path == "$.operations[1].name" && v.message.contains("duplicate")));
}

#[test]
fn missing_definition_file_is_a_dangling_reference() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "index.json",
        r#"{ "operations": [ { "name": "a", "definition": "nowhere.json" } ] }"#,
    );
    match load(dir.path()).unwrap_err() {
        LoadError::MissingDefinition { operation, path } => {
            assert_eq!(operation, "a");
            assert!(path.ends_with("nowhere.json"));
        }
        other => panic!("expected missing definition, got {other}"),
    }
}

#[test]
fn missing_index_is_reported() {
    let dir = TempDir::new().unwrap();
    assert!(matches!(load(dir.path()), Err(LoadError::MissingIndex(_))));
}

#[test]
fn missing_execution_field_is_a_parse_error() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "index.json",
        r#"{ "operations": [ { "name": "a", "definition": "a.json" } ] }"#,
    );
    write(dir.path(), "a.json", r#"{ "name": "a", "description": "x" }"#);
    assert!(matches!(load(dir.path()), Err(LoadError::Parse { .. })));
}

#[test]
fn definition_violations_are_collected_with_file_paths() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "index.json",
        r#"{ "operations": [ { "name": "a", "definition": "a.json" } ] }"#,
    );
    write(
        dir.path(),
        "a.json",
        r#"{
  "name": "b",
  "description": " ",
  "parameters": {
    "required": [{ "name": "mood", "type": "string", "enum": ["happy"], "default": "happy" }],
    "optional": [
      { "name": "mood", "type": "string" },
      { "name": "duration", "type": "number", "default": "slow" },
      { "name": "level", "type": "integer", "enum": ["1"] }
    ]
  },
  "execution": { "type": "builtin", "unit": "" }
}"#,
    );
    let LoadError::Validation(err) = load(dir.path()).unwrap_err() else {
        panic!("expected validation error");
    };
    let paths: Vec<&str> = err.violations.iter().map(|v| v.path.as_str()).collect();
    assert!(paths.contains(&"a.json#$.name"));
    assert!(paths.contains(&"a.json#$.description"));
    assert!(paths.contains(&"a.json#$.parameters.required[0].default"));
    assert!(paths.contains(&"a.json#$.parameters.optional[0].name"));
    assert!(paths.contains(&"a.json#$.parameters.optional[1].default"));
    assert!(paths.contains(&"a.json#$.parameters.optional[2].enum"));
    assert!(paths.contains(&"a.json#$.execution.unit"));
}

#[test]
fn unknown_execution_type_fails_to_parse() {
    let doc = r#"{ "name": "a", "description": "x", "execution": { "type": "script", "unit": "a" } }"#;
    let err = parse_document_str::<OperationDefinition>(doc, DocumentFormat::Auto).unwrap_err();
    assert!(err.to_string().contains("JSON"));
}
