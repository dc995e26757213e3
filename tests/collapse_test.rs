//! Tests for error tree collapsing through the validation entry points.
//!
//! A scripted engine replays fixed record lists so that record order, which
//! drives collapsing, is fully controlled.

use schema_tree::{
    collapse, CompiledSchema, Configuration, Containment, Engine, EngineError, ErrorKind,
    ErrorRecord, Validator,
};
use serde_json::{json, Value};
use std::sync::Arc;
use stillwater::Validation;

/// Replays the paths listed under the input's `errors` key, in order.
struct ScriptedEngine;

impl CompiledSchema for ScriptedEngine {
    fn validate(&self, data: &Value) -> Validation<(), Vec<ErrorRecord>> {
        let errors: Vec<ErrorRecord> = data["errors"]
            .as_array()
            .map(|paths| {
                paths
                    .iter()
                    .filter_map(Value::as_str)
                    .map(|path| ErrorRecord::new(path, ErrorKind::Type, format!("bad {path}")))
                    .collect()
            })
            .unwrap_or_default();

        if errors.is_empty() {
            Validation::Success(())
        } else {
            Validation::Failure(errors)
        }
    }
}

impl Engine for ScriptedEngine {
    fn compile(&self, _schema: &Value) -> Result<Arc<dyn CompiledSchema>, EngineError> {
        Ok(Arc::new(ScriptedEngine))
    }
}

fn validator() -> Validator {
    Validator::new(json!({})).engine(Arc::new(ScriptedEngine))
}

fn top_level(input: Value) -> Vec<ErrorRecord> {
    validator()
        .validate(&input)
        .unwrap_err()
        .as_validation()
        .unwrap()
        .iter()
        .cloned()
        .collect()
}

fn paths(records: &[ErrorRecord]) -> Vec<&str> {
    records.iter().map(|r| r.path.as_str()).collect()
}

#[test]
fn test_valid_input_returns_ok() {
    assert!(validator().validate(&json!({"errors": []})).is_ok());
    assert!(validator().validate(&json!([{}, {"errors": []}])).is_ok());
}

#[test]
fn test_single_violation_is_single_leaf() {
    let tree = top_level(json!({"errors": [".x"]}));
    assert_eq!(tree.len(), 1);
    assert!(tree[0].is_leaf());
}

#[test]
fn test_ancestor_first_order_leaves_records_independent() {
    let tree = top_level(json!({"errors": [".a", ".a.b", ".a.b.c"]}));
    assert_eq!(paths(&tree), vec![".a", ".a.b", ".a.b.c"]);
    assert!(tree.iter().all(ErrorRecord::is_leaf));
}

#[test]
fn test_descendant_first_order_nests_under_ancestor() {
    let tree = top_level(json!({"errors": [".a.b.c", ".a.b", ".a"]}));
    assert_eq!(paths(&tree), vec![".a"]);
    assert_eq!(paths(&tree[0].children), vec![".a.b.c", ".a.b"]);
}

#[test]
fn test_absorption_direction() {
    let tree = top_level(json!({"errors": [".a.b", ".a"]}));
    assert_eq!(paths(&tree), vec![".a"]);
    assert_eq!(paths(&tree[0].children), vec![".a.b"]);

    let tree = top_level(json!({"errors": [".a", ".a.b"]}));
    assert_eq!(paths(&tree), vec![".a", ".a.b"]);
}

#[test]
fn test_top_level_order_is_first_appearance_of_survivors() {
    let tree = top_level(json!({"errors": [".c", ".b.x", ".a", ".b", ".d"]}));
    assert_eq!(paths(&tree), vec![".c", ".a", ".b", ".d"]);
}

#[test]
fn test_array_elements_are_collapsed_independently() {
    let input = json!([
        {"errors": [".a[1]"]},
        {"errors": [""]},
    ]);
    let tree = top_level(input);

    // A root failure of element 1 must not swallow element 0's `.a[1]`.
    assert_eq!(paths(&tree), vec!["[0].a[1]", "[1]"]);
    assert!(tree.iter().all(ErrorRecord::is_leaf));
}

#[test]
fn test_children_are_prefixed_with_element_index() {
    let input = json!([{}, {"errors": [".mode", ".mode"]}]);
    let tree = top_level(input);

    assert_eq!(paths(&tree), vec!["[1].mode"]);
    assert_eq!(paths(&tree[0].children), vec!["[1].mode"]);
}

#[test]
fn test_five_elements_three_failing_yield_one_failure() {
    let input = json!([
        {},
        {"errors": [".x"]},
        {"errors": [".y.z", ".y", ".w"]},
        {},
        {"errors": [".x", ".v"]},
    ]);

    let err = validator().validate(&input).unwrap_err();
    let failure = err.as_validation().unwrap();

    assert_eq!(
        paths(&failure.iter().cloned().collect::<Vec<_>>()),
        vec!["[1].x", "[2].y", "[2].w", "[4].x", "[4].v"]
    );
    assert_eq!(failure.len(), 5);
}

#[test]
fn test_segment_containment_is_opt_in() {
    let input = json!({"errors": [".ab", ".a"]});

    let tree = top_level(input.clone());
    assert_eq!(paths(&tree), vec![".a"]);

    let err = validator()
        .containment(Containment::Segment)
        .validate(&input)
        .unwrap_err();
    let failure = err.as_validation().unwrap();
    assert_eq!(failure.len(), 2);
}

#[test]
fn test_configuration_is_carried_to_failure() {
    let err = validator()
        .configuration(Configuration::new().name("Scripted").base_data_path("options"))
        .validate(&json!({"errors": [".x"]}))
        .unwrap_err();
    let failure = err.as_validation().unwrap();

    assert_eq!(failure.name(), "Scripted");
    assert_eq!(failure.base_data_path(), "options");
    assert_eq!(failure.schema(), &json!({}));
}

#[test]
fn test_collapse_is_stable_when_rerun() {
    let flat = vec![
        ErrorRecord::new(".a.b", ErrorKind::Type, "1"),
        ErrorRecord::new(".c", ErrorKind::Type, "2"),
        ErrorRecord::new(".a", ErrorKind::AnyOf, "3"),
    ];

    let once = collapse(flat);
    let twice = collapse(once.clone());
    assert_eq!(once, twice);
}
