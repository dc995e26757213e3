//! Validating a single object or an array of objects.
//!
//! An array input is validated element by element against one compiled schema.
//! Every record an element produces is prefixed with the element's index
//! (`[1].mode`), descendants included, and the per-element lists are
//! concatenated in element order.

use serde_json::Value;
use stillwater::Validation;

use crate::engine::{CompiledSchema, Engine, EngineError};
use crate::error::ErrorRecord;

/// Compiles `schema` and validates `input`, returning the engine's records.
///
/// Records are returned as reported; no collapsing happens here. An array
/// input yields the concatenation of each element's records, prefixed with
/// `[i]`. Compilation failure is returned as `Err`, even for an empty array.
///
/// # Example
///
/// ```rust
/// use schema_tree::{validate_batch, JsonSchemaEngine};
/// use serde_json::json;
///
/// let engine = JsonSchemaEngine::default();
/// let schema = json!({"properties": {"x": {"type": "number"}}});
///
/// let errors = validate_batch(&engine, &schema, &json!([{"x": 1}, {"x": "bad"}])).unwrap();
/// assert_eq!(errors.len(), 1);
/// assert_eq!(errors[0].path, "[1].x");
/// ```
pub fn validate_batch(
    engine: &dyn Engine,
    schema: &Value,
    input: &Value,
) -> Result<Vec<ErrorRecord>, EngineError> {
    validate_batch_with(engine, schema, input, |errors| errors)
}

/// Like [`validate_batch`], applying `per_element` to each element's records
/// before they are prefixed.
///
/// For a single input, `per_element` is applied to its records once.
pub fn validate_batch_with<F>(
    engine: &dyn Engine,
    schema: &Value,
    input: &Value,
    per_element: F,
) -> Result<Vec<ErrorRecord>, EngineError>
where
    F: Fn(Vec<ErrorRecord>) -> Vec<ErrorRecord>,
{
    let compiled = engine.compile(schema)?;

    let errors = match input {
        Value::Array(items) => items
            .iter()
            .enumerate()
            .flat_map(|(index, item)| {
                let prefix = format!("[{index}]");
                per_element(run(compiled.as_ref(), item))
                    .into_iter()
                    .map(move |mut error| {
                        error.prefix_path(&prefix);
                        error
                    })
            })
            .collect(),
        single => per_element(run(compiled.as_ref(), single)),
    };

    Ok(errors)
}

fn run(compiled: &dyn CompiledSchema, data: &Value) -> Vec<ErrorRecord> {
    match compiled.validate(data) {
        Validation::Success(()) => Vec::new(),
        Validation::Failure(errors) => errors,
    }
}
