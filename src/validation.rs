//! Top-level validation entry points.
//!
//! [`validate`] and [`Validator`] run the batch validator, collapse each
//! element's records into an error tree and turn a non-empty tree into a single
//! [`ValidationFailure`]. Constraint violations never stop validation early:
//! every element is checked before the decision to fail is made.

use std::sync::Arc;

use serde_json::Value;

use crate::batch::validate_batch_with;
use crate::collapse::{collapse_with, Containment};
use crate::engine::{Engine, EngineOptions};
use crate::error::{Configuration, Error, ValidationFailure};
use crate::registry::EngineRegistry;

/// Result of validating input against a schema.
pub type ValidationResult = Result<(), Error>;

/// Validates `input` (an object or an array of objects) against `schema`.
///
/// Uses the shared default engine and substring containment. Returns
/// `Err(Error::Schema)` if the schema does not compile and
/// `Err(Error::Validation)` carrying the full error tree if any element fails.
///
/// # Example
///
/// ```rust
/// use schema_tree::{validate, Configuration, Error};
/// use serde_json::json;
///
/// let schema = json!({
///     "type": "object",
///     "properties": {"mode": {"enum": ["development", "production"]}}
/// });
///
/// assert!(validate(&schema, &json!({"mode": "production"}), Configuration::new()).is_ok());
///
/// let err = validate(&schema, &json!({"mode": "fast"}), Configuration::new()).unwrap_err();
/// let failure = err.as_validation().unwrap();
/// assert_eq!(failure.errors().head().path, ".mode");
/// ```
pub fn validate(schema: &Value, input: &Value, configuration: Configuration) -> ValidationResult {
    Validator::new(schema.clone())
        .configuration(configuration)
        .validate(input)
}

/// A reusable validation setup for one schema.
///
/// # Example
///
/// ```rust
/// use schema_tree::{Configuration, Containment, Draft, EngineOptions, Validator};
/// use serde_json::json;
///
/// let validator = Validator::new(json!({"title": "Plugin options", "required": ["name"]}))
///     .engine_options(EngineOptions::new().draft(Draft::Draft7))
///     .containment(Containment::Segment)
///     .configuration(Configuration::new().name("Copy Plugin"));
///
/// let err = validator.validate(&json!([{"name": "a"}, {}])).unwrap_err();
/// let failure = err.as_validation().unwrap();
/// assert_eq!(failure.len(), 1);
/// assert_eq!(failure.errors().head().path, "[1]");
/// assert_eq!(failure.base_data_path(), "options");
/// ```
#[derive(Clone)]
pub struct Validator {
    schema: Value,
    configuration: Configuration,
    options: EngineOptions,
    containment: Containment,
    engine: Option<Arc<dyn Engine>>,
}

impl Validator {
    /// Creates a validator for `schema` with default settings.
    pub fn new(schema: Value) -> Self {
        Self {
            schema,
            configuration: Configuration::default(),
            options: EngineOptions::default(),
            containment: Containment::default(),
            engine: None,
        }
    }

    /// Sets the configuration attached to failures.
    pub fn configuration(mut self, configuration: Configuration) -> Self {
        self.configuration = configuration;
        self
    }

    /// Sets the options used to pick an engine from the global registry.
    ///
    /// Ignored when an explicit engine is set with [`Validator::engine`].
    pub fn engine_options(mut self, options: EngineOptions) -> Self {
        self.options = options;
        self
    }

    /// Uses `engine` instead of the global registry.
    pub fn engine(mut self, engine: Arc<dyn Engine>) -> Self {
        self.engine = Some(engine);
        self
    }

    /// Sets the containment rule used when collapsing.
    pub fn containment(mut self, containment: Containment) -> Self {
        self.containment = containment;
        self
    }

    /// Returns the schema this validator checks against.
    pub fn schema(&self) -> &Value {
        &self.schema
    }

    /// Validates `input`, an object or an array of objects.
    ///
    /// Each element's records are collapsed before its index prefix is applied,
    /// so records of different elements are never grouped together. This
    /// intentionally differs from collapsing the concatenated output of
    /// [`validate_batch`](crate::validate_batch), where a root failure of
    /// element 1 (`[1]`) would absorb `[0].a[1]` from element 0.
    pub fn validate(&self, input: &Value) -> ValidationResult {
        let engine: Arc<dyn Engine> = match &self.engine {
            Some(engine) => Arc::clone(engine),
            None => EngineRegistry::global().engine(self.options),
        };

        let containment = self.containment;
        let tree = validate_batch_with(engine.as_ref(), &self.schema, input, |errors| {
            collapse_with(errors, containment)
        })?;

        match ValidationFailure::from_errors(tree, self.schema.clone(), self.configuration.clone())
        {
            None => Ok(()),
            Some(failure) => {
                tracing::debug!(
                    errors = failure.len(),
                    name = failure.name(),
                    "input does not match schema"
                );
                Err(Error::Validation(failure))
            }
        }
    }
}
