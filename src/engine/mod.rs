//! The schema engine seam.
//!
//! Evaluating JSON Schema is delegated to an [`Engine`]: it compiles a schema
//! document into a [`CompiledSchema`] that reports flat [`ErrorRecord`]s for a
//! piece of data. [`JsonSchemaEngine`] is the default implementation; tests and
//! hosts can plug in their own.

mod json_schema;
pub mod keywords;

use std::sync::Arc;

use serde_json::Value;
use stillwater::Validation;

use crate::error::ErrorRecord;

pub use json_schema::JsonSchemaEngine;

/// Compiles schema documents.
///
/// Compilation failure means the schema document itself is malformed; callers
/// must propagate it rather than collect it.
pub trait Engine: Send + Sync {
    /// Compiles `schema` into a reusable validator.
    fn compile(&self, schema: &Value) -> Result<Arc<dyn CompiledSchema>, EngineError>;
}

/// A compiled schema, executed once per validated value.
///
/// Executions are independent; a compiled schema holds no per-run state.
pub trait CompiledSchema: Send + Sync {
    /// Validates `data`, returning every violation found.
    ///
    /// A `Failure` carrying an empty list is treated as success by callers.
    fn validate(&self, data: &Value) -> Validation<(), Vec<ErrorRecord>>;
}

/// JSON Schema drafts understood by [`JsonSchemaEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Draft {
    Draft4,
    Draft6,
    Draft7,
    Draft201909,
    Draft202012,
}

impl From<Draft> for jsonschema::Draft {
    fn from(draft: Draft) -> Self {
        match draft {
            Draft::Draft4 => jsonschema::Draft::Draft4,
            Draft::Draft6 => jsonschema::Draft::Draft6,
            Draft::Draft7 => jsonschema::Draft::Draft7,
            Draft::Draft201909 => jsonschema::Draft::Draft201909,
            Draft::Draft202012 => jsonschema::Draft::Draft202012,
        }
    }
}

/// Options an engine instance is created with.
///
/// Options are plain values so they can key the
/// [`EngineRegistry`](crate::registry::EngineRegistry). Unset fields leave the
/// engine's own defaults in place.
///
/// # Example
///
/// ```rust
/// use schema_tree::{Draft, EngineOptions};
///
/// let options = EngineOptions::new()
///     .draft(Draft::Draft7)
///     .validate_formats(true);
///
/// assert_eq!(options.get_draft(), Some(Draft::Draft7));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct EngineOptions {
    draft: Option<Draft>,
    validate_formats: Option<bool>,
}

impl EngineOptions {
    /// Creates options that defer to the engine's defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pins the JSON Schema draft instead of detecting it from `$schema`.
    pub fn draft(mut self, draft: Draft) -> Self {
        self.draft = Some(draft);
        self
    }

    /// Turns `format` assertions on or off.
    pub fn validate_formats(mut self, validate: bool) -> Self {
        self.validate_formats = Some(validate);
        self
    }

    /// Returns the pinned draft, if any.
    pub fn get_draft(&self) -> Option<Draft> {
        self.draft
    }

    /// Returns the format assertion setting, if any.
    pub fn get_validate_formats(&self) -> Option<bool> {
        self.validate_formats
    }
}

/// Errors raised while compiling a schema document.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    /// The schema document is malformed.
    #[error("invalid schema: {reason}")]
    Compile { reason: String },

    /// An extension keyword was given an unusable value.
    #[error("invalid value for keyword '{keyword}': {reason}")]
    Keyword { keyword: String, reason: String },
}
