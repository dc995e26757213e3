//! # Schema Tree
//!
//! Validates configuration objects against JSON Schema and reports every
//! failure at once, as a hierarchical error tree instead of the engine's flat
//! list of violated keywords.
//!
//! ## Overview
//!
//! A JSON Schema engine reports one record per failed keyword. A value that
//! fails every branch of an `anyOf` produces a record per branch plus one for
//! the `anyOf`; a failing root-level keyword follows all records beneath it.
//! [`collapse`] groups such records into parent/children structures in one
//! left-to-right pass, so a formatter can render one message per logical
//! failure.
//!
//! ## Core Types
//!
//! - [`ErrorRecord`]: one violated constraint at one data path (e.g. `.rules[0].use`)
//! - [`collapse`]: folds a flat record list into an error tree
//! - [`validate_batch`]: validates an object or each element of an array
//! - [`validate`] / [`Validator`]: entry points returning a single [`ValidationFailure`]
//! - [`Engine`]: the seam to the schema engine, with [`JsonSchemaEngine`] as default
//!
//! ## Example
//!
//! ```rust
//! use schema_tree::{validate, Configuration};
//! use serde_json::json;
//!
//! let schema = json!({
//!     "type": "object",
//!     "properties": {"x": {"type": "number"}}
//! });
//!
//! let err = validate(
//!     &schema,
//!     &json!([{"x": 1}, {"x": "bad"}]),
//!     Configuration::new().name("Example Plugin"),
//! )
//! .unwrap_err();
//!
//! let failure = err.as_validation().unwrap();
//! assert_eq!(failure.len(), 1);
//! assert_eq!(failure.errors().head().path, "[1].x");
//! ```

pub mod batch;
pub mod collapse;
pub mod engine;
pub mod error;
pub mod path;
pub mod registry;
pub mod validation;

pub use batch::{validate_batch, validate_batch_with};
pub use collapse::{collapse, collapse_with, Containment};
pub use engine::{CompiledSchema, Draft, Engine, EngineError, EngineOptions, JsonSchemaEngine};
pub use error::{
    Configuration, Error, ErrorKind, ErrorRecord, PostFormatter, ValidationFailure,
};
pub use path::{JsonPath, PathSegment};
pub use registry::EngineRegistry;
pub use validation::{validate, ValidationResult, Validator};
