//! The default engine, backed by the `jsonschema` crate.

use jsonschema::Validator;
use serde_json::{Map, Value};
use std::sync::Arc;
use stillwater::Validation;

use super::keywords::{self, EXTENSION_KEYWORDS};
use super::{CompiledSchema, Engine, EngineError, EngineOptions};
use crate::error::{ErrorKind, ErrorRecord};
use crate::path::JsonPath;

/// Root-level keywords copied into a branch document so its `$ref`s and
/// draft still resolve when the branch is compiled on its own.
const INHERITED_KEYWORDS: [&str; 3] = ["$schema", "definitions", "$defs"];

/// A [`Engine`] built on the `jsonschema` crate.
///
/// Every compiled schema has the [extension keywords](super::keywords)
/// installed. The engine keeps no per-document state: each `compile` builds a
/// fresh validator.
///
/// A failed `anyOf` or `oneOf` is reported the way a verbose engine reports
/// it: the records of every failing branch first, then the record of the
/// combinator itself, so that collapsing nests the branches under it.
///
/// # Example
///
/// ```rust
/// use schema_tree::{Engine, EngineOptions, JsonSchemaEngine};
/// use serde_json::json;
///
/// let engine = JsonSchemaEngine::new(EngineOptions::new());
/// let compiled = engine.compile(&json!({"type": "object"})).unwrap();
///
/// assert!(compiled.validate(&json!({})).is_success());
/// assert!(compiled.validate(&json!(1)).is_failure());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSchemaEngine {
    options: EngineOptions,
}

impl JsonSchemaEngine {
    /// Creates an engine with the given options.
    pub fn new(options: EngineOptions) -> Self {
        Self { options }
    }

    /// Returns the options this engine was created with.
    pub fn options(&self) -> EngineOptions {
        self.options
    }
}

fn build(options: EngineOptions, schema: &Value) -> Result<Validator, EngineError> {
    let mut builder = jsonschema::options();
    if let Some(draft) = options.get_draft() {
        builder.with_draft(draft.into());
    }
    if let Some(validate) = options.get_validate_formats() {
        builder.should_validate_formats(validate);
    }
    keywords::register(&mut builder);

    builder.build(schema).map_err(|e| {
        let location = e.instance_path.to_string();
        match location.rsplit('/').next() {
            Some(keyword) if EXTENSION_KEYWORDS.contains(&keyword) => EngineError::Keyword {
                keyword: keyword.to_string(),
                reason: e.to_string(),
            },
            _ => EngineError::Compile {
                reason: e.to_string(),
            },
        }
    })
}

impl Engine for JsonSchemaEngine {
    fn compile(&self, schema: &Value) -> Result<Arc<dyn CompiledSchema>, EngineError> {
        tracing::trace!(options = ?self.options, "compiling schema");
        let validator = build(self.options, schema)?;
        Ok(Arc::new(JsonSchemaValidator {
            validator,
            schema: schema.clone(),
            options: self.options,
        }))
    }
}

/// A schema compiled by [`JsonSchemaEngine`].
struct JsonSchemaValidator {
    validator: Validator,
    schema: Value,
    options: EngineOptions,
}

impl JsonSchemaValidator {
    /// Wraps a branch subschema so it can be compiled standalone.
    fn branch_document(&self, branch: &Value) -> Value {
        let Value::Object(branch) = branch else {
            return branch.clone();
        };
        let mut document = branch.clone();
        for keyword in INHERITED_KEYWORDS {
            if let Some(value) = self.schema.get(keyword) {
                document
                    .entry(keyword)
                    .or_insert_with(|| value.clone());
            }
        }
        Value::Object(document)
    }

    /// Appends the records `validator` reports for the value at
    /// `instance_base`, with pointers rebased onto the root data and schema.
    fn collect(
        &self,
        validator: &Validator,
        data: &Value,
        instance_base: &str,
        schema_base: &str,
        out: &mut Vec<ErrorRecord>,
    ) {
        let Some(instance) = data.pointer(instance_base) else {
            return;
        };

        for error in validator.iter_errors(instance) {
            let instance_pointer = format!("{instance_base}{}", error.instance_path);
            let schema_pointer = format!("{schema_base}{}", error.schema_path);
            let keyword = keyword_of(&schema_pointer);

            if matches!(keyword.as_str(), "anyOf" | "oneOf") {
                if let Some(Value::Array(branches)) = self.schema.pointer(&schema_pointer) {
                    for (index, branch) in branches.iter().enumerate() {
                        // A branch that fails to compile standalone contributes no records.
                        if let Ok(branch_validator) =
                            build(self.options, &self.branch_document(branch))
                        {
                            let branch_base = format!("{schema_pointer}/{index}");
                            self.collect(
                                &branch_validator,
                                data,
                                &instance_pointer,
                                &branch_base,
                                out,
                            );
                        }
                    }
                }
            }

            out.push(self.record(
                data,
                &instance_pointer,
                &schema_pointer,
                &keyword,
                error.to_string(),
            ));
        }
    }

    fn record(
        &self,
        data: &Value,
        instance_pointer: &str,
        schema_pointer: &str,
        keyword: &str,
        message: String,
    ) -> ErrorRecord {
        let mut params = Map::new();
        if let Some(argument) = self.schema.pointer(schema_pointer) {
            params.insert(keyword.to_string(), argument.clone());
        }

        let mut record = ErrorRecord::new(
            JsonPath::from_pointer(instance_pointer, data).to_string(),
            ErrorKind::from_keyword(keyword),
            message,
        )
        .with_schema_path(format!("#{schema_pointer}"))
        .with_params(Value::Object(params));

        if let Some(value) = data.pointer(instance_pointer) {
            record = record.with_data(value.clone());
        }
        record
    }
}

fn keyword_of(schema_pointer: &str) -> String {
    schema_pointer
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .replace("~1", "/")
        .replace("~0", "~")
}

impl CompiledSchema for JsonSchemaValidator {
    fn validate(&self, data: &Value) -> Validation<(), Vec<ErrorRecord>> {
        let mut errors = Vec::new();
        self.collect(&self.validator, data, "", "", &mut errors);

        if errors.is_empty() {
            Validation::Success(())
        } else {
            Validation::Failure(errors)
        }
    }
}
