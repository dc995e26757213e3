//! Constraint violation records.
//!
//! This module provides [`ErrorRecord`], the atomic unit produced by a schema
//! engine for one violated constraint at one data location, and [`ErrorKind`],
//! the open set of constraint categories.

use std::fmt::{self, Display};

use serde_json::Value;

/// The category of a violated constraint.
///
/// Kinds are derived from the name of the failing schema keyword. Keywords this
/// crate does not know about are carried through as [`ErrorKind::Other`], so a
/// new engine keyword never needs a change here.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// `type` mismatch.
    Type,
    /// Value not among the `enum` options.
    Enum,
    /// Value differs from `const`.
    Const,
    /// A `required` property is missing.
    Required,
    /// String does not match `pattern`.
    Pattern,
    /// String does not match `format`.
    Format,
    /// No `anyOf` branch matched.
    AnyOf,
    /// Zero or several `oneOf` branches matched.
    OneOf,
    /// Value matched a `not` schema.
    Not,
    /// Properties not allowed by `additionalProperties`.
    AdditionalProperties,
    /// Numeric bound (`minimum`, `maximum`, exclusive variants, `multipleOf`).
    Limit(String),
    /// Size bound on strings, arrays or objects (`minLength`, `maxItems`, ...).
    Size(String),
    /// `absolutePath` extension keyword.
    AbsolutePath,
    /// `patternRequired` extension keyword.
    PatternRequired,
    /// Any other keyword, carried opaquely.
    Other(String),
}

impl ErrorKind {
    /// Maps a schema keyword name to its kind.
    pub fn from_keyword(keyword: &str) -> Self {
        match keyword {
            "type" => ErrorKind::Type,
            "enum" => ErrorKind::Enum,
            "const" => ErrorKind::Const,
            "required" => ErrorKind::Required,
            "pattern" => ErrorKind::Pattern,
            "format" => ErrorKind::Format,
            "anyOf" => ErrorKind::AnyOf,
            "oneOf" => ErrorKind::OneOf,
            "not" => ErrorKind::Not,
            "additionalProperties" => ErrorKind::AdditionalProperties,
            "minimum" | "maximum" | "exclusiveMinimum" | "exclusiveMaximum" | "multipleOf" => {
                ErrorKind::Limit(keyword.to_string())
            }
            "minLength" | "maxLength" | "minItems" | "maxItems" | "minProperties"
            | "maxProperties" => ErrorKind::Size(keyword.to_string()),
            "absolutePath" => ErrorKind::AbsolutePath,
            "patternRequired" => ErrorKind::PatternRequired,
            other => ErrorKind::Other(other.to_string()),
        }
    }

    /// Returns the schema keyword this kind was derived from.
    pub fn keyword(&self) -> &str {
        match self {
            ErrorKind::Type => "type",
            ErrorKind::Enum => "enum",
            ErrorKind::Const => "const",
            ErrorKind::Required => "required",
            ErrorKind::Pattern => "pattern",
            ErrorKind::Format => "format",
            ErrorKind::AnyOf => "anyOf",
            ErrorKind::OneOf => "oneOf",
            ErrorKind::Not => "not",
            ErrorKind::AdditionalProperties => "additionalProperties",
            ErrorKind::AbsolutePath => "absolutePath",
            ErrorKind::PatternRequired => "patternRequired",
            ErrorKind::Limit(keyword) | ErrorKind::Size(keyword) | ErrorKind::Other(keyword) => {
                keyword.as_str()
            }
        }
    }

    /// Returns true for kinds whose failure summarizes failed sub-schemas.
    pub fn is_branch_failure(&self) -> bool {
        matches!(self, ErrorKind::AnyOf | ErrorKind::OneOf | ErrorKind::Not)
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A single constraint violation.
///
/// `path`, `kind`, `message`, `schema_path` and `params` come from the engine
/// and are never reinterpreted. `children` is filled only by
/// [`collapse`](crate::collapse::collapse); an empty vector marks a leaf.
///
/// # Example
///
/// ```rust
/// use schema_tree::{ErrorKind, ErrorRecord};
///
/// let error = ErrorRecord::new(".mode", ErrorKind::Enum, "must be one of the allowed values")
///     .with_schema_path("#/properties/mode/enum");
///
/// assert!(error.is_leaf());
/// assert_eq!(error.kind.keyword(), "enum");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorRecord {
    /// Data location of the violation (`.foo[0].bar`, empty for the root).
    pub path: String,
    /// Category of the violated constraint.
    pub kind: ErrorKind,
    /// Engine-provided message.
    pub message: String,
    /// Location of the failing keyword in the schema (`#/properties/foo/type`).
    pub schema_path: String,
    /// Keyword arguments, passed through for formatting.
    pub params: Value,
    /// The offending value, when the engine reports it.
    pub data: Option<Value>,
    /// Violations grouped under this one.
    pub children: Vec<ErrorRecord>,
}

impl ErrorRecord {
    /// Creates a leaf record with empty schema path and params.
    pub fn new(path: impl Into<String>, kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind,
            message: message.into(),
            schema_path: String::new(),
            params: Value::Null,
            data: None,
            children: Vec::new(),
        }
    }

    /// Sets the schema path and returns self for chaining.
    pub fn with_schema_path(mut self, schema_path: impl Into<String>) -> Self {
        self.schema_path = schema_path.into();
        self
    }

    /// Sets the params payload and returns self for chaining.
    pub fn with_params(mut self, params: Value) -> Self {
        self.params = params;
        self
    }

    /// Sets the offending value and returns self for chaining.
    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Sets the children and returns self for chaining.
    pub fn with_children(mut self, children: Vec<ErrorRecord>) -> Self {
        self.children = children;
        self
    }

    /// Returns true if no violations are grouped under this record.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Prepends `prefix` to this record's path and to every descendant's path.
    pub fn prefix_path(&mut self, prefix: &str) {
        self.path.insert_str(0, prefix);
        for child in &mut self.children {
            child.prefix_path(prefix);
        }
    }

    /// Counts this record and all of its descendants.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(ErrorRecord::count).sum::<usize>()
    }
}

impl Display for ErrorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path_str = if self.path.is_empty() {
            "(root)"
        } else {
            self.path.as_str()
        };
        write!(f, "{}: {}", path_str, self.message)
    }
}

impl std::error::Error for ErrorRecord {}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<ErrorRecord>();
    assert_sync::<ErrorRecord>();
};
