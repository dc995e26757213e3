//! The aggregate validation failure and its configuration.
//!
//! A failing `validate` call produces exactly one [`ValidationFailure`] that owns
//! the collapsed error tree, the schema document and the [`Configuration`] a
//! formatter needs to render it.

use std::fmt::{self, Debug, Display};
use std::sync::Arc;

use serde_json::Value;
use stillwater::prelude::*;

use crate::engine::EngineError;
use crate::error::ErrorRecord;

/// Hook applied to each rendered top-level error.
///
/// Receives the rendered text and the record it was rendered from and returns
/// the replacement text.
pub type PostFormatter = Arc<dyn Fn(&str, &ErrorRecord) -> String + Send + Sync>;

const DEFAULT_NAME: &str = "Object";
const DEFAULT_BASE_DATA_PATH: &str = "configuration";

/// Formatting options carried by a [`ValidationFailure`].
///
/// # Example
///
/// ```rust
/// use schema_tree::Configuration;
///
/// let configuration = Configuration::new()
///     .name("Copy Plugin")
///     .base_data_path("options")
///     .post_formatter(|line, _error| format!("{line} (see docs)"));
///
/// assert_eq!(configuration.get_name(), Some("Copy Plugin"));
/// ```
#[derive(Clone, Default)]
pub struct Configuration {
    name: Option<String>,
    base_data_path: Option<String>,
    post_formatter: Option<PostFormatter>,
}

impl Configuration {
    /// Creates an empty configuration; every field falls back to its default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the label used in the failure header.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the prefix prepended to every top-level path.
    pub fn base_data_path(mut self, base_data_path: impl Into<String>) -> Self {
        self.base_data_path = Some(base_data_path.into());
        self
    }

    /// Sets the hook applied to each rendered top-level error.
    pub fn post_formatter<F>(mut self, post_formatter: F) -> Self
    where
        F: Fn(&str, &ErrorRecord) -> String + Send + Sync + 'static,
    {
        self.post_formatter = Some(Arc::new(post_formatter));
        self
    }

    /// Returns the configured name, if any.
    pub fn get_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the configured base data path, if any.
    pub fn get_base_data_path(&self) -> Option<&str> {
        self.base_data_path.as_deref()
    }
}

impl Debug for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Configuration")
            .field("name", &self.name)
            .field("base_data_path", &self.base_data_path)
            .field("post_formatter", &self.post_formatter.is_some())
            .finish()
    }
}

/// Splits a two-part schema title (`"Loader options"`) into name and base path.
fn split_title(schema: &Value) -> Option<(&str, &str)> {
    let title = schema.get("title")?.as_str()?;
    let (name, base) = title.rsplit_once(' ')?;
    if name.is_empty() || base.is_empty() {
        return None;
    }
    Some((name, base))
}

fn article(word: &str) -> &'static str {
    match word.chars().next().map(|c| c.to_ascii_lowercase()) {
        Some('a' | 'e' | 'i' | 'o' | 'u') => "an",
        _ => "a",
    }
}

fn indent(text: &str, prefix: &str) -> String {
    text.replace('\n', &format!("\n{prefix}"))
}

/// The single failure returned when input does not match its schema.
///
/// The error tree is guaranteed non-empty. The effective header name and base
/// data path are resolved once at construction: the configuration wins, then a
/// two-part schema `title`, then the defaults `Object` and `configuration`.
#[derive(Clone)]
pub struct ValidationFailure {
    errors: NonEmptyVec<ErrorRecord>,
    schema: Value,
    configuration: Configuration,
    name: String,
    base_data_path: String,
}

impl ValidationFailure {
    /// Creates a failure from a non-empty error tree.
    pub fn new(errors: NonEmptyVec<ErrorRecord>, schema: Value, configuration: Configuration) -> Self {
        let title = split_title(&schema);
        let name = configuration
            .name
            .clone()
            .or_else(|| title.map(|(name, _)| name.to_string()))
            .unwrap_or_else(|| DEFAULT_NAME.to_string());
        let base_data_path = configuration
            .base_data_path
            .clone()
            .or_else(|| title.map(|(_, base)| base.to_string()))
            .unwrap_or_else(|| DEFAULT_BASE_DATA_PATH.to_string());

        Self {
            errors,
            schema,
            configuration,
            name,
            base_data_path,
        }
    }

    /// Creates a failure from an error tree, or `None` if the tree is empty.
    pub fn from_errors(
        errors: Vec<ErrorRecord>,
        schema: Value,
        configuration: Configuration,
    ) -> Option<Self> {
        NonEmptyVec::from_vec(errors).map(|errors| Self::new(errors, schema, configuration))
    }

    /// Returns the top-level records of the error tree.
    pub fn errors(&self) -> &NonEmptyVec<ErrorRecord> {
        &self.errors
    }

    /// Returns an iterator over the top-level records.
    pub fn iter(&self) -> impl Iterator<Item = &ErrorRecord> {
        self.errors.iter()
    }

    /// Returns the number of top-level records.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Always false; a failure carries at least one record.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns the schema the input was validated against.
    pub fn schema(&self) -> &Value {
        &self.schema
    }

    /// Returns the configuration as supplied by the caller.
    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    /// Returns the effective header name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the effective base data path.
    pub fn base_data_path(&self) -> &str {
        &self.base_data_path
    }

    /// Returns the post-formatting hook, if one was configured.
    pub fn post_formatter(&self) -> Option<&PostFormatter> {
        self.configuration.post_formatter.as_ref()
    }

    /// Consumes the failure and returns the top-level records.
    pub fn into_errors(self) -> Vec<ErrorRecord> {
        self.errors.into_vec()
    }

    /// Returns the header line describing the failure.
    pub fn header(&self) -> String {
        format!(
            "Invalid {base} object. {name} has been initialized using {article} {base} object that does not match the API schema.",
            base = self.base_data_path,
            name = self.name,
            article = article(&self.base_data_path),
        )
    }

    /// Renders one text block per top-level record, with the post formatter applied.
    pub fn lines(&self) -> Vec<String> {
        self.errors
            .iter()
            .map(|error| {
                let rendered = self.render(error);
                match self.post_formatter() {
                    Some(post_formatter) => post_formatter(&rendered, error),
                    None => rendered,
                }
            })
            .collect()
    }

    fn render(&self, error: &ErrorRecord) -> String {
        let mut out = format!("{}{}: {}", self.base_data_path, error.path, error.message);
        for child in &error.children {
            out.push_str("\n * ");
            out.push_str(&indent(&self.render(child), "   "));
        }
        out
    }
}

impl Debug for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationFailure")
            .field("errors", &self.errors)
            .field("name", &self.name)
            .field("base_data_path", &self.base_data_path)
            .finish_non_exhaustive()
    }
}

impl Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.header())?;
        for line in self.lines() {
            write!(f, "\n - {}", indent(&line, "   "))?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationFailure {}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<ValidationFailure>();
    assert_sync::<ValidationFailure>();
};

/// Errors returned by [`validate`](crate::validate).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The schema could not be compiled. Never collected into an error tree.
    #[error(transparent)]
    Schema(#[from] EngineError),

    /// The input did not match the schema.
    #[error(transparent)]
    Validation(#[from] ValidationFailure),
}

impl Error {
    /// Returns the validation failure, if this is one.
    pub fn as_validation(&self) -> Option<&ValidationFailure> {
        match self {
            Error::Validation(failure) => Some(failure),
            Error::Schema(_) => None,
        }
    }
}
