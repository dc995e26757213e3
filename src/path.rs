//! Data path representation for locating values in configuration objects.
//!
//! This module provides [`JsonPath`] and [`PathSegment`] types for building
//! data paths and rendering them in the dotted/bracketed form used by error
//! records (e.g. `.plugins[0].options`, `['output-dir']`).

use std::fmt::{self, Display};

use serde_json::Value;

/// A segment of a data path.
///
/// Paths are built from segments that represent either property access or array indexing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A property access (e.g., `plugins`, `output-dir`)
    Field(String),
    /// An array index access (e.g., `[0]`, `[42]`)
    Index(usize),
}

impl PathSegment {
    /// Creates a new field segment.
    pub fn field(name: impl Into<String>) -> Self {
        PathSegment::Field(name.into())
    }

    /// Creates a new index segment.
    pub fn index(idx: usize) -> Self {
        PathSegment::Index(idx)
    }
}

/// A path to a value in a configuration object.
///
/// `JsonPath` renders every property with a leading separator so that paths
/// can be concatenated onto a base path or an array index prefix:
///
/// ```rust
/// use schema_tree::JsonPath;
///
/// let path = JsonPath::root()
///     .push_field("plugins")
///     .push_index(0)
///     .push_field("output-dir");
///
/// assert_eq!(path.to_string(), ".plugins[0]['output-dir']");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct JsonPath {
    segments: Vec<PathSegment>,
}

impl JsonPath {
    /// Creates an empty path representing the root value.
    pub fn root() -> Self {
        Self::default()
    }

    /// Builds a path from a JSON pointer (`/plugins/0/name`) as reported by a
    /// schema engine.
    ///
    /// Pointer tokens are ambiguous between array indices and numeric property
    /// names, so the pointer is walked against `instance`: a token addressing an
    /// array becomes an index, everything else becomes a field.
    pub fn from_pointer(pointer: &str, instance: &Value) -> Self {
        let mut path = Self::root();
        let mut current = Some(instance);

        for token in pointer.split('/').skip(1) {
            let token = unescape_token(token);
            match (current, token.parse::<usize>()) {
                (Some(Value::Array(items)), Ok(index)) => {
                    current = items.get(index);
                    path = path.push_index(index);
                }
                (Some(Value::Object(map)), _) => {
                    current = map.get(&token);
                    path = path.push_field(token);
                }
                _ => {
                    current = None;
                    path = path.push_field(token);
                }
            }
        }

        path
    }

    /// Returns a new path with a field segment appended.
    pub fn push_field(&self, name: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Field(name.into()));
        Self { segments }
    }

    /// Returns a new path with an index segment appended.
    pub fn push_index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Index(index));
        Self { segments }
    }

    /// Returns true if this is the root path (no segments).
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the number of segments in this path.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if this path has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns an iterator over the path segments.
    pub fn segments(&self) -> impl Iterator<Item = &PathSegment> {
        self.segments.iter()
    }

    /// Returns the last segment, or None if this is root.
    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }
}

/// Reverses the `~1` / `~0` escaping of a JSON pointer token.
fn unescape_token(token: &str) -> String {
    token.replace("~1", "/").replace("~0", "~")
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '$' || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '$' || c == '_')
}

impl Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            match segment {
                PathSegment::Field(name) if is_identifier(name) => write!(f, ".{}", name)?,
                PathSegment::Field(name) => {
                    let escaped = name.replace('\\', "\\\\").replace('\'', "\\'");
                    write!(f, "['{}']", escaped)?
                }
                PathSegment::Index(idx) => write!(f, "[{}]", idx)?,
            }
        }
        Ok(())
    }
}
