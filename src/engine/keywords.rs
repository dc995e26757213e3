//! Extension keywords registered on every compiled schema.
//!
//! - `absolutePath: bool` checks that a string is an absolute (`true`) or
//!   relative (`false`) filesystem path and never contains `!`.
//! - `patternRequired: [regex, ...]` checks that an object has, for each
//!   pattern, at least one property whose name matches it.
//!
//! Both keywords ignore values of other types, leaving that to `type`.

use jsonschema::paths::{LazyLocation, Location};
use jsonschema::{Keyword, ValidationError, ValidationOptions};
use regex::Regex;
use serde_json::{Map, Value};

/// Names of the keywords installed by [`register`].
pub const EXTENSION_KEYWORDS: [&str; 2] = ["absolutePath", "patternRequired"];

/// Installs the extension keywords on `options`.
pub fn register(options: &mut ValidationOptions) {
    options
        .with_keyword("absolutePath", absolute_path_factory)
        .with_keyword("patternRequired", pattern_required_factory);
}

fn is_absolute(value: &str) -> bool {
    let bytes = value.as_bytes();
    let windows_drive =
        bytes.len() >= 3 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' && bytes[2] == b'\\';
    value.starts_with('/') || windows_drive
}

/// Checks a path string against an `absolutePath` expectation.
///
/// Returns the violation message, or `None` if the value passes. A value that
/// has the wrong absoluteness and also contains `!` reports both violations,
/// absoluteness first, joined by a space.
pub fn check_absolute_path(expected: bool, value: &str) -> Option<String> {
    let quoted = Value::String(value.to_string()).to_string();
    let mut violations = Vec::new();

    if is_absolute(value) != expected {
        violations.push(if expected {
            format!("The provided value {quoted} is not an absolute path!")
        } else {
            format!(
                "A relative path is expected. However, the provided value {quoted} is an absolute path!"
            )
        });
    }

    if value.contains('!') {
        violations.push(format!(
            "The provided value {quoted} contains exclamation mark (!) which is not allowed because it's reserved for loader syntax."
        ));
    }

    if violations.is_empty() {
        None
    } else {
        Some(violations.join(" "))
    }
}

struct AbsolutePath {
    expected: bool,
    location: Location,
}

impl AbsolutePath {
    fn violation(&self, instance: &Value) -> Option<String> {
        instance
            .as_str()
            .and_then(|value| check_absolute_path(self.expected, value))
    }
}

impl Keyword for AbsolutePath {
    fn validate<'i>(
        &self,
        instance: &'i Value,
        location: &LazyLocation,
    ) -> Result<(), ValidationError<'i>> {
        match self.violation(instance) {
            None => Ok(()),
            Some(message) => Err(ValidationError::custom(
                self.location.clone(),
                location.into(),
                instance,
                message,
            )),
        }
    }

    fn is_valid(&self, instance: &Value) -> bool {
        self.violation(instance).is_none()
    }
}

fn absolute_path_factory<'a>(
    _parent: &'a Map<String, Value>,
    value: &'a Value,
    path: Location,
) -> Result<Box<dyn Keyword>, ValidationError<'a>> {
    match value.as_bool() {
        Some(expected) => Ok(Box::new(AbsolutePath {
            expected,
            location: path,
        })),
        None => Err(ValidationError::custom(
            Location::new(),
            path,
            value,
            "absolutePath must be a boolean",
        )),
    }
}

struct PatternRequired {
    patterns: Vec<Regex>,
    location: Location,
}

impl PatternRequired {
    fn missing(&self, instance: &Value) -> Option<&Regex> {
        let Value::Object(map) = instance else {
            return None;
        };
        self.patterns
            .iter()
            .find(|pattern| !map.keys().any(|key| pattern.is_match(key)))
    }
}

impl Keyword for PatternRequired {
    fn validate<'i>(
        &self,
        instance: &'i Value,
        location: &LazyLocation,
    ) -> Result<(), ValidationError<'i>> {
        match self.missing(instance) {
            None => Ok(()),
            Some(pattern) => Err(ValidationError::custom(
                self.location.clone(),
                location.into(),
                instance,
                format!("should have property matching pattern '{}'", pattern.as_str()),
            )),
        }
    }

    fn is_valid(&self, instance: &Value) -> bool {
        self.missing(instance).is_none()
    }
}

/// Compiles the patterns of a `patternRequired` value.
pub fn compile_patterns(value: &Value) -> Result<Vec<Regex>, String> {
    let items = value
        .as_array()
        .ok_or_else(|| "patternRequired must be an array of strings".to_string())?;

    items
        .iter()
        .map(|item| {
            let source = item
                .as_str()
                .ok_or_else(|| "patternRequired must be an array of strings".to_string())?;
            Regex::new(source).map_err(|e| e.to_string())
        })
        .collect()
}

fn pattern_required_factory<'a>(
    _parent: &'a Map<String, Value>,
    value: &'a Value,
    path: Location,
) -> Result<Box<dyn Keyword>, ValidationError<'a>> {
    match compile_patterns(value) {
        Ok(patterns) => Ok(Box::new(PatternRequired {
            patterns,
            location: path,
        })),
        Err(reason) => Err(ValidationError::custom(Location::new(), path, value, reason)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_absolute_paths() {
        assert_eq!(check_absolute_path(true, "/usr/lib"), None);
        assert_eq!(check_absolute_path(true, "C:\\project"), None);
        assert_eq!(check_absolute_path(false, "src/index.js"), None);
    }

    #[test]
    fn test_relative_path_when_absolute_expected() {
        let message = check_absolute_path(true, "dist").unwrap();
        assert_eq!(message, "The provided value \"dist\" is not an absolute path!");
    }

    #[test]
    fn test_absolute_path_when_relative_expected() {
        let message = check_absolute_path(false, "/dist").unwrap();
        assert!(message.starts_with("A relative path is expected."));
        assert!(message.contains("\"/dist\""));
    }

    #[test]
    fn test_exclamation_mark_rejected() {
        let message = check_absolute_path(true, "/a!b").unwrap();
        assert!(message.contains("exclamation mark (!)"));
    }

    #[test]
    fn test_wrong_absoluteness_and_exclamation_mark_both_reported() {
        let message = check_absolute_path(true, "a!b").unwrap();
        assert_eq!(
            message,
            "The provided value \"a!b\" is not an absolute path! \
             The provided value \"a!b\" contains exclamation mark (!) which is not allowed because it's reserved for loader syntax."
        );
    }

    #[test]
    fn test_drive_letter_needs_backslash() {
        assert!(check_absolute_path(true, "C:/project").is_some());
        assert!(check_absolute_path(true, "C:").is_some());
    }

    #[test]
    fn test_compile_patterns() {
        let patterns = compile_patterns(&json!(["^foo", "bar$"])).unwrap();
        assert_eq!(patterns.len(), 2);

        assert!(compile_patterns(&json!("^foo")).is_err());
        assert!(compile_patterns(&json!([1])).is_err());
        assert!(compile_patterns(&json!(["("])).is_err());
    }

    #[test]
    fn test_pattern_required_missing() {
        let keyword = PatternRequired {
            patterns: compile_patterns(&json!(["^on", "^id$"])).unwrap(),
            location: Location::new(),
        };

        assert!(keyword.is_valid(&json!({"onClick": 1, "id": 2})));
        assert!(keyword.is_valid(&json!("not an object")));

        let missing = keyword.missing(&json!({"onClick": 1})).unwrap();
        assert_eq!(missing.as_str(), "^id$");
    }
}
