//! # Placeholder Types
//!
//! Typed values for URL placeholders used in reverse URL generation.
//!
//! A placeholder is written `{name}` (any value) or `{name:type}` where
//! `type` is one of `int`, `float` or `bool`.

use std::collections::BTreeMap;
use std::fmt;

/// Declared type of a URL placeholder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ParamType {
    /// Accepts any value
    #[default]
    String,
    /// Integer (i64)
    Int,
    /// Float (f64)
    Float,
    /// Boolean
    Bool,
}

impl ParamType {
    /// Parse type specifier from a placeholder (e.g., "int" from "{id:int}")
    ///
    /// Returns `None` for an unknown specifier.
    #[must_use]
    pub fn from_specifier(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "str" | "string" => Some(Self::String),
            "int" | "integer" | "i64" => Some(Self::Int),
            "float" | "f64" | "number" => Some(Self::Float),
            "bool" | "boolean" => Some(Self::Bool),
            _ => None,
        }
    }

    /// Get the type name for error messages
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Int => "int",
            Self::Float => "float",
            Self::Bool => "bool",
        }
    }

    /// Whether a value may fill a placeholder of this type
    #[must_use]
    pub fn accepts(&self, value: &ParamValue) -> bool {
        match self {
            Self::String => true,
            Self::Int => matches!(value, ParamValue::Int(_)),
            Self::Float => matches!(value, ParamValue::Float(_) | ParamValue::Int(_)),
            Self::Bool => matches!(value, ParamValue::Bool(_)),
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.type_name())
    }
}

/// Value substituted into a URL placeholder
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// String value
    String(String),
    /// Integer value (i64)
    Int(i64),
    /// Float value (f64)
    Float(f64),
    /// Boolean value
    Bool(bool),
}

impl ParamValue {
    /// Name of the carried type
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Bool(_) => "bool",
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<i64> for ParamValue {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for ParamValue {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for ParamValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

/// Substitution values for reverse URL generation, keyed by placeholder name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UrlValues(BTreeMap<String, ParamValue>);

impl UrlValues {
    /// Create an empty value map
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value (builder style)
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert or replace a value
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) {
        self.0.insert(name.into(), value.into());
    }

    /// Look up a value by placeholder name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.0.get(name)
    }

    /// Iterate over supplied names
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Check if no values were supplied
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A placeholder parsed out of a URL pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    /// Placeholder name
    pub name: String,
    /// Declared type (`String` when untyped)
    pub param_type: ParamType,
}

/// Parse the inside of a `{...}` placeholder
///
/// Examples:
/// - `id` -> ("id", ParamType::String)
/// - `id:int` -> ("id", ParamType::Int)
///
/// Returns `None` if the name is empty or the type specifier is unknown.
#[must_use]
pub fn parse_placeholder(inner: &str) -> Option<Placeholder> {
    let (name, param_type) = match inner.split_once(':') {
        Some((name, spec)) => (name.trim(), ParamType::from_specifier(spec.trim())?),
        None => (inner.trim(), ParamType::String),
    };

    if name.is_empty() {
        return None;
    }

    Some(Placeholder {
        name: name.to_string(),
        param_type,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_param_type_from_specifier() {
        assert_eq!(ParamType::from_specifier("int"), Some(ParamType::Int));
        assert_eq!(ParamType::from_specifier("INT"), Some(ParamType::Int));
        assert_eq!(ParamType::from_specifier("float"), Some(ParamType::Float));
        assert_eq!(ParamType::from_specifier("bool"), Some(ParamType::Bool));
        assert_eq!(ParamType::from_specifier("uuid"), None);
    }

    #[test]
    fn test_param_type_accepts() {
        assert!(ParamType::String.accepts(&ParamValue::Int(3)));
        assert!(ParamType::Int.accepts(&ParamValue::Int(3)));
        assert!(!ParamType::Int.accepts(&ParamValue::from("3")));
        assert!(ParamType::Float.accepts(&ParamValue::Int(3)));
        assert!(!ParamType::Bool.accepts(&ParamValue::Float(1.0)));
    }

    #[test]
    fn test_parse_placeholder() {
        assert_eq!(
            parse_placeholder("id"),
            Some(Placeholder {
                name: "id".to_string(),
                param_type: ParamType::String
            })
        );
        assert_eq!(
            parse_placeholder("id:int").map(|p| p.param_type),
            Some(ParamType::Int)
        );
        assert_eq!(parse_placeholder(""), None);
        assert_eq!(parse_placeholder(":int"), None);
        assert_eq!(parse_placeholder("id:uuid"), None);
    }

    #[test]
    fn test_param_value_display() {
        assert_eq!(ParamValue::Int(42).to_string(), "42");
        assert_eq!(ParamValue::Float(2.5).to_string(), "2.5");
        assert_eq!(ParamValue::Bool(true).to_string(), "true");
        assert_eq!(ParamValue::from("abc").to_string(), "abc");
    }

    #[test]
    fn test_url_values_builder() {
        let values = UrlValues::new().with("id", 7).with("slug", "intro");
        assert_eq!(values.get("id"), Some(&ParamValue::Int(7)));
        assert_eq!(values.names().collect::<Vec<_>>(), vec!["id", "slug"]);
    }
}
