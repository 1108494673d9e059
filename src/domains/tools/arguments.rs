//! Typed access to call arguments.
//!
//! Arguments arrive from clients as an untyped JSON object. [`ToolArguments`]
//! wraps that object and is the only place where a value is checked against
//! the type a handler expects, so every handler fails the same way
//! ([`ToolError::MissingParameter`] or [`ToolError::TypeMismatch`]).

use serde_json::{Map, Value};

use super::error::ToolError;

/// Arguments of a single tool call, keyed by parameter name.
///
/// Undeclared arguments are kept as-is; handlers may read them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolArguments {
    values: Map<String, Value>,
}

impl ToolArguments {
    /// Create an empty argument set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from an optional JSON object, as delivered by MCP `tools/call`.
    pub fn from_object(values: Option<Map<String, Value>>) -> Self {
        Self {
            values: values.unwrap_or_default(),
        }
    }

    /// Build from a JSON value; anything but an object is rejected.
    pub fn from_value(value: Value) -> Result<Self, ToolError> {
        match value {
            Value::Object(values) => Ok(Self { values }),
            Value::Null => Ok(Self::new()),
            _ => Err(ToolError::type_mismatch("arguments", "object")),
        }
    }

    /// Builder-style insert, mostly for tests and internal callers.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    /// Whether an argument with this name was supplied.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Raw access to an argument value.
    pub fn raw(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Number of supplied arguments.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no arguments were supplied.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over supplied argument names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Read an optional string argument.
    ///
    /// Absent (or JSON `null`) yields `Ok(None)`; present but not a string
    /// yields [`ToolError::TypeMismatch`].
    pub fn optional_str(&self, name: &str) -> Result<Option<&str>, ToolError> {
        match self.values.get(name) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(_) => Err(ToolError::type_mismatch(name, "string")),
        }
    }

    /// Read a required string argument.
    pub fn require_str(&self, name: &str) -> Result<&str, ToolError> {
        self.optional_str(name)?
            .ok_or_else(|| ToolError::missing_parameter(name))
    }

    /// Consume into the underlying JSON object.
    pub fn into_object(self) -> Map<String, Value> {
        self.values
    }
}

impl From<Map<String, Value>> for ToolArguments {
    fn from(values: Map<String, Value>) -> Self {
        Self { values }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for ToolArguments {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_require_str_present() {
        let args = ToolArguments::new().with("name", "Ada");
        assert_eq!(args.require_str("name").unwrap(), "Ada");
    }

    #[test]
    fn test_require_str_missing() {
        let args = ToolArguments::new();
        assert_eq!(
            args.require_str("name"),
            Err(ToolError::missing_parameter("name"))
        );
    }

    #[test]
    fn test_require_str_wrong_type() {
        let args = ToolArguments::new().with("name", 42);
        assert_eq!(
            args.require_str("name"),
            Err(ToolError::type_mismatch("name", "string"))
        );
    }

    #[test]
    fn test_optional_str_null_is_absent() {
        let args = ToolArguments::new().with("msg", Value::Null);
        assert_eq!(args.optional_str("msg").unwrap(), None);
    }

    #[test]
    fn test_from_value_rejects_non_object() {
        assert!(ToolArguments::from_value(json!(["a"])).is_err());
        assert!(ToolArguments::from_value(json!(null)).unwrap().is_empty());
    }

    #[test]
    fn test_extra_arguments_are_kept() {
        let args: ToolArguments = [("a", "1"), ("b", "2")].into_iter().collect();
        assert_eq!(args.len(), 2);
        assert!(args.contains("b"));
        assert_eq!(args.raw("a"), Some(&json!("1")));
    }
}
