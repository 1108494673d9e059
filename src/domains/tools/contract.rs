//! Parameter contracts.
//!
//! A [`ParamContract`] lists the parameters one tool accepts and whether each
//! is required. Every parameter value is a JSON string. The dispatcher checks
//! every call against the contract of the resolved entry before the handler
//! runs.

use std::collections::HashSet;

use serde::Serialize;
use serde_json::{Map, Value, json};

use super::arguments::ToolArguments;
use super::error::ToolError;

/// JSON-Schema type of every parameter value.
const PARAM_TYPE: &str = "string";

/// One parameter of a contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParamSpec {
    pub name: String,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ParamSpec {
    /// A required string parameter.
    pub fn required(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: true,
            description: None,
        }
    }

    /// An optional string parameter.
    pub fn optional(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: false,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// The set of parameters accepted by one tool.
///
/// Parameter names are unique and non-empty; [`ParamContract::new`] refuses
/// anything else.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParamContract {
    params: Vec<ParamSpec>,
}

impl ParamContract {
    /// Build a contract, rejecting empty or duplicated parameter names.
    pub fn new(params: Vec<ParamSpec>) -> Result<Self, ToolError> {
        let mut seen = HashSet::with_capacity(params.len());
        for param in &params {
            if param.name.trim().is_empty() {
                return Err(ToolError::invalid_specification(
                    "parameter names must not be empty",
                ));
            }
            if !seen.insert(param.name.as_str()) {
                return Err(ToolError::invalid_specification(format!(
                    "duplicate parameter '{}'",
                    param.name
                )));
            }
        }
        Ok(Self { params })
    }

    /// A contract with no parameters.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }

    pub fn get(&self, name: &str) -> Option<&ParamSpec> {
        self.params.iter().find(|p| p.name == name)
    }

    /// Names of the required parameters, in declaration order.
    pub fn required_names(&self) -> impl Iterator<Item = &str> {
        self.params
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name.as_str())
    }

    /// Check call arguments against this contract.
    ///
    /// Required parameters must be present (JSON `null` counts as absent) and
    /// hold a string. Optional parameters are only type-checked when
    /// supplied. Arguments the contract does not declare are ignored.
    pub fn validate(&self, args: &ToolArguments) -> Result<(), ToolError> {
        for param in &self.params {
            match args.raw(&param.name) {
                None | Some(Value::Null) if param.required => {
                    return Err(ToolError::missing_parameter(&param.name));
                }
                None | Some(Value::Null) => {}
                Some(value) if !value.is_string() => {
                    return Err(ToolError::type_mismatch(&param.name, PARAM_TYPE));
                }
                Some(_) => {}
            }
        }
        Ok(())
    }

    /// Render as a JSON-Schema object for `tools/list`.
    pub fn to_input_schema(&self) -> Map<String, Value> {
        let mut properties = Map::new();
        for param in &self.params {
            let mut property = Map::new();
            property.insert("type".into(), json!(PARAM_TYPE));
            if let Some(description) = &param.description {
                property.insert("description".into(), json!(description));
            }
            properties.insert(param.name.clone(), Value::Object(property));
        }

        let required: Vec<&str> = self.required_names().collect();

        let mut schema = Map::new();
        schema.insert("type".into(), json!("object"));
        schema.insert("properties".into(), Value::Object(properties));
        if !required.is_empty() {
            schema.insert("required".into(), json!(required));
        }
        schema
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn greet_contract() -> ParamContract {
        ParamContract::new(vec![
            ParamSpec::required("name").with_description("Name of the person to greet"),
            ParamSpec::optional("style"),
        ])
        .unwrap()
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let result = ParamContract::new(vec![ParamSpec::required("a"), ParamSpec::optional("a")]);
        assert!(matches!(result, Err(ToolError::InvalidSpecification(_))));
    }

    #[test]
    fn test_empty_name_rejected() {
        let result = ParamContract::new(vec![ParamSpec::required(" ")]);
        assert!(matches!(result, Err(ToolError::InvalidSpecification(_))));
    }

    #[test]
    fn test_validate_missing_required() {
        let err = greet_contract()
            .validate(&ToolArguments::new().with("style", "formal"))
            .unwrap_err();
        assert_eq!(err, ToolError::missing_parameter("name"));
    }

    #[test]
    fn test_validate_null_required_is_missing() {
        let err = greet_contract()
            .validate(&ToolArguments::new().with("name", Value::Null))
            .unwrap_err();
        assert_eq!(err, ToolError::missing_parameter("name"));
    }

    #[test]
    fn test_validate_type_mismatch() {
        let err = greet_contract()
            .validate(&ToolArguments::new().with("name", true))
            .unwrap_err();
        assert_eq!(err, ToolError::type_mismatch("name", "string"));
    }

    #[test]
    fn test_validate_optional_absent_and_extras() {
        let args = ToolArguments::new().with("name", "Ada").with("unexpected", 1);
        assert!(greet_contract().validate(&args).is_ok());
    }

    #[test]
    fn test_validate_optional_wrong_type() {
        let args = ToolArguments::new().with("name", "Ada").with("style", 3);
        assert_eq!(
            greet_contract().validate(&args).unwrap_err(),
            ToolError::type_mismatch("style", "string")
        );
    }

    #[test]
    fn test_validate_rejects_non_string_values() {
        for value in [json!(3), json!(["Ada"]), json!({ "first": "Ada" })] {
            let args = ToolArguments::new().with("name", value);
            assert_eq!(
                greet_contract().validate(&args).unwrap_err(),
                ToolError::type_mismatch("name", "string")
            );
        }
    }

    #[test]
    fn test_input_schema() {
        let schema = greet_contract().to_input_schema();
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["properties"]["name"]["type"], "string");
        assert_eq!(
            schema["properties"]["name"]["description"],
            "Name of the person to greet"
        );
        assert_eq!(schema["required"], json!(["name"]));
    }

    #[test]
    fn test_empty_contract_schema_has_no_required() {
        let schema = ParamContract::empty().to_input_schema();
        assert!(schema.get("required").is_none());
        assert_eq!(schema["properties"], json!({}));
    }
}
