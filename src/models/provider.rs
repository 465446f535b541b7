use serde::{Deserialize, Serialize};
use indexmap::IndexMap;

/// Provider name → ordered model names, in the order the backend reports them.
pub type ProvidersModels = IndexMap<String, Vec<String>>;

/// Value type of a provider parameter.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    String,
    Object,
}

/// One configurable parameter of a provider (e.g. `base_url`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParameterDefinition {
    pub key: String,
    #[serde(rename = "type")]
    pub param_type: ParamType,
    pub optional: bool,
}

impl ParameterDefinition {
    pub fn new(key: &str, param_type: ParamType, optional: bool) -> Self {
        Self {
            key: key.to_string(),
            param_type,
            optional,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_providers_keep_backend_order() {
        let providers: ProvidersModels =
            serde_json::from_str(r#"{"openai":["gpt-4o"],"anthropic":[],"mistral":["large"]}"#)
                .unwrap();
        let names: Vec<&str> = providers.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["openai", "anthropic", "mistral"]);
    }

    #[test]
    fn test_parameter_definition_wire_shape() {
        let def = ParameterDefinition::new("base_url", ParamType::String, false);
        let json = serde_json::to_value(&def).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"key": "base_url", "type": "string", "optional": false})
        );
    }
}
