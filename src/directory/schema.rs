//! Static parameter schema per provider.

use crate::models::{ParamType, ParameterDefinition};

type SchemaRow = (&'static str, ParamType, bool);

/// Provider → `(key, type, optional)` rows.
const STATIC_PARAMETER_DEFINITIONS: &[(&str, &[SchemaRow])] = &[
    ("anthropic", &[]),
    (
        "openai",
        &[
            ("base_url", ParamType::String, true),
            ("organization", ParamType::String, true),
        ],
    ),
    ("google_genai", &[]),
    (
        "openai_compatible",
        &[
            ("base_url", ParamType::String, false),
            ("default_headers", ParamType::Object, true),
        ],
    ),
    ("openrouter", &[("default_headers", ParamType::Object, true)]),
    (
        "google_vertex",
        &[
            ("project", ParamType::String, true),
            ("location", ParamType::String, true),
        ],
    ),
];

/// Parameters the client knows for `provider`, or `None` if the provider
/// has no schema entry.
pub fn static_parameters(provider: &str) -> Option<Vec<ParameterDefinition>> {
    STATIC_PARAMETER_DEFINITIONS
        .iter()
        .find(|(name, _)| *name == provider)
        .map(|(_, rows)| {
            rows.iter()
                .map(|(key, param_type, optional)| ParameterDefinition::new(key, *param_type, *optional))
                .collect()
        })
}

/// Every provider with a schema entry, in table order.
pub fn known_providers() -> impl Iterator<Item = &'static str> {
    STATIC_PARAMETER_DEFINITIONS.iter().map(|(name, _)| *name)
}
