//! JSON schema validators for linediff DTOs.
//!
//! Schemas are derived at runtime with schemars, so they always match the
//! types under test.

use jsonschema::JSONSchema;
use linediff_types::{ConfigFile, DiffReport};
use schemars::schema_for;

/// Error type for schema validation failures.
#[derive(Debug, thiserror::Error)]
#[error("Schema validation failed: {}", .errors.join("; "))]
pub struct SchemaValidationError {
    pub errors: Vec<String>,
}

pub fn load_config_schema() -> JSONSchema {
    let schema = serde_json::to_value(schema_for!(ConfigFile)).expect("Config schema serializes");
    JSONSchema::compile(&schema).expect("Config schema should compile")
}

pub fn load_report_schema() -> JSONSchema {
    let schema = serde_json::to_value(schema_for!(DiffReport)).expect("Report schema serializes");
    JSONSchema::compile(&schema).expect("Report schema should compile")
}

/// Validate a ConfigFile against its JSON schema.
pub fn validate_config_file(config: &ConfigFile) -> Result<(), SchemaValidationError> {
    let json_value = serde_json::to_value(config).expect("ConfigFile should serialize to JSON");
    validate_with_schema(&load_config_schema(), &json_value)
}

/// Validate a DiffReport against its JSON schema.
pub fn validate_report(report: &DiffReport) -> Result<(), SchemaValidationError> {
    let json_value = serde_json::to_value(report).expect("DiffReport should serialize to JSON");
    validate_report_json(&json_value)
}

/// Validate raw JSON (e.g. CLI output) against the DiffReport schema.
pub fn validate_report_json(json: &serde_json::Value) -> Result<(), SchemaValidationError> {
    validate_with_schema(&load_report_schema(), json)
}

fn validate_with_schema(
    schema: &JSONSchema,
    json: &serde_json::Value,
) -> Result<(), SchemaValidationError> {
    match schema.validate(json) {
        Ok(()) => Ok(()),
        Err(errors) => Err(SchemaValidationError {
            errors: errors.map(|e| e.to_string()).collect(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::sample_configs;

    #[test]
    fn sample_configs_validate() {
        validate_config_file(&sample_configs::empty()).unwrap();
        validate_config_file(&sample_configs::built_in()).unwrap();
        validate_config_file(&sample_configs::side_by_side()).unwrap();
    }

    #[test]
    fn rejects_unknown_algorithm() {
        let json = serde_json::json!({ "defaults": { "algorithm": "patience" } });
        let err = validate_with_schema(&load_config_schema(), &json).unwrap_err();
        assert!(!err.errors.is_empty());
    }
}
