#![allow(dead_code)]

use gradpict_core::config::Settings;
use gradpict_core::memory::Fields;
use serde_json::Value;

/// Settings as the provisioning binary would resolve them in the default region.
pub fn test_settings() -> Settings {
    Settings {
        bucket_name: Some("gradpict-media".to_string()),
        region: "eu-west-2".to_string(),
        table_name: "gradpict-memories".to_string(),
    }
}

/// Builds a field map from a JSON object literal.
pub fn fields(value: Value) -> Fields {
    serde_json::from_value(value).expect("fixture should be a JSON object")
}
