use serde_json::json;

/// Returns the JSON schema for interaction classification LLM responses
pub fn get_interaction_classification_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "severity": {
                "type": "string",
                "enum": ["None", "Mild", "Moderate", "Severe"]
            },
            "mechanism": { "type": "string" },
            "side_effects": { "type": "string" }
        },
        "required": ["severity", "mechanism", "side_effects"]
    })
}
