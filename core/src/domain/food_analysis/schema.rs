use serde_json::{Map, Value, json};

use crate::domain::food_analysis::entities::{Category, Nutrient};

/// Name under which the schema is registered with the model provider.
pub const ANALYSIS_SCHEMA_NAME: &str = "nutritionResponse";

fn string_array() -> Value {
    json!({ "type": "array", "items": { "type": "string" } })
}

fn strict_object(properties: Map<String, Value>) -> Value {
    let required: Vec<Value> = properties.keys().cloned().map(Value::String).collect();
    json!({
        "type": "object",
        "properties": properties,
        "required": required,
        "additionalProperties": false
    })
}

fn micronutrient_schema() -> Value {
    let categories: Vec<&str> = Category::ALL.iter().map(Category::as_str).collect();
    let mut properties = Map::new();
    properties.insert("category".into(), json!({ "type": "string", "enum": categories }));
    properties.insert("amount".into(), json!({ "type": "string" }));
    properties.insert("note".into(), json!({ "type": "string" }));
    strict_object(properties)
}

/// Returns the strict JSON schema for food analysis LLM responses.
///
/// Mirrors [`AnalysisResult`](crate::domain::food_analysis::AnalysisResult):
/// every property is required and no extra keys are allowed.
pub fn analysis_result_schema() -> Value {
    let mut micronutrients = Map::new();
    for nutrient in Nutrient::ALL {
        micronutrients.insert(nutrient.label().to_string(), micronutrient_schema());
    }

    let mut portion = Map::new();
    portion.insert("itemName".into(), json!({ "type": "string" }));
    portion.insert("itemSize".into(), json!({ "type": "string" }));

    let mut macros = Map::new();
    for field in ["calories", "protein", "carbs", "fats", "fiber"] {
        macros.insert(field.into(), json!({ "type": "number" }));
    }

    let mut root = Map::new();
    root.insert("error".into(), json!({ "type": ["string", "null"] }));
    root.insert("identifiedFoodItems".into(), string_array());
    root.insert(
        "estimatedPortionSize".into(),
        json!({ "type": "array", "items": strict_object(portion) }),
    );
    root.insert("macros".into(), strict_object(macros));
    root.insert("micronutrients".into(), strict_object(micronutrients));
    root.insert("health_notes".into(), string_array());
    root.insert("healthier_suggestions".into(), string_array());

    strict_object(root)
}
