use std::sync::Arc;

use rmcp::model::JsonObject;
use serde_json::Value;

use crate::search::SearchRequest;

/// Input schema for `web_search`, with the configured default model filled in.
pub fn input_schema(default_model: &str) -> Arc<JsonObject> {
    let schema = schemars::schema_for!(SearchRequest);
    let mut object = schema.as_object().cloned().unwrap_or_default();

    // Agent hosts only need the object shape.
    for key in ["$schema", "title", "description"] {
        object.remove(key);
    }

    // `null` is accepted but not something to advertise.
    if let Some(Value::Object(properties)) = object.get_mut("properties")
        && let Some(Value::Object(model)) = properties.get_mut("model")
    {
        model.insert("type".into(), Value::String("string".into()));
        model.insert("default".into(), Value::String(default_model.to_string()));
    }

    Arc::new(object)
}
