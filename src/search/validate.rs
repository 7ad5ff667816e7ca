use serde_json::Value;

use super::SearchRequest;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{reason}")]
pub struct ValidationError {
    pub reason: &'static str,
}

impl ValidationError {
    const fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// Checks a raw payload from either transport against the search request shape.
///
/// `model: null` is treated the same as an absent model.
pub fn validate(raw: &Value) -> Result<SearchRequest, ValidationError> {
    let Value::Object(fields) = raw else {
        return Err(ValidationError::new("arguments must be a JSON object"));
    };

    let query = match fields.get("query") {
        None => return Err(ValidationError::new("query is required")),
        Some(Value::String(q)) => q.clone(),
        Some(_) => return Err(ValidationError::new("query must be a string")),
    };

    let model = match fields.get("model") {
        None | Some(Value::Null) => None,
        Some(Value::String(m)) => Some(m.clone()),
        Some(_) => return Err(ValidationError::new("model must be a string")),
    };

    Ok(SearchRequest { query, model })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_query_only() {
        let req = validate(&json!({ "query": "rust async" })).unwrap();
        assert_eq!(req.query, "rust async");
        assert_eq!(req.model, None);
    }

    #[test]
    fn accepts_query_and_model() {
        let req = validate(&json!({ "query": "q", "model": "openai/gpt-4o:online" })).unwrap();
        assert_eq!(req.model.as_deref(), Some("openai/gpt-4o:online"));
    }

    #[test]
    fn accepts_empty_query() {
        let req = validate(&json!({ "query": "" })).unwrap();
        assert_eq!(req.query, "");
    }

    #[test]
    fn null_model_is_absent() {
        let req = validate(&json!({ "query": "q", "model": null })).unwrap();
        assert_eq!(req.model, None);
    }

    #[test]
    fn ignores_unknown_fields() {
        let req = validate(&json!({ "query": "q", "lang": "en" })).unwrap();
        assert_eq!(req.query, "q");
    }

    #[test]
    fn rejects_non_object() {
        for raw in [json!(null), json!("query"), json!(["query"]), json!(42)] {
            let err = validate(&raw).unwrap_err();
            assert_eq!(err.reason, "arguments must be a JSON object", "input: {raw}");
        }
    }

    #[test]
    fn rejects_missing_query() {
        let err = validate(&json!({ "model": "m" })).unwrap_err();
        assert_eq!(err.to_string(), "query is required");
    }

    #[test]
    fn rejects_mistyped_query() {
        for query in [json!(null), json!(1), json!(true), json!({ "text": "q" }), json!(["q"])] {
            let err = validate(&json!({ "query": query })).unwrap_err();
            assert_eq!(err.reason, "query must be a string", "query: {query}");
        }
    }

    #[test]
    fn rejects_mistyped_model() {
        let err = validate(&json!({ "query": "q", "model": 3 })).unwrap_err();
        assert_eq!(err.reason, "model must be a string");
    }
}
