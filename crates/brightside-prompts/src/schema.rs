use serde_json::{json, Value};

/// The structured-output schema sent with every generation request, so the
/// model is constrained to return JSON of exactly the motivation shape.
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "quote": {
                "type": "OBJECT",
                "properties": {
                    "text": {
                        "type": "STRING",
                        "description": "The motivational quote text."
                    },
                    "author": {
                        "type": "STRING",
                        "description": "The author of the quote. If unknown, attribute to 'Anonymous'."
                    }
                },
                "required": ["text", "author"]
            },
            "thought": {
                "type": "STRING",
                "description": "A positive thought for the day, phrased as a short, uplifting statement."
            },
            "tip": {
                "type": "STRING",
                "description": "A small, actionable productivity tip for the day."
            }
        },
        "required": ["quote", "thought", "tip"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_requires_all_fields() {
        let schema = response_schema();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(Value::as_str)
            .collect();
        assert_eq!(required, vec!["quote", "thought", "tip"]);

        let quote_required: Vec<&str> = schema["properties"]["quote"]["required"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(Value::as_str)
            .collect();
        assert_eq!(quote_required, vec!["text", "author"]);
    }
}
