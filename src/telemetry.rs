//! Placeholder event hooks. Events are written to the log as one JSON object
//! per line; nothing leaves the page.

use serde_json::{Map, Number, Value};

pub fn event_line(ts_ms: f64, event: &str, fields: Value) -> String {
    let mut payload = Map::new();
    payload.insert(
        "ts".to_string(),
        Number::from_f64(ts_ms.floor()).map_or(Value::Null, Value::Number),
    );
    payload.insert("event".to_string(), Value::String(event.to_string()));

    if let Value::Object(extra) = fields {
        for (key, value) in extra {
            payload.insert(key, value);
        }
    }

    Value::Object(payload).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_are_flattened_into_the_event() {
        let line = event_line(
            1_700_000_000_123.7,
            "contact_submitted",
            serde_json::json!({ "subject_len": 2 }),
        );
        let parsed: Value = serde_json::from_str(&line).expect("valid JSON");

        assert_eq!(parsed["event"], "contact_submitted");
        assert_eq!(parsed["subject_len"], 2);
        assert_eq!(parsed["ts"].as_f64(), Some(1_700_000_000_123.0));
    }

    #[test]
    fn non_object_fields_are_ignored() {
        let line = event_line(0.0, "pwa_available", Value::Null);
        let parsed: Value = serde_json::from_str(&line).expect("valid JSON");
        assert_eq!(parsed.as_object().map(Map::len), Some(2));
    }
}
