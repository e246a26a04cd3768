use serde_json::Value;

/// Sanitizes sensitive fields in JSON payloads for logging
pub fn sanitize_json(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut sanitized = serde_json::Map::new();
            for (key, val) in map {
                let sanitized_val = if is_sensitive_field(key) {
                    mask_value()
                } else {
                    sanitize_json(val)
                };
                sanitized.insert(key.clone(), sanitized_val);
            }
            Value::Object(sanitized)
        }
        Value::Array(arr) => Value::Array(arr.iter().map(sanitize_json).collect()),
        _ => value.clone(),
    }
}

fn is_sensitive_field(key: &str) -> bool {
    matches!(
        key.to_lowercase().as_str(),
        "pin" | "pin_hash" | "password" | "secret" | "token" | "authorization"
    )
}

fn mask_value() -> Value {
    Value::String("****".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sanitize_pin() {
        let input = json!({
            "receiver": "01712345678",
            "amount": 150,
            "pin": "40585"
        });

        let sanitized = sanitize_json(&input);

        assert_eq!(sanitized["pin"], "****");
        assert_eq!(sanitized["amount"], 150);
        assert_eq!(sanitized["receiver"], "01712345678");
    }

    #[test]
    fn test_sanitize_nested() {
        let input = json!({
            "user": {
                "token": "eyJhbGciOiJIUzI1NiJ9.payload.sig",
                "name": "Rahim"
            }
        });

        let sanitized = sanitize_json(&input);
        assert_eq!(sanitized["user"]["token"], "****");
        assert_eq!(sanitized["user"]["name"], "Rahim");
    }

    #[test]
    fn test_sanitize_array() {
        let input = json!([{"pin": "12345"}, {"pin": "67890"}]);

        let sanitized = sanitize_json(&input);
        assert_eq!(sanitized[0]["pin"], "****");
        assert_eq!(sanitized[1]["pin"], "****");
    }
}
