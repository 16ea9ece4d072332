use serde_json::Value;

/// Print just the key answer value from the output.
///
/// Looks through the result envelope (and its `results` section, when there is
/// one) for well-known fields in priority order, then falls back to the first
/// field.
pub fn print_minimal(value: &Value) {
    println!("{}", minimal_line(value));
}

fn minimal_line(value: &Value) -> String {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);
    let metrics = result_obj.get("results").filter(|v| v.is_object()).unwrap_or(result_obj);

    let priority_keys = ["valuation_today", "theme"];

    if let Value::Object(map) = metrics {
        for key in &priority_keys {
            if let Some(val) = map.get(*key) {
                return format_minimal(val);
            }
        }

        if let Some((key, val)) = map.iter().next() {
            return format!("{}: {}", key, format_minimal(val));
        }
    }

    format_minimal(metrics)
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        // Non-finite engine outputs serialize as null
        Value::Null => "N/A".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
