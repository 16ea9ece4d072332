use colored::Colorize;
use serde_json::Value;
use tabled::{builder::Builder, Table};

use crate::config::{self, Palette};

/// Format output as tables using the tabled crate, colored by the configured theme.
pub fn print_table(value: &Value) {
    let palette = config::get().palette();
    match value {
        Value::Object(map) => {
            if let Some(result) = map.get("result") {
                print_result_tables(result, map, &palette);
            } else if let Some(Value::Array(results)) = map.get("results") {
                print_scalars(map, &palette);
                print_array_table(results, &palette);
            } else {
                print_scalars(map, &palette);
            }
        }
        Value::Array(arr) => print_array_table(arr, &palette),
        _ => println!("{}", format_value(value, &palette)),
    }
}

fn print_result_tables(
    result: &Value,
    envelope: &serde_json::Map<String, Value>,
    palette: &Palette,
) {
    match result {
        Value::Object(res_map) => {
            print_scalars(res_map, palette);
            // Nested sections (results, display, sensitivity) each get their own table
            for (key, val) in res_map {
                match val {
                    Value::Object(section) => {
                        print_heading(key, palette);
                        print_scalars(section, palette);
                    }
                    Value::Array(rows) => {
                        print_heading(key, palette);
                        print_array_table(rows, palette);
                    }
                    _ => {}
                }
            }
        }
        _ => println!("{}", format_value(result, palette)),
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            print_heading("warnings", palette);
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s.color(palette.negative));
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn print_heading(title: &str, palette: &Palette) {
    println!("\n{}", title.to_uppercase().color(palette.heading).bold());
}

/// Two-column table of the scalar entries of an object. Nested values are skipped.
fn print_scalars(map: &serde_json::Map<String, Value>, palette: &Palette) {
    let scalars: Vec<(&String, &Value)> = map
        .iter()
        .filter(|(_, v)| !v.is_object() && !v.is_array())
        .collect();
    if scalars.is_empty() {
        return;
    }

    let mut builder = Builder::default();
    builder.push_record([
        "Field".color(palette.heading).to_string(),
        "Value".color(palette.heading).to_string(),
    ]);
    for (key, val) in scalars {
        builder.push_record([key.clone(), format_value(val, palette)]);
    }
    println!("{}", Table::from(builder));
}

fn print_array_table(arr: &[Value], palette: &Palette) {
    if arr.is_empty() {
        println!("(empty)");
        return;
    }

    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<String> = first.keys().cloned().collect();
        let mut builder = Builder::default();
        builder.push_record(
            headers
                .iter()
                .map(|h| h.color(palette.heading).to_string())
                .collect::<Vec<_>>(),
        );

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| {
                        map.get(h.as_str())
                            .map(|v| format_value(v, palette))
                            .unwrap_or_default()
                    })
                    .collect();
                builder.push_record(row);
            }
        }

        println!("{}", Table::from(builder));
    } else {
        for item in arr {
            println!("{}", format_value(item, palette));
        }
    }
}

fn format_value(value: &Value, palette: &Palette) -> String {
    match value {
        // Non-finite engine outputs serialize as null
        Value::Null => "N/A".color(palette.unavailable).to_string(),
        Value::String(s) if s == "N/A" => s.color(palette.unavailable).to_string(),
        Value::String(s) if s.starts_with('-') => s.color(palette.negative).to_string(),
        Value::String(s) => s.clone(),
        Value::Number(n) if n.as_f64().is_some_and(|f| f < 0.0) => {
            n.to_string().color(palette.negative).to_string()
        }
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(|v| format_value(v, palette)).collect();
            items.join(", ")
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
