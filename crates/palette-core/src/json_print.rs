//! JSON pretty-printer: renders a tool result as an aligned,
//! lightly-styled line sequence for the results view.

use serde_json::{Map, Value};

const DIM: &str = "\x1b[2m";
const RESET: &str = "\x1b[0m";
const CYAN: &str = "\x1b[36m";
const YELLOW: &str = "\x1b[33m";

/// Render any JSON value as a sequence of display lines.
pub fn pretty_print(value: &Value) -> Vec<String> {
    match value {
        Value::Object(map) => print_object(map, 0),
        Value::Array(items) => print_array(items, 0),
        other => vec![print_scalar(other)],
    }
}

fn print_object(map: &Map<String, Value>, indent: usize) -> Vec<String> {
    let pad = " ".repeat(indent);
    let scalar_key_width = map
        .iter()
        .filter(|(_, v)| is_scalar(v))
        .map(|(k, _)| k.chars().count())
        .max()
        .unwrap_or(0);

    let mut lines = Vec::new();
    for (key, value) in map {
        match value {
            Value::Object(inner) if inner.is_empty() => continue,
            Value::Array(inner) if inner.is_empty() => continue,
            Value::Object(inner) => {
                lines.push(format!("{pad}{key}:"));
                lines.extend(print_object(inner, indent + 2));
            }
            Value::Array(inner) => {
                lines.push(format!("{pad}{key}:"));
                lines.extend(print_array(inner, indent + 2));
            }
            scalar => {
                lines.push(format!(
                    "{pad}{key:<scalar_key_width$}  {}",
                    print_scalar(scalar)
                ));
            }
        }
    }
    lines
}

fn print_array(items: &[Value], indent: usize) -> Vec<String> {
    if items.is_empty() {
        return Vec::new();
    }
    let pad = " ".repeat(indent);

    if items.iter().all(Value::is_object) {
        let mut lines = Vec::new();
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                lines.push(String::new());
            }
            let Value::Object(map) = item else { continue };
            let block = print_object(map, indent + 2);
            for (j, line) in block.into_iter().enumerate() {
                if j == 0 {
                    let trimmed = line.trim_start();
                    lines.push(format!("{pad}{DIM}─ {RESET}{trimmed}"));
                } else {
                    lines.push(line);
                }
            }
        }
        lines
    } else {
        items
            .iter()
            .map(|v| format!("{pad}{DIM}─ {RESET}{}", print_scalar(v)))
            .collect()
    }
}

fn is_scalar(value: &Value) -> bool {
    !matches!(value, Value::Object(_) | Value::Array(_))
}

fn print_scalar(value: &Value) -> String {
    match value {
        Value::Null => format!("{DIM}null{RESET}"),
        Value::Number(n) => format!("{CYAN}{n}{RESET}"),
        Value::Bool(b) => format!("{YELLOW}{b}{RESET}"),
        Value::String(s) if s.is_empty() => format!("{DIM}\u{2013}{RESET}"),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// True if `value` is an empty array, or an object all of whose values
/// are empty arrays, zero, null, or empty strings — and at least one
/// value is an array. Triggers the dedicated "no results" screen.
pub fn is_empty_list_result(value: &Value) -> bool {
    match value {
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => {
            if map.is_empty() {
                return false;
            }
            let mut saw_array = false;
            for v in map.values() {
                let empty = match v {
                    Value::Array(items) => {
                        saw_array = true;
                        items.is_empty()
                    }
                    Value::Number(n) => n.as_f64() == Some(0.0),
                    Value::Null => true,
                    Value::String(s) => s.is_empty(),
                    _ => false,
                };
                if !empty {
                    return false;
                }
            }
            saw_array
        }
        _ => false,
    }
}
