use crate::utils::error::{RecipeError, Result};
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;

static PARENTHESISED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(([^)]*)\)").expect("valid parenthesis pattern"));

/// The fields of a JSON object as a map.
pub fn object_to_array(value: &Value) -> Result<Map<String, Value>> {
    match value {
        Value::Object(map) => Ok(map.clone()),
        _ => Err(RecipeError::NotAnObject),
    }
}

/// Arrays become objects keyed by index, recursively.
pub fn array_to_object(value: Value) -> Result<Value> {
    match value {
        Value::Array(_) | Value::Object(_) => Ok(objectify(value)),
        _ => Err(RecipeError::NotAnArray),
    }
}

fn objectify(value: Value) -> Value {
    match value {
        Value::Array(items) => Value::Object(
            items
                .into_iter()
                .enumerate()
                .map(|(i, item)| (i.to_string(), objectify(item)))
                .collect(),
        ),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, item)| (key, objectify(item)))
                .collect(),
        ),
        scalar => scalar,
    }
}

/// `#FFF`, `FFF`, `#FFFFFF` or `FFFFFF` to `rgb(255, 255, 255)`.
pub fn hex_to_rgb(color: &str) -> Result<String> {
    let invalid = || RecipeError::InvalidColor {
        value: color.to_string(),
    };

    let hex = color.strip_prefix('#').unwrap_or(color);
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let channels: Vec<String> = match hex.len() {
        3 => hex.chars().map(|c| format!("{c}{c}")).collect(),
        6 => vec![hex[0..2].to_string(), hex[2..4].to_string(), hex[4..6].to_string()],
        _ => return Err(invalid()),
    };

    let values = channels
        .iter()
        .map(|channel| u8::from_str_radix(channel, 16).map_err(|_| invalid()))
        .collect::<Result<Vec<u8>>>()?;

    Ok(format!("rgb({}, {}, {})", values[0], values[1], values[2]))
}

pub fn rgb_to_hex(r: u8, g: u8, b: u8) -> String {
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}

/// Parses `rgb(r,g,b)` or `rgba(r,g,b,a)`; the alpha channel is ignored.
pub fn css_rgb_to_hex(value: &str) -> Option<String> {
    if !value.contains("rgb") {
        return None;
    }

    let inner = PARENTHESISED.captures(value)?.get(1)?.as_str();
    let channels = inner
        .split(',')
        .take(3)
        .map(|part| part.trim().parse::<u8>().ok())
        .collect::<Option<Vec<u8>>>()?;

    match channels.as_slice() {
        [r, g, b] => Some(rgb_to_hex(*r, *g, *b)),
        _ => None,
    }
}
