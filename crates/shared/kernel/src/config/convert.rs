//! String-to-typed conversion for environment overrides.
//!
//! Environment values always arrive as strings. When a section is bound with
//! conversion, each string leaf takes the JSON type of the base value at the
//! same position (the file layers, optionally over serialized defaults).

use serde_json::{Number, Value};

/// Converts `raw` to the JSON type of `base`.
///
/// * number base: integer or float; unparsable input stays a string
/// * boolean base: `"true"` in any casing is `true`, everything else `false`
/// * array base: comma-separated items, trimmed
/// * anything else: unchanged string
#[must_use]
pub fn convert_value(raw: &str, base: &Value) -> Value {
    match base {
        Value::Number(_) => parse_number(raw).unwrap_or_else(|| Value::String(raw.to_owned())),
        Value::Bool(_) => Value::Bool(raw.trim().eq_ignore_ascii_case("true")),
        Value::Array(_) => {
            Value::Array(raw.split(',').map(|item| Value::String(item.trim().to_owned())).collect())
        }
        _ => Value::String(raw.to_owned()),
    }
}

/// Walks `value` alongside `base`, converting string leaves that have a typed counterpart.
pub(crate) fn coerce_to_base(value: &mut Value, base: &Value) {
    if let Value::String(raw) = &*value {
        let converted = convert_value(raw, base);
        *value = converted;
        return;
    }

    if let (Value::Object(map), Value::Object(base_map)) = (value, base) {
        for (key, child) in map.iter_mut() {
            if let Some(base_child) = base_map.get(key) {
                coerce_to_base(child, base_child);
            }
        }
    }
}

fn parse_number(raw: &str) -> Option<Value> {
    let trimmed = raw.trim();
    if let Ok(int) = trimmed.parse::<i64>() {
        return Some(Value::from(int));
    }
    if let Ok(uint) = trimmed.parse::<u64>() {
        return Some(Value::from(uint));
    }
    trimmed.parse::<f64>().ok().and_then(Number::from_f64).map(Value::Number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn converts_by_base_type() {
        assert_eq!(convert_value("3000", &json!(8080)), json!(3000));
        assert_eq!(convert_value("0.25", &json!(1.5)), json!(0.25));
        assert_eq!(convert_value("TRUE", &json!(false)), json!(true));
        assert_eq!(convert_value("yes", &json!(true)), json!(false));
        assert_eq!(convert_value("a, b ,c", &json!([])), json!(["a", "b", "c"]));
        assert_eq!(convert_value("3000", &json!("8080")), json!("3000"));
        assert_eq!(convert_value("3000", &Value::Null), json!("3000"));
    }

    #[test]
    fn unparsable_number_stays_string() {
        assert_eq!(convert_value("not-a-port", &json!(1)), json!("not-a-port"));
    }

    #[test]
    fn coerces_nested_leaves_only_where_base_exists() {
        let mut value = json!({
            "port": "3000",
            "debug": "true",
            "origins": "http://a,http://b",
            "name": "svc",
            "extra": "42"
        });
        let base = json!({ "port": 1, "debug": false, "origins": ["x"], "name": "default" });

        coerce_to_base(&mut value, &base);

        assert_eq!(
            value,
            json!({
                "port": 3000,
                "debug": true,
                "origins": ["http://a", "http://b"],
                "name": "svc",
                "extra": "42"
            })
        );
    }
}
