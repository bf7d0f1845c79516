//! Forgiving number decoders.
//!
//! Stored records were written by forms that sometimes kept numbers as text
//! (`"59.99"`) or left them `null`. These decoders coerce the way `Number(x) || 0`
//! did: unparsable input becomes zero instead of failing the whole record.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

fn number_from(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}

/// Decode an `f64`, treating anything unparsable as `0.0`.
pub(crate) fn f64_or_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(number_from(&value).filter(|n| n.is_finite()).unwrap_or(0.0))
}

/// Decode an `i64`, truncating decimals and treating anything unparsable as `0`.
pub(crate) fn i64_or_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    if let Some(n) = value.as_i64() {
        return Ok(n);
    }
    Ok(number_from(&value)
        .filter(|n| n.is_finite())
        .map(|n| n.trunc() as i64)
        .unwrap_or(0))
}

/// Decode a flag, accepting booleans, `"true"`/`"false"` and numbers.
pub(crate) fn truthy<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Bool(b) => b,
        Value::String(s) => matches!(s.trim().to_lowercase().as_str(), "true" | "1" | "si" | "sí"),
        Value::Number(n) => n.as_f64().map(|n| n != 0.0).unwrap_or(false),
        _ => false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "f64_or_zero")]
        price: f64,
        #[serde(default, deserialize_with = "i64_or_zero")]
        stock: i64,
        #[serde(default, deserialize_with = "truthy")]
        flag: bool,
    }

    #[test]
    fn test_numbers_as_text() {
        let p: Probe = serde_json::from_str(r#"{"price":"12.5","stock":"4","flag":"true"}"#).unwrap();
        assert_eq!(p.price, 12.5);
        assert_eq!(p.stock, 4);
        assert!(p.flag);
    }

    #[test]
    fn test_garbage_becomes_zero() {
        let p: Probe = serde_json::from_str(r#"{"price":"abc","stock":null,"flag":null}"#).unwrap();
        assert_eq!(p.price, 0.0);
        assert_eq!(p.stock, 0);
        assert!(!p.flag);
    }

    #[test]
    fn test_missing_fields_default() {
        let p: Probe = serde_json::from_str("{}").unwrap();
        assert_eq!(p.price, 0.0);
        assert_eq!(p.stock, 0);
    }
}
