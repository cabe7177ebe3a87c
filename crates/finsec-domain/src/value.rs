//! Cell values held by uploaded and scored rows

use std::fmt;

use serde_json::{Number, Value};

/// Largest magnitude rendered as an integer rather than a float.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// A single table cell
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// A whole number, kept exact
    Integer(i64),
    /// A finite number
    Number(f64),
    /// Free text, including numeric-looking text from mixed columns
    Text(String),
    /// A missing cell
    Empty,
}

impl CellValue {
    /// Numeric payload, if this cell is a number. Integers are widened.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Integer(i) => Some(*i as f64),
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Text payload, if this cell is text
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Encode as JSON. Integral numbers become JSON integers.
    pub fn to_json(&self) -> Value {
        match self {
            CellValue::Integer(i) => Value::Number(Number::from(*i)),
            CellValue::Number(n) if is_integral(*n) => Value::Number(Number::from(*n as i64)),
            CellValue::Number(n) => Number::from_f64(*n).map(Value::Number).unwrap_or(Value::Null),
            CellValue::Text(s) => Value::String(s.clone()),
            CellValue::Empty => Value::Null,
        }
    }

    /// Decode a JSON value returned by the detection API.
    ///
    /// Booleans and nested structures have no cell equivalent and are kept
    /// as their JSON text.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Null => CellValue::Empty,
            Value::Number(n) if n.is_i64() => n
                .as_i64()
                .map(CellValue::Integer)
                .unwrap_or_else(|| CellValue::Text(n.to_string())),
            // Unsigned values past i64 stay exact as text
            Value::Number(n) if n.is_u64() => CellValue::Text(n.to_string()),
            Value::Number(n) => n
                .as_f64()
                .filter(|n| n.is_finite())
                .map(CellValue::Number)
                .unwrap_or_else(|| CellValue::Text(n.to_string())),
            Value::String(s) => CellValue::Text(s),
            other => CellValue::Text(other.to_string()),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Integer(i) => write!(f, "{}", i),
            CellValue::Number(n) if is_integral(*n) => write!(f, "{}", *n as i64),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Empty => Ok(()),
        }
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Integer(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

fn is_integral(n: f64) -> bool {
    n.is_finite() && n.fract() == 0.0 && n.abs() < MAX_EXACT_INTEGER
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_display_integral_number_has_no_fraction() {
        assert_eq!(CellValue::Number(40.0).to_string(), "40");
        assert_eq!(CellValue::Number(-30.0).to_string(), "-30");
        assert_eq!(CellValue::Number(35.5).to_string(), "35.5");
        assert_eq!(CellValue::Integer(i64::MAX).to_string(), "9223372036854775807");
        assert_eq!(CellValue::Empty.to_string(), "");
    }

    #[test]
    fn test_to_json_keeps_integers_integral() {
        assert_eq!(CellValue::Number(5.0).to_json(), json!(5));
        assert_eq!(
            CellValue::Integer(9_007_199_254_740_993).to_json(),
            json!(9_007_199_254_740_993_i64)
        );
        assert_eq!(CellValue::Number(2.25).to_json(), json!(2.25));
        assert_eq!(CellValue::from("abc").to_json(), json!("abc"));
        assert_eq!(CellValue::Empty.to_json(), Value::Null);
    }

    #[test]
    fn test_integer_widens_for_scoring() {
        assert_eq!(CellValue::Integer(-30).as_number(), Some(-30.0));
        assert_eq!(CellValue::from(40_i64), CellValue::Integer(40));
        assert_eq!(CellValue::from("40").as_number(), None);
    }

    #[test]
    fn test_from_json_flattens_unsupported_shapes() {
        assert_eq!(CellValue::from_json(json!("low")), CellValue::from("low"));
        assert_eq!(CellValue::from_json(json!(0.75)), CellValue::Number(0.75));
        assert_eq!(CellValue::from_json(json!(7)), CellValue::Integer(7));
        assert_eq!(
            CellValue::from_json(json!(u64::MAX)),
            CellValue::from("18446744073709551615")
        );
        assert_eq!(CellValue::from_json(json!(null)), CellValue::Empty);
        assert_eq!(CellValue::from_json(json!(true)), CellValue::from("true"));
        assert_eq!(
            CellValue::from_json(json!({"a": 1})),
            CellValue::from(r#"{"a":1}"#)
        );
    }
}
