//! Typed input validation for insertable entity shapes.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde_json::{Map, Value};
use std::fmt;

/// One rejected field: a message and the path of keys leading to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub message: String,
    pub path: Vec<String>,
}

impl FieldViolation {
    pub fn new(message: impl Into<String>, path: &[&str]) -> Self {
        Self {
            message: message.into(),
            path: path.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Dotted path, empty for the document root.
    pub fn field(&self) -> String {
        self.path.join(".")
    }
}

/// Ordered, non-empty list of violations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldViolation>);

impl ValidationErrors {
    pub fn first(&self) -> &FieldViolation {
        // constructed only from a non-empty Vec
        &self.0[0]
    }

    pub fn violations(&self) -> &[FieldViolation] {
        &self.0
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|v| format!("{}: {}", v.field(), v.message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// A client-suppliable shape that can be validated from an untyped payload.
pub trait Insertable: Sized {
    /// Schema name as published in the route table and OpenAPI document.
    const SCHEMA: &'static str;

    fn validate(raw: &Value) -> Result<Self, ValidationErrors>;
}

fn received(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Coerces a date-like JSON value to a UTC timestamp.
///
/// Strings may be RFC 3339, ISO date-times without offset (read as UTC),
/// `YYYY-MM-DD` (UTC midnight) or RFC 2822. Numbers are epoch milliseconds;
/// `null` and booleans count as 0 and 1.
pub fn coerce_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => parse_timestamp(s.trim()),
        Value::Null => Utc.timestamp_millis_opt(0).single(),
        Value::Bool(b) => Utc.timestamp_millis_opt(i64::from(*b)).single(),
        Value::Number(n) => {
            let millis = match n.as_i64() {
                Some(ms) => ms,
                None => {
                    let f = n.as_f64()?;
                    if !f.is_finite() {
                        return None;
                    }
                    f.trunc() as i64
                }
            };
            Utc.timestamp_millis_opt(millis).single()
        }
        _ => None,
    }
}

fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }
    DateTime::parse_from_rfc2822(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Reads typed fields from a JSON object, collecting every violation in the
/// order fields are read.
pub struct FieldReader<'a> {
    object: &'a Map<String, Value>,
    violations: Vec<FieldViolation>,
}

impl<'a> FieldReader<'a> {
    pub fn new(raw: &'a Value) -> Result<Self, ValidationErrors> {
        match raw {
            Value::Object(object) => Ok(Self {
                object,
                violations: Vec::new(),
            }),
            other => Err(ValidationErrors(vec![FieldViolation::new(
                format!("Expected object, received {}", received(other)),
                &[],
            )])),
        }
    }

    fn reject(&mut self, field: &str, message: impl Into<String>) {
        self.violations.push(FieldViolation::new(message, &[field]));
    }

    fn present(&mut self, field: &str) -> Option<&'a Value> {
        let value = self.object.get(field);
        if value.is_none() {
            self.reject(field, "Required");
        }
        value
    }

    fn string(&mut self, field: &str, value: &Value) -> Option<String> {
        match value {
            Value::String(s) => Some(s.clone()),
            other => {
                self.reject(field, format!("Expected string, received {}", received(other)));
                None
            }
        }
    }

    pub fn required_string(&mut self, field: &str) -> Option<String> {
        let value = self.present(field)?;
        self.string(field, value)
    }

    /// Missing and null both read as absent.
    pub fn optional_string(&mut self, field: &str) -> Option<String> {
        match self.object.get(field) {
            None | Some(Value::Null) => None,
            Some(value) => self.string(field, value),
        }
    }

    pub fn required_integer(&mut self, field: &str) -> Option<i32> {
        let value = self.present(field)?;
        let Value::Number(n) = value else {
            self.reject(field, format!("Expected number, received {}", received(value)));
            return None;
        };
        if let Some(i) = n.as_i64() {
            return match i32::try_from(i) {
                Ok(i) => Some(i),
                Err(_) if i < 0 => {
                    self.reject(
                        field,
                        format!("Number must be greater than or equal to {}", i32::MIN),
                    );
                    None
                }
                Err(_) => {
                    self.reject(
                        field,
                        format!("Number must be less than or equal to {}", i32::MAX),
                    );
                    None
                }
            };
        }
        match n.as_f64() {
            Some(f) if f.fract() == 0.0 && f >= i32::MIN as f64 && f <= i32::MAX as f64 => {
                Some(f as i32)
            }
            Some(f) if f.fract() == 0.0 && f.is_finite() => {
                let bound = if f < 0.0 {
                    format!("Number must be greater than or equal to {}", i32::MIN)
                } else {
                    format!("Number must be less than or equal to {}", i32::MAX)
                };
                self.reject(field, bound);
                None
            }
            _ => {
                self.reject(field, "Expected integer, received float");
                None
            }
        }
    }

    /// A missing value is coerced like any other, so it reports `Invalid date`
    /// rather than `Required`.
    pub fn required_timestamp(&mut self, field: &str) -> Option<DateTime<Utc>> {
        let ts = self.object.get(field).and_then(coerce_timestamp);
        if ts.is_none() {
            self.reject(field, "Invalid date");
        }
        ts
    }

    /// Missing and null both read as absent; anything else must coerce.
    pub fn optional_timestamp(&mut self, field: &str) -> Option<DateTime<Utc>> {
        match self.object.get(field) {
            None | Some(Value::Null) => None,
            Some(value) => {
                let ts = coerce_timestamp(value);
                if ts.is_none() {
                    self.reject(field, "Invalid date");
                }
                ts
            }
        }
    }

    /// Fails with every collected violation, if any.
    pub fn finish(self) -> Result<(), ValidationErrors> {
        if self.violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(self.violations))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_non_object_root_reports_empty_path() {
        let err = FieldReader::new(&json!([1, 2])).err().unwrap();
        assert_eq!(err.first().message, "Expected object, received array");
        assert_eq!(err.first().field(), "");
    }

    #[test]
    fn test_violations_keep_read_order() {
        let raw = json!({ "b": 3 });
        let mut reader = FieldReader::new(&raw).unwrap();
        assert!(reader.required_string("a").is_none());
        assert!(reader.required_string("b").is_none());
        assert!(reader.optional_string("c").is_none());
        let err = reader.finish().unwrap_err();
        let fields: Vec<String> = err.violations().iter().map(|v| v.field()).collect();
        assert_eq!(fields, vec!["a", "b"]);
        assert_eq!(err.violations()[0].message, "Required");
        assert_eq!(err.violations()[1].message, "Expected string, received number");
    }

    #[test]
    fn test_integer_rules() {
        let raw = json!({
            "whole": 7,
            "whole_float": 5.0,
            "min": -2_147_483_648i64,
            "float": 1.5,
            "text": "7",
            "big": 3_000_000_000i64,
            "small": -3_000_000_000i64
        });
        let mut reader = FieldReader::new(&raw).unwrap();
        assert_eq!(reader.required_integer("whole"), Some(7));
        assert_eq!(reader.required_integer("whole_float"), Some(5));
        assert_eq!(reader.required_integer("min"), Some(i32::MIN));
        assert_eq!(reader.required_integer("float"), None);
        assert_eq!(reader.required_integer("text"), None);
        assert_eq!(reader.required_integer("big"), None);
        assert_eq!(reader.required_integer("small"), None);
        let err = reader.finish().unwrap_err();
        let messages: Vec<&str> = err.violations().iter().map(|v| v.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "Expected integer, received float",
                "Expected number, received string",
                "Number must be less than or equal to 2147483647",
                "Number must be greater than or equal to -2147483648",
            ]
        );
    }

    #[test]
    fn test_coerce_timestamp_formats() {
        let midnight = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap();
        assert_eq!(coerce_timestamp(&json!("2024-01-15")), Some(midnight));
        assert_eq!(coerce_timestamp(&json!("2024-01-15T00:00:00Z")), Some(midnight));
        assert_eq!(coerce_timestamp(&json!("2024-01-15T02:00:00+02:00")), Some(midnight));
        assert_eq!(coerce_timestamp(&json!("2024-01-15T00:00:00.000")), Some(midnight));
        assert_eq!(
            coerce_timestamp(&json!("Mon, 15 Jan 2024 00:00:00 +0000")),
            Some(midnight)
        );
        assert_eq!(
            coerce_timestamp(&json!(midnight.timestamp_millis())),
            Some(midnight)
        );
    }

    #[test]
    fn test_coerce_timestamp_rejects() {
        assert_eq!(coerce_timestamp(&json!("yesterday")), None);
        assert_eq!(coerce_timestamp(&json!("2024-13-40")), None);
        assert_eq!(coerce_timestamp(&json!({})), None);
        assert_eq!(coerce_timestamp(&json!([])), None);
    }

    #[test]
    fn test_coerce_timestamp_null_and_booleans_are_numeric() {
        assert_eq!(coerce_timestamp(&json!(null)), Utc.timestamp_millis_opt(0).single());
        assert_eq!(coerce_timestamp(&json!(false)), Utc.timestamp_millis_opt(0).single());
        assert_eq!(
            coerce_timestamp(&json!(true)),
            Utc.timestamp_millis_opt(1).single()
        );
    }

    #[test]
    fn test_required_timestamp_missing_is_invalid_date() {
        let raw = json!({ "null": null });
        let mut reader = FieldReader::new(&raw).unwrap();
        assert!(reader.required_timestamp("date").is_none());
        assert_eq!(reader.required_timestamp("null"), Utc.timestamp_millis_opt(0).single());
        let err = reader.finish().unwrap_err();
        assert_eq!(err.violations().len(), 1);
        assert_eq!(err.first().message, "Invalid date");
        assert_eq!(err.first().field(), "date");
    }

    #[test]
    fn test_optional_timestamp_null_is_absent() {
        let raw = json!({ "when": null, "bad": "nope" });
        let mut reader = FieldReader::new(&raw).unwrap();
        assert!(reader.optional_timestamp("when").is_none());
        assert!(reader.optional_timestamp("missing").is_none());
        assert!(reader.optional_timestamp("bad").is_none());
        let err = reader.finish().unwrap_err();
        assert_eq!(err.violations().len(), 1);
        assert_eq!(err.first().message, "Invalid date");
        assert_eq!(err.first().field(), "bad");
    }
}
