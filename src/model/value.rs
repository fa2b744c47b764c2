//! Dynamic field values

use chrono::DateTime;
use chrono::SecondsFormat;
use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Deserialize;
use serde::Serialize;

/// A dynamic value that can hold any storefront field type.
///
/// This enum represents all possible values that can be stored in a record
/// field. It's used in [`Record`](super::Record) to store field values
/// dynamically, since entity payloads (products, orders, users, reviews,
/// coupons) carry different field sets per endpoint.
///
/// # Type Mapping
///
/// | JSON Type | Rust Variant |
/// |-----------|--------------|
/// | null | `Null` |
/// | boolean | `Bool` |
/// | integer (fits i32) | `Int` |
/// | integer (larger) | `Long` |
/// | number | `Float` |
/// | decimal string | `Decimal` |
/// | string | `String` |
/// | ISO 8601 datetime string | `DateTime` |
/// | object | `Record` |
/// | array of objects | `Records` |
/// | other | `Json` |
///
/// # Example
///
/// ```
/// use storefront_lib::model::Value;
///
/// let name = Value::from("Wireless Mouse");
/// let stock = Value::from(42i32);
/// let active = Value::from(true);
/// let empty = Value::Null;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// JSON null, or a field being cleared on write.
    Null,
    /// True/false flags like `is_active` and `is_approved`.
    Bool(bool),
    /// Small integers: ids, stock counts, pagination totals.
    Int(i32),
    /// Integers too large for i32.
    Long(i64),
    /// Floating point numbers (review ratings, averages).
    Float(f64),
    /// Arbitrary precision decimal (money fields).
    Decimal(Decimal),
    /// Text fields, by far the most common variant.
    String(String),
    /// UTC timestamps parsed from ISO 8601 strings.
    DateTime(DateTime<Utc>),
    /// Nested record (e.g. an order's shipping address).
    Record(Box<super::Record>),
    /// Collection of records (e.g. an order's line items).
    Records(Vec<super::Record>),
    /// Fallback for unrecognized JSON values.
    Json(serde_json::Value),
}

impl Value {
    /// Whether this is `Value::Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns `true` if this value is numeric (int, long, float, or decimal).
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Value::Int(_) | Value::Long(_) | Value::Float(_) | Value::Decimal(_)
        )
    }

    /// Returns the numeric value as `f64`, if this value is numeric.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(v) => Some(f64::from(*v)),
            Value::Long(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            Value::Decimal(v) => v.to_f64(),
            _ => None,
        }
    }

    /// Returns this value as display/query text.
    ///
    /// This is the stringification every list-query stage relies on: `Null`
    /// becomes the empty string (so missing fields never match a non-empty
    /// search term), scalars use their natural text form, datetimes render as
    /// RFC 3339, and nested structures serialize to compact JSON.
    pub fn as_text(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Bool(v) => v.to_string(),
            Value::Int(v) => v.to_string(),
            Value::Long(v) => v.to_string(),
            Value::Float(v) => v.to_string(),
            Value::Decimal(v) => v.to_string(),
            Value::String(v) => v.clone(),
            Value::DateTime(v) => v.to_rfc3339_opts(SecondsFormat::Secs, true),
            Value::Record(v) => serde_json::to_string(v).unwrap_or_default(),
            Value::Records(v) => serde_json::to_string(v).unwrap_or_default(),
            Value::Json(v) => match v {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            },
        }
    }

    /// A short name for the stored type, used in mismatch errors.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Long(_) => "long",
            Value::Float(_) => "float",
            Value::Decimal(_) => "decimal",
            Value::String(_) => "string",
            Value::DateTime(_) => "datetime",
            Value::Record(_) => "record",
            Value::Records(_) => "records",
            Value::Json(_) => "json",
        }
    }
}

// =============================================================================
// Conversions into Value
// =============================================================================

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Long(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<Decimal> for Value {
    fn from(v: Decimal) -> Self {
        Value::Decimal(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::DateTime(v)
    }
}

impl From<super::Record> for Value {
    fn from(v: super::Record) -> Self {
        Value::Record(Box::new(v))
    }
}

impl From<Vec<super::Record>> for Value {
    fn from(v: Vec<super::Record>) -> Self {
        Value::Records(v)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        Value::Json(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => Value::Null,
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Null
    }
}
