//! Custom serialization for Record.
//!
//! ## Writes
//!
//! When serializing a Record for create/update requests:
//! - Regular fields serialize normally: `"name": "Wireless Mouse"`
//! - Null values are skipped (the API treats absent and null the same)
//! - DateTime values serialize as RFC 3339 strings
//!
//! ## Reads
//!
//! When deserializing API responses:
//! - JSON numbers map to `Int`/`Long`/`Float` by size and kind
//! - ISO 8601 datetime strings (with or without a UTC offset; the service
//!   emits naive UTC timestamps) become `DateTime`
//! - Objects become nested `Record`s, arrays of objects become `Records`
//! - Anything else falls back to `Json`

use std::fmt;

use chrono::NaiveDateTime;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde::de::MapAccess;
use serde::de::Visitor;
use serde::ser::SerializeMap;

use super::Record;
use super::Value;

// =============================================================================
// Serialize: Record to JSON body
// =============================================================================

impl Serialize for Record {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;

        for (key, value) in &self.fields {
            match value {
                // Null values should not be serialized
                Value::Null => {}
                _ => {
                    map.serialize_entry(key, value)?;
                }
            }
        }

        map.end()
    }
}

// =============================================================================
// Deserialize: JSON body to Record
// =============================================================================

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(RecordVisitor)
    }
}

struct RecordVisitor;

impl<'de> Visitor<'de> for RecordVisitor {
    type Value = Record;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map representing an entity record")
    }

    fn visit_map<M>(self, mut map: M) -> Result<Record, M::Error>
    where
        M: MapAccess<'de>,
    {
        let mut record = Record::new();

        while let Some(key) = map.next_key::<String>()? {
            let value: serde_json::Value = map.next_value()?;
            record.fields.insert(key, json_value_to_value(value));
        }

        Ok(record)
    }
}

/// Maps raw JSON into the typed Value variants.
fn json_value_to_value(json: serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                if i >= i32::MIN as i64 && i <= i32::MAX as i64 {
                    Value::Int(i as i32)
                } else {
                    Value::Long(i)
                }
            } else if let Some(f) = n.as_f64() {
                Value::Float(f)
            } else {
                Value::Json(serde_json::Value::Number(n))
            }
        }
        serde_json::Value::String(s) => {
            // Try to parse as DateTime (RFC 3339 first, then the naive UTC
            // form the service emits for created_at/updated_at fields)
            if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(&s) {
                Value::DateTime(dt.with_timezone(&chrono::Utc))
            } else if let Ok(dt) = NaiveDateTime::parse_from_str(&s, "%Y-%m-%dT%H:%M:%S%.f") {
                Value::DateTime(dt.and_utc())
            }
            // Anything else stays a plain string
            else {
                Value::String(s)
            }
        }
        serde_json::Value::Array(arr) => {
            // Arrays of objects are record collections (order items, review
            // lists); anything else stays raw JSON
            if !arr.is_empty() && arr.iter().all(serde_json::Value::is_object) {
                let records = arr
                    .into_iter()
                    .map(|v| match json_value_to_value(v) {
                        Value::Record(r) => *r,
                        // Unreachable given the is_object check above
                        _ => Record::new(),
                    })
                    .collect();
                Value::Records(records)
            } else {
                Value::Json(serde_json::Value::Array(arr))
            }
        }
        serde_json::Value::Object(obj) => {
            let mut nested = Record::new();
            for (key, value) in obj {
                nested.fields.insert(key, json_value_to_value(value));
            }
            Value::Record(Box::new(nested))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_scalar_fields() {
        let record = Record::new()
            .set("name", "Wireless Mouse")
            .set("stock_quantity", 42);

        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"name\":\"Wireless Mouse\""));
        assert!(json.contains("\"stock_quantity\":42"));
    }

    #[test]
    fn test_serialize_skips_null() {
        let record = Record::new()
            .set("name", "Wireless Mouse")
            .set("sale_price", Value::Null);

        let json = serde_json::to_string(&record).unwrap();
        assert!(!json.contains("sale_price"));
    }

    #[test]
    fn test_deserialize_scalar_fields() {
        let json = r#"{"name": "Wireless Mouse", "price": 24.99, "stock_quantity": 42, "is_active": true}"#;
        let record: Record = serde_json::from_str(json).unwrap();

        assert_eq!(record.get_string("name").unwrap(), Some("Wireless Mouse"));
        assert_eq!(record.get_float("price").unwrap(), Some(24.99));
        assert_eq!(record.get_int("stock_quantity").unwrap(), Some(42));
        assert_eq!(record.get_bool("is_active").unwrap(), Some(true));
    }

    #[test]
    fn test_deserialize_null_field() {
        let json = r#"{"name": "Wireless Mouse", "sale_price": null}"#;
        let record: Record = serde_json::from_str(json).unwrap();

        assert_eq!(record.get_float("sale_price").unwrap(), None);
    }

    #[test]
    fn test_deserialize_datetime_with_offset() {
        let json = r#"{"created_at": "2025-08-26T10:03:00+00:00"}"#;
        let record: Record = serde_json::from_str(json).unwrap();

        let dt = record.get_datetime("created_at").unwrap().unwrap();
        assert_eq!(dt.to_rfc3339(), "2025-08-26T10:03:00+00:00");
    }

    #[test]
    fn test_deserialize_naive_datetime() {
        // The service serializes utcnow() without an offset
        let json = r#"{"created_at": "2025-08-26T10:03:00.123456"}"#;
        let record: Record = serde_json::from_str(json).unwrap();

        assert!(record.get_datetime("created_at").unwrap().is_some());
    }

    #[test]
    fn test_date_only_string_stays_string() {
        let json = r#"{"valid_from": "2025-01-01"}"#;
        let record: Record = serde_json::from_str(json).unwrap();

        assert_eq!(record.get_string("valid_from").unwrap(), Some("2025-01-01"));
    }

    #[test]
    fn test_deserialize_nested_object() {
        let json = r#"{
            "order_number": "ORD-20250826-0001",
            "shipping_address": {"street": "1 Main St", "city": "Springfield"}
        }"#;
        let record: Record = serde_json::from_str(json).unwrap();

        let address = record.get_record("shipping_address").unwrap().unwrap();
        assert_eq!(address.get_string("city").unwrap(), Some("Springfield"));
    }

    #[test]
    fn test_deserialize_record_collection() {
        let json = r#"{
            "order_items": [
                {"product_id": 1, "quantity": 2},
                {"product_id": 7, "quantity": 1}
            ]
        }"#;
        let record: Record = serde_json::from_str(json).unwrap();

        let items = record.get_records("order_items").unwrap().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].get_int("product_id").unwrap(), Some(1));
    }

    #[test]
    fn test_scalar_array_stays_json() {
        let json = r#"{"applicable_categories": ["electronics", "clothing"]}"#;
        let record: Record = serde_json::from_str(json).unwrap();

        assert!(matches!(
            record.get("applicable_categories"),
            Some(Value::Json(_))
        ));
    }
}
