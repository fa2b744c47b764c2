//! Dynamic entity record

use std::collections::HashMap;

use chrono::DateTime;
use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

use super::Value;
use crate::error::FieldError;

/// A dynamic entity record from the storefront API.
///
/// Records hold field values as a `HashMap<String, Value>`, allowing dynamic
/// access to any field. Every entity the API serves (product, order, user,
/// review, coupon, cart item) deserializes into this one shape; typed getter
/// methods provide safe access with proper error handling.
///
/// # Example
///
/// ```
/// use storefront_lib::model::Record;
///
/// // Build a record for a create/update request
/// let record = Record::new()
///     .set("name", "Wireless Mouse")
///     .set("stock_quantity", 42);
///
/// // Access fields
/// assert_eq!(record.get_string("name").unwrap(), Some("Wireless Mouse"));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    /// The field values.
    pub(crate) fields: HashMap<String, Value>,
}

impl Record {
    /// Creates an empty record with no fields.
    pub fn new() -> Self {
        Self {
            fields: HashMap::new(),
        }
    }

    // =========================================================================
    // Raw field access
    // =========================================================================

    /// Returns the raw value stored under `field`, if any.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns `true` if the record has a field with this name.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Borrows the full field map.
    pub fn fields(&self) -> &HashMap<String, Value> {
        &self.fields
    }

    /// Mutably borrows the full field map.
    pub fn fields_mut(&mut self) -> &mut HashMap<String, Value> {
        &mut self.fields
    }

    /// Returns the field value as display text.
    ///
    /// Missing fields and nulls resolve to the empty string, matching the
    /// treatment the list-query stages apply.
    pub fn text(&self, field: &str) -> String {
        self.fields
            .get(field)
            .map(Value::as_text)
            .unwrap_or_default()
    }

    /// Returns the record's numeric `id` field, if present.
    ///
    /// Entity ids in this API are integer primary keys.
    pub fn id(&self) -> Option<i64> {
        match self.fields.get("id") {
            Some(Value::Int(n)) => Some(i64::from(*n)),
            Some(Value::Long(n)) => Some(*n),
            _ => None,
        }
    }

    // =========================================================================
    // Setters
    // =========================================================================

    /// Sets a field and returns the record, for builder-style chaining.
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Stores a field value in place.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Removes a field, returning whatever was stored there.
    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.fields.remove(field)
    }

    // =========================================================================
    // Typed getters
    //
    // Err on missing fields and type mismatches; Ok(None) only when the
    // stored value is Value::Null.
    // =========================================================================

    /// Looks up a field, turning absence into [`FieldError::Missing`].
    fn field(&self, name: &str) -> Result<&Value, FieldError> {
        self.fields
            .get(name)
            .ok_or_else(|| FieldError::missing(name))
    }

    /// Reads a string field.
    pub fn get_string(&self, field: &str) -> Result<Option<&str>, FieldError> {
        match self.field(field)? {
            Value::Null => Ok(None),
            Value::String(s) => Ok(Some(s.as_str())),
            other => Err(FieldError::type_mismatch(
                field,
                "string",
                other.type_name(),
            )),
        }
    }

    /// Reads a boolean field.
    pub fn get_bool(&self, field: &str) -> Result<Option<bool>, FieldError> {
        match self.field(field)? {
            Value::Null => Ok(None),
            Value::Bool(b) => Ok(Some(*b)),
            other => Err(FieldError::type_mismatch(field, "bool", other.type_name())),
        }
    }

    /// Reads an i32 field.
    pub fn get_int(&self, field: &str) -> Result<Option<i32>, FieldError> {
        match self.field(field)? {
            Value::Null => Ok(None),
            Value::Int(n) => Ok(Some(*n)),
            other => Err(FieldError::type_mismatch(field, "int", other.type_name())),
        }
    }

    /// Reads an i64 field, widening from i32 when needed.
    pub fn get_long(&self, field: &str) -> Result<Option<i64>, FieldError> {
        match self.field(field)? {
            Value::Null => Ok(None),
            Value::Long(n) => Ok(Some(*n)),
            Value::Int(n) => Ok(Some(i64::from(*n))),
            other => Err(FieldError::type_mismatch(field, "long", other.type_name())),
        }
    }

    /// Reads an f64 field, widening from the integer variants when needed.
    pub fn get_float(&self, field: &str) -> Result<Option<f64>, FieldError> {
        match self.field(field)? {
            Value::Null => Ok(None),
            Value::Float(n) => Ok(Some(*n)),
            Value::Int(n) => Ok(Some(f64::from(*n))),
            Value::Long(n) => Ok(Some(*n as f64)),
            other => Err(FieldError::type_mismatch(field, "float", other.type_name())),
        }
    }

    /// Reads a Decimal field.
    ///
    /// Money fields arrive from the API as plain JSON numbers, so numeric
    /// variants convert rather than mismatch.
    pub fn get_decimal(&self, field: &str) -> Result<Option<Decimal>, FieldError> {
        match self.field(field)? {
            Value::Null => Ok(None),
            Value::Decimal(d) => Ok(Some(*d)),
            Value::Int(n) => Ok(Some(Decimal::from(*n))),
            Value::Long(n) => Ok(Some(Decimal::from(*n))),
            Value::Float(n) => Decimal::from_f64(*n)
                .map(Some)
                .ok_or_else(|| FieldError::type_mismatch(field, "decimal", "float")),
            other => Err(FieldError::type_mismatch(
                field,
                "decimal",
                other.type_name(),
            )),
        }
    }

    /// Reads a DateTime field.
    pub fn get_datetime(&self, field: &str) -> Result<Option<DateTime<Utc>>, FieldError> {
        match self.field(field)? {
            Value::Null => Ok(None),
            Value::DateTime(dt) => Ok(Some(*dt)),
            other => Err(FieldError::type_mismatch(
                field,
                "datetime",
                other.type_name(),
            )),
        }
    }

    /// Reads a nested Record field (e.g. an order's shipping address).
    pub fn get_record(&self, field: &str) -> Result<Option<&Record>, FieldError> {
        match self.field(field)? {
            Value::Null => Ok(None),
            Value::Record(r) => Ok(Some(r.as_ref())),
            other => Err(FieldError::type_mismatch(
                field,
                "record",
                other.type_name(),
            )),
        }
    }

    /// Reads a collection of Records (e.g. an order's line items).
    pub fn get_records(&self, field: &str) -> Result<Option<&Vec<Record>>, FieldError> {
        match self.field(field)? {
            Value::Null => Ok(None),
            Value::Records(r) => Ok(Some(r)),
            other => Err(FieldError::type_mismatch(
                field,
                "records",
                other.type_name(),
            )),
        }
    }
}
