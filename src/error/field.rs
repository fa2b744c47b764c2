//! Typed field access errors

/// Error type for typed field access on a [`Record`](crate::model::Record).
///
/// Entity payloads in this API vary by endpoint (a product list row carries
/// fewer fields than a product detail), so a missing field is an expected
/// error callers match on rather than a bug.
#[derive(Debug, Clone, thiserror::Error)]
pub enum FieldError {
    /// No field with this name exists in the record.
    #[error("Record has no field '{field}'")]
    Missing { field: String },

    /// The field is present but stores a different type.
    #[error("Field '{field}' holds {actual}, expected {expected}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        actual: &'static str,
    },
}

impl FieldError {
    /// Builds a [`FieldError::Missing`] for `field`.
    pub fn missing(field: impl Into<String>) -> Self {
        Self::Missing {
            field: field.into(),
        }
    }

    /// Builds a [`FieldError::TypeMismatch`] for `field`.
    pub fn type_mismatch(
        field: impl Into<String>,
        expected: &'static str,
        actual: &'static str,
    ) -> Self {
        Self::TypeMismatch {
            field: field.into(),
            expected,
            actual,
        }
    }

    /// Names the field this error refers to.
    pub fn field(&self) -> &str {
        match self {
            Self::Missing { field } => field,
            Self::TypeMismatch { field, .. } => field,
        }
    }
}
