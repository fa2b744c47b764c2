//! Service error envelope

use serde::Deserialize;

/// Detailed error information from the storefront API.
///
/// The service wraps every error body in a `{"detail": ...}` envelope where
/// `detail` may be a plain string, a list of validation items (the 422
/// shape), or some other object. [`ErrorDetail::message`] flattens any of
/// those into one user-presentable string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    /// Plain message: `{"detail": "Product not found"}`.
    Text(String),
    /// Validation items: `{"detail": [{"loc": [...], "msg": "...", "type": "..."}]}`.
    Items(Vec<DetailItem>),
    /// Any other envelope payload.
    Other(serde_json::Value),
}

/// One entry of a validation-error list.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DetailItem {
    /// Structured validation item with a message.
    Validation {
        /// Human-readable message.
        msg: String,
        /// Location path of the offending input field.
        #[serde(default)]
        loc: Vec<serde_json::Value>,
        /// Validation error type tag.
        #[serde(rename = "type", default)]
        kind: Option<String>,
    },
    /// Bare string item.
    Text(String),
    /// Unrecognized item shape.
    Other(serde_json::Value),
}

impl ErrorDetail {
    /// Parses the `detail` envelope out of a raw error response body.
    ///
    /// Returns `None` when the body is not JSON or carries no `detail` field.
    pub fn from_body(body: &str) -> Option<Self> {
        let parsed: serde_json::Value = serde_json::from_str(body).ok()?;
        let detail = parsed.get("detail")?.clone();
        if detail.is_null() {
            return None;
        }
        serde_json::from_value(detail).ok()
    }

    /// Flattens the envelope into one display message.
    ///
    /// Strings pass through; validation lists join their item messages with
    /// a comma; objects prefer a `message` then `msg` sub-field and fall
    /// back to compact JSON. May return an empty string (e.g. an empty
    /// list), in which case callers should fall back to the HTTP status
    /// text.
    pub fn message(&self) -> String {
        match self {
            ErrorDetail::Text(s) => s.clone(),
            ErrorDetail::Items(items) => items
                .iter()
                .filter_map(DetailItem::message)
                .filter(|m| !m.is_empty())
                .collect::<Vec<_>>()
                .join(", "),
            ErrorDetail::Other(value) => {
                if let Some(message) = value.get("message").and_then(|v| v.as_str()) {
                    message.to_string()
                } else if let Some(msg) = value.get("msg").and_then(|v| v.as_str()) {
                    msg.to_string()
                } else {
                    value.to_string()
                }
            }
        }
    }

    /// Returns the individual validation items, if this is a validation list.
    pub fn items(&self) -> Option<&[DetailItem]> {
        match self {
            ErrorDetail::Items(items) => Some(items),
            _ => None,
        }
    }
}

impl DetailItem {
    /// Returns this item's message, serializing unrecognized shapes.
    fn message(&self) -> Option<String> {
        match self {
            DetailItem::Validation { msg, .. } => Some(msg.clone()),
            DetailItem::Text(s) => Some(s.clone()),
            DetailItem::Other(value) => serde_json::to_string(value).ok(),
        }
    }
}

impl std::fmt::Display for ErrorDetail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}
