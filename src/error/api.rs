//! Errors surfaced by HTTP calls

use std::time::Duration;

use super::ErrorDetail;

/// Everything that can go wrong while talking to the service.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The service answered with an error status.
    #[error("HTTP {status}: {message}")]
    Http {
        /// Status code of the response.
        status: u16,
        /// Error message extracted from the response envelope.
        message: String,
        /// The raw `detail` envelope, if the body carried one.
        detail: Option<Box<ErrorDetail>>,
    },

    /// The request never completed at the transport level.
    #[error("Transport error: {0}")]
    Network(#[from] reqwest::Error),

    /// The request exceeded its deadline.
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// A URL could not be constructed from the configured base and path.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The response body did not match the expected shape.
    #[error("Could not parse response: {message}")]
    Parse {
        /// What went wrong during deserialization.
        message: String,
        /// Raw response body, if available.
        body: Option<String>,
    },
}

impl ApiError {
    /// Builds an HTTP error with no parsed envelope.
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
            detail: None,
        }
    }

    /// Builds an HTTP error from an error response body.
    ///
    /// Extracts the display message from the `detail` envelope; when the
    /// body has no usable envelope the status text stands in.
    pub fn from_response(status: u16, status_text: &str, body: &str) -> Self {
        match ErrorDetail::from_body(body) {
            Some(detail) => {
                let extracted = detail.message();
                let message = if extracted.is_empty() {
                    status_text.to_string()
                } else {
                    extracted
                };
                Self::Http {
                    status,
                    message,
                    detail: Some(Box::new(detail)),
                }
            }
            None => Self::http(status, status_text),
        }
    }

    /// Builds a parse error without the offending body.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            body: None,
        }
    }

    /// Builds a parse error that keeps the offending body for diagnostics.
    pub fn parse_with_body(message: impl Into<String>, body: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            body: Some(body.into()),
        }
    }

    /// The HTTP status behind this error, when there is one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The parsed error envelope, when the response carried one.
    pub fn detail(&self) -> Option<&ErrorDetail> {
        match self {
            Self::Http { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// Whether retrying this request has any chance of succeeding.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http { status, .. } => matches!(status, 429 | 500 | 502 | 503 | 504),
            Self::Network(_) => true,
            Self::Timeout(_) => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_response_extracts_detail() {
        let err = ApiError::from_response(404, "Not Found", r#"{"detail": "Order not found"}"#);
        assert_eq!(err.status_code(), Some(404));
        assert_eq!(err.to_string(), "HTTP 404: Order not found");
    }

    #[test]
    fn test_from_response_falls_back_to_status_text() {
        let err = ApiError::from_response(502, "Bad Gateway", "<html>upstream died</html>");
        assert_eq!(err.to_string(), "HTTP 502: Bad Gateway");
        assert!(err.detail().is_none());
    }

    #[test]
    fn test_from_response_empty_validation_list() {
        let err = ApiError::from_response(422, "Unprocessable Entity", r#"{"detail": []}"#);
        assert_eq!(err.to_string(), "HTTP 422: Unprocessable Entity");
    }

    #[test]
    fn test_retryable_statuses() {
        assert!(ApiError::http(429, "Too Many Requests").is_retryable());
        assert!(ApiError::http(503, "Service Unavailable").is_retryable());
        assert!(!ApiError::http(404, "Not Found").is_retryable());
        assert!(!ApiError::http(401, "Unauthorized").is_retryable());
    }
}
