//! Shared error type across metricbuf crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Malformed body or invalid configuration.
    BadRequest,
    /// Body exceeds the configured limit.
    PayloadTooLarge,
    /// Body is not declared as JSON.
    UnsupportedMediaType,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::PayloadTooLarge => "PAYLOAD_TOO_LARGE",
            ClientCode::UnsupportedMediaType => "UNSUPPORTED_MEDIA_TYPE",
            ClientCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, MetricBufError>;

/// Unified error type used by core and server.
///
/// The buffer never produces one of these. They come from the request
/// boundary (body decoding, response encoding) and from startup (config).
#[derive(Debug, Error)]
pub enum MetricBufError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("payload too large")]
    PayloadTooLarge,
    #[error("unsupported media type: {0}")]
    UnsupportedMediaType(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl MetricBufError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            MetricBufError::BadRequest(_) => ClientCode::BadRequest,
            MetricBufError::PayloadTooLarge => ClientCode::PayloadTooLarge,
            MetricBufError::UnsupportedMediaType(_) => ClientCode::UnsupportedMediaType,
            MetricBufError::UnsupportedVersion => ClientCode::UnsupportedVersion,
            MetricBufError::Internal(_) => ClientCode::Internal,
        }
    }
}
