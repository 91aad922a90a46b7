//! HTTP mapping for `MetricBufError`.

use axum::{
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use metricbuf_core::error::{ClientCode, MetricBufError};

/// Error returned from request handlers.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub MetricBufError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0.client_code() {
            ClientCode::BadRequest | ClientCode::UnsupportedVersion => StatusCode::BAD_REQUEST,
            ClientCode::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ClientCode::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ClientCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        self.0.client_code().as_str()
    }
}

impl From<BytesRejection> for ApiError {
    fn from(rej: BytesRejection) -> Self {
        let err = match rej.status() {
            StatusCode::PAYLOAD_TOO_LARGE => MetricBufError::PayloadTooLarge,
            _ => MetricBufError::BadRequest(rej.body_text()),
        };
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.code(),
            "message": self.0.to_string(),
        }));
        (self.status(), body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_follows_client_code() {
        let cases = [
            (MetricBufError::BadRequest("x".into()), StatusCode::BAD_REQUEST),
            (MetricBufError::PayloadTooLarge, StatusCode::PAYLOAD_TOO_LARGE),
            (
                MetricBufError::UnsupportedMediaType("x".into()),
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ),
            (MetricBufError::Internal("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError(err).status(), status);
        }
    }
}
