//! `/metrics` handlers: append one record, read the buffer back.
//!
//! Body decoding is the only fallible step on the write path and it runs
//! before the buffer is touched, so a rejected request leaves no trace in it.

pub mod error;

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::{header, HeaderMap},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

use metricbuf_core::error::MetricBufError;
use metricbuf_core::MetricRecord;

use crate::app_state::AppState;

pub use error::ApiError;

/// `application/json` or any `application/*+json`, parameters ignored.
fn is_json_content_type(headers: &HeaderMap) -> bool {
    let Some(value) = headers.get(header::CONTENT_TYPE) else {
        return false;
    };
    let Ok(value) = value.to_str() else {
        return false;
    };
    let essence = value.split(';').next().unwrap_or_default().trim().to_ascii_lowercase();
    match essence.split_once('/') {
        Some(("application", sub)) => sub == "json" || sub.ends_with("+json"),
        _ => false,
    }
}

/// The whole body must be exactly one JSON object or array.
fn decode_record(
    headers: &HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<MetricRecord, ApiError> {
    if !is_json_content_type(headers) {
        return Err(MetricBufError::UnsupportedMediaType(
            "expected `Content-Type: application/json`".into(),
        )
        .into());
    }
    let bytes = body?;
    let value: Value = serde_json::from_slice(&bytes)
        .map_err(|e| MetricBufError::BadRequest(format!("invalid JSON body: {e}")))?;
    if !(value.is_object() || value.is_array()) {
        return Err(MetricBufError::BadRequest(
            "record must be a JSON object or array".into(),
        )
        .into());
    }
    Ok(value)
}

fn count_rejection(state: &AppState, method: &str, err: &ApiError) {
    let outcome = if err.status().is_server_error() { "error" } else { "rejected" };
    state.metrics().requests.inc(&[("method", method), ("outcome", outcome)]);
    state.metrics().rejections.inc(&[("reason", err.code())]);
}

/// POST /metrics
pub async fn push_metric(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<Value>, ApiError> {
    let record = match decode_record(&headers, body) {
        Ok(r) => r,
        Err(e) => {
            tracing::warn!(code = e.code(), error = %e, "record rejected");
            count_rejection(&state, "POST", &e);
            return Err(e);
        }
    };

    let appended = state.buffer().append(record);
    state.metrics().requests.inc(&[("method", "POST"), ("outcome", "ok")]);
    tracing::debug!(len = appended.len, evicted = appended.evicted, "record accepted");

    Ok(Json(json!({ "status": "success" })))
}

/// GET /metrics
pub async fn list_metrics(State(state): State<AppState>) -> Result<Response, ApiError> {
    let records = state.buffer().snapshot();
    let body = match serde_json::to_vec(&records) {
        Ok(b) => b,
        Err(e) => {
            let err = ApiError(MetricBufError::Internal(format!("encode snapshot: {e}")));
            tracing::error!(error = %err, "snapshot encoding failed");
            count_rejection(&state, "GET", &err);
            return Err(err);
        }
    };

    state.metrics().requests.inc(&[("method", "GET"), ("outcome", "ok")]);
    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}
