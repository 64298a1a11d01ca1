//! Uniform response envelope
//!
//! Every endpoint answers `{success, message, data?, error_detail?}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

/// Category of failure exposed to clients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    NotFound,
    Conflict,
    Database,
}

/// Client-safe failure detail; never carries a raw driver error
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub kind: ErrorKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl ErrorDetail {
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, reason: None }
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

/// Response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_detail: Option<ErrorDetail>,
}

impl<T> ApiResponse<T> {
    /// Successful response carrying `data`.
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            error_detail: None,
        }
    }
}

impl ApiResponse<()> {
    /// Failed response with no payload.
    pub fn failure(message: impl Into<String>, error_detail: Option<ErrorDetail>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            error_detail,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_omits_error_detail() {
        let value = serde_json::to_value(ApiResponse::success("ok", vec![1, 2])).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["message"], "ok");
        assert_eq!(value["data"], serde_json::json!([1, 2]));
        assert!(value.get("error_detail").is_none());
    }

    #[test]
    fn failure_omits_data() {
        let detail = ErrorDetail::new(ErrorKind::NotFound);
        let value = serde_json::to_value(ApiResponse::failure("missing", Some(detail))).unwrap();
        assert_eq!(value["success"], false);
        assert!(value.get("data").is_none());
        assert_eq!(value["error_detail"]["kind"], "not_found");
        assert!(value["error_detail"].get("reason").is_none());
    }

    #[test]
    fn failure_without_detail_has_only_flag_and_message() {
        let value = serde_json::to_value(ApiResponse::failure("nope", None)).unwrap();
        assert_eq!(value, serde_json::json!({"success": false, "message": "nope"}));
    }
}
