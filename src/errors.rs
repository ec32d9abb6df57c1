// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::sts::StsError;

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("invalid api key")]
    Unauthorized,
    #[error("malformed request body: {0}")]
    BodyParse(String),
    #[error("validation error")]
    Validation(validator::ValidationErrors),
    #[error("sts response carried no credentials")]
    MissingCredentials,
    #[error("assume-role call failed")]
    AssumeRoleFailed,
    #[error("configuration error: {0}")]
    Config(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Upstream and parse detail is logged where the error is raised;
        // callers only ever see a fixed code (plus the per-field report for
        // validation failures).
        let (status, body) = match self {
            Self::Unauthorized => (StatusCode::UNAUTHORIZED, json!({"error": "invalid_api_key"})),
            Self::BodyParse(_) => (
                StatusCode::BAD_REQUEST,
                json!({"error": "invalid_request_body"}),
            ),
            Self::Validation(report) => (StatusCode::BAD_REQUEST, json!({"error": report})),
            Self::MissingCredentials => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({"error": "sts_missing_credentials"}),
            ),
            Self::AssumeRoleFailed => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({"error": "assume_role_failed"}),
            ),
            Self::Config(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({"error": "configuration_error"}),
            ),
        };

        (status, Json(body)).into_response()
    }
}

impl From<StsError> for AppError {
    fn from(source: StsError) -> Self {
        tracing::error!("[broker] failed to assume role: {source}");
        AppError::AssumeRoleFailed
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(error: AppError) -> (StatusCode, serde_json::Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn unauthorized_maps_to_401_with_fixed_code() {
        let (status, json) = body_json(AppError::Unauthorized).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["error"], "invalid_api_key");
    }

    #[tokio::test]
    async fn missing_credentials_maps_to_500_with_fixed_code() {
        let (status, json) = body_json(AppError::MissingCredentials).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"], "sts_missing_credentials");
    }

    #[tokio::test]
    async fn sts_errors_collapse_to_assume_role_failed() {
        let error: AppError = StsError::Call("connection refused".to_string()).into();
        let (status, json) = body_json(error).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"], "assume_role_failed");
    }

    #[tokio::test]
    async fn body_parse_detail_is_not_leaked() {
        let (status, json) =
            body_json(AppError::BodyParse("expected `,` at line 1".to_string())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "invalid_request_body");
    }
}
