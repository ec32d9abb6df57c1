// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

//! HTTP route handlers for the broker API.
//!
//! This module provides the following endpoints:
//!
//! | Method | Path | Handler | Description |
//! |--------|------|---------|-------------|
//! | GET | `/health` | [`health`] | Health check endpoint |
//! | POST | `/assume-role` | [`assume_role`] | Exchange a role descriptor for temporary credentials |

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use serde_json::json;
use validator::Validate;

use crate::application::AppState;
use crate::constants;
use crate::errors::AppError;
use crate::models::{CredentialRequest, TemporaryCredentials};

/// Health check endpoint.
///
/// Requires no authentication and always succeeds while the process is
/// running.
///
/// # Response
///
/// ```json
/// {"status": "ok", "region": "us-east-1"}
/// ```
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(json!({"status": "ok", "region": state.options.region}))
}

/// Exchanges an authenticated broker request for temporary credentials.
///
/// # Request Flow
///
/// 1. Compare the `x-api-key` header against the configured shared secret
/// 2. Parse and validate the [`CredentialRequest`] body
/// 3. Forward a single `AssumeRole` call to STS with a fixed one-hour
///    session duration
/// 4. Relay the credentials payload verbatim
///
/// # Errors
///
/// - [`AppError::Unauthorized`] - Missing or mismatching api key
/// - [`AppError::BodyParse`] / [`AppError::Validation`] - Request body
///   rejected
/// - [`AppError::AssumeRoleFailed`] - STS call failed for any reason
/// - [`AppError::MissingCredentials`] - STS answered without a credentials
///   payload
#[tracing::instrument(skip(state, headers, body))]
pub async fn assume_role(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Result<Json<CredentialRequest>, JsonRejection>,
) -> Result<Json<TemporaryCredentials>, AppError> {
    // 1. Authenticate before touching the body; a bad key wins over a
    //    malformed request
    let presented = headers
        .get(constants::API_KEY_HEADER)
        .and_then(|value| value.to_str().ok());
    if presented != Some(state.options.api_key.as_str()) {
        return Err(AppError::Unauthorized);
    }

    // 2. Parse and validate the request body; parse detail stays in the log
    let Json(request) = body.map_err(|e| {
        tracing::debug!("[broker] request body rejected: {e}");
        AppError::BodyParse(e.to_string())
    })?;
    request.validate().map_err(|e| {
        tracing::debug!("[broker] validation failed: {e}");
        AppError::Validation(e)
    })?;

    tracing::debug!(role_arn = %request.role_arn, "[broker] delegating assume-role");

    // 3. Delegate to STS; the From<StsError> conversion logs the diagnostic
    //    detail and collapses it to the opaque assume_role_failed code
    let output = state
        .sts
        .assume_role(
            &request.role_arn,
            &request.external_id,
            constants::SESSION_DURATION_SECS,
        )
        .await?;

    // 4. A provider reply without a credentials payload is its own failure
    //    mode, distinct from a failed call
    let credentials = output.credentials.ok_or_else(|| {
        tracing::error!("[broker] sts reply carried no credentials payload");
        AppError::MissingCredentials
    })?;

    Ok(Json(credentials))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::configuration::BrokerOptions;
    use crate::sts::{AssumeRoleOutput, StsApi, StsError};
    use async_trait::async_trait;
    use axum::body::to_bytes;
    use axum::http::StatusCode;

    // Unit tests for handler functions called directly; full-pipeline tests
    // through the router live in tests/http_integration.rs

    /// Stands in for STS where delegation must never be reached.
    struct UnreachableSts;

    #[async_trait]
    impl StsApi for UnreachableSts {
        async fn assume_role(
            &self,
            _role_arn: &str,
            _external_id: &str,
            _duration_seconds: i32,
        ) -> Result<AssumeRoleOutput, StsError> {
            panic!("assume-role must not be called");
        }
    }

    fn test_state() -> Arc<AppState> {
        Arc::new(AppState {
            options: BrokerOptions::default(),
            sts: Arc::new(UnreachableSts),
        })
    }

    #[tokio::test]
    async fn health_reports_ok_and_the_configured_region() {
        let response = health(State(test_state())).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["region"], "us-east-1");
    }

    #[tokio::test]
    async fn missing_api_key_short_circuits_before_delegation() {
        let request: CredentialRequest = serde_json::from_value(serde_json::json!({
            "role_arn": "arn:aws:iam::1:role/x",
            "external_id": "ext1",
            "region": "us-east-1",
            "service": "s3"
        }))
        .unwrap();

        // UnreachableSts panics if the handler gets past authentication
        let result = assume_role(State(test_state()), HeaderMap::new(), Ok(Json(request))).await;

        assert!(matches!(result, Err(AppError::Unauthorized)));
    }
}
