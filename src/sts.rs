// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

//! The STS delegation boundary.
//!
//! The broker is a pure client of the identity provider: the only thing it
//! ever asks for is a single `AssumeRole` call. [`StsApi`] captures that
//! contract so route handlers depend on the call shape rather than on the
//! AWS SDK, and tests can stand in a recording double. [`Sts`] is the real
//! implementation backed by `aws-sdk-sts`.

use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_sts::Client;
use aws_sdk_sts::error::DisplayErrorContext;
use aws_sdk_sts::primitives::DateTimeFormat;

use crate::constants::SESSION_NAME_PREFIX;
use crate::models::TemporaryCredentials;

#[derive(thiserror::Error, Debug)]
pub enum StsError {
    /// Transport failure or provider-side rejection of the call.
    #[error("assume-role call failed: {0}")]
    Call(String),
    /// The provider answered but the reply could not be interpreted.
    #[error("malformed assume-role response: {0}")]
    MalformedResponse(String),
}

/// Outcome of a successful `AssumeRole` round trip.
///
/// The credentials payload is optional because the provider may answer
/// without one; deciding what that means for the caller is the handler's
/// job, not this module's.
#[derive(Debug, Clone)]
pub struct AssumeRoleOutput {
    pub credentials: Option<TemporaryCredentials>,
}

#[async_trait]
pub trait StsApi: Send + Sync {
    /// Performs one `AssumeRole` call for the given role and external id.
    async fn assume_role(
        &self,
        role_arn: &str,
        external_id: &str,
        duration_seconds: i32,
    ) -> Result<AssumeRoleOutput, StsError>;
}

/// `AssumeRole` client backed by `aws-sdk-sts`.
///
/// Built once at startup and shared read-only across requests; the SDK
/// client is safe for concurrent use.
pub struct Sts {
    client: Client,
}

impl Sts {
    pub async fn new(region: &str) -> Self {
        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_owned()))
            .load()
            .await;

        Self {
            client: Client::new(&config),
        }
    }
}

#[async_trait]
impl StsApi for Sts {
    async fn assume_role(
        &self,
        role_arn: &str,
        external_id: &str,
        duration_seconds: i32,
    ) -> Result<AssumeRoleOutput, StsError> {
        let session_name = generate_session_name();

        tracing::debug!(
            role_arn,
            session_name = %session_name,
            duration_seconds,
            "[broker] calling sts assume-role"
        );

        let response = self
            .client
            .assume_role()
            .role_arn(role_arn)
            .role_session_name(&session_name)
            .external_id(external_id)
            .duration_seconds(duration_seconds)
            .send()
            .await
            .map_err(|e| StsError::Call(DisplayErrorContext(&e).to_string()))?;

        let credentials = match response.credentials() {
            Some(credentials) => Some(TemporaryCredentials {
                access_key_id: credentials.access_key_id().to_string(),
                secret_access_key: credentials.secret_access_key().to_string(),
                session_token: credentials.session_token().to_string(),
                expires_at: credentials
                    .expiration()
                    .fmt(DateTimeFormat::DateTime)
                    .map_err(|e| StsError::MalformedResponse(e.to_string()))?,
            }),
            None => None,
        };

        Ok(AssumeRoleOutput { credentials })
    }
}

/// Generates a per-call session name: `broker-<unix-millis>`.
///
/// Uniqueness is best-effort within the provider's session-name
/// constraints; sessions issued in the same millisecond share a name and
/// are only distinguished provider-side.
fn generate_session_name() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}-{}", SESSION_NAME_PREFIX, now.as_millis())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_name_has_prefix_and_timestamp_suffix() {
        let name = generate_session_name();
        let suffix = name.strip_prefix("broker-").expect("prefix missing");
        assert!(!suffix.is_empty());
        assert!(suffix.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn session_name_fits_the_sts_length_limit() {
        // 64 characters maximum per the AssumeRole API
        assert!(generate_session_name().len() <= 64);
    }
}
