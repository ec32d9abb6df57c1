// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

use std::fmt;

use serde::{Deserialize, Serialize};
use validator::Validate;
use zeroize::ZeroizeOnDrop;

/// Inbound body of `POST /assume-role`.
///
/// All four fields are required non-empty strings. Fields default to the
/// empty string on deserialization so that a missing field and an empty one
/// surface through the same per-field validation report.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CredentialRequest {
    /// ARN of the customer-owned role to assume.
    #[serde(default)]
    #[validate(length(min = 1, message = "must be a non-empty string"))]
    pub role_arn: String,

    /// External id proving the caller is authorized for the role.
    #[serde(default)]
    #[validate(length(min = 1, message = "must be a non-empty string"))]
    pub external_id: String,

    /// Region the caller intends to use the credentials in.
    #[serde(default)]
    #[validate(length(min = 1, message = "must be a non-empty string"))]
    pub region: String,

    /// Service the caller intends to use the credentials with.
    #[serde(default)]
    #[validate(length(min = 1, message = "must be a non-empty string"))]
    pub service: String,
}

/// Temporary credentials relayed verbatim from the STS response.
#[derive(Clone, Serialize, Deserialize, ZeroizeOnDrop)]
#[serde(rename_all = "camelCase")]
pub struct TemporaryCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: String,
    /// Expiration timestamp as formatted by the provider (RFC 3339).
    pub expires_at: String,
}

// Custom Debug implementation to prevent accidental logging of sensitive data
impl fmt::Debug for TemporaryCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemporaryCredentials")
            .field("access_key_id", &"[REDACTED]")
            .field("secret_access_key", &"[REDACTED]")
            .field("session_token", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}
