// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

/// Header carrying the shared API key on inbound requests.
pub const API_KEY_HEADER: &str = "x-api-key";
/// https://docs.aws.amazon.com/STS/latest/APIReference/API_AssumeRole.html
/// session names are limited to 64 characters matching `[\w+=,.@-]*`
pub const SESSION_NAME_PREFIX: &str = "broker";
pub const SESSION_DURATION_SECS: i32 = 3600; // 1 hour, not configurable per request
pub const DEFAULT_STS_REGION: &str = "us-east-1";
