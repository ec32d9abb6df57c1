// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

//! # STS Broker
//!
//! A credential-brokering HTTP proxy in front of AWS STS.
//!
//! This crate provides an HTTP API server that exchanges an authenticated
//! broker request for temporary AWS credentials. Clients acting under a
//! customer-owned IAM role present a shared API key and a role descriptor;
//! the broker performs the `sts:AssumeRole` call on their behalf and relays
//! the credentials back, so callers never hold long-lived AWS credentials
//! or an STS client of their own.
//!
//! ## Architecture
//!
//! ```text
//! Client -> HTTP API (this crate) -> AWS STS AssumeRole
//! ```
//!
//! Each request is an independent, stateless pipeline:
//!
//! 1. **Authentication**: exact match of the `x-api-key` header against the
//!    shared secret configured at startup
//! 2. **Validation**: four required non-empty string fields, reported
//!    per-field on failure
//! 3. **Delegation**: a single `AssumeRole` call with a fixed one-hour
//!    session duration
//! 4. **Response shaping**: credentials relayed verbatim; upstream failures
//!    collapsed to opaque error codes
//!
//! ## Modules
//!
//! - [`application`]: HTTP server setup with Axum
//! - [`configuration`]: CLI argument parsing with clap
//! - [`constants`]: Fixed protocol values (header name, session duration)
//! - [`errors`]: Application error types with HTTP response mapping
//! - [`models`]: Request/response types with validation
//! - [`routes`]: HTTP route handlers (health, assume_role)
//! - [`sts`]: The STS delegation boundary and its AWS SDK implementation
//!
//! ## Usage
//!
//! ```bash
//! STS_SHARED_API_KEY=... sts-broker --host 0.0.0.0 --port 3000
//! ```
//!
//! ## Security Considerations
//!
//! - The shared secret is required and must be non-empty; the process
//!   refuses to start otherwise
//! - Credential material is zeroized on drop and redacted from `Debug`
//!   output
//! - Upstream error detail is logged server-side but never returned to the
//!   caller

pub mod application;
pub mod configuration;
pub mod constants;
pub mod errors;
pub mod models;
pub mod routes;
pub mod sts;
