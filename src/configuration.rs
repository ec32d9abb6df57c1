// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

use std::fmt;

use clap::Parser;

use crate::constants::DEFAULT_STS_REGION;
use crate::errors::AppError;

#[derive(Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct BrokerOptions {
    #[arg(long, default_value = "0.0.0.0", env("BROKER_HTTP_HOST"))]
    pub host: String,
    #[arg(long, default_value = "3000", env("PORT"))]
    pub port: u16,
    /// Shared secret all trusted callers must present in `x-api-key`.
    #[arg(long, env("STS_SHARED_API_KEY"), hide_env_values = true)]
    pub api_key: String,
    #[arg(long, default_value = DEFAULT_STS_REGION, env("AWS_REGION"))]
    pub region: String,
}

impl BrokerOptions {
    /// Rejects configurations that must never serve traffic.
    ///
    /// A missing `STS_SHARED_API_KEY` is already fatal at parse time; an
    /// empty one would otherwise authenticate every caller presenting an
    /// empty header.
    pub fn ensure_valid(&self) -> Result<(), AppError> {
        if self.api_key.is_empty() {
            return Err(AppError::Config(
                "STS_SHARED_API_KEY must be set to a non-empty value".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for BrokerOptions {
    fn default() -> Self {
        BrokerOptions {
            host: "127.0.0.1".to_string(),
            port: 3000,
            api_key: "test-api-key".to_string(),
            region: DEFAULT_STS_REGION.to_string(),
        }
    }
}

// Custom Debug implementation to prevent accidental logging of the secret
impl fmt::Debug for BrokerOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BrokerOptions")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("api_key", &"[REDACTED]")
            .field("region", &self.region)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_are_valid() {
        assert!(BrokerOptions::default().ensure_valid().is_ok());
    }

    #[test]
    fn empty_api_key_is_rejected() {
        let options = BrokerOptions {
            api_key: String::new(),
            ..BrokerOptions::default()
        };
        assert!(matches!(
            options.ensure_valid(),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn debug_output_redacts_the_api_key() {
        let options = BrokerOptions {
            api_key: "super-secret".to_string(),
            ..BrokerOptions::default()
        };
        let rendered = format!("{:?}", options);
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("[REDACTED]"));
    }
}
