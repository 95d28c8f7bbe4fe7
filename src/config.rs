//! Configuration for the service and the client

use std::sync::Arc;

use anyhow::{anyhow, Result};

use crate::enhancer::stats::DEFAULT_COST_PER_1K_TOKENS_USD;

/// Service name reported by `GET /api/health`
pub const DEFAULT_SERVICE_NAME: &str = "Prompt Enhancer API";

/// Default client request timeout
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Maximum request body accepted by the server (1MB)
const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

/// Optional configuration parameters for the `Config` constructors
#[derive(Debug, Clone, Default)]
pub struct ConfigOptions {
    pub service_name: Option<String>,
    pub request_timeout: Option<u64>,
    pub cost_per_1k_tokens: Option<f64>,
    pub max_body_bytes: Option<usize>,
}

/// Main configuration struct
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the service a client talks to; empty in service mode
    pub base_url: String,
    pub service_name: String,
    pub request_timeout_secs: u64,
    pub cost_per_1k_tokens_usd: f64,
    pub max_body_bytes: usize,
}

impl Config {
    /// Create a config for client use with a required base URL.
    ///
    /// A missing scheme defaults to `http://` since the service is usually
    /// local; an explicit `https://` is kept as given. Trailing slashes are
    /// stripped so URL joins stay predictable.
    pub fn new(base_url: String, options: ConfigOptions) -> Result<Arc<Self>> {
        let base_url = base_url.trim();
        if base_url.is_empty() {
            return Err(anyhow!("base_url cannot be empty"));
        }

        let base_url = if base_url.starts_with("http://") || base_url.starts_with("https://") {
            base_url.to_string()
        } else {
            format!("http://{}", base_url)
        };

        // Remove trailing slash
        let base_url = base_url.trim_end_matches('/').to_string();

        Self::build(base_url, options)
    }

    /// Create a config for running the service itself,
    /// where no base URL is involved
    pub fn for_service(options: ConfigOptions) -> Result<Arc<Self>> {
        Self::build(String::new(), options)
    }

    fn build(base_url: String, options: ConfigOptions) -> Result<Arc<Self>> {
        let cost_per_1k_tokens_usd = options
            .cost_per_1k_tokens
            .unwrap_or(DEFAULT_COST_PER_1K_TOKENS_USD);
        if !cost_per_1k_tokens_usd.is_finite() || cost_per_1k_tokens_usd < 0.0 {
            return Err(anyhow!("cost_per_1k_tokens must be a non-negative number"));
        }

        let max_body_bytes = options.max_body_bytes.unwrap_or(DEFAULT_MAX_BODY_BYTES);
        if max_body_bytes == 0 {
            return Err(anyhow!("max_body_bytes must be greater than zero"));
        }

        let service_name = options
            .service_name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SERVICE_NAME.to_string());

        Ok(Arc::new(Self {
            base_url,
            service_name,
            request_timeout_secs: options.request_timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
            cost_per_1k_tokens_usd,
            max_body_bytes,
        }))
    }
}
