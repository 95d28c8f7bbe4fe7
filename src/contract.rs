//! Wire types shared by the HTTP server and the client

use serde::{Deserialize, Serialize};

use crate::enhancer::{OptimizationLevel, UserRole};
use crate::error::EnhanceError;

/// Body of `POST /api/enhance`.
///
/// `user_role` and `optimization_level` are optional on the wire and default
/// to `general` / `balanced`; values outside the known catalogues fail
/// deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnhanceRequest {
    pub original_prompt: String,
    #[serde(default)]
    pub user_role: UserRole,
    #[serde(default)]
    pub optimization_level: OptimizationLevel,
}

impl EnhanceRequest {
    pub fn new(original_prompt: impl Into<String>) -> Self {
        Self {
            original_prompt: original_prompt.into(),
            user_role: UserRole::default(),
            optimization_level: OptimizationLevel::default(),
        }
    }

    pub fn with_role(mut self, role: UserRole) -> Self {
        self.user_role = role;
        self
    }

    pub fn with_level(mut self, level: OptimizationLevel) -> Self {
        self.optimization_level = level;
        self
    }

    /// Reject prompts that are empty or whitespace-only.
    pub fn validate(&self) -> Result<(), EnhanceError> {
        if self.original_prompt.trim().is_empty() {
            return Err(EnhanceError::Validation(
                "original_prompt must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Successful answer of `POST /api/enhance`.
///
/// `token_savings` and `cost_savings_usd` are signed deltas
/// (original minus enhanced); enhancement expands prompts, so both are
/// normally negative. `formatted_response` mirrors `enhanced_prompt` for
/// consumers that read the legacy field name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnhanceResponse {
    pub enhanced_prompt: String,
    pub thinking_process: String,
    pub original_tokens: u64,
    pub enhanced_tokens: u64,
    pub token_savings: i64,
    pub cost_savings_usd: f64,
    pub processing_time: f64,
    pub formatted_response: String,
}

/// Error answer of any `/api/*` route: `{"success": false, "error": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub success: bool,
    pub error: String,
}

impl ErrorEnvelope {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

/// Answer of `GET /api/health`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
}

impl HealthResponse {
    pub fn ok(service: impl Into<String>) -> Self {
        Self {
            status: "ok".to_string(),
            service: service.into(),
        }
    }
}
