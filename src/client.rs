//! Client for a running Prompt Enhancer service

use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::Client;
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::Config;
use crate::contract::{EnhanceRequest, EnhanceResponse, ErrorEnvelope, HealthResponse};
use crate::error::EnhanceError;
use crate::http_logger::{self, HttpResponseLog};

/// HTTP client wrapper around the enhance API
pub struct EnhanceClient {
    config: Arc<Config>,
    client: Client,
}

impl EnhanceClient {
    pub fn new(config: Arc<Config>) -> Result<Self, EnhanceError> {
        if config.base_url.is_empty() {
            return Err(EnhanceError::Validation(
                "base_url is required for client use".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// POST the request to `/api/enhance`.
    ///
    /// Sends exactly one HTTP request per call; a request that fails local
    /// validation never reaches the network. Each request carries a fresh
    /// `x-request-id` for correlation with the server log.
    pub async fn enhance(&self, request: &EnhanceRequest) -> Result<EnhanceResponse, EnhanceError> {
        request.validate()?;

        let url = format!("{}/api/enhance", self.config.base_url);
        let request_id = Uuid::new_v4().to_string();
        let start_time = Instant::now();

        let http_request_log = http_logger::build_request_log_if_enabled(
            "POST",
            &url,
            &request_id,
            serde_json::to_string(request).ok().as_deref(),
        );

        debug!("Calling enhance API: {}", url);

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("x-request-id", &request_id)
            .json(request)
            .send()
            .await;

        let duration_ms = start_time.elapsed().as_millis() as u64;

        match response {
            Ok(resp) => {
                let status = resp.status();
                let response_headers = if http_logger::is_enabled() {
                    http_logger::extract_response_headers(&resp)
                } else {
                    Vec::new()
                };
                let body_text = resp.text().await.unwrap_or_default();

                if let Some(ref req_log) = http_request_log {
                    let response_log = HttpResponseLog {
                        status: status.as_u16(),
                        headers: response_headers,
                        body: Some(body_text.clone()),
                    };
                    http_logger::log_exchange(None, req_log, Some(&response_log), duration_ms, None);
                }

                info!("Enhance API call completed in {}ms ({})", duration_ms, status);
                parse_enhance_response(status.as_u16(), &body_text)
            }
            Err(e) => {
                if let Some(ref req_log) = http_request_log {
                    http_logger::log_exchange(None, req_log, None, duration_ms, Some(&e.to_string()));
                }
                Err(EnhanceError::Transport(e))
            }
        }
    }

    /// GET `/api/health`
    pub async fn health(&self) -> Result<HealthResponse, EnhanceError> {
        let url = format!("{}/api/health", self.config.base_url);
        let resp = self.client.get(&url).send().await?;
        let status = resp.status();
        let body_text = resp.text().await.unwrap_or_default();

        if !status.is_success() {
            return Err(EnhanceError::Api {
                status: status.as_u16(),
                message: extract_error_message(&body_text),
            });
        }

        serde_json::from_str(&body_text)
            .map_err(|e| EnhanceError::UnexpectedResponse(format!("invalid health payload: {}", e)))
    }
}

/// Map a status and body into a typed enhance result
fn parse_enhance_response(status: u16, body_text: &str) -> Result<EnhanceResponse, EnhanceError> {
    if !(200..300).contains(&status) {
        return Err(EnhanceError::Api {
            status,
            message: extract_error_message(body_text),
        });
    }

    serde_json::from_str::<EnhanceResponse>(body_text)
        .map_err(|e| EnhanceError::UnexpectedResponse(format!("failed to parse response: {}", e)))
}

/// Pull the message out of an error envelope, falling back to the raw body
fn extract_error_message(body_text: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body_text) {
        Ok(envelope) if !envelope.error.is_empty() => envelope.error,
        _ => {
            let trimmed = body_text.trim();
            if trimmed.is_empty() {
                "empty error body".to_string()
            } else {
                http_logger::truncate_utf8_safe(trimmed, 200)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_response_json() -> String {
        serde_json::to_string(&EnhanceResponse {
            enhanced_prompt: "Enhanced: hello".to_string(),
            thinking_process: "1. step".to_string(),
            original_tokens: 2,
            enhanced_tokens: 4,
            token_savings: -2,
            cost_savings_usd: -0.000006,
            processing_time: 0.01,
            formatted_response: "Enhanced: hello".to_string(),
        })
        .unwrap()
    }

    #[test]
    fn test_parse_enhance_response_success() {
        let parsed = parse_enhance_response(200, &sample_response_json()).unwrap();
        assert_eq!(parsed.enhanced_prompt, "Enhanced: hello");
        assert_eq!(parsed.token_savings, -2);
    }

    #[test]
    fn test_parse_enhance_response_maps_envelope_errors() {
        let body = r#"{"success":false,"error":"original_prompt must not be empty"}"#;
        let err = parse_enhance_response(400, body).unwrap_err();
        match err {
            EnhanceError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "original_prompt must not be empty");
            }
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_enhance_response_rejects_garbage_success_body() {
        let err = parse_enhance_response(200, "<html>oops</html>").unwrap_err();
        assert!(matches!(err, EnhanceError::UnexpectedResponse(_)));
    }

    #[test]
    fn test_extract_error_message_falls_back_to_raw_body() {
        assert_eq!(extract_error_message("plain failure"), "plain failure");
        assert_eq!(extract_error_message(""), "empty error body");
        assert_eq!(
            extract_error_message(r#"{"success":false,"error":"nope"}"#),
            "nope"
        );
    }
}
