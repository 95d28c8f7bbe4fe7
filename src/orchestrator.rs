//! Client-side enhancement session
//!
//! Drives one enhancement at a time through the lifecycle
//! Idle -> Loading -> Success or Failed. A trigger while a request is in
//! flight is a no-op, so there is never more than one outstanding request,
//! and `reset` invalidates whatever is still in flight.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{error, info};

use crate::client::EnhanceClient;
use crate::config::Config;
use crate::contract::{EnhanceRequest, EnhanceResponse};
use crate::error::EnhanceError;

/// Lifecycle phase of the enhancement session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Success,
    Failed,
}

/// Stats derived from a successful response for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayStats {
    pub original_tokens: u64,
    pub enhanced_tokens: u64,
    pub processing_time: f64,
    pub cost_difference: f64,
    pub enhancement_ratio: f64,
}

impl DisplayStats {
    /// Ratio is enhanced over original as a percentage. A zero-token
    /// original maps to 0.0 rather than dividing by zero.
    pub fn from_response(response: &EnhanceResponse) -> Self {
        let enhancement_ratio = if response.original_tokens == 0 {
            0.0
        } else {
            response.enhanced_tokens as f64 / response.original_tokens as f64 * 100.0
        };

        Self {
            original_tokens: response.original_tokens,
            enhanced_tokens: response.enhanced_tokens,
            processing_time: response.processing_time,
            cost_difference: response.cost_savings_usd,
            enhancement_ratio,
        }
    }
}

/// A successful enhancement plus its display stats
#[derive(Debug, Clone, PartialEq)]
pub struct EnhanceOutcome {
    pub response: EnhanceResponse,
    pub stats: DisplayStats,
}

/// What a `trigger` call did
#[derive(Debug, Clone, PartialEq)]
pub enum TriggerOutcome {
    /// Request completed; session moved to Success
    Completed(EnhanceOutcome),
    /// Request failed; session moved to Failed, prior result kept
    Failed(String),
    /// Input rejected locally; nothing was sent, session untouched
    Rejected(String),
    /// Another request is in flight; this trigger did nothing
    Busy,
    /// `reset` happened while the request was in flight; result discarded
    Superseded,
}

/// Point-in-time view of the session
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub phase: Phase,
    pub result: Option<EnhanceOutcome>,
    pub error: Option<String>,
}

struct SessionState {
    phase: Phase,
    generation: u64,
    result: Option<EnhanceOutcome>,
    error: Option<String>,
}

/// Enhancement session orchestrator
pub struct Orchestrator {
    client: EnhanceClient,
    state: Arc<RwLock<SessionState>>,
}

impl Orchestrator {
    pub fn new(config: Arc<Config>) -> Result<Self, EnhanceError> {
        Ok(Self {
            client: EnhanceClient::new(config)?,
            state: Arc::new(RwLock::new(SessionState {
                phase: Phase::Idle,
                generation: 0,
                result: None,
                error: None,
            })),
        })
    }

    pub async fn snapshot(&self) -> Snapshot {
        let state = self.state.read().await;
        Snapshot {
            phase: state.phase,
            result: state.result.clone(),
            error: state.error.clone(),
        }
    }

    /// Run one enhancement request through the session.
    ///
    /// Blank prompts are rejected before any network traffic. While a
    /// request is in flight further triggers return `Busy`. On failure the
    /// stored result from the last success is left untouched; only the
    /// error text changes.
    pub async fn trigger(&self, request: EnhanceRequest) -> TriggerOutcome {
        if let Err(e) = request.validate() {
            return TriggerOutcome::Rejected(e.user_message());
        }

        let my_generation = {
            let mut state = self.state.write().await;
            if state.phase == Phase::Loading {
                return TriggerOutcome::Busy;
            }
            state.phase = Phase::Loading;
            state.generation += 1;
            state.error = None;
            state.generation
        };

        // No lock is held across the network call
        let result = self.client.enhance(&request).await;

        let mut state = self.state.write().await;
        if state.generation != my_generation {
            info!("Discarding superseded enhancement result");
            return TriggerOutcome::Superseded;
        }

        match result {
            Ok(response) => {
                let outcome = EnhanceOutcome {
                    stats: DisplayStats::from_response(&response),
                    response,
                };
                state.phase = Phase::Success;
                state.result = Some(outcome.clone());
                state.error = None;
                TriggerOutcome::Completed(outcome)
            }
            Err(e) => {
                // Full detail goes to the log; the session stores user-safe text
                error!("Enhancement request failed: {}", e);
                let message = e.user_message();
                state.phase = Phase::Failed;
                state.error = Some(message.clone());
                TriggerOutcome::Failed(message)
            }
        }
    }

    /// Forget the session: back to Idle with no stored result or error.
    /// Any request still in flight is invalidated and its completion will
    /// be discarded.
    pub async fn reset(&self) {
        let mut state = self.state.write().await;
        state.phase = Phase::Idle;
        state.generation += 1;
        state.result = None;
        state.error = None;
    }
}
