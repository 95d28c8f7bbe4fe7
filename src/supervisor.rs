//! Render supervisor
//!
//! Wraps a render step so an error or panic inside it cannot take the
//! surrounding output down. The first failure is captured and a fallback
//! panel is served until `reset`; while latched, the render step is not
//! run again.

use std::panic::{self, AssertUnwindSafe};

use tracing::error;

/// Fallback text shown in place of the normal output
pub const FALLBACK_PANEL: &str =
    "Something went wrong while rendering the result.\nReset and try again.";

/// Detail captured from a failed render; shown only on request, never in
/// the fallback panel itself
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedFailure {
    pub message: String,
}

/// Supervisor for a fallible render step
#[derive(Debug, Default)]
pub struct RenderSupervisor {
    failure: Option<CapturedFailure>,
}

impl RenderSupervisor {
    pub fn new() -> Self {
        Self { failure: None }
    }

    /// Run the render step, returning its output or the fallback panel.
    ///
    /// Both returned errors and panics are captured. Once latched, the step
    /// is skipped and the fallback comes back directly until `reset`.
    pub fn render<F, E>(&mut self, render_fn: F) -> String
    where
        F: FnOnce() -> Result<String, E>,
        E: std::fmt::Display,
    {
        if self.failure.is_some() {
            return FALLBACK_PANEL.to_string();
        }

        match panic::catch_unwind(AssertUnwindSafe(render_fn)) {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                error!("Render step failed: {}", e);
                self.failure = Some(CapturedFailure {
                    message: e.to_string(),
                });
                FALLBACK_PANEL.to_string()
            }
            Err(payload) => {
                let message = panic_message(payload);
                error!("Render step panicked: {}", message);
                self.failure = Some(CapturedFailure { message });
                FALLBACK_PANEL.to_string()
            }
        }
    }

    /// Failure captured by the last failed render, if any
    pub fn failure(&self) -> Option<&CapturedFailure> {
        self.failure.as_ref()
    }

    pub fn is_failed(&self) -> bool {
        self.failure.is_some()
    }

    /// Clear the captured failure so normal rendering resumes
    pub fn reset(&mut self) {
        self.failure = None;
    }
}

fn panic_message(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
