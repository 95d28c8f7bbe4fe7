//! Prompt Enhancer library - service and client for rewriting rough prompts
//! into structured, role-aware instructions

pub mod client;
pub mod config;
pub mod contract;
pub mod enhancer;
pub mod error;
pub mod http_logger;
pub mod orchestrator;
pub mod server;
pub mod supervisor;

// Re-export commonly used types
pub use client::EnhanceClient;
pub use config::{Config, ConfigOptions, DEFAULT_SERVICE_NAME};
pub use contract::{EnhanceRequest, EnhanceResponse, ErrorEnvelope, HealthResponse};
pub use enhancer::{EnhancementEngine, OptimizationLevel, UserRole};
pub use error::EnhanceError;
pub use orchestrator::{
    DisplayStats, EnhanceOutcome, Orchestrator, Phase, Snapshot, TriggerOutcome,
};
pub use server::AppServer;
pub use supervisor::RenderSupervisor;
