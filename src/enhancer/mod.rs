//! Prompt enhancement module
//! Turns rough prompts into structured, role-aware instructions

mod engine;
mod profiles;
pub mod stats;
pub mod templates;

pub use engine::EnhancementEngine;
pub use profiles::{OptimizationLevel, UserRole};
pub use templates::WEB_UI_HTML;
