//! Enhancement engine - deterministic prompt rewriting
//!
//! Rewrites a rough prompt into a structured instruction document: the
//! original task verbatim, a role-tailored framing, and a level-controlled
//! set of quality requirements. No model call is involved, so identical
//! input always yields identical output apart from the measured timing.

use std::sync::LazyLock;
use std::time::Instant;

use regex::Regex;
use tracing::debug;

use crate::contract::{EnhanceRequest, EnhanceResponse};
use crate::error::EnhanceError;

use super::profiles::{OptimizationLevel, UserRole};
use super::stats::{cost_savings_usd, estimate_tokens, token_savings};
use super::templates::{CODE_PRESERVATION_NOTE, QUALITY_SECTIONS};

/// Matches a complete fenced code block (``` ... ```)
static FENCE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)```.*?```").unwrap());

/// Deterministic prompt enhancement
pub struct EnhancementEngine {
    cost_per_1k_tokens_usd: f64,
}

impl EnhancementEngine {
    pub fn new(cost_per_1k_tokens_usd: f64) -> Self {
        Self {
            cost_per_1k_tokens_usd,
        }
    }

    /// Enhance a prompt and report token/cost stats for the rewrite.
    ///
    /// The enhanced prompt always embeds the trimmed original task verbatim,
    /// so the token estimate can only grow. `token_savings` and
    /// `cost_savings_usd` are therefore negative in practice.
    pub fn enhance(&self, request: &EnhanceRequest) -> Result<EnhanceResponse, EnhanceError> {
        let started = Instant::now();
        request.validate()?;

        let original = request.original_prompt.trim();
        let role = request.user_role;
        let level = request.optimization_level;

        let has_code = FENCE_RE.is_match(original);
        let sections = &QUALITY_SECTIONS[..level.section_count()];

        let enhanced = build_enhanced_prompt(original, role, sections, has_code);

        let original_tokens = estimate_tokens(original);
        let enhanced_tokens = estimate_tokens(&enhanced);
        let savings = token_savings(original_tokens, enhanced_tokens);

        let thinking = build_thinking_trace(
            role,
            level,
            sections.len(),
            has_code,
            original_tokens,
            enhanced_tokens,
        );

        debug!(
            "Enhanced prompt: role={}, level={}, tokens {} -> {}",
            role, level, original_tokens, enhanced_tokens
        );

        Ok(EnhanceResponse {
            enhanced_prompt: enhanced.clone(),
            thinking_process: thinking,
            original_tokens,
            enhanced_tokens,
            token_savings: savings,
            cost_savings_usd: cost_savings_usd(savings, self.cost_per_1k_tokens_usd),
            processing_time: started.elapsed().as_secs_f64(),
            formatted_response: enhanced,
        })
    }
}

/// Assemble the instruction document around the original task
fn build_enhanced_prompt(
    original: &str,
    role: UserRole,
    sections: &[(&str, &str)],
    has_code: bool,
) -> String {
    let mut out = String::with_capacity(original.len() * 2);

    out.push_str("## Role\n");
    out.push_str(role.guidance());

    out.push_str("\n\n## Task\n");
    out.push_str(original);

    out.push_str("\n\n## Requirements\n");
    for (index, (title, body)) in sections.iter().enumerate() {
        out.push_str(&format!("{}. {}: {}\n", index + 1, title, body));
    }

    if has_code {
        out.push_str("\n## Code blocks\n");
        out.push_str(CODE_PRESERVATION_NOTE);
        out.push('\n');
    }

    out
}

/// Numbered trace of what the rewrite did, one step per line
fn build_thinking_trace(
    role: UserRole,
    level: OptimizationLevel,
    section_count: usize,
    has_code: bool,
    original_tokens: u64,
    enhanced_tokens: u64,
) -> String {
    let mut steps = vec![
        format!(
            "Restated the original task ({} tokens) under a dedicated Task section.",
            original_tokens
        ),
        format!("Framed the answer for the {} profile.", role.label()),
        format!(
            "Optimization level {}: appended {} quality requirements ({}).",
            level,
            section_count,
            level.expansion_hint()
        ),
    ];

    if has_code {
        steps.push("Found fenced code blocks and pinned them as unchangeable samples.".to_string());
    }

    steps.push(format!(
        "Token estimate grew from {} to {}.",
        original_tokens, enhanced_tokens
    ));

    steps
        .iter()
        .enumerate()
        .map(|(index, step)| format!("{}. {}", index + 1, step))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fence_regex_needs_a_closed_pair() {
        assert!(FENCE_RE.is_match("before ```let x = 1;``` after"));
        assert!(FENCE_RE.is_match("```\nfn main() {}\n```"));
        assert!(!FENCE_RE.is_match("a single ``` marker"));
        assert!(!FENCE_RE.is_match("no code at all"));
    }

    #[test]
    fn test_build_enhanced_prompt_embeds_original_verbatim() {
        let original = "Summarize the quarterly report";
        let built = build_enhanced_prompt(
            original,
            UserRole::Analyst,
            &QUALITY_SECTIONS[..2],
            false,
        );
        assert!(built.contains(original));
        assert!(built.contains("## Task"));
        assert!(built.contains("## Requirements"));
        assert!(!built.contains("## Code blocks"));
    }

    #[test]
    fn test_build_enhanced_prompt_adds_code_note_when_flagged() {
        let built =
            build_enhanced_prompt("fix ```x``` please", UserRole::Developer, &QUALITY_SECTIONS[..2], true);
        assert!(built.contains("## Code blocks"));
        assert!(built.contains(CODE_PRESERVATION_NOTE));
    }

    #[test]
    fn test_thinking_trace_is_numbered() {
        let trace = build_thinking_trace(
            UserRole::General,
            OptimizationLevel::Balanced,
            4,
            false,
            10,
            50,
        );
        assert!(trace.starts_with("1. "));
        assert!(trace.contains("balanced"));
        assert!(trace.contains("10"));
        assert!(trace.contains("50"));
    }
}
