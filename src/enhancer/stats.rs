//! Token and cost estimation

/// Default USD price per 1000 tokens used for cost deltas
pub const DEFAULT_COST_PER_1K_TOKENS_USD: f64 = 0.003;

/// Rough token estimate: one token per four characters, rounded up.
/// Counts Unicode scalar values, not bytes, so multi-byte text is not
/// over-counted. Non-empty text always estimates at least one token.
pub fn estimate_tokens(text: &str) -> u64 {
    (text.chars().count() as u64).div_ceil(4)
}

/// Signed token delta between the original and the enhanced prompt.
/// Negative when enhancement expanded the prompt, which is the normal case.
pub fn token_savings(original_tokens: u64, enhanced_tokens: u64) -> i64 {
    original_tokens as i64 - enhanced_tokens as i64
}

/// USD value of a signed token delta at the given per-1K-token rate.
/// Keeps the sign of the delta: a longer prompt yields a negative saving.
pub fn cost_savings_usd(savings: i64, rate_per_1k_tokens: f64) -> f64 {
    savings as f64 * rate_per_1k_tokens / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate_tokens_empty() {
        assert_eq!(estimate_tokens(""), 0);
    }

    #[test]
    fn test_estimate_tokens_rounds_up() {
        assert_eq!(estimate_tokens("a"), 1);
        assert_eq!(estimate_tokens("abcd"), 1);
        assert_eq!(estimate_tokens("abcde"), 2);
        assert_eq!(estimate_tokens("hello"), 2);
    }

    #[test]
    fn test_estimate_tokens_forty_chars_is_ten() {
        let prompt = "x".repeat(40);
        assert_eq!(estimate_tokens(&prompt), 10);
    }

    #[test]
    fn test_estimate_tokens_counts_chars_not_bytes() {
        // Four CJK chars are 12 bytes but still one estimated token
        assert_eq!(estimate_tokens("你好世界"), 1);
    }

    #[test]
    fn test_token_savings_is_signed() {
        assert_eq!(token_savings(10, 25), -15);
        assert_eq!(token_savings(25, 10), 15);
        assert_eq!(token_savings(10, 10), 0);
    }

    #[test]
    fn test_cost_savings_keeps_sign() {
        let expanded = cost_savings_usd(-1000, DEFAULT_COST_PER_1K_TOKENS_USD);
        assert!(expanded < 0.0);
        assert!((expanded + DEFAULT_COST_PER_1K_TOKENS_USD).abs() < 1e-12);

        let shrunk = cost_savings_usd(2000, 0.01);
        assert!((shrunk - 0.02).abs() < 1e-12);

        assert_eq!(cost_savings_usd(0, 0.01), 0.0);
    }
}
