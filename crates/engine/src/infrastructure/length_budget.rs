//! Token budget estimation for a requested chapter length.

use serde::{Deserialize, Serialize};

/// Context sizes the client is willing to send as `num_ctx`.
pub const SAFE_CONTEXT_RANGE: std::ops::RangeInclusive<u32> = 2048..=32768;

/// Converts a target word count into a `num_predict` value that fits the
/// model's context window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LengthBudget {
    /// Average tokens per English word
    pub tokens_per_word: f64,
    /// Extra tokens for headings and scene breaks
    pub overhead_tokens: u32,
    /// Context window of the configured model
    pub model_context_limit: u32,
    /// Context kept free for the prompt itself
    pub reserved_context: u32,
    /// Smallest budget ever returned
    pub floor_tokens: u32,
}

impl Default for LengthBudget {
    fn default() -> Self {
        Self {
            tokens_per_word: 1.33,
            overhead_tokens: 128,
            model_context_limit: 32768,
            reserved_context: 512,
            floor_tokens: 1024,
        }
    }
}

impl LengthBudget {
    /// Token budget for `target_words` using the configured factor and overhead.
    pub fn estimate(&self, target_words: i64) -> u32 {
        self.estimate_with(target_words, self.tokens_per_word, self.overhead_tokens)
    }

    /// Token budget for `target_words` with an explicit factor and overhead.
    ///
    /// Non-positive word counts and a factor that is not a positive number
    /// yield the floor. Everything else is capped at
    /// [`LengthBudget::safe_limit`] and never drops to zero.
    pub fn estimate_with(&self, target_words: i64, tokens_per_word: f64, overhead_tokens: u32) -> u32 {
        let usable_factor = tokens_per_word.is_finite() && tokens_per_word > 0.0;
        if target_words <= 0 || !usable_factor {
            return self.floor_tokens.max(1);
        }

        let words_tokens = (target_words as f64 * tokens_per_word).floor();
        let raw = words_tokens + f64::from(overhead_tokens);
        let limit = self.safe_limit();

        if raw >= f64::from(limit) {
            limit
        } else {
            raw.max(1.0) as u32
        }
    }

    /// Largest budget that still leaves `reserved_context` free.
    pub fn safe_limit(&self) -> u32 {
        self.floor_tokens
            .max(self.model_context_limit.saturating_sub(self.reserved_context))
            .max(1)
    }

    /// The context size to request from the server, when it is one the
    /// server is known to accept.
    pub fn context_window(&self) -> Option<u32> {
        SAFE_CONTEXT_RANGE
            .contains(&self.model_context_limit)
            .then_some(self.model_context_limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_positive_words_return_floor() {
        let budget = LengthBudget::default();
        assert_eq!(budget.estimate(0), 1024);
        assert_eq!(budget.estimate(-50), 1024);
    }

    #[test]
    fn degenerate_factor_returns_floor() {
        let budget = LengthBudget::default();
        assert_eq!(budget.estimate_with(3000, 0.0, 0), 1024);
        assert_eq!(budget.estimate_with(3000, -1.33, 0), 1024);
        assert_eq!(budget.estimate_with(3000, f64::NAN, 0), 1024);
        assert_eq!(budget.estimate_with(3000, f64::INFINITY, 0), 1024);
        assert_eq!(budget.estimate_with(1, 0.1, 0), 1);
    }

    #[test]
    fn default_constants_for_three_thousand_words() {
        // floor(3000 * 1.33) + 128
        assert_eq!(LengthBudget::default().estimate(3000), 4118);
    }

    #[test]
    fn clamps_to_safe_limit() {
        let budget = LengthBudget {
            tokens_per_word: 1.5,
            overhead_tokens: 512,
            model_context_limit: 8192,
            reserved_context: 4096,
            floor_tokens: 2048,
        };
        assert_eq!(budget.estimate(3000), 4096);
        assert_eq!(budget.estimate(1_000_000), 4096);
    }

    #[test]
    fn safe_limit_never_drops_below_floor() {
        let budget = LengthBudget {
            model_context_limit: 1000,
            reserved_context: 4000,
            ..Default::default()
        };
        assert_eq!(budget.safe_limit(), 1024);
        assert_eq!(budget.estimate(10_000), 1024);
    }

    #[test]
    fn monotonic_in_word_count() {
        let budget = LengthBudget::default();
        let mut previous = 0;
        for words in (1..40_000).step_by(97) {
            let tokens = budget.estimate(words);
            assert!(tokens >= previous, "{words} words gave {tokens} < {previous}");
            assert!(tokens > 0);
            previous = tokens;
        }
    }

    #[test]
    fn context_window_only_inside_safe_range() {
        assert_eq!(LengthBudget::default().context_window(), Some(32768));
        let small = LengthBudget {
            model_context_limit: 1024,
            ..Default::default()
        };
        assert_eq!(small.context_window(), None);
        let huge = LengthBudget {
            model_context_limit: 131_072,
            ..Default::default()
        };
        assert_eq!(huge.context_window(), None);
    }
}
