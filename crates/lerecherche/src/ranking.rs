// Term-match scoring

use serde::{Deserialize, Serialize};

/// Score attached to a search result
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct Score {
    /// Normalized relevance (0-1)
    pub relevance: f32,

    /// Weighted match count before normalization
    pub raw: f32,

    /// Distinct query tokens with at least one hit
    pub words_matched: usize,
}

/// Unnormalized score of one document
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RawScore {
    /// Weighted match count, coverage bonus applied
    pub raw: f32,

    /// Distinct query tokens with at least one hit
    pub words_matched: usize,
}

/// Weighted term-occurrence scorer
#[derive(Debug, Clone)]
pub struct TermScorer {
    /// Weight of one title hit
    title_weight: f32,

    /// Weight of one body hit
    body_weight: f32,

    /// Whether multi-term queries get the coverage multiplier
    coverage_bonus: bool,

    /// Floor for the normalization divisor
    epsilon: f32,
}

impl TermScorer {
    /// Create a scorer with title hits worth three body hits
    pub fn new() -> Self {
        Self {
            title_weight: 3.0,
            body_weight: 1.0,
            coverage_bonus: true,
            epsilon: 0.001,
        }
    }

    /// Set custom hit weights
    pub fn with_weights(mut self, title: f32, body: f32) -> Self {
        self.title_weight = title;
        self.body_weight = body;
        self
    }

    /// Enable or disable the coverage multiplier
    pub fn with_coverage_bonus(mut self, enabled: bool) -> Self {
        self.coverage_bonus = enabled;
        self
    }

    /// Count non-overlapping literal occurrences of `term` in `text`
    pub fn count_occurrences(text: &str, term: &str) -> usize {
        if term.is_empty() {
            return 0;
        }
        text.matches(term).count()
    }

    /// Raw score of a document against lowercased tokens.
    ///
    /// `title` and `body` must already be lowercased. With more than one
    /// token the sum is multiplied by `1 + words_matched / token_count`, so
    /// covering more distinct terms beats repeating one term.
    pub fn raw_score(&self, title: &str, body: &str, tokens: &[String]) -> RawScore {
        let mut raw = 0.0f32;
        let mut words_matched = 0usize;

        for term in tokens {
            let title_hits = Self::count_occurrences(title, term);
            let body_hits = Self::count_occurrences(body, term);

            if title_hits > 0 || body_hits > 0 {
                words_matched += 1;
            }

            raw += title_hits as f32 * self.title_weight + body_hits as f32 * self.body_weight;
        }

        if self.coverage_bonus && tokens.len() > 1 {
            raw *= 1.0 + words_matched as f32 / tokens.len() as f32;
        }

        RawScore { raw, words_matched }
    }

    /// Divide every raw score by the largest one (floored at epsilon)
    pub fn normalize(&self, raws: &[f32]) -> Vec<f32> {
        let max_raw = raws
            .iter()
            .copied()
            .fold(0.0f32, f32::max)
            .max(self.epsilon);

        raws.iter().map(|raw| raw / max_raw).collect()
    }
}

impl Default for TermScorer {
    fn default() -> Self {
        Self::new()
    }
}
