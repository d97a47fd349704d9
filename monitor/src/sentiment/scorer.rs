//! # Keyword Scorer
//!
//! Chấm điểm sentiment bằng cách đếm từ trong lexicon. Hàm chấm là hàm thuần:
//! cùng một text luôn cho cùng một kết quả, không bao giờ lỗi.

// Standard library imports
use std::collections::BTreeSet;
use std::sync::Arc;

// Internal imports
use super::lexicon::{contains, count_occurrences, Lexicon, MatchMode};
use super::types::{Emotion, SentimentResult};

/// Trị tuyệt đối lớn nhất của điểm
pub const MAX_SCORE: f64 = 0.9;

/// Từ dài hơn ngưỡng này được tính gấp đôi
const LONG_WORD_CHARS: usize = 6;

const INTENSIFIER_STEP: f64 = 0.2;
const NEGATION_BASE: f64 = 0.4;
const MIXED_DAMPING: f64 = 0.3;
const BASE_CONFIDENCE: f64 = 0.75;
const CONFIDENCE_SLOPE: f64 = 0.2;

/// Số liệu thô đếm được từ một đoạn text
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignalCounts {
    pub positive: u32,
    pub negative: u32,
    pub neutral: u32,
    /// Số intensifier khác nhau xuất hiện
    pub intensifiers: u32,
    pub has_negation: bool,
    /// Từ positive/negative đã khớp
    pub matched: BTreeSet<String>,
}

impl SignalCounts {
    pub fn intensifier_multiplier(&self) -> f64 {
        1.0 + INTENSIFIER_STEP * self.intensifiers as f64
    }
}

/// Bộ chấm điểm theo từ khóa
#[derive(Debug, Clone)]
pub struct KeywordScorer {
    lexicon: Arc<Lexicon>,
    mode: MatchMode,
}

impl Default for KeywordScorer {
    fn default() -> Self {
        Self::new(Lexicon::shared(), MatchMode::default())
    }
}

impl KeywordScorer {
    pub fn new(lexicon: Arc<Lexicon>, mode: MatchMode) -> Self {
        Self { lexicon, mode }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn match_mode(&self) -> MatchMode {
        self.mode
    }

    /// Chấm điểm một đoạn text
    pub fn score(&self, text: &str) -> SentimentResult {
        let text = text.to_lowercase();
        let counts = self.count_signals(&text);
        let (score, emotion) = decide(&counts);

        SentimentResult {
            score,
            emotion,
            confidence: BASE_CONFIDENCE + score.abs() * CONFIDENCE_SLOPE,
            reasoning: reasoning(&counts, emotion, score),
            keywords: counts.matched.into_iter().collect(),
        }
    }

    /// Đếm tín hiệu trên text đã lowercase
    pub fn count_signals(&self, text: &str) -> SignalCounts {
        let mut counts = SignalCounts::default();

        counts.positive = self.weighted_count(text, &self.lexicon.positive, &mut counts.matched);
        counts.negative = self.weighted_count(text, &self.lexicon.negative, &mut counts.matched);
        counts.neutral = self
            .lexicon
            .neutral
            .iter()
            .map(|word| count_occurrences(text, word, self.mode) as u32)
            .sum();
        counts.intensifiers = self
            .lexicon
            .intensifiers
            .iter()
            .filter(|word| contains(text, word, self.mode))
            .count() as u32;
        counts.has_negation = self
            .lexicon
            .negations
            .iter()
            .any(|word| contains(text, word, self.mode));

        counts
    }

    fn weighted_count(&self, text: &str, words: &[String], matched: &mut BTreeSet<String>) -> u32 {
        let mut total = 0;
        for word in words {
            let hits = count_occurrences(text, word, self.mode) as u32;
            if hits == 0 {
                continue;
            }
            let weight = if word.chars().count() > LONG_WORD_CHARS { 2 } else { 1 };
            total += hits * weight;
            matched.insert(word.clone());
        }
        total
    }
}

fn decide(counts: &SignalCounts) -> (f64, Emotion) {
    let multiplier = counts.intensifier_multiplier();
    let positive = counts.positive as f64;
    let negative = counts.negative as f64;
    let neutral = counts.neutral as f64;

    // Phủ định đảo chiều cảm xúc chiếm ưu thế
    if counts.has_negation {
        let magnitude = (NEGATION_BASE * multiplier).min(MAX_SCORE);
        return if positive > negative {
            (-magnitude, Emotion::Negative)
        } else if negative > positive {
            (magnitude, Emotion::Positive)
        } else {
            (0.0, Emotion::Neutral)
        };
    }

    let total = positive + negative + neutral;

    if positive > negative && positive > neutral {
        ((positive / total * multiplier).min(MAX_SCORE), Emotion::Positive)
    } else if negative > positive && negative > neutral {
        (-(negative / total * multiplier).min(MAX_SCORE), Emotion::Negative)
    } else if positive > 0.0 && negative > 0.0 {
        (
            (positive - negative) / (positive + negative) * MIXED_DAMPING,
            Emotion::Mixed,
        )
    } else {
        (0.0, Emotion::Neutral)
    }
}

fn reasoning(counts: &SignalCounts, emotion: Emotion, score: f64) -> String {
    format!(
        "Keyword analysis found {} positive, {} negative and {} neutral signals (negation: {}); classified as {} with score {:.2}.",
        counts.positive,
        counts.negative,
        counts.neutral,
        if counts.has_negation { "yes" } else { "no" },
        emotion,
        score
    )
}
