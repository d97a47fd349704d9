//! # Sentiment Analysis Module
//!
//! Lexicon, bộ chấm điểm theo từ khóa, bộ phân loại và bộ phân tích qua LLM.

mod analyzer;
pub mod classifier;
pub mod lexicon;
pub mod llm;
mod scorer;
pub mod types;

pub use analyzer::SentimentAnalyzer;
#[cfg(test)]
pub use analyzer::MockSentimentAnalyzer;
pub use classifier::classify;
pub use lexicon::{Lexicon, MatchMode};
pub use llm::{LlmAnalyzer, LlmConfig};
pub use scorer::{KeywordScorer, SignalCounts, MAX_SCORE};
pub use types::{
    AnalysisInput, AnalysisReport, AnalysisSource, AuxiliarySignals, Category,
    ClassificationResult, Emotion, Priority, SentimentResult,
};
