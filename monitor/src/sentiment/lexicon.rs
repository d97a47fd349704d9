//! # Lexicon
//!
//! Bảng từ cố định cho bộ chấm sentiment theo từ khóa.

// Standard library imports
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

// Third party imports
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::info;

// Internal imports
use crate::error::{MonitorError, MonitorResult};

const POSITIVE_WORDS: &[&str] = &[
    "love",
    "amazing",
    "awesome",
    "excellent",
    "fantastic",
    "wonderful",
    "great",
    "best",
    "perfect",
    "happy",
    "brilliant",
    "outstanding",
    "impressive",
    "recommend",
    "delighted",
    "thank",
    "beautiful",
    "enjoy",
    "helpful",
];

const NEGATIVE_WORDS: &[&str] = &[
    "hate",
    "terrible",
    "awful",
    "horrible",
    "worst",
    "bad",
    "disappointed",
    "frustrated",
    "frustrating",
    "broken",
    "useless",
    "angry",
    "poor",
    "slow",
    "refund",
    "scam",
    "annoying",
    "crash",
    "waste",
    "failed",
];

const NEUTRAL_WORDS: &[&str] = &[
    "okay", "fine", "average", "normal", "standard", "decent", "alright",
];

const INTENSIFIERS: &[&str] = &[
    "very",
    "extremely",
    "absolutely",
    "really",
    "incredibly",
    "totally",
    "completely",
    "super",
];

const NEGATIONS: &[&str] = &[
    "not", "never", "neither", "nobody", "nothing", "don't", "doesn't", "didn't", "won't",
    "can't", "isn't", "wasn't", "aren't", "no longer",
];

static BUILTIN: Lazy<Arc<Lexicon>> = Lazy::new(|| Arc::new(Lexicon::builtin()));

/// Cách tìm một từ lexicon trong text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Khớp chuỗi con, "cannot" chứa "not"
    #[default]
    Substring,
    /// Chỉ khớp khi hai bên không phải ký tự chữ/số
    WordBoundary,
}

impl FromStr for MatchMode {
    type Err = MonitorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "substring" => Ok(MatchMode::Substring),
            "word" | "word_boundary" | "token" => Ok(MatchMode::WordBoundary),
            other => Err(MonitorError::Config(format!("MATCH_MODE không hợp lệ: {}", other))),
        }
    }
}

/// Bảng từ dùng cho việc chấm điểm
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lexicon {
    pub positive: Vec<String>,
    pub negative: Vec<String>,
    pub neutral: Vec<String>,
    pub intensifiers: Vec<String>,
    pub negations: Vec<String>,
}

/// Định dạng file lexicon, key nào thiếu thì dùng bảng mặc định
#[derive(Debug, Default, Deserialize)]
struct LexiconFile {
    positive: Option<Vec<String>>,
    negative: Option<Vec<String>>,
    neutral: Option<Vec<String>>,
    intensifiers: Option<Vec<String>>,
    negations: Option<Vec<String>>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Lexicon {
    fn builtin() -> Self {
        Self {
            positive: to_owned(POSITIVE_WORDS),
            negative: to_owned(NEGATIVE_WORDS),
            neutral: to_owned(NEUTRAL_WORDS),
            intensifiers: to_owned(INTENSIFIERS),
            negations: to_owned(NEGATIONS),
        }
    }

    /// Bảng mặc định dùng chung
    pub fn shared() -> Arc<Lexicon> {
        Arc::clone(&BUILTIN)
    }

    /// Tải lexicon từ file JSON
    pub fn from_json_file(path: impl AsRef<Path>) -> MonitorResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            MonitorError::Lexicon(format!("không đọc được {}: {}", path.display(), e))
        })?;
        let lexicon = Self::from_json_str(&raw)?;

        info!(
            "Đã tải lexicon từ {}: {} positive, {} negative, {} neutral",
            path.display(),
            lexicon.positive.len(),
            lexicon.negative.len(),
            lexicon.neutral.len()
        );

        Ok(lexicon)
    }

    /// Parse lexicon từ chuỗi JSON
    pub fn from_json_str(raw: &str) -> MonitorResult<Self> {
        let file: LexiconFile = serde_json::from_str(raw)
            .map_err(|e| MonitorError::Lexicon(format!("JSON không hợp lệ: {}", e)))?;
        let base = Self::builtin();

        Ok(Self {
            positive: normalize(file.positive, base.positive),
            negative: normalize(file.negative, base.negative),
            neutral: normalize(file.neutral, base.neutral),
            intensifiers: normalize(file.intensifiers, base.intensifiers),
            negations: normalize(file.negations, base.negations),
        })
    }
}

fn to_owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

fn normalize(words: Option<Vec<String>>, fallback: Vec<String>) -> Vec<String> {
    match words {
        Some(words) => words
            .into_iter()
            .map(|w| w.trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect(),
        None => fallback,
    }
}

/// Đếm số lần `word` xuất hiện (không chồng lấn) trong `text`
pub fn count_occurrences(text: &str, word: &str, mode: MatchMode) -> usize {
    if word.is_empty() {
        return 0;
    }

    match mode {
        MatchMode::Substring => text.matches(word).count(),
        MatchMode::WordBoundary => text
            .match_indices(word)
            .filter(|(start, _)| is_word_boundary(text, *start, *start + word.len()))
            .count(),
    }
}

/// Kiểm tra `word` có xuất hiện trong `text` hay không
pub fn contains(text: &str, word: &str, mode: MatchMode) -> bool {
    count_occurrences(text, word, mode) > 0
}

fn is_word_boundary(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.map_or(false, is_word_char) && !after.map_or(false, is_word_char)
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '\''
}
