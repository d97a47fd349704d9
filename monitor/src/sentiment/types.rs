// Standard library imports
use std::fmt;

// Third party imports
use serde::{Deserialize, Serialize};

/// Cảm xúc tổng thể của một đoạn text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Positive,
    Negative,
    Neutral,
    Mixed,
}

impl Emotion {
    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Positive => "positive",
            Emotion::Negative => "negative",
            Emotion::Neutral => "neutral",
            Emotion::Mixed => "mixed",
        }
    }

    /// Parse nhãn cảm xúc (không phân biệt hoa thường)
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "positive" => Some(Emotion::Positive),
            "negative" => Some(Emotion::Negative),
            "neutral" => Some(Emotion::Neutral),
            "mixed" => Some(Emotion::Mixed),
            _ => None,
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mức độ ưu tiên xử lý
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

/// Nhóm chủ đề của mention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Product,
    Service,
    Brand,
    Campaign,
    Crisis,
    Opportunity,
}

/// Tín hiệu phụ đi kèm text
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuxiliarySignals {
    /// Khả năng lan truyền, trong [0, 1]
    #[serde(default)]
    pub viral_potential: Option<f64>,
    #[serde(default)]
    pub brand_keywords: Vec<String>,
    #[serde(default)]
    pub competitor_keywords: Vec<String>,
}

/// Đầu vào cho một lần phân tích
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisInput {
    pub text: String,
    #[serde(default)]
    pub signals: AuxiliarySignals,
}

impl AnalysisInput {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            signals: AuxiliarySignals::default(),
        }
    }

    pub fn with_signals(mut self, signals: AuxiliarySignals) -> Self {
        self.signals = signals;
        self
    }
}

/// Kết quả chấm điểm sentiment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    /// Điểm trong [-1, 1]; bộ chấm theo từ khóa luôn cho [-0.9, 0.9]
    pub score: f64,
    pub emotion: Emotion,
    /// Độ tin cậy trong [0, 1]
    pub confidence: f64,
    pub reasoning: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// Kết quả phân loại
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    pub priority: Priority,
    pub category: Category,
    pub brand_mentions: Vec<String>,
    pub competitor_mentions: Vec<String>,
}

/// Nguồn tạo ra kết quả sentiment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisSource {
    Keyword,
    Llm,
    Fallback,
}

/// Báo cáo đầy đủ cho một mention
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub sentiment: SentimentResult,
    pub classification: ClassificationResult,
    pub source: AnalysisSource,
}
