// Third party imports
use async_trait::async_trait;

// Internal imports
use super::scorer::KeywordScorer;
use super::types::SentimentResult;
use crate::error::MonitorResult;

/// Interface cho các bộ phân tích sentiment
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SentimentAnalyzer: Send + Sync + 'static {
    /// Tên bộ phân tích, dùng cho log và health check
    fn name(&self) -> &'static str;

    /// Phân tích sentiment
    async fn analyze(&self, text: &str) -> MonitorResult<SentimentResult>;
}

#[async_trait]
impl SentimentAnalyzer for KeywordScorer {
    fn name(&self) -> &'static str {
        "keyword"
    }

    async fn analyze(&self, text: &str) -> MonitorResult<SentimentResult> {
        Ok(self.score(text))
    }
}
