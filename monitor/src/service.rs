// Standard library imports
use std::sync::Arc;

// Third party imports
use futures::future::{BoxFuture, FutureExt};
use futures::stream::{self, StreamExt};
use tracing::{debug, info, warn};

// Internal imports
use crate::config::Config;
use crate::error::MonitorResult;
use crate::sentiment::{
    classify, AnalysisInput, AnalysisReport, AnalysisSource, Category, ClassificationResult,
    Emotion, KeywordScorer, Lexicon, LlmAnalyzer, Priority, SentimentAnalyzer, SentimentResult,
};

/// Số mention của một batch được phân tích đồng thời
pub const DEFAULT_BATCH_CONCURRENCY: usize = 8;

/// Dịch vụ phân tích mention.
///
/// Thử bộ phân tích chính (LLM) trước, lỗi thì dùng bộ chấm theo từ khóa.
/// `analyze` không bao giờ trả lỗi.
pub struct SentimentService {
    primary: Option<Arc<dyn SentimentAnalyzer>>,
    scorer: KeywordScorer,
    batch_concurrency: usize,
}

impl SentimentService {
    pub fn new(scorer: KeywordScorer) -> Self {
        Self {
            primary: None,
            scorer,
            batch_concurrency: DEFAULT_BATCH_CONCURRENCY,
        }
    }

    /// Đặt bộ phân tích chính
    pub fn with_primary(mut self, analyzer: Arc<dyn SentimentAnalyzer>) -> Self {
        self.primary = Some(analyzer);
        self
    }

    /// Giới hạn số mention chạy đồng thời trong `analyze_batch`, tối thiểu 1
    pub fn with_batch_concurrency(mut self, limit: usize) -> Self {
        self.batch_concurrency = limit.max(1);
        self
    }

    /// Tạo service từ cấu hình
    pub fn from_config(config: &Config) -> MonitorResult<Self> {
        let lexicon = match &config.lexicon_path {
            Some(path) => Arc::new(Lexicon::from_json_file(path)?),
            None => Lexicon::shared(),
        };
        let service = Self::new(KeywordScorer::new(lexicon, config.match_mode))
            .with_batch_concurrency(config.batch_concurrency);

        if config.llm.is_enabled() {
            let llm = LlmAnalyzer::new(config.llm.clone())?;
            info!("Bật phân tích qua LLM, model {}", config.llm.model);
            Ok(service.with_primary(Arc::new(llm)))
        } else {
            info!("Không có LLM_API_KEY, chỉ dùng bộ chấm theo từ khóa");
            Ok(service)
        }
    }

    /// Tên bộ phân tích đang được ưu tiên
    pub fn analyzer_name(&self) -> &'static str {
        match &self.primary {
            Some(primary) => primary.name(),
            None => SentimentAnalyzer::name(&self.scorer),
        }
    }

    /// Phân tích một mention
    pub async fn analyze(&self, input: &AnalysisInput) -> AnalysisReport {
        let (sentiment, source) = self.score(&input.text).await;
        let classification = classify(sentiment.score, &input.text, &input.signals);

        debug!(
            "Mention: emotion={} score={:.2} priority={:?} category={:?}",
            sentiment.emotion, sentiment.score, classification.priority, classification.category
        );

        AnalysisReport {
            sentiment,
            classification,
            source,
        }
    }

    /// Phân tích nhiều mention, giữ nguyên thứ tự.
    ///
    /// Tối đa `batch_concurrency` mention được phân tích cùng lúc.
    pub async fn analyze_batch(&self, inputs: &[AnalysisInput]) -> Vec<AnalysisReport> {
        let futures: Vec<BoxFuture<'_, AnalysisReport>> =
            inputs.iter().map(|input| self.analyze(input).boxed()).collect();
        stream::iter(futures)
            .buffered(self.batch_concurrency)
            .collect()
            .await
    }

    async fn score(&self, text: &str) -> (SentimentResult, AnalysisSource) {
        if let Some(primary) = &self.primary {
            match primary.analyze(text).await {
                Ok(result) => return (result, AnalysisSource::Llm),
                Err(e) => warn!(
                    "Bộ phân tích {} lỗi, chuyển sang chấm theo từ khóa: {}",
                    primary.name(),
                    e
                ),
            }
        }
        (self.scorer.score(text), AnalysisSource::Keyword)
    }
}

/// Kết quả trung tính trả về khi xử lý request thất bại
pub fn fallback_result(reason: &str) -> SentimentResult {
    SentimentResult {
        score: 0.0,
        emotion: Emotion::Neutral,
        confidence: 0.5,
        reasoning: format!("Fallback analysis used: {}", reason),
        keywords: Vec::new(),
    }
}

/// Báo cáo trung tính đầy đủ cho trường hợp fallback
pub fn fallback_report(reason: &str) -> AnalysisReport {
    AnalysisReport {
        sentiment: fallback_result(reason),
        classification: ClassificationResult {
            priority: Priority::Low,
            category: Category::Brand,
            brand_mentions: Vec::new(),
            competitor_mentions: Vec::new(),
        },
        source: AnalysisSource::Fallback,
    }
}

/// Module tests
#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;

    use crate::error::MonitorError;
    use crate::sentiment::{AuxiliarySignals, MatchMode, MockSentimentAnalyzer};

    /// Analyzer chậm, ghi lại số lời gọi chạy cùng lúc nhiều nhất
    #[derive(Default)]
    struct SlowAnalyzer {
        in_flight: AtomicUsize,
        peak: AtomicUsize,
    }

    #[async_trait]
    impl SentimentAnalyzer for SlowAnalyzer {
        fn name(&self) -> &'static str {
            "slow"
        }

        async fn analyze(&self, text: &str) -> MonitorResult<SentimentResult> {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            Ok(SentimentResult {
                score: 0.0,
                emotion: Emotion::Neutral,
                confidence: 0.8,
                reasoning: text.to_string(),
                keywords: Vec::new(),
            })
        }
    }

    fn keyword_service() -> SentimentService {
        SentimentService::new(KeywordScorer::default())
    }

    fn llm_result() -> SentimentResult {
        SentimentResult {
            score: 0.65,
            emotion: Emotion::Positive,
            confidence: 0.9,
            reasoning: "model says positive".to_string(),
            keywords: vec!["launch".to_string()],
        }
    }

    /// Test chuỗi rỗng
    #[tokio::test]
    async fn test_empty_text_report() {
        let report = keyword_service().analyze(&AnalysisInput::new("")).await;
        assert_eq!(report.sentiment.score, 0.0);
        assert_eq!(report.sentiment.emotion, Emotion::Neutral);
        assert_eq!(report.classification.priority, Priority::Low);
        assert_eq!(report.classification.category, Category::Brand);
        assert_eq!(report.source, AnalysisSource::Keyword);
    }

    /// Test negation + category product
    #[tokio::test]
    async fn test_negated_product_mention() {
        let report = keyword_service()
            .analyze(&AnalysisInput::new("I do not love this product"))
            .await;
        assert_eq!(report.sentiment.emotion, Emotion::Negative);
        assert!((report.sentiment.score + 0.4).abs() < 1e-9);
        assert_eq!(report.classification.priority, Priority::Medium);
        assert_eq!(report.classification.category, Category::Product);
    }

    /// Test opportunity với competitor
    #[tokio::test]
    async fn test_competitor_opportunity() {
        let input = AnalysisInput::new("Switching from RivalCo was amazing, I recommend it")
            .with_signals(AuxiliarySignals {
                competitor_keywords: vec!["rivalco".to_string()],
                ..Default::default()
            });
        let report = keyword_service().analyze(&input).await;
        assert!(report.sentiment.score > 0.5);
        assert_eq!(report.classification.category, Category::Opportunity);
        assert_eq!(report.classification.competitor_mentions, vec!["rivalco"]);
    }

    /// Test viral potential
    #[tokio::test]
    async fn test_viral_mention_is_critical() {
        let input = AnalysisInput::new("Just saw this brand on my feed").with_signals(
            AuxiliarySignals {
                viral_potential: Some(0.85),
                ..Default::default()
            },
        );
        let report = keyword_service().analyze(&input).await;
        assert!(report.sentiment.score.abs() < 0.1);
        assert_eq!(report.classification.priority, Priority::Critical);
    }

    /// Test dùng kết quả của bộ phân tích chính
    #[tokio::test]
    async fn test_primary_result_used() {
        let mut mock = MockSentimentAnalyzer::new();
        mock.expect_analyze().times(1).returning(|_| Ok(llm_result()));
        mock.expect_name().return_const("llm");

        let service = keyword_service().with_primary(Arc::new(mock));
        assert_eq!(service.analyzer_name(), "llm");

        let report = service.analyze(&AnalysisInput::new("new launch")).await;
        assert_eq!(report.source, AnalysisSource::Llm);
        assert_eq!(report.sentiment, llm_result());
        assert_eq!(report.classification.priority, Priority::High);
    }

    /// Test fallback khi bộ phân tích chính lỗi
    #[tokio::test]
    async fn test_primary_failure_falls_back_to_keywords() {
        let mut mock = MockSentimentAnalyzer::new();
        mock.expect_analyze()
            .times(1)
            .returning(|_| Err(MonitorError::InvalidLlmResponse("not json".to_string())));
        mock.expect_name().return_const("llm");

        let service = keyword_service().with_primary(Arc::new(mock));
        let report = service.analyze(&AnalysisInput::new("I hate this")).await;
        assert_eq!(report.source, AnalysisSource::Keyword);
        assert_eq!(report.sentiment.emotion, Emotion::Negative);
    }

    /// Test batch giữ thứ tự
    #[tokio::test]
    async fn test_batch_preserves_order() {
        let inputs = vec![
            AnalysisInput::new("I love it"),
            AnalysisInput::new(""),
            AnalysisInput::new("I hate it"),
        ];
        let reports = keyword_service().analyze_batch(&inputs).await;
        let emotions: Vec<Emotion> = reports.iter().map(|r| r.sentiment.emotion).collect();
        assert_eq!(emotions, vec![Emotion::Positive, Emotion::Neutral, Emotion::Negative]);
    }

    /// Test batch chạy đồng thời có giới hạn, vẫn giữ thứ tự
    #[tokio::test]
    async fn test_batch_runs_concurrently_within_limit() {
        let analyzer = Arc::new(SlowAnalyzer::default());
        let service = keyword_service()
            .with_primary(Arc::clone(&analyzer) as Arc<dyn SentimentAnalyzer>)
            .with_batch_concurrency(3);

        let inputs: Vec<AnalysisInput> =
            (0..10).map(|i| AnalysisInput::new(format!("mention {}", i))).collect();
        let reports = service.analyze_batch(&inputs).await;

        let reasons: Vec<&str> = reports.iter().map(|r| r.sentiment.reasoning.as_str()).collect();
        let expected: Vec<String> = (0..10).map(|i| format!("mention {}", i)).collect();
        assert_eq!(reasons, expected);

        let peak = analyzer.peak.load(Ordering::SeqCst);
        assert!(peak > 1, "batch ran sequentially");
        assert!(peak <= 3, "peak {} exceeds limit", peak);
    }

    /// Test giới hạn đồng thời tối thiểu là 1
    #[tokio::test]
    async fn test_zero_batch_concurrency_still_runs() {
        let service = keyword_service().with_batch_concurrency(0);
        let reports = service.analyze_batch(&[AnalysisInput::new("I love it")]).await;
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].sentiment.emotion, Emotion::Positive);
    }

    /// Test tạo service từ cấu hình
    #[test]
    fn test_from_config() {
        let service = SentimentService::from_config(&Config::new()).unwrap();
        assert_eq!(service.analyzer_name(), "keyword");

        let mut config = Config::new();
        config.llm.api_key = Some("sk-test".to_string());
        config.match_mode = MatchMode::WordBoundary;
        let service = SentimentService::from_config(&config).unwrap();
        assert_eq!(service.analyzer_name(), "llm");

        config.lexicon_path = Some("/nonexistent/lexicon.json".to_string());
        assert!(SentimentService::from_config(&config).is_err());
    }

    /// Test fallback report
    #[test]
    fn test_fallback_report() {
        let report = fallback_report("invalid JSON body");
        assert_eq!(report.sentiment.score, 0.0);
        assert_eq!(report.sentiment.emotion, Emotion::Neutral);
        assert_eq!(report.sentiment.confidence, 0.5);
        assert!(report.sentiment.reasoning.contains("invalid JSON body"));
        assert_eq!(report.source, AnalysisSource::Fallback);
    }
}
