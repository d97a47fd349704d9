//! # LLM Analyzer
//!
//! Gọi endpoint chat completion tương thích OpenAI, yêu cầu trả về JSON và
//! kiểm tra schema trước khi chấp nhận kết quả.

// Standard library imports
use std::time::Duration;

// Third party imports
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

// Internal imports
use super::analyzer::SentimentAnalyzer;
use super::types::{Emotion, SentimentResult};
use crate::error::{MonitorError, MonitorResult};

const SYSTEM_PROMPT: &str = "You are a brand sentiment analyst. Read the social media post or \
customer message and answer with a single JSON object with the keys: \
\"score\" (number from -1 to 1), \"emotion\" (one of \"positive\", \"negative\", \"neutral\", \"mixed\"), \
\"confidence\" (number from 0 to 1), \"reasoning\" (one short sentence) and \"keywords\" (array of strings). \
Do not add any other text.";

/// Cấu hình client LLM
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmConfig {
    /// API key, không có thì không dùng LLM
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            max_tokens: 400,
            temperature: 0.1,
            timeout_secs: 20,
        }
    }
}

impl LlmConfig {
    pub fn is_enabled(&self) -> bool {
        self.api_key.as_deref().map_or(false, |key| !key.trim().is_empty())
    }
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
    response_format: ResponseFormat,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

/// Schema JSON mà LLM phải trả về
#[derive(Debug, Deserialize)]
struct LlmSentimentPayload {
    score: f64,
    emotion: String,
    confidence: f64,
    #[serde(default)]
    reasoning: String,
    #[serde(default)]
    keywords: Vec<String>,
}

/// Bộ phân tích sentiment qua LLM
#[derive(Debug, Clone)]
pub struct LlmAnalyzer {
    config: LlmConfig,
    api_key: String,
    client: Client,
}

impl LlmAnalyzer {
    pub fn new(config: LlmConfig) -> MonitorResult<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or(MonitorError::MissingApiKey)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            config,
            api_key,
            client,
        })
    }

    pub fn config(&self) -> &LlmConfig {
        &self.config
    }

    fn build_request(&self, text: &str) -> ChatRequest {
        ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: format!("Analyze the sentiment of this text:\n\n{}", text),
                },
            ],
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
            response_format: ResponseFormat {
                kind: "json_object",
            },
        }
    }
}

#[async_trait]
impl SentimentAnalyzer for LlmAnalyzer {
    fn name(&self) -> &'static str {
        "llm"
    }

    async fn analyze(&self, text: &str) -> MonitorResult<SentimentResult> {
        let url = format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'));
        debug!("Gửi yêu cầu phân tích tới {}", url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&self.build_request(text))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MonitorError::LlmApi {
                status: status.as_u16(),
                body,
            });
        }

        let chat: ChatResponse = response.json().await?;
        let content = chat
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| MonitorError::InvalidLlmResponse("không có nội dung".to_string()))?;

        parse_llm_content(&content)
    }
}

/// Parse và kiểm tra nội dung JSON do LLM trả về
pub fn parse_llm_content(content: &str) -> MonitorResult<SentimentResult> {
    let json = strip_code_fence(content);
    let payload: LlmSentimentPayload = serde_json::from_str(json)
        .map_err(|e| MonitorError::InvalidLlmResponse(format!("JSON sai schema: {}", e)))?;

    if !payload.score.is_finite() || !(-1.0..=1.0).contains(&payload.score) {
        return Err(MonitorError::InvalidLlmResponse(format!(
            "score ngoài khoảng [-1, 1]: {}",
            payload.score
        )));
    }
    if !payload.confidence.is_finite() || !(0.0..=1.0).contains(&payload.confidence) {
        return Err(MonitorError::InvalidLlmResponse(format!(
            "confidence ngoài khoảng [0, 1]: {}",
            payload.confidence
        )));
    }
    let emotion = Emotion::parse(&payload.emotion).ok_or_else(|| {
        MonitorError::InvalidLlmResponse(format!("emotion không hợp lệ: {}", payload.emotion))
    })?;

    Ok(SentimentResult {
        score: payload.score,
        emotion,
        confidence: payload.confidence,
        reasoning: payload.reasoning,
        keywords: payload.keywords,
    })
}

fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    match trimmed.strip_prefix("```") {
        Some(rest) => {
            // bỏ nhãn ngôn ngữ, ví dụ ```json
            let body = rest.split_once('\n').map_or("", |(_, body)| body);
            body.trim_end().trim_end_matches("```").trim()
        }
        None => trimmed,
    }
}
