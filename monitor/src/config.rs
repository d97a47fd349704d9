use std::env;
use std::fmt::Display;
use std::str::FromStr;

use dotenv::dotenv;
use serde::{Deserialize, Serialize};

use crate::error::{MonitorError, MonitorResult};
use crate::sentiment::{LlmConfig, MatchMode};
use crate::service::DEFAULT_BATCH_CONCURRENCY;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Config {
    // API
    pub api_host: String,
    pub api_port: u16,

    // Logging, None thì chỉ ghi ra stderr
    pub log_dir: Option<String>,

    // Lexicon
    pub lexicon_path: Option<String>,
    pub match_mode: MatchMode,

    // Giới hạn số item trong một request batch
    pub max_batch_size: usize,
    // Số item trong batch được phân tích cùng lúc
    pub batch_concurrency: usize,

    // LLM
    pub llm: LlmConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        Self {
            api_host: "0.0.0.0".to_string(),
            api_port: 8080,
            log_dir: None,
            lexicon_path: None,
            match_mode: MatchMode::Substring,
            max_batch_size: 100,
            batch_concurrency: DEFAULT_BATCH_CONCURRENCY,
            llm: LlmConfig::default(),
        }
    }

    /// Đọc cấu hình từ biến môi trường (có nạp file .env nếu có)
    pub fn from_env() -> MonitorResult<Self> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Đọc cấu hình từ một nguồn key/value bất kỳ
    pub fn from_lookup<F>(lookup: F) -> MonitorResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::new();
        let llm_defaults = LlmConfig::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Config {
            api_host: non_empty("API_HOST").unwrap_or(defaults.api_host),
            api_port: parse_or(&lookup, "API_PORT", defaults.api_port)?,
            log_dir: non_empty("LOG_DIR"),
            lexicon_path: non_empty("LEXICON_PATH"),
            match_mode: parse_or(&lookup, "MATCH_MODE", defaults.match_mode)?,
            max_batch_size: parse_or(&lookup, "MAX_BATCH_SIZE", defaults.max_batch_size)?,
            batch_concurrency: parse_or(&lookup, "BATCH_CONCURRENCY", defaults.batch_concurrency)?,
            llm: LlmConfig {
                api_key: non_empty("LLM_API_KEY"),
                base_url: non_empty("LLM_BASE_URL").unwrap_or(llm_defaults.base_url),
                model: non_empty("LLM_MODEL").unwrap_or(llm_defaults.model),
                max_tokens: parse_or(&lookup, "LLM_MAX_TOKENS", llm_defaults.max_tokens)?,
                temperature: parse_or(&lookup, "LLM_TEMPERATURE", llm_defaults.temperature)?,
                timeout_secs: parse_or(&lookup, "LLM_TIMEOUT_SECS", llm_defaults.timeout_secs)?,
            },
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.api_host, self.api_port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> MonitorResult<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|e| MonitorError::Config(format!("{} không hợp lệ ({}): {}", key, raw, e))),
        _ => Ok(default),
    }
}
