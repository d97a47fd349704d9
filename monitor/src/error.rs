use thiserror::Error;

#[derive(Error, Debug)]
pub enum MonitorError {
    #[error("Lỗi cấu hình: {0}")]
    Config(String),

    #[error("Lỗi lexicon: {0}")]
    Lexicon(String),

    #[error("Lỗi HTTP: {0}")]
    Http(#[from] reqwest::Error),

    #[error("LLM API trả về status {status}: {body}")]
    LlmApi { status: u16, body: String },

    #[error("Phản hồi LLM không hợp lệ: {0}")]
    InvalidLlmResponse(String),

    #[error("Thiếu API key cho LLM")]
    MissingApiKey,

    #[error("Lỗi I/O: {0}")]
    Io(#[from] std::io::Error),
}

pub type MonitorResult<T> = Result<T, MonitorError>;
