//! # BrandPulse
//!
//! Dịch vụ theo dõi sentiment thương hiệu: chấm điểm mention theo lexicon,
//! phân loại mức ưu tiên/nhóm chủ đề và cung cấp qua HTTP API.
//!
//! ```
//! use brandpulse::sentiment::{classify, AuxiliarySignals, Emotion, KeywordScorer};
//!
//! let scorer = KeywordScorer::default();
//! let result = scorer.score("I love this, absolutely amazing and wonderful!");
//! assert_eq!(result.emotion, Emotion::Positive);
//!
//! let classification = classify(result.score, "I love this", &AuxiliarySignals::default());
//! println!("{:?}", classification.priority);
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod sentiment;
pub mod service;

// Re-exports
pub use api::{create_api_server, create_router, AppState};
pub use config::Config;
pub use error::{MonitorError, MonitorResult};
pub use service::SentimentService;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
