pub mod error;
pub mod logger;
pub mod types;

// Re-exports
pub use error::{CommonError, CommonResult};
pub use logger::{init_logging, LoggerConfig};
pub use types::{unix_timestamp, ApiErrorResponse, ApiResponse};
