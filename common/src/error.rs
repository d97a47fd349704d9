// Standard library imports
use std::io;

// Third party imports
use thiserror::Error;

/// Lỗi chung
#[derive(Debug, Error)]
pub enum CommonError {
    /// Lỗi khởi tạo logger
    #[error("Logger error: {0}")]
    Logger(String),
    /// Lỗi I/O
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Kiểu kết quả chung
pub type CommonResult<T> = Result<T, CommonError>;
