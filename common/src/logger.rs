// Standard library imports
use std::path::PathBuf;

// Third party imports
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

// Internal imports
use crate::error::{CommonError, CommonResult};

/// Cấu hình logger
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Filter mặc định khi không có RUST_LOG
    pub default_filter: String,
    /// Thư mục ghi log file, `None` thì chỉ ghi ra stderr
    pub log_dir: Option<PathBuf>,
    /// Tiền tố tên file log
    pub file_prefix: String,
    /// Bật màu ANSI cho stderr
    pub ansi: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            default_filter: "info".to_string(),
            log_dir: None,
            file_prefix: "brandpulse.log".to_string(),
            ansi: true,
        }
    }
}

impl LoggerConfig {
    /// Tạo cấu hình ghi thêm ra file theo ngày
    pub fn with_log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.log_dir = Some(dir.into());
        self
    }
}

/// Khởi tạo tracing subscriber toàn cục.
///
/// Luôn ghi ra stderr; nếu có `log_dir` thì ghi thêm file xoay vòng theo ngày
/// qua writer non-blocking. Guard trả về phải được giữ sống tới khi tắt
/// chương trình, nếu không log file sẽ bị mất.
pub fn init_logging(config: &LoggerConfig) -> CommonResult<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_filter));

    let stderr_layer = fmt::Layer::new()
        .with_writer(std::io::stderr)
        .with_ansi(config.ansi);

    let (file_layer, guard) = match &config.log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let file_appender = RollingFileAppender::new(Rotation::DAILY, dir, &config.file_prefix);
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = fmt::Layer::new()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_span_events(FmtSpan::CLOSE);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| CommonError::Logger(e.to_string()))?;

    Ok(guard)
}

/// Module tests
#[cfg(test)]
mod tests {
    use super::*;

    /// Test LoggerConfig mặc định
    #[test]
    fn test_logger_config_default() {
        let config = LoggerConfig::default();
        assert_eq!(config.default_filter, "info");
        assert!(config.log_dir.is_none());
        assert!(config.ansi);
    }

    /// Test khởi tạo logger có thư mục file
    #[test]
    fn test_init_logging_creates_log_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("logs");
        let config = LoggerConfig::default().with_log_dir(&dir);

        let result = init_logging(&config);
        assert!(dir.exists());
        assert!(result.is_ok());
        assert!(result.unwrap().is_some());
    }
}
