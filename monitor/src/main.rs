use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use brandpulse::{create_api_server, AppState, Config, SentimentService};
use brandpulse_common::{init_logging, LoggerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let loaded = Config::from_env();

    // Thiết lập logging
    let mut logger_config = LoggerConfig::default();
    if let Some(dir) = loaded.as_ref().ok().and_then(|c| c.log_dir.as_ref()) {
        logger_config = logger_config.with_log_dir(dir);
    }
    let _guard = init_logging(&logger_config).context("Không thể khởi tạo logging")?;

    info!("Khởi động BrandPulse v{}...", brandpulse::VERSION);

    let config = match loaded {
        Ok(config) => Arc::new(config),
        Err(e) => {
            warn!("Lỗi khi tải cấu hình: {}. Sử dụng cấu hình mặc định", e);
            Arc::new(Config::new())
        }
    };

    let service = SentimentService::from_config(&config)
        .context("Không thể khởi tạo sentiment service")?;
    info!("Bộ phân tích chính: {}", service.analyzer_name());

    let state = Arc::new(AppState::new(Arc::clone(&config), service));
    create_api_server(state).await.context("API server lỗi")?;

    info!("BrandPulse đã tắt thành công");
    Ok(())
}
