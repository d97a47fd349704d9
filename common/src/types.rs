// Standard library imports
use std::time::{SystemTime, UNIX_EPOCH};

// Third party imports
use serde::{Deserialize, Serialize};

/// Cấu trúc phản hồi API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status: String,
    pub message: String,
    pub data: Option<T>,
    pub timestamp: u64,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: "success".to_string(),
            message: "Operation successful".to_string(),
            data: Some(data),
            timestamp: unix_timestamp(),
        }
    }
}

/// Cấu trúc lỗi API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub status: String,
    pub code: u16,
    pub error: String,
}

impl ApiErrorResponse {
    pub fn new(code: u16, error: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            code,
            error: error.into(),
        }
    }
}

/// Thời gian hiện tại (giây kể từ UNIX epoch)
pub fn unix_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

/// Module tests
#[cfg(test)]
mod tests {
    use super::*;

    /// Test ApiResponse::success
    #[test]
    fn test_api_response_success() {
        let response = ApiResponse::success(42);
        assert_eq!(response.status, "success");
        assert_eq!(response.data, Some(42));
        assert!(response.timestamp > 0);
    }

    /// Test serialize ApiErrorResponse
    #[test]
    fn test_api_error_response_json() {
        let body = serde_json::to_value(ApiErrorResponse::new(400, "Text is required")).unwrap();
        assert_eq!(body["status"], "error");
        assert_eq!(body["code"], 400);
        assert_eq!(body["error"], "Text is required");
    }
}
