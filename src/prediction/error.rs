//! 预测服务错误类型

use axum::http::StatusCode;

use super::types::ErrorResponse;

/// 预测服务错误
#[derive(Debug)]
pub enum PredictionError {
    /// 模型未加载
    ServiceUnavailable,
    /// 评分函数执行失败（附带底层错误信息）
    PredictionFailed(String),
}

impl std::fmt::Display for PredictionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PredictionError::ServiceUnavailable => write!(f, "Model not loaded"),
            PredictionError::PredictionFailed(message) => {
                write!(f, "Prediction failed: {}", message)
            }
        }
    }
}

impl std::error::Error for PredictionError {}

impl PredictionError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            PredictionError::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            PredictionError::PredictionFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn into_response(self) -> ErrorResponse {
        ErrorResponse::new(self.to_string())
    }
}
