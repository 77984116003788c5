//! 预测服务业务逻辑

use crate::scoring::ModelStatus;

use super::error::PredictionError;
use super::types::{FlightQuery, PredictionResult, ServiceInfo};

pub const SERVICE_NAME: &str = "Flight Price Prediction API";

/// 健康状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    Healthy,
    Unhealthy { message: String },
}

/// 预测服务
///
/// 持有启动时确定的模型状态，请求之间不共享可变数据
pub struct PredictionService {
    status: ModelStatus,
    version: String,
}

impl PredictionService {
    pub fn new(status: ModelStatus, version: impl Into<String>) -> Self {
        Self {
            status,
            version: version.into(),
        }
    }

    /// 服务描述信息
    pub fn root_info(&self) -> ServiceInfo {
        let loaded = self.status.is_loaded();
        ServiceInfo {
            service: SERVICE_NAME.to_string(),
            version: self.version.clone(),
            status: if loaded { "active" } else { "inactive" }.to_string(),
            model_loaded: loaded,
        }
    }

    /// 健康检查
    pub fn health(&self) -> HealthStatus {
        if self.status.is_loaded() {
            HealthStatus::Healthy
        } else {
            HealthStatus::Unhealthy {
                message: PredictionError::ServiceUnavailable.to_string(),
            }
        }
    }

    /// 预测单个航班的价格
    ///
    /// 评分在阻塞线程池中执行；评分失败只影响本次请求
    pub async fn predict(&self, query: FlightQuery) -> Result<PredictionResult, PredictionError> {
        let scorer = self
            .status
            .scorer()
            .cloned()
            .ok_or(PredictionError::ServiceUnavailable)?;

        let row = query.to_feature_row();
        let outcome = tokio::task::spawn_blocking(move || scorer.score(&row)).await;

        // NaN / inf 无法编码为 JSON 数字，按评分失败处理
        match outcome {
            Ok(Ok(price)) if !price.is_finite() => Err(PredictionError::PredictionFailed(
                format!("non-finite prediction: {}", price),
            )),
            Ok(Ok(price)) => Ok(PredictionResult::new(price, query)),
            Ok(Err(e)) => Err(PredictionError::PredictionFailed(format!("{:#}", e))),
            Err(e) => Err(PredictionError::PredictionFailed(e.to_string())),
        }
    }
}
