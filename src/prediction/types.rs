//! 预测 API 类型定义

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::scoring::FeatureRow;

/// 航班查询的十个字段名（声明顺序，大小写敏感）
pub const FLIGHT_COLUMNS: [&str; 10] = [
    "Airline",
    "Date_of_Journey",
    "Source",
    "Destination",
    "Route",
    "Dep_Time",
    "Arrival_Time",
    "Duration",
    "Total_Stops",
    "Additional_Info",
];

// ============ 请求 ============

/// 航班查询
///
/// 十个字段均为必填字符串，服务端不做格式校验
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightQuery {
    #[serde(rename = "Airline")]
    pub airline: String,
    #[serde(rename = "Date_of_Journey")]
    pub date_of_journey: String,
    #[serde(rename = "Source")]
    pub source: String,
    #[serde(rename = "Destination")]
    pub destination: String,
    #[serde(rename = "Route")]
    pub route: String,
    #[serde(rename = "Dep_Time")]
    pub dep_time: String,
    #[serde(rename = "Arrival_Time")]
    pub arrival_time: String,
    #[serde(rename = "Duration")]
    pub duration: String,
    #[serde(rename = "Total_Stops")]
    pub total_stops: String,
    #[serde(rename = "Additional_Info")]
    pub additional_info: String,
}

impl FlightQuery {
    /// 示例航班（班加罗尔 → 新德里）
    pub fn example() -> Self {
        Self {
            airline: "IndiGo".to_string(),
            date_of_journey: "24/03/2019".to_string(),
            source: "Banglore".to_string(),
            destination: "New Delhi".to_string(),
            route: "BLR → DEL".to_string(),
            dep_time: "22:20".to_string(),
            arrival_time: "01:10 22 Mar".to_string(),
            duration: "2h 50m".to_string(),
            total_stops: "non-stop".to_string(),
            additional_info: "No info".to_string(),
        }
    }

    /// 转换为单行特征表，列顺序与 [`FLIGHT_COLUMNS`] 一致
    pub fn to_feature_row(&self) -> FeatureRow {
        let values = [
            &self.airline,
            &self.date_of_journey,
            &self.source,
            &self.destination,
            &self.route,
            &self.dep_time,
            &self.arrival_time,
            &self.duration,
            &self.total_stops,
            &self.additional_info,
        ];
        FeatureRow::new(
            FLIGHT_COLUMNS
                .iter()
                .zip(values)
                .map(|(name, value)| (*name, value.clone()))
                .collect(),
        )
    }
}

// ============ 响应 ============

/// 置信区间（固定 ±10%，不是统计意义上的区间）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    pub lower: f64,
    pub upper: f64,
}

impl ConfidenceInterval {
    pub fn around(price: f64) -> Self {
        Self {
            lower: price * 0.9,
            upper: price * 1.1,
        }
    }

    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

/// 预测结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub predicted_price: f64,
    pub confidence_interval: ConfidenceInterval,
    pub input_data: FlightQuery,
    #[serde(default)]
    pub feature_importance: BTreeMap<String, f64>,
}

impl PredictionResult {
    pub fn new(predicted_price: f64, input_data: FlightQuery) -> Self {
        Self {
            predicted_price,
            confidence_interval: ConfidenceInterval::around(predicted_price),
            input_data,
            feature_importance: BTreeMap::new(),
        }
    }
}

/// GET / 响应
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub service: String,
    pub version: String,
    pub status: String,
    pub model_loaded: bool,
}

/// GET /health 响应
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_loaded: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            model_loaded: Some(true),
            message: None,
        }
    }

    pub fn unhealthy(message: impl Into<String>) -> Self {
        Self {
            status: "unhealthy".to_string(),
            model_loaded: None,
            message: Some(message.into()),
        }
    }
}

/// 错误响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

impl ErrorResponse {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}
