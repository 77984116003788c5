//! 航班价格预测 API
//!
//! 单一评分函数之上的请求/响应封装：校验请求体、调用评分、计算 ±10% 区间

pub mod error;
pub mod service;
pub mod types;
mod handlers;
mod router;

pub use router::{PredictionState, create_router};
pub use service::PredictionService;
