//! 预测 API 路由配置

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use super::handlers::{health_check, predict, root_info};
use super::service::PredictionService;

/// 预测 API 共享状态
#[derive(Clone)]
pub struct PredictionState {
    pub service: Arc<PredictionService>,
}

impl PredictionState {
    pub fn new(service: PredictionService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

/// CORS 中间层
///
/// 允许任意来源、方法和请求头，浏览器表单可以从其他端口直接调用
pub fn cors_layer() -> tower_http::cors::CorsLayer {
    use tower_http::cors::{Any, CorsLayer};

    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// 创建预测服务路由
///
/// # 端点
/// - `GET /` - 服务描述信息
/// - `GET /health` - 健康检查
/// - `POST /predict` - 预测航班价格
/// - `GET /ui` - 内嵌的浏览器表单
pub fn create_router(state: PredictionState) -> Router {
    Router::new()
        .route("/", get(root_info))
        .route("/health", get(health_check))
        .route("/predict", post(predict))
        .with_state(state)
        .merge(crate::ui::create_ui_router())
        .layer(cors_layer())
}
