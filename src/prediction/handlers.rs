//! 预测 API HTTP 处理器

use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::Instrument;

use super::router::PredictionState;
use super::service::HealthStatus;
use super::types::{ErrorResponse, FlightQuery, HealthResponse};

/// GET /
/// 服务描述信息
pub async fn root_info(State(state): State<PredictionState>) -> impl IntoResponse {
    Json(state.service.root_info())
}

/// GET /health
/// 模型未加载时返回 503
pub async fn health_check(State(state): State<PredictionState>) -> Response {
    match state.service.health() {
        HealthStatus::Healthy => Json(HealthResponse::healthy()).into_response(),
        HealthStatus::Unhealthy { message } => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse::unhealthy(message)),
        )
            .into_response(),
    }
}

const EXPECTED_JSON: &str = "Expected request with `Content-Type: application/json`";

/// `application/json` 或 `application/*+json`（忽略参数）
fn is_json_content_type(value: &str) -> bool {
    let essence = value.split(';').next().unwrap_or("").trim().to_ascii_lowercase();
    essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}

/// 解析预测请求体
///
/// 没有 Content-Type 时按 JSON 解析；声明了非 JSON 类型则拒绝
fn parse_query(headers: &HeaderMap, body: &Bytes) -> Result<FlightQuery, String> {
    if let Some(value) = headers.get(header::CONTENT_TYPE) {
        let json = value.to_str().map(is_json_content_type).unwrap_or(false);
        if !json {
            return Err(EXPECTED_JSON.to_string());
        }
    }

    Json::<FlightQuery>::from_bytes(body)
        .map(|Json(query)| query)
        .map_err(|rejection| rejection.body_text())
}

/// POST /predict
/// 请求体解析失败（缺字段、类型错误、非法 JSON、非 JSON 类型）统一返回 422
pub async fn predict(
    State(state): State<PredictionState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let request_id = uuid::Uuid::new_v4().to_string();
    let span = tracing::info_span!("predict", request_id = %request_id);

    async move {
        let query = match parse_query(&headers, &body) {
            Ok(query) => query,
            Err(detail) => {
                tracing::warn!("请求体校验失败: {}", detail);
                return (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(ErrorResponse::new(detail)),
                )
                    .into_response();
            }
        };

        #[cfg(feature = "sensitive-logs")]
        tracing::debug!(?query, "收到预测请求");
        #[cfg(not(feature = "sensitive-logs"))]
        tracing::info!(
            "收到预测请求: {} {} → {}",
            query.airline,
            query.source,
            query.destination
        );

        match state.service.predict(query).await {
            Ok(result) => {
                tracing::info!("预测成功: {:.2}", result.predicted_price);
                Json(result).into_response()
            }
            Err(e) => {
                tracing::error!("预测失败: {}", e);
                (e.status_code(), Json(e.into_response())).into_response()
            }
        }
    }
    .instrument(span)
    .await
}
