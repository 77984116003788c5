//! 预测服务客户端
//!
//! 终端客户端通过 HTTP 调用预测服务，失败时直接展示服务端原始错误文本，不重试

pub mod display;

use reqwest::{Client, StatusCode};

use crate::prediction::types::{FlightQuery, PredictionResult};

pub use display::{ClientSession, render_result};

/// 客户端错误
#[derive(Debug)]
pub enum ClientError {
    /// 服务端返回非 2xx 状态（附带原始响应体）
    Api { status: StatusCode, body: String },
    /// 网络错误或响应无法解析
    Transport(String),
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientError::Api { body, .. } => write!(f, "Error: {}", body),
            ClientError::Transport(message) => write!(f, "Failed to connect to API: {}", message),
        }
    }
}

impl std::error::Error for ClientError {}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        ClientError::Transport(format!("{:#}", anyhow::Error::new(e)))
    }
}

/// 预测服务客户端
pub struct FareClient {
    base_url: String,
    client: Client,
}

impl FareClient {
    pub fn new(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, client }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// 探测服务是否可用
    ///
    /// 网络错误和非 2xx 状态都视为不可用，不区分原因
    pub async fn check_reachability(&self) -> bool {
        let url = format!("{}/health", self.base_url);
        match self.client.get(&url).send().await {
            Ok(resp) => {
                if !resp.status().is_success() {
                    tracing::debug!("健康检查返回 HTTP {}", resp.status());
                }
                resp.status().is_success()
            }
            Err(e) => {
                tracing::debug!("健康检查请求失败: {}", e);
                false
            }
        }
    }

    /// 提交航班查询
    pub async fn submit(&self, query: &FlightQuery) -> Result<PredictionResult, ClientError> {
        let url = format!("{}/predict", self.base_url);
        let resp = self.client.post(&url).json(query).send().await?;

        let status = resp.status();
        if !status.is_success() {
            tracing::debug!("预测请求失败: HTTP {}", status);
            let body = resp.text().await?;
            return Err(ClientError::Api { status, body });
        }

        Ok(resp.json::<PredictionResult>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prediction::{PredictionService, PredictionState, create_router};
    use crate::scoring::{FeatureRow, ModelStatus, Scorer};
    use std::sync::Arc;

    struct FixedScorer(f64);

    impl Scorer for FixedScorer {
        fn score(&self, _row: &FeatureRow) -> anyhow::Result<f64> {
            Ok(self.0)
        }
    }

    struct FailingScorer;

    impl Scorer for FailingScorer {
        fn score(&self, _row: &FeatureRow) -> anyhow::Result<f64> {
            anyhow::bail!("feature names mismatch")
        }
    }

    /// 在随机端口启动预测服务，返回其地址
    async fn spawn_service(status: ModelStatus) -> String {
        let app = create_router(PredictionState::new(PredictionService::new(status, "1.0.0")));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn client_for(base_url: &str) -> FareClient {
        let client = Client::builder().no_proxy().build().unwrap();
        FareClient::new(base_url, client)
    }

    #[tokio::test]
    async fn test_submit_success() {
        let url = spawn_service(ModelStatus::Ready(Arc::new(FixedScorer(5000.0)))).await;
        let client = client_for(&url);

        assert!(client.check_reachability().await);
        let result = client.submit(&FlightQuery::example()).await.unwrap();

        assert_eq!(result.predicted_price, 5000.0);
        assert_eq!(result.confidence_interval.lower, 4500.0);
        assert_eq!(result.confidence_interval.upper, 5500.0);
        assert_eq!(result.input_data, FlightQuery::example());
    }

    #[tokio::test]
    async fn test_submit_surfaces_raw_error_body() {
        let url = spawn_service(ModelStatus::Ready(Arc::new(FailingScorer))).await;
        let err = client_for(&url)
            .submit(&FlightQuery::example())
            .await
            .unwrap_err();

        match &err {
            ClientError::Api { status, body } => {
                assert_eq!(*status, StatusCode::INTERNAL_SERVER_ERROR);
                assert_eq!(body, r#"{"detail":"Prediction failed: feature names mismatch"}"#);
            }
            other => panic!("期望 Api 错误，实际: {:?}", other),
        }
        assert!(err.to_string().starts_with("Error: {\"detail\""));
    }

    #[tokio::test]
    async fn test_unloaded_service_is_unreachable() {
        let url = spawn_service(ModelStatus::Unavailable("missing".to_string())).await;

        assert!(!client_for(&url).check_reachability().await);
    }

    #[tokio::test]
    async fn test_closed_port_is_transport_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = client_for(&format!("http://{}/", addr));
        assert!(!client.check_reachability().await);

        let err = client.submit(&FlightQuery::example()).await.unwrap_err();
        assert!(matches!(err, ClientError::Transport(_)));
        assert!(err.to_string().starts_with("Failed to connect to API:"));
    }

    #[tokio::test]
    async fn test_truncated_error_body_is_transport_error() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        // 声明的 Content-Length 大于实际发送的字节数，随后关闭连接
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];
            // 读完整个请求（JSON 请求体以 '}' 结尾）
            while !request.ends_with(b"}") {
                match socket.read(&mut buf).await {
                    Ok(0) | Err(_) => break,
                    Ok(n) => request.extend_from_slice(&buf[..n]),
                }
            }
            let _ = socket
                .write_all(
                    b"HTTP/1.1 500 Internal Server Error\r\n\
                      Content-Type: application/json\r\n\
                      Content-Length: 100\r\n\r\n{\"detail\":",
                )
                .await;
            let _ = socket.shutdown().await;
        });

        let err = client_for(&format!("http://{}", addr))
            .submit(&FlightQuery::example())
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::Transport(_)), "实际: {:?}", err);
        assert!(err.to_string().starts_with("Failed to connect to API:"));
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = client_for("http://localhost:8000/");
        assert_eq!(client.base_url(), "http://localhost:8000");
    }
}
