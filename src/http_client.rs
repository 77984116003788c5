//! HTTP Client 构建模块
//!
//! Input: 应用配置（代理、超时）
//! Output: reqwest::Client
//! Pos: 终端客户端访问预测服务使用的 HTTP 客户端

use anyhow::Context;
use reqwest::{Client, Proxy};
use std::time::Duration;

use crate::model::config::Config;

/// 客户端 User-Agent
pub const USER_AGENT: &str = concat!("fare-rs/", env!("CARGO_PKG_VERSION"));

/// 按配置构建 HTTP Client
///
/// `proxyUrl` 支持 http://、https://、socks5:// 以及带认证信息的写法；
/// `requestTimeoutSecs` 为整个请求的超时时间，超时按传输错误处理，不重试。
pub fn build_client(config: &Config) -> anyhow::Result<Client> {
    let mut builder = Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(config.request_timeout_secs));

    if let Some(url) = config.proxy_url.as_deref() {
        let proxy = Proxy::all(url).with_context(|| format!("代理地址无效: {}", url))?;
        builder = builder.proxy(proxy);
        tracing::debug!("HTTP Client 使用代理: {}", url);
    }

    builder.build().context("构建 HTTP Client 失败")
}
