mod client;
mod http_client;
mod model;
mod prediction;
mod scoring;
mod ui;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use client::{ClientSession, FareClient, render_result};
use model::arg::{Args, Command, PredictArgs, ServeArgs};
use model::config::Config;
use prediction::types::FlightQuery;
use prediction::{PredictionService, PredictionState, create_router};

#[tokio::main]
async fn main() -> ExitCode {
    // 解析命令行参数
    let args = Args::parse();

    // 日志写到 stderr，stdout 留给客户端输出
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(args).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> anyhow::Result<ExitCode> {
    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| Config::default_config_path().to_string());
    let mut config = Config::load(&config_path)
        .with_context(|| format!("加载配置失败: {}", config_path))?;
    if let Some(api_url) = args.api_url {
        config.api_url = api_url;
    }
    tracing::debug!("已加载配置: {:?}", config.config_path());

    match args.command.unwrap_or(Command::Serve(ServeArgs::default())) {
        Command::Serve(serve) => serve_api(config, serve).await,
        Command::Health => check_health(&config).await,
        Command::Predict(predict) => predict_price(&config, &predict).await,
        Command::Example => {
            println!("{}", serde_json::to_string_pretty(&FlightQuery::example())?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// 启动预测服务
async fn serve_api(mut config: Config, serve: ServeArgs) -> anyhow::Result<ExitCode> {
    if let Some(host) = serve.host {
        config.host = host;
    }
    if let Some(port) = serve.port {
        config.port = port;
    }
    if let Some(model) = serve.model {
        config.model_path = model;
    }

    // 模型只在启动时加载一次，失败时服务照常启动并报告不可用
    let status = scoring::load_model(&config.model_path);
    let service = PredictionService::new(status, config.model_version.clone());
    let app = create_router(PredictionState::new(service));

    let addr = config.bind_address();
    tracing::info!("启动预测服务: {}", addr);
    tracing::info!("可用端点:");
    tracing::info!("  GET  /         服务信息");
    tracing::info!("  GET  /health   健康检查");
    tracing::info!("  POST /predict  价格预测");
    tracing::info!("  GET  /ui       浏览器表单");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("绑定地址失败: {}", addr))?;
    axum::serve(listener, app).await.context("预测服务异常退出")?;
    Ok(ExitCode::SUCCESS)
}

/// 检查预测服务是否可用
async fn check_health(config: &Config) -> anyhow::Result<ExitCode> {
    let client = FareClient::new(&config.api_url, http_client::build_client(config)?);
    if client.check_reachability().await {
        println!("✅ API 已连接: {}", client.base_url());
        Ok(ExitCode::SUCCESS)
    } else {
        eprintln!("❌ API 未连接，请确认服务已在 {} 运行", client.base_url());
        Ok(ExitCode::FAILURE)
    }
}

/// 提交航班信息并显示预测结果
async fn predict_price(config: &Config, predict: &PredictArgs) -> anyhow::Result<ExitCode> {
    let client = FareClient::new(&config.api_url, http_client::build_client(config)?);

    // 服务不可用时直接退出，不发送注定失败的请求
    if !client.check_reachability().await {
        eprintln!("❌ API 未连接，请确认服务已在 {} 运行", client.base_url());
        return Ok(ExitCode::FAILURE);
    }

    let query = predict.to_query();
    let mut session = ClientSession::new();
    session.apply(client.submit(&query).await);

    if let Some(error) = session.last_error() {
        eprintln!("{}", error);
        return Ok(ExitCode::FAILURE);
    }

    match session.current() {
        Some(result) if predict.json => println!("{}", serde_json::to_string_pretty(result)?),
        Some(result) => println!("{}", render_result(result)),
        None => return Ok(ExitCode::FAILURE),
    }
    Ok(ExitCode::SUCCESS)
}
