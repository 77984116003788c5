use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args as ClapArgs, Parser, Subcommand};

use crate::prediction::types::FlightQuery;

/// 航班价格预测服务与终端客户端
#[derive(Parser, Debug)]
#[command(name = "fare-rs", version, about)]
pub struct Args {
    /// 配置文件路径
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// 预测服务地址（覆盖配置文件中的 apiUrl）
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// 启动预测服务（默认）
    Serve(ServeArgs),
    /// 检查预测服务是否可用
    Health,
    /// 提交航班信息并显示预测价格
    Predict(PredictArgs),
    /// 打印示例航班查询（JSON）
    Example,
}

#[derive(ClapArgs, Debug, Default)]
pub struct ServeArgs {
    /// 监听地址
    #[arg(long)]
    pub host: Option<String>,

    /// 监听端口
    #[arg(short, long)]
    pub port: Option<u16>,

    /// 模型文件路径
    #[arg(short, long)]
    pub model: Option<PathBuf>,
}

#[derive(ClapArgs, Debug)]
pub struct PredictArgs {
    #[arg(long, default_value = "IndiGo")]
    pub airline: String,

    /// 出行日期（YYYY-MM-DD），按 DD/MM/YYYY 提交
    #[arg(long, conflicts_with = "date_of_journey")]
    pub date: Option<NaiveDate>,

    /// 出行日期原始字符串，原样提交
    #[arg(long)]
    pub date_of_journey: Option<String>,

    #[arg(long, default_value = "Banglore")]
    pub source: String,

    #[arg(long, default_value = "New Delhi")]
    pub destination: String,

    #[arg(long, default_value = "BLR → DEL")]
    pub route: String,

    #[arg(long, default_value = "22:20")]
    pub dep_time: String,

    #[arg(long, default_value = "01:10 22 Mar")]
    pub arrival_time: String,

    #[arg(long, default_value = "2h 50m")]
    pub duration: String,

    #[arg(long, default_value = "non-stop")]
    pub total_stops: String,

    #[arg(long, default_value = "No info")]
    pub additional_info: String,

    /// 输出原始 JSON 响应
    #[arg(long)]
    pub json: bool,
}

/// 日期格式与训练数据一致
pub const JOURNEY_DATE_FORMAT: &str = "%d/%m/%Y";

impl PredictArgs {
    /// 组装航班查询
    pub fn to_query(&self) -> FlightQuery {
        let date_of_journey = match (&self.date_of_journey, self.date) {
            (Some(raw), _) => raw.clone(),
            (None, Some(date)) => date.format(JOURNEY_DATE_FORMAT).to_string(),
            (None, None) => FlightQuery::example().date_of_journey,
        };

        FlightQuery {
            airline: self.airline.clone(),
            date_of_journey,
            source: self.source.clone(),
            destination: self.destination.clone(),
            route: self.route.clone(),
            dep_time: self.dep_time.clone(),
            arrival_time: self.arrival_time.clone(),
            duration: self.duration.clone(),
            total_stops: self.total_stops.clone(),
            additional_info: self.additional_info.clone(),
        }
    }
}
