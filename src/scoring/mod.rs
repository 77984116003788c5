//! 评分模块
//!
//! 预测服务只通过 [`Scorer`] 访问模型，具体后端可以随意替换。
//! 启动时调用 [`load_model`] 一次，得到不可变的 [`ModelStatus`]。

pub mod linear;

use std::fmt;
use std::path::Path;
use std::sync::Arc;

pub use linear::LinearModel;

/// 单行特征表
///
/// 按列声明顺序保存 `(列名, 值)`，不做任何类型转换
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureRow {
    columns: Vec<(&'static str, String)>,
}

impl FeatureRow {
    pub fn new(columns: Vec<(&'static str, String)>) -> Self {
        Self { columns }
    }

    /// 按列名取值
    pub fn get(&self, column: &str) -> Option<&str> {
        self.columns
            .iter()
            .find(|(name, _)| *name == column)
            .map(|(_, value)| value.as_str())
    }

    /// 列名（声明顺序）
    pub fn column_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.columns.iter().map(|(name, _)| *name)
    }
}

/// 评分函数 trait
///
/// 输入一行特征，返回预测价格。内部预处理要求对调用方不透明，
/// 任何不满足要求的输入都应以错误返回，而不是 panic。
pub trait Scorer: Send + Sync {
    fn score(&self, row: &FeatureRow) -> anyhow::Result<f64>;
}

/// 模型加载状态
///
/// 进程启动时确定一次，之后只读
#[derive(Clone)]
pub enum ModelStatus {
    /// 模型可用
    Ready(Arc<dyn Scorer>),
    /// 模型加载失败（附带原因）
    Unavailable(String),
}

impl ModelStatus {
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    pub fn scorer(&self) -> Option<&Arc<dyn Scorer>> {
        match self {
            Self::Ready(scorer) => Some(scorer),
            Self::Unavailable(_) => None,
        }
    }
}

impl fmt::Debug for ModelStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ready(_) => f.write_str("Ready"),
            Self::Unavailable(reason) => f.debug_tuple("Unavailable").field(reason).finish(),
        }
    }
}

/// 尝试从文件加载模型
///
/// 失败不会终止进程：服务照常启动，并通过 `/health` 报告不可用
pub fn load_model<P: AsRef<Path>>(path: P) -> ModelStatus {
    let path = path.as_ref();
    match LinearModel::from_path(path) {
        Ok(model) => {
            tracing::info!(
                "模型加载成功: {} ({} 个加权列)",
                path.display(),
                model.weighted_columns()
            );
            ModelStatus::Ready(Arc::new(model))
        }
        Err(e) => {
            let reason = format!("{:#}", e);
            tracing::error!("模型加载失败: {}", reason);
            ModelStatus::Unavailable(reason)
        }
    }
}
