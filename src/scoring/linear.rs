//! 分类线性模型
//!
//! 模型文件为 JSON：
//!
//! ```json
//! {
//!   "intercept": 4000.0,
//!   "weights": { "Airline": { "IndiGo": 250.0 } },
//!   "strict": true
//! }
//! ```
//!
//! 预测值 = intercept + 各加权列中对应取值的权重之和

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use super::{FeatureRow, Scorer};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearModel {
    pub intercept: f64,

    /// 列名 -> (取值 -> 权重)
    #[serde(default)]
    pub weights: BTreeMap<String, BTreeMap<String, f64>>,

    /// 严格模式：加权列出现未见过的取值时报错；否则该列贡献 0
    #[serde(default = "default_strict")]
    pub strict: bool,
}

fn default_strict() -> bool {
    true
}

impl LinearModel {
    /// 从 JSON 文件加载并校验
    pub fn from_path<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("读取模型文件失败: {}", path.display()))?;
        let model: LinearModel = serde_json::from_str(&content)
            .with_context(|| format!("解析模型文件失败: {}", path.display()))?;
        model.validate()?;
        Ok(model)
    }

    /// 所有系数必须是有限值
    pub fn validate(&self) -> anyhow::Result<()> {
        if !self.intercept.is_finite() {
            anyhow::bail!("截距不是有限值: {}", self.intercept);
        }
        for (column, table) in &self.weights {
            for (value, weight) in table {
                if !weight.is_finite() {
                    anyhow::bail!("列 '{}' 取值 '{}' 的权重不是有限值: {}", column, value, weight);
                }
            }
        }
        Ok(())
    }

    pub fn weighted_columns(&self) -> usize {
        self.weights.len()
    }
}

impl Scorer for LinearModel {
    fn score(&self, row: &FeatureRow) -> anyhow::Result<f64> {
        let mut price = self.intercept;
        for (column, table) in &self.weights {
            let value = row.get(column).ok_or_else(|| {
                let present: Vec<_> = row.column_names().collect();
                anyhow::anyhow!(
                    "missing expected column '{}' (row has: {})",
                    column,
                    present.join(", ")
                )
            })?;
            match table.get(value) {
                Some(weight) => price += weight,
                None if self.strict => {
                    anyhow::bail!("unknown category '{}' for column '{}'", value, column)
                }
                None => {}
            }
        }
        Ok(price)
    }
}
