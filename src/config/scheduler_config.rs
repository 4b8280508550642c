// ==========================================
// 水质检测年度排期系统 - 排期参数
// ==========================================
// 职责: 成本权重、容量松弛系数、求解时限
// 红线: 调用方显式传入，不使用全局可变常量
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// 单项权重上限（逾期天数 × 权重在 i64 内不溢出）
pub const MAX_WEIGHT: i64 = 1_000_000;

// ==========================================
// CostWeights - 成本权重
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostWeights {
    /// 每逾期一天的成本
    pub delay_day: i64,
    /// 不合格检测每逾期一天的额外成本
    pub rejected_delay_day: i64,
    /// 偏离理想月份每月的成本
    pub month_deviation: i64,
    /// 月度超额（excess）权重
    pub imbalance: i64,
}

impl Default for CostWeights {
    fn default() -> Self {
        Self {
            delay_day: 5,
            rejected_delay_day: 10,
            month_deviation: 20,
            imbalance: 3,
        }
    }
}

// ==========================================
// SchedulerConfig - 排期配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    pub weights: CostWeights,
    /// 容量松弛系数 (>= 1)
    pub slack_factor: f64,
    /// 求解时限（秒）
    pub solver_time_budget_secs: u64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            weights: CostWeights::default(),
            slack_factor: 1.1,
            solver_time_budget_secs: 30,
        }
    }
}

impl SchedulerConfig {
    /// 从 JSON 字符串加载（缺省字段取默认值）
    pub fn from_json_str(raw: &str) -> ConfigResult<Self> {
        let config: SchedulerConfig = serde_json::from_str(raw)?;
        Ok(config)
    }

    /// 从 JSON 文件加载
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&raw)
    }

    pub fn solver_time_budget(&self) -> Duration {
        Duration::from_secs(self.solver_time_budget_secs)
    }

    /// 校验配置
    ///
    /// # 规则
    /// - 所有权重在 [0, MAX_WEIGHT] 内（保证成本非负）
    /// - slack_factor 有限且 >= 1（保证 12 * cap >= N，模型恒可行）
    pub fn validate(&self) -> ConfigResult<()> {
        let weights = [
            ("weights.delay_day", self.weights.delay_day),
            ("weights.rejected_delay_day", self.weights.rejected_delay_day),
            ("weights.month_deviation", self.weights.month_deviation),
            ("weights.imbalance", self.weights.imbalance),
        ];
        for (field, value) in weights {
            if value < 0 {
                return Err(ConfigError::ValidationError {
                    field: field.to_string(),
                    message: format!("权重不能为负数: {}", value),
                });
            }
            if value > MAX_WEIGHT {
                return Err(ConfigError::ValidationError {
                    field: field.to_string(),
                    message: format!("权重超过上限 {}: {}", MAX_WEIGHT, value),
                });
            }
        }

        if !self.slack_factor.is_finite() || self.slack_factor < 1.0 {
            return Err(ConfigError::ValidationError {
                field: "slack_factor".to_string(),
                message: format!("松弛系数必须 >= 1, 实际 {}", self.slack_factor),
            });
        }

        Ok(())
    }

    /// 配置快照 (JSON)
    pub fn snapshot_json(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}
