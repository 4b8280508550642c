// ==========================================
// 水质检测年度排期系统 - 配置管理器
// ==========================================
// 职责: 配置加载、多级覆写、快照
// 覆写顺序: 默认值 → JSON 文件 → key-value 覆写 → 环境变量
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::config::scheduler_config::SchedulerConfig;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, warn};

/// 环境变量前缀，例如 WATER_APS_SLACK_FACTOR=1.2
pub const ENV_PREFIX: &str = "WATER_APS_";

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ConfigManager {
    config: SchedulerConfig,
}

impl ConfigManager {
    /// 使用默认配置创建
    pub fn new() -> Self {
        Self::default()
    }

    /// 从 JSON 配置文件创建
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let config = SchedulerConfig::from_json_file(path)?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// 应用 key-value 覆写（config_kv 风格）
    ///
    /// # 返回
    /// - Ok(usize): 生效的覆写数量
    ///
    /// # 说明
    /// 未知 key 忽略并记录 warn；值格式错误返回 InvalidValue
    pub fn apply_overrides(&mut self, overrides: &HashMap<String, String>) -> ConfigResult<usize> {
        // 按 key 排序，保证日志与错误顺序稳定
        let mut keys: Vec<&String> = overrides.keys().collect();
        keys.sort();

        let mut applied = 0;
        for key in keys {
            let value = &overrides[key];
            if self.set_config_value(key, value)? {
                applied += 1;
            } else {
                warn!(key = %key, "未知配置项，已忽略");
            }
        }
        Ok(applied)
    }

    /// 从进程环境变量应用覆写
    pub fn apply_env_overrides(&mut self) -> ConfigResult<usize> {
        self.apply_env_overrides_from(std::env::vars())
    }

    /// 从给定的 (name, value) 序列应用 WATER_APS_* 覆写
    pub fn apply_env_overrides_from<I>(&mut self, vars: I) -> ConfigResult<usize>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let overrides: HashMap<String, String> = vars
            .into_iter()
            .filter_map(|(name, value)| {
                name.strip_prefix(ENV_PREFIX)
                    .map(|key| (key.to_lowercase(), value))
            })
            .collect();
        self.apply_overrides(&overrides)
    }

    /// 写入单个配置项
    ///
    /// # 返回
    /// - Ok(true): 已写入
    /// - Ok(false): 未知 key
    fn set_config_value(&mut self, key: &str, value: &str) -> ConfigResult<bool> {
        let config = &mut self.config;
        match key {
            config_keys::W_DELAY_DAY => config.weights.delay_day = parse_value(key, value)?,
            config_keys::W_REJECTED_DELAY_DAY => {
                config.weights.rejected_delay_day = parse_value(key, value)?
            }
            config_keys::W_MONTH_DEVIATION => config.weights.month_deviation = parse_value(key, value)?,
            config_keys::W_IMBALANCE => config.weights.imbalance = parse_value(key, value)?,
            config_keys::SLACK_FACTOR => config.slack_factor = parse_value(key, value)?,
            config_keys::SOLVER_TIME_BUDGET_SECS => {
                config.solver_time_budget_secs = parse_value(key, value)?
            }
            _ => return Ok(false),
        }
        debug!(key = %key, value = %value, "配置覆写生效");
        Ok(true)
    }

    /// 获取配置快照（JSON格式）
    ///
    /// # 用途
    /// - 记录在每次排期输出上，保证结果可复现
    pub fn get_config_snapshot(&self) -> ConfigResult<String> {
        self.config.snapshot_json()
    }

    /// 校验并取出最终配置
    pub fn into_validated(self) -> ConfigResult<SchedulerConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

fn parse_value<T>(key: &str, value: &str) -> ConfigResult<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            message: e.to_string(),
        })
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 成本权重
    pub const W_DELAY_DAY: &str = "w_delay_day";
    pub const W_REJECTED_DELAY_DAY: &str = "w_rejected_delay_day";
    pub const W_MONTH_DEVIATION: &str = "w_month_deviation";
    pub const W_IMBALANCE: &str = "w_imbalance";

    // 容量
    pub const SLACK_FACTOR: &str = "slack_factor";

    // 求解器
    pub const SOLVER_TIME_BUDGET_SECS: &str = "solver_time_budget_secs";
}
