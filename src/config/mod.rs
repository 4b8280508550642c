// ==========================================
// 水质检测年度排期系统 - 配置层
// ==========================================
// 职责: 排期参数管理,支持多级覆写
// 来源: 默认值 / JSON 文件 / key-value / 环境变量
// ==========================================

pub mod config_manager;
pub mod error;
pub mod scheduler_config;

// 重导出核心配置类型
pub use config_manager::{config_keys, ConfigManager};
pub use error::{ConfigError, ConfigResult};
pub use scheduler_config::{CostWeights, SchedulerConfig, MAX_WEIGHT};
