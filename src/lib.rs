// ==========================================
// 水质检测年度排期系统 - 核心库
// ==========================================
// 系统定位: 将半年/年度水质检测排入滚动 12 个月槽位
// 目标: 最小化 逾期 + 不合格逾期 + 偏离理想月份 的加权成本
// 红线: 月度负载不超过容量上限；每条检测恰好一个槽位
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 配置层 - 权重 / 松弛系数 / 求解时限
pub mod config;

// 导入层 - 外部数据
pub mod importer;

// 引擎层 - 建模 / 求解 / 统计
pub mod engine;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    Analysis, AnalysisOutcome, Assignment, ExcludedAnalysis, Periodicity, PlanStatus,
    PlannedCollection, ScheduleOutcome, ScheduleStatistics, HORIZON_MONTHS,
};

// 配置
pub use config::{ConfigError, ConfigManager, CostWeights, SchedulerConfig};

// 导入
pub use importer::{AnalysisSource, CsvAnalysisSource, ImportError, InMemoryAnalysisSource};

// 引擎
pub use engine::{
    LpSolverBackend, ProgramSolver, ScheduleOrchestrator, SchedulerError, SchedulerResult,
    SolverStatus,
};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "水质检测年度排期系统";
