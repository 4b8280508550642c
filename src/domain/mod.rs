// ==========================================
// 水质检测年度排期系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型、排期输出结构
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod analysis;
pub mod plan;
pub mod statistics;
pub mod types;

// 重导出核心类型
pub use analysis::Analysis;
pub use plan::{Assignment, ExcludedAnalysis, PlannedCollection, ScheduleOutcome, HORIZON_MONTHS};
pub use statistics::{ClinicRollup, CostStatistics, MonthLoad, ScheduleStatistics};
pub use types::{AnalysisOutcome, Periodicity, PlanStatus};
