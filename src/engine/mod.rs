// ==========================================
// 水质检测年度排期系统 - 引擎层
// ==========================================
// 职责: 准入过滤、成本模型、容量约束、建模求解、结果提取、计划后模拟
// 红线: 引擎不做持久化，不渲染报表；所有排除必须输出 reason
// ==========================================

pub mod calendar;
pub mod capacity;
pub mod cost_model;
pub mod eligibility;
pub mod error;
pub mod extractor;
pub mod optimizer;
pub mod orchestrator;
pub mod simulation;
pub mod solver;

// 重导出核心引擎
pub use calendar::{add_months, anchor_of, days_in_month, is_leap_year, PlanningHorizon};
pub use capacity::CapacityConstraintBuilder;
pub use cost_model::{CostBreakdown, CostModel};
pub use eligibility::{EligibilityFilter, EligibilityReport};
pub use error::{SchedulerError, SchedulerResult};
pub use extractor::ResultExtractor;
pub use optimizer::{OptimizationEngine, ScheduleModel};
pub use orchestrator::ScheduleOrchestrator;
pub use simulation::{SimulationEngine, SimulationReport};
pub use solver::{
    IntegerProgram, LinearExpr, LpSolverBackend, ProgramSolver, SolverError, SolverResponse,
    SolverStatus, VarId,
};
