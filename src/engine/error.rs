// ==========================================
// 水质检测年度排期系统 - 引擎层错误类型
// ==========================================
// 工具: thiserror 派生宏
// 说明: 无可行解 / 求解超时 / 空输入 不是错误，
//       以 PlanStatus 形式随排期结果返回
// ==========================================

use crate::config::ConfigError;
use crate::engine::solver::{SolverError, SolverStatus};
use crate::importer::ImportError;
use thiserror::Error;

/// 引擎层错误类型
#[derive(Error, Debug)]
pub enum SchedulerError {
    // ===== 模型契约错误（引擎缺陷，必须中止本次运行）=====
    #[error("模型契约违反: analysis_id={analysis_id}, {detail}")]
    ModelContractViolation { analysis_id: String, detail: String },

    #[error("无效的求解状态转换: from={from} to={to}")]
    InvalidStateTransition { from: SolverStatus, to: SolverStatus },

    // ===== 输入/配置错误 =====
    #[error("配置无效: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("数据导入失败: {0}")]
    Import(#[from] ImportError),

    #[error("日历计算越界: {0}")]
    CalendarOverflow(String),

    // ===== 求解器错误 =====
    #[error("求解器故障: {0}")]
    Solver(#[from] SolverError),

    // ===== 通用错误 =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result 类型别名
pub type SchedulerResult<T> = Result<T, SchedulerError>;
