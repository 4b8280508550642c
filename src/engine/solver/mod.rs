// ==========================================
// 水质检测年度排期系统 - 求解器能力抽象
// ==========================================
// 契约: 声明布尔/整数变量 → 声明线性约束 → 声明最小化目标
//       → 在时限内求解 → 返回状态与变量取值
// 红线: 对调用方同步；只返回完整解或无解，不返回部分解
// ==========================================

pub mod lp_backend;
pub mod model;

pub use lp_backend::{LpSolverBackend, DEFAULT_MAX_IN_FLIGHT};
pub use model::{Comparison, IntegerProgram, LinearConstraint, LinearExpr, VarDef, VarDomain, VarId};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

// ==========================================
// 求解状态机
// ==========================================
// UNSOLVED → {OPTIMAL, FEASIBLE, INFEASIBLE, TIMEOUT_NO_SOLUTION}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SolverStatus {
    Unsolved,
    Optimal,
    Feasible,
    Infeasible,
    TimeoutNoSolution,
}

impl SolverStatus {
    /// 是否为终态
    pub fn is_terminal(&self) -> bool {
        !matches!(self, SolverStatus::Unsolved)
    }

    /// 是否携带可行解
    pub fn has_solution(&self) -> bool {
        matches!(self, SolverStatus::Optimal | SolverStatus::Feasible)
    }

    /// 状态转换合法性: 仅允许 UNSOLVED → 终态
    pub fn can_transition_to(&self, next: SolverStatus) -> bool {
        *self == SolverStatus::Unsolved && next.is_terminal()
    }
}

impl fmt::Display for SolverStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverStatus::Unsolved => write!(f, "UNSOLVED"),
            SolverStatus::Optimal => write!(f, "OPTIMAL"),
            SolverStatus::Feasible => write!(f, "FEASIBLE"),
            SolverStatus::Infeasible => write!(f, "INFEASIBLE"),
            SolverStatus::TimeoutNoSolution => write!(f, "TIMEOUT_NO_SOLUTION"),
        }
    }
}

// ==========================================
// SolverResponse - 求解结果
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct SolverResponse {
    pub status: SolverStatus,
    /// 按 VarId 下标排列的变量取值；无解时为空
    pub values: Vec<i64>,
    pub objective_value: Option<i64>,
    pub wall_time: Duration,
}

impl SolverResponse {
    /// 无解响应（INFEASIBLE / TIMEOUT_NO_SOLUTION）
    pub fn without_solution(status: SolverStatus, wall_time: Duration) -> Self {
        Self {
            status,
            values: Vec::new(),
            objective_value: None,
            wall_time,
        }
    }
}

/// 求解器故障（不属于求解状态的异常）
#[derive(Error, Debug)]
pub enum SolverError {
    #[error("求解后端失败: {0}")]
    BackendFailure(String),

    #[error("求解线程异常退出")]
    WorkerDisconnected,

    #[error("在途求解线程已达上限: {in_flight}")]
    Busy { in_flight: usize },
}

// ==========================================
// ProgramSolver Trait
// ==========================================
// 实现者: LpSolverBackend (good_lp + microlp)，测试中的 mock 求解器
pub trait ProgramSolver {
    /// 后端名称（日志用）
    fn name(&self) -> &str;

    /// 在时限内最小化目标
    ///
    /// # 返回
    /// - Ok(SolverResponse): 四种终态之一
    /// - Err(SolverError): 后端自身故障
    fn solve(&self, program: &IntegerProgram, time_budget: Duration)
        -> Result<SolverResponse, SolverError>;
}

impl<T: ProgramSolver + ?Sized> ProgramSolver for &T {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn solve(
        &self,
        program: &IntegerProgram,
        time_budget: Duration,
    ) -> Result<SolverResponse, SolverError> {
        (**self).solve(program, time_budget)
    }
}
