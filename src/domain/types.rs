// ==========================================
// 水质检测年度排期系统 - 领域类型定义
// ==========================================
// 依据: 检测记录主数据 (periodicity / outcome)
// 依据: 求解状态对外暴露约定
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 检测周期 (Periodicity)
// ==========================================
// 红线: 只有 SEMIANNUAL / ANNUAL 参与年度重排
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Periodicity {
    Monthly,    // 月度
    Semiannual, // 半年度
    Annual,     // 年度
}

impl Periodicity {
    /// 是否参与年度排期
    pub fn is_yearly_plannable(&self) -> bool {
        matches!(self, Periodicity::Semiannual | Periodicity::Annual)
    }

    /// 从外部字符串解析（大小写不敏感，兼容上游葡语枚举值）
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_uppercase().as_str() {
            "MONTHLY" | "MENSAL" => Some(Periodicity::Monthly),
            "SEMIANNUAL" | "SEMESTRAL" => Some(Periodicity::Semiannual),
            "ANNUAL" | "ANUAL" => Some(Periodicity::Annual),
            _ => None,
        }
    }
}

impl fmt::Display for Periodicity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Periodicity::Monthly => write!(f, "MONTHLY"),
            Periodicity::Semiannual => write!(f, "SEMIANNUAL"),
            Periodicity::Annual => write!(f, "ANNUAL"),
        }
    }
}

// ==========================================
// 最近一次检测结果 (Analysis Outcome)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnalysisOutcome {
    Approved, // 合格
    Rejected, // 不合格
}

impl AnalysisOutcome {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_uppercase().as_str() {
            "APPROVED" | "APROVADO" => Some(AnalysisOutcome::Approved),
            "REJECTED" | "REJEITADO" => Some(AnalysisOutcome::Rejected),
            _ => None,
        }
    }
}

impl fmt::Display for AnalysisOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisOutcome::Approved => write!(f, "APPROVED"),
            AnalysisOutcome::Rejected => write!(f, "REJECTED"),
        }
    }
}

// ==========================================
// 排期结果状态 (Plan Status)
// ==========================================
// 说明: Infeasible / SolverTimeout / EmptyInput 都不是错误，
//       由调用方决定是否需要处理
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlanStatus {
    EmptyInput,    // 无可排检测，未调用求解器
    Optimal,       // 已证明最优
    Feasible,      // 超时但有可行解（未证明最优）
    Infeasible,    // 无可行解
    SolverTimeout, // 超时且无可行解
}

impl PlanStatus {
    /// 是否携带排期结果
    pub fn has_assignment(&self) -> bool {
        matches!(self, PlanStatus::Optimal | PlanStatus::Feasible)
    }

    /// 对外暴露的三态标签
    ///
    /// - optimal
    /// - feasible-not-proven-optimal
    /// - no-feasible-solution（EmptyInput 视为平凡最优）
    pub fn surface_label(&self) -> &'static str {
        match self {
            PlanStatus::EmptyInput | PlanStatus::Optimal => "optimal",
            PlanStatus::Feasible => "feasible-not-proven-optimal",
            PlanStatus::Infeasible | PlanStatus::SolverTimeout => "no-feasible-solution",
        }
    }
}

impl fmt::Display for PlanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanStatus::EmptyInput => write!(f, "EMPTY_INPUT"),
            PlanStatus::Optimal => write!(f, "OPTIMAL"),
            PlanStatus::Feasible => write!(f, "FEASIBLE"),
            PlanStatus::Infeasible => write!(f, "INFEASIBLE"),
            PlanStatus::SolverTimeout => write!(f, "SOLVER_TIMEOUT"),
        }
    }
}
