// ==========================================
// Mock 求解器 - 用于集成测试
// ==========================================

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use water_analysis_aps::engine::solver::{
    IntegerProgram, ProgramSolver, SolverError, SolverResponse, SolverStatus,
};
use water_analysis_aps::engine::LpSolverBackend;

/// 计数包装：统计调用次数，实际委托给内部求解器
pub struct CountingSolver<S> {
    inner: S,
    calls: AtomicUsize,
}

impl<S: ProgramSolver> CountingSolver<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl<S: ProgramSolver> ProgramSolver for CountingSolver<S> {
    fn name(&self) -> &str {
        "counting"
    }

    fn solve(
        &self,
        program: &IntegerProgram,
        time_budget: Duration,
    ) -> Result<SolverResponse, SolverError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.solve(program, time_budget)
    }
}

/// 固定返回无解状态
pub struct NoSolutionSolver(pub SolverStatus);

impl ProgramSolver for NoSolutionSolver {
    fn name(&self) -> &str {
        "no-solution"
    }

    fn solve(
        &self,
        _program: &IntegerProgram,
        _time_budget: Duration,
    ) -> Result<SolverResponse, SolverError> {
        Ok(SolverResponse::without_solution(self.0, Duration::ZERO))
    }
}

/// 用真实后端求解，但报告为 FEASIBLE（模拟超时前找到的未证明最优解）
pub struct FeasibleOnlySolver;

impl ProgramSolver for FeasibleOnlySolver {
    fn name(&self) -> &str {
        "feasible-only"
    }

    fn solve(
        &self,
        program: &IntegerProgram,
        time_budget: Duration,
    ) -> Result<SolverResponse, SolverError> {
        let mut response = LpSolverBackend::new().solve(program, time_budget)?;
        if response.status == SolverStatus::Optimal {
            response.status = SolverStatus::Feasible;
        }
        Ok(response)
    }
}

/// 返回全部为 1 的取值（违反 "每条检测恰好一个槽位"）
pub struct AllOnesSolver;

impl ProgramSolver for AllOnesSolver {
    fn name(&self) -> &str {
        "all-ones"
    }

    fn solve(
        &self,
        program: &IntegerProgram,
        _time_budget: Duration,
    ) -> Result<SolverResponse, SolverError> {
        Ok(SolverResponse {
            status: SolverStatus::Optimal,
            values: vec![1; program.num_vars()],
            objective_value: None,
            wall_time: Duration::ZERO,
        })
    }
}

/// 后端故障
pub struct FailingSolver;

impl ProgramSolver for FailingSolver {
    fn name(&self) -> &str {
        "failing"
    }

    fn solve(
        &self,
        _program: &IntegerProgram,
        _time_budget: Duration,
    ) -> Result<SolverResponse, SolverError> {
        Err(SolverError::BackendFailure("simulated crash".to_string()))
    }
}
