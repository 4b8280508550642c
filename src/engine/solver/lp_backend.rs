// ==========================================
// 水质检测年度排期系统 - good_lp 求解后端
// ==========================================
// 后端: good_lp + microlp（纯 Rust 分支定界）
// 时限: 工作线程求解，调用线程最多等待 time_budget
// 并发: 超时后工作线程继续运行至结束，在途工作线程数受 max_in_flight 限制
// 红线: 超时后不返回任何部分取值
// ==========================================

use crate::engine::solver::model::{Comparison, IntegerProgram, LinearExpr, VarDomain};
use crate::engine::solver::{ProgramSolver, SolverError, SolverResponse, SolverStatus};
use good_lp::{
    default_solver, variable, Expression, ProblemVariables, ResolutionError, Solution,
    SolverModel, Variable,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// 工作线程的求解结果
enum WorkerOutcome {
    Solved(Vec<i64>),
    Infeasible,
    Failed(String),
}

/// 默认在途工作线程上限
pub const DEFAULT_MAX_IN_FLIGHT: usize = 4;

/// 在途工作线程计数，随工作线程结束释放
struct InFlightGuard(Arc<AtomicUsize>);

impl InFlightGuard {
    fn try_acquire(counter: &Arc<AtomicUsize>, max: usize) -> Option<Self> {
        counter
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| (n < max).then_some(n + 1))
            .ok()
            .map(|_| Self(Arc::clone(counter)))
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

// ==========================================
// LpSolverBackend
// ==========================================
// 克隆体共享同一个在途计数
#[derive(Debug, Clone)]
pub struct LpSolverBackend {
    in_flight: Arc<AtomicUsize>,
    max_in_flight: usize,
}

impl LpSolverBackend {
    pub fn new() -> Self {
        Self::with_max_in_flight(DEFAULT_MAX_IN_FLIGHT)
    }

    /// # 参数
    /// - max_in_flight: 同时运行的工作线程上限（含已超时仍在运行的线程）
    pub fn with_max_in_flight(max_in_flight: usize) -> Self {
        Self {
            in_flight: Arc::new(AtomicUsize::new(0)),
            max_in_flight,
        }
    }

    /// 当前在途工作线程数
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }
}

impl Default for LpSolverBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgramSolver for LpSolverBackend {
    fn name(&self) -> &str {
        "good_lp/microlp"
    }

    fn solve(
        &self,
        program: &IntegerProgram,
        time_budget: Duration,
    ) -> Result<SolverResponse, SolverError> {
        let started = Instant::now();

        // 时限为 0: 不做任何搜索
        if time_budget.is_zero() {
            warn!(program = %program.name(), "求解时限为 0，未执行搜索");
            return Ok(SolverResponse::without_solution(
                SolverStatus::TimeoutNoSolution,
                started.elapsed(),
            ));
        }

        info!(
            program = %program.name(),
            num_vars = program.num_vars(),
            num_constraints = program.num_constraints(),
            time_budget_ms = time_budget.as_millis() as u64,
            "开始求解"
        );

        let guard = InFlightGuard::try_acquire(&self.in_flight, self.max_in_flight).ok_or_else(|| {
            warn!(max_in_flight = self.max_in_flight, "在途求解线程已达上限");
            SolverError::Busy {
                in_flight: self.in_flight(),
            }
        })?;

        let owned = program.clone();
        let (tx, rx) = mpsc::channel();
        thread::Builder::new()
            .name("lp-solver".to_string())
            .spawn(move || {
                let _guard = guard;
                let outcome = solve_with_good_lp(&owned);
                // 调用方可能已超时离开
                let _ = tx.send(outcome);
            })
            .map_err(|e| SolverError::BackendFailure(format!("求解线程启动失败: {}", e)))?;

        match rx.recv_timeout(time_budget) {
            Ok(WorkerOutcome::Solved(values)) => {
                let objective = program.objective_value(&values);
                debug!(objective, elapsed_ms = started.elapsed().as_millis() as u64, "求解完成");
                Ok(SolverResponse {
                    status: SolverStatus::Optimal,
                    values,
                    objective_value: Some(objective),
                    wall_time: started.elapsed(),
                })
            }
            Ok(WorkerOutcome::Infeasible) => Ok(SolverResponse::without_solution(
                SolverStatus::Infeasible,
                started.elapsed(),
            )),
            Ok(WorkerOutcome::Failed(message)) => Err(SolverError::BackendFailure(message)),
            Err(RecvTimeoutError::Timeout) => {
                // 工作线程继续运行至结束，结果被丢弃
                warn!(
                    time_budget_ms = time_budget.as_millis() as u64,
                    "求解超时，无可用解"
                );
                Ok(SolverResponse::without_solution(
                    SolverStatus::TimeoutNoSolution,
                    started.elapsed(),
                ))
            }
            Err(RecvTimeoutError::Disconnected) => Err(SolverError::WorkerDisconnected),
        }
    }
}

/// 将模型翻译为 good_lp 问题并求解
fn solve_with_good_lp(program: &IntegerProgram) -> WorkerOutcome {
    let mut vars = ProblemVariables::new();
    let lp_vars: Vec<Variable> = program
        .vars()
        .iter()
        .map(|def| match def.domain {
            VarDomain::Bool => vars.add(variable().binary()),
            VarDomain::Int { lb, ub } => {
                vars.add(variable().integer().min(lb as f64).max(ub as f64))
            }
        })
        .collect();

    // 目标常数项不影响最优解，求值时再计入
    let objective = to_expression(program.objective(), &lp_vars);
    let mut problem = vars.minimise(objective).using(default_solver);

    for constraint in program.constraints() {
        let lhs = to_expression(&constraint.expr, &lp_vars);
        let rhs = (constraint.rhs - constraint.expr.constant) as f64;
        let lp_constraint = match constraint.cmp {
            Comparison::Eq => lhs.eq(rhs),
            Comparison::Le => lhs.leq(rhs),
            Comparison::Ge => lhs.geq(rhs),
        };
        problem = problem.with(lp_constraint);
    }

    match problem.solve() {
        Ok(solution) => WorkerOutcome::Solved(
            lp_vars
                .iter()
                .map(|&v| solution.value(v).round() as i64)
                .collect(),
        ),
        Err(ResolutionError::Infeasible) => WorkerOutcome::Infeasible,
        Err(e) => WorkerOutcome::Failed(e.to_string()),
    }
}

fn to_expression(expr: &LinearExpr, lp_vars: &[Variable]) -> Expression {
    let mut out = Expression::with_capacity(expr.terms.len());
    for &(var, coef) in &expr.terms {
        out.add_mul(coef as f64, lp_vars[var.index()]);
    }
    out
}
