// ==========================================
// 水质检测年度排期系统 - 优化引擎
// ==========================================
// 职责: 组装决策变量/约束/目标 → 调用求解器 → 报告求解状态
// 红线: 模型完整构建后才提交求解（不做增量/部分提交）
// ==========================================
// 决策变量: x[i,m] ∈ {0,1}，检测 i 排入槽位 m
// 约束: Σ_m x[i,m] = 1；月度容量（见 capacity.rs）
// 目标: Σ cost(i,m) * x[i,m] + W_IMBALANCE * Σ excess_m
// 超时: 时限 > 0 且后端无解时，贪心构造一个可行解作为 FEASIBLE 返回
// ==========================================

use crate::config::SchedulerConfig;
use crate::domain::{Analysis, HORIZON_MONTHS};
use crate::engine::calendar::PlanningHorizon;
use crate::engine::capacity::CapacityConstraintBuilder;
use crate::engine::cost_model::CostModel;
use crate::engine::error::{SchedulerError, SchedulerResult};
use crate::engine::solver::{IntegerProgram, LinearExpr, ProgramSolver, SolverResponse, SolverStatus, VarId};
use std::cmp::Reverse;
use std::time::Duration;
use tracing::{info, instrument, warn};

// ==========================================
// ScheduleModel - 已构建的排期模型
// ==========================================
#[derive(Debug, Clone)]
pub struct ScheduleModel {
    pub program: IntegerProgram,
    /// x[i][m]，行顺序与输入检测顺序一致
    pub assign_vars: Vec<[VarId; HORIZON_MONTHS]>,
    /// cost(i, m)，与 assign_vars 同形
    pub slot_costs: Vec<[i64; HORIZON_MONTHS]>,
    pub cap: usize,
    status: SolverStatus,
}

impl ScheduleModel {
    pub fn status(&self) -> SolverStatus {
        self.status
    }

    fn transition(&mut self, next: SolverStatus) -> SchedulerResult<()> {
        if !self.status.can_transition_to(next) {
            return Err(SchedulerError::InvalidStateTransition {
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        Ok(())
    }
}

// ==========================================
// OptimizationEngine - 优化引擎
// ==========================================
pub struct OptimizationEngine {
    cost_model: CostModel,
    capacity: CapacityConstraintBuilder,
    imbalance_weight: i64,
    time_budget: Duration,
}

impl OptimizationEngine {
    pub fn new(config: &SchedulerConfig) -> Self {
        Self {
            cost_model: CostModel::new(config.weights),
            capacity: CapacityConstraintBuilder::new(config.slack_factor),
            imbalance_weight: config.weights.imbalance,
            time_budget: config.solver_time_budget(),
        }
    }

    pub fn cost_model(&self) -> &CostModel {
        &self.cost_model
    }

    /// 构建排期模型
    ///
    /// # 参数
    /// - analyses: 可排检测（已过滤）
    /// - horizon: 规划期
    #[instrument(skip(self, analyses, horizon), fields(analysis_count = analyses.len()))]
    pub fn build_model(&self, analyses: &[Analysis], horizon: &PlanningHorizon) -> ScheduleModel {
        let cap = self.capacity.compute_cap(analyses.len());
        let mut program = IntegerProgram::new("water_analysis_schedule");

        // 1. 决策变量
        let mut assign_vars = Vec::with_capacity(analyses.len());
        for i in 0..analyses.len() {
            let row: [VarId; HORIZON_MONTHS] =
                std::array::from_fn(|m| program.new_bool_var(format!("x_{}_{}", i, m)));
            assign_vars.push(row);
        }

        // 2. 每条检测恰好一个槽位
        for (i, row) in assign_vars.iter().enumerate() {
            program.add_eq(format!("one_slot_{}", i), LinearExpr::sum(row.iter().copied()), 1);
        }

        // 3. 月度容量
        let excess_vars = self.capacity.apply(&mut program, &assign_vars, cap);

        // 4. 目标
        let slot_costs: Vec<[i64; HORIZON_MONTHS]> = analyses
            .iter()
            .map(|analysis| {
                std::array::from_fn(|m| self.cost_model.cost_for_slot(analysis, horizon, m))
            })
            .collect();

        let mut objective = LinearExpr::new();
        for (costs, row) in slot_costs.iter().zip(&assign_vars) {
            for (&cost, &var) in costs.iter().zip(row) {
                if cost != 0 {
                    objective.add_term(var, cost);
                }
            }
        }
        for &excess in &excess_vars {
            objective.add_term(excess, self.imbalance_weight);
        }
        program.minimize(objective);

        info!(
            cap,
            num_vars = program.num_vars(),
            num_constraints = program.num_constraints(),
            "排期模型构建完成"
        );

        ScheduleModel {
            program,
            assign_vars,
            slot_costs,
            cap,
            status: SolverStatus::Unsolved,
        }
    }

    /// 求解排期模型
    ///
    /// # 返回
    /// - Ok(SolverResponse): 终态（OPTIMAL / FEASIBLE / INFEASIBLE / TIMEOUT_NO_SOLUTION）
    /// - Err: 后端故障，或模型已求解过
    #[instrument(skip(self, solver, model), fields(solver = solver.name(), cap = model.cap))]
    pub fn solve<S: ProgramSolver + ?Sized>(
        &self,
        solver: &S,
        model: &mut ScheduleModel,
    ) -> SchedulerResult<SolverResponse> {
        // 同一模型只允许求解一次
        if model.status.is_terminal() {
            return Err(SchedulerError::InvalidStateTransition {
                from: model.status,
                to: model.status,
            });
        }

        let mut response = solver.solve(&model.program, self.time_budget)?;

        // 时限为 0 表示不做任何搜索，不构造贪心解
        if response.status == SolverStatus::TimeoutNoSolution && !self.time_budget.is_zero() {
            if let Some(values) = greedy_incumbent(model) {
                info!("求解超时，返回贪心可行解（未证明最优）");
                response = SolverResponse {
                    status: SolverStatus::Feasible,
                    objective_value: Some(model.program.objective_value(&values)),
                    values,
                    wall_time: response.wall_time,
                };
            }
        }

        model.transition(response.status)?;

        match response.status {
            SolverStatus::Optimal | SolverStatus::Feasible => info!(
                status = %response.status,
                objective = ?response.objective_value,
                wall_time_ms = response.wall_time.as_millis() as u64,
                "求解完成"
            ),
            _ => warn!(
                status = %response.status,
                wall_time_ms = response.wall_time.as_millis() as u64,
                "求解未得到可行解"
            ),
        }

        Ok(response)
    }
}

/// 贪心可行解
///
/// # 规则
/// 1. 最低可达成本高的检测优先（同值保持输入顺序）
/// 2. 每条检测取仍有余量的最低成本槽位（同值取较早槽位）
/// 3. excess 全部为 0
///
/// # 返回
/// - None: 构造结果不满足模型约束
fn greedy_incumbent(model: &ScheduleModel) -> Option<Vec<i64>> {
    let mut order: Vec<usize> = (0..model.slot_costs.len()).collect();
    order.sort_by_key(|&i| Reverse(model.slot_costs[i].iter().copied().min().unwrap_or(0)));

    let mut load = [0_usize; HORIZON_MONTHS];
    let mut values = vec![0_i64; model.program.num_vars()];

    for i in order {
        let slot = (0..HORIZON_MONTHS)
            .filter(|&m| load[m] < model.cap)
            .min_by_key(|&m| (model.slot_costs[i][m], m))?;
        load[slot] += 1;
        values[model.assign_vars[i][slot].index()] = 1;
    }

    model.program.is_feasible(&values).then_some(values)
}
