// ==========================================
// 水质检测年度排期系统 - 引擎编排器
// ==========================================
// 用途: 协调一次排期运行的各个步骤
// 流程: 规划期 → 准入过滤 → 建模 → 求解 → 提取 → 模拟统计
// ==========================================
// 红线: 无可排检测时不调用求解器
// 红线: 无解 / 超时 以状态返回，不视为错误
// ==========================================

use crate::config::SchedulerConfig;
use crate::domain::{Analysis, Assignment, PlanStatus, ScheduleOutcome};
use crate::engine::calendar::PlanningHorizon;
use crate::engine::eligibility::{EligibilityFilter, EligibilityReport};
use crate::engine::error::SchedulerResult;
use crate::engine::extractor::ResultExtractor;
use crate::engine::optimizer::OptimizationEngine;
use crate::engine::simulation::{SimulationEngine, SimulationReport};
use crate::engine::solver::{ProgramSolver, SolverStatus};
use crate::importer::AnalysisSource;
use chrono::NaiveDate;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

// ==========================================
// ScheduleOrchestrator - 引擎编排器
// ==========================================
pub struct ScheduleOrchestrator<S>
where
    S: ProgramSolver,
{
    config: SchedulerConfig,
    solver: S,
    eligibility: EligibilityFilter,
    optimizer: OptimizationEngine,
    simulation: SimulationEngine,
}

impl<S> ScheduleOrchestrator<S>
where
    S: ProgramSolver,
{
    /// 创建编排器
    ///
    /// # 参数
    /// - config: 排期配置（创建时校验）
    /// - solver: 求解后端
    pub fn new(config: SchedulerConfig, solver: S) -> SchedulerResult<Self> {
        config.validate()?;

        let optimizer = OptimizationEngine::new(&config);
        let simulation = SimulationEngine::new(*optimizer.cost_model());

        Ok(Self {
            config,
            solver,
            eligibility: EligibilityFilter::new(),
            optimizer,
            simulation,
        })
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    pub fn solver(&self) -> &S {
        &self.solver
    }

    /// 从数据源读取后执行排期
    pub fn run_from_source(
        &self,
        source: &dyn AnalysisSource,
        today: NaiveDate,
    ) -> SchedulerResult<ScheduleOutcome> {
        let records = source.fetch_analyses()?;
        self.run(&records, today)
    }

    /// 执行一次排期
    ///
    /// # 参数
    /// - records: 全部检测记录（含不可排记录）
    /// - today: 参考日期
    ///
    /// # 返回
    /// - Ok(ScheduleOutcome): status 为 EMPTY_INPUT / OPTIMAL / FEASIBLE / INFEASIBLE / SOLVER_TIMEOUT
    /// - Err: 配置/日历/求解器故障，或模型契约违反
    #[instrument(skip(self, records), fields(record_count = records.len(), today = %today))]
    pub fn run(&self, records: &[Analysis], today: NaiveDate) -> SchedulerResult<ScheduleOutcome> {
        let run_id = Uuid::new_v4();
        info!(run_id = %run_id, solver = self.solver.name(), "开始执行排期");

        // ==========================================
        // 步骤1: 规划期
        // ==========================================
        let horizon = PlanningHorizon::starting(today)?;
        debug!(anchor = %horizon.anchor(), "规划期确定");

        // ==========================================
        // 步骤2: 准入过滤
        // ==========================================
        let EligibilityReport { eligible, excluded } = self.eligibility.select(records);

        let mut outcome = ScheduleOutcome {
            run_id,
            today,
            anchor: horizon.anchor(),
            status: PlanStatus::EmptyInput,
            eligible_count: eligible.len(),
            excluded_count: excluded.len(),
            excluded,
            cap: 0,
            objective_value: None,
            assignment: Assignment::new(),
            plan_lines: Vec::new(),
            statistics: Default::default(),
            config_snapshot_json: self.config.snapshot_json()?,
        };

        if eligible.is_empty() {
            info!(run_id = %run_id, "无可排检测，跳过求解");
            outcome.statistics = self
                .simulation
                .simulate(&[], &outcome.assignment, &horizon)?
                .statistics;
            return Ok(outcome);
        }

        // ==========================================
        // 步骤3: 建模 + 求解
        // ==========================================
        let mut model = self.optimizer.build_model(&eligible, &horizon);
        outcome.cap = model.cap;

        let response = self.optimizer.solve(&self.solver, &mut model)?;

        outcome.status = match response.status {
            SolverStatus::Optimal => PlanStatus::Optimal,
            SolverStatus::Feasible => PlanStatus::Feasible,
            SolverStatus::Infeasible => PlanStatus::Infeasible,
            SolverStatus::TimeoutNoSolution | SolverStatus::Unsolved => PlanStatus::SolverTimeout,
        };

        if !outcome.status.has_assignment() {
            warn!(run_id = %run_id, status = %outcome.status, "排期无可行解");
            return Ok(outcome);
        }

        // ==========================================
        // 步骤4: 提取 + 模拟统计
        // ==========================================
        let assignment = ResultExtractor::extract(&eligible, &model.assign_vars, &response.values)?;
        let SimulationReport {
            plan_lines,
            statistics,
        } = self.simulation.simulate(&eligible, &assignment, &horizon)?;

        outcome.objective_value = Some(
            response
                .objective_value
                .unwrap_or_else(|| model.program.objective_value(&response.values)),
        );
        outcome.assignment = assignment;
        outcome.plan_lines = plan_lines;
        outcome.statistics = statistics;

        info!(
            run_id = %run_id,
            status = %outcome.status,
            objective = ?outcome.objective_value,
            total_cost = outcome.statistics.cost.total,
            delayed_after_plan = outcome.statistics.delayed_after_plan,
            "排期完成"
        );

        Ok(outcome)
    }
}
