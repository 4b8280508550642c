// ==========================================
// 求解状态与异常路径集成测试
// ==========================================
// 测试范围:
// 1. 空输入: 不调用求解器
// 2. 求解时限为 0: SOLVER_TIMEOUT，空排期
// 3. INFEASIBLE / FEASIBLE 状态映射
// 4. 时限内超时: 贪心可行解，FEASIBLE
// 5. 求解器返回违约取值: 立即报错
// 6. 后端故障 / 在途线程已满: 以错误返回
// ==========================================

mod helpers;

use helpers::mock_solver::{
    AllOnesSolver, CountingSolver, FailingSolver, FeasibleOnlySolver, NoSolutionSolver,
};
use helpers::test_data_builder::{date, identical_batch, AnalysisBuilder};
use water_analysis_aps::engine::{
    LpSolverBackend, ScheduleOrchestrator, SchedulerError, SolverError, SolverStatus,
};
use water_analysis_aps::{logging, PlanStatus, SchedulerConfig, HORIZON_MONTHS};

fn today() -> chrono::NaiveDate {
    date(2025, 3, 10)
}

// ==========================================
// 空输入
// ==========================================

#[test]
fn test_empty_input_never_invokes_solver() {
    logging::init_test();
    let solver = CountingSolver::new(LpSolverBackend::new());
    let orchestrator = ScheduleOrchestrator::new(SchedulerConfig::default(), &solver).unwrap();

    let outcome = orchestrator.run(&[], today()).unwrap();

    assert_eq!(outcome.status, PlanStatus::EmptyInput);
    assert!(outcome.assignment.is_empty());
    assert_eq!(outcome.cap, 0);
    assert_eq!(outcome.statistics.cost.total, 0);
    assert_eq!(solver.calls(), 0);
}

#[test]
fn test_only_monthly_analyses_is_empty_input() {
    let solver = CountingSolver::new(LpSolverBackend::new());
    let orchestrator = ScheduleOrchestrator::new(SchedulerConfig::default(), &solver).unwrap();
    let records = vec![
        AnalysisBuilder::new("M1").monthly().build(),
        AnalysisBuilder::new("M2").monthly().build(),
    ];

    let outcome = orchestrator.run(&records, today()).unwrap();

    assert_eq!(outcome.status, PlanStatus::EmptyInput);
    assert_eq!(outcome.excluded_count, 2);
    assert!(outcome.excluded.iter().all(|e| e.reason.contains("MONTHLY")));
    assert_eq!(solver.calls(), 0);
}

// ==========================================
// 时限为 0
// ==========================================

#[test]
fn test_zero_time_budget_reports_solver_timeout() {
    let mut config = SchedulerConfig::default();
    config.solver_time_budget_secs = 0;
    let orchestrator = ScheduleOrchestrator::new(config, LpSolverBackend::new()).unwrap();

    let analyses = identical_batch("BIG", 240, date(2025, 5, 1));
    let outcome = orchestrator.run(&analyses, today()).unwrap();

    assert_eq!(outcome.status, PlanStatus::SolverTimeout);
    assert_eq!(outcome.status_label(), "no-feasible-solution");
    assert!(outcome.assignment.is_empty());
    assert!(outcome.plan_lines.is_empty());
    assert_eq!(outcome.objective_value, None);
    assert_eq!(outcome.eligible_count, 240);
    assert_eq!(outcome.cap, 22);
}

// ==========================================
// 状态映射
// ==========================================

#[test]
fn test_infeasible_status_is_not_an_error() {
    let orchestrator = ScheduleOrchestrator::new(
        SchedulerConfig::default(),
        NoSolutionSolver(SolverStatus::Infeasible),
    )
    .unwrap();

    let outcome = orchestrator
        .run(&[AnalysisBuilder::new("A").build()], today())
        .unwrap();

    assert_eq!(outcome.status, PlanStatus::Infeasible);
    assert!(outcome.assignment.is_empty());
    assert_eq!(outcome.statistics.total_analyses, 0);
}

#[test]
fn test_feasible_solution_is_labelled_not_proven_optimal() {
    let orchestrator =
        ScheduleOrchestrator::new(SchedulerConfig::default(), FeasibleOnlySolver).unwrap();
    let analyses = identical_batch("F", 6, date(2025, 9, 1));

    let outcome = orchestrator.run(&analyses, today()).unwrap();

    assert_eq!(outcome.status, PlanStatus::Feasible);
    assert_eq!(outcome.status_label(), "feasible-not-proven-optimal");
    assert_eq!(outcome.assignment.len(), 6);
    assert!((0..HORIZON_MONTHS).all(|slot| outcome.load_of(slot) <= outcome.cap));
}

#[test]
fn test_timeout_within_budget_falls_back_to_feasible_plan() {
    let orchestrator = ScheduleOrchestrator::new(
        SchedulerConfig::default(),
        NoSolutionSolver(SolverStatus::TimeoutNoSolution),
    )
    .unwrap();
    let analyses = identical_batch("T", 30, date(2025, 7, 15));

    let outcome = orchestrator.run(&analyses, today()).unwrap();

    assert_eq!(outcome.status, PlanStatus::Feasible);
    assert_eq!(outcome.assignment.len(), 30);
    assert!((0..HORIZON_MONTHS).all(|slot| outcome.load_of(slot) <= outcome.cap));
    // 贪心解不产生超额，目标值即成本合计
    assert_eq!(outcome.objective_value, Some(outcome.statistics.cost.total));
}

// ==========================================
// 异常路径
// ==========================================

#[test]
fn test_contract_violating_values_fail_loudly() {
    let orchestrator = ScheduleOrchestrator::new(SchedulerConfig::default(), AllOnesSolver).unwrap();

    let err = orchestrator
        .run(&[AnalysisBuilder::new("A").build()], today())
        .unwrap_err();

    match err {
        SchedulerError::ModelContractViolation { analysis_id, .. } => assert_eq!(analysis_id, "A"),
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_backend_failure_is_an_error() {
    let orchestrator = ScheduleOrchestrator::new(SchedulerConfig::default(), FailingSolver).unwrap();

    let err = orchestrator
        .run(&[AnalysisBuilder::new("A").build()], today())
        .unwrap_err();

    assert!(matches!(err, SchedulerError::Solver(_)));
}

#[test]
fn test_saturated_backend_is_an_error() {
    let orchestrator = ScheduleOrchestrator::new(
        SchedulerConfig::default(),
        LpSolverBackend::with_max_in_flight(0),
    )
    .unwrap();

    let err = orchestrator
        .run(&[AnalysisBuilder::new("A").build()], today())
        .unwrap_err();

    assert!(matches!(
        err,
        SchedulerError::Solver(SolverError::Busy { in_flight: 0 })
    ));
}

#[test]
fn test_duplicate_ids_are_excluded_before_solving() {
    let orchestrator =
        ScheduleOrchestrator::new(SchedulerConfig::default(), LpSolverBackend::new()).unwrap();
    let records = vec![
        AnalysisBuilder::new("DUP").due(date(2025, 4, 1)).build(),
        AnalysisBuilder::new("DUP").due(date(2025, 9, 1)).build(),
    ];

    let outcome = orchestrator.run(&records, today()).unwrap();

    assert_eq!(outcome.eligible_count, 1);
    assert_eq!(outcome.excluded_count, 1);
    assert_eq!(outcome.assignment.len(), 1);
}
