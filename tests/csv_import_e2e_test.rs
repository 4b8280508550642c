// ==========================================
// CSV 导入端到端测试
// ==========================================
// 测试范围: CSV 文件 → 行级校验 → 排期 → 结果
// ==========================================

mod helpers;

use helpers::test_data_builder::date;
use std::io::Write;
use tempfile::Builder;
use water_analysis_aps::engine::{LpSolverBackend, ScheduleOrchestrator};
use water_analysis_aps::importer::{AnalysisSource, CsvAnalysisSource, ImportError};
use water_analysis_aps::{logging, PlanStatus, SchedulerConfig};

const HEADER: &str = "id,clinic_id,clinic_name,next_collection_date,outcome,periodicity\n";

fn write_csv(body: &str) -> tempfile::NamedTempFile {
    let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
    file.write_all(HEADER.as_bytes()).unwrap();
    file.write_all(body.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_csv_to_schedule() {
    logging::init_test();
    let file = write_csv(
        "A,C1,Clinica Norte,2024-01-10,APROVADO,ANUAL\n\
         B,C1,Clinica Norte,2024-06-10,REJEITADO,ANUAL\n\
         C,C2,Clinica Sul,2025-01-10,approved,annual\n\
         M,C2,Clinica Sul,2025-02-01,approved,MENSAL\n\
         X,C2,Clinica Sul,not-a-date,approved,annual\n",
    );

    let source = CsvAnalysisSource::new(file.path());
    let report = source.parse_with_report().unwrap();
    assert_eq!(report.records.len(), 4);
    assert_eq!(report.rejected.len(), 1);
    assert_eq!(report.rejected[0].row, 6);

    let orchestrator =
        ScheduleOrchestrator::new(SchedulerConfig::default(), LpSolverBackend::new()).unwrap();
    let outcome = orchestrator.run_from_source(&source, date(2025, 3, 10)).unwrap();

    assert_eq!(outcome.status, PlanStatus::Optimal);
    assert_eq!(outcome.eligible_count, 3);
    assert_eq!(outcome.excluded_count, 1);
    assert_eq!(outcome.assignment.get("B"), Some(&3));
    assert!(!outcome.assignment.contains_key("X"));
    assert_eq!(outcome.statistics.cost.total, 6535);

    let clinic = &outcome.statistics.clinics[0];
    assert_eq!(clinic.clinic_id, "C1");
    assert_eq!(clinic.clinic_name, "Clinica Norte");
    assert_eq!(clinic.rejected, 1);

    // 结果可序列化为 JSON
    let json = serde_json::to_string(&outcome).unwrap();
    assert!(json.contains("\"status\":\"OPTIMAL\""));
}

#[test]
fn test_header_only_file_is_empty_input() {
    let file = write_csv("");
    let orchestrator =
        ScheduleOrchestrator::new(SchedulerConfig::default(), LpSolverBackend::new()).unwrap();

    let outcome = orchestrator
        .run_from_source(&CsvAnalysisSource::new(file.path()), date(2025, 3, 10))
        .unwrap();

    assert_eq!(outcome.status, PlanStatus::EmptyInput);
}

#[test]
fn test_missing_file_propagates_import_error() {
    let source = CsvAnalysisSource::new("/nonexistent/analyses.csv");
    assert!(matches!(
        source.fetch_analyses(),
        Err(ImportError::FileNotFound(_))
    ));

    let orchestrator =
        ScheduleOrchestrator::new(SchedulerConfig::default(), LpSolverBackend::new()).unwrap();
    assert!(orchestrator
        .run_from_source(&source, date(2025, 3, 10))
        .is_err());
}
