// ==========================================
// 水质检测年度排期系统 - 命令行入口
// ==========================================
// 用法:
//   water-analysis-aps <analyses.csv> [today YYYY-MM-DD] [config.json]
//
// 环境变量 WATER_APS_<KEY> 覆盖配置项（见 config::config_keys）
// 排期结果以 JSON 输出到 stdout，日志输出到 stderr
// ==========================================

use anyhow::{bail, Context};
use chrono::{Local, NaiveDate};
use water_analysis_aps::config::ConfigManager;
use water_analysis_aps::importer::CsvAnalysisSource;
use water_analysis_aps::{logging, LpSolverBackend, ScheduleOrchestrator, APP_NAME, VERSION};

fn main() -> anyhow::Result<()> {
    logging::init();

    let mut args = std::env::args().skip(1);
    let Some(csv_path) = args.next() else {
        bail!("用法: water-analysis-aps <analyses.csv> [today YYYY-MM-DD] [config.json]");
    };

    let today = match args
        .next()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
    {
        Some(raw) => NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
            .with_context(|| format!("参考日期格式错误（期望 YYYY-MM-DD）: {}", raw))?,
        None => Local::now().date_naive(),
    };

    let mut manager = match args.next() {
        Some(config_path) => ConfigManager::from_json_file(&config_path)
            .with_context(|| format!("配置加载失败: {}", config_path))?,
        None => ConfigManager::new(),
    };
    manager.apply_env_overrides()?;
    let config = manager.into_validated()?;

    tracing::info!(app = APP_NAME, version = VERSION, today = %today, "启动排期");

    let source = CsvAnalysisSource::new(&csv_path);
    let report = source.parse_with_report()?;
    if !report.rejected.is_empty() {
        tracing::warn!(rejected = report.rejected.len(), "部分数据行在导入时被拒绝");
    }
    tracing::debug!(source = %source.path().display(), accepted = report.records.len(), "数据源读取完成");

    let orchestrator = ScheduleOrchestrator::new(config, LpSolverBackend::new())?;
    let outcome = orchestrator.run(&report.records, today)?;

    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}
