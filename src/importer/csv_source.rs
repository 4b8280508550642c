// ==========================================
// 水质检测年度排期系统 - CSV 数据源
// ==========================================
// 表头: id, clinic_id, clinic_name, next_collection_date, outcome, periodicity
// 日期: YYYY-MM-DD
// 枚举: 大小写不敏感，兼容上游葡语取值（APROVADO/REJEITADO, MENSAL/SEMESTRAL/ANUAL）
// ==========================================
// 红线: 坏行记入 rejected 并告警，不得静默丢弃，也不得进入优化引擎
// ==========================================

use crate::domain::{Analysis, AnalysisOutcome, Periodicity};
use crate::importer::analysis_source::AnalysisSource;
use crate::importer::error::{ImportError, ImportResult};
use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

const COL_ID: &str = "id";
const COL_CLINIC_ID: &str = "clinic_id";
const COL_CLINIC_NAME: &str = "clinic_name";
const COL_NEXT_COLLECTION_DATE: &str = "next_collection_date";
const COL_OUTCOME: &str = "outcome";
const COL_PERIODICITY: &str = "periodicity";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// 被拒绝的数据行
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedRow {
    pub row: usize,     // 文件行号（表头为第 1 行）
    pub reason: String,
}

/// 导入报告
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportReport {
    pub records: Vec<Analysis>,
    pub rejected: Vec<RejectedRow>,
}

// ==========================================
// CsvAnalysisSource
// ==========================================
#[derive(Debug, Clone)]
pub struct CsvAnalysisSource {
    path: PathBuf,
}

impl CsvAnalysisSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 读取并解析，返回有效记录与被拒绝的行
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn parse_with_report(&self) -> ImportResult<ImportReport> {
        let path = self.path.as_path();

        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => {}
            Some(ext) => return Err(ImportError::UnsupportedFormat(ext.to_string())),
            None => return Err(ImportError::UnsupportedFormat(path.display().to_string())),
        }

        let file = File::open(path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(file);

        let columns: HashMap<String, usize> = reader
            .headers()?
            .iter()
            .enumerate()
            .map(|(idx, h)| (h.to_ascii_lowercase(), idx))
            .collect();

        let mut report = ImportReport::default();
        let mut seen_ids = HashSet::new();

        for (idx, result) in reader.records().enumerate() {
            let record = result?;
            let row = record
                .position()
                .map(|p| p.line() as usize)
                .unwrap_or(idx + 2);

            // 跳过完全空白的行
            if record.iter().all(|v| v.is_empty()) {
                continue;
            }

            let parsed = parse_row(&columns, &record, row).and_then(|analysis| {
                if seen_ids.insert(analysis.id.clone()) {
                    Ok(analysis)
                } else {
                    Err(ImportError::DuplicateId {
                        row,
                        id: analysis.id,
                    })
                }
            });

            match parsed {
                Ok(analysis) => report.records.push(analysis),
                Err(e) => {
                    warn!(row, reason = %e, "数据行被拒绝");
                    report.rejected.push(RejectedRow {
                        row,
                        reason: e.to_string(),
                    });
                }
            }
        }

        info!(
            accepted = report.records.len(),
            rejected = report.rejected.len(),
            "CSV 导入完成"
        );

        Ok(report)
    }
}

impl AnalysisSource for CsvAnalysisSource {
    fn fetch_analyses(&self) -> ImportResult<Vec<Analysis>> {
        Ok(self.parse_with_report()?.records)
    }
}

// ==========================================
// 行解析
// ==========================================

fn field<'r>(
    columns: &HashMap<String, usize>,
    record: &'r StringRecord,
    name: &str,
) -> Option<&'r str> {
    columns
        .get(name)
        .and_then(|&idx| record.get(idx))
        .filter(|v| !v.is_empty())
}

fn required<'r>(
    columns: &HashMap<String, usize>,
    record: &'r StringRecord,
    name: &str,
    row: usize,
) -> ImportResult<&'r str> {
    field(columns, record, name).ok_or_else(|| ImportError::FieldMissing {
        row,
        field: name.to_string(),
    })
}

fn parse_row(
    columns: &HashMap<String, usize>,
    record: &StringRecord,
    row: usize,
) -> ImportResult<Analysis> {
    let id = required(columns, record, COL_ID, row)?;
    let clinic_id = required(columns, record, COL_CLINIC_ID, row)?;
    let clinic_name = field(columns, record, COL_CLINIC_NAME).unwrap_or(clinic_id);

    let raw_date = required(columns, record, COL_NEXT_COLLECTION_DATE, row)?;
    let next_collection_date = NaiveDate::parse_from_str(raw_date, DATE_FORMAT).map_err(|_| {
        ImportError::DateFormatError {
            row,
            field: COL_NEXT_COLLECTION_DATE.to_string(),
            value: raw_date.to_string(),
        }
    })?;

    let raw_outcome = required(columns, record, COL_OUTCOME, row)?;
    let outcome =
        AnalysisOutcome::parse(raw_outcome).ok_or_else(|| ImportError::InvalidEnumValue {
            row,
            field: COL_OUTCOME.to_string(),
            value: raw_outcome.to_string(),
        })?;

    let raw_periodicity = required(columns, record, COL_PERIODICITY, row)?;
    let periodicity =
        Periodicity::parse(raw_periodicity).ok_or_else(|| ImportError::InvalidEnumValue {
            row,
            field: COL_PERIODICITY.to_string(),
            value: raw_periodicity.to_string(),
        })?;

    Ok(Analysis {
        id: id.to_string(),
        clinic_id: clinic_id.to_string(),
        clinic_name: clinic_name.to_string(),
        next_collection_date,
        outcome,
        periodicity,
    })
}
