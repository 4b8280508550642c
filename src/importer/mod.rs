// ==========================================
// 水质检测年度排期系统 - 导入层
// ==========================================
// 职责: 外部数据 → Analysis 记录
// 支持: 内存, CSV
// 红线: 行级数据问题在此拒绝，不进入优化引擎
// ==========================================

pub mod analysis_source;
pub mod csv_source;
pub mod error;

pub use analysis_source::{AnalysisSource, InMemoryAnalysisSource};
pub use csv_source::{CsvAnalysisSource, ImportReport, RejectedRow};
pub use error::{ImportError, ImportResult};
