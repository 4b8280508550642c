// ==========================================
// 水质检测年度排期系统 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 说明: 单行数据问题记入 ImportReport.rejected，不中止导入；
//       这里的错误只表示整个数据源不可用
// ==========================================

use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .csv）")]
    UnsupportedFormat(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    // ===== 行级错误（用于拒绝原因）=====
    #[error("必填字段缺失 (行 {row}, 字段 {field})")]
    FieldMissing { row: usize, field: String },

    #[error("日期格式错误 (行 {row}, 字段 {field}): 期望 YYYY-MM-DD，实际 {value}")]
    DateFormatError {
        row: usize,
        field: String,
        value: String,
    },

    #[error("枚举值非法 (行 {row}, 字段 {field}): {value}")]
    InvalidEnumValue {
        row: usize,
        field: String,
        value: String,
    },

    #[error("检测ID重复 (行 {row}): {id}")]
    DuplicateId { row: usize, id: String },

    // ===== 通用错误 =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
