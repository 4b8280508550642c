// ==========================================
// 水质检测年度排期系统 - 检测数据源 Trait
// ==========================================
// 职责: 定义 "提供检测记录" 的接口（持久化由外部协作方负责）
// 实现者: InMemoryAnalysisSource, CsvAnalysisSource
// ==========================================

use crate::domain::Analysis;
use crate::importer::error::ImportResult;

// ==========================================
// AnalysisSource Trait
// ==========================================
pub trait AnalysisSource {
    /// 读取全部检测记录
    ///
    /// # 返回
    /// - Ok(Vec<Analysis>): 已通过行级校验的记录（未做可排性过滤）
    /// - Err: 数据源整体不可用
    fn fetch_analyses(&self) -> ImportResult<Vec<Analysis>>;
}

/// 内存数据源
#[derive(Debug, Clone, Default)]
pub struct InMemoryAnalysisSource {
    analyses: Vec<Analysis>,
}

impl InMemoryAnalysisSource {
    pub fn new(analyses: Vec<Analysis>) -> Self {
        Self { analyses }
    }
}

impl AnalysisSource for InMemoryAnalysisSource {
    fn fetch_analyses(&self) -> ImportResult<Vec<Analysis>> {
        Ok(self.analyses.clone())
    }
}

impl<T: AnalysisSource + ?Sized> AnalysisSource for &T {
    fn fetch_analyses(&self) -> ImportResult<Vec<Analysis>> {
        (**self).fetch_analyses()
    }
}
