// ==========================================
// 水质检测年度排期系统 - 排期准入过滤
// ==========================================
// 红线: 只有 SEMIANNUAL / ANNUAL 检测进入年度排期
// ==========================================
// 职责: 周期过滤 + 重复ID拦截
// 输入: 外部数据源提供的全部检测记录
// 输出: 可排检测 + 被排除记录及原因
// ==========================================

use crate::domain::{Analysis, ExcludedAnalysis};
use std::collections::HashSet;
use tracing::{debug, instrument};

/// 准入结果
#[derive(Debug, Clone, Default)]
pub struct EligibilityReport {
    pub eligible: Vec<Analysis>,
    pub excluded: Vec<ExcludedAnalysis>,
}

impl EligibilityReport {
    pub fn is_empty(&self) -> bool {
        self.eligible.is_empty()
    }
}

// ==========================================
// EligibilityFilter - 排期准入过滤器
// ==========================================
// 红线: 无副作用，不修改输入
pub struct EligibilityFilter;

impl EligibilityFilter {
    pub fn new() -> Self {
        Self
    }

    /// 判定单条记录是否可排
    pub fn is_eligible(analysis: &Analysis) -> bool {
        analysis.periodicity.is_yearly_plannable()
    }

    /// 过滤检测记录
    ///
    /// # 规则
    /// 1. 周期为 MONTHLY → 排除（月度检测不做年度重排）
    /// 2. ID 已出现过 → 排除（保证排期映射一对一）
    /// 3. 其余 → 可排，保持输入顺序
    #[instrument(skip(self, analyses), fields(input_count = analyses.len()))]
    pub fn select(&self, analyses: &[Analysis]) -> EligibilityReport {
        let mut report = EligibilityReport::default();
        let mut seen: HashSet<&str> = HashSet::new();

        for analysis in analyses {
            if !Self::is_eligible(analysis) {
                report.excluded.push(ExcludedAnalysis {
                    analysis_id: analysis.id.clone(),
                    reason: format!("EXCLUDED: periodicity={}", analysis.periodicity),
                });
                continue;
            }

            if !seen.insert(analysis.id.as_str()) {
                report.excluded.push(ExcludedAnalysis {
                    analysis_id: analysis.id.clone(),
                    reason: "EXCLUDED: duplicate analysis id".to_string(),
                });
                continue;
            }

            report.eligible.push(analysis.clone());
        }

        debug!(
            eligible_count = report.eligible.len(),
            excluded_count = report.excluded.len(),
            "排期准入过滤完成"
        );

        report
    }
}

impl Default for EligibilityFilter {
    fn default() -> Self {
        Self::new()
    }
}
