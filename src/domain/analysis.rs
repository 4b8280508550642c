// ==========================================
// 水质检测年度排期系统 - 检测记录领域模型
// ==========================================
// 红线: 单次排期运行内不可变
// 用途: 外部数据源提供，排期引擎只读
// ==========================================

use crate::domain::types::{AnalysisOutcome, Periodicity};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

// ==========================================
// Analysis - 水质检测记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    pub id: String,                     // 检测ID
    pub clinic_id: String,              // 所属诊所ID
    pub clinic_name: String,            // 所属诊所名称
    pub next_collection_date: NaiveDate, // 下次采样日期（到期日）
    pub outcome: AnalysisOutcome,       // 最近一次检测结果
    pub periodicity: Periodicity,       // 检测周期
}

impl Analysis {
    /// 逾期天数: max(0, today - due_date)
    pub fn delay_days(&self, today: NaiveDate) -> i64 {
        today
            .signed_duration_since(self.next_collection_date)
            .num_days()
            .max(0)
    }

    /// 理想月份（0 基）
    pub fn ideal_month(&self) -> u32 {
        self.next_collection_date.month0()
    }

    pub fn is_rejected(&self) -> bool {
        self.outcome == AnalysisOutcome::Rejected
    }

    /// 当前是否已逾期（到期日严格早于今天）
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.next_collection_date < today
    }
}
