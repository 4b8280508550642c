// ==========================================
// 水质检测年度排期系统 - 排期统计领域模型
// ==========================================
// 用途: 基线 vs 计划后 的逾期/不合格/成本统计
// 消费方: 外部报表协作方（本引擎不负责渲染）
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// ScheduleStatistics - 全局统计
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleStatistics {
    pub total_analyses: usize,
    pub baseline_overdue: usize,        // 计划前已逾期
    pub baseline_rejected: usize,       // 计划前不合格
    pub delayed_after_plan: usize,      // 计划后仍逾期
    pub cost: CostStatistics,
    pub clinics: Vec<ClinicRollup>,     // 按诊所ID排序
    pub monthly_load: Vec<MonthLoad>,   // 按槽位排序
    pub due_month_histogram: [usize; 12], // 当前到期月份分布 (1..12 → 下标 0..11)
}

// ==========================================
// CostStatistics - 成本统计
// ==========================================
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostStatistics {
    pub min: i64,
    pub max: i64,
    pub total: i64,
}

// ==========================================
// ClinicRollup - 诊所维度汇总
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClinicRollup {
    pub clinic_id: String,
    pub clinic_name: String,
    pub total: usize,
    pub overdue: usize,
    pub rejected: usize,
    pub delayed_after_plan: usize,
}

// ==========================================
// MonthLoad - 槽位负载
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthLoad {
    pub slot: usize,
    pub year: i32,
    pub month: u32,                     // 1..12
    pub assigned: usize,
    pub per_clinic: BTreeMap<String, usize>,
}
