// ==========================================
// 水质检测年度排期系统 - 排期结果领域模型
// ==========================================
// 红线: 每条可排检测恰好分配到一个月份槽位
// 生命周期: 单次运行内构建，返回后由调用方处置（引擎不落库）
// ==========================================

use crate::domain::statistics::ScheduleStatistics;
use crate::domain::types::PlanStatus;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// 规划期月份数（滚动 12 个月）
pub const HORIZON_MONTHS: usize = 12;

/// 排期映射: 检测ID → 月份槽位 (0..11, 相对锚点)
pub type Assignment = BTreeMap<String, usize>;

// ==========================================
// PlannedCollection - 单条检测的排期明细
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedCollection {
    pub analysis_id: String,
    pub clinic_id: String,
    pub slot: usize,                    // 月份槽位
    pub planned_date: NaiveDate,        // 计划采样日期 = anchor + slot 月
    pub cost: i64,                      // 该槽位下的实际成本
    pub simulated_delay_days: i64,      // 计划执行后的模拟逾期天数
}

impl PlannedCollection {
    /// 计划执行后是否仍逾期
    pub fn still_delayed(&self) -> bool {
        self.simulated_delay_days > 0
    }
}

/// 未进入排期的记录及原因
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExcludedAnalysis {
    pub analysis_id: String,
    pub reason: String,
}

// ==========================================
// ScheduleOutcome - 一次排期运行的完整输出
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleOutcome {
    pub run_id: Uuid,
    pub today: NaiveDate,
    pub anchor: NaiveDate,              // 当月 1 日
    pub status: PlanStatus,

    // ===== 输入规模 =====
    pub eligible_count: usize,
    pub excluded_count: usize,
    pub excluded: Vec<ExcludedAnalysis>,
    pub cap: usize,                     // 每月容量上限

    // ===== 求解输出 =====
    pub objective_value: Option<i64>,
    pub assignment: Assignment,
    pub plan_lines: Vec<PlannedCollection>,

    // ===== 统计 =====
    pub statistics: ScheduleStatistics,

    // 配置快照 (JSON)
    pub config_snapshot_json: String,
}

impl ScheduleOutcome {
    /// 对外暴露的求解状态标签
    pub fn status_label(&self) -> &'static str {
        self.status.surface_label()
    }

    /// 某槽位的分配数量
    pub fn load_of(&self, slot: usize) -> usize {
        self.assignment.values().filter(|&&m| m == slot).count()
    }
}
