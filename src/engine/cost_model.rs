// ==========================================
// 水质检测年度排期系统 - 成本模型
// ==========================================
// 职责: 计算 "检测 i 排入槽位 m" 的标量成本
// 红线: 纯函数、确定性、非负；目标函数与事后统计共用同一实现
// 说明: 乘加均为饱和运算，极端权重下成本封顶于 i64::MAX
// ==========================================
//
// cost(i, m) = delay_days * W_DELAY_DAY
//            + (delay_days * W_REJECTED_DELAY_DAY  若不合格)
//            + |month_real(m) - ideal_month_i| * W_MONTH_DEVIATION

use crate::config::CostWeights;
use crate::domain::Analysis;
use crate::engine::calendar::PlanningHorizon;
use chrono::NaiveDate;
use serde::Serialize;

/// 成本分项
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CostBreakdown {
    pub delay_days: i64,
    pub month_deviation: i64,
    pub delay_cost: i64,
    pub rejected_delay_cost: i64,
    pub deviation_cost: i64,
}

impl CostBreakdown {
    pub fn total(&self) -> i64 {
        self.delay_cost
            .saturating_add(self.rejected_delay_cost)
            .saturating_add(self.deviation_cost)
    }
}

// ==========================================
// CostModel - 成本模型
// ==========================================
#[derive(Debug, Clone, Copy)]
pub struct CostModel {
    weights: CostWeights,
}

impl CostModel {
    pub fn new(weights: CostWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &CostWeights {
        &self.weights
    }

    /// 成本分项
    ///
    /// # 参数
    /// - analysis: 检测记录
    /// - today: 参考日期
    /// - month_real: 候选槽位对应的实际月份（0 基）
    pub fn breakdown(&self, analysis: &Analysis, today: NaiveDate, month_real: u32) -> CostBreakdown {
        let delay_days = analysis.delay_days(today);
        let month_deviation = (month_real as i64 - analysis.ideal_month() as i64).abs();

        let rejected_delay_cost = if analysis.is_rejected() {
            delay_days.saturating_mul(self.weights.rejected_delay_day)
        } else {
            0
        };

        CostBreakdown {
            delay_days,
            month_deviation,
            delay_cost: delay_days.saturating_mul(self.weights.delay_day),
            rejected_delay_cost,
            deviation_cost: month_deviation.saturating_mul(self.weights.month_deviation),
        }
    }

    /// 成本（按实际月份）
    pub fn cost(&self, analysis: &Analysis, today: NaiveDate, month_real: u32) -> i64 {
        self.breakdown(analysis, today, month_real).total()
    }

    /// 成本（按槽位）
    pub fn cost_for_slot(&self, analysis: &Analysis, horizon: &PlanningHorizon, slot: usize) -> i64 {
        self.cost(analysis, horizon.today(), horizon.month_real(slot))
    }
}
