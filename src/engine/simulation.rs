// ==========================================
// 水质检测年度排期系统 - 计划后模拟与统计
// ==========================================
// 职责: 基于排期映射生成明细与统计（基线 vs 计划后）
// 输入: 可排检测 + 排期映射 + 规划期 + 成本模型
// 输出: PlannedCollection 明细 + ScheduleStatistics
// ==========================================
// 红线: 无状态，纯函数；成本与目标函数共用 CostModel
// ==========================================

use crate::domain::{
    Analysis, Assignment, ClinicRollup, CostStatistics, MonthLoad, PlannedCollection,
    ScheduleStatistics, HORIZON_MONTHS,
};
use crate::engine::calendar::PlanningHorizon;
use crate::engine::cost_model::CostModel;
use crate::engine::error::{SchedulerError, SchedulerResult};
use chrono::Datelike;
use std::collections::BTreeMap;
use tracing::debug;

/// 模拟输出
#[derive(Debug, Clone, Default)]
pub struct SimulationReport {
    pub plan_lines: Vec<PlannedCollection>,
    pub statistics: ScheduleStatistics,
}

pub struct SimulationEngine {
    cost_model: CostModel,
}

impl SimulationEngine {
    pub fn new(cost_model: CostModel) -> Self {
        Self { cost_model }
    }

    /// 模拟计划执行
    ///
    /// # 规则
    /// - 模拟采样日期 = 槽位日期（锚点 + slot 月）
    /// - 模拟逾期天数 = max(0, 模拟采样日期 - 到期日)
    /// - 成本按分配槽位计算
    ///
    /// # 返回
    /// - Err(ModelContractViolation): 某检测未出现在排期映射中，或槽位越界
    pub fn simulate(
        &self,
        analyses: &[Analysis],
        assignment: &Assignment,
        horizon: &PlanningHorizon,
    ) -> SchedulerResult<SimulationReport> {
        let today = horizon.today();
        let mut plan_lines = Vec::with_capacity(analyses.len());
        let mut clinics: BTreeMap<String, ClinicRollup> = BTreeMap::new();
        let mut monthly_load: Vec<MonthLoad> = horizon
            .slots()
            .map(|slot| {
                let date = horizon.slot_date(slot);
                MonthLoad {
                    slot,
                    year: date.year(),
                    month: date.month(),
                    assigned: 0,
                    per_clinic: BTreeMap::new(),
                }
            })
            .collect();
        let mut histogram = [0_usize; HORIZON_MONTHS];

        let mut baseline_overdue = 0;
        let mut baseline_rejected = 0;
        let mut delayed_after_plan = 0;

        for analysis in analyses {
            let slot = Self::slot_of(analysis, assignment)?;
            let planned_date = horizon.slot_date(slot);
            let line = PlannedCollection {
                analysis_id: analysis.id.clone(),
                clinic_id: analysis.clinic_id.clone(),
                slot,
                planned_date,
                cost: self.cost_model.cost_for_slot(analysis, horizon, slot),
                simulated_delay_days: (planned_date - analysis.next_collection_date)
                    .num_days()
                    .max(0),
            };

            let overdue = analysis.is_overdue(today);
            let rejected = analysis.is_rejected();
            let still_delayed = line.still_delayed();

            baseline_overdue += usize::from(overdue);
            baseline_rejected += usize::from(rejected);
            delayed_after_plan += usize::from(still_delayed);
            histogram[analysis.ideal_month() as usize] += 1;

            let rollup = clinics
                .entry(analysis.clinic_id.clone())
                .or_insert_with(|| ClinicRollup {
                    clinic_id: analysis.clinic_id.clone(),
                    clinic_name: analysis.clinic_name.clone(),
                    ..Default::default()
                });
            rollup.total += 1;
            rollup.overdue += usize::from(overdue);
            rollup.rejected += usize::from(rejected);
            rollup.delayed_after_plan += usize::from(still_delayed);

            let load = &mut monthly_load[slot];
            load.assigned += 1;
            *load.per_clinic.entry(analysis.clinic_id.clone()).or_insert(0) += 1;

            plan_lines.push(line);
        }

        let cost = Self::cost_statistics(&plan_lines);

        debug!(
            total = analyses.len(),
            baseline_overdue,
            delayed_after_plan,
            total_cost = cost.total,
            "计划后模拟完成"
        );

        Ok(SimulationReport {
            plan_lines,
            statistics: ScheduleStatistics {
                total_analyses: analyses.len(),
                baseline_overdue,
                baseline_rejected,
                delayed_after_plan,
                cost,
                clinics: clinics.into_values().collect(),
                monthly_load,
                due_month_histogram: histogram,
            },
        })
    }

    fn slot_of(analysis: &Analysis, assignment: &Assignment) -> SchedulerResult<usize> {
        match assignment.get(&analysis.id) {
            Some(&slot) if slot < HORIZON_MONTHS => Ok(slot),
            Some(&slot) => Err(SchedulerError::ModelContractViolation {
                analysis_id: analysis.id.clone(),
                detail: format!("槽位越界: {}", slot),
            }),
            None => Err(SchedulerError::ModelContractViolation {
                analysis_id: analysis.id.clone(),
                detail: "排期映射缺少该检测".to_string(),
            }),
        }
    }

    /// 空集合时 min/max/total 均为 0
    fn cost_statistics(lines: &[PlannedCollection]) -> CostStatistics {
        CostStatistics {
            min: lines.iter().map(|l| l.cost).min().unwrap_or(0),
            max: lines.iter().map(|l| l.cost).max().unwrap_or(0),
            total: lines.iter().map(|l| l.cost).sum(),
        }
    }
}
