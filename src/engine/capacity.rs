// ==========================================
// 水质检测年度排期系统 - 月度容量约束
// ==========================================
// 红线: 每月分配数 <= cap = ceil(slack_factor * N / 12)
// ==========================================
// 硬约束: Σ_i x[i,m] <= cap
// 软约束: excess_m >= load_m - cap, excess_m >= 0，目标权重 W_IMBALANCE
// 说明: 硬约束存在时 excess_m 在任何可行解上恒为 0，保留该结构以保持目标函数口径
// ==========================================

use crate::domain::HORIZON_MONTHS;
use crate::engine::solver::{IntegerProgram, LinearExpr, VarId};
use tracing::debug;

// ==========================================
// CapacityConstraintBuilder
// ==========================================
#[derive(Debug, Clone, Copy)]
pub struct CapacityConstraintBuilder {
    slack_factor: f64,
}

impl CapacityConstraintBuilder {
    pub fn new(slack_factor: f64) -> Self {
        Self { slack_factor }
    }

    /// 每月容量上限
    ///
    /// # 规则
    /// - cap = ceil(slack_factor * N / 12)
    /// - N = 0 → 0
    pub fn compute_cap(&self, analysis_count: usize) -> usize {
        if analysis_count == 0 {
            return 0;
        }
        (self.slack_factor * analysis_count as f64 / HORIZON_MONTHS as f64).ceil() as usize
    }

    /// 写入容量约束
    ///
    /// # 参数
    /// - program: 模型
    /// - assign_vars: x[i][m]
    /// - cap: 每月上限
    ///
    /// # 返回
    /// 每月的 excess 变量（由调用方按 W_IMBALANCE 计入目标）
    pub fn apply(
        &self,
        program: &mut IntegerProgram,
        assign_vars: &[[VarId; HORIZON_MONTHS]],
        cap: usize,
    ) -> Vec<VarId> {
        let n = assign_vars.len() as i64;
        let cap = cap as i64;
        let mut excess_vars = Vec::with_capacity(HORIZON_MONTHS);

        for m in 0..HORIZON_MONTHS {
            let load = LinearExpr::sum(assign_vars.iter().map(|row| row[m]));

            // 硬约束
            program.add_le(format!("cap_{}", m), load.clone(), cap);

            // excess_m - load_m >= -cap
            let excess = program.new_int_var(0, n, format!("excess_{}", m));
            let mut soft = load;
            for term in soft.terms.iter_mut() {
                term.1 = -term.1;
            }
            soft.add_term(excess, 1);
            program.add_ge(format!("excess_over_cap_{}", m), soft, -cap);
            program.add_ge(format!("excess_non_negative_{}", m), LinearExpr::sum([excess]), 0);

            excess_vars.push(excess);
        }

        debug!(cap, analysis_count = n, "容量约束写入完成");
        excess_vars
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_cap() {
        let builder = CapacityConstraintBuilder::new(1.1);
        assert_eq!(builder.compute_cap(0), 0);
        assert_eq!(builder.compute_cap(1), 1);
        assert_eq!(builder.compute_cap(3), 1);
        assert_eq!(builder.compute_cap(12), 2);
        assert_eq!(builder.compute_cap(100), 10);

        let tight = CapacityConstraintBuilder::new(1.0);
        assert_eq!(tight.compute_cap(12), 1);
        assert_eq!(tight.compute_cap(13), 2);
    }

    #[test]
    fn test_cap_always_covers_all_analyses() {
        for slack in [1.0, 1.1, 1.5, 2.0] {
            let builder = CapacityConstraintBuilder::new(slack);
            for n in 1..200 {
                assert!(builder.compute_cap(n) * HORIZON_MONTHS >= n);
            }
        }
    }

    #[test]
    fn test_apply_adds_hard_and_soft_constraints() {
        let mut program = IntegerProgram::new("cap");
        let rows: Vec<[VarId; HORIZON_MONTHS]> = (0..2)
            .map(|i| {
                let mut row = Vec::with_capacity(HORIZON_MONTHS);
                for m in 0..HORIZON_MONTHS {
                    row.push(program.new_bool_var(format!("x_{}_{}", i, m)));
                }
                row.try_into().unwrap()
            })
            .collect();

        let excess = CapacityConstraintBuilder::new(1.1).apply(&mut program, &rows, 1);

        assert_eq!(excess.len(), HORIZON_MONTHS);
        assert_eq!(program.num_constraints(), 3 * HORIZON_MONTHS);

        // 两个检测都放在槽位 0: 违反硬约束
        let mut values = vec![0_i64; program.num_vars()];
        values[rows[0][0].index()] = 1;
        values[rows[1][0].index()] = 1;
        assert!(!program.is_feasible(&values));

        // 分开放置: 满足，excess 为 0
        values[rows[1][0].index()] = 0;
        values[rows[1][1].index()] = 1;
        assert!(program.is_feasible(&values));
    }
}
