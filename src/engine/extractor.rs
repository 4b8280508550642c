// ==========================================
// 水质检测年度排期系统 - 求解结果提取
// ==========================================
// 职责: 读取 x[i,m] 取值 → 排期映射
// 红线: 某检测取值为 1 的变量数 != 1 时立即报错（模型/求解器契约违反）
// ==========================================

use crate::domain::{Analysis, Assignment, HORIZON_MONTHS};
use crate::engine::error::{SchedulerError, SchedulerResult};
use crate::engine::solver::VarId;
use tracing::error;

pub struct ResultExtractor;

impl ResultExtractor {
    /// 提取排期映射
    ///
    /// # 参数
    /// - analyses: 可排检测（与 assign_vars 行顺序一致）
    /// - assign_vars: x[i][m]
    /// - values: 求解器返回的变量取值（按 VarId 下标）
    pub fn extract(
        analyses: &[Analysis],
        assign_vars: &[[VarId; HORIZON_MONTHS]],
        values: &[i64],
    ) -> SchedulerResult<Assignment> {
        if analyses.len() != assign_vars.len() {
            return Err(Self::violation(
                "*",
                format!(
                    "检测数与变量行数不一致: analyses={}, rows={}",
                    analyses.len(),
                    assign_vars.len()
                ),
            ));
        }

        let mut assignment = Assignment::new();

        for (analysis, row) in analyses.iter().zip(assign_vars) {
            let mut chosen = Vec::with_capacity(1);

            for (m, var) in row.iter().enumerate() {
                match values.get(var.index()) {
                    Some(0) => {}
                    Some(1) => chosen.push(m),
                    Some(other) => {
                        return Err(Self::violation(
                            &analysis.id,
                            format!("布尔变量取值非法: slot={}, value={}", m, other),
                        ))
                    }
                    None => {
                        return Err(Self::violation(
                            &analysis.id,
                            format!("缺少变量取值: slot={}, var_index={}", m, var.index()),
                        ))
                    }
                }
            }

            if chosen.len() != 1 {
                return Err(Self::violation(
                    &analysis.id,
                    format!("取值为 1 的槽位数={}，期望 1 (slots={:?})", chosen.len(), chosen),
                ));
            }

            if assignment.insert(analysis.id.clone(), chosen[0]).is_some() {
                return Err(Self::violation(&analysis.id, "检测ID重复".to_string()));
            }
        }

        Ok(assignment)
    }

    fn violation(analysis_id: &str, detail: String) -> SchedulerError {
        error!(analysis_id = %analysis_id, detail = %detail, "模型契约违反");
        SchedulerError::ModelContractViolation {
            analysis_id: analysis_id.to_string(),
            detail,
        }
    }
}
