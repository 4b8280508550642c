// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

use chrono::NaiveDate;
use water_analysis_aps::domain::{Analysis, AnalysisOutcome, Periodicity};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ==========================================
// Analysis 构建器
// ==========================================

pub struct AnalysisBuilder {
    id: String,
    clinic_id: String,
    clinic_name: Option<String>,
    next_collection_date: NaiveDate,
    outcome: AnalysisOutcome,
    periodicity: Periodicity,
}

impl AnalysisBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            clinic_id: "CLINIC_01".to_string(),
            clinic_name: None,
            next_collection_date: date(2025, 6, 15),
            outcome: AnalysisOutcome::Approved,
            periodicity: Periodicity::Annual,
        }
    }

    pub fn clinic(mut self, clinic_id: &str) -> Self {
        self.clinic_id = clinic_id.to_string();
        self
    }

    pub fn clinic_name(mut self, name: &str) -> Self {
        self.clinic_name = Some(name.to_string());
        self
    }

    pub fn due(mut self, due: NaiveDate) -> Self {
        self.next_collection_date = due;
        self
    }

    pub fn rejected(mut self) -> Self {
        self.outcome = AnalysisOutcome::Rejected;
        self
    }

    pub fn periodicity(mut self, periodicity: Periodicity) -> Self {
        self.periodicity = periodicity;
        self
    }

    pub fn monthly(self) -> Self {
        self.periodicity(Periodicity::Monthly)
    }

    pub fn semiannual(self) -> Self {
        self.periodicity(Periodicity::Semiannual)
    }

    pub fn build(self) -> Analysis {
        let clinic_name = self
            .clinic_name
            .unwrap_or_else(|| format!("Clinic {}", self.clinic_id));
        Analysis {
            id: self.id,
            clinic_id: self.clinic_id,
            clinic_name,
            next_collection_date: self.next_collection_date,
            outcome: self.outcome,
            periodicity: self.periodicity,
        }
    }
}

/// 批量生成同一到期日的检测
pub fn identical_batch(prefix: &str, count: usize, due: NaiveDate) -> Vec<Analysis> {
    (0..count)
        .map(|i| AnalysisBuilder::new(&format!("{}_{:03}", prefix, i)).due(due).build())
        .collect()
}
