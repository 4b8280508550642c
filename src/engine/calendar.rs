// ==========================================
// 水质检测年度排期系统 - 规划期日历
// ==========================================
// 职责: 锚点日期、"锚点 + m 月" 步进、槽位 → 实际月份
// 红线: 纯函数，不依赖时区/区域设置
// ==========================================

use crate::domain::HORIZON_MONTHS;
use crate::engine::error::{SchedulerError, SchedulerResult};
use chrono::{Datelike, NaiveDate};

/// 是否闰年
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// 某年某月的天数 (month: 1..12)
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        _ => 28,
    }
}

/// 日期向后步进 months 个自然月
///
/// # 规则
/// - 年/月按 12 进位
/// - 日超出目标月天数时截断到月末（1/31 + 1 月 = 2/28 或 2/29）
///
/// # 返回
/// - None: 超出 NaiveDate 可表示范围
pub fn add_months(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    let total = date.year() as i64 * 12 + date.month0() as i64 + months as i64;
    let year = i32::try_from(total.div_euclid(12)).ok()?;
    let month = total.rem_euclid(12) as u32 + 1;
    let day = date.day().min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day)
}

/// 锚点日期: 当月 1 日
pub fn anchor_of(today: NaiveDate) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(today.year(), today.month(), 1)
}

// ==========================================
// PlanningHorizon - 滚动 12 个月规划期
// ==========================================
// 槽位 m 对应 anchor + m 月，在构建时一次性算好
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanningHorizon {
    today: NaiveDate,
    anchor: NaiveDate,
    slot_dates: [NaiveDate; HORIZON_MONTHS],
}

impl PlanningHorizon {
    /// 以 today 所在月为起点构建规划期
    pub fn starting(today: NaiveDate) -> SchedulerResult<Self> {
        let anchor = anchor_of(today).ok_or_else(|| {
            SchedulerError::CalendarOverflow(format!("无法计算锚点日期: today={}", today))
        })?;

        let mut slot_dates = [anchor; HORIZON_MONTHS];
        for (slot, date) in slot_dates.iter_mut().enumerate() {
            *date = add_months(anchor, slot as u32).ok_or_else(|| {
                SchedulerError::CalendarOverflow(format!(
                    "日期步进越界: anchor={}, slot={}",
                    anchor, slot
                ))
            })?;
        }

        Ok(Self {
            today,
            anchor,
            slot_dates,
        })
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn anchor(&self) -> NaiveDate {
        self.anchor
    }

    /// 槽位对应的计划日期 (anchor + slot 月)
    ///
    /// # Panics
    /// slot >= HORIZON_MONTHS
    pub fn slot_date(&self, slot: usize) -> NaiveDate {
        self.slot_dates[slot]
    }

    /// 槽位对应的实际月份（0 基）
    pub fn month_real(&self, slot: usize) -> u32 {
        self.slot_date(slot).month0()
    }

    pub fn slots(&self) -> std::ops::Range<usize> {
        0..HORIZON_MONTHS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2025, 2), 28);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(2025, 4), 30);
        assert_eq!(days_in_month(2025, 12), 31);
    }

    #[test]
    fn test_add_months_carries_year() {
        assert_eq!(add_months(date(2025, 3, 1), 0), Some(date(2025, 3, 1)));
        assert_eq!(add_months(date(2025, 3, 1), 9), Some(date(2025, 12, 1)));
        assert_eq!(add_months(date(2025, 3, 1), 10), Some(date(2026, 1, 1)));
        assert_eq!(add_months(date(2025, 11, 15), 11), Some(date(2026, 10, 15)));
    }

    #[test]
    fn test_add_months_clamps_to_month_end() {
        assert_eq!(add_months(date(2025, 1, 31), 1), Some(date(2025, 2, 28)));
        assert_eq!(add_months(date(2024, 1, 31), 1), Some(date(2024, 2, 29)));
        assert_eq!(add_months(date(2025, 8, 31), 1), Some(date(2025, 9, 30)));
    }

    #[test]
    fn test_anchor_is_first_day_of_month() {
        assert_eq!(anchor_of(date(2025, 3, 17)), Some(date(2025, 3, 1)));
    }

    #[test]
    fn test_horizon_month_real_wraps_calendar_year() {
        let horizon = PlanningHorizon::starting(date(2025, 3, 10)).unwrap();
        assert_eq!(horizon.anchor(), date(2025, 3, 1));
        assert_eq!(horizon.month_real(0), 2); // 3 月
        assert_eq!(horizon.month_real(9), 11); // 12 月
        assert_eq!(horizon.month_real(10), 0); // 次年 1 月
        assert_eq!(horizon.month_real(11), 1); // 次年 2 月
        assert_eq!(horizon.slot_date(11), date(2026, 2, 1));
    }

    #[test]
    fn test_horizon_starting_in_january_matches_calendar_year() {
        let horizon = PlanningHorizon::starting(date(2026, 1, 20)).unwrap();
        for slot in horizon.slots() {
            assert_eq!(horizon.month_real(slot), slot as u32);
        }
    }

    #[test]
    #[should_panic]
    fn test_slot_beyond_horizon_panics() {
        let horizon = PlanningHorizon::starting(date(2025, 3, 10)).unwrap();
        horizon.slot_date(HORIZON_MONTHS);
    }
}
