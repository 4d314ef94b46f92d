// ==========================================
// 设备绩效指标引擎 - 统计周期解析器
// ==========================================
// 职责: 将用户选择的窗口解析为闭区间 [start, end] 及天数
// 输入: PeriodSpec (自然年 / 自定义区间)
// 输出: ResolvedPeriod
// ==========================================

use crate::domain::period::{PeriodSpec, ResolvedPeriod};
use crate::engine::error::{EngineError, EngineResult};
use chrono::{Datelike, NaiveDate};

// ==========================================
// PeriodResolver - 统计周期解析器
// ==========================================
// 红线: 无状态,所有方法都是纯函数
#[derive(Debug, Default, Clone, Copy)]
pub struct PeriodResolver;

impl PeriodResolver {
    pub fn new() -> Self {
        Self
    }

    /// 解析统计窗口
    ///
    /// # 规则
    /// - Year: 当年 1月1日 ~ 12月31日
    /// - Range: 原样透传, start > end 时返回 InvalidPeriod
    /// - total_days = (end - start) 的整天数 + 1 (两端都包含)
    pub fn resolve(&self, spec: &PeriodSpec) -> EngineResult<ResolvedPeriod> {
        let (start, end) = match *spec {
            PeriodSpec::Year { year } => {
                let start =
                    NaiveDate::from_ymd_opt(year, 1, 1).ok_or(EngineError::InvalidYear(year))?;
                let end =
                    NaiveDate::from_ymd_opt(year, 12, 31).ok_or(EngineError::InvalidYear(year))?;
                (start, end)
            }
            PeriodSpec::Range { start, end } => {
                if start > end {
                    return Err(EngineError::InvalidPeriod { start, end });
                }
                (start, end)
            }
        };

        Ok(Self::closed_range(start, end))
    }

    /// 解析某年某月的自然月窗口
    pub fn resolve_for_month(&self, year: i32, month: u32) -> EngineResult<ResolvedPeriod> {
        let start = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or(EngineError::InvalidMonth { year, month })?;
        let end = last_day_of_month(start).ok_or(EngineError::InvalidMonth { year, month })?;
        Ok(Self::closed_range(start, end))
    }

    /// 按自然月切分已解析的周期
    ///
    /// 首尾两段可能不是整月,中间各段都是完整自然月。
    /// 结果按时间升序排列且首尾相接。
    pub fn split_by_month(&self, period: &ResolvedPeriod) -> EngineResult<Vec<ResolvedPeriod>> {
        let mut parts = Vec::new();
        if period.start > period.end {
            return Ok(parts);
        }

        let mut cursor = period.start;
        loop {
            let month = self.resolve_for_month(cursor.year(), cursor.month())?;
            let part_end = month.end.min(period.end);
            parts.push(Self::closed_range(cursor, part_end));

            if part_end >= period.end {
                break;
            }
            cursor = match part_end.succ_opt() {
                Some(d) => d,
                None => break,
            };
        }

        Ok(parts)
    }

    fn closed_range(start: NaiveDate, end: NaiveDate) -> ResolvedPeriod {
        ResolvedPeriod {
            start,
            end,
            total_days: (end - start).num_days() + 1,
        }
    }
}

/// 所在月份的最后一天
fn last_day_of_month(date: NaiveDate) -> Option<NaiveDate> {
    let (y, m) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(y, m, 1)?.pred_opt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_resolve_year() {
        let p = PeriodResolver::new()
            .resolve(&PeriodSpec::Year { year: 2023 })
            .unwrap();
        assert_eq!(p.start, d(2023, 1, 1));
        assert_eq!(p.end, d(2023, 12, 31));
        assert_eq!(p.total_days, 365);
    }

    #[test]
    fn test_resolve_leap_year() {
        let p = PeriodResolver::new()
            .resolve(&PeriodSpec::Year { year: 2024 })
            .unwrap();
        assert_eq!(p.total_days, 366);
        assert_eq!(p.total_hours(), 366.0 * 24.0);
    }

    #[test]
    fn test_resolve_range_inclusive() {
        let p = PeriodResolver::new()
            .resolve(&PeriodSpec::Range {
                start: d(2024, 5, 1),
                end: d(2024, 5, 1),
            })
            .unwrap();
        assert_eq!(p.total_days, 1);

        let p = PeriodResolver::new()
            .resolve(&PeriodSpec::Range {
                start: d(2024, 5, 1),
                end: d(2024, 5, 2),
            })
            .unwrap();
        assert_eq!(p.total_days, 2);
    }

    #[test]
    fn test_resolve_range_start_after_end() {
        let err = PeriodResolver::new()
            .resolve(&PeriodSpec::Range {
                start: d(2024, 5, 3),
                end: d(2024, 5, 1),
            })
            .unwrap_err();
        assert_eq!(
            err,
            EngineError::InvalidPeriod {
                start: d(2024, 5, 3),
                end: d(2024, 5, 1)
            }
        );
    }

    #[test]
    fn test_resolve_unrepresentable_year() {
        let err = PeriodResolver::new()
            .resolve(&PeriodSpec::Year { year: i32::MAX })
            .unwrap_err();
        assert_eq!(err, EngineError::InvalidYear(i32::MAX));
    }

    #[test]
    fn test_resolve_for_month() {
        let r = PeriodResolver::new();
        let feb = r.resolve_for_month(2024, 2).unwrap();
        assert_eq!(feb.end, d(2024, 2, 29));
        assert_eq!(feb.total_days, 29);

        let dec = r.resolve_for_month(2023, 12).unwrap();
        assert_eq!(dec.end, d(2023, 12, 31));

        assert!(r.resolve_for_month(2023, 13).is_err());
    }

    #[test]
    fn test_split_by_month_partial_edges() {
        let r = PeriodResolver::new();
        let period = r
            .resolve(&PeriodSpec::Range {
                start: d(2024, 1, 20),
                end: d(2024, 3, 5),
            })
            .unwrap();
        let parts = r.split_by_month(&period).unwrap();

        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0].start, d(2024, 1, 20));
        assert_eq!(parts[0].end, d(2024, 1, 31));
        assert_eq!(parts[1].total_days, 29);
        assert_eq!(parts[2].start, d(2024, 3, 1));
        assert_eq!(parts[2].end, d(2024, 3, 5));

        let days: i64 = parts.iter().map(|p| p.total_days).sum();
        assert_eq!(days, period.total_days);
    }

    #[test]
    fn test_split_full_year_into_twelve() {
        let r = PeriodResolver::new();
        let period = r.resolve(&PeriodSpec::Year { year: 2025 }).unwrap();
        let parts = r.split_by_month(&period).unwrap();
        assert_eq!(parts.len(), 12);
        assert_eq!(parts[11].end, d(2025, 12, 31));
    }
}
