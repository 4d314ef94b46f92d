// ==========================================
// 设备绩效指标引擎 - API 请求 DTO
// ==========================================
// 职责: 展示层传入的字符串参数 → 领域类型
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::period::PeriodSpec;
use crate::domain::types::PeriodKind;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 统计周期请求
///
/// - kind = "year": 需要 year
/// - kind = "range": 需要 start / end (YYYY-MM-DD)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PeriodRequest {
    pub kind: String,
    pub year: Option<i32>,
    pub start: Option<String>,
    pub end: Option<String>,
}

impl PeriodRequest {
    pub fn year(year: i32) -> Self {
        Self {
            kind: PeriodKind::Year.to_string(),
            year: Some(year),
            ..Default::default()
        }
    }

    pub fn range(start: &str, end: &str) -> Self {
        Self {
            kind: PeriodKind::Range.to_string(),
            start: Some(start.to_string()),
            end: Some(end.to_string()),
            ..Default::default()
        }
    }

    /// 校验并转换为 PeriodSpec
    ///
    /// 这里只做格式校验; start > end 由周期解析器报 InvalidPeriod
    pub fn to_spec(&self) -> ApiResult<PeriodSpec> {
        let kind = PeriodKind::parse(&self.kind)
            .ok_or_else(|| ApiError::InvalidInput(format!("未知的周期类型: {}", self.kind)))?;

        match kind {
            PeriodKind::Year => {
                let year = self
                    .year
                    .ok_or_else(|| ApiError::InvalidInput("年份不能为空".to_string()))?;
                Ok(PeriodSpec::Year { year })
            }
            PeriodKind::Range => {
                let start = parse_required_date("开始日期", self.start.as_deref())?;
                let end = parse_required_date("结束日期", self.end.as_deref())?;
                Ok(PeriodSpec::Range { start, end })
            }
        }
    }
}

fn parse_required_date(label: &str, value: Option<&str>) -> ApiResult<NaiveDate> {
    let value = value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::InvalidInput(format!("{}不能为空", label)))?;
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| ApiError::InvalidInput(format!("{}格式错误({}): {}", label, value, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_request() {
        assert_eq!(
            PeriodRequest::year(2024).to_spec().unwrap(),
            PeriodSpec::Year { year: 2024 }
        );
    }

    #[test]
    fn test_range_request() {
        let spec = PeriodRequest::range("2024-01-01", "2024-03-31")
            .to_spec()
            .unwrap();
        assert_eq!(
            spec,
            PeriodSpec::Range {
                start: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                end: NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
            }
        );
    }

    #[test]
    fn test_invalid_requests() {
        let missing_year = PeriodRequest {
            kind: "year".to_string(),
            ..Default::default()
        };
        assert!(matches!(missing_year.to_spec(), Err(ApiError::InvalidInput(_))));

        let bad_date = PeriodRequest::range("2024-13-01", "2024-12-31");
        assert!(matches!(bad_date.to_spec(), Err(ApiError::InvalidInput(_))));

        let empty_end = PeriodRequest::range("2024-01-01", " ");
        assert!(matches!(empty_end.to_spec(), Err(ApiError::InvalidInput(_))));

        let bad_kind = PeriodRequest {
            kind: "week".to_string(),
            ..Default::default()
        };
        assert!(matches!(bad_kind.to_spec(), Err(ApiError::InvalidInput(_))));
    }
}
