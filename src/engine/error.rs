// ==========================================
// 设备绩效指标引擎 - 引擎层错误类型
// ==========================================
// 工具: thiserror 派生宏
// 红线: 数值计算本身不报错,只有周期解析会失败
// ==========================================

use chrono::NaiveDate;
use thiserror::Error;

/// 引擎层错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// 自定义区间起始日期晚于结束日期
    #[error("无效的统计周期: 开始日期 {start} 晚于结束日期 {end}")]
    InvalidPeriod { start: NaiveDate, end: NaiveDate },

    /// 年份超出日期可表示范围
    #[error("无效的统计年份: {0}")]
    InvalidYear(i32),

    /// 月份不在 1..=12
    #[error("无效的统计月份: {year}-{month}")]
    InvalidMonth { year: i32, month: u32 },
}

/// Result 类型别名
pub type EngineResult<T> = Result<T, EngineError>;
