// ==========================================
// 设备绩效指标引擎 - API 层
// ==========================================
// 职责: 提供驾驶舱查询与导入接口, 供命令行/展示层调用
// ==========================================

pub mod dashboard_api;
pub mod dto;
pub mod error;
pub mod import_api;

// 重导出核心类型
pub use dashboard_api::MetricsDashboardApi;
pub use dto::PeriodRequest;
pub use error::{ApiError, ApiResult};
pub use import_api::ImportApi;
