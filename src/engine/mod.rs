// ==========================================
// 设备绩效指标引擎 - 引擎层
// ==========================================
// 职责: 实现指标计算规则,不拼 SQL
// 红线: Engine 不访问数据库, 所有方法都是纯函数
// ==========================================

pub mod asset_metrics;
pub mod error;
pub mod fleet_summary;
pub mod orchestrator;
pub mod period_resolver;
pub mod system_aggregator;

// 重导出核心引擎
pub use asset_metrics::{AssetMetricsCalculator, HourTotals};
pub use error::{EngineError, EngineResult};
pub use fleet_summary::FleetSummaryEvaluator;
pub use orchestrator::MetricsOrchestrator;
pub use period_resolver::PeriodResolver;
pub use system_aggregator::{parallel_combine, SystemAggregator};
