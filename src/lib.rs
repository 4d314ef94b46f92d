// ==========================================
// 设备绩效指标引擎 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 设备利用率/可用率/可靠度计算与告警
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 指标计算规则
pub mod engine;

// 数据仓储层 - 运行记录存取
pub mod repository;

// 导入层 - 外部数据
pub mod importer;

// 配置层 - 系统配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一/建表）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// 应用层 - 组装
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域实体
pub use domain::{
    AlertReason, Asset, AssetAlert, AssetMetrics, FleetSummary, MetricsDashboard,
    ObservationRecord, PeriodKind, PeriodSpec, ResolvedPeriod, SystemMetrics, TrendPoint,
};

// 引擎
pub use engine::{
    AssetMetricsCalculator, EngineError, FleetSummaryEvaluator, MetricsOrchestrator,
    PeriodResolver, SystemAggregator,
};

// API
pub use api::{ImportApi, MetricsDashboardApi, PeriodRequest};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "设备绩效指标引擎";
