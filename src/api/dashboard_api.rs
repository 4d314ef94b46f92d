// ==========================================
// 设备绩效指标引擎 - 驾驶舱 API
// ==========================================
// 职责: 取数 (Repository) → 计算 (Engine) → 返回只读指标
// 架构: API 层 → Repository 层 + Engine 层
// ==========================================

use std::sync::Arc;

use tracing::info;

use crate::api::dto::PeriodRequest;
use crate::api::error::{ApiError, ApiResult};
use crate::config::ConfigManager;
use crate::domain::asset::Asset;
use crate::domain::metrics::{
    AssetAlert, AssetMetrics, FleetSummary, MetricsDashboard, SystemMetrics, TrendPoint,
};
use crate::engine::{AssetMetricsCalculator, MetricsOrchestrator, PeriodResolver};
use crate::repository::{AssetRepository, ObservationRepository};

// ==========================================
// MetricsDashboardApi - 驾驶舱 API
// ==========================================

/// 驾驶舱API
///
/// 每次调用都重新取数计算,不缓存结果。
/// 告警目标未显式传入时读取配置。
pub struct MetricsDashboardApi {
    asset_repo: Arc<AssetRepository>,
    observation_repo: Arc<ObservationRepository>,
    config_manager: Arc<ConfigManager>,
    resolver: PeriodResolver,
    calculator: AssetMetricsCalculator,
    orchestrator: MetricsOrchestrator,
}

impl MetricsDashboardApi {
    pub fn new(
        asset_repo: Arc<AssetRepository>,
        observation_repo: Arc<ObservationRepository>,
        config_manager: Arc<ConfigManager>,
    ) -> Self {
        Self {
            asset_repo,
            observation_repo,
            config_manager,
            resolver: PeriodResolver::new(),
            calculator: AssetMetricsCalculator::new(),
            orchestrator: MetricsOrchestrator::new(),
        }
    }

    // ==========================================
    // 配置
    // ==========================================

    /// 当前告警目标
    pub fn get_target(&self) -> ApiResult<f64> {
        self.config_manager
            .get_reliability_target()
            .map_err(|e| ApiError::ConfigError(e.to_string()))
    }

    /// 更新告警目标
    pub fn update_target(&self, target: f64) -> ApiResult<()> {
        self.config_manager
            .set_reliability_target(target)
            .map_err(|e| ApiError::InvalidInput(e.to_string()))?;
        info!(target, "告警目标已更新");
        Ok(())
    }

    fn resolve_target(&self, target: Option<f64>) -> ApiResult<f64> {
        match target {
            Some(t) if !t.is_finite() => {
                Err(ApiError::InvalidInput(format!("告警目标必须为有限数值: {}", t)))
            }
            Some(t) => Ok(t),
            None => self.get_target(),
        }
    }

    fn filter_out_of_window(&self) -> ApiResult<bool> {
        self.config_manager
            .get_filter_out_of_window()
            .map_err(|e| ApiError::ConfigError(e.to_string()))
    }

    fn find_asset(&self, asset_id: &str) -> ApiResult<Asset> {
        if asset_id.trim().is_empty() {
            return Err(ApiError::InvalidInput("设备ID不能为空".to_string()));
        }
        self.asset_repo
            .find_by_id(asset_id)?
            .ok_or_else(|| ApiError::NotFound(format!("设备(id={})不存在", asset_id)))
    }

    // ==========================================
    // 指标查询
    // ==========================================

    /// 驾驶舱全量指标
    ///
    /// # 参数
    /// - request: 统计周期
    /// - target: 告警目标（None 时读取配置）
    pub fn get_dashboard(
        &self,
        request: &PeriodRequest,
        target: Option<f64>,
    ) -> ApiResult<MetricsDashboard> {
        let spec = request.to_spec()?;
        let target = self.resolve_target(target)?;
        let period = self.resolver.resolve(&spec)?;

        let assets = self.asset_repo.list_all()?;
        let records = self
            .observation_repo
            .find_by_range_grouped(period.start, period.end)?;

        let dashboard = self.orchestrator.build_dashboard(
            &spec,
            &assets,
            &records,
            target,
            self.filter_out_of_window()?,
        )?;
        Ok(dashboard)
    }

    /// 单设备指标
    pub fn get_asset_metrics(
        &self,
        asset_id: &str,
        request: &PeriodRequest,
        target: Option<f64>,
    ) -> ApiResult<AssetMetrics> {
        let spec = request.to_spec()?;
        let target = self.resolve_target(target)?;
        let period = self.resolver.resolve(&spec)?;
        let asset = self.find_asset(asset_id)?;

        let records =
            self.observation_repo
                .find_by_asset_and_range(&asset.asset_id, period.start, period.end)?;

        Ok(self.calculator.compute(
            &asset.asset_id,
            asset.system_id.as_deref(),
            &records,
            &period,
            target,
        ))
    }

    /// 系统聚合指标
    pub fn get_system_metrics(&self, request: &PeriodRequest) -> ApiResult<Vec<SystemMetrics>> {
        Ok(self.get_dashboard(request, None)?.system_metrics)
    }

    /// 全厂汇总
    pub fn get_fleet_summary(
        &self,
        request: &PeriodRequest,
        target: Option<f64>,
    ) -> ApiResult<FleetSummary> {
        Ok(self.get_dashboard(request, target)?.fleet_summary)
    }

    /// 告警明细
    pub fn list_alerts(
        &self,
        request: &PeriodRequest,
        target: Option<f64>,
    ) -> ApiResult<Vec<AssetAlert>> {
        Ok(self.get_dashboard(request, target)?.alerts)
    }

    /// 单设备月度趋势
    pub fn get_asset_trend(
        &self,
        asset_id: &str,
        request: &PeriodRequest,
    ) -> ApiResult<Vec<TrendPoint>> {
        let spec = request.to_spec()?;
        let target = self.get_target()?;
        let period = self.resolver.resolve(&spec)?;
        let asset = self.find_asset(asset_id)?;

        let records =
            self.observation_repo
                .find_by_asset_and_range(&asset.asset_id, period.start, period.end)?;

        Ok(self
            .orchestrator
            .build_trend(&spec, &asset, &records, target)?)
    }
}
