// ==========================================
// API集成测试辅助工具
// ==========================================
// 职责: 在临时库上组装仓储、配置与 API
// ==========================================
#![allow(dead_code)]

use std::error::Error;
use std::sync::Arc;

use asset_metrics::api::{ImportApi, MetricsDashboardApi};
use asset_metrics::config::ConfigManager;
use asset_metrics::domain::{Asset, ObservationRecord};
use asset_metrics::repository::{AssetRepository, ObservationRepository};
use tempfile::NamedTempFile;

use crate::test_helpers::{create_test_db, open_test_connection};

/// API测试环境
pub struct ApiTestEnv {
    pub _temp_file: NamedTempFile,
    pub db_path: String,
    pub asset_repo: Arc<AssetRepository>,
    pub observation_repo: Arc<ObservationRepository>,
    pub config_manager: Arc<ConfigManager>,
    pub dashboard_api: MetricsDashboardApi,
    pub import_api: ImportApi,
}

impl ApiTestEnv {
    pub fn new() -> Result<Self, Box<dyn Error>> {
        asset_metrics::logging::init_test();

        let (temp_file, db_path) = create_test_db()?;
        let conn = open_test_connection(&db_path)?;

        let asset_repo = Arc::new(AssetRepository::from_connection(conn.clone()));
        let observation_repo = Arc::new(ObservationRepository::from_connection(conn.clone()));
        let config_manager = Arc::new(ConfigManager::from_connection(conn)?);

        let dashboard_api = MetricsDashboardApi::new(
            asset_repo.clone(),
            observation_repo.clone(),
            config_manager.clone(),
        );
        let import_api = ImportApi::new(asset_repo.clone(), observation_repo.clone());

        Ok(Self {
            _temp_file: temp_file,
            db_path,
            asset_repo,
            observation_repo,
            config_manager,
            dashboard_api,
            import_api,
        })
    }

    /// 登记设备并写入记录
    pub fn seed(&self, assets: &[Asset], records: &[ObservationRecord]) {
        self.asset_repo.batch_upsert(assets).expect("登记设备失败");
        self.observation_repo
            .batch_upsert(records)
            .expect("写入运行记录失败");
    }
}
