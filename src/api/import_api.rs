// ==========================================
// 设备绩效指标引擎 - 运行记录导入 API
// ==========================================
// 职责: 封装运行记录导入及设备主数据维护
// ==========================================

use std::path::Path;
use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::domain::asset::Asset;
use crate::importer::{ImportReport, ObservationImporter};
use crate::repository::{AssetRepository, ObservationRepository};

/// 导入API
pub struct ImportApi {
    asset_repo: Arc<AssetRepository>,
    observation_repo: Arc<ObservationRepository>,
    importer: ObservationImporter,
}

impl ImportApi {
    /// 创建新的ImportApi实例
    pub fn new(
        asset_repo: Arc<AssetRepository>,
        observation_repo: Arc<ObservationRepository>,
    ) -> Self {
        let importer = ObservationImporter::new(asset_repo.clone(), observation_repo.clone());
        Self {
            asset_repo,
            observation_repo,
            importer,
        }
    }

    /// 导入运行记录文件
    ///
    /// # 参数
    /// - file_path: 文件路径 (.csv / .xlsx)
    ///
    /// # 返回
    /// - Ok(ImportReport): 导入报告（含被拒绝行明细）
    /// - Err(ApiError): 文件不可读或缺少必填列
    pub fn import_observations(&self, file_path: &str) -> ApiResult<ImportReport> {
        if file_path.trim().is_empty() {
            return Err(ApiError::InvalidInput("文件路径不能为空".to_string()));
        }
        Ok(self.importer.import_file(Path::new(file_path))?)
    }

    /// 登记/更新设备主数据（系统归属）
    pub fn upsert_assets(&self, assets: &[Asset]) -> ApiResult<usize> {
        if let Some(bad) = assets.iter().find(|a| a.asset_id.trim().is_empty()) {
            return Err(ApiError::InvalidInput(format!(
                "设备ID不能为空: {:?}",
                bad
            )));
        }
        Ok(self.asset_repo.batch_upsert(assets)?)
    }

    /// 删除某设备的全部运行记录
    pub fn clear_observations(&self, asset_id: &str) -> ApiResult<usize> {
        if asset_id.trim().is_empty() {
            return Err(ApiError::InvalidInput("设备ID不能为空".to_string()));
        }
        Ok(self.observation_repo.delete_by_asset(asset_id)?)
    }
}
