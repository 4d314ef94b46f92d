// ==========================================
// 设备绩效指标引擎 - 设备主数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================

use crate::domain::asset::Asset;
use crate::repository::error::{
    connection_error, transaction_error, RepositoryError, RepositoryResult,
};
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex};

// ==========================================
// AssetRepository - 设备仓储
// ==========================================

/// 设备仓储
/// 职责: 管理 asset 表的读写
pub struct AssetRepository {
    conn: Arc<Mutex<Connection>>,
}

impl AssetRepository {
    /// 创建新的设备仓储实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = crate::db::open_sqlite_connection(db_path).map_err(connection_error)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn map_row(row: &Row<'_>) -> SqliteResult<Asset> {
        Ok(Asset {
            asset_id: row.get(0)?,
            asset_name: row.get(1)?,
            system_id: row.get(2)?,
        })
    }

    /// 插入或更新单台设备
    ///
    /// 用 ON CONFLICT 更新而非 REPLACE,避免级联删除运行记录
    pub fn upsert(&self, asset: &Asset) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO asset (asset_id, asset_name, system_id)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(asset_id) DO UPDATE SET
                asset_name = excluded.asset_name,
                system_id = excluded.system_id,
                updated_at = datetime('now')
            "#,
            params![asset.asset_id, asset.asset_name, asset.system_id],
        )?;
        Ok(())
    }

    /// 批量插入或更新设备
    ///
    /// # 返回
    /// - Ok(usize): 受影响的记录数
    pub fn batch_upsert(&self, assets: &[Asset]) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction().map_err(transaction_error)?;

        let mut affected = 0;
        {
            let mut stmt = tx.prepare(
                r#"
                INSERT INTO asset (asset_id, asset_name, system_id)
                VALUES (?1, ?2, ?3)
                ON CONFLICT(asset_id) DO UPDATE SET
                    asset_name = excluded.asset_name,
                    system_id = excluded.system_id,
                    updated_at = datetime('now')
                "#,
            )?;
            for asset in assets {
                affected += stmt.execute(params![asset.asset_id, asset.asset_name, asset.system_id])?;
            }
        }

        tx.commit().map_err(transaction_error)?;
        Ok(affected)
    }

    /// 仅登记不存在的设备（不覆盖已有系统归属）
    ///
    /// # 返回
    /// - Ok(usize): 新登记的设备数
    pub fn register_missing(&self, asset_ids: &[String]) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction().map_err(transaction_error)?;

        let mut inserted = 0;
        {
            let mut stmt = tx.prepare("INSERT OR IGNORE INTO asset (asset_id) VALUES (?1)")?;
            for id in asset_ids {
                inserted += stmt.execute(params![id])?;
            }
        }

        tx.commit().map_err(transaction_error)?;
        Ok(inserted)
    }

    /// 按ID查询设备
    pub fn find_by_id(&self, asset_id: &str) -> RepositoryResult<Option<Asset>> {
        let conn = self.get_conn()?;
        let asset = conn
            .query_row(
                "SELECT asset_id, asset_name, system_id FROM asset WHERE asset_id = ?1",
                params![asset_id],
                Self::map_row,
            )
            .optional()?;
        Ok(asset)
    }

    /// 查询全部设备（按 asset_id 升序）
    pub fn list_all(&self) -> RepositoryResult<Vec<Asset>> {
        let conn = self.get_conn()?;
        let mut stmt = conn
            .prepare("SELECT asset_id, asset_name, system_id FROM asset ORDER BY asset_id")?;
        let assets = stmt
            .query_map([], Self::map_row)?
            .collect::<SqliteResult<Vec<Asset>>>()?;
        Ok(assets)
    }
}
