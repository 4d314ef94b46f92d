// ==========================================
// 设备绩效指标引擎 - 日运行记录仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 约束: 查询结果按日期升序,保证下游累加顺序固定
// ==========================================

use crate::domain::observation::ObservationRecord;
use crate::repository::error::{
    connection_error, parse_date_column, transaction_error, RepositoryError, RepositoryResult,
    DATE_FORMAT,
};
use chrono::NaiveDate;
use rusqlite::{params, Connection, Result as SqliteResult, Row};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

const UPSERT_SQL: &str = r#"
    INSERT INTO asset_observation (
        asset_id, obs_date, uptime_hours, unplanned_shutdown_hours, planned_shutdown_hours
    ) VALUES (?1, ?2, ?3, ?4, ?5)
    ON CONFLICT(asset_id, obs_date) DO UPDATE SET
        uptime_hours = excluded.uptime_hours,
        unplanned_shutdown_hours = excluded.unplanned_shutdown_hours,
        planned_shutdown_hours = excluded.planned_shutdown_hours,
        updated_at = datetime('now')
"#;

// ==========================================
// ObservationRepository - 日运行记录仓储
// ==========================================

/// 日运行记录仓储
/// 职责: 管理 asset_observation 表的读写
pub struct ObservationRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ObservationRepository {
    /// 创建新的日运行记录仓储实例
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

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn map_row(row: &Row<'_>) -> SqliteResult<ObservationRecord> {
        let date_raw: String = row.get(1)?;
        Ok(ObservationRecord {
            asset_id: row.get(0)?,
            date: parse_date_column(1, &date_raw)?,
            uptime_hours: row.get(2)?,
            unplanned_shutdown_hours: row.get(3)?,
            planned_shutdown_hours: row.get(4)?,
        })
    }

    /// 插入或更新单条记录（同设备同日覆盖）
    pub fn upsert(&self, record: &ObservationRecord) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            UPSERT_SQL,
            params![
                record.asset_id,
                record.date.format(DATE_FORMAT).to_string(),
                record.uptime_hours,
                record.unplanned_shutdown_hours,
                record.planned_shutdown_hours,
            ],
        )?;
        Ok(())
    }

    /// 批量插入或更新（单事务）
    ///
    /// # 返回
    /// - Ok(usize): 受影响的记录数
    pub fn batch_upsert(&self, records: &[ObservationRecord]) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction().map_err(transaction_error)?;

        let mut affected = 0;
        {
            let mut stmt = tx.prepare(UPSERT_SQL)?;
            for record in records {
                affected += stmt.execute(params![
                    record.asset_id,
                    record.date.format(DATE_FORMAT).to_string(),
                    record.uptime_hours,
                    record.unplanned_shutdown_hours,
                    record.planned_shutdown_hours,
                ])?;
            }
        }

        tx.commit().map_err(transaction_error)?;
        Ok(affected)
    }

    /// 按设备和日期范围查询（闭区间,按日期升序）
    pub fn find_by_asset_and_range(
        &self,
        asset_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> RepositoryResult<Vec<ObservationRecord>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT asset_id, obs_date, uptime_hours, unplanned_shutdown_hours, planned_shutdown_hours
            FROM asset_observation
            WHERE asset_id = ?1
              AND obs_date BETWEEN ?2 AND ?3
            ORDER BY obs_date
            "#,
        )?;

        let records = stmt
            .query_map(
                params![
                    asset_id,
                    start.format(DATE_FORMAT).to_string(),
                    end.format(DATE_FORMAT).to_string()
                ],
                Self::map_row,
            )?
            .collect::<SqliteResult<Vec<ObservationRecord>>>()?;
        Ok(records)
    }

    /// 按日期范围查询全部设备记录,并按 asset_id 分组
    ///
    /// 组内按日期升序
    pub fn find_by_range_grouped(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> RepositoryResult<BTreeMap<String, Vec<ObservationRecord>>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT asset_id, obs_date, uptime_hours, unplanned_shutdown_hours, planned_shutdown_hours
            FROM asset_observation
            WHERE obs_date BETWEEN ?1 AND ?2
            ORDER BY asset_id, obs_date
            "#,
        )?;

        let rows = stmt.query_map(
            params![
                start.format(DATE_FORMAT).to_string(),
                end.format(DATE_FORMAT).to_string()
            ],
            Self::map_row,
        )?;

        let mut grouped: BTreeMap<String, Vec<ObservationRecord>> = BTreeMap::new();
        for row in rows {
            let record = row?;
            grouped
                .entry(record.asset_id.clone())
                .or_default()
                .push(record);
        }
        Ok(grouped)
    }

    /// 删除某设备全部记录
    ///
    /// # 返回
    /// - Ok(usize): 删除的记录数
    pub fn delete_by_asset(&self, asset_id: &str) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let n = conn.execute(
            "DELETE FROM asset_observation WHERE asset_id = ?1",
            params![asset_id],
        )?;
        Ok(n)
    }
}
