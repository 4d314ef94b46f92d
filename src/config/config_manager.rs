// ==========================================
// 设备绩效指标引擎 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: config_kv 表 (key-value + scope)
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::types::DEFAULT_TARGET_PCT;
use rusqlite::{params, Connection};
use serde_json::json;
use std::collections::HashMap;
use std::error::Error;
use std::sync::{Arc, Mutex};
use tracing::warn;

// ==========================================
// 配置键
// ==========================================
pub mod config_keys {
    /// 告警目标百分比（默认 95）
    pub const RELIABILITY_TARGET_PCT: &str = "metrics/reliability_target_pct";
    /// 计算前剔除窗口外记录（默认 true）
    pub const FILTER_OUT_OF_WINDOW: &str = "metrics/filter_out_of_window";
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> Result<Self, Box<dyn Error>> {
        let conn = open_sqlite_connection(db_path)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建 ConfigManager
    ///
    /// 说明：对传入连接再次应用统一 PRAGMA（幂等）。
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Result<Self, Box<dyn Error>> {
        {
            let conn_guard = conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
            crate::db::configure_sqlite_connection(&conn_guard)?;
        }

        Ok(Self { conn })
    }

    /// 从 config_kv 表读取配置值（scope_id='global'）
    fn get_config_value(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let result = conn.query_row(
            "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(Box::new(e)),
        }
    }

    /// 写入 global scope 配置（存在则覆盖）
    fn set_config_value(&self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
            params![key, value],
        )?;
        Ok(())
    }

    // ===== 指标配置 =====

    /// 获取告警目标百分比
    ///
    /// 未配置或无法解析时返回默认值 95
    pub fn get_reliability_target(&self) -> Result<f64, Box<dyn Error>> {
        let raw = match self.get_config_value(config_keys::RELIABILITY_TARGET_PCT)? {
            Some(v) => v,
            None => return Ok(DEFAULT_TARGET_PCT),
        };

        match raw.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            _ => {
                warn!(value = %raw, "告警目标配置无法解析,使用默认值");
                Ok(DEFAULT_TARGET_PCT)
            }
        }
    }

    /// 设置告警目标百分比
    ///
    /// 区间外的值照常保存（只会导致全部告警或全部不告警）,仅拒绝非有限数
    pub fn set_reliability_target(&self, target: f64) -> Result<(), Box<dyn Error>> {
        if !target.is_finite() {
            return Err(format!("告警目标必须为有限数值: {}", target).into());
        }
        self.set_config_value(config_keys::RELIABILITY_TARGET_PCT, &target.to_string())
    }

    /// 计算前是否剔除窗口外记录（默认 true）
    pub fn get_filter_out_of_window(&self) -> Result<bool, Box<dyn Error>> {
        let raw = self.get_config_value(config_keys::FILTER_OUT_OF_WINDOW)?;
        Ok(match raw.as_deref().map(|v| v.trim().to_lowercase()) {
            Some(v) => !matches!(v.as_str(), "0" | "false" | "no" | "off"),
            None => true,
        })
    }

    // ===== 快照 =====

    /// 获取所有配置的快照（JSON格式）
    pub fn get_config_snapshot(&self) -> Result<String, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let mut stmt =
            conn.prepare("SELECT key, value FROM config_kv WHERE scope_id = 'global' ORDER BY key")?;

        let mut config_map: HashMap<String, String> = HashMap::new();
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        for row in rows {
            let (key, value) = row?;
            config_map.insert(key, value);
        }

        let json_value = json!(config_map);
        Ok(serde_json::to_string(&json_value)?)
    }

    /// 从配置快照恢复配置
    ///
    /// # 返回
    /// - Ok(usize): 恢复的配置项数量
    ///
    /// # 注意
    /// - 此方法会覆盖现有的 global 配置
    pub fn restore_config_from_snapshot(&self, snapshot_json: &str) -> Result<usize, Box<dyn Error>> {
        let config_map: HashMap<String, String> = serde_json::from_str(snapshot_json)?;

        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
        let tx = conn.unchecked_transaction()?;

        let mut count = 0;
        for (key, value) in config_map.iter() {
            count += tx.execute(
                "INSERT INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)
                 ON CONFLICT(scope_id, key) DO UPDATE SET value = ?2",
                params![key, value],
            )?;
        }

        tx.commit()?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{configure_sqlite_connection, ensure_schema};

    fn manager() -> ConfigManager {
        let conn = Connection::open_in_memory().unwrap();
        configure_sqlite_connection(&conn).unwrap();
        ensure_schema(&conn).unwrap();
        ConfigManager::from_connection(Arc::new(Mutex::new(conn))).unwrap()
    }

    #[test]
    fn test_defaults_when_unset() {
        let m = manager();
        assert_eq!(m.get_reliability_target().unwrap(), 95.0);
        assert!(m.get_filter_out_of_window().unwrap());
    }

    #[test]
    fn test_set_and_get_target() {
        let m = manager();
        m.set_reliability_target(90.5).unwrap();
        assert_eq!(m.get_reliability_target().unwrap(), 90.5);

        // 区间外照常保存
        m.set_reliability_target(120.0).unwrap();
        assert_eq!(m.get_reliability_target().unwrap(), 120.0);

        assert!(m.set_reliability_target(f64::NAN).is_err());
    }

    #[test]
    fn test_unparsable_target_falls_back() {
        let m = manager();
        m.set_config_value(config_keys::RELIABILITY_TARGET_PCT, "abc")
            .unwrap();
        assert_eq!(m.get_reliability_target().unwrap(), 95.0);
    }

    #[test]
    fn test_snapshot_roundtrip() {
        let m = manager();
        m.set_reliability_target(88.0).unwrap();
        m.set_config_value(config_keys::FILTER_OUT_OF_WINDOW, "false")
            .unwrap();
        let snapshot = m.get_config_snapshot().unwrap();

        m.set_reliability_target(70.0).unwrap();
        let restored = m.restore_config_from_snapshot(&snapshot).unwrap();
        assert_eq!(restored, 2);
        assert_eq!(m.get_reliability_target().unwrap(), 88.0);
        assert!(!m.get_filter_out_of_window().unwrap());
    }
}
