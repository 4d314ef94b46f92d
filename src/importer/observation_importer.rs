// ==========================================
// 设备绩效指标引擎 - 日运行记录导入器
// ==========================================
// 流程: 文件解析 → 字段映射 → 行校验 → 设备登记 → 批量写入
// 红线: 超过 24h 的行照常导入 (引擎按 0 截断待机), 仅计数告知
// ==========================================

use crate::domain::observation::ObservationRecord;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::{parser_for, ParsedSheet, RawRow};
use crate::repository::{AssetRepository, ObservationRepository};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};
use uuid::Uuid;

/// 列名
pub mod columns {
    pub const ASSET_ID: &str = "asset_id";
    pub const DATE: &str = "date";
    pub const UPTIME_HOURS: &str = "uptime_hours";
    pub const UNPLANNED_SHUTDOWN_HOURS: &str = "unplanned_shutdown_hours";
    pub const PLANNED_SHUTDOWN_HOURS: &str = "planned_shutdown_hours";

    pub const REQUIRED: [&str; 3] = [ASSET_ID, DATE, UPTIME_HOURS];
}

// ==========================================
// 导入结果
// ==========================================

/// 被拒绝的行（行号从 1 开始,不含表头）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RejectedRow {
    pub row: usize,
    pub reason: String,
}

/// 导入报告
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportReport {
    pub batch_id: String,
    pub total_rows: usize,
    pub imported_rows: usize,
    pub rejected: Vec<RejectedRow>,
    pub over_24h_rows: usize,
    pub registered_assets: usize,
    pub elapsed_ms: u64,
}

// ==========================================
// ObservationImporter - 日运行记录导入器
// ==========================================
pub struct ObservationImporter {
    asset_repo: Arc<AssetRepository>,
    observation_repo: Arc<ObservationRepository>,
}

impl ObservationImporter {
    pub fn new(
        asset_repo: Arc<AssetRepository>,
        observation_repo: Arc<ObservationRepository>,
    ) -> Self {
        Self {
            asset_repo,
            observation_repo,
        }
    }

    /// 导入文件 (.csv / .xlsx)
    ///
    /// 单行校验失败只拒绝该行,不中断整批。
    /// 表头缺少必填列时整批失败。
    pub fn import_file(&self, file_path: &Path) -> ImportResult<ImportReport> {
        let started = Instant::now();
        let batch_id = Uuid::new_v4().to_string();

        let parser = parser_for(file_path)?;
        let sheet = parser.parse_sheet(file_path)?;
        info!(batch_id = %batch_id, path = %file_path.display(), rows = sheet.rows.len(), "开始导入运行记录");

        self.import_sheet(batch_id, &sheet, started)
    }

    /// 导入已解析的表格
    ///
    /// 同一批内同设备同日期出现多行时,以最后一行为准,
    /// 被覆盖的行计入 rejected。
    pub fn import_sheet(
        &self,
        batch_id: String,
        sheet: &ParsedSheet,
        started: Instant,
    ) -> ImportResult<ImportReport> {
        for col in columns::REQUIRED {
            if !sheet.has_column(col) {
                return Err(ImportError::MissingColumn(col.to_string()));
            }
        }

        let rows = &sheet.rows;
        let mut accepted: Vec<(usize, ObservationRecord)> = Vec::with_capacity(rows.len());
        let mut positions: HashMap<(String, NaiveDate), usize> = HashMap::new();
        let mut rejected = Vec::new();
        for (idx, raw) in rows.iter().enumerate() {
            let row_no = idx + 1;
            let record = match map_row(row_no, raw) {
                Ok(record) => record,
                Err(e) => {
                    warn!(batch_id = %batch_id, row = row_no, error = %e, "运行记录被拒绝");
                    rejected.push(RejectedRow {
                        row: row_no,
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            let key = (record.asset_id.clone(), record.date);
            match positions.get(&key).copied() {
                Some(pos) => {
                    let superseded = accepted[pos].0;
                    warn!(batch_id = %batch_id, row = superseded, by = row_no, "同设备同日期重复,保留后出现的行");
                    rejected.push(RejectedRow {
                        row: superseded,
                        reason: format!(
                            "设备 {} 日期 {} 重复, 被第 {} 行覆盖",
                            record.asset_id, record.date, row_no
                        ),
                    });
                    accepted[pos] = (row_no, record);
                }
                None => {
                    positions.insert(key, accepted.len());
                    accepted.push((row_no, record));
                }
            }
        }
        rejected.sort_by_key(|r| r.row);
        let records: Vec<ObservationRecord> = accepted.into_iter().map(|(_, r)| r).collect();

        let over_24h_rows = records.iter().filter(|r| r.is_over_24h()).count();
        if over_24h_rows > 0 {
            warn!(batch_id = %batch_id, over_24h_rows, "存在小时合计超过 24 的记录,待机按 0 计");
        }

        let asset_ids: Vec<String> = records
            .iter()
            .map(|r| r.asset_id.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let registered_assets = self.asset_repo.register_missing(&asset_ids)?;
        self.observation_repo.batch_upsert(&records)?;

        let report = ImportReport {
            batch_id,
            total_rows: rows.len(),
            imported_rows: records.len(),
            rejected,
            over_24h_rows,
            registered_assets,
            elapsed_ms: started.elapsed().as_millis() as u64,
        };

        info!(
            batch_id = %report.batch_id,
            imported = report.imported_rows,
            rejected = report.rejected.len(),
            registered_assets,
            "运行记录导入完成"
        );
        Ok(report)
    }
}

// ==========================================
// 字段映射与校验
// ==========================================

/// 原始行 → ObservationRecord
pub fn map_row(row: usize, raw: &RawRow) -> ImportResult<ObservationRecord> {
    let asset_id = raw
        .get(columns::ASSET_ID)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ImportError::MissingField {
            row,
            field: columns::ASSET_ID.to_string(),
        })?;

    let date_raw = raw
        .get(columns::DATE)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ImportError::MissingField {
            row,
            field: columns::DATE.to_string(),
        })?;
    let date = parse_date(date_raw).ok_or_else(|| ImportError::DateFormatError {
        row,
        field: columns::DATE.to_string(),
        value: date_raw.to_string(),
    })?;

    let uptime = parse_hours(row, raw, columns::UPTIME_HOURS, true)?;
    let unplanned = parse_hours(row, raw, columns::UNPLANNED_SHUTDOWN_HOURS, false)?;
    let planned = parse_hours(row, raw, columns::PLANNED_SHUTDOWN_HOURS, false)?;

    Ok(ObservationRecord::new(asset_id, date, uptime, unplanned, planned))
}

/// 支持 YYYY-MM-DD / YYYY/MM/DD / YYYYMMDD
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    ["%Y-%m-%d", "%Y/%m/%d", "%Y%m%d"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
}

/// 解析小时列
///
/// 必填列为空时报错; 选填列为空时按 0。
/// 非有限数或负数一律拒绝。
fn parse_hours(row: usize, raw: &RawRow, field: &str, required: bool) -> ImportResult<f64> {
    let value = raw.get(field).map(|s| s.trim()).unwrap_or("");
    if value.is_empty() {
        if required {
            return Err(ImportError::MissingField {
                row,
                field: field.to_string(),
            });
        }
        return Ok(0.0);
    }

    let hours: f64 = value
        .parse()
        .map_err(|e: std::num::ParseFloatError| ImportError::TypeConversionError {
            row,
            field: field.to_string(),
            message: e.to_string(),
        })?;

    if !hours.is_finite() {
        return Err(ImportError::TypeConversionError {
            row,
            field: field.to_string(),
            message: format!("非有限数值: {}", value),
        });
    }
    if hours < 0.0 {
        return Err(ImportError::NegativeValue {
            row,
            field: field.to_string(),
            value: hours,
        });
    }
    Ok(hours)
}
