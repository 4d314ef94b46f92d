// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================
#![allow(dead_code)]

use asset_metrics::domain::{Asset, ObservationRecord};
use chrono::NaiveDate;

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ==========================================
// ObservationRecord 构建器
// ==========================================

pub struct ObservationBuilder {
    asset_id: String,
    date: NaiveDate,
    uptime_hours: f64,
    unplanned_shutdown_hours: f64,
    planned_shutdown_hours: f64,
}

impl ObservationBuilder {
    pub fn new(asset_id: &str, date: NaiveDate) -> Self {
        Self {
            asset_id: asset_id.to_string(),
            date,
            uptime_hours: 0.0,
            unplanned_shutdown_hours: 0.0,
            planned_shutdown_hours: 0.0,
        }
    }

    pub fn uptime(mut self, hours: f64) -> Self {
        self.uptime_hours = hours;
        self
    }

    pub fn unplanned(mut self, hours: f64) -> Self {
        self.unplanned_shutdown_hours = hours;
        self
    }

    pub fn planned(mut self, hours: f64) -> Self {
        self.planned_shutdown_hours = hours;
        self
    }

    pub fn build(self) -> ObservationRecord {
        ObservationRecord::new(
            self.asset_id,
            self.date,
            self.uptime_hours,
            self.unplanned_shutdown_hours,
            self.planned_shutdown_hours,
        )
    }
}

/// 连续 `days` 天、每天相同小时数的记录
pub fn daily_series(
    asset_id: &str,
    start: NaiveDate,
    days: u64,
    uptime: f64,
    unplanned: f64,
    planned: f64,
) -> Vec<ObservationRecord> {
    start
        .iter_days()
        .take(days as usize)
        .map(|d| {
            ObservationBuilder::new(asset_id, d)
                .uptime(uptime)
                .unplanned(unplanned)
                .planned(planned)
                .build()
        })
        .collect()
}

// ==========================================
// Asset 构建器
// ==========================================

pub struct AssetBuilder {
    asset_id: String,
    asset_name: Option<String>,
    system_id: Option<String>,
}

impl AssetBuilder {
    pub fn new(asset_id: &str) -> Self {
        Self {
            asset_id: asset_id.to_string(),
            asset_name: None,
            system_id: None,
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.asset_name = Some(name.to_string());
        self
    }

    pub fn system(mut self, system_id: &str) -> Self {
        self.system_id = Some(system_id.to_string());
        self
    }

    pub fn build(self) -> Asset {
        Asset {
            asset_id: self.asset_id,
            asset_name: self.asset_name,
            system_id: self.system_id,
        }
    }
}
