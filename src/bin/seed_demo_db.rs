// ==========================================
// 演示数据库生成工具
// ==========================================
// 用法:
//   cargo run --bin seed_demo_db -- [db_path] [year]
//
// 数据: 两台冗余泵(PUMPS)、一台压缩机(COMP)、一台未归属系统的发电机
// ==========================================

use asset_metrics::db::{ensure_schema, open_sqlite_connection};
use asset_metrics::domain::{Asset, ObservationRecord};
use asset_metrics::repository::{AssetRepository, ObservationRepository};
use chrono::{Datelike, NaiveDate};
use std::sync::{Arc, Mutex};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    asset_metrics::logging::init();

    let mut args = std::env::args().skip(1);
    let db_path = args.next().unwrap_or_else(|| "asset_metrics.db".to_string());
    let year: i32 = match args.next() {
        Some(v) => v.parse()?,
        None => 2024,
    };

    let conn = open_sqlite_connection(&db_path)?;
    ensure_schema(&conn)?;
    let conn = Arc::new(Mutex::new(conn));

    let asset_repo = AssetRepository::from_connection(conn.clone());
    let observation_repo = ObservationRepository::from_connection(conn);

    let assets = vec![
        Asset::new("P-101", Some("PUMPS")).with_name("Feed pump A"),
        Asset::new("P-102", Some("PUMPS")).with_name("Feed pump B"),
        Asset::new("C-201", Some("COMP")).with_name("Gas compressor"),
        Asset::new("G-301", None).with_name("Standby generator"),
    ];
    asset_repo.batch_upsert(&assets)?;

    let start = NaiveDate::from_ymd_opt(year, 1, 1).ok_or("年份无效")?;
    let end = NaiveDate::from_ymd_opt(year, 12, 31).ok_or("年份无效")?;

    let mut records = Vec::new();
    for day in start.iter_days().take_while(|d| *d <= end) {
        let ordinal = day.ordinal();

        // P-101: 每周日计划检修4h, 偶发跳车
        let planned = if day.weekday().number_from_monday() == 7 { 4.0 } else { 0.0 };
        let unplanned = if ordinal % 45 == 0 { 6.0 } else { 0.0 };
        records.push(ObservationRecord::new(
            "P-101",
            day,
            24.0 - planned - unplanned,
            unplanned,
            planned,
        ));

        // P-102: 备用泵, 每天半日运行
        records.push(ObservationRecord::new("P-102", day, 12.0, 0.0, 0.0));

        // C-201: 频繁非计划停机, 偶有超24h的记录
        let unplanned = if ordinal % 7 == 0 { 8.0 } else { 1.0 };
        let uptime = if ordinal % 30 == 0 { 24.0 } else { 20.0 };
        records.push(ObservationRecord::new("C-201", day, uptime, unplanned, 0.0));

        // G-301: 仅一季度有记录
        if day.month() <= 3 {
            records.push(ObservationRecord::new("G-301", day, 2.0, 0.0, 0.0));
        }
    }

    let n = observation_repo.batch_upsert(&records)?;
    println!("db={} year={} assets={} observations={}", db_path, year, assets.len(), n);
    Ok(())
}
