// ==========================================
// 设备绩效指标引擎 - 命令行入口
// ==========================================
// 用法:
//   asset-metrics [--db PATH] import FILE
//   asset-metrics [--db PATH] dashboard (--year Y | --from YYYY-MM-DD --to YYYY-MM-DD) [--target T]
//   asset-metrics [--db PATH] trend ASSET_ID (--year Y | --from ... --to ...)
//   asset-metrics [--db PATH] set-target T
//   asset-metrics [--db PATH] config-export
//   asset-metrics [--db PATH] config-import FILE
// ==========================================
// 红线: 先解析并校验命令行, 再打开数据库
// ==========================================

use anyhow::{bail, Context, Result};
use asset_metrics::api::PeriodRequest;
use asset_metrics::app::{get_default_db_path, AppState};
use asset_metrics::logging;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "asset-metrics")]
#[command(about = "设备绩效指标引擎: 利用率/可用率/可靠度计算与告警")]
#[command(version)]
struct Cli {
    /// 数据库路径 (默认: 用户数据目录下的 asset_metrics.db)
    #[arg(long, env = "ASSET_METRICS_DB_PATH")]
    db: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 导入观测记录 (CSV / Excel)
    Import { file: String },

    /// 输出统计周期内的驾驶舱 JSON
    Dashboard {
        #[command(flatten)]
        period: PeriodArgs,

        /// 本次计算使用的告警目标 (%), 不写入配置
        #[arg(long)]
        target: Option<f64>,
    },

    /// 输出单台设备的逐月趋势
    Trend {
        asset_id: String,

        #[command(flatten)]
        period: PeriodArgs,
    },

    /// 更新告警目标 (%)
    SetTarget {
        #[arg(allow_negative_numbers = true)]
        target: f64,
    },

    /// 导出配置快照 JSON
    ConfigExport,

    /// 从快照 JSON 文件恢复配置
    ConfigImport { file: String },
}

/// 统计周期: --year 与 --from/--to 二选一
#[derive(Args, Debug)]
struct PeriodArgs {
    /// 自然年
    #[arg(long, conflicts_with_all = ["from", "to"])]
    year: Option<i32>,

    /// 起始日期 (含)
    #[arg(long, requires = "to")]
    from: Option<String>,

    /// 结束日期 (含)
    #[arg(long, requires = "from")]
    to: Option<String>,
}

impl PeriodArgs {
    fn to_request(&self) -> Result<PeriodRequest> {
        match (self.year, self.from.as_deref(), self.to.as_deref()) {
            (Some(year), None, None) => Ok(PeriodRequest::year(year)),
            (None, Some(from), Some(to)) => Ok(PeriodRequest::range(from, to)),
            _ => bail!("必须指定 --year 或同时指定 --from/--to"),
        }
    }
}

fn main() -> Result<()> {
    logging::init();

    let cli = Cli::parse();
    let db_path = cli.db.clone().unwrap_or_else(get_default_db_path);

    tracing::info!("设备绩效指标引擎 v{} 数据库: {}", asset_metrics::VERSION, db_path);
    let state = AppState::new(db_path).map_err(anyhow::Error::msg)?;

    match cli.command {
        Command::Import { file } => {
            let report = state.import_api.import_observations(&file)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::Dashboard { period, target } => {
            let dashboard = state
                .dashboard_api
                .get_dashboard(&period.to_request()?, target)?;
            println!("{}", serde_json::to_string_pretty(&dashboard)?);
        }
        Command::Trend { asset_id, period } => {
            let trend = state
                .dashboard_api
                .get_asset_trend(&asset_id, &period.to_request()?)?;
            println!("{}", serde_json::to_string_pretty(&trend)?);
        }
        Command::SetTarget { target } => {
            state.dashboard_api.update_target(target)?;
            println!("target={}", target);
        }
        Command::ConfigExport => {
            let snapshot = state
                .config_manager
                .get_config_snapshot()
                .map_err(|e| anyhow::anyhow!("导出配置失败: {}", e))?;
            println!("{}", snapshot);
        }
        Command::ConfigImport { file } => {
            let json = std::fs::read_to_string(&file)
                .with_context(|| format!("无法读取配置快照: {}", file))?;
            let restored = state
                .config_manager
                .restore_config_from_snapshot(&json)
                .map_err(|e| anyhow::anyhow!("恢复配置失败: {}", e))?;
            println!("restored={}", restored);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("asset-metrics").chain(args.iter().copied())).unwrap()
    }

    fn parse_err(args: &[&str]) -> clap::error::ErrorKind {
        Cli::try_parse_from(std::iter::once("asset-metrics").chain(args.iter().copied()))
            .unwrap_err()
            .kind()
    }

    #[test]
    fn test_parse_dashboard_year() {
        let cli = parse(&["--db", "x.db", "dashboard", "--year", "2024", "--target", "90"]);
        assert_eq!(cli.db.as_deref(), Some("x.db"));
        match cli.command {
            Command::Dashboard { period, target } => {
                assert_eq!(target, Some(90.0));
                assert_eq!(period.to_request().unwrap().year, Some(2024));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_range_requires_both_ends() {
        assert_eq!(
            parse_err(&["dashboard", "--from", "2024-01-01"]),
            clap::error::ErrorKind::MissingRequiredArgument
        );

        let cli = parse(&["dashboard", "--from", "2024-01-01", "--to", "2024-01-31"]);
        match cli.command {
            Command::Dashboard { period, .. } => {
                assert_eq!(period.to_request().unwrap().kind, "range")
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_year_conflicts_with_range() {
        assert_eq!(
            parse_err(&["dashboard", "--year", "2024", "--from", "2024-01-01", "--to", "2024-01-31"]),
            clap::error::ErrorKind::ArgumentConflict
        );
    }

    #[test]
    fn test_mistyped_flags_rejected() {
        assert_eq!(
            parse_err(&["dashboard", "--year", "2024", "--tagret", "90"]),
            clap::error::ErrorKind::UnknownArgument
        );
        assert_eq!(
            parse_err(&["trend", "P-101", "--yaer", "2024"]),
            clap::error::ErrorKind::UnknownArgument
        );
    }

    #[test]
    fn test_period_is_required_by_to_request() {
        let cli = parse(&["trend", "P-101"]);
        match cli.command {
            Command::Trend { asset_id, period } => {
                assert_eq!(asset_id, "P-101");
                assert!(period.to_request().is_err());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_subcommand_and_bad_values() {
        assert!(Cli::try_parse_from(["asset-metrics", "dashbord", "--year", "2024"]).is_err());
        assert!(Cli::try_parse_from(["asset-metrics"]).is_err());
        assert_eq!(
            parse_err(&["set-target", "ninety"]),
            clap::error::ErrorKind::ValueValidation
        );
    }

    #[test]
    fn test_config_subcommands() {
        assert!(matches!(parse(&["config-export"]).command, Command::ConfigExport));
        match parse(&["config-import", "snap.json"]).command {
            Command::ConfigImport { file } => assert_eq!(file, "snap.json"),
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
