// ==========================================
// ConfigManager 集成测试
// ==========================================
// 测试范围: 默认值、文件库持久化、快照恢复
// ==========================================


use asset_metrics::config::{config_keys, ConfigManager};
use test_helpers::{create_test_db, insert_test_config};

#[test]
fn test_defaults_on_fresh_db() {
    let (_tmp, db_path) = create_test_db().expect("无法创建测试数据库");
    let config = ConfigManager::new(&db_path).unwrap();

    assert_eq!(config.get_reliability_target().unwrap(), 95.0);
    assert!(config.get_filter_out_of_window().unwrap());
    assert_eq!(config.get_config_snapshot().unwrap(), "{}");
}

#[test]
fn test_target_persists_across_instances() {
    let (_tmp, db_path) = create_test_db().expect("无法创建测试数据库");

    ConfigManager::new(&db_path)
        .unwrap()
        .set_reliability_target(92.5)
        .unwrap();

    let reopened = ConfigManager::new(&db_path).unwrap();
    assert_eq!(reopened.get_reliability_target().unwrap(), 92.5);
    assert!(reopened
        .get_config_snapshot()
        .unwrap()
        .contains("\"92.5\""));
}

#[test]
fn test_values_written_externally() {
    let (_tmp, db_path) = create_test_db().expect("无法创建测试数据库");
    insert_test_config(&db_path, config_keys::FILTER_OUT_OF_WINDOW, "off").unwrap();

    let config = ConfigManager::new(&db_path).unwrap();
    assert!(!config.get_filter_out_of_window().unwrap());

    insert_test_config(&db_path, config_keys::FILTER_OUT_OF_WINDOW, "yes").unwrap();
    assert!(config.get_filter_out_of_window().unwrap());
}

#[test]
fn test_snapshot_restore() {
    let (_tmp, db_path) = create_test_db().expect("无法创建测试数据库");
    let config = ConfigManager::new(&db_path).unwrap();

    config.set_reliability_target(90.0).unwrap();
    let snapshot = config.get_config_snapshot().unwrap();
    assert!(snapshot.contains(config_keys::RELIABILITY_TARGET_PCT));

    config.set_reliability_target(50.0).unwrap();
    assert_eq!(config.restore_config_from_snapshot(&snapshot).unwrap(), 1);
    assert_eq!(config.get_reliability_target().unwrap(), 90.0);

    assert!(config.restore_config_from_snapshot("not json").is_err());
}
