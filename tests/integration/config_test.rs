use tempfile::TempDir;
use usagepin::core::config::{Configuration, GPU_INDEX, LAST_USAGE_TARGET};
use usagepin::UsageTarget;

#[test]
fn test_missing_file_loads_defaults() {
    let dir = TempDir::new().unwrap();
    let config = Configuration::load_from(dir.path().join("config.json")).unwrap();

    assert_eq!(config.usage_target(), UsageTarget::Cpu);
    assert_eq!(config.gpu_index(), 0);
    assert_eq!(config.tray_interval_ms(), 250);
}

#[test]
fn test_target_survives_restart() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");

    let mut config = Configuration::load_from(&path).unwrap();
    config.set_usage_target(UsageTarget::Gpu).unwrap();
    config.set_gpu_index(1).unwrap();

    // Written before set returns
    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw[LAST_USAGE_TARGET], "GPU");
    assert_eq!(raw[GPU_INDEX], 1);

    let reloaded = Configuration::load_from(&path).unwrap();
    assert_eq!(reloaded.usage_target(), UsageTarget::Gpu);
    assert_eq!(reloaded.gpu_index(), 1);
}

#[test]
fn test_corrupt_file_loads_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json").unwrap();

    let config = Configuration::load_from(&path).unwrap();
    assert_eq!(config.usage_target(), UsageTarget::Cpu);
}

#[test]
fn test_unknown_target_value_falls_back_to_cpu() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"LastUsageTarget": "NPU"}"#).unwrap();

    let config = Configuration::load_from(&path).unwrap();
    assert_eq!(config.usage_target(), UsageTarget::Cpu);
}

#[test]
fn test_unrelated_keys_are_preserved() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"Theme": "dark"}"#).unwrap();

    let mut config = Configuration::load_from(&path).unwrap();
    config.set_usage_target(UsageTarget::Gpu).unwrap();

    let reloaded = Configuration::load_from(&path).unwrap();
    assert_eq!(reloaded.get_value::<String>("Theme").as_deref(), Some("dark"));
}
