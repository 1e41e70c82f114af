use std::path::PathBuf;

use skymood_core::{Config, DayBoundary};
use tempfile::TempDir;

#[test]
fn missing_file_loads_defaults() {
    let dir = TempDir::new().unwrap();
    let cfg = Config::load_from(&dir.path().join("config.toml")).unwrap();
    assert_eq!(cfg, Config::default());
}

#[test]
fn saved_config_round_trips_through_nested_dirs() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("skymood").join("config.toml");

    let mut cfg = Config::default();
    cfg.set_api_key("abc".into());
    cfg.default_city = Some("Oslo".into());
    cfg.set_day_boundary(DayBoundary::Viewer);
    cfg.asset_dir = Some(PathBuf::from("/srv/clips"));
    cfg.save_to(&path).unwrap();

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded, cfg);
    assert_eq!(loaded.day_boundary().unwrap(), DayBoundary::Viewer);
}

#[test]
fn broken_toml_names_the_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "api_key = [").unwrap();

    let err = Config::load_from(&path).unwrap_err();
    assert!(err.to_string().contains("Failed to parse config file"));
}
