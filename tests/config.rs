use omnisearch::config::Config;

#[test]
fn test_default_config() {
    let config = Config::default();
    assert_eq!(config.search.debounce_ms, 300);
    assert_eq!(config.search.min_query_len, 2);
    assert_eq!(config.search.create_min_len, 3);
    assert_eq!(config.shortcuts.open, "ctrl+k");
    assert_eq!(config.shortcuts.command_center, "ctrl+/");
    assert_eq!(config.recent_activity.storage_key, "recentActivity");
    assert_eq!(config.recent_activity.max_items, 20);
    assert!(!config.logging.enabled);
}

#[test]
fn test_config_validation() {
    let mut config = Config::default();

    // Valid config should pass
    assert!(config.validate().is_ok());

    config.search.debounce_ms = 60_000;
    assert!(config.validate().is_err());

    config.search.debounce_ms = 300;
    config.search.min_query_len = 0;
    assert!(config.validate().is_err());

    config.search.min_query_len = 2;
    config.shortcuts.open = "ctrl+shift".to_string();
    assert!(config.validate().is_err());

    config.shortcuts.open = "ctrl+k".to_string();
    config.recent_activity.storage_key = String::new();
    assert!(config.validate().is_err());
}

#[test]
fn test_chords_from_config() {
    let config = Config::default();
    let open = config.shortcuts.open_chord().unwrap();
    assert!(open.modifiers.ctrl);
    assert_eq!(open.key.as_deref(), Some("k"));

    let command_center = config.shortcuts.command_center_chord().unwrap();
    assert_eq!(command_center.key.as_deref(), Some("/"));
}

#[test]
fn test_config_serialization() {
    let config = Config::default();
    let toml_str = toml::to_string_pretty(&config).unwrap();
    assert!(toml_str.contains("debounce_ms = 300"));
    assert!(toml_str.contains("open = \"ctrl+k\""));
}

#[test]
fn test_partial_config_deserialization() {
    // Partial TOML configs merge with defaults
    let partial_toml = r#"
[search]
debounce_ms = 150

[logging]
enabled = true
"#;

    let config: Config = toml::from_str(partial_toml).unwrap();

    assert_eq!(config.search.debounce_ms, 150);
    assert!(config.logging.enabled);

    assert_eq!(config.search.min_query_len, 2);
    assert_eq!(config.shortcuts.open, "ctrl+k");
    assert_eq!(config.recent_activity.max_items, 20);
}

#[test]
fn test_empty_config_deserialization() {
    let config: Config = toml::from_str("").unwrap();
    let default_config = Config::default();

    assert_eq!(config.search.debounce_ms, default_config.search.debounce_ms);
    assert_eq!(config.shortcuts.command_center, default_config.shortcuts.command_center);
    assert_eq!(config.recent_activity.storage_key, default_config.recent_activity.storage_key);
    assert_eq!(config.logging.enabled, default_config.logging.enabled);
}

#[test]
fn test_generate_and_load_default_config() {
    let dir = std::env::temp_dir().join(format!("omnisearch-config-{}", std::process::id()));
    let path = dir.join("config.toml");

    Config::generate_default_config(&path).unwrap();
    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("# OmniSearch Configuration File"));

    let loaded = Config::load_from_file(&path).unwrap();
    assert_eq!(loaded.search.debounce_ms, 300);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_invalid_file_is_rejected() {
    let dir = std::env::temp_dir().join(format!("omnisearch-bad-config-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("config.toml");
    std::fs::write(&path, "[search]\nmin_query_len = 0\n").unwrap();

    assert!(Config::load_from_file(&path).is_err());

    let _ = std::fs::remove_dir_all(&dir);
}
