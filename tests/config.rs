use std::time::Duration;

use taskdesk::config::Config;
use taskdesk::controller::{SortMode, TaskFilter};

#[test]
fn test_default_config() {
    let config = Config::default();
    assert_eq!(config.api.base_url, "http://127.0.0.1:5000");
    assert_eq!(config.api.csrf_token_env, "TASKDESK_CSRF_TOKEN");
    assert!(config.api.csrf_token.is_none());
    assert_eq!(config.ui.default_filter, TaskFilter::All);
    assert_eq!(config.ui.default_sort, SortMode::Manual);
    assert_eq!(config.notes.autosave_interval(), Duration::from_secs(60));
    assert_eq!(config.notes.save_debounce(), Duration::from_millis(1500));
    assert!(!config.logging.enabled);
}

#[test]
fn test_config_validation() {
    let mut config = Config::default();

    // Valid config should pass
    assert!(config.validate().is_ok());

    // Base URL must be http(s)
    config.api.base_url = "localhost:5000".to_string();
    assert!(config.validate().is_err());

    // Reset and test invalid autosave interval
    config.api.base_url = "https://tasks.example.com".to_string();
    assert!(config.validate().is_ok());
    config.notes.autosave_interval_seconds = 0;
    assert!(config.validate().is_err());
    config.notes.autosave_interval_seconds = 7200;
    assert!(config.validate().is_err());

    config.notes.autosave_interval_seconds = 30;
    config.notes.save_debounce_millis = 120_000;
    assert!(config.validate().is_err());
}

#[test]
fn test_config_serialization() {
    let config = Config::default();
    let toml_str = toml::to_string_pretty(&config).unwrap();
    assert!(toml_str.contains("base_url = \"http://127.0.0.1:5000\""));
    assert!(toml_str.contains("default_sort = \"manual\""));
    assert!(toml_str.contains("autosave_interval_seconds = 60"));
    // Unset token is left out of the file
    assert!(!toml_str.contains("csrf_token ="));
}

#[test]
fn test_partial_config_deserialization() {
    // Partial TOML configs merge with defaults
    let partial_toml = r#"
[ui]
default_filter = "in_progress"
default_sort = "due_asc"

[logging]
enabled = true
"#;

    let config: Config = toml::from_str(partial_toml).unwrap();

    assert_eq!(config.ui.default_filter, TaskFilter::InProgress);
    assert_eq!(config.ui.default_sort, SortMode::DueAsc);
    assert!(config.logging.enabled);

    assert!(!config.ui.mouse_enabled);
    assert_eq!(config.api.base_url, "http://127.0.0.1:5000");
    assert_eq!(config.notes.autosave_interval_seconds, 60);
}

#[test]
fn test_empty_config_deserialization() {
    let config: Config = toml::from_str("").unwrap();
    let default_config = Config::default();

    assert_eq!(config.api.base_url, default_config.api.base_url);
    assert_eq!(config.ui.default_sort, default_config.ui.default_sort);
    assert_eq!(
        config.notes.save_debounce_millis,
        default_config.notes.save_debounce_millis
    );
    assert_eq!(config.logging.enabled, default_config.logging.enabled);
}

#[test]
fn test_explicit_csrf_token_wins() {
    let mut config = Config::default();
    config.api.csrf_token_env = "TASKDESK_TEST_TOKEN_EXPLICIT".to_string();
    std::env::set_var("TASKDESK_TEST_TOKEN_EXPLICIT", "from-env");

    assert_eq!(config.api.resolve_csrf_token().as_deref(), Some("from-env"));

    config.api.csrf_token = Some("from-file".to_string());
    assert_eq!(config.api.resolve_csrf_token().as_deref(), Some("from-file"));

    config.api.csrf_token = Some(String::new());
    assert_eq!(config.api.resolve_csrf_token().as_deref(), Some("from-env"));

    std::env::remove_var("TASKDESK_TEST_TOKEN_EXPLICIT");
    assert!(config.api.resolve_csrf_token().is_none());
}

#[test]
fn test_load_from_file_rejects_invalid_values() {
    use std::fs;

    let dir = std::env::temp_dir().join("taskdesk_test_invalid_config");
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("config.toml");
    fs::write(&path, "[api]\nbase_url = \"ftp://example.com\"\n").unwrap();

    assert!(Config::load_from_file(&path).is_err());

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_generate_config_creates_directory() {
    use std::fs;

    let temp_dir = std::env::temp_dir().join("taskdesk_test_config");
    let config_path = temp_dir.join("nested").join("config.toml");

    if temp_dir.exists() {
        let _ = fs::remove_dir_all(&temp_dir);
    }
    assert!(!temp_dir.exists());

    let result = Config::generate_default_config(&config_path);
    assert!(result.is_ok());

    assert!(config_path.exists());

    let content = fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("# taskdesk Configuration File"));
    assert!(content.contains("csrf_token_env = \"TASKDESK_CSRF_TOKEN\""));

    // The generated file loads back
    let loaded = Config::load_from_file(&config_path).unwrap();
    assert_eq!(loaded.api.base_url, "http://127.0.0.1:5000");

    let _ = fs::remove_dir_all(&temp_dir);
}
