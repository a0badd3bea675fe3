use std::fs;

use crate::profile::{init_user_config_in, load_user_profile_in};

fn scratch_dir() -> std::path::PathBuf {
    std::env::temp_dir().join(format!("tango-profiles-{}", uuid::Uuid::new_v4()))
}

#[test]
fn first_run_creates_main_profile() {
    let dir = scratch_dir();

    init_user_config_in(&dir).unwrap();
    assert!(dir.join("main.json").exists());

    let config = load_user_profile_in(&dir, "main").unwrap();
    assert_eq!(config.practice.advance_delay_ms, 300);

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn missing_profile_falls_back_to_main() {
    let dir = scratch_dir();
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join("main.json"),
        r#"{ "name": "main", "value": { "ui": { "locale": "ja-JP" } } }"#,
    )
    .unwrap();

    let config = load_user_profile_in(&dir, "work").unwrap();
    assert_eq!(config.ui.locale, "ja-JP");

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn existing_main_profile_is_not_overwritten() {
    let dir = scratch_dir();
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join("main.json"),
        r#"{ "name": "main", "value": { "offline": true } }"#,
    )
    .unwrap();

    init_user_config_in(&dir).unwrap();
    assert!(load_user_profile_in(&dir, "main").unwrap().offline);

    fs::remove_dir_all(&dir).ok();
}
