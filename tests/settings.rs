use std::path::PathBuf;

use form_autofill::form::Category;
use form_autofill::settings::{FillMode, FillSettings, ManualRule, SettingsStore};

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir()
        .join(format!("form-autofill-test-{}", std::process::id()))
        .join(name)
}

#[test]
fn test_parses_stored_shape() {
    let json = r#"{
        "mode": "manual",
        "manualConfig": {
            "email": { "enabled": true, "text": "mail" },
            "name": { "enabled": false, "text": "" },
            "phone": { "enabled": true, "text": "tel" }
        }
    }"#;

    let settings = FillSettings::from_json(json).expect("valid settings");

    assert_eq!(settings.mode, FillMode::Manual);
    assert_eq!(settings.manual_config.len(), 3);
    assert_eq!(settings.manual_config[&Category::Email], ManualRule::new("mail"));
    let active: Vec<Category> = settings.active_rules().map(|(c, _)| c).collect();
    assert_eq!(active, [Category::Email, Category::Phone]);
}

#[test]
fn test_missing_fields_take_defaults() {
    let settings = FillSettings::from_json(r#"{"mode": "manual"}"#).expect("valid settings");
    assert_eq!(settings, FillSettings::manual());

    let settings = FillSettings::from_json("{}").expect("valid settings");
    assert_eq!(settings, FillSettings::default());
    assert_eq!(settings.mode, FillMode::Auto);
}

#[test]
fn test_serializes_camel_case_keys() {
    let settings = FillSettings::manual().with_rule(Category::FullName, ManualRule::new("성함"));
    let json = settings.to_json().expect("serializes");
    assert!(json.contains("\"manualConfig\""));
    assert!(json.contains("\"fullName\""));
    assert!(json.contains("\"mode\": \"manual\""));
}

#[test]
fn test_store_round_trip() {
    let store = SettingsStore::new(temp_path("round_trip/settings.json"));
    let settings = FillSettings::manual()
        .with_rule(Category::Email, ManualRule::new("mail"))
        .with_rule(Category::Company, ManualRule::new("corp"));

    store.save(&settings).expect("save");

    assert_eq!(store.load(), settings);
    let _ = std::fs::remove_file(store.path());
}

#[test]
fn test_missing_file_loads_defaults() {
    let store = SettingsStore::new(temp_path("missing/settings.json"));
    assert_eq!(store.try_load().expect("missing is not an error"), None);
    assert_eq!(store.load(), FillSettings::default());
}

#[test]
fn test_malformed_file_loads_defaults() {
    let path = temp_path("malformed.json");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "{ not json").unwrap();
    let store = SettingsStore::new(&path);

    assert!(store.try_load().is_err());
    assert_eq!(store.load(), FillSettings::default());
    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_record_without_settings_entry() {
    let path = temp_path("empty_record.json");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "{}").unwrap();
    let store = SettingsStore::new(&path);

    assert_eq!(store.load(), FillSettings::default());
    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_unknown_category_keys_are_skipped() {
    let json = r#"{
        "mode": "manual",
        "manualConfig": {
            "email": { "enabled": true, "text": "mail" },
            "address": { "enabled": true, "text": "addr" },
            "company": "not a rule"
        }
    }"#;

    let settings = FillSettings::from_json(json).expect("unknown keys do not fail the record");

    assert_eq!(settings.mode, FillMode::Manual);
    assert_eq!(settings.manual_config.len(), 1);
    assert_eq!(settings.manual_config[&Category::Email], ManualRule::new("mail"));
}

#[test]
fn test_store_keeps_manual_mode_with_unknown_keys() {
    let path = temp_path("unknown_keys.json");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(
        &path,
        r#"{"settings": {"mode": "manual", "manualConfig": {
            "email": {"enabled": true, "text": "mail"},
            "address": {"enabled": true, "text": "addr"}
        }}}"#,
    )
    .unwrap();
    let store = SettingsStore::new(&path);

    let settings = store.load();

    assert_eq!(settings.mode, FillMode::Manual);
    let active: Vec<Category> = settings.active_rules().map(|(c, _)| c).collect();
    assert_eq!(active, [Category::Email]);
    let _ = std::fs::remove_file(&path);
}
