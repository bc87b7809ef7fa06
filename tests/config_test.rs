use docref::config::{
    config_path, load_config, read_config, save_config, ValidatorConfig, CONFIG_FILENAME,
};
use tempfile::TempDir;

#[test]
fn missing_config_file_yields_defaults() {
    let dir = TempDir::new().expect("failed to create temp dir");

    let config = load_config(dir.path()).expect("missing config should not fail");

    assert_eq!(config, ValidatorConfig::default());
    assert!(!config.strict);
    assert!(config.packages.is_empty());
    assert!(config.validators.overloads);
    assert!(config.validators.see);
    assert!(config.validators.links);
    assert!(config.validators.fires);
}

#[test]
fn save_and_load_roundtrip() {
    let dir = TempDir::new().expect("failed to create temp dir");

    let mut config = ValidatorConfig::default();
    config.strict = true;
    config.packages = vec!["packages/**/src/**".to_string()];
    config.validators.links = false;

    save_config(dir.path(), &config).expect("failed to save config");
    assert!(config_path(dir.path()).exists());

    let loaded = load_config(dir.path()).expect("failed to load config");
    assert_eq!(loaded, config);
}

#[test]
fn partial_config_fills_in_defaults() {
    let dir = TempDir::new().expect("failed to create temp dir");
    let path = dir.path().join(CONFIG_FILENAME);

    std::fs::write(&path, r#"{ "version": 1, "strict": true }"#)
        .expect("failed to write config");

    let config = load_config(dir.path()).expect("failed to load config");
    assert!(config.strict);
    assert!(config.packages.is_empty());
    assert!(
        config.validators.fires,
        "omitted validator toggles default to enabled"
    );
}

#[test]
fn partial_toggles_default_to_enabled() {
    let dir = TempDir::new().expect("failed to create temp dir");
    let path = dir.path().join(CONFIG_FILENAME);

    std::fs::write(
        &path,
        r#"{ "version": 1, "validators": { "links": false } }"#,
    )
    .expect("failed to write config");

    let config = load_config(dir.path()).expect("failed to load config");
    assert!(!config.validators.links);
    assert!(config.validators.overloads);
    assert!(config.validators.see);
    assert!(config.validators.fires);
}

#[test]
fn malformed_config_is_an_error() {
    let dir = TempDir::new().expect("failed to create temp dir");
    let path = dir.path().join(CONFIG_FILENAME);

    std::fs::write(&path, "{ not json").expect("failed to write config");

    assert!(load_config(dir.path()).is_err());
    assert!(read_config(&path).is_err());
}

#[test]
fn read_config_requires_the_file() {
    let dir = TempDir::new().expect("failed to create temp dir");

    assert!(
        read_config(&dir.path().join("nowhere.json")).is_err(),
        "an explicitly named config file must exist"
    );
}

#[test]
fn save_config_overwrites_atomically() {
    let dir = TempDir::new().expect("failed to create temp dir");

    save_config(dir.path(), &ValidatorConfig::default()).expect("failed to save config");

    let mut updated = ValidatorConfig::default();
    updated.strict = true;
    save_config(dir.path(), &updated).expect("failed to overwrite config");

    let loaded = load_config(dir.path()).expect("failed to load config");
    assert!(loaded.strict);
    assert!(
        !config_path(dir.path()).with_extension("tmp").exists(),
        "no temporary file may be left behind"
    );
}
