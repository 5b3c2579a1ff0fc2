use super::*;

use std::collections::HashMap;

fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn defaults_point_at_local_api() {
    let settings = Settings::default();
    assert_eq!(settings.base_url, "http://localhost:9000");
    assert_eq!(settings.request_timeout_secs, 30);
    assert!(settings.token_path().ends_with("token"));
}

#[test]
fn file_values_override_defaults() {
    let mut settings = Settings::default();
    apply_file(
        &mut settings,
        r#"
base_url = "http://articles.internal:8080"
data_dir = "/tmp/articles-profile"
request_timeout_secs = 5
"#,
    )
    .expect("apply file");

    assert_eq!(settings.base_url, "http://articles.internal:8080");
    assert_eq!(settings.data_dir, PathBuf::from("/tmp/articles-profile"));
    assert_eq!(settings.request_timeout_secs, 5);
}

#[test]
fn file_rejects_wrongly_typed_values() {
    let mut settings = Settings::default();
    assert!(apply_file(&mut settings, "request_timeout_secs = \"soon\"").is_err());
    assert!(apply_file(&mut settings, "request_timeout_secs = -1").is_err());
    assert!(apply_file(&mut settings, "base_url = 9000").is_err());
}

#[test]
fn app_prefixed_env_wins_over_short_form() {
    let mut settings = Settings::default();
    apply_env(
        &mut settings,
        lookup_from(&[
            ("ARTICLES_BASE_URL", "http://short:1"),
            ("APP__BASE_URL", "http://prefixed:2"),
            ("ARTICLES_DATA_DIR", "/var/lib/articles"),
            ("APP__REQUEST_TIMEOUT_SECS", "12"),
        ]),
    )
    .expect("apply env");

    assert_eq!(settings.base_url, "http://prefixed:2");
    assert_eq!(settings.data_dir, PathBuf::from("/var/lib/articles"));
    assert_eq!(
        settings.token_path(),
        PathBuf::from("/var/lib/articles").join(TOKEN_KEY)
    );
    assert_eq!(settings.request_timeout_secs, 12);
}

#[test]
fn non_numeric_timeout_env_is_an_error() {
    let mut settings = Settings::default();
    let err = apply_env(
        &mut settings,
        lookup_from(&[("APP__REQUEST_TIMEOUT_SECS", "forever")]),
    )
    .expect_err("bad timeout");
    assert!(err.to_string().contains("forever"));
}

#[test]
fn explicit_config_file_is_loaded() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("custom.toml");
    fs::write(&path, "request_timeout_secs = 7\n").expect("write config");

    let settings = load_settings(Some(&path)).expect("load");
    assert_eq!(settings.request_timeout_secs, 7);
}

#[test]
fn missing_explicit_config_file_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = load_settings(Some(&dir.path().join("absent.toml"))).expect_err("missing");
    assert!(err.to_string().contains("absent.toml"));
}
