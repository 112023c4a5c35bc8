use std::{
    env,
    time::{SystemTime, UNIX_EPOCH},
};

use super::*;

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name| vars.get(name).cloned()
}

#[test]
fn defaults_point_at_public_tmdb_in_french() {
    let settings = Settings::default();
    assert_eq!(settings.api_base_url, "https://api.themoviedb.org/3");
    assert_eq!(settings.language, "fr-FR");
    assert_eq!(settings.poster_base_url, "https://image.tmdb.org/t/p/w500");
    assert_eq!(settings.payment_delay(), Duration::from_millis(2000));
    assert_eq!(settings.auth_delay(), Duration::from_millis(1000));
    assert!(settings.tmdb().is_err());
}

#[test]
fn file_values_apply_and_env_overrides_them() {
    let mut settings = Settings::default();
    apply_file(
        &mut settings,
        r#"
api_key = "from-file"
language = "en-US"
payment_delay_ms = 10
"#,
    );
    assert_eq!(settings.api_key.as_deref(), Some("from-file"));
    assert_eq!(settings.language, "en-US");
    assert_eq!(settings.payment_delay_ms, 10);

    apply_env(
        &mut settings,
        env_from(&[
            ("TMDB_API_KEY", "bare"),
            ("APP__API_KEY", "prefixed"),
            ("APP__AUTH_DELAY_MS", "0"),
            ("APP__PAYMENT_DELAY_MS", "soon"),
        ]),
    );
    assert_eq!(settings.api_key.as_deref(), Some("prefixed"));
    assert_eq!(settings.auth_delay_ms, 0);
    assert_eq!(settings.payment_delay_ms, 10);

    let tmdb = settings.tmdb().expect("tmdb config");
    assert_eq!(tmdb.api_key, "prefixed");
    assert_eq!(tmdb.language, "en-US");
}

#[test]
fn unreadable_file_leaves_defaults() {
    let mut settings = Settings::default();
    apply_file(&mut settings, "this is = = not toml");
    assert_eq!(settings, Settings::default());
}

#[test]
fn blank_api_key_is_treated_as_missing() {
    let mut settings = Settings::default();
    apply_env(&mut settings, env_from(&[("TMDB_API_KEY", "  ")]));
    assert!(settings.tmdb().is_err());
}

#[test]
fn normalizes_plain_file_path_to_sqlite_url() {
    assert_eq!(
        normalize_database_url("./data/test.db"),
        "sqlite://./data/test.db"
    );
    assert_eq!(normalize_database_url("sqlite:data/x.db"), "sqlite://data/x.db");
    assert_eq!(normalize_database_url("sqlite::memory:"), "sqlite::memory:");
    assert_eq!(normalize_database_url("  "), Settings::default().database_url);
}

#[tokio::test]
async fn normalized_bare_path_opens_in_a_fresh_directory() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();

    let temp_root = env::temp_dir().join(format!("cinema_config_test_{suffix}"));
    let db_path = temp_root.join("data").join("cinema.db");

    let url = normalize_database_url(&db_path.display().to_string());
    assert!(url.starts_with("sqlite://"));
    assert!(!temp_root.exists());

    let storage = storage::Storage::new(&url).await.expect("open store");
    storage.health_check().await.expect("health");
    drop(storage);
    assert!(db_path.exists());

    fs::remove_dir_all(temp_root).expect("cleanup");
}
