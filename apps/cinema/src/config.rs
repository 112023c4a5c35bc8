use std::{collections::HashMap, fs, time::Duration};

use anyhow::Context;
use booking_core::{
    catalog::{DEFAULT_API_BASE, DEFAULT_LANGUAGE},
    locale::DEFAULT_POSTER_BASE,
    payment::DEFAULT_PROCESSING_DELAY,
    session::DEFAULT_AUTH_DELAY,
    TmdbConfig,
};
use serde::Deserialize;
use tracing::warn;

pub const SETTINGS_FILE: &str = "cinema.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    pub api_base_url: String,
    pub api_key: Option<String>,
    pub language: String,
    pub poster_base_url: String,
    pub database_url: String,
    pub payment_delay_ms: u64,
    pub auth_delay_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE.into(),
            api_key: None,
            language: DEFAULT_LANGUAGE.into(),
            poster_base_url: DEFAULT_POSTER_BASE.into(),
            database_url: "sqlite://./data/cinema.db".into(),
            payment_delay_ms: DEFAULT_PROCESSING_DELAY.as_millis() as u64,
            auth_delay_ms: DEFAULT_AUTH_DELAY.as_millis() as u64,
        }
    }
}

impl Settings {
    pub fn payment_delay(&self) -> Duration {
        Duration::from_millis(self.payment_delay_ms)
    }

    pub fn auth_delay(&self) -> Duration {
        Duration::from_millis(self.auth_delay_ms)
    }

    pub fn tmdb(&self) -> anyhow::Result<TmdbConfig> {
        let api_key = self
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .context("no TMDB API key configured; set TMDB_API_KEY or api_key in cinema.toml")?;
        Ok(TmdbConfig {
            base_url: self.api_base_url.clone(),
            api_key,
            language: self.language.clone(),
        })
    }
}

pub fn load_settings() -> Settings {
    let mut settings = Settings::default();
    if let Ok(raw) = fs::read_to_string(SETTINGS_FILE) {
        apply_file(&mut settings, &raw);
    }
    apply_env(&mut settings, |name| std::env::var(name).ok());
    settings
}

pub(crate) fn apply_file(settings: &mut Settings, raw: &str) {
    let Ok(file_cfg) = toml::from_str::<HashMap<String, toml::Value>>(raw) else {
        warn!(file = SETTINGS_FILE, "ignoring unreadable settings file");
        return;
    };
    let text = |key: &str| file_cfg.get(key).and_then(|v| v.as_str()).map(str::to_string);
    let millis = |key: &str| {
        file_cfg
            .get(key)
            .and_then(|v| v.as_integer())
            .and_then(|v| u64::try_from(v).ok())
    };

    if let Some(v) = text("api_base_url") {
        settings.api_base_url = v;
    }
    if let Some(v) = text("api_key") {
        settings.api_key = Some(v);
    }
    if let Some(v) = text("language") {
        settings.language = v;
    }
    if let Some(v) = text("poster_base_url") {
        settings.poster_base_url = v;
    }
    if let Some(v) = text("database_url") {
        settings.database_url = v;
    }
    if let Some(v) = millis("payment_delay_ms") {
        settings.payment_delay_ms = v;
    }
    if let Some(v) = millis("auth_delay_ms") {
        settings.auth_delay_ms = v;
    }
}

/// Later names win: `APP__*` overrides the bare variable.
pub(crate) fn apply_env(settings: &mut Settings, var: impl Fn(&str) -> Option<String>) {
    if let Some(v) = var("TMDB_API_KEY") {
        settings.api_key = Some(v);
    }
    if let Some(v) = var("APP__API_KEY") {
        settings.api_key = Some(v);
    }

    if let Some(v) = var("APP__API_BASE_URL") {
        settings.api_base_url = v;
    }
    if let Some(v) = var("APP__LANGUAGE") {
        settings.language = v;
    }
    if let Some(v) = var("APP__POSTER_BASE_URL") {
        settings.poster_base_url = v;
    }

    if let Some(v) = var("DATABASE_URL") {
        settings.database_url = v;
    }
    if let Some(v) = var("APP__DATABASE_URL") {
        settings.database_url = v;
    }

    if let Some(v) = var("APP__PAYMENT_DELAY_MS") {
        match v.parse::<u64>() {
            Ok(parsed) => settings.payment_delay_ms = parsed,
            Err(_) => warn!(value = %v, "ignoring invalid APP__PAYMENT_DELAY_MS"),
        }
    }
    if let Some(v) = var("APP__AUTH_DELAY_MS") {
        match v.parse::<u64>() {
            Ok(parsed) => settings.auth_delay_ms = parsed,
            Err(_) => warn!(value = %v, "ignoring invalid APP__AUTH_DELAY_MS"),
        }
    }
}

/// Turns a bare path into a sqlite url. `Storage::new` creates the parent
/// directory when it opens the database.
pub fn normalize_database_url(raw_database_url: &str) -> String {
    let raw_database_url = raw_database_url.trim();

    if raw_database_url.is_empty() {
        return Settings::default().database_url;
    }

    if raw_database_url.starts_with("sqlite::memory:") || raw_database_url.contains("://") {
        return raw_database_url.to_string();
    }

    if let Some(path) = raw_database_url.strip_prefix("sqlite:") {
        let path = path.replace('\\', "/");
        return format!("sqlite://{path}");
    }

    format!("sqlite://{}", raw_database_url.replace('\\', "/"))
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
