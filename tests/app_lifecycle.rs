//! App lifecycle integration tests
//!
//! End-to-end tests for startup, persisted preferences and sign-out against
//! the on-disk settings store.

use medalert::i18n::keys;
use medalert::storage::{ColorMode, KeyValueStore, KvConfig, MemoryStore};
use medalert::{App, AppConfig, LanguageState, UserRecord};
use std::sync::Arc;
use tempfile::TempDir;

fn config(dir: &TempDir) -> AppConfig {
    let path = dir.path().join("settings.db");
    AppConfig::default().kv(KvConfig::new(path.to_string_lossy()).flush_every_ms(None))
}

fn user() -> UserRecord {
    UserRecord {
        id: "u-42".to_string(),
        first_name: "Amara".to_string(),
        last_name: "Okafor".to_string(),
        email: "amara@example.com".to_string(),
        phone_number: Some("+234 803 123 4567".to_string()),
        location: Some("Lagos".to_string()),
        avatar_url: None,
    }
}

/// Language, theme and session survive a restart
#[tokio::test]
async fn test_preferences_survive_restart() {
    let temp_dir = TempDir::new().unwrap();

    // Phase 1: fresh install, change everything
    {
        let app = App::open(config(&temp_dir)).await.unwrap();
        assert_eq!(app.language().state(), LanguageState::Ready("English".to_string()));
        assert_eq!(app.theme().mode(), ColorMode::System);
        assert!(!app.auth().is_signed_in());

        app.language().change("French").await.unwrap();
        app.theme().set(ColorMode::Dark).await.unwrap();
        app.auth().sign_in(user(), "token-abc").await.unwrap();
        app.auth().set_two_factor(true).await.unwrap();
    }

    // Phase 2: restart and verify
    {
        let app = App::open(config(&temp_dir)).await.unwrap();
        assert_eq!(app.language().current(), "French");
        assert_eq!(app.language().t(keys::SETTINGS_TITLE, &[]), "Paramètres");
        assert_eq!(app.theme().mode(), ColorMode::Dark);
        assert_eq!(app.auth().user(), Some(user()));
        assert!(app.auth().two_factor_enabled());
    }
}

/// Sign-out clears the session but keeps preferences
#[tokio::test]
async fn test_sign_out_then_restart() {
    let temp_dir = TempDir::new().unwrap();

    {
        let app = App::open(config(&temp_dir)).await.unwrap();
        app.language().change("Spanish").await.unwrap();
        app.auth().sign_in(user(), "token-abc").await.unwrap();
        app.auth().sign_out().await.unwrap();
    }

    {
        let app = App::open(config(&temp_dir)).await.unwrap();
        assert!(!app.auth().is_signed_in());
        assert_eq!(app.store().get("token").await.unwrap(), None);
        assert_eq!(app.language().current(), "Spanish");
    }
}

/// Missing Spanish strings fall back to English, unknown keys echo back
#[tokio::test]
async fn test_resolver_fallback_chain() {
    let store = Arc::new(MemoryStore::with_entries([("language", "Spanish")]));
    let app = App::start(AppConfig::default(), store).await.unwrap();

    assert_eq!(app.language().t(keys::SETTINGS_TWO_FACTOR, &[]), "Two-factor authentication");
    assert_eq!(app.language().t("settings.doesNotExist", &[]), "settings.doesNotExist");
    assert_eq!(app.language().t(keys::HOME_GREETING, &[("name", "Ada")]), "Hola, Ada");
}

/// A locale picks the initial language when nothing is saved
#[tokio::test]
async fn test_default_language_from_locale() {
    let app = App::start(AppConfig::default().default_language("fr-CA"), Arc::new(MemoryStore::new()))
        .await
        .unwrap();
    assert_eq!(app.language().current(), "French");

    // A saved selection still wins
    let store = Arc::new(MemoryStore::with_entries([("language", "English")]));
    let app = App::start(AppConfig::default().default_language("French"), store).await.unwrap();
    assert_eq!(app.language().current(), "English");
}

/// An unusable configured language is a startup error
#[tokio::test]
async fn test_unknown_default_language() {
    let result = App::start(AppConfig::default().default_language("Klingon"), Arc::new(MemoryStore::new())).await;
    assert!(matches!(result, Err(medalert::AppError::Language(_))));
}

/// Garbage in storage never blocks startup
#[tokio::test]
async fn test_startup_with_corrupt_settings() {
    let store = Arc::new(MemoryStore::with_entries([
        ("language", "Klingon"),
        ("theme", "sepia"),
        ("user", "{\"id\": 7"),
    ]));
    let app = App::start(AppConfig::default(), store).await.unwrap();

    assert_eq!(app.language().current(), "English");
    assert_eq!(app.theme().mode(), ColorMode::System);
    assert!(!app.auth().is_signed_in());
}
