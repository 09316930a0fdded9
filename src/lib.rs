//! MedAlert client core
//!
//! Wires the settings store, the bundled translations and the process-wide
//! contexts together, and hands out the state behind individual screens.
//!
//! ```no_run
//! use medalert::{App, AppConfig};
//!
//! # async fn run() -> medalert::Result<()> {
//! medalert::init_logging("info");
//! let app = App::open(AppConfig::new("medalert_kv.db")).await?;
//! println!("{}", app.language().t(medalert::i18n::keys::HOME_GREETING, &[("name", "Ada")]));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod logging;

use std::sync::Arc;
use thiserror::Error;

pub use app_core;
pub use app_state;
pub use i18n;
pub use storage;

pub use app_core::{DigitCountValidator, ProfileField, Report, ReportId, ReportKind, ReportList, UserRecord};
pub use app_state::{
    AuthContext, EditProfileScreen, LanguageContext, LanguageState, ReportHistory, SubmitOutcome,
    ThemeContext,
};
pub use config::AppConfig;
pub use logging::init_logging;

use i18n::TranslationTable;
use storage::{KeyValueStore, KvStore};

/// Application startup errors
#[derive(Debug, Error)]
pub enum AppError {
    /// Settings store could not be opened
    #[error("Storage error: {0}")]
    Storage(#[from] storage::KvError),

    /// Bundled translations failed their checks
    #[error("Translation table error: {0}")]
    Translations(#[from] i18n::TableError),

    /// Configured language is neither a language name nor a known locale
    #[error("Language error: {0}")]
    Language(#[from] app_state::LanguageError),

    /// Configuration could not be parsed
    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type for application startup
pub type Result<T> = std::result::Result<T, AppError>;

/// The running client core
pub struct App {
    config: AppConfig,
    store: Arc<dyn KeyValueStore>,
    language: Arc<LanguageContext>,
    theme: Arc<ThemeContext>,
    auth: Arc<AuthContext>,
    phone: Arc<DigitCountValidator>,
}

impl App {
    /// Open the on-disk settings store described by `config` and start
    pub async fn open(config: AppConfig) -> Result<Self> {
        let store = KvStore::new(config.kv.clone())?;
        Self::start(config, Arc::new(store)).await
    }

    /// Start on top of an existing store
    ///
    /// Loads the saved language, theme and signed-in user.
    pub async fn start(config: AppConfig, store: Arc<dyn KeyValueStore>) -> Result<Self> {
        let table = Arc::new(TranslationTable::bundled()?);
        let initial = if table.contains_language(&config.default_language) {
            config.default_language.clone()
        } else {
            table
                .language_for_locale(&config.default_language)
                .unwrap_or(config.default_language.as_str())
                .to_string()
        };

        let language = LanguageContext::new(table, store.clone()).with_initial_language(&initial)?;
        let language = Arc::new(language);
        let theme = Arc::new(ThemeContext::new(store.clone()));
        let auth = Arc::new(AuthContext::new(store.clone()));

        let selected = language.init().await;
        let mode = theme.init().await;
        let user = auth.restore().await;
        tracing::info!(
            language = %selected,
            theme = %mode,
            signed_in = user.is_some(),
            "client core started"
        );

        Ok(Self { config, store, language, theme, auth, phone: Arc::new(DigitCountValidator::new()) })
    }

    /// Active configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Settings store
    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    /// Language context
    pub fn language(&self) -> &Arc<LanguageContext> {
        &self.language
    }

    /// Theme context
    pub fn theme(&self) -> &Arc<ThemeContext> {
        &self.theme
    }

    /// Auth context
    pub fn auth(&self) -> &Arc<AuthContext> {
        &self.auth
    }

    /// Mount the edit-profile screen for the signed-in user
    pub fn edit_profile_screen(&self) -> EditProfileScreen {
        EditProfileScreen::new(self.language.clone(), self.auth.clone())
            .with_phone_validator(self.phone.clone(), self.config.region_code.clone())
    }

    /// Mount the report history screen over `reports`
    pub fn report_history(&self, reports: ReportList) -> ReportHistory {
        ReportHistory::with_undo_window(reports, self.config.undo_window_duration())
    }
}
