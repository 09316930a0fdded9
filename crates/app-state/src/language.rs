//! Language selection context
//!
//! A single [`LanguageContext`] lives for the whole process and is handed to
//! every screen that renders text. It moves through
//! `Uninitialized → Loading → Ready(language)` once at startup and afterwards
//! only changes language through [`LanguageContext::change`], which persists
//! the selection before switching.

use i18n::{TranslationTable, Translator};
use parking_lot::RwLock;
use std::sync::Arc;
use storage::{keys, KeyValueStore, KvError};
use thiserror::Error;

/// Language change errors
#[derive(Debug, Error)]
pub enum LanguageError {
    /// Requested language is not in the translation table
    #[error("Unknown language: {0}")]
    UnknownLanguage(String),

    /// The persisted selection has not been loaded yet
    #[error("Language context is not ready")]
    NotReady,

    /// The selection could not be persisted
    #[error("Storage error: {0}")]
    Storage(#[from] KvError),
}

/// Result type for language operations
pub type Result<T> = std::result::Result<T, LanguageError>;

/// Lifecycle of the language selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LanguageState {
    /// Nothing loaded yet
    Uninitialized,
    /// Reading the persisted selection
    Loading,
    /// Selection loaded
    Ready(String),
}

/// Process-wide language selection
pub struct LanguageContext {
    translator: Translator,
    store: Arc<dyn KeyValueStore>,
    initial: String,
    state: RwLock<LanguageState>,
}

impl LanguageContext {
    /// Create an uninitialized context
    pub fn new(table: Arc<TranslationTable>, store: Arc<dyn KeyValueStore>) -> Self {
        let initial = table.default_language().to_string();
        Self {
            translator: Translator::new(table),
            store,
            initial,
            state: RwLock::new(LanguageState::Uninitialized),
        }
    }

    /// Select `language` at startup when nothing usable is saved
    ///
    /// Lookups still fall back to the table's default language.
    pub fn with_initial_language(mut self, language: &str) -> Result<Self> {
        if !self.table().contains_language(language) {
            return Err(LanguageError::UnknownLanguage(language.to_string()));
        }
        self.initial = language.to_string();
        Ok(self)
    }

    /// Load the persisted selection
    ///
    /// An absent, unrecognized or unreadable value selects the initial
    /// language, which is the default language unless configured otherwise. Calling this again once loading has started returns the
    /// current language without touching storage.
    pub async fn init(&self) -> String {
        {
            let mut state = self.state.write();
            if *state != LanguageState::Uninitialized {
                drop(state);
                return self.current();
            }
            *state = LanguageState::Loading;
        }

        let saved = match self.store.get(keys::LANGUAGE).await {
            Ok(saved) => saved,
            Err(e) => {
                tracing::warn!("Failed to read saved language: {}", e);
                None
            }
        };

        let language = match saved {
            Some(saved) if self.table().contains_language(&saved) => saved,
            Some(saved) => {
                tracing::debug!(saved = %saved, "ignoring unrecognized saved language");
                self.initial.clone()
            }
            None => self.initial.clone(),
        };

        tracing::debug!(language = %language, "language ready");
        *self.state.write() = LanguageState::Ready(language.clone());
        language
    }

    /// Current lifecycle state
    pub fn state(&self) -> LanguageState {
        self.state.read().clone()
    }

    /// Whether the persisted selection has been loaded
    pub fn is_ready(&self) -> bool {
        matches!(*self.state.read(), LanguageState::Ready(_))
    }

    /// Selected language, or the initial language while not ready
    pub fn current(&self) -> String {
        match &*self.state.read() {
            LanguageState::Ready(language) => language.clone(),
            _ => self.initial.clone(),
        }
    }

    /// Switch to `language` and persist it
    ///
    /// On any error the current language is left unchanged.
    pub async fn change(&self, language: &str) -> Result<()> {
        if !self.is_ready() {
            return Err(LanguageError::NotReady);
        }
        if !self.table().contains_language(language) {
            return Err(LanguageError::UnknownLanguage(language.to_string()));
        }

        self.store.set(keys::LANGUAGE, language).await?;
        *self.state.write() = LanguageState::Ready(language.to_string());
        tracing::info!(language, "language changed");
        Ok(())
    }

    /// Resolve a key in the current language
    pub fn t(&self, key: &str, params: &[(&str, &str)]) -> String {
        self.translator.t(&self.current(), key, params)
    }

    /// Languages the user can pick from
    pub fn available(&self) -> Vec<String> {
        self.table().languages().map(str::to_string).collect()
    }

    /// The translator backing [`LanguageContext::t`]
    pub fn translator(&self) -> &Translator {
        &self.translator
    }

    fn table(&self) -> &TranslationTable {
        self.translator.table()
    }
}
