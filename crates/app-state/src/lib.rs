//! Application state for MedAlert
//!
//! This crate holds the process-wide contexts injected into screens
//! (language, theme, auth) and the state owned by individual screens
//! (profile editing, report history with undo).

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod auth;
pub mod language;
pub mod profile_editor;
pub mod report_history;
pub mod theme;

use thiserror::Error;

pub use auth::AuthContext;
pub use language::{LanguageContext, LanguageError, LanguageState};
pub use profile_editor::{Alert, EditProfileScreen, SubmitOutcome};
pub use report_history::{ReportHistory, UndoNotice, DEFAULT_UNDO_WINDOW};
pub use theme::ThemeContext;

/// Errors raised by the persisted contexts
#[derive(Debug, Error)]
pub enum ContextError {
    /// Key-value store error
    #[error("Storage error: {0}")]
    Storage(#[from] storage::KvError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Operation needs a signed-in user
    #[error("No signed-in user")]
    NotSignedIn,
}

/// Result type for context operations
pub type Result<T> = std::result::Result<T, ContextError>;
