//! Internationalization for MedAlert
//!
//! This crate provides the translation table, nested-key lookup with
//! fallback to the default language, and `{{placeholder}}` interpolation.
//!
//! # Example
//!
//! ```rust
//! use i18n::{keys, TranslationTable, Translator};
//! use std::sync::Arc;
//!
//! let table = Arc::new(TranslationTable::bundled().unwrap());
//! let translator = Translator::new(table);
//!
//! assert_eq!(translator.t("English", keys::SETTINGS_LANGUAGE, &[]), "Language");
//! assert_eq!(translator.t("English", "no.such.key", &[]), "no.such.key");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod keys;
pub mod table;
pub mod translator;

pub use table::{TableBuilder, TableError, TranslationTable, DEFAULT_LANGUAGE};
pub use translator::{interpolate, Translator};
