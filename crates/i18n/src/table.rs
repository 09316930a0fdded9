//! Translation table loading and nested-key lookup
//!
//! A [`TranslationTable`] maps a language name to a nested JSON object of
//! strings. Tables are built once at startup and never mutated afterwards.

use serde_json::{Map, Value};
use std::collections::BTreeMap;
use thiserror::Error;
use unic_langid::LanguageIdentifier;

use crate::keys;

/// Language every lookup falls back to
pub const DEFAULT_LANGUAGE: &str = "English";

const ENGLISH_JSON: &str = include_str!("../locales/english.json");
const FRENCH_JSON: &str = include_str!("../locales/french.json");
const SPANISH_JSON: &str = include_str!("../locales/spanish.json");

/// Errors raised while building a translation table
#[derive(Debug, Error)]
pub enum TableError {
    /// Translation source is not valid JSON
    #[error("Invalid translations for {language}: {source}")]
    Parse {
        /// Language being loaded
        language: String,
        /// Underlying parse error
        #[source]
        source: serde_json::Error,
    },

    /// Top-level translation value is not an object
    #[error("Translations for {0} must be a JSON object")]
    NotAnObject(String),

    /// A leaf is neither a string nor a nested object
    #[error("Non-string translation at {language}:{path}")]
    NonStringLeaf {
        /// Language being loaded
        language: String,
        /// Dotted path of the offending value
        path: String,
    },

    /// Language code does not parse as a BCP 47 identifier
    #[error("Invalid language code {code:?} for {language}")]
    InvalidCode {
        /// Language being loaded
        language: String,
        /// Rejected code
        code: String,
    },

    /// The same language was added twice
    #[error("Duplicate language: {0}")]
    Duplicate(String),

    /// The default language was never added
    #[error("Default language {0} is not loaded")]
    MissingDefault(String),

    /// A required key does not resolve in the default language
    #[error("Default language {language} is missing key {key}")]
    MissingKey {
        /// Default language name
        language: String,
        /// Missing dotted key
        key: String,
    },
}

/// Result type for table operations
pub type Result<T> = std::result::Result<T, TableError>;

#[derive(Debug, Clone)]
struct LanguageEntry {
    code: LanguageIdentifier,
    root: Map<String, Value>,
}

enum Source {
    Json(String),
    Value(Value),
}

struct PendingLanguage {
    name: String,
    code: String,
    source: Source,
}

/// Builder for [`TranslationTable`]
pub struct TableBuilder {
    default_language: String,
    required_keys: Vec<&'static str>,
    languages: Vec<PendingLanguage>,
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TableBuilder {
    /// Start a table defaulting to English and requiring [`keys::ALL`]
    pub fn new() -> Self {
        Self {
            default_language: DEFAULT_LANGUAGE.to_string(),
            required_keys: keys::ALL.to_vec(),
            languages: Vec::new(),
        }
    }

    /// Set the fallback language
    pub fn default_language(mut self, name: impl Into<String>) -> Self {
        self.default_language = name.into();
        self
    }

    /// Replace the keys the default language must provide
    pub fn required_keys(mut self, required: &[&'static str]) -> Self {
        self.required_keys = required.to_vec();
        self
    }

    /// Add a language from JSON source
    pub fn language(
        mut self,
        name: impl Into<String>,
        code: impl Into<String>,
        json: impl Into<String>,
    ) -> Self {
        self.languages.push(PendingLanguage {
            name: name.into(),
            code: code.into(),
            source: Source::Json(json.into()),
        });
        self
    }

    /// Add the languages shipped with the app: English, French and Spanish
    pub fn with_bundled_languages(self) -> Self {
        self.language("English", "en", ENGLISH_JSON)
            .language("French", "fr", FRENCH_JSON)
            .language("Spanish", "es", SPANISH_JSON)
    }

    /// Add a language from an already-parsed JSON value
    pub fn language_value(
        mut self,
        name: impl Into<String>,
        code: impl Into<String>,
        value: Value,
    ) -> Self {
        self.languages.push(PendingLanguage {
            name: name.into(),
            code: code.into(),
            source: Source::Value(value),
        });
        self
    }

    /// Parse and check every language, producing an immutable table
    pub fn build(self) -> Result<TranslationTable> {
        let mut languages = BTreeMap::new();

        for pending in self.languages {
            let value = match pending.source {
                Source::Json(json) => serde_json::from_str(&json).map_err(|source| {
                    TableError::Parse { language: pending.name.clone(), source }
                })?,
                Source::Value(value) => value,
            };

            let Value::Object(root) = value else {
                return Err(TableError::NotAnObject(pending.name));
            };
            check_leaves(&pending.name, "", &root)?;

            let code = pending.code.parse::<LanguageIdentifier>().map_err(|_| {
                TableError::InvalidCode { language: pending.name.clone(), code: pending.code.clone() }
            })?;

            if languages.contains_key(&pending.name) {
                return Err(TableError::Duplicate(pending.name));
            }
            languages.insert(pending.name, LanguageEntry { code, root });
        }

        let table = TranslationTable { languages, default_language: self.default_language };

        if !table.contains_language(&table.default_language) {
            return Err(TableError::MissingDefault(table.default_language));
        }
        for key in &self.required_keys {
            if table.resolve(&table.default_language, key).is_none() {
                return Err(TableError::MissingKey {
                    language: table.default_language.clone(),
                    key: key.to_string(),
                });
            }
        }

        for language in table.languages() {
            let missing = table.missing_keys(language);
            if !missing.is_empty() {
                tracing::debug!(
                    language,
                    missing = missing.len(),
                    "translations incomplete, falling back to {}",
                    table.default_language
                );
            }
        }

        Ok(table)
    }
}

fn check_leaves(language: &str, prefix: &str, node: &Map<String, Value>) -> Result<()> {
    for (segment, value) in node {
        let path = join_path(prefix, segment);
        match value {
            Value::String(_) => {}
            Value::Object(child) => check_leaves(language, &path, child)?,
            _ => {
                return Err(TableError::NonStringLeaf { language: language.to_string(), path });
            }
        }
    }
    Ok(())
}

fn collect_leaf_paths(prefix: &str, node: &Map<String, Value>, out: &mut Vec<String>) {
    for (segment, value) in node {
        let path = join_path(prefix, segment);
        match value {
            Value::Object(child) => collect_leaf_paths(&path, child, out),
            _ => out.push(path),
        }
    }
}

fn join_path(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_string()
    } else {
        format!("{}.{}", prefix, segment)
    }
}

/// Static translation data keyed by language name
#[derive(Debug, Clone)]
pub struct TranslationTable {
    languages: BTreeMap<String, LanguageEntry>,
    default_language: String,
}

impl TranslationTable {
    /// Start building a table
    pub fn builder() -> TableBuilder {
        TableBuilder::new()
    }

    /// The table shipped with the app, defaulting to English
    pub fn bundled() -> Result<Self> {
        TableBuilder::new().with_bundled_languages().build()
    }

    /// The fallback language name
    pub fn default_language(&self) -> &str {
        &self.default_language
    }

    /// Whether `name` is a loaded language
    pub fn contains_language(&self, name: &str) -> bool {
        self.languages.contains_key(name)
    }

    /// Loaded language names, sorted
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.languages.keys().map(String::as_str)
    }

    /// BCP 47 identifier of a loaded language
    pub fn language_code(&self, name: &str) -> Option<&LanguageIdentifier> {
        self.languages.get(name).map(|entry| &entry.code)
    }

    /// Find the loaded language whose primary subtag matches a device locale
    /// such as `fr-CA` or `es_MX`
    pub fn language_for_locale(&self, locale: &str) -> Option<&str> {
        let requested = locale.trim().replace('_', "-").parse::<LanguageIdentifier>().ok()?;
        self.languages
            .iter()
            .find(|(_, entry)| entry.code.language == requested.language)
            .map(|(name, _)| name.as_str())
    }

    /// Walk `key` segment by segment in one language only
    ///
    /// Returns `None` when the language is unknown, a segment is missing, an
    /// intermediate node is not an object, or the final node is not a string.
    pub fn resolve(&self, language: &str, key: &str) -> Option<&str> {
        let mut segments = key.split('.');
        let first = segments.next()?;
        let mut node = self.languages.get(language)?.root.get(first)?;
        for segment in segments {
            node = node.as_object()?.get(segment)?;
        }
        node.as_str()
    }

    /// Default-language keys a language does not translate
    pub fn missing_keys(&self, language: &str) -> Vec<String> {
        let Some(default) = self.languages.get(&self.default_language) else {
            return Vec::new();
        };
        let mut paths = Vec::new();
        collect_leaf_paths("", &default.root, &mut paths);
        paths.retain(|path| self.resolve(language, path).is_none());
        paths
    }
}
