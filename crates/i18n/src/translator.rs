//! Localized string resolution

use std::sync::Arc;

use crate::table::TranslationTable;

/// Resolves dotted keys against a shared [`TranslationTable`]
#[derive(Debug, Clone)]
pub struct Translator {
    table: Arc<TranslationTable>,
}

impl Translator {
    /// Create a translator over a loaded table
    pub fn new(table: Arc<TranslationTable>) -> Self {
        Self { table }
    }

    /// The underlying table
    pub fn table(&self) -> &TranslationTable {
        &self.table
    }

    /// Resolve `key` for `language`
    ///
    /// A miss anywhere along the path restarts the walk in the default
    /// language; a second miss yields `key` itself. Placeholders of the form
    /// `{{name}}` in a resolved string are filled from `params`.
    pub fn t(&self, language: &str, key: &str, params: &[(&str, &str)]) -> String {
        let resolved = self
            .table
            .resolve(language, key)
            .or_else(|| self.table.resolve(self.table.default_language(), key));

        match resolved {
            Some(template) => interpolate(template, params),
            None => key.to_string(),
        }
    }

    /// Like [`Translator::t`] but returns `fallback` instead of the raw key
    pub fn t_or(&self, language: &str, key: &str, params: &[(&str, &str)], fallback: &str) -> String {
        if self.has_key(language, key) {
            self.t(language, key, params)
        } else {
            interpolate(fallback, params)
        }
    }

    /// Whether `key` resolves in `language` or the default language
    pub fn has_key(&self, language: &str, key: &str) -> bool {
        self.table.resolve(language, key).is_some()
            || self.table.resolve(self.table.default_language(), key).is_some()
    }
}

/// Replace every `{{name}}` whose name appears in `params`
///
/// Placeholders without a matching parameter are kept verbatim. Substituted
/// values are not rescanned.
pub fn interpolate(template: &str, params: &[(&str, &str)]) -> String {
    if params.is_empty() {
        return template.to_string();
    }

    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            out.push_str(&rest[start..]);
            return out;
        };

        let name = &after[..end];
        match params.iter().find(|(param, _)| *param == name) {
            Some((_, value)) => {
                out.push_str(value);
                rest = &after[end + 2..];
            }
            None => {
                // Not a placeholder we know; a real one may start inside it
                out.push_str("{{");
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}
