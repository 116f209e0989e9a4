//! Translator
//!
//! The runtime lookup service the compiled templates call into.

use indexmap::IndexMap;
use tracing::trace;

use super::catalogue::{MessageCatalogue, DEFAULT_DOMAIN};
use super::plural;

/// Interpolation parameters, e.g. `{"%name%": "Ada"}`.
pub type Parameters = IndexMap<String, String>;

pub const COUNT_PARAMETER: &str = "%count%";

pub trait Translator: Send + Sync {
    /// Translates `id`, falling back to `id` itself when no catalogue has it.
    fn trans(
        &self,
        id: &str,
        parameters: &Parameters,
        domain: Option<&str>,
        locale: Option<&str>,
    ) -> String;

    /// Whether the catalogue of `locale` itself defines `id` in `domain`.
    fn defines(&self, id: &str, domain: Option<&str>, locale: Option<&str>) -> bool;

    fn locale(&self) -> &str;
}

/// Translator backed by in-memory catalogues, one per locale.
#[derive(Debug, Clone, Default)]
pub struct CatalogueTranslator {
    locale: String,
    fallback_locales: Vec<String>,
    catalogues: IndexMap<String, MessageCatalogue>,
}

impl CatalogueTranslator {
    pub fn new(locale: impl Into<String>) -> Self {
        CatalogueTranslator {
            locale: locale.into(),
            fallback_locales: Vec::new(),
            catalogues: IndexMap::new(),
        }
    }

    pub fn with_fallback_locales(mut self, locales: Vec<String>) -> Self {
        self.fallback_locales = locales;
        self
    }

    /// Adds a catalogue, merging into any catalogue already held for its locale.
    pub fn add_catalogue(&mut self, catalogue: MessageCatalogue) {
        match self.catalogues.get_mut(catalogue.locale()) {
            Some(existing) => {
                for domain in catalogue.domains() {
                    if let Some(messages) = catalogue.all(domain) {
                        for (id, translation) in messages {
                            existing.set(id.clone(), translation.clone(), domain);
                        }
                    }
                }
            }
            None => {
                self.catalogues
                    .insert(catalogue.locale().to_string(), catalogue);
            }
        }
    }

    pub fn with_catalogue(mut self, catalogue: MessageCatalogue) -> Self {
        self.add_catalogue(catalogue);
        self
    }

    pub fn catalogue(&self, locale: Option<&str>) -> Option<&MessageCatalogue> {
        self.catalogues.get(locale.unwrap_or(&self.locale))
    }

    fn lookup(&self, id: &str, domain: &str, locale: &str) -> Option<&str> {
        std::iter::once(locale)
            .chain(self.fallback_locales.iter().map(String::as_str))
            .filter_map(|l| self.catalogues.get(l))
            .find_map(|catalogue| catalogue.get(id, domain))
    }
}

impl Translator for CatalogueTranslator {
    fn trans(
        &self,
        id: &str,
        parameters: &Parameters,
        domain: Option<&str>,
        locale: Option<&str>,
    ) -> String {
        let domain = domain.unwrap_or(DEFAULT_DOMAIN);
        let locale = locale.unwrap_or(&self.locale);
        let message = match self.lookup(id, domain, locale) {
            Some(message) => message,
            None => {
                trace!(id, domain, locale, "no translation found");
                id
            }
        };

        let count = parameters
            .get(COUNT_PARAMETER)
            .and_then(|count| count.trim().parse::<f64>().ok());
        match count {
            Some(count) => replace_parameters(&plural::choose(message, count, locale), parameters),
            None => replace_parameters(message, parameters),
        }
    }

    fn defines(&self, id: &str, domain: Option<&str>, locale: Option<&str>) -> bool {
        self.catalogue(locale)
            .is_some_and(|catalogue| catalogue.defines(id, domain.unwrap_or(DEFAULT_DOMAIN)))
    }

    fn locale(&self) -> &str {
        &self.locale
    }
}

/// Replaces every occurrence of each parameter key in one left-to-right
/// pass, preferring the longest key at each position. Replaced text is never
/// scanned again.
pub fn replace_parameters(text: &str, parameters: &Parameters) -> String {
    if parameters.is_empty() {
        return text.to_string();
    }

    let mut keys: Vec<(&str, &str)> = parameters
        .iter()
        .filter(|(key, _)| !key.is_empty())
        .map(|(key, value)| (key.as_str(), value.as_str()))
        .collect();
    keys.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

    let mut result = String::with_capacity(text.len());
    let mut rest = text;
    'scan: while let Some(ch) = rest.chars().next() {
        for (key, value) in &keys {
            if rest.starts_with(key) {
                result.push_str(value);
                rest = &rest[key.len()..];
                continue 'scan;
            }
        }
        result.push(ch);
        rest = &rest[ch.len_utf8()..];
    }
    result
}
