//! Message Catalogue
//!
//! Per-locale mapping from domain and message id to translated text.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{CompilerError, Result};

pub const DEFAULT_DOMAIN: &str = "messages";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageCatalogue {
    locale: String,
    messages: IndexMap<String, IndexMap<String, String>>,
}

impl MessageCatalogue {
    pub fn new(locale: impl Into<String>) -> Self {
        MessageCatalogue {
            locale: locale.into(),
            messages: IndexMap::new(),
        }
    }

    /// Builds a catalogue from `{"domain": {"id": "translation"}}` JSON.
    pub fn from_json(locale: impl Into<String>, json: &str) -> Result<Self> {
        let messages: IndexMap<String, IndexMap<String, String>> = serde_json::from_str(json)
            .map_err(|e| CompilerError::Config(format!("invalid catalogue: {}", e)))?;
        Ok(MessageCatalogue {
            locale: locale.into(),
            messages,
        })
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn set(&mut self, id: impl Into<String>, translation: impl Into<String>, domain: &str) {
        self.messages
            .entry(domain.to_string())
            .or_default()
            .insert(id.into(), translation.into());
    }

    /// Builder form of [`MessageCatalogue::set`] in the default domain
    pub fn with_message(mut self, id: impl Into<String>, translation: impl Into<String>) -> Self {
        self.set(id, translation, DEFAULT_DOMAIN);
        self
    }

    pub fn defines(&self, id: &str, domain: &str) -> bool {
        self.messages
            .get(domain)
            .is_some_and(|messages| messages.contains_key(id))
    }

    pub fn get(&self, id: &str, domain: &str) -> Option<&str> {
        self.messages
            .get(domain)
            .and_then(|messages| messages.get(id))
            .map(String::as_str)
    }

    pub fn domains(&self) -> impl Iterator<Item = &str> {
        self.messages.keys().map(String::as_str)
    }

    pub fn all(&self, domain: &str) -> Option<&IndexMap<String, String>> {
        self.messages.get(domain)
    }
}
