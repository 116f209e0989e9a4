//! Translation Extension
//!
//! Bundles what templates need for translation: the node visitors registered
//! at compile time and the runtime helpers the compiled output calls.

use std::fmt;
use std::sync::Arc;

use tracing::warn;

use super::catalogue::DEFAULT_DOMAIN;
use super::default_applying::DefaultApplyingNodeVisitor;
use super::translator::{Parameters, Translator};
use crate::template::NodeVisitor;

#[derive(Clone)]
pub struct TranslationExtension {
    translator: Arc<dyn Translator>,
    debug: bool,
    default_domain: String,
}

impl TranslationExtension {
    pub fn new(translator: Arc<dyn Translator>, debug: bool) -> Self {
        TranslationExtension {
            translator,
            debug,
            default_domain: DEFAULT_DOMAIN.to_string(),
        }
    }

    pub fn with_default_domain(mut self, domain: impl Into<String>) -> Self {
        self.default_domain = domain.into();
        self
    }

    pub fn name(&self) -> &str {
        "translation"
    }

    pub fn translator(&self) -> &Arc<dyn Translator> {
        &self.translator
    }

    pub fn default_domain(&self) -> &str {
        &self.default_domain
    }

    /// Visitors to register with the compiler. Defaults are only applied in
    /// debug mode.
    pub fn node_visitors(&self) -> Vec<Box<dyn NodeVisitor>> {
        if self.debug {
            vec![Box::new(DefaultApplyingNodeVisitor::new(true))]
        } else {
            Vec::new()
        }
    }

    pub fn trans(
        &self,
        message: &str,
        parameters: &Parameters,
        domain: Option<&str>,
        locale: Option<&str>,
    ) -> String {
        let domain = domain.unwrap_or(&self.default_domain);
        self.translator.trans(message, parameters, Some(domain), locale)
    }

    /// Pluralized translation that falls back to `default` when `message`
    /// has no catalogue entry.
    pub fn transchoice_with_default(
        &self,
        message: &str,
        default: &str,
        parameters: &Parameters,
        domain: Option<&str>,
        locale: Option<&str>,
    ) -> String {
        let domain = domain.unwrap_or(&self.default_domain);
        if !self.translator.defines(message, Some(domain), locale) {
            warn!(message, domain, "no translation, using default message");
            return self.translator.trans(default, parameters, Some(domain), locale);
        }
        self.translator.trans(message, parameters, Some(domain), locale)
    }

    /// `desc` and `meaning` only annotate a message for extraction tools.
    pub fn desc<T>(&self, value: T) -> T {
        value
    }

    pub fn meaning<T>(&self, value: T) -> T {
        value
    }
}

impl fmt::Debug for TranslationExtension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TranslationExtension")
            .field("locale", &self.translator.locale())
            .field("debug", &self.debug)
            .field("default_domain", &self.default_domain)
            .finish()
    }
}
