//! Translation Module
//!
//! Message catalogues, the runtime translator, and the compile-time pass
//! that applies `desc` default messages.

pub mod catalogue;
pub mod default_applying;
pub mod desc_chain;
pub mod extension;
pub mod plural;
pub mod rewrite;
pub mod translator;

pub use catalogue::{MessageCatalogue, DEFAULT_DOMAIN};
pub use default_applying::{DefaultApplyingNodeVisitor, DEFAULT_APPLYING_PRIORITY};
pub use desc_chain::{match_desc_chain, DescChainKind, DescChainMatch};
pub use extension::TranslationExtension;
pub use translator::{replace_parameters, CatalogueTranslator, Parameters, Translator};
