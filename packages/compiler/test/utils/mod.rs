/*
 * Test Utilities
 *
 * Shared builders for translation and template tests
 */
#![allow(dead_code)]

use std::sync::Arc;

use translation_compiler::expression_parser::{Node, Parser};
use translation_compiler::render::{Context, Value};
use translation_compiler::translation::{CatalogueTranslator, MessageCatalogue};
use translation_compiler::{CompilerConfig, Environment};

/// Parses a single expression on line 1
pub fn parse(source: &str) -> Node {
    Parser::new()
        .parse_expression(source, 1)
        .unwrap_or_else(|e| panic!("failed to parse [{}]: {}", source, e))
}

/// English translator with the given `messages` domain entries
pub fn translator(messages: &[(&str, &str)]) -> CatalogueTranslator {
    let mut catalogue = MessageCatalogue::new("en");
    for (id, translation) in messages {
        catalogue.set(*id, *translation, "messages");
    }
    CatalogueTranslator::new("en").with_catalogue(catalogue)
}

pub fn debug_config() -> CompilerConfig {
    CompilerConfig {
        debug: true,
        ..CompilerConfig::default()
    }
}

pub fn environment(debug: bool, messages: &[(&str, &str)]) -> Environment {
    let config = if debug {
        debug_config()
    } else {
        CompilerConfig::default()
    };
    Environment::new(config, Arc::new(translator(messages)))
}

pub fn context(pairs: &[(&str, Value)]) -> Context {
    pairs
        .iter()
        .map(|(name, value)| (name.to_string(), value.clone()))
        .collect()
}
