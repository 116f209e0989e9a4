//! Template Environment
//!
//! Ties the parser, the registered node visitors and the renderer together.

use std::sync::Arc;

use rayon::prelude::*;
use tracing::debug;

use super::node_visitor::{NodeTraverser, NodeVisitor};
use super::nodes::Template;
use crate::config::CompilerConfig;
use crate::error::Result;
use crate::expression_parser::Parser;
use crate::render::{Context, Renderer};
use crate::translation::{TranslationExtension, Translator};

#[derive(Debug)]
pub struct Environment {
    config: CompilerConfig,
    extension: TranslationExtension,
    traverser: NodeTraverser,
    parser: Parser,
}

impl Environment {
    pub fn new(config: CompilerConfig, translator: Arc<dyn Translator>) -> Self {
        let extension = TranslationExtension::new(translator, config.debug)
            .with_default_domain(config.default_domain.clone());
        let traverser = NodeTraverser::new(extension.node_visitors());
        debug!(
            extension = extension.name(),
            visitors = ?traverser.visitor_names(),
            "environment ready"
        );
        Environment {
            config,
            extension,
            traverser,
            parser: Parser::new(),
        }
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    pub fn extension(&self) -> &TranslationExtension {
        &self.extension
    }

    pub fn add_visitor(&mut self, visitor: Box<dyn NodeVisitor>) {
        self.traverser.add_visitor(visitor);
    }

    /// Parses without running any visitor.
    pub fn parse(&self, source: &str, name: &str) -> Result<Template> {
        self.parser.parse_template(source, name)
    }

    pub fn compile(&self, source: &str, name: &str) -> Result<Template> {
        let template = self.parse(source, name)?;
        self.traverser.traverse_template(template)
    }

    /// Compiles independent templates in parallel. Results keep input order.
    pub fn compile_all(&self, sources: &[(&str, &str)]) -> Vec<Result<Template>> {
        sources
            .par_iter()
            .map(|(name, source)| self.compile(source, name))
            .collect()
    }

    pub fn render(&self, template: &Template, context: &Context) -> Result<String> {
        Renderer::new(&self.extension, self.config.locale.as_deref()).render(template, context)
    }

    /// Compiles and renders in one step.
    pub fn render_source(&self, source: &str, name: &str, context: &Context) -> Result<String> {
        let template = self.compile(source, name)?;
        self.render(&template, context)
    }
}
