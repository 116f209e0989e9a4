//! Default message rewriting
//!
//! Builds the subtree that replaces a matched `desc` chain. Plain chains
//! become a conditional that renders the default when the translation
//! came back unchanged; pluralized chains defer that decision to
//! [`TranslationExtension::transchoice_with_default`] at render time.
//!
//! Known limitation: "the translation equals the raw message" is taken to
//! mean "no translation exists". A catalogue entry that translates a
//! message to itself renders the default instead.
//!
//! [`TranslationExtension::transchoice_with_default`]: super::extension::TranslationExtension::transchoice_with_default

use tracing::debug;

use super::desc_chain::{DescChainKind, DescChainMatch};
use crate::expression_parser::{
    ArrayExpr, BinaryExpr, BinaryOperator, ConditionalExpr, FilterExpr, Node, TranschoiceExpr,
};

pub const REPLACE_FILTER: &str = "replace";

/// Builds the replacement for a matched chain. The matched nodes are only
/// read; every reused subtree is cloned.
pub fn emit(chain: &DescChainMatch<'_>) -> Node {
    debug!(
        line = chain.desc.lineno,
        kind = ?chain.kind,
        "rewriting desc filter"
    );
    match chain.kind {
        DescChainKind::Pluralized => emit_transchoice(chain),
        DescChainKind::Plain | DescChainKind::PlainWithArguments => emit_conditional(chain),
    }
}

/// `transchoice_with_default(message, default, ...trans arguments)`
fn emit_transchoice(chain: &DescChainMatch<'_>) -> Node {
    let wrapping = chain.wrapping;
    let mut arguments = ArrayExpr::new(wrapping.lineno);
    arguments.add_element((*wrapping.node).clone(), None);
    arguments.add_element(chain.default.clone(), None);
    for argument in &wrapping.arguments {
        arguments.add_element(argument.clone(), None);
    }
    Node::Transchoice(TranschoiceExpr::new(arguments, wrapping.lineno))
}

/// `wrapping-without-parameters == message ? default : wrapping`
fn emit_conditional(chain: &DescChainMatch<'_>) -> Node {
    let wrapping = chain.wrapping;
    let mut test: FilterExpr = wrapping.clone();
    let mut default = chain.default.clone();

    if chain.kind == DescChainKind::PlainWithArguments {
        let parameters = std::mem::replace(&mut test.arguments[0], Node::empty_array(wrapping.lineno));
        default = Node::filter(default, REPLACE_FILTER, vec![parameters], wrapping.lineno);
    }

    let equality = BinaryExpr::new(
        BinaryOperator::Equal,
        Node::Filter(test),
        (*chain.trans.node).clone(),
        wrapping.lineno,
    );
    Node::Conditional(ConditionalExpr::new(
        Node::Binary(equality),
        default,
        Node::Filter(wrapping.clone()),
        wrapping.lineno,
    ))
}
