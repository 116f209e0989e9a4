//! `desc` filter chain matching
//!
//! Recognizes `message|trans(...)|desc('Default')`, possibly with other
//! filters between `trans` and `desc`, and classifies the shape of the
//! `trans` call.

use crate::error::{CompilerError, Result};
use crate::expression_parser::{FilterExpr, Node};
use crate::translation::translator::COUNT_PARAMETER;

pub const DESC_FILTER: &str = "desc";
pub const TRANS_FILTER: &str = "trans";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescChainKind {
    /// `message|trans|desc(...)`
    Plain,
    /// `message|trans({'%name%': name})|desc(...)`
    PlainWithArguments,
    /// The `trans` parameters carry `%count%`, so the plural form is only
    /// known at render time.
    Pluralized,
}

/// A matched chain. Every field borrows from the `desc` filter.
#[derive(Debug, Clone, Copy)]
pub struct DescChainMatch<'a> {
    pub desc: &'a FilterExpr,
    /// The first `trans` filter found walking down from `desc`
    pub trans: &'a FilterExpr,
    /// The filter `desc` is applied to directly
    pub wrapping: &'a FilterExpr,
    /// The default message, `desc`'s first argument
    pub default: &'a Node,
    pub kind: DescChainKind,
}

/// Matches `filter` against the `desc`-after-`trans` shape.
///
/// Returns `Ok(None)` for any filter other than `desc`; a `desc` filter that
/// has no `trans` below it is an error.
pub fn match_desc_chain(filter: &FilterExpr) -> Result<Option<DescChainMatch<'_>>> {
    if !filter.is(DESC_FILTER) {
        return Ok(None);
    }

    let trans = find_trans_filter(&filter.node)
        .ok_or(CompilerError::MissingTransFilter { line: filter.lineno })?;
    // find_trans_filter only succeeds when the operand is itself a filter
    let wrapping = filter
        .node
        .as_filter()
        .ok_or(CompilerError::MissingTransFilter { line: filter.lineno })?;
    let default = filter
        .arguments
        .first()
        .ok_or(CompilerError::DescWithoutDefault { line: filter.lineno })?;

    let kind = if is_pluralized(trans) {
        DescChainKind::Pluralized
    } else if !wrapping.arguments.is_empty() {
        DescChainKind::PlainWithArguments
    } else {
        DescChainKind::Plain
    };

    Ok(Some(DescChainMatch {
        desc: filter,
        trans,
        wrapping,
        default,
        kind,
    }))
}

fn find_trans_filter(node: &Node) -> Option<&FilterExpr> {
    let mut current = node;
    loop {
        match current {
            Node::Filter(f) if f.is(TRANS_FILTER) => return Some(f),
            Node::Filter(f) => current = &f.node,
            Node::Constant(_)
            | Node::Name(_)
            | Node::Array(_)
            | Node::Conditional(_)
            | Node::Binary(_)
            | Node::Transchoice(_) => return None,
        }
    }
}

/// True when some hash argument of `trans` has a `%count%` key.
fn is_pluralized(trans: &FilterExpr) -> bool {
    trans.arguments.iter().any(|argument| match argument {
        Node::Array(array) => array.has_key(COUNT_PARAMETER),
        _ => false,
    })
}
