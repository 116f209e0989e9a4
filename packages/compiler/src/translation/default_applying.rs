//! Default Applying Node Visitor
//!
//! Replaces `message|trans|desc('Default')` so that the default message is
//! rendered while no translation exists for `message`. Only registered for
//! development compilation.

use tracing::{debug, trace};

use super::desc_chain::match_desc_chain;
use super::rewrite::emit;
use crate::error::Result;
use crate::expression_parser::{serialize, Node};
use crate::template::NodeVisitor;

/// Runs after the other message-normalizing visitors and before filter
/// lowering.
pub const DEFAULT_APPLYING_PRIORITY: i32 = -2;

#[derive(Debug, Clone, Copy)]
pub struct DefaultApplyingNodeVisitor {
    enabled: bool,
}

impl Default for DefaultApplyingNodeVisitor {
    fn default() -> Self {
        DefaultApplyingNodeVisitor { enabled: true }
    }
}

impl DefaultApplyingNodeVisitor {
    pub fn new(enabled: bool) -> Self {
        DefaultApplyingNodeVisitor { enabled }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl NodeVisitor for DefaultApplyingNodeVisitor {
    fn enter_node(&self, node: Node) -> Result<Node> {
        if !self.enabled {
            trace!(line = node.lineno(), "default applying disabled");
            return Ok(node);
        }

        let Node::Filter(filter) = &node else {
            return Ok(node);
        };
        match match_desc_chain(filter)? {
            Some(chain) => {
                let replacement = emit(&chain);
                debug!(replacement = %serialize(&replacement), "applied desc default");
                Ok(replacement)
            }
            None => {
                trace!(filter = %filter.name, line = filter.lineno, "not a desc filter");
                Ok(node)
            }
        }
    }

    fn priority(&self) -> i32 {
        DEFAULT_APPLYING_PRIORITY
    }

    fn name(&self) -> &str {
        "default_applying"
    }
}
