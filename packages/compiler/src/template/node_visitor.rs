//! Node Visitors
//!
//! A node visitor is a pair of hooks run on every expression node of a
//! template while it is compiled. `enter_node` runs before the node's
//! children are visited and `leave_node` after; either may return a
//! replacement node.
//!
//! Visitors run one after another, each over the whole tree, in ascending
//! priority order. Visitors with equal priority keep registration order.

use std::fmt;

use tracing::trace;

use super::nodes::{Template, TemplateNode};
use crate::error::Result;
use crate::expression_parser::Node;

pub trait NodeVisitor: Send + Sync {
    /// Called before child nodes are visited.
    fn enter_node(&self, node: Node) -> Result<Node>;

    /// Called after child nodes are visited.
    fn leave_node(&self, node: Node) -> Result<Node> {
        Ok(node)
    }

    /// Priority between -10 and 10, lower runs first.
    fn priority(&self) -> i32 {
        0
    }

    fn name(&self) -> &str;
}

type Hook = Box<dyn Fn(Node) -> Result<Node> + Send + Sync>;

/// Visitor built from a pair of plain functions.
pub struct FnVisitor {
    name: String,
    priority: i32,
    enter: Hook,
    leave: Hook,
}

impl FnVisitor {
    pub fn new<E, L>(name: impl Into<String>, priority: i32, enter: E, leave: L) -> Self
    where
        E: Fn(Node) -> Result<Node> + Send + Sync + 'static,
        L: Fn(Node) -> Result<Node> + Send + Sync + 'static,
    {
        FnVisitor {
            name: name.into(),
            priority,
            enter: Box::new(enter),
            leave: Box::new(leave),
        }
    }

    /// Visitor with an identity leave hook.
    pub fn on_enter<E>(name: impl Into<String>, priority: i32, enter: E) -> Self
    where
        E: Fn(Node) -> Result<Node> + Send + Sync + 'static,
    {
        FnVisitor::new(name, priority, enter, Ok)
    }
}

impl fmt::Debug for FnVisitor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnVisitor")
            .field("name", &self.name)
            .field("priority", &self.priority)
            .finish()
    }
}

impl NodeVisitor for FnVisitor {
    fn enter_node(&self, node: Node) -> Result<Node> {
        (self.enter)(node)
    }

    fn leave_node(&self, node: Node) -> Result<Node> {
        (self.leave)(node)
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Runs registered visitors over templates.
#[derive(Default)]
pub struct NodeTraverser {
    visitors: Vec<Box<dyn NodeVisitor>>,
}

impl NodeTraverser {
    pub fn new(visitors: Vec<Box<dyn NodeVisitor>>) -> Self {
        let mut traverser = NodeTraverser::default();
        for visitor in visitors {
            traverser.add_visitor(visitor);
        }
        traverser
    }

    pub fn add_visitor(&mut self, visitor: Box<dyn NodeVisitor>) {
        self.visitors.push(visitor);
        self.visitors.sort_by_key(|v| v.priority());
    }

    /// Visitor names in the order they run
    pub fn visitor_names(&self) -> Vec<&str> {
        self.visitors.iter().map(|v| v.name()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.visitors.is_empty()
    }

    pub fn traverse(&self, mut node: Node) -> Result<Node> {
        for visitor in &self.visitors {
            trace!(visitor = visitor.name(), priority = visitor.priority(), "running node visitor");
            node = traverse_for_visitor(visitor.as_ref(), node)?;
        }
        Ok(node)
    }

    pub fn traverse_template(&self, template: Template) -> Result<Template> {
        let Template { name, body } = template;
        let body = body
            .into_iter()
            .map(|node| -> Result<TemplateNode> {
                match node {
                    TemplateNode::Print(mut print) => {
                        print.expr = self.traverse(print.expr)?;
                        Ok(TemplateNode::Print(print))
                    }
                    text @ TemplateNode::Text(_) => Ok(text),
                }
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Template { name, body })
    }
}

impl fmt::Debug for NodeTraverser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeTraverser")
            .field("visitors", &self.visitor_names())
            .finish()
    }
}

fn traverse_for_visitor(visitor: &dyn NodeVisitor, node: Node) -> Result<Node> {
    let node = visitor.enter_node(node)?;
    let node = node.map_children(&mut |child| traverse_for_visitor(visitor, child))?;
    visitor.leave_node(node)
}
