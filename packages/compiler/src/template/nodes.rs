//! Template Nodes
//!
//! The top level of a parsed template: literal text interleaved with
//! `{{ expression }}` print nodes.

use serde::{Deserialize, Serialize};

use crate::expression_parser::Node;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub name: String,
    pub body: Vec<TemplateNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum TemplateNode {
    Text(TextNode),
    Print(PrintNode),
}

/// Literal template text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextNode {
    pub data: String,
    pub lineno: usize,
}

/// `{{ expression }}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrintNode {
    pub expr: Node,
    pub lineno: usize,
}

impl Template {
    pub fn new(name: impl Into<String>, body: Vec<TemplateNode>) -> Self {
        Template {
            name: name.into(),
            body,
        }
    }

    /// Expressions of every print node, in source order
    pub fn expressions(&self) -> impl Iterator<Item = &Node> {
        self.body.iter().filter_map(|node| match node {
            TemplateNode::Print(print) => Some(&print.expr),
            TemplateNode::Text(_) => None,
        })
    }
}

impl TextNode {
    pub fn new(data: impl Into<String>, lineno: usize) -> Self {
        TextNode {
            data: data.into(),
            lineno,
        }
    }
}

impl PrintNode {
    pub fn new(expr: Node, lineno: usize) -> Self {
        PrintNode { expr, lineno }
    }
}
