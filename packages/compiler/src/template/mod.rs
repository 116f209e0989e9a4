//! Template Module
//!
//! Template nodes, the node visitor machinery and the environment that
//! compiles and renders templates.

pub mod environment;
pub mod node_visitor;
pub mod nodes;

pub use environment::Environment;
pub use node_visitor::{FnVisitor, NodeTraverser, NodeVisitor};
pub use nodes::{PrintNode, Template, TemplateNode, TextNode};
