//! Template Expression AST
//!
//! Defines the node types produced by the expression parser and consumed by
//! the node visitors. The set of node kinds is closed: every visitor and the
//! renderer match on it exhaustively.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Main AST enum containing all expression node types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Node {
    Constant(ConstantExpr),
    Name(NameExpr),
    Array(ArrayExpr),
    Filter(FilterExpr),
    Conditional(ConditionalExpr),
    Binary(BinaryExpr),
    Transchoice(TranschoiceExpr),
}

/// Literal value carried by a constant expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum ConstantValue {
    String(String),
    Number(f64),
    Bool(bool),
    Null,
}

/// Literal (e.g., `'hello'`, `42`, `true`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstantExpr {
    pub value: ConstantValue,
    pub lineno: usize,
}

/// Context variable reference (e.g., `user_name`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NameExpr {
    pub name: String,
    pub lineno: usize,
}

/// One `key: value` entry of an array or hash literal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrayElement {
    pub key: Node,
    pub value: Node,
}

/// Array or hash literal (e.g., `[a, b]`, `{'%name%': name}`)
///
/// List literals get implicit integer keys, so both shapes share one node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrayExpr {
    pub elements: Vec<ArrayElement>,
    pub lineno: usize,
}

/// Filter application (e.g., `message|trans({'%name%': name})`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterExpr {
    /// Operand the filter is applied to
    pub node: Box<Node>,
    pub name: String,
    pub arguments: Vec<Node>,
    pub lineno: usize,
}

/// Ternary conditional (e.g., `test ? then : otherwise`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionalExpr {
    pub test: Box<Node>,
    pub then: Box<Node>,
    pub otherwise: Box<Node>,
    pub lineno: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOperator {
    Equal,
    NotEqual,
    Concat,
    And,
    Or,
}

impl BinaryOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOperator::Equal => "==",
            BinaryOperator::NotEqual => "!=",
            BinaryOperator::Concat => "~",
            BinaryOperator::And => "and",
            BinaryOperator::Or => "or",
        }
    }
}

/// Binary operator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinaryExpr {
    pub operator: BinaryOperator,
    pub left: Box<Node>,
    pub right: Box<Node>,
    pub lineno: usize,
}

/// Deferred pluralized translation with a default message.
///
/// Arguments are positional: message, default message, then whatever the
/// `trans` filter received (parameters, domain, locale).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranschoiceExpr {
    pub arguments: ArrayExpr,
    pub lineno: usize,
}

// Helper constructors
impl ConstantExpr {
    pub fn new(value: ConstantValue, lineno: usize) -> Self {
        ConstantExpr { value, lineno }
    }

    pub fn as_str(&self) -> Option<&str> {
        match &self.value {
            ConstantValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl ArrayExpr {
    pub fn new(lineno: usize) -> Self {
        ArrayExpr {
            elements: Vec::new(),
            lineno,
        }
    }

    pub fn with_elements(elements: Vec<ArrayElement>, lineno: usize) -> Self {
        ArrayExpr { elements, lineno }
    }

    /// Appends an element, using the next free integer key when `key` is `None`.
    pub fn add_element(&mut self, value: Node, key: Option<Node>) {
        let key = key.unwrap_or_else(|| Node::number(self.next_index() as f64, value.lineno()));
        self.elements.push(ArrayElement { key, value });
    }

    fn next_index(&self) -> usize {
        self.elements
            .iter()
            .filter_map(|element| match &element.key {
                Node::Constant(ConstantExpr {
                    value: ConstantValue::Number(n),
                    ..
                }) if *n >= 0.0 && n.fract() == 0.0 => Some(*n as usize + 1),
                _ => None,
            })
            .max()
            .unwrap_or(0)
    }

    /// True when some key is the string constant `key`.
    pub fn has_key(&self, key: &str) -> bool {
        self.elements.iter().any(|element| match &element.key {
            Node::Constant(c) => c.as_str() == Some(key),
            _ => false,
        })
    }

    /// True when keys are exactly `0..len`, i.e. the literal is a plain list.
    pub fn is_list(&self) -> bool {
        self.elements.iter().enumerate().all(|(i, element)| match &element.key {
            Node::Constant(ConstantExpr {
                value: ConstantValue::Number(n),
                ..
            }) => *n == i as f64,
            _ => false,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn values(&self) -> impl Iterator<Item = &Node> {
        self.elements.iter().map(|element| &element.value)
    }
}

impl FilterExpr {
    pub fn new(node: Node, name: impl Into<String>, arguments: Vec<Node>, lineno: usize) -> Self {
        FilterExpr {
            node: Box::new(node),
            name: name.into(),
            arguments,
            lineno,
        }
    }

    pub fn is(&self, name: &str) -> bool {
        self.name == name
    }
}

impl ConditionalExpr {
    pub fn new(test: Node, then: Node, otherwise: Node, lineno: usize) -> Self {
        ConditionalExpr {
            test: Box::new(test),
            then: Box::new(then),
            otherwise: Box::new(otherwise),
            lineno,
        }
    }
}

impl BinaryExpr {
    pub fn new(operator: BinaryOperator, left: Node, right: Node, lineno: usize) -> Self {
        BinaryExpr {
            operator,
            left: Box::new(left),
            right: Box::new(right),
            lineno,
        }
    }
}

impl TranschoiceExpr {
    pub fn new(arguments: ArrayExpr, lineno: usize) -> Self {
        TranschoiceExpr { arguments, lineno }
    }
}

impl Node {
    pub fn string(value: impl Into<String>, lineno: usize) -> Node {
        Node::Constant(ConstantExpr::new(ConstantValue::String(value.into()), lineno))
    }

    pub fn number(value: f64, lineno: usize) -> Node {
        Node::Constant(ConstantExpr::new(ConstantValue::Number(value), lineno))
    }

    pub fn name(name: impl Into<String>, lineno: usize) -> Node {
        Node::Name(NameExpr {
            name: name.into(),
            lineno,
        })
    }

    pub fn empty_array(lineno: usize) -> Node {
        Node::Array(ArrayExpr::new(lineno))
    }

    pub fn filter(node: Node, name: impl Into<String>, arguments: Vec<Node>, lineno: usize) -> Node {
        Node::Filter(FilterExpr::new(node, name, arguments, lineno))
    }

    pub fn lineno(&self) -> usize {
        match self {
            Node::Constant(e) => e.lineno,
            Node::Name(e) => e.lineno,
            Node::Array(e) => e.lineno,
            Node::Filter(e) => e.lineno,
            Node::Conditional(e) => e.lineno,
            Node::Binary(e) => e.lineno,
            Node::Transchoice(e) => e.lineno,
        }
    }

    pub fn as_filter(&self) -> Option<&FilterExpr> {
        match self {
            Node::Filter(f) => Some(f),
            _ => None,
        }
    }

    pub fn is_filter(&self, name: &str) -> bool {
        self.as_filter().is_some_and(|f| f.is(name))
    }

    /// Rebuilds this node with every direct child passed through `f`, in
    /// source order.
    pub fn map_children<F>(self, f: &mut F) -> Result<Node>
    where
        F: FnMut(Node) -> Result<Node>,
    {
        Ok(match self {
            Node::Constant(_) | Node::Name(_) => self,
            Node::Array(array) => Node::Array(map_array(array, f)?),
            Node::Filter(filter) => {
                let node = f(*filter.node)?;
                let arguments = filter
                    .arguments
                    .into_iter()
                    .map(&mut *f)
                    .collect::<Result<Vec<_>>>()?;
                Node::Filter(FilterExpr {
                    node: Box::new(node),
                    name: filter.name,
                    arguments,
                    lineno: filter.lineno,
                })
            }
            Node::Conditional(c) => Node::Conditional(ConditionalExpr::new(
                f(*c.test)?,
                f(*c.then)?,
                f(*c.otherwise)?,
                c.lineno,
            )),
            Node::Binary(b) => {
                Node::Binary(BinaryExpr::new(b.operator, f(*b.left)?, f(*b.right)?, b.lineno))
            }
            Node::Transchoice(t) => Node::Transchoice(TranschoiceExpr::new(
                map_array(t.arguments, f)?,
                t.lineno,
            )),
        })
    }
}

fn map_array<F>(array: ArrayExpr, f: &mut F) -> Result<ArrayExpr>
where
    F: FnMut(Node) -> Result<Node>,
{
    let elements = array
        .elements
        .into_iter()
        .map(|element| -> Result<ArrayElement> {
            Ok(ArrayElement {
                key: f(element.key)?,
                value: f(element.value)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(ArrayExpr::with_elements(elements, array.lineno))
}
