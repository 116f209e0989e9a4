//! Template Expression Serializer
//!
//! Serializes an AST back to template expression syntax

use super::ast::*;

/// Serialize AST to string
pub fn serialize(node: &Node) -> String {
    let mut visitor = SerializeExpressionVisitor;
    visit_node(&mut visitor, node)
}

struct SerializeExpressionVisitor;

fn visit_node(visitor: &mut SerializeExpressionVisitor, node: &Node) -> String {
    match node {
        Node::Constant(c) => visitor.visit_constant(c),
        Node::Name(n) => n.name.clone(),
        Node::Array(a) => visitor.visit_array(a),
        Node::Filter(f) => visitor.visit_filter(f),
        Node::Conditional(c) => visitor.visit_conditional(c),
        Node::Binary(b) => visitor.visit_binary(b),
        Node::Transchoice(t) => visitor.visit_transchoice(t),
    }
}

impl SerializeExpressionVisitor {
    fn visit_constant(&mut self, ast: &ConstantExpr) -> String {
        match &ast.value {
            ConstantValue::String(value) => {
                format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
            }
            ConstantValue::Number(value) => format_number(*value),
            ConstantValue::Bool(value) => value.to_string(),
            ConstantValue::Null => "null".to_string(),
        }
    }

    fn visit_array(&mut self, ast: &ArrayExpr) -> String {
        if ast.is_list() {
            let elements = ast
                .values()
                .map(|v| visit_node(self, v))
                .collect::<Vec<_>>()
                .join(", ");
            return format!("[{}]", elements);
        }

        let pairs: Vec<String> = ast
            .elements
            .iter()
            .map(|element| {
                let key = match &element.key {
                    Node::Constant(_) => visit_node(self, &element.key),
                    other => format!("({})", visit_node(self, other)),
                };
                format!("{}: {}", key, visit_node(self, &element.value))
            })
            .collect();
        format!("{{{}}}", pairs.join(", "))
    }

    fn visit_filter(&mut self, ast: &FilterExpr) -> String {
        let operand = self.visit_operand(&ast.node);
        if ast.arguments.is_empty() {
            return format!("{}|{}", operand, ast.name);
        }
        let args = ast
            .arguments
            .iter()
            .map(|a| visit_node(self, a))
            .collect::<Vec<_>>()
            .join(", ");
        format!("{}|{}({})", operand, ast.name, args)
    }

    fn visit_conditional(&mut self, ast: &ConditionalExpr) -> String {
        format!(
            "{} ? {} : {}",
            self.visit_operand(&ast.test),
            visit_node(self, &ast.then),
            visit_node(self, &ast.otherwise)
        )
    }

    fn visit_binary(&mut self, ast: &BinaryExpr) -> String {
        format!(
            "{} {} {}",
            self.visit_operand(&ast.left),
            ast.operator.as_str(),
            self.visit_operand(&ast.right)
        )
    }

    fn visit_transchoice(&mut self, ast: &TranschoiceExpr) -> String {
        let args = ast
            .arguments
            .values()
            .map(|a| visit_node(self, a))
            .collect::<Vec<_>>()
            .join(", ");
        format!("transchoice_with_default({})", args)
    }

    /// Operands that are themselves operator expressions get parentheses
    fn visit_operand(&mut self, node: &Node) -> String {
        match node {
            Node::Binary(_) | Node::Conditional(_) => format!("({})", visit_node(self, node)),
            _ => visit_node(self, node),
        }
    }
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}
