//! Render Module
//!
//! Evaluates compiled templates against a context.

pub mod filters;
pub mod value;

pub use value::{Context, Value};

use indexmap::IndexMap;

use self::filters::FilterCall;
use crate::error::{CompilerError, Result};
use crate::expression_parser::{ArrayExpr, BinaryOperator, Node, TranschoiceExpr};
use crate::template::{Template, TemplateNode};
use crate::translation::TranslationExtension;

pub struct Renderer<'a> {
    extension: &'a TranslationExtension,
    /// Locale used when a `trans` call names none
    locale: Option<&'a str>,
}

impl<'a> Renderer<'a> {
    pub fn new(extension: &'a TranslationExtension, locale: Option<&'a str>) -> Self {
        Renderer { extension, locale }
    }

    pub fn render(&self, template: &Template, context: &Context) -> Result<String> {
        let mut output = String::new();
        for node in &template.body {
            match node {
                TemplateNode::Text(text) => output.push_str(&text.data),
                TemplateNode::Print(print) => {
                    output.push_str(&self.evaluate(&print.expr, context)?.to_string())
                }
            }
        }
        Ok(output)
    }

    pub fn evaluate(&self, node: &Node, context: &Context) -> Result<Value> {
        match node {
            Node::Constant(c) => Ok(Value::from(&c.value)),
            Node::Name(n) => context
                .get(&n.name)
                .cloned()
                .ok_or_else(|| CompilerError::UndefinedVariable {
                    name: n.name.clone(),
                    line: n.lineno,
                }),
            Node::Array(a) => self.evaluate_array(a, context).map(Value::Map),
            Node::Filter(f) => {
                let operand = self.evaluate(&f.node, context)?;
                let arguments = f
                    .arguments
                    .iter()
                    .map(|arg| self.evaluate(arg, context))
                    .collect::<Result<Vec<_>>>()?;
                filters::apply(
                    self.extension,
                    self.locale,
                    FilterCall {
                        name: &f.name,
                        operand,
                        arguments,
                        lineno: f.lineno,
                    },
                )
            }
            Node::Conditional(c) => {
                if self.evaluate(&c.test, context)?.is_truthy() {
                    self.evaluate(&c.then, context)
                } else {
                    self.evaluate(&c.otherwise, context)
                }
            }
            Node::Binary(b) => {
                let left = self.evaluate(&b.left, context)?;
                // and/or short-circuit
                match b.operator {
                    BinaryOperator::And if !left.is_truthy() => return Ok(Value::Bool(false)),
                    BinaryOperator::Or if left.is_truthy() => return Ok(Value::Bool(true)),
                    _ => {}
                }
                let right = self.evaluate(&b.right, context)?;
                Ok(match b.operator {
                    BinaryOperator::Equal => Value::Bool(left.loose_eq(&right)),
                    BinaryOperator::NotEqual => Value::Bool(!left.loose_eq(&right)),
                    BinaryOperator::Concat => Value::String(format!("{}{}", left, right)),
                    BinaryOperator::And | BinaryOperator::Or => Value::Bool(right.is_truthy()),
                })
            }
            Node::Transchoice(t) => self.evaluate_transchoice(t, context),
        }
    }

    fn evaluate_array(&self, array: &ArrayExpr, context: &Context) -> Result<IndexMap<String, Value>> {
        array
            .elements
            .iter()
            .map(|element| -> Result<(String, Value)> {
                let key = self.evaluate(&element.key, context)?.to_string();
                Ok((key, self.evaluate(&element.value, context)?))
            })
            .collect()
    }

    /// Arguments are `[message, default, parameters, domain, locale]`, the
    /// last three optional.
    fn evaluate_transchoice(&self, expr: &TranschoiceExpr, context: &Context) -> Result<Value> {
        let arguments = expr
            .arguments
            .values()
            .map(|arg| self.evaluate(arg, context))
            .collect::<Result<Vec<_>>>()?;
        let [message, default, ..] = arguments.as_slice() else {
            return Err(CompilerError::invalid_argument(
                "transchoice_with_default requires a message and a default",
                expr.lineno,
            ));
        };

        let parameters = filters::parameters_at(&arguments, 2, expr.lineno)?;
        let domain = filters::string_at(&arguments, 3, expr.lineno)?;
        let locale = filters::string_at(&arguments, 4, expr.lineno)?.or(self.locale);
        Ok(Value::String(self.extension.transchoice_with_default(
            &message.to_string(),
            &default.to_string(),
            &parameters,
            domain,
            locale,
        )))
    }
}
