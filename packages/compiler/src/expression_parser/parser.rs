//! Template Expression Parser
//!
//! Recursive descent parser for the expression language used inside `{{ }}`
//! tags, plus the splitter that turns a template source into text and print
//! nodes.
//!
//! Precedence, loosest first: `? :`, `or`, `and`, `==`/`!=`, `~`, filters.

use super::ast::*;
use super::lexer::{Lexer, Token, TokenType};
use crate::chars;
use crate::error::{CompilerError, Result};
use crate::template::{PrintNode, Template, TemplateNode, TextNode};

const OPEN_TAG: &str = "{{";
const CLOSE_TAG: &str = "}}";

/// Parser for template expressions
#[derive(Debug, Default, Clone, Copy)]
pub struct Parser {
    lexer: Lexer,
}

impl Parser {
    pub fn new() -> Self {
        Parser { lexer: Lexer::new() }
    }

    /// Parse a single expression whose first character sits on `line`
    pub fn parse_expression(&self, input: &str, line: usize) -> Result<Node> {
        let tokens = self.lexer.tokenize(input, line);
        if let Some(error) = tokens.iter().find(|t| t.is_error()) {
            return Err(CompilerError::parse(error.str_value.clone(), error.line));
        }
        if tokens.is_empty() {
            return Err(CompilerError::parse("Blank expressions are not allowed", line));
        }

        let mut parse_ast = ParseAST::new(input, tokens, line);
        let node = parse_ast.parse_expression()?;

        if let Some(token) = parse_ast.peek() {
            return Err(CompilerError::parse(
                format!(
                    "Unexpected token \"{}\" at column {} in expression [{}]",
                    token.str_value, token.index, input
                ),
                token.line,
            ));
        }
        Ok(node)
    }

    /// Split a template into text and `{{ expression }}` print nodes
    pub fn parse_template(&self, source: &str, name: &str) -> Result<Template> {
        let mut body = Vec::new();
        let mut line = 1;
        let mut rest = source;

        while let Some(start) = rest.find(OPEN_TAG) {
            let text = &rest[..start];
            if !text.is_empty() {
                body.push(TemplateNode::Text(TextNode::new(text, line)));
                line += count_lines(text);
            }

            let expr_source = &rest[start + OPEN_TAG.len()..];
            let end = find_close_tag(expr_source)
                .ok_or_else(|| CompilerError::parse("Unclosed \"{{\" tag", line))?;
            let expr_text = &expr_source[..end];
            let expr = self.parse_expression(expr_text, line)?;
            body.push(TemplateNode::Print(PrintNode::new(expr, line)));

            line += count_lines(expr_text);
            rest = &expr_source[end + CLOSE_TAG.len()..];
        }

        if !rest.is_empty() {
            body.push(TemplateNode::Text(TextNode::new(rest, line)));
        }

        Ok(Template::new(name, body))
    }
}

fn count_lines(text: &str) -> usize {
    text.matches(chars::NEWLINE).count()
}

/// Finds the `}}` closing the current tag, ignoring quoted text.
fn find_close_tag(input: &str) -> Option<usize> {
    let mut quote: Option<char> = None;
    let mut escaped = false;
    for (i, ch) in input.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if ch == chars::BACKSLASH {
                escaped = true;
            } else if ch == q {
                quote = None;
            }
            continue;
        }
        if ch == chars::SQ || ch == chars::DQ {
            quote = Some(ch);
        } else if input[i..].starts_with(CLOSE_TAG) {
            return Some(i);
        }
    }
    None
}

/// Parser state over one token stream
struct ParseAST<'a> {
    input: &'a str,
    tokens: Vec<Token>,
    index: usize,
    last_line: usize,
}

impl<'a> ParseAST<'a> {
    fn new(input: &'a str, tokens: Vec<Token>, line: usize) -> Self {
        ParseAST {
            input,
            tokens,
            index: 0,
            last_line: line,
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.index)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.index).cloned();
        if let Some(t) = &token {
            self.last_line = t.line;
            self.index += 1;
        }
        token
    }

    fn current_line(&self) -> usize {
        self.peek().map_or(self.last_line, |t| t.line)
    }

    fn consume_optional_character(&mut self, code: char) -> bool {
        if self.peek().is_some_and(|t| t.is_character(code)) {
            self.next();
            true
        } else {
            false
        }
    }

    fn consume_optional_operator(&mut self, op: &str) -> bool {
        if self.peek().is_some_and(|t| t.is_operator(op)) {
            self.next();
            true
        } else {
            false
        }
    }

    fn consume_optional_keyword(&mut self, keyword: &str) -> bool {
        if self.peek().is_some_and(|t| t.is_keyword(keyword)) {
            self.next();
            true
        } else {
            false
        }
    }

    fn expect_character(&mut self, code: char) -> Result<()> {
        if self.consume_optional_character(code) {
            return Ok(());
        }
        Err(self.unexpected(&format!("Missing expected {}", code)))
    }

    fn unexpected(&self, message: &str) -> CompilerError {
        let found = self
            .peek()
            .map_or_else(|| "end of input".to_string(), |t| format!("\"{}\"", t.str_value));
        CompilerError::parse(
            format!("{}, found {} in expression [{}]", message, found, self.input),
            self.current_line(),
        )
    }

    fn expect_identifier(&mut self) -> Result<String> {
        if self.peek().is_some_and(|t| t.is_identifier()) {
            return Ok(self.next().map(|t| t.str_value).unwrap_or_default());
        }
        Err(self.unexpected("Expected identifier"))
    }

    fn parse_expression(&mut self) -> Result<Node> {
        self.parse_conditional()
    }

    fn parse_conditional(&mut self) -> Result<Node> {
        let line = self.current_line();
        let test = self.parse_logical_or()?;
        if self.consume_optional_operator("?") {
            let then = self.parse_expression()?;
            self.expect_character(chars::COLON)?;
            let otherwise = self.parse_expression()?;
            return Ok(Node::Conditional(ConditionalExpr::new(test, then, otherwise, line)));
        }
        Ok(test)
    }

    fn parse_logical_or(&mut self) -> Result<Node> {
        let mut result = self.parse_logical_and()?;
        while self.consume_optional_keyword("or") {
            let line = self.last_line;
            let right = self.parse_logical_and()?;
            result = Node::Binary(BinaryExpr::new(BinaryOperator::Or, result, right, line));
        }
        Ok(result)
    }

    fn parse_logical_and(&mut self) -> Result<Node> {
        let mut result = self.parse_equality()?;
        while self.consume_optional_keyword("and") {
            let line = self.last_line;
            let right = self.parse_equality()?;
            result = Node::Binary(BinaryExpr::new(BinaryOperator::And, result, right, line));
        }
        Ok(result)
    }

    fn parse_equality(&mut self) -> Result<Node> {
        let mut result = self.parse_concat()?;
        loop {
            let operator = if self.consume_optional_operator("==") {
                BinaryOperator::Equal
            } else if self.consume_optional_operator("!=") {
                BinaryOperator::NotEqual
            } else {
                break;
            };
            let line = self.last_line;
            let right = self.parse_concat()?;
            result = Node::Binary(BinaryExpr::new(operator, result, right, line));
        }
        Ok(result)
    }

    fn parse_concat(&mut self) -> Result<Node> {
        let mut result = self.parse_postfix()?;
        while self.consume_optional_operator("~") {
            let line = self.last_line;
            let right = self.parse_postfix()?;
            result = Node::Binary(BinaryExpr::new(BinaryOperator::Concat, result, right, line));
        }
        Ok(result)
    }

    fn parse_postfix(&mut self) -> Result<Node> {
        let mut result = self.parse_primary()?;
        while self.consume_optional_operator("|") {
            let line = self.last_line;
            let name = self.expect_identifier()?;
            let arguments = if self.consume_optional_character(chars::LPAREN) {
                self.parse_arguments()?
            } else {
                Vec::new()
            };
            result = Node::filter(result, name, arguments, line);
        }
        Ok(result)
    }

    /// Comma separated arguments after an already consumed `(`
    fn parse_arguments(&mut self) -> Result<Vec<Node>> {
        let mut arguments = Vec::new();
        if self.consume_optional_character(chars::RPAREN) {
            return Ok(arguments);
        }
        loop {
            arguments.push(self.parse_expression()?);
            if self.consume_optional_character(chars::COMMA) {
                continue;
            }
            self.expect_character(chars::RPAREN)?;
            return Ok(arguments);
        }
    }

    fn parse_primary(&mut self) -> Result<Node> {
        let token = match self.next() {
            Some(token) => token,
            None => return Err(self.unexpected("Unexpected end of expression")),
        };
        let line = token.line;

        match token.token_type {
            TokenType::String => Ok(Node::string(token.str_value, line)),
            TokenType::Number => Ok(Node::number(token.num_value, line)),
            TokenType::Identifier => Ok(Node::name(token.str_value, line)),
            TokenType::Keyword => {
                let value = match token.str_value.as_str() {
                    "true" => ConstantValue::Bool(true),
                    "false" => ConstantValue::Bool(false),
                    "null" | "none" => ConstantValue::Null,
                    other => {
                        return Err(CompilerError::parse(
                            format!("Unexpected keyword \"{}\" in expression [{}]", other, self.input),
                            line,
                        ))
                    }
                };
                Ok(Node::Constant(ConstantExpr::new(value, line)))
            }
            TokenType::Character if token.is_character(chars::LPAREN) => {
                let inner = self.parse_expression()?;
                self.expect_character(chars::RPAREN)?;
                Ok(inner)
            }
            TokenType::Character if token.is_character(chars::LBRACKET) => self.parse_list(line),
            TokenType::Character if token.is_character(chars::LBRACE) => self.parse_hash(line),
            _ => Err(CompilerError::parse(
                format!("Unexpected token \"{}\" in expression [{}]", token.str_value, self.input),
                line,
            )),
        }
    }

    /// `[a, b]` after an already consumed `[`
    fn parse_list(&mut self, line: usize) -> Result<Node> {
        let mut array = ArrayExpr::new(line);
        while !self.consume_optional_character(chars::RBRACKET) {
            if !array.is_empty() {
                self.expect_character(chars::COMMA)?;
                // trailing comma
                if self.consume_optional_character(chars::RBRACKET) {
                    break;
                }
            }
            let value = self.parse_expression()?;
            array.add_element(value, None);
        }
        Ok(Node::Array(array))
    }

    /// `{key: value}` after an already consumed `{`
    fn parse_hash(&mut self, line: usize) -> Result<Node> {
        let mut array = ArrayExpr::new(line);
        while !self.consume_optional_character(chars::RBRACE) {
            if !array.is_empty() {
                self.expect_character(chars::COMMA)?;
                if self.consume_optional_character(chars::RBRACE) {
                    break;
                }
            }
            let key = self.parse_hash_key()?;
            self.expect_character(chars::COLON)?;
            let value = self.parse_expression()?;
            array.add_element(value, Some(key));
        }
        Ok(Node::Array(array))
    }

    fn parse_hash_key(&mut self) -> Result<Node> {
        let token = match self.peek() {
            Some(token) => token.clone(),
            None => return Err(self.unexpected("Expected hash key")),
        };
        match token.token_type {
            TokenType::String => {
                self.next();
                Ok(Node::string(token.str_value, token.line))
            }
            TokenType::Number => {
                self.next();
                Ok(Node::number(token.num_value, token.line))
            }
            // Unquoted names are string keys
            TokenType::Identifier | TokenType::Keyword => {
                self.next();
                Ok(Node::string(token.str_value, token.line))
            }
            TokenType::Character if token.is_character(chars::LPAREN) => {
                self.next();
                let key = self.parse_expression()?;
                self.expect_character(chars::RPAREN)?;
                Ok(key)
            }
            _ => Err(self.unexpected("A hash key must be a quoted string, a number, a name, or an expression enclosed in parentheses")),
        }
    }
}
