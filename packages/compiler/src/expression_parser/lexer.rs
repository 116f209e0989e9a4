//! Template Expression Lexer
//!
//! Tokenizes the expression found between `{{` and `}}` into tokens for
//! parsing. Every token remembers the template line it started on.

use serde::{Deserialize, Serialize};

use crate::chars;

/// Token types in template expressions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum TokenType {
    Character = 0,
    Identifier = 1,
    Keyword = 2,
    String = 3,
    Operator = 4,
    Number = 5,
    Error = 6,
}

/// Token representation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub index: usize,
    pub end: usize,
    pub line: usize,
    pub token_type: TokenType,
    pub num_value: f64,
    pub str_value: String,
}

impl Token {
    pub fn new(
        index: usize,
        end: usize,
        line: usize,
        token_type: TokenType,
        num_value: f64,
        str_value: String,
    ) -> Self {
        Token {
            index,
            end,
            line,
            token_type,
            num_value,
            str_value,
        }
    }

    pub fn is_character(&self, code: char) -> bool {
        self.token_type == TokenType::Character && self.str_value.chars().next() == Some(code)
    }

    pub fn is_number(&self) -> bool {
        self.token_type == TokenType::Number
    }

    pub fn is_string(&self) -> bool {
        self.token_type == TokenType::String
    }

    pub fn is_identifier(&self) -> bool {
        self.token_type == TokenType::Identifier
    }

    pub fn is_keyword(&self, keyword: &str) -> bool {
        self.token_type == TokenType::Keyword && self.str_value == keyword
    }

    pub fn is_operator(&self, operator: &str) -> bool {
        self.token_type == TokenType::Operator && self.str_value == operator
    }

    pub fn is_error(&self) -> bool {
        self.token_type == TokenType::Error
    }
}

// Template keywords
const KEYWORDS: &[&str] = &["true", "false", "null", "none", "and", "or"];

/// Template expression lexer
#[derive(Debug, Default, Clone, Copy)]
pub struct Lexer;

impl Lexer {
    pub fn new() -> Self {
        Lexer
    }

    /// Tokenizes `text`, numbering lines from `first_line`.
    pub fn tokenize(&self, text: &str, first_line: usize) -> Vec<Token> {
        Scanner::new(text, first_line).scan()
    }
}

/// Scanner for tokenizing input
struct Scanner<'a> {
    input: &'a str,
    length: usize,
    index: usize,
    line: usize,
    peek: char,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str, first_line: usize) -> Self {
        let peek = input.chars().next().unwrap_or(chars::EOF);
        Scanner {
            input,
            length: input.len(),
            index: 0,
            line: first_line,
            peek,
        }
    }

    fn scan(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        while let Some(token) = self.scan_token() {
            let is_error = token.is_error();
            tokens.push(token);
            if is_error {
                break;
            }
        }
        tokens
    }

    fn advance(&mut self) {
        if self.peek == chars::NEWLINE {
            self.line += 1;
        }
        self.index += self.peek.len_utf8();
        self.peek = if self.index < self.length {
            self.input[self.index..].chars().next().unwrap_or(chars::EOF)
        } else {
            chars::EOF
        };
    }

    fn scan_token(&mut self) -> Option<Token> {
        // Skip whitespace
        while self.index < self.length && chars::is_whitespace(self.peek) {
            self.advance();
        }

        if self.index >= self.length {
            return None;
        }

        let start = self.index;
        let line = self.line;
        let ch = self.peek;

        if chars::is_identifier_start(ch) {
            return Some(self.scan_identifier());
        }

        if chars::is_digit(ch) {
            return Some(self.scan_number(start));
        }

        match ch {
            chars::LPAREN | chars::RPAREN | chars::LBRACKET | chars::RBRACKET
            | chars::LBRACE | chars::RBRACE | chars::COMMA | chars::COLON | chars::PERIOD => {
                Some(self.scan_character(start, ch))
            }
            chars::SQ | chars::DQ => Some(self.scan_string(ch)),
            chars::BAR | chars::TILDA | chars::QUESTION => {
                self.advance();
                Some(self.operator(start, line, &ch.to_string()))
            }
            chars::EQ | chars::BANG => {
                self.advance();
                if self.peek == chars::EQ {
                    self.advance();
                    let op = if ch == chars::EQ { "==" } else { "!=" };
                    return Some(self.operator(start, line, op));
                }
                Some(self.error(start, line, format!("Unexpected character [{}]", ch)))
            }
            _ => {
                self.advance();
                Some(self.error(start, line, format!("Unexpected character [{}]", ch)))
            }
        }
    }

    fn operator(&self, start: usize, line: usize, op: &str) -> Token {
        Token::new(start, self.index, line, TokenType::Operator, 0.0, op.to_string())
    }

    fn error(&self, start: usize, line: usize, message: String) -> Token {
        Token::new(
            start,
            self.index,
            line,
            TokenType::Error,
            0.0,
            format!("Lexer Error: {} at column {} in expression [{}]", message, start, self.input),
        )
    }

    fn scan_character(&mut self, start: usize, ch: char) -> Token {
        let line = self.line;
        self.advance();
        Token::new(start, self.index, line, TokenType::Character, ch as u32 as f64, ch.to_string())
    }

    fn scan_identifier(&mut self) -> Token {
        let start = self.index;
        let line = self.line;
        self.advance();

        while self.index < self.length && chars::is_identifier_part(self.peek) {
            self.advance();
        }

        let str_value = self.input[start..self.index].to_string();
        let token_type = if KEYWORDS.contains(&str_value.as_str()) {
            TokenType::Keyword
        } else {
            TokenType::Identifier
        };

        Token::new(start, self.index, line, token_type, 0.0, str_value)
    }

    fn scan_number(&mut self, start: usize) -> Token {
        let line = self.line;
        let mut seen_period = false;
        while self.index < self.length {
            if chars::is_digit(self.peek) {
                self.advance();
            } else if self.peek == chars::PERIOD && !seen_period && self.next_is_digit() {
                seen_period = true;
                self.advance();
            } else {
                break;
            }
        }

        let str_value = &self.input[start..self.index];
        match str_value.parse::<f64>() {
            Ok(value) => Token::new(start, self.index, line, TokenType::Number, value, str_value.to_string()),
            Err(_) => self.error(start, line, format!("Invalid number [{}]", str_value)),
        }
    }

    fn next_is_digit(&self) -> bool {
        self.input[self.index + 1..]
            .chars()
            .next()
            .is_some_and(chars::is_digit)
    }

    fn scan_string(&mut self, quote: char) -> Token {
        let start = self.index;
        let line = self.line;
        self.advance(); // opening quote

        let mut buffer = String::new();
        loop {
            if self.index >= self.length {
                return self.error(start, line, "Unterminated quote".to_string());
            }
            let ch = self.peek;
            if ch == quote {
                self.advance();
                break;
            }
            if ch == chars::BACKSLASH {
                self.advance();
                let escaped = match self.peek {
                    chars::n => chars::NEWLINE,
                    chars::t => chars::TAB,
                    chars::r => chars::CR,
                    chars::EOF => return self.error(start, line, "Unterminated quote".to_string()),
                    other => other,
                };
                buffer.push(escaped);
                self.advance();
                continue;
            }
            buffer.push(ch);
            self.advance();
        }

        Token::new(start, self.index, line, TokenType::String, 0.0, buffer)
    }
}
