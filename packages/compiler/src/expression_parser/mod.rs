//! Expression Parser Module
//!
//! AST, lexer, parser and serializer for template expressions.

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod serializer;

pub use ast::*;
pub use lexer::Lexer;
pub use parser::Parser;
pub use serializer::serialize;
