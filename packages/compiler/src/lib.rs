#![deny(clippy::all)]

/**
 * Translation Compiler
 *
 * Template expression compiler with a development-mode pass that renders
 * `desc` default messages for untranslated strings
 */

pub mod chars;
pub mod config;
pub mod error;

// Parser modules
pub mod expression_parser;
pub mod template;

// Translation and rendering
pub mod render;
pub mod translation;

// Re-exports
pub use config::CompilerConfig;
pub use error::{CompilerError, Result};
pub use template::Environment;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
