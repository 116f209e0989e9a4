/*
 * Character Codes
 *
 * Characters the expression lexer and template splitter look at
 */
#![allow(non_upper_case_globals)]

//! Character constants used by the lexer

// Special characters
pub const EOF: char = '\0';
pub const TAB: char = '\t';
pub const NEWLINE: char = '\n';
pub const VTAB: char = '\x0B';
pub const FF: char = '\x0C';
pub const CR: char = '\r'; // Carriage return
pub const SPACE: char = ' ';
pub const NBSP: char = '\u{00A0}';

// Punctuation
pub const BANG: char = '!';
pub const DQ: char = '"';
pub const SQ: char = '\'';
pub const LPAREN: char = '(';
pub const RPAREN: char = ')';
pub const COMMA: char = ',';
pub const PERIOD: char = '.';
pub const COLON: char = ':';
pub const EQ: char = '=';
pub const QUESTION: char = '?';

// Brackets
pub const LBRACKET: char = '[';
pub const BACKSLASH: char = '\\';
pub const RBRACKET: char = ']';
pub const UNDERSCORE: char = '_';

// Braces
pub const LBRACE: char = '{';
pub const BAR: char = '|';
pub const RBRACE: char = '}';
pub const TILDA: char = '~';

// Letters (for quick checks)
pub const A: char = 'A';
pub const Z: char = 'Z';

pub const a: char = 'a';
pub const n: char = 'n';
pub const r: char = 'r';
pub const t: char = 't';
pub const z: char = 'z';

// Digits
pub const ZERO: char = '0';
pub const NINE: char = '9';

/// Check if character is whitespace
pub fn is_whitespace(ch: char) -> bool {
    ch == SPACE || ch == TAB || ch == NEWLINE || ch == CR || ch == VTAB || ch == FF || ch <= ' ' || ch == NBSP
}

/// Check if character is a digit
pub fn is_digit(ch: char) -> bool {
    (ZERO..=NINE).contains(&ch)
}

/// Check if character can start an identifier
pub fn is_identifier_start(ch: char) -> bool {
    (a..=z).contains(&ch) || (A..=Z).contains(&ch) || ch == UNDERSCORE
}

/// Check if character can be part of an identifier
pub fn is_identifier_part(ch: char) -> bool {
    is_identifier_start(ch) || is_digit(ch)
}
