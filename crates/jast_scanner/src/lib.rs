//! jast_scanner: Lexer for Java source code.
//!
//! Produces tokens with 1-based lines, 0-based columns and char offsets.
//! Contextual words (`var`, `yield`, `record`, `sealed`, `permits`, `when`
//! and the module directive words) are scanned as identifiers and resolved
//! by the recognizer.

mod char_codes;
mod scanner;
mod token;

pub use scanner::{tokenize, Scanner};
pub use token::{Token, TokenKind};
