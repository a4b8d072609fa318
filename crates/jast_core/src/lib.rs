//! jast_core: Source location primitives shared by every jast crate.
//!
//! Provides line/column spans recorded on AST nodes, char-offset ranges
//! recorded on tokens, and a line map for converting between the two.

pub mod text;

pub use text::{LineAndColumn, LineMap, Span, TextPos, TextRange};
