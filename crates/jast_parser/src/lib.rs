//! jast_parser: Recursive descent recognizer for Java.
//!
//! Turns source text into a concrete [`ParseTree`] for one of four start
//! rules. The first syntax error aborts the parse with a positioned
//! [`jast_diagnostics::ParseError`].

mod parser;
mod precedence;
mod tree;

pub use parser::{Parser, MAX_RECURSION_DEPTH};
pub use precedence::{get_binary_operator_precedence, OperatorPrecedence};
pub use tree::{Location, ParseNode, ParseTree, RuleKind};
