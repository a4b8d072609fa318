//! jast: Parse, rewrite and print Java source.
//!
//! ```text
//! source ─► Parser ─► ParseTree ─► convert ─► Ast ─► visit / transform ─► unparse ─► source
//! ```
//!
//! [`parse`] runs the recognizer for the requested [`ParseMode`] and converts
//! the resulting tree. Every call builds its own recognizer, so parsing from
//! several threads needs no coordination; [`parse_many`] does exactly that
//! over a batch.

mod options;

pub use options::{ParseMode, ParseOptions, UnknownParseMode};

pub use jast_ast::*;
pub use jast_converter::convert;
pub use jast_core::{LineMap, Span, TextRange};
pub use jast_diagnostics::{AstError, Error, ParseError, Result, UnparseError};
pub use jast_parser::{ParseTree, Parser, MAX_RECURSION_DEPTH};
pub use jast_printer::{unparse, unparse_with, Printer, PrinterOptions};

use rayon::prelude::*;
use tracing::debug_span;

/// Parse `source` as the construct selected by `mode`.
pub fn parse(source: &str, mode: ParseMode) -> Result<Ast> {
    parse_with(source, &ParseOptions::new(mode))
}

/// Parse `source` with explicit options.
///
/// Fails with [`Error::Parse`] on the first syntax error. [`Error::Ast`] only
/// surfaces when the recognized tree cannot form a legal node.
pub fn parse_with(source: &str, options: &ParseOptions) -> Result<Ast> {
    let span = debug_span!("parse", mode = %options.mode);
    let _enter = span.enter();

    let mut parser = Parser::new(source)?.with_max_depth(options.max_depth);
    let tree = match options.mode {
        ParseMode::Unit => parser.parse_compilation_unit()?,
        ParseMode::Decl => parser.parse_declaration_start()?,
        ParseMode::Stmt => parser.parse_statement_start()?,
        ParseMode::Expr => parser.parse_expression_start()?,
    };
    Ok(convert(&tree)?)
}

/// Parse a batch of sources in parallel, one result per input, in order.
pub fn parse_many<S>(sources: &[S], mode: ParseMode) -> Vec<Result<Ast>>
where
    S: AsRef<str> + Sync,
{
    let options = ParseOptions::new(mode);
    sources
        .par_iter()
        .map(|source| parse_with(source.as_ref(), &options))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_selects_start_rule() {
        assert!(matches!(parse("a + b", ParseMode::Expr), Ok(Ast::Expr(_))));
        assert!(matches!(parse("return;", ParseMode::Stmt), Ok(Ast::Stmt(_))));
        assert!(matches!(parse("int x;", ParseMode::Decl), Ok(Ast::Decl(_))));
        assert!(matches!(parse("class A {}", ParseMode::Unit), Ok(Ast::CompilationUnit(_))));
    }

    #[test]
    fn test_parse_error_surfaces() {
        let err = parse("a +", ParseMode::Expr).unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_depth_limit_from_options() {
        let source = format!("{}x{}", "(".repeat(30), ")".repeat(30));
        let shallow = ParseOptions {
            mode: ParseMode::Expr,
            max_depth: 10,
        };
        assert!(matches!(parse_with(&source, &shallow), Err(Error::Parse(_))));
        assert!(parse(&source, ParseMode::Expr).is_ok());
    }

    #[test]
    fn test_parse_many_keeps_order() {
        let sources = ["a", "b +", "c"];
        let results = parse_many(&sources, ParseMode::Expr);
        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
        assert_eq!(unparse(results[2].as_ref().unwrap(), 4).unwrap(), "c");
    }
}
