//! jast_diagnostics: Error taxonomy and recognizer messages.
//!
//! Three failure kinds exist and each surfaces immediately to the caller:
//! - [`ParseError`]: the recognizer rejected the source (first error only).
//! - [`AstError`]: a node was constructed in violation of a structural invariant.
//! - [`UnparseError`]: the unparser reached a shape it cannot emit.
//!
//! Message templates for the recognizer live in [`messages`].

use jast_core::text::Span;
use miette::Diagnostic as MietteDiagnostic;
use std::fmt;
use thiserror::Error;

/// Diagnostic category for catalog entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCategory {
    Warning,
    Error,
}

impl fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticCategory::Warning => write!(f, "warning"),
            DiagnosticCategory::Error => write!(f, "error"),
        }
    }
}

/// A diagnostic message template with a code and category.
#[derive(Debug, Clone)]
pub struct DiagnosticMessage {
    pub code: u32,
    pub category: DiagnosticCategory,
    /// The message template string. May contain `{0}`, `{1}`, etc. placeholders.
    pub message: &'static str,
}

impl DiagnosticMessage {
    /// Format the template with the given arguments.
    pub fn format(&self, args: &[&str]) -> String {
        format_message(self.message, args)
    }
}

/// Format a message template by replacing `{0}`, `{1}`, etc. with arguments.
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{}}}", i), arg);
    }
    result
}

// ============================================================================
// Error kinds
// ============================================================================

/// A syntax error reported by the recognizer.
#[derive(Debug, Clone, PartialEq, Eq, Error, MietteDiagnostic)]
#[error("Line {line}, Column {column}: {category}: {message}")]
#[diagnostic(code(jast::parse))]
pub struct ParseError {
    /// 1-based line of the offending token.
    pub line: u32,
    /// 0-based column of the offending token.
    pub column: u32,
    pub category: DiagnosticCategory,
    pub message: String,
}

impl ParseError {
    pub fn new(line: u32, column: u32, message: impl Into<String>) -> Self {
        Self {
            line,
            column,
            category: DiagnosticCategory::Error,
            message: message.into(),
        }
    }

    /// Build an error from a catalog entry.
    pub fn from_message(line: u32, column: u32, message: &DiagnosticMessage, args: &[&str]) -> Self {
        Self {
            line,
            column,
            category: message.category,
            message: message.format(args),
        }
    }
}

/// A structural invariant violation detected while building a node.
#[derive(Debug, Clone, PartialEq, Eq, Error, MietteDiagnostic)]
#[error("{node_kind}.{field}: {detail}")]
#[diagnostic(code(jast::ast))]
pub struct AstError {
    /// The offending field, as named by child iteration.
    pub field: String,
    /// The node kind, as named by child iteration.
    pub node_kind: &'static str,
    pub detail: String,
    /// Location of the node being built, when known.
    pub span: Option<Span>,
}

impl AstError {
    pub fn new(node_kind: &'static str, field: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            node_kind,
            detail: detail.into(),
            span: None,
        }
    }

    /// A list field that must hold at least one element was empty.
    pub fn empty(node_kind: &'static str, field: &str) -> Self {
        Self::new(node_kind, field, "expected at least one element")
    }

    /// A single-valued field received a sequence of replacements.
    pub fn not_a_list(node_kind: &'static str, field: &str) -> Self {
        Self::new(node_kind, field, "cannot splice a sequence into a single-valued field")
    }

    /// A required field was deleted.
    pub fn required(node_kind: &'static str, field: &str) -> Self {
        Self::new(node_kind, field, "required field cannot be removed")
    }

    pub fn with_span(mut self, span: Option<Span>) -> Self {
        self.span = span;
        self
    }
}

/// The unparser reached a node shape it cannot emit as legal Java.
#[derive(Debug, Clone, PartialEq, Eq, Error, MietteDiagnostic)]
#[error("cannot unparse {node_kind}: {detail}")]
#[diagnostic(code(jast::unparse))]
pub struct UnparseError {
    pub node_kind: &'static str,
    pub detail: String,
}

impl UnparseError {
    pub fn new(node_kind: &'static str, detail: impl Into<String>) -> Self {
        Self {
            node_kind,
            detail: detail.into(),
        }
    }
}

/// Any failure the library can report.
#[derive(Debug, Clone, PartialEq, Eq, Error, MietteDiagnostic)]
pub enum Error {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    #[diagnostic(transparent)]
    Ast(#[from] AstError),
    #[error(transparent)]
    #[diagnostic(transparent)]
    Unparse(#[from] UnparseError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

// ============================================================================
// Recognizer messages
// ============================================================================

pub mod messages {
    use super::*;

    macro_rules! diag {
        ($code:expr, Error, $msg:expr) => {
            DiagnosticMessage { code: $code, category: DiagnosticCategory::Error, message: $msg }
        };
        ($code:expr, Warning, $msg:expr) => {
            DiagnosticMessage { code: $code, category: DiagnosticCategory::Warning, message: $msg }
        };
    }

    // ========================================================================
    // Scanner errors (100-199)
    // ========================================================================
    pub const TOKEN_RECOGNITION_ERROR: DiagnosticMessage = diag!(100, Error, "token recognition error at: '{0}'");
    pub const UNTERMINATED_STRING_LITERAL: DiagnosticMessage = diag!(101, Error, "unterminated string literal");
    pub const UNTERMINATED_CHAR_LITERAL: DiagnosticMessage = diag!(102, Error, "unterminated character literal");
    pub const UNTERMINATED_TEXT_BLOCK: DiagnosticMessage = diag!(103, Error, "unterminated text block");
    pub const UNTERMINATED_COMMENT: DiagnosticMessage = diag!(104, Error, "unterminated comment");
    pub const MALFORMED_NUMBER: DiagnosticMessage = diag!(105, Error, "malformed numeric literal '{0}'");

    // ========================================================================
    // Recognizer errors (200-299)
    // ========================================================================
    pub const MISMATCHED_INPUT: DiagnosticMessage = diag!(200, Error, "mismatched input '{0}' expecting {1}");
    pub const NO_VIABLE_ALTERNATIVE: DiagnosticMessage = diag!(201, Error, "no viable alternative at input '{0}'");
    pub const EXTRANEOUS_INPUT: DiagnosticMessage = diag!(202, Error, "extraneous input '{0}' expecting {1}");
    pub const NESTING_TOO_DEEP: DiagnosticMessage = diag!(203, Error, "input nested deeper than {0} levels");
    pub const LAMBDA_RECEIVER: DiagnosticMessage = diag!(204, Error, "receiver parameter not allowed in lambda");
}
