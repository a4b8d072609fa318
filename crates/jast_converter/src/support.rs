//! Shared accessors over parse tree nodes.

use jast_ast::{AstError, Identifier, Spanned};
use jast_core::text::Span;
use jast_parser::{ParseNode, ParseTree, RuleKind};
use jast_scanner::{Token, TokenKind};

pub(crate) type CResult<T> = Result<T, AstError>;

/// Remaining stack below which conversion continues on a new segment.
const STACK_RED_ZONE: usize = 128 * 1024;
const STACK_SEGMENT: usize = 2 * 1024 * 1024;

/// Run `f`, extending the stack on the heap first when it runs low.
#[inline]
pub(crate) fn grow<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(STACK_RED_ZONE, STACK_SEGMENT, f)
}

/// The tree does not have the shape its rule kind promises.
pub(crate) fn malformed(tree: &ParseTree, detail: impl Into<String>) -> AstError {
    AstError::new("ParseTree", tree.kind.to_string(), detail).with_span(Some(tree.span()))
}

pub(crate) fn token_span(token: &Token) -> Span {
    Span::new(token.line, token.column, token.line, token.column + token.len())
}

/// Attach the span of `tree` to a freshly built node.
#[inline]
pub(crate) fn located<T: Spanned>(node: T, tree: &ParseTree) -> T {
    node.with_span(Some(tree.span()))
}

pub(crate) fn identifier(token: &Token) -> Identifier {
    Identifier::new(token.text.clone()).with_span(Some(token_span(token)))
}

/// The first identifier token among the direct children.
pub(crate) fn first_identifier(tree: &ParseTree) -> CResult<Identifier> {
    tree.token(TokenKind::Identifier)
        .map(identifier)
        .ok_or_else(|| malformed(tree, "expected an identifier"))
}

pub(crate) fn required(tree: &ParseTree, kind: RuleKind) -> CResult<&ParseTree> {
    tree.rule(kind)
        .ok_or_else(|| malformed(tree, format!("expected a {} child", kind)))
}

pub(crate) fn nth(tree: &ParseTree, index: usize) -> CResult<&ParseTree> {
    tree.nth_rule(index)
        .ok_or_else(|| malformed(tree, format!("expected at least {} child rules", index + 1)))
}

/// The single child rule of a start rule.
pub(crate) fn only_rule(tree: &ParseTree) -> CResult<&ParseTree> {
    nth(tree, 0)
}

/// The last child rule.
pub(crate) fn last_rule(tree: &ParseTree) -> CResult<&ParseTree> {
    tree.child_rules()
        .last()
        .ok_or_else(|| malformed(tree, "expected a child rule"))
}

/// The first child rule following a token accepted by `is_marker`.
pub(crate) fn rule_after(tree: &ParseTree, is_marker: impl Fn(&Token) -> bool) -> Option<&ParseTree> {
    tree.children
        .iter()
        .skip_while(|child| !child.as_token().is_some_and(&is_marker))
        .find_map(ParseNode::as_rule)
}

/// The single-token payload of a rule such as `Literal` or `Name`.
pub(crate) fn only_token(tree: &ParseTree) -> CResult<&Token> {
    tree.first_token()
        .ok_or_else(|| malformed(tree, "expected a token"))
}

/// Span from the start of `tree` through the end of `last`.
pub(crate) fn span_through(tree: &ParseTree, last: &ParseTree) -> Span {
    let (line, column) = tree.span().start();
    let (end_line, end_column) = last.span().end();
    Span::new(line, column, end_line, end_column)
}
