//! jast_converter: Parse tree to AST conversion.
//!
//! Walks a [`ParseTree`] produced by `jast_parser` and builds the matching
//! `jast_ast` node, one rule kind at a time. Every node receives the span of
//! the rule it was built from. Invariant violations surface as [`AstError`];
//! on trees produced by the recognizer from legal Java they do not occur.

mod declarations;
mod expressions;
mod literals;
mod statements;
mod support;
mod types;

pub use declarations::{class_body_declaration as convert_decl, compilation_unit as convert_compilation_unit};
pub use expressions::expr as convert_expr;
pub use literals::{decode_float, decode_integer, text_block_lines};
pub use statements::stmt as convert_stmt;
pub use types::ty as convert_type;

use jast_ast::{Ast, AstError};
use jast_parser::{ParseTree, RuleKind};

/// Convert the tree of any start rule, or of a bare compilation unit,
/// declaration, statement or expression rule.
pub fn convert(tree: &ParseTree) -> Result<Ast, AstError> {
    tracing::trace!(rule = %tree.kind, "converting parse tree");
    match tree.kind {
        RuleKind::CompilationUnit => Ok(Ast::CompilationUnit(declarations::compilation_unit(tree)?)),
        RuleKind::DeclarationStart => declarations::declaration_start(support::only_rule(tree)?),
        RuleKind::StatementStart => Ok(Ast::Stmt(statements::stmt(support::only_rule(tree)?)?)),
        RuleKind::ExpressionStart => Ok(Ast::Expr(expressions::expr(support::only_rule(tree)?)?)),
        RuleKind::PackageDeclaration
        | RuleKind::ImportDeclaration
        | RuleKind::ModuleDeclaration
        | RuleKind::MemberDeclaration
        | RuleKind::EmptyDeclaration
        | RuleKind::Initializer => declarations::declaration_start(tree),
        kind if statements::is_statement(kind) => Ok(Ast::Stmt(statements::stmt(tree)?)),
        _ => Ok(Ast::Expr(expressions::expr(tree)?)),
    }
}
