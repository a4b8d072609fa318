//! Statement conversion.

use crate::declarations::{member_declaration, variable_declarator, variable_declarator_id, variable_declarators};
use crate::expressions::{arguments, case_items, expr, switch_rules};
use crate::support::{grow, identifier, last_rule, located, malformed, nth, required, rule_after, CResult};
use crate::types::{arc_ty, modifiers_of, qualified_name, qualified_names};
use jast_ast::{
    Assert, AstError, Block, Break, Case, CaseItem, CaseValue, CatchClause, Continue, DefaultCase, DoWhile, Empty,
    ExpressionStmt, For, Identifier, ForEach, ForInit, If, Labeled, LocalTypeDeclaration, LocalVariableDeclaration, Match,
    Resource, Return, Spanned, Stmt, Switch, SwitchBlock, SwitchGroup, SwitchLabel, Synchronized, Throw, Try,
    TryResource, TryWithResources, While, Yield,
};
use jast_parser::{ParseNode, ParseTree, RuleKind};
use jast_scanner::TokenKind;
use std::sync::Arc;

/// Rule kinds that [`stmt`] accepts.
pub(crate) fn is_statement(kind: RuleKind) -> bool {
    matches!(
        kind,
        RuleKind::Block
            | RuleKind::LocalVariableDeclarationStatement
            | RuleKind::LocalVariableDeclaration
            | RuleKind::LocalTypeDeclaration
            | RuleKind::EmptyStatement
            | RuleKind::LabeledStatement
            | RuleKind::ExpressionStatement
            | RuleKind::IfStatement
            | RuleKind::AssertStatement
            | RuleKind::SwitchStatement
            | RuleKind::WhileStatement
            | RuleKind::DoStatement
            | RuleKind::ForStatement
            | RuleKind::EnhancedForStatement
            | RuleKind::BreakStatement
            | RuleKind::ContinueStatement
            | RuleKind::ReturnStatement
            | RuleKind::ThrowStatement
            | RuleKind::SynchronizedStatement
            | RuleKind::TryStatement
            | RuleKind::TryWithResourcesStatement
            | RuleKind::YieldStatement
    )
}

/// Convert a block statement.
pub fn stmt(tree: &ParseTree) -> CResult<Arc<Stmt>> {
    grow(|| single(tree))
}

fn single(tree: &ParseTree) -> CResult<Arc<Stmt>> {
    let node: Stmt = match tree.kind {
        RuleKind::Block => block(tree)?.into(),
        RuleKind::LocalVariableDeclarationStatement => {
            local_variable_declaration(required(tree, RuleKind::LocalVariableDeclaration)?)?.into()
        }
        RuleKind::LocalVariableDeclaration => local_variable_declaration(tree)?.into(),
        RuleKind::LocalTypeDeclaration => {
            let decl = member_declaration(required(tree, RuleKind::MemberDeclaration)?)?;
            LocalTypeDeclaration::new(decl)?.into()
        }
        RuleKind::EmptyStatement => Empty::new().into(),
        RuleKind::LabeledStatement => {
            let label = label(tree).ok_or_else(|| malformed(tree, "expected a label"))?;
            Labeled::new(label, stmt(nth(tree, 0)?)?).into()
        }
        RuleKind::ExpressionStatement => ExpressionStmt::new(expr(nth(tree, 0)?)?).into(),
        RuleKind::IfStatement => {
            let mut node = If::new(expr(nth(tree, 0)?)?, stmt(nth(tree, 1)?)?);
            if let Some(orelse) = tree.nth_rule(2) {
                node = node.with_orelse(stmt(orelse)?);
            }
            node.into()
        }
        RuleKind::AssertStatement => {
            let mut node = Assert::new(expr(nth(tree, 0)?)?);
            if let Some(msg) = tree.nth_rule(1) {
                node = node.with_msg(expr(msg)?);
            }
            node.into()
        }
        RuleKind::SwitchStatement => {
            let value = expr(nth(tree, 0)?)?;
            Switch::new(value, switch_block(required(tree, RuleKind::SwitchBlock)?)?)?.into()
        }
        RuleKind::WhileStatement => While::new(expr(nth(tree, 0)?)?, stmt(nth(tree, 1)?)?).into(),
        RuleKind::DoStatement => DoWhile::new(stmt(nth(tree, 0)?)?, expr(nth(tree, 1)?)?).into(),
        RuleKind::ForStatement => for_statement(tree)?.into(),
        RuleKind::EnhancedForStatement => {
            let ty = arc_ty(required(tree, RuleKind::Type)?)?;
            let id = variable_declarator_id(required(tree, RuleKind::VariableDeclaratorId)?)?;
            let iter = rule_after_colon(tree)?;
            ForEach::new(ty, id, expr(iter)?, stmt(last_rule(tree)?)?)
                .with_modifiers(modifiers_of(tree)?)
                .into()
        }
        RuleKind::BreakStatement => Break::new(label(tree)).into(),
        RuleKind::ContinueStatement => Continue::new(label(tree)).into(),
        RuleKind::ReturnStatement => Return::new(tree.nth_rule(0).map(expr).transpose()?).into(),
        RuleKind::ThrowStatement => Throw::new(expr(nth(tree, 0)?)?).into(),
        RuleKind::SynchronizedStatement => {
            Synchronized::new(expr(nth(tree, 0)?)?, block(required(tree, RuleKind::Block)?)?).into()
        }
        RuleKind::TryStatement => {
            let (body, catches, finally) = try_parts(tree)?;
            Try::new(body, catches, finally)?.into()
        }
        RuleKind::TryWithResourcesStatement => {
            let resources = required(tree, RuleKind::ResourceSpecification)?
                .rules(RuleKind::Resource)
                .map(resource)
                .collect::<CResult<Vec<_>>>()?;
            let (body, catches, finally) = try_parts(tree)?;
            TryWithResources::new(resources, body, catches, finally)?.into()
        }
        RuleKind::YieldStatement => Yield::new(expr(nth(tree, 0)?)?).into(),
        _ => return Err(malformed(tree, "not a statement")),
    };
    Ok(Arc::new(node.with_span(Some(tree.span()))))
}

pub(crate) fn block(tree: &ParseTree) -> CResult<Block> {
    let body = tree.child_rules().map(stmt).collect::<CResult<Vec<_>>>()?;
    Ok(located(Block::new(body), tree))
}

/// The label of a labeled, `break` or `continue` statement.
fn label(tree: &ParseTree) -> Option<Identifier> {
    tree.token(TokenKind::Identifier).map(identifier)
}

pub(crate) fn local_variable_declaration(tree: &ParseTree) -> CResult<LocalVariableDeclaration> {
    let ty = arc_ty(required(tree, RuleKind::Type)?)?;
    let declarators = variable_declarators(required(tree, RuleKind::VariableDeclarators)?)?;
    let node = LocalVariableDeclaration::new(ty, declarators)?.with_modifiers(modifiers_of(tree)?);
    Ok(located(node, tree))
}

// ============================================================================
// Loops
// ============================================================================

/// `for (init; test; update) body`. The test is the rule between the two
/// semicolons.
fn for_statement(tree: &ParseTree) -> CResult<For> {
    let mut node = For::new(stmt(last_rule(tree)?)?);
    let mut semicolons = 0;
    for child in &tree.children {
        match child {
            ParseNode::Token(token) if token.kind == TokenKind::Semi => semicolons += 1,
            ParseNode::Rule(rule) => match rule.kind {
                RuleKind::ForInit => node = node.with_init(for_init(rule)?),
                RuleKind::ForUpdate => node = node.with_update(arguments(rule)?),
                _ if semicolons == 1 => node = node.with_test(expr(rule)?),
                _ => {}
            },
            ParseNode::Token(_) => {}
        }
    }
    Ok(node)
}

fn for_init(tree: &ParseTree) -> CResult<ForInit> {
    match tree.rule(RuleKind::LocalVariableDeclaration) {
        Some(decl) => Ok(ForInit::LocalVariable(local_variable_declaration(decl)?)),
        None => Ok(ForInit::Expressions(arguments(tree)?)),
    }
}

/// The iterable of an enhanced `for`, which follows the `:`.
fn rule_after_colon(tree: &ParseTree) -> CResult<&ParseTree> {
    rule_after(tree, |token| token.kind == TokenKind::Colon)
        .ok_or_else(|| malformed(tree, "expected an iterable expression"))
}

// ============================================================================
// Try
// ============================================================================

type TryParts = (Block, Vec<CatchClause>, Option<Block>);

fn try_parts(tree: &ParseTree) -> CResult<TryParts> {
    let body = block(required(tree, RuleKind::Block)?)?;
    let catches = tree
        .rules(RuleKind::CatchClause)
        .map(catch_clause)
        .collect::<CResult<Vec<_>>>()?;
    let finally = match tree.rule(RuleKind::Finally) {
        Some(finally) => Some(block(required(finally, RuleKind::Block)?)?),
        None => None,
    };
    Ok((body, catches, finally))
}

fn catch_clause(tree: &ParseTree) -> CResult<CatchClause> {
    let exceptions = qualified_names(required(tree, RuleKind::CatchType)?)?;
    let id = label(tree).ok_or_else(|| malformed(tree, "expected a catch parameter"))?;
    let body = block(required(tree, RuleKind::Block)?)?;
    let node = CatchClause::new(exceptions, id, body)?.with_modifiers(modifiers_of(tree)?);
    Ok(located(node, tree))
}

fn resource(tree: &ParseTree) -> CResult<TryResource> {
    if let Some(name) = tree.rule(RuleKind::QualifiedName) {
        return Ok(TryResource::Name(qualified_name(name)?));
    }
    let ty = arc_ty(required(tree, RuleKind::Type)?)?;
    let declarator = variable_declarator(required(tree, RuleKind::VariableDeclarator)?)?;
    let node = Resource::new(ty, declarator).with_modifiers(modifiers_of(tree)?);
    Ok(TryResource::Declared(located(node, tree)))
}

// ============================================================================
// Switch statements
// ============================================================================

/// Arrow-form blocks become rules. Colon-form blocks become statement
/// groups plus the trailing labels that select no statements, unless a label
/// uses a guard or a modified pattern, which only rules can carry.
fn switch_block(tree: &ParseTree) -> CResult<SwitchBlock> {
    let has_rules = tree.rules(RuleKind::SwitchRule).next().is_some();
    let has_groups = tree.rules(RuleKind::SwitchGroup).next().is_some();
    if has_rules && has_groups {
        return Err(AstError::new(
            "SwitchBlock",
            "rules",
            "switch rules cannot be mixed with statement groups",
        )
        .with_span(Some(tree.span())));
    }
    let needs_rules = has_rules || tree.rules(RuleKind::SwitchGroup).any(has_rich_label);
    if needs_rules {
        return Ok(located(SwitchBlock::with_rules(switch_rules(tree)?), tree));
    }

    let mut groups = Vec::new();
    let mut trailing = Vec::new();
    for group in tree.rules(RuleKind::SwitchGroup) {
        let mut labels = Vec::new();
        for label in group.rules(RuleKind::SwitchLabel) {
            labels.extend(switch_labels(label)?);
        }
        let body = group
            .child_rules()
            .filter(|rule| rule.kind != RuleKind::SwitchLabel)
            .map(stmt)
            .collect::<CResult<Vec<_>>>()?;
        if body.is_empty() {
            trailing.extend(labels);
        } else {
            if !trailing.is_empty() {
                return Err(malformed(group, "labels without statements ahead of a statement group"));
            }
            groups.push(located(SwitchGroup::new(labels, body)?, group));
        }
    }
    Ok(located(SwitchBlock::new(groups, trailing), tree))
}

/// Whether a group has a label that statement groups cannot express.
fn has_rich_label(group: &ParseTree) -> bool {
    group.rules(RuleKind::SwitchLabel).any(|label| {
        label.child_rules().any(|item| match item.kind {
            RuleKind::GuardedPattern => true,
            RuleKind::Pattern => item.rule(RuleKind::Modifiers).is_some(),
            _ => false,
        })
    })
}

/// `case a, b` splits into one label per item; patterns become matches.
fn switch_labels(label: &ParseTree) -> CResult<Vec<SwitchLabel>> {
    if label.has_token(TokenKind::Default) {
        return Ok(vec![located(DefaultCase::new(), label).into()]);
    }
    let items: Vec<&ParseTree> = label.child_rules().collect();
    let values = case_items(label)?;
    items
        .into_iter()
        .zip(values)
        .map(|(item, value)| {
            let value = match value {
                CaseItem::Expr(expr) => CaseValue::Expr(expr),
                CaseItem::Pattern(guarded) => {
                    let pattern = guarded.pattern;
                    let span = pattern.span();
                    CaseValue::Match(Match::new(pattern.ty, pattern.id).with_span(span))
                }
            };
            Ok(located(Case::new(value), item).into())
        })
        .collect()
}
