//! Expression conversion.
//!
//! Binary layers are only present in the tree when their operator is, so
//! every layer maps directly to a `BinOp`. Method calls, member accesses and
//! array accesses nest left-deep in the order the selectors were applied.

use crate::declarations::{class_body, formal_parameters};
use crate::literals::literal;
use crate::statements::{block, stmt};
use crate::support::{
    first_identifier, grow, identifier, last_rule, located, malformed, nth, only_token, required, token_span,
    CResult,
};
use crate::types::{arc_ty, cast_bound, dims, pattern, type_arguments};
use jast_ast::{
    ArrayAccess, ArrayInitializer, AssignOperator, Assignment, BinOp, BinaryOperator, Call, CaseItem, Cast,
    ClassExpr, Constant, DimExpr, ExplicitGenericInvocation, Expr, GuardedPattern, IfExp,
    InstanceOf, InstanceOfTarget, Lambda, LambdaBody, LambdaParams, Member, Name, NewArray, NewInnerObject,
    NewObject, PostOp, PostOperator, Reference, ReferenceTarget, Spanned, Stmt, Super, SwitchExp, SwitchExprRule,
    This, UnaryOp, UnaryOperator,
};
use jast_parser::{ParseNode, ParseTree, RuleKind};
use jast_scanner::TokenKind;
use std::sync::Arc;

/// Convert any expression rule.
pub fn expr(tree: &ParseTree) -> CResult<Arc<Expr>> {
    if is_left_chain(tree.kind) {
        return left_chain(tree);
    }
    grow(|| single(tree))
}

fn single(tree: &ParseTree) -> CResult<Arc<Expr>> {
    let node: Expr = match tree.kind {
        RuleKind::Parenthesized => return expr(nth(tree, 0)?),
        RuleKind::Lambda => lambda(tree)?.into(),
        RuleKind::Assignment => assignment(tree)?.into(),
        RuleKind::Ternary => IfExp::new(expr(nth(tree, 0)?)?, expr(nth(tree, 1)?)?, expr(nth(tree, 2)?)?).into(),
        RuleKind::ConditionalOr
        | RuleKind::ConditionalAnd
        | RuleKind::InclusiveOr
        | RuleKind::ExclusiveOr
        | RuleKind::And
        | RuleKind::Equality
        | RuleKind::Relational
        | RuleKind::Shift
        | RuleKind::Additive
        | RuleKind::Multiplicative
        | RuleKind::MemberAccess
        | RuleKind::ArrayAccess => return left_chain(tree),
        RuleKind::InstanceOf => instance_of(tree)?.into(),
        RuleKind::Cast => Cast::new(cast_bound(tree)?, expr(last_rule(tree)?)?).into(),
        RuleKind::Prefix => {
            let op = only_token(tree)?;
            let op = UnaryOperator::from_token(&op.text)
                .ok_or_else(|| malformed(tree, format!("unknown prefix operator '{}'", op.text)))?;
            UnaryOp::new(op, expr(nth(tree, 0)?)?).into()
        }
        RuleKind::Postfix => {
            let op = only_token(tree)?;
            let op = PostOperator::from_token(&op.text)
                .ok_or_else(|| malformed(tree, format!("unknown postfix operator '{}'", op.text)))?;
            PostOp::new(expr(nth(tree, 0)?)?, op).into()
        }
        RuleKind::Literal => Constant::new(literal(tree, only_token(tree)?)?).into(),
        RuleKind::Name => Name::new(identifier(only_token(tree)?)).into(),
        RuleKind::This => This::new().into(),
        RuleKind::Super => Super::new().into(),
        RuleKind::SuperAccess => super_access(tree)?.into(),
        RuleKind::MethodCall => method_call(tree)?.into(),
        RuleKind::ClassLiteral => ClassExpr::new(arc_ty(required(tree, RuleKind::Type)?)?).into(),
        RuleKind::MethodReference => method_reference(tree)?.into(),
        RuleKind::ObjectCreation => object_creation(tree)?.into(),
        RuleKind::InnerCreation => inner_creation(tree)?.into(),
        RuleKind::ArrayCreation => array_creation(tree)?.into(),
        RuleKind::ArrayInitializer => array_initializer(tree)?.into(),
        RuleKind::SwitchExpression => {
            let value = expr(nth(tree, 0)?)?;
            SwitchExp::new(value, switch_rules(required(tree, RuleKind::SwitchBlock)?)?).into()
        }
        RuleKind::ExplicitGenericInvocation => {
            let type_args = type_arguments(required(tree, RuleKind::TypeArguments)?)?;
            ExplicitGenericInvocation::new(type_args, expr(nth(tree, 1)?)?).into()
        }
        _ => return Err(malformed(tree, "not an expression")),
    };
    Ok(Arc::new(node.with_span(Some(tree.span()))))
}

/// The expressions of an `Arguments` rule, or of any comma-separated list
/// of expression rules.
pub(crate) fn arguments(tree: &ParseTree) -> CResult<Vec<Arc<Expr>>> {
    tree.child_rules().map(expr).collect()
}

// ============================================================================
// Operators
// ============================================================================

fn assignment(tree: &ParseTree) -> CResult<Assignment> {
    let op = only_token(tree)?;
    let op = if op.kind == TokenKind::Assign {
        None
    } else {
        let parsed = AssignOperator::from_token(&op.text)
            .ok_or_else(|| malformed(tree, format!("unknown assignment operator '{}'", op.text)))?;
        Some(parsed)
    };
    Ok(Assignment::new(expr(nth(tree, 0)?)?, op, expr(nth(tree, 1)?)?))
}

/// Rules whose first child is the left operand or receiver they extend.
fn is_left_chain(kind: RuleKind) -> bool {
    matches!(
        kind,
        RuleKind::ConditionalOr
            | RuleKind::ConditionalAnd
            | RuleKind::InclusiveOr
            | RuleKind::ExclusiveOr
            | RuleKind::And
            | RuleKind::Equality
            | RuleKind::Relational
            | RuleKind::Shift
            | RuleKind::Additive
            | RuleKind::Multiplicative
            | RuleKind::MemberAccess
            | RuleKind::ArrayAccess
    )
}

/// Binary operators, member accesses and array accesses nest left-deep as
/// far as the source chains them. The left spine is walked in a loop and
/// rebuilt innermost first; only the right-hand sides recurse.
fn left_chain(tree: &ParseTree) -> CResult<Arc<Expr>> {
    let mut spine = vec![tree];
    let mut base = nth(tree, 0)?;
    while is_left_chain(base.kind) {
        spine.push(base);
        base = nth(base, 0)?;
    }
    let mut acc = grow(|| single(base))?;
    for link in spine.into_iter().rev() {
        let right = expr(nth(link, 1)?)?;
        let node: Expr = match link.kind {
            RuleKind::MemberAccess => Member::new(acc, right).into(),
            RuleKind::ArrayAccess => ArrayAccess::new(acc, right).into(),
            _ => BinOp::new(acc, binary_operator(link)?, right).into(),
        };
        acc = Arc::new(node.with_span(Some(link.span())));
    }
    Ok(acc)
}

fn binary_operator(tree: &ParseTree) -> CResult<BinaryOperator> {
    let op = only_token(tree)?;
    BinaryOperator::from_token(&op.text)
        .ok_or_else(|| malformed(tree, format!("unknown binary operator '{}'", op.text)))
}

fn instance_of(tree: &ParseTree) -> CResult<InstanceOf> {
    let value = expr(nth(tree, 0)?)?;
    let target = nth(tree, 1)?;
    let target = match target.kind {
        RuleKind::Pattern => InstanceOfTarget::Pattern(pattern(target)?),
        _ => InstanceOfTarget::Type(arc_ty(target)?),
    };
    Ok(InstanceOf::new(value, target))
}

// ============================================================================
// Lambdas
// ============================================================================

fn lambda(tree: &ParseTree) -> CResult<Lambda> {
    let params_tree = required(tree, RuleKind::LambdaParameters)?;
    let params = if let Some(formal) = params_tree.rule(RuleKind::FormalParameters) {
        LambdaParams::Formal(formal_parameters(formal)?)
    } else if params_tree.has_token(TokenKind::LParen) {
        LambdaParams::Identifiers(params_tree.tokens(TokenKind::Identifier).map(identifier).collect())
    } else {
        let id = params_tree
            .token(TokenKind::Identifier)
            .ok_or_else(|| malformed(params_tree, "expected a parameter name"))?;
        LambdaParams::Single(identifier(id))
    };
    let body = nth(tree, 1)?;
    let body = match body.kind {
        RuleKind::Block => LambdaBody::Block(block(body)?),
        _ => LambdaBody::Expr(expr(body)?),
    };
    Ok(Lambda::new(params, body)?)
}

// ============================================================================
// Calls and member access
// ============================================================================

/// `name(args)`, `this(args)` or `super(args)`.
fn method_call(tree: &ParseTree) -> CResult<Call> {
    let callee = only_token(tree)?;
    let func: Expr = match callee.kind {
        TokenKind::This => This::new().into(),
        TokenKind::Super => Super::new().into(),
        _ => Name::new(identifier(callee)).into(),
    };
    let func = func.with_span(Some(token_span(callee)));
    let args = arguments(required(tree, RuleKind::Arguments)?)?;
    Ok(Call::new(func, args))
}

/// `super.<T>name(args)`.
fn super_access(tree: &ParseTree) -> CResult<Super> {
    let mut node = Super::new().with_id(first_identifier(tree)?);
    if let Some(type_args) = tree.rule(RuleKind::TypeArguments) {
        node = node.with_type_args(type_arguments(type_args)?);
    }
    if let Some(args) = tree.rule(RuleKind::Arguments) {
        node = node.with_args(arguments(args)?);
    }
    Ok(node)
}

/// `target::name` and `Type::new`. Targets the recognizer read as types stay
/// types; anything else is an expression.
fn method_reference(tree: &ParseTree) -> CResult<Reference> {
    let target_tree = nth(tree, 0)?;
    let target = match target_tree.kind {
        RuleKind::Type => ReferenceTarget::Type(arc_ty(target_tree)?),
        _ => ReferenceTarget::Expr(expr(target_tree)?),
    };
    let type_args = tree.rule(RuleKind::TypeArguments).map(type_arguments).transpose()?;
    let id = tree.token(TokenKind::Identifier).map(identifier);
    Ok(Reference::new(target, type_args, id, tree.has_token(TokenKind::New))?)
}

// ============================================================================
// Creation
// ============================================================================

fn object_creation(tree: &ParseTree) -> CResult<NewObject> {
    let ty = arc_ty(required(tree, RuleKind::Type)?)?;
    let args = arguments(required(tree, RuleKind::Arguments)?)?;
    let mut node = NewObject::new(ty, args);
    if let Some(type_args) = tree.rule(RuleKind::TypeArguments) {
        node = node.with_type_args(type_arguments(type_args)?);
    }
    if let Some(body) = tree.rule(RuleKind::ClassBody) {
        node = node.with_body(class_body(body)?);
    }
    Ok(node)
}

/// `new <T> Inner<U>(args) { body }`: type arguments ahead of the name are
/// the constructor's, those after it the class's.
fn inner_creation(tree: &ParseTree) -> CResult<NewInnerObject> {
    let mut constructor_args = None;
    let mut class_args = None;
    let mut id = None;
    for child in &tree.children {
        match child {
            ParseNode::Token(token) if token.kind == TokenKind::Identifier => id = Some(identifier(token)),
            ParseNode::Rule(rule) if rule.kind == RuleKind::TypeArguments => {
                let args = type_arguments(rule)?;
                if id.is_none() {
                    constructor_args = Some(args);
                } else {
                    class_args = Some(args);
                }
            }
            _ => {}
        }
    }
    let id = id.ok_or_else(|| malformed(tree, "expected a class name"))?;
    let args = arguments(required(tree, RuleKind::Arguments)?)?;
    let mut node = NewInnerObject::new(id, args);
    if let Some(type_args) = constructor_args {
        node = node.with_type_args(type_args);
    }
    if let Some(type_args) = class_args {
        node = node.with_class_type_args(type_args);
    }
    if let Some(body) = tree.rule(RuleKind::ClassBody) {
        node = node.with_body(class_body(body)?);
    }
    Ok(node)
}

fn array_creation(tree: &ParseTree) -> CResult<NewArray> {
    let ty = arc_ty(required(tree, RuleKind::Type)?)?;
    let expr_dims = tree
        .rules(RuleKind::DimExpr)
        .map(|dim| Ok(located(DimExpr::new(expr(nth(dim, 0)?)?), dim)))
        .collect::<CResult<Vec<_>>>()?;
    let init = tree.rule(RuleKind::ArrayInitializer).map(array_initializer).transpose()?;
    Ok(NewArray::new(ty, expr_dims, dims(tree)?, init)?)
}

/// `{a, {b, c}}`; nested initializers become `ArrayInit` expressions.
pub(crate) fn array_initializer(tree: &ParseTree) -> CResult<ArrayInitializer> {
    Ok(located(ArrayInitializer::new(arguments(tree)?), tree))
}

// ============================================================================
// Switch rules
// ============================================================================

/// Every rule and group of a switch block as a `SwitchExprRule`. A group
/// `case a: case b: stmts` yields one rule per label, with the statements
/// on the last.
pub(crate) fn switch_rules(tree: &ParseTree) -> CResult<Vec<SwitchExprRule>> {
    let mut rules = Vec::new();
    for child in tree.child_rules() {
        match child.kind {
            RuleKind::SwitchRule => {
                let label = required(child, RuleKind::SwitchLabel)?;
                let body = vec![stmt(nth(child, 1)?)?];
                rules.push(located(switch_rule(label, true, body)?, child));
            }
            RuleKind::SwitchGroup => {
                let labels: Vec<&ParseTree> = child.rules(RuleKind::SwitchLabel).collect();
                let body = child
                    .child_rules()
                    .filter(|rule| rule.kind != RuleKind::SwitchLabel)
                    .map(stmt)
                    .collect::<CResult<Vec<_>>>()?;
                let mut body = Some(body);
                let count = labels.len();
                for (index, label) in labels.into_iter().enumerate() {
                    let statements = if index + 1 == count {
                        body.take().unwrap_or_default()
                    } else {
                        Vec::new()
                    };
                    rules.push(located(switch_rule(label, false, statements)?, label));
                }
            }
            _ => return Err(malformed(child, "expected a switch rule or statement group")),
        }
    }
    Ok(rules)
}

fn switch_rule(label: &ParseTree, arrow: bool, body: Vec<Arc<Stmt>>) -> CResult<SwitchExprRule> {
    if label.has_token(TokenKind::Default) {
        return Ok(SwitchExprRule::default_case(arrow, body));
    }
    Ok(SwitchExprRule::case(case_items(label)?, arrow, body))
}

/// The items of a `case` label: constants, patterns and guarded patterns.
pub(crate) fn case_items(label: &ParseTree) -> CResult<Vec<CaseItem>> {
    label
        .child_rules()
        .map(|item| {
            Ok(match item.kind {
                RuleKind::Pattern => CaseItem::Pattern(located(GuardedPattern::new(pattern(item)?, Vec::new()), item)),
                RuleKind::GuardedPattern => CaseItem::Pattern(guarded_pattern(item)?),
                _ => CaseItem::Expr(expr(item)?),
            })
        })
        .collect()
}

/// `Pattern when a && b` keeps each `&&` operand as its own condition.
fn guarded_pattern(tree: &ParseTree) -> CResult<GuardedPattern> {
    let pattern = pattern(required(tree, RuleKind::Pattern)?)?;
    let mut conditions = Vec::new();
    flatten_conjunction(nth(tree, 1)?, &mut conditions)?;
    Ok(located(GuardedPattern::new(pattern, conditions), tree))
}

fn flatten_conjunction(tree: &ParseTree, conditions: &mut Vec<Arc<Expr>>) -> CResult<()> {
    if tree.kind == RuleKind::ConditionalAnd {
        flatten_conjunction(nth(tree, 0)?, conditions)?;
        flatten_conjunction(nth(tree, 1)?, conditions)?;
    } else {
        conditions.push(expr(tree)?);
    }
    Ok(())
}
