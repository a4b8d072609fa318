//! Names, modifiers, annotations and types.

use crate::expressions::expr;
use crate::support::{
    first_identifier, identifier, located, malformed, nth, required, span_through, token_span, CResult,
};
use jast_ast::{
    Annotation, AnnotationElement, AstError, Coit, Dim, ElementValue, ElementValueArrayInitializer,
    ElementValuePair, KeywordModifier, Modifier, ModifierKeyword, Pattern, QualifiedName, Spanned, Type,
    TypeArguments, TypeBound, TypeKind, TypeParameter, TypeParameters, WildcardBound,
};
use jast_core::text::Span;
use jast_parser::{ParseNode, ParseTree, RuleKind};
use jast_scanner::{Token, TokenKind};
use std::sync::Arc;

// ============================================================================
// Names
// ============================================================================

pub(crate) fn qualified_name(tree: &ParseTree) -> CResult<QualifiedName> {
    let identifiers = tree.tokens(TokenKind::Identifier).map(identifier).collect();
    Ok(located(QualifiedName::new(identifiers)?, tree))
}

/// A `QualifiedNameList`, or the names of a `CatchType`.
pub(crate) fn qualified_names(tree: &ParseTree) -> CResult<Vec<QualifiedName>> {
    tree.rules(RuleKind::QualifiedName).map(qualified_name).collect()
}

// ============================================================================
// Modifiers and annotations
// ============================================================================

/// The modifiers of an optional `Modifiers` rule, in source order.
pub(crate) fn modifiers(tree: Option<&ParseTree>) -> CResult<Vec<Modifier>> {
    let Some(tree) = tree else {
        return Ok(Vec::new());
    };
    tree.children
        .iter()
        .map(|child| match child {
            ParseNode::Token(token) => keyword_modifier(tree, token).map(Modifier::Keyword),
            ParseNode::Rule(rule) => annotation(rule).map(Modifier::Annotation),
        })
        .collect()
}

/// The `Modifiers` child of `tree`, converted.
pub(crate) fn modifiers_of(tree: &ParseTree) -> CResult<Vec<Modifier>> {
    modifiers(tree.rule(RuleKind::Modifiers))
}

pub(crate) fn keyword_modifier(tree: &ParseTree, token: &Token) -> CResult<KeywordModifier> {
    let keyword = ModifierKeyword::from_keyword(&token.text)
        .ok_or_else(|| malformed(tree, format!("'{}' is not a modifier", token.text)))?;
    Ok(KeywordModifier::new(keyword).with_span(Some(token_span(token))))
}

/// The direct `Annotation` children of `tree`.
pub(crate) fn annotations(tree: &ParseTree) -> CResult<Vec<Annotation>> {
    tree.rules(RuleKind::Annotation).map(annotation).collect()
}

pub(crate) fn annotation(tree: &ParseTree) -> CResult<Annotation> {
    let name = qualified_name(required(tree, RuleKind::QualifiedName)?)?;
    let mut elements = Vec::new();
    for child in tree.child_rules() {
        match child.kind {
            RuleKind::ElementValuePair => {
                let id = first_identifier(child)?;
                let value = element_value(required(child, RuleKind::ElementValue)?)?;
                elements.push(AnnotationElement::Pair(located(ElementValuePair::new(id, value), child)));
            }
            RuleKind::ElementValue => elements.push(AnnotationElement::Value(element_value(child)?)),
            _ => {}
        }
    }
    Ok(located(Annotation::new(name).with_elements(elements), tree))
}

pub(crate) fn element_value(tree: &ParseTree) -> CResult<ElementValue> {
    let inner = nth(tree, 0)?;
    Ok(match inner.kind {
        RuleKind::Annotation => ElementValue::Annotation(annotation(inner)?),
        RuleKind::ElementValueArrayInitializer => {
            let values = inner
                .rules(RuleKind::ElementValue)
                .map(element_value)
                .collect::<CResult<Vec<_>>>()?;
            ElementValue::Array(located(ElementValueArrayInitializer::new(values), inner))
        }
        _ => ElementValue::Expr(expr(inner)?),
    })
}

// ============================================================================
// Types
// ============================================================================

fn primitive_kind(kind: TokenKind) -> Option<TypeKind> {
    Some(match kind {
        TokenKind::Void => TypeKind::Void,
        TokenKind::Boolean => TypeKind::Boolean,
        TokenKind::Byte => TypeKind::Byte,
        TokenKind::Short => TypeKind::Short,
        TokenKind::Int => TypeKind::Int,
        TokenKind::Long => TypeKind::Long,
        TokenKind::Char => TypeKind::Char,
        TokenKind::Float => TypeKind::Float,
        TokenKind::Double => TypeKind::Double,
        _ => return None,
    })
}

/// A `Type` rule: annotations, a primitive, `void` or class type, then dims.
/// Leading annotations belong to the element type of an array.
pub fn ty(tree: &ParseTree) -> CResult<Type> {
    let mut base = None;
    let mut base_end = None;
    for child in &tree.children {
        match child {
            ParseNode::Token(token) => {
                if let Some(kind) = primitive_kind(token.kind) {
                    base = Some(Type::new(kind));
                    base_end = Some(token_span(token).end());
                }
            }
            ParseNode::Rule(rule) if rule.kind == RuleKind::ClassType => {
                base = Some(class_type(rule)?);
                base_end = Some(rule.span().end());
            }
            ParseNode::Rule(_) => {}
        }
    }
    let (Some(base), Some((end_line, end_column))) = (base, base_end) else {
        return Err(malformed(tree, "expected a primitive or class type"));
    };
    let (line, column) = tree.span().start();
    let base = base
        .with_annotations(annotations(tree)?)
        .with_span(Some(Span::new(line, column, end_line, end_column)));

    let dims = dims(tree)?;
    if dims.is_empty() {
        return Ok(base);
    }
    Ok(located(Type::array(base, dims)?, tree))
}

pub(crate) fn arc_ty(tree: &ParseTree) -> CResult<Arc<Type>> {
    ty(tree).map(Arc::new)
}

/// A class type; a lone unannotated `var` is the inferred local type.
fn class_type(tree: &ParseTree) -> CResult<Type> {
    let coits = tree.rules(RuleKind::Coit).map(coit).collect::<CResult<Vec<_>>>()?;
    if let [only] = coits.as_slice() {
        if only.id.as_str() == "var" && only.type_args.is_none() && only.annotations.is_empty() {
            return Ok(located(Type::new(TypeKind::Var), tree));
        }
    }
    Ok(located(Type::class(coits)?, tree))
}

fn coit(tree: &ParseTree) -> CResult<Coit> {
    let id = first_identifier(tree)?;
    let mut coit = Coit::new(id).with_annotations(annotations(tree)?);
    if let Some(args) = tree.rule(RuleKind::TypeArguments) {
        coit = coit.with_type_args(type_arguments(args)?);
    }
    Ok(located(coit, tree))
}

/// `<A, B>`, or the diamond `<>` as an empty argument list.
pub(crate) fn type_arguments(tree: &ParseTree) -> CResult<TypeArguments> {
    let types = tree
        .child_rules()
        .map(|child| match child.kind {
            RuleKind::Wildcard => wildcard(child).map(Arc::new),
            _ => arc_ty(child),
        })
        .collect::<CResult<Vec<_>>>()?;
    let args = if types.is_empty() {
        TypeArguments::diamond()
    } else {
        TypeArguments::new(types)?
    };
    Ok(located(args, tree))
}

fn wildcard(tree: &ParseTree) -> CResult<Type> {
    let bound = match tree.rule(RuleKind::Type) {
        Some(bound_type) => {
            let bound_ty = arc_ty(bound_type)?;
            let bound = if tree.has_token(TokenKind::Extends) {
                WildcardBound::extends(bound_ty)
            } else {
                WildcardBound::super_(bound_ty)
            };
            Some(bound.with_span(Some(bound_type.span())))
        }
        None => None,
    };
    Ok(located(Type::wildcard(bound).with_annotations(annotations(tree)?), tree))
}

/// The `Dim` children of `tree`.
pub(crate) fn dims(tree: &ParseTree) -> CResult<Vec<Dim>> {
    tree.rules(RuleKind::Dim)
        .map(|dim| Ok(located(Dim::new().with_annotations(annotations(dim)?), dim)))
        .collect()
}

pub(crate) fn type_list(tree: &ParseTree) -> CResult<Vec<Arc<Type>>> {
    tree.rules(RuleKind::Type).map(arc_ty).collect()
}

pub(crate) fn type_parameters(tree: &ParseTree) -> CResult<TypeParameters> {
    let parameters = tree
        .rules(RuleKind::TypeParameter)
        .map(type_parameter)
        .collect::<CResult<Vec<_>>>()?;
    Ok(located(TypeParameters::new(parameters)?, tree))
}

fn type_parameter(tree: &ParseTree) -> CResult<TypeParameter> {
    let id = first_identifier(tree)?;
    let mut parameter = TypeParameter::new(id).with_annotations(annotations(tree)?);
    if let Some(bound) = tree.rule(RuleKind::TypeBound) {
        parameter = parameter.with_bound(type_bound(bound)?);
    }
    Ok(located(parameter, tree))
}

pub(crate) fn type_bound(tree: &ParseTree) -> CResult<TypeBound> {
    Ok(located(TypeBound::new(type_list(tree)?)?, tree))
}

/// The types of a cast head, `(A & B)`, as a bound.
pub(crate) fn cast_bound(tree: &ParseTree) -> CResult<TypeBound> {
    let heads: Vec<&ParseTree> = tree.rules(RuleKind::Type).collect();
    let (Some(first), Some(last)) = (heads.first(), heads.last()) else {
        return Err(malformed(tree, "expected a cast type"));
    };
    let types = heads.iter().map(|head| arc_ty(head)).collect::<CResult<Vec<_>>>()?;
    Ok(TypeBound::new(types)?.with_span(Some(span_through(first, last))))
}

// ============================================================================
// Patterns
// ============================================================================

/// `final Type name`.
pub(crate) fn pattern(tree: &ParseTree) -> CResult<Pattern> {
    let ty = arc_ty(required(tree, RuleKind::Type)?)?;
    let id = tree
        .token(TokenKind::Identifier)
        .map(identifier)
        .ok_or_else(|| AstError::required("Pattern", "id"))?;
    Ok(located(Pattern::new(ty, id).with_modifiers(modifiers_of(tree)?), tree))
}
