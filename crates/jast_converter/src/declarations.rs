//! Declarations, compilation units and modules.

use crate::expressions::{arguments, expr};
use crate::statements::block;
use crate::support::{first_identifier, identifier, located, malformed, required, rule_after, CResult};
use crate::types::{
    annotations, arc_ty, dims, element_value, keyword_modifier, modifiers, modifiers_of, qualified_name,
    qualified_names, ty, type_list, type_parameters,
};
use jast_ast::{
    AnnotationDeclaration, AnnotationMethodDeclaration, Ast, AstError, ClassDeclaration,
    CompactConstructorDeclaration, CompilationUnit, ConstructorDeclaration, Decl, Directive, EmptyDeclaration,
    EnumConstant, EnumDeclaration, FieldDeclaration, FormalParameter, FormalParameters, Identifier,
    ImportDeclaration, Initializer, InterfaceDeclaration, MethodDeclaration, ModularCompilationUnit,
    Modifier, ModuleDeclaration, OrdinaryCompilationUnit, PackageDeclaration, Parameter, ReceiverParameter,
    RecordComponent, RecordDeclaration, Spanned, Type, VariableArityParameter, VariableDeclarator,
    VariableDeclaratorId,
};
use jast_parser::{ParseNode, ParseTree, RuleKind};
use jast_scanner::{Token, TokenKind};
use std::sync::Arc;

// ============================================================================
// Compilation units
// ============================================================================

pub fn compilation_unit(tree: &ParseTree) -> CResult<CompilationUnit> {
    let package = tree.rule(RuleKind::PackageDeclaration).map(package_declaration).transpose()?;
    let imports = tree
        .rules(RuleKind::ImportDeclaration)
        .map(import_declaration)
        .collect::<CResult<Vec<_>>>()?;

    if let Some(module) = tree.rule(RuleKind::ModuleDeclaration) {
        if let Some(package) = package {
            return Err(AstError::new(
                "ModularCompilationUnit",
                "package",
                "a modular compilation unit cannot declare a package",
            )
            .with_span(package.span()));
        }
        let unit = ModularCompilationUnit::new(imports, module_declaration(module)?);
        return Ok(located(unit, tree).into());
    }

    let declarations = tree
        .child_rules()
        .filter(|rule| {
            !matches!(rule.kind, RuleKind::PackageDeclaration | RuleKind::ImportDeclaration)
        })
        .map(class_body_declaration)
        .collect::<CResult<Vec<_>>>()?;
    tracing::trace!(
        imports = imports.len(),
        declarations = declarations.len(),
        "converted compilation unit"
    );
    Ok(located(OrdinaryCompilationUnit::new(package, imports, declarations), tree).into())
}

/// The child of a `DeclarationStart`.
pub(crate) fn declaration_start(tree: &ParseTree) -> CResult<Ast> {
    Ok(match tree.kind {
        RuleKind::PackageDeclaration => Ast::Package(package_declaration(tree)?),
        RuleKind::ImportDeclaration => Ast::Import(import_declaration(tree)?),
        RuleKind::ModuleDeclaration => Ast::Module(module_declaration(tree)?),
        _ => Ast::Decl(class_body_declaration(tree)?),
    })
}

fn package_declaration(tree: &ParseTree) -> CResult<PackageDeclaration> {
    let name = qualified_name(required(tree, RuleKind::QualifiedName)?)?;
    Ok(located(PackageDeclaration::new(name).with_annotations(annotations(tree)?), tree))
}

fn import_declaration(tree: &ParseTree) -> CResult<ImportDeclaration> {
    let name = qualified_name(required(tree, RuleKind::QualifiedName)?)?;
    let static_ = tree.has_token(TokenKind::Static);
    let on_demand = tree.has_token(TokenKind::Mul);
    Ok(located(ImportDeclaration::new(name, static_, on_demand), tree))
}

// ============================================================================
// Modules
// ============================================================================

fn module_declaration(tree: &ParseTree) -> CResult<ModuleDeclaration> {
    let name = qualified_name(required(tree, RuleKind::QualifiedName)?)?;
    let open = tree.has_word("open");
    let directives = tree
        .child_rules()
        .filter(|rule| !matches!(rule.kind, RuleKind::Annotation | RuleKind::QualifiedName))
        .map(directive)
        .collect::<CResult<Vec<_>>>()?;
    let node = ModuleDeclaration::new(name, open, directives).with_annotations(annotations(tree)?);
    Ok(located(node, tree))
}

fn directive(tree: &ParseTree) -> CResult<Directive> {
    let name = qualified_name(required(tree, RuleKind::QualifiedName)?)?;
    let targets = || match tree.rule(RuleKind::QualifiedNameList) {
        Some(list) => qualified_names(list),
        None => Ok(Vec::new()),
    };
    let mut node = match tree.kind {
        RuleKind::RequiresDirective => {
            let modifiers = tree
                .children
                .iter()
                .filter_map(ParseNode::as_token)
                .skip(1)
                .filter(|token| token.kind != TokenKind::Semi)
                .map(|token| keyword_modifier(tree, token).map(Modifier::Keyword))
                .collect::<CResult<Vec<_>>>()?;
            Directive::requires(modifiers, name)
        }
        RuleKind::ExportsDirective => Directive::exports(name, targets()?),
        RuleKind::OpensDirective => Directive::opens(name, targets()?),
        RuleKind::UsesDirective => Directive::uses(name),
        RuleKind::ProvidesDirective => Directive::provides(name, targets()?)?,
        _ => return Err(malformed(tree, "not a module directive")),
    };
    node.data_mut().span = Some(tree.span());
    Ok(node)
}

// ============================================================================
// Class body declarations
// ============================================================================

/// An empty declaration, an initializer, or a member with its modifiers.
pub fn class_body_declaration(tree: &ParseTree) -> CResult<Arc<Decl>> {
    let node: Decl = match tree.kind {
        RuleKind::EmptyDeclaration => EmptyDeclaration::new().into(),
        RuleKind::Initializer => {
            let body = block(required(tree, RuleKind::Block)?)?;
            Initializer::new(body, tree.has_token(TokenKind::Static)).into()
        }
        RuleKind::MemberDeclaration => return member_declaration(tree),
        _ => return Err(malformed(tree, "not a class body declaration")),
    };
    Ok(Arc::new(located(node, tree)))
}

/// A `MemberDeclaration`, spanning its modifiers.
pub(crate) fn member_declaration(tree: &ParseTree) -> CResult<Arc<Decl>> {
    let inner = tree
        .child_rules()
        .find(|rule| rule.kind != RuleKind::Modifiers)
        .ok_or_else(|| malformed(tree, "expected a member"))?;
    let mut node = member(inner)?;
    let modifiers = modifiers_of(tree)?;
    if !modifiers.is_empty() && !node.set_modifiers(modifiers) {
        return Err(AstError::new(node.kind_name(), "modifiers", "this declaration takes no modifiers")
            .with_span(Some(tree.span())));
    }
    Ok(Arc::new(located(node, tree)))
}

fn member(tree: &ParseTree) -> CResult<Decl> {
    Ok(match tree.kind {
        RuleKind::ClassDeclaration => class_declaration(tree)?.into(),
        RuleKind::InterfaceDeclaration => interface_declaration(tree)?.into(),
        RuleKind::EnumDeclaration => enum_declaration(tree)?.into(),
        RuleKind::RecordDeclaration => record_declaration(tree)?.into(),
        RuleKind::AnnotationTypeDeclaration => {
            let id = first_identifier(tree)?;
            AnnotationDeclaration::new(id, class_body(required(tree, RuleKind::ClassBody)?)?).into()
        }
        RuleKind::FieldDeclaration => {
            let ty = arc_ty(required(tree, RuleKind::Type)?)?;
            let declarators = variable_declarators(required(tree, RuleKind::VariableDeclarators)?)?;
            FieldDeclaration::new(ty, declarators)?.into()
        }
        RuleKind::MethodDeclaration => method_declaration(tree)?.into(),
        RuleKind::ConstructorDeclaration => {
            let id = first_identifier(tree)?;
            let params = formal_parameters(required(tree, RuleKind::FormalParameters)?)?;
            let body = block(required(tree, RuleKind::Block)?)?;
            let mut node = ConstructorDeclaration::new(id, params, body).with_throws(throws(tree)?);
            if let Some(type_params) = tree.rule(RuleKind::TypeParameters) {
                node = node.with_type_params(type_parameters(type_params)?);
            }
            node.into()
        }
        RuleKind::CompactConstructorDeclaration => {
            let id = first_identifier(tree)?;
            CompactConstructorDeclaration::new(id, block(required(tree, RuleKind::Block)?)?).into()
        }
        RuleKind::AnnotationMethodDeclaration => annotation_method_declaration(tree)?.into(),
        _ => return Err(malformed(tree, "not a member declaration")),
    })
}

pub(crate) fn class_body(tree: &ParseTree) -> CResult<Vec<Arc<Decl>>> {
    tree.child_rules().map(class_body_declaration).collect()
}

/// The type list following the marker accepted by `is_marker`, if any.
fn types_after(tree: &ParseTree, is_marker: impl Fn(&Token) -> bool) -> CResult<Vec<Arc<Type>>> {
    match rule_after(tree, is_marker) {
        Some(list) if list.kind == RuleKind::TypeList => type_list(list),
        _ => Ok(Vec::new()),
    }
}

fn is_permits(token: &Token) -> bool {
    token.kind == TokenKind::Identifier && token.text == "permits"
}

fn class_declaration(tree: &ParseTree) -> CResult<ClassDeclaration> {
    let id = first_identifier(tree)?;
    let mut node = ClassDeclaration::new(id, class_body(required(tree, RuleKind::ClassBody)?)?)
        .with_implements(types_after(tree, |token| token.kind == TokenKind::Implements)?)
        .with_permits(types_after(tree, is_permits)?);
    if let Some(type_params) = tree.rule(RuleKind::TypeParameters) {
        node = node.with_type_params(type_parameters(type_params)?);
    }
    if let Some(extends) = rule_after(tree, |token| token.kind == TokenKind::Extends) {
        node = node.with_extends(arc_ty(extends)?);
    }
    Ok(node)
}

fn interface_declaration(tree: &ParseTree) -> CResult<InterfaceDeclaration> {
    let id = first_identifier(tree)?;
    let mut node = InterfaceDeclaration::new(id, class_body(required(tree, RuleKind::ClassBody)?)?)
        .with_extends(types_after(tree, |token| token.kind == TokenKind::Extends)?)
        .with_permits(types_after(tree, is_permits)?);
    if let Some(type_params) = tree.rule(RuleKind::TypeParameters) {
        node = node.with_type_params(type_parameters(type_params)?);
    }
    Ok(node)
}

fn enum_declaration(tree: &ParseTree) -> CResult<EnumDeclaration> {
    let id = first_identifier(tree)?;
    let body = required(tree, RuleKind::EnumBody)?;
    let constants = body
        .rules(RuleKind::EnumConstant)
        .map(enum_constant)
        .collect::<CResult<Vec<_>>>()?;
    let members = body
        .child_rules()
        .filter(|rule| rule.kind != RuleKind::EnumConstant)
        .map(class_body_declaration)
        .collect::<CResult<Vec<_>>>()?;
    let node = EnumDeclaration::new(id, constants, members)
        .with_implements(types_after(tree, |token| token.kind == TokenKind::Implements)?);
    Ok(node)
}

fn enum_constant(tree: &ParseTree) -> CResult<EnumConstant> {
    let mut node = EnumConstant::new(first_identifier(tree)?).with_annotations(annotations(tree)?);
    if let Some(args) = tree.rule(RuleKind::Arguments) {
        node = node.with_args(arguments(args)?);
    }
    if let Some(body) = tree.rule(RuleKind::ClassBody) {
        node = node.with_body(class_body(body)?);
    }
    Ok(located(node, tree))
}

/// `record Name<T>(components) implements I { ... }`. The leading `record`
/// is itself an identifier token.
fn record_declaration(tree: &ParseTree) -> CResult<RecordDeclaration> {
    let id = tree
        .tokens(TokenKind::Identifier)
        .nth(1)
        .map(identifier)
        .ok_or_else(|| malformed(tree, "expected a record name"))?;
    let components = required(tree, RuleKind::RecordHeader)?
        .rules(RuleKind::RecordComponent)
        .map(record_component)
        .collect::<CResult<Vec<_>>>()?;
    let mut node = RecordDeclaration::new(id, components, class_body(required(tree, RuleKind::ClassBody)?)?)
        .with_implements(types_after(tree, |token| token.kind == TokenKind::Implements)?);
    if let Some(type_params) = tree.rule(RuleKind::TypeParameters) {
        node = node.with_type_params(type_parameters(type_params)?);
    }
    Ok(node)
}

fn record_component(tree: &ParseTree) -> CResult<RecordComponent> {
    let ty = arc_ty(required(tree, RuleKind::Type)?)?;
    let mut node = RecordComponent::new(ty, first_identifier(tree)?).with_annotations(annotations(tree)?);
    if tree.has_token(TokenKind::Ellipsis) {
        node = node.variable_arity();
    }
    Ok(located(node, tree))
}

// ============================================================================
// Methods
// ============================================================================

fn throws(tree: &ParseTree) -> CResult<Vec<jast_ast::QualifiedName>> {
    match tree.rule(RuleKind::QualifiedNameList) {
        Some(list) => qualified_names(list),
        None => Ok(Vec::new()),
    }
}

fn method_declaration(tree: &ParseTree) -> CResult<MethodDeclaration> {
    let return_type = arc_ty(required(tree, RuleKind::Type)?)?;
    let id = first_identifier(tree)?;
    let params = formal_parameters(required(tree, RuleKind::FormalParameters)?)?;
    let mut node = MethodDeclaration::new(return_type, id, params)
        .with_annotations(annotations(tree)?)
        .with_dims(dims(tree)?)
        .with_throws(throws(tree)?);
    if let Some(type_params) = tree.rule(RuleKind::TypeParameters) {
        node = node.with_type_params(type_parameters(type_params)?);
    }
    if let Some(body) = tree.rule(RuleKind::Block) {
        node = node.with_body(block(body)?);
    }
    Ok(node)
}

/// Dims after the parameter list of an element fold into its type.
fn annotation_method_declaration(tree: &ParseTree) -> CResult<AnnotationMethodDeclaration> {
    let mut element_type = ty(required(tree, RuleKind::Type)?)?;
    let dims = dims(tree)?;
    if !dims.is_empty() {
        let span = element_type.span();
        element_type = Type::array(element_type, dims)?.with_span(span);
    }
    let mut node = AnnotationMethodDeclaration::new(element_type, first_identifier(tree)?)?;
    if let Some(default) = tree.rule(RuleKind::ElementValue) {
        node = node.with_default(element_value(default)?);
    }
    Ok(node)
}

// ============================================================================
// Parameters and variables
// ============================================================================

pub(crate) fn formal_parameters(tree: &ParseTree) -> CResult<FormalParameters> {
    let mut receiver = None;
    let mut params = Vec::new();
    for child in tree.child_rules() {
        match child.kind {
            RuleKind::ReceiverParameter => receiver = Some(receiver_parameter(child)?),
            RuleKind::VariableArityParameter => {
                let ty = arc_ty(required(child, RuleKind::Type)?)?;
                let node = VariableArityParameter::new(ty, first_identifier(child)?)
                    .with_modifiers(modifiers_of(child)?)
                    .with_annotations(annotations(child)?);
                params.push(FormalParameter::from(located(node, child)));
            }
            RuleKind::FormalParameter => {
                let ty = arc_ty(required(child, RuleKind::Type)?)?;
                let id = variable_declarator_id(required(child, RuleKind::VariableDeclaratorId)?)?;
                let node = Parameter::new(ty, id).with_modifiers(modifiers_of(child)?);
                params.push(FormalParameter::from(located(node, child)));
            }
            _ => return Err(malformed(child, "not a formal parameter")),
        }
    }
    let mut node = FormalParameters::new(params);
    if let Some(receiver) = receiver {
        node = node.with_receiver(receiver);
    }
    Ok(located(node, tree))
}

/// `A this` or `Outer.this`. Annotations in front of the type annotate it;
/// keyword modifiers are not allowed.
fn receiver_parameter(tree: &ParseTree) -> CResult<ReceiverParameter> {
    let mut receiver_annotations = Vec::new();
    for modifier in modifiers(tree.rule(RuleKind::Modifiers))? {
        match modifier {
            Modifier::Annotation(annotation) => receiver_annotations.push(annotation),
            Modifier::Keyword(keyword) => {
                return Err(AstError::new(
                    "ReceiverParameter",
                    "modifiers",
                    "a receiver parameter takes no keyword modifiers",
                )
                .with_span(keyword.span()))
            }
        }
    }
    let mut receiver_type = ty(required(tree, RuleKind::Type)?)?;
    if !receiver_annotations.is_empty() {
        receiver_annotations.append(&mut receiver_type.annotations);
        receiver_type.annotations = receiver_annotations;
    }
    let identifiers: Vec<Identifier> = tree.tokens(TokenKind::Identifier).map(identifier).collect();
    Ok(located(ReceiverParameter::new(receiver_type, identifiers), tree))
}

pub(crate) fn variable_declarators(tree: &ParseTree) -> CResult<Vec<VariableDeclarator>> {
    tree.rules(RuleKind::VariableDeclarator).map(variable_declarator).collect()
}

/// `id[] = init`; an array initializer converts like any other expression.
pub(crate) fn variable_declarator(tree: &ParseTree) -> CResult<VariableDeclarator> {
    let id = variable_declarator_id(required(tree, RuleKind::VariableDeclaratorId)?)?;
    let mut node = VariableDeclarator::new(id);
    if let Some(init) = tree.nth_rule(1) {
        node = node.with_init(expr(init)?);
    }
    Ok(located(node, tree))
}

pub(crate) fn variable_declarator_id(tree: &ParseTree) -> CResult<VariableDeclaratorId> {
    let node = VariableDeclaratorId::new(first_identifier(tree)?).with_dims(dims(tree)?);
    Ok(located(node, tree))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::support::nth;
    use jast_parser::Parser;

    /// Helper: convert the single declaration of `source`.
    fn decl(source: &str) -> Arc<Decl> {
        let tree = Parser::new(source).unwrap().parse_declaration_start().unwrap();
        class_body_declaration(nth(&tree, 0).unwrap()).unwrap()
    }

    #[test]
    fn test_record_name_follows_contextual_keyword() {
        let Decl::Record(record) = decl("record Point(int x, int... rest) {}").as_ref().clone() else {
            panic!("expected a record");
        };
        assert_eq!(record.id.as_str(), "Point");
        assert_eq!(record.components.len(), 2);
        assert!(record.components[1].variable_arity);
    }

    #[test]
    fn test_member_span_covers_modifiers() {
        let node = decl("public static void main() {}");
        assert_eq!(node.span().unwrap().start(), (1, 0));
        let Decl::Method(method) = node.as_ref() else {
            panic!("expected a method");
        };
        assert_eq!(method.return_type.span().unwrap().start(), (1, 14));
    }

    #[test]
    fn test_receiver_annotations_move_to_type() {
        let Decl::Method(method) = decl("void m(@A Outer this) {}").as_ref().clone() else {
            panic!("expected a method");
        };
        let receiver = method.params.receiver.unwrap();
        assert_eq!(receiver.ty.annotations.len(), 1);
        assert!(receiver.identifiers.is_empty());
    }

    #[test]
    fn test_annotation_method_dims_fold_into_type() {
        let Decl::Annotation(annotation) = decl("@interface A { int value()[]; }").as_ref().clone() else {
            panic!("expected an annotation type");
        };
        let Decl::AnnotationMethod(method) = annotation.body[0].as_ref() else {
            panic!("expected an annotation method");
        };
        assert!(matches!(method.ty.kind, jast_ast::TypeKind::Array(_)));
    }

    #[test]
    fn test_modifiers_on_initializer_are_rejected_by_the_ast() {
        let mut init: Decl = Initializer::new(jast_ast::Block::empty(), false).into();
        assert!(!init.set_modifiers(vec![]));
    }
}
