//! Converter integration tests.
//!
//! Parses Java source with the recognizer, converts the tree and checks the
//! resulting nodes, their structure and their spans.

use jast_ast::{
    Ast, BinOp, BinaryOperator, CaseItem, CaseValue, CompilationUnit, Constant, Decl, Directive, Expr, ForInit,
    Literal, LiteralKind, Modifier, ModifierKeyword, Name, Spanned, Stmt, SwitchLabel, TryResource, TypeKind,
};
use jast_converter::{convert, convert_expr, convert_stmt};
use jast_parser::{ParseTree, Parser};
use pretty_assertions::assert_eq;
use std::sync::Arc;

/// Helper: the single child of a start rule.
fn start_child(source: &str, rule: fn(&mut Parser) -> Result<ParseTree, jast_diagnostics::ParseError>) -> ParseTree {
    let mut parser = Parser::new(source).unwrap_or_else(|e| panic!("{}: {}", source, e));
    let tree = rule(&mut parser).unwrap_or_else(|e| panic!("{}: {}", source, e));
    tree.nth_rule(0).unwrap().clone()
}

fn expr(source: &str) -> Arc<Expr> {
    convert_expr(&start_child(source, Parser::parse_expression_start)).unwrap()
}

fn stmt(source: &str) -> Arc<Stmt> {
    convert_stmt(&start_child(source, Parser::parse_statement_start)).unwrap()
}

fn decl(source: &str) -> Arc<Decl> {
    let mut parser = Parser::new(source).unwrap();
    match convert(&parser.parse_declaration_start().unwrap()).unwrap() {
        Ast::Decl(decl) => decl,
        other => panic!("expected a declaration, got {:?}", other),
    }
}

fn unit(source: &str) -> CompilationUnit {
    let mut parser = Parser::new(source).unwrap();
    match convert(&parser.parse_compilation_unit().unwrap()).unwrap() {
        Ast::CompilationUnit(unit) => unit,
        other => panic!("expected a compilation unit, got {:?}", other),
    }
}

fn int(value: u64) -> Expr {
    Constant::new(Literal::int(value)).into()
}

// ============================================================================
// Expressions
// ============================================================================

#[test]
fn test_binary_structure_ignores_spans() {
    let expected: Expr = BinOp::new(
        int(1),
        BinaryOperator::Add,
        BinOp::new(int(2), BinaryOperator::Mult, Name::new("x")),
    )
    .into();
    assert_eq!(expr("1 + 2 * x").as_ref(), &expected);
}

#[test]
fn test_parentheses_do_not_produce_nodes() {
    assert_eq!(expr("(((x)))").as_ref(), &Expr::from(Name::new("x")));
}

#[test]
fn test_expression_spans() {
    let node = expr("a  +  b");
    let span = node.span().unwrap();
    assert_eq!(span.start(), (1, 0));
    assert_eq!(span.end(), (1, 7));
    let Expr::BinOp(binop) = node.as_ref() else {
        panic!("expected a binary operation");
    };
    assert_eq!(binop.right.span().unwrap().start(), (1, 6));
}

#[test]
fn test_literals() {
    let literal = |source: &str| match expr(source).as_ref() {
        Expr::Constant(constant) => constant.literal.kind.clone(),
        other => panic!("expected a constant, got {:?}", other),
    };
    assert_eq!(literal("0x1F"), LiteralKind::Int { value: 31, long: false });
    assert_eq!(literal("7L"), LiteralKind::Int { value: 7, long: true });
    assert_eq!(literal("1.5d"), LiteralKind::Float { value: 1.5, double: true });
    assert_eq!(literal("'\\n'"), LiteralKind::Char("\\n".to_string()));
    assert_eq!(literal("\"a\\tb\""), LiteralKind::String("a\\tb".to_string()));
    assert_eq!(literal("null"), LiteralKind::Null);
    assert_eq!(
        literal("\"\"\"\n    hello\n      world\n    \"\"\""),
        LiteralKind::TextBlock(vec!["hello".to_string(), "  world".to_string(), String::new()])
    );
}

#[test]
fn test_method_call_chain() {
    let node = expr("System.out.println(1, x)");
    let Expr::Member(member) = node.as_ref() else {
        panic!("expected a member access, got {:?}", node);
    };
    let Expr::Call(call) = member.member.as_ref() else {
        panic!("expected a call");
    };
    assert_eq!(call.args.len(), 2);
    assert_eq!(call.func.as_ref(), &Expr::from(Name::new("println")));
}

#[test]
fn test_long_operator_chain_is_left_deep() {
    let terms = 150;
    let source = vec!["x"; terms].join(" + ");
    let mut node = expr(&source);
    let mut depth = 0;
    while let Expr::BinOp(binop) = node.as_ref() {
        assert_eq!(binop.op, BinaryOperator::Add);
        assert_eq!(binop.right.as_ref(), &Expr::from(Name::new("x")));
        assert_eq!(binop.span().unwrap().start(), (1, 0));
        depth += 1;
        node = binop.left.clone();
    }
    assert_eq!(depth, terms - 1);
    assert_eq!(node.as_ref(), &Expr::from(Name::new("x")));
}

#[test]
fn test_long_call_chain_is_left_deep() {
    let node = expr(&format!("b{}[0]", ".m()".repeat(150)));
    let Expr::ArrayAccess(access) = node.as_ref() else {
        panic!("expected an array access, got {:?}", node);
    };
    let mut receiver = access.receiver.clone();
    let mut calls = 0;
    while let Expr::Member(member) = receiver.as_ref() {
        assert!(matches!(member.member.as_ref(), Expr::Call(_)));
        calls += 1;
        receiver = member.receiver.clone();
    }
    assert_eq!(calls, 150);
    assert_eq!(receiver.as_ref(), &Expr::from(Name::new("b")));
}

#[test]
fn test_lambda_and_reference() {
    let Expr::Lambda(lambda) = expr("(a, b) -> a + b").as_ref().clone() else {
        panic!("expected a lambda");
    };
    assert!(matches!(lambda.params, jast_ast::LambdaParams::Identifiers(ref ids) if ids.len() == 2));
    let Expr::Reference(reference) = expr("String::new").as_ref().clone() else {
        panic!("expected a method reference");
    };
    assert!(reference.new);
}

#[test]
fn test_switch_expression_with_guard() {
    let Expr::SwitchExp(switch) = expr("switch (o) { case String s when s.isEmpty() && x -> 0; default -> 1; }")
        .as_ref()
        .clone()
    else {
        panic!("expected a switch expression");
    };
    assert_eq!(switch.rules.len(), 2);
    let CaseItem::Pattern(pattern) = &switch.rules[0].cases[0] else {
        panic!("expected a pattern case");
    };
    assert_eq!(pattern.conditions.len(), 2);
    assert!(switch.rules.iter().all(|rule| rule.arrow));
}

// ============================================================================
// Statements
// ============================================================================

#[test]
fn test_local_variable_with_var() {
    let Stmt::LocalVariable(local) = stmt("var xs = new int[] {1, 2};").as_ref().clone() else {
        panic!("expected a local variable declaration");
    };
    assert_eq!(local.ty.kind, TypeKind::Var);
    assert!(local.declarators[0].init.is_some());
}

#[test]
fn test_for_statement_parts() {
    let Stmt::For(node) = stmt("for (int i = 0; i < n; i++, j--) {}").as_ref().clone() else {
        panic!("expected a for statement");
    };
    assert!(matches!(node.init, Some(ForInit::LocalVariable(_))));
    assert!(node.test.is_some());
    assert_eq!(node.update.len(), 2);

    let Stmt::For(node) = stmt("for (;;) ;").as_ref().clone() else {
        panic!("expected a for statement");
    };
    assert!(node.init.is_none());
    assert!(node.test.is_none());
    assert!(node.update.is_empty());
}

#[test]
fn test_colon_switch_groups_and_trailing_labels() {
    let Stmt::Switch(switch) = stmt("switch (x) { case 1, 2: a(); break; case 3: default: }").as_ref().clone() else {
        panic!("expected a switch statement");
    };
    assert_eq!(switch.body.groups.len(), 1);
    assert_eq!(switch.body.groups[0].labels.len(), 2);
    assert_eq!(switch.body.groups[0].body.len(), 2);
    assert_eq!(switch.body.labels.len(), 2);
    assert!(matches!(switch.body.labels[1], SwitchLabel::Default(_)));
}

#[test]
fn test_colon_switch_pattern_label() {
    let Stmt::Switch(switch) = stmt("switch (o) { case Integer i: f(i); }").as_ref().clone() else {
        panic!("expected a switch statement");
    };
    let SwitchLabel::Case(case) = &switch.body.groups[0].labels[0] else {
        panic!("expected a case label");
    };
    assert!(matches!(case.value, CaseValue::Match(ref m) if m.id.as_str() == "i"));
}

#[test]
fn test_arrow_switch_statement_uses_rules() {
    let Stmt::Switch(switch) = stmt("switch (x) { case 1 -> f(); default -> { g(); } }").as_ref().clone() else {
        panic!("expected a switch statement");
    };
    assert!(switch.body.groups.is_empty());
    assert_eq!(switch.body.rules.len(), 2);
}

#[test]
fn test_try_with_resources() {
    let Stmt::TryWithResources(node) = stmt("try (var in = open(); out) { use(in); } catch (IOException | RuntimeException e) {} finally {}")
        .as_ref()
        .clone()
    else {
        panic!("expected a try-with-resources statement");
    };
    assert!(matches!(node.resources[0], TryResource::Declared(_)));
    assert!(matches!(node.resources[1], TryResource::Name(_)));
    assert_eq!(node.catches[0].exceptions.len(), 2);
    assert!(node.finally.is_some());
}

#[test]
fn test_labeled_break() {
    let Stmt::Labeled(labeled) = stmt("outer: while (true) break outer;").as_ref().clone() else {
        panic!("expected a labeled statement");
    };
    assert_eq!(labeled.label.as_str(), "outer");
    let Stmt::While(node) = labeled.body.as_ref() else {
        panic!("expected a while loop");
    };
    assert!(matches!(node.body.as_ref(), Stmt::Break(b) if b.label.as_ref().map(|l| l.as_str()) == Some("outer")));
}

// ============================================================================
// Declarations
// ============================================================================

#[test]
fn test_class_with_members() {
    let Decl::Class(class) = decl("public final class A<T> extends B implements C, D { int x = 1; A() {} }")
        .as_ref()
        .clone()
    else {
        panic!("expected a class");
    };
    assert_eq!(class.modifiers.len(), 2);
    assert!(class.type_params.is_some());
    assert!(class.extends.is_some());
    assert_eq!(class.implements.len(), 2);
    assert_eq!(class.body.len(), 2);
    assert!(matches!(class.body[1].as_ref(), Decl::Constructor(_)));
}

#[test]
fn test_sealed_interface_permits() {
    let Decl::Interface(node) = decl("sealed interface Shape permits Circle, Square {}").as_ref().clone() else {
        panic!("expected an interface");
    };
    assert_eq!(node.permits.len(), 2);
    assert!(node.extends.is_empty());
}

#[test]
fn test_enum_constants_and_members() {
    let Decl::Enum(node) = decl("enum Color { RED(1), GREEN { }, BLUE; int v; }").as_ref().clone() else {
        panic!("expected an enum");
    };
    let names: Vec<&str> = node.constants.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(names, vec!["RED", "GREEN", "BLUE"]);
    assert_eq!(node.constants[0].args.as_ref().map(Vec::len), Some(1));
    assert!(node.constants[1].body.is_some());
    assert_eq!(node.body.len(), 1);
}

#[test]
fn test_method_with_varargs_and_throws() {
    let Decl::Method(method) = decl("<T> T pick(final T first, T... rest) throws Exception;").as_ref().clone() else {
        panic!("expected a method");
    };
    assert!(method.type_params.is_some());
    assert_eq!(method.params.params.len(), 2);
    assert_eq!(method.throws.len(), 1);
    assert!(method.body.is_none());
}

#[test]
fn test_static_initializer() {
    let Decl::Initializer(init) = decl("static { x = 1; }").as_ref().clone() else {
        panic!("expected an initializer");
    };
    assert!(init.static_);
}

// ============================================================================
// Compilation units
// ============================================================================

#[test]
fn test_ordinary_compilation_unit() {
    let CompilationUnit::Ordinary(unit) = unit("package a.b; import java.util.*; import static x.Y.z; class A {}") else {
        panic!("expected an ordinary compilation unit");
    };
    assert_eq!(unit.package.unwrap().name.to_string(), "a.b");
    assert!(unit.imports[0].on_demand);
    assert!(unit.imports[1].static_);
    assert_eq!(unit.declarations.len(), 1);
}

#[test]
fn test_modular_compilation_unit() {
    let source = "open module m.core { requires transitive java.base; exports a to b, c; provides S with I; uses S; }";
    let CompilationUnit::Modular(unit) = unit(source) else {
        panic!("expected a modular compilation unit");
    };
    assert!(unit.module.open);
    assert_eq!(unit.module.directives.len(), 4);
}

#[test]
fn test_requires_transitive_static() {
    let source = "open module foo.bar { requires transitive static a.b; }";
    let CompilationUnit::Modular(unit) = unit(source) else {
        panic!("expected a modular compilation unit");
    };
    let [Directive::Requires(requires)] = unit.module.directives.as_slice() else {
        panic!("expected a single requires directive");
    };
    let keywords: Vec<ModifierKeyword> = requires
        .modifiers
        .iter()
        .map(|modifier| match modifier {
            Modifier::Keyword(keyword) => keyword.keyword,
            Modifier::Annotation(_) => panic!("unexpected annotation"),
        })
        .collect();
    assert_eq!(keywords, vec![ModifierKeyword::Transitive, ModifierKeyword::Static]);
    assert_eq!(requires.name.to_string(), "a.b");
}

#[test]
fn test_start_rule_dispatch() {
    let mut parser = Parser::new("import a.B;").unwrap();
    assert!(matches!(convert(&parser.parse_declaration_start().unwrap()).unwrap(), Ast::Import(_)));
    let mut parser = Parser::new("x = 1;").unwrap();
    assert!(matches!(convert(&parser.parse_statement_start().unwrap()).unwrap(), Ast::Stmt(_)));
}
