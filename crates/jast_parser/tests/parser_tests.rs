//! Parser integration tests.
//!
//! Verifies that the recognizer builds the expected parse trees from Java
//! source and reports the first syntax error with its position.

use jast_diagnostics::ParseError;
use jast_parser::{ParseTree, Parser, RuleKind};
use jast_scanner::TokenKind;
use pretty_assertions::assert_eq;

type StartRule = fn(&mut Parser) -> Result<ParseTree, ParseError>;

fn run(source: &str, rule: StartRule) -> Result<ParseTree, ParseError> {
    let mut parser = Parser::new(source)?;
    rule(&mut parser)
}

/// Helper: parse with a start rule and return its single child.
fn only_child(source: &str, rule: StartRule) -> ParseTree {
    let tree = run(source, rule).unwrap_or_else(|e| panic!("{}: {}", source, e));
    assert_eq!(tree.child_rules().count(), 1, "source: {}", source);
    tree.nth_rule(0).unwrap().clone()
}

fn expr(source: &str) -> ParseTree {
    only_child(source, Parser::parse_expression_start)
}

fn stmt(source: &str) -> ParseTree {
    only_child(source, Parser::parse_statement_start)
}

fn decl(source: &str) -> ParseTree {
    only_child(source, Parser::parse_declaration_start)
}

fn unit(source: &str) -> ParseTree {
    run(source, Parser::parse_compilation_unit).unwrap_or_else(|e| panic!("{}: {}", source, e))
}

/// Helper: the first error message, rendered.
fn error(source: &str, rule: StartRule) -> String {
    run(source, rule).unwrap_err().to_string()
}

/// Helper: the kinds of the direct child rules.
fn child_kinds(tree: &ParseTree) -> Vec<RuleKind> {
    tree.child_rules().map(|child| child.kind).collect()
}

// ============================================================================
// Compilation units
// ============================================================================

#[test]
fn test_empty_compilation_unit() {
    let tree = unit("");
    assert_eq!(tree.kind, RuleKind::CompilationUnit);
    assert!(tree.children.is_empty());
}

#[test]
fn test_package_imports_and_types() {
    let tree = unit("package a.b;\nimport java.util.*;\nimport static x.Y.z;\nclass A {}\ninterface B {}\n;");
    assert_eq!(
        child_kinds(&tree),
        vec![
            RuleKind::PackageDeclaration,
            RuleKind::ImportDeclaration,
            RuleKind::ImportDeclaration,
            RuleKind::MemberDeclaration,
            RuleKind::MemberDeclaration,
            RuleKind::EmptyDeclaration,
        ]
    );
    let wildcard = tree.nth_rule(1).unwrap();
    assert!(wildcard.has_token(TokenKind::Mul));
    let static_import = tree.nth_rule(2).unwrap();
    assert!(static_import.has_token(TokenKind::Static));
}

#[test]
fn test_annotated_package() {
    let tree = unit("@Deprecated package a;");
    let package = tree.nth_rule(0).unwrap();
    assert_eq!(package.kind, RuleKind::PackageDeclaration);
    assert_eq!(package.rules(RuleKind::Annotation).count(), 1);
}

#[test]
fn test_module_declaration() {
    let tree = unit("import a.B; open module m.core { requires transitive java.base; exports a.b to c, d; uses a.S; provides a.S with a.Impl; }");
    let module = tree.rule(RuleKind::ModuleDeclaration).unwrap();
    assert!(module.has_word("open"));
    assert_eq!(
        child_kinds(module),
        vec![
            RuleKind::QualifiedName,
            RuleKind::RequiresDirective,
            RuleKind::ExportsDirective,
            RuleKind::UsesDirective,
            RuleKind::ProvidesDirective,
        ]
    );
    let requires = module.rule(RuleKind::RequiresDirective).unwrap();
    assert!(requires.has_word("transitive"));
}

#[test]
fn test_requires_modifiers_in_either_order() {
    for source in [
        "open module foo.bar { requires transitive static a.b; }",
        "open module foo.bar { requires static transitive a.b; }",
    ] {
        let tree = unit(source);
        let requires = tree.nth_rule(0).unwrap().rule(RuleKind::RequiresDirective).unwrap();
        assert!(requires.has_word("transitive"), "source: {}", source);
        assert!(requires.has_token(TokenKind::Static), "source: {}", source);
        let name = requires.rule(RuleKind::QualifiedName).unwrap();
        assert!(name.has_word("a") && name.has_word("b"), "source: {}", source);
    }
}

#[test]
fn test_module_requiring_module_named_transitive() {
    let tree = unit("module m { requires transitive; }");
    let requires = tree.nth_rule(0).unwrap().rule(RuleKind::RequiresDirective).unwrap();
    let name = requires.rule(RuleKind::QualifiedName).unwrap();
    assert!(name.has_word("transitive"));
}

// ============================================================================
// Declarations
// ============================================================================

#[test]
fn test_class_members() {
    let class = unit("public class A<T> extends B implements C, D { int x = 1, y[]; static { } { } A() {} <U> void f(U u) throws E {} abstract int g(); }");
    let member = class.nth_rule(0).unwrap();
    assert_eq!(member.nth_rule(0).unwrap().kind, RuleKind::Modifiers);
    let decl = member.nth_rule(1).unwrap();
    assert_eq!(decl.kind, RuleKind::ClassDeclaration);
    assert!(decl.has_token(TokenKind::Extends));
    let body = decl.rule(RuleKind::ClassBody).unwrap();
    let kinds: Vec<_> = body
        .child_rules()
        .map(|m| m.child_rules().last().map_or(m.kind, |inner| inner.kind))
        .collect();
    assert_eq!(
        kinds,
        vec![
            RuleKind::FieldDeclaration,
            RuleKind::Block,
            RuleKind::Block,
            RuleKind::ConstructorDeclaration,
            RuleKind::MethodDeclaration,
            RuleKind::MethodDeclaration,
        ]
    );
}

#[test]
fn test_sealed_and_non_sealed_modifiers() {
    let tree = decl("sealed interface S permits A, B {}");
    let modifiers = tree.rule(RuleKind::Modifiers).unwrap();
    assert!(modifiers.has_word("sealed"));
    let tree = decl("non-sealed class A extends S {}");
    assert!(tree.rule(RuleKind::Modifiers).unwrap().has_token(TokenKind::NonSealed));
}

#[test]
fn test_field_named_sealed() {
    let tree = decl("int sealed = 1;");
    assert!(tree.rule(RuleKind::Modifiers).is_none());
    assert_eq!(tree.nth_rule(0).unwrap().kind, RuleKind::FieldDeclaration);
}

#[test]
fn test_enum_declaration() {
    let tree = decl("enum Color implements I { RED, GREEN(1) { void f() {} }, ; int v; }");
    let body = tree.nth_rule(0).unwrap().rule(RuleKind::EnumBody).unwrap();
    assert_eq!(body.rules(RuleKind::EnumConstant).count(), 2);
    assert_eq!(body.rules(RuleKind::MemberDeclaration).count(), 1);
}

#[test]
fn test_record_declaration() {
    let tree = decl("record Point<T>(int x, T... rest) implements P { Point { } }");
    let record = tree.nth_rule(0).unwrap();
    assert_eq!(record.kind, RuleKind::RecordDeclaration);
    let header = record.rule(RuleKind::RecordHeader).unwrap();
    assert_eq!(header.rules(RuleKind::RecordComponent).count(), 2);
    let body = record.rule(RuleKind::ClassBody).unwrap();
    let compact = body.nth_rule(0).unwrap().nth_rule(0).unwrap();
    assert_eq!(compact.kind, RuleKind::CompactConstructorDeclaration);
}

#[test]
fn test_annotation_type_declaration() {
    let tree = decl("@interface Tag { String value() default \"x\"; int[] ids(); int LIMIT = 3; }");
    let body = tree.nth_rule(0).unwrap().rule(RuleKind::ClassBody).unwrap();
    let members: Vec<_> = body.child_rules().map(|m| m.nth_rule(0).unwrap().kind).collect();
    assert_eq!(
        members,
        vec![
            RuleKind::AnnotationMethodDeclaration,
            RuleKind::AnnotationMethodDeclaration,
            RuleKind::FieldDeclaration,
        ]
    );
}

#[test]
fn test_annotation_method_in_declaration_mode() {
    assert_eq!(decl("int value() default 1;").nth_rule(0).unwrap().kind, RuleKind::AnnotationMethodDeclaration);
    assert_eq!(decl("int value();").nth_rule(0).unwrap().kind, RuleKind::MethodDeclaration);
}

#[test]
fn test_formal_parameters() {
    let tree = decl("void f(Outer.Inner this, final int a, @A String... rest) {}");
    let params = tree.nth_rule(0).unwrap().rule(RuleKind::FormalParameters).unwrap();
    assert_eq!(
        child_kinds(params),
        vec![
            RuleKind::ReceiverParameter,
            RuleKind::FormalParameter,
            RuleKind::VariableArityParameter,
        ]
    );
}

#[test]
fn test_annotations_with_element_values() {
    let tree = decl("@SuppressWarnings({\"a\", \"b\"}) @Target(value = ElementType.TYPE, n = 1) class A {}");
    let modifiers = tree.rule(RuleKind::Modifiers).unwrap();
    let annotations: Vec<_> = modifiers.rules(RuleKind::Annotation).collect();
    assert_eq!(annotations.len(), 2);
    let array = annotations[0].rule(RuleKind::ElementValue).unwrap();
    assert_eq!(array.nth_rule(0).unwrap().kind, RuleKind::ElementValueArrayInitializer);
    assert_eq!(annotations[1].rules(RuleKind::ElementValuePair).count(), 2);
}

#[test]
fn test_package_and_import_in_declaration_mode() {
    assert_eq!(decl("package a.b;").kind, RuleKind::PackageDeclaration);
    assert_eq!(decl("import a.b.C;").kind, RuleKind::ImportDeclaration);
    assert_eq!(decl("module m {}").kind, RuleKind::ModuleDeclaration);
}

// ============================================================================
// Statements
// ============================================================================

#[test]
fn test_statement_kinds() {
    let cases = [
        (";", RuleKind::EmptyStatement),
        ("{ }", RuleKind::Block),
        ("int x = 1;", RuleKind::LocalVariableDeclarationStatement),
        ("final var x = y;", RuleKind::LocalVariableDeclarationStatement),
        ("List<String> xs;", RuleKind::LocalVariableDeclarationStatement),
        ("a.b.C d;", RuleKind::LocalVariableDeclarationStatement),
        ("x = 1;", RuleKind::ExpressionStatement),
        ("a.b();", RuleKind::ExpressionStatement),
        ("i++;", RuleKind::ExpressionStatement),
        ("a < b;", RuleKind::ExpressionStatement),
        ("label: x++;", RuleKind::LabeledStatement),
        ("if (a) b(); else c();", RuleKind::IfStatement),
        ("assert x : \"msg\";", RuleKind::AssertStatement),
        ("while (true) {}", RuleKind::WhileStatement),
        ("do x++; while (x < 3);", RuleKind::DoStatement),
        ("for (;;) {}", RuleKind::ForStatement),
        ("for (int i = 0, j = 1; i < j; i++, j--) {}", RuleKind::ForStatement),
        ("for (String s : list) {}", RuleKind::EnhancedForStatement),
        ("break;", RuleKind::BreakStatement),
        ("continue outer;", RuleKind::ContinueStatement),
        ("return;", RuleKind::ReturnStatement),
        ("throw e;", RuleKind::ThrowStatement),
        ("synchronized (lock) {}", RuleKind::SynchronizedStatement),
        ("try {} finally {}", RuleKind::TryStatement),
        ("try (var r = open(); other) {}", RuleKind::TryWithResourcesStatement),
        ("yield x;", RuleKind::YieldStatement),
        ("class Local {}", RuleKind::LocalTypeDeclaration),
        ("final record R(int a) {}", RuleKind::LocalTypeDeclaration),
        ("switch (x) { case 1: break; }", RuleKind::SwitchStatement),
    ];
    for (source, kind) in cases {
        assert_eq!(stmt(source).kind, kind, "source: {}", source);
    }
}

#[test]
fn test_yield_as_name() {
    assert_eq!(stmt("yield = 1;").kind, RuleKind::ExpressionStatement);
    assert_eq!(stmt("yield.x();").kind, RuleKind::ExpressionStatement);
}

#[test]
fn test_catch_clauses() {
    let tree = stmt("try { f(); } catch (final IOException | RuntimeException e) { } catch (Exception e) { } finally { }");
    assert_eq!(tree.rules(RuleKind::CatchClause).count(), 2);
    let first = tree.rule(RuleKind::CatchClause).unwrap();
    let types = first.rule(RuleKind::CatchType).unwrap();
    assert_eq!(types.rules(RuleKind::QualifiedName).count(), 2);
    assert!(tree.rule(RuleKind::Finally).is_some());
}

#[test]
fn test_switch_groups_and_rules() {
    let tree = stmt("switch (x) { case 1, 2: case 3: f(); break; default: }");
    let block = tree.rule(RuleKind::SwitchBlock).unwrap();
    let groups: Vec<_> = block.rules(RuleKind::SwitchGroup).collect();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].rules(RuleKind::SwitchLabel).count(), 2);
    assert_eq!(groups[0].child_rules().count(), 4);

    let tree = stmt("switch (o) { case String s when s.isEmpty() -> {} case Integer i -> f(i); default -> throw e; }");
    let rules: Vec<_> = tree.rule(RuleKind::SwitchBlock).unwrap().rules(RuleKind::SwitchRule).collect();
    assert_eq!(rules.len(), 3);
    let guarded = rules[0].rule(RuleKind::SwitchLabel).unwrap().nth_rule(0).unwrap();
    assert_eq!(guarded.kind, RuleKind::GuardedPattern);
    assert_eq!(rules[1].nth_rule(1).unwrap().kind, RuleKind::ExpressionStatement);
    assert_eq!(rules[2].nth_rule(1).unwrap().kind, RuleKind::ThrowStatement);
}

#[test]
fn test_case_constant_is_not_a_pattern() {
    let tree = stmt("switch (x) { case Color.RED -> f(); }");
    let label = tree
        .rule(RuleKind::SwitchBlock)
        .unwrap()
        .nth_rule(0)
        .unwrap()
        .rule(RuleKind::SwitchLabel)
        .unwrap()
        .clone();
    assert_eq!(label.nth_rule(0).unwrap().kind, RuleKind::MemberAccess);
}

// ============================================================================
// Expressions
// ============================================================================

#[test]
fn test_expression_outline() {
    assert_eq!(
        expr("a.b(c)").outline(),
        "MemberAccess\n  Name\n    a\n  .\n  MethodCall\n    b\n    Arguments\n      (\n      Name\n        c\n      )\n"
    );
}

#[test]
fn test_binary_layers_are_left_deep() {
    let tree = expr("a - b - c");
    assert_eq!(tree.kind, RuleKind::Additive);
    assert_eq!(tree.nth_rule(0).unwrap().kind, RuleKind::Additive);
    assert_eq!(tree.nth_rule(1).unwrap().kind, RuleKind::Name);

    let tree = expr("a || b && c | d ^ e & f == g < h << i + j * k");
    let mut kinds = Vec::new();
    let mut current = Some(&tree);
    while let Some(node) = current {
        kinds.push(node.kind);
        current = node.nth_rule(1);
    }
    assert_eq!(
        kinds,
        vec![
            RuleKind::ConditionalOr,
            RuleKind::ConditionalAnd,
            RuleKind::InclusiveOr,
            RuleKind::ExclusiveOr,
            RuleKind::And,
            RuleKind::Equality,
            RuleKind::Relational,
            RuleKind::Shift,
            RuleKind::Additive,
            RuleKind::Multiplicative,
            RuleKind::Name,
        ]
    );
}

#[test]
fn test_assignment_is_right_associative() {
    let tree = expr("a = b += c");
    assert_eq!(tree.kind, RuleKind::Assignment);
    assert_eq!(tree.nth_rule(1).unwrap().kind, RuleKind::Assignment);
}

#[test]
fn test_ternary_nests_in_else_branch() {
    let tree = expr("a ? b : c ? d : e");
    assert_eq!(tree.kind, RuleKind::Ternary);
    assert_eq!(tree.nth_rule(2).unwrap().kind, RuleKind::Ternary);
}

#[test]
fn test_shift_operators_from_adjacent_gt() {
    assert_eq!(expr("a >> 2").children[1].as_token().unwrap().text, ">>");
    assert_eq!(expr("a >>> 2").children[1].as_token().unwrap().text, ">>>");
    assert!(run("a > > 2", Parser::parse_expression_start).is_err());
}

#[test]
fn test_nested_generic_type_closes() {
    let tree = stmt("Map<String, List<Integer>> m = x >> y;");
    let decl = tree.nth_rule(0).unwrap();
    assert_eq!(decl.kind, RuleKind::LocalVariableDeclaration);
}

#[test]
fn test_instanceof() {
    let tree = expr("o instanceof String s && s.isEmpty()");
    assert_eq!(tree.kind, RuleKind::ConditionalAnd);
    let instance_of = tree.nth_rule(0).unwrap();
    assert_eq!(instance_of.kind, RuleKind::InstanceOf);
    assert_eq!(instance_of.nth_rule(1).unwrap().kind, RuleKind::Pattern);
    assert_eq!(expr("o instanceof List<?>").nth_rule(1).unwrap().kind, RuleKind::Type);
}

#[test]
fn test_casts() {
    assert_eq!(expr("(int) x").kind, RuleKind::Cast);
    assert_eq!(expr("(int) +x").kind, RuleKind::Cast);
    assert_eq!(expr("(Integer) +x").kind, RuleKind::Additive);
    assert_eq!(expr("(List<String>) o").kind, RuleKind::Cast);
    assert_eq!(expr("(A & B) o").kind, RuleKind::Cast);
    assert_eq!(expr("(x) + 1").kind, RuleKind::Additive);
    assert_eq!(expr("(x)").kind, RuleKind::Parenthesized);
}

#[test]
fn test_lambdas() {
    let tree = expr("x -> x + 1");
    assert_eq!(tree.kind, RuleKind::Lambda);
    let tree = expr("(a, b) -> { return a; }");
    assert_eq!(tree.nth_rule(1).unwrap().kind, RuleKind::Block);
    let tree = expr("(int a, final String b) -> a");
    let params = tree.nth_rule(0).unwrap();
    assert_eq!(params.nth_rule(0).unwrap().kind, RuleKind::FormalParameters);
    assert_eq!(expr("() -> 1").kind, RuleKind::Lambda);
}

#[test]
fn test_method_reference_targets() {
    let target = |source: &str| expr(source).nth_rule(0).unwrap().kind;
    assert_eq!(target("String::valueOf"), RuleKind::Name);
    assert_eq!(target("a.b::c"), RuleKind::MemberAccess);
    assert_eq!(target("ArrayList::new"), RuleKind::Type);
    assert_eq!(target("List<String>::size"), RuleKind::Type);
    assert_eq!(target("int[]::clone"), RuleKind::Type);
    assert_eq!(target("this::f"), RuleKind::This);
    assert_eq!(target("super::f"), RuleKind::Super);
}

#[test]
fn test_class_literals() {
    assert_eq!(expr("int.class").kind, RuleKind::ClassLiteral);
    assert_eq!(expr("String[].class").kind, RuleKind::ClassLiteral);
    assert_eq!(expr("java.lang.String.class").kind, RuleKind::ClassLiteral);
    assert_eq!(expr("void.class").kind, RuleKind::ClassLiteral);
}

#[test]
fn test_primaries() {
    assert_eq!(expr("this").kind, RuleKind::This);
    assert_eq!(expr("this(1)").kind, RuleKind::MethodCall);
    assert_eq!(expr("super(1)").kind, RuleKind::MethodCall);
    assert_eq!(expr("super.f(1)").kind, RuleKind::SuperAccess);
    assert_eq!(expr("super.<T>f()").kind, RuleKind::SuperAccess);
    assert_eq!(expr("<T>f()").kind, RuleKind::ExplicitGenericInvocation);
    assert_eq!(expr("a[0][1]").kind, RuleKind::ArrayAccess);
    assert_eq!(expr("x++").kind, RuleKind::Postfix);
    assert_eq!(expr("-~!x").kind, RuleKind::Prefix);
}

#[test]
fn test_qualified_this_and_super() {
    let tree = expr("Outer.this.x");
    assert_eq!(tree.kind, RuleKind::MemberAccess);
    assert_eq!(tree.nth_rule(0).unwrap().nth_rule(1).unwrap().kind, RuleKind::This);
    let tree = expr("Outer.super.f()");
    assert_eq!(tree.nth_rule(1).unwrap().kind, RuleKind::SuperAccess);
}

#[test]
fn test_creations() {
    assert_eq!(expr("new A<>(1)").kind, RuleKind::ObjectCreation);
    let anonymous = expr("new Runnable() { public void run() {} }");
    assert!(anonymous.rule(RuleKind::ClassBody).is_some());
    let array = expr("new int[3][]");
    assert_eq!(array.kind, RuleKind::ArrayCreation);
    assert_eq!(array.rules(RuleKind::DimExpr).count(), 1);
    assert_eq!(array.rules(RuleKind::Dim).count(), 1);
    let init = expr("new String[] { \"a\", \"b\", }");
    assert!(init.rule(RuleKind::ArrayInitializer).is_some());
    let inner = expr("outer.new <T> Inner<U>(1)");
    assert_eq!(inner.nth_rule(1).unwrap().kind, RuleKind::InnerCreation);
}

#[test]
fn test_switch_expression() {
    let tree = expr("switch (d) { case MONDAY, FRIDAY -> 6; default -> { yield 0; } }");
    assert_eq!(tree.kind, RuleKind::SwitchExpression);
}

#[test]
fn test_span_of_tree() {
    let tree = expr("foo(1,\n  bar)");
    let span = tree.span();
    assert_eq!(span.start(), (1, 0));
    assert_eq!(span.end(), (2, 6));
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_no_viable_alternative() {
    assert_eq!(
        error("int x = ;", Parser::parse_statement_start),
        "Line 1, Column 8: error: no viable alternative at input ';'"
    );
}

#[test]
fn test_extraneous_input() {
    assert_eq!(
        error("x + 1 )", Parser::parse_expression_start),
        "Line 1, Column 6: error: extraneous input ')' expecting <EOF>"
    );
}

#[test]
fn test_mismatched_input() {
    assert_eq!(
        error("class A {", Parser::parse_compilation_unit),
        "Line 1, Column 9: error: mismatched input '<EOF>' expecting '}'"
    );
    assert_eq!(
        error("return 1", Parser::parse_statement_start),
        "Line 1, Column 8: error: mismatched input '<EOF>' expecting ';'"
    );
}

#[test]
fn test_try_without_handlers() {
    assert!(error("try {}", Parser::parse_statement_start).contains("expecting {'catch', 'finally'}"));
}

#[test]
fn test_top_level_rejects_methods() {
    assert!(run("void f() {}", Parser::parse_compilation_unit).is_err());
    assert!(run("void f() {}", Parser::parse_declaration_start).is_ok());
}

#[test]
fn test_lambda_receiver_rejected() {
    assert_eq!(
        error("(A this) -> 1", Parser::parse_expression_start),
        "Line 1, Column 1: error: receiver parameter not allowed in lambda"
    );
}

#[test]
fn test_scanner_errors_surface() {
    let err = Parser::new("x = \"open").err().unwrap();
    assert_eq!(err.to_string(), "Line 1, Column 4: error: unterminated string literal");
}

#[test]
fn test_deep_nesting_fails_cleanly() {
    let source = format!("{}1{}", "(".repeat(500), ")".repeat(500));
    let err = run(&source, Parser::parse_expression_start).unwrap_err();
    assert!(err.message.starts_with("input nested deeper than"));

    let shallow = format!("{}1{}", "(".repeat(20), ")".repeat(20));
    assert!(run(&shallow, Parser::parse_expression_start).is_ok());
}
