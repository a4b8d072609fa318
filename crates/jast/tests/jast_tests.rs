//! End-to-end tests through the `parse` façade.
//!
//! Covers the round-trip properties, the concrete parse/unparse scenarios and
//! the visitor and transformer behaviour over a small example program.

use jast::transform::{walk, walk_decl, walk_expr, walk_stmt};
use jast::{
    parse, parse_many, transform, transform_keep, unparse, visit, Ast, AstError, BinOp, BinaryOperator, CatchClause,
    CompilationUnit, Constant, Decl, Error, Expr, Identifier, IfExp, ImportDeclaration, Literal, LiteralKind, Name,
    NodeRef, ParseMode, QualifiedName, Rewrite, Stmt, Transformer, Visitor,
};
use pretty_assertions::assert_eq;
use std::sync::Arc;

const EXAMPLE: &str = "public class Example {\n    public int add(int a, int b) {\n        return a + b;\n    }\n    public static void main(String[] args) {\n        System.out.println(add(27, 55));\n    }\n}";

/// Helper: parse a source that must be valid.
fn parsed(source: &str, mode: ParseMode) -> Ast {
    parse(source, mode).unwrap_or_else(|e| panic!("{}: {}", source, e))
}

/// Helper: the expression held by an `expr`-mode parse.
fn expr(source: &str) -> Arc<Expr> {
    parsed(source, ParseMode::Expr).as_expr().cloned().unwrap()
}

/// Helper: the members of the single top-level class of a unit.
fn class_members(ast: &Ast) -> &[Arc<Decl>] {
    let Some(CompilationUnit::Ordinary(unit)) = ast.as_compilation_unit() else {
        panic!("expected an ordinary compilation unit");
    };
    match &*unit.declarations[0] {
        Decl::Class(class) => &class.body,
        other => panic!("expected a class, got {:?}", other),
    }
}

fn name(id: &str) -> Expr {
    Name::new(id).into()
}

// ============================================================================
// Concrete scenarios
// ============================================================================

#[test]
fn test_add_operator() {
    let expected: Expr = BinOp::new(name("a"), BinaryOperator::Add, name("b")).into();
    assert_eq!(*expr("a + b"), expected);
    assert_eq!(unparse(&parsed("a + b", ParseMode::Expr), 4).unwrap(), "a + b");
}

#[test]
fn test_precedence_scenario() {
    let expected: Expr = BinOp::new(
        name("a"),
        BinaryOperator::Add,
        BinOp::new(name("b"), BinaryOperator::Mult, name("c")),
    )
    .into();
    assert_eq!(*expr("a + b * c"), expected);
    assert_eq!(unparse(&expected, 4).unwrap(), "a + b * c");

    let swapped: Expr = BinOp::new(
        BinOp::new(name("a"), BinaryOperator::Add, name("b")),
        BinaryOperator::Mult,
        name("c"),
    )
    .into();
    assert_eq!(unparse(&swapped, 4).unwrap(), "(a + b) * c");
}

#[test]
fn test_right_associative_ternary() {
    let expected: Expr = IfExp::new(name("x"), name("y"), IfExp::new(name("z"), name("u"), name("v"))).into();
    assert_eq!(*expr("x ? y : z ? u : v"), expected);
    assert_eq!(unparse(&expected, 4).unwrap(), "x ? y : z ? u : v");
}

#[test]
fn test_long_literal() {
    let expected: Expr = Constant::new(Literal::long(42)).into();
    assert_eq!(*expr("42L"), expected);
    assert_eq!(unparse(&expected, 4).unwrap(), "42l");
}

#[test]
fn test_hex_float() {
    let Expr::Constant(constant) = &*expr("0x1.91eb851eb851fp+1") else {
        panic!("expected a constant");
    };
    match constant.literal.kind {
        LiteralKind::Float { value, double } => {
            assert!((value - 3.14).abs() < 1e-9, "{}", value);
            assert!(!double);
        }
        ref other => panic!("expected a float, got {:?}", other),
    }
}

#[test]
fn test_syntax_error_position() {
    let err = parse("class A { int x = ; }", ParseMode::Unit).unwrap_err();
    let Error::Parse(err) = err else {
        panic!("expected a parse error, got {:?}", err);
    };
    assert_eq!((err.line, err.column), (1, 18));
    assert!(err.to_string().starts_with("Line 1, Column 18: error: "), "{}", err);
}

#[test]
fn test_long_chains_parse_or_fail_cleanly() {
    let sum = |terms: usize| vec!["x"; terms].join(" + ");
    let printed = unparse(&parsed(&sum(80), ParseMode::Expr), 4).unwrap();
    assert_eq!(printed, sum(80));
    let calls = format!("b{}", ".m()".repeat(150));
    assert_eq!(unparse(&parsed(&calls, ParseMode::Expr), 4).unwrap(), calls);

    for source in [sum(5000), format!("b{}", ".m()".repeat(5000))] {
        let err = parse(&source, ParseMode::Expr).unwrap_err();
        let Error::Parse(err) = err else {
            panic!("expected a parse error, got {:?}", err);
        };
        assert!(err.message.contains("nested deeper than"), "{}", err.message);
    }
}

#[test]
fn test_modes_reject_other_constructs() {
    assert!(parse("class A {}", ParseMode::Expr).is_err());
    assert!(parse("a + b", ParseMode::Unit).is_err());
    assert!(parse("return; return;", ParseMode::Stmt).is_err());
}

// ============================================================================
// Properties
// ============================================================================

const UNITS: &[&str] = &[
    EXAMPLE,
    "package a; import b.*; @A(1) interface I<T extends Number & Comparable<T>> { default void f() throws E {} }",
    "module m.n { requires static a; exports b to c; opens d; uses e; provides f with g, h; }",
    "enum E { A { void f() {} }, B(2); E() {} E(int x) {} }",
    "record R<T>(@A T first, int... rest) { R { if (rest == null) throw new NullPointerException(); } }",
    "class C { int[] a = {1, 2}, b[]; void f(C this) { label: while (true) { break label; } } }",
    "sealed interface S permits X, Y {} final class X implements S {} non-sealed class Y implements S {}",
];

const STATEMENTS: &[&str] = &[
    "if (a) if (b) x(); else y();",
    "switch (o) { case Integer i when i > 0 -> f(); case String s -> { g(); } default -> {} }",
    "switch (x) { case 1, 2: a(); default: }",
    "for (var e : map.entrySet()) total += e.getValue() * (1 - rate);",
    "try (InputStream in = open(); var out = sink()) { copy(in, out); } catch (IOException e) { log(e); }",
    "do { i--; } while (i > 0 && !done);",
    "class Local { int x; }",
    "String s = \"\"\"\n    one\n      two\n    \"\"\";",
];

const EXPRESSIONS: &[&str] = &[
    "a = b ? c : d",
    "(a ? b : c) + d",
    "-(-a) - (-b) - -(--c)",
    "(String) obj instanceof String s ? s : (Object) (-1)",
    "list.stream().map(x -> x * 2).filter(Objects::nonNull).toArray(int[]::new)",
    "new Outer().new Inner<>(1) {}",
    "this.<T>cast(value)",
    "0x7fffffffffffffffL + 0b1010 + 017 + 1e10 + 2.5f + 'x'",
];

#[test]
fn test_round_trip() {
    let cases = UNITS
        .iter()
        .map(|s| (*s, ParseMode::Unit))
        .chain(STATEMENTS.iter().map(|s| (*s, ParseMode::Stmt)))
        .chain(EXPRESSIONS.iter().map(|s| (*s, ParseMode::Expr)));
    for (source, mode) in cases {
        let tree = parsed(source, mode);
        for indent in [0, 4] {
            let printed = unparse(&tree, indent).unwrap();
            let reparsed = parse(&printed, mode).unwrap_or_else(|e| panic!("{}\n{}", printed, e));
            assert_eq!(tree, reparsed, "{}", printed);
            assert_eq!(unparse(&reparsed, indent).unwrap(), printed);
        }
    }
}

#[test]
fn test_example_prints_as_written() {
    assert_eq!(unparse(&parsed(EXAMPLE, ParseMode::Unit), 4).unwrap(), EXAMPLE);
}

#[test]
fn test_canonical_child_order() {
    let ast = parsed(EXAMPLE, ParseMode::Unit);
    let members = class_members(&ast);
    let add = NodeRef::from(&*members[0]);
    assert_eq!(add.kind_name(), "MethodDeclaration");
    assert_eq!(add.field_names(), vec!["modifiers", "return_type", "id", "params", "body"]);
}

#[test]
fn test_spans_recorded() {
    let ast = parsed(EXAMPLE, ParseMode::Unit);
    let members = class_members(&ast);
    let span = NodeRef::from(&*members[1]).span().unwrap();
    assert_eq!((span.start_line, span.start_col), (5, 4));
    assert_eq!((span.end_line, span.end_col), (7, 5));
}

#[test]
fn test_parse_many() {
    let results = parse_many(UNITS, ParseMode::Unit);
    assert_eq!(results.len(), UNITS.len());
    for (source, result) in UNITS.iter().zip(&results) {
        assert_eq!(result.as_ref().unwrap(), &parsed(source, ParseMode::Unit));
    }
}

// ============================================================================
// Visitors and transformers
// ============================================================================

struct Identifiers;

impl<'a> Visitor<'a> for Identifiers {
    type Output = Vec<String>;

    fn default_result(&mut self) -> Vec<String> {
        Vec::new()
    }

    fn aggregate_result(&mut self, mut aggregate: Vec<String>, next: Vec<String>) -> Vec<String> {
        aggregate.extend(next);
        aggregate
    }

    fn visit_identifier(&mut self, node: &'a Identifier) -> Vec<String> {
        vec![node.name.clone()]
    }
}

#[test]
fn test_identifier_visitor_order() {
    let ast = parsed(EXAMPLE, ParseMode::Unit);
    let identifiers = visit(&ast, &mut Identifiers);
    assert_eq!(
        identifiers,
        vec![
            "Example", "add", "a", "b", "a", "b", "main", "String", "args", "System", "out", "println", "add",
        ]
    );
}

struct AddToSub;

impl Transformer for AddToSub {
    fn transform_expr(&mut self, expr: &Arc<Expr>) -> Result<Rewrite<Expr>, AstError> {
        if let Expr::BinOp(bin) = &**expr {
            if bin.op == BinaryOperator::Add {
                let mut bin = bin.clone();
                bin.op = BinaryOperator::Sub;
                return Ok(Rewrite::replace(bin));
            }
        }
        walk_expr(self, expr)
    }
}

#[test]
fn test_change_add_in_place() {
    let mut ast = parsed(EXAMPLE, ParseMode::Unit);
    transform(&mut ast, &mut AddToSub).unwrap();
    assert_eq!(unparse(&ast, 4).unwrap(), EXAMPLE.replace("a + b", "a - b"));
}

#[test]
fn test_change_add_keep() {
    let ast = parsed(EXAMPLE, ParseMode::Unit);
    let changed = transform_keep(&ast, &mut AddToSub).unwrap();
    assert_eq!(unparse(&changed, 4).unwrap(), EXAMPLE.replace("a + b", "a - b"));
    assert_eq!(unparse(&ast, 4).unwrap(), EXAMPLE);
    assert!(Arc::ptr_eq(&class_members(&ast)[1], &class_members(&changed)[1]));
}

struct DeleteReturns;

impl Transformer for DeleteReturns {
    fn transform_stmt(&mut self, stmt: &Arc<Stmt>) -> Result<Rewrite<Stmt>, AstError> {
        match &**stmt {
            Stmt::Return(_) => Ok(Rewrite::Delete),
            _ => walk_stmt(self, stmt),
        }
    }
}

const WITHOUT_RETURN: &str = "public class Example {\n    public int add(int a, int b) {}\n    public static void main(String[] args) {\n        System.out.println(add(27, 55));\n    }\n}";

#[test]
fn test_delete_return_in_place() {
    let mut ast = parsed(EXAMPLE, ParseMode::Unit);
    transform(&mut ast, &mut DeleteReturns).unwrap();
    assert_eq!(unparse(&ast, 4).unwrap(), WITHOUT_RETURN);
}

#[test]
fn test_delete_return_keep() {
    let ast = parsed(EXAMPLE, ParseMode::Unit);
    let changed = transform_keep(&ast, &mut DeleteReturns).unwrap();
    assert_eq!(unparse(&changed, 4).unwrap(), WITHOUT_RETURN);
    assert_eq!(unparse(&ast, 4).unwrap(), EXAMPLE);
}

/// Moves `add` after `main` by deleting it and splicing it back in.
#[derive(Default)]
struct MoveAddLast {
    add: Option<Arc<Decl>>,
}

impl Transformer for MoveAddLast {
    fn transform_decl(&mut self, decl: &Arc<Decl>) -> Result<Rewrite<Decl>, AstError> {
        match &**decl {
            Decl::Method(method) if method.id.as_str() == "add" => {
                self.add = Some(decl.clone());
                Ok(Rewrite::Delete)
            }
            Decl::Method(method) if method.id.as_str() == "main" => {
                let mut spliced = vec![decl.clone()];
                spliced.extend(self.add.take());
                Ok(Rewrite::Splice(spliced))
            }
            _ => walk_decl(self, decl),
        }
    }
}

const ADD_LAST: &str = "public class Example {\n    public static void main(String[] args) {\n        System.out.println(add(27, 55));\n    }\n    public int add(int a, int b) {\n        return a + b;\n    }\n}";

#[test]
fn test_delete_and_splice() {
    let mut ast = parsed(EXAMPLE, ParseMode::Unit);
    transform(&mut ast, &mut MoveAddLast::default()).unwrap();
    assert_eq!(unparse(&ast, 4).unwrap(), ADD_LAST);
}

#[test]
fn test_delete_and_splice_keep() {
    let ast = parsed(EXAMPLE, ParseMode::Unit);
    let changed = transform_keep(&ast, &mut MoveAddLast::default()).unwrap();
    assert_eq!(unparse(&changed, 4).unwrap(), ADD_LAST);
    assert_eq!(unparse(&ast, 4).unwrap(), EXAMPLE);
}

#[test]
fn test_splice_into_single_field_fails() {
    struct Duplicate;

    impl Transformer for Duplicate {
        fn transform_expr(&mut self, expr: &Arc<Expr>) -> Result<Rewrite<Expr>, AstError> {
            match &**expr {
                Expr::Name(_) => Ok(Rewrite::Splice(vec![expr.clone(), expr.clone()])),
                _ => walk_expr(self, expr),
            }
        }
    }

    let ast = parsed("a + 1", ParseMode::Expr);
    let err = transform_keep(&ast, &mut Duplicate).unwrap_err();
    assert_eq!(err.node_kind, "BinOp");
    assert_eq!(err.field, "left");
}

const WITH_CATCHES: &str = "import java.io.*;\nimport java.util.List;\n\nclass Io {\n    void run() {\n        try {\n            read();\n        } catch (IOException e) {\n            log(e);\n        } catch (RuntimeException e) {\n            throw e;\n        }\n    }\n}";

/// Drops every `IOException` handler and expands `java.io.*` into two imports.
struct Tidy;

impl Transformer for Tidy {
    fn transform_catch_clause(&mut self, node: &CatchClause) -> Result<Rewrite<CatchClause>, AstError> {
        if node.exceptions.iter().any(|e| e.to_string() == "IOException") {
            return Ok(Rewrite::Delete);
        }
        walk(self, node)
    }

    fn transform_import_declaration(
        &mut self,
        node: &ImportDeclaration,
    ) -> Result<Rewrite<ImportDeclaration>, AstError> {
        if !node.on_demand {
            return Ok(Rewrite::Keep);
        }
        let mut imports = Vec::new();
        for class in ["File", "Reader"] {
            let name = QualifiedName::parse_dotted(&format!("{}.{}", node.name, class))?;
            imports.push(Arc::new(ImportDeclaration::new(name, node.static_, false)));
        }
        Ok(Rewrite::Splice(imports))
    }
}

#[test]
fn test_delete_catch_and_splice_imports() {
    let ast = parsed(WITH_CATCHES, ParseMode::Unit);
    let changed = transform_keep(&ast, &mut Tidy).unwrap();
    let expected = parsed(
        "import java.io.File;\nimport java.io.Reader;\nimport java.util.List;\n\nclass Io {\n    void run() {\n        try {\n            read();\n        } catch (RuntimeException e) {\n            throw e;\n        }\n    }\n}",
        ParseMode::Unit,
    );
    assert_eq!(unparse(&changed, 4).unwrap(), unparse(&expected, 4).unwrap());
    assert_eq!(unparse(&ast, 4).unwrap(), unparse(&parsed(WITH_CATCHES, ParseMode::Unit), 4).unwrap());
}
