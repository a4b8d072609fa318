//! Printer integration tests.
//!
//! Parses Java source, converts it and prints it back, checking the exact
//! text layout and that printing never changes what the source means.

use jast_ast::{
    Ast, BinOp, BinaryOperator, Block, Call, ExpressionStmt, Expr, Identifier, If, Name, Stmt, SwitchExp,
    SwitchExprRule, Type, TypeKind, UnaryOp, UnaryOperator, WildcardBound,
};
use jast_converter::convert;
use jast_diagnostics::ParseError;
use jast_parser::{ParseTree, Parser};
use jast_printer::{unparse, unparse_with, PrinterOptions};
use pretty_assertions::assert_eq;
use std::sync::Arc;

type StartRule = fn(&mut Parser) -> Result<ParseTree, ParseError>;

/// Helper: parse and convert `source` with the given start rule.
fn ast(source: &str, rule: StartRule) -> Ast {
    let mut parser = Parser::new(source).unwrap_or_else(|e| panic!("{}: {}", source, e));
    let tree = rule(&mut parser).unwrap_or_else(|e| panic!("{}: {}", source, e));
    convert(&tree).unwrap_or_else(|e| panic!("{}: {}", source, e))
}

/// Helper: parse `source` and print it back at the given indent.
fn reprint(source: &str, rule: StartRule, indent: usize) -> String {
    unparse(&ast(source, rule), indent).unwrap_or_else(|e| panic!("{}: {}", source, e))
}

fn expr(source: &str) -> String {
    reprint(source, Parser::parse_expression_start, 4)
}

fn stmt(source: &str) -> String {
    reprint(source, Parser::parse_statement_start, 4)
}

fn decl(source: &str) -> String {
    reprint(source, Parser::parse_declaration_start, 4)
}

fn unit(source: &str) -> String {
    reprint(source, Parser::parse_compilation_unit, 4)
}

/// Helper: printing then reparsing yields the same tree, in both layouts.
fn assert_round_trip(source: &str, rule: StartRule) {
    let original = ast(source, rule);
    for indent in [0, 2, 4] {
        let printed = unparse(&original, indent).unwrap();
        let reparsed = ast(&printed, rule);
        assert_eq!(original, reparsed, "round trip through:\n{}", printed);
        assert_eq!(printed, unparse(&reparsed, indent).unwrap(), "printing is not idempotent");
    }
}

fn name(id: &str) -> Expr {
    Name::new(id).into()
}

fn call_stmt(func: &str) -> Stmt {
    ExpressionStmt::new(Call::new(name(func), Vec::<Expr>::new())).into()
}

// ============================================================================
// Precedence
// ============================================================================

#[test]
fn test_no_redundant_parentheses() {
    assert_eq!(expr("a + b * c"), "a + b * c");
    assert_eq!(expr("(a + (b * c))"), "a + b * c");
    assert_eq!(expr("(a - b) - c"), "a - b - c");
    assert_eq!(expr("((x))"), "x");
}

#[test]
fn test_required_parentheses_kept() {
    assert_eq!(expr("(a + b) * c"), "(a + b) * c");
    assert_eq!(expr("a - (b - c)"), "a - (b - c)");
    assert_eq!(expr("!(a && b)"), "!(a && b)");
    assert_eq!(expr("(a + b).toString()"), "(a + b).toString()");
    assert_eq!(expr("(a = b) + 1"), "(a = b) + 1");
}

#[test]
fn test_hand_built_operands_parenthesized() {
    let sum = BinOp::new(name("a"), BinaryOperator::Add, name("b"));
    let product: Expr = BinOp::new(sum, BinaryOperator::Mult, name("c")).into();
    assert_eq!(unparse(&product, 4).unwrap(), "(a + b) * c");
}

#[test]
fn test_parentheses_follow_precedence_table() {
    let ops = [
        BinaryOperator::Or,
        BinaryOperator::And,
        BinaryOperator::BitOr,
        BinaryOperator::BitXor,
        BinaryOperator::BitAnd,
        BinaryOperator::Eq,
        BinaryOperator::Lt,
        BinaryOperator::LShift,
        BinaryOperator::Add,
        BinaryOperator::Mult,
    ];
    for outer in ops {
        for inner in ops {
            let outer_level = jast_ast::precedence::binary_precedence(outer);
            let inner_level = jast_ast::precedence::binary_precedence(inner);
            let nested = || BinOp::new(name("a"), inner, name("b"));

            let left: Expr = BinOp::new(nested(), outer, name("c")).into();
            let printed = unparse(&left, 0).unwrap();
            assert_eq!(printed.starts_with('('), inner_level < outer_level, "{}", printed);

            let right: Expr = BinOp::new(name("c"), outer, nested()).into();
            let printed = unparse(&right, 0).unwrap();
            assert_eq!(printed.ends_with(')'), inner_level <= outer_level, "{}", printed);
        }
    }
}

#[test]
fn test_long_chains_round_trip() {
    let sum = vec!["x"; 150].join(" + ");
    assert_eq!(expr(&sum), sum);
    let mixed = "a * b + c - (d - e) << f >> g == h";
    assert_eq!(expr(mixed), mixed);
    let calls = format!("b{}[0].c", ".m()".repeat(150));
    assert_eq!(expr(&calls), calls);
    assert_round_trip(&sum, Parser::parse_expression_start);
    assert_round_trip(&calls, Parser::parse_expression_start);
}

#[test]
fn test_deep_hand_built_trees_print() {
    let mut left = name("x");
    let mut right = name("x");
    let mut calls = name("b");
    for _ in 0..1000 {
        left = BinOp::new(left, BinaryOperator::Add, name("x")).into();
        right = BinOp::new(name("x"), BinaryOperator::Sub, right).into();
        calls = Call::new(calls, Vec::<Expr>::new()).into();
    }
    let printed = unparse(&left, 0).unwrap();
    assert_eq!(printed, vec!["x"; 1001].join(" + "));
    let printed = unparse(&right, 0).unwrap();
    assert!(printed.starts_with("x - (x - (x"));
    assert!(printed.ends_with(&")".repeat(999)));
    assert_eq!(unparse(&calls, 0).unwrap(), format!("b{}", "()".repeat(1000)));
}

#[test]
fn test_ternary_associativity() {
    assert_eq!(expr("x ? y : z ? u : v"), "x ? y : z ? u : v");
    assert_eq!(expr("(x ? y : z) ? u : v"), "(x ? y : z) ? u : v");
}

#[test]
fn test_assignment_associativity() {
    assert_eq!(expr("a = b = c"), "a = b = c");
    assert_eq!(expr("a += 1"), "a += 1");
    assert_eq!(expr("a <<= b | c"), "a <<= b | c");
}

#[test]
fn test_lambdas() {
    assert_eq!(expr("x -> y -> x + y"), "x -> y -> x + y");
    assert_eq!(expr("(a, b) -> a"), "(a, b) -> a");
    assert_eq!(expr("(int a) -> { return a; }"), "(int a) -> {\n    return a;\n}");
}

#[test]
fn test_instanceof_pattern() {
    assert_eq!(expr("a instanceof String s && s.isEmpty()"), "a instanceof String s && s.isEmpty()");
    assert_eq!(expr("(a + b) instanceof Integer"), "a + b instanceof Integer");
    assert_eq!(expr("(a ? b : c) instanceof Integer"), "(a ? b : c) instanceof Integer");
}

// ============================================================================
// Literals and unary operators
// ============================================================================

#[test]
fn test_literal_forms() {
    assert_eq!(expr("42L"), "42l");
    assert_eq!(expr("0x1F"), "31");
    assert_eq!(expr("1_000"), "1000");
    assert_eq!(expr("'a'"), "'a'");
    assert_eq!(expr("\"a\\tb\""), "\"a\\tb\"");
    assert_eq!(expr("null"), "null");
    assert_eq!(expr("true"), "true");
}

#[test]
fn test_integer_limits_stay_legal() {
    assert_eq!(stmt("int m = 0x80000000;"), "int m = 0x80000000;");
    assert_eq!(stmt("long m = 0x8000000000000000L;"), "long m = 0x8000000000000000l;");
    assert_eq!(expr("-2147483648"), "-2147483648");
    assert_eq!(expr("-9223372036854775808L"), "-9223372036854775808l");
    assert_eq!(expr("2147483647"), "2147483647");
    assert_eq!(expr("-0x80000000"), "-2147483648");
    assert_round_trip("int m = 0x80000000;", Parser::parse_statement_start);
    assert_round_trip("long m = -9223372036854775808L;", Parser::parse_statement_start);
}

#[test]
fn test_text_block_layout() {
    let source = "\"\"\"\n    hello\n      world\n    \"\"\"";
    assert_eq!(expr(source), source);
    assert_eq!(
        reprint(source, Parser::parse_expression_start, 0),
        "\"\"\"\nhello\n  world\n\"\"\""
    );
}

#[test]
fn test_same_sign_unary_spacing() {
    assert_eq!(expr("-(-x)"), "- -x");
    assert_eq!(expr("- -x"), "- -x");
    assert_eq!(expr("+(++x)"), "+ ++x");
    assert_eq!(expr("-(+x)"), "-+x");
    assert_eq!(expr("!!x"), "!!x");

    let nested: Expr = UnaryOp::new(UnaryOperator::PreDec, UnaryOp::new(UnaryOperator::USub, name("x"))).into();
    assert_eq!(unparse(&nested, 4).unwrap(), "-- -x");
}

#[test]
fn test_postfix_and_prefix() {
    assert_eq!(expr("x++ + ++y"), "x++ + ++y");
    assert_eq!(expr("(-x)++"), "(-x)++");
}

#[test]
fn test_casts() {
    assert_eq!(expr("(int) -x"), "(int) -x");
    assert_eq!(expr("(Integer) (-x)"), "(Integer) (-x)");
    assert_eq!(expr("(Integer) x"), "(Integer) x");
    assert_eq!(expr("(Runnable) () -> {}"), "(Runnable) () -> {}");
    assert_eq!(expr("(Runnable & Serializable) () -> {}"), "(Runnable & Serializable) () -> {}");
    assert_eq!(expr("((int) x).y"), "((int) x).y");
    assert_eq!(expr("(int) (a + b)"), "(int) (a + b)");
}

// ============================================================================
// Creation and access
// ============================================================================

#[test]
fn test_creation_expressions() {
    assert_eq!(expr("new int[] {1, 2}"), "new int[] {1, 2}");
    assert_eq!(expr("new int[3][]"), "new int[3][]");
    assert_eq!(expr("new ArrayList<>()"), "new ArrayList<>()");
    assert_eq!(expr("new <T> Foo<T>(a, b)"), "new <T> Foo<T>(a, b)");
    assert_eq!(expr("outer.new Inner()"), "outer.new Inner()");
    assert_eq!(expr("new Object() {}"), "new Object() {}");
}

#[test]
fn test_access_expressions() {
    assert_eq!(expr("a.b.c(d)[e]"), "a.b.c(d)[e]");
    assert_eq!(expr("String::valueOf"), "String::valueOf");
    assert_eq!(expr("ArrayList::new"), "ArrayList::new");
    assert_eq!(expr("int[].class"), "int[].class");
    assert_eq!(expr("super.foo()"), "super.foo()");
    assert_eq!(expr("Outer.this"), "Outer.this");
}

// ============================================================================
// Statements
// ============================================================================

#[test]
fn test_if_layouts() {
    assert_eq!(reprint("if (true) ; else ;", Parser::parse_statement_start, 0), "if (true) ; else ;");
    assert_eq!(stmt("if (true) ; else ;"), "if (true)\n    ;\nelse\n    ;");
    assert_eq!(
        stmt("if (true) { ; } else { ; }"),
        "if (true) {\n    ;\n} else {\n    ;\n}"
    );
    assert_eq!(
        stmt("if (a) x(); else if (b) y(); else z();"),
        "if (a)\n    x();\nelse if (b)\n    y();\nelse\n    z();"
    );
}

#[test]
fn test_dangling_else_is_braced() {
    let inner = If::new(name("b"), call_stmt("x"));
    let outer: Stmt = If::new(name("a"), inner).with_orelse(call_stmt("y")).into();
    let printed = unparse(&outer, 4).unwrap();
    assert_eq!(printed, "if (a) {\n    if (b)\n        x();\n} else\n    y();");

    let reparsed = ast(&printed, Parser::parse_statement_start);
    assert_eq!(unparse(&reparsed, 4).unwrap(), printed);
}

#[test]
fn test_loop_layouts() {
    assert_eq!(stmt("while (true) ;"), "while (true)\n    ;");
    assert_eq!(stmt("do ; while (true);"), "do\n    ;\nwhile (true);");
    assert_eq!(stmt("do { x(); } while (c);"), "do {\n    x();\n}\nwhile (c);");
    assert_eq!(
        stmt("for (int foo = 42; foo > 0; foo--) ;"),
        "for (int foo = 42; foo > 0; foo--)\n    ;"
    );
    assert_eq!(
        stmt("for (x = 0, y = 0; x < 10; x++, y++) ;"),
        "for (x = 0, y = 0; x < 10; x++, y++)\n    ;"
    );
    assert_eq!(stmt("for (;;) {}"), "for (;;) {}");
    assert_eq!(stmt("for (final int foo : bar) ;"), "for (final int foo : bar)\n    ;");
}

#[test]
fn test_simple_statements() {
    assert_eq!(stmt("foo: ;"), "foo:\n;");
    assert_eq!(stmt("synchronized (42) {}"), "synchronized (42) {}");
    assert_eq!(stmt("assert x > 0 : \"neg\";"), "assert x > 0 : \"neg\";");
    assert_eq!(stmt("return;"), "return;");
    assert_eq!(stmt("break outer;"), "break outer;");
    assert_eq!(stmt("continue;"), "continue;");
    assert_eq!(stmt("throw e;"), "throw e;");
    assert_eq!(stmt("final int foo = 42, bar;"), "final int foo = 42, bar;");
    assert_eq!(stmt("{ a(); b(); }"), "{\n    a();\n    b();\n}");
    assert_eq!(stmt("{}"), "{}");
}

#[test]
fn test_try_statements() {
    assert_eq!(
        stmt("try {} catch (final foo bar) {} finally {}"),
        "try {} catch (final foo bar) {} finally {}"
    );
    assert_eq!(
        stmt("try { a(); } catch (A | B e) { b(); }"),
        "try {\n    a();\n} catch (A | B e) {\n    b();\n}"
    );
    assert_eq!(
        stmt("try (var in = open(); out) { use(in); }"),
        "try (var in = open(); out) {\n    use(in);\n}"
    );
}

#[test]
fn test_switch_groups() {
    assert_eq!(
        stmt("switch (foo) { case 42: case 24: ; case 42: }"),
        "switch (foo) {\n    case 42:\n    case 24:\n        ;\n    case 42:\n}"
    );
    assert_eq!(
        stmt("switch (x) { case 1: a(); break; default: b(); }"),
        "switch (x) {\n    case 1:\n        a();\n        break;\n    default:\n        b();\n}"
    );
    assert_eq!(stmt("switch (x) {}"), "switch (x) {}");
}

#[test]
fn test_switch_rules() {
    assert_eq!(
        stmt("switch (x) { case 1 -> f(); default -> { g(); } }"),
        "switch (x) {\n    case 1 -> f();\n    default -> {\n        g();\n    }\n}"
    );
    assert_eq!(
        expr("switch (x) { case 1: yield 2; default: yield 3; }"),
        "switch (x) {\n    case 1:\n        yield 2;\n    default:\n        yield 3;\n}"
    );
    assert_eq!(
        expr("switch (x) { case 1, 2 -> 0; default -> 1; }"),
        "switch (x) {\n    case 1, 2 -> 0;\n    default -> 1;\n}"
    );
}

#[test]
fn test_guards_print_with_when() {
    let expected = "switch (o) {\n    case String s when s.isEmpty() && x -> 0;\n    default -> 1;\n}";
    assert_eq!(expr("switch (o) { case String s when s.isEmpty() && x -> 0; default -> 1; }"), expected);
    assert_eq!(expr("switch (o) { case String s && s.isEmpty() && x -> 0; default -> 1; }"), expected);
}

#[test]
fn test_arrow_rule_needs_single_statement() {
    let rule = SwitchExprRule::default_case(true, vec![call_stmt("a").into(), call_stmt("b").into()]);
    let switch: Expr = SwitchExp::new(name("x"), vec![rule]).into();
    let err = unparse(&switch, 4).unwrap_err();
    assert_eq!(err.node_kind, "SwitchExprRule");
}

// ============================================================================
// Declarations
// ============================================================================

#[test]
fn test_class_layout() {
    assert_eq!(
        decl("public class A<T> extends B implements C, D { int x = 1; A() {} }"),
        "public class A<T> extends B implements C, D {\n    int x = 1;\n    A() {}\n}"
    );
    assert_eq!(decl("class A {}"), "class A {}");
    assert_eq!(
        decl("class A { class B { void f() {} } }"),
        "class A {\n    class B {\n        void f() {}\n    }\n}"
    );
}

#[test]
fn test_method_layouts() {
    assert_eq!(
        decl("public <T> @foo int bar(int baz, int qux)[] throws quux {}"),
        "public <T> @foo int bar(int baz, int qux)[] throws quux {}"
    );
    assert_eq!(decl("int bar();"), "int bar();");
    assert_eq!(decl("public <T> bar(int baz) throws quux {}"), "public <T> bar(int baz) throws quux {}");
    assert_eq!(decl("void f(String... args) {}"), "void f(String... args) {}");
    assert_eq!(decl("void f(A this, int x) {}"), "void f(A this, int x) {}");
    assert_eq!(
        decl("@Deprecated(since = \"9\", forRemoval = true) void f() {}"),
        "@Deprecated(since = \"9\", forRemoval = true) void f() {}"
    );
    assert_eq!(decl("static { x = 1; }"), "static {\n    x = 1;\n}");
}

#[test]
fn test_record_and_interface_layouts() {
    assert_eq!(
        decl("public record foo<T>(int bar, int baz) implements qux { foo {} }"),
        "public record foo<T>(int bar, int baz) implements qux {\n    foo {}\n}"
    );
    assert_eq!(
        decl("public interface foo<T> extends bar { int baz(); }"),
        "public interface foo<T> extends bar {\n    int baz();\n}"
    );
    assert_eq!(
        decl("public @interface foo { int bar() default 42; }"),
        "public @interface foo {\n    int bar() default 42;\n}"
    );
}

#[test]
fn test_enum_layouts() {
    assert_eq!(
        decl("public enum foo implements bar { A, B; int qux() {} }"),
        "public enum foo implements bar {\n    A,\n    B;\n    int qux() {}\n}"
    );
    assert_eq!(decl("enum foo { A, B }"), "enum foo {\n    A,\n    B\n}");
    assert_eq!(decl("enum foo { ; int qux() {} }"), "enum foo {\n    ;\n    int qux() {}\n}");
    assert_eq!(decl("enum foo {}"), "enum foo {}");
    assert_eq!(decl("enum foo { A(1) { } }"), "enum foo {\n    A(1) {}\n}");
}

#[test]
fn test_compilation_unit_layout() {
    let source = "package a.b; import java.util.*; import static x.Y.z; class A {} class B {}";
    assert_eq!(
        unit(source),
        "package a.b;\n\nimport java.util.*;\nimport static x.Y.z;\n\nclass A {}\n\nclass B {}"
    );
    assert_eq!(
        reprint(source, Parser::parse_compilation_unit, 0),
        "package a.b; import java.util.*; import static x.Y.z; class A {} class B {}"
    );
    assert_eq!(unit(""), "");
}

#[test]
fn test_module_layout() {
    assert_eq!(
        unit("open module foo.bar { requires transitive static a.b; exports c to d, e; uses baz; provides x with y, z; }"),
        "open module foo.bar {\n    requires transitive static a.b;\n    exports c to d, e;\n    uses baz;\n    provides x with y, z;\n}"
    );
    assert_eq!(unit("module m {}"), "module m {}");
}

// ============================================================================
// Standalone nodes and options
// ============================================================================

#[test]
fn test_non_root_nodes() {
    assert_eq!(unparse(&Identifier::new("x"), 4).unwrap(), "x");
    assert_eq!(unparse(&BinaryOperator::Add, 4).unwrap(), "+");
    assert_eq!(unparse(&Type::new(TypeKind::Int), 4).unwrap(), "int");
    let block = Block::new(vec![call_stmt("a")]);
    assert_eq!(unparse(&block, 2).unwrap(), "{\n  a();\n}");
}

#[test]
fn test_invalid_wildcard_bound_rejected() {
    let bound = WildcardBound {
        data: Default::default(),
        ty: Arc::new(Type::new(TypeKind::Int)),
        extends: false,
        super_: false,
    };
    let err = unparse(&Type::wildcard(Some(bound)), 4).unwrap_err();
    assert_eq!(err.node_kind, "WildcardBound");
}

#[test]
fn test_options_indent_width() {
    let tree = ast("if (a) { b(); }", Parser::parse_statement_start);
    assert_eq!(unparse_with(&tree, &PrinterOptions { indent: 2 }).unwrap(), "if (a) {\n  b();\n}");
    assert_eq!(unparse_with(&tree, &PrinterOptions::compact()).unwrap(), "if (a) { b(); }");
}

// ============================================================================
// Round trips
// ============================================================================

const PROGRAM: &str = r#"
package demo.app;

import java.util.*;
import static java.lang.Math.max;

@SuppressWarnings({"unchecked", "rawtypes"})
public final class Example<T extends Comparable<? super T>> extends Base implements Runnable {
    private static final int LIMIT = 1 << 10;
    private final List<T>[] buckets = new List[4];

    public Example(T seed) throws Exception {
        super(seed);
        this.buckets[0] = new ArrayList<>();
    }

    @Override
    public void run() {
        int total = 0;
        for (int i = 0, j = LIMIT; i < j; i++, j--) {
            total += i * (j - i) % 7;
            if (total > LIMIT) break;
        }
        outer:
        for (List<T> bucket : buckets) {
            if (bucket == null) continue outer;
            else if (bucket.isEmpty()) {
                bucket.add(null);
            } else bucket.clear();
        }
        do total--; while (total > 0 && !(total % 2 == 0));
        String label = switch (total) {
            case 0, 1 -> "small";
            default -> {
                yield total > 10 ? "large" : "medium";
            }
        };
        Object o = label;
        if (o instanceof String s && s.length() > 2) {
            System.out.println(s);
        }
        switch (label) {
            case "small":
                total = -(-total);
            default:
                total = ~total;
        }
        try (var in = open()) {
            in.read();
        } catch (IllegalStateException | IllegalArgumentException e) {
            throw new RuntimeException(e);
        } finally {
            total = (int) (long) total;
        }
        Runnable r = () -> System.out.println("done");
        Comparator<String> c = (a, b) -> a.compareTo(b);
        synchronized (this) {
            assert total >= 0 : "negative";
        }
    }

    private <U> U pick(U first, U... rest) {
        return rest.length == 0 ? first : rest[rest.length - 1];
    }

    enum Mode { ON, OFF; boolean enabled() { return this == ON; } }

    record Point(int x, int y) {
        Point {
            assert x >= 0;
        }
    }

    interface Visitor<R> {
        R visit(Object node);

        default R fallback() {
            return null;
        }
    }

    @interface Marker {
        String value() default "";
    }
}
"#;

#[test]
fn test_program_round_trip() {
    assert_round_trip(PROGRAM, Parser::parse_compilation_unit);
}

#[test]
fn test_expression_round_trips() {
    let sources = [
        "a - (b - c) * d / (e % f)",
        "x ? y : z ? u : v",
        "(x ? y : z) ? u : v",
        "a = b += c",
        "(a = b) == c",
        "-(-x) + +(+y) - -(--z)",
        "(Integer) (-x)",
        "(int) -x",
        "(Object) (String) x",
        "(a + b).c()[d]",
        "new int[][] {{1}, {2, 3}}",
        "x -> y -> (x + y) * 2",
        "a instanceof String s && !s.isEmpty() || b",
        "1 << 2 >> 3 >>> 4",
        "a < b == c > d",
        "a & b ^ c | d && e || f",
        "\"\"\"\n    text\n    block\"\"\"",
    ];
    for source in sources {
        assert_round_trip(source, Parser::parse_expression_start);
    }
}
