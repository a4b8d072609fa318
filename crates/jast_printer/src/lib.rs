//! jast_printer: AST to Java source text.
//!
//! Emits legal Java from any legal tree. Expressions are parenthesized only
//! where precedence or associativity requires it, so a printed tree parses
//! back to a structurally equal one.
//!
//! With a positive indent width blocks and bodies are laid out one member
//! per line; an indent of `0` prints everything on a single line.

mod declarations;
mod expressions;
mod statements;
mod types;

use jast_ast::{AssignOperator, Literal, LiteralKind, NodeRef, Precedence};
pub use jast_diagnostics::UnparseError;

pub(crate) type PResult<T = ()> = Result<T, UnparseError>;

/// Remaining stack below which printing continues on a new segment.
const STACK_RED_ZONE: usize = 128 * 1024;
const STACK_SEGMENT: usize = 2 * 1024 * 1024;

/// Run `f`, extending the stack on the heap first when it runs low. Trees
/// built by hand are not bound by the recognizer's nesting limit.
#[inline]
pub(crate) fn grow<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(STACK_RED_ZONE, STACK_SEGMENT, f)
}

/// Options for the printer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrinterOptions {
    /// Spaces per nesting level. `0` selects the single-line form.
    pub indent: usize,
}

impl Default for PrinterOptions {
    fn default() -> Self {
        Self { indent: 4 }
    }
}

impl PrinterOptions {
    /// Everything on one line.
    pub fn compact() -> Self {
        Self { indent: 0 }
    }

    pub fn is_compact(&self) -> bool {
        self.indent == 0
    }
}

/// Print `node` as Java source, `indent` spaces per nesting level.
pub fn unparse<'a>(node: impl Into<NodeRef<'a>>, indent: usize) -> Result<String, UnparseError> {
    unparse_with(node, &PrinterOptions { indent })
}

pub fn unparse_with<'a>(node: impl Into<NodeRef<'a>>, options: &PrinterOptions) -> Result<String, UnparseError> {
    let node = node.into();
    tracing::debug!(indent = options.indent, node = node.kind_name(), "unparse");
    Printer::with_options(options.clone()).print(node)
}

/// The precedence context an expression is printed in.
///
/// `level` is the class of the enclosing operator, absent at statement and
/// other top positions. `can_be_equal` says whether an operand of exactly
/// that class may go without parentheses, which is how associativity is
/// expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Context {
    level: Option<Precedence>,
    can_be_equal: bool,
}

impl Context {
    pub(crate) const TOP: Context = Context {
        level: None,
        can_be_equal: true,
    };

    pub(crate) fn operand(level: Precedence, can_be_equal: bool) -> Self {
        Self {
            level: Some(level),
            can_be_equal,
        }
    }

    pub(crate) fn needs_parens(self, level: Precedence) -> bool {
        match self.level {
            None => false,
            Some(current) => level < current || (level == current && !self.can_be_equal),
        }
    }
}

/// The printer converts AST nodes to text.
pub struct Printer {
    output: String,
    depth: usize,
    options: PrinterOptions,
    indent_str: String,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

impl Printer {
    pub fn new() -> Self {
        Self::with_options(PrinterOptions::default())
    }

    pub fn with_options(options: PrinterOptions) -> Self {
        Self {
            output: String::with_capacity(4096),
            depth: 0,
            indent_str: " ".repeat(options.indent),
            options,
        }
    }

    /// Print any node to a string.
    pub fn print(&mut self, node: NodeRef<'_>) -> Result<String, UnparseError> {
        self.output.clear();
        self.depth = 0;
        self.node(node)?;
        Ok(std::mem::take(&mut self.output))
    }

    fn node(&mut self, node: NodeRef<'_>) -> PResult {
        match node {
            NodeRef::Identifier(n) => self.write(n.as_str()),
            NodeRef::QualifiedName(n) => self.qualified_name(n),
            NodeRef::Literal(n) => self.literal(n)?,
            NodeRef::KeywordModifier(n) => self.write(n.keyword.as_str()),
            NodeRef::Annotation(n) => self.annotation(n)?,
            NodeRef::ElementValuePair(n) => self.element_value_pair(n)?,
            NodeRef::ElementValueArrayInitializer(n) => self.element_value_array(n)?,

            NodeRef::Type(n) => self.ty(n)?,
            NodeRef::Coit(n) => self.coit(n)?,
            NodeRef::WildcardBound(n) => self.wildcard_bound(n)?,
            NodeRef::TypeArguments(n) => self.type_arguments(n)?,
            NodeRef::Dim(n) => self.dim(n)?,
            NodeRef::TypeParameter(n) => self.type_parameter(n)?,
            NodeRef::TypeBound(n) => self.type_bound(n)?,
            NodeRef::TypeParameters(n) => self.type_parameters(n)?,
            NodeRef::Pattern(n) => self.pattern(n)?,
            NodeRef::GuardedPattern(n) => self.guarded_pattern(n)?,

            NodeRef::BinaryOperator(n) => self.write(n.as_str()),
            NodeRef::UnaryOperator(n) => self.write(n.as_str()),
            NodeRef::PostOperator(n) => self.write(n.as_str()),
            NodeRef::AssignOperator(n) => self.write(assign_operator_str(Some(*n))),

            NodeRef::Name(n) => self.write(n.id.as_str()),
            NodeRef::Constant(n) => self.literal(&n.literal)?,
            NodeRef::This(n) => self.this(n)?,
            NodeRef::Super(n) => self.super_(n)?,
            NodeRef::ClassExpr(n) => self.class_expr(n)?,
            NodeRef::Lambda(n) => self.lambda(n)?,
            NodeRef::Assignment(n) => self.assignment(n)?,
            NodeRef::IfExp(n) => self.if_exp(n)?,
            NodeRef::BinOp(n) => self.bin_op(n)?,
            NodeRef::InstanceOf(n) => self.instance_of(n)?,
            NodeRef::UnaryOp(n) => self.unary_op(n)?,
            NodeRef::PostOp(n) => self.post_op(n)?,
            NodeRef::Cast(n) => self.cast(n)?,
            NodeRef::NewObject(n) => self.new_object(n)?,
            NodeRef::NewInnerObject(n) => self.new_inner_object(n)?,
            NodeRef::NewArray(n) => self.new_array(n)?,
            NodeRef::DimExpr(n) => self.dim_expr(n)?,
            NodeRef::ArrayInitializer(n) => self.array_initializer(n)?,
            NodeRef::SwitchExp(n) => self.switch_exp(n)?,
            NodeRef::SwitchExprRule(n) => self.switch_rule(n)?,
            NodeRef::Call(n) => self.call(n)?,
            NodeRef::Member(n) => self.member(n)?,
            NodeRef::ArrayAccess(n) => self.array_access(n)?,
            NodeRef::Reference(n) => self.reference(n)?,
            NodeRef::ExplicitGenericInvocation(n) => self.explicit_generic_invocation(n)?,

            NodeRef::Empty(_) => self.write(";"),
            NodeRef::Block(n) => self.block(&n.body)?,
            NodeRef::LocalTypeDeclaration(n) => self.decl(&n.decl)?,
            NodeRef::LocalVariableDeclaration(n) => self.local_variable_statement(n)?,
            NodeRef::Labeled(n) => self.labeled(n)?,
            NodeRef::ExpressionStmt(n) => self.expression_statement(n)?,
            NodeRef::If(n) => self.if_statement(n)?,
            NodeRef::Assert(n) => self.assert(n)?,
            NodeRef::Match(n) => self.match_(n)?,
            NodeRef::Case(n) => self.case(n)?,
            NodeRef::DefaultCase(_) => self.write("default:"),
            NodeRef::SwitchGroup(n) => self.switch_group(n)?,
            NodeRef::SwitchBlock(n) => self.switch_block(n)?,
            NodeRef::Switch(n) => self.switch(n)?,
            NodeRef::While(n) => self.while_statement(n)?,
            NodeRef::DoWhile(n) => self.do_while(n)?,
            NodeRef::For(n) => self.for_statement(n)?,
            NodeRef::ForEach(n) => self.for_each(n)?,
            NodeRef::Break(n) => self.jump("break", n.label.as_ref()),
            NodeRef::Continue(n) => self.jump("continue", n.label.as_ref()),
            NodeRef::Return(n) => self.return_statement(n)?,
            NodeRef::Throw(n) => self.throw(n)?,
            NodeRef::Synchronized(n) => self.synchronized(n)?,
            NodeRef::Yield(n) => self.yield_statement(n)?,
            NodeRef::CatchClause(n) => self.catch_clause(n)?,
            NodeRef::Resource(n) => self.resource(n)?,
            NodeRef::Try(n) => self.try_statement(n)?,
            NodeRef::TryWithResources(n) => self.try_with_resources(n)?,

            NodeRef::VariableDeclaratorId(n) => self.variable_declarator_id(n)?,
            NodeRef::VariableDeclarator(n) => self.variable_declarator(n)?,
            NodeRef::ReceiverParameter(n) => self.receiver_parameter(n)?,
            NodeRef::Parameter(n) => self.parameter(n)?,
            NodeRef::VariableArityParameter(n) => self.variable_arity_parameter(n)?,
            NodeRef::FormalParameters(n) => self.formal_parameters(n)?,
            NodeRef::EmptyDeclaration(_) => self.write(";"),
            NodeRef::FieldDeclaration(n) => self.field(n)?,
            NodeRef::MethodDeclaration(n) => self.method(n)?,
            NodeRef::ConstructorDeclaration(n) => self.constructor(n)?,
            NodeRef::CompactConstructorDeclaration(n) => self.compact_constructor(n)?,
            NodeRef::Initializer(n) => self.initializer(n)?,
            NodeRef::ClassDeclaration(n) => self.class(n)?,
            NodeRef::InterfaceDeclaration(n) => self.interface(n)?,
            NodeRef::EnumConstant(n) => self.enum_constant(n)?,
            NodeRef::EnumDeclaration(n) => self.enum_declaration(n)?,
            NodeRef::RecordComponent(n) => self.record_component(n)?,
            NodeRef::RecordDeclaration(n) => self.record(n)?,
            NodeRef::AnnotationDeclaration(n) => self.annotation_declaration(n)?,
            NodeRef::AnnotationMethodDeclaration(n) => self.annotation_method(n)?,

            NodeRef::PackageDeclaration(n) => self.package(n)?,
            NodeRef::ImportDeclaration(n) => self.import(n),
            NodeRef::RequiresDirective(n) => self.requires(n)?,
            NodeRef::ExportsDirective(n) => self.targets("exports", &n.name, "to", &n.to),
            NodeRef::OpensDirective(n) => self.targets("opens", &n.name, "to", &n.to),
            NodeRef::UsesDirective(n) => self.targets("uses", &n.name, "", &[]),
            NodeRef::ProvidesDirective(n) => self.targets("provides", &n.name, "with", &n.with),
            NodeRef::ModuleDeclaration(n) => self.module(n)?,
            NodeRef::OrdinaryCompilationUnit(n) => self.ordinary_compilation_unit(n)?,
            NodeRef::ModularCompilationUnit(n) => self.modular_compilation_unit(n)?,
        }
        Ok(())
    }

    // ========================================================================
    // Literals
    // ========================================================================

    pub(crate) fn literal(&mut self, literal: &Literal) -> PResult {
        match &literal.kind {
            LiteralKind::Int { value, long } => {
                let text = int_literal(*value, *long, false);
                self.write_owned(text);
            }
            LiteralKind::Float { value, double } => {
                if !value.is_finite() {
                    return Err(UnparseError::new(
                        "FloatLiteral",
                        format!("{} has no literal form", value),
                    ));
                }
                self.write_owned(format!("{:?}", value));
                if *double {
                    self.write("d");
                }
            }
            LiteralKind::Bool(value) => self.write(if *value { "true" } else { "false" }),
            LiteralKind::Char(text) => {
                self.write("'");
                self.write(text);
                self.write("'");
            }
            LiteralKind::String(text) => {
                self.write("\"");
                self.write(text);
                self.write("\"");
            }
            LiteralKind::TextBlock(lines) => self.text_block(lines),
            LiteralKind::Null => self.write("null"),
        }
        Ok(())
    }

    /// Lines go one nesting level deeper than the current statement, the
    /// closing quotes right after the last line.
    fn text_block(&mut self, lines: &[String]) {
        self.write("\"\"\"");
        let last = lines.len().saturating_sub(1);
        for (i, line) in lines.iter().enumerate() {
            self.write("\n");
            if self.is_compact() || (line.is_empty() && i != last) {
                self.write(line);
                continue;
            }
            for _ in 0..=self.depth {
                self.output.push_str(&self.indent_str);
            }
            self.write(line);
        }
        self.write("\"\"\"");
    }

    // ========================================================================
    // Core write helpers
    // ========================================================================

    pub(crate) fn write(&mut self, s: &str) {
        self.output.push_str(s);
    }

    pub(crate) fn write_owned(&mut self, s: String) {
        self.output.push_str(&s);
    }

    pub(crate) fn is_compact(&self) -> bool {
        self.options.is_compact()
    }

    /// Break the line and indent to the current depth; a single space in
    /// the compact form.
    pub(crate) fn write_newline(&mut self) {
        if self.is_compact() {
            self.output.push(' ');
            return;
        }
        self.output.push('\n');
        self.write_indent();
    }

    /// An empty line between top-level sections.
    pub(crate) fn write_blank_line(&mut self) {
        if !self.is_compact() {
            self.output.push('\n');
        }
        self.write_newline();
    }

    pub(crate) fn write_indent(&mut self) {
        for _ in 0..self.depth {
            self.output.push_str(&self.indent_str);
        }
    }

    pub(crate) fn increase_indent(&mut self) {
        self.depth += 1;
    }

    pub(crate) fn decrease_indent(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Print `items` separated by `sep`.
    pub(crate) fn write_list<T>(
        &mut self,
        items: &[T],
        sep: &str,
        mut each: impl FnMut(&mut Self, &T) -> PResult,
    ) -> PResult {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.write(sep);
            }
            each(self, item)?;
        }
        Ok(())
    }
}

// ============================================================================
// Operator and literal text
// ============================================================================

/// `=` for a plain assignment, `op=` for a compound one.
pub(crate) fn assign_operator_str(op: Option<AssignOperator>) -> &'static str {
    op.map_or("=", AssignOperator::as_str)
}

/// Decimal where Java accepts the value as a decimal literal, hexadecimal
/// beyond that. `2^31` and `2^63` are decimal only right after a unary minus.
pub(crate) fn int_literal(value: u64, long: bool, negated: bool) -> String {
    let decimal_limit = if long { 1u64 << 63 } else { 1u64 << 31 };
    let suffix = if long { "l" } else { "" };
    if value < decimal_limit || (negated && value == decimal_limit) {
        format!("{}{}", value, suffix)
    } else {
        format!("0x{:x}{}", value, suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jast_ast::{BinOp, BinaryOperator, Constant, Expr, Name};

    fn int(value: u64) -> Expr {
        Constant::new(Literal::int(value)).into()
    }

    #[test]
    fn test_context_parenthesization() {
        let left = Context::operand(Precedence::Additive, true);
        let right = Context::operand(Precedence::Additive, false);
        assert!(!left.needs_parens(Precedence::Additive));
        assert!(right.needs_parens(Precedence::Additive));
        assert!(left.needs_parens(Precedence::LogicalOr));
        assert!(!right.needs_parens(Precedence::Multiplicative));
        assert!(!Context::TOP.needs_parens(Precedence::Lambda));
    }

    #[test]
    fn test_int_literal_text() {
        assert_eq!(int_literal(42, false, false), "42");
        assert_eq!(int_literal(42, true, false), "42l");
        assert_eq!(int_literal(2147483647, false, false), "2147483647");
        assert_eq!(int_literal(2147483648, false, false), "0x80000000");
        assert_eq!(int_literal(2147483648, false, true), "2147483648");
        assert_eq!(int_literal(1 << 63, true, false), "0x8000000000000000l");
        assert_eq!(int_literal(1 << 63, true, true), "9223372036854775808l");
        assert_eq!(int_literal(0xFFFF_FFFF, false, true), "0xffffffff");
        assert_eq!(int_literal(u64::MAX, true, false), "0xffffffffffffffffl");
    }

    #[test]
    fn test_assign_operator_str() {
        assert_eq!(assign_operator_str(None), "=");
        assert_eq!(assign_operator_str(Some(AssignOperator::Add)), "+=");
    }

    #[test]
    fn test_float_literals() {
        let float = |value: f64, double: bool| -> Expr { Constant::new(Literal::float(value, double)).into() };
        assert_eq!(unparse(&float(1.5, false), 4).unwrap(), "1.5");
        assert_eq!(unparse(&float(2.0, true), 4).unwrap(), "2.0d");
        let err = unparse(&float(f64::NAN, false), 4).unwrap_err();
        assert_eq!(err.node_kind, "FloatLiteral");
    }

    #[test]
    fn test_printer_reuse() {
        let sum: Expr = BinOp::new(int(1), BinaryOperator::Add, Name::new("x")).into();
        let mut printer = Printer::new();
        assert_eq!(printer.print(NodeRef::from(&sum)).unwrap(), "1 + x");
        assert_eq!(printer.print(NodeRef::from(&sum)).unwrap(), "1 + x");
    }

    #[test]
    fn test_compact_options() {
        assert!(PrinterOptions::compact().is_compact());
        assert_eq!(PrinterOptions::default().indent, 4);
    }
}
