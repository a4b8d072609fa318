//! Expression printing.

use crate::{assign_operator_str, grow, int_literal, Context, PResult, Printer};
use jast_ast::precedence::binary_precedence;
use jast_ast::{
    ArrayAccess, ArrayInitializer, Assignment, BinOp, Call, Cast, ClassExpr, DimExpr, ExplicitGenericInvocation,
    Expr, IfExp, InstanceOf, InstanceOfTarget, Lambda, LambdaBody, LambdaParams, LiteralKind, Member, NewArray,
    NewInnerObject, NewObject, PostOp, Precedence, Reference, ReferenceTarget, Super, SwitchExp, This, UnaryOp,
    UnaryOperator,
};
use jast_diagnostics::UnparseError;
use std::sync::Arc;

impl Printer {
    /// Print `expr`, parenthesized when its class binds looser than `ctx`
    /// allows.
    pub(crate) fn expr(&mut self, expr: &Expr, ctx: Context) -> PResult {
        grow(|| self.expr_in_place(expr, ctx))
    }

    fn expr_in_place(&mut self, expr: &Expr, ctx: Context) -> PResult {
        let parens = ctx.needs_parens(expr.level());
        if parens {
            self.write("(");
        }
        match expr {
            Expr::Name(n) => self.write(n.id.as_str()),
            Expr::Constant(n) => self.literal(&n.literal)?,
            Expr::This(n) => self.this(n)?,
            Expr::Super(n) => self.super_(n)?,
            Expr::Class(n) => self.class_expr(n)?,
            Expr::Lambda(n) => self.lambda(n)?,
            Expr::Assignment(n) => self.assignment(n)?,
            Expr::IfExp(n) => self.if_exp(n)?,
            Expr::BinOp(n) => self.bin_op(n)?,
            Expr::InstanceOf(n) => self.instance_of(n)?,
            Expr::UnaryOp(n) => self.unary_op(n)?,
            Expr::PostOp(n) => self.post_op(n)?,
            Expr::Cast(n) => self.cast(n)?,
            Expr::NewObject(n) => self.new_object(n)?,
            Expr::NewInnerObject(n) => self.new_inner_object(n)?,
            Expr::NewArray(n) => self.new_array(n)?,
            Expr::SwitchExp(n) => self.switch_exp(n)?,
            Expr::Call(n) => self.call(n)?,
            Expr::Member(n) => self.member(n)?,
            Expr::ArrayAccess(n) => self.array_access(n)?,
            Expr::Reference(n) => self.reference(n)?,
            Expr::ExplicitGenericInvocation(n) => self.explicit_generic_invocation(n)?,
            Expr::ArrayInit(n) => self.array_initializer(n)?,
        }
        if parens {
            self.write(")");
        }
        Ok(())
    }

    /// An expression in a position that takes any expression.
    pub(crate) fn top_expr(&mut self, expr: &Expr) -> PResult {
        self.expr(expr, Context::TOP)
    }

    /// `a, b, c` at top context.
    pub(crate) fn expr_list(&mut self, exprs: &[Arc<Expr>]) -> PResult {
        self.write_list(exprs, ", ", |p, e| p.top_expr(e))
    }

    pub(crate) fn arguments(&mut self, args: &[Arc<Expr>]) -> PResult {
        self.write("(");
        self.expr_list(args)?;
        self.write(")");
        Ok(())
    }

    // ========================================================================
    // Primaries
    // ========================================================================

    pub(crate) fn this(&mut self, node: &This) -> PResult {
        self.write("this");
        if let Some(args) = &node.args {
            self.arguments(args)?;
        }
        Ok(())
    }

    pub(crate) fn super_(&mut self, node: &Super) -> PResult {
        self.write("super");
        if let Some(id) = &node.id {
            self.write(".");
            if let Some(type_args) = &node.type_args {
                self.type_arguments(type_args)?;
            }
            self.write(id.as_str());
        }
        if let Some(args) = &node.args {
            self.arguments(args)?;
        }
        Ok(())
    }

    pub(crate) fn class_expr(&mut self, node: &ClassExpr) -> PResult {
        self.ty(&node.ty)?;
        self.write(".class");
        Ok(())
    }

    pub(crate) fn call(&mut self, node: &Call) -> PResult {
        self.selector_chain(Selector::Call(node))
    }

    pub(crate) fn member(&mut self, node: &Member) -> PResult {
        self.selector_chain(Selector::Member(node))
    }

    pub(crate) fn array_access(&mut self, node: &ArrayAccess) -> PResult {
        self.selector_chain(Selector::Index(node))
    }

    /// `a.b().c[0]` as a loop over the receivers: the innermost receiver is
    /// printed first, then each suffix outward. Receivers of this shape never
    /// need parentheses.
    fn selector_chain(&mut self, outer: Selector<'_>) -> PResult {
        let mut links = vec![outer];
        let mut receiver = outer.receiver();
        while let Some(inner) = Selector::of(receiver) {
            links.push(inner);
            receiver = inner.receiver();
        }
        self.expr(receiver, Context::operand(Precedence::Primary, true))?;
        for link in links.into_iter().rev() {
            match link {
                Selector::Call(node) => self.arguments(&node.args)?,
                Selector::Member(node) => {
                    self.write(".");
                    self.expr(&node.member, Context::operand(Precedence::Primary, true))?;
                }
                Selector::Index(node) => {
                    self.write("[");
                    self.top_expr(&node.index)?;
                    self.write("]");
                }
            }
        }
        Ok(())
    }

    pub(crate) fn reference(&mut self, node: &Reference) -> PResult {
        match &node.target {
            ReferenceTarget::Expr(target) => self.expr(target, Context::operand(Precedence::Primary, true))?,
            ReferenceTarget::Type(target) => self.ty(target)?,
        }
        self.write("::");
        if let Some(type_args) = &node.type_args {
            self.type_arguments(type_args)?;
        }
        match (&node.id, node.new) {
            (_, true) => self.write("new"),
            (Some(id), false) => self.write(id.as_str()),
            (None, false) => return Err(UnparseError::new("Reference", "neither a method name nor new")),
        }
        Ok(())
    }

    pub(crate) fn explicit_generic_invocation(&mut self, node: &ExplicitGenericInvocation) -> PResult {
        self.type_arguments(&node.type_args)?;
        self.expr(&node.value, Context::operand(Precedence::Primary, true))
    }

    // ========================================================================
    // Operators
    // ========================================================================

    pub(crate) fn lambda(&mut self, node: &Lambda) -> PResult {
        match &node.params {
            LambdaParams::Single(id) => self.write(id.as_str()),
            LambdaParams::Identifiers(ids) => {
                self.write("(");
                self.write_list(ids, ", ", |p, id| {
                    p.write(id.as_str());
                    Ok(())
                })?;
                self.write(")");
            }
            LambdaParams::Formal(params) => self.formal_parameters(params)?,
        }
        self.write(" -> ");
        match &node.body {
            LambdaBody::Expr(body) => self.top_expr(body),
            LambdaBody::Block(body) => self.block(&body.body),
        }
    }

    /// Right-associative: the target may not share the class, the value may.
    pub(crate) fn assignment(&mut self, node: &Assignment) -> PResult {
        self.expr(&node.target, Context::operand(Precedence::Assignment, false))?;
        self.write(" ");
        self.write(assign_operator_str(node.op));
        self.write(" ");
        self.expr(&node.value, Context::operand(Precedence::Assignment, true))
    }

    pub(crate) fn if_exp(&mut self, node: &IfExp) -> PResult {
        self.expr(&node.test, Context::operand(Precedence::Ternary, false))?;
        self.write(" ? ");
        self.top_expr(&node.body)?;
        self.write(" : ");
        self.expr(&node.orelse, Context::operand(Precedence::Ternary, true))
    }

    /// Left-associative: only the left operand may share the class.
    ///
    /// Left operands that print without parentheses are followed in a loop,
    /// so only right operands recurse.
    pub(crate) fn bin_op(&mut self, node: &BinOp) -> PResult {
        let mut spine = vec![node];
        let mut innermost = node;
        while let Expr::BinOp(left) = innermost.left.as_ref() {
            if binary_precedence(left.op) < binary_precedence(innermost.op) {
                break;
            }
            spine.push(left);
            innermost = left;
        }
        self.expr(&innermost.left, Context::operand(binary_precedence(innermost.op), true))?;
        for link in spine.into_iter().rev() {
            let level = binary_precedence(link.op);
            self.write(" ");
            self.write(link.op.as_str());
            self.write(" ");
            self.expr(&link.right, Context::operand(level, false))?;
        }
        Ok(())
    }

    pub(crate) fn instance_of(&mut self, node: &InstanceOf) -> PResult {
        self.expr(&node.value, Context::operand(Precedence::Relational, true))?;
        self.write(" instanceof ");
        match &node.target {
            InstanceOfTarget::Type(ty) => self.ty(ty),
            InstanceOfTarget::Pattern(pattern) => self.pattern(pattern),
        }
    }

    pub(crate) fn unary_op(&mut self, node: &UnaryOp) -> PResult {
        self.write(node.op.as_str());
        if node.op == UnaryOperator::USub {
            if let Expr::Constant(constant) = node.operand.as_ref() {
                if let LiteralKind::Int { value, long } = constant.literal.kind {
                    self.write_owned(int_literal(value, long, true));
                    return Ok(());
                }
            }
        }
        // `- -x` and `+ ++x` must not fuse into `--x` and `+++x`
        if let Expr::UnaryOp(inner) = node.operand.as_ref() {
            if sign_of(node.op).is_some() && sign_of(node.op) == sign_of(inner.op) {
                self.write(" ");
            }
        }
        self.expr(&node.operand, Context::operand(Precedence::Unary, true))
    }

    pub(crate) fn post_op(&mut self, node: &PostOp) -> PResult {
        self.expr(&node.operand, Context::operand(Precedence::Postfix, true))?;
        self.write(node.op.as_str());
        Ok(())
    }

    pub(crate) fn cast(&mut self, node: &Cast) -> PResult {
        self.write("(");
        self.annotations_inline(&node.annotations)?;
        self.type_bound(&node.ty)?;
        self.write(") ");
        match node.value.as_ref() {
            Expr::Lambda(lambda) => self.lambda(lambda),
            // `(T) -x` would read as a subtraction
            Expr::UnaryOp(unary) if unary.op.is_sign_like() && !is_primitive_cast(node) => {
                self.write("(");
                self.unary_op(unary)?;
                self.write(")");
                Ok(())
            }
            value => self.expr(value, Context::operand(Precedence::Type, true)),
        }
    }

    // ========================================================================
    // Creation
    // ========================================================================

    pub(crate) fn new_object(&mut self, node: &NewObject) -> PResult {
        self.write("new ");
        if let Some(type_args) = &node.type_args {
            self.type_arguments(type_args)?;
            self.write(" ");
        }
        self.ty(&node.ty)?;
        self.arguments(&node.args)?;
        if let Some(body) = &node.body {
            self.write(" ");
            self.class_body(body)?;
        }
        Ok(())
    }

    pub(crate) fn new_inner_object(&mut self, node: &NewInnerObject) -> PResult {
        self.write("new ");
        if let Some(type_args) = &node.type_args {
            self.type_arguments(type_args)?;
            self.write(" ");
        }
        self.write(node.id.as_str());
        if let Some(type_args) = &node.class_type_args {
            self.type_arguments(type_args)?;
        }
        self.arguments(&node.args)?;
        if let Some(body) = &node.body {
            self.write(" ");
            self.class_body(body)?;
        }
        Ok(())
    }

    pub(crate) fn new_array(&mut self, node: &NewArray) -> PResult {
        self.write("new ");
        self.ty(&node.ty)?;
        for dim in &node.expr_dims {
            self.dim_expr(dim)?;
        }
        for dim in &node.dims {
            self.dim(dim)?;
        }
        if let Some(init) = &node.init {
            self.write(" ");
            self.array_initializer(init)?;
        }
        Ok(())
    }

    pub(crate) fn dim_expr(&mut self, node: &DimExpr) -> PResult {
        self.dim_annotations(&node.annotations)?;
        self.write("[");
        self.top_expr(&node.expr)?;
        self.write("]");
        Ok(())
    }

    pub(crate) fn array_initializer(&mut self, node: &ArrayInitializer) -> PResult {
        self.write("{");
        self.expr_list(&node.values)?;
        self.write("}");
        Ok(())
    }

    pub(crate) fn switch_exp(&mut self, node: &SwitchExp) -> PResult {
        self.write("switch (");
        self.top_expr(&node.value)?;
        self.write(") ");
        self.switch_rules(&node.rules)
    }
}

/// The sign character an operator starts with.
fn sign_of(op: UnaryOperator) -> Option<char> {
    match op {
        UnaryOperator::UAdd | UnaryOperator::PreInc => Some('+'),
        UnaryOperator::USub | UnaryOperator::PreDec => Some('-'),
        UnaryOperator::Not | UnaryOperator::Invert => None,
    }
}

/// `(int) x` casts any unary operand; a reference type only casts operands
/// that cannot continue a binary expression.
fn is_primitive_cast(node: &Cast) -> bool {
    match node.ty.types.as_slice() {
        [only] => {
            node.annotations.is_empty()
                && node.ty.annotations.is_empty()
                && only.annotations.is_empty()
                && only.is_primitive()
        }
        _ => false,
    }
}

/// A node that extends a receiver with a call, member or index suffix.
#[derive(Clone, Copy)]
enum Selector<'a> {
    Call(&'a Call),
    Member(&'a Member),
    Index(&'a ArrayAccess),
}

impl<'a> Selector<'a> {
    fn of(expr: &'a Expr) -> Option<Self> {
        match expr {
            Expr::Call(node) => Some(Selector::Call(node)),
            Expr::Member(node) => Some(Selector::Member(node)),
            Expr::ArrayAccess(node) => Some(Selector::Index(node)),
            _ => None,
        }
    }

    fn receiver(self) -> &'a Expr {
        match self {
            Selector::Call(node) => &node.func,
            Selector::Member(node) => &node.receiver,
            Selector::Index(node) => &node.receiver,
        }
    }
}
