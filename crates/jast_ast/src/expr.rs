//! Expression nodes.

use crate::decl::{Decl, FormalParameters};
use crate::node::*;
use crate::operators::*;
use crate::stmt::{Block, Stmt};
use jast_diagnostics::AstError;
use std::sync::Arc;

/// Every expression variant.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Name(Name),
    Constant(Constant),
    This(This),
    Super(Super),
    Class(ClassExpr),
    Lambda(Lambda),
    Assignment(Assignment),
    IfExp(IfExp),
    BinOp(BinOp),
    InstanceOf(InstanceOf),
    UnaryOp(UnaryOp),
    PostOp(PostOp),
    Cast(Cast),
    NewObject(NewObject),
    NewInnerObject(NewInnerObject),
    NewArray(NewArray),
    SwitchExp(SwitchExp),
    Call(Call),
    Member(Member),
    ArrayAccess(ArrayAccess),
    Reference(Reference),
    ExplicitGenericInvocation(ExplicitGenericInvocation),
    ArrayInit(ArrayInitializer),
}

macro_rules! expr_variants {
    ($($variant:ident($ty:ident)),* $(,)?) => {
        impl Expr {
            /// The variant name, as reported by child iteration and errors.
            pub fn kind_name(&self) -> &'static str {
                match self {
                    $(Expr::$variant(_) => stringify!($ty),)*
                }
            }

            pub fn data(&self) -> &NodeData {
                match self {
                    $(Expr::$variant(n) => &n.data,)*
                }
            }

            pub fn data_mut(&mut self) -> &mut NodeData {
                match self {
                    $(Expr::$variant(n) => &mut n.data,)*
                }
            }
        }

        $(
            impl From<$ty> for Expr {
                fn from(node: $ty) -> Self {
                    Expr::$variant(node)
                }
            }

            impl From<$ty> for Arc<Expr> {
                fn from(node: $ty) -> Self {
                    Arc::new(Expr::$variant(node))
                }
            }
        )*

        impl_spanned!($($ty),*);
    };
}

expr_variants!(
    Name(Name),
    Constant(Constant),
    This(This),
    Super(Super),
    Class(ClassExpr),
    Lambda(Lambda),
    Assignment(Assignment),
    IfExp(IfExp),
    BinOp(BinOp),
    InstanceOf(InstanceOf),
    UnaryOp(UnaryOp),
    PostOp(PostOp),
    Cast(Cast),
    NewObject(NewObject),
    NewInnerObject(NewInnerObject),
    NewArray(NewArray),
    SwitchExp(SwitchExp),
    Call(Call),
    Member(Member),
    ArrayAccess(ArrayAccess),
    Reference(Reference),
    ExplicitGenericInvocation(ExplicitGenericInvocation),
    ArrayInit(ArrayInitializer),
);

impl Spanned for Expr {
    fn data(&self) -> &NodeData {
        Expr::data(self)
    }

    fn data_mut(&mut self) -> &mut NodeData {
        Expr::data_mut(self)
    }
}

fn exprs<I, T>(items: I) -> Vec<Arc<Expr>>
where
    I: IntoIterator<Item = T>,
    T: Into<Arc<Expr>>,
{
    items.into_iter().map(Into::into).collect()
}

// ============================================================================
// Primaries
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Name {
    pub data: NodeData,
    pub id: Identifier,
}

impl Name {
    pub fn new(id: impl Into<Identifier>) -> Self {
        Self {
            data: NodeData::default(),
            id: id.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Constant {
    pub data: NodeData,
    pub literal: Literal,
}

impl Constant {
    pub fn new(literal: Literal) -> Self {
        Self {
            data: NodeData::default(),
            literal,
        }
    }
}

/// `this`, or the constructor invocation `this(args)` when `args` is present.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct This {
    pub data: NodeData,
    pub args: Option<Vec<Arc<Expr>>>,
}

impl This {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn call<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Arc<Expr>>,
    {
        Self {
            data: NodeData::default(),
            args: Some(exprs(args)),
        }
    }
}

/// `super`, `super(args)`, `super.id`, `super.<T>id(args)`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Super {
    pub data: NodeData,
    pub type_args: Option<TypeArguments>,
    pub id: Option<Identifier>,
    pub args: Option<Vec<Arc<Expr>>>,
}

impl Super {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_type_args(mut self, type_args: TypeArguments) -> Self {
        self.type_args = Some(type_args);
        self
    }

    pub fn with_id(mut self, id: impl Into<Identifier>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_args<I, T>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Arc<Expr>>,
    {
        self.args = Some(exprs(args));
        self
    }
}

/// `Type.class`.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassExpr {
    pub data: NodeData,
    pub ty: Arc<Type>,
}

impl ClassExpr {
    pub fn new(ty: impl Into<Arc<Type>>) -> Self {
        Self {
            data: NodeData::default(),
            ty: ty.into(),
        }
    }
}

// ============================================================================
// Lambdas
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum LambdaParams {
    /// `x -> ...`
    Single(Identifier),
    /// `(x, y) -> ...` and `() -> ...`
    Identifiers(Vec<Identifier>),
    /// `(int x, var y) -> ...`
    Formal(FormalParameters),
}

#[derive(Debug, Clone, PartialEq)]
pub enum LambdaBody {
    Expr(Arc<Expr>),
    Block(Block),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Lambda {
    pub data: NodeData,
    pub params: LambdaParams,
    pub body: LambdaBody,
}

impl Lambda {
    /// Fails when formal parameters carry a receiver parameter.
    pub fn new(params: LambdaParams, body: LambdaBody) -> Result<Self, AstError> {
        if let LambdaParams::Formal(formal) = &params {
            if formal.receiver.is_some() {
                return Err(AstError::new(
                    "Lambda",
                    "params",
                    "a lambda cannot declare a receiver parameter",
                ));
            }
        }
        Ok(Self {
            data: NodeData::default(),
            params,
            body,
        })
    }
}

// ============================================================================
// Operators
// ============================================================================

/// `target = value` or `target op= value`.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub data: NodeData,
    pub target: Arc<Expr>,
    pub op: Option<AssignOperator>,
    pub value: Arc<Expr>,
}

impl Assignment {
    pub fn new(target: impl Into<Arc<Expr>>, op: Option<AssignOperator>, value: impl Into<Arc<Expr>>) -> Self {
        Self {
            data: NodeData::default(),
            target: target.into(),
            op,
            value: value.into(),
        }
    }
}

/// `test ? body : orelse`.
#[derive(Debug, Clone, PartialEq)]
pub struct IfExp {
    pub data: NodeData,
    pub test: Arc<Expr>,
    pub body: Arc<Expr>,
    pub orelse: Arc<Expr>,
}

impl IfExp {
    pub fn new(test: impl Into<Arc<Expr>>, body: impl Into<Arc<Expr>>, orelse: impl Into<Arc<Expr>>) -> Self {
        Self {
            data: NodeData::default(),
            test: test.into(),
            body: body.into(),
            orelse: orelse.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinOp {
    pub data: NodeData,
    pub left: Arc<Expr>,
    pub op: BinaryOperator,
    pub right: Arc<Expr>,
}

impl BinOp {
    pub fn new(left: impl Into<Arc<Expr>>, op: BinaryOperator, right: impl Into<Arc<Expr>>) -> Self {
        Self {
            data: NodeData::default(),
            left: left.into(),
            op,
            right: right.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InstanceOfTarget {
    Type(Arc<Type>),
    Pattern(Pattern),
}

#[derive(Debug, Clone, PartialEq)]
pub struct InstanceOf {
    pub data: NodeData,
    pub value: Arc<Expr>,
    pub target: InstanceOfTarget,
}

impl InstanceOf {
    pub fn new(value: impl Into<Arc<Expr>>, target: InstanceOfTarget) -> Self {
        Self {
            data: NodeData::default(),
            value: value.into(),
            target,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnaryOp {
    pub data: NodeData,
    pub op: UnaryOperator,
    pub operand: Arc<Expr>,
}

impl UnaryOp {
    pub fn new(op: UnaryOperator, operand: impl Into<Arc<Expr>>) -> Self {
        Self {
            data: NodeData::default(),
            op,
            operand: operand.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PostOp {
    pub data: NodeData,
    pub operand: Arc<Expr>,
    pub op: PostOperator,
}

impl PostOp {
    pub fn new(operand: impl Into<Arc<Expr>>, op: PostOperator) -> Self {
        Self {
            data: NodeData::default(),
            operand: operand.into(),
            op,
        }
    }
}

/// `(@A T & U) value`.
#[derive(Debug, Clone, PartialEq)]
pub struct Cast {
    pub data: NodeData,
    pub annotations: Vec<Annotation>,
    pub ty: TypeBound,
    pub value: Arc<Expr>,
}

impl Cast {
    pub fn new(ty: TypeBound, value: impl Into<Arc<Expr>>) -> Self {
        Self {
            data: NodeData::default(),
            annotations: Vec::new(),
            ty,
            value: value.into(),
        }
    }

    pub fn with_annotations(mut self, annotations: Vec<Annotation>) -> Self {
        self.annotations = annotations;
        self
    }

    /// Whether the cast target is a single primitive type.
    pub fn is_primitive(&self) -> bool {
        matches!(self.ty.types.as_slice(), [ty] if ty.is_primitive())
    }
}

// ============================================================================
// Creation
// ============================================================================

/// `new <T> Type(args) { body }`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewObject {
    pub data: NodeData,
    pub type_args: Option<TypeArguments>,
    pub ty: Arc<Type>,
    pub args: Vec<Arc<Expr>>,
    /// Anonymous class body.
    pub body: Option<Vec<Arc<Decl>>>,
}

impl NewObject {
    pub fn new<I, T>(ty: impl Into<Arc<Type>>, args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Arc<Expr>>,
    {
        Self {
            data: NodeData::default(),
            type_args: None,
            ty: ty.into(),
            args: exprs(args),
            body: None,
        }
    }

    pub fn with_type_args(mut self, type_args: TypeArguments) -> Self {
        self.type_args = Some(type_args);
        self
    }

    pub fn with_body(mut self, body: Vec<Arc<Decl>>) -> Self {
        self.body = Some(body);
        self
    }
}

/// The qualified inner creation `outer.new <T> Inner<U>(args) { body }`,
/// held as the member of a [`Member`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewInnerObject {
    pub data: NodeData,
    pub type_args: Option<TypeArguments>,
    pub id: Identifier,
    pub class_type_args: Option<TypeArguments>,
    pub args: Vec<Arc<Expr>>,
    pub body: Option<Vec<Arc<Decl>>>,
}

impl NewInnerObject {
    pub fn new<I, T>(id: impl Into<Identifier>, args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Arc<Expr>>,
    {
        Self {
            data: NodeData::default(),
            type_args: None,
            id: id.into(),
            class_type_args: None,
            args: exprs(args),
            body: None,
        }
    }

    pub fn with_type_args(mut self, type_args: TypeArguments) -> Self {
        self.type_args = Some(type_args);
        self
    }

    pub fn with_class_type_args(mut self, type_args: TypeArguments) -> Self {
        self.class_type_args = Some(type_args);
        self
    }

    pub fn with_body(mut self, body: Vec<Arc<Decl>>) -> Self {
        self.body = Some(body);
        self
    }
}

/// A sized dimension `[expr]` in an array creation.
#[derive(Debug, Clone, PartialEq)]
pub struct DimExpr {
    pub data: NodeData,
    pub annotations: Vec<Annotation>,
    pub expr: Arc<Expr>,
}

impl DimExpr {
    pub fn new(expr: impl Into<Arc<Expr>>) -> Self {
        Self {
            data: NodeData::default(),
            annotations: Vec::new(),
            expr: expr.into(),
        }
    }
}

/// `{a, b, c}`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ArrayInitializer {
    pub data: NodeData,
    pub values: Vec<Arc<Expr>>,
}

impl ArrayInitializer {
    pub fn new<I, T>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Arc<Expr>>,
    {
        Self {
            data: NodeData::default(),
            values: exprs(values),
        }
    }
}

/// `new T[a][b][]` or `new T[] {..}`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewArray {
    pub data: NodeData,
    pub ty: Arc<Type>,
    pub expr_dims: Vec<DimExpr>,
    pub dims: Vec<Dim>,
    pub init: Option<ArrayInitializer>,
}

impl NewArray {
    /// Fails unless exactly one of `expr_dims` and `init` is given, or when an
    /// initializer comes without `dims`.
    pub fn new(
        ty: impl Into<Arc<Type>>,
        expr_dims: Vec<DimExpr>,
        dims: Vec<Dim>,
        init: Option<ArrayInitializer>,
    ) -> Result<Self, AstError> {
        match (&init, expr_dims.is_empty()) {
            (Some(_), false) => {
                return Err(AstError::new(
                    "NewArray",
                    "init",
                    "an initializer cannot be combined with sized dimensions",
                ))
            }
            (None, true) => {
                return Err(AstError::new(
                    "NewArray",
                    "expr_dims",
                    "either sized dimensions or an initializer is required",
                ))
            }
            (Some(_), true) if dims.is_empty() => {
                return Err(AstError::empty("NewArray", "dims"));
            }
            _ => {}
        }
        Ok(Self {
            data: NodeData::default(),
            ty: ty.into(),
            expr_dims,
            dims,
            init,
        })
    }
}

// ============================================================================
// Switch Expressions
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleLabel {
    Case,
    Default,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CaseItem {
    Expr(Arc<Expr>),
    Pattern(GuardedPattern),
}

/// One `case ... ->` / `case ...:` rule of a switch expression or arrow-form switch statement.
#[derive(Debug, Clone, PartialEq)]
pub struct SwitchExprRule {
    pub data: NodeData,
    pub label: RuleLabel,
    pub cases: Vec<CaseItem>,
    /// `->` when true, `:` otherwise.
    pub arrow: bool,
    pub body: Vec<Arc<Stmt>>,
}

impl SwitchExprRule {
    pub fn case(cases: Vec<CaseItem>, arrow: bool, body: Vec<Arc<Stmt>>) -> Self {
        Self {
            data: NodeData::default(),
            label: RuleLabel::Case,
            cases,
            arrow,
            body,
        }
    }

    pub fn default_case(arrow: bool, body: Vec<Arc<Stmt>>) -> Self {
        Self {
            data: NodeData::default(),
            label: RuleLabel::Default,
            cases: Vec::new(),
            arrow,
            body,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwitchExp {
    pub data: NodeData,
    pub value: Arc<Expr>,
    pub rules: Vec<SwitchExprRule>,
}

impl SwitchExp {
    pub fn new(value: impl Into<Arc<Expr>>, rules: Vec<SwitchExprRule>) -> Self {
        Self {
            data: NodeData::default(),
            value: value.into(),
            rules,
        }
    }
}

// ============================================================================
// Access and Invocation
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub data: NodeData,
    pub func: Arc<Expr>,
    pub args: Vec<Arc<Expr>>,
}

impl Call {
    pub fn new<I, T>(func: impl Into<Arc<Expr>>, args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Arc<Expr>>,
    {
        Self {
            data: NodeData::default(),
            func: func.into(),
            args: exprs(args),
        }
    }
}

/// `receiver.member`, where member is a name, call, `this`, `super` form,
/// inner creation or explicit generic invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub data: NodeData,
    pub receiver: Arc<Expr>,
    pub member: Arc<Expr>,
}

impl Member {
    pub fn new(receiver: impl Into<Arc<Expr>>, member: impl Into<Arc<Expr>>) -> Self {
        Self {
            data: NodeData::default(),
            receiver: receiver.into(),
            member: member.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayAccess {
    pub data: NodeData,
    pub receiver: Arc<Expr>,
    pub index: Arc<Expr>,
}

impl ArrayAccess {
    pub fn new(receiver: impl Into<Arc<Expr>>, index: impl Into<Arc<Expr>>) -> Self {
        Self {
            data: NodeData::default(),
            receiver: receiver.into(),
            index: index.into(),
        }
    }
}

/// What precedes `::` in a method reference.
#[derive(Debug, Clone, PartialEq)]
pub enum ReferenceTarget {
    Expr(Arc<Expr>),
    Type(Arc<Type>),
}

/// `target::<T>id` or `target::new`.
#[derive(Debug, Clone, PartialEq)]
pub struct Reference {
    pub data: NodeData,
    pub target: ReferenceTarget,
    pub type_args: Option<TypeArguments>,
    pub id: Option<Identifier>,
    pub new: bool,
}

impl Reference {
    /// Fails unless exactly one of `id` and `new` is given.
    pub fn new(
        target: ReferenceTarget,
        type_args: Option<TypeArguments>,
        id: Option<Identifier>,
        new: bool,
    ) -> Result<Self, AstError> {
        if id.is_some() == new {
            let field = if new { "new" } else { "id" };
            return Err(AstError::new(
                "Reference",
                field,
                "exactly one of id and new must be given",
            ));
        }
        Ok(Self {
            data: NodeData::default(),
            target,
            type_args,
            id,
            new,
        })
    }
}

/// `<T>value`, where value is a call, `this(..)` or `super..`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExplicitGenericInvocation {
    pub data: NodeData,
    pub type_args: TypeArguments,
    pub value: Arc<Expr>,
}

impl ExplicitGenericInvocation {
    pub fn new(type_args: TypeArguments, value: impl Into<Arc<Expr>>) -> Self {
        Self {
            data: NodeData::default(),
            type_args,
            value: value.into(),
        }
    }
}

impl From<Literal> for Arc<Expr> {
    fn from(literal: Literal) -> Self {
        Arc::new(Expr::Constant(Constant::new(literal)))
    }
}

impl From<Identifier> for Arc<Expr> {
    fn from(id: Identifier) -> Self {
        Arc::new(Expr::Name(Name::new(id)))
    }
}

impl_spanned!(DimExpr, SwitchExprRule);
