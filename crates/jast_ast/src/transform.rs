//! Rewriting transformer.
//!
//! A [`Transformer`] has one hook per concrete node kind, generated from the
//! same table as the [`Visitor`](crate::Visitor) hooks (`transform_bin_op`,
//! `transform_catch_clause`, `transform_import_declaration`, ...), plus one
//! hook per node family: [`Transformer::transform_expr`],
//! [`Transformer::transform_stmt`] and [`Transformer::transform_decl`].
//! Every hook returns a [`Rewrite`]: keep the node, replace it, delete it,
//! or splice a sequence in its place.
//!
//! A family hook sees the shared `Arc` and may replace an expression with
//! one of another kind. Its default, [`walk_expr`] (or [`walk_stmt`],
//! [`walk_decl`]), hands the node to the hook of its kind. A kind hook
//! rewrites within its kind, and its default, [`walk`], rewrites the
//! children field by field in canonical order.
//!
//! Rewriting is path-copying: a parent is rebuilt only when one of its
//! children changed, and every unchanged subtree is shared with the input.
//! [`transform`] stores the rewritten root back into its argument;
//! [`transform_keep`] returns it and leaves the input untouched.
//!
//! Deleting a required child fails with [`AstError::required`], splicing
//! into a field that is not a list fails with [`AstError::not_a_list`], and
//! emptying a list that needs an element fails with [`AstError::empty`].

use crate::children::NodeRef;
use crate::decl::*;
use crate::expr::*;
use crate::kinds::node_kinds;
use crate::node::*;
use crate::operators::*;
use crate::stmt::*;
use jast_diagnostics::AstError;
use std::sync::Arc;
use tracing::debug;

/// The outcome of a transformer hook.
#[derive(Debug, Clone)]
pub enum Rewrite<T> {
    Keep,
    Replace(Arc<T>),
    Delete,
    Splice(Vec<Arc<T>>),
}

impl<T> Rewrite<T> {
    pub fn replace(node: impl Into<Arc<T>>) -> Self {
        Rewrite::Replace(node.into())
    }
}

/// Re-wrap every node of a rewrite, e.g. a `BinOp` as an `Expr`.
fn lift<A, B>(rewrite: Rewrite<A>, wrap: impl Fn(Arc<A>) -> B) -> Rewrite<B> {
    match rewrite {
        Rewrite::Keep => Rewrite::Keep,
        Rewrite::Replace(node) => Rewrite::Replace(Arc::new(wrap(node))),
        Rewrite::Delete => Rewrite::Delete,
        Rewrite::Splice(nodes) => Rewrite::Splice(nodes.into_iter().map(|node| Arc::new(wrap(node))).collect()),
    }
}

fn owned<N: Clone>(node: Arc<N>) -> N {
    Arc::try_unwrap(node).unwrap_or_else(|shared| N::clone(&shared))
}

macro_rules! define_transformer {
    ($($variant:ident($ty:ident) => $visit:ident, $hook:ident);* $(;)?) => {
        /// Hooks called for every node, in pre-order.
        ///
        /// Call [`walk`] (or the `walk_*` function of a family) from an
        /// override to rewrite the children first.
        pub trait Transformer {
            fn transform_expr(&mut self, expr: &Arc<Expr>) -> Result<Rewrite<Expr>, AstError> {
                walk_expr(self, expr)
            }

            fn transform_stmt(&mut self, stmt: &Arc<Stmt>) -> Result<Rewrite<Stmt>, AstError> {
                walk_stmt(self, stmt)
            }

            fn transform_decl(&mut self, decl: &Arc<Decl>) -> Result<Rewrite<Decl>, AstError> {
                walk_decl(self, decl)
            }

            $(
                fn $hook(&mut self, node: &$ty) -> Result<Rewrite<$ty>, AstError> {
                    walk(self, node)
                }
            )*
        }

        $(
            impl Slot for $ty {
                type Node = $ty;

                fn rewrite_slot<T: Transformer + ?Sized>(&self, t: &mut T) -> Result<Rewrite<$ty>, AstError> {
                    t.$hook(self)
                }

                fn from_rewrite(node: Arc<$ty>) -> Self {
                    owned(node)
                }
            }

            impl Rewritable for $ty {
                fn rewrite_children<T: Transformer + ?Sized>(&self, t: &mut T) -> Result<Option<Self>, AstError> {
                    let mut copy = self.clone();
                    let mut r = Rebuild::new(t, NodeRef::from(self).kind_name());
                    copy.rewrite_fields(&mut r)?;
                    Ok(r.into_changed(copy))
                }
            }
        )*
    };
}

node_kinds!(define_transformer);

/// A node kind whose children a transformer can rewrite.
pub trait Rewritable: Clone {
    /// The node with its children rewritten, or `None` when nothing changed.
    fn rewrite_children<T: Transformer + ?Sized>(&self, t: &mut T) -> Result<Option<Self>, AstError>;
}

/// Rewrite the children of any node kind. The default of every kind hook.
pub fn walk<N, T>(t: &mut T, node: &N) -> Result<Rewrite<N>, AstError>
where
    N: Rewritable,
    T: Transformer + ?Sized,
{
    Ok(match node.rewrite_children(t)? {
        Some(node) => Rewrite::Replace(Arc::new(node)),
        None => Rewrite::Keep,
    })
}

/// Hand an expression to the hook of its kind.
pub fn walk_expr<T: Transformer + ?Sized>(t: &mut T, expr: &Arc<Expr>) -> Result<Rewrite<Expr>, AstError> {
    Expr::rewrite_slot(expr, t)
}

/// Hand a statement to the hook of its kind.
pub fn walk_stmt<T: Transformer + ?Sized>(t: &mut T, stmt: &Arc<Stmt>) -> Result<Rewrite<Stmt>, AstError> {
    Stmt::rewrite_slot(stmt, t)
}

/// Hand a declaration to the hook of its kind.
pub fn walk_decl<T: Transformer + ?Sized>(t: &mut T, decl: &Arc<Decl>) -> Result<Rewrite<Decl>, AstError> {
    Decl::rewrite_slot(decl, t)
}

// ============================================================================
// Slots
// ============================================================================

/// Anything a field can hold: a concrete node, a shared family node, or one
/// of the enums that choose between node kinds.
trait Slot: Clone {
    type Node;

    fn rewrite_slot<T: Transformer + ?Sized>(&self, t: &mut T) -> Result<Rewrite<Self::Node>, AstError>;

    fn from_rewrite(node: Arc<Self::Node>) -> Self;
}

macro_rules! family_slots {
    ($($ty:ident => $hook:ident),* $(,)?) => {
        $(impl Slot for Arc<$ty> {
            type Node = $ty;

            fn rewrite_slot<T: Transformer + ?Sized>(&self, t: &mut T) -> Result<Rewrite<$ty>, AstError> {
                t.$hook(self)
            }

            fn from_rewrite(node: Arc<$ty>) -> Self {
                node
            }
        })*
    };
}

family_slots!(Expr => transform_expr, Stmt => transform_stmt, Decl => transform_decl, Type => transform_type);

macro_rules! choice_slots {
    ($($choice:ident { $($variant:ident),* $(,)? })*) => {
        $(impl Slot for $choice {
            type Node = $choice;

            fn rewrite_slot<T: Transformer + ?Sized>(&self, t: &mut T) -> Result<Rewrite<$choice>, AstError> {
                Ok(match self {
                    $($choice::$variant(n) => {
                        lift(Slot::rewrite_slot(n, t)?, |n| $choice::$variant(Slot::from_rewrite(n)))
                    })*
                })
            }

            fn from_rewrite(node: Arc<$choice>) -> Self {
                owned(node)
            }
        })*
    };
}

choice_slots! {
    Expr {
        Name, Constant, This, Super, Class, Lambda, Assignment, IfExp, BinOp, InstanceOf, UnaryOp, PostOp,
        Cast, NewObject, NewInnerObject, NewArray, SwitchExp, Call, Member, ArrayAccess, Reference,
        ExplicitGenericInvocation, ArrayInit,
    }
    Stmt {
        Empty, Block, LocalType, LocalVariable, Labeled, Expression, If, Assert, Switch, While, DoWhile,
        For, ForEach, Break, Continue, Return, Throw, Synchronized, Try, TryWithResources, Yield,
    }
    Decl {
        Empty, Field, Method, Constructor, CompactConstructor, Initializer, Class, Interface, Enum, Record,
        Annotation, AnnotationMethod,
    }
    Modifier { Keyword, Annotation }
    AnnotationElement { Pair, Value }
    ElementValue { Expr, Annotation, Array }
    InstanceOfTarget { Type, Pattern }
    LambdaBody { Expr, Block }
    CaseItem { Expr, Pattern }
    ReferenceTarget { Expr, Type }
    CaseValue { Expr, Match }
    SwitchLabel { Case, Default }
    TryResource { Declared, Name }
    FormalParameter { Regular, VariableArity }
    Directive { Requires, Exports, Opens, Uses, Provides }
    CompilationUnit { Ordinary, Modular }
}

// ============================================================================
// Rebuilding
// ============================================================================

/// Applies a transformer to the children of one copied node and records
/// whether anything changed.
struct Rebuild<'t, T: ?Sized> {
    t: &'t mut T,
    kind: &'static str,
    changed: bool,
}

impl<'t, T: Transformer + ?Sized> Rebuild<'t, T> {
    fn new(t: &'t mut T, kind: &'static str) -> Self {
        Self { t, kind, changed: false }
    }

    fn into_changed<N>(self, node: N) -> Option<N> {
        self.changed.then_some(node)
    }

    fn one<S: Slot>(&mut self, field: &'static str, slot: &mut S) -> Result<(), AstError> {
        match slot.rewrite_slot(&mut *self.t)? {
            Rewrite::Keep => {}
            Rewrite::Replace(node) => {
                *slot = S::from_rewrite(node);
                self.changed = true;
            }
            Rewrite::Delete => return Err(AstError::required(self.kind, field)),
            Rewrite::Splice(_) => return Err(AstError::not_a_list(self.kind, field)),
        }
        Ok(())
    }

    fn opt<S: Slot>(&mut self, field: &'static str, slot: &mut Option<S>) -> Result<(), AstError> {
        let Some(node) = slot.as_ref() else {
            return Ok(());
        };
        match node.rewrite_slot(&mut *self.t)? {
            Rewrite::Keep => {}
            Rewrite::Replace(node) => {
                *slot = Some(S::from_rewrite(node));
                self.changed = true;
            }
            Rewrite::Delete => {
                debug!(node_kind = self.kind, field, "deleted optional child");
                *slot = None;
                self.changed = true;
            }
            Rewrite::Splice(_) => return Err(AstError::not_a_list(self.kind, field)),
        }
        Ok(())
    }

    fn list<S: Slot>(&mut self, field: &'static str, items: &mut Vec<S>) -> Result<(), AstError> {
        let mut rebuilt: Option<Vec<S>> = None;
        for (i, item) in items.iter().enumerate() {
            match item.rewrite_slot(&mut *self.t)? {
                Rewrite::Keep => {
                    if let Some(out) = rebuilt.as_mut() {
                        out.push(item.clone());
                    }
                }
                Rewrite::Replace(node) => {
                    rebuilt.get_or_insert_with(|| items[..i].to_vec()).push(S::from_rewrite(node));
                }
                Rewrite::Delete => {
                    debug!(node_kind = self.kind, field, index = i, "deleted list element");
                    rebuilt.get_or_insert_with(|| items[..i].to_vec());
                }
                Rewrite::Splice(nodes) => {
                    debug!(node_kind = self.kind, field, index = i, count = nodes.len(), "spliced list element");
                    rebuilt
                        .get_or_insert_with(|| items[..i].to_vec())
                        .extend(nodes.into_iter().map(S::from_rewrite));
                }
            }
        }
        if let Some(out) = rebuilt {
            *items = out;
            self.changed = true;
        }
        Ok(())
    }

    fn non_empty_list<S: Slot>(&mut self, field: &'static str, items: &mut Vec<S>) -> Result<(), AstError> {
        self.list(field, items)?;
        if items.is_empty() {
            return Err(AstError::empty(self.kind, field));
        }
        Ok(())
    }

    fn opt_list<S: Slot>(&mut self, field: &'static str, items: &mut Option<Vec<S>>) -> Result<(), AstError> {
        match items {
            Some(items) => self.list(field, items),
            None => Ok(()),
        }
    }
}

// ============================================================================
// Fields
// ============================================================================

/// Rewrites the fields of a copied node in canonical order.
trait Fields {
    fn rewrite_fields<T: Transformer + ?Sized>(&mut self, r: &mut Rebuild<'_, T>) -> Result<(), AstError>;
}

macro_rules! no_fields {
    ($($ty:ty),* $(,)?) => {
        $(impl Fields for $ty {
            fn rewrite_fields<T: Transformer + ?Sized>(&mut self, _: &mut Rebuild<'_, T>) -> Result<(), AstError> {
                Ok(())
            }
        })*
    };
}

no_fields!(
    Identifier,
    Literal,
    KeywordModifier,
    BinaryOperator,
    UnaryOperator,
    PostOperator,
    AssignOperator,
    Empty,
    DefaultCase,
    EmptyDeclaration,
);

macro_rules! fields {
    ($($ty:ty => |$n:ident, $r:ident| $body:block)*) => {
        $(impl Fields for $ty {
            fn rewrite_fields<T: Transformer + ?Sized>(&mut self, $r: &mut Rebuild<'_, T>) -> Result<(), AstError> {
                let $n = self;
                $body
                Ok(())
            }
        })*
    };
}

fields! {
    QualifiedName => |n, r| { r.non_empty_list("identifiers", &mut n.identifiers)?; }
    Annotation => |n, r| {
        r.one("name", &mut n.name)?;
        r.list("elements", &mut n.elements)?;
    }
    ElementValuePair => |n, r| {
        r.one("id", &mut n.id)?;
        r.one("value", &mut n.value)?;
    }
    ElementValueArrayInitializer => |n, r| { r.list("values", &mut n.values)?; }

    // Types
    Type => |n, r| {
        r.list("annotations", &mut n.annotations)?;
        match &mut n.kind {
            TypeKind::Class(class) => r.non_empty_list("coits", &mut class.coits)?,
            TypeKind::Array(array) => {
                r.one("elem", &mut array.elem)?;
                r.non_empty_list("dims", &mut array.dims)?;
            }
            TypeKind::Wildcard(wildcard) => r.opt("bound", &mut wildcard.bound)?,
            _ => {}
        }
    }
    Coit => |n, r| {
        r.list("annotations", &mut n.annotations)?;
        r.one("id", &mut n.id)?;
        r.opt("type_args", &mut n.type_args)?;
    }
    WildcardBound => |n, r| { r.one("ty", &mut n.ty)?; }
    TypeArguments => |n, r| {
        if !n.is_diamond() {
            r.non_empty_list("types", &mut n.types)?;
        }
    }
    Dim => |n, r| { r.list("annotations", &mut n.annotations)?; }
    TypeParameter => |n, r| {
        r.list("annotations", &mut n.annotations)?;
        r.one("id", &mut n.id)?;
        r.opt("bound", &mut n.bound)?;
    }
    TypeBound => |n, r| {
        r.list("annotations", &mut n.annotations)?;
        r.non_empty_list("types", &mut n.types)?;
    }
    TypeParameters => |n, r| { r.non_empty_list("parameters", &mut n.parameters)?; }
    Pattern => |n, r| {
        r.list("modifiers", &mut n.modifiers)?;
        r.one("ty", &mut n.ty)?;
        r.list("annotations", &mut n.annotations)?;
        r.one("id", &mut n.id)?;
    }
    GuardedPattern => |n, r| {
        r.one("pattern", &mut n.pattern)?;
        r.list("conditions", &mut n.conditions)?;
    }

    // Expressions
    Name => |n, r| { r.one("id", &mut n.id)?; }
    Constant => |n, r| { r.one("literal", &mut n.literal)?; }
    This => |n, r| { r.opt_list("args", &mut n.args)?; }
    Super => |n, r| {
        r.opt("type_args", &mut n.type_args)?;
        r.opt("id", &mut n.id)?;
        r.opt_list("args", &mut n.args)?;
    }
    ClassExpr => |n, r| { r.one("ty", &mut n.ty)?; }
    Lambda => |n, r| {
        match &mut n.params {
            LambdaParams::Single(id) => r.one("params", id)?,
            LambdaParams::Identifiers(ids) => r.list("params", ids)?,
            LambdaParams::Formal(params) => r.one("params", params)?,
        }
        r.one("body", &mut n.body)?;
    }
    Assignment => |n, r| {
        r.one("target", &mut n.target)?;
        r.opt("op", &mut n.op)?;
        r.one("value", &mut n.value)?;
    }
    IfExp => |n, r| {
        r.one("test", &mut n.test)?;
        r.one("body", &mut n.body)?;
        r.one("orelse", &mut n.orelse)?;
    }
    BinOp => |n, r| {
        r.one("left", &mut n.left)?;
        r.one("op", &mut n.op)?;
        r.one("right", &mut n.right)?;
    }
    InstanceOf => |n, r| {
        r.one("value", &mut n.value)?;
        r.one("target", &mut n.target)?;
    }
    UnaryOp => |n, r| {
        r.one("op", &mut n.op)?;
        r.one("operand", &mut n.operand)?;
    }
    PostOp => |n, r| {
        r.one("operand", &mut n.operand)?;
        r.one("op", &mut n.op)?;
    }
    Cast => |n, r| {
        r.list("annotations", &mut n.annotations)?;
        r.one("ty", &mut n.ty)?;
        r.one("value", &mut n.value)?;
    }
    NewObject => |n, r| {
        r.opt("type_args", &mut n.type_args)?;
        r.one("ty", &mut n.ty)?;
        r.list("args", &mut n.args)?;
        r.opt_list("body", &mut n.body)?;
    }
    NewInnerObject => |n, r| {
        r.opt("type_args", &mut n.type_args)?;
        r.one("id", &mut n.id)?;
        r.opt("class_type_args", &mut n.class_type_args)?;
        r.list("args", &mut n.args)?;
        r.opt_list("body", &mut n.body)?;
    }
    NewArray => |n, r| {
        r.one("ty", &mut n.ty)?;
        r.list("expr_dims", &mut n.expr_dims)?;
        r.list("dims", &mut n.dims)?;
        r.opt("init", &mut n.init)?;
    }
    DimExpr => |n, r| {
        r.list("annotations", &mut n.annotations)?;
        r.one("expr", &mut n.expr)?;
    }
    ArrayInitializer => |n, r| { r.list("values", &mut n.values)?; }
    SwitchExp => |n, r| {
        r.one("value", &mut n.value)?;
        r.list("rules", &mut n.rules)?;
    }
    SwitchExprRule => |n, r| {
        r.list("cases", &mut n.cases)?;
        r.list("body", &mut n.body)?;
    }
    Call => |n, r| {
        r.one("func", &mut n.func)?;
        r.list("args", &mut n.args)?;
    }
    Member => |n, r| {
        r.one("receiver", &mut n.receiver)?;
        r.one("member", &mut n.member)?;
    }
    ArrayAccess => |n, r| {
        r.one("receiver", &mut n.receiver)?;
        r.one("index", &mut n.index)?;
    }
    Reference => |n, r| {
        r.one("target", &mut n.target)?;
        r.opt("type_args", &mut n.type_args)?;
        r.opt("id", &mut n.id)?;
    }
    ExplicitGenericInvocation => |n, r| {
        r.one("type_args", &mut n.type_args)?;
        r.one("value", &mut n.value)?;
    }

    // Statements
    Block => |n, r| { r.list("body", &mut n.body)?; }
    LocalTypeDeclaration => |n, r| { r.one("decl", &mut n.decl)?; }
    LocalVariableDeclaration => |n, r| {
        r.list("modifiers", &mut n.modifiers)?;
        r.one("ty", &mut n.ty)?;
        r.non_empty_list("declarators", &mut n.declarators)?;
    }
    Labeled => |n, r| {
        r.one("label", &mut n.label)?;
        r.one("body", &mut n.body)?;
    }
    ExpressionStmt => |n, r| { r.one("value", &mut n.value)?; }
    If => |n, r| {
        r.one("test", &mut n.test)?;
        r.one("body", &mut n.body)?;
        r.opt("orelse", &mut n.orelse)?;
    }
    Assert => |n, r| {
        r.one("test", &mut n.test)?;
        r.opt("msg", &mut n.msg)?;
    }
    Match => |n, r| {
        r.one("ty", &mut n.ty)?;
        r.one("id", &mut n.id)?;
    }
    Case => |n, r| { r.one("value", &mut n.value)?; }
    SwitchGroup => |n, r| {
        r.non_empty_list("labels", &mut n.labels)?;
        r.non_empty_list("body", &mut n.body)?;
    }
    SwitchBlock => |n, r| {
        r.list("groups", &mut n.groups)?;
        r.list("labels", &mut n.labels)?;
        r.list("rules", &mut n.rules)?;
    }
    Switch => |n, r| {
        r.one("value", &mut n.value)?;
        r.one("body", &mut n.body)?;
    }
    While => |n, r| {
        r.one("test", &mut n.test)?;
        r.one("body", &mut n.body)?;
    }
    DoWhile => |n, r| {
        r.one("body", &mut n.body)?;
        r.one("test", &mut n.test)?;
    }
    For => |n, r| {
        match &mut n.init {
            Some(ForInit::Expressions(exprs)) => r.list("init", exprs)?,
            Some(ForInit::LocalVariable(local)) => r.one("init", local)?,
            None => {}
        }
        r.opt("test", &mut n.test)?;
        r.list("update", &mut n.update)?;
        r.one("body", &mut n.body)?;
    }
    ForEach => |n, r| {
        r.list("modifiers", &mut n.modifiers)?;
        r.one("ty", &mut n.ty)?;
        r.one("id", &mut n.id)?;
        r.one("iter", &mut n.iter)?;
        r.one("body", &mut n.body)?;
    }
    Break => |n, r| { r.opt("label", &mut n.label)?; }
    Continue => |n, r| { r.opt("label", &mut n.label)?; }
    Return => |n, r| { r.opt("value", &mut n.value)?; }
    Throw => |n, r| { r.one("exc", &mut n.exc)?; }
    Synchronized => |n, r| {
        r.one("lock", &mut n.lock)?;
        r.one("body", &mut n.body)?;
    }
    Yield => |n, r| { r.one("value", &mut n.value)?; }
    CatchClause => |n, r| {
        r.list("modifiers", &mut n.modifiers)?;
        r.non_empty_list("exceptions", &mut n.exceptions)?;
        r.one("id", &mut n.id)?;
        r.one("body", &mut n.body)?;
    }
    Resource => |n, r| {
        r.list("modifiers", &mut n.modifiers)?;
        r.one("ty", &mut n.ty)?;
        r.one("declarator", &mut n.declarator)?;
    }
    Try => |n, r| {
        r.one("body", &mut n.body)?;
        r.list("catches", &mut n.catches)?;
        r.opt("finally", &mut n.finally)?;
        if n.catches.is_empty() && n.finally.is_none() {
            return Err(AstError::new(r.kind, "catches", "a try statement needs a catch clause or a finally block"));
        }
    }
    TryWithResources => |n, r| {
        r.non_empty_list("resources", &mut n.resources)?;
        r.one("body", &mut n.body)?;
        r.list("catches", &mut n.catches)?;
        r.opt("finally", &mut n.finally)?;
    }

    // Declarations
    VariableDeclaratorId => |n, r| {
        r.one("id", &mut n.id)?;
        r.list("dims", &mut n.dims)?;
    }
    VariableDeclarator => |n, r| {
        r.one("id", &mut n.id)?;
        r.opt("init", &mut n.init)?;
    }
    ReceiverParameter => |n, r| {
        r.one("ty", &mut n.ty)?;
        r.list("identifiers", &mut n.identifiers)?;
    }
    Parameter => |n, r| {
        r.list("modifiers", &mut n.modifiers)?;
        r.one("ty", &mut n.ty)?;
        r.one("id", &mut n.id)?;
    }
    VariableArityParameter => |n, r| {
        r.list("modifiers", &mut n.modifiers)?;
        r.one("ty", &mut n.ty)?;
        r.list("annotations", &mut n.annotations)?;
        r.one("id", &mut n.id)?;
    }
    FormalParameters => |n, r| {
        r.opt("receiver", &mut n.receiver)?;
        r.list("params", &mut n.params)?;
    }
    FieldDeclaration => |n, r| {
        r.list("modifiers", &mut n.modifiers)?;
        r.one("ty", &mut n.ty)?;
        r.non_empty_list("declarators", &mut n.declarators)?;
    }
    MethodDeclaration => |n, r| {
        r.list("modifiers", &mut n.modifiers)?;
        r.opt("type_params", &mut n.type_params)?;
        r.list("annotations", &mut n.annotations)?;
        r.one("return_type", &mut n.return_type)?;
        r.one("id", &mut n.id)?;
        r.one("params", &mut n.params)?;
        r.list("dims", &mut n.dims)?;
        r.list("throws", &mut n.throws)?;
        r.opt("body", &mut n.body)?;
    }
    ConstructorDeclaration => |n, r| {
        r.list("modifiers", &mut n.modifiers)?;
        r.opt("type_params", &mut n.type_params)?;
        r.one("id", &mut n.id)?;
        r.one("params", &mut n.params)?;
        r.list("throws", &mut n.throws)?;
        r.one("body", &mut n.body)?;
    }
    CompactConstructorDeclaration => |n, r| {
        r.list("modifiers", &mut n.modifiers)?;
        r.one("id", &mut n.id)?;
        r.one("body", &mut n.body)?;
    }
    Initializer => |n, r| { r.one("body", &mut n.body)?; }
    ClassDeclaration => |n, r| {
        r.list("modifiers", &mut n.modifiers)?;
        r.one("id", &mut n.id)?;
        r.opt("type_params", &mut n.type_params)?;
        r.opt("extends", &mut n.extends)?;
        r.list("implements", &mut n.implements)?;
        r.list("permits", &mut n.permits)?;
        r.list("body", &mut n.body)?;
    }
    InterfaceDeclaration => |n, r| {
        r.list("modifiers", &mut n.modifiers)?;
        r.one("id", &mut n.id)?;
        r.opt("type_params", &mut n.type_params)?;
        r.list("extends", &mut n.extends)?;
        r.list("permits", &mut n.permits)?;
        r.list("body", &mut n.body)?;
    }
    EnumConstant => |n, r| {
        r.list("annotations", &mut n.annotations)?;
        r.one("id", &mut n.id)?;
        r.opt_list("args", &mut n.args)?;
        r.opt_list("body", &mut n.body)?;
    }
    EnumDeclaration => |n, r| {
        r.list("modifiers", &mut n.modifiers)?;
        r.one("id", &mut n.id)?;
        r.list("implements", &mut n.implements)?;
        r.list("constants", &mut n.constants)?;
        r.list("body", &mut n.body)?;
    }
    RecordComponent => |n, r| {
        r.list("annotations", &mut n.annotations)?;
        r.one("ty", &mut n.ty)?;
        r.one("id", &mut n.id)?;
    }
    RecordDeclaration => |n, r| {
        r.list("modifiers", &mut n.modifiers)?;
        r.one("id", &mut n.id)?;
        r.opt("type_params", &mut n.type_params)?;
        r.list("components", &mut n.components)?;
        r.list("implements", &mut n.implements)?;
        r.list("body", &mut n.body)?;
    }
    AnnotationDeclaration => |n, r| {
        r.list("modifiers", &mut n.modifiers)?;
        r.one("id", &mut n.id)?;
        r.list("body", &mut n.body)?;
    }
    AnnotationMethodDeclaration => |n, r| {
        r.list("modifiers", &mut n.modifiers)?;
        r.one("ty", &mut n.ty)?;
        r.one("id", &mut n.id)?;
        r.opt("default", &mut n.default)?;
    }

    // Compilation units and modules
    PackageDeclaration => |n, r| {
        r.list("annotations", &mut n.annotations)?;
        r.one("name", &mut n.name)?;
    }
    ImportDeclaration => |n, r| { r.one("name", &mut n.name)?; }
    RequiresDirective => |n, r| {
        r.list("modifiers", &mut n.modifiers)?;
        r.one("name", &mut n.name)?;
    }
    ExportsDirective => |n, r| {
        r.one("name", &mut n.name)?;
        r.list("to", &mut n.to)?;
    }
    OpensDirective => |n, r| {
        r.one("name", &mut n.name)?;
        r.list("to", &mut n.to)?;
    }
    UsesDirective => |n, r| { r.one("name", &mut n.name)?; }
    ProvidesDirective => |n, r| {
        r.one("name", &mut n.name)?;
        r.non_empty_list("with", &mut n.with)?;
    }
    ModuleDeclaration => |n, r| {
        r.list("annotations", &mut n.annotations)?;
        r.one("name", &mut n.name)?;
        r.list("directives", &mut n.directives)?;
    }
    OrdinaryCompilationUnit => |n, r| {
        r.opt("package", &mut n.package)?;
        r.list("imports", &mut n.imports)?;
        r.list("declarations", &mut n.declarations)?;
    }
    ModularCompilationUnit => |n, r| {
        r.list("imports", &mut n.imports)?;
        r.one("module", &mut n.module)?;
    }
}

// ============================================================================
// Roots
// ============================================================================

/// A tree root a transformer can be run over.
pub trait Transformable: Clone {
    /// The rewritten root, or `None` when nothing changed.
    fn rewrite<T: Transformer + ?Sized>(&self, transformer: &mut T) -> Result<Option<Self>, AstError>;
}

fn rewrite_root<S: Slot, T: Transformer + ?Sized>(
    t: &mut T,
    node: &S,
    kind: &'static str,
) -> Result<Option<S>, AstError> {
    match node.rewrite_slot(t)? {
        Rewrite::Keep => Ok(None),
        Rewrite::Replace(node) => Ok(Some(S::from_rewrite(node))),
        Rewrite::Delete => Err(AstError::required(kind, "root")),
        Rewrite::Splice(_) => Err(AstError::not_a_list(kind, "root")),
    }
}

macro_rules! transformable {
    ($($ty:ty),*) => {
        $(impl Transformable for $ty {
            fn rewrite<T: Transformer + ?Sized>(&self, transformer: &mut T) -> Result<Option<Self>, AstError> {
                rewrite_root(transformer, self, NodeRef::from(self).kind_name())
            }
        })*
    };
}

transformable!(Arc<Expr>, Arc<Stmt>, Arc<Decl>, Arc<Type>, CompilationUnit);

impl Transformable for Ast {
    fn rewrite<T: Transformer + ?Sized>(&self, transformer: &mut T) -> Result<Option<Self>, AstError> {
        let kind = NodeRef::from(self).kind_name();
        Ok(match self {
            Ast::CompilationUnit(unit) => rewrite_root(transformer, unit, kind)?.map(Ast::CompilationUnit),
            Ast::Package(package) => rewrite_root(transformer, package, kind)?.map(Ast::Package),
            Ast::Import(import) => rewrite_root(transformer, import, kind)?.map(Ast::Import),
            Ast::Module(module) => rewrite_root(transformer, module, kind)?.map(Ast::Module),
            Ast::Decl(decl) => rewrite_root(transformer, decl, kind)?.map(Ast::Decl),
            Ast::Stmt(stmt) => rewrite_root(transformer, stmt, kind)?.map(Ast::Stmt),
            Ast::Expr(expr) => rewrite_root(transformer, expr, kind)?.map(Ast::Expr),
        })
    }
}

/// Rewrite `root` in place.
pub fn transform<N, T>(root: &mut N, transformer: &mut T) -> Result<(), AstError>
where
    N: Transformable,
    T: Transformer + ?Sized,
{
    if let Some(rewritten) = root.rewrite(transformer)? {
        *root = rewritten;
    }
    Ok(())
}

/// Rewrite a copy of `root`, sharing every unchanged subtree with it.
pub fn transform_keep<N, T>(root: &N, transformer: &mut T) -> Result<N, AstError>
where
    N: Transformable,
    T: Transformer + ?Sized,
{
    Ok(root.rewrite(transformer)?.unwrap_or_else(|| root.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operators::BinaryOperator;

    struct AddToSub;

    impl Transformer for AddToSub {
        fn transform_expr(&mut self, expr: &Arc<Expr>) -> Result<Rewrite<Expr>, AstError> {
            let rewrite = walk_expr(self, expr)?;
            let current = match &rewrite {
                Rewrite::Replace(node) => node.clone(),
                _ => expr.clone(),
            };
            if let Expr::BinOp(b) = &*current {
                if b.op == BinaryOperator::Add {
                    let mut b = b.clone();
                    b.op = BinaryOperator::Sub;
                    return Ok(Rewrite::replace(b));
                }
            }
            Ok(rewrite)
        }
    }

    fn sum(a: &str, b: &str) -> Arc<Expr> {
        BinOp::new(Name::new(a), BinaryOperator::Add, Name::new(b)).into()
    }

    #[test]
    fn test_replace_in_place() {
        let mut expr = sum("a", "b");
        transform(&mut expr, &mut AddToSub).unwrap();
        assert_eq!(*expr, Expr::from(BinOp::new(Name::new("a"), BinaryOperator::Sub, Name::new("b"))));
    }

    #[test]
    fn test_keep_shares_unchanged_subtrees() {
        let untouched: Arc<Stmt> = ExpressionStmt::new(Call::new(Name::new("f"), Vec::<Arc<Expr>>::new())).into();
        let changed: Arc<Stmt> = ExpressionStmt::new(sum("a", "b")).into();
        let block: Arc<Stmt> = Block::new([untouched.clone(), changed.clone()]).into();
        let out = transform_keep(&block, &mut AddToSub).unwrap();
        let Stmt::Block(new_block) = &*out else {
            panic!("expected a block");
        };
        assert!(Arc::ptr_eq(&new_block.body[0], &untouched));
        assert!(!Arc::ptr_eq(&new_block.body[1], &changed));
        assert_ne!(out, block);
    }

    struct DropReturns;

    impl Transformer for DropReturns {
        fn transform_stmt(&mut self, stmt: &Arc<Stmt>) -> Result<Rewrite<Stmt>, AstError> {
            match &**stmt {
                Stmt::Return(_) => Ok(Rewrite::Delete),
                _ => walk_stmt(self, stmt),
            }
        }
    }

    #[test]
    fn test_delete_from_list_and_required_field() {
        let block: Arc<Stmt> = Block::new([Return::new(None), Return::new(None)]).into();
        let out = transform_keep(&block, &mut DropReturns).unwrap();
        assert_eq!(*out, Stmt::from(Block::empty()));

        let labeled: Arc<Stmt> = Labeled::new("l", Return::new(None)).into();
        let err = transform_keep(&labeled, &mut DropReturns).unwrap_err();
        assert_eq!(err.node_kind, "Labeled");
        assert_eq!(err.field, "body");
    }

    struct DoubleExprStmts;

    impl Transformer for DoubleExprStmts {
        fn transform_stmt(&mut self, stmt: &Arc<Stmt>) -> Result<Rewrite<Stmt>, AstError> {
            match &**stmt {
                Stmt::Expression(_) => Ok(Rewrite::Splice(vec![stmt.clone(), stmt.clone()])),
                _ => walk_stmt(self, stmt),
            }
        }
    }

    #[test]
    fn test_splice() {
        let one: Arc<Stmt> = ExpressionStmt::new(Name::new("x")).into();
        let block: Arc<Stmt> = Block::new([one.clone(), Empty::new().into()]).into();
        let out = transform_keep(&block, &mut DoubleExprStmts).unwrap();
        let Stmt::Block(b) = &*out else {
            panic!("expected a block");
        };
        assert_eq!(b.body.len(), 3);

        let wrapped: Arc<Stmt> = While::new(Name::new("c"), one).into();
        let err = transform_keep(&wrapped, &mut DoubleExprStmts).unwrap_err();
        assert_eq!(err.field, "body");
    }

    fn catch(exception: &str) -> CatchClause {
        CatchClause::new(vec![QualifiedName::parse_dotted(exception).unwrap()], "e", Block::empty()).unwrap()
    }

    struct DropCatches(&'static str);

    impl Transformer for DropCatches {
        fn transform_catch_clause(&mut self, node: &CatchClause) -> Result<Rewrite<CatchClause>, AstError> {
            if node.exceptions.iter().any(|e| e.to_string() == self.0) {
                return Ok(Rewrite::Delete);
            }
            walk(self, node)
        }
    }

    #[test]
    fn test_delete_catch_clause() {
        let body = Block::new([Return::new(None)]);
        let stmt: Arc<Stmt> = Try::new(body, vec![catch("IOException"), catch("RuntimeException")], None)
            .unwrap()
            .into();
        let out = transform_keep(&stmt, &mut DropCatches("IOException")).unwrap();
        let Stmt::Try(t) = &*out else {
            panic!("expected a try statement");
        };
        assert_eq!(t.catches, vec![catch("RuntimeException")]);
        let Stmt::Try(original) = &*stmt else {
            panic!("expected a try statement");
        };
        assert!(Arc::ptr_eq(&t.body.body[0], &original.body.body[0]));

        let only: Arc<Stmt> = Try::new(Block::empty(), vec![catch("IOException")], None).unwrap().into();
        let err = transform_keep(&only, &mut DropCatches("IOException")).unwrap_err();
        assert_eq!(err.node_kind, "Try");
        assert_eq!(err.field, "catches");
    }

    struct ExpandImports;

    impl Transformer for ExpandImports {
        fn transform_import_declaration(
            &mut self,
            node: &ImportDeclaration,
        ) -> Result<Rewrite<ImportDeclaration>, AstError> {
            if !node.on_demand {
                return Ok(Rewrite::Keep);
            }
            let package = node.name.to_string();
            let imports = ["List", "Map"]
                .iter()
                .map(|class| {
                    let name = QualifiedName::parse_dotted(&format!("{package}.{class}"))?;
                    Ok(Arc::new(ImportDeclaration::new(name, false, false)))
                })
                .collect::<Result<Vec<_>, AstError>>()?;
            Ok(Rewrite::Splice(imports))
        }
    }

    fn import(name: &str, on_demand: bool) -> ImportDeclaration {
        ImportDeclaration::new(QualifiedName::parse_dotted(name).unwrap(), false, on_demand)
    }

    #[test]
    fn test_splice_imports() {
        let decl: Arc<Decl> = EmptyDeclaration::new().into();
        let mut unit = CompilationUnit::Ordinary(OrdinaryCompilationUnit::new(
            None,
            vec![import("java.io.File", false), import("java.util", true)],
            vec![decl.clone()],
        ));
        transform(&mut unit, &mut ExpandImports).unwrap();
        let CompilationUnit::Ordinary(unit) = &unit else {
            panic!("expected an ordinary compilation unit");
        };
        let names: Vec<String> = unit.imports.iter().map(|i| i.name.to_string()).collect();
        assert_eq!(names, vec!["java.io.File", "java.util.List", "java.util.Map"]);
        assert!(Arc::ptr_eq(&unit.declarations[0], &decl));
    }

    struct Rename;

    impl Transformer for Rename {
        fn transform_identifier(&mut self, node: &Identifier) -> Result<Rewrite<Identifier>, AstError> {
            Ok(match node.as_str() {
                "a" => Rewrite::replace(Identifier::new("x")),
                _ => Rewrite::Keep,
            })
        }

        fn transform_binary_operator(&mut self, node: &BinaryOperator) -> Result<Rewrite<BinaryOperator>, AstError> {
            Ok(match node {
                BinaryOperator::Add => Rewrite::replace(BinaryOperator::Mult),
                _ => Rewrite::Keep,
            })
        }
    }

    #[test]
    fn test_leaf_hooks() {
        let expr = sum("a", "b");
        let out = transform_keep(&expr, &mut Rename).unwrap();
        assert_eq!(*out, Expr::from(BinOp::new(Name::new("x"), BinaryOperator::Mult, Name::new("b"))));
        assert_eq!(*expr, Expr::from(BinOp::new(Name::new("a"), BinaryOperator::Add, Name::new("b"))));
    }

    struct DropIdentifiers;

    impl Transformer for DropIdentifiers {
        fn transform_identifier(&mut self, _node: &Identifier) -> Result<Rewrite<Identifier>, AstError> {
            Ok(Rewrite::Delete)
        }
    }

    #[test]
    fn test_emptied_list_fails() {
        let unit = CompilationUnit::Ordinary(OrdinaryCompilationUnit::new(None, vec![import("a.b", false)], vec![]));
        let err = transform_keep(&unit, &mut DropIdentifiers).unwrap_err();
        assert_eq!(err.node_kind, "QualifiedName");
        assert_eq!(err.field, "identifiers");
    }
}
