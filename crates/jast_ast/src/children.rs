//! Uniform child iteration.
//!
//! [`NodeRef`] is a borrowed view of any concrete node. [`NodeRef::children`]
//! yields `(field_name, child)` pairs in the canonical order for that node
//! kind; absent optional fields and empty lists are skipped. Field names are
//! the Rust field names of the node structs and are stable.

use crate::decl::*;
use crate::expr::*;
use crate::kinds::node_kinds;
use crate::node::*;
use crate::operators::*;
use crate::stmt::*;
use jast_core::text::Span;
use std::sync::Arc;

macro_rules! define_node_ref {
    ($($variant:ident($ty:ident) => $hook:ident, $transform:ident);* $(;)?) => {
        /// A borrowed reference to one concrete node.
        #[derive(Debug, Clone, Copy)]
        pub enum NodeRef<'a> {
            $($variant(&'a $ty),)*
        }

        impl<'a> NodeRef<'a> {
            fn variant_name(&self) -> &'static str {
                match self {
                    $(NodeRef::$variant(_) => stringify!($variant),)*
                }
            }

            /// The source span of the node, if it has one.
            pub fn span(&self) -> Option<Span> {
                match self {
                    $(NodeRef::$variant(n) => span_of(*n),)*
                }
            }
        }

        $(
            impl<'a> From<&'a $ty> for NodeRef<'a> {
                fn from(node: &'a $ty) -> Self {
                    NodeRef::$variant(node)
                }
            }
        )*
    };
}

node_kinds!(define_node_ref);

/// Span lookup that also covers the data-less operator kinds.
trait SpanOf {
    fn span_of(&self) -> Option<Span>;
}

impl<T: Spanned> SpanOf for T {
    fn span_of(&self) -> Option<Span> {
        self.span()
    }
}

macro_rules! spanless {
    ($($ty:ty),*) => {
        $(impl SpanOf for $ty {
            fn span_of(&self) -> Option<Span> {
                None
            }
        })*
    };
}

spanless!(BinaryOperator, UnaryOperator, PostOperator, AssignOperator);

fn span_of<T: SpanOf>(node: &T) -> Option<Span> {
    node.span_of()
}

/// A child field value: a single node or a list of nodes.
#[derive(Debug, Clone)]
pub enum Child<'a> {
    Node(NodeRef<'a>),
    List(Vec<NodeRef<'a>>),
}

impl<'a> Child<'a> {
    /// The nodes held by this child, in order.
    pub fn nodes(&self) -> Vec<NodeRef<'a>> {
        match self {
            Child::Node(node) => vec![*node],
            Child::List(nodes) => nodes.clone(),
        }
    }
}

// ============================================================================
// Family Dispatch
// ============================================================================

impl<'a> From<&'a Expr> for NodeRef<'a> {
    fn from(expr: &'a Expr) -> Self {
        match expr {
            Expr::Name(n) => NodeRef::Name(n),
            Expr::Constant(n) => NodeRef::Constant(n),
            Expr::This(n) => NodeRef::This(n),
            Expr::Super(n) => NodeRef::Super(n),
            Expr::Class(n) => NodeRef::ClassExpr(n),
            Expr::Lambda(n) => NodeRef::Lambda(n),
            Expr::Assignment(n) => NodeRef::Assignment(n),
            Expr::IfExp(n) => NodeRef::IfExp(n),
            Expr::BinOp(n) => NodeRef::BinOp(n),
            Expr::InstanceOf(n) => NodeRef::InstanceOf(n),
            Expr::UnaryOp(n) => NodeRef::UnaryOp(n),
            Expr::PostOp(n) => NodeRef::PostOp(n),
            Expr::Cast(n) => NodeRef::Cast(n),
            Expr::NewObject(n) => NodeRef::NewObject(n),
            Expr::NewInnerObject(n) => NodeRef::NewInnerObject(n),
            Expr::NewArray(n) => NodeRef::NewArray(n),
            Expr::SwitchExp(n) => NodeRef::SwitchExp(n),
            Expr::Call(n) => NodeRef::Call(n),
            Expr::Member(n) => NodeRef::Member(n),
            Expr::ArrayAccess(n) => NodeRef::ArrayAccess(n),
            Expr::Reference(n) => NodeRef::Reference(n),
            Expr::ExplicitGenericInvocation(n) => NodeRef::ExplicitGenericInvocation(n),
            Expr::ArrayInit(n) => NodeRef::ArrayInitializer(n),
        }
    }
}

impl<'a> From<&'a Stmt> for NodeRef<'a> {
    fn from(stmt: &'a Stmt) -> Self {
        match stmt {
            Stmt::Empty(n) => NodeRef::Empty(n),
            Stmt::Block(n) => NodeRef::Block(n),
            Stmt::LocalType(n) => NodeRef::LocalTypeDeclaration(n),
            Stmt::LocalVariable(n) => NodeRef::LocalVariableDeclaration(n),
            Stmt::Labeled(n) => NodeRef::Labeled(n),
            Stmt::Expression(n) => NodeRef::ExpressionStmt(n),
            Stmt::If(n) => NodeRef::If(n),
            Stmt::Assert(n) => NodeRef::Assert(n),
            Stmt::Switch(n) => NodeRef::Switch(n),
            Stmt::While(n) => NodeRef::While(n),
            Stmt::DoWhile(n) => NodeRef::DoWhile(n),
            Stmt::For(n) => NodeRef::For(n),
            Stmt::ForEach(n) => NodeRef::ForEach(n),
            Stmt::Break(n) => NodeRef::Break(n),
            Stmt::Continue(n) => NodeRef::Continue(n),
            Stmt::Return(n) => NodeRef::Return(n),
            Stmt::Throw(n) => NodeRef::Throw(n),
            Stmt::Synchronized(n) => NodeRef::Synchronized(n),
            Stmt::Try(n) => NodeRef::Try(n),
            Stmt::TryWithResources(n) => NodeRef::TryWithResources(n),
            Stmt::Yield(n) => NodeRef::Yield(n),
        }
    }
}

impl<'a> From<&'a Decl> for NodeRef<'a> {
    fn from(decl: &'a Decl) -> Self {
        match decl {
            Decl::Empty(n) => NodeRef::EmptyDeclaration(n),
            Decl::Field(n) => NodeRef::FieldDeclaration(n),
            Decl::Method(n) => NodeRef::MethodDeclaration(n),
            Decl::Constructor(n) => NodeRef::ConstructorDeclaration(n),
            Decl::CompactConstructor(n) => NodeRef::CompactConstructorDeclaration(n),
            Decl::Initializer(n) => NodeRef::Initializer(n),
            Decl::Class(n) => NodeRef::ClassDeclaration(n),
            Decl::Interface(n) => NodeRef::InterfaceDeclaration(n),
            Decl::Enum(n) => NodeRef::EnumDeclaration(n),
            Decl::Record(n) => NodeRef::RecordDeclaration(n),
            Decl::Annotation(n) => NodeRef::AnnotationDeclaration(n),
            Decl::AnnotationMethod(n) => NodeRef::AnnotationMethodDeclaration(n),
        }
    }
}

macro_rules! deref_arc {
    ($($ty:ty),*) => {
        $(impl<'a> From<&'a Arc<$ty>> for NodeRef<'a> {
            fn from(node: &'a Arc<$ty>) -> Self {
                NodeRef::from(&**node)
            }
        })*
    };
}

deref_arc!(Expr, Stmt, Decl, Type);

impl<'a> From<&'a Modifier> for NodeRef<'a> {
    fn from(modifier: &'a Modifier) -> Self {
        match modifier {
            Modifier::Keyword(n) => NodeRef::KeywordModifier(n),
            Modifier::Annotation(n) => NodeRef::Annotation(n),
        }
    }
}

impl<'a> From<&'a ElementValue> for NodeRef<'a> {
    fn from(value: &'a ElementValue) -> Self {
        match value {
            ElementValue::Expr(n) => NodeRef::from(n),
            ElementValue::Annotation(n) => NodeRef::Annotation(n),
            ElementValue::Array(n) => NodeRef::ElementValueArrayInitializer(n),
        }
    }
}

impl<'a> From<&'a AnnotationElement> for NodeRef<'a> {
    fn from(element: &'a AnnotationElement) -> Self {
        match element {
            AnnotationElement::Pair(n) => NodeRef::ElementValuePair(n),
            AnnotationElement::Value(n) => NodeRef::from(n),
        }
    }
}

impl<'a> From<&'a InstanceOfTarget> for NodeRef<'a> {
    fn from(target: &'a InstanceOfTarget) -> Self {
        match target {
            InstanceOfTarget::Type(n) => NodeRef::from(n),
            InstanceOfTarget::Pattern(n) => NodeRef::Pattern(n),
        }
    }
}

impl<'a> From<&'a LambdaBody> for NodeRef<'a> {
    fn from(body: &'a LambdaBody) -> Self {
        match body {
            LambdaBody::Expr(n) => NodeRef::from(n),
            LambdaBody::Block(n) => NodeRef::Block(n),
        }
    }
}

impl<'a> From<&'a CaseItem> for NodeRef<'a> {
    fn from(item: &'a CaseItem) -> Self {
        match item {
            CaseItem::Expr(n) => NodeRef::from(n),
            CaseItem::Pattern(n) => NodeRef::GuardedPattern(n),
        }
    }
}

impl<'a> From<&'a ReferenceTarget> for NodeRef<'a> {
    fn from(target: &'a ReferenceTarget) -> Self {
        match target {
            ReferenceTarget::Expr(n) => NodeRef::from(n),
            ReferenceTarget::Type(n) => NodeRef::from(n),
        }
    }
}

impl<'a> From<&'a CaseValue> for NodeRef<'a> {
    fn from(value: &'a CaseValue) -> Self {
        match value {
            CaseValue::Expr(n) => NodeRef::from(n),
            CaseValue::Match(n) => NodeRef::Match(n),
        }
    }
}

impl<'a> From<&'a SwitchLabel> for NodeRef<'a> {
    fn from(label: &'a SwitchLabel) -> Self {
        match label {
            SwitchLabel::Case(n) => NodeRef::Case(n),
            SwitchLabel::Default(n) => NodeRef::DefaultCase(n),
        }
    }
}

impl<'a> From<&'a TryResource> for NodeRef<'a> {
    fn from(resource: &'a TryResource) -> Self {
        match resource {
            TryResource::Declared(n) => NodeRef::Resource(n),
            TryResource::Name(n) => NodeRef::QualifiedName(n),
        }
    }
}

impl<'a> From<&'a FormalParameter> for NodeRef<'a> {
    fn from(param: &'a FormalParameter) -> Self {
        match param {
            FormalParameter::Regular(n) => NodeRef::Parameter(n),
            FormalParameter::VariableArity(n) => NodeRef::VariableArityParameter(n),
        }
    }
}

impl<'a> From<&'a Directive> for NodeRef<'a> {
    fn from(directive: &'a Directive) -> Self {
        match directive {
            Directive::Requires(n) => NodeRef::RequiresDirective(n),
            Directive::Exports(n) => NodeRef::ExportsDirective(n),
            Directive::Opens(n) => NodeRef::OpensDirective(n),
            Directive::Uses(n) => NodeRef::UsesDirective(n),
            Directive::Provides(n) => NodeRef::ProvidesDirective(n),
        }
    }
}

impl<'a> From<&'a CompilationUnit> for NodeRef<'a> {
    fn from(unit: &'a CompilationUnit) -> Self {
        match unit {
            CompilationUnit::Ordinary(n) => NodeRef::OrdinaryCompilationUnit(n),
            CompilationUnit::Modular(n) => NodeRef::ModularCompilationUnit(n),
        }
    }
}

impl<'a> From<&'a Ast> for NodeRef<'a> {
    fn from(ast: &'a Ast) -> Self {
        match ast {
            Ast::CompilationUnit(n) => NodeRef::from(n),
            Ast::Package(n) => NodeRef::PackageDeclaration(n),
            Ast::Import(n) => NodeRef::ImportDeclaration(n),
            Ast::Module(n) => NodeRef::ModuleDeclaration(n),
            Ast::Decl(n) => NodeRef::from(n),
            Ast::Stmt(n) => NodeRef::from(n),
            Ast::Expr(n) => NodeRef::from(n),
        }
    }
}

// ============================================================================
// Child Iteration
// ============================================================================

/// Collects `(field, child)` pairs, skipping absent fields and empty lists.
struct Fields<'a> {
    out: Vec<(&'static str, Child<'a>)>,
}

impl<'a> Fields<'a> {
    fn new() -> Self {
        Self { out: Vec::new() }
    }

    fn node(mut self, name: &'static str, node: impl Into<NodeRef<'a>>) -> Self {
        self.out.push((name, Child::Node(node.into())));
        self
    }

    fn opt<T: Into<NodeRef<'a>>>(self, name: &'static str, node: Option<T>) -> Self {
        match node {
            Some(node) => self.node(name, node),
            None => self,
        }
    }

    fn list<I>(mut self, name: &'static str, items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<NodeRef<'a>>,
    {
        let nodes: Vec<NodeRef<'a>> = items.into_iter().map(Into::into).collect();
        if !nodes.is_empty() {
            self.out.push((name, Child::List(nodes)));
        }
        self
    }

    fn opt_list<T>(self, name: &'static str, items: Option<&'a Vec<T>>) -> Self
    where
        &'a T: Into<NodeRef<'a>>,
    {
        match items {
            Some(items) => self.list(name, items.iter()),
            None => self,
        }
    }

    fn done(self) -> Vec<(&'static str, Child<'a>)> {
        self.out
    }
}

impl<'a> NodeRef<'a> {
    /// The node kind name, e.g. `BinOp`, `IntLiteral` or `Add`.
    pub fn kind_name(&self) -> &'static str {
        match self {
            NodeRef::Literal(n) => n.kind_name(),
            NodeRef::Type(n) => n.kind_name(),
            NodeRef::KeywordModifier(n) => n.keyword.kind_name(),
            NodeRef::BinaryOperator(op) => op.kind_name(),
            NodeRef::UnaryOperator(op) => op.kind_name(),
            NodeRef::PostOperator(op) => op.kind_name(),
            NodeRef::AssignOperator(op) => op.kind_name(),
            _ => self.variant_name(),
        }
    }

    /// The present children of this node, in canonical order.
    pub fn children(&self) -> Vec<(&'static str, Child<'a>)> {
        let f = Fields::new();
        match *self {
            NodeRef::Identifier(_)
            | NodeRef::Literal(_)
            | NodeRef::KeywordModifier(_)
            | NodeRef::BinaryOperator(_)
            | NodeRef::UnaryOperator(_)
            | NodeRef::PostOperator(_)
            | NodeRef::AssignOperator(_)
            | NodeRef::Empty(_)
            | NodeRef::DefaultCase(_)
            | NodeRef::EmptyDeclaration(_) => Vec::new(),

            NodeRef::QualifiedName(n) => f.list("identifiers", &n.identifiers).done(),
            NodeRef::Annotation(n) => f.node("name", &n.name).list("elements", &n.elements).done(),
            NodeRef::ElementValuePair(n) => f.node("id", &n.id).node("value", &n.value).done(),
            NodeRef::ElementValueArrayInitializer(n) => f.list("values", &n.values).done(),

            NodeRef::Type(n) => {
                let f = f.list("annotations", &n.annotations);
                match &n.kind {
                    TypeKind::Class(class) => f.list("coits", &class.coits).done(),
                    TypeKind::Array(array) => f.node("elem", &array.elem).list("dims", &array.dims).done(),
                    TypeKind::Wildcard(wildcard) => f.opt("bound", wildcard.bound.as_ref()).done(),
                    _ => f.done(),
                }
            }
            NodeRef::Coit(n) => f
                .list("annotations", &n.annotations)
                .node("id", &n.id)
                .opt("type_args", n.type_args.as_ref())
                .done(),
            NodeRef::WildcardBound(n) => f.node("ty", &n.ty).done(),
            NodeRef::TypeArguments(n) => f.list("types", &n.types).done(),
            NodeRef::Dim(n) => f.list("annotations", &n.annotations).done(),
            NodeRef::TypeParameter(n) => f
                .list("annotations", &n.annotations)
                .node("id", &n.id)
                .opt("bound", n.bound.as_ref())
                .done(),
            NodeRef::TypeBound(n) => f.list("annotations", &n.annotations).list("types", &n.types).done(),
            NodeRef::TypeParameters(n) => f.list("parameters", &n.parameters).done(),
            NodeRef::Pattern(n) => f
                .list("modifiers", &n.modifiers)
                .node("ty", &n.ty)
                .list("annotations", &n.annotations)
                .node("id", &n.id)
                .done(),
            NodeRef::GuardedPattern(n) => f.node("pattern", &n.pattern).list("conditions", &n.conditions).done(),

            // Expressions
            NodeRef::Name(n) => f.node("id", &n.id).done(),
            NodeRef::Constant(n) => f.node("literal", &n.literal).done(),
            NodeRef::This(n) => f.opt_list("args", n.args.as_ref()).done(),
            NodeRef::Super(n) => f
                .opt("type_args", n.type_args.as_ref())
                .opt("id", n.id.as_ref())
                .opt_list("args", n.args.as_ref())
                .done(),
            NodeRef::ClassExpr(n) => f.node("ty", &n.ty).done(),
            NodeRef::Lambda(n) => {
                let f = match &n.params {
                    LambdaParams::Single(id) => f.node("params", id),
                    LambdaParams::Identifiers(ids) => f.list("params", ids),
                    LambdaParams::Formal(params) => f.node("params", params),
                };
                f.node("body", &n.body).done()
            }
            NodeRef::Assignment(n) => f
                .node("target", &n.target)
                .opt("op", n.op.as_ref())
                .node("value", &n.value)
                .done(),
            NodeRef::IfExp(n) => f
                .node("test", &n.test)
                .node("body", &n.body)
                .node("orelse", &n.orelse)
                .done(),
            NodeRef::BinOp(n) => f.node("left", &n.left).node("op", &n.op).node("right", &n.right).done(),
            NodeRef::InstanceOf(n) => f.node("value", &n.value).node("target", &n.target).done(),
            NodeRef::UnaryOp(n) => f.node("op", &n.op).node("operand", &n.operand).done(),
            NodeRef::PostOp(n) => f.node("operand", &n.operand).node("op", &n.op).done(),
            NodeRef::Cast(n) => f
                .list("annotations", &n.annotations)
                .node("ty", &n.ty)
                .node("value", &n.value)
                .done(),
            NodeRef::NewObject(n) => f
                .opt("type_args", n.type_args.as_ref())
                .node("ty", &n.ty)
                .list("args", &n.args)
                .opt_list("body", n.body.as_ref())
                .done(),
            NodeRef::NewInnerObject(n) => f
                .opt("type_args", n.type_args.as_ref())
                .node("id", &n.id)
                .opt("class_type_args", n.class_type_args.as_ref())
                .list("args", &n.args)
                .opt_list("body", n.body.as_ref())
                .done(),
            NodeRef::NewArray(n) => f
                .node("ty", &n.ty)
                .list("expr_dims", &n.expr_dims)
                .list("dims", &n.dims)
                .opt("init", n.init.as_ref())
                .done(),
            NodeRef::DimExpr(n) => f.list("annotations", &n.annotations).node("expr", &n.expr).done(),
            NodeRef::ArrayInitializer(n) => f.list("values", &n.values).done(),
            NodeRef::SwitchExp(n) => f.node("value", &n.value).list("rules", &n.rules).done(),
            NodeRef::SwitchExprRule(n) => f.list("cases", &n.cases).list("body", &n.body).done(),
            NodeRef::Call(n) => f.node("func", &n.func).list("args", &n.args).done(),
            NodeRef::Member(n) => f.node("receiver", &n.receiver).node("member", &n.member).done(),
            NodeRef::ArrayAccess(n) => f.node("receiver", &n.receiver).node("index", &n.index).done(),
            NodeRef::Reference(n) => f
                .node("target", &n.target)
                .opt("type_args", n.type_args.as_ref())
                .opt("id", n.id.as_ref())
                .done(),
            NodeRef::ExplicitGenericInvocation(n) => {
                f.node("type_args", &n.type_args).node("value", &n.value).done()
            }

            // Statements
            NodeRef::Block(n) => f.list("body", &n.body).done(),
            NodeRef::LocalTypeDeclaration(n) => f.node("decl", &n.decl).done(),
            NodeRef::LocalVariableDeclaration(n) => f
                .list("modifiers", &n.modifiers)
                .node("ty", &n.ty)
                .list("declarators", &n.declarators)
                .done(),
            NodeRef::Labeled(n) => f.node("label", &n.label).node("body", &n.body).done(),
            NodeRef::ExpressionStmt(n) => f.node("value", &n.value).done(),
            NodeRef::If(n) => f
                .node("test", &n.test)
                .node("body", &n.body)
                .opt("orelse", n.orelse.as_ref())
                .done(),
            NodeRef::Assert(n) => f.node("test", &n.test).opt("msg", n.msg.as_ref()).done(),
            NodeRef::Match(n) => f.node("ty", &n.ty).node("id", &n.id).done(),
            NodeRef::Case(n) => f.node("value", &n.value).done(),
            NodeRef::SwitchGroup(n) => f.list("labels", &n.labels).list("body", &n.body).done(),
            NodeRef::SwitchBlock(n) => f
                .list("groups", &n.groups)
                .list("labels", &n.labels)
                .list("rules", &n.rules)
                .done(),
            NodeRef::Switch(n) => f.node("value", &n.value).node("body", &n.body).done(),
            NodeRef::While(n) => f.node("test", &n.test).node("body", &n.body).done(),
            NodeRef::DoWhile(n) => f.node("body", &n.body).node("test", &n.test).done(),
            NodeRef::For(n) => {
                let f = match &n.init {
                    Some(ForInit::Expressions(exprs)) => f.list("init", exprs),
                    Some(ForInit::LocalVariable(local)) => f.node("init", local),
                    None => f,
                };
                f.opt("test", n.test.as_ref())
                    .list("update", &n.update)
                    .node("body", &n.body)
                    .done()
            }
            NodeRef::ForEach(n) => f
                .list("modifiers", &n.modifiers)
                .node("ty", &n.ty)
                .node("id", &n.id)
                .node("iter", &n.iter)
                .node("body", &n.body)
                .done(),
            NodeRef::Break(n) => f.opt("label", n.label.as_ref()).done(),
            NodeRef::Continue(n) => f.opt("label", n.label.as_ref()).done(),
            NodeRef::Return(n) => f.opt("value", n.value.as_ref()).done(),
            NodeRef::Throw(n) => f.node("exc", &n.exc).done(),
            NodeRef::Synchronized(n) => f.node("lock", &n.lock).node("body", &n.body).done(),
            NodeRef::Yield(n) => f.node("value", &n.value).done(),
            NodeRef::CatchClause(n) => f
                .list("modifiers", &n.modifiers)
                .list("exceptions", &n.exceptions)
                .node("id", &n.id)
                .node("body", &n.body)
                .done(),
            NodeRef::Resource(n) => f
                .list("modifiers", &n.modifiers)
                .node("ty", &n.ty)
                .node("declarator", &n.declarator)
                .done(),
            NodeRef::Try(n) => f
                .node("body", &n.body)
                .list("catches", &n.catches)
                .opt("finally", n.finally.as_ref())
                .done(),
            NodeRef::TryWithResources(n) => f
                .list("resources", &n.resources)
                .node("body", &n.body)
                .list("catches", &n.catches)
                .opt("finally", n.finally.as_ref())
                .done(),

            // Declarations
            NodeRef::VariableDeclaratorId(n) => f.node("id", &n.id).list("dims", &n.dims).done(),
            NodeRef::VariableDeclarator(n) => f.node("id", &n.id).opt("init", n.init.as_ref()).done(),
            NodeRef::ReceiverParameter(n) => f.node("ty", &n.ty).list("identifiers", &n.identifiers).done(),
            NodeRef::Parameter(n) => f
                .list("modifiers", &n.modifiers)
                .node("ty", &n.ty)
                .node("id", &n.id)
                .done(),
            NodeRef::VariableArityParameter(n) => f
                .list("modifiers", &n.modifiers)
                .node("ty", &n.ty)
                .list("annotations", &n.annotations)
                .node("id", &n.id)
                .done(),
            NodeRef::FormalParameters(n) => f
                .opt("receiver", n.receiver.as_ref())
                .list("params", &n.params)
                .done(),
            NodeRef::FieldDeclaration(n) => f
                .list("modifiers", &n.modifiers)
                .node("ty", &n.ty)
                .list("declarators", &n.declarators)
                .done(),
            NodeRef::MethodDeclaration(n) => f
                .list("modifiers", &n.modifiers)
                .opt("type_params", n.type_params.as_ref())
                .list("annotations", &n.annotations)
                .node("return_type", &n.return_type)
                .node("id", &n.id)
                .opt("params", Some(&n.params).filter(|p| !p.is_empty()))
                .list("dims", &n.dims)
                .list("throws", &n.throws)
                .opt("body", n.body.as_ref())
                .done(),
            NodeRef::ConstructorDeclaration(n) => f
                .list("modifiers", &n.modifiers)
                .opt("type_params", n.type_params.as_ref())
                .node("id", &n.id)
                .opt("params", Some(&n.params).filter(|p| !p.is_empty()))
                .list("throws", &n.throws)
                .node("body", &n.body)
                .done(),
            NodeRef::CompactConstructorDeclaration(n) => f
                .list("modifiers", &n.modifiers)
                .node("id", &n.id)
                .node("body", &n.body)
                .done(),
            NodeRef::Initializer(n) => f.node("body", &n.body).done(),
            NodeRef::ClassDeclaration(n) => f
                .list("modifiers", &n.modifiers)
                .node("id", &n.id)
                .opt("type_params", n.type_params.as_ref())
                .opt("extends", n.extends.as_ref())
                .list("implements", &n.implements)
                .list("permits", &n.permits)
                .list("body", &n.body)
                .done(),
            NodeRef::InterfaceDeclaration(n) => f
                .list("modifiers", &n.modifiers)
                .node("id", &n.id)
                .opt("type_params", n.type_params.as_ref())
                .list("extends", &n.extends)
                .list("permits", &n.permits)
                .list("body", &n.body)
                .done(),
            NodeRef::EnumConstant(n) => f
                .list("annotations", &n.annotations)
                .node("id", &n.id)
                .opt_list("args", n.args.as_ref())
                .opt_list("body", n.body.as_ref())
                .done(),
            NodeRef::EnumDeclaration(n) => f
                .list("modifiers", &n.modifiers)
                .node("id", &n.id)
                .list("implements", &n.implements)
                .list("constants", &n.constants)
                .list("body", &n.body)
                .done(),
            NodeRef::RecordComponent(n) => f
                .list("annotations", &n.annotations)
                .node("ty", &n.ty)
                .node("id", &n.id)
                .done(),
            NodeRef::RecordDeclaration(n) => f
                .list("modifiers", &n.modifiers)
                .node("id", &n.id)
                .opt("type_params", n.type_params.as_ref())
                .list("components", &n.components)
                .list("implements", &n.implements)
                .list("body", &n.body)
                .done(),
            NodeRef::AnnotationDeclaration(n) => f
                .list("modifiers", &n.modifiers)
                .node("id", &n.id)
                .list("body", &n.body)
                .done(),
            NodeRef::AnnotationMethodDeclaration(n) => f
                .list("modifiers", &n.modifiers)
                .node("ty", &n.ty)
                .node("id", &n.id)
                .opt("default", n.default.as_ref())
                .done(),

            // Compilation units and modules
            NodeRef::PackageDeclaration(n) => f.list("annotations", &n.annotations).node("name", &n.name).done(),
            NodeRef::ImportDeclaration(n) => f.node("name", &n.name).done(),
            NodeRef::RequiresDirective(n) => f.list("modifiers", &n.modifiers).node("name", &n.name).done(),
            NodeRef::ExportsDirective(n) => f.node("name", &n.name).list("to", &n.to).done(),
            NodeRef::OpensDirective(n) => f.node("name", &n.name).list("to", &n.to).done(),
            NodeRef::UsesDirective(n) => f.node("name", &n.name).done(),
            NodeRef::ProvidesDirective(n) => f.node("name", &n.name).list("with", &n.with).done(),
            NodeRef::ModuleDeclaration(n) => f
                .list("annotations", &n.annotations)
                .node("name", &n.name)
                .list("directives", &n.directives)
                .done(),
            NodeRef::OrdinaryCompilationUnit(n) => f
                .opt("package", n.package.as_ref())
                .list("imports", &n.imports)
                .list("declarations", &n.declarations)
                .done(),
            NodeRef::ModularCompilationUnit(n) => f.list("imports", &n.imports).node("module", &n.module).done(),
        }
    }

    /// Field names of the present children, in canonical order.
    pub fn field_names(&self) -> Vec<&'static str> {
        self.children().into_iter().map(|(name, _)| name).collect()
    }
}
