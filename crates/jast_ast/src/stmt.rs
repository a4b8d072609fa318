//! Statement nodes.

use crate::decl::{Decl, VariableDeclarator, VariableDeclaratorId};
use crate::expr::{Expr, SwitchExprRule};
use crate::node::*;
use jast_diagnostics::AstError;
use std::sync::Arc;

/// Every statement variant.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Empty(Empty),
    Block(Block),
    LocalType(LocalTypeDeclaration),
    LocalVariable(LocalVariableDeclaration),
    Labeled(Labeled),
    Expression(ExpressionStmt),
    If(If),
    Assert(Assert),
    Switch(Switch),
    While(While),
    DoWhile(DoWhile),
    For(For),
    ForEach(ForEach),
    Break(Break),
    Continue(Continue),
    Return(Return),
    Throw(Throw),
    Synchronized(Synchronized),
    Try(Try),
    TryWithResources(TryWithResources),
    Yield(Yield),
}

macro_rules! stmt_variants {
    ($($variant:ident($ty:ident)),* $(,)?) => {
        impl Stmt {
            pub fn kind_name(&self) -> &'static str {
                match self {
                    $(Stmt::$variant(_) => stringify!($ty),)*
                }
            }

            pub fn data(&self) -> &NodeData {
                match self {
                    $(Stmt::$variant(n) => &n.data,)*
                }
            }

            pub fn data_mut(&mut self) -> &mut NodeData {
                match self {
                    $(Stmt::$variant(n) => &mut n.data,)*
                }
            }
        }

        $(
            impl From<$ty> for Stmt {
                fn from(node: $ty) -> Self {
                    Stmt::$variant(node)
                }
            }

            impl From<$ty> for Arc<Stmt> {
                fn from(node: $ty) -> Self {
                    Arc::new(Stmt::$variant(node))
                }
            }
        )*

        impl_spanned!($($ty),*);
    };
}

stmt_variants!(
    Empty(Empty),
    Block(Block),
    LocalType(LocalTypeDeclaration),
    LocalVariable(LocalVariableDeclaration),
    Labeled(Labeled),
    Expression(ExpressionStmt),
    If(If),
    Assert(Assert),
    Switch(Switch),
    While(While),
    DoWhile(DoWhile),
    For(For),
    ForEach(ForEach),
    Break(Break),
    Continue(Continue),
    Return(Return),
    Throw(Throw),
    Synchronized(Synchronized),
    Try(Try),
    TryWithResources(TryWithResources),
    Yield(Yield),
);

impl Spanned for Stmt {
    fn data(&self) -> &NodeData {
        Stmt::data(self)
    }

    fn data_mut(&mut self) -> &mut NodeData {
        Stmt::data_mut(self)
    }
}

fn stmts<I, T>(items: I) -> Vec<Arc<Stmt>>
where
    I: IntoIterator<Item = T>,
    T: Into<Arc<Stmt>>,
{
    items.into_iter().map(Into::into).collect()
}

// ============================================================================
// Simple Statements
// ============================================================================

/// `;`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Empty {
    pub data: NodeData,
}

impl Empty {
    pub fn new() -> Self {
        Self::default()
    }
}

/// `{ ... }`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    pub data: NodeData,
    pub body: Vec<Arc<Stmt>>,
}

impl Block {
    pub fn new<I, T>(body: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Arc<Stmt>>,
    {
        Self {
            data: NodeData::default(),
            body: stmts(body),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }
}

/// A class, interface, record or enum declared inside a block.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalTypeDeclaration {
    pub data: NodeData,
    pub decl: Arc<Decl>,
}

impl LocalTypeDeclaration {
    pub fn new(decl: impl Into<Arc<Decl>>) -> Result<Self, AstError> {
        let decl = decl.into();
        if !decl.is_type_declaration() {
            return Err(AstError::new(
                "LocalTypeDeclaration",
                "decl",
                format!("expected a type declaration, found {}", decl.kind_name()),
            ));
        }
        Ok(Self {
            data: NodeData::default(),
            decl,
        })
    }
}

/// `final int a = 1, b;`
#[derive(Debug, Clone, PartialEq)]
pub struct LocalVariableDeclaration {
    pub data: NodeData,
    pub modifiers: Vec<Modifier>,
    pub ty: Arc<Type>,
    pub declarators: Vec<VariableDeclarator>,
}

impl LocalVariableDeclaration {
    pub fn new(ty: impl Into<Arc<Type>>, declarators: Vec<VariableDeclarator>) -> Result<Self, AstError> {
        non_empty(&declarators, "LocalVariableDeclaration", "declarators")?;
        Ok(Self {
            data: NodeData::default(),
            modifiers: Vec::new(),
            ty: ty.into(),
            declarators,
        })
    }

    pub fn with_modifiers(mut self, modifiers: Vec<Modifier>) -> Self {
        self.modifiers = modifiers;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Labeled {
    pub data: NodeData,
    pub label: Identifier,
    pub body: Arc<Stmt>,
}

impl Labeled {
    pub fn new(label: impl Into<Identifier>, body: impl Into<Arc<Stmt>>) -> Self {
        Self {
            data: NodeData::default(),
            label: label.into(),
            body: body.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStmt {
    pub data: NodeData,
    pub value: Arc<Expr>,
}

impl ExpressionStmt {
    pub fn new(value: impl Into<Arc<Expr>>) -> Self {
        Self {
            data: NodeData::default(),
            value: value.into(),
        }
    }
}

// ============================================================================
// Control Flow
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct If {
    pub data: NodeData,
    pub test: Arc<Expr>,
    pub body: Arc<Stmt>,
    pub orelse: Option<Arc<Stmt>>,
}

impl If {
    pub fn new(test: impl Into<Arc<Expr>>, body: impl Into<Arc<Stmt>>) -> Self {
        Self {
            data: NodeData::default(),
            test: test.into(),
            body: body.into(),
            orelse: None,
        }
    }

    pub fn with_orelse(mut self, orelse: impl Into<Arc<Stmt>>) -> Self {
        self.orelse = Some(orelse.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Assert {
    pub data: NodeData,
    pub test: Arc<Expr>,
    pub msg: Option<Arc<Expr>>,
}

impl Assert {
    pub fn new(test: impl Into<Arc<Expr>>) -> Self {
        Self {
            data: NodeData::default(),
            test: test.into(),
            msg: None,
        }
    }

    pub fn with_msg(mut self, msg: impl Into<Arc<Expr>>) -> Self {
        self.msg = Some(msg.into());
        self
    }
}

/// `Type id` as a pattern switch label.
#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    pub data: NodeData,
    pub ty: Arc<Type>,
    pub id: Identifier,
}

impl Match {
    pub fn new(ty: impl Into<Arc<Type>>, id: impl Into<Identifier>) -> Self {
        Self {
            data: NodeData::default(),
            ty: ty.into(),
            id: id.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CaseValue {
    Expr(Arc<Expr>),
    Match(Match),
}

/// `case value:`
#[derive(Debug, Clone, PartialEq)]
pub struct Case {
    pub data: NodeData,
    pub value: CaseValue,
}

impl Case {
    pub fn new(value: CaseValue) -> Self {
        Self {
            data: NodeData::default(),
            value,
        }
    }

    pub fn expr(value: impl Into<Arc<Expr>>) -> Self {
        Self::new(CaseValue::Expr(value.into()))
    }
}

/// `default:`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DefaultCase {
    pub data: NodeData,
}

impl DefaultCase {
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SwitchLabel {
    Case(Case),
    Default(DefaultCase),
}

impl From<Case> for SwitchLabel {
    fn from(case: Case) -> Self {
        SwitchLabel::Case(case)
    }
}

impl From<DefaultCase> for SwitchLabel {
    fn from(default: DefaultCase) -> Self {
        SwitchLabel::Default(default)
    }
}

/// Labels followed by the statements they select.
#[derive(Debug, Clone, PartialEq)]
pub struct SwitchGroup {
    pub data: NodeData,
    pub labels: Vec<SwitchLabel>,
    pub body: Vec<Arc<Stmt>>,
}

impl SwitchGroup {
    pub fn new(labels: Vec<SwitchLabel>, body: Vec<Arc<Stmt>>) -> Result<Self, AstError> {
        non_empty(&labels, "SwitchGroup", "labels")?;
        non_empty(&body, "SwitchGroup", "statements")?;
        Ok(Self {
            data: NodeData::default(),
            labels,
            body,
        })
    }
}

/// The body of a switch statement.
///
/// Colon-form blocks hold statement groups plus trailing labels with no
/// statements; arrow-form blocks hold rules only.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SwitchBlock {
    pub data: NodeData,
    pub groups: Vec<SwitchGroup>,
    pub labels: Vec<SwitchLabel>,
    pub rules: Vec<SwitchExprRule>,
}

impl SwitchBlock {
    pub fn new(groups: Vec<SwitchGroup>, labels: Vec<SwitchLabel>) -> Self {
        Self {
            data: NodeData::default(),
            groups,
            labels,
            rules: Vec::new(),
        }
    }

    pub fn with_rules(rules: Vec<SwitchExprRule>) -> Self {
        Self {
            data: NodeData::default(),
            groups: Vec::new(),
            labels: Vec::new(),
            rules,
        }
    }

    /// Fails when rules are mixed with groups or labels.
    pub fn validate(&self) -> Result<(), AstError> {
        if !self.rules.is_empty() && (!self.groups.is_empty() || !self.labels.is_empty()) {
            return Err(AstError::new(
                "SwitchBlock",
                "rules",
                "switch rules cannot be mixed with statement groups",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Switch {
    pub data: NodeData,
    pub value: Arc<Expr>,
    pub body: SwitchBlock,
}

impl Switch {
    pub fn new(value: impl Into<Arc<Expr>>, body: SwitchBlock) -> Result<Self, AstError> {
        body.validate()?;
        Ok(Self {
            data: NodeData::default(),
            value: value.into(),
            body,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct While {
    pub data: NodeData,
    pub test: Arc<Expr>,
    pub body: Arc<Stmt>,
}

impl While {
    pub fn new(test: impl Into<Arc<Expr>>, body: impl Into<Arc<Stmt>>) -> Self {
        Self {
            data: NodeData::default(),
            test: test.into(),
            body: body.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DoWhile {
    pub data: NodeData,
    pub body: Arc<Stmt>,
    pub test: Arc<Expr>,
}

impl DoWhile {
    pub fn new(body: impl Into<Arc<Stmt>>, test: impl Into<Arc<Expr>>) -> Self {
        Self {
            data: NodeData::default(),
            body: body.into(),
            test: test.into(),
        }
    }
}

/// The first clause of a basic `for`.
#[derive(Debug, Clone, PartialEq)]
pub enum ForInit {
    Expressions(Vec<Arc<Expr>>),
    LocalVariable(LocalVariableDeclaration),
}

#[derive(Debug, Clone, PartialEq)]
pub struct For {
    pub data: NodeData,
    pub init: Option<ForInit>,
    pub test: Option<Arc<Expr>>,
    pub update: Vec<Arc<Expr>>,
    pub body: Arc<Stmt>,
}

impl For {
    pub fn new(body: impl Into<Arc<Stmt>>) -> Self {
        Self {
            data: NodeData::default(),
            init: None,
            test: None,
            update: Vec::new(),
            body: body.into(),
        }
    }

    pub fn with_init(mut self, init: ForInit) -> Self {
        self.init = Some(init);
        self
    }

    pub fn with_test(mut self, test: impl Into<Arc<Expr>>) -> Self {
        self.test = Some(test.into());
        self
    }

    pub fn with_update(mut self, update: Vec<Arc<Expr>>) -> Self {
        self.update = update;
        self
    }
}

/// `for (final T id : iter) body`
#[derive(Debug, Clone, PartialEq)]
pub struct ForEach {
    pub data: NodeData,
    pub modifiers: Vec<Modifier>,
    pub ty: Arc<Type>,
    pub id: VariableDeclaratorId,
    pub iter: Arc<Expr>,
    pub body: Arc<Stmt>,
}

impl ForEach {
    pub fn new(
        ty: impl Into<Arc<Type>>,
        id: VariableDeclaratorId,
        iter: impl Into<Arc<Expr>>,
        body: impl Into<Arc<Stmt>>,
    ) -> Self {
        Self {
            data: NodeData::default(),
            modifiers: Vec::new(),
            ty: ty.into(),
            id,
            iter: iter.into(),
            body: body.into(),
        }
    }

    pub fn with_modifiers(mut self, modifiers: Vec<Modifier>) -> Self {
        self.modifiers = modifiers;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Break {
    pub data: NodeData,
    pub label: Option<Identifier>,
}

impl Break {
    pub fn new(label: Option<Identifier>) -> Self {
        Self {
            data: NodeData::default(),
            label,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Continue {
    pub data: NodeData,
    pub label: Option<Identifier>,
}

impl Continue {
    pub fn new(label: Option<Identifier>) -> Self {
        Self {
            data: NodeData::default(),
            label,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Return {
    pub data: NodeData,
    pub value: Option<Arc<Expr>>,
}

impl Return {
    pub fn new(value: Option<Arc<Expr>>) -> Self {
        Self {
            data: NodeData::default(),
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Throw {
    pub data: NodeData,
    pub exc: Arc<Expr>,
}

impl Throw {
    pub fn new(exc: impl Into<Arc<Expr>>) -> Self {
        Self {
            data: NodeData::default(),
            exc: exc.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Synchronized {
    pub data: NodeData,
    pub lock: Arc<Expr>,
    pub body: Block,
}

impl Synchronized {
    pub fn new(lock: impl Into<Arc<Expr>>, body: Block) -> Self {
        Self {
            data: NodeData::default(),
            lock: lock.into(),
            body,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Yield {
    pub data: NodeData,
    pub value: Arc<Expr>,
}

impl Yield {
    pub fn new(value: impl Into<Arc<Expr>>) -> Self {
        Self {
            data: NodeData::default(),
            value: value.into(),
        }
    }
}

// ============================================================================
// Exceptions
// ============================================================================

/// `catch (final A | B id) { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct CatchClause {
    pub data: NodeData,
    pub modifiers: Vec<Modifier>,
    pub exceptions: Vec<QualifiedName>,
    pub id: Identifier,
    pub body: Block,
}

impl CatchClause {
    pub fn new(exceptions: Vec<QualifiedName>, id: impl Into<Identifier>, body: Block) -> Result<Self, AstError> {
        non_empty(&exceptions, "CatchClause", "exceptions")?;
        Ok(Self {
            data: NodeData::default(),
            modifiers: Vec::new(),
            exceptions,
            id: id.into(),
            body,
        })
    }

    pub fn with_modifiers(mut self, modifiers: Vec<Modifier>) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// `final Type id = init` inside `try (...)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    pub data: NodeData,
    pub modifiers: Vec<Modifier>,
    pub ty: Arc<Type>,
    pub declarator: VariableDeclarator,
}

impl Resource {
    pub fn new(ty: impl Into<Arc<Type>>, declarator: VariableDeclarator) -> Self {
        Self {
            data: NodeData::default(),
            modifiers: Vec::new(),
            ty: ty.into(),
            declarator,
        }
    }

    pub fn with_modifiers(mut self, modifiers: Vec<Modifier>) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// A try resource: a declaration or a reference to an effectively final variable.
#[derive(Debug, Clone, PartialEq)]
pub enum TryResource {
    Declared(Resource),
    Name(QualifiedName),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Try {
    pub data: NodeData,
    pub body: Block,
    pub catches: Vec<CatchClause>,
    pub finally: Option<Block>,
}

impl Try {
    /// Fails when there is neither a catch clause nor a finally block.
    pub fn new(body: Block, catches: Vec<CatchClause>, finally: Option<Block>) -> Result<Self, AstError> {
        if catches.is_empty() && finally.is_none() {
            return Err(AstError::new(
                "Try",
                "catches",
                "a try statement needs a catch clause or a finally block",
            ));
        }
        Ok(Self {
            data: NodeData::default(),
            body,
            catches,
            finally,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TryWithResources {
    pub data: NodeData,
    pub resources: Vec<TryResource>,
    pub body: Block,
    pub catches: Vec<CatchClause>,
    pub finally: Option<Block>,
}

impl TryWithResources {
    pub fn new(
        resources: Vec<TryResource>,
        body: Block,
        catches: Vec<CatchClause>,
        finally: Option<Block>,
    ) -> Result<Self, AstError> {
        non_empty(&resources, "TryWithResources", "resources")?;
        Ok(Self {
            data: NodeData::default(),
            resources,
            body,
            catches,
            finally,
        })
    }
}

impl_spanned!(Match, Case, DefaultCase, SwitchGroup, SwitchBlock, CatchClause, Resource);
