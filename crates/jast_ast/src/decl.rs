//! Declarations, parameters, modules and compilation units.

use crate::expr::Expr;
use crate::node::*;
use crate::stmt::{Block, Stmt};
use jast_diagnostics::AstError;
use std::sync::Arc;

/// Every member or type declaration variant.
#[derive(Debug, Clone, PartialEq)]
pub enum Decl {
    Empty(EmptyDeclaration),
    Field(FieldDeclaration),
    Method(MethodDeclaration),
    Constructor(ConstructorDeclaration),
    CompactConstructor(CompactConstructorDeclaration),
    Initializer(Initializer),
    Class(ClassDeclaration),
    Interface(InterfaceDeclaration),
    Enum(EnumDeclaration),
    Record(RecordDeclaration),
    Annotation(AnnotationDeclaration),
    AnnotationMethod(AnnotationMethodDeclaration),
}

macro_rules! decl_variants {
    ($($variant:ident($ty:ident)),* $(,)?) => {
        impl Decl {
            pub fn kind_name(&self) -> &'static str {
                match self {
                    $(Decl::$variant(_) => stringify!($ty),)*
                }
            }

            pub fn data(&self) -> &NodeData {
                match self {
                    $(Decl::$variant(n) => &n.data,)*
                }
            }

            pub fn data_mut(&mut self) -> &mut NodeData {
                match self {
                    $(Decl::$variant(n) => &mut n.data,)*
                }
            }
        }

        $(
            impl From<$ty> for Decl {
                fn from(node: $ty) -> Self {
                    Decl::$variant(node)
                }
            }

            impl From<$ty> for Arc<Decl> {
                fn from(node: $ty) -> Self {
                    Arc::new(Decl::$variant(node))
                }
            }
        )*

        impl_spanned!($($ty),*);
    };
}

decl_variants!(
    Empty(EmptyDeclaration),
    Field(FieldDeclaration),
    Method(MethodDeclaration),
    Constructor(ConstructorDeclaration),
    CompactConstructor(CompactConstructorDeclaration),
    Initializer(Initializer),
    Class(ClassDeclaration),
    Interface(InterfaceDeclaration),
    Enum(EnumDeclaration),
    Record(RecordDeclaration),
    Annotation(AnnotationDeclaration),
    AnnotationMethod(AnnotationMethodDeclaration),
);

impl Decl {
    /// Class, interface, enum, record and annotation declarations.
    pub fn is_type_declaration(&self) -> bool {
        matches!(
            self,
            Decl::Class(_) | Decl::Interface(_) | Decl::Enum(_) | Decl::Record(_) | Decl::Annotation(_)
        )
    }

    /// The declared modifiers, if the variant carries any.
    pub fn modifiers(&self) -> Option<&Vec<Modifier>> {
        match self {
            Decl::Field(d) => Some(&d.modifiers),
            Decl::Method(d) => Some(&d.modifiers),
            Decl::Constructor(d) => Some(&d.modifiers),
            Decl::CompactConstructor(d) => Some(&d.modifiers),
            Decl::Class(d) => Some(&d.modifiers),
            Decl::Interface(d) => Some(&d.modifiers),
            Decl::Enum(d) => Some(&d.modifiers),
            Decl::Record(d) => Some(&d.modifiers),
            Decl::Annotation(d) => Some(&d.modifiers),
            Decl::AnnotationMethod(d) => Some(&d.modifiers),
            Decl::Empty(_) | Decl::Initializer(_) => None,
        }
    }

    /// Replace the modifiers of a variant that carries them. Returns false
    /// for variants without modifiers.
    pub fn set_modifiers(&mut self, modifiers: Vec<Modifier>) -> bool {
        let slot = match self {
            Decl::Field(d) => &mut d.modifiers,
            Decl::Method(d) => &mut d.modifiers,
            Decl::Constructor(d) => &mut d.modifiers,
            Decl::CompactConstructor(d) => &mut d.modifiers,
            Decl::Class(d) => &mut d.modifiers,
            Decl::Interface(d) => &mut d.modifiers,
            Decl::Enum(d) => &mut d.modifiers,
            Decl::Record(d) => &mut d.modifiers,
            Decl::Annotation(d) => &mut d.modifiers,
            Decl::AnnotationMethod(d) => &mut d.modifiers,
            Decl::Empty(_) | Decl::Initializer(_) => return false,
        };
        *slot = modifiers;
        true
    }
}

impl Spanned for Decl {
    fn data(&self) -> &NodeData {
        Decl::data(self)
    }

    fn data_mut(&mut self) -> &mut NodeData {
        Decl::data_mut(self)
    }
}

fn reject_type_annotations(ty: &Type, node_kind: &'static str) -> Result<(), AstError> {
    if ty.annotations.is_empty() {
        Ok(())
    } else {
        Err(AstError::new(
            node_kind,
            "ty",
            "annotations belong to the declaration, not its type",
        ))
    }
}

// ============================================================================
// Declarators and Parameters
// ============================================================================

/// A declared name with trailing dims, `a[][]`.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclaratorId {
    pub data: NodeData,
    pub id: Identifier,
    pub dims: Vec<Dim>,
}

impl VariableDeclaratorId {
    pub fn new(id: impl Into<Identifier>) -> Self {
        Self {
            data: NodeData::default(),
            id: id.into(),
            dims: Vec::new(),
        }
    }

    pub fn with_dims(mut self, dims: Vec<Dim>) -> Self {
        self.dims = dims;
        self
    }
}

/// `id = init`. An array initializer is held as [`Expr::ArrayInit`].
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclarator {
    pub data: NodeData,
    pub id: VariableDeclaratorId,
    pub init: Option<Arc<Expr>>,
}

impl VariableDeclarator {
    pub fn new(id: VariableDeclaratorId) -> Self {
        Self {
            data: NodeData::default(),
            id,
            init: None,
        }
    }

    pub fn with_init(mut self, init: impl Into<Arc<Expr>>) -> Self {
        self.init = Some(init.into());
        self
    }
}

/// `Type Outer.this`
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiverParameter {
    pub data: NodeData,
    pub ty: Arc<Type>,
    /// Qualifiers in front of `this`.
    pub identifiers: Vec<Identifier>,
}

impl ReceiverParameter {
    pub fn new(ty: impl Into<Arc<Type>>, identifiers: Vec<Identifier>) -> Self {
        Self {
            data: NodeData::default(),
            ty: ty.into(),
            identifiers,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub data: NodeData,
    pub modifiers: Vec<Modifier>,
    pub ty: Arc<Type>,
    pub id: VariableDeclaratorId,
}

impl Parameter {
    pub fn new(ty: impl Into<Arc<Type>>, id: VariableDeclaratorId) -> Self {
        Self {
            data: NodeData::default(),
            modifiers: Vec::new(),
            ty: ty.into(),
            id,
        }
    }

    pub fn with_modifiers(mut self, modifiers: Vec<Modifier>) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// `final T @A ... id`
#[derive(Debug, Clone, PartialEq)]
pub struct VariableArityParameter {
    pub data: NodeData,
    pub modifiers: Vec<Modifier>,
    pub ty: Arc<Type>,
    pub annotations: Vec<Annotation>,
    pub id: Identifier,
}

impl VariableArityParameter {
    pub fn new(ty: impl Into<Arc<Type>>, id: impl Into<Identifier>) -> Self {
        Self {
            data: NodeData::default(),
            modifiers: Vec::new(),
            ty: ty.into(),
            annotations: Vec::new(),
            id: id.into(),
        }
    }

    pub fn with_modifiers(mut self, modifiers: Vec<Modifier>) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_annotations(mut self, annotations: Vec<Annotation>) -> Self {
        self.annotations = annotations;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormalParameter {
    Regular(Parameter),
    VariableArity(VariableArityParameter),
}

impl From<Parameter> for FormalParameter {
    fn from(param: Parameter) -> Self {
        FormalParameter::Regular(param)
    }
}

impl From<VariableArityParameter> for FormalParameter {
    fn from(param: VariableArityParameter) -> Self {
        FormalParameter::VariableArity(param)
    }
}

/// A parenthesized parameter list with an optional leading receiver.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FormalParameters {
    pub data: NodeData,
    pub receiver: Option<ReceiverParameter>,
    pub params: Vec<FormalParameter>,
}

impl FormalParameters {
    pub fn new(params: Vec<FormalParameter>) -> Self {
        Self {
            data: NodeData::default(),
            receiver: None,
            params,
        }
    }

    pub fn with_receiver(mut self, receiver: ReceiverParameter) -> Self {
        self.receiver = Some(receiver);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.receiver.is_none() && self.params.is_empty()
    }
}

// ============================================================================
// Members
// ============================================================================

/// A lone `;` in a type body.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EmptyDeclaration {
    pub data: NodeData,
}

impl EmptyDeclaration {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Fields, interface constants and annotation constants.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDeclaration {
    pub data: NodeData,
    pub modifiers: Vec<Modifier>,
    pub ty: Arc<Type>,
    pub declarators: Vec<VariableDeclarator>,
}

impl FieldDeclaration {
    /// Fails on an annotated type or an empty declarator list.
    pub fn new(ty: impl Into<Arc<Type>>, declarators: Vec<VariableDeclarator>) -> Result<Self, AstError> {
        let ty = ty.into();
        reject_type_annotations(&ty, "FieldDeclaration")?;
        non_empty(&declarators, "FieldDeclaration", "declarators")?;
        Ok(Self {
            data: NodeData::default(),
            modifiers: Vec::new(),
            ty,
            declarators,
        })
    }

    pub fn with_modifiers(mut self, modifiers: Vec<Modifier>) -> Self {
        self.modifiers = modifiers;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MethodDeclaration {
    pub data: NodeData,
    pub modifiers: Vec<Modifier>,
    pub type_params: Option<TypeParameters>,
    /// Annotations between the type parameters and the return type.
    pub annotations: Vec<Annotation>,
    pub return_type: Arc<Type>,
    pub id: Identifier,
    pub params: FormalParameters,
    pub dims: Vec<Dim>,
    pub throws: Vec<QualifiedName>,
    /// `None` for abstract and native methods.
    pub body: Option<Block>,
}

impl MethodDeclaration {
    pub fn new(return_type: impl Into<Arc<Type>>, id: impl Into<Identifier>, params: FormalParameters) -> Self {
        Self {
            data: NodeData::default(),
            modifiers: Vec::new(),
            type_params: None,
            annotations: Vec::new(),
            return_type: return_type.into(),
            id: id.into(),
            params,
            dims: Vec::new(),
            throws: Vec::new(),
            body: None,
        }
    }

    pub fn with_modifiers(mut self, modifiers: Vec<Modifier>) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_type_params(mut self, type_params: TypeParameters) -> Self {
        self.type_params = Some(type_params);
        self
    }

    pub fn with_annotations(mut self, annotations: Vec<Annotation>) -> Self {
        self.annotations = annotations;
        self
    }

    pub fn with_dims(mut self, dims: Vec<Dim>) -> Self {
        self.dims = dims;
        self
    }

    pub fn with_throws(mut self, throws: Vec<QualifiedName>) -> Self {
        self.throws = throws;
        self
    }

    pub fn with_body(mut self, body: Block) -> Self {
        self.body = Some(body);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConstructorDeclaration {
    pub data: NodeData,
    pub modifiers: Vec<Modifier>,
    pub type_params: Option<TypeParameters>,
    pub id: Identifier,
    pub params: FormalParameters,
    pub throws: Vec<QualifiedName>,
    pub body: Block,
}

impl ConstructorDeclaration {
    pub fn new(id: impl Into<Identifier>, params: FormalParameters, body: Block) -> Self {
        Self {
            data: NodeData::default(),
            modifiers: Vec::new(),
            type_params: None,
            id: id.into(),
            params,
            throws: Vec::new(),
            body,
        }
    }

    pub fn with_modifiers(mut self, modifiers: Vec<Modifier>) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_type_params(mut self, type_params: TypeParameters) -> Self {
        self.type_params = Some(type_params);
        self
    }

    pub fn with_throws(mut self, throws: Vec<QualifiedName>) -> Self {
        self.throws = throws;
        self
    }
}

/// A record constructor without a parameter list.
#[derive(Debug, Clone, PartialEq)]
pub struct CompactConstructorDeclaration {
    pub data: NodeData,
    pub modifiers: Vec<Modifier>,
    pub id: Identifier,
    pub body: Block,
}

impl CompactConstructorDeclaration {
    pub fn new(id: impl Into<Identifier>, body: Block) -> Self {
        Self {
            data: NodeData::default(),
            modifiers: Vec::new(),
            id: id.into(),
            body,
        }
    }

    pub fn with_modifiers(mut self, modifiers: Vec<Modifier>) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// `{ ... }` or `static { ... }` in a class body.
#[derive(Debug, Clone, PartialEq)]
pub struct Initializer {
    pub data: NodeData,
    pub body: Block,
    pub static_: bool,
}

impl Initializer {
    pub fn new(body: Block, static_: bool) -> Self {
        Self {
            data: NodeData::default(),
            body,
            static_,
        }
    }
}

// ============================================================================
// Type Declarations
// ============================================================================

fn decls<I, T>(items: I) -> Vec<Arc<Decl>>
where
    I: IntoIterator<Item = T>,
    T: Into<Arc<Decl>>,
{
    items.into_iter().map(Into::into).collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassDeclaration {
    pub data: NodeData,
    pub modifiers: Vec<Modifier>,
    pub id: Identifier,
    pub type_params: Option<TypeParameters>,
    pub extends: Option<Arc<Type>>,
    pub implements: Vec<Arc<Type>>,
    pub permits: Vec<Arc<Type>>,
    pub body: Vec<Arc<Decl>>,
}

impl ClassDeclaration {
    pub fn new<I, T>(id: impl Into<Identifier>, body: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Arc<Decl>>,
    {
        Self {
            data: NodeData::default(),
            modifiers: Vec::new(),
            id: id.into(),
            type_params: None,
            extends: None,
            implements: Vec::new(),
            permits: Vec::new(),
            body: decls(body),
        }
    }

    pub fn with_modifiers(mut self, modifiers: Vec<Modifier>) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_type_params(mut self, type_params: TypeParameters) -> Self {
        self.type_params = Some(type_params);
        self
    }

    pub fn with_extends(mut self, extends: impl Into<Arc<Type>>) -> Self {
        self.extends = Some(extends.into());
        self
    }

    pub fn with_implements(mut self, implements: Vec<Arc<Type>>) -> Self {
        self.implements = implements;
        self
    }

    pub fn with_permits(mut self, permits: Vec<Arc<Type>>) -> Self {
        self.permits = permits;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceDeclaration {
    pub data: NodeData,
    pub modifiers: Vec<Modifier>,
    pub id: Identifier,
    pub type_params: Option<TypeParameters>,
    pub extends: Vec<Arc<Type>>,
    pub permits: Vec<Arc<Type>>,
    pub body: Vec<Arc<Decl>>,
}

impl InterfaceDeclaration {
    pub fn new<I, T>(id: impl Into<Identifier>, body: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Arc<Decl>>,
    {
        Self {
            data: NodeData::default(),
            modifiers: Vec::new(),
            id: id.into(),
            type_params: None,
            extends: Vec::new(),
            permits: Vec::new(),
            body: decls(body),
        }
    }

    pub fn with_modifiers(mut self, modifiers: Vec<Modifier>) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_type_params(mut self, type_params: TypeParameters) -> Self {
        self.type_params = Some(type_params);
        self
    }

    pub fn with_extends(mut self, extends: Vec<Arc<Type>>) -> Self {
        self.extends = extends;
        self
    }

    pub fn with_permits(mut self, permits: Vec<Arc<Type>>) -> Self {
        self.permits = permits;
        self
    }
}

/// `@A NAME(args) { body }`
#[derive(Debug, Clone, PartialEq)]
pub struct EnumConstant {
    pub data: NodeData,
    pub annotations: Vec<Annotation>,
    pub id: Identifier,
    pub args: Option<Vec<Arc<Expr>>>,
    pub body: Option<Vec<Arc<Decl>>>,
}

impl EnumConstant {
    pub fn new(id: impl Into<Identifier>) -> Self {
        Self {
            data: NodeData::default(),
            annotations: Vec::new(),
            id: id.into(),
            args: None,
            body: None,
        }
    }

    pub fn with_annotations(mut self, annotations: Vec<Annotation>) -> Self {
        self.annotations = annotations;
        self
    }

    pub fn with_args(mut self, args: Vec<Arc<Expr>>) -> Self {
        self.args = Some(args);
        self
    }

    pub fn with_body(mut self, body: Vec<Arc<Decl>>) -> Self {
        self.body = Some(body);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumDeclaration {
    pub data: NodeData,
    pub modifiers: Vec<Modifier>,
    pub id: Identifier,
    pub implements: Vec<Arc<Type>>,
    pub constants: Vec<EnumConstant>,
    pub body: Vec<Arc<Decl>>,
}

impl EnumDeclaration {
    pub fn new(id: impl Into<Identifier>, constants: Vec<EnumConstant>, body: Vec<Arc<Decl>>) -> Self {
        Self {
            data: NodeData::default(),
            modifiers: Vec::new(),
            id: id.into(),
            implements: Vec::new(),
            constants,
            body,
        }
    }

    pub fn with_modifiers(mut self, modifiers: Vec<Modifier>) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_implements(mut self, implements: Vec<Arc<Type>>) -> Self {
        self.implements = implements;
        self
    }
}

/// One component in a record header, `@A int... values`.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordComponent {
    pub data: NodeData,
    pub annotations: Vec<Annotation>,
    pub ty: Arc<Type>,
    pub variable_arity: bool,
    pub id: Identifier,
}

impl RecordComponent {
    pub fn new(ty: impl Into<Arc<Type>>, id: impl Into<Identifier>) -> Self {
        Self {
            data: NodeData::default(),
            annotations: Vec::new(),
            ty: ty.into(),
            variable_arity: false,
            id: id.into(),
        }
    }

    pub fn with_annotations(mut self, annotations: Vec<Annotation>) -> Self {
        self.annotations = annotations;
        self
    }

    pub fn variable_arity(mut self) -> Self {
        self.variable_arity = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordDeclaration {
    pub data: NodeData,
    pub modifiers: Vec<Modifier>,
    pub id: Identifier,
    pub type_params: Option<TypeParameters>,
    pub components: Vec<RecordComponent>,
    pub implements: Vec<Arc<Type>>,
    pub body: Vec<Arc<Decl>>,
}

impl RecordDeclaration {
    pub fn new(id: impl Into<Identifier>, components: Vec<RecordComponent>, body: Vec<Arc<Decl>>) -> Self {
        Self {
            data: NodeData::default(),
            modifiers: Vec::new(),
            id: id.into(),
            type_params: None,
            components,
            implements: Vec::new(),
            body,
        }
    }

    pub fn with_modifiers(mut self, modifiers: Vec<Modifier>) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_type_params(mut self, type_params: TypeParameters) -> Self {
        self.type_params = Some(type_params);
        self
    }

    pub fn with_implements(mut self, implements: Vec<Arc<Type>>) -> Self {
        self.implements = implements;
        self
    }
}

/// `@interface Name { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationDeclaration {
    pub data: NodeData,
    pub modifiers: Vec<Modifier>,
    pub id: Identifier,
    pub body: Vec<Arc<Decl>>,
}

impl AnnotationDeclaration {
    pub fn new(id: impl Into<Identifier>, body: Vec<Arc<Decl>>) -> Self {
        Self {
            data: NodeData::default(),
            modifiers: Vec::new(),
            id: id.into(),
            body,
        }
    }

    pub fn with_modifiers(mut self, modifiers: Vec<Modifier>) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// `Type name() default value;` inside an annotation declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationMethodDeclaration {
    pub data: NodeData,
    pub modifiers: Vec<Modifier>,
    pub ty: Arc<Type>,
    pub id: Identifier,
    pub default: Option<ElementValue>,
}

impl AnnotationMethodDeclaration {
    /// Fails when the type carries annotations.
    pub fn new(ty: impl Into<Arc<Type>>, id: impl Into<Identifier>) -> Result<Self, AstError> {
        let ty = ty.into();
        reject_type_annotations(&ty, "AnnotationMethodDeclaration")?;
        Ok(Self {
            data: NodeData::default(),
            modifiers: Vec::new(),
            ty,
            id: id.into(),
            default: None,
        })
    }

    pub fn with_modifiers(mut self, modifiers: Vec<Modifier>) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_default(mut self, default: ElementValue) -> Self {
        self.default = Some(default);
        self
    }
}

// ============================================================================
// Packages, Imports and Modules
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct PackageDeclaration {
    pub data: NodeData,
    pub annotations: Vec<Annotation>,
    pub name: QualifiedName,
}

impl PackageDeclaration {
    pub fn new(name: QualifiedName) -> Self {
        Self {
            data: NodeData::default(),
            annotations: Vec::new(),
            name,
        }
    }

    pub fn with_annotations(mut self, annotations: Vec<Annotation>) -> Self {
        self.annotations = annotations;
        self
    }
}

/// `import [static] name[.*];`
#[derive(Debug, Clone, PartialEq)]
pub struct ImportDeclaration {
    pub data: NodeData,
    pub static_: bool,
    pub name: QualifiedName,
    pub on_demand: bool,
}

impl ImportDeclaration {
    pub fn new(name: QualifiedName, static_: bool, on_demand: bool) -> Self {
        Self {
            data: NodeData::default(),
            static_,
            name,
            on_demand,
        }
    }
}

/// `requires [transitive] [static] name;`
#[derive(Debug, Clone, PartialEq)]
pub struct RequiresDirective {
    pub data: NodeData,
    pub modifiers: Vec<Modifier>,
    pub name: QualifiedName,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportsDirective {
    pub data: NodeData,
    pub name: QualifiedName,
    pub to: Vec<QualifiedName>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OpensDirective {
    pub data: NodeData,
    pub name: QualifiedName,
    pub to: Vec<QualifiedName>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UsesDirective {
    pub data: NodeData,
    pub name: QualifiedName,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProvidesDirective {
    pub data: NodeData,
    pub name: QualifiedName,
    pub with: Vec<QualifiedName>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Directive {
    Requires(RequiresDirective),
    Exports(ExportsDirective),
    Opens(OpensDirective),
    Uses(UsesDirective),
    Provides(ProvidesDirective),
}

impl Directive {
    pub fn requires(modifiers: Vec<Modifier>, name: QualifiedName) -> Self {
        Directive::Requires(RequiresDirective {
            data: NodeData::default(),
            modifiers,
            name,
        })
    }

    pub fn exports(name: QualifiedName, to: Vec<QualifiedName>) -> Self {
        Directive::Exports(ExportsDirective {
            data: NodeData::default(),
            name,
            to,
        })
    }

    pub fn opens(name: QualifiedName, to: Vec<QualifiedName>) -> Self {
        Directive::Opens(OpensDirective {
            data: NodeData::default(),
            name,
            to,
        })
    }

    pub fn uses(name: QualifiedName) -> Self {
        Directive::Uses(UsesDirective {
            data: NodeData::default(),
            name,
        })
    }

    /// Fails when `with` is empty.
    pub fn provides(name: QualifiedName, with: Vec<QualifiedName>) -> Result<Self, AstError> {
        non_empty(&with, "ProvidesDirective", "with")?;
        Ok(Directive::Provides(ProvidesDirective {
            data: NodeData::default(),
            name,
            with,
        }))
    }

    pub fn data_mut(&mut self) -> &mut NodeData {
        match self {
            Directive::Requires(d) => &mut d.data,
            Directive::Exports(d) => &mut d.data,
            Directive::Opens(d) => &mut d.data,
            Directive::Uses(d) => &mut d.data,
            Directive::Provides(d) => &mut d.data,
        }
    }
}

/// `[open] module name { directives }`
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleDeclaration {
    pub data: NodeData,
    pub annotations: Vec<Annotation>,
    pub open: bool,
    pub name: QualifiedName,
    pub directives: Vec<Directive>,
}

impl ModuleDeclaration {
    pub fn new(name: QualifiedName, open: bool, directives: Vec<Directive>) -> Self {
        Self {
            data: NodeData::default(),
            annotations: Vec::new(),
            open,
            name,
            directives,
        }
    }

    pub fn with_annotations(mut self, annotations: Vec<Annotation>) -> Self {
        self.annotations = annotations;
        self
    }
}

// ============================================================================
// Compilation Units
// ============================================================================

#[derive(Debug, Clone, PartialEq, Default)]
pub struct OrdinaryCompilationUnit {
    pub data: NodeData,
    pub package: Option<PackageDeclaration>,
    pub imports: Vec<ImportDeclaration>,
    pub declarations: Vec<Arc<Decl>>,
}

impl OrdinaryCompilationUnit {
    pub fn new(
        package: Option<PackageDeclaration>,
        imports: Vec<ImportDeclaration>,
        declarations: Vec<Arc<Decl>>,
    ) -> Self {
        Self {
            data: NodeData::default(),
            package,
            imports,
            declarations,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModularCompilationUnit {
    pub data: NodeData,
    pub imports: Vec<ImportDeclaration>,
    pub module: ModuleDeclaration,
}

impl ModularCompilationUnit {
    pub fn new(imports: Vec<ImportDeclaration>, module: ModuleDeclaration) -> Self {
        Self {
            data: NodeData::default(),
            imports,
            module,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CompilationUnit {
    Ordinary(OrdinaryCompilationUnit),
    Modular(ModularCompilationUnit),
}

impl From<OrdinaryCompilationUnit> for CompilationUnit {
    fn from(unit: OrdinaryCompilationUnit) -> Self {
        CompilationUnit::Ordinary(unit)
    }
}

impl From<ModularCompilationUnit> for CompilationUnit {
    fn from(unit: ModularCompilationUnit) -> Self {
        CompilationUnit::Modular(unit)
    }
}

/// The root produced by any parse mode.
#[derive(Debug, Clone, PartialEq)]
pub enum Ast {
    CompilationUnit(CompilationUnit),
    Package(PackageDeclaration),
    Import(ImportDeclaration),
    Module(ModuleDeclaration),
    Decl(Arc<Decl>),
    Stmt(Arc<Stmt>),
    Expr(Arc<Expr>),
}

impl Ast {
    pub fn as_expr(&self) -> Option<&Arc<Expr>> {
        match self {
            Ast::Expr(expr) => Some(expr),
            _ => None,
        }
    }

    pub fn as_stmt(&self) -> Option<&Arc<Stmt>> {
        match self {
            Ast::Stmt(stmt) => Some(stmt),
            _ => None,
        }
    }

    pub fn as_decl(&self) -> Option<&Arc<Decl>> {
        match self {
            Ast::Decl(decl) => Some(decl),
            _ => None,
        }
    }

    pub fn as_compilation_unit(&self) -> Option<&CompilationUnit> {
        match self {
            Ast::CompilationUnit(unit) => Some(unit),
            _ => None,
        }
    }
}

impl From<CompilationUnit> for Ast {
    fn from(unit: CompilationUnit) -> Self {
        Ast::CompilationUnit(unit)
    }
}

impl From<Arc<Decl>> for Ast {
    fn from(decl: Arc<Decl>) -> Self {
        Ast::Decl(decl)
    }
}

impl From<Arc<Stmt>> for Ast {
    fn from(stmt: Arc<Stmt>) -> Self {
        Ast::Stmt(stmt)
    }
}

impl From<Arc<Expr>> for Ast {
    fn from(expr: Arc<Expr>) -> Self {
        Ast::Expr(expr)
    }
}

impl_spanned!(
    VariableDeclaratorId,
    VariableDeclarator,
    ReceiverParameter,
    Parameter,
    VariableArityParameter,
    FormalParameters,
    EnumConstant,
    RecordComponent,
    PackageDeclaration,
    ImportDeclaration,
    RequiresDirective,
    ExportsDirective,
    OpensDirective,
    UsesDirective,
    ProvidesDirective,
    ModuleDeclaration,
    OrdinaryCompilationUnit,
    ModularCompilationUnit,
);

#[cfg(test)]
mod tests {
    use super::*;

    fn annotated_int() -> Type {
        Type::new(TypeKind::Int).with_annotations(vec![Annotation::new(QualifiedName::parse_dotted("A").unwrap())])
    }

    #[test]
    fn test_field_rejects_type_annotations() {
        let declarator = VariableDeclarator::new(VariableDeclaratorId::new("x"));
        let err = FieldDeclaration::new(annotated_int(), vec![declarator.clone()]).unwrap_err();
        assert_eq!(err.field, "ty");
        assert_eq!(err.node_kind, "FieldDeclaration");
        assert!(FieldDeclaration::new(Type::new(TypeKind::Int), vec![declarator]).is_ok());
    }

    #[test]
    fn test_field_requires_declarators() {
        let err = FieldDeclaration::new(Type::new(TypeKind::Int), vec![]).unwrap_err();
        assert_eq!(err.field, "declarators");
    }

    #[test]
    fn test_annotation_method_rejects_type_annotations() {
        let err = AnnotationMethodDeclaration::new(annotated_int(), "value").unwrap_err();
        assert_eq!(err.field, "ty");
        assert_eq!(err.node_kind, "AnnotationMethodDeclaration");
    }

    #[test]
    fn test_set_modifiers() {
        let mut decl: Decl = ClassDeclaration::new("A", Vec::<Arc<Decl>>::new()).into();
        assert!(decl.set_modifiers(vec![ModifierKeyword::Public.into()]));
        assert_eq!(decl.modifiers().map(Vec::len), Some(1));
        let mut init: Decl = Initializer::new(Block::empty(), true).into();
        assert!(!init.set_modifiers(vec![]));
    }

    #[test]
    fn test_provides_requires_with() {
        let name = QualifiedName::parse_dotted("a.B").unwrap();
        assert_eq!(Directive::provides(name, vec![]).unwrap_err().field, "with");
    }
}
