//! Names, literals, modifiers, annotations, types and patterns.
//!
//! These are the leaf-ish building blocks shared by expressions, statements
//! and declarations. Every node embeds a [`NodeData`] holding its optional
//! source span.

use crate::expr::Expr;
use jast_core::text::Span;
use jast_diagnostics::AstError;
use std::fmt;
use std::sync::Arc;

// ============================================================================
// Core Node Data
// ============================================================================

/// Data shared by all AST nodes.
///
/// Equality always holds between two `NodeData` values so that derived
/// `PartialEq` on nodes compares structure only.
#[derive(Clone, Copy, Default)]
pub struct NodeData {
    /// Source span, set by the converter; `None` for user-built nodes.
    pub span: Option<Span>,
}

impl NodeData {
    pub fn new(span: Option<Span>) -> Self {
        Self { span }
    }
}

impl PartialEq for NodeData {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl fmt::Debug for NodeData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.span {
            Some(span) => write!(f, "@{:?}", span),
            None => write!(f, "@-"),
        }
    }
}

/// Access to the source span every node carries.
pub trait Spanned {
    fn data(&self) -> &NodeData;
    fn data_mut(&mut self) -> &mut NodeData;

    fn span(&self) -> Option<Span> {
        self.data().span
    }

    fn set_span(&mut self, span: Option<Span>) {
        self.data_mut().span = span;
    }

    fn with_span(mut self, span: Option<Span>) -> Self
    where
        Self: Sized,
    {
        self.set_span(span);
        self
    }
}

macro_rules! impl_spanned {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Spanned for $ty {
                #[inline]
                fn data(&self) -> &NodeData {
                    &self.data
                }
                #[inline]
                fn data_mut(&mut self) -> &mut NodeData {
                    &mut self.data
                }
            }
        )*
    };
}
pub(crate) use impl_spanned;

/// Check that a list holds at least one element.
pub(crate) fn non_empty<T>(items: &[T], node_kind: &'static str, field: &str) -> Result<(), AstError> {
    if items.is_empty() {
        Err(AstError::empty(node_kind, field))
    } else {
        Ok(())
    }
}

// ============================================================================
// Names
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub data: NodeData,
    pub name: String,
}

impl Identifier {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            data: NodeData::default(),
            name: name.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.name
    }
}

impl From<&str> for Identifier {
    fn from(name: &str) -> Self {
        Identifier::new(name)
    }
}

impl From<String> for Identifier {
    fn from(name: String) -> Self {
        Identifier::new(name)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A dotted name such as `java.util.List`.
#[derive(Debug, Clone, PartialEq)]
pub struct QualifiedName {
    pub data: NodeData,
    pub identifiers: Vec<Identifier>,
}

impl QualifiedName {
    pub fn new(identifiers: Vec<Identifier>) -> Result<Self, AstError> {
        non_empty(&identifiers, "QualifiedName", "identifiers")?;
        Ok(Self {
            data: NodeData::default(),
            identifiers,
        })
    }

    /// Build a name from dotted text. Fails on an empty string.
    pub fn parse_dotted(text: &str) -> Result<Self, AstError> {
        let identifiers = text
            .split('.')
            .filter(|part| !part.is_empty())
            .map(Identifier::new)
            .collect();
        Self::new(identifiers)
    }

    pub fn last(&self) -> Option<&Identifier> {
        self.identifiers.last()
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, id) in self.identifiers.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            f.write_str(&id.name)?;
        }
        Ok(())
    }
}

// ============================================================================
// Literals
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum LiteralKind {
    /// Value normalized from any base; `long` marks an `l`/`L` suffix.
    Int { value: u64, long: bool },
    /// `double` is true only for an explicit `d`/`D` suffix.
    Float { value: f64, double: bool },
    Bool(bool),
    /// Raw text between the quotes, escapes untouched.
    Char(String),
    /// Raw text between the quotes, escapes untouched.
    String(String),
    /// Lines of a text block with the common indentation removed.
    TextBlock(Vec<String>),
    Null,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    pub data: NodeData,
    pub kind: LiteralKind,
}

impl Literal {
    pub fn new(kind: LiteralKind) -> Self {
        Self {
            data: NodeData::default(),
            kind,
        }
    }

    pub fn int(value: u64) -> Self {
        Self::new(LiteralKind::Int { value, long: false })
    }

    pub fn long(value: u64) -> Self {
        Self::new(LiteralKind::Int { value, long: true })
    }

    pub fn float(value: f64, double: bool) -> Self {
        Self::new(LiteralKind::Float { value, double })
    }

    pub fn bool(value: bool) -> Self {
        Self::new(LiteralKind::Bool(value))
    }

    pub fn char(text: impl Into<String>) -> Self {
        Self::new(LiteralKind::Char(text.into()))
    }

    pub fn string(text: impl Into<String>) -> Self {
        Self::new(LiteralKind::String(text.into()))
    }

    pub fn text_block(lines: Vec<String>) -> Self {
        Self::new(LiteralKind::TextBlock(lines))
    }

    pub fn null() -> Self {
        Self::new(LiteralKind::Null)
    }

    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            LiteralKind::Int { .. } => "IntLiteral",
            LiteralKind::Float { .. } => "FloatLiteral",
            LiteralKind::Bool(_) => "BoolLiteral",
            LiteralKind::Char(_) => "CharLiteral",
            LiteralKind::String(_) => "StringLiteral",
            LiteralKind::TextBlock(_) => "TextBlock",
            LiteralKind::Null => "NullLiteral",
        }
    }
}

// ============================================================================
// Modifiers and Annotations
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModifierKeyword {
    Abstract,
    Default,
    Final,
    Native,
    NonSealed,
    Private,
    Protected,
    Public,
    Sealed,
    Static,
    Strictfp,
    Synchronized,
    Transient,
    Transitive,
    Volatile,
}

impl ModifierKeyword {
    pub fn as_str(self) -> &'static str {
        match self {
            ModifierKeyword::Abstract => "abstract",
            ModifierKeyword::Default => "default",
            ModifierKeyword::Final => "final",
            ModifierKeyword::Native => "native",
            ModifierKeyword::NonSealed => "non-sealed",
            ModifierKeyword::Private => "private",
            ModifierKeyword::Protected => "protected",
            ModifierKeyword::Public => "public",
            ModifierKeyword::Sealed => "sealed",
            ModifierKeyword::Static => "static",
            ModifierKeyword::Strictfp => "strictfp",
            ModifierKeyword::Synchronized => "synchronized",
            ModifierKeyword::Transient => "transient",
            ModifierKeyword::Transitive => "transitive",
            ModifierKeyword::Volatile => "volatile",
        }
    }

    pub fn from_keyword(text: &str) -> Option<Self> {
        Some(match text {
            "abstract" => ModifierKeyword::Abstract,
            "default" => ModifierKeyword::Default,
            "final" => ModifierKeyword::Final,
            "native" => ModifierKeyword::Native,
            "non-sealed" => ModifierKeyword::NonSealed,
            "private" => ModifierKeyword::Private,
            "protected" => ModifierKeyword::Protected,
            "public" => ModifierKeyword::Public,
            "sealed" => ModifierKeyword::Sealed,
            "static" => ModifierKeyword::Static,
            "strictfp" => ModifierKeyword::Strictfp,
            "synchronized" => ModifierKeyword::Synchronized,
            "transient" => ModifierKeyword::Transient,
            "transitive" => ModifierKeyword::Transitive,
            "volatile" => ModifierKeyword::Volatile,
            _ => return None,
        })
    }

    pub fn kind_name(self) -> &'static str {
        match self {
            ModifierKeyword::Abstract => "Abstract",
            ModifierKeyword::Default => "Default",
            ModifierKeyword::Final => "Final",
            ModifierKeyword::Native => "Native",
            ModifierKeyword::NonSealed => "NonSealed",
            ModifierKeyword::Private => "Private",
            ModifierKeyword::Protected => "Protected",
            ModifierKeyword::Public => "Public",
            ModifierKeyword::Sealed => "Sealed",
            ModifierKeyword::Static => "Static",
            ModifierKeyword::Strictfp => "Strictfp",
            ModifierKeyword::Synchronized => "Synchronized",
            ModifierKeyword::Transient => "Transient",
            ModifierKeyword::Transitive => "Transitive",
            ModifierKeyword::Volatile => "Volatile",
        }
    }
}

/// A modifier keyword occurrence.
#[derive(Debug, Clone, PartialEq)]
pub struct KeywordModifier {
    pub data: NodeData,
    pub keyword: ModifierKeyword,
}

impl KeywordModifier {
    pub fn new(keyword: ModifierKeyword) -> Self {
        Self {
            data: NodeData::default(),
            keyword,
        }
    }
}

/// Modifier keywords and annotations, kept in source order.
#[derive(Debug, Clone, PartialEq)]
pub enum Modifier {
    Keyword(KeywordModifier),
    Annotation(Annotation),
}

impl Modifier {
    pub fn keyword(keyword: ModifierKeyword) -> Self {
        Modifier::Keyword(KeywordModifier::new(keyword))
    }

    pub fn is_annotation(&self) -> bool {
        matches!(self, Modifier::Annotation(_))
    }

    pub fn is_keyword(&self, keyword: ModifierKeyword) -> bool {
        matches!(self, Modifier::Keyword(m) if m.keyword == keyword)
    }
}

impl From<ModifierKeyword> for Modifier {
    fn from(keyword: ModifierKeyword) -> Self {
        Modifier::keyword(keyword)
    }
}

impl From<Annotation> for Modifier {
    fn from(annotation: Annotation) -> Self {
        Modifier::Annotation(annotation)
    }
}

/// `@name`, `@name(value)` or `@name(a = x, b = y)`.
///
/// An empty `elements` list is emitted without parentheses.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub data: NodeData,
    pub name: QualifiedName,
    pub elements: Vec<AnnotationElement>,
}

impl Annotation {
    pub fn new(name: QualifiedName) -> Self {
        Self {
            data: NodeData::default(),
            name,
            elements: Vec::new(),
        }
    }

    pub fn with_elements(mut self, elements: Vec<AnnotationElement>) -> Self {
        self.elements = elements;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AnnotationElement {
    Pair(ElementValuePair),
    Value(ElementValue),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ElementValuePair {
    pub data: NodeData,
    pub id: Identifier,
    pub value: ElementValue,
}

impl ElementValuePair {
    pub fn new(id: impl Into<Identifier>, value: ElementValue) -> Self {
        Self {
            data: NodeData::default(),
            id: id.into(),
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ElementValue {
    Expr(Arc<Expr>),
    Annotation(Annotation),
    Array(ElementValueArrayInitializer),
}

impl ElementValue {
    pub fn expr(expr: impl Into<Arc<Expr>>) -> Self {
        ElementValue::Expr(expr.into())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ElementValueArrayInitializer {
    pub data: NodeData,
    pub values: Vec<ElementValue>,
}

impl ElementValueArrayInitializer {
    pub fn new(values: Vec<ElementValue>) -> Self {
        Self {
            data: NodeData::default(),
            values,
        }
    }
}

// ============================================================================
// Types
// ============================================================================

/// A type with optional leading annotations.
#[derive(Debug, Clone, PartialEq)]
pub struct Type {
    pub data: NodeData,
    pub annotations: Vec<Annotation>,
    pub kind: TypeKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeKind {
    Void,
    Var,
    Boolean,
    Byte,
    Short,
    Int,
    Long,
    Char,
    Float,
    Double,
    Class(ClassType),
    Array(ArrayType),
    Wildcard(Wildcard),
}

impl Type {
    pub fn new(kind: TypeKind) -> Self {
        Self {
            data: NodeData::default(),
            annotations: Vec::new(),
            kind,
        }
    }

    /// A dotted class type. Fails when `coits` is empty.
    pub fn class(coits: Vec<Coit>) -> Result<Self, AstError> {
        Ok(Self::new(TypeKind::Class(ClassType::new(coits)?)))
    }

    /// A class type made of plain identifiers, e.g. `java.lang.String`.
    pub fn named(dotted: &str) -> Result<Self, AstError> {
        let coits = dotted
            .split('.')
            .filter(|part| !part.is_empty())
            .map(Coit::new)
            .collect();
        Self::class(coits)
    }

    /// An array type. Fails when `dims` is empty.
    pub fn array(elem: impl Into<Arc<Type>>, dims: Vec<Dim>) -> Result<Self, AstError> {
        Ok(Self::new(TypeKind::Array(ArrayType::new(elem, dims)?)))
    }

    pub fn wildcard(bound: Option<WildcardBound>) -> Self {
        Self::new(TypeKind::Wildcard(Wildcard { bound }))
    }

    pub fn with_annotations(mut self, annotations: Vec<Annotation>) -> Self {
        self.annotations = annotations;
        self
    }

    pub fn is_primitive(&self) -> bool {
        matches!(
            self.kind,
            TypeKind::Boolean
                | TypeKind::Byte
                | TypeKind::Short
                | TypeKind::Int
                | TypeKind::Long
                | TypeKind::Char
                | TypeKind::Float
                | TypeKind::Double
        )
    }

    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            TypeKind::Void => "Void",
            TypeKind::Var => "Var",
            TypeKind::Boolean => "Boolean",
            TypeKind::Byte => "Byte",
            TypeKind::Short => "Short",
            TypeKind::Int => "Int",
            TypeKind::Long => "Long",
            TypeKind::Char => "Char",
            TypeKind::Float => "Float",
            TypeKind::Double => "Double",
            TypeKind::Class(_) => "ClassType",
            TypeKind::Array(_) => "ArrayType",
            TypeKind::Wildcard(_) => "Wildcard",
        }
    }

    /// The keyword spelling of primitive, `void` and `var` types.
    pub fn keyword(&self) -> Option<&'static str> {
        Some(match self.kind {
            TypeKind::Void => "void",
            TypeKind::Var => "var",
            TypeKind::Boolean => "boolean",
            TypeKind::Byte => "byte",
            TypeKind::Short => "short",
            TypeKind::Int => "int",
            TypeKind::Long => "long",
            TypeKind::Char => "char",
            TypeKind::Float => "float",
            TypeKind::Double => "double",
            _ => return None,
        })
    }
}

impl From<TypeKind> for Type {
    fn from(kind: TypeKind) -> Self {
        Type::new(kind)
    }
}

impl From<TypeKind> for Arc<Type> {
    fn from(kind: TypeKind) -> Self {
        Arc::new(Type::new(kind))
    }
}

/// One class-or-interface-type segment: an identifier with optional type arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct Coit {
    pub data: NodeData,
    pub annotations: Vec<Annotation>,
    pub id: Identifier,
    pub type_args: Option<TypeArguments>,
}

impl Coit {
    pub fn new(id: impl Into<Identifier>) -> Self {
        Self {
            data: NodeData::default(),
            annotations: Vec::new(),
            id: id.into(),
            type_args: None,
        }
    }

    pub fn with_type_args(mut self, type_args: TypeArguments) -> Self {
        self.type_args = Some(type_args);
        self
    }

    pub fn with_annotations(mut self, annotations: Vec<Annotation>) -> Self {
        self.annotations = annotations;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassType {
    pub coits: Vec<Coit>,
}

impl ClassType {
    pub fn new(coits: Vec<Coit>) -> Result<Self, AstError> {
        non_empty(&coits, "ClassType", "coits")?;
        Ok(Self { coits })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayType {
    pub elem: Arc<Type>,
    pub dims: Vec<Dim>,
}

impl ArrayType {
    pub fn new(elem: impl Into<Arc<Type>>, dims: Vec<Dim>) -> Result<Self, AstError> {
        non_empty(&dims, "ArrayType", "dims")?;
        Ok(Self {
            elem: elem.into(),
            dims,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Wildcard {
    pub bound: Option<WildcardBound>,
}

/// `extends T` or `super T` on a wildcard.
#[derive(Debug, Clone, PartialEq)]
pub struct WildcardBound {
    pub data: NodeData,
    pub ty: Arc<Type>,
    pub extends: bool,
    pub super_: bool,
}

impl WildcardBound {
    pub fn new(ty: impl Into<Arc<Type>>, extends: bool, super_: bool) -> Result<Self, AstError> {
        if extends == super_ {
            let field = if extends { "super_" } else { "extends" };
            return Err(AstError::new(
                "WildcardBound",
                field,
                "exactly one of extends and super must be set",
            ));
        }
        Ok(Self {
            data: NodeData::default(),
            ty: ty.into(),
            extends,
            super_,
        })
    }

    pub fn extends(ty: impl Into<Arc<Type>>) -> Self {
        Self {
            data: NodeData::default(),
            ty: ty.into(),
            extends: true,
            super_: false,
        }
    }

    pub fn super_(ty: impl Into<Arc<Type>>) -> Self {
        Self {
            data: NodeData::default(),
            ty: ty.into(),
            extends: false,
            super_: true,
        }
    }
}

/// `<A, B>`. The diamond `<>` is the one legal empty form, built with [`TypeArguments::diamond`].
#[derive(Debug, Clone, PartialEq)]
pub struct TypeArguments {
    pub data: NodeData,
    pub types: Vec<Arc<Type>>,
}

impl TypeArguments {
    pub fn new(types: Vec<Arc<Type>>) -> Result<Self, AstError> {
        non_empty(&types, "TypeArguments", "types")?;
        Ok(Self {
            data: NodeData::default(),
            types,
        })
    }

    pub fn diamond() -> Self {
        Self {
            data: NodeData::default(),
            types: Vec::new(),
        }
    }

    pub fn is_diamond(&self) -> bool {
        self.types.is_empty()
    }
}

/// `[]`, possibly annotated.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dim {
    pub data: NodeData,
    pub annotations: Vec<Annotation>,
}

impl Dim {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_annotations(mut self, annotations: Vec<Annotation>) -> Self {
        self.annotations = annotations;
        self
    }

    /// `count` unannotated dims.
    pub fn repeat(count: usize) -> Vec<Dim> {
        (0..count).map(|_| Dim::new()).collect()
    }
}

// ============================================================================
// Type Parameters
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct TypeParameter {
    pub data: NodeData,
    pub annotations: Vec<Annotation>,
    pub id: Identifier,
    pub bound: Option<TypeBound>,
}

impl TypeParameter {
    pub fn new(id: impl Into<Identifier>) -> Self {
        Self {
            data: NodeData::default(),
            annotations: Vec::new(),
            id: id.into(),
            bound: None,
        }
    }

    pub fn with_bound(mut self, bound: TypeBound) -> Self {
        self.bound = Some(bound);
        self
    }

    pub fn with_annotations(mut self, annotations: Vec<Annotation>) -> Self {
        self.annotations = annotations;
        self
    }
}

/// `A & B & C`, as used by type parameter bounds and intersection casts.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeBound {
    pub data: NodeData,
    pub annotations: Vec<Annotation>,
    pub types: Vec<Arc<Type>>,
}

impl TypeBound {
    pub fn new(types: Vec<Arc<Type>>) -> Result<Self, AstError> {
        non_empty(&types, "TypeBound", "types")?;
        Ok(Self {
            data: NodeData::default(),
            annotations: Vec::new(),
            types,
        })
    }

    /// A bound holding exactly one type.
    pub fn single(ty: impl Into<Arc<Type>>) -> Self {
        Self {
            data: NodeData::default(),
            annotations: Vec::new(),
            types: vec![ty.into()],
        }
    }

    pub fn with_annotations(mut self, annotations: Vec<Annotation>) -> Self {
        self.annotations = annotations;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeParameters {
    pub data: NodeData,
    pub parameters: Vec<TypeParameter>,
}

impl TypeParameters {
    pub fn new(parameters: Vec<TypeParameter>) -> Result<Self, AstError> {
        non_empty(&parameters, "TypeParameters", "parameters")?;
        Ok(Self {
            data: NodeData::default(),
            parameters,
        })
    }
}

// ============================================================================
// Patterns
// ============================================================================

/// `final Type @A name`, as used by `instanceof` and `case` labels.
#[derive(Debug, Clone, PartialEq)]
pub struct Pattern {
    pub data: NodeData,
    pub modifiers: Vec<Modifier>,
    pub ty: Arc<Type>,
    pub annotations: Vec<Annotation>,
    pub id: Identifier,
}

impl Pattern {
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

/// A pattern followed by guard conditions, all of which must hold.
#[derive(Debug, Clone, PartialEq)]
pub struct GuardedPattern {
    pub data: NodeData,
    pub pattern: Pattern,
    pub conditions: Vec<Arc<Expr>>,
}

impl GuardedPattern {
    pub fn new(pattern: Pattern, conditions: Vec<Arc<Expr>>) -> Self {
        Self {
            data: NodeData::default(),
            pattern,
            conditions,
        }
    }
}

impl_spanned!(
    Identifier,
    QualifiedName,
    Literal,
    KeywordModifier,
    Annotation,
    ElementValuePair,
    ElementValueArrayInitializer,
    Type,
    Coit,
    WildcardBound,
    TypeArguments,
    Dim,
    TypeParameter,
    TypeBound,
    TypeParameters,
    Pattern,
    GuardedPattern,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualified_name_requires_identifiers() {
        let err = QualifiedName::new(vec![]).unwrap_err();
        assert_eq!(err.field, "identifiers");
        assert_eq!(err.node_kind, "QualifiedName");
        let name = QualifiedName::parse_dotted("java.util.List").unwrap();
        assert_eq!(name.to_string(), "java.util.List");
    }

    #[test]
    fn test_span_ignored_by_equality() {
        let a = Identifier::new("x").with_span(Some(Span::new(1, 0, 1, 1)));
        let b = Identifier::new("x");
        assert_eq!(a, b);
        assert_ne!(a, Identifier::new("y"));
    }

    #[test]
    fn test_wildcard_bound_exactly_one() {
        let int = || Type::new(TypeKind::Int);
        assert!(WildcardBound::new(int(), true, false).is_ok());
        assert!(WildcardBound::new(int(), false, true).is_ok());
        assert_eq!(WildcardBound::new(int(), true, true).unwrap_err().field, "super_");
        assert_eq!(WildcardBound::new(int(), false, false).unwrap_err().field, "extends");
    }

    #[test]
    fn test_non_empty_lists() {
        assert_eq!(TypeArguments::new(vec![]).unwrap_err().field, "types");
        assert!(TypeArguments::diamond().is_diamond());
        assert_eq!(TypeBound::new(vec![]).unwrap_err().field, "types");
        assert_eq!(TypeParameters::new(vec![]).unwrap_err().field, "parameters");
        assert_eq!(Type::class(vec![]).unwrap_err().field, "coits");
        assert_eq!(Type::array(Type::new(TypeKind::Int), vec![]).unwrap_err().field, "dims");
    }

    #[test]
    fn test_modifier_keywords() {
        assert_eq!(ModifierKeyword::from_keyword("non-sealed"), Some(ModifierKeyword::NonSealed));
        assert_eq!(ModifierKeyword::NonSealed.as_str(), "non-sealed");
        assert_eq!(ModifierKeyword::from_keyword("class"), None);
    }
}
