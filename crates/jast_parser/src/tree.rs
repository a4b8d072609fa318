//! The concrete parse tree.
//!
//! Every interior node records the grammar rule that produced it, its
//! children in source order, and the positions of its first and last
//! tokens. Expression layers are only materialized when their operator is
//! present, so `a + b` is a single `Additive` node over two `Name` nodes.

use jast_core::text::{Span, TextRange};
use jast_scanner::{Token, TokenKind};
use std::fmt;

/// The grammar nonterminal a [`ParseTree`] node was produced by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    // Start rules
    CompilationUnit,
    DeclarationStart,
    StatementStart,
    ExpressionStart,

    // Names, modifiers, annotations
    QualifiedName,
    QualifiedNameList,
    Modifiers,
    Annotation,
    ElementValuePair,
    ElementValue,
    ElementValueArrayInitializer,

    // Types
    Type,
    ClassType,
    Coit,
    TypeArguments,
    Wildcard,
    Dim,
    TypeList,
    TypeParameters,
    TypeParameter,
    TypeBound,

    // Compilation units and modules
    PackageDeclaration,
    ImportDeclaration,
    ModuleDeclaration,
    RequiresDirective,
    ExportsDirective,
    OpensDirective,
    UsesDirective,
    ProvidesDirective,

    // Declarations
    MemberDeclaration,
    EmptyDeclaration,
    Initializer,
    ClassDeclaration,
    InterfaceDeclaration,
    EnumDeclaration,
    RecordDeclaration,
    AnnotationTypeDeclaration,
    ClassBody,
    EnumBody,
    EnumConstant,
    RecordHeader,
    RecordComponent,
    FieldDeclaration,
    MethodDeclaration,
    ConstructorDeclaration,
    CompactConstructorDeclaration,
    AnnotationMethodDeclaration,
    FormalParameters,
    FormalParameter,
    VariableArityParameter,
    ReceiverParameter,
    VariableDeclarators,
    VariableDeclarator,
    VariableDeclaratorId,
    ArrayInitializer,

    // Statements
    Block,
    LocalVariableDeclaration,
    LocalVariableDeclarationStatement,
    LocalTypeDeclaration,
    EmptyStatement,
    LabeledStatement,
    ExpressionStatement,
    IfStatement,
    AssertStatement,
    SwitchStatement,
    WhileStatement,
    DoStatement,
    ForStatement,
    ForInit,
    ForUpdate,
    EnhancedForStatement,
    BreakStatement,
    ContinueStatement,
    ReturnStatement,
    ThrowStatement,
    SynchronizedStatement,
    TryStatement,
    TryWithResourcesStatement,
    ResourceSpecification,
    Resource,
    CatchClause,
    CatchType,
    Finally,
    YieldStatement,
    SwitchBlock,
    SwitchGroup,
    SwitchRule,
    SwitchLabel,
    Pattern,
    GuardedPattern,

    // Expressions, loosest first
    Lambda,
    LambdaParameters,
    Assignment,
    Ternary,
    ConditionalOr,
    ConditionalAnd,
    InclusiveOr,
    ExclusiveOr,
    And,
    Equality,
    Relational,
    InstanceOf,
    Shift,
    Additive,
    Multiplicative,
    Cast,
    Prefix,
    Postfix,

    // Primaries
    Parenthesized,
    Literal,
    Name,
    This,
    Super,
    SuperAccess,
    MethodCall,
    Arguments,
    MemberAccess,
    ArrayAccess,
    ClassLiteral,
    MethodReference,
    ObjectCreation,
    InnerCreation,
    ArrayCreation,
    DimExpr,
    SwitchExpression,
    ExplicitGenericInvocation,
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// The position of a boundary token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    /// 1-based line.
    pub line: u32,
    /// 0-based column.
    pub column: u32,
    /// Char offsets of the token.
    pub range: TextRange,
}

impl Location {
    pub fn of(token: &Token) -> Self {
        Self {
            line: token.line,
            column: token.column,
            range: token.range,
        }
    }
}

/// A child of a parse tree node.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseNode {
    Rule(ParseTree),
    Token(Token),
}

impl ParseNode {
    pub fn as_rule(&self) -> Option<&ParseTree> {
        match self {
            ParseNode::Rule(tree) => Some(tree),
            ParseNode::Token(_) => None,
        }
    }

    pub fn as_token(&self) -> Option<&Token> {
        match self {
            ParseNode::Token(token) => Some(token),
            ParseNode::Rule(_) => None,
        }
    }

    pub fn is_token(&self, kind: TokenKind) -> bool {
        matches!(self, ParseNode::Token(token) if token.kind == kind)
    }

    fn start(&self) -> Location {
        match self {
            ParseNode::Rule(tree) => tree.start,
            ParseNode::Token(token) => Location::of(token),
        }
    }

    fn stop(&self) -> Location {
        match self {
            ParseNode::Rule(tree) => tree.stop,
            ParseNode::Token(token) => Location::of(token),
        }
    }
}

impl From<ParseTree> for ParseNode {
    fn from(tree: ParseTree) -> Self {
        ParseNode::Rule(tree)
    }
}

impl From<Token> for ParseNode {
    fn from(token: Token) -> Self {
        ParseNode::Token(token)
    }
}

/// A node of the concrete parse tree.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseTree {
    pub kind: RuleKind,
    pub children: Vec<ParseNode>,
    /// The first token of the rule.
    pub start: Location,
    /// The last token of the rule.
    pub stop: Location,
}

impl ParseTree {
    /// Build a node whose boundaries are taken from its first and last child.
    /// `fallback` is used when there are no children.
    pub fn new(kind: RuleKind, children: Vec<ParseNode>, fallback: Location) -> Self {
        let start = children.first().map_or(fallback, ParseNode::start);
        let stop = children.last().map_or(fallback, ParseNode::stop);
        Self {
            kind,
            children,
            start,
            stop,
        }
    }

    /// The first child rule of the given kind.
    pub fn rule(&self, kind: RuleKind) -> Option<&ParseTree> {
        self.rules(kind).next()
    }

    /// All child rules of the given kind, in order.
    pub fn rules(&self, kind: RuleKind) -> impl Iterator<Item = &ParseTree> {
        self.child_rules().filter(move |tree| tree.kind == kind)
    }

    /// All child rules, in order.
    pub fn child_rules(&self) -> impl Iterator<Item = &ParseTree> {
        self.children.iter().filter_map(ParseNode::as_rule)
    }

    /// The child rule at `index` among child rules.
    pub fn nth_rule(&self, index: usize) -> Option<&ParseTree> {
        self.child_rules().nth(index)
    }

    /// The first child token of the given kind.
    pub fn token(&self, kind: TokenKind) -> Option<&Token> {
        self.tokens(kind).next()
    }

    /// All child tokens of the given kind, in order.
    pub fn tokens(&self, kind: TokenKind) -> impl Iterator<Item = &Token> {
        self.children
            .iter()
            .filter_map(ParseNode::as_token)
            .filter(move |token| token.kind == kind)
    }

    pub fn has_token(&self, kind: TokenKind) -> bool {
        self.token(kind).is_some()
    }

    /// The first child token of any kind.
    pub fn first_token(&self) -> Option<&Token> {
        self.children.iter().find_map(ParseNode::as_token)
    }

    /// Whether a child is an identifier spelled `word`.
    pub fn has_word(&self, word: &str) -> bool {
        self.children
            .iter()
            .filter_map(ParseNode::as_token)
            .any(|token| token.is_word(word))
    }

    /// The source span from the first char of the start token to just past
    /// the stop token.
    pub fn span(&self) -> Span {
        Span::new(
            self.start.line,
            self.start.column,
            self.stop.line,
            self.stop.column + self.stop.range.len(),
        )
    }

    /// Render the tree as an indented outline; used by tests and debugging.
    pub fn outline(&self) -> String {
        let mut out = String::new();
        self.write_outline(&mut out, 0);
        out
    }

    fn write_outline(&self, out: &mut String, depth: usize) {
        out.push_str(&"  ".repeat(depth));
        out.push_str(&self.kind.to_string());
        out.push('\n');
        for child in &self.children {
            match child {
                ParseNode::Rule(tree) => tree.write_outline(out, depth + 1),
                ParseNode::Token(token) => {
                    out.push_str(&"  ".repeat(depth + 1));
                    out.push_str(token.display());
                    out.push('\n');
                }
            }
        }
    }
}
