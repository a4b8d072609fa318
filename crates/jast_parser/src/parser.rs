//! The Java recognizer.
//!
//! A recursive descent parser over a pre-scanned token vector. It builds a
//! concrete [`ParseTree`] and stops at the first syntax error. Ambiguous
//! prefixes (casts, local variable declarations, method reference targets,
//! patterns) are resolved by speculative parses whose outcomes are memoized
//! per token position.

use crate::precedence::{get_binary_operator_precedence, OperatorPrecedence};
use crate::tree::{Location, ParseNode, ParseTree, RuleKind};
use jast_core::text::TextRange;
use jast_diagnostics::{messages, DiagnosticMessage, ParseError};
use jast_scanner::{tokenize, Token, TokenKind};
use rustc_hash::FxHashMap;

/// Maximum recursion depth to prevent stack overflow on deeply nested input.
///
/// Operator and selector chains count one level per link: `a + b + c` is as
/// deep as `a + (b + c)`.
pub const MAX_RECURSION_DEPTH: u32 = 200;

/// Remaining stack below which a nesting level continues on a new segment.
const STACK_RED_ZONE: usize = 128 * 1024;
/// Size of each stack segment allocated on the heap.
const STACK_SEGMENT: usize = 2 * 1024 * 1024;

type PResult<T> = Result<T, ParseError>;

/// The prefixes the parser tries speculatively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Speculation {
    Type,
    Modifiers,
    ModifiedType,
    Annotations,
    CastHead,
    Pattern,
}

/// Where a class body member appears; decides which member forms are legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MemberContext {
    /// Top-level type declarations only.
    TopLevel,
    /// Class, interface, enum and record bodies.
    Class,
    /// Annotation type bodies, where `Type id()` declares an element.
    Annotation,
    /// A lone member parsed in declaration mode.
    Any,
}

/// The parser produces a [`ParseTree`] from Java source text.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    /// Tracks recursion depth to prevent stack overflow on deeply nested input.
    recursion_depth: u32,
    max_depth: u32,
    /// End positions of speculative parses, keyed by start position.
    memo: FxHashMap<(usize, Speculation), Option<usize>>,
}

impl Parser {
    /// Scan `source` and prepare a parser over its tokens.
    pub fn new(source: &str) -> Result<Self, ParseError> {
        Ok(Self {
            tokens: tokenize(source)?,
            pos: 0,
            recursion_depth: 0,
            max_depth: MAX_RECURSION_DEPTH,
            memo: FxHashMap::default(),
        })
    }

    /// Override the nesting limit.
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    // ========================================================================
    // Start rules
    // ========================================================================

    /// `compilationUnit`: an ordinary or modular compilation unit.
    pub fn parse_compilation_unit(&mut self) -> PResult<ParseTree> {
        tracing::trace!(rule = "CompilationUnit", "parsing start rule");
        let mut children = Vec::new();
        if self.is_package_declaration() {
            children.push(self.parse_package_declaration()?.into());
        }
        while self.at(TokenKind::Import) {
            children.push(self.parse_import_declaration()?.into());
        }
        if self.is_module_declaration() {
            children.push(self.parse_module_declaration()?.into());
        } else {
            while !self.at(TokenKind::Eof) {
                children.push(self.parse_class_body_declaration(MemberContext::TopLevel)?.into());
            }
        }
        self.expect_eof()?;
        Ok(self.finish(RuleKind::CompilationUnit, children))
    }

    /// `declarationStart`: a package, import or module declaration, or a
    /// single class body member.
    pub fn parse_declaration_start(&mut self) -> PResult<ParseTree> {
        tracing::trace!(rule = "DeclarationStart", "parsing start rule");
        let decl = if self.is_package_declaration() {
            self.parse_package_declaration()?
        } else if self.at(TokenKind::Import) {
            self.parse_import_declaration()?
        } else if self.is_module_declaration() {
            self.parse_module_declaration()?
        } else {
            self.parse_class_body_declaration(MemberContext::Any)?
        };
        self.expect_eof()?;
        Ok(self.finish(RuleKind::DeclarationStart, vec![decl.into()]))
    }

    /// `statementStart`: a single block statement.
    pub fn parse_statement_start(&mut self) -> PResult<ParseTree> {
        tracing::trace!(rule = "StatementStart", "parsing start rule");
        let stmt = self.parse_block_statement()?;
        self.expect_eof()?;
        Ok(self.finish(RuleKind::StatementStart, vec![stmt.into()]))
    }

    /// `expressionStart`: a single expression.
    pub fn parse_expression_start(&mut self) -> PResult<ParseTree> {
        tracing::trace!(rule = "ExpressionStart", "parsing start rule");
        let expr = self.parse_expression()?;
        self.expect_eof()?;
        Ok(self.finish(RuleKind::ExpressionStart, vec![expr.into()]))
    }

    // ========================================================================
    // Token management
    // ========================================================================

    #[inline]
    fn peek(&self) -> &Token {
        self.peek_at(0)
    }

    /// The token `n` positions ahead; the `<EOF>` token repeats past the end.
    #[inline]
    fn peek_at(&self, n: usize) -> &Token {
        self.token_at(self.pos + n)
    }

    #[inline]
    fn token_at(&self, index: usize) -> &Token {
        let last = self.tokens.len().saturating_sub(1);
        &self.tokens[index.min(last)]
    }

    #[inline]
    fn kind(&self) -> TokenKind {
        self.peek().kind
    }

    #[inline]
    fn kind_at(&self, n: usize) -> TokenKind {
        self.peek_at(n).kind
    }

    #[inline]
    fn at(&self, kind: TokenKind) -> bool {
        self.kind() == kind
    }

    #[inline]
    fn at_word(&self, word: &str) -> bool {
        self.peek().is_word(word)
    }

    fn bump(&mut self) -> Token {
        let token = self.peek().clone();
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, kind: TokenKind) -> Option<Token> {
        if self.at(kind) {
            Some(self.bump())
        } else {
            None
        }
    }

    fn expect(&mut self, kind: TokenKind) -> PResult<Token> {
        if self.at(kind) {
            Ok(self.bump())
        } else {
            Err(self.mismatched(&kind.describe()))
        }
    }

    fn expect_identifier(&mut self) -> PResult<Token> {
        self.expect(TokenKind::Identifier)
    }

    fn expect_word(&mut self, word: &str) -> PResult<Token> {
        if self.at_word(word) {
            Ok(self.bump())
        } else {
            Err(self.mismatched(&format!("'{}'", word)))
        }
    }

    fn expect_eof(&self) -> PResult<()> {
        if self.at(TokenKind::Eof) {
            Ok(())
        } else {
            Err(self.error(&messages::EXTRANEOUS_INPUT, &[self.peek().display(), "<EOF>"]))
        }
    }

    fn finish(&self, kind: RuleKind, children: Vec<ParseNode>) -> ParseTree {
        ParseTree::new(kind, children, Location::of(self.peek()))
    }

    // ========================================================================
    // Errors, nesting and speculation
    // ========================================================================

    fn error(&self, message: &DiagnosticMessage, args: &[&str]) -> ParseError {
        let token = self.peek();
        ParseError::from_message(token.line, token.column, message, args)
    }

    fn mismatched(&self, expecting: &str) -> ParseError {
        self.error(&messages::MISMATCHED_INPUT, &[self.peek().display(), expecting])
    }

    fn no_viable_alternative(&self) -> ParseError {
        self.error(&messages::NO_VIABLE_ALTERNATIVE, &[self.peek().display()])
    }

    /// Run `f` one nesting level deeper, failing once the limit is passed.
    ///
    /// The stack is extended on the heap when it runs low, so the limit
    /// alone decides how deep input may go.
    fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> PResult<T>) -> PResult<T> {
        self.recursion_depth += 1;
        if self.recursion_depth > self.max_depth {
            self.recursion_depth -= 1;
            return Err(self.too_deep());
        }
        let result = stacker::maybe_grow(STACK_RED_ZONE, STACK_SEGMENT, || f(self));
        self.recursion_depth -= 1;
        result
    }

    fn too_deep(&self) -> ParseError {
        let limit = self.max_depth.to_string();
        self.error(&messages::NESTING_TOO_DEEP, &[&limit])
    }

    /// Run `f`, which builds a left-deep chain in a loop. Every link it
    /// takes counts as one nesting level until the chain is complete.
    fn chained<T>(&mut self, f: impl FnOnce(&mut Self, &mut u32) -> PResult<T>) -> PResult<T> {
        let mut links = 0;
        let result = f(self, &mut links);
        self.recursion_depth -= links;
        result
    }

    /// Take one more link of a chain started by [`Parser::chained`].
    fn link(&mut self, links: &mut u32) -> PResult<()> {
        if self.recursion_depth >= self.max_depth {
            return Err(self.too_deep());
        }
        self.recursion_depth += 1;
        *links += 1;
        Ok(())
    }

    /// Try `f` at the current position without consuming anything. Returns
    /// the position just past the match when it succeeds.
    fn speculate(&mut self, what: Speculation, f: fn(&mut Self) -> PResult<()>) -> Option<usize> {
        let key = (self.pos, what);
        if let Some(end) = self.memo.get(&key) {
            return *end;
        }
        let saved = self.pos;
        let end = f(self).ok().map(|()| self.pos);
        self.pos = saved;
        self.memo.insert(key, end);
        end
    }

    /// The index of the `)` matching the `(` at `open`.
    fn matching_paren(&self, open: usize) -> Option<usize> {
        let mut depth = 0usize;
        for (index, token) in self.tokens.iter().enumerate().skip(open) {
            match token.kind {
                TokenKind::LParen => depth += 1,
                TokenKind::RParen => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return Some(index);
                    }
                }
                TokenKind::Eof => return None,
                _ => {}
            }
        }
        None
    }

    // ========================================================================
    // Lookahead predicates
    // ========================================================================

    fn is_package_declaration(&mut self) -> bool {
        match self.kind() {
            TokenKind::Package => true,
            TokenKind::At if self.kind_at(1) != TokenKind::Interface => self
                .speculate(Speculation::Annotations, |p| p.parse_annotations().map(drop))
                .is_some_and(|end| self.token_at(end).kind == TokenKind::Package),
            _ => false,
        }
    }

    fn is_module_declaration(&mut self) -> bool {
        let start = if self.at(TokenKind::At) {
            match self.speculate(Speculation::Annotations, |p| p.parse_annotations().map(drop)) {
                Some(end) => end,
                None => return false,
            }
        } else {
            self.pos
        };
        let first = self.token_at(start);
        let second = self.token_at(start + 1);
        (first.is_word("open") && second.is_word("module"))
            || (first.is_word("module") && second.kind == TokenKind::Identifier)
    }

    fn is_record_start_at(&self, index: usize) -> bool {
        self.token_at(index).is_word("record")
            && self.token_at(index + 1).kind == TokenKind::Identifier
            && matches!(self.token_at(index + 2).kind, TokenKind::LParen | TokenKind::Lt)
    }

    fn is_type_declaration_start_at(&self, index: usize) -> bool {
        match self.token_at(index).kind {
            TokenKind::Class | TokenKind::Interface | TokenKind::Enum => true,
            TokenKind::At => self.token_at(index + 1).kind == TokenKind::Interface,
            TokenKind::Identifier => self.is_record_start_at(index),
            _ => false,
        }
    }

    /// `sealed` is a modifier when another modifier or a type keyword follows.
    fn is_sealed_modifier(&self) -> bool {
        if !self.at_word("sealed") {
            return false;
        }
        let next = self.peek_at(1);
        is_modifier_keyword(next.kind)
            || matches!(
                next.kind,
                TokenKind::Class | TokenKind::Interface | TokenKind::Enum | TokenKind::At
            )
            || next.is_word("sealed")
            || next.is_word("record")
    }

    fn starts_modifier(&self) -> bool {
        is_modifier_keyword(self.kind())
            || (self.at(TokenKind::At) && self.kind_at(1) != TokenKind::Interface)
            || self.is_sealed_modifier()
    }

    fn is_local_type_declaration(&mut self) -> bool {
        if self.is_type_declaration_start_at(self.pos) {
            return true;
        }
        if !self.starts_modifier() {
            return false;
        }
        self.speculate(Speculation::Modifiers, |p| p.parse_modifiers().map(drop))
            .is_some_and(|end| self.is_type_declaration_start_at(end))
    }

    /// Whether optional modifiers and a type start here, returning the
    /// position after the type.
    fn modified_type_end(&mut self) -> Option<usize> {
        let kind = self.kind();
        let plausible = kind == TokenKind::Identifier
            || kind.is_primitive_type()
            || kind == TokenKind::Final
            || kind == TokenKind::At;
        if !plausible {
            return None;
        }
        self.speculate(Speculation::ModifiedType, |p| {
            p.parse_modifiers()?;
            p.parse_type().map(drop)
        })
    }

    fn is_local_variable_declaration(&mut self) -> bool {
        self.modified_type_end()
            .is_some_and(|end| self.token_at(end).kind == TokenKind::Identifier)
    }

    /// `yield` starts a yield statement unless it is used as a name.
    fn is_yield_statement(&self) -> bool {
        if !self.at_word("yield") {
            return false;
        }
        let next = self.kind_at(1);
        !(next.is_assignment_operator()
            || matches!(
                next,
                TokenKind::Dot
                    | TokenKind::LBrack
                    | TokenKind::Inc
                    | TokenKind::Dec
                    | TokenKind::Arrow
                    | TokenKind::Semi
                    | TokenKind::Colon
                    | TokenKind::Eof
            ))
    }

    fn is_lambda_start(&self) -> bool {
        match self.kind() {
            TokenKind::Identifier => self.kind_at(1) == TokenKind::Arrow,
            TokenKind::LParen => self
                .matching_paren(self.pos)
                .is_some_and(|close| self.token_at(close + 1).kind == TokenKind::Arrow),
            _ => false,
        }
    }

    fn is_pattern(&mut self) -> bool {
        self.speculate(Speculation::Pattern, |p| p.parse_pattern().map(drop))
            .is_some()
    }

    // ========================================================================
    // Names, modifiers and annotations
    // ========================================================================

    fn parse_qualified_name(&mut self) -> PResult<ParseTree> {
        let mut children = vec![self.expect_identifier()?.into()];
        while self.at(TokenKind::Dot) && self.kind_at(1) == TokenKind::Identifier {
            children.push(self.bump().into());
            children.push(self.bump().into());
        }
        Ok(self.finish(RuleKind::QualifiedName, children))
    }

    fn parse_qualified_name_list(&mut self) -> PResult<ParseTree> {
        let mut children = vec![self.parse_qualified_name()?.into()];
        while let Some(comma) = self.eat(TokenKind::Comma) {
            children.push(comma.into());
            children.push(self.parse_qualified_name()?.into());
        }
        Ok(self.finish(RuleKind::QualifiedNameList, children))
    }

    /// Modifier keywords and annotations in source order, or `None` when
    /// there are none.
    fn parse_modifiers(&mut self) -> PResult<Option<ParseTree>> {
        let mut children = Vec::new();
        loop {
            if is_modifier_keyword(self.kind()) || self.is_sealed_modifier() {
                children.push(self.bump().into());
            } else if self.at(TokenKind::At) && self.kind_at(1) != TokenKind::Interface {
                children.push(self.parse_annotation()?.into());
            } else {
                break;
            }
        }
        if children.is_empty() {
            return Ok(None);
        }
        Ok(Some(self.finish(RuleKind::Modifiers, children)))
    }

    fn push_modifiers(&mut self, children: &mut Vec<ParseNode>) -> PResult<()> {
        if let Some(modifiers) = self.parse_modifiers()? {
            children.push(modifiers.into());
        }
        Ok(())
    }

    fn parse_annotations(&mut self) -> PResult<Vec<ParseNode>> {
        let mut annotations = Vec::new();
        while self.at(TokenKind::At) && self.kind_at(1) != TokenKind::Interface {
            annotations.push(self.parse_annotation()?.into());
        }
        Ok(annotations)
    }

    /// `@Name`, `@Name(value)` or `@Name(a = x, ...)`.
    fn parse_annotation(&mut self) -> PResult<ParseTree> {
        let mut children = vec![self.expect(TokenKind::At)?.into()];
        children.push(self.parse_qualified_name()?.into());
        if let Some(open) = self.eat(TokenKind::LParen) {
            children.push(open.into());
            if self.at(TokenKind::Identifier) && self.kind_at(1) == TokenKind::Assign {
                children.push(self.parse_element_value_pair()?.into());
                while let Some(comma) = self.eat(TokenKind::Comma) {
                    children.push(comma.into());
                    children.push(self.parse_element_value_pair()?.into());
                }
            } else if !self.at(TokenKind::RParen) {
                children.push(self.parse_element_value()?.into());
            }
            children.push(self.expect(TokenKind::RParen)?.into());
        }
        Ok(self.finish(RuleKind::Annotation, children))
    }

    fn parse_element_value_pair(&mut self) -> PResult<ParseTree> {
        let id = self.expect_identifier()?;
        let assign = self.expect(TokenKind::Assign)?;
        let value = self.parse_element_value()?;
        Ok(self.finish(RuleKind::ElementValuePair, vec![id.into(), assign.into(), value.into()]))
    }

    fn parse_element_value(&mut self) -> PResult<ParseTree> {
        let value = match self.kind() {
            TokenKind::At => self.parse_annotation()?,
            TokenKind::LBrace => {
                let mut children = vec![self.bump().into()];
                while !self.at(TokenKind::RBrace) {
                    children.push(self.parse_element_value()?.into());
                    match self.eat(TokenKind::Comma) {
                        Some(comma) => children.push(comma.into()),
                        None => break,
                    }
                }
                children.push(self.expect(TokenKind::RBrace)?.into());
                self.finish(RuleKind::ElementValueArrayInitializer, children)
            }
            _ => self.parse_ternary()?,
        };
        Ok(self.finish(RuleKind::ElementValue, vec![value.into()]))
    }

    // ========================================================================
    // Types
    // ========================================================================

    /// A type with its array dimensions.
    fn parse_type(&mut self) -> PResult<ParseTree> {
        self.nested(|p| p.parse_type_inner(Vec::new(), true))
    }

    /// A type without trailing dimensions, as used by creation expressions.
    fn parse_non_array_type(&mut self) -> PResult<ParseTree> {
        self.nested(|p| p.parse_type_inner(Vec::new(), false))
    }

    /// `void` or a type.
    fn parse_result_type(&mut self) -> PResult<ParseTree> {
        if let Some(void) = self.eat(TokenKind::Void) {
            return Ok(self.finish(RuleKind::Type, vec![void.into()]));
        }
        self.parse_type()
    }

    fn parse_type_inner(&mut self, mut children: Vec<ParseNode>, dims: bool) -> PResult<ParseTree> {
        children.extend(self.parse_annotations()?);
        if self.kind().is_primitive_type() {
            children.push(self.bump().into());
        } else if self.at(TokenKind::Identifier) {
            children.push(self.parse_class_type()?.into());
        } else {
            return Err(self.mismatched("Identifier"));
        }
        if dims {
            self.parse_dims(&mut children)?;
        }
        Ok(self.finish(RuleKind::Type, children))
    }

    fn parse_class_type(&mut self) -> PResult<ParseTree> {
        let mut children = vec![self.parse_coit()?.into()];
        while self.at(TokenKind::Dot) && matches!(self.kind_at(1), TokenKind::Identifier | TokenKind::At) {
            children.push(self.bump().into());
            children.push(self.parse_coit()?.into());
        }
        Ok(self.finish(RuleKind::ClassType, children))
    }

    fn parse_coit(&mut self) -> PResult<ParseTree> {
        let mut children = self.parse_annotations()?;
        children.push(self.expect_identifier()?.into());
        if self.at(TokenKind::Lt) {
            children.push(self.parse_type_arguments()?.into());
        }
        Ok(self.finish(RuleKind::Coit, children))
    }

    /// `<A, ? extends B>`, or the diamond `<>`.
    fn parse_type_arguments(&mut self) -> PResult<ParseTree> {
        let mut children = vec![self.expect(TokenKind::Lt)?.into()];
        if !self.at(TokenKind::Gt) {
            loop {
                children.push(self.parse_type_argument()?.into());
                match self.eat(TokenKind::Comma) {
                    Some(comma) => children.push(comma.into()),
                    None => break,
                }
            }
        }
        children.push(self.expect(TokenKind::Gt)?.into());
        Ok(self.finish(RuleKind::TypeArguments, children))
    }

    fn parse_type_argument(&mut self) -> PResult<ParseTree> {
        let mut children = self.parse_annotations()?;
        if let Some(question) = self.eat(TokenKind::Question) {
            children.push(question.into());
            if matches!(self.kind(), TokenKind::Extends | TokenKind::Super) {
                children.push(self.bump().into());
                children.push(self.parse_type()?.into());
            }
            return Ok(self.finish(RuleKind::Wildcard, children));
        }
        self.nested(|p| p.parse_type_inner(children, true))
    }

    /// Trailing `[]` pairs, each optionally annotated.
    fn parse_dims(&mut self, children: &mut Vec<ParseNode>) -> PResult<()> {
        loop {
            if self.at(TokenKind::LBrack) && self.kind_at(1) == TokenKind::RBrack {
                let open = self.bump();
                let close = self.bump();
                children.push(self.finish(RuleKind::Dim, vec![open.into(), close.into()]).into());
            } else if self.at(TokenKind::At) {
                let Some(end) = self.speculate(Speculation::Annotations, |p| p.parse_annotations().map(drop)) else {
                    return Ok(());
                };
                if !(self.token_at(end).kind == TokenKind::LBrack && self.token_at(end + 1).kind == TokenKind::RBrack) {
                    return Ok(());
                }
                let mut dim = self.parse_annotations()?;
                dim.push(self.bump().into());
                dim.push(self.bump().into());
                children.push(self.finish(RuleKind::Dim, dim).into());
            } else {
                return Ok(());
            }
        }
    }

    fn parse_type_list(&mut self) -> PResult<ParseTree> {
        let mut children = vec![self.parse_type()?.into()];
        while let Some(comma) = self.eat(TokenKind::Comma) {
            children.push(comma.into());
            children.push(self.parse_type()?.into());
        }
        Ok(self.finish(RuleKind::TypeList, children))
    }

    fn parse_type_parameters(&mut self) -> PResult<ParseTree> {
        let mut children = vec![self.expect(TokenKind::Lt)?.into()];
        loop {
            let mut param = self.parse_annotations()?;
            param.push(self.expect_identifier()?.into());
            if let Some(extends) = self.eat(TokenKind::Extends) {
                param.push(extends.into());
                param.push(self.parse_type_bound()?.into());
            }
            children.push(self.finish(RuleKind::TypeParameter, param).into());
            match self.eat(TokenKind::Comma) {
                Some(comma) => children.push(comma.into()),
                None => break,
            }
        }
        children.push(self.expect(TokenKind::Gt)?.into());
        Ok(self.finish(RuleKind::TypeParameters, children))
    }

    /// `A & B & C`.
    fn parse_type_bound(&mut self) -> PResult<ParseTree> {
        let mut children = vec![self.parse_type()?.into()];
        while let Some(amp) = self.eat(TokenKind::BitAnd) {
            children.push(amp.into());
            children.push(self.parse_type()?.into());
        }
        Ok(self.finish(RuleKind::TypeBound, children))
    }

    // ========================================================================
    // Compilation units and modules
    // ========================================================================

    fn parse_package_declaration(&mut self) -> PResult<ParseTree> {
        let mut children = self.parse_annotations()?;
        children.push(self.expect(TokenKind::Package)?.into());
        children.push(self.parse_qualified_name()?.into());
        children.push(self.expect(TokenKind::Semi)?.into());
        Ok(self.finish(RuleKind::PackageDeclaration, children))
    }

    fn parse_import_declaration(&mut self) -> PResult<ParseTree> {
        let mut children = vec![self.expect(TokenKind::Import)?.into()];
        if let Some(static_) = self.eat(TokenKind::Static) {
            children.push(static_.into());
        }
        children.push(self.parse_qualified_name()?.into());
        if self.at(TokenKind::Dot) && self.kind_at(1) == TokenKind::Mul {
            children.push(self.bump().into());
            children.push(self.bump().into());
        }
        children.push(self.expect(TokenKind::Semi)?.into());
        Ok(self.finish(RuleKind::ImportDeclaration, children))
    }

    fn parse_module_declaration(&mut self) -> PResult<ParseTree> {
        let mut children = self.parse_annotations()?;
        if self.at_word("open") {
            children.push(self.bump().into());
        }
        children.push(self.expect_word("module")?.into());
        children.push(self.parse_qualified_name()?.into());
        children.push(self.expect(TokenKind::LBrace)?.into());
        while !self.at(TokenKind::RBrace) {
            children.push(self.parse_module_directive()?.into());
        }
        children.push(self.expect(TokenKind::RBrace)?.into());
        Ok(self.finish(RuleKind::ModuleDeclaration, children))
    }

    fn parse_module_directive(&mut self) -> PResult<ParseTree> {
        let keyword = self.peek().clone();
        let kind = match keyword.text.as_str() {
            "requires" if keyword.kind == TokenKind::Identifier => RuleKind::RequiresDirective,
            "exports" if keyword.kind == TokenKind::Identifier => RuleKind::ExportsDirective,
            "opens" if keyword.kind == TokenKind::Identifier => RuleKind::OpensDirective,
            "uses" if keyword.kind == TokenKind::Identifier => RuleKind::UsesDirective,
            "provides" if keyword.kind == TokenKind::Identifier => RuleKind::ProvidesDirective,
            _ => return Err(self.mismatched("'}'")),
        };
        let mut children = vec![self.bump().into()];
        match kind {
            RuleKind::RequiresDirective => {
                loop {
                    // `requires transitive;` names a module called transitive
                    let transitive = self.at_word("transitive")
                        && matches!(self.kind_at(1), TokenKind::Identifier | TokenKind::Static);
                    if transitive || self.at(TokenKind::Static) {
                        children.push(self.bump().into());
                    } else {
                        break;
                    }
                }
                children.push(self.parse_qualified_name()?.into());
            }
            RuleKind::ExportsDirective | RuleKind::OpensDirective => {
                children.push(self.parse_qualified_name()?.into());
                if self.at_word("to") {
                    children.push(self.bump().into());
                    children.push(self.parse_qualified_name_list()?.into());
                }
            }
            RuleKind::ProvidesDirective => {
                children.push(self.parse_qualified_name()?.into());
                children.push(self.expect_word("with")?.into());
                children.push(self.parse_qualified_name_list()?.into());
            }
            _ => children.push(self.parse_qualified_name()?.into()),
        }
        children.push(self.expect(TokenKind::Semi)?.into());
        Ok(self.finish(kind, children))
    }

    // ========================================================================
    // Declarations
    // ========================================================================

    fn parse_class_body_declaration(&mut self, ctx: MemberContext) -> PResult<ParseTree> {
        match self.kind() {
            TokenKind::Semi => {
                let semi = self.bump();
                Ok(self.finish(RuleKind::EmptyDeclaration, vec![semi.into()]))
            }
            TokenKind::LBrace if ctx != MemberContext::TopLevel => {
                let body = self.parse_block()?;
                Ok(self.finish(RuleKind::Initializer, vec![body.into()]))
            }
            TokenKind::Static if ctx != MemberContext::TopLevel && self.kind_at(1) == TokenKind::LBrace => {
                let static_ = self.bump();
                let body = self.parse_block()?;
                Ok(self.finish(RuleKind::Initializer, vec![static_.into(), body.into()]))
            }
            _ => self.parse_member_declaration(ctx),
        }
    }

    fn parse_member_declaration(&mut self, ctx: MemberContext) -> PResult<ParseTree> {
        let mut children = Vec::new();
        self.push_modifiers(&mut children)?;
        children.push(self.parse_member_body(ctx)?.into());
        Ok(self.finish(RuleKind::MemberDeclaration, children))
    }

    fn parse_member_body(&mut self, ctx: MemberContext) -> PResult<ParseTree> {
        match self.kind() {
            TokenKind::Class => return self.parse_class_declaration(),
            TokenKind::Interface => return self.parse_interface_declaration(),
            TokenKind::Enum => return self.parse_enum_declaration(),
            TokenKind::At if self.kind_at(1) == TokenKind::Interface => {
                return self.parse_annotation_type_declaration()
            }
            TokenKind::Identifier if self.is_record_start_at(self.pos) => return self.parse_record_declaration(),
            _ => {}
        }
        if ctx == MemberContext::TopLevel {
            return Err(self.mismatched("{'class', 'interface', 'enum', 'record', '@'}"));
        }
        match self.kind() {
            TokenKind::Lt => {
                let type_params = self.parse_type_parameters()?;
                if self.at(TokenKind::Identifier) && self.kind_at(1) == TokenKind::LParen {
                    self.parse_constructor_declaration(Some(type_params))
                } else {
                    self.parse_method_declaration(Some(type_params))
                }
            }
            TokenKind::Identifier if self.kind_at(1) == TokenKind::LParen => self.parse_constructor_declaration(None),
            TokenKind::Identifier if self.kind_at(1) == TokenKind::LBrace => {
                let id = self.bump();
                let body = self.parse_block()?;
                Ok(self.finish(RuleKind::CompactConstructorDeclaration, vec![id.into(), body.into()]))
            }
            TokenKind::Void => self.parse_method_declaration(None),
            _ => {
                let Some(end) = self.speculate(Speculation::Type, |p| p.parse_type().map(drop)) else {
                    return self.parse_field_declaration();
                };
                let method_shaped = self.token_at(end).kind == TokenKind::Identifier
                    && self.token_at(end + 1).kind == TokenKind::LParen;
                if !method_shaped {
                    return self.parse_field_declaration();
                }
                let element_shaped = self.token_at(end + 2).kind == TokenKind::RParen;
                let has_default = element_shaped && self.token_at(end + 3).kind == TokenKind::Default;
                if element_shaped && (ctx == MemberContext::Annotation || has_default) {
                    self.parse_annotation_method_declaration()
                } else {
                    self.parse_method_declaration(None)
                }
            }
        }
    }

    fn parse_class_declaration(&mut self) -> PResult<ParseTree> {
        let mut children = vec![self.expect(TokenKind::Class)?.into()];
        children.push(self.expect_identifier()?.into());
        if self.at(TokenKind::Lt) {
            children.push(self.parse_type_parameters()?.into());
        }
        if let Some(extends) = self.eat(TokenKind::Extends) {
            children.push(extends.into());
            children.push(self.parse_type()?.into());
        }
        if let Some(implements) = self.eat(TokenKind::Implements) {
            children.push(implements.into());
            children.push(self.parse_type_list()?.into());
        }
        if self.at_word("permits") {
            children.push(self.bump().into());
            children.push(self.parse_type_list()?.into());
        }
        children.push(self.parse_class_body(MemberContext::Class)?.into());
        Ok(self.finish(RuleKind::ClassDeclaration, children))
    }

    fn parse_interface_declaration(&mut self) -> PResult<ParseTree> {
        let mut children = vec![self.expect(TokenKind::Interface)?.into()];
        children.push(self.expect_identifier()?.into());
        if self.at(TokenKind::Lt) {
            children.push(self.parse_type_parameters()?.into());
        }
        if let Some(extends) = self.eat(TokenKind::Extends) {
            children.push(extends.into());
            children.push(self.parse_type_list()?.into());
        }
        if self.at_word("permits") {
            children.push(self.bump().into());
            children.push(self.parse_type_list()?.into());
        }
        children.push(self.parse_class_body(MemberContext::Class)?.into());
        Ok(self.finish(RuleKind::InterfaceDeclaration, children))
    }

    fn parse_enum_declaration(&mut self) -> PResult<ParseTree> {
        let mut children = vec![self.expect(TokenKind::Enum)?.into()];
        children.push(self.expect_identifier()?.into());
        if let Some(implements) = self.eat(TokenKind::Implements) {
            children.push(implements.into());
            children.push(self.parse_type_list()?.into());
        }
        children.push(self.parse_enum_body()?.into());
        Ok(self.finish(RuleKind::EnumDeclaration, children))
    }

    fn parse_enum_body(&mut self) -> PResult<ParseTree> {
        let mut children = vec![self.expect(TokenKind::LBrace)?.into()];
        while !matches!(self.kind(), TokenKind::Semi | TokenKind::RBrace) {
            children.push(self.parse_enum_constant()?.into());
            match self.eat(TokenKind::Comma) {
                Some(comma) => children.push(comma.into()),
                None => break,
            }
        }
        if let Some(semi) = self.eat(TokenKind::Semi) {
            children.push(semi.into());
            while !self.at(TokenKind::RBrace) && !self.at(TokenKind::Eof) {
                children.push(self.parse_class_body_declaration(MemberContext::Class)?.into());
            }
        }
        children.push(self.expect(TokenKind::RBrace)?.into());
        Ok(self.finish(RuleKind::EnumBody, children))
    }

    fn parse_enum_constant(&mut self) -> PResult<ParseTree> {
        let mut children = self.parse_annotations()?;
        children.push(self.expect_identifier()?.into());
        if self.at(TokenKind::LParen) {
            children.push(self.parse_arguments()?.into());
        }
        if self.at(TokenKind::LBrace) {
            children.push(self.parse_class_body(MemberContext::Class)?.into());
        }
        Ok(self.finish(RuleKind::EnumConstant, children))
    }

    fn parse_record_declaration(&mut self) -> PResult<ParseTree> {
        let mut children = vec![self.expect_word("record")?.into()];
        children.push(self.expect_identifier()?.into());
        if self.at(TokenKind::Lt) {
            children.push(self.parse_type_parameters()?.into());
        }
        let mut header = vec![self.expect(TokenKind::LParen)?.into()];
        if !self.at(TokenKind::RParen) {
            loop {
                header.push(self.parse_record_component()?.into());
                match self.eat(TokenKind::Comma) {
                    Some(comma) => header.push(comma.into()),
                    None => break,
                }
            }
        }
        header.push(self.expect(TokenKind::RParen)?.into());
        children.push(self.finish(RuleKind::RecordHeader, header).into());
        if let Some(implements) = self.eat(TokenKind::Implements) {
            children.push(implements.into());
            children.push(self.parse_type_list()?.into());
        }
        children.push(self.parse_class_body(MemberContext::Class)?.into());
        Ok(self.finish(RuleKind::RecordDeclaration, children))
    }

    fn parse_record_component(&mut self) -> PResult<ParseTree> {
        let mut children = self.parse_annotations()?;
        children.push(self.parse_type()?.into());
        if let Some(ellipsis) = self.eat(TokenKind::Ellipsis) {
            children.push(ellipsis.into());
        }
        children.push(self.expect_identifier()?.into());
        Ok(self.finish(RuleKind::RecordComponent, children))
    }

    fn parse_annotation_type_declaration(&mut self) -> PResult<ParseTree> {
        let at = self.expect(TokenKind::At)?;
        let interface = self.expect(TokenKind::Interface)?;
        let id = self.expect_identifier()?;
        let body = self.parse_class_body(MemberContext::Annotation)?;
        Ok(self.finish(
            RuleKind::AnnotationTypeDeclaration,
            vec![at.into(), interface.into(), id.into(), body.into()],
        ))
    }

    fn parse_class_body(&mut self, ctx: MemberContext) -> PResult<ParseTree> {
        self.nested(|p| {
            let mut children = vec![p.expect(TokenKind::LBrace)?.into()];
            while !p.at(TokenKind::RBrace) && !p.at(TokenKind::Eof) {
                children.push(p.parse_class_body_declaration(ctx)?.into());
            }
            children.push(p.expect(TokenKind::RBrace)?.into());
            Ok(p.finish(RuleKind::ClassBody, children))
        })
    }

    fn parse_field_declaration(&mut self) -> PResult<ParseTree> {
        let ty = self.parse_type()?;
        let declarators = self.parse_variable_declarators()?;
        let semi = self.expect(TokenKind::Semi)?;
        Ok(self.finish(RuleKind::FieldDeclaration, vec![ty.into(), declarators.into(), semi.into()]))
    }

    fn parse_method_declaration(&mut self, type_params: Option<ParseTree>) -> PResult<ParseTree> {
        let mut children = Vec::new();
        if let Some(type_params) = type_params {
            children.push(type_params.into());
            children.extend(self.parse_annotations()?);
        }
        children.push(self.parse_result_type()?.into());
        children.push(self.expect_identifier()?.into());
        children.push(self.parse_formal_parameters(false)?.into());
        self.parse_dims(&mut children)?;
        self.push_throws(&mut children)?;
        if self.at(TokenKind::LBrace) {
            children.push(self.parse_block()?.into());
        } else {
            children.push(self.expect(TokenKind::Semi)?.into());
        }
        Ok(self.finish(RuleKind::MethodDeclaration, children))
    }

    fn parse_constructor_declaration(&mut self, type_params: Option<ParseTree>) -> PResult<ParseTree> {
        let mut children = Vec::new();
        if let Some(type_params) = type_params {
            children.push(type_params.into());
        }
        children.push(self.expect_identifier()?.into());
        children.push(self.parse_formal_parameters(false)?.into());
        self.push_throws(&mut children)?;
        children.push(self.parse_block()?.into());
        Ok(self.finish(RuleKind::ConstructorDeclaration, children))
    }

    fn push_throws(&mut self, children: &mut Vec<ParseNode>) -> PResult<()> {
        if let Some(throws) = self.eat(TokenKind::Throws) {
            children.push(throws.into());
            children.push(self.parse_qualified_name_list()?.into());
        }
        Ok(())
    }

    fn parse_annotation_method_declaration(&mut self) -> PResult<ParseTree> {
        let mut children = vec![self.parse_type()?.into()];
        children.push(self.expect_identifier()?.into());
        children.push(self.expect(TokenKind::LParen)?.into());
        children.push(self.expect(TokenKind::RParen)?.into());
        self.parse_dims(&mut children)?;
        if let Some(default) = self.eat(TokenKind::Default) {
            children.push(default.into());
            children.push(self.parse_element_value()?.into());
        }
        children.push(self.expect(TokenKind::Semi)?.into());
        Ok(self.finish(RuleKind::AnnotationMethodDeclaration, children))
    }

    /// `(receiver, params...)`. Lambdas reject the receiver form.
    fn parse_formal_parameters(&mut self, lambda: bool) -> PResult<ParseTree> {
        let mut children = vec![self.expect(TokenKind::LParen)?.into()];
        if !self.at(TokenKind::RParen) {
            loop {
                let param = self.parse_formal_parameter()?;
                if lambda && param.kind == RuleKind::ReceiverParameter {
                    return Err(ParseError::from_message(
                        param.start.line,
                        param.start.column,
                        &messages::LAMBDA_RECEIVER,
                        &[],
                    ));
                }
                let variable_arity = param.kind == RuleKind::VariableArityParameter;
                children.push(param.into());
                if variable_arity {
                    break;
                }
                match self.eat(TokenKind::Comma) {
                    Some(comma) => children.push(comma.into()),
                    None => break,
                }
            }
        }
        children.push(self.expect(TokenKind::RParen)?.into());
        Ok(self.finish(RuleKind::FormalParameters, children))
    }

    fn parse_formal_parameter(&mut self) -> PResult<ParseTree> {
        let mut children = Vec::new();
        self.push_modifiers(&mut children)?;
        children.push(self.parse_type()?.into());
        let annotations = self.parse_annotations()?;
        if self.at(TokenKind::Ellipsis) {
            children.extend(annotations);
            children.push(self.bump().into());
            children.push(self.expect_identifier()?.into());
            return Ok(self.finish(RuleKind::VariableArityParameter, children));
        }
        if !annotations.is_empty() {
            return Err(self.mismatched("'...'"));
        }
        if self.at(TokenKind::This) {
            children.push(self.bump().into());
            return Ok(self.finish(RuleKind::ReceiverParameter, children));
        }
        if self.at(TokenKind::Identifier) && self.kind_at(1) == TokenKind::Dot {
            while self.at(TokenKind::Identifier) && self.kind_at(1) == TokenKind::Dot {
                children.push(self.bump().into());
                children.push(self.bump().into());
            }
            children.push(self.expect(TokenKind::This)?.into());
            return Ok(self.finish(RuleKind::ReceiverParameter, children));
        }
        children.push(self.parse_variable_declarator_id()?.into());
        Ok(self.finish(RuleKind::FormalParameter, children))
    }

    fn parse_variable_declarators(&mut self) -> PResult<ParseTree> {
        let mut children = vec![self.parse_variable_declarator()?.into()];
        while let Some(comma) = self.eat(TokenKind::Comma) {
            children.push(comma.into());
            children.push(self.parse_variable_declarator()?.into());
        }
        Ok(self.finish(RuleKind::VariableDeclarators, children))
    }

    fn parse_variable_declarator(&mut self) -> PResult<ParseTree> {
        let mut children = vec![self.parse_variable_declarator_id()?.into()];
        if let Some(assign) = self.eat(TokenKind::Assign) {
            children.push(assign.into());
            children.push(self.parse_variable_initializer()?.into());
        }
        Ok(self.finish(RuleKind::VariableDeclarator, children))
    }

    fn parse_variable_declarator_id(&mut self) -> PResult<ParseTree> {
        let mut children = vec![self.expect_identifier()?.into()];
        self.parse_dims(&mut children)?;
        Ok(self.finish(RuleKind::VariableDeclaratorId, children))
    }

    fn parse_variable_initializer(&mut self) -> PResult<ParseTree> {
        if self.at(TokenKind::LBrace) {
            self.parse_array_initializer()
        } else {
            self.parse_expression()
        }
    }

    fn parse_array_initializer(&mut self) -> PResult<ParseTree> {
        self.nested(|p| {
            let mut children = vec![p.expect(TokenKind::LBrace)?.into()];
            while !p.at(TokenKind::RBrace) {
                children.push(p.parse_variable_initializer()?.into());
                match p.eat(TokenKind::Comma) {
                    Some(comma) => children.push(comma.into()),
                    None => break,
                }
            }
            children.push(p.expect(TokenKind::RBrace)?.into());
            Ok(p.finish(RuleKind::ArrayInitializer, children))
        })
    }

    // ========================================================================
    // Statements
    // ========================================================================

    fn parse_block(&mut self) -> PResult<ParseTree> {
        let mut children = vec![self.expect(TokenKind::LBrace)?.into()];
        while !self.at(TokenKind::RBrace) && !self.at(TokenKind::Eof) {
            children.push(self.parse_block_statement()?.into());
        }
        children.push(self.expect(TokenKind::RBrace)?.into());
        Ok(self.finish(RuleKind::Block, children))
    }

    /// A statement, local variable declaration or local type declaration.
    fn parse_block_statement(&mut self) -> PResult<ParseTree> {
        if self.is_yield_statement() || (self.at(TokenKind::Synchronized) && self.kind_at(1) == TokenKind::LParen) {
            return self.parse_statement();
        }
        if self.is_local_type_declaration() {
            let member = self.parse_member_declaration(MemberContext::TopLevel)?;
            return Ok(self.finish(RuleKind::LocalTypeDeclaration, vec![member.into()]));
        }
        if self.is_local_variable_declaration() {
            let decl = self.parse_local_variable_declaration()?;
            let semi = self.expect(TokenKind::Semi)?;
            return Ok(self.finish(RuleKind::LocalVariableDeclarationStatement, vec![decl.into(), semi.into()]));
        }
        self.parse_statement()
    }

    fn parse_local_variable_declaration(&mut self) -> PResult<ParseTree> {
        let mut children = Vec::new();
        self.push_modifiers(&mut children)?;
        children.push(self.parse_type()?.into());
        children.push(self.parse_variable_declarators()?.into());
        Ok(self.finish(RuleKind::LocalVariableDeclaration, children))
    }

    fn parse_statement(&mut self) -> PResult<ParseTree> {
        self.nested(|p| p.parse_statement_inner())
    }

    fn parse_statement_inner(&mut self) -> PResult<ParseTree> {
        let (kind, children): (RuleKind, Vec<ParseNode>) = match self.kind() {
            TokenKind::LBrace => return self.parse_block(),
            TokenKind::Semi => (RuleKind::EmptyStatement, vec![self.bump().into()]),
            TokenKind::If => {
                let mut children = vec![self.bump().into()];
                self.push_par_expression(&mut children)?;
                children.push(self.parse_statement()?.into());
                if let Some(else_) = self.eat(TokenKind::Else) {
                    children.push(else_.into());
                    children.push(self.parse_statement()?.into());
                }
                (RuleKind::IfStatement, children)
            }
            TokenKind::Assert => {
                let mut children = vec![self.bump().into(), self.parse_expression()?.into()];
                if let Some(colon) = self.eat(TokenKind::Colon) {
                    children.push(colon.into());
                    children.push(self.parse_expression()?.into());
                }
                children.push(self.expect(TokenKind::Semi)?.into());
                (RuleKind::AssertStatement, children)
            }
            TokenKind::Switch => {
                let mut children = vec![self.bump().into()];
                self.push_par_expression(&mut children)?;
                children.push(self.parse_switch_block()?.into());
                (RuleKind::SwitchStatement, children)
            }
            TokenKind::While => {
                let mut children = vec![self.bump().into()];
                self.push_par_expression(&mut children)?;
                children.push(self.parse_statement()?.into());
                (RuleKind::WhileStatement, children)
            }
            TokenKind::Do => {
                let mut children = vec![self.bump().into(), self.parse_statement()?.into()];
                children.push(self.expect(TokenKind::While)?.into());
                self.push_par_expression(&mut children)?;
                children.push(self.expect(TokenKind::Semi)?.into());
                (RuleKind::DoStatement, children)
            }
            TokenKind::For => return self.parse_for_statement(),
            TokenKind::Break | TokenKind::Continue => {
                let kind = if self.at(TokenKind::Break) {
                    RuleKind::BreakStatement
                } else {
                    RuleKind::ContinueStatement
                };
                let mut children = vec![self.bump().into()];
                if let Some(label) = self.eat(TokenKind::Identifier) {
                    children.push(label.into());
                }
                children.push(self.expect(TokenKind::Semi)?.into());
                (kind, children)
            }
            TokenKind::Return => {
                let mut children = vec![self.bump().into()];
                if !self.at(TokenKind::Semi) {
                    children.push(self.parse_expression()?.into());
                }
                children.push(self.expect(TokenKind::Semi)?.into());
                (RuleKind::ReturnStatement, children)
            }
            TokenKind::Throw => {
                let children = vec![
                    self.bump().into(),
                    self.parse_expression()?.into(),
                    self.expect(TokenKind::Semi)?.into(),
                ];
                (RuleKind::ThrowStatement, children)
            }
            TokenKind::Synchronized => {
                let mut children = vec![self.bump().into()];
                self.push_par_expression(&mut children)?;
                children.push(self.parse_block()?.into());
                (RuleKind::SynchronizedStatement, children)
            }
            TokenKind::Try => return self.parse_try_statement(),
            TokenKind::Identifier if self.is_yield_statement() => {
                let children = vec![
                    self.bump().into(),
                    self.parse_expression()?.into(),
                    self.expect(TokenKind::Semi)?.into(),
                ];
                (RuleKind::YieldStatement, children)
            }
            TokenKind::Identifier if self.kind_at(1) == TokenKind::Colon => {
                let children = vec![self.bump().into(), self.bump().into(), self.parse_statement()?.into()];
                (RuleKind::LabeledStatement, children)
            }
            _ => {
                let children = vec![self.parse_expression()?.into(), self.expect(TokenKind::Semi)?.into()];
                (RuleKind::ExpressionStatement, children)
            }
        };
        Ok(self.finish(kind, children))
    }

    /// `( expression )` as used by statement headers.
    fn push_par_expression(&mut self, children: &mut Vec<ParseNode>) -> PResult<()> {
        children.push(self.expect(TokenKind::LParen)?.into());
        children.push(self.parse_expression()?.into());
        children.push(self.expect(TokenKind::RParen)?.into());
        Ok(())
    }

    fn is_enhanced_for(&mut self) -> bool {
        let Some(end) = self.modified_type_end() else {
            return false;
        };
        if self.token_at(end).kind != TokenKind::Identifier {
            return false;
        }
        let mut index = end + 1;
        while self.token_at(index).kind == TokenKind::LBrack && self.token_at(index + 1).kind == TokenKind::RBrack {
            index += 2;
        }
        self.token_at(index).kind == TokenKind::Colon
    }

    fn parse_for_statement(&mut self) -> PResult<ParseTree> {
        let mut children = vec![self.expect(TokenKind::For)?.into()];
        children.push(self.expect(TokenKind::LParen)?.into());
        if self.is_enhanced_for() {
            self.push_modifiers(&mut children)?;
            children.push(self.parse_type()?.into());
            children.push(self.parse_variable_declarator_id()?.into());
            children.push(self.expect(TokenKind::Colon)?.into());
            children.push(self.parse_expression()?.into());
            children.push(self.expect(TokenKind::RParen)?.into());
            children.push(self.parse_statement()?.into());
            return Ok(self.finish(RuleKind::EnhancedForStatement, children));
        }
        if !self.at(TokenKind::Semi) {
            let init = if self.is_local_variable_declaration() {
                vec![self.parse_local_variable_declaration()?.into()]
            } else {
                self.parse_expression_list()?
            };
            children.push(self.finish(RuleKind::ForInit, init).into());
        }
        children.push(self.expect(TokenKind::Semi)?.into());
        if !self.at(TokenKind::Semi) {
            children.push(self.parse_expression()?.into());
        }
        children.push(self.expect(TokenKind::Semi)?.into());
        if !self.at(TokenKind::RParen) {
            let update = self.parse_expression_list()?;
            children.push(self.finish(RuleKind::ForUpdate, update).into());
        }
        children.push(self.expect(TokenKind::RParen)?.into());
        children.push(self.parse_statement()?.into());
        Ok(self.finish(RuleKind::ForStatement, children))
    }

    fn parse_expression_list(&mut self) -> PResult<Vec<ParseNode>> {
        let mut children = vec![self.parse_expression()?.into()];
        while let Some(comma) = self.eat(TokenKind::Comma) {
            children.push(comma.into());
            children.push(self.parse_expression()?.into());
        }
        Ok(children)
    }

    fn parse_try_statement(&mut self) -> PResult<ParseTree> {
        let mut children = vec![self.expect(TokenKind::Try)?.into()];
        let kind = if self.at(TokenKind::LParen) {
            children.push(self.parse_resource_specification()?.into());
            RuleKind::TryWithResourcesStatement
        } else {
            RuleKind::TryStatement
        };
        children.push(self.parse_block()?.into());
        let mut handlers = 0;
        while self.at(TokenKind::Catch) {
            children.push(self.parse_catch_clause()?.into());
            handlers += 1;
        }
        if let Some(finally) = self.eat(TokenKind::Finally) {
            let body = self.parse_block()?;
            children.push(self.finish(RuleKind::Finally, vec![finally.into(), body.into()]).into());
            handlers += 1;
        }
        if kind == RuleKind::TryStatement && handlers == 0 {
            return Err(self.mismatched("{'catch', 'finally'}"));
        }
        Ok(self.finish(kind, children))
    }

    fn parse_resource_specification(&mut self) -> PResult<ParseTree> {
        let mut children = vec![self.expect(TokenKind::LParen)?.into()];
        loop {
            children.push(self.parse_resource()?.into());
            match self.eat(TokenKind::Semi) {
                Some(semi) => children.push(semi.into()),
                None => break,
            }
            if self.at(TokenKind::RParen) {
                break;
            }
        }
        children.push(self.expect(TokenKind::RParen)?.into());
        Ok(self.finish(RuleKind::ResourceSpecification, children))
    }

    fn parse_resource(&mut self) -> PResult<ParseTree> {
        if !self.is_local_variable_declaration() {
            let name = self.parse_qualified_name()?;
            return Ok(self.finish(RuleKind::Resource, vec![name.into()]));
        }
        let mut children = Vec::new();
        self.push_modifiers(&mut children)?;
        children.push(self.parse_type()?.into());
        let id = self.parse_variable_declarator_id()?;
        let assign = self.expect(TokenKind::Assign)?;
        let init = self.parse_expression()?;
        children.push(
            self.finish(RuleKind::VariableDeclarator, vec![id.into(), assign.into(), init.into()])
                .into(),
        );
        Ok(self.finish(RuleKind::Resource, children))
    }

    fn parse_catch_clause(&mut self) -> PResult<ParseTree> {
        let mut children = vec![self.expect(TokenKind::Catch)?.into()];
        children.push(self.expect(TokenKind::LParen)?.into());
        self.push_modifiers(&mut children)?;
        let mut types = vec![self.parse_qualified_name()?.into()];
        while let Some(bar) = self.eat(TokenKind::BitOr) {
            types.push(bar.into());
            types.push(self.parse_qualified_name()?.into());
        }
        children.push(self.finish(RuleKind::CatchType, types).into());
        children.push(self.expect_identifier()?.into());
        children.push(self.expect(TokenKind::RParen)?.into());
        children.push(self.parse_block()?.into());
        Ok(self.finish(RuleKind::CatchClause, children))
    }

    /// `{ rules }` or `{ groups labels }`, shared by switch statements and
    /// switch expressions.
    fn parse_switch_block(&mut self) -> PResult<ParseTree> {
        let mut children = vec![self.expect(TokenKind::LBrace)?.into()];
        while !self.at(TokenKind::RBrace) {
            if !matches!(self.kind(), TokenKind::Case | TokenKind::Default) {
                return Err(self.mismatched("{'case', 'default', '}'}"));
            }
            let label = self.parse_switch_label()?;
            if let Some(arrow) = self.eat(TokenKind::Arrow) {
                let body = match self.kind() {
                    TokenKind::LBrace => self.parse_block()?,
                    TokenKind::Throw => self.parse_statement()?,
                    _ => {
                        let expr = self.parse_expression()?;
                        let semi = self.expect(TokenKind::Semi)?;
                        self.finish(RuleKind::ExpressionStatement, vec![expr.into(), semi.into()])
                    }
                };
                children.push(
                    self.finish(RuleKind::SwitchRule, vec![label.into(), arrow.into(), body.into()])
                        .into(),
                );
                continue;
            }
            let mut group = vec![label.into(), self.expect(TokenKind::Colon)?.into()];
            while matches!(self.kind(), TokenKind::Case | TokenKind::Default) {
                group.push(self.parse_switch_label()?.into());
                group.push(self.expect(TokenKind::Colon)?.into());
            }
            while !matches!(
                self.kind(),
                TokenKind::Case | TokenKind::Default | TokenKind::RBrace | TokenKind::Eof
            ) {
                group.push(self.parse_block_statement()?.into());
            }
            children.push(self.finish(RuleKind::SwitchGroup, group).into());
        }
        children.push(self.expect(TokenKind::RBrace)?.into());
        Ok(self.finish(RuleKind::SwitchBlock, children))
    }

    fn parse_switch_label(&mut self) -> PResult<ParseTree> {
        if let Some(default) = self.eat(TokenKind::Default) {
            return Ok(self.finish(RuleKind::SwitchLabel, vec![default.into()]));
        }
        let mut children = vec![self.expect(TokenKind::Case)?.into()];
        loop {
            children.push(self.parse_case_item()?.into());
            match self.eat(TokenKind::Comma) {
                Some(comma) => children.push(comma.into()),
                None => break,
            }
        }
        Ok(self.finish(RuleKind::SwitchLabel, children))
    }

    fn parse_case_item(&mut self) -> PResult<ParseTree> {
        if !self.is_pattern() {
            return self.parse_ternary();
        }
        let pattern = self.parse_pattern()?;
        if self.at_word("when") || self.at(TokenKind::AndAnd) {
            let guard = self.bump();
            let condition = self.parse_binary(OperatorPrecedence::LOWEST)?;
            return Ok(self.finish(
                RuleKind::GuardedPattern,
                vec![pattern.into(), guard.into(), condition.into()],
            ));
        }
        Ok(pattern)
    }

    /// `final Type name`.
    fn parse_pattern(&mut self) -> PResult<ParseTree> {
        let mut children = Vec::new();
        self.push_modifiers(&mut children)?;
        children.push(self.parse_type()?.into());
        children.push(self.expect_identifier()?.into());
        Ok(self.finish(RuleKind::Pattern, children))
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    /// Lambda and assignment level.
    fn parse_expression(&mut self) -> PResult<ParseTree> {
        self.nested(|p| {
            if p.is_lambda_start() {
                return p.parse_lambda();
            }
            let target = p.parse_ternary()?;
            if p.kind().is_assignment_operator() {
                let op = p.bump();
                let value = p.parse_expression()?;
                return Ok(p.finish(RuleKind::Assignment, vec![target.into(), op.into(), value.into()]));
            }
            Ok(target)
        })
    }

    fn parse_lambda(&mut self) -> PResult<ParseTree> {
        let params = if self.at(TokenKind::Identifier) {
            let id = self.bump();
            self.finish(RuleKind::LambdaParameters, vec![id.into()])
        } else {
            let identifiers_only = self.kind_at(1) == TokenKind::RParen
                || (self.kind_at(1) == TokenKind::Identifier
                    && matches!(self.kind_at(2), TokenKind::Comma | TokenKind::RParen));
            if identifiers_only {
                let mut children = vec![self.expect(TokenKind::LParen)?.into()];
                while !self.at(TokenKind::RParen) {
                    children.push(self.expect_identifier()?.into());
                    match self.eat(TokenKind::Comma) {
                        Some(comma) => children.push(comma.into()),
                        None => break,
                    }
                }
                children.push(self.expect(TokenKind::RParen)?.into());
                self.finish(RuleKind::LambdaParameters, children)
            } else {
                let formal = self.parse_formal_parameters(true)?;
                self.finish(RuleKind::LambdaParameters, vec![formal.into()])
            }
        };
        let arrow = self.expect(TokenKind::Arrow)?;
        let body = if self.at(TokenKind::LBrace) {
            self.parse_block()?
        } else {
            self.parse_expression()?
        };
        Ok(self.finish(RuleKind::Lambda, vec![params.into(), arrow.into(), body.into()]))
    }

    /// `cond ? a : b`, right-associative.
    fn parse_ternary(&mut self) -> PResult<ParseTree> {
        let cond = self.parse_binary(OperatorPrecedence::LOWEST)?;
        let Some(question) = self.eat(TokenKind::Question) else {
            return Ok(cond);
        };
        let then = self.parse_expression()?;
        let colon = self.expect(TokenKind::Colon)?;
        let orelse = if self.is_lambda_start() {
            self.parse_lambda()?
        } else {
            self.nested(|p| p.parse_ternary())?
        };
        Ok(self.finish(
            RuleKind::Ternary,
            vec![cond.into(), question.into(), then.into(), colon.into(), orelse.into()],
        ))
    }

    /// The operator at the current position, joining adjacent `>` tokens
    /// into `>>` and `>>>`. Returns the token and how many tokens it spans.
    fn peek_binary_operator(&self) -> (Token, usize) {
        let token = self.peek();
        if token.kind != TokenKind::Gt {
            return (token.clone(), 1);
        }
        let mut width = 1;
        while width < 3
            && self.kind_at(width) == TokenKind::Gt
            && self.peek_at(width).range.pos == self.peek_at(width - 1).range.end
        {
            width += 1;
        }
        let kind = match width {
            1 => return (token.clone(), 1),
            2 => TokenKind::RShift,
            _ => TokenKind::URShift,
        };
        let end = self.peek_at(width - 1).range.end;
        let joined = Token::new(
            kind,
            ">".repeat(width),
            token.line,
            token.column,
            TextRange::new(token.range.pos, end),
        );
        (joined, width)
    }

    /// Left-associative binary layers from `min` up to multiplicative.
    fn parse_binary(&mut self, min: OperatorPrecedence) -> PResult<ParseTree> {
        self.chained(|p, links| p.parse_binary_chain(min, links))
    }

    fn parse_binary_chain(&mut self, min: OperatorPrecedence, links: &mut u32) -> PResult<ParseTree> {
        let mut left = self.parse_unary()?;
        loop {
            let (op, width) = self.peek_binary_operator();
            let Some(precedence) = get_binary_operator_precedence(op.kind) else {
                break;
            };
            if precedence < min {
                break;
            }
            self.link(links)?;
            self.pos += width;
            if op.kind == TokenKind::InstanceOf {
                let target = if self.is_pattern() {
                    self.parse_pattern()?
                } else {
                    self.parse_type()?
                };
                left = self.finish(RuleKind::InstanceOf, vec![left.into(), op.into(), target.into()]);
                continue;
            }
            let right = match precedence.tighter() {
                Some(tighter) => self.parse_binary(tighter)?,
                None => self.parse_unary()?,
            };
            left = self.finish(precedence.rule_kind(), vec![left.into(), op.into(), right.into()]);
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> PResult<ParseTree> {
        self.nested(|p| match p.kind() {
            TokenKind::Inc | TokenKind::Dec | TokenKind::Add | TokenKind::Sub | TokenKind::Tilde | TokenKind::Bang => {
                let op = p.bump();
                let operand = p.parse_unary()?;
                Ok(p.finish(RuleKind::Prefix, vec![op.into(), operand.into()]))
            }
            TokenKind::LParen => match p.try_parse_cast()? {
                Some(cast) => Ok(cast),
                None => p.parse_postfix_expression(),
            },
            _ => p.parse_postfix_expression(),
        })
    }

    /// `( Type & Type )`.
    fn parse_cast_head(&mut self) -> PResult<Vec<ParseNode>> {
        let mut children = vec![self.expect(TokenKind::LParen)?.into()];
        children.push(self.parse_type()?.into());
        while let Some(amp) = self.eat(TokenKind::BitAnd) {
            children.push(amp.into());
            children.push(self.parse_type()?.into());
        }
        children.push(self.expect(TokenKind::RParen)?.into());
        Ok(children)
    }

    /// A parenthesized primitive type casts any unary expression; a
    /// reference type only casts an operand that cannot be read as the
    /// right side of a binary `+` or `-`.
    fn try_parse_cast(&mut self) -> PResult<Option<ParseTree>> {
        let Some(end) = self.speculate(Speculation::CastHead, |p| p.parse_cast_head().map(drop)) else {
            return Ok(None);
        };
        let next = self.token_at(end).kind;
        let primitive = end == self.pos + 3 && self.kind_at(1).is_primitive_type();
        let lambda_follows = {
            let saved = self.pos;
            self.pos = end;
            let lambda = self.is_lambda_start();
            self.pos = saved;
            lambda
        };
        let is_cast = if primitive {
            starts_unary_expression(next)
        } else {
            starts_unary_not_plus_minus(next) || lambda_follows
        };
        if !is_cast {
            return Ok(None);
        }
        let mut children = self.parse_cast_head()?;
        let operand = if self.is_lambda_start() {
            self.parse_lambda()?
        } else {
            self.parse_unary()?
        };
        children.push(operand.into());
        Ok(Some(self.finish(RuleKind::Cast, children)))
    }

    fn parse_postfix_expression(&mut self) -> PResult<ParseTree> {
        self.chained(|p, links| {
            let primary = p.parse_primary()?;
            let mut expr = p.parse_selectors(primary, links)?;
            while matches!(p.kind(), TokenKind::Inc | TokenKind::Dec) {
                p.link(links)?;
                let op = p.bump();
                expr = p.finish(RuleKind::Postfix, vec![expr.into(), op.into()]);
            }
            Ok(expr)
        })
    }

    /// `.member`, `[index]` and `::name` suffixes, applied left to right.
    fn parse_selectors(&mut self, mut expr: ParseTree, links: &mut u32) -> PResult<ParseTree> {
        loop {
            if matches!(self.kind(), TokenKind::Dot | TokenKind::LBrack | TokenKind::ColonColon) {
                self.link(links)?;
            }
            match self.kind() {
                TokenKind::Dot => {
                    let dot = self.bump();
                    let member = match self.kind() {
                        TokenKind::Identifier if self.kind_at(1) == TokenKind::LParen => self.parse_method_call()?,
                        TokenKind::Identifier => {
                            let id = self.bump();
                            self.finish(RuleKind::Name, vec![id.into()])
                        }
                        TokenKind::Lt => self.parse_explicit_generic_invocation()?,
                        TokenKind::This => {
                            let this = self.bump();
                            self.finish(RuleKind::This, vec![this.into()])
                        }
                        TokenKind::Super => self.parse_super_suffix()?,
                        TokenKind::New => self.parse_inner_creation()?,
                        _ => return Err(self.mismatched("Identifier")),
                    };
                    expr = self.finish(RuleKind::MemberAccess, vec![expr.into(), dot.into(), member.into()]);
                }
                TokenKind::LBrack => {
                    let open = self.bump();
                    let index = self.parse_expression()?;
                    let close = self.expect(TokenKind::RBrack)?;
                    expr = self.finish(
                        RuleKind::ArrayAccess,
                        vec![expr.into(), open.into(), index.into(), close.into()],
                    );
                }
                TokenKind::ColonColon => expr = self.parse_method_reference(expr)?,
                _ => return Ok(expr),
            }
        }
    }

    /// `target :: <T> name` or `target :: new`.
    fn parse_method_reference(&mut self, target: ParseTree) -> PResult<ParseTree> {
        let mut children = vec![target.into(), self.expect(TokenKind::ColonColon)?.into()];
        if self.at(TokenKind::Lt) {
            children.push(self.parse_type_arguments()?.into());
        }
        match self.kind() {
            TokenKind::New | TokenKind::Identifier => children.push(self.bump().into()),
            _ => return Err(self.mismatched("{'new', Identifier}")),
        }
        Ok(self.finish(RuleKind::MethodReference, children))
    }

    fn parse_primary(&mut self) -> PResult<ParseTree> {
        match self.kind() {
            TokenKind::LParen => {
                let open = self.bump();
                let expr = self.parse_expression()?;
                let close = self.expect(TokenKind::RParen)?;
                Ok(self.finish(RuleKind::Parenthesized, vec![open.into(), expr.into(), close.into()]))
            }
            kind if kind.is_literal() => {
                let literal = self.bump();
                Ok(self.finish(RuleKind::Literal, vec![literal.into()]))
            }
            TokenKind::This if self.kind_at(1) == TokenKind::LParen => self.parse_method_call(),
            TokenKind::This => {
                let this = self.bump();
                Ok(self.finish(RuleKind::This, vec![this.into()]))
            }
            TokenKind::Super => self.parse_super_suffix(),
            TokenKind::New => self.parse_creator(),
            TokenKind::Switch => {
                let mut children = vec![self.bump().into()];
                self.push_par_expression(&mut children)?;
                children.push(self.parse_switch_block()?.into());
                Ok(self.finish(RuleKind::SwitchExpression, children))
            }
            TokenKind::Lt => self.parse_explicit_generic_invocation(),
            kind if kind.is_primitive_type() || kind == TokenKind::Void => {
                let ty = self.parse_result_type()?;
                self.parse_type_suffix(ty)
            }
            TokenKind::Identifier if self.kind_at(1) == TokenKind::LParen => self.parse_method_call(),
            TokenKind::Identifier => {
                let maybe_type = matches!(
                    self.kind_at(1),
                    TokenKind::Dot | TokenKind::Lt | TokenKind::LBrack | TokenKind::ColonColon | TokenKind::At
                );
                if maybe_type {
                    if let Some(tree) = self.try_parse_type_primary()? {
                        return Ok(tree);
                    }
                }
                let id = self.bump();
                Ok(self.finish(RuleKind::Name, vec![id.into()]))
            }
            _ => Err(self.no_viable_alternative()),
        }
    }

    /// `Type.class` or `Type::name` where the target must be read as a type.
    /// Plain dotted names before `::name` are left to the expression path.
    fn try_parse_type_primary(&mut self) -> PResult<Option<ParseTree>> {
        let Some(end) = self.speculate(Speculation::Type, |p| p.parse_type().map(drop)) else {
            return Ok(None);
        };
        let next = self.token_at(end).kind;
        let class_literal = next == TokenKind::Dot && self.token_at(end + 1).kind == TokenKind::Class;
        let reference = next == TokenKind::ColonColon && {
            let plain = (self.pos..end)
                .all(|index| matches!(self.token_at(index).kind, TokenKind::Identifier | TokenKind::Dot));
            !plain || self.token_at(end + 1).kind == TokenKind::New
        };
        if !class_literal && !reference {
            return Ok(None);
        }
        let ty = self.parse_type()?;
        self.parse_type_suffix(ty).map(Some)
    }

    fn parse_type_suffix(&mut self, ty: ParseTree) -> PResult<ParseTree> {
        if self.at(TokenKind::ColonColon) {
            return self.parse_method_reference(ty);
        }
        let dot = self.expect(TokenKind::Dot)?;
        let class = self.expect(TokenKind::Class)?;
        Ok(self.finish(RuleKind::ClassLiteral, vec![ty.into(), dot.into(), class.into()]))
    }

    /// `name(args)`, `this(args)` or `super(args)`.
    fn parse_method_call(&mut self) -> PResult<ParseTree> {
        let callee = match self.kind() {
            TokenKind::Identifier | TokenKind::This | TokenKind::Super => self.bump(),
            _ => return Err(self.mismatched("Identifier")),
        };
        let args = self.parse_arguments()?;
        Ok(self.finish(RuleKind::MethodCall, vec![callee.into(), args.into()]))
    }

    fn parse_arguments(&mut self) -> PResult<ParseTree> {
        let mut children = vec![self.expect(TokenKind::LParen)?.into()];
        if !self.at(TokenKind::RParen) {
            children.extend(self.parse_expression_list()?);
        }
        children.push(self.expect(TokenKind::RParen)?.into());
        Ok(self.finish(RuleKind::Arguments, children))
    }

    /// After `super`: a constructor call, a member access or a bare `super`
    /// ahead of `::`.
    fn parse_super_suffix(&mut self) -> PResult<ParseTree> {
        match self.kind_at(1) {
            TokenKind::LParen => self.parse_method_call(),
            TokenKind::Dot => {
                let mut children = vec![self.bump().into(), self.bump().into()];
                if self.at(TokenKind::Lt) {
                    children.push(self.parse_type_arguments()?.into());
                }
                children.push(self.expect_identifier()?.into());
                if self.at(TokenKind::LParen) {
                    children.push(self.parse_arguments()?.into());
                }
                Ok(self.finish(RuleKind::SuperAccess, children))
            }
            _ => {
                let super_ = self.expect(TokenKind::Super)?;
                Ok(self.finish(RuleKind::Super, vec![super_.into()]))
            }
        }
    }

    /// `<T> name(args)`, `<T> this(args)`, `<T> super(args)`, `<T> super.name`.
    fn parse_explicit_generic_invocation(&mut self) -> PResult<ParseTree> {
        let type_args = self.parse_type_arguments()?;
        let value = match self.kind() {
            TokenKind::Identifier | TokenKind::This => self.parse_method_call()?,
            TokenKind::Super => self.parse_super_suffix()?,
            _ => return Err(self.mismatched("Identifier")),
        };
        Ok(self.finish(RuleKind::ExplicitGenericInvocation, vec![type_args.into(), value.into()]))
    }

    /// `new <T> Type(args) { body }` or an array creation.
    fn parse_creator(&mut self) -> PResult<ParseTree> {
        let mut children: Vec<ParseNode> = vec![self.expect(TokenKind::New)?.into()];
        if self.at(TokenKind::Lt) {
            children.push(self.parse_type_arguments()?.into());
        }
        let ty = self.parse_non_array_type()?;
        let primitive = ty.child_rules().all(|child| child.kind == RuleKind::Annotation);
        children.push(ty.into());
        if self.at(TokenKind::LBrack) || primitive {
            while self.at(TokenKind::LBrack) && self.kind_at(1) != TokenKind::RBrack {
                let open = self.bump();
                let size = self.parse_expression()?;
                let close = self.expect(TokenKind::RBrack)?;
                children.push(
                    self.finish(RuleKind::DimExpr, vec![open.into(), size.into(), close.into()])
                        .into(),
                );
            }
            let sized = children.iter().any(|child| is_rule(child, RuleKind::DimExpr));
            self.parse_dims(&mut children)?;
            if !sized {
                if !children.iter().any(|child| is_rule(child, RuleKind::Dim)) {
                    return Err(self.mismatched("'['"));
                }
                children.push(self.parse_array_initializer()?.into());
            }
            return Ok(self.finish(RuleKind::ArrayCreation, children));
        }
        children.push(self.parse_arguments()?.into());
        if self.at(TokenKind::LBrace) {
            children.push(self.parse_class_body(MemberContext::Class)?.into());
        }
        Ok(self.finish(RuleKind::ObjectCreation, children))
    }

    /// `outer.new <T> Inner<U>(args) { body }`, after the dot.
    fn parse_inner_creation(&mut self) -> PResult<ParseTree> {
        let mut children = vec![self.expect(TokenKind::New)?.into()];
        if self.at(TokenKind::Lt) {
            children.push(self.parse_type_arguments()?.into());
        }
        children.extend(self.parse_annotations()?);
        children.push(self.expect_identifier()?.into());
        if self.at(TokenKind::Lt) {
            children.push(self.parse_type_arguments()?.into());
        }
        children.push(self.parse_arguments()?.into());
        if self.at(TokenKind::LBrace) {
            children.push(self.parse_class_body(MemberContext::Class)?.into());
        }
        Ok(self.finish(RuleKind::InnerCreation, children))
    }
}

fn is_rule(node: &ParseNode, kind: RuleKind) -> bool {
    node.as_rule().is_some_and(|tree| tree.kind == kind)
}

fn is_modifier_keyword(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Public
            | TokenKind::Protected
            | TokenKind::Private
            | TokenKind::Static
            | TokenKind::Abstract
            | TokenKind::Final
            | TokenKind::Native
            | TokenKind::Synchronized
            | TokenKind::Transient
            | TokenKind::Volatile
            | TokenKind::Strictfp
            | TokenKind::Default
            | TokenKind::NonSealed
    )
}

fn starts_unary_not_plus_minus(kind: TokenKind) -> bool {
    kind.is_literal()
        || kind.is_primitive_type()
        || matches!(
            kind,
            TokenKind::Tilde
                | TokenKind::Bang
                | TokenKind::LParen
                | TokenKind::Identifier
                | TokenKind::This
                | TokenKind::Super
                | TokenKind::New
                | TokenKind::Switch
                | TokenKind::Void
        )
}

fn starts_unary_expression(kind: TokenKind) -> bool {
    starts_unary_not_plus_minus(kind)
        || matches!(kind, TokenKind::Add | TokenKind::Sub | TokenKind::Inc | TokenKind::Dec)
}
