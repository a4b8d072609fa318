//! Token kinds and scanned token information.

use jast_core::text::TextRange;
use std::fmt;

macro_rules! keywords {
    ($($variant:ident => $text:literal),* $(,)?) => {
        /// The kind of a scanned token.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum TokenKind {
            $($variant,)*

            // Literals
            IntegerLiteral,
            FloatingLiteral,
            CharLiteral,
            StringLiteral,
            TextBlock,
            Identifier,
            /// `non-sealed`, the only hyphenated word in the language.
            NonSealed,

            // Separators
            LParen,
            RParen,
            LBrace,
            RBrace,
            LBrack,
            RBrack,
            Semi,
            Comma,
            Dot,
            Ellipsis,
            At,
            ColonColon,

            // Operators
            Assign,
            Gt,
            Lt,
            Bang,
            Tilde,
            Question,
            Colon,
            Arrow,
            EqEq,
            Le,
            Ge,
            NotEq,
            AndAnd,
            OrOr,
            Inc,
            Dec,
            Add,
            Sub,
            Mul,
            Div,
            BitAnd,
            BitOr,
            Caret,
            Mod,
            LShift,
            /// `>>`, recombined by the recognizer from two adjacent `>` tokens.
            RShift,
            /// `>>>`, recombined by the recognizer from three adjacent `>` tokens.
            URShift,
            AddAssign,
            SubAssign,
            MulAssign,
            DivAssign,
            AndAssign,
            OrAssign,
            XorAssign,
            ModAssign,
            LShiftAssign,
            RShiftAssign,
            URShiftAssign,

            Eof,
        }

        impl TokenKind {
            /// Look up a reserved word.
            pub fn keyword(text: &str) -> Option<TokenKind> {
                match text {
                    $($text => Some(TokenKind::$variant),)*
                    _ => None,
                }
            }

            pub fn is_keyword(self) -> bool {
                matches!(self, $(TokenKind::$variant)|*)
            }

            fn keyword_text(self) -> Option<&'static str> {
                match self {
                    $(TokenKind::$variant => Some($text),)*
                    _ => None,
                }
            }
        }
    };
}

keywords! {
    Abstract => "abstract",
    Assert => "assert",
    Boolean => "boolean",
    Break => "break",
    Byte => "byte",
    Case => "case",
    Catch => "catch",
    Char => "char",
    Class => "class",
    Const => "const",
    Continue => "continue",
    Default => "default",
    Do => "do",
    Double => "double",
    Else => "else",
    Enum => "enum",
    Extends => "extends",
    Final => "final",
    Finally => "finally",
    Float => "float",
    For => "for",
    Goto => "goto",
    If => "if",
    Implements => "implements",
    Import => "import",
    InstanceOf => "instanceof",
    Int => "int",
    Interface => "interface",
    Long => "long",
    Native => "native",
    New => "new",
    Package => "package",
    Private => "private",
    Protected => "protected",
    Public => "public",
    Return => "return",
    Short => "short",
    Static => "static",
    Strictfp => "strictfp",
    Super => "super",
    Switch => "switch",
    Synchronized => "synchronized",
    This => "this",
    Throw => "throw",
    Throws => "throws",
    Transient => "transient",
    Try => "try",
    Void => "void",
    Volatile => "volatile",
    While => "while",
    True => "true",
    False => "false",
    Null => "null",
}

impl TokenKind {
    /// The fixed source text of punctuation and keyword tokens.
    pub fn text(self) -> Option<&'static str> {
        if let Some(text) = self.keyword_text() {
            return Some(text);
        }
        Some(match self {
            TokenKind::NonSealed => "non-sealed",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::LBrack => "[",
            TokenKind::RBrack => "]",
            TokenKind::Semi => ";",
            TokenKind::Comma => ",",
            TokenKind::Dot => ".",
            TokenKind::Ellipsis => "...",
            TokenKind::At => "@",
            TokenKind::ColonColon => "::",
            TokenKind::Assign => "=",
            TokenKind::Gt => ">",
            TokenKind::Lt => "<",
            TokenKind::Bang => "!",
            TokenKind::Tilde => "~",
            TokenKind::Question => "?",
            TokenKind::Colon => ":",
            TokenKind::Arrow => "->",
            TokenKind::EqEq => "==",
            TokenKind::Le => "<=",
            TokenKind::Ge => ">=",
            TokenKind::NotEq => "!=",
            TokenKind::AndAnd => "&&",
            TokenKind::OrOr => "||",
            TokenKind::Inc => "++",
            TokenKind::Dec => "--",
            TokenKind::Add => "+",
            TokenKind::Sub => "-",
            TokenKind::Mul => "*",
            TokenKind::Div => "/",
            TokenKind::BitAnd => "&",
            TokenKind::BitOr => "|",
            TokenKind::Caret => "^",
            TokenKind::Mod => "%",
            TokenKind::LShift => "<<",
            TokenKind::RShift => ">>",
            TokenKind::URShift => ">>>",
            TokenKind::AddAssign => "+=",
            TokenKind::SubAssign => "-=",
            TokenKind::MulAssign => "*=",
            TokenKind::DivAssign => "/=",
            TokenKind::AndAssign => "&=",
            TokenKind::OrAssign => "|=",
            TokenKind::XorAssign => "^=",
            TokenKind::ModAssign => "%=",
            TokenKind::LShiftAssign => "<<=",
            TokenKind::RShiftAssign => ">>=",
            TokenKind::URShiftAssign => ">>>=",
            TokenKind::Eof => "<EOF>",
            _ => return None,
        })
    }

    pub fn is_literal(self) -> bool {
        matches!(
            self,
            TokenKind::IntegerLiteral
                | TokenKind::FloatingLiteral
                | TokenKind::CharLiteral
                | TokenKind::StringLiteral
                | TokenKind::TextBlock
                | TokenKind::True
                | TokenKind::False
                | TokenKind::Null
        )
    }

    pub fn is_primitive_type(self) -> bool {
        matches!(
            self,
            TokenKind::Boolean
                | TokenKind::Byte
                | TokenKind::Short
                | TokenKind::Int
                | TokenKind::Long
                | TokenKind::Char
                | TokenKind::Float
                | TokenKind::Double
        )
    }

    pub fn is_assignment_operator(self) -> bool {
        matches!(
            self,
            TokenKind::Assign
                | TokenKind::AddAssign
                | TokenKind::SubAssign
                | TokenKind::MulAssign
                | TokenKind::DivAssign
                | TokenKind::AndAssign
                | TokenKind::OrAssign
                | TokenKind::XorAssign
                | TokenKind::ModAssign
                | TokenKind::LShiftAssign
                | TokenKind::RShiftAssign
                | TokenKind::URShiftAssign
        )
    }

    /// How the token is named in "expecting" messages.
    pub fn describe(self) -> String {
        match self.text() {
            Some("<EOF>") => "<EOF>".to_string(),
            Some(text) => format!("'{}'", text),
            None => match self {
                TokenKind::Identifier => "Identifier".to_string(),
                TokenKind::IntegerLiteral => "IntegerLiteral".to_string(),
                TokenKind::FloatingLiteral => "FloatingLiteral".to_string(),
                TokenKind::CharLiteral => "CharLiteral".to_string(),
                TokenKind::StringLiteral => "StringLiteral".to_string(),
                _ => "TextBlock".to_string(),
            },
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

/// A scanned token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// The source text of the token, exactly as written.
    pub text: String,
    /// 1-based line of the first char.
    pub line: u32,
    /// 0-based column of the first char.
    pub column: u32,
    /// Char offsets of the token in the source.
    pub range: TextRange,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, line: u32, column: u32, range: TextRange) -> Self {
        Self {
            kind,
            text: text.into(),
            line,
            column,
            range,
        }
    }

    /// The length of the token in chars.
    pub fn len(&self) -> u32 {
        self.range.len()
    }

    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }

    /// Whether this is an identifier spelled `word`; used for contextual keywords.
    pub fn is_word(&self, word: &str) -> bool {
        self.kind == TokenKind::Identifier && self.text == word
    }

    /// The token as shown in recognizer messages.
    pub fn display(&self) -> &str {
        match self.kind {
            TokenKind::Eof => "<EOF>",
            _ => &self.text,
        }
    }
}
