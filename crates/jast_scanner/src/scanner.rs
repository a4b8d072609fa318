//! The Java scanner.
//!
//! Converts source text into tokens. Whitespace and comments are skipped.
//! `>` is always scanned on its own unless it starts `>=`, `>>=` or `>>>=`,
//! so the closing brackets of nested type arguments never need splitting;
//! the recognizer joins adjacent `>` tokens back into shift operators.
//!
//! The first malformed token aborts scanning with a [`ParseError`].

use crate::char_codes::*;
use crate::token::{Token, TokenKind};
use jast_core::text::{LineMap, TextRange};
use jast_diagnostics::{messages, DiagnosticMessage, ParseError};

/// The scanner converts Java source text into tokens.
pub struct Scanner {
    /// The source text being scanned.
    text: Vec<char>,
    /// Offsets of line starts, for token positions.
    line_map: LineMap,
    /// Current position in the text.
    pos: usize,
    /// Start of the current token (after trivia).
    token_start: usize,
    /// The current token kind.
    token: TokenKind,
}

impl Scanner {
    /// Create a new scanner for the given source text.
    pub fn new(text: &str) -> Self {
        Self {
            text: text.chars().collect(),
            line_map: LineMap::new(text),
            pos: 0,
            token_start: 0,
            token: TokenKind::Eof,
        }
    }

    /// Get the current token kind.
    #[inline]
    pub fn token_kind(&self) -> TokenKind {
        self.token
    }

    /// Get the start position of the current token.
    #[inline]
    pub fn token_start(&self) -> usize {
        self.token_start
    }

    /// Get the end position of the current token.
    #[inline]
    pub fn token_end(&self) -> usize {
        self.pos
    }

    /// Get the source text of the current token.
    pub fn token_text(&self) -> String {
        self.text[self.token_start..self.pos].iter().collect()
    }

    /// Get a [`Token`] for the current token.
    pub fn token(&self) -> Token {
        let lc = self.line_map.line_and_column_of(self.token_start as u32);
        Token::new(
            self.token,
            self.token_text(),
            lc.line,
            lc.column,
            TextRange::new(self.token_start as u32, self.pos as u32),
        )
    }

    // ========================================================================
    // Core scanning
    // ========================================================================

    #[inline]
    fn current_char(&self) -> Option<char> {
        self.text.get(self.pos).copied()
    }

    #[inline]
    fn char_at(&self, offset: usize) -> Option<char> {
        self.text.get(self.pos + offset).copied()
    }

    #[inline]
    fn is_eof(&self) -> bool {
        self.pos >= self.text.len()
    }

    fn error_at(&self, pos: usize, message: &DiagnosticMessage, args: &[&str]) -> ParseError {
        let lc = self.line_map.line_and_column_of(pos as u32);
        ParseError::from_message(lc.line, lc.column, message, args)
    }

    /// Skip whitespace and comments.
    fn skip_trivia(&mut self) -> Result<(), ParseError> {
        loop {
            let Some(ch) = self.current_char() else {
                return Ok(());
            };
            match ch {
                c if is_line_break(c) || is_white_space_single_line(c) => self.pos += 1,
                '/' if self.char_at(1) == Some('/') => {
                    self.pos += 2;
                    while let Some(c) = self.current_char() {
                        if is_line_break(c) {
                            break;
                        }
                        self.pos += 1;
                    }
                }
                '/' if self.char_at(1) == Some('*') => {
                    let start = self.pos;
                    self.pos += 2;
                    loop {
                        if self.is_eof() {
                            return Err(self.error_at(start, &messages::UNTERMINATED_COMMENT, &[]));
                        }
                        if self.current_char() == Some('*') && self.char_at(1) == Some('/') {
                            self.pos += 2;
                            break;
                        }
                        self.pos += 1;
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    /// Scan the next token and return its kind.
    pub fn scan(&mut self) -> Result<TokenKind, ParseError> {
        self.skip_trivia()?;
        self.token_start = self.pos;

        let Some(ch) = self.current_char() else {
            self.token = TokenKind::Eof;
            return Ok(self.token);
        };

        self.token = match ch {
            '(' => self.single(TokenKind::LParen),
            ')' => self.single(TokenKind::RParen),
            '{' => self.single(TokenKind::LBrace),
            '}' => self.single(TokenKind::RBrace),
            '[' => self.single(TokenKind::LBrack),
            ']' => self.single(TokenKind::RBrack),
            ';' => self.single(TokenKind::Semi),
            ',' => self.single(TokenKind::Comma),
            '@' => self.single(TokenKind::At),
            '~' => self.single(TokenKind::Tilde),
            '?' => self.single(TokenKind::Question),

            '.' => self.scan_dot()?,
            ':' => self.pick(&[("::", TokenKind::ColonColon)], TokenKind::Colon),
            '=' => self.pick(&[("==", TokenKind::EqEq)], TokenKind::Assign),
            '!' => self.pick(&[("!=", TokenKind::NotEq)], TokenKind::Bang),
            '<' => self.pick(
                &[("<<=", TokenKind::LShiftAssign), ("<<", TokenKind::LShift), ("<=", TokenKind::Le)],
                TokenKind::Lt,
            ),
            '>' => self.pick(
                &[(">>>=", TokenKind::URShiftAssign), (">>=", TokenKind::RShiftAssign), (">=", TokenKind::Ge)],
                TokenKind::Gt,
            ),
            '+' => self.pick(&[("++", TokenKind::Inc), ("+=", TokenKind::AddAssign)], TokenKind::Add),
            '-' => self.pick(
                &[("--", TokenKind::Dec), ("-=", TokenKind::SubAssign), ("->", TokenKind::Arrow)],
                TokenKind::Sub,
            ),
            '*' => self.pick(&[("*=", TokenKind::MulAssign)], TokenKind::Mul),
            '/' => self.pick(&[("/=", TokenKind::DivAssign)], TokenKind::Div),
            '%' => self.pick(&[("%=", TokenKind::ModAssign)], TokenKind::Mod),
            '&' => self.pick(&[("&&", TokenKind::AndAnd), ("&=", TokenKind::AndAssign)], TokenKind::BitAnd),
            '|' => self.pick(&[("||", TokenKind::OrOr), ("|=", TokenKind::OrAssign)], TokenKind::BitOr),
            '^' => self.pick(&[("^=", TokenKind::XorAssign)], TokenKind::Caret),

            '"' if self.char_at(1) == Some('"') && self.char_at(2) == Some('"') => self.scan_text_block()?,
            '"' => self.scan_string_literal()?,
            '\'' => self.scan_char_literal()?,

            '0'..='9' => self.scan_number()?,

            c if is_identifier_start(c) => self.scan_identifier(),

            c => {
                let text = c.to_string();
                return Err(self.error_at(self.pos, &messages::TOKEN_RECOGNITION_ERROR, &[&text]));
            }
        };

        Ok(self.token)
    }

    // ========================================================================
    // Token-specific scanning methods
    // ========================================================================

    fn single(&mut self, kind: TokenKind) -> TokenKind {
        self.pos += 1;
        kind
    }

    fn starts_with(&self, text: &str) -> bool {
        text.chars().enumerate().all(|(i, c)| self.char_at(i) == Some(c))
    }

    /// Take the first of `candidates` that matches at the current position,
    /// or a single char of `fallback`. Longer candidates must come first.
    fn pick(&mut self, candidates: &[(&str, TokenKind)], fallback: TokenKind) -> TokenKind {
        for (text, kind) in candidates {
            if self.starts_with(text) {
                self.pos += text.chars().count();
                return *kind;
            }
        }
        self.pos += 1;
        fallback
    }

    fn scan_dot(&mut self) -> Result<TokenKind, ParseError> {
        if self.starts_with("...") {
            self.pos += 3;
            Ok(TokenKind::Ellipsis)
        } else if self.char_at(1).is_some_and(is_digit) {
            self.scan_number()
        } else {
            self.pos += 1;
            Ok(TokenKind::Dot)
        }
    }

    fn scan_identifier(&mut self) -> TokenKind {
        let start = self.pos;
        while self.current_char().is_some_and(is_identifier_part) {
            self.pos += 1;
        }
        let word: String = self.text[start..self.pos].iter().collect();
        if word == "non" && self.starts_with("-sealed") && !self.char_at(7).is_some_and(is_identifier_part) {
            self.pos += 7;
            return TokenKind::NonSealed;
        }
        TokenKind::keyword(&word).unwrap_or(TokenKind::Identifier)
    }

    fn malformed_number(&self) -> ParseError {
        let text = self.token_text();
        self.error_at(self.token_start, &messages::MALFORMED_NUMBER, &[&text])
    }

    /// Scan digits accepted by `is_valid`, with `_` separators between them.
    /// Returns the number of digits consumed.
    fn scan_digits(&mut self, is_valid: fn(char) -> bool) -> Result<usize, ParseError> {
        let mut count = 0;
        let mut trailing_underscore = false;
        while let Some(c) = self.current_char() {
            if is_valid(c) {
                count += 1;
                trailing_underscore = false;
            } else if c == '_' && count > 0 {
                trailing_underscore = true;
            } else {
                break;
            }
            self.pos += 1;
        }
        if trailing_underscore {
            return Err(self.malformed_number());
        }
        Ok(count)
    }

    fn scan_exponent(&mut self, markers: [char; 2]) -> Result<bool, ParseError> {
        if !self.current_char().is_some_and(|c| markers.contains(&c)) {
            return Ok(false);
        }
        self.pos += 1;
        if matches!(self.current_char(), Some('+') | Some('-')) {
            self.pos += 1;
        }
        if self.scan_digits(is_digit)? == 0 {
            return Err(self.malformed_number());
        }
        Ok(true)
    }

    fn scan_number(&mut self) -> Result<TokenKind, ParseError> {
        let radix_prefix = self.current_char() == Some('0')
            && matches!(self.char_at(1), Some('x' | 'X' | 'b' | 'B'));
        if radix_prefix {
            let hex = matches!(self.char_at(1), Some('x' | 'X'));
            self.pos += 2;
            if !hex {
                if self.scan_digits(is_binary_digit)? == 0 {
                    return Err(self.malformed_number());
                }
                return Ok(self.scan_integer_suffix());
            }
            let whole = self.scan_digits(is_hex_digit)?;
            let mut fraction = 0;
            let dotted = self.current_char() == Some('.');
            if dotted {
                self.pos += 1;
                fraction = self.scan_digits(is_hex_digit)?;
            }
            if whole + fraction == 0 {
                return Err(self.malformed_number());
            }
            if self.scan_exponent(['p', 'P'])? {
                if matches!(self.current_char(), Some('f' | 'F' | 'd' | 'D')) {
                    self.pos += 1;
                }
                return Ok(TokenKind::FloatingLiteral);
            }
            if dotted {
                return Err(self.malformed_number());
            }
            return Ok(self.scan_integer_suffix());
        }

        let whole = self.scan_digits(is_digit)?;
        let mut float = false;
        if self.current_char() == Some('.') && !(whole > 0 && self.char_at(1) == Some('.')) {
            // `1.` and `.5` are both floating literals; `1..` is not.
            let fraction_follows = self.char_at(1).is_some_and(is_digit);
            if whole > 0 || fraction_follows {
                self.pos += 1;
                self.scan_digits(is_digit)?;
                float = true;
            }
        }
        if self.scan_exponent(['e', 'E'])? {
            float = true;
        }
        if matches!(self.current_char(), Some('f' | 'F' | 'd' | 'D')) {
            self.pos += 1;
            return Ok(TokenKind::FloatingLiteral);
        }
        if float {
            return Ok(TokenKind::FloatingLiteral);
        }
        Ok(self.scan_integer_suffix())
    }

    fn scan_integer_suffix(&mut self) -> TokenKind {
        if matches!(self.current_char(), Some('l' | 'L')) {
            self.pos += 1;
        }
        TokenKind::IntegerLiteral
    }

    /// Consume one char of a quoted literal, including a whole escape sequence.
    fn scan_quoted_char(&mut self) {
        if self.current_char() == Some('\\') {
            self.pos += 1;
        }
        self.pos += 1;
    }

    fn scan_string_literal(&mut self) -> Result<TokenKind, ParseError> {
        let start = self.pos;
        self.pos += 1;
        loop {
            match self.current_char() {
                None => return Err(self.error_at(start, &messages::UNTERMINATED_STRING_LITERAL, &[])),
                Some(c) if is_line_break(c) => {
                    return Err(self.error_at(start, &messages::UNTERMINATED_STRING_LITERAL, &[]))
                }
                Some('"') => {
                    self.pos += 1;
                    return Ok(TokenKind::StringLiteral);
                }
                Some(_) => self.scan_quoted_char(),
            }
        }
    }

    /// Exactly one char or one escape sequence between the quotes.
    fn scan_char_literal(&mut self) -> Result<TokenKind, ParseError> {
        let start = self.pos;
        self.pos += 1;
        match self.current_char() {
            None => return Err(self.error_at(start, &messages::UNTERMINATED_CHAR_LITERAL, &[])),
            Some(c) if is_line_break(c) => {
                return Err(self.error_at(start, &messages::UNTERMINATED_CHAR_LITERAL, &[]))
            }
            Some('\'') => {
                return Err(self.error_at(start, &messages::TOKEN_RECOGNITION_ERROR, &["''"]));
            }
            Some('\\') => self.scan_char_escape(),
            Some(_) => self.pos += 1,
        }
        match self.current_char() {
            Some('\'') => {
                self.pos += 1;
                Ok(TokenKind::CharLiteral)
            }
            None => Err(self.error_at(start, &messages::UNTERMINATED_CHAR_LITERAL, &[])),
            Some(c) if is_line_break(c) => Err(self.error_at(start, &messages::UNTERMINATED_CHAR_LITERAL, &[])),
            Some(_) => {
                let text: String = self.text[start..=self.pos].iter().collect();
                Err(self.error_at(start, &messages::TOKEN_RECOGNITION_ERROR, &[&text]))
            }
        }
    }

    /// `\n`, `\'`, octal `\0` through `\377`, or `\uXXXX`.
    fn scan_char_escape(&mut self) {
        self.pos += 1;
        match self.current_char() {
            Some('u') => {
                while self.current_char() == Some('u') {
                    self.pos += 1;
                }
                let mut digits = 0;
                while digits < 4 && self.current_char().is_some_and(is_hex_digit) {
                    self.pos += 1;
                    digits += 1;
                }
            }
            Some(first @ '0'..='7') => {
                let max = if first <= '3' { 3 } else { 2 };
                let mut digits = 0;
                while digits < max && self.current_char().is_some_and(|c| c.is_digit(8)) {
                    self.pos += 1;
                    digits += 1;
                }
            }
            Some(_) => self.pos += 1,
            None => {}
        }
    }

    /// `"""`, optional whitespace, a line terminator, then content up to the
    /// closing `"""`.
    fn scan_text_block(&mut self) -> Result<TokenKind, ParseError> {
        let start = self.pos;
        self.pos += 3;
        while self.current_char().is_some_and(is_white_space_single_line) {
            self.pos += 1;
        }
        if !self.current_char().is_some_and(is_line_break) {
            return Err(self.error_at(start, &messages::TOKEN_RECOGNITION_ERROR, &["\"\"\""]));
        }
        loop {
            if self.is_eof() {
                return Err(self.error_at(start, &messages::UNTERMINATED_TEXT_BLOCK, &[]));
            }
            if self.starts_with("\"\"\"") {
                self.pos += 3;
                return Ok(TokenKind::TextBlock);
            }
            self.scan_quoted_char();
        }
    }
}

/// Scan the whole source into tokens, ending with an [`TokenKind::Eof`] token.
pub fn tokenize(source: &str) -> Result<Vec<Token>, ParseError> {
    let mut scanner = Scanner::new(source);
    let mut tokens = Vec::new();
    loop {
        let kind = scanner.scan()?;
        tokens.push(scanner.token());
        if kind == TokenKind::Eof {
            return Ok(tokens);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_scan_simple_tokens() {
        assert_eq!(
            kinds("( ) { } [ ] ; , . @ ::"),
            vec![
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::LBrace,
                TokenKind::RBrace,
                TokenKind::LBrack,
                TokenKind::RBrack,
                TokenKind::Semi,
                TokenKind::Comma,
                TokenKind::Dot,
                TokenKind::At,
                TokenKind::ColonColon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_scan_greater_than_stays_single() {
        assert_eq!(
            kinds("a >> b >>> c >>= d"),
            vec![
                TokenKind::Identifier,
                TokenKind::Gt,
                TokenKind::Gt,
                TokenKind::Identifier,
                TokenKind::Gt,
                TokenKind::Gt,
                TokenKind::Gt,
                TokenKind::Identifier,
                TokenKind::RShiftAssign,
                TokenKind::Identifier,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_scan_non_sealed() {
        assert_eq!(kinds("non-sealed"), vec![TokenKind::NonSealed, TokenKind::Eof]);
        assert_eq!(
            kinds("non-sealedx"),
            vec![TokenKind::Identifier, TokenKind::Sub, TokenKind::Identifier, TokenKind::Eof]
        );
    }

    #[test]
    fn test_scan_numbers() {
        for (source, kind) in [
            ("42", TokenKind::IntegerLiteral),
            ("42L", TokenKind::IntegerLiteral),
            ("0x1F_FF", TokenKind::IntegerLiteral),
            ("0b1010", TokenKind::IntegerLiteral),
            ("017", TokenKind::IntegerLiteral),
            ("3.14", TokenKind::FloatingLiteral),
            (".5", TokenKind::FloatingLiteral),
            ("1e10", TokenKind::FloatingLiteral),
            ("2f", TokenKind::FloatingLiteral),
            ("0x1.91eb851eb851fp+1", TokenKind::FloatingLiteral),
        ] {
            let tokens = tokenize(source).unwrap();
            assert_eq!(tokens[0].kind, kind, "{}", source);
            assert_eq!(tokens[0].text, source);
        }
        assert!(tokenize("0x").is_err());
        assert!(tokenize("1_").is_err());
    }

    #[test]
    fn test_scan_literals() {
        let tokens = tokenize(r#""a\"b" 'c' '\n'"#).unwrap();
        assert_eq!(tokens[0].kind, TokenKind::StringLiteral);
        assert_eq!(tokens[0].text, r#""a\"b""#);
        assert_eq!(tokens[1].kind, TokenKind::CharLiteral);
        assert_eq!(tokens[2].text, r"'\n'");
    }

    #[test]
    fn test_scan_char_escapes() {
        for source in [r"'\''", r"'\\'", r"'\101'", r"'\0'", r"'\u0041'", r"'\uu00e9'", "'é'"] {
            let tokens = tokenize(source).unwrap_or_else(|e| panic!("{}: {}", source, e));
            assert_eq!(tokens[0].kind, TokenKind::CharLiteral, "{}", source);
            assert_eq!(tokens[0].text, source);
        }
    }

    #[test]
    fn test_multi_char_literal_rejected() {
        let err = tokenize("x = 'ab';").unwrap_err();
        assert!(err.message.starts_with("token recognition error at: "), "{}", err.message);
        assert_eq!((err.line, err.column), (1, 4));
        assert!(tokenize(r"'\n\n'").is_err());
        assert!(tokenize("''").is_err());
    }

    #[test]
    fn test_scan_text_block() {
        let tokens = tokenize("\"\"\"\n    foo\n    \"\"\" x").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::TextBlock);
        assert_eq!(tokens[1].kind, TokenKind::Identifier);
        assert_eq!(tokens[1].line, 3);
    }

    #[test]
    fn test_scan_comments_and_positions() {
        let tokens = tokenize("// one\n/* two\n */ x").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
        assert_eq!((tokens[0].line, tokens[0].column), (3, 4));
    }

    #[test]
    fn test_scan_errors() {
        let err = tokenize("a # b").unwrap_err();
        assert_eq!(err.message, "token recognition error at: '#'");
        assert_eq!((err.line, err.column), (1, 2));
        assert!(tokenize("\"open").is_err());
        assert!(tokenize("/* open").is_err());
    }
}
