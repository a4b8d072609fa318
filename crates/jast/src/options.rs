//! Parse configuration.

use jast_parser::MAX_RECURSION_DEPTH;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Which construct the source holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ParseMode {
    /// A whole file: package, imports and type declarations, or a module.
    #[default]
    Unit,
    /// One member or type declaration.
    Decl,
    /// One statement.
    Stmt,
    /// One expression.
    Expr,
}

impl ParseMode {
    pub const ALL: [ParseMode; 4] = [ParseMode::Unit, ParseMode::Decl, ParseMode::Stmt, ParseMode::Expr];

    pub fn as_str(self) -> &'static str {
        match self {
            ParseMode::Unit => "unit",
            ParseMode::Decl => "decl",
            ParseMode::Stmt => "stmt",
            ParseMode::Expr => "expr",
        }
    }
}

impl fmt::Display for ParseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown parse mode '{0}', expected one of unit, decl, stmt, expr")]
pub struct UnknownParseMode(pub String);

impl FromStr for ParseMode {
    type Err = UnknownParseMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unit" | "compilation_unit" => Ok(ParseMode::Unit),
            "decl" | "declaration" => Ok(ParseMode::Decl),
            "stmt" | "statement" => Ok(ParseMode::Stmt),
            "expr" | "expression" => Ok(ParseMode::Expr),
            other => Err(UnknownParseMode(other.to_string())),
        }
    }
}

/// Options for [`crate::parse_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    pub mode: ParseMode,
    /// Nesting depth at which the recognizer gives up with a parse error.
    pub max_depth: u32,
}

impl ParseOptions {
    pub fn new(mode: ParseMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            mode: ParseMode::default(),
            max_depth: MAX_RECURSION_DEPTH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_names() {
        for mode in ParseMode::ALL {
            assert_eq!(mode.to_string().parse::<ParseMode>(), Ok(mode));
        }
        assert_eq!("expression".parse::<ParseMode>(), Ok(ParseMode::Expr));
        assert_eq!("compilation_unit".parse::<ParseMode>(), Ok(ParseMode::Unit));
        assert_eq!(
            "module".parse::<ParseMode>(),
            Err(UnknownParseMode("module".to_string()))
        );
    }

    #[test]
    fn test_defaults() {
        assert_eq!(ParseMode::default(), ParseMode::Unit);
        let options = ParseOptions::new(ParseMode::Stmt);
        assert_eq!(options.mode, ParseMode::Stmt);
        assert_eq!(options.max_depth, MAX_RECURSION_DEPTH);
    }
}
