//! Operator variants.
//!
//! Operators are kept as distinct values rather than strings so the
//! precedence table is driven by variant identity.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Or,
    And,
    BitOr,
    BitXor,
    BitAnd,
    Eq,
    NotEq,
    Lt,
    LtE,
    Gt,
    GtE,
    LShift,
    RShift,
    URShift,
    Add,
    Sub,
    Mult,
    Div,
    Mod,
}

impl BinaryOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOperator::Or => "||",
            BinaryOperator::And => "&&",
            BinaryOperator::BitOr => "|",
            BinaryOperator::BitXor => "^",
            BinaryOperator::BitAnd => "&",
            BinaryOperator::Eq => "==",
            BinaryOperator::NotEq => "!=",
            BinaryOperator::Lt => "<",
            BinaryOperator::LtE => "<=",
            BinaryOperator::Gt => ">",
            BinaryOperator::GtE => ">=",
            BinaryOperator::LShift => "<<",
            BinaryOperator::RShift => ">>",
            BinaryOperator::URShift => ">>>",
            BinaryOperator::Add => "+",
            BinaryOperator::Sub => "-",
            BinaryOperator::Mult => "*",
            BinaryOperator::Div => "/",
            BinaryOperator::Mod => "%",
        }
    }

    pub fn from_token(text: &str) -> Option<Self> {
        Some(match text {
            "||" => BinaryOperator::Or,
            "&&" => BinaryOperator::And,
            "|" => BinaryOperator::BitOr,
            "^" => BinaryOperator::BitXor,
            "&" => BinaryOperator::BitAnd,
            "==" => BinaryOperator::Eq,
            "!=" => BinaryOperator::NotEq,
            "<" => BinaryOperator::Lt,
            "<=" => BinaryOperator::LtE,
            ">" => BinaryOperator::Gt,
            ">=" => BinaryOperator::GtE,
            "<<" => BinaryOperator::LShift,
            ">>" => BinaryOperator::RShift,
            ">>>" => BinaryOperator::URShift,
            "+" => BinaryOperator::Add,
            "-" => BinaryOperator::Sub,
            "*" => BinaryOperator::Mult,
            "/" => BinaryOperator::Div,
            "%" => BinaryOperator::Mod,
            _ => return None,
        })
    }

    pub fn kind_name(self) -> &'static str {
        match self {
            BinaryOperator::Or => "Or",
            BinaryOperator::And => "And",
            BinaryOperator::BitOr => "BitOr",
            BinaryOperator::BitXor => "BitXor",
            BinaryOperator::BitAnd => "BitAnd",
            BinaryOperator::Eq => "Eq",
            BinaryOperator::NotEq => "NotEq",
            BinaryOperator::Lt => "Lt",
            BinaryOperator::LtE => "LtE",
            BinaryOperator::Gt => "Gt",
            BinaryOperator::GtE => "GtE",
            BinaryOperator::LShift => "LShift",
            BinaryOperator::RShift => "RShift",
            BinaryOperator::URShift => "URShift",
            BinaryOperator::Add => "Add",
            BinaryOperator::Sub => "Sub",
            BinaryOperator::Mult => "Mult",
            BinaryOperator::Div => "Div",
            BinaryOperator::Mod => "Mod",
        }
    }
}

/// Prefix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    PreInc,
    PreDec,
    UAdd,
    USub,
    Invert,
    Not,
}

impl UnaryOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            UnaryOperator::PreInc => "++",
            UnaryOperator::PreDec => "--",
            UnaryOperator::UAdd => "+",
            UnaryOperator::USub => "-",
            UnaryOperator::Invert => "~",
            UnaryOperator::Not => "!",
        }
    }

    pub fn from_token(text: &str) -> Option<Self> {
        Some(match text {
            "++" => UnaryOperator::PreInc,
            "--" => UnaryOperator::PreDec,
            "+" => UnaryOperator::UAdd,
            "-" => UnaryOperator::USub,
            "~" => UnaryOperator::Invert,
            "!" => UnaryOperator::Not,
            _ => return None,
        })
    }

    pub fn kind_name(self) -> &'static str {
        match self {
            UnaryOperator::PreInc => "PreInc",
            UnaryOperator::PreDec => "PreDec",
            UnaryOperator::UAdd => "UAdd",
            UnaryOperator::USub => "USub",
            UnaryOperator::Invert => "Invert",
            UnaryOperator::Not => "Not",
        }
    }

    /// Whether the operator starts with `+` or `-`, which makes a preceding
    /// parenthesized reference type read as a binary operand instead of a cast.
    pub fn is_sign_like(self) -> bool {
        matches!(
            self,
            UnaryOperator::PreInc | UnaryOperator::PreDec | UnaryOperator::UAdd | UnaryOperator::USub
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PostOperator {
    PostInc,
    PostDec,
}

impl PostOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            PostOperator::PostInc => "++",
            PostOperator::PostDec => "--",
        }
    }

    pub fn from_token(text: &str) -> Option<Self> {
        match text {
            "++" => Some(PostOperator::PostInc),
            "--" => Some(PostOperator::PostDec),
            _ => None,
        }
    }

    pub fn kind_name(self) -> &'static str {
        match self {
            PostOperator::PostInc => "PostInc",
            PostOperator::PostDec => "PostDec",
        }
    }
}

/// The operator part of a compound assignment. Plain `=` has none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssignOperator {
    Add,
    Sub,
    Mult,
    Div,
    Mod,
    BitAnd,
    BitOr,
    BitXor,
    LShift,
    RShift,
    URShift,
}

impl AssignOperator {
    /// The full token, including the trailing `=`.
    pub fn as_str(self) -> &'static str {
        match self {
            AssignOperator::Add => "+=",
            AssignOperator::Sub => "-=",
            AssignOperator::Mult => "*=",
            AssignOperator::Div => "/=",
            AssignOperator::Mod => "%=",
            AssignOperator::BitAnd => "&=",
            AssignOperator::BitOr => "|=",
            AssignOperator::BitXor => "^=",
            AssignOperator::LShift => "<<=",
            AssignOperator::RShift => ">>=",
            AssignOperator::URShift => ">>>=",
        }
    }

    pub fn from_token(text: &str) -> Option<Self> {
        Some(match text {
            "+=" => AssignOperator::Add,
            "-=" => AssignOperator::Sub,
            "*=" => AssignOperator::Mult,
            "/=" => AssignOperator::Div,
            "%=" => AssignOperator::Mod,
            "&=" => AssignOperator::BitAnd,
            "|=" => AssignOperator::BitOr,
            "^=" => AssignOperator::BitXor,
            "<<=" => AssignOperator::LShift,
            ">>=" => AssignOperator::RShift,
            ">>>=" => AssignOperator::URShift,
            _ => return None,
        })
    }

    pub fn kind_name(self) -> &'static str {
        match self {
            AssignOperator::Add => "AddAssign",
            AssignOperator::Sub => "SubAssign",
            AssignOperator::Mult => "MultAssign",
            AssignOperator::Div => "DivAssign",
            AssignOperator::Mod => "ModAssign",
            AssignOperator::BitAnd => "BitAndAssign",
            AssignOperator::BitOr => "BitOrAssign",
            AssignOperator::BitXor => "BitXorAssign",
            AssignOperator::LShift => "LShiftAssign",
            AssignOperator::RShift => "RShiftAssign",
            AssignOperator::URShift => "URShiftAssign",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_tokens_round_trip() {
        for op in [BinaryOperator::URShift, BinaryOperator::LtE, BinaryOperator::Mod] {
            assert_eq!(BinaryOperator::from_token(op.as_str()), Some(op));
        }
        assert_eq!(AssignOperator::from_token(">>>="), Some(AssignOperator::URShift));
        assert_eq!(AssignOperator::from_token("="), None);
        assert_eq!(UnaryOperator::from_token("~"), Some(UnaryOperator::Invert));
    }
}
