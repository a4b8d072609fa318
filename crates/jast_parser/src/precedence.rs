//! Binary operator precedence for the expression layers.

use crate::tree::RuleKind;
use jast_scanner::TokenKind;

/// Binding strength of the binary layers, loosest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum OperatorPrecedence {
    ConditionalOr = 1,
    ConditionalAnd,
    InclusiveOr,
    ExclusiveOr,
    And,
    Equality,
    Relational,
    Shift,
    Additive,
    Multiplicative,
}

impl OperatorPrecedence {
    /// The loosest binary layer.
    pub const LOWEST: OperatorPrecedence = OperatorPrecedence::ConditionalOr;

    /// The rule kind a node of this layer is recorded as.
    pub fn rule_kind(self) -> RuleKind {
        match self {
            OperatorPrecedence::ConditionalOr => RuleKind::ConditionalOr,
            OperatorPrecedence::ConditionalAnd => RuleKind::ConditionalAnd,
            OperatorPrecedence::InclusiveOr => RuleKind::InclusiveOr,
            OperatorPrecedence::ExclusiveOr => RuleKind::ExclusiveOr,
            OperatorPrecedence::And => RuleKind::And,
            OperatorPrecedence::Equality => RuleKind::Equality,
            OperatorPrecedence::Relational => RuleKind::Relational,
            OperatorPrecedence::Shift => RuleKind::Shift,
            OperatorPrecedence::Additive => RuleKind::Additive,
            OperatorPrecedence::Multiplicative => RuleKind::Multiplicative,
        }
    }

    /// The next tighter layer, or `None` for multiplicative.
    pub fn tighter(self) -> Option<OperatorPrecedence> {
        Some(match self {
            OperatorPrecedence::ConditionalOr => OperatorPrecedence::ConditionalAnd,
            OperatorPrecedence::ConditionalAnd => OperatorPrecedence::InclusiveOr,
            OperatorPrecedence::InclusiveOr => OperatorPrecedence::ExclusiveOr,
            OperatorPrecedence::ExclusiveOr => OperatorPrecedence::And,
            OperatorPrecedence::And => OperatorPrecedence::Equality,
            OperatorPrecedence::Equality => OperatorPrecedence::Relational,
            OperatorPrecedence::Relational => OperatorPrecedence::Shift,
            OperatorPrecedence::Shift => OperatorPrecedence::Additive,
            OperatorPrecedence::Additive => OperatorPrecedence::Multiplicative,
            OperatorPrecedence::Multiplicative => return None,
        })
    }
}

/// Get the binary layer of an operator token. `RShift` and `URShift` only
/// appear after the recognizer joins adjacent `>` tokens.
pub fn get_binary_operator_precedence(kind: TokenKind) -> Option<OperatorPrecedence> {
    Some(match kind {
        TokenKind::OrOr => OperatorPrecedence::ConditionalOr,
        TokenKind::AndAnd => OperatorPrecedence::ConditionalAnd,
        TokenKind::BitOr => OperatorPrecedence::InclusiveOr,
        TokenKind::Caret => OperatorPrecedence::ExclusiveOr,
        TokenKind::BitAnd => OperatorPrecedence::And,
        TokenKind::EqEq | TokenKind::NotEq => OperatorPrecedence::Equality,
        TokenKind::Lt | TokenKind::Gt | TokenKind::Le | TokenKind::Ge | TokenKind::InstanceOf => {
            OperatorPrecedence::Relational
        }
        TokenKind::LShift | TokenKind::RShift | TokenKind::URShift => OperatorPrecedence::Shift,
        TokenKind::Add | TokenKind::Sub => OperatorPrecedence::Additive,
        TokenKind::Mul | TokenKind::Div | TokenKind::Mod => OperatorPrecedence::Multiplicative,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_layers_ordered() {
        let or = get_binary_operator_precedence(TokenKind::OrOr).unwrap();
        let mul = get_binary_operator_precedence(TokenKind::Mul).unwrap();
        assert!(or < mul);
        assert_eq!(get_binary_operator_precedence(TokenKind::URShift), Some(OperatorPrecedence::Shift));
        assert_eq!(get_binary_operator_precedence(TokenKind::Assign), None);
        assert_eq!(OperatorPrecedence::Multiplicative.tighter(), None);
        assert_eq!(OperatorPrecedence::Shift.rule_kind(), RuleKind::Shift);
    }
}
