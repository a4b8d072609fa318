//! Expression precedence classes.

use crate::expr::Expr;
use crate::operators::BinaryOperator;

/// Precedence classes, from loosest to tightest binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Precedence {
    Lambda = 0,
    Assignment = 1,
    Ternary = 2,
    LogicalOr = 3,
    LogicalAnd = 4,
    BitwiseOr = 5,
    BitwiseXor = 6,
    BitwiseAnd = 7,
    Equality = 8,
    Relational = 9,
    Shift = 10,
    Additive = 11,
    Multiplicative = 12,
    // Casts and creation expressions
    Type = 13,
    Unary = 14,
    Postfix = 15,
    Primary = 16,
}

impl Precedence {
    /// The class one step tighter; `Primary` stays `Primary`.
    pub fn next(self) -> Precedence {
        match self {
            Precedence::Lambda => Precedence::Assignment,
            Precedence::Assignment => Precedence::Ternary,
            Precedence::Ternary => Precedence::LogicalOr,
            Precedence::LogicalOr => Precedence::LogicalAnd,
            Precedence::LogicalAnd => Precedence::BitwiseOr,
            Precedence::BitwiseOr => Precedence::BitwiseXor,
            Precedence::BitwiseXor => Precedence::BitwiseAnd,
            Precedence::BitwiseAnd => Precedence::Equality,
            Precedence::Equality => Precedence::Relational,
            Precedence::Relational => Precedence::Shift,
            Precedence::Shift => Precedence::Additive,
            Precedence::Additive => Precedence::Multiplicative,
            Precedence::Multiplicative => Precedence::Type,
            Precedence::Type => Precedence::Unary,
            Precedence::Unary => Precedence::Postfix,
            Precedence::Postfix | Precedence::Primary => Precedence::Primary,
        }
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

/// Get the precedence class of a binary operator.
pub fn binary_precedence(op: BinaryOperator) -> Precedence {
    match op {
        BinaryOperator::Or => Precedence::LogicalOr,
        BinaryOperator::And => Precedence::LogicalAnd,
        BinaryOperator::BitOr => Precedence::BitwiseOr,
        BinaryOperator::BitXor => Precedence::BitwiseXor,
        BinaryOperator::BitAnd => Precedence::BitwiseAnd,
        BinaryOperator::Eq | BinaryOperator::NotEq => Precedence::Equality,
        BinaryOperator::Lt | BinaryOperator::LtE | BinaryOperator::Gt | BinaryOperator::GtE => {
            Precedence::Relational
        }
        BinaryOperator::LShift | BinaryOperator::RShift | BinaryOperator::URShift => Precedence::Shift,
        BinaryOperator::Add | BinaryOperator::Sub => Precedence::Additive,
        BinaryOperator::Mult | BinaryOperator::Div | BinaryOperator::Mod => Precedence::Multiplicative,
    }
}

impl Expr {
    /// The precedence class of this expression, derived from its variant.
    pub fn level(&self) -> Precedence {
        match self {
            Expr::Lambda(_) => Precedence::Lambda,
            Expr::Assignment(_) => Precedence::Assignment,
            Expr::IfExp(_) => Precedence::Ternary,
            Expr::BinOp(b) => binary_precedence(b.op),
            Expr::InstanceOf(_) => Precedence::Relational,
            Expr::Cast(_) | Expr::NewObject(_) | Expr::NewArray(_) => Precedence::Type,
            Expr::UnaryOp(_) => Precedence::Unary,
            Expr::PostOp(_) => Precedence::Postfix,
            Expr::Name(_)
            | Expr::Constant(_)
            | Expr::This(_)
            | Expr::Super(_)
            | Expr::Class(_)
            | Expr::NewInnerObject(_)
            | Expr::SwitchExp(_)
            | Expr::Call(_)
            | Expr::Member(_)
            | Expr::ArrayAccess(_)
            | Expr::Reference(_)
            | Expr::ExplicitGenericInvocation(_)
            | Expr::ArrayInit(_) => Precedence::Primary,
        }
    }
}
