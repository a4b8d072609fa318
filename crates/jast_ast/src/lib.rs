//! jast_ast: Abstract syntax tree for Java.
//!
//! A closed family of node variants covering the Java language through
//! records, sealed types, switch expressions, pattern matching, text blocks
//! and the module system. Constructors enforce the structural invariants that
//! distinguish legal trees from illegal ones.
//!
//! Child pointers to the four node families (`Expr`, `Stmt`, `Decl`, `Type`)
//! are `Arc`s: cloning a subtree is cheap, trees are `Send + Sync`, and the
//! non-destructive transformer shares every unchanged subtree with its input.
//!
//! Structural equality (`PartialEq`) ignores source spans, and the precedence
//! level of an expression is derived from its variant through [`Precedence`].

pub mod children;
pub mod decl;
pub mod expr;
pub mod node;
pub mod operators;
pub mod precedence;
pub mod stmt;
pub mod transform;
pub mod visitor;

mod kinds;

pub use children::{Child, NodeRef};
pub use decl::*;
pub use expr::*;
pub use node::*;
pub use operators::*;
pub use precedence::Precedence;
pub use stmt::*;
pub use transform::{transform, transform_keep, Rewritable, Rewrite, Transformable, Transformer};
pub use visitor::{visit, walk_children, Visitor};

pub use jast_core::text::Span;
pub use jast_diagnostics::AstError;
