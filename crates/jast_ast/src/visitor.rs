//! Aggregating visitor.
//!
//! Implement [`Visitor`] and override the hooks for the node kinds of
//! interest. Every hook defaults to [`Visitor::visit_children`], which walks
//! the children in canonical order and folds their results with
//! [`Visitor::aggregate_result`], starting from [`Visitor::default_result`].
//! Visits happen in pre-order.

use crate::children::{Child, NodeRef};
use crate::decl::*;
use crate::expr::*;
use crate::kinds::node_kinds;
use crate::node::*;
use crate::operators::*;
use crate::stmt::*;

macro_rules! define_visitor {
    ($($variant:ident($ty:ident) => $hook:ident, $transform:ident);* $(;)?) => {
        /// A visitor over borrowed AST nodes producing an aggregated result.
        pub trait Visitor<'a> {
            type Output;

            /// The result for a node with no children.
            fn default_result(&mut self) -> Self::Output;

            /// Combine the running result with the result of the next child.
            /// Keeps the latest result by default.
            fn aggregate_result(&mut self, aggregate: Self::Output, next: Self::Output) -> Self::Output {
                let _ = aggregate;
                next
            }

            /// Dispatch to the hook for the node's kind.
            fn visit(&mut self, node: NodeRef<'a>) -> Self::Output {
                match node {
                    $(NodeRef::$variant(n) => self.$hook(n),)*
                }
            }

            fn visit_children(&mut self, node: NodeRef<'a>) -> Self::Output {
                walk_children(self, node)
            }

            $(
                fn $hook(&mut self, node: &'a $ty) -> Self::Output {
                    self.visit_children(NodeRef::$variant(node))
                }
            )*
        }
    };
}

node_kinds!(define_visitor);

/// Visit every child of `node` in canonical order and aggregate the results.
pub fn walk_children<'a, V>(visitor: &mut V, node: NodeRef<'a>) -> V::Output
where
    V: Visitor<'a> + ?Sized,
{
    let mut result = visitor.default_result();
    for (_, child) in node.children() {
        match child {
            Child::Node(n) => {
                let next = visitor.visit(n);
                result = visitor.aggregate_result(result, next);
            }
            Child::List(nodes) => {
                for n in nodes {
                    let next = visitor.visit(n);
                    result = visitor.aggregate_result(result, next);
                }
            }
        }
    }
    result
}

/// Run `visitor` over the tree rooted at `root`.
pub fn visit<'a, N, V>(root: &'a N, visitor: &mut V) -> V::Output
where
    N: ?Sized,
    &'a N: Into<NodeRef<'a>>,
    V: Visitor<'a> + ?Sized,
{
    visitor.visit(root.into())
}
