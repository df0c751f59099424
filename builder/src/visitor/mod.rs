//! Tree walkers. [`TextVisitor`] renders RSQL, [`PredicateVisitor`] compiles an in-memory predicate and
//! [`ConditionVisitor`] rebuilds a query from a parsed RSQL tree.

mod condition;
mod predicate;
mod text;

pub use condition::ConditionVisitor;
pub use predicate::{extract, FieldValue, Predicate, PredicateVisitor, Record};
pub use text::TextVisitor;

use crate::node::{ComparisonNode, LogicalNode, LogicalOperator, Node};

/// A walk over the expression tree. `parent` is the enclosing logical node, if any, after singleton collapse.
pub trait NodeVisitor {
    type Output;
    type Error;

    fn visit_and(&self, node: &LogicalNode, parent: Option<&LogicalNode>) -> Result<Self::Output, Self::Error>;

    fn visit_or(&self, node: &LogicalNode, parent: Option<&LogicalNode>) -> Result<Self::Output, Self::Error>;

    fn visit_comparison(&self, node: &ComparisonNode, parent: Option<&LogicalNode>) -> Result<Self::Output, Self::Error>;

    fn visit(&self, node: &Node, parent: Option<&LogicalNode>) -> Result<Self::Output, Self::Error> {
        match node {
            Node::Logical(logical) => self.visit_logical(logical, parent),
            Node::Comparison(comparison) => self.visit_comparison(comparison, parent),
        }
    }

    /// A single-child node is visited as its child, in the same parent
    fn visit_logical(&self, node: &LogicalNode, parent: Option<&LogicalNode>) -> Result<Self::Output, Self::Error> {
        match (node.children(), node.operator()) {
            ([only], _) => self.visit(only, parent),
            (_, LogicalOperator::And) => self.visit_and(node, parent),
            (_, LogicalOperator::Or) => self.visit_or(node, parent),
        }
    }
}
