//! The expression tree. Nodes are values: combinators build new nodes and never alter existing ones.

use crate::path::FieldPath;
use crate::property::PropertyType;
use crate::value::Value;
use rsql::Operator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalOperator {
    And,
    Or,
}

impl LogicalOperator {
    /// The RSQL token joining the children of a node of this kind
    pub fn separator(self) -> char {
        match self {
            LogicalOperator::And => ';',
            LogicalOperator::Or => ',',
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Logical(LogicalNode),
    Comparison(ComparisonNode),
}

impl Node {
    /// Whether the node constrains nothing: an empty logical node, or one made only of such nodes
    pub fn is_empty(&self) -> bool {
        match self {
            Node::Logical(node) => node.children.iter().all(Node::is_empty),
            Node::Comparison(_) => false,
        }
    }

    /// Canonical form: single-child groups collapse to their child and empty groups disappear, at every
    /// level. A tree that constrains nothing normalizes to an empty OR.
    pub fn normalized(&self) -> Node {
        match self {
            Node::Comparison(_) => self.clone(),
            Node::Logical(node) => {
                let mut children: Vec<Node> = node.children.iter().filter(|child| !child.is_empty()).map(Node::normalized).collect();
                match children.len() {
                    0 => Node::Logical(LogicalNode::or(Vec::new())),
                    1 => children.pop().unwrap_or_else(|| Node::Logical(LogicalNode::or(Vec::new()))),
                    _ => Node::Logical(LogicalNode::new(node.operator, children)),
                }
            }
        }
    }
}

impl From<LogicalNode> for Node {
    fn from(node: LogicalNode) -> Self { Node::Logical(node) }
}

impl From<ComparisonNode> for Node {
    fn from(node: ComparisonNode) -> Self { Node::Comparison(node) }
}

/// An AND or OR over an ordered list of children
#[derive(Debug, Clone, PartialEq)]
pub struct LogicalNode {
    operator: LogicalOperator,
    children: Vec<Node>,
}

impl LogicalNode {
    pub fn new(operator: LogicalOperator, children: Vec<Node>) -> Self { Self { operator, children } }

    pub fn and(children: Vec<Node>) -> Self { Self::new(LogicalOperator::And, children) }

    pub fn or(children: Vec<Node>) -> Self { Self::new(LogicalOperator::Or, children) }

    pub fn operator(&self) -> LogicalOperator { self.operator }

    pub fn children(&self) -> &[Node] { &self.children }

    pub fn is_empty(&self) -> bool { self.children.is_empty() }

    /// A node of the same kind with `node` as its last child
    pub fn append(&self, node: impl Into<Node>) -> LogicalNode {
        let mut children = self.children.clone();
        children.push(node.into());
        Self { operator: self.operator, children }
    }

    /// The sole child when there is exactly one, otherwise the node itself
    pub fn simplify(&self) -> Node {
        match self.children.as_slice() {
            [only] => only.clone(),
            _ => Node::Logical(self.clone()),
        }
    }
}

/// A single `field operator value(s)` constraint. The property type selects the value codec and takes
/// no part in equality.
#[derive(Debug, Clone)]
pub struct ComparisonNode {
    field: FieldPath,
    operator: Operator,
    values: Vec<Value>,
    property_type: PropertyType,
}

impl ComparisonNode {
    pub fn new(field: FieldPath, operator: Operator, values: Vec<Value>, property_type: PropertyType) -> Self {
        Self { field, operator, values, property_type }
    }

    pub fn field(&self) -> &FieldPath { &self.field }

    pub fn operator(&self) -> Operator { self.operator }

    pub fn values(&self) -> &[Value] { &self.values }

    pub fn property_type(&self) -> PropertyType { self.property_type }
}

impl PartialEq for ComparisonNode {
    fn eq(&self, other: &Self) -> bool { self.field == other.field && self.operator == other.operator && self.values == other.values }
}
