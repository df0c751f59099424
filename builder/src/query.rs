//! The expression builder. A [`Query`] owns an immutable tree rooted at a logical node; every operation returns
//! a new query and leaves the receiver as it was, so partially built queries can be reused as templates.

use crate::error::QueryError;
use crate::node::{ComparisonNode, LogicalNode, LogicalOperator, Node};
use crate::path::FieldPath;
use crate::property::PropertyType;
use crate::shape::QueryShape;
use crate::value::Value;
use crate::visitor::{ConditionVisitor, NodeVisitor, Predicate, PredicateVisitor, TextVisitor};
use rsql::Operator;
use serde::{de, ser, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;

pub struct Query<S: QueryShape> {
    root: LogicalNode,
    shape: PhantomData<fn() -> S>,
}

impl<S: QueryShape> Query<S> {
    /// An empty query. Comparisons appended to it are ORed until `and()` changes the mode.
    pub fn create() -> Self { Self::from_root(LogicalNode::or(Vec::new())) }

    /// Wrap an existing tree
    pub fn from_node(node: Node) -> Self {
        match node {
            Node::Logical(root) => Self::from_root(root),
            comparison @ Node::Comparison(_) => Self::from_root(LogicalNode::or(vec![comparison])),
        }
    }

    fn from_root(root: LogicalNode) -> Self { Self { root, shape: PhantomData } }

    /// Parse RSQL text against this shape's fields, codecs and operators. Blank text is the empty query.
    pub fn parse(text: &str) -> Result<Self, QueryError> {
        if text.trim().is_empty() {
            return Ok(Self::create());
        }
        let tree = rsql::parse(text, S::config().operators())?;
        ConditionVisitor::<S>::new().visit(&tree)
    }

    pub fn root(&self) -> &LogicalNode { &self.root }

    /// The tree with a single-child root collapsed
    pub fn node(&self) -> Node { self.root.simplify() }

    /// Whether the query constrains nothing
    pub fn is_empty(&self) -> bool { self.root.children().iter().all(Node::is_empty) }

    /// Switch to AND mode: later comparisons are ANDed with everything built so far
    pub fn and(&self) -> Self { self.regroup(LogicalOperator::And) }

    /// Switch to OR mode: later comparisons are ORed with everything built so far
    pub fn or(&self) -> Self { self.regroup(LogicalOperator::Or) }

    /// AND the given queries together and append the result to this one
    pub fn and_all(&self, queries: impl IntoIterator<Item = Query<S>>) -> Result<Self, QueryError> {
        self.combine_checked(LogicalOperator::And, queries)
    }

    /// OR the given queries together and append the result to this one
    pub fn or_all(&self, queries: impl IntoIterator<Item = Query<S>>) -> Result<Self, QueryError> {
        self.combine_checked(LogicalOperator::Or, queries)
    }

    /// Append one comparison to the current root
    pub fn condition(&self, field: FieldPath, property_type: PropertyType, operator: Operator, values: Vec<Value>) -> Self {
        Self::from_root(self.root.append(ComparisonNode::new(field, operator, values, property_type)))
    }

    pub fn accept<V: NodeVisitor>(&self, visitor: &V) -> Result<V::Output, V::Error> { visitor.visit_logical(&self.root, None) }

    pub fn to_rsql(&self) -> Result<String, QueryError> { TextVisitor::new(S::config()).serialize(&self.root) }

    pub fn to_predicate(&self) -> Result<Predicate, QueryError> { self.accept(&PredicateVisitor::new()) }

    fn regroup(&self, operator: LogicalOperator) -> Self {
        if self.root.operator() == operator {
            self.clone()
        } else if self.root.is_empty() {
            Self::from_root(LogicalNode::new(operator, Vec::new()))
        } else {
            Self::from_root(LogicalNode::new(operator, vec![self.root.simplify()]))
        }
    }

    fn combine_checked(&self, operator: LogicalOperator, queries: impl IntoIterator<Item = Query<S>>) -> Result<Self, QueryError> {
        let queries: Vec<Query<S>> = queries.into_iter().collect();
        if queries.is_empty() {
            return Err(QueryError::InvalidArgument(format!("{operator:?} needs at least one query")));
        }
        Ok(self.combine(operator, queries))
    }

    /// Singleton-collapse each query, drop the ones that constrain nothing, and append what is left as one node
    pub(crate) fn combine(&self, operator: LogicalOperator, queries: Vec<Query<S>>) -> Self {
        let mut children: Vec<Node> = queries.iter().map(|query| query.root.simplify()).filter(|node| !node.is_empty()).collect();
        match children.len() {
            0 => self.clone(),
            1 => Self::from_root(self.root.append(children.remove(0))),
            _ => Self::from_root(self.root.append(LogicalNode::new(operator, children))),
        }
    }
}

impl<S: QueryShape> Clone for Query<S> {
    fn clone(&self) -> Self { Self::from_root(self.root.clone()) }
}

impl<S: QueryShape> fmt::Debug for Query<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.debug_struct("Query").field("root", &self.root).finish() }
}

/// Queries are equal when they constrain the same tree once redundant groups are removed
impl<S: QueryShape> PartialEq for Query<S> {
    fn eq(&self, other: &Self) -> bool { Node::Logical(self.root.clone()).normalized() == Node::Logical(other.root.clone()).normalized() }
}

/// The RSQL text, or a marker naming the error when the query cannot be serialized
impl<S: QueryShape> fmt::Display for Query<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_rsql() {
            Ok(text) => f.write_str(&text),
            Err(e) => write!(f, "<unserializable query: {e}>"),
        }
    }
}

impl<S: QueryShape> Serialize for Query<S> {
    fn serialize<Se: Serializer>(&self, serializer: Se) -> Result<Se::Ok, Se::Error> {
        let text = self.to_rsql().map_err(<Se::Error as ser::Error>::custom)?;
        serializer.serialize_str(&text)
    }
}

impl<'de, S: QueryShape> Deserialize<'de> for Query<S> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(de::Error::custom)
    }
}
