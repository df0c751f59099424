use crate::operator::Operator;

/// Generic parse tree. Logical nodes always hold at least two children; a group of one element is
/// represented by that element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    And(Vec<Node>),
    Or(Vec<Node>),
    Comparison(Comparison),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    /// Dotted field selector, as written
    pub selector: String,
    pub operator: Operator,
    /// Unquoted, unescaped argument strings
    pub arguments: Vec<String>,
}
