//! Compiling a tree into an in-memory predicate over records.
//!
//! A field that is absent, null, or unreachable because an intermediate group is missing matches no
//! comparison except `=ex=false`. Ordering comparisons between values that have no natural order (a
//! string against a number, say) do not match.

use super::NodeVisitor;
use crate::error::QueryError;
use crate::node::{ComparisonNode, LogicalNode};
use crate::path::FieldPath;
use crate::value::Value;
use regex::Regex;
use rsql::operator;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

/// A candidate that predicates read fields from
pub trait Record {
    /// The value or nested record named `name`, or `None` when it is absent or null
    fn field(&self, name: &str) -> Option<FieldValue<'_>>;
}

pub enum FieldValue<'a> {
    Value(Value),
    Record(&'a dyn Record),
}

/// The value at `path`, descending through nested records
pub fn extract(record: &dyn Record, path: &FieldPath) -> Option<Value> {
    let (last, parents) = path.segments().split_last()?;
    let mut current = record;
    for segment in parents {
        match current.field(segment)? {
            FieldValue::Record(nested) => current = nested,
            FieldValue::Value(_) => return None,
        }
    }
    match current.field(last)? {
        FieldValue::Value(value) => Some(value),
        FieldValue::Record(_) => None,
    }
}

type Test = Box<dyn Fn(&dyn Record) -> bool + Send + Sync>;

/// A compiled query
pub struct Predicate(Test);

impl Predicate {
    fn new(test: impl Fn(&dyn Record) -> bool + Send + Sync + 'static) -> Self { Self(Box::new(test)) }

    pub fn test(&self, record: &dyn Record) -> bool { (self.0)(record) }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str("Predicate") }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct PredicateVisitor;

impl PredicateVisitor {
    pub fn new() -> Self { Self }

    fn children(&self, node: &LogicalNode) -> Result<Vec<Predicate>, QueryError> {
        node.children().iter().filter(|child| !child.is_empty()).map(|child| self.visit(child, Some(node))).collect()
    }

    fn single(node: &ComparisonNode) -> Result<Value, QueryError> {
        match node.values() {
            [value] => Ok(value.clone()),
            [] => Err(QueryError::MissingValue(node.field().to_string())),
            values => Err(QueryError::InvalidArgument(format!("{} takes a single value, {} were given", node.operator(), values.len()))),
        }
    }

    fn ordering(node: &ComparisonNode, accept: fn(Ordering) -> bool) -> Result<Predicate, QueryError> {
        let path = node.field().clone();
        let expected = Self::single(node)?;
        Ok(Predicate::new(move |record| extract(record, &path).and_then(|found| found.compare(&expected)).is_some_and(accept)))
    }

    fn membership(node: &ComparisonNode, member: bool) -> Result<Predicate, QueryError> {
        let path = node.field().clone();
        let values = node.values().to_vec();
        if values.is_empty() {
            return Err(QueryError::MissingValue(path.to_string()));
        }
        Ok(Predicate::new(move |record| extract(record, &path).is_some_and(|found| values.iter().any(|v| found.equivalent(v)) == member)))
    }
}

impl NodeVisitor for PredicateVisitor {
    type Output = Predicate;
    type Error = QueryError;

    fn visit_and(&self, node: &LogicalNode, _parent: Option<&LogicalNode>) -> Result<Predicate, QueryError> {
        let children = self.children(node)?;
        Ok(Predicate::new(move |record| children.iter().all(|child| child.test(record))))
    }

    fn visit_or(&self, node: &LogicalNode, _parent: Option<&LogicalNode>) -> Result<Predicate, QueryError> {
        let children = self.children(node)?;
        Ok(Predicate::new(move |record| children.is_empty() || children.iter().any(|child| child.test(record))))
    }

    fn visit_comparison(&self, node: &ComparisonNode, _parent: Option<&LogicalNode>) -> Result<Predicate, QueryError> {
        tracing::trace!("compiling predicate for {}{}", node.field(), node.operator());
        let path = node.field().clone();
        match node.operator() {
            op if op == operator::EQUAL => {
                let expected = Self::single(node)?;
                Ok(Predicate::new(move |record| extract(record, &path).is_some_and(|found| found.equivalent(&expected))))
            }
            op if op == operator::NOT_EQUAL => {
                let expected = Self::single(node)?;
                Ok(Predicate::new(move |record| extract(record, &path).is_some_and(|found| !found.equivalent(&expected))))
            }
            op if op == operator::GREATER_THAN => Self::ordering(node, Ordering::is_gt),
            op if op == operator::GREATER_THAN_OR_EQUAL => Self::ordering(node, Ordering::is_ge),
            op if op == operator::LESS_THAN => Self::ordering(node, Ordering::is_lt),
            op if op == operator::LESS_THAN_OR_EQUAL => Self::ordering(node, Ordering::is_le),
            op if op == operator::IN => Self::membership(node, true),
            op if op == operator::NOT_IN => Self::membership(node, false),
            op if op == operator::EXISTS => {
                let expected = Self::single(node)?
                    .as_bool()
                    .ok_or_else(|| QueryError::InvalidArgument(format!("{} expects true or false", operator::EXISTS)))?;
                Ok(Predicate::new(move |record| extract(record, &path).is_some() == expected))
            }
            op if op == operator::REGEX => {
                let pattern = match Self::single(node)? {
                    Value::String(pattern) => pattern,
                    other => other.to_string(),
                };
                let regex = Regex::new(&format!("^(?:{pattern})$"))?;
                Ok(Predicate::new(move |record| extract(record, &path).is_some_and(|found| regex.is_match(&found.to_string()))))
            }
            op => Err(QueryError::UnsupportedOperator(op.symbol())),
        }
    }
}

impl<V: Clone + Into<Value>> Record for HashMap<String, V> {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> { self.get(name).map(|value| FieldValue::Value(value.clone().into())) }
}

impl Record for serde_json::Map<String, serde_json::Value> {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match self.get(name)? {
            serde_json::Value::Null | serde_json::Value::Array(_) => None,
            serde_json::Value::Bool(b) => Some(FieldValue::Value(Value::Bool(*b))),
            serde_json::Value::Number(n) => n.as_i64().map(Value::I64).or_else(|| n.as_f64().map(Value::F64)).map(FieldValue::Value),
            serde_json::Value::String(s) => Some(FieldValue::Value(Value::String(s.clone()))),
            serde_json::Value::Object(map) => Some(FieldValue::Record(map)),
        }
    }
}

impl Record for serde_json::Value {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match self {
            serde_json::Value::Object(map) => map.field(name),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Node;
    use crate::property;
    use serde_json::json;

    fn compile(field: &str, operator: rsql::Operator, values: Vec<Value>) -> Result<Predicate, QueryError> {
        let node = ComparisonNode::new(FieldPath::parse(field)?, operator, values, property::STRING);
        PredicateVisitor.visit(&Node::Comparison(node), None)
    }

    #[test]
    fn test_nested_json_fields() -> Result<(), QueryError> {
        let person = json!({ "name": "Jane", "age": 27, "address": { "city": "Paris" }, "nickname": null });
        assert!(compile("address.city", operator::EQUAL, vec![Value::from("Paris")])?.test(&person));
        assert!(compile("age", operator::GREATER_THAN, vec![Value::I16(20)])?.test(&person));
        assert!(!compile("age", operator::GREATER_THAN, vec![Value::I16(50)])?.test(&person));
        assert!(compile("age", operator::IN, vec![Value::I32(26), Value::I32(27)])?.test(&person));
        assert!(compile("age", operator::NOT_IN, vec![Value::I32(26)])?.test(&person));
        Ok(())
    }

    #[test]
    fn test_absent_and_null_fields() -> Result<(), QueryError> {
        let person = json!({ "name": "Jane", "nickname": null });
        assert!(!compile("nickname", operator::NOT_EQUAL, vec![Value::from("x")])?.test(&person));
        assert!(!compile("address.city", operator::NOT_IN, vec![Value::from("x")])?.test(&person));
        assert!(compile("nickname", operator::EXISTS, vec![Value::Bool(false)])?.test(&person));
        assert!(compile("address.city", operator::EXISTS, vec![Value::Bool(false)])?.test(&person));
        assert!(compile("name", operator::EXISTS, vec![Value::Bool(true)])?.test(&person));
        assert!(!compile("name.first", operator::EXISTS, vec![Value::Bool(true)])?.test(&person));
        Ok(())
    }

    #[test]
    fn test_incomparable_ordering_does_not_match() -> Result<(), QueryError> {
        let record = json!({ "age": "old" });
        assert!(!compile("age", operator::GREATER_THAN, vec![Value::I32(1)])?.test(&record));
        assert!(!compile("age", operator::LESS_THAN, vec![Value::I32(1)])?.test(&record));
        Ok(())
    }

    #[test]
    fn test_regex_matches_whole_value() -> Result<(), QueryError> {
        let record: HashMap<String, &str> = HashMap::from([("name".to_string(), "John Doe")]);
        assert!(compile("name", operator::REGEX, vec![Value::from("J.*e")])?.test(&record));
        assert!(!compile("name", operator::REGEX, vec![Value::from("John")])?.test(&record));
        assert!(matches!(compile("name", operator::REGEX, vec![Value::from("(")]), Err(QueryError::InvalidPattern(_))));
        Ok(())
    }

    #[test]
    fn test_unknown_operator_is_unsupported() {
        let like = rsql::Operator::new(&["=like="], false);
        assert!(matches!(compile("name", like, vec![Value::from("x")]), Err(QueryError::UnsupportedOperator("=like="))));
    }

    #[test]
    fn test_empty_groups_match_everything() -> Result<(), QueryError> {
        let predicate = PredicateVisitor.visit_logical(&LogicalNode::or(Vec::new()), None)?;
        assert!(predicate.test(&json!({})));
        Ok(())
    }
}
