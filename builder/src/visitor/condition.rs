use crate::codec::{BoolCodec, ValueCodec};
use crate::error::QueryError;
use crate::path::FieldPath;
use crate::query::Query;
use crate::shape::QueryShape;
use rsql::{ast, operator};
use std::marker::PhantomData;

/// Rebuilds a typed query from a parsed RSQL tree, resolving each selector against the shape's fields and
/// decoding arguments with the codec bound to the resolved property type.
#[derive(Debug)]
pub struct ConditionVisitor<S: QueryShape> {
    shape: PhantomData<fn() -> S>,
}

impl<S: QueryShape> Default for ConditionVisitor<S> {
    fn default() -> Self { Self { shape: PhantomData } }
}

impl<S: QueryShape> ConditionVisitor<S> {
    pub fn new() -> Self { Self::default() }

    pub fn visit(&self, node: &ast::Node) -> Result<Query<S>, QueryError> {
        match node {
            ast::Node::And(children) => S::create().and_all(self.visit_all(children)?),
            ast::Node::Or(children) => S::create().or_all(self.visit_all(children)?),
            ast::Node::Comparison(comparison) => self.visit_comparison(comparison),
        }
    }

    fn visit_all(&self, children: &[ast::Node]) -> Result<Vec<Query<S>>, QueryError> { children.iter().map(|child| self.visit(child)).collect() }

    fn visit_comparison(&self, comparison: &ast::Comparison) -> Result<Query<S>, QueryError> {
        let field = FieldPath::parse(&comparison.selector).map_err(|_| QueryError::UnknownField(comparison.selector.clone()))?;
        let property_type = S::resolve(&field)?;

        let codec: &dyn ValueCodec = if comparison.operator == operator::EXISTS { &BoolCodec } else { S::config().codec_for(&property_type)? };
        let values = comparison
            .arguments
            .iter()
            .map(|argument| codec.decode(argument).map_err(|source| QueryError::InvalidValue { property_type: property_type.name(), source }))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::trace!("deserialized {field}{} as {property_type}", comparison.operator);
        Ok(S::create().condition(field, property_type, comparison.operator, values))
    }
}
