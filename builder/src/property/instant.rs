use super::PropertyHelper;
use crate::node::LogicalOperator;
use crate::query::Query;
use crate::shape::QueryShape;
use crate::value::Value;
use chrono::{DateTime, Utc};
use rsql::{operator, Operator};

#[derive(Debug)]
pub struct InstantProperty<'q, S: QueryShape>(PropertyHelper<'q, S>);

impl<'q, S: QueryShape> InstantProperty<'q, S> {
    pub fn new(helper: PropertyHelper<'q, S>) -> Self { Self(helper) }

    pub fn eq(&self, value: DateTime<Utc>) -> Query<S> { self.0.eq(value) }

    pub fn ne(&self, value: DateTime<Utc>) -> Query<S> { self.0.ne(value) }

    pub fn before(&self, value: DateTime<Utc>, exclusive: bool) -> Query<S> { self.0.condition(Self::upper_bound(exclusive), vec![value.into()]) }

    pub fn after(&self, value: DateTime<Utc>, exclusive: bool) -> Query<S> { self.0.condition(Self::lower_bound(exclusive), vec![value.into()]) }

    /// Both bounds, ANDed together and appended to the owning query
    pub fn between(&self, after: DateTime<Utc>, before: DateTime<Utc>, exclusive_after: bool, exclusive_before: bool) -> Query<S> {
        let field = self.0.field().clone();
        let property_type = self.0.property_type();
        let bound = |operator: Operator, value: DateTime<Utc>| {
            Query::<S>::create().condition(field.clone(), property_type, operator, vec![Value::Timestamp(value)])
        };
        let lower = bound(Self::lower_bound(exclusive_after), after);
        let upper = bound(Self::upper_bound(exclusive_before), before);
        self.0.query().combine(LogicalOperator::And, vec![lower, upper])
    }

    pub fn exists(&self) -> Query<S> { self.0.exists() }

    pub fn does_not_exist(&self) -> Query<S> { self.0.does_not_exist() }

    fn upper_bound(exclusive: bool) -> Operator {
        if exclusive {
            operator::LESS_THAN
        } else {
            operator::LESS_THAN_OR_EQUAL
        }
    }

    fn lower_bound(exclusive: bool) -> Operator {
        if exclusive {
            operator::GREATER_THAN
        } else {
            operator::GREATER_THAN_OR_EQUAL
        }
    }
}
