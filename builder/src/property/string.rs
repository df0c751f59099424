use super::PropertyHelper;
use crate::query::Query;
use crate::shape::QueryShape;
use crate::value::Value;
use rsql::operator;

/// Text field. Ordering operators compare lexically.
#[derive(Debug)]
pub struct StringProperty<'q, S: QueryShape>(PropertyHelper<'q, S>);

impl<'q, S: QueryShape> StringProperty<'q, S> {
    pub fn new(helper: PropertyHelper<'q, S>) -> Self { Self(helper) }

    pub fn eq(&self, value: impl Into<String>) -> Query<S> { self.0.eq(Value::String(value.into())) }

    pub fn ne(&self, value: impl Into<String>) -> Query<S> { self.0.ne(Value::String(value.into())) }

    pub fn value_in<T: Into<String>>(&self, values: impl IntoIterator<Item = T>) -> Query<S> {
        self.0.value_in(values.into_iter().map(|value| Value::String(value.into())))
    }

    pub fn value_not_in<T: Into<String>>(&self, values: impl IntoIterator<Item = T>) -> Query<S> {
        self.0.value_not_in(values.into_iter().map(|value| Value::String(value.into())))
    }

    pub fn exists(&self) -> Query<S> { self.0.exists() }

    pub fn does_not_exist(&self) -> Query<S> { self.0.does_not_exist() }

    pub fn lexically_after(&self, value: impl Into<String>) -> Query<S> { self.compare(operator::GREATER_THAN, value) }

    pub fn lexically_before(&self, value: impl Into<String>) -> Query<S> { self.compare(operator::LESS_THAN, value) }

    pub fn lexically_not_after(&self, value: impl Into<String>) -> Query<S> { self.compare(operator::LESS_THAN_OR_EQUAL, value) }

    pub fn lexically_not_before(&self, value: impl Into<String>) -> Query<S> { self.compare(operator::GREATER_THAN_OR_EQUAL, value) }

    /// Regular expression the whole value must match
    pub fn pattern(&self, pattern: impl Into<String>) -> Query<S> { self.compare(operator::REGEX, pattern) }

    fn compare(&self, operator: rsql::Operator, value: impl Into<String>) -> Query<S> {
        self.0.condition(operator, vec![Value::String(value.into())])
    }
}
