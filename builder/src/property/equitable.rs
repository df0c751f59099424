use super::PropertyHelper;
use crate::query::Query;
use crate::shape::QueryShape;
use crate::value::Value;
use std::marker::PhantomData;

/// Field of a caller-defined type that only supports equality and membership
#[derive(Debug)]
pub struct EquitableProperty<'q, S: QueryShape, T: Into<Value>> {
    helper: PropertyHelper<'q, S>,
    value: PhantomData<fn(T)>,
}

impl<'q, S: QueryShape, T: Into<Value>> EquitableProperty<'q, S, T> {
    pub fn new(helper: PropertyHelper<'q, S>) -> Self { Self { helper, value: PhantomData } }

    pub fn eq(&self, value: T) -> Query<S> { self.helper.eq(value) }

    pub fn ne(&self, value: T) -> Query<S> { self.helper.ne(value) }

    pub fn value_in(&self, values: impl IntoIterator<Item = T>) -> Query<S> { self.helper.value_in(values) }

    pub fn value_not_in(&self, values: impl IntoIterator<Item = T>) -> Query<S> { self.helper.value_not_in(values) }

    pub fn exists(&self) -> Query<S> { self.helper.exists() }

    pub fn does_not_exist(&self) -> Query<S> { self.helper.does_not_exist() }
}
