use super::{PropertyHelper, PropertyType};
use crate::query::Query;
use crate::shape::QueryShape;
use crate::value::Value;
use rsql::operator;
use std::marker::PhantomData;

/// A primitive numeric type usable as a field, with the property type its fields are declared as
pub trait Numeric: Into<Value> + Copy {
    const PROPERTY_TYPE: PropertyType;
}

impl Numeric for i16 {
    const PROPERTY_TYPE: PropertyType = super::SHORT;
}
impl Numeric for i32 {
    const PROPERTY_TYPE: PropertyType = super::INTEGER;
}
impl Numeric for i64 {
    const PROPERTY_TYPE: PropertyType = super::LONG;
}
impl Numeric for f32 {
    const PROPERTY_TYPE: PropertyType = super::FLOAT;
}
impl Numeric for f64 {
    const PROPERTY_TYPE: PropertyType = super::DOUBLE;
}

#[derive(Debug)]
pub struct NumberProperty<'q, S: QueryShape, N: Numeric> {
    helper: PropertyHelper<'q, S>,
    number: PhantomData<fn(N)>,
}

pub type ShortProperty<'q, S> = NumberProperty<'q, S, i16>;
pub type IntegerProperty<'q, S> = NumberProperty<'q, S, i32>;
pub type LongProperty<'q, S> = NumberProperty<'q, S, i64>;
pub type FloatProperty<'q, S> = NumberProperty<'q, S, f32>;
pub type DoubleProperty<'q, S> = NumberProperty<'q, S, f64>;

impl<'q, S: QueryShape, N: Numeric> NumberProperty<'q, S, N> {
    pub fn new(helper: PropertyHelper<'q, S>) -> Self { Self { helper, number: PhantomData } }

    pub fn eq(&self, value: N) -> Query<S> { self.helper.eq(value) }

    pub fn ne(&self, value: N) -> Query<S> { self.helper.ne(value) }

    pub fn gt(&self, value: N) -> Query<S> { self.helper.condition(operator::GREATER_THAN, vec![value.into()]) }

    pub fn lt(&self, value: N) -> Query<S> { self.helper.condition(operator::LESS_THAN, vec![value.into()]) }

    pub fn gte(&self, value: N) -> Query<S> { self.helper.condition(operator::GREATER_THAN_OR_EQUAL, vec![value.into()]) }

    pub fn lte(&self, value: N) -> Query<S> { self.helper.condition(operator::LESS_THAN_OR_EQUAL, vec![value.into()]) }

    pub fn value_in(&self, values: impl IntoIterator<Item = N>) -> Query<S> { self.helper.value_in(values) }

    pub fn value_not_in(&self, values: impl IntoIterator<Item = N>) -> Query<S> { self.helper.value_not_in(values) }

    pub fn exists(&self) -> Query<S> { self.helper.exists() }

    pub fn does_not_exist(&self) -> Query<S> { self.helper.does_not_exist() }
}
