//! Declared property types and the typed handles that append comparisons to a query.

mod boolean;
mod equitable;
mod instant;
mod map;
mod number;
mod string;

pub use boolean::BooleanProperty;
pub use equitable::EquitableProperty;
pub use instant::InstantProperty;
pub use map::StringMapProperty;
pub use number::{DoubleProperty, FloatProperty, IntegerProperty, LongProperty, NumberProperty, Numeric, ShortProperty};
pub use string::StringProperty;

use crate::path::FieldPath;
use crate::query::Query;
use crate::shape::QueryShape;
use crate::value::Value;
use rsql::{operator, Operator};
use std::fmt;

/// Tag naming the declared type of a field. Tags form a single-inheritance hierarchy so that a codec bound
/// to a parent type also serves its descendants.
#[derive(Clone, Copy)]
pub struct PropertyType {
    name: &'static str,
    parent: Option<&'static PropertyType>,
}

impl PropertyType {
    pub const fn new(name: &'static str) -> Self { Self { name, parent: None } }

    pub const fn extending(name: &'static str, parent: &'static PropertyType) -> Self { Self { name, parent: Some(parent) } }

    pub fn name(&self) -> &'static str { self.name }

    pub fn parent(&self) -> Option<&'static PropertyType> { self.parent }

    /// Whether this type is `other` or descends from it
    pub fn is_assignable_to(&self, other: &PropertyType) -> bool {
        let mut current = Some(self);
        while let Some(ty) = current {
            if ty == other {
                return true;
            }
            current = ty.parent;
        }
        false
    }
}

impl PartialEq for PropertyType {
    fn eq(&self, other: &Self) -> bool { self.name == other.name }
}

impl Eq for PropertyType {}

impl fmt::Debug for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "PropertyType({})", self.name) }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.name) }
}

pub const STRING: PropertyType = PropertyType::new("String");
pub const BOOLEAN: PropertyType = PropertyType::new("Boolean");
pub const SHORT: PropertyType = PropertyType::new("Short");
pub const INTEGER: PropertyType = PropertyType::new("Integer");
pub const LONG: PropertyType = PropertyType::new("Long");
pub const FLOAT: PropertyType = PropertyType::new("Float");
pub const DOUBLE: PropertyType = PropertyType::new("Double");
pub const INSTANT: PropertyType = PropertyType::new("Instant");

/// The field path, owning query and property type behind every typed handle
#[derive(Debug)]
pub struct PropertyHelper<'q, S: QueryShape> {
    query: &'q Query<S>,
    field: FieldPath,
    property_type: PropertyType,
}

impl<'q, S: QueryShape> PropertyHelper<'q, S> {
    pub fn new(query: &'q Query<S>, field: FieldPath, property_type: PropertyType) -> Self { Self { query, field, property_type } }

    pub fn query(&self) -> &'q Query<S> { self.query }

    pub fn field(&self) -> &FieldPath { &self.field }

    pub fn property_type(&self) -> PropertyType { self.property_type }

    /// Append `field operator values` to the owning query
    pub fn condition(&self, operator: Operator, values: Vec<Value>) -> Query<S> {
        self.query.condition(self.field.clone(), self.property_type, operator, values)
    }

    pub fn eq(&self, value: impl Into<Value>) -> Query<S> { self.condition(operator::EQUAL, vec![value.into()]) }

    pub fn ne(&self, value: impl Into<Value>) -> Query<S> { self.condition(operator::NOT_EQUAL, vec![value.into()]) }

    pub fn value_in<T: Into<Value>>(&self, values: impl IntoIterator<Item = T>) -> Query<S> {
        self.condition(operator::IN, values.into_iter().map(Into::into).collect())
    }

    pub fn value_not_in<T: Into<Value>>(&self, values: impl IntoIterator<Item = T>) -> Query<S> {
        self.condition(operator::NOT_IN, values.into_iter().map(Into::into).collect())
    }

    pub fn exists(&self) -> Query<S> { self.condition(operator::EXISTS, vec![Value::Bool(true)]) }

    pub fn does_not_exist(&self) -> Query<S> { self.condition(operator::EXISTS, vec![Value::Bool(false)]) }
}

/// Something that hands out property handles: a query (top-level fields) or a composed group (nested fields)
pub trait FieldScope<'q, S: QueryShape>: Sized {
    fn query(&self) -> &'q Query<S>;

    /// Path of the field `name` within this scope
    fn path(&self, name: &str) -> FieldPath;

    fn property(self, name: &str, property_type: PropertyType) -> PropertyHelper<'q, S> {
        PropertyHelper::new(self.query(), self.path(name), property_type)
    }

    fn string(self, name: &str) -> StringProperty<'q, S> { StringProperty::new(self.property(name, STRING)) }

    fn boolean(self, name: &str) -> BooleanProperty<'q, S> { BooleanProperty::new(self.property(name, BOOLEAN)) }

    fn number<N: Numeric>(self, name: &str) -> NumberProperty<'q, S, N> { NumberProperty::new(self.property(name, N::PROPERTY_TYPE)) }

    fn instant(self, name: &str) -> InstantProperty<'q, S> { InstantProperty::new(self.property(name, INSTANT)) }

    fn equitable<T: Into<Value>>(self, name: &str, property_type: PropertyType) -> EquitableProperty<'q, S, T> {
        EquitableProperty::new(self.property(name, property_type))
    }

    fn string_map(self, name: &str) -> StringMapProperty<'q, S> { StringMapProperty::new(self.query(), self.path(name)) }

    fn composed(self, name: &str) -> ComposedProperty<'q, S> { ComposedProperty::new(self.query(), self.path(name)) }
}

impl<'q, S: QueryShape> FieldScope<'q, S> for &'q Query<S> {
    fn query(&self) -> &'q Query<S> { *self }

    fn path(&self, name: &str) -> FieldPath { FieldPath::root(name) }
}

/// A nested field group. Accessors on it extend its path.
#[derive(Debug)]
pub struct ComposedProperty<'q, S: QueryShape> {
    query: &'q Query<S>,
    path: FieldPath,
}

impl<'q, S: QueryShape> ComposedProperty<'q, S> {
    pub fn new(query: &'q Query<S>, path: FieldPath) -> Self { Self { query, path } }

    pub fn field(&self) -> &FieldPath { &self.path }
}

impl<'q, S: QueryShape> Clone for ComposedProperty<'q, S> {
    fn clone(&self) -> Self { Self { query: self.query, path: self.path.clone() } }
}

impl<'a, 'q, S: QueryShape> FieldScope<'q, S> for &'a ComposedProperty<'q, S> {
    fn query(&self) -> &'q Query<S> { self.query }

    fn path(&self, name: &str) -> FieldPath { self.path.child(name) }
}
