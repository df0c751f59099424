use super::PropertyHelper;
use crate::query::Query;
use crate::shape::QueryShape;

#[derive(Debug)]
pub struct BooleanProperty<'q, S: QueryShape>(PropertyHelper<'q, S>);

impl<'q, S: QueryShape> BooleanProperty<'q, S> {
    pub fn new(helper: PropertyHelper<'q, S>) -> Self { Self(helper) }

    pub fn is_true(&self) -> Query<S> { self.0.eq(true) }

    pub fn is_false(&self) -> Query<S> { self.0.eq(false) }

    pub fn exists(&self) -> Query<S> { self.0.exists() }

    pub fn does_not_exist(&self) -> Query<S> { self.0.does_not_exist() }
}
