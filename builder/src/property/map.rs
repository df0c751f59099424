use super::{PropertyHelper, StringProperty, STRING};
use crate::path::FieldPath;
use crate::query::Query;
use crate::shape::QueryShape;

/// String-keyed map of text values. Each entry is addressed as `<map>.<key>`.
#[derive(Debug)]
pub struct StringMapProperty<'q, S: QueryShape> {
    query: &'q Query<S>,
    path: FieldPath,
}

impl<'q, S: QueryShape> StringMapProperty<'q, S> {
    pub fn new(query: &'q Query<S>, path: FieldPath) -> Self { Self { query, path } }

    pub fn entry(&self, key: &str) -> StringProperty<'q, S> { StringProperty::new(PropertyHelper::new(self.query, self.path.child(key), STRING)) }
}
