//! Query shapes: the declared fields a query can constrain, and how a field path resolves to a property type.

use crate::config::QueryConfig;
use crate::error::QueryError;
use crate::path::FieldPath;
use crate::property::{PropertyType, STRING};
use crate::query::Query;
use once_cell::sync::Lazy;

/// One declared field of a shape or of a composed group
#[derive(Debug, Clone, Copy)]
pub struct FieldDecl {
    pub name: &'static str,
    pub kind: FieldKind,
}

#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    /// A leaf field of the given property type
    Property(PropertyType),
    /// A nested group of fields (`address.city`)
    Composed(&'static [FieldDecl]),
    /// A string-keyed map; the segment after the map name is a free-form key
    Map(PropertyType),
}

impl FieldDecl {
    pub const fn property(name: &'static str, property_type: PropertyType) -> Self { Self { name, kind: FieldKind::Property(property_type) } }

    pub const fn composed(name: &'static str, fields: &'static [FieldDecl]) -> Self { Self { name, kind: FieldKind::Composed(fields) } }

    pub const fn map(name: &'static str, value_type: PropertyType) -> Self { Self { name, kind: FieldKind::Map(value_type) } }

    /// A map of text values
    pub const fn string_map(name: &'static str) -> Self { Self::map(name, STRING) }
}

/// A family of queries over one set of declared fields, sharing one configuration
pub trait QueryShape: Sized + 'static {
    const FIELDS: &'static [FieldDecl];

    fn config() -> &'static QueryConfig { default_config() }

    fn create() -> Query<Self> { Query::create() }

    fn parse(text: &str) -> Result<Query<Self>, QueryError> { Query::parse(text) }

    /// The declared property type at `path`
    fn resolve(path: &FieldPath) -> Result<PropertyType, QueryError> { resolve(Self::FIELDS, path) }
}

/// The configuration used by shapes that do not customize theirs
pub fn default_config() -> &'static QueryConfig {
    static DEFAULT: Lazy<QueryConfig> = Lazy::new(QueryConfig::default);
    &DEFAULT
}

/// Walk `path` through `fields`, descending into composed groups and consuming one key segment per map
pub fn resolve(fields: &[FieldDecl], path: &FieldPath) -> Result<PropertyType, QueryError> {
    let unknown = || QueryError::UnknownField(path.to_string());

    let mut fields = fields;
    let mut segments = path.segments().iter();
    while let Some(segment) = segments.next() {
        let decl = fields.iter().find(|decl| decl.name == segment.as_str()).ok_or_else(unknown)?;
        match decl.kind {
            FieldKind::Composed(nested) => fields = nested,
            FieldKind::Property(property_type) => {
                return match segments.next() {
                    None => Ok(property_type),
                    Some(_) => Err(unknown()),
                };
            }
            FieldKind::Map(value_type) => {
                return match (segments.next(), segments.next()) {
                    (Some(_key), None) => Ok(value_type),
                    _ => Err(unknown()),
                };
            }
        }
    }
    // the path ended on a composed group
    Err(unknown())
}
