//! Typed RSQL query expressions.
//!
//! A [`Query`] is an immutable tree of AND / OR / comparison nodes built through typed property handles.
//! Queries serialize to RSQL text, parse back from it through a [`QueryShape`]'s field declarations and
//! codecs, and compile into in-memory [`visitor::Predicate`]s.

pub mod codec;
pub mod config;
pub mod error;
pub mod node;
pub mod path;
pub mod property;
pub mod query;
pub mod shape;
pub mod value;
pub mod visitor;

pub use codec::{CodecError, CodecRegistry, ValueCodec};
pub use config::{DeserializePolicy, QueryConfig};
pub use error::QueryError;
pub use node::{ComparisonNode, LogicalNode, LogicalOperator, Node};
pub use path::FieldPath;
pub use property::PropertyType;
pub use query::Query;
pub use rsql::operator;
pub use rsql::{Operator, OperatorSet};
pub use shape::{FieldDecl, FieldKind, QueryShape};
pub use value::{CustomValue, Value};

pub mod prelude {
    pub use crate::property::{
        BooleanProperty, ComposedProperty, DoubleProperty, EquitableProperty, FieldScope, FloatProperty, InstantProperty, IntegerProperty,
        LongProperty, NumberProperty, PropertyType, ShortProperty, StringMapProperty, StringProperty,
    };
    pub use crate::shape::{FieldDecl, FieldKind, QueryShape};
    pub use crate::visitor::{FieldValue, Predicate, Record};
    pub use crate::{Query, QueryConfig, QueryError, Value};
}
