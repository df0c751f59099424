use chrono::{DateTime, SecondsFormat, Utc};
use std::any::Any;
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// A typed comparison value, as held by comparison nodes and read from records
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Bool(bool),

    // Numbers
    I16(i16),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),

    Timestamp(DateTime<Utc>),
    /// Any caller-defined type: enums, URIs, class hierarchies
    Custom(CustomValue),
}

impl Value {
    pub fn custom<T: DynValue>(value: T) -> Self { Value::Custom(CustomValue::new(value)) }

    /// Natural ordering. Numbers compare across widths; values of different kinds are incomparable.
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
            (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
            (Value::Timestamp(a), Value::Timestamp(b)) => Some(a.cmp(b)),
            (Value::Custom(a), Value::Custom(b)) => a.0.dyn_partial_cmp(b.0.as_ref()),
            (a, b) => match (a.as_i64(), b.as_i64()) {
                (Some(a), Some(b)) => Some(a.cmp(&b)),
                _ => a.as_f64()?.partial_cmp(&b.as_f64()?),
            },
        }
    }

    /// Equality with numeric width promotion
    pub fn equivalent(&self, other: &Value) -> bool { self == other || self.compare(other) == Some(Ordering::Equal) }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    fn as_i64(&self) -> Option<i64> {
        match self {
            Value::I16(n) => Some(i64::from(*n)),
            Value::I32(n) => Some(i64::from(*n)),
            Value::I64(n) => Some(*n),
            _ => None,
        }
    }

    fn as_f64(&self) -> Option<f64> {
        match self {
            Value::F32(n) => Some(f64::from(*n)),
            Value::F64(n) => Some(*n),
            other => other.as_i64().map(|n| n as f64),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => f.write_str(s),
            Value::Bool(b) => write!(f, "{b}"),
            Value::I16(n) => write!(f, "{n}"),
            Value::I32(n) => write!(f, "{n}"),
            Value::I64(n) => write!(f, "{n}"),
            Value::F32(n) => write!(f, "{n:?}"),
            Value::F64(n) => write!(f, "{n:?}"),
            Value::Timestamp(t) => f.write_str(&t.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            Value::Custom(c) => write!(f, "{c:?}"),
        }
    }
}

macro_rules! impl_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self { Value::$variant(value) }
            }
        )*
    };
}

impl_from!(String => String, bool => Bool, i16 => I16, i32 => I32, i64 => I64, f32 => F32, f64 => F64, DateTime<Utc> => Timestamp, CustomValue => Custom);

impl From<&str> for Value {
    fn from(value: &str) -> Self { Value::String(value.to_string()) }
}

/// Object-safe equality and ordering for custom values
pub trait DynValue: Any + fmt::Debug + Send + Sync {
    fn as_any(&self) -> &dyn Any;
    fn dyn_eq(&self, other: &dyn DynValue) -> bool;
    fn dyn_partial_cmp(&self, other: &dyn DynValue) -> Option<Ordering>;
}

impl<T> DynValue for T
where T: Any + fmt::Debug + PartialEq + PartialOrd + Send + Sync
{
    fn as_any(&self) -> &dyn Any { self }

    fn dyn_eq(&self, other: &dyn DynValue) -> bool { other.as_any().downcast_ref::<T>().is_some_and(|other| self == other) }

    fn dyn_partial_cmp(&self, other: &dyn DynValue) -> Option<Ordering> { self.partial_cmp(other.as_any().downcast_ref::<T>()?) }
}

/// A shared, type-erased caller value. Values of different concrete types are never equal.
#[derive(Clone)]
pub struct CustomValue(Arc<dyn DynValue>);

impl CustomValue {
    pub fn new<T: DynValue>(value: T) -> Self { Self(Arc::new(value)) }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> { self.0.as_any().downcast_ref::<T>() }
}

impl PartialEq for CustomValue {
    fn eq(&self, other: &Self) -> bool { self.0.dyn_eq(other.0.as_ref()) }
}

impl fmt::Debug for CustomValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { fmt::Debug::fmt(&self.0, f) }
}
