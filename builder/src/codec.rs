//! Value codecs: per property type conversion between typed values and their RSQL argument text.

use crate::path::is_reserved;
use crate::property::{self, PropertyType};
use crate::value::{DynValue, Value};
use chrono::{DateTime, SecondsFormat, Utc};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("expected a {expected} value, got {value:?}")]
    UnexpectedValue { expected: &'static str, value: Value },
    #[error("cannot read {text:?} as {expected}: {reason}")]
    Unparsable { expected: &'static str, text: String, reason: String },
}

impl CodecError {
    pub fn unexpected(expected: &'static str, value: &Value) -> Self { CodecError::UnexpectedValue { expected, value: value.clone() } }

    pub fn unparsable(expected: &'static str, text: &str, reason: impl fmt::Display) -> Self {
        CodecError::Unparsable { expected, text: text.to_string(), reason: reason.to_string() }
    }
}

/// Converts values of one property type to and from argument text. The encoded form is emitted verbatim,
/// so an encoder is responsible for any quoting its values need; `decode` receives unquoted text.
pub trait ValueCodec: Send + Sync {
    fn encode(&self, value: &Value) -> Result<String, CodecError>;
    fn decode(&self, text: &str) -> Result<Value, CodecError>;
}

/// Text values. Values that are empty or contain whitespace or RSQL reserved characters are double quoted
/// with `"` and `\` escaped.
#[derive(Debug, Default, Clone, Copy)]
pub struct StringCodec;

impl StringCodec {
    fn needs_quoting(text: &str) -> bool {
        text.is_empty() || text.chars().any(is_reserved)
    }
}

impl ValueCodec for StringCodec {
    fn encode(&self, value: &Value) -> Result<String, CodecError> {
        let Value::String(text) = value else { return Err(CodecError::unexpected("string", value)) };
        if !Self::needs_quoting(text) {
            return Ok(text.clone());
        }

        let mut buffer = String::with_capacity(text.len() + 2);
        buffer.push('"');
        for c in text.chars() {
            if matches!(c, '"' | '\\') {
                buffer.push('\\');
            }
            buffer.push(c);
        }
        buffer.push('"');
        Ok(buffer)
    }

    fn decode(&self, text: &str) -> Result<Value, CodecError> { Ok(Value::String(text.to_string())) }
}

/// `true` / `false`, case-insensitive when decoding
#[derive(Debug, Default, Clone, Copy)]
pub struct BoolCodec;

impl ValueCodec for BoolCodec {
    fn encode(&self, value: &Value) -> Result<String, CodecError> {
        match value {
            Value::Bool(b) => Ok(b.to_string()),
            other => Err(CodecError::unexpected("boolean", other)),
        }
    }

    fn decode(&self, text: &str) -> Result<Value, CodecError> {
        if text.eq_ignore_ascii_case("true") {
            Ok(Value::Bool(true))
        } else if text.eq_ignore_ascii_case("false") {
            Ok(Value::Bool(false))
        } else {
            Err(CodecError::unparsable("boolean", text, "expected true or false"))
        }
    }
}

macro_rules! number_codec {
    ($(#[$meta:meta])* $name:ident, $ty:ty, $variant:ident, $label:literal, $format:literal) => {
        $(#[$meta])*
        #[derive(Debug, Default, Clone, Copy)]
        pub struct $name;

        impl ValueCodec for $name {
            fn encode(&self, value: &Value) -> Result<String, CodecError> {
                match value {
                    Value::$variant(n) => Ok(format!($format, n)),
                    other => Err(CodecError::unexpected($label, other)),
                }
            }

            fn decode(&self, text: &str) -> Result<Value, CodecError> {
                text.trim().parse::<$ty>().map(Value::$variant).map_err(|e| CodecError::unparsable($label, text, e))
            }
        }
    };
}

number_codec!(ShortCodec, i16, I16, "short", "{}");
number_codec!(IntegerCodec, i32, I32, "integer", "{}");
number_codec!(LongCodec, i64, I64, "long", "{}");
number_codec!(
    /// Always renders a fractional part (`20.0`)
    FloatCodec, f32, F32, "float", "{:?}"
);
number_codec!(
    /// Always renders a fractional part (`20.0`)
    DoubleCodec, f64, F64, "double", "{:?}"
);

/// RFC 3339 instants in UTC, with fractional seconds only when present (`2024-01-01T01:00:00Z`)
#[derive(Debug, Default, Clone, Copy)]
pub struct InstantCodec;

impl ValueCodec for InstantCodec {
    fn encode(&self, value: &Value) -> Result<String, CodecError> {
        match value {
            Value::Timestamp(t) => Ok(t.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            other => Err(CodecError::unexpected("instant", other)),
        }
    }

    fn decode(&self, text: &str) -> Result<Value, CodecError> {
        DateTime::parse_from_rfc3339(text).map(|t| Value::Timestamp(t.with_timezone(&Utc))).map_err(|e| CodecError::unparsable("instant", text, e))
    }
}

/// Instants as milliseconds since the Unix epoch
#[derive(Debug, Default, Clone, Copy)]
pub struct EpochMillisCodec;

impl ValueCodec for EpochMillisCodec {
    fn encode(&self, value: &Value) -> Result<String, CodecError> {
        match value {
            Value::Timestamp(t) => Ok(t.timestamp_millis().to_string()),
            other => Err(CodecError::unexpected("instant", other)),
        }
    }

    fn decode(&self, text: &str) -> Result<Value, CodecError> {
        let millis = text.trim().parse::<i64>().map_err(|e| CodecError::unparsable("epoch millis", text, e))?;
        DateTime::from_timestamp_millis(millis).map(Value::Timestamp).ok_or_else(|| CodecError::unparsable("epoch millis", text, "out of range"))
    }
}

type Encoder<T> = Box<dyn Fn(&T) -> String + Send + Sync>;
type Decoder<T> = Box<dyn Fn(&str) -> Result<T, String> + Send + Sync>;

/// Codec for a caller-defined type held in [`Value::Custom`], built from an encoder / decoder pair
pub struct FnCodec<T> {
    encoder: Encoder<T>,
    decoder: Decoder<T>,
}

impl<T: DynValue> FnCodec<T> {
    pub fn new(encoder: impl Fn(&T) -> String + Send + Sync + 'static, decoder: impl Fn(&str) -> Result<T, String> + Send + Sync + 'static) -> Self {
        Self { encoder: Box::new(encoder), decoder: Box::new(decoder) }
    }
}

impl<T: DynValue> ValueCodec for FnCodec<T> {
    fn encode(&self, value: &Value) -> Result<String, CodecError> {
        match value {
            Value::Custom(custom) => match custom.downcast_ref::<T>() {
                Some(value) => Ok((self.encoder)(value)),
                None => Err(CodecError::unexpected(std::any::type_name::<T>(), &Value::Custom(custom.clone()))),
            },
            other => Err(CodecError::unexpected(std::any::type_name::<T>(), other)),
        }
    }

    fn decode(&self, text: &str) -> Result<Value, CodecError> {
        (self.decoder)(text).map(Value::custom).map_err(|reason| CodecError::unparsable(std::any::type_name::<T>(), text, reason))
    }
}

/// Ordered property type → codec bindings
#[derive(Clone)]
pub struct CodecRegistry {
    bindings: Vec<(PropertyType, Arc<dyn ValueCodec>)>,
}

impl Default for CodecRegistry {
    fn default() -> Self {
        Self::empty()
            .with(property::STRING, StringCodec)
            .with(property::BOOLEAN, BoolCodec)
            .with(property::SHORT, ShortCodec)
            .with(property::INTEGER, IntegerCodec)
            .with(property::LONG, LongCodec)
            .with(property::FLOAT, FloatCodec)
            .with(property::DOUBLE, DoubleCodec)
            .with(property::INSTANT, InstantCodec)
    }
}

impl CodecRegistry {
    pub fn empty() -> Self { Self { bindings: Vec::new() } }

    /// Bind `codec` to `property_type`, replacing an existing binding for exactly that type in place
    pub fn with(self, property_type: PropertyType, codec: impl ValueCodec + 'static) -> Self { self.with_shared(property_type, Arc::new(codec)) }

    pub fn with_shared(mut self, property_type: PropertyType, codec: Arc<dyn ValueCodec>) -> Self {
        match self.bindings.iter_mut().find(|(bound, _)| *bound == property_type) {
            Some(binding) => binding.1 = codec,
            None => self.bindings.push((property_type, codec)),
        }
        self
    }

    /// The codec bound to exactly `property_type`, or else the first binding `property_type` is assignable to
    pub fn get(&self, property_type: &PropertyType) -> Option<&dyn ValueCodec> {
        self.bindings
            .iter()
            .find(|(bound, _)| bound == property_type)
            .or_else(|| self.bindings.iter().find(|(bound, _)| property_type.is_assignable_to(bound)))
            .map(|(_, codec)| codec.as_ref())
    }

    pub fn len(&self) -> usize { self.bindings.len() }

    pub fn is_empty(&self) -> bool { self.bindings.is_empty() }
}

impl fmt::Debug for CodecRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.debug_list().entries(self.bindings.iter().map(|(ty, _)| ty.name())).finish() }
}
