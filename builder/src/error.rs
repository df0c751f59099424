use crate::codec::CodecError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("unknown field: {0}")]
    UnknownField(String),
    #[error("no codec bound for property type {0}")]
    MissingCodec(&'static str),
    #[error("missing value for {0}")]
    MissingValue(String),
    #[error("operator {0} is not supported here")]
    UnsupportedOperator(&'static str),
    #[error("invalid {property_type} value: {source}")]
    InvalidValue {
        property_type: &'static str,
        #[source]
        source: CodecError,
    },
    #[error("invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
    #[error("malformed input: {0}")]
    MalformedInput(#[from] rsql::ParseError),
}
