use crate::codec::{CodecRegistry, StringCodec, ValueCodec};
use crate::error::QueryError;
use crate::property::PropertyType;
use rsql::{operator, Operator, OperatorError, OperatorSet};
use std::sync::Arc;

/// How deserialization treats property types with no bound codec
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeserializePolicy {
    /// Read and write such values as plain text instead of failing with `MissingCodec`
    pub raw_fallback: bool,
}

/// Codecs, operators and policy shared by every query of one shape. Immutable once built.
#[derive(Debug, Clone)]
pub struct QueryConfig {
    codecs: CodecRegistry,
    operators: OperatorSet,
    policy: DeserializePolicy,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self { codecs: CodecRegistry::default(), operators: default_operators(), policy: DeserializePolicy::default() }
    }
}

fn default_operators() -> OperatorSet {
    [operator::EXISTS, operator::REGEX].into_iter().fold(OperatorSet::default(), |operators, extension| operators.clone().with(extension).unwrap_or(operators))
}

impl QueryConfig {
    pub fn builder() -> QueryConfigBuilder { QueryConfigBuilder::default() }

    pub fn codecs(&self) -> &CodecRegistry { &self.codecs }

    pub fn operators(&self) -> &OperatorSet { &self.operators }

    pub fn policy(&self) -> DeserializePolicy { self.policy }

    /// The codec for `property_type`, falling back to plain text when the policy allows it
    pub fn codec_for(&self, property_type: &PropertyType) -> Result<&dyn ValueCodec, QueryError> {
        static RAW: StringCodec = StringCodec;
        match self.codecs.get(property_type) {
            Some(codec) => Ok(codec),
            None if self.policy.raw_fallback => {
                tracing::warn!("no codec bound for {property_type}, falling back to raw text");
                Ok(&RAW)
            }
            None => Err(QueryError::MissingCodec(property_type.name())),
        }
    }
}

/// Layers codec bindings and operators over the defaults
#[derive(Default)]
pub struct QueryConfigBuilder {
    codecs: Vec<(PropertyType, Arc<dyn ValueCodec>)>,
    operators: Vec<Operator>,
    policy: DeserializePolicy,
}

impl QueryConfigBuilder {
    pub fn codec(mut self, property_type: PropertyType, codec: impl ValueCodec + 'static) -> Self {
        self.codecs.push((property_type, Arc::new(codec)));
        self
    }

    pub fn operator(mut self, operator: Operator) -> Self {
        self.operators.push(operator);
        self
    }

    pub fn raw_fallback(mut self, raw_fallback: bool) -> Self {
        self.policy.raw_fallback = raw_fallback;
        self
    }

    pub fn build(self) -> Result<QueryConfig, QueryError> {
        let defaults = QueryConfig::default();
        let codecs = self.codecs.into_iter().fold(defaults.codecs, |registry, (ty, codec)| registry.with_shared(ty, codec));
        let operators = self
            .operators
            .into_iter()
            .try_fold(defaults.operators, OperatorSet::with)
            .map_err(|e: OperatorError| QueryError::InvalidArgument(e.to_string()))?;
        Ok(QueryConfig { codecs, operators, policy: self.policy })
    }
}
