use crate::error::QueryError;
use std::fmt;

/// Dotted path identifying a field, possibly nested inside composed groups (`address.city`)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    /// A single-segment path
    pub fn root(name: impl Into<String>) -> Self { Self { segments: vec![name.into()] } }

    /// Split a dotted selector. Every segment must be non-empty.
    pub fn parse(selector: &str) -> Result<Self, QueryError> {
        let segments: Vec<String> = selector.split('.').map(str::to_string).collect();
        if segments.iter().any(String::is_empty) {
            return Err(QueryError::InvalidArgument(format!("field path {selector:?} has an empty segment")));
        }
        Ok(Self { segments })
    }

    /// A new path with `name` appended
    pub fn child(&self, name: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(name.into());
        Self { segments }
    }

    pub fn segments(&self) -> &[String] { &self.segments }

    /// Fails unless every segment can be written as an RSQL selector and read back as the same segment
    pub fn check_selector(&self) -> Result<(), QueryError> {
        match self.segments.iter().find(|segment| segment.is_empty() || segment.chars().any(|c| c == '.' || is_reserved(c))) {
            Some(segment) => Err(QueryError::InvalidArgument(format!("field segment {segment:?} of {self} cannot be written as a selector"))),
            None => Ok(()),
        }
    }
}

/// Characters RSQL reserves for its own syntax, whitespace included
pub(crate) fn is_reserved(c: char) -> bool {
    c.is_whitespace() || matches!(c, '"' | '\'' | '(' | ')' | ';' | ',' | '=' | '!' | '~' | '<' | '>')
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.segments.join(".")) }
}
