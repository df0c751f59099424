use crate::grammar;
use thiserror::Error;

/// Custom error type for parsing errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("Syntax error: {0}")]
    SyntaxError(String),
    #[error("Empty expression")]
    EmptyExpression,
    #[error("Expected {expected}, got {got:?}")]
    UnexpectedRule { expected: &'static str, got: grammar::Rule },
    #[error("Missing {0}")]
    MissingOperand(&'static str),
    #[error("Unknown operator: {0}")]
    UnknownOperator(String),
    #[error("Operator {0} accepts a single argument")]
    UnexpectedMultipleValues(&'static str),
}

/// Errors raised while assembling an operator set
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OperatorError {
    #[error("Operator symbol {0} is already registered")]
    DuplicateSymbol(&'static str),
    #[error("Invalid operator symbol: {0}")]
    InvalidSymbol(&'static str),
}
