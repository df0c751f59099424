//! RSQL grammar support: comparison operators, a pest grammar and a parser that turns query text into a
//! generic tree of AND / OR / comparison nodes. Selectors and arguments are kept as raw strings; typing
//! them is left to the caller.

pub mod ast;
pub mod error;
pub mod grammar;
pub mod operator;
pub mod parser;

pub use error::{OperatorError, ParseError};
pub use operator::{Operator, OperatorSet};
pub use parser::parse;
