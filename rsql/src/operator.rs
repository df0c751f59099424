//! Comparison operators and the operator registry consulted by the parser.

use crate::error::OperatorError;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A comparison operator. The first symbol is canonical and is what serializers emit; any further symbols
/// are aliases accepted when parsing.
#[derive(Debug, Clone, Copy)]
pub struct Operator {
    symbols: &'static [&'static str],
    multi_value: bool,
}

impl Operator {
    pub const fn new(symbols: &'static [&'static str], multi_value: bool) -> Self {
        assert!(!symbols.is_empty(), "an operator needs at least one symbol");
        Self { symbols, multi_value }
    }

    /// The canonical symbol
    pub fn symbol(&self) -> &'static str { self.symbols[0] }

    pub fn symbols(&self) -> &'static [&'static str] { self.symbols }

    /// Whether the operator takes a parenthesized argument list
    pub fn is_multi_value(&self) -> bool { self.multi_value }

    fn matches(&self, symbol: &str) -> bool { self.symbols.iter().any(|s| *s == symbol) }
}

impl PartialEq for Operator {
    fn eq(&self, other: &Self) -> bool { self.symbol() == other.symbol() }
}

impl Eq for Operator {}

impl Hash for Operator {
    fn hash<H: Hasher>(&self, state: &mut H) { self.symbol().hash(state) }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.symbol()) }
}

pub const EQUAL: Operator = Operator::new(&["=="], false);
pub const NOT_EQUAL: Operator = Operator::new(&["!="], false);
pub const GREATER_THAN: Operator = Operator::new(&["=gt=", ">"], false);
pub const GREATER_THAN_OR_EQUAL: Operator = Operator::new(&["=ge=", ">="], false);
pub const LESS_THAN: Operator = Operator::new(&["=lt=", "<"], false);
pub const LESS_THAN_OR_EQUAL: Operator = Operator::new(&["=le=", "<="], false);
pub const IN: Operator = Operator::new(&["=in="], true);
pub const NOT_IN: Operator = Operator::new(&["=out="], true);

/// Field existence test. Takes a single `true` / `false` argument.
pub const EXISTS: Operator = Operator::new(&["=ex="], false);
/// Regular expression match against the text form of a value
pub const REGEX: Operator = Operator::new(&["=re="], false);

pub const DEFAULTS: [Operator; 8] = [EQUAL, NOT_EQUAL, GREATER_THAN, GREATER_THAN_OR_EQUAL, LESS_THAN, LESS_THAN_OR_EQUAL, IN, NOT_IN];

/// Ordered set of operators. Every symbol (canonical or alias) belongs to exactly one operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorSet {
    operators: Vec<Operator>,
}

impl Default for OperatorSet {
    fn default() -> Self { Self { operators: DEFAULTS.to_vec() } }
}

impl OperatorSet {
    pub fn empty() -> Self { Self { operators: Vec::new() } }

    /// Add an operator. Re-adding an identical operator is a no-op; claiming a symbol owned by a different
    /// operator fails.
    pub fn with(mut self, operator: Operator) -> Result<Self, OperatorError> {
        if self.operators.iter().any(|existing| existing.symbols == operator.symbols && existing.multi_value == operator.multi_value) {
            return Ok(self);
        }
        for &symbol in operator.symbols() {
            if !is_valid_symbol(symbol) {
                return Err(OperatorError::InvalidSymbol(symbol));
            }
            if self.find(symbol).is_some() {
                return Err(OperatorError::DuplicateSymbol(symbol));
            }
        }
        self.operators.push(operator);
        Ok(self)
    }

    /// Resolve a canonical symbol or alias
    pub fn find(&self, symbol: &str) -> Option<Operator> { self.operators.iter().copied().find(|op| op.matches(symbol)) }

    pub fn contains(&self, operator: &Operator) -> bool { self.operators.contains(operator) }

    pub fn iter(&self) -> impl Iterator<Item = &Operator> { self.operators.iter() }

    pub fn len(&self) -> usize { self.operators.len() }

    pub fn is_empty(&self) -> bool { self.operators.is_empty() }
}

// Must stay in line with the ComparisonOperator rule in rsql.pest
fn is_valid_symbol(symbol: &str) -> bool {
    if matches!(symbol, "!=" | "<" | "<=" | ">" | ">=") {
        return true;
    }
    symbol.len() >= 2
        && symbol.starts_with('=')
        && symbol.ends_with('=')
        && symbol[1..symbol.len() - 1].chars().all(|c| c.is_ascii_alphabetic() || c == '-')
}
