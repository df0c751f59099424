use crate::ast;
use crate::error::ParseError;
use crate::grammar::{self, Rule};
use crate::operator::OperatorSet;
use pest::iterators::Pair;
use pest::Parser;

/// Parse RSQL text into a generic parse tree, resolving operator symbols against `operators`.
/// Nested groups are preserved as nodes; a group of one element yields that element.
pub fn parse(input: &str, operators: &OperatorSet) -> Result<ast::Node, ParseError> {
    tracing::debug!("parsing rsql: {input}");
    if input.trim().is_empty() {
        return Err(ParseError::EmptyExpression);
    }

    let mut pairs = grammar::RsqlParser::parse(Rule::Query, input).map_err(|e| ParseError::SyntaxError(e.to_string()))?;
    let query = pairs.next().ok_or(ParseError::EmptyExpression)?;
    let or = query.into_inner().find(|pair| pair.as_rule() == Rule::Or).ok_or(ParseError::EmptyExpression)?;

    let node = parse_logical(or, operators)?;
    tracing::trace!(?node, "parsed rsql");
    Ok(node)
}

/// Parse an Or / And rule into a logical node, collapsing single-element groups
fn parse_logical(pair: Pair<Rule>, operators: &OperatorSet) -> Result<ast::Node, ParseError> {
    let rule = pair.as_rule();
    let mut children = pair.into_inner().map(|inner| parse_constraint(inner, operators)).collect::<Result<Vec<_>, _>>()?;

    if children.len() == 1 {
        return children.pop().ok_or(ParseError::EmptyExpression);
    }
    match rule {
        _ if children.is_empty() => Err(ParseError::EmptyExpression),
        Rule::Or => Ok(ast::Node::Or(children)),
        Rule::And => Ok(ast::Node::And(children)),
        got => Err(ParseError::UnexpectedRule { expected: "And or Or", got }),
    }
}

fn parse_constraint(pair: Pair<Rule>, operators: &OperatorSet) -> Result<ast::Node, ParseError> {
    match pair.as_rule() {
        Rule::And => parse_logical(pair, operators),
        Rule::Group => {
            let inner = pair.into_inner().next().ok_or(ParseError::EmptyExpression)?;
            parse_logical(inner, operators)
        }
        Rule::Comparison => parse_comparison(pair, operators),
        got => Err(ParseError::UnexpectedRule { expected: "group or comparison", got }),
    }
}

fn parse_comparison(pair: Pair<Rule>, operators: &OperatorSet) -> Result<ast::Node, ParseError> {
    let mut parts = pair.into_inner();

    let selector = parts.next().ok_or(ParseError::MissingOperand("selector"))?;
    if selector.as_rule() != Rule::Selector {
        return Err(ParseError::UnexpectedRule { expected: "Selector", got: selector.as_rule() });
    }

    let symbol = parts.next().ok_or(ParseError::MissingOperand("operator"))?;
    let operator = operators.find(symbol.as_str()).ok_or_else(|| ParseError::UnknownOperator(symbol.as_str().to_string()))?;

    let arguments = parts.next().ok_or(ParseError::MissingOperand("argument"))?;
    let arguments = match arguments.as_rule() {
        Rule::ArgumentList => arguments.into_inner().map(parse_argument).collect::<Result<Vec<_>, _>>()?,
        _ => vec![parse_argument(arguments)?],
    };
    if !operator.is_multi_value() && arguments.len() > 1 {
        return Err(ParseError::UnexpectedMultipleValues(operator.symbol()));
    }

    Ok(ast::Node::Comparison(ast::Comparison { selector: selector.as_str().to_string(), operator, arguments }))
}

fn parse_argument(pair: Pair<Rule>) -> Result<String, ParseError> {
    match pair.as_rule() {
        Rule::Unreserved => Ok(pair.as_str().to_string()),
        Rule::DoubleQuoted | Rule::SingleQuoted => Ok(pair.into_inner().next().map(|inner| unescape(inner.as_str())).unwrap_or_default()),
        got => Err(ParseError::UnexpectedRule { expected: "argument", got }),
    }
}

/// Drop the backslash in front of every escaped character
fn unescape(raw: &str) -> String {
    let mut unescaped = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => unescaped.extend(chars.next()),
            c => unescaped.push(c),
        }
    }
    unescaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Comparison, Node};
    use crate::operator::{self, Operator};
    use anyhow::Result;

    fn comparison(selector: &str, operator: Operator, arguments: &[&str]) -> Node {
        Node::Comparison(Comparison {
            selector: selector.to_string(),
            operator,
            arguments: arguments.iter().map(|a| a.to_string()).collect(),
        })
    }

    #[test]
    fn test_single_comparison() -> Result<()> {
        let node = parse("status==active", &OperatorSet::default())?;
        assert_eq!(node, comparison("status", operator::EQUAL, &["active"]));
        Ok(())
    }

    #[test]
    fn test_and_binds_tighter_than_or() -> Result<()> {
        let node = parse("a==1;b==2,c==3", &OperatorSet::default())?;
        assert_eq!(
            node,
            Node::Or(vec![
                Node::And(vec![comparison("a", operator::EQUAL, &["1"]), comparison("b", operator::EQUAL, &["2"])]),
                comparison("c", operator::EQUAL, &["3"]),
            ])
        );
        Ok(())
    }

    #[test]
    fn test_groups_are_preserved() -> Result<()> {
        let node = parse("(x=lt=1.0,x=gt=0.5);y==true", &OperatorSet::default())?;
        assert_eq!(
            node,
            Node::And(vec![
                Node::Or(vec![comparison("x", operator::LESS_THAN, &["1.0"]), comparison("x", operator::GREATER_THAN, &["0.5"])]),
                comparison("y", operator::EQUAL, &["true"]),
            ])
        );
        Ok(())
    }

    #[test]
    fn test_single_element_group_collapses() -> Result<()> {
        let node = parse("((a==1))", &OperatorSet::default())?;
        assert_eq!(node, comparison("a", operator::EQUAL, &["1"]));
        Ok(())
    }

    #[test]
    fn test_argument_list_keeps_order() -> Result<()> {
        let node = parse("intProperty=in=(4,5,6)", &OperatorSet::default())?;
        assert_eq!(node, comparison("intProperty", operator::IN, &["4", "5", "6"]));
        Ok(())
    }

    #[test]
    fn test_quoted_arguments_are_unescaped() -> Result<()> {
        let node = parse(r#"name!="say \"hi\" \\ bye";tag=='a,b'"#, &OperatorSet::default())?;
        assert_eq!(
            node,
            Node::And(vec![comparison("name", operator::NOT_EQUAL, &[r#"say "hi" \ bye"#]), comparison("tag", operator::EQUAL, &["a,b"])])
        );
        Ok(())
    }

    #[test]
    fn test_empty_quoted_argument() -> Result<()> {
        let node = parse(r#"name=="""#, &OperatorSet::default())?;
        assert_eq!(node, comparison("name", operator::EQUAL, &[""]));
        Ok(())
    }

    #[test]
    fn test_aliases_resolve_to_canonical_operator() -> Result<()> {
        let node = parse("age>=18", &OperatorSet::default())?;
        assert_eq!(node, comparison("age", operator::GREATER_THAN_OR_EQUAL, &["18"]));
        Ok(())
    }

    #[test]
    fn test_whitespace_around_tokens() -> Result<()> {
        let node = parse(" a == 1 ; b =in= ( 1 , 2 ) ", &OperatorSet::default())?;
        assert_eq!(node, Node::And(vec![comparison("a", operator::EQUAL, &["1"]), comparison("b", operator::IN, &["1", "2"])]));
        Ok(())
    }

    #[test]
    fn test_unknown_operator() {
        assert_eq!(parse("a=ex=true", &OperatorSet::default()), Err(ParseError::UnknownOperator("=ex=".to_string())));
    }

    #[test]
    fn test_extension_operator() -> Result<()> {
        let operators = OperatorSet::default().with(operator::EXISTS)?;
        assert_eq!(parse("tags.key=ex=true", &operators)?, comparison("tags.key", operator::EXISTS, &["true"]));
        Ok(())
    }

    #[test]
    fn test_single_valued_operator_rejects_list() {
        assert_eq!(parse("a==(1,2)", &OperatorSet::default()), Err(ParseError::UnexpectedMultipleValues("==")));
    }

    #[test]
    fn test_empty_and_malformed_input() {
        assert_eq!(parse("   ", &OperatorSet::default()), Err(ParseError::EmptyExpression));
        assert!(matches!(parse("a==1;;b==2", &OperatorSet::default()), Err(ParseError::SyntaxError(_))));
    }
}
