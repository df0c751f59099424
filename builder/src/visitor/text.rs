use super::NodeVisitor;
use crate::codec::{BoolCodec, ValueCodec};
use crate::config::QueryConfig;
use crate::error::QueryError;
use crate::node::{ComparisonNode, LogicalNode, Node};
use crate::value::Value;
use rsql::operator;

/// Renders a tree as RSQL: `;` joins AND children, `,` joins OR children, and nested groups are parenthesized.
#[derive(Debug, Clone, Copy)]
pub struct TextVisitor<'c> {
    config: &'c QueryConfig,
}

impl<'c> TextVisitor<'c> {
    pub fn new(config: &'c QueryConfig) -> Self { Self { config } }

    /// Serialize a whole tree. A tree that constrains nothing renders as the empty string.
    pub fn serialize(&self, root: &LogicalNode) -> Result<String, QueryError> {
        let text = self.visit(&Node::Logical(root.clone()).normalized(), None)?;
        tracing::trace!("serialized query: {text}");
        Ok(text)
    }

    fn join(&self, node: &LogicalNode, parent: Option<&LogicalNode>) -> Result<String, QueryError> {
        let mut buffer = String::new();
        for child in node.children().iter().filter(|child| !child.is_empty()) {
            if !buffer.is_empty() {
                buffer.push(node.operator().separator());
            }
            buffer.push_str(&self.visit(child, Some(node))?);
        }
        if parent.is_some() && !buffer.is_empty() {
            buffer = format!("({buffer})");
        }
        Ok(buffer)
    }

    fn encode(&self, node: &ComparisonNode, value: &Value) -> Result<String, QueryError> {
        let codec: &dyn ValueCodec = if node.operator() == operator::EXISTS { &BoolCodec } else { self.config.codec_for(&node.property_type())? };
        codec.encode(value).map_err(|source| QueryError::InvalidValue { property_type: node.property_type().name(), source })
    }
}

impl NodeVisitor for TextVisitor<'_> {
    type Output = String;
    type Error = QueryError;

    fn visit_and(&self, node: &LogicalNode, parent: Option<&LogicalNode>) -> Result<String, QueryError> { self.join(node, parent) }

    fn visit_or(&self, node: &LogicalNode, parent: Option<&LogicalNode>) -> Result<String, QueryError> { self.join(node, parent) }

    fn visit_comparison(&self, node: &ComparisonNode, _parent: Option<&LogicalNode>) -> Result<String, QueryError> {
        node.field().check_selector()?;
        let mut buffer = node.field().to_string();
        buffer.push_str(node.operator().symbol());

        match node.values() {
            [] => return Err(QueryError::MissingValue(node.field().to_string())),
            values if node.operator().is_multi_value() => {
                buffer.push('(');
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        buffer.push(',');
                    }
                    buffer.push_str(&self.encode(node, value)?);
                }
                buffer.push(')');
            }
            [value] => buffer.push_str(&self.encode(node, value)?),
            values => {
                return Err(QueryError::InvalidArgument(format!(
                    "{} takes a single value, {} were given for {}",
                    node.operator(),
                    values.len(),
                    node.field()
                )))
            }
        }
        Ok(buffer)
    }
}
