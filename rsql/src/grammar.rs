use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "rsql.pest"]
pub struct RsqlParser;
