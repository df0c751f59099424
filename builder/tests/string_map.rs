mod common;

use anyhow::Result;
use common::*;
use rsql_builder::prelude::*;
use serde_json::json;

#[test]
fn test_entry_existence() -> Result<()> {
    let query = KVTestQuery::create().tags().entry("someKey").exists();
    assert_eq!(query.to_rsql()?, "tags.someKey=ex=true");
    assert_eq!(KVTestQuery::parse("tags.someKey=ex=true")?, query);
    Ok(())
}

#[test]
fn test_entry_value() -> Result<()> {
    let query = KVTestQuery::create().tags().entry("someOtherKey").eq("test");
    assert_eq!(query.to_rsql()?, "tags.someOtherKey==test");
    assert_eq!(KVTestQuery::parse("tags.someOtherKey==test")?, query);
    Ok(())
}

#[test]
fn test_map_needs_exactly_one_key() {
    assert!(matches!(KVTestQuery::parse("tags==test"), Err(QueryError::UnknownField(_))));
    assert!(matches!(KVTestQuery::parse("tags.a.b==test"), Err(QueryError::UnknownField(_))));
}

#[test]
fn test_keys_that_cannot_be_selectors() {
    for key in ["", "my key", "a.b", "k=v", "x;y"] {
        let query = KVTestQuery::create().tags().entry(key).eq("v");
        assert!(matches!(query.to_rsql(), Err(QueryError::InvalidArgument(_))), "{key:?}");
    }
}

#[test]
fn test_entries_in_predicates() -> Result<()> {
    let record = json!({ "name": "box", "tags": { "someKey": "x", "someOtherKey": "test" } });
    let untagged = json!({ "name": "crate" });

    let query = KVTestQuery::create().tags().entry("someKey").exists().and().tags().entry("someOtherKey").eq("test");
    assert!(query.to_predicate()?.test(&record));
    assert!(!query.to_predicate()?.test(&untagged));

    let missing = KVTestQuery::create().tags().entry("missing").does_not_exist().and().name().eq("crate");
    assert!(missing.to_predicate()?.test(&untagged));
    Ok(())
}
