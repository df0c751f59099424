#![allow(dead_code)]

use once_cell::sync::Lazy;
use rsql_builder::codec::{EpochMillisCodec, FnCodec};
use rsql_builder::prelude::*;
use std::str::FromStr;
use tracing::Level;

// Initialize tracing for tests
#[ctor::ctor]
fn init_tracing() {
    // if LOG_LEVEL env var is set, use it
    if let Ok(level) = std::env::var("LOG_LEVEL") {
        tracing_subscriber::fmt().with_max_level(Level::from_str(&level).unwrap()).with_test_writer().init();
    } else {
        tracing_subscriber::fmt().with_max_level(Level::INFO).with_test_writer().init();
    }
}

// ---- primitive fields -------------------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub enum ExampleEnum {
    Value1,
    Value2,
}

impl From<ExampleEnum> for Value {
    fn from(value: ExampleEnum) -> Self { Value::custom(value) }
}

pub const EXAMPLE_ENUM: PropertyType = PropertyType::new("ExampleEnum");

fn example_enum_codec() -> FnCodec<ExampleEnum> {
    FnCodec::new(
        |value: &ExampleEnum| match value {
            ExampleEnum::Value1 => "VALUE1".to_string(),
            ExampleEnum::Value2 => "VALUE2".to_string(),
        },
        |text: &str| match text {
            "VALUE1" => Ok(ExampleEnum::Value1),
            "VALUE2" => Ok(ExampleEnum::Value2),
            other => Err(format!("unknown variant {other}")),
        },
    )
}

const EXAMPLE_FIELDS: &[FieldDecl] = &[
    FieldDecl::property("stringProperty", rsql_builder::property::STRING),
    FieldDecl::property("booleanProperty", rsql_builder::property::BOOLEAN),
    FieldDecl::property("shortProperty", rsql_builder::property::SHORT),
    FieldDecl::property("intProperty", rsql_builder::property::INTEGER),
    FieldDecl::property("longProperty", rsql_builder::property::LONG),
    FieldDecl::property("floatProperty", rsql_builder::property::FLOAT),
    FieldDecl::property("doubleProperty", rsql_builder::property::DOUBLE),
    FieldDecl::property("instantProperty", rsql_builder::property::INSTANT),
    FieldDecl::property("enumProperty", EXAMPLE_ENUM),
];

/// Shapes exposing the example fields
pub trait ExampleShape: QueryShape {}

#[derive(Debug)]
pub struct ExampleQuery;

impl QueryShape for ExampleQuery {
    const FIELDS: &'static [FieldDecl] = EXAMPLE_FIELDS;

    fn config() -> &'static QueryConfig {
        static CONFIG: Lazy<QueryConfig> = Lazy::new(|| QueryConfig::builder().codec(EXAMPLE_ENUM, example_enum_codec()).build().unwrap());
        &CONFIG
    }
}

impl ExampleShape for ExampleQuery {}

/// Same fields, with instants written as epoch milliseconds
#[derive(Debug)]
pub struct ExampleQueryWithCustomCodecs;

impl QueryShape for ExampleQueryWithCustomCodecs {
    const FIELDS: &'static [FieldDecl] = EXAMPLE_FIELDS;

    fn config() -> &'static QueryConfig {
        static CONFIG: Lazy<QueryConfig> = Lazy::new(|| {
            QueryConfig::builder()
                .codec(EXAMPLE_ENUM, example_enum_codec())
                .codec(rsql_builder::property::INSTANT, EpochMillisCodec)
                .build()
                .unwrap()
        });
        &CONFIG
    }
}

impl ExampleShape for ExampleQueryWithCustomCodecs {}

pub trait ExampleFields<S: ExampleShape> {
    fn string_property(&self) -> StringProperty<'_, S>;
    fn boolean_property(&self) -> BooleanProperty<'_, S>;
    fn short_property(&self) -> ShortProperty<'_, S>;
    fn int_property(&self) -> IntegerProperty<'_, S>;
    fn long_property(&self) -> LongProperty<'_, S>;
    fn float_property(&self) -> FloatProperty<'_, S>;
    fn double_property(&self) -> DoubleProperty<'_, S>;
    fn instant_property(&self) -> InstantProperty<'_, S>;
    fn enum_property(&self) -> EquitableProperty<'_, S, ExampleEnum>;
}

impl<S: ExampleShape> ExampleFields<S> for Query<S> {
    fn string_property(&self) -> StringProperty<'_, S> { self.string("stringProperty") }
    fn boolean_property(&self) -> BooleanProperty<'_, S> { self.boolean("booleanProperty") }
    fn short_property(&self) -> ShortProperty<'_, S> { self.number("shortProperty") }
    fn int_property(&self) -> IntegerProperty<'_, S> { self.number("intProperty") }
    fn long_property(&self) -> LongProperty<'_, S> { self.number("longProperty") }
    fn float_property(&self) -> FloatProperty<'_, S> { self.number("floatProperty") }
    fn double_property(&self) -> DoubleProperty<'_, S> { self.number("doubleProperty") }
    fn instant_property(&self) -> InstantProperty<'_, S> { self.instant("instantProperty") }
    fn enum_property(&self) -> EquitableProperty<'_, S, ExampleEnum> { self.equitable("enumProperty", EXAMPLE_ENUM) }
}

// ---- people, with a composed address and a custom URL type -----------------------------------------------

#[derive(Debug, Clone, PartialEq, PartialOrd)]
pub struct Url(pub String);

impl From<Url> for Value {
    fn from(value: Url) -> Self { Value::custom(value) }
}

pub const URL: PropertyType = PropertyType::new("Url");

const ADDRESS_FIELDS: &[FieldDecl] = &[
    FieldDecl::property("street", rsql_builder::property::STRING),
    FieldDecl::property("city", rsql_builder::property::STRING),
    FieldDecl::property("country", rsql_builder::property::STRING),
];

#[derive(Debug)]
pub struct TestQuery;

impl QueryShape for TestQuery {
    const FIELDS: &'static [FieldDecl] = &[
        FieldDecl::property("firstName", rsql_builder::property::STRING),
        FieldDecl::property("lastName", rsql_builder::property::STRING),
        FieldDecl::property("age", rsql_builder::property::SHORT),
        FieldDecl::composed("address", ADDRESS_FIELDS),
        FieldDecl::property("homePage", URL),
    ];

    fn config() -> &'static QueryConfig {
        static CONFIG: Lazy<QueryConfig> = Lazy::new(|| {
            QueryConfig::builder().codec(URL, FnCodec::new(|url: &Url| url.0.clone(), |text: &str| Ok(Url(text.to_string())))).build().unwrap()
        });
        &CONFIG
    }
}

pub trait TestFields {
    fn first_name(&self) -> StringProperty<'_, TestQuery>;
    fn last_name(&self) -> StringProperty<'_, TestQuery>;
    fn age(&self) -> ShortProperty<'_, TestQuery>;
    fn address(&self) -> AddressFields<'_>;
    fn home_page(&self) -> EquitableProperty<'_, TestQuery, Url>;
}

impl TestFields for Query<TestQuery> {
    fn first_name(&self) -> StringProperty<'_, TestQuery> { self.string("firstName") }
    fn last_name(&self) -> StringProperty<'_, TestQuery> { self.string("lastName") }
    fn age(&self) -> ShortProperty<'_, TestQuery> { self.number("age") }
    fn address(&self) -> AddressFields<'_> { AddressFields(self.composed("address")) }
    fn home_page(&self) -> EquitableProperty<'_, TestQuery, Url> { self.equitable("homePage", URL) }
}

pub struct AddressFields<'q>(ComposedProperty<'q, TestQuery>);

impl<'q> AddressFields<'q> {
    pub fn street(&self) -> StringProperty<'q, TestQuery> { self.0.string("street") }
    pub fn city(&self) -> StringProperty<'q, TestQuery> { self.0.string("city") }
    pub fn country(&self) -> StringProperty<'q, TestQuery> { self.0.string("country") }
}

#[derive(Debug, Clone)]
pub struct TestAddress {
    pub street: String,
    pub city: String,
    pub country: String,
}

impl Record for TestAddress {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        let value = match name {
            "street" => &self.street,
            "city" => &self.city,
            "country" => &self.country,
            _ => return None,
        };
        Some(FieldValue::Value(Value::from(value.as_str())))
    }
}

#[derive(Debug, Clone)]
pub struct TestRecord {
    pub first_name: String,
    pub last_name: String,
    pub age: i16,
    pub address: Option<TestAddress>,
    pub home_page: Option<Url>,
}

impl Record for TestRecord {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "firstName" => Some(FieldValue::Value(Value::from(self.first_name.as_str()))),
            "lastName" => Some(FieldValue::Value(Value::from(self.last_name.as_str()))),
            "age" => Some(FieldValue::Value(Value::I16(self.age))),
            "address" => self.address.as_ref().map(|address| FieldValue::Record(address)),
            "homePage" => self.home_page.clone().map(|url| FieldValue::Value(url.into())),
            _ => None,
        }
    }
}

pub fn jane_doe() -> TestRecord {
    TestRecord {
        first_name: "Jane".to_string(),
        last_name: "Doe".to_string(),
        age: 27,
        address: Some(TestAddress { street: "Rue des Rivoli".to_string(), city: "Paris".to_string(), country: "France".to_string() }),
        home_page: Some(Url("https://janedoe.example".to_string())),
    }
}

// ---- string maps ---------------------------------------------------------------------------------------------

#[derive(Debug)]
pub struct KVTestQuery;

impl QueryShape for KVTestQuery {
    const FIELDS: &'static [FieldDecl] = &[FieldDecl::property("name", rsql_builder::property::STRING), FieldDecl::string_map("tags")];
}

pub trait KVTestFields {
    fn name(&self) -> StringProperty<'_, KVTestQuery>;
    fn tags(&self) -> StringMapProperty<'_, KVTestQuery>;
}

impl KVTestFields for Query<KVTestQuery> {
    fn name(&self) -> StringProperty<'_, KVTestQuery> { self.string("name") }
    fn tags(&self) -> StringMapProperty<'_, KVTestQuery> { self.string_map("tags") }
}
