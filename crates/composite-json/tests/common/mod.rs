#![allow(dead_code)]

use composite::{Document, Field, ScalarType, Schema, SchemaCell, Value};

pub static USER: SchemaCell = SchemaCell::new(|| {
    Schema::builder("User")
        .field(Field::scalar("id", ScalarType::Int))
        .field(Field::scalar("sign", ScalarType::Str))
        .attributes([
            Field::attribute("first_name", ScalarType::Str),
            Field::attribute("last_name", ScalarType::Str),
            Field::attribute("age", ScalarType::Int),
            Field::attribute("gender", ScalarType::Str),
            Field::attribute("phone", ScalarType::Str),
            Field::attribute("email", ScalarType::Str),
        ])
        .build()
});

pub static USERS: SchemaCell = SchemaCell::new(|| {
    Schema::builder("Users")
        .field(Field::list_node("profile", &USER).named("users"))
        .build()
});

pub static COMPANY: SchemaCell = SchemaCell::new(|| {
    Schema::builder("Company")
        .field(Field::scalar("title", ScalarType::Str))
        .field(Field::node("ceo", &USER))
        .build()
});

pub static VALUE_LIST: SchemaCell = SchemaCell::new(|| {
    Schema::builder("ValueList")
        .field(Field::list("values", ScalarType::Int))
        .build()
});

pub static MANA: SchemaCell = SchemaCell::new(|| {
    Schema::builder("Mana")
        .field(Field::list("mana", ScalarType::Int).with_default(Value::list([90, 100])))
        .build()
});

pub static NOTE: SchemaCell = SchemaCell::new(|| {
    Schema::builder("Note")
        .field(Field::scalar("id", ScalarType::Int))
        .field(Field::scalar("_attributes", ScalarType::Str).named("note"))
        .build()
});

pub fn user_schema() -> &'static Schema {
    USER.get().unwrap()
}

pub fn assert_user(user: &Document) {
    assert_eq!(user.int("id"), Some(1));
    assert_eq!(user.str("sign"), Some("Pepyako inc."));
    assert!(user.has_attributes());
    let attributes = user.attributes().unwrap();
    assert_eq!(attributes.str("first_name"), Some("Alexander"));
    assert_eq!(attributes.str("last_name"), Some("Pepyako"));
    assert_eq!(attributes.int("age"), Some(23));
    assert_eq!(attributes.str("gender"), Some("male"));
    assert_eq!(attributes.str("phone"), Some("+79110010203"));
    assert_eq!(attributes.str("email"), Some("com@alexander.pepyako"));
}

pub const USER_JSON: &str = r#"{
    "id": 1,
    "sign": "Pepyako inc.",
    "_attributes": {
        "first_name": "Alexander",
        "last_name": "Pepyako",
        "age": 23,
        "gender": "male",
        "phone": "+79110010203",
        "email": "com@alexander.pepyako"
    }
}"#;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
