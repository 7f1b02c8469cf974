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

pub static VECTOR: SchemaCell = SchemaCell::new(|| {
    Schema::builder("Vector")
        .field(Field::scalar("x", ScalarType::Float))
        .field(Field::scalar("y", ScalarType::Float))
        .build()
});

pub static VECTORS: SchemaCell = SchemaCell::new(|| {
    Schema::builder("Vectors")
        .field(Field::list_node("vector", &VECTOR).named("vectors"))
        .build()
});

pub static VALUE_LIST: SchemaCell = SchemaCell::new(|| {
    Schema::builder("ValueList")
        .field(Field::list("values", ScalarType::Int))
        .build()
});

pub static COMPANY: SchemaCell = SchemaCell::new(|| {
    Schema::builder("Company")
        .field(Field::scalar("title", ScalarType::Str))
        .field(Field::scalar("public", ScalarType::Bool).with_default(true))
        .field(Field::node("ceo", &USER))
        .build()
});

pub const USER_XML: &str = r#"
<profile first_name="Alexander" last_name="Pepyako" age="23" gender="male"
         phone="+79110010203" email="com@alexander.pepyako">
    <id>1</id>
    <sign>Pepyako inc.</sign>
</profile>
"#;

pub const USERS_XML: &str = r#"
<users>
    <profile first_name="Alexander" last_name="Pepyako" age="23" gender="male"
             phone="+79110010203" email="com@alexander.pepyako">
        <id>1</id>
        <sign>Pepyako inc.</sign>
    </profile>
    <profile first_name="Ivan" last_name="Ivanov" age="31" gender="male"
             phone="+79110010204" email="ivan@ivanov.example">
        <id>2</id>
        <sign>Ivanov ltd.</sign>
    </profile>
    <profile first_name="Maria" last_name="Petrova" age="27" gender="female"
             phone="+79110010205" email="maria@petrova.example">
        <id>3</id>
        <sign>Petrova and co.</sign>
    </profile>
</users>
"#;

pub const VECTORS_XML: &str = r#"
<vectors>
    <vector><x>1.2</x><y>3.2</y></vector>
    <vector><x>-4</x><y>0.5</y></vector>
    <vector><x>10.25</x><y>7</y></vector>
</vectors>
"#;

pub const VALUE_LIST_XML: &str = r#"
<document>
    <values>1</values>
    <values>2</values>
    <values>3</values>
    <values>4</values>
    <values>5</values>
    <values>6</values>
    <values>7</values>
    <values>8</values>
    <values>9</values>
    <values>10</values>
</document>
"#;

pub const COMPANY_XML: &str = r#"
<company>
    <title>Pepyako inc.</title>
    <ceo first_name="Alexander" last_name="Pepyako" age="23" gender="male"
         phone="+79110010203" email="com@alexander.pepyako">
        <id>1</id>
        <sign>Pepyako inc.</sign>
    </ceo>
</company>
"#;

pub static MANA: SchemaCell = SchemaCell::new(|| {
    Schema::builder("Mana")
        .field(Field::list("mana", ScalarType::Int).with_default(Value::list([90, 100])))
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

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
