mod common;

use common::*;
use composite::Document;
use composite_json::{from_json_str, to_json_string, to_json_value};
use proptest::prelude::*;

fn text_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9 .@+_-]{0,20}",
        // quotes, escapes and non-ascii
        "[\"\\\\/\u{e9}\u{4e2d}\u{1F600}a-z]{0,10}",
    ]
}

fn user_strategy() -> impl Strategy<Value = Document> {
    (
        any::<i64>(),
        text_strategy(),
        text_strategy(),
        any::<i64>(),
        prop::option::of(text_strategy()),
    )
        .prop_map(|(id, sign, first_name, age, email)| {
            let mut user = Document::new(user_schema());
            user.set("id", id).unwrap();
            user.set("sign", sign).unwrap();
            let attributes = user.attributes_mut().unwrap();
            attributes.set("first_name", first_name).unwrap();
            attributes.set("age", age).unwrap();
            if let Some(email) = email {
                attributes.set("email", email).unwrap();
            }
            user
        })
}

proptest! {
    #[test]
    fn test_user_survives_json_text(user in user_strategy()) {
        let text = to_json_string(&user).unwrap();
        let parsed = from_json_str(user_schema(), &text).unwrap();
        prop_assert_eq!(&parsed, &user);
    }

    #[test]
    fn test_users_survive_mapping(users in prop::collection::vec(user_strategy(), 0..5)) {
        let schema = USERS.get().unwrap();
        let mut list = Document::new(schema);
        for user in &users {
            list.push("users", user.clone()).unwrap();
        }
        let built = to_json_value(&list).unwrap();
        let parsed = schema.parse(&composite_json::Mapping::default(), &built).unwrap();
        prop_assert_eq!(parsed.nodes("users").unwrap(), &users[..]);
    }
}
