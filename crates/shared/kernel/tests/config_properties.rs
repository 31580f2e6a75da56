use catalog_kernel::config::{env_to_tree, merged};
use proptest::prelude::*;
use serde_json::{Map, Value, json};

fn object(prefix: &str, values: &[i64]) -> Value {
    let map: Map<String, Value> =
        values.iter().enumerate().map(|(i, v)| (format!("{prefix}{i}"), json!(v))).collect();
    Value::Object(map)
}

proptest! {
    #[test]
    fn merge_is_associative_for_disjoint_keys(
        a in prop::collection::vec(any::<i64>(), 0..6),
        b in prop::collection::vec(any::<i64>(), 0..6),
        c in prop::collection::vec(any::<i64>(), 0..6),
    ) {
        let (a, b, c) = (object("a", &a), object("b", &b), object("c", &c));

        let left = merged(merged(a.clone(), &b), &c);
        let right = merged(a, &merged(b, &c));

        prop_assert_eq!(left, right);
    }

    #[test]
    fn double_underscore_nests_and_single_underscore_camel_cases(
        outer in "[A-Z]{1,8}",
        head in "[A-Z]{1,8}",
        tail in "[A-Z]{1,8}",
        value in "[a-z0-9]{0,12}",
    ) {
        let name = format!("{outer}__{head}_{tail}");
        let tree = env_to_tree([(name.as_str(), value.as_str())]);

        let mut inner_key = head.to_lowercase();
        let mut tail_chars = tail.to_lowercase().chars().collect::<Vec<_>>();
        tail_chars[0] = tail_chars[0].to_ascii_uppercase();
        inner_key.extend(tail_chars);

        prop_assert_eq!(tree, json!({ outer.to_lowercase(): { inner_key: value } }));
    }
}
