use std::collections::HashMap;
use std::rc::Rc;

use loom_template::escape::StringSink;
use loom_template::{ContentView, Kind, Model, Value};

fn printed(value: &Value) -> String {
    let mut sink = StringSink::new();
    value.print(&mut sink, None).unwrap();
    sink.finish().unwrap()
}

#[test]
fn integers_become_atoms() {
    let v = 42i32.to_value();
    assert_eq!(v.kind(), Kind::Atom);
    assert_eq!(printed(&v), "42");
    assert!(v.is_truthy());

    let v = 0u8.to_value();
    assert!(v.is_truthy(), "numeric zero is still an atom, not falsy like an empty list");
}

#[test]
fn floats_become_atoms() {
    let v = 2.5f64.to_value();
    assert_eq!(printed(&v), "2.5");
}

#[test]
fn bools_round_trip() {
    assert!(true.to_value().is_truthy());
    assert!(!false.to_value().is_truthy());
}

#[test]
fn strings_are_truthy_unless_empty() {
    assert!("hi".to_value().is_truthy());
    assert!(!"".to_value().is_truthy());
}

#[test]
fn option_none_is_null() {
    let v: Option<i32> = None;
    assert_eq!(v.to_value().kind(), Kind::Null);
    let v: Option<i32> = Some(3);
    assert_eq!(v.to_value().kind(), Kind::Atom);
}

#[test]
fn vec_becomes_list_truthy_only_when_nonempty() {
    let empty: Vec<i32> = vec![];
    assert!(!empty.to_value().is_truthy());
    let full = vec![1, 2, 3];
    let v = full.to_value();
    assert!(v.is_truthy());
    assert_eq!(v.as_list().unwrap().len(), 3);
}

#[test]
fn hashmap_becomes_object_and_supports_get() {
    let mut map = HashMap::new();
    map.insert("a", 1i32);
    let v = map.to_value();
    assert_eq!(v.kind(), Kind::Object);
    assert!(v.is_truthy(), "an object is truthy even when empty");
    assert_eq!(printed(&v.get("a").unwrap()), "1");
    assert!(v.get("missing").is_none());
}

#[test]
fn empty_object_is_still_truthy() {
    assert!(Value::empty_object().is_truthy());
}

#[test]
fn tuple_becomes_positional_object() {
    let v = (1i32, "two").to_value();
    assert_eq!(printed(&v.get("0").unwrap()), "1");
    assert_eq!(printed(&v.get("1").unwrap()), "two");
}

#[test]
fn value_clone_is_cheap_and_identity() {
    let v = vec![1, 2, 3].to_value();
    let cloned = v.clone();
    assert_eq!(cloned.as_list().unwrap().len(), v.as_list().unwrap().len());
}

#[test]
fn serde_json_bridges_every_shape() {
    let json: serde_json::Value = serde_json::from_str(
        r#"{"name": "Ada", "tags": ["x", "y"], "count": 2, "active": true, "note": null}"#,
    )
    .unwrap();
    let v = json.to_value();
    assert_eq!(v.kind(), Kind::Object);
    assert_eq!(printed(&v.get("name").unwrap()), "Ada");
    assert_eq!(v.get("tags").unwrap().as_list().unwrap().len(), 2);
    assert_eq!(printed(&v.get("count").unwrap()), "2");
    assert!(v.get("active").unwrap().is_truthy());
    assert_eq!(v.get("note").unwrap().kind(), Kind::Null);
}

#[test]
fn lazy_value_is_kind_lazy_value_and_always_truthy_and_prints_empty() {
    let v = Value::Lazy(Rc::new(|_: Option<ContentView<'_>>| Value::Str(Rc::from("x"))));
    assert_eq!(v.kind(), Kind::LazyValue);
    assert!(v.is_truthy());
    // print() never unwraps laziness; only the renderer's emit_value/render_resolved do.
    assert_eq!(printed(&v), "");
}

#[test]
fn lazy_format_is_kind_lazy_format_and_always_truthy_and_prints_empty() {
    let v = Value::LazyFormat(Rc::new(|_: Option<ContentView<'_>>| {
        loom_template::Format::compile("x").unwrap()
    }));
    assert_eq!(v.kind(), Kind::LazyFormat);
    assert!(v.is_truthy());
    assert_eq!(printed(&v), "");
}

#[test]
fn serde_json_preserves_key_order() {
    let json: serde_json::Value = serde_json::from_str(r#"{"z": 1, "a": 2, "m": 3}"#).unwrap();
    let v = json.to_value();
    let keys: Vec<&str> = v.as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["z", "a", "m"]);
}
