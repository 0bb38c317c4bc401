use std::collections::HashMap;
use std::rc::Rc;

use loom_template::{
    render_ex, to_string, ContentView, Format, HtmlEscape, MapContext, NoContext, NoEscape, NoUnresolved, Value,
};

#[test]
fn escaped_variable_escapes_html() {
    let format = Format::compile("{{a}}").unwrap();
    let mut data = HashMap::new();
    data.insert("a", "<b>&'\"");
    let mut out = Vec::new();
    render_ex(&mut out, &format, &data, &NoContext, &HtmlEscape, &NoUnresolved).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "&lt;b&gt;&amp;&#39;&quot;");
}

#[test]
fn raw_variable_bypasses_escaping() {
    let format = Format::compile("{{{a}}}|{{&a}}").unwrap();
    let mut data = HashMap::new();
    data.insert("a", "<b>");
    let mut out = Vec::new();
    render_ex(&mut out, &format, &data, &NoContext, &HtmlEscape, &NoUnresolved).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "<b>|<b>");
}

#[test]
fn missing_key_renders_empty() {
    let format = Format::compile("[{{missing}}]").unwrap();
    let data: HashMap<&str, &str> = HashMap::new();
    assert_eq!(to_string(&format, &data).unwrap(), "[]");
}

#[test]
fn section_over_list_iterates() {
    let format = Format::compile("{{#items}}({{.}}){{/items}}").unwrap();
    let mut data = HashMap::new();
    data.insert("items", vec![1, 2, 3]);
    assert_eq!(to_string(&format, &data).unwrap(), "(1)(2)(3)");
}

#[test]
fn section_over_empty_list_renders_nothing() {
    let format = Format::compile("{{#items}}x{{/items}}").unwrap();
    let mut data = HashMap::new();
    data.insert("items", Vec::<i32>::new());
    assert_eq!(to_string(&format, &data).unwrap(), "");
}

#[test]
fn section_over_falsy_atom_skips() {
    let format = Format::compile("{{#flag}}shown{{/flag}}").unwrap();
    let mut data = HashMap::new();
    data.insert("flag", false);
    assert_eq!(to_string(&format, &data).unwrap(), "");
}

#[test]
fn inverted_section_fires_on_falsy() {
    let format = Format::compile("{{^flag}}no flag{{/flag}}").unwrap();
    let mut data = HashMap::new();
    data.insert("flag", false);
    assert_eq!(to_string(&format, &data).unwrap(), "no flag");
}

#[test]
fn inverted_section_skips_on_truthy() {
    let format = Format::compile("{{^flag}}no flag{{/flag}}").unwrap();
    let mut data = HashMap::new();
    data.insert("flag", true);
    assert_eq!(to_string(&format, &data).unwrap(), "");
}

#[test]
fn filter_section_fires_on_truthy() {
    let format = Format::compile("{{?ok}}good{{/ok}}").unwrap();
    let mut data = HashMap::new();
    data.insert("ok", true);
    assert_eq!(to_string(&format, &data).unwrap(), "good");

    let format = Format::compile("{{?ok}}good{{/ok}}").unwrap();
    let mut data = HashMap::new();
    data.insert("ok", false);
    assert_eq!(to_string(&format, &data).unwrap(), "");
}

#[test]
fn loop_section_forces_iteration_over_single_object() {
    let format = Format::compile("{{*one}}({{n}}){{/one}}").unwrap();
    let mut inner = HashMap::new();
    inner.insert("n".to_string(), 7i32);
    let mut outer: HashMap<&str, Value> = HashMap::new();
    outer.insert("one", loom_template::Model::to_value(&inner));
    assert_eq!(to_string(&format, &outer).unwrap(), "(7)");
}

#[test]
fn loop_section_over_list_iterates_each_element() {
    let format = Format::compile("{{*xs}}{{.}},{{/xs}}").unwrap();
    let mut data = HashMap::new();
    data.insert("xs", vec![1, 2, 3]);
    assert_eq!(to_string(&format, &data).unwrap(), "1,2,3,");
}

#[test]
fn dotted_key_resolves_nested_object() {
    let format = Format::compile("{{user.name}}").unwrap();
    let mut user = HashMap::new();
    user.insert("name", "Ada");
    let mut data: HashMap<&str, HashMap<&str, &str>> = HashMap::new();
    data.insert("user", user);
    assert_eq!(to_string(&format, &data).unwrap(), "Ada");
}

#[test]
fn format_spec_applies_to_numbers() {
    let format = Format::compile("{{amount:.2f}}").unwrap();
    let mut data = HashMap::new();
    data.insert("amount", 3.14159);
    assert_eq!(to_string(&format, &data).unwrap(), "3.14");
}

#[test]
fn partial_renders_through_context_with_indent() {
    let partial = Format::compile("a\nb\n").unwrap();
    let context = MapContext::new().with("greeting", partial);
    let format = Format::compile("  {{>greeting}}\n").unwrap();
    let data: HashMap<&str, &str> = HashMap::new();
    let mut out = Vec::new();
    render_ex(&mut out, &format, &data, &context, &NoEscape, &NoUnresolved).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "  a\n  b\n");
}

#[test]
fn lazy_value_resolves_as_a_plain_variable() {
    let format = Format::compile("{{greet}}").unwrap();
    let mut data: HashMap<&str, Value> = HashMap::new();
    data.insert("greet", Value::Lazy(Rc::new(|_: Option<ContentView<'_>>| Value::Str(Rc::from("hi")))));
    assert_eq!(to_string(&format, &data).unwrap(), "hi");
}

#[test]
fn lazy_value_section_sees_the_raw_body_via_content_view() {
    let format = Format::compile("{{#cond}}SHOW ME{{/cond}}").unwrap();
    let mut data: HashMap<&str, Value> = HashMap::new();
    data.insert(
        "cond",
        Value::Lazy(Rc::new(|view: Option<ContentView<'_>>| Value::Bool(view.unwrap().raw_text() == "SHOW ME"))),
    );
    assert_eq!(to_string(&format, &data).unwrap(), "SHOW ME");
}

#[test]
fn lazy_value_is_never_invoked_under_an_inverted_section() {
    let format = Format::compile("{{^cond}}fallback{{/cond}}").unwrap();
    let mut data: HashMap<&str, Value> = HashMap::new();
    data.insert(
        "cond",
        Value::Lazy(Rc::new(|_: Option<ContentView<'_>>| -> Value {
            panic!("a lazy value must never be invoked under tag inversion")
        })),
    );
    assert_eq!(to_string(&format, &data).unwrap(), "");
}

#[test]
fn lazy_format_renders_a_freshly_compiled_fragment_in_place() {
    let format = Format::compile("{{frag}}").unwrap();
    let mut data: HashMap<&str, Value> = HashMap::new();
    data.insert(
        "frag",
        Value::LazyFormat(Rc::new(|_: Option<ContentView<'_>>| Format::compile("<fragment>").unwrap())),
    );
    assert_eq!(to_string(&format, &data).unwrap(), "<fragment>");
}

#[test]
fn lazy_format_is_never_invoked_under_an_inverted_section() {
    let format = Format::compile("{{^frag}}fallback{{/frag}}").unwrap();
    let mut data: HashMap<&str, Value> = HashMap::new();
    data.insert(
        "frag",
        Value::LazyFormat(Rc::new(|_: Option<ContentView<'_>>| -> Format {
            panic!("a lazy format must never be invoked under tag inversion")
        })),
    );
    assert_eq!(to_string(&format, &data).unwrap(), "");
}

#[test]
fn missing_partial_renders_nothing() {
    let format = Format::compile("[{{>nope}}]").unwrap();
    let data: HashMap<&str, &str> = HashMap::new();
    let mut out = Vec::new();
    render_ex(&mut out, &format, &data, &NoContext, &NoEscape, &NoUnresolved).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "[]");
}
