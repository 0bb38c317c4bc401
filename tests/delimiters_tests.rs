use std::collections::HashMap;

use loom_template::{to_string, Format, Model, Value};

#[test]
fn set_delim_switches_tag_syntax() {
    let format = Format::compile("{{=<% %>=}}<%greeting%>, {{literal}}!").unwrap();
    let mut data = HashMap::new();
    data.insert("greeting", "Hi");
    assert_eq!(to_string(&format, &data).unwrap(), "Hi, {{literal}}!");
}

#[test]
fn set_delim_can_switch_back() {
    let format = Format::compile("{{=<% %>=}}<%a%><%={{ }}=%>{{b}}").unwrap();
    let mut data = HashMap::new();
    data.insert("a", "1");
    data.insert("b", "2");
    assert_eq!(to_string(&format, &data).unwrap(), "12");
}

#[test]
fn set_delim_inside_a_section_is_not_undone_when_the_section_closes() {
    // `{{=...=}}` rewrites the parser's delimiter state for the rest of the
    // document, not just the section it happens to sit in; the section's own
    // close tag, and everything after it, is scanned with the new delimiters.
    let format = Format::compile("{{#s}}{{=<% %>=}}<%x%><%/s%>{{y}}").unwrap();
    let mut data: HashMap<&str, Value> = HashMap::new();
    data.insert("s", true.to_value());
    data.insert("x", "X".to_value());
    assert_eq!(to_string(&format, &data).unwrap(), "X{{y}}");
}
