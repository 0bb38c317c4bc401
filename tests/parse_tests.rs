use loom_template::{ErrorCode, Format};

#[test]
fn compiles_plain_text() {
    let format = Format::compile("just text, no tags").unwrap();
    assert!(!format.is_empty());
}

#[test]
fn empty_template_is_empty() {
    let format = Format::compile("").unwrap();
    assert!(format.is_empty());
}

#[test]
fn unclosed_tag_is_delim_error() {
    let err = Format::compile("hello {{name").unwrap_err();
    assert_eq!(err.code, ErrorCode::Delim);
    assert_eq!(err.position, 6);
}

#[test]
fn mismatched_section_close_is_section_error() {
    let err = Format::compile("{{#a}}x{{/b}}").unwrap_err();
    assert_eq!(err.code, ErrorCode::Section);
    assert_eq!(err.position, 7);
}

#[test]
fn unclosed_section_is_section_error_at_opener() {
    let err = Format::compile("{{#a}}x").unwrap_err();
    assert_eq!(err.code, ErrorCode::Section);
    assert_eq!(err.position, 0);
}

#[test]
fn empty_variable_key_is_badkey_error() {
    let err = Format::compile("{{}}").unwrap_err();
    assert_eq!(err.code, ErrorCode::BadKey);
}

#[test]
fn set_delim_needs_exactly_two_tokens() {
    let err = Format::compile("{{=<%=}}").unwrap_err();
    assert_eq!(err.code, ErrorCode::BadDelim);

    let err = Format::compile("{{=<% %> extra=}}").unwrap_err();
    assert_eq!(err.code, ErrorCode::BadDelim);
}

#[test]
fn unclosed_set_delim_is_set_delim_error() {
    let err = Format::compile("{{=<% %>").unwrap_err();
    assert_eq!(err.code, ErrorCode::SetDelim);
}

#[test]
fn raw_variable_braces_and_ampersand_both_parse() {
    Format::compile("{{{x}}}").unwrap();
    Format::compile("{{&x}}").unwrap();
}

#[test]
fn section_alias_key_is_lookup_key() {
    // "{{#name:alias}}" should compile; render_tests exercises the lookup semantics.
    Format::compile("{{#list:s}}({{.}}){{/list}}").unwrap();
}

#[test]
fn comment_tag_parses() {
    let format = Format::compile("before{{! a comment }}after").unwrap();
    assert!(!format.is_empty());
}
