use elpian_core::error::{ElpianErrorExt, ErrorKind};
use elpian_core::{CompileOptions, Script, compile_program, compile_source_to_ir};
use serde_json::{Value, json};

fn lower_one(src: &str) -> Value {
    let script = Script::from_source("tags.elpian", src);
    let program = compile_program(&script, &CompileOptions::default()).expect("lowering failed");
    assert_eq!(program.len(), 1);
    serde_json::to_value(&program[0]).expect("serialize IR")
}

fn string(s: &str) -> Value {
    json!({"type": "string", "data": {"value": s}})
}

fn text(s: &str) -> Value {
    json!({"type": "object", "data": {"value": {"type": string("text"), "data": string(s)}}})
}

fn container() -> Value {
    json!({"type": "object", "data": {"value": {"type": string("container")}}})
}

#[test]
fn element_with_attribute_and_text() {
    let ir = lower_one(r#"<div foo="bar">hello</div>;"#);
    assert_eq!(ir["type"], json!("object"));
    let value = &ir["data"]["value"];
    assert_eq!(value["type"], string("div"));
    assert_eq!(value["foo"], string("bar"));
    assert_eq!(value["children"], json!({"type": "array", "data": {"value": [text("hello")]}}));
    assert_eq!(value["child"], text("hello"));
}

#[test]
fn object_keys_are_type_child_children_then_attributes() {
    let script = Script::from_source("tags.elpian", r#"<div foo="bar" gap={2}>hello</div>;"#);
    let json = compile_source_to_ir(&script, &CompileOptions::default()).expect("compile");
    let order: Vec<usize> = ["\"type\":{\"type\":\"string\",\"data\":{\"value\":\"div\"}}", "\"child\"", "\"children\"", "\"foo\"", "\"gap\""]
        .iter()
        .map(|key| json.find(key).unwrap_or_else(|| panic!("{} missing in {}", key, json)))
        .collect();
    assert!(order.windows(2).all(|w| w[0] < w[1]), "{}", json);
}

#[test]
fn two_children_select_the_second() {
    let ir = lower_one("<row>{first}{second}</row>;");
    let value = &ir["data"]["value"];
    assert_eq!(value["child"], json!({"type": "identifier", "data": {"name": "second"}}));
    assert_eq!(value["children"]["data"]["value"].as_array().map(Vec::len), Some(2));
}

#[test]
fn formatted_single_child_skips_leading_whitespace() {
    let src = "<column>\n    <label text=\"hi\"/>\n</column>;";
    let ir = lower_one(src);
    let value = &ir["data"]["value"];
    let children = value["children"]["data"]["value"].as_array().expect("children array");
    assert_eq!(children.len(), 3);
    // Whitespace-only text survives as an empty text node.
    assert_eq!(children[0], text(""));
    assert_eq!(children[2], text(""));
    assert_eq!(value["child"]["data"]["value"]["type"], string("label"));
    assert_eq!(value["child"], children[1]);
}

#[test]
fn many_children_keep_container_placeholder() {
    let ir = lower_one("<list>{a}{b}{c}{d}</list>;");
    let value = &ir["data"]["value"];
    assert_eq!(value["child"], container());
    assert_eq!(value["children"]["data"]["value"].as_array().map(Vec::len), Some(4));
}

#[test]
fn self_closing_element_has_placeholder_and_no_children() {
    let ir = lower_one("<spacer/>;");
    assert_eq!(
        ir,
        json!({"type": "object", "data": {"value": {
            "type": string("spacer"),
            "child": container(),
            "children": {"type": "array", "data": {"value": []}}
        }}})
    );
}

#[test]
fn attribute_values() {
    let ir = lower_one(r#"<button disabled size={12} label='Ok' icon=<star/> onPress={() => save()}/>;"#);
    let value = &ir["data"]["value"];
    assert_eq!(value["disabled"], json!({"type": "bool", "data": {"value": true}}));
    assert_eq!(value["size"], json!({"type": "i64", "data": {"value": 12}}));
    assert_eq!(value["label"], string("Ok"));
    assert_eq!(value["icon"]["data"]["value"]["type"], string("star"));
    assert_eq!(value["onPress"]["type"], json!("callback"));
}

#[test]
fn attribute_strings_keep_backslashes() {
    let ir = lower_one(r#"<file path="C:\new\tab" hint='a\u0041'/>;"#);
    let value = &ir["data"]["value"];
    assert_eq!(value["path"], string(r"C:\new\tab"));
    assert_eq!(value["hint"], string(r"a\u0041"));
}

#[test]
fn attribute_named_like_seeded_key_overwrites_it() {
    let ir = lower_one(r#"<box type="panel"/>;"#);
    assert_eq!(ir["data"]["value"]["type"], string("panel"));
}

#[test]
fn nested_elements_and_expressions() {
    let ir = lower_one("x = <page title={name}><header>Top</header>{body}</page>;");
    let page = &ir["data"]["rightSide"]["data"]["value"];
    assert_eq!(page["title"], json!({"type": "identifier", "data": {"name": "name"}}));
    let children = page["children"]["data"]["value"].as_array().expect("children");
    assert_eq!(children.len(), 2);
    assert_eq!(children[0]["data"]["value"]["child"], text("Top"));
    assert_eq!(page["child"], json!({"type": "identifier", "data": {"name": "body"}}));
}

#[test]
fn tag_as_call_argument() {
    let ir = lower_one(r#"render(<text>Hi there</text>);"#);
    assert_eq!(ir["type"], json!("functionCall"));
    assert_eq!(ir["data"]["args"][0]["data"]["value"]["child"], text("Hi there"));
}

#[test]
fn unsupported_expression_inside_tag_fails() {
    let script = Script::from_source("tags.elpian", "<p>{ok ? a : b}</p>;");
    let err = compile_program(&script, &CompileOptions::default()).expect_err("should fail");
    assert_eq!(err.kind(), ErrorKind::UnsupportedConstruct);
}
