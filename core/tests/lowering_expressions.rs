use elpian_core::error::{ElpianErrorExt, ErrorKind};
use elpian_core::{CompileOptions, Script, compile_program};
use serde_json::{Value, json};

fn lower(src: &str) -> Value {
    let script = Script::from_source("expr.elpian", src);
    let program = compile_program(&script, &CompileOptions::default()).expect("lowering failed");
    serde_json::to_value(&program).expect("serialize IR")
}

fn lower_err(src: &str) -> Box<dyn ElpianErrorExt> {
    let script = Script::from_source("expr.elpian", src);
    compile_program(&script, &CompileOptions::default()).expect_err("lowering should fail")
}

fn ident(name: &str) -> Value {
    json!({"type": "identifier", "data": {"name": name}})
}

fn i64v(n: i64) -> Value {
    json!({"type": "i64", "data": {"value": n}})
}

fn string(s: &str) -> Value {
    json!({"type": "string", "data": {"value": s}})
}

#[test]
fn integer_literals_lower_to_i64() {
    for n in [0i64, 1, 7, 42, 65535, 9_007_199_254_740_991] {
        let ir = lower(&format!("x = {};", n));
        assert_eq!(ir[0]["data"]["rightSide"], i64v(n), "literal {}", n);
    }
}

#[test]
fn fractional_literals_truncate_toward_zero() {
    assert_eq!(lower("x = 3.9;")[0]["data"]["rightSide"], i64v(3));
    assert_eq!(lower("x = .5;")[0]["data"]["rightSide"], i64v(0));
}

#[test]
fn huge_literals_fall_back_to_f64() {
    let ir = lower("x = 1e30;");
    assert_eq!(ir[0]["data"]["rightSide"], json!({"type": "f64", "data": {"value": 1e30}}));
}

#[test]
fn infinite_literals_are_rejected() {
    for src in ["x = 1e999;", "x = {k: 1e400};"] {
        let err = lower_err(src);
        assert_eq!(err.kind(), ErrorKind::Syntax, "source {}", src);
        assert!(err.message().contains("out of range"), "source {}: {}", src, err.message());
    }
}

#[test]
fn hex_literals_wider_than_64_bits() {
    let ir = lower("x = 0x10000000000000000;");
    assert_eq!(ir[0]["data"]["rightSide"], json!({"type": "f64", "data": {"value": 18446744073709551616.0}}));
}

#[test]
fn surrogate_pair_escapes_combine() {
    let ir = lower(r#"x = '\uD83D\uDE00';"#);
    assert_eq!(ir[0]["data"]["rightSide"], string("\u{1F600}"));

    let err = lower_err(r#"x = '\uD83D';"#);
    assert_eq!(err.kind(), ErrorKind::Syntax);
}

#[test]
fn strings_and_booleans() {
    let ir = lower(r#"a = "hi"; b = 'there'; c = true; d = false;"#);
    assert_eq!(ir[0]["data"]["rightSide"], string("hi"));
    assert_eq!(ir[1]["data"]["rightSide"], string("there"));
    assert_eq!(ir[2]["data"]["rightSide"], json!({"type": "bool", "data": {"value": true}}));
    assert_eq!(ir[3]["data"]["rightSide"], json!({"type": "bool", "data": {"value": false}}));
}

#[test]
fn template_literal_keeps_only_leading_text() {
    let ir = lower("x = `hello ${name}!`;");
    assert_eq!(ir[0]["data"]["rightSide"], string("hello "));

    let ir = lower("x = `plain`;");
    assert_eq!(ir[0]["data"]["rightSide"], string("plain"));
}

#[test]
fn member_access_dispatches_on_property_kind() {
    let ir = lower(r#"a.b; a[0]; a["k"]; a[key];"#);
    assert_eq!(ir[0], json!({"type": "indexer", "data": {"target": ident("a"), "index": string("b")}}));
    assert_eq!(ir[1], json!({"type": "indexer", "data": {"target": ident("a"), "index": i64v(0)}}));
    assert_eq!(ir[2], json!({"type": "indexer", "data": {"target": ident("a"), "index": string("k")}}));
    // A computed identifier key indexes by its name, not its value.
    assert_eq!(ir[3], json!({"type": "indexer", "data": {"target": ident("a"), "index": string("key")}}));
}

#[test]
fn computed_member_with_expression_key_is_unsupported() {
    let err = lower_err("a[i + 1];");
    assert_eq!(err.kind(), ErrorKind::UnsupportedConstruct);
}

#[test]
fn calls_lower_to_function_call() {
    let ir = lower(r#"print("hi", 1); ui.render();"#);
    assert_eq!(
        ir[0],
        json!({"type": "functionCall", "data": {"callee": ident("print"), "args": [string("hi"), i64v(1)]}})
    );
    assert_eq!(
        ir[1],
        json!({"type": "functionCall", "data": {
            "callee": {"type": "indexer", "data": {"target": ident("ui"), "index": string("render")}},
            "args": []
        }})
    );
}

#[test]
fn cast_call_lowers_to_cast_node() {
    let ir = lower(r#"cast(x, "i64");"#);
    assert_eq!(ir, json!([{"type": "cast", "data": {"value": ident("x"), "targetType": "i64"}}]));
}

#[test]
fn malformed_cast_is_unsupported() {
    for src in ["cast(x);", "cast(x, y);", r#"cast(x, "i64", 1);"#] {
        let err = lower_err(src);
        assert_eq!(err.kind(), ErrorKind::UnsupportedConstruct, "source {}", src);
    }
}

#[test]
fn assignment_and_compound_assignment() {
    let ir = lower("x = 1; x += 2; obj.count *= 3;");
    assert_eq!(ir[0], json!({"type": "assignment", "data": {"leftSide": ident("x"), "rightSide": i64v(1)}}));
    assert_eq!(
        ir[1],
        json!({"type": "assignment", "data": {
            "leftSide": ident("x"),
            "rightSide": {"type": "arithmetic", "data": {"operand1": ident("x"), "operand2": i64v(2), "operation": "+"}}
        }})
    );
    let target = json!({"type": "indexer", "data": {"target": ident("obj"), "index": string("count")}});
    assert_eq!(ir[2]["data"]["leftSide"], target);
    assert_eq!(ir[2]["data"]["rightSide"]["data"]["operand1"], target);
    assert_eq!(ir[2]["data"]["rightSide"]["data"]["operation"], json!("*"));
}

#[test]
fn binary_operators_lower_to_arithmetic() {
    let ir = lower("a + b * c; a === b; a <= 2; a % 2 != 0;");
    assert_eq!(
        ir[0],
        json!({"type": "arithmetic", "data": {
            "operand1": ident("a"),
            "operand2": {"type": "arithmetic", "data": {"operand1": ident("b"), "operand2": ident("c"), "operation": "*"}},
            "operation": "+"
        }})
    );
    assert_eq!(ir[1]["data"]["operation"], json!("==="));
    assert_eq!(ir[2]["data"]["operation"], json!("<="));
    assert_eq!(ir[3]["data"]["operation"], json!("!="));
    assert_eq!(ir[3]["data"]["operand1"]["data"]["operation"], json!("%"));
}

#[test]
fn array_and_object_literals() {
    let ir = lower(r#"x = [1, "two", [3]]; y = {a: 1, "b": 2, 3: true, c};"#);
    assert_eq!(
        ir[0]["data"]["rightSide"],
        json!({"type": "array", "data": {"value": [i64v(1), string("two"), {"type": "array", "data": {"value": [i64v(3)]}}]}})
    );
    assert_eq!(
        ir[1]["data"]["rightSide"],
        json!({"type": "object", "data": {"value": {
            "a": i64v(1),
            "b": i64v(2),
            "3": {"type": "bool", "data": {"value": true}},
            "c": ident("c")
        }}})
    );
}

#[test]
fn numeric_keys_render_like_javascript() {
    let ir = lower("x = {100000000000000000000: 1, 1e21: 2, 1.5: 3, 0.0000001: 4, 0x10: 5};");
    let object = ir[0]["data"]["rightSide"]["data"]["value"].as_object().expect("object value");
    for (key, n) in [("100000000000000000000", 1), ("1e+21", 2), ("1.5", 3), ("1e-7", 4), ("16", 5)] {
        assert_eq!(object.get(key), Some(&i64v(n)), "key {} in {:?}", key, object.keys().collect::<Vec<_>>());
    }
    assert_eq!(object.len(), 5);
}

#[test]
fn object_keys_keep_source_order() {
    let script = Script::from_source("order.elpian", "x = {zeta: 1, alpha: 2, mid: 3};");
    let json = elpian_core::compile_source_to_ir(&script, &CompileOptions::default()).expect("compile");
    let zeta = json.find("\"zeta\"").expect("zeta");
    let alpha = json.find("\"alpha\"").expect("alpha");
    let mid = json.find("\"mid\"").expect("mid");
    assert!(zeta < alpha && alpha < mid, "{}", json);
}

#[test]
fn arrow_functions_lower_to_callbacks() {
    let ir = lower("const inc = (a) => a + 1; const run = () => { work(); return; }; const id = v => v;");
    assert_eq!(
        ir[0]["data"]["rightSide"],
        json!({"type": "callback", "data": {
            "params": ["a"],
            "body": [{"type": "returnOperation", "data": {"value": {
                "type": "arithmetic", "data": {"operand1": ident("a"), "operand2": i64v(1), "operation": "+"}
            }}}]
        }})
    );
    assert_eq!(
        ir[1]["data"]["rightSide"],
        json!({"type": "callback", "data": {
            "params": [],
            "body": [
                {"type": "functionCall", "data": {"callee": ident("work"), "args": []}},
                {"type": "returnOperation", "data": {}}
            ]
        }})
    );
    assert_eq!(ir[2]["data"]["rightSide"]["data"]["params"], json!(["v"]));
}

#[test]
fn unsupported_expressions_fail_explicitly() {
    let cases = [
        ("a ? b : c;", "ConditionalExpression"),
        ("a && b;", "LogicalExpression"),
        ("!a;", "UnaryExpression"),
        ("-1;", "UnaryExpression"),
        ("i++;", "UpdateExpression"),
        ("x = null;", "Literal"),
    ];
    for (src, construct) in cases {
        let err = lower_err(src);
        assert_eq!(err.kind(), ErrorKind::UnsupportedConstruct, "source {}", src);
        assert!(err.message().contains(construct), "source {}: {}", src, err.message());
        assert!(err.location().is_some(), "source {} has no location", src);
    }
}
