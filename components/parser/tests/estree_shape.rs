//! ESTree output shape tests
//!
//! Checks node types and field layout of serialized programs against the
//! shapes downstream ESTree tools expect.

use parser::{parse_to_json, ParseOptions, SerializeOptions, SourceType};
use serde_json::Value;

fn estree(source: &str, source_type: SourceType) -> Value {
    let options = ParseOptions::default().with_source_type(source_type);
    let json = parse_to_json(source, &options, &SerializeOptions::default())
        .unwrap_or_else(|e| panic!("failed to parse {:?}: {}", source, e));
    serde_json::from_str(&json).expect("valid JSON")
}

fn script(source: &str) -> Value {
    estree(source, SourceType::Script)
}

fn first_expression(program: &Value) -> &Value {
    &program["body"][0]["expression"]
}

#[test]
fn test_program_shape() {
    let program = script("x;");
    assert_eq!(program["type"], "Program");
    assert_eq!(program["sourceType"], "script");
    assert_eq!(program["start"], 0);
    assert_eq!(program["end"], 2);
}

#[test]
fn test_optional_chain_shape() {
    let program = script("a?.b.c()");
    let chain = first_expression(&program);
    assert_eq!(chain["type"], "ChainExpression");
    let call = &chain["expression"];
    assert_eq!(call["type"], "CallExpression");
    assert_eq!(call["optional"], false);
    assert_eq!(call["callee"]["object"]["optional"], true);
    assert_eq!(call["callee"]["object"]["object"]["name"], "a");
}

#[test]
fn test_logical_and_assignment_shapes() {
    let program = script("a = b ?? c");
    assert_eq!(first_expression(&program)["right"]["operator"], "??");
    let program = script("x += y && z");
    let assignment = first_expression(&program);
    assert_eq!(assignment["type"], "AssignmentExpression");
    assert_eq!(assignment["operator"], "+=");
    assert_eq!(assignment["right"]["type"], "LogicalExpression");
    assert_eq!(assignment["right"]["operator"], "&&");
}

#[test]
fn test_destructuring_assignment_shape() {
    let program = script("[a, { b, c: d = 1 }, ...e] = f");
    let left = &first_expression(&program)["left"];
    assert_eq!(left["type"], "ArrayPattern");
    assert_eq!(left["elements"][1]["type"], "ObjectPattern");
    let property = &left["elements"][1]["properties"][1];
    assert_eq!(property["type"], "Property");
    assert_eq!(property["value"]["type"], "AssignmentPattern");
    assert_eq!(left["elements"][2]["type"], "RestElement");
}

#[test]
fn test_statement_shapes() {
    let program = script(
        "switch (x) { case 1: break; default: } try { f() } catch { } finally { } do ; while (0) for (var k in o) ;",
    );
    let switch = &program["body"][0];
    assert_eq!(switch["type"], "SwitchStatement");
    assert_eq!(switch["cases"][0]["test"]["value"], 1);
    assert_eq!(switch["cases"][1]["test"], Value::Null);

    let try_statement = &program["body"][1];
    assert_eq!(try_statement["handler"]["param"], Value::Null);
    assert_eq!(try_statement["finalizer"]["type"], "BlockStatement");

    assert_eq!(program["body"][2]["type"], "DoWhileStatement");
    assert_eq!(program["body"][3]["type"], "ForInStatement");
    assert_eq!(program["body"][3]["left"]["kind"], "var");
}

#[test]
fn test_for_await_shape() {
    let program = script("async function f() { for await (const x of y) ; }");
    let for_of = &program["body"][0]["body"]["body"][0];
    assert_eq!(for_of["type"], "ForOfStatement");
    assert_eq!(for_of["await"], true);
}

#[test]
fn test_class_shape() {
    let program = script("class A extends B { constructor() { super(); new.target; } }");
    let class = &program["body"][0];
    assert_eq!(class["type"], "ClassDeclaration");
    assert_eq!(class["superClass"]["name"], "B");
    let constructor = &class["body"]["body"][0];
    assert_eq!(constructor["kind"], "constructor");
    let body = &constructor["value"]["body"]["body"];
    assert_eq!(body[0]["expression"]["callee"]["type"], "Super");
    assert_eq!(body[1]["expression"]["type"], "MetaProperty");
    assert_eq!(body[1]["expression"]["meta"]["name"], "new");
}

#[test]
fn test_module_shapes() {
    let program = estree(
        "import d, * as ns from 'm'; export { d as e }; export default class {} export * as all from 'n'; import.meta;",
        SourceType::Module,
    );
    assert_eq!(program["sourceType"], "module");
    let import = &program["body"][0];
    assert_eq!(import["specifiers"][0]["type"], "ImportDefaultSpecifier");
    assert_eq!(import["specifiers"][1]["type"], "ImportNamespaceSpecifier");
    assert_eq!(import["source"]["value"], "m");

    let named = &program["body"][1];
    assert_eq!(named["declaration"], Value::Null);
    assert_eq!(named["source"], Value::Null);
    assert_eq!(named["specifiers"][0]["exported"]["name"], "e");

    let default = &program["body"][2];
    assert_eq!(default["declaration"]["type"], "ClassDeclaration");
    assert_eq!(default["declaration"]["id"], Value::Null);

    assert_eq!(program["body"][3]["exported"]["name"], "all");
    assert_eq!(program["body"][4]["expression"]["meta"]["name"], "import");
}

#[test]
fn test_template_shapes() {
    let program = script("tag`a\\u{41}${x}`");
    let tagged = first_expression(&program);
    assert_eq!(tagged["type"], "TaggedTemplateExpression");
    let quasis = &tagged["quasi"]["quasis"];
    assert_eq!(quasis[0]["value"]["raw"], "a\\u{41}");
    assert_eq!(quasis[0]["value"]["cooked"], "aA");
    assert_eq!(quasis[1]["tail"], true);

    let program = script("tag`\\unicode`");
    let quasis = &first_expression(&program)["quasi"]["quasis"];
    assert_eq!(quasis[0]["value"]["cooked"], Value::Null);
}

#[test]
fn test_directive_field() {
    let program = script("'use strict'; 'not first'; x");
    assert_eq!(program["body"][0]["directive"], "use strict");
    assert_eq!(program["body"][1]["directive"], "not first");
    assert!(program["body"][2].get("directive").is_none());
}
