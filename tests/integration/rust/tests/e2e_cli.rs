//! End-to-End CLI Integration Tests
//!
//! Tests the complete pipeline through the estree_cli API: argument parsing,
//! option mapping, parsing and serialization. This is the highest level
//! integration test - arguments and source text to final JSON.

use clap::Parser as ClapParser;
use estree_cli::{Cli, CliError, ErrorFormat, Runner};
use parser::{parse_to_json, ParseOptions, SerializeOptions};
use serde_json::Value;

fn run(args: &[&str], source: &str) -> Result<String, CliError> {
    let cli = Cli::try_parse_from(args).expect("arguments parse");
    let runner = Runner::new(cli.parse_options()?).with_serialize_options(cli.serialize_options());
    runner.run_source(source)
}

/// Test: Default invocation matches the library output
#[test]
fn test_e2e_default_matches_library() {
    let source = "const f = (a, b) => a ?? b;";
    let json = run(&["estree"], source).expect("parses");
    let expected = parse_to_json(source, &ParseOptions::default(), &SerializeOptions::default())
        .expect("parses");

    assert_eq!(json, expected);
}

/// Test: Module flag enables import/export
#[test]
fn test_e2e_module_flag() {
    let source = "import x from 'y'; export { x };";

    assert!(matches!(run(&["estree"], source), Err(CliError::Parse(_))));

    let program: Value =
        serde_json::from_str(&run(&["estree", "--source-type", "module"], source).expect("parses"))
            .expect("valid JSON");
    assert_eq!(program["sourceType"], "module");
    assert_eq!(program["body"][1]["type"], "ExportNamedDeclaration");
}

/// Test: Edition flag gates newer syntax
#[test]
fn test_e2e_ecma_version_gating() {
    assert!(run(&["estree"], "a?.b").is_ok());
    assert!(run(&["estree", "--ecma-version", "2019"], "a?.b").is_err());
    assert!(run(&["estree", "--ecma-version", "2016"], "2 ** 3").is_ok());
    assert!(run(&["estree", "--ecma-version", "6"], "2 ** 3").is_err());
    assert!(run(&["estree"], "a ||= b").is_err());
    assert!(run(&["estree", "--ecma-version", "2021"], "a ||= b").is_ok());
}

/// Test: Permissive flags
#[test]
fn test_e2e_permissive_flags() {
    assert!(run(&["estree"], "return 1").is_err());
    assert!(run(&["estree", "--allow-return-outside-function"], "return 1").is_ok());

    assert!(run(&["estree"], "await x").is_err());
    let program: Value = serde_json::from_str(
        &run(&["estree", "--allow-await-outside-function"], "await x").expect("parses"),
    )
    .expect("valid JSON");
    assert_eq!(program["body"][0]["expression"]["type"], "AwaitExpression");
}

/// Test: Output flags
#[test]
fn test_e2e_output_flags() {
    let program: Value = serde_json::from_str(
        &run(&["estree", "--locations", "--preserve-parens"], "((1))").expect("parses"),
    )
    .expect("valid JSON");
    let outer = &program["body"][0]["expression"];

    assert_eq!(outer["type"], "ParenthesizedExpression");
    assert_eq!(outer["expression"]["type"], "ParenthesizedExpression");
    assert_eq!(outer["expression"]["expression"]["raw"], "1");
    assert_eq!(outer["loc"]["end"]["column"], 5);
}

/// Test: Syntax error diagnostics in both formats
#[test]
fn test_e2e_error_reporting() {
    let err = run(&["estree"], "let = ;").unwrap_err();
    let text = err.render(ErrorFormat::Text);
    assert!(text.starts_with("SyntaxError: "), "{}", text);
    assert!(text.ends_with(")"), "{}", text);

    let json: Value = serde_json::from_str(&err.render(ErrorFormat::Json)).expect("valid JSON");
    assert_eq!(json["kind"], "SyntaxError");
    assert!(json["offset"].as_u64().is_some());
}

/// Test: Invalid option values surface as InvalidOption
#[test]
fn test_e2e_invalid_option() {
    let err = run(&["estree", "--ecma-version", "2030"], "x").unwrap_err();

    assert!(matches!(err, CliError::InvalidOption(_)));
    assert!(err.to_string().starts_with("Invalid option: "));
}
