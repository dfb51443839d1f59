//! Parser to ESTree Integration Tests
//!
//! Tests the integration between the grammar engine and the serializer over
//! a corpus of scripts and modules. Verifies structural properties of the
//! serialized trees rather than individual node shapes.

use integration_tests::{for_each_node, range, MODULE_CORPUS, SCRIPT_CORPUS};
use parser::{estree, parse_program, ParseOptions, SerializeOptions};
use serde_json::Value;

fn corpus() -> impl Iterator<Item = (&'static str, ParseOptions)> {
    let scripts = SCRIPT_CORPUS
        .iter()
        .map(|source| (*source, ParseOptions::default()));
    let modules = MODULE_CORPUS
        .iter()
        .map(|source| (*source, ParseOptions::module()));
    scripts.chain(modules)
}

fn serialize(source: &str, options: &ParseOptions, serialize_options: &SerializeOptions) -> String {
    let program = parse_program(source, options)
        .unwrap_or_else(|e| panic!("failed to parse {:?}: {}", source, e));
    estree::serialize_with(&program, serialize_options)
}

fn tree(source: &str, options: &ParseOptions) -> Value {
    serde_json::from_str(&serialize(source, options, &SerializeOptions::default()))
        .expect("serializer output is valid JSON")
}

/// Test: Every node range lies inside its parent's range
#[test]
fn test_ranges_nest_inside_parents() {
    for (source, options) in corpus() {
        let root = tree(source, &options);
        for_each_node(&root, |node, parent| {
            let (start, end) = range(node).expect("node has a range");
            assert!(start <= end, "inverted range in {:?}: {}", source, node);
            if let Some(parent) = parent {
                let (parent_start, parent_end) = range(parent).expect("parent has a range");
                assert!(
                    parent_start <= start && end <= parent_end,
                    "{} [{}, {}) escapes {} [{}, {}) in {:?}",
                    node["type"],
                    start,
                    end,
                    parent["type"],
                    parent_start,
                    parent_end,
                    source
                );
            }
        });
    }
}

/// Test: Sibling nodes in sequences appear in source order without overlap
#[test]
fn test_sequences_preserve_source_order() {
    for (source, options) in corpus() {
        let root = tree(source, &options);
        for_each_node(&root, |node, _| {
            let Some(object) = node.as_object() else {
                return;
            };
            for value in object.values() {
                let Some(items) = value.as_array() else {
                    continue;
                };
                let mut previous_end = 0;
                for item in items.iter().filter_map(range) {
                    assert!(
                        previous_end <= item.0,
                        "overlapping siblings under {} in {:?}",
                        node["type"],
                        source
                    );
                    previous_end = item.1;
                }
            }
        });
    }
}

/// Test: The program covers the whole source
#[test]
fn test_program_spans_entire_source() {
    for (source, options) in corpus() {
        let root = tree(source, &options);
        let expected = source.encode_utf16().count() as u64;
        assert_eq!(range(&root), Some((0, expected)), "{:?}", source);
    }
}

/// Test: Serializing twice and parsing twice give identical output
#[test]
fn test_serialization_is_deterministic() {
    let options = SerializeOptions {
        locations: true,
        preserve_parens: true,
    };
    for (source, parse_options) in corpus() {
        let program = parse_program(source, &parse_options).expect("corpus parses");
        let first = estree::serialize_with(&program, &options);
        assert_eq!(first, estree::serialize_with(&program, &options));
        assert_eq!(first, serialize(source, &parse_options, &options));
    }
}

/// Test: Locations agree with offsets on single-line sources
#[test]
fn test_locations_match_offsets() {
    let options = SerializeOptions {
        locations: true,
        ..SerializeOptions::default()
    };
    let source = "const total = items.reduce((sum, item) => sum + item.price, 0);";
    let root: Value =
        serde_json::from_str(&serialize(source, &ParseOptions::default(), &options)).expect("valid JSON");
    for_each_node(&root, |node, _| {
        let (start, end) = range(node).expect("node has a range");
        assert_eq!(node["loc"]["start"]["line"], 1);
        assert_eq!(node["loc"]["start"]["column"].as_u64(), Some(start));
        assert_eq!(node["loc"]["end"]["column"].as_u64(), Some(end));
    });
}

/// Test: Offsets are counted in UTF-16 code units
#[test]
fn test_offsets_count_utf16_units() {
    let root = tree("'\u{1F600}'; x", &ParseOptions::default());
    let body = &root["body"];
    assert_eq!(range(&body[0]), Some((0, 5)));
    assert_eq!(range(&body[1]), Some((6, 7)));
    assert_eq!(body[0]["expression"]["value"], "\u{1F600}");
}

/// Test: Scripts in the corpus are rejected as modules only for module-only reasons
#[test]
fn test_module_corpus_requires_module_goal() {
    for source in MODULE_CORPUS {
        assert!(
            parse_program(source, &ParseOptions::default()).is_err(),
            "{:?} should need sourceType module",
            source
        );
    }
}
