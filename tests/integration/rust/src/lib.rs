//! Integration test suite for the ESTree parser
//!
//! This crate provides integration tests that verify the parser, the
//! serializer and the CLI work together across component boundaries.

use serde_json::Value;

/// Re-export components for test convenience
pub mod components {
    pub use core_types;
    pub use estree_cli;
    pub use parser;
}

/// Valid script sources covering the statement and expression grammar
pub const SCRIPT_CORPUS: &[&str] = &[
    "",
    "// only a comment\n",
    "a\nb",
    "1 + 2 * 3 ** 2 ** 1",
    "var x = a ? b : c, y = (d, e);",
    "label: for (let i = 0; i < 10; i++) { if (i % 2) continue label; else break; }",
    "for (const [k, v] of entries) ; for (var p in o) ; while (x) x--; do x++; while (x < 3)",
    "switch (v) { case 1: case 2: f(); break; default: g() }",
    "try { risky() } catch ({ message }) { log(message) } finally { done() }",
    "function outer(a, b) { 'use strict'; return function inner() { return a + b } }",
    "function defaults(a, b = a + 1, { c } = {}, ...rest) { return rest }",
    "async function load() { const [x, y] = await Promise.all([p, q]); for await (const c of s) use(c); }",
    "function* gen() { yield; yield 1; yield* other(); }",
    "const arrow = async ({ a, b: [c] = [] }, ...d) => ({ a, c, d });",
    "class A extends B { constructor(x) { super(x); } static of() { return new this() } get v() { return super.v } set v(n) {} *[Symbol.iterator]() {} }",
    "obj = { a, b: 1, [c]: 2, d() {}, get e() { return 1 }, set e(v) {}, async *f() {}, ...g, 'h': 3, 4: 5 };",
    "[a, , b = 2, ...c] = arr; ({ x, y: { z } } = o);",
    "tag`hello ${name}, you are ${age} years old`; `plain`;",
    "a?.b?.[c]?.(d); x ?? y; (p || q) ?? r;",
    "new Foo; new Foo.Bar(1)(2); function f() { new.target } typeof x; void 0; delete o[k];",
    "x = /re[/]gex/gi.test(s) / 2; y = a / b / c;",
    "if (a) b(); else if (c) d(); else { e() }",
    "let big = 123n + 0x1Fn; let nums = [0b101, 0o17, 017, .5, 1e3];",
    "a = b\n++c\nreturnValue\n(d)",
    "throw new Error(`bad ${thing}`)",
    "with (scope) { member }",
    "debugger;",
];

/// Valid module sources
pub const MODULE_CORPUS: &[&str] = &[
    "import d, { a as b, c } from 'm'; import * as ns from \"n\"; import 'side-effect';",
    "export const one = 1; export function two() {} export class Three {} export { one as uno };",
    "export default async function () { await import('lazy'); }",
    "export * from 'a'; export * as b from 'b'; export { default as c } from 'c';",
    "console.log(import.meta.url);",
];

/// Visit every node object in a serialized tree, parents before children
pub fn for_each_node(root: &Value, mut visit: impl FnMut(&Value, Option<&Value>)) {
    let mut stack: Vec<(&Value, Option<&Value>)> = vec![(root, None)];
    while let Some((value, parent)) = stack.pop() {
        match value {
            Value::Object(map) => {
                let is_node = map.contains_key("type");
                if is_node {
                    visit(value, parent);
                }
                let next_parent = if is_node { Some(value) } else { parent };
                for child in map.values() {
                    stack.push((child, next_parent));
                }
            }
            Value::Array(items) => {
                for item in items {
                    stack.push((item, parent));
                }
            }
            _ => {}
        }
    }
}

/// `start`/`end` offsets of a node object
pub fn range(node: &Value) -> Option<(u64, u64)> {
    Some((node.get("start")?.as_u64()?, node.get("end")?.as_u64()?))
}
