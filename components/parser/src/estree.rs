//! ESTree JSON output
//!
//! Converts a [`Program`] into a compact ESTree JSON document. Every node
//! starts with `type`, `start` and `end` (plus `loc` when requested), followed
//! by its fields in a fixed per-node order. Absent children are `null`.
//!
//! Traversal runs on an explicit work stack, so deeply nested trees are
//! serialized without growing the call stack.
//!
//! # Examples
//!
//! ```
//! use parser::estree::serialize;
//! use parser::options::ParseOptions;
//! use parser::parse_program;
//!
//! let program = parse_program("x", &ParseOptions::default()).unwrap();
//! let json = serialize(&program);
//! assert!(json.starts_with(r#"{"type":"Program","start":0,"end":1,"body":["#));
//! ```

use crate::ast::*;
use core_types::Span;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Output switches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SerializeOptions {
    /// Emit `loc` objects with line/column positions
    pub locations: bool,
    /// Keep `ParenthesizedExpression` nodes instead of emitting the inner expression
    pub preserve_parens: bool,
}

/// Serialize with default options
pub fn serialize(program: &Program) -> String {
    serialize_with(program, &SerializeOptions::default())
}

/// Serialize a program to compact ESTree JSON
pub fn serialize_with(program: &Program, options: &SerializeOptions) -> String {
    let mut out = String::new();
    let mut stack = vec![Work::Node(Node::Program(program))];
    while let Some(work) = stack.pop() {
        match work {
            Work::Text(text) => out.push_str(&text),
            Work::Node(node) => {
                let parts = expand(node, options);
                stack.extend(parts.into_iter().rev());
            }
        }
    }
    out
}

/// Format a number the way JavaScript's `Number.prototype.toString` does.
///
/// Non-finite values have no JSON spelling and become `null`.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return "null".to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let mut buffer = ryu::Buffer::new();
    let printed = buffer.format_finite(value.abs());
    let (mantissa, exponent) = match printed.split_once('e') {
        Some((mantissa, exponent)) => (mantissa, exponent.parse::<i32>().unwrap_or_default()),
        None => (printed, 0),
    };
    let (integer, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));

    // value = 0.DIGITS * 10^point
    let mut digits = format!("{}{}", integer, fraction);
    let mut point = integer.len() as i32 + exponent;
    let leading = digits.len() - digits.trim_start_matches('0').len();
    digits.drain(..leading);
    point -= leading as i32;
    let significant = digits.trim_end_matches('0').len();
    digits.truncate(significant);
    let count = digits.len() as i32;

    let mut out = String::new();
    if value < 0.0 {
        out.push('-');
    }
    if count <= point && point <= 21 {
        out.push_str(&digits);
        out.push_str(&"0".repeat((point - count) as usize));
    } else if 0 < point && point <= 21 {
        out.push_str(&digits[..point as usize]);
        out.push('.');
        out.push_str(&digits[point as usize..]);
    } else if -6 < point && point <= 0 {
        out.push_str("0.");
        out.push_str(&"0".repeat(-point as usize));
        out.push_str(&digits);
    } else {
        let exponent = point - 1;
        out.push_str(&digits[..1]);
        if count > 1 {
            out.push('.');
            out.push_str(&digits[1..]);
        }
        out.push('e');
        out.push(if exponent < 0 { '-' } else { '+' });
        out.push_str(&exponent.abs().to_string());
    }
    out
}

fn json_string(value: &str) -> String {
    serde_json::Value::from(value).to_string()
}

/// Anything that serializes as one ESTree node
#[derive(Clone, Copy)]
enum Node<'a> {
    Program(&'a Program),
    Statement(&'a Statement),
    Expression(&'a Expression),
    Pattern(&'a Pattern),
    Identifier(&'a Identifier),
    Literal(&'a Literal),
    Block(&'a BlockStatement),
    Function(&'a Function, &'static str),
    Arrow(&'a ArrowFunction),
    Class(&'a Class, &'static str),
    ClassBody(&'a ClassBody),
    Method(&'a MethodDefinition),
    Property(&'a ObjectProperty),
    PatternProperty(&'a ObjectPatternProperty),
    VariableDeclaration(&'a VariableDeclaration),
    Declarator(&'a VariableDeclarator),
    SwitchCase(&'a SwitchCase),
    CatchClause(&'a CatchClause),
    Template(&'a TemplateLiteral),
    TemplateElement(&'a TemplateElement),
    ImportSpecifier(&'a ImportSpecifier),
    ExportSpecifier(&'a ExportSpecifier),
}

enum Work<'a> {
    Text(Cow<'static, str>),
    Node(Node<'a>),
}

const NULL: Work<'static> = Work::Text(Cow::Borrowed("null"));

/// Builder for one node's fragments
struct Fields<'a> {
    parts: Vec<Work<'a>>,
}

impl<'a> Fields<'a> {
    fn open(node_type: &'static str, span: Span, options: &SerializeOptions) -> Self {
        let mut header = format!(
            "{{\"type\":\"{}\",\"start\":{},\"end\":{}",
            node_type, span.start.offset, span.end.offset
        );
        if options.locations {
            header.push_str(&format!(
                ",\"loc\":{{\"start\":{{\"line\":{},\"column\":{}}},\"end\":{{\"line\":{},\"column\":{}}}}}",
                span.start.line, span.start.column, span.end.line, span.end.column
            ));
        }
        Self {
            parts: vec![Work::Text(Cow::Owned(header))],
        }
    }

    fn key(&mut self, key: &'static str) {
        self.parts.push(Work::Text(Cow::Owned(format!(",\"{}\":", key))));
    }

    fn node(mut self, key: &'static str, node: Node<'a>) -> Self {
        self.key(key);
        self.parts.push(Work::Node(node));
        self
    }

    fn maybe(mut self, key: &'static str, node: Option<Node<'a>>) -> Self {
        self.key(key);
        self.parts.push(node.map_or(NULL, Work::Node));
        self
    }

    fn list(self, key: &'static str, nodes: impl IntoIterator<Item = Node<'a>>) -> Self {
        self.holes(key, nodes.into_iter().map(Some))
    }

    fn holes(mut self, key: &'static str, nodes: impl IntoIterator<Item = Option<Node<'a>>>) -> Self {
        self.key(key);
        self.parts.push(Work::Text(Cow::Borrowed("[")));
        for (index, node) in nodes.into_iter().enumerate() {
            if index > 0 {
                self.parts.push(Work::Text(Cow::Borrowed(",")));
            }
            self.parts.push(node.map_or(NULL, Work::Node));
        }
        self.parts.push(Work::Text(Cow::Borrowed("]")));
        self
    }

    fn json(mut self, key: &'static str, value: String) -> Self {
        self.key(key);
        self.parts.push(Work::Text(Cow::Owned(value)));
        self
    }

    fn string(self, key: &'static str, value: &str) -> Self {
        self.json(key, json_string(value))
    }

    fn boolean(self, key: &'static str, value: bool) -> Self {
        self.json(key, value.to_string())
    }

    fn finish(mut self) -> Vec<Work<'a>> {
        self.parts.push(Work::Text(Cow::Borrowed("}")));
        self.parts
    }
}

fn expand<'a>(node: Node<'a>, options: &SerializeOptions) -> Vec<Work<'a>> {
    match node {
        Node::Program(program) => Fields::open("Program", program.span, options)
            .list("body", program.body.iter().map(Node::Statement))
            .string("sourceType", program.source_type.as_str())
            .finish(),
        Node::Statement(statement) => expand_statement(statement, options),
        Node::Expression(expression) => expand_expression(expression, options),
        Node::Pattern(pattern) => expand_pattern(pattern, options),
        Node::Identifier(identifier) => Fields::open("Identifier", identifier.span, options)
            .string("name", &identifier.name)
            .finish(),
        Node::Literal(literal) => expand_literal(literal, options),
        Node::Block(block) => Fields::open("BlockStatement", block.span, options)
            .list("body", block.body.iter().map(Node::Statement))
            .finish(),
        Node::Function(function, node_type) => Fields::open(node_type, function.span, options)
            .maybe("id", function.id.as_ref().map(Node::Identifier))
            .boolean("expression", false)
            .boolean("generator", function.is_generator)
            .boolean("async", function.is_async)
            .list("params", function.params.iter().map(Node::Pattern))
            .node("body", Node::Block(&function.body))
            .finish(),
        Node::Arrow(arrow) => {
            let (is_expression, body) = match &arrow.body {
                ArrowFunctionBody::Expression(expression) => (true, Node::Expression(expression)),
                ArrowFunctionBody::Block(block) => (false, Node::Block(block)),
            };
            Fields::open("ArrowFunctionExpression", arrow.span, options)
                .maybe("id", None)
                .boolean("expression", is_expression)
                .boolean("generator", false)
                .boolean("async", arrow.is_async)
                .list("params", arrow.params.iter().map(Node::Pattern))
                .node("body", body)
                .finish()
        }
        Node::Class(class, node_type) => Fields::open(node_type, class.span, options)
            .maybe("id", class.id.as_ref().map(Node::Identifier))
            .maybe("superClass", class.super_class.as_deref().map(Node::Expression))
            .node("body", Node::ClassBody(&class.body))
            .finish(),
        Node::ClassBody(body) => Fields::open("ClassBody", body.span, options)
            .list("body", body.body.iter().map(Node::Method))
            .finish(),
        Node::Method(method) => Fields::open("MethodDefinition", method.span, options)
            .boolean("static", method.is_static)
            .boolean("computed", method.computed)
            .node("key", Node::Expression(&method.key))
            .string("kind", method.kind.as_str())
            .node("value", Node::Function(&method.value, "FunctionExpression"))
            .finish(),
        Node::Property(ObjectProperty::Property(property)) => {
            Fields::open("Property", property.span, options)
                .boolean("method", property.method)
                .boolean("shorthand", property.shorthand)
                .boolean("computed", property.computed)
                .node("key", Node::Expression(&property.key))
                .string("kind", property.kind.as_str())
                .node("value", Node::Expression(&property.value))
                .finish()
        }
        Node::Property(ObjectProperty::SpreadElement { argument, span }) => {
            Fields::open("SpreadElement", *span, options)
                .node("argument", Node::Expression(argument))
                .finish()
        }
        Node::PatternProperty(ObjectPatternProperty::Property(property)) => {
            Fields::open("Property", property.span, options)
                .boolean("method", false)
                .boolean("shorthand", property.shorthand)
                .boolean("computed", property.computed)
                .node("key", Node::Expression(&property.key))
                .string("kind", "init")
                .node("value", Node::Pattern(&property.value))
                .finish()
        }
        Node::PatternProperty(ObjectPatternProperty::RestElement { argument, span }) => {
            Fields::open("RestElement", *span, options)
                .node("argument", Node::Pattern(argument))
                .finish()
        }
        Node::VariableDeclaration(declaration) => {
            Fields::open("VariableDeclaration", declaration.span, options)
                .list("declarations", declaration.declarations.iter().map(Node::Declarator))
                .string("kind", declaration.kind.as_str())
                .finish()
        }
        Node::Declarator(declarator) => Fields::open("VariableDeclarator", declarator.span, options)
            .node("id", Node::Pattern(&declarator.id))
            .maybe("init", declarator.init.as_ref().map(Node::Expression))
            .finish(),
        Node::SwitchCase(case) => Fields::open("SwitchCase", case.span, options)
            .list("consequent", case.consequent.iter().map(Node::Statement))
            .maybe("test", case.test.as_ref().map(Node::Expression))
            .finish(),
        Node::CatchClause(clause) => Fields::open("CatchClause", clause.span, options)
            .maybe("param", clause.param.as_ref().map(Node::Pattern))
            .node("body", Node::Block(&clause.body))
            .finish(),
        Node::Template(template) => Fields::open("TemplateLiteral", template.span, options)
            .list("expressions", template.expressions.iter().map(Node::Expression))
            .list("quasis", template.quasis.iter().map(Node::TemplateElement))
            .finish(),
        Node::TemplateElement(element) => {
            let cooked = element
                .cooked
                .as_deref()
                .map_or_else(|| "null".to_string(), json_string);
            let value = format!("{{\"raw\":{},\"cooked\":{}}}", json_string(&element.raw), cooked);
            Fields::open("TemplateElement", element.span, options)
                .json("value", value)
                .boolean("tail", element.tail)
                .finish()
        }
        Node::ImportSpecifier(ImportSpecifier::Named {
            imported,
            local,
            span,
        }) => Fields::open("ImportSpecifier", *span, options)
            .node("imported", Node::Identifier(imported))
            .node("local", Node::Identifier(local))
            .finish(),
        Node::ImportSpecifier(ImportSpecifier::Default { local, span }) => {
            Fields::open("ImportDefaultSpecifier", *span, options)
                .node("local", Node::Identifier(local))
                .finish()
        }
        Node::ImportSpecifier(ImportSpecifier::Namespace { local, span }) => {
            Fields::open("ImportNamespaceSpecifier", *span, options)
                .node("local", Node::Identifier(local))
                .finish()
        }
        Node::ExportSpecifier(specifier) => Fields::open("ExportSpecifier", specifier.span, options)
            .node("local", Node::Identifier(&specifier.local))
            .node("exported", Node::Identifier(&specifier.exported))
            .finish(),
    }
}

fn expand_literal<'a>(literal: &'a Literal, options: &SerializeOptions) -> Vec<Work<'a>> {
    let fields = Fields::open("Literal", literal.span, options);
    let fields = match &literal.value {
        LiteralValue::String(value) => fields.string("value", value),
        LiteralValue::Number(value) => fields.json("value", format_number(*value)),
        LiteralValue::Boolean(value) => fields.boolean("value", *value),
        LiteralValue::Null | LiteralValue::RegExp { .. } | LiteralValue::BigInt(_) => {
            fields.json("value", "null".to_string())
        }
    };
    let fields = fields.string("raw", &literal.raw);
    match &literal.value {
        LiteralValue::RegExp { pattern, flags } => fields
            .json(
                "regex",
                format!(
                    "{{\"pattern\":{},\"flags\":{}}}",
                    json_string(pattern),
                    json_string(flags)
                ),
            )
            .finish(),
        LiteralValue::BigInt(digits) => fields.string("bigint", digits).finish(),
        _ => fields.finish(),
    }
}

fn expand_statement<'a>(statement: &'a Statement, options: &SerializeOptions) -> Vec<Work<'a>> {
    let open = |node_type: &'static str, span: Span| Fields::open(node_type, span, options);
    match statement {
        Statement::ExpressionStatement {
            expression,
            directive,
            span,
        } => {
            let fields = open("ExpressionStatement", *span).node("expression", Node::Expression(expression));
            match directive {
                Some(directive) => fields.string("directive", directive).finish(),
                None => fields.finish(),
            }
        }
        Statement::BlockStatement(block) => expand(Node::Block(block), options),
        Statement::EmptyStatement { span } => open("EmptyStatement", *span).finish(),
        Statement::DebuggerStatement { span } => open("DebuggerStatement", *span).finish(),
        Statement::WithStatement { object, body, span } => open("WithStatement", *span)
            .node("object", Node::Expression(object))
            .node("body", Node::Statement(body))
            .finish(),
        Statement::ReturnStatement { argument, span } => open("ReturnStatement", *span)
            .maybe("argument", argument.as_ref().map(Node::Expression))
            .finish(),
        Statement::LabeledStatement { label, body, span } => open("LabeledStatement", *span)
            .node("body", Node::Statement(body))
            .node("label", Node::Identifier(label))
            .finish(),
        Statement::BreakStatement { label, span } => open("BreakStatement", *span)
            .maybe("label", label.as_ref().map(Node::Identifier))
            .finish(),
        Statement::ContinueStatement { label, span } => open("ContinueStatement", *span)
            .maybe("label", label.as_ref().map(Node::Identifier))
            .finish(),
        Statement::IfStatement {
            test,
            consequent,
            alternate,
            span,
        } => open("IfStatement", *span)
            .node("test", Node::Expression(test))
            .node("consequent", Node::Statement(consequent))
            .maybe("alternate", alternate.as_deref().map(Node::Statement))
            .finish(),
        Statement::SwitchStatement {
            discriminant,
            cases,
            span,
        } => open("SwitchStatement", *span)
            .node("discriminant", Node::Expression(discriminant))
            .list("cases", cases.iter().map(Node::SwitchCase))
            .finish(),
        Statement::ThrowStatement { argument, span } => open("ThrowStatement", *span)
            .node("argument", Node::Expression(argument))
            .finish(),
        Statement::TryStatement {
            block,
            handler,
            finalizer,
            span,
        } => open("TryStatement", *span)
            .node("block", Node::Block(block))
            .maybe("handler", handler.as_ref().map(Node::CatchClause))
            .maybe("finalizer", finalizer.as_ref().map(Node::Block))
            .finish(),
        Statement::WhileStatement { test, body, span } => open("WhileStatement", *span)
            .node("test", Node::Expression(test))
            .node("body", Node::Statement(body))
            .finish(),
        Statement::DoWhileStatement { body, test, span } => open("DoWhileStatement", *span)
            .node("body", Node::Statement(body))
            .node("test", Node::Expression(test))
            .finish(),
        Statement::ForStatement {
            init,
            test,
            update,
            body,
            span,
        } => open("ForStatement", *span)
            .maybe(
                "init",
                init.as_ref().map(|init| match init {
                    ForInit::VariableDeclaration(declaration) => Node::VariableDeclaration(declaration),
                    ForInit::Expression(expression) => Node::Expression(expression),
                }),
            )
            .maybe("test", test.as_ref().map(Node::Expression))
            .maybe("update", update.as_ref().map(Node::Expression))
            .node("body", Node::Statement(body))
            .finish(),
        Statement::ForInStatement {
            left,
            right,
            body,
            span,
        } => open("ForInStatement", *span)
            .node("left", for_left(left))
            .node("right", Node::Expression(right))
            .node("body", Node::Statement(body))
            .finish(),
        Statement::ForOfStatement {
            left,
            right,
            body,
            is_await,
            span,
        } => open("ForOfStatement", *span)
            .boolean("await", *is_await)
            .node("left", for_left(left))
            .node("right", Node::Expression(right))
            .node("body", Node::Statement(body))
            .finish(),
        Statement::FunctionDeclaration(function) => {
            expand(Node::Function(function, "FunctionDeclaration"), options)
        }
        Statement::VariableDeclaration(declaration) => {
            expand(Node::VariableDeclaration(declaration), options)
        }
        Statement::ClassDeclaration(class) => expand(Node::Class(class, "ClassDeclaration"), options),
        Statement::ImportDeclaration {
            specifiers,
            source,
            span,
        } => open("ImportDeclaration", *span)
            .list("specifiers", specifiers.iter().map(Node::ImportSpecifier))
            .node("source", Node::Literal(source))
            .finish(),
        Statement::ExportNamedDeclaration {
            declaration,
            specifiers,
            source,
            span,
        } => open("ExportNamedDeclaration", *span)
            .maybe("declaration", declaration.as_deref().map(Node::Statement))
            .list("specifiers", specifiers.iter().map(Node::ExportSpecifier))
            .maybe("source", source.as_ref().map(Node::Literal))
            .finish(),
        Statement::ExportDefaultDeclaration { declaration, span } => {
            let declaration = match declaration {
                ExportDefaultKind::FunctionDeclaration(function) => {
                    Node::Function(function, "FunctionDeclaration")
                }
                ExportDefaultKind::ClassDeclaration(class) => Node::Class(class, "ClassDeclaration"),
                ExportDefaultKind::Expression(expression) => Node::Expression(expression),
            };
            open("ExportDefaultDeclaration", *span)
                .node("declaration", declaration)
                .finish()
        }
        Statement::ExportAllDeclaration {
            exported,
            source,
            span,
        } => open("ExportAllDeclaration", *span)
            .maybe("exported", exported.as_ref().map(Node::Identifier))
            .node("source", Node::Literal(source))
            .finish(),
    }
}

fn for_left(left: &ForLeft) -> Node<'_> {
    match left {
        ForLeft::VariableDeclaration(declaration) => Node::VariableDeclaration(declaration),
        ForLeft::Pattern(pattern) => Node::Pattern(pattern),
    }
}

fn expand_expression<'a>(expression: &'a Expression, options: &SerializeOptions) -> Vec<Work<'a>> {
    let open = |node_type: &'static str, span: Span| Fields::open(node_type, span, options);
    match expression {
        Expression::Identifier(identifier) => expand(Node::Identifier(identifier), options),
        Expression::Literal(literal) => expand_literal(literal, options),
        Expression::ThisExpression { span } => open("ThisExpression", *span).finish(),
        Expression::Super { span } => open("Super", *span).finish(),
        Expression::ArrayExpression { elements, span } => open("ArrayExpression", *span)
            .holes(
                "elements",
                elements.iter().map(|element| element.as_ref().map(Node::Expression)),
            )
            .finish(),
        Expression::ObjectExpression { properties, span } => open("ObjectExpression", *span)
            .list("properties", properties.iter().map(Node::Property))
            .finish(),
        Expression::FunctionExpression(function) => {
            expand(Node::Function(function, "FunctionExpression"), options)
        }
        Expression::ArrowFunctionExpression(arrow) => expand(Node::Arrow(arrow), options),
        Expression::ClassExpression(class) => expand(Node::Class(class, "ClassExpression"), options),
        Expression::TemplateLiteral(template) => expand(Node::Template(template), options),
        Expression::TaggedTemplateExpression { tag, quasi, span } => {
            open("TaggedTemplateExpression", *span)
                .node("tag", Node::Expression(tag))
                .node("quasi", Node::Template(quasi))
                .finish()
        }
        Expression::UnaryExpression {
            operator,
            argument,
            span,
        } => open("UnaryExpression", *span)
            .string("operator", operator.as_str())
            .boolean("prefix", true)
            .node("argument", Node::Expression(argument))
            .finish(),
        Expression::UpdateExpression {
            operator,
            prefix,
            argument,
            span,
        } => open("UpdateExpression", *span)
            .string("operator", operator.as_str())
            .boolean("prefix", *prefix)
            .node("argument", Node::Expression(argument))
            .finish(),
        Expression::BinaryExpression {
            operator,
            left,
            right,
            span,
        } => open("BinaryExpression", *span)
            .node("left", Node::Expression(left))
            .string("operator", operator.as_str())
            .node("right", Node::Expression(right))
            .finish(),
        Expression::LogicalExpression {
            operator,
            left,
            right,
            span,
        } => open("LogicalExpression", *span)
            .node("left", Node::Expression(left))
            .string("operator", operator.as_str())
            .node("right", Node::Expression(right))
            .finish(),
        Expression::AssignmentExpression {
            operator,
            left,
            right,
            span,
        } => open("AssignmentExpression", *span)
            .string("operator", operator.as_str())
            .node("left", Node::Pattern(left))
            .node("right", Node::Expression(right))
            .finish(),
        Expression::ConditionalExpression {
            test,
            consequent,
            alternate,
            span,
        } => open("ConditionalExpression", *span)
            .node("test", Node::Expression(test))
            .node("consequent", Node::Expression(consequent))
            .node("alternate", Node::Expression(alternate))
            .finish(),
        Expression::CallExpression {
            callee,
            arguments,
            optional,
            span,
        } => open("CallExpression", *span)
            .node("callee", Node::Expression(callee))
            .list("arguments", arguments.iter().map(Node::Expression))
            .boolean("optional", *optional)
            .finish(),
        Expression::NewExpression {
            callee,
            arguments,
            span,
        } => open("NewExpression", *span)
            .node("callee", Node::Expression(callee))
            .list("arguments", arguments.iter().map(Node::Expression))
            .finish(),
        Expression::MemberExpression {
            object,
            property,
            computed,
            optional,
            span,
        } => open("MemberExpression", *span)
            .node("object", Node::Expression(object))
            .node("property", Node::Expression(property))
            .boolean("computed", *computed)
            .boolean("optional", *optional)
            .finish(),
        Expression::ChainExpression { expression, span } => open("ChainExpression", *span)
            .node("expression", Node::Expression(expression))
            .finish(),
        Expression::SequenceExpression { expressions, span } => open("SequenceExpression", *span)
            .list("expressions", expressions.iter().map(Node::Expression))
            .finish(),
        Expression::YieldExpression {
            argument,
            delegate,
            span,
        } => open("YieldExpression", *span)
            .boolean("delegate", *delegate)
            .maybe("argument", argument.as_deref().map(Node::Expression))
            .finish(),
        Expression::AwaitExpression { argument, span } => open("AwaitExpression", *span)
            .node("argument", Node::Expression(argument))
            .finish(),
        Expression::MetaProperty {
            meta,
            property,
            span,
        } => open("MetaProperty", *span)
            .node("meta", Node::Identifier(meta))
            .node("property", Node::Identifier(property))
            .finish(),
        Expression::ImportExpression { source, span } => open("ImportExpression", *span)
            .node("source", Node::Expression(source))
            .finish(),
        Expression::SpreadElement { argument, span } => open("SpreadElement", *span)
            .node("argument", Node::Expression(argument))
            .finish(),
        Expression::ParenthesizedExpression { expression, span } => {
            if options.preserve_parens {
                open("ParenthesizedExpression", *span)
                    .node("expression", Node::Expression(expression))
                    .finish()
            } else {
                vec![Work::Node(Node::Expression(expression))]
            }
        }
    }
}

fn expand_pattern<'a>(pattern: &'a Pattern, options: &SerializeOptions) -> Vec<Work<'a>> {
    let open = |node_type: &'static str, span: Span| Fields::open(node_type, span, options);
    match pattern {
        Pattern::Identifier(identifier) => expand(Node::Identifier(identifier), options),
        Pattern::ObjectPattern { properties, span } => open("ObjectPattern", *span)
            .list("properties", properties.iter().map(Node::PatternProperty))
            .finish(),
        Pattern::ArrayPattern { elements, span } => open("ArrayPattern", *span)
            .holes(
                "elements",
                elements.iter().map(|element| element.as_ref().map(Node::Pattern)),
            )
            .finish(),
        Pattern::RestElement { argument, span } => open("RestElement", *span)
            .node("argument", Node::Pattern(argument))
            .finish(),
        Pattern::AssignmentPattern { left, right, span } => open("AssignmentPattern", *span)
            .node("left", Node::Pattern(left))
            .node("right", Node::Expression(right))
            .finish(),
        Pattern::Expression(expression) => vec![Work::Node(Node::Expression(expression))],
    }
}
