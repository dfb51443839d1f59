//! Functions, parameters, binding patterns and classes

use super::{Context, CoverGrammar, Parser, StatementContext, STRICT_RESERVED_WORDS};
use crate::ast::*;
use crate::error::*;
use crate::lexer::{Keyword, Punctuator, TokenKind};
use crate::options::EcmaVersion;
use core_types::SourcePosition;
use std::collections::HashSet;

/// Where a function or class appears; decides whether its name is required
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DeclarationKind {
    /// Declaration statement: name required, checked in the enclosing context
    Statement,
    /// `export default function () {}`: name optional
    DefaultExport,
    /// Expression: name optional, checked in the function's own context
    Expression,
}

/// Append every identifier bound by `pattern`
pub(crate) fn collect_bound_names<'p>(pattern: &'p Pattern, names: &mut Vec<&'p Identifier>) {
    match pattern {
        Pattern::Identifier(identifier) => names.push(identifier),
        Pattern::ObjectPattern { properties, .. } => {
            for property in properties {
                match property {
                    ObjectPatternProperty::Property(property) => {
                        collect_bound_names(&property.value, names)
                    }
                    ObjectPatternProperty::RestElement { argument, .. } => {
                        collect_bound_names(argument, names)
                    }
                }
            }
        }
        Pattern::ArrayPattern { elements, .. } => {
            for element in elements.iter().flatten() {
                collect_bound_names(element, names);
            }
        }
        Pattern::RestElement { argument, .. } => collect_bound_names(argument, names),
        Pattern::AssignmentPattern { left, .. } => collect_bound_names(left, names),
        Pattern::Expression(_) => {}
    }
}

fn is_simple_parameter_list(params: &[Pattern]) -> bool {
    params.iter().all(|param| matches!(param, Pattern::Identifier(_)))
}

/// Static name of a non-computed property key
fn static_key_name(key: &Expression) -> Option<&str> {
    match key {
        Expression::Identifier(identifier) => Some(&identifier.name),
        Expression::Literal(Literal {
            value: LiteralValue::String(value),
            ..
        }) => Some(value),
        _ => None,
    }
}

impl<'a> Parser<'a> {
    /// `function [*] [name] (params) { body }`, starting at the `function` keyword
    pub(crate) fn parse_function(
        &mut self,
        start: SourcePosition,
        is_async: bool,
        kind: DeclarationKind,
    ) -> ParseResult<Function> {
        self.expect_keyword(Keyword::Function)?;
        let is_generator = if self.check(Punctuator::Star) {
            if is_async {
                self.require_version(EcmaVersion::ES2018)?;
            }
            self.next()?;
            true
        } else {
            false
        };

        let context = Context {
            strict: self.context.strict,
            in_function: true,
            in_async: is_async,
            in_generator: is_generator,
            allow_super_property: false,
            allow_super_call: false,
            allow_new_target: true,
        };
        let has_name = matches!(self.current.kind, TokenKind::Identifier(_));
        let id = match kind {
            DeclarationKind::Statement => Some(self.parse_binding_identifier(false)?),
            DeclarationKind::DefaultExport if has_name => Some(self.parse_binding_identifier(false)?),
            DeclarationKind::Expression if has_name => {
                Some(self.with_context(context, |p| p.parse_binding_identifier(false))?)
            }
            _ => None,
        };

        let (params, body) = self.parse_function_rest(context, id.as_ref(), true)?;
        Ok(Function {
            id,
            params,
            body,
            is_async,
            is_generator,
            span: self.finish_span(start),
        })
    }

    /// Method value: parameters and body starting at `(`
    pub(crate) fn parse_method_function(
        &mut self,
        is_async: bool,
        is_generator: bool,
        allow_super_call: bool,
    ) -> ParseResult<Function> {
        let start = self.current.start;
        let context = Context {
            strict: self.context.strict,
            in_function: true,
            in_async: is_async,
            in_generator: is_generator,
            allow_super_property: true,
            allow_super_call,
            allow_new_target: true,
        };
        let (params, body) = self.parse_function_rest(context, None, false)?;
        Ok(Function {
            id: None,
            params,
            body,
            is_async,
            is_generator,
            span: self.finish_span(start),
        })
    }

    fn parse_function_rest(
        &mut self,
        context: Context,
        id: Option<&Identifier>,
        allow_duplicates: bool,
    ) -> ParseResult<(Vec<Pattern>, BlockStatement)> {
        let saved_yield = self.yield_pos.take();
        let saved_await = self.await_pos.take();
        let result = self.with_function_context(context, |p| {
            let params = p.parse_formal_parameters()?;
            p.check_parameter_expressions()?;
            let body = p.parse_function_body(id, &params, allow_duplicates)?;
            Ok((params, body))
        });
        self.yield_pos = saved_yield;
        self.await_pos = saved_await;
        result
    }

    /// Reject `yield`/`await` expressions seen while parsing a parameter list
    pub(crate) fn check_parameter_expressions(&self) -> ParseResult<()> {
        if let Some(position) = self.yield_pos {
            return Err(syntax_error(
                "Yield expression cannot be a default value",
                position,
            ));
        }
        if let Some(position) = self.await_pos {
            return Err(syntax_error(
                "Await expression cannot be a default value",
                position,
            ));
        }
        Ok(())
    }

    /// `{ body }` of a function whose parameters are already parsed.
    ///
    /// Parameters and the function name are validated once the body's
    /// strictness is known, since a `"use strict"` directive applies to them
    /// retroactively.
    pub(crate) fn parse_function_body(
        &mut self,
        id: Option<&Identifier>,
        params: &[Pattern],
        allow_duplicates: bool,
    ) -> ParseResult<BlockStatement> {
        let start = self.current.start;
        let was_strict = self.context.strict;
        self.expect(Punctuator::LBrace)?;
        let (body, use_strict) =
            self.parse_statement_list(Some(Punctuator::RBrace), StatementContext::List, true)?;
        self.expect(Punctuator::RBrace)?;

        let simple = is_simple_parameter_list(params);
        if let Some(position) = use_strict {
            if !simple {
                return Err(syntax_error(
                    "Illegal 'use strict' directive in function with non-simple parameter list",
                    position,
                ));
            }
        }
        if !was_strict && self.context.strict {
            if let Some(id) = id {
                if STRICT_RESERVED_WORDS.contains(&id.name.as_str()) {
                    return Err(syntax_error(
                        format!("The keyword '{}' is reserved", id.name),
                        id.span.start,
                    ));
                }
                self.check_binding_name(id, false)?;
            }
        }
        self.check_params(params, allow_duplicates && simple && !self.context.strict)?;

        Ok(BlockStatement {
            body,
            span: self.finish_span(start),
        })
    }

    /// Validate parameter names in the function's own context
    pub(crate) fn check_params(&self, params: &[Pattern], allow_duplicates: bool) -> ParseResult<()> {
        let mut names = Vec::new();
        for param in params {
            collect_bound_names(param, &mut names);
        }
        let mut seen = HashSet::new();
        for name in names {
            self.check_unreserved(&name.name, name.span.start)?;
            self.check_binding_name(name, false)?;
            if !seen.insert(name.name.as_str()) && !allow_duplicates {
                return Err(syntax_error("Argument name clash", name.span.start));
            }
        }
        Ok(())
    }

    /// `( a, b = 1, ...rest )`
    pub(crate) fn parse_formal_parameters(&mut self) -> ParseResult<Vec<Pattern>> {
        self.expect(Punctuator::LParen)?;
        let mut params = Vec::new();
        while !self.eat(Punctuator::RParen)? {
            if !params.is_empty() {
                self.expect(Punctuator::Comma)?;
                if self.check(Punctuator::RParen) {
                    self.require_version(EcmaVersion::ES2017)?;
                    self.next()?;
                    break;
                }
            }
            if self.check(Punctuator::Spread) {
                params.push(self.parse_rest_binding(false)?);
                if self.check(Punctuator::Comma) {
                    return Err(syntax_error(
                        "Comma is not permitted after the rest element",
                        self.current.start,
                    ));
                }
                self.expect(Punctuator::RParen)?;
                break;
            }
            params.push(self.parse_binding_element(false)?);
        }
        Ok(params)
    }

    fn parse_rest_binding(&mut self, lexical: bool) -> ParseResult<Pattern> {
        let start = self.current.start;
        self.expect(Punctuator::Spread)?;
        let argument = self.parse_binding_target(lexical)?;
        if self.check(Punctuator::Assign) {
            return Err(syntax_error(
                "Rest elements cannot have a default value",
                self.current.start,
            ));
        }
        Ok(Pattern::RestElement {
            argument: Box::new(argument),
            span: self.finish_span(start),
        })
    }

    /// Binding target with an optional `= default`
    fn parse_binding_element(&mut self, lexical: bool) -> ParseResult<Pattern> {
        let start = self.current.start;
        let target = self.parse_binding_target(lexical)?;
        if !self.eat(Punctuator::Assign)? {
            return Ok(target);
        }
        let right = self.parse_maybe_assign(false, None)?;
        Ok(Pattern::AssignmentPattern {
            left: Box::new(target),
            right: Box::new(right),
            span: self.finish_span(start),
        })
    }

    /// Identifier, array pattern or object pattern in a binding position
    pub(crate) fn parse_binding_target(&mut self, lexical: bool) -> ParseResult<Pattern> {
        self.guarded(|p| match p.current.kind {
            TokenKind::Punctuator(Punctuator::LBracket) => p.parse_array_binding(lexical),
            TokenKind::Punctuator(Punctuator::LBrace) => p.parse_object_binding(lexical),
            _ => Ok(Pattern::Identifier(p.parse_binding_identifier(lexical)?)),
        })
    }

    fn parse_array_binding(&mut self, lexical: bool) -> ParseResult<Pattern> {
        let start = self.current.start;
        self.expect(Punctuator::LBracket)?;
        let mut elements = Vec::new();
        loop {
            if self.eat(Punctuator::RBracket)? {
                break;
            }
            if self.eat(Punctuator::Comma)? {
                elements.push(None);
                continue;
            }
            if self.check(Punctuator::Spread) {
                elements.push(Some(self.parse_rest_binding(lexical)?));
                if self.check(Punctuator::Comma) {
                    return Err(syntax_error(
                        "Comma is not permitted after the rest element",
                        self.current.start,
                    ));
                }
                self.expect(Punctuator::RBracket)?;
                break;
            }
            elements.push(Some(self.parse_binding_element(lexical)?));
            if !self.check(Punctuator::RBracket) {
                self.expect(Punctuator::Comma)?;
            }
        }
        Ok(Pattern::ArrayPattern {
            elements,
            span: self.finish_span(start),
        })
    }

    fn parse_object_binding(&mut self, lexical: bool) -> ParseResult<Pattern> {
        let start = self.current.start;
        self.expect(Punctuator::LBrace)?;
        let mut properties = Vec::new();
        while !self.eat(Punctuator::RBrace)? {
            if !properties.is_empty() {
                self.expect(Punctuator::Comma)?;
                if self.eat(Punctuator::RBrace)? {
                    break;
                }
            }

            if self.check(Punctuator::Spread) {
                self.require_version(EcmaVersion::ES2018)?;
                let rest_start = self.current.start;
                self.next()?;
                let argument = self.parse_binding_identifier(lexical)?;
                properties.push(ObjectPatternProperty::RestElement {
                    argument: Box::new(Pattern::Identifier(argument)),
                    span: self.finish_span(rest_start),
                });
                if self.check(Punctuator::Comma) {
                    return Err(syntax_error(
                        "Comma is not permitted after the rest element",
                        self.current.start,
                    ));
                }
                self.expect(Punctuator::RBrace)?;
                break;
            }

            let property_start = self.current.start;
            let key_is_identifier = matches!(self.current.kind, TokenKind::Identifier(_));
            let (key, computed) = self.parse_property_name()?;
            if self.eat(Punctuator::Colon)? {
                let value = self.parse_binding_element(lexical)?;
                properties.push(ObjectPatternProperty::Property(PatternProperty {
                    key,
                    value,
                    shorthand: false,
                    computed,
                    span: self.finish_span(property_start),
                }));
                continue;
            }

            let identifier = match &key {
                Expression::Identifier(identifier) if key_is_identifier && !computed => {
                    identifier.clone()
                }
                _ => return Err(self.unexpected()),
            };
            self.check_unreserved(&identifier.name, identifier.span.start)?;
            self.check_binding_name(&identifier, lexical)?;
            let value = if self.eat(Punctuator::Assign)? {
                let right = self.parse_maybe_assign(false, None)?;
                Pattern::AssignmentPattern {
                    left: Box::new(Pattern::Identifier(identifier)),
                    right: Box::new(right),
                    span: self.finish_span(property_start),
                }
            } else {
                Pattern::Identifier(identifier)
            };
            properties.push(ObjectPatternProperty::Property(PatternProperty {
                key,
                value,
                shorthand: true,
                computed: false,
                span: self.finish_span(property_start),
            }));
        }
        Ok(Pattern::ObjectPattern {
            properties,
            span: self.finish_span(start),
        })
    }

    /// Parameter count rules for `get` and `set` accessors
    pub(crate) fn check_accessor_params(&self, getter: bool, function: &Function) -> ParseResult<()> {
        let position = function.span.start;
        if getter {
            if !function.params.is_empty() {
                return Err(syntax_error("getter should have no params", position));
            }
            return Ok(());
        }
        if function.params.len() != 1 {
            return Err(syntax_error("setter should have exactly one param", position));
        }
        if matches!(function.params[0], Pattern::RestElement { .. }) {
            return Err(syntax_error("Setter cannot use rest params", position));
        }
        Ok(())
    }

    // Classes

    /// `class [name] [extends Base] { members }`; class bodies are always strict
    pub(crate) fn parse_class(
        &mut self,
        start: SourcePosition,
        kind: DeclarationKind,
    ) -> ParseResult<Class> {
        self.expect_keyword(Keyword::Class)?;
        let context = Context {
            strict: true,
            ..self.context
        };
        self.with_context(context, |p| {
            let has_name = matches!(p.current.kind, TokenKind::Identifier(_));
            let id = match kind {
                DeclarationKind::Statement => Some(p.parse_binding_identifier(true)?),
                _ if has_name => Some(p.parse_binding_identifier(true)?),
                _ => None,
            };
            let super_class = if p.eat_keyword(Keyword::Extends)? {
                let mut cover = CoverGrammar::default();
                let heritage = p.parse_subscripted(&mut cover)?;
                p.check_cover_errors(&cover)?;
                Some(Box::new(heritage))
            } else {
                None
            };
            let body = p.parse_class_body(super_class.is_some())?;
            Ok(Class {
                id,
                super_class,
                body,
                span: p.finish_span(start),
            })
        })
    }

    fn parse_class_body(&mut self, has_super: bool) -> ParseResult<ClassBody> {
        let start = self.current.start;
        self.expect(Punctuator::LBrace)?;
        let mut body = Vec::new();
        let mut has_constructor = false;
        while !self.eat(Punctuator::RBrace)? {
            if self.eat(Punctuator::Semicolon)? {
                continue;
            }
            let member = self.parse_class_member(has_super)?;
            if member.kind == MethodKind::Constructor {
                if has_constructor {
                    return Err(syntax_error(
                        "Duplicate constructor in the same class",
                        member.key.span().start,
                    ));
                }
                has_constructor = true;
            }
            body.push(member);
        }
        Ok(ClassBody {
            body,
            span: self.finish_span(start),
        })
    }

    fn parse_class_member(&mut self, has_super: bool) -> ParseResult<MethodDefinition> {
        let start = self.current.start;
        let is_static = self.is_contextual("static") && self.is_modifier(true)?;
        if is_static {
            self.next()?;
        }

        let mut is_async = false;
        if self.is_contextual("async")
            && self.options.ecma_version >= EcmaVersion::ES2017
            && self.is_modifier(false)?
        {
            self.next()?;
            is_async = true;
        }
        let is_generator = if self.check(Punctuator::Star) {
            if is_async {
                self.require_version(EcmaVersion::ES2018)?;
            }
            self.next()?;
            true
        } else {
            false
        };
        let mut accessor = None;
        if !is_async
            && !is_generator
            && (self.is_contextual("get") || self.is_contextual("set"))
            && self.is_modifier(true)?
        {
            accessor = Some(if self.is_contextual("get") {
                MethodKind::Get
            } else {
                MethodKind::Set
            });
            self.next()?;
        }

        let (key, computed) = self.parse_property_name()?;
        let key_start = key.span().start;
        let name = if computed { None } else { static_key_name(&key) };
        let is_constructor = !is_static && name == Some("constructor");
        let is_prototype = is_static && name == Some("prototype");

        if is_constructor {
            if accessor.is_some() {
                return Err(syntax_error("Constructor can't have get/set modifier", key_start));
            }
            if is_generator {
                return Err(syntax_error("Constructor can't be a generator", key_start));
            }
            if is_async {
                return Err(syntax_error("Constructor can't be an async method", key_start));
            }
        }
        if is_prototype {
            return Err(syntax_error(
                "Classes may not have a static property named prototype",
                key_start,
            ));
        }

        let value = self.parse_method_function(is_async, is_generator, is_constructor && has_super)?;
        let kind = if is_constructor {
            MethodKind::Constructor
        } else {
            accessor.unwrap_or(MethodKind::Method)
        };
        match kind {
            MethodKind::Get => self.check_accessor_params(true, &value)?,
            MethodKind::Set => self.check_accessor_params(false, &value)?,
            _ => {}
        }
        Ok(MethodDefinition {
            key,
            computed,
            value,
            kind,
            is_static,
            span: self.finish_span(start),
        })
    }
}
