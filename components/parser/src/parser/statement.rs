//! Statement grammar

use super::function::DeclarationKind;
use super::{CoverGrammar, Label, LabelKind, Parser, StatementContext};
use crate::ast::*;
use crate::error::*;
use crate::lexer::{Keyword, Punctuator, TokenKind};
use crate::options::EcmaVersion;
use core_types::SourcePosition;

impl<'a> Parser<'a> {
    /// Parse one statement or declaration
    pub(crate) fn parse_statement(&mut self, context: StatementContext) -> ParseResult<Statement> {
        self.guarded(|p| p.parse_statement_kind(context))
    }

    fn parse_statement_kind(&mut self, context: StatementContext) -> ParseResult<Statement> {
        let start = self.current.start;

        if self.is_let_declaration(context)? {
            if context.is_single_statement() {
                return Err(syntax_error(
                    "Lexical declaration cannot appear in a single-statement context",
                    start,
                ));
            }
            return self.parse_variable_statement(VariableKind::Let);
        }

        let keyword = match self.current.kind {
            TokenKind::Keyword(keyword) => Some(keyword),
            _ => None,
        };
        match keyword {
            Some(Keyword::Break) | Some(Keyword::Continue) => self.parse_break_continue(),
            Some(Keyword::Debugger) => {
                self.next()?;
                self.consume_semicolon()?;
                Ok(Statement::DebuggerStatement {
                    span: self.finish_span(start),
                })
            }
            Some(Keyword::Do) => self.parse_do_while(),
            Some(Keyword::For) => self.parse_for(),
            Some(Keyword::Function) => {
                if context.is_single_statement()
                    && (self.context.strict
                        || !matches!(context, StatementContext::If | StatementContext::Label))
                {
                    if !self.context.strict {
                        return Err(self.unexpected());
                    }
                    return Err(syntax_error(
                        "In strict mode code, functions can only be declared at top level or inside a block",
                        start,
                    ));
                }
                let function = self.parse_function(start, false, DeclarationKind::Statement)?;
                if context.is_single_statement() && function.is_generator {
                    return Err(syntax_error(
                        "Generators can only be declared at the top level or inside a block",
                        start,
                    ));
                }
                Ok(Statement::FunctionDeclaration(function))
            }
            Some(Keyword::Class) => {
                if context.is_single_statement() {
                    return Err(self.unexpected());
                }
                let class = self.parse_class(start, DeclarationKind::Statement)?;
                Ok(Statement::ClassDeclaration(class))
            }
            Some(Keyword::If) => self.parse_if(),
            Some(Keyword::Return) => self.parse_return(),
            Some(Keyword::Switch) => self.parse_switch(),
            Some(Keyword::Throw) => self.parse_throw(),
            Some(Keyword::Try) => self.parse_try(),
            Some(Keyword::Const) | Some(Keyword::Var) => {
                let kind = if keyword == Some(Keyword::Const) {
                    VariableKind::Const
                } else {
                    VariableKind::Var
                };
                if kind == VariableKind::Const && context.is_single_statement() {
                    return Err(self.unexpected());
                }
                self.parse_variable_statement(kind)
            }
            Some(Keyword::While) => self.parse_while(),
            Some(Keyword::With) => self.parse_with(),
            Some(Keyword::Import) => {
                let next = self.peek()?;
                if next.is_punctuator(Punctuator::LParen) || next.is_punctuator(Punctuator::Dot) {
                    return self.parse_expression_statement(start);
                }
                self.check_module_item(context)?;
                self.parse_import_declaration()
            }
            Some(Keyword::Export) => {
                self.check_module_item(context)?;
                self.parse_export_declaration()
            }
            _ => {
                if self.check(Punctuator::LBrace) {
                    return Ok(Statement::BlockStatement(self.parse_block()?));
                }
                if self.check(Punctuator::Semicolon) {
                    self.next()?;
                    return Ok(Statement::EmptyStatement {
                        span: self.finish_span(start),
                    });
                }
                if self.is_async_function()? {
                    if context.is_single_statement() {
                        return Err(syntax_error(
                            "Async functions can only be declared at the top level or inside a block",
                            start,
                        ));
                    }
                    self.next()?;
                    let function = self.parse_function(start, true, DeclarationKind::Statement)?;
                    return Ok(Statement::FunctionDeclaration(function));
                }
                self.parse_expression_statement(start)
            }
        }
    }

    /// `async function` with no line break after `async`
    pub(crate) fn is_async_function(&mut self) -> ParseResult<bool> {
        if !self.is_contextual("async") || self.options.ecma_version < EcmaVersion::ES2017 {
            return Ok(false);
        }
        let next = self.peek()?;
        Ok(next.is_keyword(Keyword::Function) && !next.newline_before)
    }

    /// `let` starts a declaration only when followed by a binding
    fn is_let_declaration(&mut self, context: StatementContext) -> ParseResult<bool> {
        if !self.is_contextual("let") {
            return Ok(false);
        }
        let next = self.peek()?;
        if next.is_punctuator(Punctuator::LBracket) {
            return Ok(true);
        }
        if context.is_single_statement() {
            return Ok(false);
        }
        Ok(match &next.kind {
            TokenKind::Punctuator(Punctuator::LBrace) | TokenKind::Identifier(_) => true,
            TokenKind::Keyword(k) => !matches!(k, Keyword::In | Keyword::Instanceof),
            _ => false,
        })
    }

    fn check_module_item(&self, context: StatementContext) -> ParseResult<()> {
        if !self.options.is_module() {
            return Err(syntax_error(
                "'import' and 'export' may appear only with 'sourceType: module'",
                self.current.start,
            ));
        }
        if context != StatementContext::TopLevel {
            return Err(syntax_error(
                "'import' and 'export' may only appear at the top level",
                self.current.start,
            ));
        }
        Ok(())
    }

    /// Expression statement, or a labeled statement if the expression is a lone identifier followed by `:`
    fn parse_expression_statement(&mut self, start: SourcePosition) -> ParseResult<Statement> {
        let starts_with_identifier = matches!(self.current.kind, TokenKind::Identifier(_));
        let expression = self.parse_expression(false, None)?;
        match expression {
            Expression::Identifier(label)
                if starts_with_identifier && self.check(Punctuator::Colon) =>
            {
                self.next()?;
                self.parse_labeled_statement(label, start)
            }
            expression => {
                self.consume_semicolon()?;
                Ok(Statement::ExpressionStatement {
                    expression,
                    directive: None,
                    span: self.finish_span(start),
                })
            }
        }
    }

    fn parse_labeled_statement(
        &mut self,
        label: Identifier,
        start: SourcePosition,
    ) -> ParseResult<Statement> {
        if self
            .labels
            .iter()
            .any(|l| l.name.as_deref() == Some(label.name.as_str()))
        {
            return Err(syntax_error(
                format!("Label '{}' is already declared", label.name),
                label.span.start,
            ));
        }
        let kind = match self.current.kind {
            TokenKind::Keyword(Keyword::For | Keyword::While | Keyword::Do) => Some(LabelKind::Loop),
            TokenKind::Keyword(Keyword::Switch) => Some(LabelKind::Switch),
            _ => None,
        };
        // labels chained onto the same statement share its kind
        let body_start = self.current.start.offset;
        for existing in self.labels.iter_mut().rev() {
            if existing.statement_start != start.offset {
                break;
            }
            existing.statement_start = body_start;
            existing.kind = kind;
        }
        self.labels.push(Label {
            name: Some(label.name.clone()),
            kind,
            statement_start: body_start,
        });
        let body = self.parse_statement(StatementContext::Label);
        self.labels.pop();
        Ok(Statement::LabeledStatement {
            label,
            body: Box::new(body?),
            span: self.finish_span(start),
        })
    }

    fn parse_break_continue(&mut self) -> ParseResult<Statement> {
        let start = self.current.start;
        let is_break = self.current.is_keyword(Keyword::Break);
        self.next()?;

        let label = if self.eat(Punctuator::Semicolon)? || self.can_insert_semicolon() {
            None
        } else if matches!(self.current.kind, TokenKind::Identifier(_)) {
            let label = self.parse_identifier()?;
            self.consume_semicolon()?;
            Some(label)
        } else {
            return Err(self.unexpected());
        };

        let target_found = self.labels.iter().any(|entry| {
            let name_matches = match &label {
                None => entry.kind.is_some(),
                Some(label) => entry.name.as_deref() == Some(label.name.as_str()),
            };
            name_matches && (is_break || entry.kind == Some(LabelKind::Loop))
        });
        if !target_found {
            let keyword = if is_break { "break" } else { "continue" };
            return Err(syntax_error(format!("Unsyntactic {}", keyword), start));
        }

        let span = self.finish_span(start);
        Ok(if is_break {
            Statement::BreakStatement { label, span }
        } else {
            Statement::ContinueStatement { label, span }
        })
    }

    /// `{ ... }` in statement position
    pub(crate) fn parse_block(&mut self) -> ParseResult<BlockStatement> {
        let start = self.current.start;
        self.expect(Punctuator::LBrace)?;
        let (body, _) = self.parse_statement_list(Some(Punctuator::RBrace), StatementContext::List, false)?;
        self.expect(Punctuator::RBrace)?;
        Ok(BlockStatement {
            body,
            span: self.finish_span(start),
        })
    }

    fn parse_variable_statement(&mut self, kind: VariableKind) -> ParseResult<Statement> {
        let start = self.current.start;
        self.next()?;
        let declaration = self.parse_variable_declarations(kind, start, false, false)?;
        self.consume_semicolon()?;
        Ok(Statement::VariableDeclaration(VariableDeclaration {
            span: self.finish_span(start),
            ..declaration
        }))
    }

    /// Declarator list after `var`/`let`/`const` (already consumed)
    fn parse_variable_declarations(
        &mut self,
        kind: VariableKind,
        start: SourcePosition,
        no_in: bool,
        in_for_head: bool,
    ) -> ParseResult<VariableDeclaration> {
        let lexical = kind != VariableKind::Var;
        let mut declarations = Vec::new();
        loop {
            let declarator_start = self.current.start;
            let id = self.parse_binding_target(lexical)?;
            let init = if self.eat(Punctuator::Assign)? {
                Some(self.parse_maybe_assign(no_in, None)?)
            } else {
                let before_in_of =
                    in_for_head && (self.check_keyword(Keyword::In) || self.is_contextual("of"));
                if !before_in_of {
                    if kind == VariableKind::Const {
                        return Err(syntax_error(
                            "Missing initializer in const declaration",
                            self.current.start,
                        ));
                    }
                    if !matches!(id, Pattern::Identifier(_)) {
                        return Err(syntax_error(
                            "Complex binding patterns require an initialization value",
                            self.current.start,
                        ));
                    }
                }
                None
            };
            declarations.push(VariableDeclarator {
                id,
                init,
                span: self.finish_span(declarator_start),
            });
            if !self.eat(Punctuator::Comma)? {
                break;
            }
        }
        Ok(VariableDeclaration {
            kind,
            declarations,
            span: self.finish_span(start),
        })
    }

    fn parse_if(&mut self) -> ParseResult<Statement> {
        let start = self.current.start;
        self.next()?;
        let test = self.parse_paren_expression()?;
        let consequent = self.parse_statement(StatementContext::If)?;
        let alternate = if self.eat_keyword(Keyword::Else)? {
            Some(Box::new(self.parse_statement(StatementContext::If)?))
        } else {
            None
        };
        Ok(Statement::IfStatement {
            test,
            consequent: Box::new(consequent),
            alternate,
            span: self.finish_span(start),
        })
    }

    fn parse_paren_expression(&mut self) -> ParseResult<Expression> {
        self.expect(Punctuator::LParen)?;
        let expression = self.parse_expression(false, None)?;
        self.expect(Punctuator::RParen)?;
        Ok(expression)
    }

    fn parse_return(&mut self) -> ParseResult<Statement> {
        let start = self.current.start;
        if !self.context.in_function && !self.options.allow_return_outside_function {
            return Err(syntax_error("'return' outside of function", start));
        }
        self.next()?;
        let argument = if self.eat(Punctuator::Semicolon)? || self.can_insert_semicolon() {
            None
        } else {
            let argument = self.parse_expression(false, None)?;
            self.consume_semicolon()?;
            Some(argument)
        };
        Ok(Statement::ReturnStatement {
            argument,
            span: self.finish_span(start),
        })
    }

    fn parse_throw(&mut self) -> ParseResult<Statement> {
        let start = self.current.start;
        self.next()?;
        if self.current.newline_before {
            return Err(syntax_error("Illegal newline after throw", self.prev_end));
        }
        let argument = self.parse_expression(false, None)?;
        self.consume_semicolon()?;
        Ok(Statement::ThrowStatement {
            argument,
            span: self.finish_span(start),
        })
    }

    fn parse_try(&mut self) -> ParseResult<Statement> {
        let start = self.current.start;
        self.next()?;
        let block = self.parse_block()?;

        let handler = if self.check_keyword(Keyword::Catch) {
            let catch_start = self.current.start;
            self.next()?;
            let param = if self.eat(Punctuator::LParen)? {
                let param = self.parse_binding_target(false)?;
                self.expect(Punctuator::RParen)?;
                Some(param)
            } else {
                self.require_version(EcmaVersion::ES2019)?;
                None
            };
            let body = self.parse_block()?;
            Some(CatchClause {
                param,
                body,
                span: self.finish_span(catch_start),
            })
        } else {
            None
        };
        let finalizer = if self.eat_keyword(Keyword::Finally)? {
            Some(self.parse_block()?)
        } else {
            None
        };
        if handler.is_none() && finalizer.is_none() {
            return Err(syntax_error("Missing catch or finally clause", start));
        }
        Ok(Statement::TryStatement {
            block,
            handler,
            finalizer,
            span: self.finish_span(start),
        })
    }

    fn parse_switch(&mut self) -> ParseResult<Statement> {
        let start = self.current.start;
        self.next()?;
        let discriminant = self.parse_paren_expression()?;
        self.expect(Punctuator::LBrace)?;
        self.labels.push(Label {
            name: None,
            kind: Some(LabelKind::Switch),
            statement_start: start.offset,
        });
        let cases = self.parse_switch_cases();
        self.labels.pop();
        let cases = cases?;
        Ok(Statement::SwitchStatement {
            discriminant,
            cases,
            span: self.finish_span(start),
        })
    }

    fn parse_switch_cases(&mut self) -> ParseResult<Vec<SwitchCase>> {
        let mut cases = Vec::new();
        let mut seen_default = false;
        while !self.eat(Punctuator::RBrace)? {
            let case_start = self.current.start;
            let test = if self.eat_keyword(Keyword::Case)? {
                Some(self.parse_expression(false, None)?)
            } else if self.check_keyword(Keyword::Default) {
                if seen_default {
                    return Err(syntax_error("Multiple default clauses", case_start));
                }
                seen_default = true;
                self.next()?;
                None
            } else {
                return Err(self.unexpected());
            };
            self.expect(Punctuator::Colon)?;

            let mut consequent = Vec::new();
            while !self.check(Punctuator::RBrace)
                && !self.check_keyword(Keyword::Case)
                && !self.check_keyword(Keyword::Default)
            {
                if self.current.is_eof() {
                    return Err(self.unexpected());
                }
                consequent.push(self.parse_statement(StatementContext::List)?);
            }
            cases.push(SwitchCase {
                test,
                consequent,
                span: self.finish_span(case_start),
            });
        }
        Ok(cases)
    }

    fn parse_while(&mut self) -> ParseResult<Statement> {
        let start = self.current.start;
        self.next()?;
        let test = self.parse_paren_expression()?;
        let body = self.parse_loop_body(start)?;
        Ok(Statement::WhileStatement {
            test,
            body: Box::new(body),
            span: self.finish_span(start),
        })
    }

    fn parse_do_while(&mut self) -> ParseResult<Statement> {
        let start = self.current.start;
        self.next()?;
        let body = self.parse_loop_body(start)?;
        self.expect_keyword(Keyword::While)?;
        let test = self.parse_paren_expression()?;
        // the semicolon after do-while is always optional
        self.eat(Punctuator::Semicolon)?;
        Ok(Statement::DoWhileStatement {
            body: Box::new(body),
            test,
            span: self.finish_span(start),
        })
    }

    fn parse_loop_body(&mut self, start: SourcePosition) -> ParseResult<Statement> {
        self.labels.push(Label {
            name: None,
            kind: Some(LabelKind::Loop),
            statement_start: start.offset,
        });
        let body = self.parse_statement(StatementContext::Body);
        self.labels.pop();
        body
    }

    fn parse_with(&mut self) -> ParseResult<Statement> {
        let start = self.current.start;
        if self.context.strict {
            return Err(syntax_error("'with' in strict mode", start));
        }
        self.next()?;
        let object = self.parse_paren_expression()?;
        let body = self.parse_statement(StatementContext::Body)?;
        Ok(Statement::WithStatement {
            object,
            body: Box::new(body),
            span: self.finish_span(start),
        })
    }

    /// `for (;;)`, `for (in)`, `for (of)` and `for await (of)`
    fn parse_for(&mut self) -> ParseResult<Statement> {
        let start = self.current.start;
        self.next()?;

        let is_await = if self.is_contextual("await") && self.can_await() {
            self.require_version(EcmaVersion::ES2018)?;
            self.next()?;
            true
        } else {
            false
        };
        self.expect(Punctuator::LParen)?;

        if self.check(Punctuator::Semicolon) {
            if is_await {
                return Err(self.unexpected());
            }
            return self.parse_for_rest(start, None);
        }

        let is_let = self.is_let_declaration(StatementContext::List)?;
        if is_let || self.check_keyword(Keyword::Var) || self.check_keyword(Keyword::Const) {
            let init_start = self.current.start;
            let kind = if is_let {
                VariableKind::Let
            } else if self.check_keyword(Keyword::Const) {
                VariableKind::Const
            } else {
                VariableKind::Var
            };
            self.next()?;
            let declaration = self.parse_variable_declarations(kind, init_start, true, true)?;
            if (self.check_keyword(Keyword::In) || self.is_contextual("of"))
                && declaration.declarations.len() == 1
            {
                return self.parse_for_in_of(start, ForLeft::VariableDeclaration(declaration), is_await);
            }
            if is_await {
                return Err(self.unexpected());
            }
            return self.parse_for_rest(start, Some(ForInit::VariableDeclaration(declaration)));
        }

        let starts_with_let = self.is_contextual("let");
        let init_start = self.current.start;
        let mut cover = CoverGrammar::default();
        let init = self.parse_expression(true, Some(&mut cover))?;
        let is_of = self.is_contextual("of");
        if self.check_keyword(Keyword::In) || is_of {
            if starts_with_let && is_of {
                return Err(syntax_error(
                    "The left-hand side of a for-of loop may not start with let.",
                    init_start,
                ));
            }
            if let Some(position) = cover
                .trailing_comma
                .filter(|p| p.offset >= init_start.offset)
            {
                return Err(syntax_error(
                    "Comma is not permitted after the rest element",
                    position,
                ));
            }
            let left = self.expression_to_pattern(init)?;
            return self.parse_for_in_of(start, ForLeft::Pattern(left), is_await);
        }
        self.check_cover_errors(&cover)?;
        if is_await {
            return Err(self.unexpected());
        }
        self.parse_for_rest(start, Some(ForInit::Expression(init)))
    }

    fn parse_for_rest(&mut self, start: SourcePosition, init: Option<ForInit>) -> ParseResult<Statement> {
        self.expect(Punctuator::Semicolon)?;
        let test = if self.check(Punctuator::Semicolon) {
            None
        } else {
            Some(self.parse_expression(false, None)?)
        };
        self.expect(Punctuator::Semicolon)?;
        let update = if self.check(Punctuator::RParen) {
            None
        } else {
            Some(self.parse_expression(false, None)?)
        };
        self.expect(Punctuator::RParen)?;
        let body = self.parse_loop_body(start)?;
        Ok(Statement::ForStatement {
            init,
            test,
            update,
            body: Box::new(body),
            span: self.finish_span(start),
        })
    }

    fn parse_for_in_of(
        &mut self,
        start: SourcePosition,
        left: ForLeft,
        is_await: bool,
    ) -> ParseResult<Statement> {
        let is_in = self.check_keyword(Keyword::In);
        if is_in && is_await {
            return Err(self.unexpected());
        }
        self.next()?;

        if let ForLeft::VariableDeclaration(declaration) = &left {
            if let Some(declarator) = declaration.declarations.first() {
                let sloppy_var_initializer = is_in
                    && !self.context.strict
                    && declaration.kind == VariableKind::Var
                    && matches!(declarator.id, Pattern::Identifier(_));
                if declarator.init.is_some() && !sloppy_var_initializer {
                    let loop_kind = if is_in { "for-in" } else { "for-of" };
                    return Err(syntax_error(
                        format!("{} loop variable declaration may not have an initializer", loop_kind),
                        declaration.span.start,
                    ));
                }
            }
        }

        let right = if is_in {
            self.parse_expression(false, None)?
        } else {
            self.parse_maybe_assign(false, None)?
        };
        self.expect(Punctuator::RParen)?;
        let body = Box::new(self.parse_loop_body(start)?);
        let span = self.finish_span(start);
        Ok(if is_in {
            Statement::ForInStatement {
                left,
                right,
                body,
                span,
            }
        } else {
            Statement::ForOfStatement {
                left,
                right,
                body,
                is_await,
                span,
            }
        })
    }
}
