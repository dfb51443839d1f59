//! Expression grammar

use super::function::DeclarationKind;
use super::{binary_precedence, Context, CoverGrammar, Parser};
use crate::ast::*;
use crate::error::*;
use crate::lexer::{Keyword, Punctuator, Token, TokenKind};
use crate::options::EcmaVersion;
use core_types::{SourcePosition, Span};

/// Operator produced by a binary-precedence token
enum InfixOperator {
    Binary(BinaryOperator),
    Logical(LogicalOperator),
}

fn infix_operator(token: &Token) -> Option<InfixOperator> {
    use InfixOperator::{Binary, Logical};
    let operator = match &token.kind {
        TokenKind::Punctuator(p) => match p {
            Punctuator::NullishCoalesce => Logical(LogicalOperator::NullishCoalesce),
            Punctuator::OrOr => Logical(LogicalOperator::Or),
            Punctuator::AndAnd => Logical(LogicalOperator::And),
            Punctuator::Or => Binary(BinaryOperator::BitwiseOr),
            Punctuator::Xor => Binary(BinaryOperator::BitwiseXor),
            Punctuator::And => Binary(BinaryOperator::BitwiseAnd),
            Punctuator::EqEq => Binary(BinaryOperator::Eq),
            Punctuator::NotEq => Binary(BinaryOperator::NotEq),
            Punctuator::EqEqEq => Binary(BinaryOperator::StrictEq),
            Punctuator::NotEqEq => Binary(BinaryOperator::StrictNotEq),
            Punctuator::Lt => Binary(BinaryOperator::Lt),
            Punctuator::LtEq => Binary(BinaryOperator::LtEq),
            Punctuator::Gt => Binary(BinaryOperator::Gt),
            Punctuator::GtEq => Binary(BinaryOperator::GtEq),
            Punctuator::LtLt => Binary(BinaryOperator::LeftShift),
            Punctuator::GtGt => Binary(BinaryOperator::RightShift),
            Punctuator::GtGtGt => Binary(BinaryOperator::UnsignedRightShift),
            Punctuator::Plus => Binary(BinaryOperator::Add),
            Punctuator::Minus => Binary(BinaryOperator::Sub),
            Punctuator::Star => Binary(BinaryOperator::Mul),
            Punctuator::Slash => Binary(BinaryOperator::Div),
            Punctuator::Percent => Binary(BinaryOperator::Mod),
            Punctuator::StarStar => Binary(BinaryOperator::Exp),
            _ => return None,
        },
        TokenKind::Keyword(Keyword::Instanceof) => Binary(BinaryOperator::Instanceof),
        TokenKind::Keyword(Keyword::In) => Binary(BinaryOperator::In),
        _ => return None,
    };
    Some(operator)
}

fn assignment_operator(token: &Token) -> Option<AssignmentOperator> {
    let operator = match &token.kind {
        TokenKind::Punctuator(p) => match p {
            Punctuator::Assign => AssignmentOperator::Assign,
            Punctuator::PlusEq => AssignmentOperator::AddAssign,
            Punctuator::MinusEq => AssignmentOperator::SubAssign,
            Punctuator::StarEq => AssignmentOperator::MulAssign,
            Punctuator::SlashEq => AssignmentOperator::DivAssign,
            Punctuator::PercentEq => AssignmentOperator::ModAssign,
            Punctuator::StarStarEq => AssignmentOperator::ExpAssign,
            Punctuator::AndEq => AssignmentOperator::BitAndAssign,
            Punctuator::OrEq => AssignmentOperator::BitOrAssign,
            Punctuator::XorEq => AssignmentOperator::BitXorAssign,
            Punctuator::LtLtEq => AssignmentOperator::LeftShiftAssign,
            Punctuator::GtGtEq => AssignmentOperator::RightShiftAssign,
            Punctuator::GtGtGtEq => AssignmentOperator::UnsignedRightShiftAssign,
            Punctuator::AndAndEq => AssignmentOperator::LogicalAndAssign,
            Punctuator::OrOrEq => AssignmentOperator::LogicalOrAssign,
            Punctuator::NullishCoalesceEq => AssignmentOperator::NullishCoalesceAssign,
            _ => return None,
        },
        _ => return None,
    };
    Some(operator)
}

/// Can this token begin an expression? Used for `yield` without an argument.
fn starts_expression(token: &Token) -> bool {
    match &token.kind {
        TokenKind::Identifier(_)
        | TokenKind::Number(_)
        | TokenKind::BigInt(_)
        | TokenKind::String(_)
        | TokenKind::Template { .. }
        | TokenKind::RegExp { .. } => true,
        TokenKind::Keyword(k) => matches!(
            k,
            Keyword::This
                | Keyword::Null
                | Keyword::True
                | Keyword::False
                | Keyword::Function
                | Keyword::Class
                | Keyword::New
                | Keyword::Typeof
                | Keyword::Void
                | Keyword::Delete
                | Keyword::Super
                | Keyword::Import
        ),
        TokenKind::Punctuator(p) => matches!(
            p,
            Punctuator::LParen
                | Punctuator::LBracket
                | Punctuator::LBrace
                | Punctuator::Plus
                | Punctuator::Minus
                | Punctuator::Not
                | Punctuator::Tilde
                | Punctuator::PlusPlus
                | Punctuator::MinusMinus
                | Punctuator::Slash
                | Punctuator::SlashEq
        ),
        TokenKind::EOF => false,
    }
}

fn is_mixed_logical(operator: LogicalOperator, operand: &Expression) -> bool {
    match operand {
        Expression::LogicalExpression { operator: inner, .. } => {
            (operator == LogicalOperator::NullishCoalesce) != (*inner == LogicalOperator::NullishCoalesce)
        }
        _ => false,
    }
}

/// Move a position by a number of code units on the same line
fn shift(position: SourcePosition, delta: isize) -> SourcePosition {
    SourcePosition {
        line: position.line,
        column: (position.column as isize + delta) as u32,
        offset: (position.offset as isize + delta) as usize,
    }
}

impl<'a> Parser<'a> {
    /// Expression, including the comma operator
    pub(crate) fn parse_expression(
        &mut self,
        no_in: bool,
        mut cover: Option<&mut CoverGrammar>,
    ) -> ParseResult<Expression> {
        let start = self.current.start;
        let first = self.parse_maybe_assign(no_in, cover.as_deref_mut())?;
        if !self.check(Punctuator::Comma) {
            return Ok(first);
        }
        let mut expressions = vec![first];
        while self.eat(Punctuator::Comma)? {
            expressions.push(self.parse_maybe_assign(no_in, cover.as_deref_mut())?);
        }
        Ok(Expression::SequenceExpression {
            expressions,
            span: self.finish_span(start),
        })
    }

    /// AssignmentExpression.
    ///
    /// When `cover` is given, errors that would disappear if the result is
    /// later reinterpreted as a pattern are recorded there instead of raised.
    pub(crate) fn parse_maybe_assign(
        &mut self,
        no_in: bool,
        cover: Option<&mut CoverGrammar>,
    ) -> ParseResult<Expression> {
        self.guarded(|p| p.parse_assignment(no_in, cover))
    }

    fn parse_assignment(
        &mut self,
        no_in: bool,
        cover: Option<&mut CoverGrammar>,
    ) -> ParseResult<Expression> {
        if self.context.in_generator && self.is_contextual("yield") {
            return self.parse_yield(no_in);
        }

        let mut own = CoverGrammar::default();
        let owns_cover = cover.is_none();
        let cover = match cover {
            Some(cover) => cover,
            None => &mut own,
        };

        let start = self.current.start;
        let left = self.parse_conditional(no_in, cover)?;

        let operator = match assignment_operator(&self.current) {
            Some(operator) => operator,
            None => {
                if owns_cover {
                    self.check_cover_errors(cover)?;
                }
                return Ok(left);
            }
        };
        if operator.is_logical() {
            self.require_version(EcmaVersion::ES2021)?;
        }
        if operator == AssignmentOperator::ExpAssign {
            self.require_version(EcmaVersion::ES2016)?;
        }

        let target = if operator == AssignmentOperator::Assign {
            if let Some(position) = cover.trailing_comma.filter(|p| p.offset >= start.offset) {
                return Err(syntax_error(
                    "Comma is not permitted after the rest element",
                    position,
                ));
            }
            self.expression_to_pattern(left)?
        } else {
            self.into_simple_target(left)?
        };

        // errors inside the target were resolved by the conversion
        let before_target = |p: &SourcePosition| p.offset < start.offset;
        cover.shorthand_assign = cover.shorthand_assign.filter(before_target);
        cover.double_proto = cover.double_proto.filter(before_target);
        cover.trailing_comma = cover.trailing_comma.filter(before_target);

        self.next()?;
        let right = self.parse_maybe_assign(no_in, None)?;
        Ok(Expression::AssignmentExpression {
            operator,
            left: Box::new(target),
            right: Box::new(right),
            span: self.finish_span(start),
        })
    }

    fn parse_conditional(
        &mut self,
        no_in: bool,
        cover: &mut CoverGrammar,
    ) -> ParseResult<Expression> {
        let start = self.current.start;
        let test = self.parse_binary(no_in, cover)?;
        if !self.check(Punctuator::Question)
            || matches!(test, Expression::ArrowFunctionExpression(_))
        {
            return Ok(test);
        }
        self.check_cover_errors(cover)?;
        self.next()?;
        let consequent = self.parse_maybe_assign(false, None)?;
        self.expect(Punctuator::Colon)?;
        let alternate = self.parse_maybe_assign(no_in, None)?;
        Ok(Expression::ConditionalExpression {
            test: Box::new(test),
            consequent: Box::new(consequent),
            alternate: Box::new(alternate),
            span: self.finish_span(start),
        })
    }

    fn parse_binary(&mut self, no_in: bool, cover: &mut CoverGrammar) -> ParseResult<Expression> {
        let start = self.current.start;
        let left = self.parse_unary(cover)?;
        if matches!(left, Expression::ArrowFunctionExpression(_))
            || binary_precedence(&self.current, no_in).is_none()
        {
            return Ok(left);
        }
        self.check_cover_errors(cover)?;
        self.parse_binary_rhs(left, start, 0, no_in)
    }

    /// Precedence climbing over operators binding tighter than `min_precedence`
    fn parse_binary_rhs(
        &mut self,
        mut left: Expression,
        start: SourcePosition,
        min_precedence: u8,
        no_in: bool,
    ) -> ParseResult<Expression> {
        loop {
            let precedence = match binary_precedence(&self.current, no_in) {
                Some(p) if p > min_precedence => p,
                _ => return Ok(left),
            };
            let operator = match infix_operator(&self.current) {
                Some(operator) => operator,
                None => return Ok(left),
            };
            let operator_token = self.next()?;

            let is_exponent = matches!(operator, InfixOperator::Binary(BinaryOperator::Exp));
            if is_exponent {
                if self.options.ecma_version < EcmaVersion::ES2016 {
                    return Err(syntax_error(
                        "Unexpected token '**' (requires ecmaVersion 2016 or later)",
                        operator_token.start,
                    ));
                }
                if matches!(
                    left,
                    Expression::UnaryExpression { .. } | Expression::AwaitExpression { .. }
                ) {
                    return Err(syntax_error(
                        "Unary operator used immediately before exponentiation expression. Parenthesis must be used to disambiguate operator precedence",
                        operator_token.start,
                    ));
                }
            }
            if matches!(
                operator,
                InfixOperator::Logical(LogicalOperator::NullishCoalesce)
            ) && self.options.ecma_version < EcmaVersion::ES2020
            {
                return Err(syntax_error(
                    "Unexpected token '??' (requires ecmaVersion 2020 or later)",
                    operator_token.start,
                ));
            }

            let right_start = self.current.start;
            let mut cover = CoverGrammar::default();
            let operand = self.parse_unary(&mut cover)?;
            self.check_cover_errors(&cover)?;
            // `**` is right-associative
            let next_min = if is_exponent { precedence - 1 } else { precedence };
            let right =
                self.guarded(|p| p.parse_binary_rhs(operand, right_start, next_min, no_in))?;

            left = match operator {
                InfixOperator::Binary(operator) => Expression::BinaryExpression {
                    operator,
                    left: Box::new(left),
                    right: Box::new(right),
                    span: self.finish_span(start),
                },
                InfixOperator::Logical(operator) => {
                    if is_mixed_logical(operator, &left) || is_mixed_logical(operator, &right) {
                        return Err(syntax_error(
                            "Logical expressions and coalesce expressions cannot be mixed. Wrap either by parentheses",
                            operator_token.start,
                        ));
                    }
                    Expression::LogicalExpression {
                        operator,
                        left: Box::new(left),
                        right: Box::new(right),
                        span: self.finish_span(start),
                    }
                }
            };
        }
    }

    fn parse_unary(&mut self, cover: &mut CoverGrammar) -> ParseResult<Expression> {
        self.guarded(|p| p.parse_prefix(cover))
    }

    fn parse_prefix(&mut self, cover: &mut CoverGrammar) -> ParseResult<Expression> {
        let start = self.current.start;
        if self.is_contextual("await") && self.can_await() {
            return self.parse_await();
        }

        let operator = match self.current.kind {
            TokenKind::Punctuator(Punctuator::Minus) => Some(UnaryOperator::Minus),
            TokenKind::Punctuator(Punctuator::Plus) => Some(UnaryOperator::Plus),
            TokenKind::Punctuator(Punctuator::Not) => Some(UnaryOperator::Not),
            TokenKind::Punctuator(Punctuator::Tilde) => Some(UnaryOperator::BitwiseNot),
            TokenKind::Keyword(Keyword::Typeof) => Some(UnaryOperator::Typeof),
            TokenKind::Keyword(Keyword::Void) => Some(UnaryOperator::Void),
            TokenKind::Keyword(Keyword::Delete) => Some(UnaryOperator::Delete),
            _ => None,
        };
        if let Some(operator) = operator {
            self.next()?;
            let argument = self.parse_unary_operand()?;
            if operator == UnaryOperator::Delete
                && self.context.strict
                && matches!(argument.unparenthesized(), Expression::Identifier(_))
            {
                return Err(syntax_error("Deleting local variable in strict mode", start));
            }
            return Ok(Expression::UnaryExpression {
                operator,
                argument: Box::new(argument),
                span: self.finish_span(start),
            });
        }

        let update = match self.current.kind {
            TokenKind::Punctuator(Punctuator::PlusPlus) => Some(UpdateOperator::Increment),
            TokenKind::Punctuator(Punctuator::MinusMinus) => Some(UpdateOperator::Decrement),
            _ => None,
        };
        if let Some(operator) = update {
            self.next()?;
            let argument = self.parse_unary_operand()?;
            self.check_simple_target(&argument)?;
            return Ok(Expression::UpdateExpression {
                operator,
                prefix: true,
                argument: Box::new(argument),
                span: self.finish_span(start),
            });
        }

        let expression = self.parse_subscripted(cover)?;
        let postfix = match self.current.kind {
            TokenKind::Punctuator(Punctuator::PlusPlus) => Some(UpdateOperator::Increment),
            TokenKind::Punctuator(Punctuator::MinusMinus) => Some(UpdateOperator::Decrement),
            _ => None,
        };
        match postfix {
            Some(operator)
                if !self.current.newline_before
                    && !matches!(expression, Expression::ArrowFunctionExpression(_)) =>
            {
                self.check_cover_errors(cover)?;
                self.check_simple_target(&expression)?;
                self.next()?;
                Ok(Expression::UpdateExpression {
                    operator,
                    prefix: false,
                    argument: Box::new(expression),
                    span: self.finish_span(start),
                })
            }
            _ => Ok(expression),
        }
    }

    /// Operand of a prefix operator, with its own cover grammar
    fn parse_unary_operand(&mut self) -> ParseResult<Expression> {
        let mut cover = CoverGrammar::default();
        let argument = self.parse_unary(&mut cover)?;
        self.check_cover_errors(&cover)?;
        Ok(argument)
    }

    fn parse_await(&mut self) -> ParseResult<Expression> {
        let start = self.current.start;
        self.await_pos.get_or_insert(start);
        self.next()?;
        let argument = self.parse_unary_operand()?;
        Ok(Expression::AwaitExpression {
            argument: Box::new(argument),
            span: self.finish_span(start),
        })
    }

    fn parse_yield(&mut self, no_in: bool) -> ParseResult<Expression> {
        let start = self.current.start;
        self.yield_pos.get_or_insert(start);
        self.next()?;
        let ends_here = self.check(Punctuator::Semicolon)
            || self.can_insert_semicolon()
            || (!self.check(Punctuator::Star) && !starts_expression(&self.current));
        let (delegate, argument) = if ends_here {
            (false, None)
        } else {
            let delegate = self.eat(Punctuator::Star)?;
            let argument = self.parse_maybe_assign(no_in, None)?;
            (delegate, Some(Box::new(argument)))
        };
        Ok(Expression::YieldExpression {
            argument,
            delegate,
            span: self.finish_span(start),
        })
    }

    // Member access, calls and optional chains

    /// LeftHandSideExpression: an atom followed by any subscripts
    pub(crate) fn parse_subscripted(&mut self, cover: &mut CoverGrammar) -> ParseResult<Expression> {
        let start = self.current.start;
        let expression = self.parse_atom(cover)?;
        if matches!(expression, Expression::ArrowFunctionExpression(_)) || !self.at_subscript() {
            return Ok(expression);
        }
        self.check_cover_errors(cover)?;
        self.parse_subscripts(expression, start, false)
    }

    fn at_subscript(&self) -> bool {
        self.check(Punctuator::Dot)
            || self.check(Punctuator::OptionalChain)
            || self.check(Punctuator::LBracket)
            || self.check(Punctuator::LParen)
            || matches!(self.current.kind, TokenKind::Template { .. })
    }

    fn parse_subscripts(
        &mut self,
        base: Expression,
        start: SourcePosition,
        no_calls: bool,
    ) -> ParseResult<Expression> {
        let mut expression = base;
        let mut chained = false;
        loop {
            let optional = self.check(Punctuator::OptionalChain);
            if optional {
                if no_calls {
                    return Err(syntax_error(
                        "Optional chaining cannot appear in the callee of new expressions",
                        self.current.start,
                    ));
                }
                self.require_version(EcmaVersion::ES2020)?;
                self.next()?;
                chained = true;
            }

            if self.eat(Punctuator::LBracket)? {
                let property = self.parse_expression(false, None)?;
                self.expect(Punctuator::RBracket)?;
                expression = Expression::MemberExpression {
                    object: Box::new(expression),
                    property: Box::new(property),
                    computed: true,
                    optional,
                    span: self.finish_span(start),
                };
            } else if !no_calls && self.check(Punctuator::LParen) {
                let arguments = self.parse_arguments()?;
                expression = Expression::CallExpression {
                    callee: Box::new(expression),
                    arguments,
                    optional,
                    span: self.finish_span(start),
                };
            } else if matches!(self.current.kind, TokenKind::Template { .. }) {
                if chained {
                    return Err(syntax_error(
                        "Optional chaining cannot appear in the tag of tagged template expressions",
                        self.current.start,
                    ));
                }
                let quasi = self.parse_template(true)?;
                expression = Expression::TaggedTemplateExpression {
                    tag: Box::new(expression),
                    quasi,
                    span: self.finish_span(start),
                };
            } else if optional || self.eat(Punctuator::Dot)? {
                let property = self.parse_identifier_name()?;
                expression = Expression::MemberExpression {
                    object: Box::new(expression),
                    property: Box::new(Expression::Identifier(property)),
                    computed: false,
                    optional,
                    span: self.finish_span(start),
                };
            } else {
                break;
            }
        }

        if chained {
            let span = expression.span();
            expression = Expression::ChainExpression {
                expression: Box::new(expression),
                span,
            };
        }
        Ok(expression)
    }

    /// `( args )` of a call or `new`
    fn parse_arguments(&mut self) -> ParseResult<Vec<Expression>> {
        self.expect(Punctuator::LParen)?;
        let mut arguments = Vec::new();
        while !self.eat(Punctuator::RParen)? {
            if !arguments.is_empty() {
                self.expect(Punctuator::Comma)?;
                if self.check(Punctuator::RParen) {
                    self.require_version(EcmaVersion::ES2017)?;
                    self.next()?;
                    break;
                }
            }
            let argument = if self.check(Punctuator::Spread) {
                self.parse_spread(None)?
            } else {
                self.parse_maybe_assign(false, None)?
            };
            arguments.push(argument);
        }
        Ok(arguments)
    }

    fn parse_spread(&mut self, cover: Option<&mut CoverGrammar>) -> ParseResult<Expression> {
        let start = self.current.start;
        self.expect(Punctuator::Spread)?;
        let argument = self.parse_maybe_assign(false, cover)?;
        Ok(Expression::SpreadElement {
            argument: Box::new(argument),
            span: self.finish_span(start),
        })
    }

    // Primary expressions

    fn parse_atom(&mut self, cover: &mut CoverGrammar) -> ParseResult<Expression> {
        self.guarded(|p| p.parse_primary(cover))
    }

    fn parse_primary(&mut self, cover: &mut CoverGrammar) -> ParseResult<Expression> {
        let start = self.current.start;
        if self.check(Punctuator::Slash) || self.check(Punctuator::SlashEq) {
            self.current = self.lexer.rescan_as_regexp(&self.current)?;
        }

        match self.current.kind {
            TokenKind::Keyword(keyword) => self.parse_keyword_atom(keyword, start),
            TokenKind::Identifier(_) => self.parse_identifier_atom(),
            TokenKind::Number(_)
            | TokenKind::BigInt(_)
            | TokenKind::String(_)
            | TokenKind::RegExp { .. } => self.parse_literal(),
            TokenKind::Template { .. } => Ok(Expression::TemplateLiteral(self.parse_template(false)?)),
            TokenKind::Punctuator(Punctuator::LParen) => self.parse_paren_or_arrow(),
            TokenKind::Punctuator(Punctuator::LBracket) => self.parse_array_literal(cover),
            TokenKind::Punctuator(Punctuator::LBrace) => self.parse_object_literal(cover),
            _ => Err(self.unexpected()),
        }
    }

    fn parse_keyword_atom(&mut self, keyword: Keyword, start: SourcePosition) -> ParseResult<Expression> {
        match keyword {
            Keyword::This => {
                let token = self.next()?;
                Ok(Expression::ThisExpression { span: token.span() })
            }
            Keyword::Null | Keyword::True | Keyword::False => {
                let token = self.next()?;
                let value = match keyword {
                    Keyword::Null => LiteralValue::Null,
                    other => LiteralValue::Boolean(other == Keyword::True),
                };
                Ok(Expression::Literal(Literal {
                    value,
                    raw: keyword.as_str().to_string(),
                    span: token.span(),
                }))
            }
            Keyword::Function => {
                let function = self.parse_function(start, false, DeclarationKind::Expression)?;
                Ok(Expression::FunctionExpression(Box::new(function)))
            }
            Keyword::Class => {
                let class = self.parse_class(start, DeclarationKind::Expression)?;
                Ok(Expression::ClassExpression(Box::new(class)))
            }
            Keyword::New => self.parse_new(),
            Keyword::Super => self.parse_super(),
            Keyword::Import => self.parse_import_expression(),
            _ => Err(self.unexpected()),
        }
    }

    fn parse_identifier_atom(&mut self) -> ParseResult<Expression> {
        let start = self.current.start;
        if self.is_contextual("async") && self.options.ecma_version >= EcmaVersion::ES2017 {
            let next = self.peek()?;
            let same_line = !next.newline_before;
            let is_function = next.is_keyword(Keyword::Function);
            let is_paren = next.is_punctuator(Punctuator::LParen);
            let is_identifier = matches!(next.kind, TokenKind::Identifier(_));
            if same_line && is_function {
                self.next()?;
                let function = self.parse_function(start, true, DeclarationKind::Expression)?;
                return Ok(Expression::FunctionExpression(Box::new(function)));
            }
            if same_line && is_paren {
                return self.parse_async_call_or_arrow(start);
            }
            if same_line && is_identifier {
                return self.parse_async_identifier_arrow(start);
            }
        }

        let identifier = self.parse_identifier()?;
        if self.check(Punctuator::Arrow) && !self.current.newline_before {
            return self.parse_arrow_body(start, vec![Pattern::Identifier(identifier)], false);
        }
        Ok(Expression::Identifier(identifier))
    }

    /// `async x => body`
    fn parse_async_identifier_arrow(&mut self, start: SourcePosition) -> ParseResult<Expression> {
        self.next()?;
        let context = Context {
            in_async: true,
            ..self.context
        };
        let param = self.with_context(context, |p| p.parse_binding_identifier(false))?;
        if !self.check(Punctuator::Arrow) || self.current.newline_before {
            return Err(self.unexpected());
        }
        self.parse_arrow_body(start, vec![Pattern::Identifier(param)], true)
    }

    /// `async (...)`: an async arrow head, or a call of a function named `async`
    fn parse_async_call_or_arrow(&mut self, start: SourcePosition) -> ParseResult<Expression> {
        let token = self.next()?;
        if let Some(arrow) = self.try_parse_arrow(start, true)? {
            return Ok(arrow);
        }
        let callee = Expression::Identifier(Identifier {
            name: "async".to_string(),
            span: token.span(),
        });
        let arguments = self.parse_arguments()?;
        Ok(Expression::CallExpression {
            callee: Box::new(callee),
            arguments,
            optional: false,
            span: self.finish_span(start),
        })
    }

    fn parse_paren_or_arrow(&mut self) -> ParseResult<Expression> {
        let start = self.current.start;
        if let Some(arrow) = self.try_parse_arrow(start, false)? {
            return Ok(arrow);
        }
        self.expect(Punctuator::LParen)?;
        let mut cover = CoverGrammar::default();
        let expression = self.parse_expression(false, Some(&mut cover))?;
        self.expect(Punctuator::RParen)?;
        self.check_cover_errors(&cover)?;
        Ok(Expression::ParenthesizedExpression {
            expression: Box::new(expression),
            span: self.finish_span(start),
        })
    }

    /// Speculatively parse `( params ) =>`; restores the parser and returns
    /// `None` if the tokens at the current `(` are not an arrow head.
    fn try_parse_arrow(
        &mut self,
        start: SourcePosition,
        is_async: bool,
    ) -> ParseResult<Option<Expression>> {
        let key = (self.current.start.offset, self.context);
        if self.failed_arrows.contains(&key) {
            return Ok(None);
        }
        let snapshot = self.snapshot();
        let saved_yield = self.yield_pos.take();
        let saved_await = self.await_pos.take();

        let context = Context {
            in_async: is_async || self.context.in_async,
            ..self.context
        };
        let head = self.with_context(context, |p| p.parse_formal_parameters());
        let params = match head {
            Ok(params) if self.check(Punctuator::Arrow) && !self.current.newline_before => params,
            _ => {
                self.restore(snapshot);
                self.failed_arrows.insert(key);
                return Ok(None);
            }
        };

        self.check_parameter_expressions()?;
        self.yield_pos = saved_yield;
        self.await_pos = saved_await;
        self.parse_arrow_body(start, params, is_async).map(Some)
    }

    fn parse_arrow_body(
        &mut self,
        start: SourcePosition,
        params: Vec<Pattern>,
        is_async: bool,
    ) -> ParseResult<Expression> {
        self.expect(Punctuator::Arrow)?;
        let context = Context {
            in_function: true,
            in_async: is_async,
            in_generator: false,
            ..self.context
        };
        let saved_yield = self.yield_pos.take();
        let saved_await = self.await_pos.take();
        let body = self.with_function_context(context, |p| {
            if p.check(Punctuator::LBrace) {
                let block = p.parse_function_body(None, &params, false)?;
                Ok(ArrowFunctionBody::Block(block))
            } else {
                let expression = p.parse_maybe_assign(false, None)?;
                p.check_params(&params, false)?;
                Ok(ArrowFunctionBody::Expression(Box::new(expression)))
            }
        })?;
        self.yield_pos = saved_yield;
        self.await_pos = saved_await;
        Ok(Expression::ArrowFunctionExpression(Box::new(ArrowFunction {
            params,
            body,
            is_async,
            span: self.finish_span(start),
        })))
    }

    fn parse_new(&mut self) -> ParseResult<Expression> {
        let start = self.current.start;
        let new_token = self.next()?;

        if self.eat(Punctuator::Dot)? {
            let escaped = self.current.escaped;
            let property = self.parse_identifier_name()?;
            if property.name != "target" || escaped {
                return Err(syntax_error(
                    "The only valid meta property for new is 'new.target'",
                    property.span.start,
                ));
            }
            if !self.context.allow_new_target {
                return Err(syntax_error(
                    "'new.target' can only be used in functions",
                    start,
                ));
            }
            return Ok(Expression::MetaProperty {
                meta: Identifier {
                    name: "new".to_string(),
                    span: new_token.span(),
                },
                property,
                span: self.finish_span(start),
            });
        }

        if self.check_keyword(Keyword::Import) {
            return Err(syntax_error(
                "Cannot use new with import()",
                self.current.start,
            ));
        }

        let callee_start = self.current.start;
        let mut cover = CoverGrammar::default();
        let callee = self.parse_atom(&mut cover)?;
        self.check_cover_errors(&cover)?;
        let callee = self.parse_subscripts(callee, callee_start, true)?;
        let arguments = if self.check(Punctuator::LParen) {
            self.parse_arguments()?
        } else {
            Vec::new()
        };
        Ok(Expression::NewExpression {
            callee: Box::new(callee),
            arguments,
            span: self.finish_span(start),
        })
    }

    fn parse_super(&mut self) -> ParseResult<Expression> {
        let token = self.next()?;
        if self.check(Punctuator::LParen) {
            if !self.context.allow_super_call {
                return Err(syntax_error(
                    "super() call outside constructor of a subclass",
                    token.start,
                ));
            }
        } else if self.check(Punctuator::Dot) || self.check(Punctuator::LBracket) {
            if !self.context.allow_super_property {
                return Err(syntax_error("'super' keyword outside a method", token.start));
            }
        } else {
            return Err(self.unexpected());
        }
        Ok(Expression::Super { span: token.span() })
    }

    /// `import(source)` or `import.meta`
    fn parse_import_expression(&mut self) -> ParseResult<Expression> {
        let start = self.current.start;
        let token = self.next()?;
        if self.check(Punctuator::LParen) {
            self.require_version(EcmaVersion::ES2020)?;
            self.next()?;
            let source = self.parse_maybe_assign(false, None)?;
            if self.check(Punctuator::Comma) {
                return Err(syntax_error(
                    "Trailing comma is not allowed in import()",
                    self.current.start,
                ));
            }
            self.expect(Punctuator::RParen)?;
            return Ok(Expression::ImportExpression {
                source: Box::new(source),
                span: self.finish_span(start),
            });
        }
        if self.check(Punctuator::Dot) {
            self.require_version(EcmaVersion::ES2020)?;
            self.next()?;
            let escaped = self.current.escaped;
            let property = self.parse_identifier_name()?;
            if property.name != "meta" || escaped {
                return Err(syntax_error(
                    "The only valid meta property for import is 'import.meta'",
                    property.span.start,
                ));
            }
            if !self.options.is_module() {
                return Err(syntax_error(
                    "Cannot use 'import.meta' outside a module",
                    start,
                ));
            }
            return Ok(Expression::MetaProperty {
                meta: Identifier {
                    name: "import".to_string(),
                    span: token.span(),
                },
                property,
                span: self.finish_span(start),
            });
        }
        Err(self.unexpected())
    }

    /// Number, bigint, string or regular expression literal
    pub(crate) fn parse_literal(&mut self) -> ParseResult<Expression> {
        let token = self.next()?;
        if token.legacy_octal && self.context.strict {
            return Err(syntax_error("Octal literal in strict mode", token.start));
        }
        let raw = self.lexer.raw(&token).to_string();
        let span = token.span();
        let value = match token.kind {
            TokenKind::Number(value) => LiteralValue::Number(value),
            TokenKind::BigInt(digits) => LiteralValue::BigInt(digits),
            TokenKind::String(value) => LiteralValue::String(value),
            TokenKind::RegExp { pattern, flags } => LiteralValue::RegExp { pattern, flags },
            _ => return Err(syntax_error(format!("Unexpected token '{}'", raw), span.start)),
        };
        Ok(Expression::Literal(Literal { value, raw, span }))
    }

    /// Template literal starting at the current template token.
    ///
    /// Tagged templates (ES2018+) tolerate invalid escapes; the element's
    /// cooked value is then absent.
    pub(crate) fn parse_template(&mut self, tagged: bool) -> ParseResult<TemplateLiteral> {
        let start = self.current.start;
        let mut quasis = Vec::new();
        let mut expressions = Vec::new();
        loop {
            let token = self.next()?;
            let (token_start, token_end) = (token.start, token.end);
            let TokenKind::Template { cooked, raw, tail } = token.kind else {
                return Err(syntax_error("Unterminated template", token_start));
            };
            let cooked = match cooked {
                Ok(cooked) => Some(cooked),
                Err(_) if tagged && self.options.ecma_version >= EcmaVersion::ES2018 => None,
                Err(err) => return Err(err),
            };
            let end = shift(token_end, if tail { -1 } else { -2 });
            quasis.push(TemplateElement {
                raw,
                cooked,
                tail,
                span: Span::new(shift(token_start, 1), end),
            });
            if tail {
                break;
            }

            expressions.push(self.parse_expression(false, None)?);
            if !self.check(Punctuator::RBrace) {
                return Err(unexpected_token(
                    "'}'",
                    &self.describe(&self.current),
                    self.current.start,
                ));
            }
            self.current = self.lexer.rescan_template_continuation(&self.current)?;
        }
        Ok(TemplateLiteral {
            quasis,
            expressions,
            span: self.finish_span(start),
        })
    }

    fn parse_array_literal(&mut self, cover: &mut CoverGrammar) -> ParseResult<Expression> {
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
            let element = if self.check(Punctuator::Spread) {
                let spread = self.parse_spread(Some(&mut *cover))?;
                if self.check(Punctuator::Comma) && cover.trailing_comma.is_none() {
                    cover.trailing_comma = Some(self.current.start);
                }
                spread
            } else {
                self.parse_maybe_assign(false, Some(&mut *cover))?
            };
            elements.push(Some(element));
            if !self.check(Punctuator::RBracket) {
                self.expect(Punctuator::Comma)?;
            }
        }
        Ok(Expression::ArrayExpression {
            elements,
            span: self.finish_span(start),
        })
    }

    fn parse_object_literal(&mut self, cover: &mut CoverGrammar) -> ParseResult<Expression> {
        let start = self.current.start;
        self.expect(Punctuator::LBrace)?;
        let mut properties = Vec::new();
        let mut has_proto = false;
        while !self.eat(Punctuator::RBrace)? {
            if !properties.is_empty() {
                self.expect(Punctuator::Comma)?;
                if self.eat(Punctuator::RBrace)? {
                    break;
                }
            }
            let property = self.parse_object_member(cover)?;
            if let ObjectProperty::Property(property) = &property {
                if is_proto_property(property) {
                    if has_proto && cover.double_proto.is_none() {
                        cover.double_proto = Some(property.key.span().start);
                    }
                    has_proto = true;
                }
            }
            properties.push(property);
        }
        Ok(Expression::ObjectExpression {
            properties,
            span: self.finish_span(start),
        })
    }

    /// Is the current `async`/`get`/`set`/`static` a modifier rather than a property name?
    pub(crate) fn is_modifier(&mut self, allow_newline: bool) -> ParseResult<bool> {
        let next = self.peek()?;
        if next.is_eof() || (!allow_newline && next.newline_before) {
            return Ok(false);
        }
        Ok(!matches!(
            next.kind,
            TokenKind::Punctuator(
                Punctuator::LParen
                    | Punctuator::Comma
                    | Punctuator::RBrace
                    | Punctuator::Colon
                    | Punctuator::Assign
                    | Punctuator::Semicolon
            )
        ))
    }

    fn parse_object_member(&mut self, cover: &mut CoverGrammar) -> ParseResult<ObjectProperty> {
        let start = self.current.start;
        if self.check(Punctuator::Spread) {
            self.require_version(EcmaVersion::ES2018)?;
            self.next()?;
            let argument = self.parse_maybe_assign(false, Some(&mut *cover))?;
            if self.check(Punctuator::Comma) && cover.trailing_comma.is_none() {
                cover.trailing_comma = Some(self.current.start);
            }
            return Ok(ObjectProperty::SpreadElement {
                argument,
                span: self.finish_span(start),
            });
        }

        let mut is_async = false;
        let mut is_generator = false;
        let mut kind = PropertyKind::Init;
        if self.is_contextual("async")
            && self.options.ecma_version >= EcmaVersion::ES2017
            && self.is_modifier(false)?
        {
            self.next()?;
            is_async = true;
        }
        if self.check(Punctuator::Star) {
            if is_async {
                self.require_version(EcmaVersion::ES2018)?;
            }
            self.next()?;
            is_generator = true;
        }
        if !is_async
            && !is_generator
            && (self.is_contextual("get") || self.is_contextual("set"))
            && self.is_modifier(true)?
        {
            kind = if self.is_contextual("get") {
                PropertyKind::Get
            } else {
                PropertyKind::Set
            };
            self.next()?;
        }

        let key_is_identifier = matches!(self.current.kind, TokenKind::Identifier(_));
        let (key, computed) = self.parse_property_name()?;

        if is_async || is_generator || kind != PropertyKind::Init || self.check(Punctuator::LParen) {
            if !self.check(Punctuator::LParen) {
                return Err(self.unexpected());
            }
            let value = self.parse_method_function(is_async, is_generator, false)?;
            match kind {
                PropertyKind::Get => self.check_accessor_params(true, &value)?,
                PropertyKind::Set => self.check_accessor_params(false, &value)?,
                PropertyKind::Init => {}
            }
            return Ok(ObjectProperty::Property(Property {
                key,
                value: Expression::FunctionExpression(Box::new(value)),
                kind,
                method: kind == PropertyKind::Init,
                shorthand: false,
                computed,
                span: self.finish_span(start),
            }));
        }

        if self.eat(Punctuator::Colon)? {
            let value = self.parse_maybe_assign(false, Some(&mut *cover))?;
            return Ok(ObjectProperty::Property(Property {
                key,
                value,
                kind,
                method: false,
                shorthand: false,
                computed,
                span: self.finish_span(start),
            }));
        }

        // shorthand `{ a }` or cover-grammar `{ a = 1 }`
        let identifier = match &key {
            Expression::Identifier(identifier) if key_is_identifier && !computed => identifier.clone(),
            _ => return Err(self.unexpected()),
        };
        self.check_unreserved(&identifier.name, identifier.span.start)?;
        let value = if self.check(Punctuator::Assign) {
            if cover.shorthand_assign.is_none() {
                cover.shorthand_assign = Some(self.current.start);
            }
            self.next()?;
            let right = self.parse_maybe_assign(false, None)?;
            Expression::AssignmentExpression {
                operator: AssignmentOperator::Assign,
                left: Box::new(Pattern::Identifier(identifier)),
                right: Box::new(right),
                span: self.finish_span(start),
            }
        } else {
            Expression::Identifier(identifier)
        };
        Ok(ObjectProperty::Property(Property {
            key,
            value,
            kind,
            method: false,
            shorthand: true,
            computed: false,
            span: self.finish_span(start),
        }))
    }

    /// Property key: identifier name, string, number, or `[computed]`
    pub(crate) fn parse_property_name(&mut self) -> ParseResult<(Expression, bool)> {
        match self.current.kind {
            TokenKind::Punctuator(Punctuator::LBracket) => {
                self.next()?;
                let key = self.parse_maybe_assign(false, None)?;
                self.expect(Punctuator::RBracket)?;
                Ok((key, true))
            }
            TokenKind::Number(_) | TokenKind::BigInt(_) | TokenKind::String(_) => {
                Ok((self.parse_literal()?, false))
            }
            TokenKind::Identifier(_) | TokenKind::Keyword(_) => {
                Ok((Expression::Identifier(self.parse_identifier_name()?), false))
            }
            _ => Err(self.unexpected()),
        }
    }

    // Reinterpreting expressions as assignment targets

    /// Convert an expression parsed before a `=` into a destructuring target
    pub(crate) fn expression_to_pattern(&self, expression: Expression) -> ParseResult<Pattern> {
        match expression {
            Expression::Identifier(identifier) => {
                self.check_assign_name(&identifier)?;
                Ok(Pattern::Identifier(identifier))
            }
            member @ Expression::MemberExpression { .. } => Ok(Pattern::Expression(Box::new(member))),
            Expression::ObjectExpression { properties, span } => {
                let count = properties.len();
                let mut patterns = Vec::with_capacity(count);
                for (index, property) in properties.into_iter().enumerate() {
                    patterns.push(self.object_property_to_pattern(property, index + 1 == count)?);
                }
                Ok(Pattern::ObjectPattern {
                    properties: patterns,
                    span,
                })
            }
            Expression::ArrayExpression { elements, span } => {
                let count = elements.len();
                let mut patterns = Vec::with_capacity(count);
                for (index, element) in elements.into_iter().enumerate() {
                    let pattern = match element {
                        None => None,
                        Some(Expression::SpreadElement { argument, span }) => {
                            if index + 1 != count {
                                return Err(syntax_error(
                                    "Rest element must be last element",
                                    span.start,
                                ));
                            }
                            let argument = self.expression_to_pattern(*argument)?;
                            if let Pattern::AssignmentPattern { span, .. } = &argument {
                                return Err(syntax_error(
                                    "Rest elements cannot have a default value",
                                    span.start,
                                ));
                            }
                            Some(Pattern::RestElement {
                                argument: Box::new(argument),
                                span,
                            })
                        }
                        Some(element) => Some(self.expression_to_pattern(element)?),
                    };
                    patterns.push(pattern);
                }
                Ok(Pattern::ArrayPattern {
                    elements: patterns,
                    span,
                })
            }
            Expression::AssignmentExpression {
                operator,
                left,
                right,
                span,
            } => {
                if operator != AssignmentOperator::Assign {
                    return Err(syntax_error(
                        "Only '=' operator can be used for specifying default value.",
                        left.span().end,
                    ));
                }
                Ok(Pattern::AssignmentPattern { left, right, span })
            }
            Expression::ParenthesizedExpression { expression, span } => {
                if matches!(
                    expression.unparenthesized(),
                    Expression::Identifier(_) | Expression::MemberExpression { .. }
                ) {
                    self.into_simple_target(*expression)
                } else {
                    Err(syntax_error("Parenthesized pattern", span.start))
                }
            }
            other => Err(syntax_error("Assigning to rvalue", other.span().start)),
        }
    }

    fn object_property_to_pattern(
        &self,
        property: ObjectProperty,
        is_last: bool,
    ) -> ParseResult<ObjectPatternProperty> {
        match property {
            ObjectProperty::Property(Property {
                key,
                value,
                kind,
                method,
                shorthand,
                computed,
                span,
            }) => {
                if kind != PropertyKind::Init {
                    return Err(syntax_error(
                        "Object pattern can't contain getter or setter",
                        key.span().start,
                    ));
                }
                if method {
                    return Err(syntax_error("Object pattern can't contain methods", key.span().start));
                }
                Ok(ObjectPatternProperty::Property(PatternProperty {
                    key,
                    value: self.expression_to_pattern(value)?,
                    shorthand,
                    computed,
                    span,
                }))
            }
            ObjectProperty::SpreadElement { argument, span } => {
                if !is_last {
                    return Err(syntax_error("Rest element must be last element", span.start));
                }
                let argument = self.expression_to_pattern(argument)?;
                match &argument {
                    Pattern::Identifier(_) | Pattern::Expression(_) => {}
                    Pattern::AssignmentPattern { span, .. } => {
                        return Err(syntax_error(
                            "Rest elements cannot have a default value",
                            span.start,
                        ))
                    }
                    other => {
                        return Err(syntax_error(
                            "`...` must be followed by an assignable reference in assignment contexts",
                            other.span().start,
                        ))
                    }
                }
                Ok(ObjectPatternProperty::RestElement {
                    argument: Box::new(argument),
                    span,
                })
            }
        }
    }

    /// Identifier or member expression, possibly parenthesized
    pub(crate) fn check_simple_target(&self, expression: &Expression) -> ParseResult<()> {
        match expression.unparenthesized() {
            Expression::Identifier(identifier) => self.check_assign_name(identifier),
            Expression::MemberExpression { .. } => Ok(()),
            _ => Err(syntax_error("Assigning to rvalue", expression.span().start)),
        }
    }

    /// Target of a compound assignment; parentheses around it are dropped
    fn into_simple_target(&self, expression: Expression) -> ParseResult<Pattern> {
        self.check_simple_target(&expression)?;
        let mut expression = expression;
        while let Expression::ParenthesizedExpression { expression: inner, .. } = expression {
            expression = *inner;
        }
        Ok(match expression {
            Expression::Identifier(identifier) => Pattern::Identifier(identifier),
            other => Pattern::Expression(Box::new(other)),
        })
    }
}

fn is_proto_property(property: &Property) -> bool {
    if property.computed || property.shorthand || property.method || property.kind != PropertyKind::Init {
        return false;
    }
    match &property.key {
        Expression::Identifier(identifier) => identifier.name == "__proto__",
        Expression::Literal(Literal {
            value: LiteralValue::String(value),
            ..
        }) => value == "__proto__",
        _ => false,
    }
}
