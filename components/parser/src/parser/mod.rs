//! Recursive descent parser for ECMAScript
//!
//! Statements and declarations are parsed one function per production;
//! binary expressions use precedence climbing over [`binary_precedence`].
//! The parser pulls tokens from the [`Lexer`] on demand and asks it to
//! re-scan `/` and template `}` tokens when the grammar calls for it.
//!
//! Arrow function heads are recognized speculatively: the parser snapshots
//! itself, tries a formal parameter list followed by `=>`, and restores the
//! snapshot if that fails. Failed attempts are memoized per offset and
//! context so no position is tried twice.

mod expression;
mod function;
mod module;
mod statement;

use crate::ast::*;
use crate::error::*;
use crate::lexer::{Keyword, Lexer, LexerSnapshot, Punctuator, Token, TokenKind};
use crate::options::{EcmaVersion, ParseOptions};
use core_types::{ParseError, SourcePosition, Span};
use std::collections::HashSet;

/// Deepest recursion the grammar engine descends into before giving up.
///
/// Counted at each assignment, unary and primary expression, statement and
/// binding pattern, so one pair of parentheses costs three levels.
pub const MAX_NESTING_DEPTH: usize = 4096;

/// Stack reserved for the thread the grammar runs on; large enough for
/// [`MAX_NESTING_DEPTH`] levels in unoptimized builds
const PARSER_STACK_SIZE: usize = 256 * 1024 * 1024;

/// Words reserved only in strict mode code
const STRICT_RESERVED_WORDS: &[&str] = &[
    "implements",
    "interface",
    "let",
    "package",
    "private",
    "protected",
    "public",
    "static",
    "yield",
];

/// Syntactic context, swapped in and out around functions and classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub(crate) struct Context {
    /// Strict mode code
    pub strict: bool,
    /// Inside any function body (including arrows)
    pub in_function: bool,
    /// `await` expressions allowed
    pub in_async: bool,
    /// `yield` expressions allowed
    pub in_generator: bool,
    /// `super.x` / `super[x]` allowed
    pub allow_super_property: bool,
    /// `super(...)` allowed
    pub allow_super_call: bool,
    /// `new.target` allowed
    pub allow_new_target: bool,
}

/// Where a statement appears; restricts which declarations may start it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StatementContext {
    /// Directly in the program body
    TopLevel,
    /// In a block, function body or switch case
    List,
    /// Body of an `if` or `else`
    If,
    /// Body of a labeled statement
    Label,
    /// Body of a loop or `with`
    Body,
}

impl StatementContext {
    fn is_single_statement(self) -> bool {
        matches!(
            self,
            StatementContext::If | StatementContext::Label | StatementContext::Body
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LabelKind {
    Loop,
    Switch,
}

/// Entry of the label set used to validate `break` and `continue`
#[derive(Debug, Clone)]
pub(crate) struct Label {
    pub name: Option<String>,
    pub kind: Option<LabelKind>,
    pub statement_start: usize,
}

/// Errors that are only errors if an expression is not reinterpreted as a pattern
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct CoverGrammar {
    /// `{ a = 1 }` outside a destructuring target
    pub shorthand_assign: Option<SourcePosition>,
    /// Second `__proto__: ...` in an object literal
    pub double_proto: Option<SourcePosition>,
    /// Comma after a spread that may become a rest element
    pub trailing_comma: Option<SourcePosition>,
}

struct ParserSnapshot {
    lexer: LexerSnapshot,
    current: Token,
    prev_end: SourcePosition,
    yield_pos: Option<SourcePosition>,
    await_pos: Option<SourcePosition>,
}

/// JavaScript parser
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    source: &'a str,
    options: ParseOptions,
    /// Token under the cursor
    current: Token,
    /// End of the last consumed token
    prev_end: SourcePosition,
    context: Context,
    labels: Vec<Label>,
    /// Position of the first yield expression since the last reset
    yield_pos: Option<SourcePosition>,
    /// Position of the first await expression since the last reset
    await_pos: Option<SourcePosition>,
    exported_names: HashSet<String>,
    /// Arrow-head speculation failures, keyed by offset and context
    failed_arrows: HashSet<(usize, Context)>,
    /// Current recursion depth, see [`MAX_NESTING_DEPTH`]
    depth: usize,
}

impl<'a> Parser<'a> {
    /// Create a new parser for the given source code
    pub fn new(source: &'a str, options: ParseOptions) -> Self {
        let context = Context {
            strict: options.is_module(),
            ..Context::default()
        };
        Self {
            lexer: Lexer::with_options(source, &options),
            source,
            options,
            current: Token {
                kind: TokenKind::EOF,
                start: SourcePosition::START,
                end: SourcePosition::START,
                raw: 0..0,
                newline_before: false,
                escaped: false,
                legacy_octal: false,
            },
            prev_end: SourcePosition::START,
            context,
            labels: Vec::new(),
            yield_pos: None,
            await_pos: None,
            exported_names: HashSet::new(),
            failed_arrows: HashSet::new(),
            depth: 0,
        }
    }

    /// Parse the whole source into a [`Program`]
    ///
    /// The grammar runs on a scoped thread with a fixed stack so that input
    /// nested up to [`MAX_NESTING_DEPTH`] parses regardless of the caller's
    /// stack size. If the thread cannot be spawned the parse runs inline.
    pub fn parse(&mut self) -> ParseResult<Program> {
        let spawned = std::thread::scope(|scope| {
            std::thread::Builder::new()
                .name("parser".to_string())
                .stack_size(PARSER_STACK_SIZE)
                .spawn_scoped(scope, || self.parse_top_level())
                .map(|handle| handle.join())
        });
        match spawned {
            Ok(Ok(result)) => result,
            Ok(Err(panic)) => std::panic::resume_unwind(panic),
            Err(_) => self.parse_top_level(),
        }
    }

    fn parse_top_level(&mut self) -> ParseResult<Program> {
        self.current = self.lexer.next_token()?;
        let (body, _) = self.parse_statement_list(None, StatementContext::TopLevel, true)?;
        Ok(Program {
            body,
            source_type: self.options.source_type,
            span: Span::new(SourcePosition::START, self.lexer.end_position()),
        })
    }

    /// Parse statements until `end` or EOF, optionally starting with a directive prologue.
    ///
    /// Returns the statements and the position of a `"use strict"` directive,
    /// if one was found. Strictness switches on for the rest of the list.
    fn parse_statement_list(
        &mut self,
        end: Option<Punctuator>,
        context: StatementContext,
        directives: bool,
    ) -> ParseResult<(Vec<Statement>, Option<SourcePosition>)> {
        let mut body = Vec::new();
        let mut use_strict = None;
        let mut in_prologue = directives;
        let mut octal_in_prologue: Option<SourcePosition> = None;

        loop {
            match end {
                Some(p) if self.current.is_punctuator(p) => break,
                _ if self.current.is_eof() => {
                    if end.is_some() {
                        return Err(self.unexpected());
                    }
                    break;
                }
                _ => {}
            }

            if in_prologue {
                if let TokenKind::String(_) = self.current.kind {
                    let token = self.current.clone();
                    let statement = self.parse_directive_candidate(&token)?;
                    if let Statement::ExpressionStatement {
                        directive: Some(directive),
                        ..
                    } = &statement
                    {
                        if token.legacy_octal && octal_in_prologue.is_none() {
                            octal_in_prologue = Some(token.start);
                        }
                        if directive == "use strict" {
                            if let Some(position) = octal_in_prologue {
                                return Err(syntax_error("Octal literal in strict mode", position));
                            }
                            self.context.strict = true;
                            use_strict.get_or_insert(token.start);
                        }
                    } else {
                        in_prologue = false;
                    }
                    body.push(statement);
                    continue;
                }
                in_prologue = false;
            }

            body.push(self.parse_statement(context)?);
        }

        Ok((body, use_strict))
    }

    /// A statement starting with a string literal; a directive if the literal is the whole expression
    fn parse_directive_candidate(&mut self, token: &Token) -> ParseResult<Statement> {
        let start = token.start;
        let expression = self.parse_expression(false, None)?;
        self.consume_semicolon()?;
        let directive = match &expression {
            Expression::Literal(Literal {
                value: LiteralValue::String(_),
                raw,
                span,
            }) if span.start == start && span.end == token.end => {
                Some(raw[1..raw.len() - 1].to_string())
            }
            _ => None,
        };
        Ok(Statement::ExpressionStatement {
            expression,
            directive,
            span: self.finish_span(start),
        })
    }

    /// Run `parse` one nesting level deeper, failing past [`MAX_NESTING_DEPTH`]
    fn guarded<T>(&mut self, parse: impl FnOnce(&mut Self) -> ParseResult<T>) -> ParseResult<T> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(syntax_error(
                "Maximum nesting depth exceeded",
                self.current.start,
            ));
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    // Token navigation

    /// Consume the current token, returning it
    fn next(&mut self) -> ParseResult<Token> {
        let next = self.lexer.next_token()?;
        let token = std::mem::replace(&mut self.current, next);
        self.prev_end = token.end;
        Ok(token)
    }

    fn peek(&mut self) -> ParseResult<&Token> {
        self.lexer.peek()
    }

    fn check(&self, p: Punctuator) -> bool {
        self.current.is_punctuator(p)
    }

    fn check_keyword(&self, k: Keyword) -> bool {
        self.current.is_keyword(k)
    }

    fn is_contextual(&self, name: &str) -> bool {
        self.current.is_contextual(name)
    }

    fn eat(&mut self, p: Punctuator) -> ParseResult<bool> {
        if self.check(p) {
            self.next()?;
            return Ok(true);
        }
        Ok(false)
    }

    fn eat_keyword(&mut self, k: Keyword) -> ParseResult<bool> {
        if self.check_keyword(k) {
            self.next()?;
            return Ok(true);
        }
        Ok(false)
    }

    fn expect(&mut self, p: Punctuator) -> ParseResult<Token> {
        if self.check(p) {
            return self.next();
        }
        Err(unexpected_token(
            &format!("'{}'", p.as_str()),
            &self.describe(&self.current),
            self.current.start,
        ))
    }

    fn expect_keyword(&mut self, k: Keyword) -> ParseResult<Token> {
        if self.check_keyword(k) {
            return self.next();
        }
        Err(unexpected_token(
            &format!("'{}'", k.as_str()),
            &self.describe(&self.current),
            self.current.start,
        ))
    }

    fn expect_contextual(&mut self, name: &str) -> ParseResult<Token> {
        if self.is_contextual(name) {
            return self.next();
        }
        Err(unexpected_token(
            &format!("'{}'", name),
            &self.describe(&self.current),
            self.current.start,
        ))
    }

    /// Span from `start` to the end of the last consumed token
    fn finish_span(&self, start: SourcePosition) -> Span {
        Span::new(start, self.prev_end)
    }

    fn describe(&self, token: &Token) -> String {
        if token.is_eof() {
            "end of input".to_string()
        } else {
            format!("'{}'", self.lexer.raw(token))
        }
    }

    fn unexpected(&self) -> ParseError {
        self.unexpected_at(&self.current)
    }

    fn unexpected_at(&self, token: &Token) -> ParseError {
        if token.is_eof() {
            unexpected_eof(token.start)
        } else {
            syntax_error(
                format!("Unexpected token {}", self.describe(token)),
                token.start,
            )
        }
    }

    /// Reject syntax newer than the configured edition
    fn require_version(&self, version: EcmaVersion) -> ParseResult<()> {
        if self.options.ecma_version >= version {
            return Ok(());
        }
        Err(syntax_error(
            format!(
                "Unexpected token {} (requires ecmaVersion {} or later)",
                self.describe(&self.current),
                version
            ),
            self.current.start,
        ))
    }

    // Automatic semicolon insertion

    fn can_insert_semicolon(&self) -> bool {
        self.current.is_eof() || self.check(Punctuator::RBrace) || self.current.newline_before
    }

    /// Consume a `;`, or accept its absence where ASI applies
    fn consume_semicolon(&mut self) -> ParseResult<()> {
        if self.eat(Punctuator::Semicolon)? || self.can_insert_semicolon() {
            return Ok(());
        }
        Err(self.unexpected())
    }

    // Context management

    /// Run `f` with a different syntactic context, restoring it afterwards
    fn with_context<T>(
        &mut self,
        context: Context,
        f: impl FnOnce(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<T> {
        let saved = std::mem::replace(&mut self.context, context);
        let result = f(self);
        self.context = saved;
        result
    }

    /// Like [`Parser::with_context`], also giving the function body a fresh label set
    fn with_function_context<T>(
        &mut self,
        context: Context,
        f: impl FnOnce(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<T> {
        let labels = std::mem::take(&mut self.labels);
        let result = self.with_context(context, f);
        self.labels = labels;
        result
    }

    fn can_await(&self) -> bool {
        self.context.in_async
            || (self.options.allow_await_outside_function && !self.context.in_function)
    }

    // Speculation

    fn snapshot(&self) -> ParserSnapshot {
        ParserSnapshot {
            lexer: self.lexer.snapshot(),
            current: self.current.clone(),
            prev_end: self.prev_end,
            yield_pos: self.yield_pos,
            await_pos: self.await_pos,
        }
    }

    fn restore(&mut self, snapshot: ParserSnapshot) {
        self.lexer.restore(snapshot.lexer);
        self.current = snapshot.current;
        self.prev_end = snapshot.prev_end;
        self.yield_pos = snapshot.yield_pos;
        self.await_pos = snapshot.await_pos;
    }

    // Identifier validation

    /// Reject reserved words used as identifier references or bindings
    fn check_unreserved(&self, name: &str, position: SourcePosition) -> ParseResult<()> {
        if self.context.in_generator && name == "yield" {
            return Err(syntax_error(
                "Cannot use 'yield' as identifier inside a generator",
                position,
            ));
        }
        if self.context.in_async && name == "await" {
            return Err(syntax_error(
                "Cannot use 'await' as identifier inside an async function",
                position,
            ));
        }
        if Keyword::from_name(name).is_some() {
            return Err(syntax_error(
                format!("Unexpected keyword '{}'", name),
                position,
            ));
        }
        if self.context.strict && STRICT_RESERVED_WORDS.contains(&name) {
            return Err(syntax_error(
                format!("The keyword '{}' is reserved", name),
                position,
            ));
        }
        if name == "await" && (self.options.is_module() || self.can_await()) {
            return Err(syntax_error(
                "Cannot use keyword 'await' outside an async function",
                position,
            ));
        }
        Ok(())
    }

    /// Identifier reference or binding name (validated against reserved words)
    fn parse_identifier(&mut self) -> ParseResult<Identifier> {
        let name = match self.current.identifier_name() {
            Some(name) => name.to_string(),
            None => return Err(self.unexpected()),
        };
        self.check_unreserved(&name, self.current.start)?;
        let token = self.next()?;
        Ok(Identifier {
            name,
            span: token.span(),
        })
    }

    /// IdentifierName: any identifier or reserved word (property names, import names)
    fn parse_identifier_name(&mut self) -> ParseResult<Identifier> {
        let name = match &self.current.kind {
            TokenKind::Identifier(name) => name.clone(),
            TokenKind::Keyword(keyword) => keyword.as_str().to_string(),
            _ => return Err(self.unexpected()),
        };
        let token = self.next()?;
        Ok(Identifier {
            name,
            span: token.span(),
        })
    }

    /// Binding identifier with strict-mode and lexical-name checks
    fn parse_binding_identifier(&mut self, lexical: bool) -> ParseResult<Identifier> {
        let identifier = self.parse_identifier()?;
        self.check_binding_name(&identifier, lexical)?;
        Ok(identifier)
    }

    fn check_binding_name(&self, identifier: &Identifier, lexical: bool) -> ParseResult<()> {
        let name = identifier.name.as_str();
        if self.context.strict && (name == "eval" || name == "arguments") {
            return Err(syntax_error(
                format!("Binding {} in strict mode", name),
                identifier.span.start,
            ));
        }
        if lexical && name == "let" {
            return Err(syntax_error(
                "let is disallowed as a lexically bound name",
                identifier.span.start,
            ));
        }
        Ok(())
    }

    fn check_assign_name(&self, identifier: &Identifier) -> ParseResult<()> {
        let name = identifier.name.as_str();
        if self.context.strict && (name == "eval" || name == "arguments") {
            return Err(syntax_error(
                format!("Assigning to {} in strict mode", name),
                identifier.span.start,
            ));
        }
        Ok(())
    }

    /// Raise the first cover-grammar error recorded in `cover`
    fn check_cover_errors(&self, cover: &CoverGrammar) -> ParseResult<()> {
        if let Some(position) = cover.shorthand_assign {
            return Err(syntax_error(
                "Shorthand property assignments are valid only in destructuring patterns",
                position,
            ));
        }
        if let Some(position) = cover.double_proto {
            return Err(syntax_error("Redefinition of __proto__ property", position));
        }
        Ok(())
    }
}

/// Binary operator precedence table; higher binds tighter.
///
/// `in` is excluded when parsing a `for` head (`no_in`).
pub(crate) fn binary_precedence(token: &Token, no_in: bool) -> Option<u8> {
    match &token.kind {
        TokenKind::Punctuator(p) => match p {
            Punctuator::NullishCoalesce => Some(1),
            Punctuator::OrOr => Some(2),
            Punctuator::AndAnd => Some(3),
            Punctuator::Or => Some(4),
            Punctuator::Xor => Some(5),
            Punctuator::And => Some(6),
            Punctuator::EqEq | Punctuator::NotEq | Punctuator::EqEqEq | Punctuator::NotEqEq => {
                Some(7)
            }
            Punctuator::Lt | Punctuator::Gt | Punctuator::LtEq | Punctuator::GtEq => Some(8),
            Punctuator::LtLt | Punctuator::GtGt | Punctuator::GtGtGt => Some(9),
            Punctuator::Plus | Punctuator::Minus => Some(10),
            Punctuator::Star | Punctuator::Slash | Punctuator::Percent => Some(11),
            Punctuator::StarStar => Some(12),
            _ => None,
        },
        TokenKind::Keyword(Keyword::Instanceof) => Some(8),
        TokenKind::Keyword(Keyword::In) if !no_in => Some(8),
        _ => None,
    }
}

/// Parse a complete program.
///
/// # Examples
///
/// ```
/// use parser::{parse_program, ParseOptions};
///
/// let program = parse_program("let x = 1;", &ParseOptions::default()).unwrap();
/// assert_eq!(program.body.len(), 1);
/// ```
pub fn parse_program(source: &str, options: &ParseOptions) -> ParseResult<Program> {
    Parser::new(source, *options).parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::SourceType;
    use core_types::ErrorKind;

    fn parse(source: &str) -> Program {
        parse_program(source, &ParseOptions::default())
            .unwrap_or_else(|e| panic!("failed to parse {:?}: {}", source, e))
    }

    fn parse_module(source: &str) -> Program {
        parse_program(source, &ParseOptions::module())
            .unwrap_or_else(|e| panic!("failed to parse {:?}: {}", source, e))
    }

    fn parse_err(source: &str) -> ParseError {
        match parse_program(source, &ParseOptions::default()) {
            Ok(program) => panic!("expected error for {:?}, got {:?}", source, program),
            Err(err) => err,
        }
    }

    fn first_expression(program: &Program) -> &Expression {
        match &program.body[0] {
            Statement::ExpressionStatement { expression, .. } => expression,
            other => panic!("expected expression statement, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_empty_program() {
        let program = parse("");
        assert!(program.body.is_empty());
        assert_eq!(program.span.start.offset, 0);
        assert_eq!(program.span.end.offset, 0);
        assert_eq!(program.source_type, SourceType::Script);
    }

    #[test]
    fn test_parse_whitespace_and_comments_only() {
        let program = parse("  // nothing\n/* here */  ");
        assert!(program.body.is_empty());
        assert_eq!(program.span.end.offset, 25);
    }

    #[test]
    fn test_newline_separates_statements() {
        let program = parse("a\nb");
        assert_eq!(program.body.len(), 2);
        assert!(program
            .body
            .iter()
            .all(|s| matches!(s, Statement::ExpressionStatement { .. })));
    }

    #[test]
    fn test_missing_semicolon_on_same_line() {
        let err = parse_err("a b");
        assert!(matches!(err.kind, ErrorKind::SyntaxError));
        assert_eq!(err.position.offset, 2);
    }

    #[test]
    fn test_precedence_multiplicative_binds_tighter() {
        let program = parse("1 + 2 * 3");
        match first_expression(&program) {
            Expression::BinaryExpression {
                operator: BinaryOperator::Add,
                right,
                ..
            } => assert!(matches!(
                **right,
                Expression::BinaryExpression {
                    operator: BinaryOperator::Mul,
                    ..
                }
            )),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_exponent_is_right_associative() {
        let program = parse("a ** b ** c");
        match first_expression(&program) {
            Expression::BinaryExpression {
                operator: BinaryOperator::Exp,
                left,
                right,
                ..
            } => {
                assert!(matches!(**left, Expression::Identifier(_)));
                assert!(matches!(
                    **right,
                    Expression::BinaryExpression {
                        operator: BinaryOperator::Exp,
                        ..
                    }
                ));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_unary_left_of_exponent_is_error() {
        parse_err("-a ** 2");
        parse("(-a) ** 2");
        parse("2 ** -a");
    }

    #[test]
    fn test_nullish_cannot_mix_with_logical() {
        parse_err("a ?? b || c");
        parse_err("a || b ?? c");
        parse_err("a && b ?? c");
        parse("(a ?? b) || c");
        parse("a ?? (b && c)");
    }

    #[test]
    fn test_incomplete_function_error_offset() {
        let err = parse_err("function (");
        assert!(matches!(err.kind, ErrorKind::SyntaxError));
        assert!(err.position.offset >= 9);
    }

    #[test]
    fn test_division_versus_regexp() {
        let program = parse("a / b");
        assert!(matches!(
            first_expression(&program),
            Expression::BinaryExpression {
                operator: BinaryOperator::Div,
                ..
            }
        ));

        let program = parse("f(/x/)");
        match first_expression(&program) {
            Expression::CallExpression { arguments, .. } => match &arguments[0] {
                Expression::Literal(Literal {
                    value: LiteralValue::RegExp { pattern, flags },
                    ..
                }) => {
                    assert_eq!(pattern, "x");
                    assert!(flags.is_empty());
                }
                other => panic!("expected regexp, got {:?}", other),
            },
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_regexp_after_statement_keywords() {
        parse("return_ = 1; if (x) /re/.test(y)");
        let program = parse("x = a\n/b/g");
        // no ASI: `a / b / g`
        assert_eq!(program.body.len(), 1);
    }

    #[test]
    fn test_directive_prologue_sets_strict() {
        let program = parse("'use strict'; x");
        match &program.body[0] {
            Statement::ExpressionStatement { directive, .. } => {
                assert_eq!(directive.as_deref(), Some("use strict"));
            }
            other => panic!("unexpected {:?}", other),
        }
        parse_err("'use strict'; with (a) {}");
        parse_err("'use strict'; var x = 010;");
        parse("with (a) {}");
        parse("var x = 010;");
    }

    #[test]
    fn test_parenthesized_string_is_not_directive() {
        let program = parse("('use strict'); with (a) {}");
        match &program.body[0] {
            Statement::ExpressionStatement { directive, .. } => assert!(directive.is_none()),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_octal_escape_before_use_strict() {
        let err = parse_err("'\\01'; 'use strict';");
        assert_eq!(err.message, "Octal literal in strict mode");
    }

    #[test]
    fn test_reserved_words() {
        parse("var let = 1, yield = 2, await = 3;");
        parse_err("'use strict'; var let = 1;");
        parse_err("'use strict'; var yield = 1;");
        parse_err("var if = 1;");
        parse_err("var \\u0069f = 1;");
    }

    #[test]
    fn test_eval_and_arguments_in_strict_mode() {
        parse("eval = 1; var arguments;");
        parse_err("'use strict'; eval = 1;");
        parse_err("'use strict'; var arguments;");
        parse_err("'use strict'; arguments++;");
    }

    #[test]
    fn test_module_source_type() {
        let program = parse_module("import a from 'a'; export default a;");
        assert_eq!(program.source_type, SourceType::Module);
        assert_eq!(program.body.len(), 2);

        // modules are strict and reserve await
        assert!(parse_program("with (a) {}", &ParseOptions::module()).is_err());
        assert!(parse_program("var await;", &ParseOptions::module()).is_err());
        parse_err("import a from 'a';");
    }

    #[test]
    fn test_version_gating() {
        let es2019 = ParseOptions::default().with_ecma_version(EcmaVersion::ES2019);
        assert!(parse_program("a ?? b", &es2019).is_err());
        assert!(parse_program("a?.b", &es2019).is_err());
        assert!(parse_program("1n", &es2019).is_err());
        assert!(parse_program("try {} catch {}", &es2019).is_ok());

        let es2015 = ParseOptions::default().with_ecma_version(EcmaVersion::ES2015);
        assert!(parse_program("a ** b", &es2015).is_err());
        assert!(parse_program("async function f() {}", &es2015).is_err());

        assert!(parse_program("a ||= b", &ParseOptions::default()).is_err());
        let es2021 = ParseOptions::default().with_ecma_version(EcmaVersion::ES2021);
        assert!(parse_program("a ||= b", &es2021).is_ok());
    }

    #[test]
    fn test_return_outside_function() {
        parse_err("return 1;");
        let options = ParseOptions {
            allow_return_outside_function: true,
            ..ParseOptions::default()
        };
        assert!(parse_program("return 1;", &options).is_ok());
    }

    #[test]
    fn test_await_outside_function_option() {
        let program = parse("await(1)");
        assert!(matches!(
            first_expression(&program),
            Expression::CallExpression { .. }
        ));
        let options = ParseOptions {
            allow_await_outside_function: true,
            ..ParseOptions::default()
        };
        let program = parse_program("await x", &options).unwrap();
        assert!(matches!(
            first_expression(&program),
            Expression::AwaitExpression { .. }
        ));
    }

    #[test]
    fn test_hashbang_option() {
        let options = ParseOptions {
            allow_hash_bang: true,
            ..ParseOptions::default()
        };
        let program = parse_program("#!/usr/bin/env node\nx", &options).unwrap();
        assert_eq!(program.body.len(), 1);
        parse_err("#!/usr/bin/env node\nx");
    }

    #[test]
    fn test_arrow_speculation_failure_is_memoized() {
        // each nested level would re-parse its children without the memo
        let depth = 40;
        let source = format!("{}x{}", "(a = ".repeat(depth), ")".repeat(depth));
        let program = parse(&source);
        assert_eq!(program.body.len(), 1);
    }

    fn nested(open: &str, inner: &str, close: &str, depth: usize) -> String {
        format!("{}{}{}", open.repeat(depth), inner, close.repeat(depth))
    }

    #[test]
    fn test_deep_nesting_is_a_syntax_error() {
        let sources = [
            nested("(", "a", ")", 10_000),
            nested("[", "a", "]", 10_000),
            nested("{", "", "}", 10_000),
            nested("!", "a", "", 20_000),
            nested("new ", "a", "", 10_000),
            nested("a = ", "1", "", 10_000),
            nested("a ** ", "a", "", 10_000),
            nested("x => ", "x", "", 10_000),
            format!("let {} = b;", nested("[", "a", "]", 10_000)),
        ];
        for source in &sources {
            let err = parse_err(source);
            assert_eq!(err.kind, ErrorKind::SyntaxError);
            assert_eq!(err.message, "Maximum nesting depth exceeded");
        }
    }

    #[test]
    fn test_nesting_below_limit_parses() {
        let program = parse(&nested("(", "a", ")", 1000));
        assert_eq!(program.body.len(), 1);

        let program = parse(&nested("[", "a", "]", 1000));
        assert_eq!(program.body.len(), 1);

        let program = parse(&nested("{", "a", "}", 1000));
        assert_eq!(program.body.len(), 1);
    }

    #[test]
    fn test_depth_is_restored_after_errors() {
        // every level fails an arrow head inside a binding pattern; a leaked
        // level per failure would push this past the limit
        let source = nested("([a.b] + ", "c", ")", 1250);
        let program = parse(&source);
        assert_eq!(program.body.len(), 1);
    }

    #[test]
    fn test_binary_precedence_table() {
        let token = |source: &str| Lexer::new(source).next_token().unwrap();
        assert_eq!(binary_precedence(&token("??"), false), Some(1));
        assert_eq!(binary_precedence(&token("||"), false), Some(2));
        assert_eq!(binary_precedence(&token("**"), false), Some(12));
        assert_eq!(binary_precedence(&token("in"), false), Some(8));
        assert_eq!(binary_precedence(&token("in"), true), None);
        assert_eq!(binary_precedence(&token("="), false), None);
    }
}
