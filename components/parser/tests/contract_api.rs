//! Contract tests for parser API
//!
//! These tests verify the parser component implements its contract correctly.

use parser::ast::{Expression, LiteralValue, Statement};
use parser::{
    parse_program, ErrorKind, Keyword, Lexer, ParseError, ParseOptions, Parser, Punctuator,
    SourceType, Token, TokenKind,
};

fn tokens(source: &str) -> Vec<TokenKind> {
    let mut lexer = Lexer::new(source);
    let mut kinds = Vec::new();
    loop {
        let token = lexer.next_token().expect("source tokenizes");
        if token.is_eof() {
            break;
        }
        kinds.push(token.kind);
    }
    kinds
}

// =============================================================================
// Lexer Contract Tests
// =============================================================================

#[test]
fn test_lexer_next_token_returns_result() {
    let mut lexer = Lexer::new("let x = 42;");
    let result: Result<Token, ParseError> = lexer.next_token();
    assert!(result.is_ok());
}

#[test]
fn test_lexer_peek_does_not_consume() {
    let mut lexer = Lexer::new("a b c");
    let first = lexer.peek().expect("peek").clone();
    let second = lexer.peek_second().expect("peek second").clone();
    assert_eq!(first.kind, TokenKind::Identifier("a".into()));
    assert_eq!(second.kind, TokenKind::Identifier("b".into()));
    assert_eq!(lexer.next_token().expect("next"), first);
    assert_eq!(lexer.next_token().expect("next"), second);
}

#[test]
fn test_token_variants() {
    assert_eq!(
        tokens("myVar if 42.5 'hi' => ?."),
        vec![
            TokenKind::Identifier("myVar".into()),
            TokenKind::Keyword(Keyword::If),
            TokenKind::Number(42.5),
            TokenKind::String("hi".into()),
            TokenKind::Punctuator(Punctuator::Arrow),
            TokenKind::Punctuator(Punctuator::OptionalChain),
        ]
    );
}

#[test]
fn test_token_positions_and_newline_flag() {
    let mut lexer = Lexer::new("a\n  bc");
    let a = lexer.next_token().expect("a");
    let bc = lexer.next_token().expect("bc");
    assert!(!a.newline_before);
    assert!(bc.newline_before);
    assert_eq!(bc.start.line, 2);
    assert_eq!(bc.start.column, 2);
    assert_eq!(bc.start.offset, 4);
    assert_eq!(bc.end.offset, 6);
    assert_eq!(lexer.raw(&bc), "bc");
}

#[test]
fn test_lexer_error_is_lexical() {
    let mut lexer = Lexer::new("'unterminated");
    let err = lexer.next_token().expect_err("unterminated string");
    assert_eq!(err.kind, ErrorKind::LexicalError);
    assert_eq!(err.position.offset, 0);
}

// =============================================================================
// Parser Contract Tests
// =============================================================================

#[test]
fn test_parser_new_and_parse() {
    let mut parser = Parser::new("let x = 42;", ParseOptions::default());
    let program = parser.parse().expect("parses");
    assert_eq!(program.body.len(), 1);
    assert_eq!(program.source_type, SourceType::Script);
}

#[test]
fn test_parse_program_expression_statements() {
    let program = parse_program("a\nb", &ParseOptions::default()).expect("parses");
    assert_eq!(program.body.len(), 2);
    assert!(program
        .body
        .iter()
        .all(|statement| matches!(statement, Statement::ExpressionStatement { .. })));
}

#[test]
fn test_parse_program_precedence() {
    let program = parse_program("1 + 2 * 3", &ParseOptions::default()).expect("parses");
    let Statement::ExpressionStatement { expression, .. } = &program.body[0] else {
        panic!("expected expression statement");
    };
    let Expression::BinaryExpression { operator, right, .. } = expression else {
        panic!("expected binary expression");
    };
    assert_eq!(operator.as_str(), "+");
    assert!(matches!(
        right.as_ref(),
        Expression::BinaryExpression { operator, .. } if operator.as_str() == "*"
    ));
}

#[test]
fn test_parse_program_regexp_argument() {
    let program = parse_program("f(/x/)", &ParseOptions::default()).expect("parses");
    let Statement::ExpressionStatement { expression, .. } = &program.body[0] else {
        panic!("expected expression statement");
    };
    let Expression::CallExpression { arguments, .. } = expression else {
        panic!("expected call");
    };
    assert!(matches!(
        &arguments[0],
        Expression::Literal(literal) if matches!(literal.value, LiteralValue::RegExp { .. })
    ));
}

#[test]
fn test_parse_error_contract() {
    let err = parse_program("function (", &ParseOptions::default()).expect_err("incomplete function");
    assert_eq!(err.kind, ErrorKind::SyntaxError);
    assert!(err.position.offset >= 9);
    assert_eq!(err.position.line, 1);
    assert!(err.to_string().starts_with("SyntaxError: "));
}

#[test]
fn test_parse_empty_and_comment_only() {
    for source in ["", "   \n\t", "// line\n/* block */"] {
        let program = parse_program(source, &ParseOptions::default()).expect("parses");
        assert!(program.body.is_empty());
        assert_eq!(program.span.start.offset, 0);
    }
}

#[test]
fn test_parses_are_independent() {
    let options = ParseOptions::module();
    let first = parse_program("export const a = 1;", &options).expect("first parse");
    let second = parse_program("export const a = 1;", &options).expect("second parse");
    assert_eq!(first, second);
}

#[test]
fn test_parse_on_separate_threads() {
    let handles: Vec<_> = (0..4)
        .map(|i| {
            std::thread::spawn(move || {
                let source = format!("var v{} = {};", i, i);
                parse_program(&source, &ParseOptions::default()).map(|program| program.body.len())
            })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().ok().and_then(Result::ok), Some(1));
    }
}
