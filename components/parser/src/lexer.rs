//! ECMAScript lexer - tokenizes source code into tokens on demand
//!
//! Tokens are pulled one at a time by the grammar engine. Two pieces of
//! lexical grammar depend on syntactic context and are resolved by the
//! parser re-scanning a token it has already seen:
//!
//! - a `/` or `/=` punctuator where an expression operand is expected is
//!   re-read as a regular expression literal ([`Lexer::rescan_as_regexp`]);
//! - the `}` closing a template substitution is re-read as the next template
//!   part ([`Lexer::rescan_template_continuation`]).

use crate::error::{lexical_error, ParseResult};
use crate::options::{EcmaVersion, ParseOptions};
use core_types::{SourcePosition, Span};
use std::collections::VecDeque;
use std::ops::Range;
use unicode_xid::UnicodeXID;

/// Reserved words recognized by the lexer.
///
/// Contextual words (`let`, `static`, `yield`, `await`, `async`, `of`, `get`,
/// `set`) are scanned as identifiers and interpreted by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    /// break keyword
    Break,
    /// case keyword
    Case,
    /// catch keyword
    Catch,
    /// class keyword
    Class,
    /// const keyword
    Const,
    /// continue keyword
    Continue,
    /// debugger keyword
    Debugger,
    /// default keyword
    Default,
    /// delete keyword
    Delete,
    /// do keyword
    Do,
    /// else keyword
    Else,
    /// enum (reserved for future use)
    Enum,
    /// export keyword
    Export,
    /// extends keyword
    Extends,
    /// false literal
    False,
    /// finally keyword
    Finally,
    /// for keyword
    For,
    /// function keyword
    Function,
    /// if keyword
    If,
    /// import keyword
    Import,
    /// in keyword
    In,
    /// instanceof keyword
    Instanceof,
    /// new keyword
    New,
    /// null literal
    Null,
    /// return keyword
    Return,
    /// super keyword
    Super,
    /// switch keyword
    Switch,
    /// this keyword
    This,
    /// throw keyword
    Throw,
    /// true literal
    True,
    /// try keyword
    Try,
    /// typeof keyword
    Typeof,
    /// var keyword
    Var,
    /// void keyword
    Void,
    /// while keyword
    While,
    /// with keyword
    With,
}

impl Keyword {
    /// Look up a reserved word
    pub fn from_name(name: &str) -> Option<Keyword> {
        let keyword = match name {
            "break" => Keyword::Break,
            "case" => Keyword::Case,
            "catch" => Keyword::Catch,
            "class" => Keyword::Class,
            "const" => Keyword::Const,
            "continue" => Keyword::Continue,
            "debugger" => Keyword::Debugger,
            "default" => Keyword::Default,
            "delete" => Keyword::Delete,
            "do" => Keyword::Do,
            "else" => Keyword::Else,
            "enum" => Keyword::Enum,
            "export" => Keyword::Export,
            "extends" => Keyword::Extends,
            "false" => Keyword::False,
            "finally" => Keyword::Finally,
            "for" => Keyword::For,
            "function" => Keyword::Function,
            "if" => Keyword::If,
            "import" => Keyword::Import,
            "in" => Keyword::In,
            "instanceof" => Keyword::Instanceof,
            "new" => Keyword::New,
            "null" => Keyword::Null,
            "return" => Keyword::Return,
            "super" => Keyword::Super,
            "switch" => Keyword::Switch,
            "this" => Keyword::This,
            "throw" => Keyword::Throw,
            "true" => Keyword::True,
            "try" => Keyword::Try,
            "typeof" => Keyword::Typeof,
            "var" => Keyword::Var,
            "void" => Keyword::Void,
            "while" => Keyword::While,
            "with" => Keyword::With,
            _ => return None,
        };
        Some(keyword)
    }

    /// Source spelling
    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::Break => "break",
            Keyword::Case => "case",
            Keyword::Catch => "catch",
            Keyword::Class => "class",
            Keyword::Const => "const",
            Keyword::Continue => "continue",
            Keyword::Debugger => "debugger",
            Keyword::Default => "default",
            Keyword::Delete => "delete",
            Keyword::Do => "do",
            Keyword::Else => "else",
            Keyword::Enum => "enum",
            Keyword::Export => "export",
            Keyword::Extends => "extends",
            Keyword::False => "false",
            Keyword::Finally => "finally",
            Keyword::For => "for",
            Keyword::Function => "function",
            Keyword::If => "if",
            Keyword::Import => "import",
            Keyword::In => "in",
            Keyword::Instanceof => "instanceof",
            Keyword::New => "new",
            Keyword::Null => "null",
            Keyword::Return => "return",
            Keyword::Super => "super",
            Keyword::Switch => "switch",
            Keyword::This => "this",
            Keyword::Throw => "throw",
            Keyword::True => "true",
            Keyword::Try => "try",
            Keyword::Typeof => "typeof",
            Keyword::Var => "var",
            Keyword::Void => "void",
            Keyword::While => "while",
            Keyword::With => "with",
        }
    }
}

/// ECMAScript punctuators (operators and delimiters)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Punctuator {
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `;`
    Semicolon,
    /// `,`
    Comma,
    /// `.`
    Dot,
    /// `...`
    Spread,
    /// `?.`
    OptionalChain,
    /// `:`
    Colon,
    /// `?`
    Question,
    /// `=`
    Assign,
    /// `=>`
    Arrow,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `%`
    Percent,
    /// `**`
    StarStar,
    /// `==`
    EqEq,
    /// `===`
    EqEqEq,
    /// `!=`
    NotEq,
    /// `!==`
    NotEqEq,
    /// `<`
    Lt,
    /// `<=`
    LtEq,
    /// `>`
    Gt,
    /// `>=`
    GtEq,
    /// `&&`
    AndAnd,
    /// `||`
    OrOr,
    /// `??`
    NullishCoalesce,
    /// `!`
    Not,
    /// `&`
    And,
    /// `|`
    Or,
    /// `^`
    Xor,
    /// `~`
    Tilde,
    /// `<<`
    LtLt,
    /// `>>`
    GtGt,
    /// `>>>`
    GtGtGt,
    /// `+=`
    PlusEq,
    /// `-=`
    MinusEq,
    /// `*=`
    StarEq,
    /// `/=`
    SlashEq,
    /// `%=`
    PercentEq,
    /// `**=`
    StarStarEq,
    /// `&=`
    AndEq,
    /// `|=`
    OrEq,
    /// `^=`
    XorEq,
    /// `<<=`
    LtLtEq,
    /// `>>=`
    GtGtEq,
    /// `>>>=`
    GtGtGtEq,
    /// `&&=`
    AndAndEq,
    /// `||=`
    OrOrEq,
    /// `??=`
    NullishCoalesceEq,
    /// `++`
    PlusPlus,
    /// `--`
    MinusMinus,
}

impl Punctuator {
    /// Source spelling
    pub fn as_str(self) -> &'static str {
        match self {
            Punctuator::LParen => "(",
            Punctuator::RParen => ")",
            Punctuator::LBrace => "{",
            Punctuator::RBrace => "}",
            Punctuator::LBracket => "[",
            Punctuator::RBracket => "]",
            Punctuator::Semicolon => ";",
            Punctuator::Comma => ",",
            Punctuator::Dot => ".",
            Punctuator::Spread => "...",
            Punctuator::OptionalChain => "?.",
            Punctuator::Colon => ":",
            Punctuator::Question => "?",
            Punctuator::Assign => "=",
            Punctuator::Arrow => "=>",
            Punctuator::Plus => "+",
            Punctuator::Minus => "-",
            Punctuator::Star => "*",
            Punctuator::Slash => "/",
            Punctuator::Percent => "%",
            Punctuator::StarStar => "**",
            Punctuator::EqEq => "==",
            Punctuator::EqEqEq => "===",
            Punctuator::NotEq => "!=",
            Punctuator::NotEqEq => "!==",
            Punctuator::Lt => "<",
            Punctuator::LtEq => "<=",
            Punctuator::Gt => ">",
            Punctuator::GtEq => ">=",
            Punctuator::AndAnd => "&&",
            Punctuator::OrOr => "||",
            Punctuator::NullishCoalesce => "??",
            Punctuator::Not => "!",
            Punctuator::And => "&",
            Punctuator::Or => "|",
            Punctuator::Xor => "^",
            Punctuator::Tilde => "~",
            Punctuator::LtLt => "<<",
            Punctuator::GtGt => ">>",
            Punctuator::GtGtGt => ">>>",
            Punctuator::PlusEq => "+=",
            Punctuator::MinusEq => "-=",
            Punctuator::StarEq => "*=",
            Punctuator::SlashEq => "/=",
            Punctuator::PercentEq => "%=",
            Punctuator::StarStarEq => "**=",
            Punctuator::AndEq => "&=",
            Punctuator::OrEq => "|=",
            Punctuator::XorEq => "^=",
            Punctuator::LtLtEq => "<<=",
            Punctuator::GtGtEq => ">>=",
            Punctuator::GtGtGtEq => ">>>=",
            Punctuator::AndAndEq => "&&=",
            Punctuator::OrOrEq => "||=",
            Punctuator::NullishCoalesceEq => "??=",
            Punctuator::PlusPlus => "++",
            Punctuator::MinusMinus => "--",
        }
    }
}

/// Kind and payload of a token
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// Identifier or contextual keyword, with escapes decoded
    Identifier(String),
    /// Reserved word
    Keyword(Keyword),
    /// Number literal
    Number(f64),
    /// BigInt literal: source digits (with radix prefix) minus `n` and `_`
    BigInt(String),
    /// String literal, escapes decoded
    String(String),
    /// One part of a template literal
    Template {
        /// Cooked value, or the escape error that prevented cooking
        cooked: Result<String, core_types::ParseError>,
        /// Raw source text with line terminators normalized to `\n`
        raw: String,
        /// True if the part ends with a backtick rather than `${`
        tail: bool,
    },
    /// Regular expression literal
    RegExp {
        /// Pattern between the slashes
        pattern: String,
        /// Flags after the closing slash
        flags: String,
    },
    /// Punctuator/operator
    Punctuator(Punctuator),
    /// End of input
    EOF,
}

/// Token produced by the lexer
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// What was scanned
    pub kind: TokenKind,
    /// Start position
    pub start: SourcePosition,
    /// End position (exclusive)
    pub end: SourcePosition,
    /// Byte range of the raw text in the source
    pub raw: Range<usize>,
    /// A line terminator occurred between the previous token and this one
    pub newline_before: bool,
    /// Identifier spelled with `\u` escapes
    pub escaped: bool,
    /// Legacy octal literal, or a string containing an octal escape
    pub legacy_octal: bool,
}

impl Token {
    /// Source range of the token
    pub fn span(&self) -> Span {
        Span::new(self.start, self.end)
    }

    /// Check for a specific punctuator
    pub fn is_punctuator(&self, p: Punctuator) -> bool {
        matches!(self.kind, TokenKind::Punctuator(x) if x == p)
    }

    /// Check for a specific reserved word
    pub fn is_keyword(&self, k: Keyword) -> bool {
        matches!(self.kind, TokenKind::Keyword(x) if x == k)
    }

    /// Check for an unescaped identifier with the given name (contextual keywords)
    pub fn is_contextual(&self, name: &str) -> bool {
        !self.escaped && matches!(self.kind, TokenKind::Identifier(ref x) if x == name)
    }

    /// Identifier name, if this is an identifier token
    pub fn identifier_name(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::Identifier(name) => Some(name),
            _ => None,
        }
    }

    /// True for the end-of-input token
    pub fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::EOF)
    }
}

/// Cursor state: byte offset plus the UTF-16 based line/column bookkeeping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cursor {
    pos: usize,
    utf16: usize,
    line: u32,
    line_start: usize,
}

impl Cursor {
    fn at_token(token: &Token) -> Self {
        Self {
            pos: token.raw.start,
            utf16: token.start.offset,
            line: token.start.line,
            line_start: token.start.offset - token.start.column as usize,
        }
    }
}

/// Saved lexer state for speculative parsing
#[derive(Debug, Clone)]
pub struct LexerSnapshot {
    cursor: Cursor,
    lookahead: VecDeque<Token>,
}

#[derive(Debug, Clone, Copy, Default)]
struct ScanFlags {
    escaped: bool,
    legacy_octal: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EscapeMode {
    String,
    Template,
}

/// Lexer for ECMAScript source code
pub struct Lexer<'a> {
    source: &'a str,
    ecma_version: EcmaVersion,
    cursor: Cursor,
    lookahead: VecDeque<Token>,
    flags: ScanFlags,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source code at the default edition
    pub fn new(source: &'a str) -> Self {
        Self::with_options(source, &ParseOptions::default())
    }

    /// Create a lexer honoring the edition and hashbang options
    pub fn with_options(source: &'a str, options: &ParseOptions) -> Self {
        let mut lexer = Self {
            source,
            ecma_version: options.ecma_version,
            cursor: Cursor {
                pos: 0,
                utf16: 0,
                line: 1,
                line_start: 0,
            },
            lookahead: VecDeque::with_capacity(2),
            flags: ScanFlags::default(),
        };
        if options.allow_hash_bang {
            lexer.skip_hashbang();
        }
        lexer
    }

    /// The full source text
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Raw source text of a token
    pub fn raw(&self, token: &Token) -> &'a str {
        &self.source[token.raw.clone()]
    }

    /// Position just past the last character of the source
    pub fn end_position(&self) -> SourcePosition {
        let mut line = 1u32;
        let mut line_start = 0usize;
        let mut utf16 = 0usize;
        let mut chars = self.source.chars().peekable();
        while let Some(ch) = chars.next() {
            utf16 += ch.len_utf16();
            let breaks = match ch {
                '\n' | '\u{2028}' | '\u{2029}' => true,
                '\r' => chars.peek() != Some(&'\n'),
                _ => false,
            };
            if breaks {
                line += 1;
                line_start = utf16;
            }
        }
        SourcePosition {
            line,
            column: (utf16 - line_start) as u32,
            offset: utf16,
        }
    }

    /// Get the next token from the source
    pub fn next_token(&mut self) -> ParseResult<Token> {
        if let Some(token) = self.lookahead.pop_front() {
            return Ok(token);
        }
        self.scan_token()
    }

    /// Peek at the next token without consuming it
    pub fn peek(&mut self) -> ParseResult<&Token> {
        if self.lookahead.is_empty() {
            let token = self.scan_token()?;
            self.lookahead.push_back(token);
        }
        Ok(&self.lookahead[0])
    }

    /// Peek at the token after the next one
    pub fn peek_second(&mut self) -> ParseResult<&Token> {
        while self.lookahead.len() < 2 {
            let token = self.scan_token()?;
            self.lookahead.push_back(token);
        }
        Ok(&self.lookahead[1])
    }

    /// Capture the cursor and lookahead buffer
    pub fn snapshot(&self) -> LexerSnapshot {
        LexerSnapshot {
            cursor: self.cursor,
            lookahead: self.lookahead.clone(),
        }
    }

    /// Return to a previously captured state
    pub fn restore(&mut self, snapshot: LexerSnapshot) {
        self.cursor = snapshot.cursor;
        self.lookahead = snapshot.lookahead;
    }

    /// Re-read a `/` or `/=` token as a regular expression literal.
    ///
    /// Any tokens already scanned past it are discarded.
    pub fn rescan_as_regexp(&mut self, token: &Token) -> ParseResult<Token> {
        self.lookahead.clear();
        self.cursor = Cursor::at_token(token);
        self.flags = ScanFlags::default();
        let start_cursor = self.cursor;
        let start = self.position();

        self.bump(); // opening '/'
        let body_start = self.cursor.pos;
        let mut in_class = false;
        loop {
            let ch = match self.peek_char() {
                Some(c) if !is_line_terminator(c) => c,
                _ => return Err(lexical_error("Unterminated regular expression", start)),
            };
            match ch {
                '\\' => {
                    self.bump();
                    match self.peek_char() {
                        Some(c) if !is_line_terminator(c) => {
                            self.bump();
                        }
                        _ => {
                            return Err(lexical_error("Unterminated regular expression", start))
                        }
                    }
                }
                '[' => {
                    in_class = true;
                    self.bump();
                }
                ']' => {
                    in_class = false;
                    self.bump();
                }
                '/' if !in_class => break,
                _ => {
                    self.bump();
                }
            }
        }
        let pattern = self.source[body_start..self.cursor.pos].to_string();
        self.bump(); // closing '/'

        let flags_start = self.position();
        let mut flags = String::new();
        while let Some(ch) = self.peek_char() {
            if ch == '\\' {
                return Err(lexical_error(
                    "Invalid regular expression flag",
                    self.position(),
                ));
            }
            if !is_id_continue(ch) {
                break;
            }
            flags.push(ch);
            self.bump();
        }
        self.validate_regexp_flags(&flags, flags_start)?;

        Ok(self.finish(
            TokenKind::RegExp { pattern, flags },
            start_cursor,
            token.newline_before,
        ))
    }

    /// Re-read the `}` closing a template substitution as the next template part
    pub fn rescan_template_continuation(&mut self, token: &Token) -> ParseResult<Token> {
        self.lookahead.clear();
        self.cursor = Cursor::at_token(token);
        self.flags = ScanFlags::default();
        let start_cursor = self.cursor;
        self.bump(); // '}'
        let kind = self.scan_template_part(start_cursor)?;
        Ok(self.finish(kind, start_cursor, token.newline_before))
    }

    fn validate_regexp_flags(&self, flags: &str, position: SourcePosition) -> ParseResult<()> {
        let allowed = if self.ecma_version >= EcmaVersion::ES2018 {
            "gimsuy"
        } else {
            "gimuy"
        };
        let mut seen = String::new();
        for flag in flags.chars() {
            if !allowed.contains(flag) {
                return Err(lexical_error("Invalid regular expression flag", position));
            }
            if seen.contains(flag) {
                return Err(lexical_error("Duplicate regular expression flag", position));
            }
            seen.push(flag);
        }
        Ok(())
    }

    fn skip_hashbang(&mut self) {
        if self.source.starts_with("#!") {
            while let Some(ch) = self.peek_char() {
                if is_line_terminator(ch) {
                    break;
                }
                self.bump();
            }
        }
    }

    fn scan_token(&mut self) -> ParseResult<Token> {
        self.flags = ScanFlags::default();
        let newline_before = self.skip_whitespace_and_comments()?;
        let start_cursor = self.cursor;
        let start_pos = self.position();

        let ch = match self.peek_char() {
            Some(c) => c,
            None => return Ok(self.finish(TokenKind::EOF, start_cursor, newline_before)),
        };

        let kind = match ch {
            '(' => self.punct(1, Punctuator::LParen),
            ')' => self.punct(1, Punctuator::RParen),
            '{' => self.punct(1, Punctuator::LBrace),
            '}' => self.punct(1, Punctuator::RBrace),
            '[' => self.punct(1, Punctuator::LBracket),
            ']' => self.punct(1, Punctuator::RBracket),
            ';' => self.punct(1, Punctuator::Semicolon),
            ',' => self.punct(1, Punctuator::Comma),
            ':' => self.punct(1, Punctuator::Colon),
            '~' => self.punct(1, Punctuator::Tilde),

            '.' => {
                if self.peek_char_at(1).map_or(false, |c| c.is_ascii_digit()) {
                    self.scan_number()?
                } else if self.peek_char_at(1) == Some('.') && self.peek_char_at(2) == Some('.') {
                    self.punct(3, Punctuator::Spread)
                } else {
                    self.punct(1, Punctuator::Dot)
                }
            }

            '?' => match self.peek_char_at(1) {
                Some('?') if self.peek_char_at(2) == Some('=') => {
                    self.punct(3, Punctuator::NullishCoalesceEq)
                }
                Some('?') => self.punct(2, Punctuator::NullishCoalesce),
                // `?.` followed by a digit is a conditional with a decimal: `a ?.5 : b`
                Some('.') if !self.peek_char_at(2).map_or(false, |c| c.is_ascii_digit()) => {
                    self.punct(2, Punctuator::OptionalChain)
                }
                _ => self.punct(1, Punctuator::Question),
            },

            '=' => match self.peek_char_at(1) {
                Some('>') => self.punct(2, Punctuator::Arrow),
                Some('=') if self.peek_char_at(2) == Some('=') => self.punct(3, Punctuator::EqEqEq),
                Some('=') => self.punct(2, Punctuator::EqEq),
                _ => self.punct(1, Punctuator::Assign),
            },

            '!' => match self.peek_char_at(1) {
                Some('=') if self.peek_char_at(2) == Some('=') => {
                    self.punct(3, Punctuator::NotEqEq)
                }
                Some('=') => self.punct(2, Punctuator::NotEq),
                _ => self.punct(1, Punctuator::Not),
            },

            '+' => match self.peek_char_at(1) {
                Some('+') => self.punct(2, Punctuator::PlusPlus),
                Some('=') => self.punct(2, Punctuator::PlusEq),
                _ => self.punct(1, Punctuator::Plus),
            },

            '-' => match self.peek_char_at(1) {
                Some('-') => self.punct(2, Punctuator::MinusMinus),
                Some('=') => self.punct(2, Punctuator::MinusEq),
                _ => self.punct(1, Punctuator::Minus),
            },

            '*' => match self.peek_char_at(1) {
                Some('*') if self.peek_char_at(2) == Some('=') => {
                    self.punct(3, Punctuator::StarStarEq)
                }
                Some('*') => self.punct(2, Punctuator::StarStar),
                Some('=') => self.punct(2, Punctuator::StarEq),
                _ => self.punct(1, Punctuator::Star),
            },

            '/' => match self.peek_char_at(1) {
                Some('=') => self.punct(2, Punctuator::SlashEq),
                _ => self.punct(1, Punctuator::Slash),
            },

            '%' => match self.peek_char_at(1) {
                Some('=') => self.punct(2, Punctuator::PercentEq),
                _ => self.punct(1, Punctuator::Percent),
            },

            '<' => match self.peek_char_at(1) {
                Some('<') if self.peek_char_at(2) == Some('=') => self.punct(3, Punctuator::LtLtEq),
                Some('<') => self.punct(2, Punctuator::LtLt),
                Some('=') => self.punct(2, Punctuator::LtEq),
                _ => self.punct(1, Punctuator::Lt),
            },

            '>' => match (self.peek_char_at(1), self.peek_char_at(2), self.peek_char_at(3)) {
                (Some('>'), Some('>'), Some('=')) => self.punct(4, Punctuator::GtGtGtEq),
                (Some('>'), Some('>'), _) => self.punct(3, Punctuator::GtGtGt),
                (Some('>'), Some('='), _) => self.punct(3, Punctuator::GtGtEq),
                (Some('>'), _, _) => self.punct(2, Punctuator::GtGt),
                (Some('='), _, _) => self.punct(2, Punctuator::GtEq),
                _ => self.punct(1, Punctuator::Gt),
            },

            '&' => match self.peek_char_at(1) {
                Some('&') if self.peek_char_at(2) == Some('=') => {
                    self.punct(3, Punctuator::AndAndEq)
                }
                Some('&') => self.punct(2, Punctuator::AndAnd),
                Some('=') => self.punct(2, Punctuator::AndEq),
                _ => self.punct(1, Punctuator::And),
            },

            '|' => match self.peek_char_at(1) {
                Some('|') if self.peek_char_at(2) == Some('=') => self.punct(3, Punctuator::OrOrEq),
                Some('|') => self.punct(2, Punctuator::OrOr),
                Some('=') => self.punct(2, Punctuator::OrEq),
                _ => self.punct(1, Punctuator::Or),
            },

            '^' => match self.peek_char_at(1) {
                Some('=') => self.punct(2, Punctuator::XorEq),
                _ => self.punct(1, Punctuator::Xor),
            },

            '`' => {
                self.bump();
                self.scan_template_part(start_cursor)?
            }

            '"' | '\'' => self.scan_string(ch)?,

            _ if ch.is_ascii_digit() => self.scan_number()?,

            '\\' => self.scan_identifier_or_keyword()?,
            _ if is_id_start(ch) => self.scan_identifier_or_keyword()?,

            _ => {
                return Err(lexical_error(
                    format!("Unexpected character '{}'", ch),
                    start_pos,
                ))
            }
        };

        Ok(self.finish(kind, start_cursor, newline_before))
    }

    fn finish(&self, kind: TokenKind, start_cursor: Cursor, newline_before: bool) -> Token {
        Token {
            kind,
            start: position_of(start_cursor),
            end: self.position(),
            raw: start_cursor.pos..self.cursor.pos,
            newline_before,
            escaped: self.flags.escaped,
            legacy_octal: self.flags.legacy_octal,
        }
    }

    fn punct(&mut self, len: usize, p: Punctuator) -> TokenKind {
        for _ in 0..len {
            self.bump();
        }
        TokenKind::Punctuator(p)
    }

    /// Skip whitespace and comments, reporting whether a line terminator was crossed
    fn skip_whitespace_and_comments(&mut self) -> ParseResult<bool> {
        let mut newline = false;
        while let Some(ch) = self.peek_char() {
            match ch {
                _ if is_line_terminator(ch) => {
                    newline = true;
                    self.bump();
                }
                _ if is_whitespace(ch) => {
                    self.bump();
                }
                '/' if self.peek_char_at(1) == Some('/') => {
                    while let Some(c) = self.peek_char() {
                        if is_line_terminator(c) {
                            break;
                        }
                        self.bump();
                    }
                }
                '/' if self.peek_char_at(1) == Some('*') => {
                    let comment_start = self.position();
                    self.bump();
                    self.bump();
                    let mut found_end = false;
                    while let Some(c) = self.peek_char() {
                        if c == '*' && self.peek_char_at(1) == Some('/') {
                            self.bump();
                            self.bump();
                            found_end = true;
                            break;
                        }
                        if is_line_terminator(c) {
                            newline = true;
                        }
                        self.bump();
                    }
                    if !found_end {
                        return Err(lexical_error("Unterminated comment", comment_start));
                    }
                }
                _ => break,
            }
        }
        Ok(newline)
    }

    fn scan_string(&mut self, quote: char) -> ParseResult<TokenKind> {
        let start_pos = self.position();
        self.bump(); // opening quote
        let mut value = String::new();

        loop {
            match self.peek_char() {
                None => return Err(lexical_error("Unterminated string constant", start_pos)),
                Some(c) if c == quote => {
                    self.bump();
                    break;
                }
                Some('\\') => {
                    let escape_pos = self.position();
                    self.bump();
                    self.read_escape(&mut value, EscapeMode::String, escape_pos)?;
                }
                Some('\n') | Some('\r') => {
                    return Err(lexical_error("Unterminated string constant", start_pos))
                }
                Some(c @ ('\u{2028}' | '\u{2029}')) => {
                    if self.ecma_version < EcmaVersion::ES2019 {
                        return Err(lexical_error("Unterminated string constant", start_pos));
                    }
                    value.push(c);
                    self.bump();
                }
                Some(c) => {
                    value.push(c);
                    self.bump();
                }
            }
        }

        Ok(TokenKind::String(value))
    }

    /// Scan a template part; the cursor is just past the opening '`' or '}'
    fn scan_template_part(&mut self, start_cursor: Cursor) -> ParseResult<TokenKind> {
        let start_pos = position_of(start_cursor);
        let mut cooked = String::new();
        let mut cooked_error = None;
        let raw_start = self.cursor.pos;

        let (raw_end, tail) = loop {
            match self.peek_char() {
                None => return Err(lexical_error("Unterminated template", start_pos)),
                Some('`') => {
                    let end = self.cursor.pos;
                    self.bump();
                    break (end, true);
                }
                Some('$') if self.peek_char_at(1) == Some('{') => {
                    let end = self.cursor.pos;
                    self.bump();
                    self.bump();
                    break (end, false);
                }
                Some('\\') => {
                    let escape_pos = self.position();
                    self.bump();
                    if let Err(err) = self.read_escape(&mut cooked, EscapeMode::Template, escape_pos)
                    {
                        cooked_error.get_or_insert(err);
                    }
                }
                Some('\r') => {
                    self.bump();
                    if self.peek_char() == Some('\n') {
                        self.bump();
                    }
                    cooked.push('\n');
                }
                Some(c) => {
                    cooked.push(c);
                    self.bump();
                }
            }
        };

        let raw = normalize_line_endings(&self.source[raw_start..raw_end]);
        let cooked = match cooked_error {
            Some(err) => Err(err),
            None => Ok(cooked),
        };
        Ok(TokenKind::Template { cooked, raw, tail })
    }

    /// Decode one escape sequence; the backslash has been consumed
    fn read_escape(
        &mut self,
        out: &mut String,
        mode: EscapeMode,
        escape_pos: SourcePosition,
    ) -> ParseResult<()> {
        let ch = match self.bump() {
            Some(c) => c,
            None => return Err(lexical_error("Unterminated string constant", escape_pos)),
        };
        match ch {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'b' => out.push('\u{0008}'),
            'v' => out.push('\u{000B}'),
            'f' => out.push('\u{000C}'),
            '\r' => {
                if self.peek_char() == Some('\n') {
                    self.bump();
                }
            }
            '\n' | '\u{2028}' | '\u{2029}' => {}
            'x' => {
                let code = self
                    .read_hex_digits(2)
                    .ok_or_else(|| lexical_error("Bad character escape sequence", escape_pos))?;
                push_code_unit(out, code);
            }
            'u' => {
                let code = self.read_code_point(escape_pos)?;
                if (0xD800..0xDC00).contains(&code) && self.at_low_surrogate_escape() {
                    let snapshot = self.cursor;
                    self.bump(); // '\'
                    self.bump(); // 'u'
                    match self.read_code_point(escape_pos) {
                        Ok(low) if (0xDC00..0xE000).contains(&low) => {
                            let combined = 0x10000 + ((code - 0xD800) << 10) + (low - 0xDC00);
                            push_code_unit(out, combined);
                        }
                        _ => {
                            self.cursor = snapshot;
                            push_code_unit(out, code);
                        }
                    }
                } else {
                    push_code_unit(out, code);
                }
            }
            '0' if !self.peek_char().map_or(false, |c| c.is_ascii_digit()) => out.push('\0'),
            '0'..='7' => {
                if mode == EscapeMode::Template {
                    return Err(lexical_error("Octal literal in template string", escape_pos));
                }
                let mut value = ch.to_digit(8).unwrap_or(0);
                let max_len = if ch <= '3' { 3 } else { 2 };
                let mut len = 1;
                while len < max_len {
                    match self.peek_char().and_then(|c| c.to_digit(8)) {
                        Some(d) => {
                            value = value * 8 + d;
                            self.bump();
                            len += 1;
                        }
                        None => break,
                    }
                }
                self.flags.legacy_octal = true;
                push_code_unit(out, value);
            }
            '8' | '9' => {
                if mode == EscapeMode::Template {
                    return Err(lexical_error(
                        "Invalid escape sequence in template string",
                        escape_pos,
                    ));
                }
                self.flags.legacy_octal = true;
                out.push(ch);
            }
            other => out.push(other),
        }
        Ok(())
    }

    fn at_low_surrogate_escape(&self) -> bool {
        self.peek_char() == Some('\\') && self.peek_char_at(1) == Some('u')
    }

    /// Read `XXXX` or `{X...}` after `\u`
    fn read_code_point(&mut self, escape_pos: SourcePosition) -> ParseResult<u32> {
        if self.peek_char() == Some('{') {
            self.bump();
            let mut value: u32 = 0;
            let mut digits = 0;
            while let Some(d) = self.peek_char().and_then(|c| c.to_digit(16)) {
                value = value.saturating_mul(16).saturating_add(d);
                digits += 1;
                self.bump();
            }
            if digits == 0 || self.peek_char() != Some('}') {
                return Err(lexical_error("Bad character escape sequence", escape_pos));
            }
            self.bump();
            if value > 0x10FFFF {
                return Err(lexical_error("Code point out of bounds", escape_pos));
            }
            Ok(value)
        } else {
            self.read_hex_digits(4)
                .ok_or_else(|| lexical_error("Bad character escape sequence", escape_pos))
        }
    }

    fn read_hex_digits(&mut self, count: usize) -> Option<u32> {
        let mut value = 0u32;
        for i in 0..count {
            let d = self.peek_char_at(i)?.to_digit(16)?;
            value = value * 16 + d;
        }
        for _ in 0..count {
            self.bump();
        }
        Some(value)
    }

    fn scan_number(&mut self) -> ParseResult<TokenKind> {
        let start_pos = self.position();
        let first = self.peek_char().unwrap_or('0');

        if first == '0' {
            let radix = match self.peek_char_at(1) {
                Some('x') | Some('X') => Some(16),
                Some('o') | Some('O') => Some(8),
                Some('b') | Some('B') => Some(2),
                _ => None,
            };
            if let Some(radix) = radix {
                let prefix_start = self.cursor.pos;
                self.bump();
                self.bump();
                let prefix = &self.source[prefix_start..self.cursor.pos];
                let digits = self.read_digits(radix)?;
                if digits.is_empty() {
                    return Err(lexical_error(
                        format!("Expected number in radix {}", radix),
                        start_pos,
                    ));
                }
                if self.eat_bigint_suffix(start_pos)? {
                    self.check_after_number(start_pos)?;
                    return Ok(TokenKind::BigInt(format!("{}{}", prefix, digits)));
                }
                self.check_after_number(start_pos)?;
                let value = digits
                    .chars()
                    .filter_map(|c| c.to_digit(radix))
                    .fold(0f64, |acc, d| acc * radix as f64 + d as f64);
                return Ok(TokenKind::Number(value));
            }

            if self.peek_char_at(1).map_or(false, |c| c.is_ascii_digit()) {
                return self.scan_legacy_octal(start_pos);
            }
        }

        let mut text = String::new();
        let mut is_integer = true;
        if first != '.' {
            text.push_str(&self.read_digits(10)?);
        }
        if self.peek_char() == Some('.') {
            is_integer = false;
            self.bump();
            text.push('.');
            if self.peek_char() == Some('_') {
                return Err(lexical_error(
                    "Numeric separator is not allowed here",
                    self.position(),
                ));
            }
            text.push_str(&self.read_digits(10)?);
        }
        if matches!(self.peek_char(), Some('e') | Some('E')) {
            is_integer = false;
            self.bump();
            text.push('e');
            if let Some(sign @ ('+' | '-')) = self.peek_char() {
                self.bump();
                text.push(sign);
            }
            let exponent = self.read_digits(10)?;
            if exponent.is_empty() {
                return Err(lexical_error("Invalid number", start_pos));
            }
            text.push_str(&exponent);
        }

        if is_integer && self.eat_bigint_suffix(start_pos)? {
            self.check_after_number(start_pos)?;
            return Ok(TokenKind::BigInt(text));
        }
        self.check_after_number(start_pos)?;

        let value = text
            .parse::<f64>()
            .map_err(|_| lexical_error("Invalid number", start_pos))?;
        Ok(TokenKind::Number(value))
    }

    /// `017` (octal) or `019` (decimal with a leading zero); both are sloppy-only
    fn scan_legacy_octal(&mut self, start_pos: SourcePosition) -> ParseResult<TokenKind> {
        let mut digits = String::new();
        while let Some(c) = self.peek_char() {
            if !c.is_ascii_digit() {
                break;
            }
            digits.push(c);
            self.bump();
        }
        self.flags.legacy_octal = true;
        let is_octal = digits.chars().all(|c| c < '8');

        if is_octal {
            if self.peek_char() == Some('n') {
                return Err(lexical_error("Invalid BigInt literal", start_pos));
            }
            self.check_after_number(start_pos)?;
            let value = digits
                .chars()
                .filter_map(|c| c.to_digit(8))
                .fold(0f64, |acc, d| acc * 8.0 + d as f64);
            return Ok(TokenKind::Number(value));
        }

        let mut text = digits;
        if self.peek_char() == Some('.') {
            self.bump();
            text.push('.');
            text.push_str(&self.read_digits(10)?);
        }
        if matches!(self.peek_char(), Some('e') | Some('E')) {
            self.bump();
            text.push('e');
            if let Some(sign @ ('+' | '-')) = self.peek_char() {
                self.bump();
                text.push(sign);
            }
            let exponent = self.read_digits(10)?;
            if exponent.is_empty() {
                return Err(lexical_error("Invalid number", start_pos));
            }
            text.push_str(&exponent);
        }
        if self.peek_char() == Some('n') {
            return Err(lexical_error("Invalid BigInt literal", start_pos));
        }
        self.check_after_number(start_pos)?;
        let value = text
            .parse::<f64>()
            .map_err(|_| lexical_error("Invalid number", start_pos))?;
        Ok(TokenKind::Number(value))
    }

    /// Read digits of a radix, dropping numeric separators
    fn read_digits(&mut self, radix: u32) -> ParseResult<String> {
        let mut digits = String::new();
        let separators = self.ecma_version >= EcmaVersion::ES2021;
        while let Some(c) = self.peek_char() {
            if c.is_digit(radix) {
                digits.push(c);
                self.bump();
            } else if c == '_' && separators {
                let next_is_digit = self.peek_char_at(1).map_or(false, |n| n.is_digit(radix));
                if digits.is_empty() || !next_is_digit {
                    return Err(lexical_error(
                        "Numeric separator is not allowed here",
                        self.position(),
                    ));
                }
                self.bump();
            } else {
                break;
            }
        }
        Ok(digits)
    }

    fn eat_bigint_suffix(&mut self, start_pos: SourcePosition) -> ParseResult<bool> {
        if self.peek_char() != Some('n') {
            return Ok(false);
        }
        if self.ecma_version < EcmaVersion::ES2020 {
            return Err(lexical_error(
                "Identifier directly after number",
                start_pos,
            ));
        }
        self.bump();
        Ok(true)
    }

    fn check_after_number(&self, start_pos: SourcePosition) -> ParseResult<()> {
        match self.peek_char() {
            Some(c) if is_id_start(c) || c.is_ascii_digit() || c == '\\' => Err(lexical_error(
                "Identifier directly after number",
                start_pos,
            )),
            _ => Ok(()),
        }
    }

    fn scan_identifier_or_keyword(&mut self) -> ParseResult<TokenKind> {
        let (name, escaped) = self.read_identifier_name()?;
        if escaped {
            self.flags.escaped = true;
            return Ok(TokenKind::Identifier(name));
        }
        Ok(match Keyword::from_name(&name) {
            Some(keyword) => TokenKind::Keyword(keyword),
            None => TokenKind::Identifier(name),
        })
    }

    fn read_identifier_name(&mut self) -> ParseResult<(String, bool)> {
        let mut name = String::new();
        let mut escaped = false;
        while let Some(ch) = self.peek_char() {
            let first = name.is_empty();
            if ch == '\\' {
                let escape_pos = self.position();
                self.bump();
                if self.peek_char() != Some('u') {
                    return Err(lexical_error(
                        "Expecting Unicode escape sequence \\uXXXX",
                        escape_pos,
                    ));
                }
                self.bump();
                let code = self.read_code_point(escape_pos)?;
                let decoded = char::from_u32(code).filter(|&c| {
                    if first {
                        is_id_start(c)
                    } else {
                        is_id_continue(c)
                    }
                });
                match decoded {
                    Some(c) => name.push(c),
                    None => {
                        return Err(lexical_error("Invalid Unicode escape", escape_pos));
                    }
                }
                escaped = true;
            } else if (first && is_id_start(ch)) || (!first && is_id_continue(ch)) {
                name.push(ch);
                self.bump();
            } else {
                break;
            }
        }
        Ok((name, escaped))
    }

    fn position(&self) -> SourcePosition {
        position_of(self.cursor)
    }

    fn peek_char(&self) -> Option<char> {
        self.source[self.cursor.pos..].chars().next()
    }

    fn peek_char_at(&self, n: usize) -> Option<char> {
        self.source[self.cursor.pos..].chars().nth(n)
    }

    /// Consume one character, keeping the line bookkeeping current
    fn bump(&mut self) -> Option<char> {
        let ch = self.peek_char()?;
        self.cursor.pos += ch.len_utf8();
        self.cursor.utf16 += ch.len_utf16();
        let breaks_line = match ch {
            '\n' | '\u{2028}' | '\u{2029}' => true,
            '\r' => self.peek_char() != Some('\n'),
            _ => false,
        };
        if breaks_line {
            self.cursor.line += 1;
            self.cursor.line_start = self.cursor.utf16;
        }
        Some(ch)
    }
}

fn position_of(cursor: Cursor) -> SourcePosition {
    SourcePosition {
        line: cursor.line,
        column: (cursor.utf16 - cursor.line_start) as u32,
        offset: cursor.utf16,
    }
}

/// Append a decoded code unit or code point.
///
/// `String` holds only Unicode scalar values, so a lone surrogate (an
/// unpaired `\uD800`) cannot be kept as-is and becomes U+FFFD.
fn push_code_unit(out: &mut String, code: u32) {
    out.push(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER));
}

fn normalize_line_endings(raw: &str) -> String {
    if raw.contains('\r') {
        raw.replace("\r\n", "\n").replace('\r', "\n")
    } else {
        raw.to_string()
    }
}

/// Check if character is a line terminator (LF, CR, LS or PS)
pub fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// WhiteSpace production: tab, VT, FF, space, NBSP, BOM and category Zs
fn is_whitespace(c: char) -> bool {
    matches!(
        c,
        '\t' | '\u{000B}'
            | '\u{000C}'
            | ' '
            | '\u{00A0}'
            | '\u{FEFF}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
    )
}

/// IdentifierStart: `$`, `_`, or a Unicode ID_Start character
pub fn is_id_start(ch: char) -> bool {
    if ch.is_ascii() {
        ch == '$' || ch == '_' || ch.is_ascii_alphabetic()
    } else {
        ch.is_xid_start()
    }
}

/// IdentifierPart: `$`, ZWNJ, ZWJ, or a Unicode ID_Continue character
pub fn is_id_continue(ch: char) -> bool {
    if ch.is_ascii() {
        ch == '$' || ch == '_' || ch.is_ascii_alphanumeric()
    } else {
        ch == '\u{200C}' || ch == '\u{200D}' || ch.is_xid_continue()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::ErrorKind;

    fn kinds(source: &str) -> Vec<TokenKind> {
        let mut lexer = Lexer::new(source);
        let mut out = Vec::new();
        loop {
            let token = lexer.next_token().unwrap();
            if token.is_eof() {
                break;
            }
            out.push(token.kind);
        }
        out
    }

    fn single(source: &str) -> Token {
        Lexer::new(source).next_token().unwrap()
    }

    fn lex_error(source: &str) -> core_types::ParseError {
        let mut lexer = Lexer::new(source);
        loop {
            match lexer.next_token() {
                Ok(token) if token.is_eof() => panic!("expected a lexical error for {:?}", source),
                Ok(_) => continue,
                Err(err) => return err,
            }
        }
    }

    #[test]
    fn test_lexer_empty_source() {
        let token = single("");
        assert!(token.is_eof());
        assert_eq!(token.start.offset, 0);
    }

    #[test]
    fn test_lexer_identifier() {
        assert_eq!(single("myVar").kind, TokenKind::Identifier("myVar".into()));
        assert_eq!(single("$_x1").kind, TokenKind::Identifier("$_x1".into()));
        assert_eq!(single("ünïcödé").kind, TokenKind::Identifier("ünïcödé".into()));
    }

    #[test]
    fn test_lexer_contextual_words_are_identifiers() {
        for word in ["let", "static", "yield", "await", "async", "of", "get", "set"] {
            assert_eq!(single(word).kind, TokenKind::Identifier(word.into()));
        }
    }

    #[test]
    fn test_lexer_keywords() {
        assert_eq!(single("function").kind, TokenKind::Keyword(Keyword::Function));
        assert_eq!(single("null").kind, TokenKind::Keyword(Keyword::Null));
        assert_eq!(single("enum").kind, TokenKind::Keyword(Keyword::Enum));
    }

    #[test]
    fn test_lexer_escaped_keyword_is_flagged_identifier() {
        let token = single("\\u0069f");
        assert_eq!(token.kind, TokenKind::Identifier("if".into()));
        assert!(token.escaped);
        assert!(!token.is_contextual("if"));
    }

    #[test]
    fn test_lexer_punctuators_maximal_munch() {
        assert_eq!(
            kinds(">>>= ** ?. ?? ... => !== &&= ||= ??="),
            vec![
                TokenKind::Punctuator(Punctuator::GtGtGtEq),
                TokenKind::Punctuator(Punctuator::StarStar),
                TokenKind::Punctuator(Punctuator::OptionalChain),
                TokenKind::Punctuator(Punctuator::NullishCoalesce),
                TokenKind::Punctuator(Punctuator::Spread),
                TokenKind::Punctuator(Punctuator::Arrow),
                TokenKind::Punctuator(Punctuator::NotEqEq),
                TokenKind::Punctuator(Punctuator::AndAndEq),
                TokenKind::Punctuator(Punctuator::OrOrEq),
                TokenKind::Punctuator(Punctuator::NullishCoalesceEq),
            ]
        );
    }

    #[test]
    fn test_lexer_question_dot_before_digit() {
        assert_eq!(
            kinds("a?.5:b"),
            vec![
                TokenKind::Identifier("a".into()),
                TokenKind::Punctuator(Punctuator::Question),
                TokenKind::Number(0.5),
                TokenKind::Punctuator(Punctuator::Colon),
                TokenKind::Identifier("b".into()),
            ]
        );
    }

    #[test]
    fn test_lexer_numbers() {
        assert_eq!(single("42").kind, TokenKind::Number(42.0));
        assert_eq!(single("42.5").kind, TokenKind::Number(42.5));
        assert_eq!(single(".5e1").kind, TokenKind::Number(5.0));
        assert_eq!(single("1.").kind, TokenKind::Number(1.0));
        assert_eq!(single("0xFF").kind, TokenKind::Number(255.0));
        assert_eq!(single("0o17").kind, TokenKind::Number(15.0));
        assert_eq!(single("0b101").kind, TokenKind::Number(5.0));
        assert_eq!(single("2e-3").kind, TokenKind::Number(0.002));
    }

    #[test]
    fn test_lexer_legacy_octal_is_flagged() {
        let token = single("017");
        assert_eq!(token.kind, TokenKind::Number(15.0));
        assert!(token.legacy_octal);

        let token = single("019");
        assert_eq!(token.kind, TokenKind::Number(19.0));
        assert!(token.legacy_octal);
    }

    #[test]
    fn test_lexer_bigint() {
        assert_eq!(single("123n").kind, TokenKind::BigInt("123".into()));
        assert_eq!(single("0x1Fn").kind, TokenKind::BigInt("0x1F".into()));
        assert_eq!(single("0b11n").kind, TokenKind::BigInt("0b11".into()));
    }

    #[test]
    fn test_lexer_bigint_error_float() {
        assert!(Lexer::new("1.5n").next_token().is_err());
        assert!(Lexer::new("017n").next_token().is_err());
    }

    #[test]
    fn test_lexer_bigint_requires_es2020() {
        let options = ParseOptions::default().with_ecma_version(EcmaVersion::ES2019);
        assert!(Lexer::with_options("1n", &options).next_token().is_err());
    }

    #[test]
    fn test_lexer_numeric_separators_gated() {
        let options = ParseOptions::default().with_ecma_version(EcmaVersion::ES2021);
        let token = Lexer::with_options("1_000_000", &options).next_token().unwrap();
        assert_eq!(token.kind, TokenKind::Number(1_000_000.0));

        // ES2020: `_` starts an identifier directly after the number
        assert!(Lexer::new("1_000").next_token().is_err());

        let mut lexer = Lexer::with_options("1__0", &options);
        assert!(lexer.next_token().is_err());
        let mut lexer = Lexer::with_options("10_", &options);
        assert!(lexer.next_token().is_err());
    }

    #[test]
    fn test_lexer_identifier_after_number_is_error() {
        let err = lex_error("3in x");
        assert_eq!(err.message, "Identifier directly after number");
    }

    #[test]
    fn test_lexer_string() {
        assert_eq!(single(r#""hello""#).kind, TokenKind::String("hello".into()));
        assert_eq!(single("'it\\'s'").kind, TokenKind::String("it's".into()));
    }

    #[test]
    fn test_lexer_string_escapes() {
        assert_eq!(
            single(r#""\n\t\x41B\u{43}\0""#).kind,
            TokenKind::String("\n\tABC\0".into())
        );
        assert_eq!(
            single(r#""\uD83D\uDE00""#).kind,
            TokenKind::String("\u{1F600}".into())
        );
        assert_eq!(single("\"a\\\nb\"").kind, TokenKind::String("ab".into()));
    }

    #[test]
    fn test_lexer_lone_surrogate_is_replaced() {
        assert_eq!(
            single(r#""\uD800""#).kind,
            TokenKind::String("\u{FFFD}".into())
        );
        assert_eq!(
            single(r#""\uDC00x""#).kind,
            TokenKind::String("\u{FFFD}x".into())
        );

        // raw text keeps the escape
        let source = r#""\uD800""#;
        let mut lexer = Lexer::new(source);
        let token = lexer.next_token().unwrap();
        assert_eq!(lexer.raw(&token), source);
    }

    #[test]
    fn test_lexer_string_octal_escape_flagged() {
        let token = single(r#""\101""#);
        assert_eq!(token.kind, TokenKind::String("A".into()));
        assert!(token.legacy_octal);
    }

    #[test]
    fn test_lexer_invalid_escape() {
        let err = lex_error(r#""\xZZ""#);
        assert!(matches!(err.kind, ErrorKind::LexicalError));
        assert_eq!(err.message, "Bad character escape sequence");
        assert_eq!(err.position.offset, 1);
    }

    #[test]
    fn test_lexer_unterminated_string() {
        let err = lex_error("x = 'abc");
        assert_eq!(err.message, "Unterminated string constant");
        assert_eq!(err.position.offset, 4);

        assert!(Lexer::new("'a\nb'").next_token().is_err());
    }

    #[test]
    fn test_lexer_unexpected_character() {
        let err = lex_error("a @ b");
        assert_eq!(err.message, "Unexpected character '@'");
        assert_eq!(err.position.offset, 2);
    }

    #[test]
    fn test_lexer_comments() {
        let mut lexer = Lexer::new("// line\n/* block\n */ x");
        let token = lexer.next_token().unwrap();
        assert_eq!(token.kind, TokenKind::Identifier("x".into()));
        assert!(token.newline_before);
        assert_eq!(token.start.line, 3);
        assert_eq!(token.start.column, 4);
    }

    #[test]
    fn test_lexer_unterminated_comment() {
        let err = lex_error("a /* never closed");
        assert_eq!(err.message, "Unterminated comment");
        assert_eq!(err.position.offset, 2);
    }

    #[test]
    fn test_lexer_newline_before_flag() {
        let mut lexer = Lexer::new("a\nb c");
        assert!(!lexer.next_token().unwrap().newline_before);
        assert!(lexer.next_token().unwrap().newline_before);
        assert!(!lexer.next_token().unwrap().newline_before);
    }

    #[test]
    fn test_lexer_positions_are_utf16() {
        let mut lexer = Lexer::new("'😀' x");
        let string = lexer.next_token().unwrap();
        assert_eq!(string.end.offset, 4);
        let ident = lexer.next_token().unwrap();
        assert_eq!(ident.start.offset, 5);
        assert_eq!(ident.start.column, 5);
        assert_eq!(lexer.raw(&ident), "x");
    }

    #[test]
    fn test_lexer_crlf_counts_one_line() {
        let mut lexer = Lexer::new("a\r\nb");
        lexer.next_token().unwrap();
        let b = lexer.next_token().unwrap();
        assert_eq!(b.start.line, 2);
        assert_eq!(b.start.column, 0);
    }

    #[test]
    fn test_lexer_template_parts() {
        let mut lexer = Lexer::new("`a${b}c`");
        let head = lexer.next_token().unwrap();
        match head.kind {
            TokenKind::Template { cooked, raw, tail } => {
                assert_eq!(cooked.unwrap(), "a");
                assert_eq!(raw, "a");
                assert!(!tail);
            }
            other => panic!("expected template head, got {:?}", other),
        }
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Identifier("b".into()));
        let brace = lexer.next_token().unwrap();
        assert!(brace.is_punctuator(Punctuator::RBrace));
        let tail = lexer.rescan_template_continuation(&brace).unwrap();
        match tail.kind {
            TokenKind::Template { cooked, tail, .. } => {
                assert_eq!(cooked.unwrap(), "c");
                assert!(tail);
            }
            other => panic!("expected template tail, got {:?}", other),
        }
        assert!(lexer.next_token().unwrap().is_eof());
    }

    #[test]
    fn test_lexer_template_invalid_escape_defers_error() {
        let token = single("`\\unicode`");
        match token.kind {
            TokenKind::Template { cooked, raw, .. } => {
                assert!(cooked.is_err());
                assert_eq!(raw, "\\unicode");
            }
            other => panic!("expected template, got {:?}", other),
        }
    }

    #[test]
    fn test_lexer_template_normalizes_crlf() {
        match single("`a\r\nb`").kind {
            TokenKind::Template { cooked, raw, .. } => {
                assert_eq!(cooked.unwrap(), "a\nb");
                assert_eq!(raw, "a\nb");
            }
            other => panic!("expected template, got {:?}", other),
        }
    }

    #[test]
    fn test_lexer_regexp_rescan() {
        let mut lexer = Lexer::new("/ab[/]c/gi.x");
        let slash = lexer.next_token().unwrap();
        assert!(slash.is_punctuator(Punctuator::Slash));
        let regexp = lexer.rescan_as_regexp(&slash).unwrap();
        assert_eq!(
            regexp.kind,
            TokenKind::RegExp {
                pattern: "ab[/]c".into(),
                flags: "gi".into()
            }
        );
        assert_eq!(lexer.raw(&regexp), "/ab[/]c/gi");
        assert!(lexer.next_token().unwrap().is_punctuator(Punctuator::Dot));
    }

    #[test]
    fn test_lexer_regexp_flag_errors() {
        let mut lexer = Lexer::new("/a/gg");
        let slash = lexer.next_token().unwrap();
        let err = lexer.rescan_as_regexp(&slash).unwrap_err();
        assert_eq!(err.message, "Duplicate regular expression flag");

        let mut lexer = Lexer::new("/a/x");
        let slash = lexer.next_token().unwrap();
        assert!(lexer.rescan_as_regexp(&slash).is_err());
    }

    #[test]
    fn test_lexer_unterminated_regexp() {
        let mut lexer = Lexer::new("/abc\n/");
        let slash = lexer.next_token().unwrap();
        let err = lexer.rescan_as_regexp(&slash).unwrap_err();
        assert_eq!(err.message, "Unterminated regular expression");
    }

    #[test]
    fn test_lexer_peek_and_peek_second() {
        let mut lexer = Lexer::new("async x =>");
        assert!(lexer.peek().unwrap().is_contextual("async"));
        assert!(lexer.peek_second().unwrap().is_contextual("x"));
        assert!(lexer.next_token().unwrap().is_contextual("async"));
        assert!(lexer.peek_second().unwrap().is_punctuator(Punctuator::Arrow));
    }

    #[test]
    fn test_lexer_snapshot_restore() {
        let mut lexer = Lexer::new("a b c");
        lexer.next_token().unwrap();
        let snapshot = lexer.snapshot();
        lexer.next_token().unwrap();
        lexer.next_token().unwrap();
        lexer.restore(snapshot);
        assert!(lexer.next_token().unwrap().is_contextual("b"));
    }

    #[test]
    fn test_lexer_hashbang() {
        let options = ParseOptions {
            allow_hash_bang: true,
            ..ParseOptions::default()
        };
        let mut lexer = Lexer::with_options("#!/usr/bin/env node\nx", &options);
        let token = lexer.next_token().unwrap();
        assert!(token.is_contextual("x"));
        assert_eq!(token.start.line, 2);

        assert!(Lexer::new("#!x").next_token().is_err());
    }

    #[test]
    fn test_lexer_end_position() {
        let lexer = Lexer::new("a\nbc");
        let end = lexer.end_position();
        assert_eq!(end.line, 2);
        assert_eq!(end.column, 2);
        assert_eq!(end.offset, 4);
    }
}
