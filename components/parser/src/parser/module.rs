//! Import and export declarations

use super::function::{collect_bound_names, DeclarationKind};
use super::{Parser, StatementContext};
use crate::ast::*;
use crate::error::*;
use crate::lexer::{Keyword, Punctuator, TokenKind};
use crate::options::EcmaVersion;
use core_types::SourcePosition;

/// Names a declaration statement introduces
fn declared_names(statement: &Statement) -> Vec<&Identifier> {
    let mut names = Vec::new();
    match statement {
        Statement::VariableDeclaration(declaration) => {
            for declarator in &declaration.declarations {
                collect_bound_names(&declarator.id, &mut names);
            }
        }
        Statement::FunctionDeclaration(function) => names.extend(function.id.as_ref()),
        Statement::ClassDeclaration(class) => names.extend(class.id.as_ref()),
        _ => {}
    }
    names
}

impl<'a> Parser<'a> {
    /// `import ... from "m";` or `import "m";`
    pub(crate) fn parse_import_declaration(&mut self) -> ParseResult<Statement> {
        let start = self.current.start;
        self.expect_keyword(Keyword::Import)?;

        let mut specifiers = Vec::new();
        if !matches!(self.current.kind, TokenKind::String(_)) {
            let mut more = true;
            if matches!(self.current.kind, TokenKind::Identifier(_)) {
                let local = self.parse_binding_identifier(true)?;
                specifiers.push(ImportSpecifier::Default {
                    span: local.span,
                    local,
                });
                more = self.eat(Punctuator::Comma)?;
            }
            if more {
                if self.check(Punctuator::Star) {
                    specifiers.push(self.parse_namespace_import()?);
                } else if self.check(Punctuator::LBrace) {
                    self.parse_named_imports(&mut specifiers)?;
                } else {
                    return Err(self.unexpected());
                }
            }
            self.expect_contextual("from")?;
        }

        let source = self.parse_module_source()?;
        self.consume_semicolon()?;
        Ok(Statement::ImportDeclaration {
            specifiers,
            source,
            span: self.finish_span(start),
        })
    }

    fn parse_namespace_import(&mut self) -> ParseResult<ImportSpecifier> {
        let start = self.current.start;
        self.expect(Punctuator::Star)?;
        self.expect_contextual("as")?;
        let local = self.parse_binding_identifier(true)?;
        Ok(ImportSpecifier::Namespace {
            local,
            span: self.finish_span(start),
        })
    }

    fn parse_named_imports(&mut self, specifiers: &mut Vec<ImportSpecifier>) -> ParseResult<()> {
        self.expect(Punctuator::LBrace)?;
        let mut first = true;
        while !self.eat(Punctuator::RBrace)? {
            if !first {
                self.expect(Punctuator::Comma)?;
                if self.eat(Punctuator::RBrace)? {
                    break;
                }
            }
            first = false;

            let start = self.current.start;
            let imported = self.parse_identifier_name()?;
            let local = if self.is_contextual("as") {
                self.next()?;
                self.parse_binding_identifier(true)?
            } else {
                self.check_unreserved(&imported.name, imported.span.start)?;
                self.check_binding_name(&imported, true)?;
                imported.clone()
            };
            specifiers.push(ImportSpecifier::Named {
                imported,
                local,
                span: self.finish_span(start),
            });
        }
        Ok(())
    }

    /// String literal naming a module
    fn parse_module_source(&mut self) -> ParseResult<Literal> {
        if !matches!(self.current.kind, TokenKind::String(_)) {
            return Err(self.unexpected());
        }
        match self.parse_literal()? {
            Expression::Literal(literal) => Ok(literal),
            _ => Err(self.unexpected()),
        }
    }

    /// `export *`, `export default`, `export <declaration>` or `export { ... }`
    pub(crate) fn parse_export_declaration(&mut self) -> ParseResult<Statement> {
        let start = self.current.start;
        self.expect_keyword(Keyword::Export)?;

        if self.eat(Punctuator::Star)? {
            let exported = if self.is_contextual("as") {
                self.require_version(EcmaVersion::ES2020)?;
                self.next()?;
                let name = self.parse_identifier_name()?;
                self.add_export(&name.name, name.span.start)?;
                Some(name)
            } else {
                None
            };
            self.expect_contextual("from")?;
            let source = self.parse_module_source()?;
            self.consume_semicolon()?;
            return Ok(Statement::ExportAllDeclaration {
                exported,
                source,
                span: self.finish_span(start),
            });
        }

        if self.check_keyword(Keyword::Default) {
            return self.parse_export_default(start);
        }

        if self.starts_exported_declaration()? {
            let declaration = self.parse_statement(StatementContext::List)?;
            for name in declared_names(&declaration) {
                self.add_export(&name.name, name.span.start)?;
            }
            return Ok(Statement::ExportNamedDeclaration {
                declaration: Some(Box::new(declaration)),
                specifiers: Vec::new(),
                source: None,
                span: self.finish_span(start),
            });
        }

        let specifiers = self.parse_export_specifiers()?;
        let source = if self.is_contextual("from") {
            self.next()?;
            Some(self.parse_module_source()?)
        } else {
            for specifier in &specifiers {
                self.check_unreserved(&specifier.local.name, specifier.local.span.start)?;
            }
            None
        };
        for specifier in &specifiers {
            self.add_export(&specifier.exported.name, specifier.exported.span.start)?;
        }
        self.consume_semicolon()?;
        Ok(Statement::ExportNamedDeclaration {
            declaration: None,
            specifiers,
            source,
            span: self.finish_span(start),
        })
    }

    fn parse_export_default(&mut self, start: SourcePosition) -> ParseResult<Statement> {
        let default = self.expect_keyword(Keyword::Default)?;
        self.add_export("default", default.start)?;

        let declaration_start = self.current.start;
        let declaration = if self.check_keyword(Keyword::Function) {
            ExportDefaultKind::FunctionDeclaration(self.parse_function(
                declaration_start,
                false,
                DeclarationKind::DefaultExport,
            )?)
        } else if self.is_async_function()? {
            self.next()?;
            ExportDefaultKind::FunctionDeclaration(self.parse_function(
                declaration_start,
                true,
                DeclarationKind::DefaultExport,
            )?)
        } else if self.check_keyword(Keyword::Class) {
            ExportDefaultKind::ClassDeclaration(
                self.parse_class(declaration_start, DeclarationKind::DefaultExport)?,
            )
        } else {
            let expression = self.parse_maybe_assign(false, None)?;
            self.consume_semicolon()?;
            ExportDefaultKind::Expression(expression)
        };
        Ok(Statement::ExportDefaultDeclaration {
            declaration,
            span: self.finish_span(start),
        })
    }

    fn starts_exported_declaration(&mut self) -> ParseResult<bool> {
        match self.current.kind {
            TokenKind::Keyword(Keyword::Var | Keyword::Const | Keyword::Function | Keyword::Class) => {
                Ok(true)
            }
            _ => Ok(self.is_contextual("let") || self.is_async_function()?),
        }
    }

    /// `{ a, b as c, default as d }`
    fn parse_export_specifiers(&mut self) -> ParseResult<Vec<ExportSpecifier>> {
        self.expect(Punctuator::LBrace)?;
        let mut specifiers = Vec::new();
        while !self.eat(Punctuator::RBrace)? {
            if !specifiers.is_empty() {
                self.expect(Punctuator::Comma)?;
                if self.eat(Punctuator::RBrace)? {
                    break;
                }
            }
            let start = self.current.start;
            let local = self.parse_identifier_name()?;
            let exported = if self.is_contextual("as") {
                self.next()?;
                self.parse_identifier_name()?
            } else {
                local.clone()
            };
            specifiers.push(ExportSpecifier {
                local,
                exported,
                span: self.finish_span(start),
            });
        }
        Ok(specifiers)
    }

    fn add_export(&mut self, name: &str, position: SourcePosition) -> ParseResult<()> {
        if !self.exported_names.insert(name.to_string()) {
            return Err(syntax_error(format!("Duplicate export '{}'", name), position));
        }
        Ok(())
    }
}
