//! Recursive-descent statement parser.

use ludu_syntax::ast::*;
use ludu_syntax::error::{error_at, Result};
use ludu_syntax::token::{Token, TokenKind};

/// Parser over a token vector produced by the lexer.
///
/// The whole stream is buffered, so looking one token ahead never consumes
/// anything.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().map(|t| t.kind) != Some(TokenKind::Eof) {
            let (line, col) = tokens.last().map(|t| (t.line, t.col)).unwrap_or((1, 1));
            tokens.push(Token::new(TokenKind::Eof, "", line, col));
        }
        Self { tokens, pos: 0 }
    }

    pub(crate) fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    /// Kind of the token `n` positions past the current one; `Eof` past the end.
    pub(crate) fn peek_kind_at(&self, n: usize) -> TokenKind {
        self.tokens
            .get(self.pos + n)
            .map(|t| t.kind)
            .unwrap_or(TokenKind::Eof)
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    pub(crate) fn advance(&mut self) -> Token {
        let tok = self.tokens[self.pos].clone();
        if tok.kind != TokenKind::Eof {
            self.pos += 1;
        }
        tok
    }

    pub(crate) fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn expect(&mut self, kind: TokenKind, msg: &str) -> Result<Token> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            self.error_here(msg)
        }
    }

    /// Builds an error pointing at the current token and quoting its text.
    pub(crate) fn error_here<T>(&self, msg: &str) -> Result<T> {
        let tok = self.peek();
        error_at(tok.line, tok.col, format!("{}, found '{}'", msg, tok.describe()))
    }

    pub(crate) fn is_expression_start(&self) -> bool {
        matches!(
            self.peek().kind,
            TokenKind::Number
                | TokenKind::String
                | TokenKind::Ident
                | TokenKind::True
                | TokenKind::False
                | TokenKind::LParen
                | TokenKind::Minus
                | TokenKind::Bang
        )
    }

    fn at_assignment(&self) -> bool {
        self.check(TokenKind::Ident) && self.peek_kind_at(1) == TokenKind::Assign
    }

    pub fn parse_program(&mut self) -> Result<Program> {
        let mut stmts = Vec::new();
        while !self.check(TokenKind::Eof) {
            stmts.push(self.parse_stmt()?);
        }
        Ok(Program { stmts })
    }

    pub fn parse_stmt(&mut self) -> Result<Stmt> {
        let kind = self.peek().kind;
        let stmt = match kind {
            TokenKind::If => self.parse_if()?,
            TokenKind::For => self.parse_for()?,
            TokenKind::Obj => self.parse_obj()?,
            TokenKind::Num | TokenKind::Str | TokenKind::Bool => self.parse_decl()?,
            TokenKind::Break => {
                let line = self.advance().line;
                Stmt::new(StmtKind::Break(self.parse_block()?), line)
            }
            TokenKind::Continue => {
                let line = self.advance().line;
                Stmt::new(StmtKind::Continue(self.parse_block()?), line)
            }
            _ if self.at_assignment() => {
                let name_tok = self.advance();
                self.advance();
                let expr = self.parse_expr()?;
                Stmt::new(
                    StmtKind::Assign {
                        name: name_tok.text,
                        expr,
                    },
                    name_tok.line,
                )
            }
            _ => {
                let expr = self.parse_expr()?;
                let line = expr.line;
                Stmt::new(StmtKind::Expr(expr), line)
            }
        };
        self.eat(TokenKind::Semi);
        Ok(stmt)
    }

    fn parse_block(&mut self) -> Result<Vec<Stmt>> {
        self.expect(TokenKind::LBrace, "Expected '{'")?;
        let mut stmts = Vec::new();
        while !self.check(TokenKind::RBrace) && !self.check(TokenKind::Eof) {
            stmts.push(self.parse_stmt()?);
        }
        self.expect(TokenKind::RBrace, "Expected '}'")?;
        Ok(stmts)
    }

    fn parse_if(&mut self) -> Result<Stmt> {
        let line = self.expect(TokenKind::If, "Expected 'if'")?.line;
        self.expect(TokenKind::LParen, "Expected '(' after 'if'")?;
        let cond = self.parse_expr()?;
        self.expect(TokenKind::RParen, "Expected ')' after if condition")?;
        let then_body = self.parse_block()?;

        let mut elifs = Vec::new();
        while self.eat(TokenKind::Elif) {
            self.expect(TokenKind::LParen, "Expected '(' after 'elif'")?;
            let cond = self.parse_expr()?;
            self.expect(TokenKind::RParen, "Expected ')' after elif condition")?;
            let body = self.parse_block()?;
            elifs.push(ElifClause { cond, body });
        }

        let else_body = if self.eat(TokenKind::Else) {
            Some(self.parse_block()?)
        } else {
            None
        };

        Ok(Stmt::new(
            StmtKind::If {
                cond,
                then_body,
                elifs,
                else_body,
            },
            line,
        ))
    }

    fn parse_for(&mut self) -> Result<Stmt> {
        let line = self.expect(TokenKind::For, "Expected 'for'")?.line;
        self.expect(TokenKind::LParen, "Expected '(' after 'for'")?;
        let var = self
            .expect(TokenKind::Ident, "Expected iterator variable name")?
            .text;
        self.expect(TokenKind::Comma, "Expected ',' after iterator variable")?;

        let mut args = vec![self.parse_expr()?];
        while args.len() < 3 && self.eat(TokenKind::Comma) {
            args.push(self.parse_expr()?);
        }
        self.expect(TokenKind::RParen, "Expected ')' after for arguments")?;
        let body = self.parse_block()?;

        Ok(Stmt::new(StmtKind::For { var, args, body }, line))
    }

    fn parse_obj(&mut self) -> Result<Stmt> {
        let line = self.expect(TokenKind::Obj, "Expected 'obj'")?.line;
        self.expect(TokenKind::LParen, "Expected '(' after 'obj'")?;
        let class = self
            .expect(TokenKind::String, "Expected class name string")?
            .text;
        self.expect(TokenKind::Comma, "Expected ',' after class name")?;
        let id = self.parse_expr()?;
        self.expect(TokenKind::RParen, "Expected ')' after object id")?;
        let body = self.parse_block()?;

        Ok(Stmt::new(StmtKind::Obj { class, id, body }, line))
    }

    fn parse_decl(&mut self) -> Result<Stmt> {
        let type_tok = self.advance();
        let ty = match type_tok.kind {
            TokenKind::Num => DeclType::Num,
            TokenKind::Str => DeclType::Str,
            _ => DeclType::Bool,
        };
        self.expect(TokenKind::LParen, "Expected '(' after type")?;
        let name = self.expect(TokenKind::Ident, "Expected variable name")?.text;
        self.expect(TokenKind::RParen, "Expected ')' after variable name")?;

        let init = if self.eat(TokenKind::LBrace) {
            let init = self.parse_initializer()?;
            self.expect(TokenKind::RBrace, "Expected '}' after initializer")?;
            init
        } else {
            Initializer::Default
        };

        Ok(Stmt::new(StmtKind::Decl { ty, name, init }, type_tok.line))
    }

    /// Parses what sits between the braces of a declaration, leaving the
    /// closing brace in place.
    fn parse_initializer(&mut self) -> Result<Initializer> {
        if self.check(TokenKind::RBrace) {
            return Ok(Initializer::Default);
        }

        let mut stmts = Vec::new();
        if self.is_expression_start() && !self.at_assignment() {
            let expr = self.parse_expr()?;
            self.eat(TokenKind::Semi);
            if self.check(TokenKind::RBrace) {
                return Ok(Initializer::Expr(expr));
            }
            let line = expr.line;
            stmts.push(Stmt::new(StmtKind::Expr(expr), line));
        }
        while !self.check(TokenKind::RBrace) && !self.check(TokenKind::Eof) {
            stmts.push(self.parse_stmt()?);
        }
        Ok(Initializer::Block(stmts))
    }
}
