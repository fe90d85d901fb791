//! Expression parsing by precedence climbing.
//!
//! From loosest to tightest: `||`, `&&`, `== !=`, `< > <= >=`, `+ -`,
//! `* / %`, prefix `! -`, then primaries with their call/member suffixes.

use ludu_syntax::ast::*;
use ludu_syntax::error::{Error, Result};
use ludu_syntax::token::TokenKind;

use crate::parser::Parser;

const LOWEST: u8 = 1;
const HIGHEST: u8 = 6;

fn binary_op(kind: TokenKind) -> Option<BinaryOp> {
    let op = match kind {
        TokenKind::OrOr => BinaryOp::Or,
        TokenKind::AndAnd => BinaryOp::And,
        TokenKind::EqEq => BinaryOp::Eq,
        TokenKind::NotEq => BinaryOp::Ne,
        TokenKind::Less => BinaryOp::Lt,
        TokenKind::LessEq => BinaryOp::Le,
        TokenKind::Greater => BinaryOp::Gt,
        TokenKind::GreaterEq => BinaryOp::Ge,
        TokenKind::Plus => BinaryOp::Add,
        TokenKind::Minus => BinaryOp::Sub,
        TokenKind::Star => BinaryOp::Mul,
        TokenKind::Slash => BinaryOp::Div,
        TokenKind::Percent => BinaryOp::Mod,
        _ => return None,
    };
    Some(op)
}

impl Parser {
    pub fn parse_expr(&mut self) -> Result<Expr> {
        self.parse_binary(LOWEST)
    }

    fn parse_binary(&mut self, prec: u8) -> Result<Expr> {
        if prec > HIGHEST {
            return self.parse_unary();
        }
        let mut lhs = self.parse_binary(prec + 1)?;
        while let Some(op) = binary_op(self.peek().kind).filter(|op| op.precedence() == prec) {
            self.advance();
            let rhs = self.parse_binary(prec + 1)?;
            let line = lhs.line;
            lhs = Expr::new(
                ExprKind::Binary {
                    lhs: Box::new(lhs),
                    op,
                    rhs: Box::new(rhs),
                },
                line,
            );
        }
        Ok(lhs)
    }

    fn parse_unary(&mut self) -> Result<Expr> {
        let kind = self.peek().kind;
        let op = match kind {
            TokenKind::Bang => UnaryOp::Not,
            TokenKind::Minus => UnaryOp::Neg,
            _ => return self.parse_primary(),
        };
        let line = self.advance().line;
        let operand = self.parse_unary()?;
        Ok(Expr::new(
            ExprKind::Unary {
                op,
                operand: Box::new(operand),
            },
            line,
        ))
    }

    fn parse_primary(&mut self) -> Result<Expr> {
        let tok = self.peek().clone();
        let kind = match tok.kind {
            TokenKind::Number => {
                self.advance();
                ExprKind::Literal(number_literal(&tok.text, tok.line, tok.col)?)
            }
            TokenKind::String => {
                self.advance();
                ExprKind::Literal(Literal::Str(tok.text))
            }
            TokenKind::True => {
                self.advance();
                ExprKind::Literal(Literal::Bool(true))
            }
            TokenKind::False => {
                self.advance();
                ExprKind::Literal(Literal::Bool(false))
            }
            TokenKind::Ident => {
                self.advance();
                ExprKind::Ident(tok.text)
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_expr()?;
                self.expect(TokenKind::RParen, "Expected ')'")?;
                inner.kind
            }
            _ => return self.error_here("Expected expression"),
        };
        self.parse_postfix(Expr::new(kind, tok.line))
    }

    /// Applies any number of `(args...)` and `.name` suffixes.
    fn parse_postfix(&mut self, mut expr: Expr) -> Result<Expr> {
        loop {
            if self.eat(TokenKind::LParen) {
                let mut args = Vec::new();
                if !self.check(TokenKind::RParen) {
                    args.push(self.parse_expr()?);
                    while self.eat(TokenKind::Comma) {
                        args.push(self.parse_expr()?);
                    }
                }
                self.expect(TokenKind::RParen, "Expected ')' after arguments")?;
                let line = expr.line;
                expr = Expr::new(
                    ExprKind::Call {
                        callee: Box::new(expr),
                        args,
                    },
                    line,
                );
            } else if self.eat(TokenKind::Dot) {
                let name = self
                    .expect(TokenKind::Ident, "Expected member name after '.'")?
                    .text;
                let line = expr.line;
                expr = Expr::new(
                    ExprKind::Member {
                        target: Box::new(expr),
                        name,
                    },
                    line,
                );
            } else {
                return Ok(expr);
            }
        }
    }
}

fn number_literal(text: &str, line: usize, col: usize) -> Result<Literal> {
    let lit = if text.contains('.') {
        text.parse::<f64>().map(Literal::Float).ok()
    } else {
        text.parse::<i64>().map(Literal::Int).ok()
    };
    lit.ok_or_else(|| Error::with_span(format!("Invalid number literal '{}'", text), line, col))
}
