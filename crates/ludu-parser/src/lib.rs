pub mod expr;
pub mod parser;

pub use parser::Parser;

use ludu_syntax::ast::Program;
use ludu_syntax::error::Result;
use ludu_syntax::token::Token;

/// Parse a full token stream into a program.
pub fn parse_tokens(tokens: Vec<Token>) -> Result<Program> {
    Parser::new(tokens).parse_program()
}
