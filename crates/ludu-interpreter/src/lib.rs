//! LuduScript interpreter: evaluates a parsed program directly into an ordered
//! sequence of output records.
//!
//! Each `obj("Class", id) { ... }` statement produces one [`Record`]. Records
//! keep the order their `obj` statements finished in.
//!
//! ```
//! let records = ludu_interpreter::run_source(r#"obj("Player", 1) { num(hp) { 100 } }"#)?;
//! assert_eq!(records[0].class(), "Player");
//! # Ok::<(), ludu_syntax::Error>(())
//! ```

pub mod env;
mod flow;
pub mod interpreter;
mod ops;
pub mod record;
pub mod value;

pub use env::Env;
pub use interpreter::Interpreter;
pub use record::{Field, Record};
pub use value::Value;

use ludu_lexer::Lexer;
use ludu_syntax::error::Result;

/// Lexes, parses and runs `src`, returning every emitted record.
pub fn run_source(src: &str) -> Result<Vec<Record>> {
    let tokens = Lexer::new(src).tokenize();
    let program = ludu_parser::parse_tokens(tokens)?;
    let mut interpreter = Interpreter::new();
    interpreter.run(&program)?;
    Ok(interpreter.into_output())
}
