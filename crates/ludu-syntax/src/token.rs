//! Token definitions for the LuduScript language.
//!
//! Tokens are the smallest meaningful units of a script. The lexer hands
//! them to the parser one at a time; every token keeps the exact source text
//! it was scanned from so the parser can quote it in error messages.
//!
//! # Token Categories
//!
//! - **Identifiers**: variable and field names (`hp`, `player_count`)
//! - **Literals**: numbers, strings and booleans (`42`, `2.5`, `"Wolf"`, `true`)
//! - **Keywords**: `if`, `elif`, `else`, `for`, `break`, `continue`, `obj`,
//!   `num`, `str`, `bool`
//! - **Operators**: arithmetic, comparison and logical operators
//! - **Punctuation**: `( ) { } , ; .`
//! - **Special**: end of input, and `Unknown` for anything the lexer could
//!   not classify
//!
//! # Examples
//!
//! ```rust
//! use ludu_syntax::{Token, TokenKind};
//!
//! let keyword = Token::new(TokenKind::Obj, "obj", 1, 1);
//! assert!(keyword.kind.is_keyword());
//!
//! let number = Token::new(TokenKind::Number, "2.5", 3, 9);
//! assert_eq!(number.text, "2.5");
//! ```

use std::fmt;

/// Token types that can be produced by the LuduScript lexer.
///
/// The kind carries no payload: the token's [`text`](Token::text) holds the
/// identifier name, the digits of a number or the unescaped contents of a
/// string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // === Literals ===
    /// An identifier (`hp`, `role_name`)
    Ident,

    /// A numeric literal; the text contains a `.` only for floats
    Number,

    /// A string literal; the text is already unescaped
    String,

    // === Keywords ===
    /// `if`
    If,
    /// `elif`
    Elif,
    /// `else`
    Else,
    /// `for`
    For,
    /// `break`
    Break,
    /// `continue`
    Continue,
    /// `obj` - emits one record
    Obj,
    /// `num` - numeric declaration
    Num,
    /// `str` - string declaration
    Str,
    /// `bool` - boolean declaration
    Bool,
    /// `true`
    True,
    /// `false`
    False,

    // === Punctuation ===
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `,`
    Comma,
    /// `;`
    Semi,
    /// `.`
    Dot,

    // === Operators ===
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
    /// `=`
    Assign,
    /// `==`
    EqEq,
    /// `!=`
    NotEq,
    /// `<`
    Less,
    /// `<=`
    LessEq,
    /// `>`
    Greater,
    /// `>=`
    GreaterEq,
    /// `&&`
    AndAnd,
    /// `||`
    OrOr,
    /// `!`
    Bang,

    /// An unrecognized character or an unterminated string
    Unknown,

    /// End-of-input marker
    Eof,
}

impl TokenKind {
    /// Maps a scanned word onto its keyword kind, if it is one.
    pub fn keyword(word: &str) -> Option<TokenKind> {
        let kind = match word {
            "if" => TokenKind::If,
            "elif" => TokenKind::Elif,
            "else" => TokenKind::Else,
            "for" => TokenKind::For,
            "break" => TokenKind::Break,
            "continue" => TokenKind::Continue,
            "obj" => TokenKind::Obj,
            "num" => TokenKind::Num,
            "str" => TokenKind::Str,
            "bool" => TokenKind::Bool,
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            _ => return None,
        };
        Some(kind)
    }

    pub fn is_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::If
                | TokenKind::Elif
                | TokenKind::Else
                | TokenKind::For
                | TokenKind::Break
                | TokenKind::Continue
                | TokenKind::Obj
                | TokenKind::Num
                | TokenKind::Str
                | TokenKind::Bool
                | TokenKind::True
                | TokenKind::False
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Ident => "identifier",
            TokenKind::Number => "number",
            TokenKind::String => "string",
            TokenKind::Unknown => "unknown",
            TokenKind::Eof => "end of input",
            k if k.is_keyword() => "keyword",
            _ => "symbol",
        };
        f.write_str(name)
    }
}

/// A token with its source text and position.
///
/// # Fields
///
/// - `kind`: the syntactic category
/// - `text`: the source text (unescaped for strings, empty for end of input)
/// - `line`: 1-based line number
/// - `col`: 1-based column of the token's first character
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The syntactic category of this token
    pub kind: TokenKind,

    /// Source text of this token
    pub text: String,

    /// Line number in the source file (1-based)
    pub line: usize,

    /// Column number in the source file (1-based)
    pub col: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, line: usize, col: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            line,
            col,
        }
    }

    /// Text used when quoting this token in a diagnostic.
    pub fn describe(&self) -> &str {
        if self.kind == TokenKind::Eof {
            "end of input"
        } else {
            &self.text
        }
    }
}
