//! LuduScript lexer: converts source text into tokens.
//!
//! The lexer never fails. Characters it cannot classify, and strings that
//! run into the end of input, come out as [`TokenKind::Unknown`] tokens and
//! the parser decides what to do with them.
use ludu_syntax::token::{Token, TokenKind};

/// Streaming character scanner that produces tokens with positions.
pub struct Lexer {
    src: Vec<char>,
    pos: usize,
    line: usize,
    col: usize,
}

impl Lexer {
    /// Create a new lexer over the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            src: input.chars().collect(),
            pos: 0,
            line: 1,
            col: 1,
        }
    }

    fn peek(&self) -> Option<char> {
        self.src.get(self.pos).copied()
    }
    fn peek_next(&self) -> Option<char> {
        self.src.get(self.pos + 1).copied()
    }
    fn advance(&mut self) -> Option<char> {
        let ch = self.src.get(self.pos).copied();
        if let Some(c) = ch {
            self.pos += 1;
            if c == '\n' {
                self.line += 1;
                self.col = 1;
            } else {
                self.col += 1;
            }
        }
        ch
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.advance();
            } else if c == '/' && self.peek_next() == Some('/') {
                while let Some(c2) = self.peek() {
                    if c2 == '\n' {
                        break;
                    }
                    self.advance();
                }
            } else {
                break;
            }
        }
    }

    fn read_number(&mut self, line: usize, col: usize) -> Token {
        let mut s = String::new();
        while let Some(c) = self.peek().filter(char::is_ascii_digit) {
            s.push(c);
            self.advance();
        }
        // `1.` keeps the dot as its own token; only `1.5` is a float.
        if self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            s.push('.');
            self.advance();
            while let Some(c) = self.peek().filter(char::is_ascii_digit) {
                s.push(c);
                self.advance();
            }
        }
        Token::new(TokenKind::Number, s, line, col)
    }

    fn read_ident_or_keyword(&mut self, line: usize, col: usize) -> Token {
        let mut s = String::new();
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '_' {
                s.push(c);
                self.advance();
            } else {
                break;
            }
        }
        let kind = TokenKind::keyword(&s).unwrap_or(TokenKind::Ident);
        Token::new(kind, s, line, col)
    }

    /// Reads the body of a string literal; the opening quote is already consumed.
    fn read_string(&mut self, line: usize, col: usize) -> Token {
        let mut s = String::new();
        while let Some(c) = self.advance() {
            match c {
                '"' => return Token::new(TokenKind::String, s, line, col),
                '\\' => match self.advance() {
                    Some('n') => s.push('\n'),
                    Some('t') => s.push('\t'),
                    Some(other) => s.push(other),
                    None => break,
                },
                other => s.push(other),
            }
        }
        Token::new(TokenKind::Unknown, s, line, col)
    }

    /// Consumes one or two characters and builds an operator token. The
    /// second character is taken only when it equals `second`.
    fn operator(
        &mut self,
        second: char,
        double: TokenKind,
        single: TokenKind,
        line: usize,
        col: usize,
    ) -> Token {
        let first = self.advance().unwrap_or_default();
        if self.peek() == Some(second) {
            self.advance();
            Token::new(double, format!("{}{}", first, second), line, col)
        } else {
            Token::new(single, first.to_string(), line, col)
        }
    }

    /// Scan and return the next token. Returns an `Eof` token once the input
    /// is exhausted, and keeps returning it on further calls.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();
        let line = self.line;
        let col = self.col;
        let c = match self.peek() {
            None => return Token::new(TokenKind::Eof, "", line, col),
            Some(c) => c,
        };
        let single = match c {
            '(' => Some(TokenKind::LParen),
            ')' => Some(TokenKind::RParen),
            '{' => Some(TokenKind::LBrace),
            '}' => Some(TokenKind::RBrace),
            ',' => Some(TokenKind::Comma),
            ';' => Some(TokenKind::Semi),
            '.' => Some(TokenKind::Dot),
            '+' => Some(TokenKind::Plus),
            '-' => Some(TokenKind::Minus),
            '*' => Some(TokenKind::Star),
            '/' => Some(TokenKind::Slash),
            '%' => Some(TokenKind::Percent),
            _ => None,
        };
        if let Some(kind) = single {
            self.advance();
            return Token::new(kind, c.to_string(), line, col);
        }
        match c {
            '=' => self.operator('=', TokenKind::EqEq, TokenKind::Assign, line, col),
            '!' => self.operator('=', TokenKind::NotEq, TokenKind::Bang, line, col),
            '<' => self.operator('=', TokenKind::LessEq, TokenKind::Less, line, col),
            '>' => self.operator('=', TokenKind::GreaterEq, TokenKind::Greater, line, col),
            '&' => self.operator('&', TokenKind::AndAnd, TokenKind::Unknown, line, col),
            '|' => self.operator('|', TokenKind::OrOr, TokenKind::Unknown, line, col),
            '"' => {
                self.advance();
                self.read_string(line, col)
            }
            c if c.is_ascii_digit() => self.read_number(line, col),
            c if c.is_ascii_alphabetic() || c == '_' => self.read_ident_or_keyword(line, col),
            other => {
                self.advance();
                Token::new(TokenKind::Unknown, other.to_string(), line, col)
            }
        }
    }

    /// Tokenize the entire input into a vector of tokens ending with Eof.
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let tk = self.next_token();
            let done = tk.kind == TokenKind::Eof;
            tokens.push(tk);
            if done {
                break;
            }
        }
        tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        Lexer::new(input).tokenize().into_iter().map(|t| t.kind).collect()
    }

    fn texts(input: &str) -> Vec<String> {
        Lexer::new(input).tokenize().into_iter().map(|t| t.text).collect()
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(kinds(""), vec![TokenKind::Eof]);
        assert_eq!(kinds("   \n\t  // only a comment"), vec![TokenKind::Eof]);
    }

    #[test]
    fn test_eof_is_sticky() {
        let mut lexer = Lexer::new("x");
        assert_eq!(lexer.next_token().kind, TokenKind::Ident);
        assert_eq!(lexer.next_token().kind, TokenKind::Eof);
        assert_eq!(lexer.next_token().kind, TokenKind::Eof);
    }

    #[test]
    fn test_keywords_and_identifiers() {
        assert_eq!(
            kinds("if elif else for break continue obj num str bool true false name _x1"),
            vec![
                TokenKind::If,
                TokenKind::Elif,
                TokenKind::Else,
                TokenKind::For,
                TokenKind::Break,
                TokenKind::Continue,
                TokenKind::Obj,
                TokenKind::Num,
                TokenKind::Str,
                TokenKind::Bool,
                TokenKind::True,
                TokenKind::False,
                TokenKind::Ident,
                TokenKind::Ident,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_numbers() {
        assert_eq!(texts("42 2.5 0.125"), vec!["42", "2.5", "0.125", ""]);
        // A dot not followed by a digit is left for the next token.
        assert_eq!(
            kinds("3.x"),
            vec![TokenKind::Number, TokenKind::Dot, TokenKind::Ident, TokenKind::Eof]
        );
        assert_eq!(texts("3.x")[0], "3");
        assert_eq!(kinds("7."), vec![TokenKind::Number, TokenKind::Dot, TokenKind::Eof]);
    }

    #[test]
    fn test_strings_and_escapes() {
        let tokens = Lexer::new(r#""a\nb\t\"q\"\\ \z""#).tokenize();
        assert_eq!(tokens[0].kind, TokenKind::String);
        assert_eq!(tokens[0].text, "a\nb\t\"q\"\\ z");
    }

    #[test]
    fn test_unterminated_string_is_unknown() {
        let tokens = Lexer::new("\"never closed").tokenize();
        assert_eq!(tokens[0].kind, TokenKind::Unknown);
        assert_eq!(tokens[0].text, "never closed");
        assert_eq!(tokens[1].kind, TokenKind::Eof);
    }

    #[test]
    fn test_operators() {
        assert_eq!(
            kinds("== != <= >= && || = ! < > + - * / %"),
            vec![
                TokenKind::EqEq,
                TokenKind::NotEq,
                TokenKind::LessEq,
                TokenKind::GreaterEq,
                TokenKind::AndAnd,
                TokenKind::OrOr,
                TokenKind::Assign,
                TokenKind::Bang,
                TokenKind::Less,
                TokenKind::Greater,
                TokenKind::Plus,
                TokenKind::Minus,
                TokenKind::Star,
                TokenKind::Slash,
                TokenKind::Percent,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_unknown_characters() {
        let tokens = Lexer::new("& | @").tokenize();
        assert_eq!(tokens[0].kind, TokenKind::Unknown);
        assert_eq!(tokens[0].text, "&");
        assert_eq!(tokens[1].kind, TokenKind::Unknown);
        assert_eq!(tokens[1].text, "|");
        assert_eq!(tokens[2].kind, TokenKind::Unknown);
        assert_eq!(tokens[2].text, "@");
    }

    #[test]
    fn test_line_and_column_tracking() {
        let tokens = Lexer::new("num(x)\n  // note\n  x = 1").tokenize();
        assert_eq!((tokens[0].line, tokens[0].col), (1, 1));
        assert_eq!((tokens[2].line, tokens[2].col), (1, 5));
        let assign = tokens.iter().find(|t| t.kind == TokenKind::Assign).unwrap();
        assert_eq!((assign.line, assign.col), (3, 5));
    }

    #[test]
    fn test_comment_runs_to_end_of_line() {
        assert_eq!(
            kinds("a // b c d\nb"),
            vec![TokenKind::Ident, TokenKind::Ident, TokenKind::Eof]
        );
        // A single slash is still division.
        assert_eq!(
            kinds("a / b"),
            vec![TokenKind::Ident, TokenKind::Slash, TokenKind::Ident, TokenKind::Eof]
        );
    }
}
