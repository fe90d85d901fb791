pub mod ast;
pub mod error;
pub mod token;

pub use ast::*;
pub use error::*;
pub use token::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(Error::new("boom").to_string(), "boom");
        assert_eq!(Error::with_span("boom", 2, 4).to_string(), "boom at 2:4");
        assert_eq!(Error::new("boom").or_line(9).to_string(), "boom at line 9");
    }

    #[test]
    fn test_or_line_keeps_first_line() {
        let err = Error::new("Undefined variable 'x'").or_line(4).or_line(1);
        assert_eq!(err.line, Some(4));
        assert_eq!(err.col, None);
    }

    #[test]
    fn test_error_helpers() {
        let err = error::<()>("plain").unwrap_err();
        assert_eq!((err.line, err.col), (None, None));
        let err = error_at::<()>(3, 5, "Expected '}'").unwrap_err();
        assert_eq!(err.msg, "Expected '}'");
        assert_eq!((err.line, err.col), (Some(3), Some(5)));
    }

    #[test]
    fn test_keyword_lookup() {
        assert_eq!(TokenKind::keyword("elif"), Some(TokenKind::Elif));
        assert_eq!(TokenKind::keyword("obj"), Some(TokenKind::Obj));
        assert_eq!(TokenKind::keyword("object"), None);
        assert!(TokenKind::Num.is_keyword());
        assert!(!TokenKind::Ident.is_keyword());
    }

    #[test]
    fn test_operator_precedence_order() {
        assert!(BinaryOp::Or.precedence() < BinaryOp::And.precedence());
        assert!(BinaryOp::And.precedence() < BinaryOp::Eq.precedence());
        assert!(BinaryOp::Eq.precedence() < BinaryOp::Lt.precedence());
        assert!(BinaryOp::Lt.precedence() < BinaryOp::Add.precedence());
        assert!(BinaryOp::Add.precedence() < BinaryOp::Mod.precedence());
    }

    #[test]
    fn test_describe_eof() {
        let eof = Token::new(TokenKind::Eof, "", 3, 1);
        assert_eq!(eof.describe(), "end of input");
        let brace = Token::new(TokenKind::RBrace, "}", 3, 1);
        assert_eq!(brace.describe(), "}");
    }
}
