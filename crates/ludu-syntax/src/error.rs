//! Error handling types and utilities for the LuduScript toolchain.
//!
//! Every stage of the pipeline reports failures through the same [`Error`]
//! type. The lexer never fails; the parser reports the first mismatched token
//! with its line and column; the interpreter reports runtime failures stamped
//! with the line of the statement that was executing.
//!
//! # Examples
//!
//! ## Basic error creation
//!
//! ```rust
//! use ludu_syntax::error::{Error, Result, error};
//!
//! let simple_error = Error::new("Something went wrong");
//! let located_error = Error::with_span("Expected '{'", 10, 5);
//! assert_eq!(located_error.to_string(), "Expected '{' at 10:5");
//!
//! fn might_fail() -> Result<i32> {
//!     error("Operation failed")
//! }
//! assert!(might_fail().is_err());
//! # let _ = simple_error;
//! ```
//!
//! ## Attaching a statement line
//!
//! ```rust
//! use ludu_syntax::error::Error;
//!
//! let err = Error::new("Division by zero").or_line(7);
//! assert_eq!(err.to_string(), "Division by zero at line 7");
//!
//! // The first line attached wins.
//! let err = err.or_line(3);
//! assert_eq!(err.line, Some(7));
//! ```

use std::fmt;

/// An error that occurred while processing a LuduScript program.
///
/// Carries a human-readable message and, when known, the 1-based source
/// position it refers to. Runtime errors usually only know the line of the
/// statement that failed, so `col` stays `None` for them.
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    /// Human-readable error message
    pub msg: String,

    /// Optional line number in source file (1-based)
    pub line: Option<usize>,

    /// Optional column number in source file (1-based)
    pub col: Option<usize>,
}

impl Error {
    /// Creates a new error with the given message and no location.
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            line: None,
            col: None,
        }
    }

    /// Creates a new error with the given message and source location.
    ///
    /// Used by the parser, which always knows where the offending token is.
    ///
    /// ```rust
    /// use ludu_syntax::Error;
    ///
    /// let error = Error::with_span("Expected expression, found '}'", 5, 12);
    /// assert_eq!(error.to_string(), "Expected expression, found '}' at 5:12");
    /// ```
    pub fn with_span(msg: impl Into<String>, line: usize, col: usize) -> Self {
        Self {
            msg: msg.into(),
            line: Some(line),
            col: Some(col),
        }
    }

    /// Stamps `line` onto the error unless it already carries one.
    ///
    /// Statement execution calls this on the way out, so the innermost
    /// statement that failed is the one reported.
    pub fn or_line(mut self, line: usize) -> Self {
        if self.line.is_none() {
            self.line = Some(line);
        }
        self
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.line, self.col) {
            (Some(l), Some(c)) => write!(f, "{} at {}:{}", self.msg, l, c),
            (Some(l), None) => write!(f, "{} at line {}", self.msg, l),
            _ => write!(f, "{}", self.msg),
        }
    }
}

impl std::error::Error for Error {}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::new(s)
    }
}
impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::new(s)
    }
}

/// A specialized `Result` type for LuduScript operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Convenience function to create an error result.
///
/// ```rust
/// use ludu_syntax::error::{Result, error};
///
/// fn validate_input(s: &str) -> Result<()> {
///     if s.is_empty() {
///         error("Input cannot be empty")
///     } else {
///         Ok(())
///     }
/// }
/// assert!(validate_input("").is_err());
/// ```
pub fn error<T>(msg: impl Into<String>) -> Result<T> {
    Err(Error::new(msg))
}

/// Convenience function to create an error result with source location.
pub fn error_at<T>(line: usize, col: usize, msg: impl Into<String>) -> Result<T> {
    Err(Error::with_span(msg, line, col))
}
