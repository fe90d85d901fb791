//! Value types for the LuduScript interpreter.

use std::fmt;

/// A runtime value.
///
/// Numbers keep a single `f64` payload plus a flag recording whether the
/// number is integer-typed, so `3` and `3.0` behave the same in arithmetic
/// yet stay distinguishable in the output.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Num { value: f64, integer: bool },
    Str(String),
    Bool(bool),
}

impl Value {
    pub fn int(n: i64) -> Self {
        Value::Num {
            value: n as f64,
            integer: true,
        }
    }

    pub fn float(f: f64) -> Self {
        Value::Num {
            value: f,
            integer: false,
        }
    }

    pub fn str(s: impl Into<String>) -> Self {
        Value::Str(s.into())
    }

    pub fn is_int(&self) -> bool {
        matches!(self, Value::Num { integer: true, .. })
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Num { integer: true, .. } => "int",
            Value::Num { .. } => "float",
            Value::Str(_) => "str",
            Value::Bool(_) => "bool",
        }
    }

    /// Numeric form: numbers as-is, strings by their leading numeric prefix
    /// (0 when there is none), booleans as 1 or 0.
    pub fn to_num(&self) -> f64 {
        match self {
            Value::Num { value, .. } => *value,
            Value::Str(s) => parse_float_prefix(s),
            Value::Bool(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }

    /// Integer form: numbers truncated toward zero, strings by their leading
    /// integer prefix, booleans as 1 or 0.
    pub fn to_int(&self) -> i64 {
        match self {
            Value::Num { value, .. } => *value as i64,
            Value::Str(s) => parse_int_prefix(s),
            Value::Bool(b) => i64::from(*b),
        }
    }

    /// Truthiness: non-zero numbers, non-empty strings, booleans as-is.
    pub fn truthy(&self) -> bool {
        match self {
            Value::Num { value, .. } => *value != 0.0,
            Value::Str(s) => !s.is_empty(),
            Value::Bool(b) => *b,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Num {
                value,
                integer: true,
            } => write!(f, "{}", *value as i64),
            Value::Num { value, .. } => write!(f, "{:.6}", value),
            Value::Str(s) => write!(f, "{}", s),
            Value::Bool(b) => write!(f, "{}", if *b { "true" } else { "false" }),
        }
    }
}

/// Length of the optionally signed run of ASCII digits at the start of `s`.
fn signed_digits_len(s: &[u8]) -> usize {
    let sign = usize::from(matches!(s.first(), Some(b'+' | b'-')));
    let digits = s[sign..].iter().take_while(|b| b.is_ascii_digit()).count();
    if digits == 0 {
        0
    } else {
        sign + digits
    }
}

/// Parses the longest leading decimal number in `s`, ignoring leading
/// whitespace. Accepts a sign, a fraction and an exponent.
pub(crate) fn parse_float_prefix(s: &str) -> f64 {
    let t = s.trim_start();
    let b = t.as_bytes();
    let mut end = usize::from(matches!(b.first(), Some(b'+' | b'-')));
    let int_digits = b[end..].iter().take_while(|c| c.is_ascii_digit()).count();
    end += int_digits;
    let mut frac_digits = 0;
    if b.get(end) == Some(&b'.') {
        frac_digits = b[end + 1..].iter().take_while(|c| c.is_ascii_digit()).count();
        if int_digits + frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits + frac_digits == 0 {
        return 0.0;
    }
    if matches!(b.get(end), Some(b'e' | b'E')) {
        let exp = signed_digits_len(&b[end + 1..]);
        if exp > 0 {
            end += 1 + exp;
        }
    }
    t[..end].parse().unwrap_or(0.0)
}

/// Parses the leading optionally signed integer in `s`, ignoring leading
/// whitespace. Out-of-range values saturate.
pub(crate) fn parse_int_prefix(s: &str) -> i64 {
    let t = s.trim_start();
    let len = signed_digits_len(t.as_bytes());
    if len == 0 {
        return 0;
    }
    let digits = &t[..len];
    digits.parse().unwrap_or_else(|_| {
        if digits.starts_with('-') {
            i64::MIN
        } else {
            i64::MAX
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_textual_forms() {
        assert_eq!(Value::int(42).to_string(), "42");
        assert_eq!(Value::int(-7).to_string(), "-7");
        assert_eq!(Value::float(2.5).to_string(), "2.500000");
        assert_eq!(Value::float(3.0).to_string(), "3.000000");
        assert_eq!(Value::str("wolf").to_string(), "wolf");
        assert_eq!(Value::Bool(true).to_string(), "true");
    }

    #[test]
    fn test_numeric_coercions() {
        assert_eq!(Value::str("10").to_num(), 10.0);
        assert_eq!(Value::str("  -2.5e1xyz").to_num(), -25.0);
        assert_eq!(Value::str(".5").to_num(), 0.5);
        assert_eq!(Value::str("7.").to_num(), 7.0);
        assert_eq!(Value::str("1e").to_num(), 1.0);
        assert_eq!(Value::str("abc").to_num(), 0.0);
        assert_eq!(Value::str("").to_num(), 0.0);
        assert_eq!(Value::str("-").to_num(), 0.0);
        assert_eq!(Value::Bool(true).to_num(), 1.0);
    }

    #[test]
    fn test_integer_coercions() {
        assert_eq!(Value::float(3.9).to_int(), 3);
        assert_eq!(Value::float(-3.9).to_int(), -3);
        assert_eq!(Value::str("42abc").to_int(), 42);
        assert_eq!(Value::str(" -8").to_int(), -8);
        assert_eq!(Value::str("3.7").to_int(), 3);
        assert_eq!(Value::str("x1").to_int(), 0);
        assert_eq!(Value::str("99999999999999999999").to_int(), i64::MAX);
        assert_eq!(Value::Bool(false).to_int(), 0);
    }

    #[test]
    fn test_truthiness() {
        assert!(Value::int(1).truthy());
        assert!(!Value::float(0.0).truthy());
        assert!(Value::str("no").truthy());
        assert!(!Value::str("").truthy());
        assert!(!Value::Bool(false).truthy());
    }
}
