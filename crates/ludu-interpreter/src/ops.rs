//! Operator semantics.
//!
//! Operands are always fully evaluated before these run; `&&` and `||` do
//! not short-circuit.

use crate::value::Value;
use ludu_syntax::ast::{BinaryOp, UnaryOp};
use ludu_syntax::error::{error, Result};

/// Both operands are integer-typed numbers.
fn both_int(l: &Value, r: &Value) -> Option<(i64, i64)> {
    match (l, r) {
        (
            Value::Num {
                value: a,
                integer: true,
            },
            Value::Num {
                value: b,
                integer: true,
            },
        ) => Some((*a as i64, *b as i64)),
        _ => None,
    }
}

fn arith(
    l: &Value,
    r: &Value,
    int_op: fn(i64, i64) -> i64,
    float_op: fn(f64, f64) -> f64,
) -> Value {
    match both_int(l, r) {
        Some((a, b)) => Value::int(int_op(a, b)),
        None => Value::float(float_op(l.to_num(), r.to_num())),
    }
}

/// Equality within one value kind; different kinds never compare equal.
fn same_kind_eq(l: &Value, r: &Value) -> bool {
    match (l, r) {
        (Value::Num { value: a, .. }, Value::Num { value: b, .. }) => a == b,
        (Value::Str(a), Value::Str(b)) => a == b,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        _ => false,
    }
}

pub fn binary(op: BinaryOp, l: Value, r: Value) -> Result<Value> {
    let v = match op {
        BinaryOp::Add => {
            if matches!(l, Value::Str(_)) || matches!(r, Value::Str(_)) {
                Value::Str(format!("{}{}", l, r))
            } else {
                arith(&l, &r, i64::wrapping_add, |a, b| a + b)
            }
        }
        BinaryOp::Sub => arith(&l, &r, i64::wrapping_sub, |a, b| a - b),
        BinaryOp::Mul => arith(&l, &r, i64::wrapping_mul, |a, b| a * b),
        BinaryOp::Div => {
            let d = r.to_num();
            if d == 0.0 {
                return error("Division by zero");
            }
            Value::float(l.to_num() / d)
        }
        BinaryOp::Mod => {
            let d = r.to_int();
            if d == 0 {
                return error("Modulo by zero");
            }
            Value::float(l.to_int().wrapping_rem(d) as f64)
        }
        BinaryOp::Eq => Value::Bool(same_kind_eq(&l, &r)),
        BinaryOp::Ne => Value::Bool(!same_kind_eq(&l, &r)),
        BinaryOp::Lt => Value::Bool(l.to_num() < r.to_num()),
        BinaryOp::Le => Value::Bool(l.to_num() <= r.to_num()),
        BinaryOp::Gt => Value::Bool(l.to_num() > r.to_num()),
        BinaryOp::Ge => Value::Bool(l.to_num() >= r.to_num()),
        BinaryOp::And => Value::Bool(l.truthy() && r.truthy()),
        BinaryOp::Or => Value::Bool(l.truthy() || r.truthy()),
    };
    Ok(v)
}

pub fn unary(op: UnaryOp, v: Value) -> Value {
    match op {
        UnaryOp::Not => Value::Bool(!v.truthy()),
        UnaryOp::Neg => Value::float(-v.to_num()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bin(op: BinaryOp, l: Value, r: Value) -> Value {
        binary(op, l, r).expect("operation should succeed")
    }

    #[test]
    fn test_integer_arithmetic_stays_integer() {
        for (a, b) in [(7, 3), (-4, 9), (0, 0), (123456, -654321)] {
            assert_eq!(bin(BinaryOp::Add, Value::int(a), Value::int(b)), Value::int(a + b));
            assert_eq!(bin(BinaryOp::Sub, Value::int(a), Value::int(b)), Value::int(a - b));
            assert_eq!(bin(BinaryOp::Mul, Value::int(a), Value::int(b)), Value::int(a * b));
        }
    }

    #[test]
    fn test_division_is_always_float() {
        assert_eq!(bin(BinaryOp::Div, Value::int(6), Value::int(3)), Value::float(2.0));
        assert_eq!(bin(BinaryOp::Div, Value::int(7), Value::int(2)), Value::float(3.5));
        assert!(!bin(BinaryOp::Div, Value::int(1), Value::int(1)).is_int());
    }

    #[test]
    fn test_mixed_arithmetic_is_float() {
        assert_eq!(bin(BinaryOp::Add, Value::int(1), Value::float(0.5)), Value::float(1.5));
        assert_eq!(bin(BinaryOp::Mul, Value::float(2.0), Value::int(3)), Value::float(6.0));
        assert_eq!(bin(BinaryOp::Sub, Value::Bool(true), Value::int(1)), Value::float(0.0));
        assert_eq!(bin(BinaryOp::Sub, Value::str("5"), Value::int(2)), Value::float(3.0));
    }

    #[test]
    fn test_string_concatenation() {
        assert_eq!(bin(BinaryOp::Add, Value::str("score:"), Value::int(5)), Value::str("score:5"));
        assert_eq!(bin(BinaryOp::Add, Value::int(1), Value::str("st")), Value::str("1st"));
        assert_eq!(bin(BinaryOp::Add, Value::str("x="), Value::float(0.5)), Value::str("x=0.500000"));
        assert_eq!(bin(BinaryOp::Add, Value::str("alive:"), Value::Bool(false)), Value::str("alive:false"));
    }

    #[test]
    fn test_modulo() {
        assert_eq!(bin(BinaryOp::Mod, Value::int(7), Value::int(3)), Value::float(1.0));
        assert_eq!(bin(BinaryOp::Mod, Value::int(-7), Value::int(3)), Value::float(-1.0));
        assert_eq!(bin(BinaryOp::Mod, Value::float(7.9), Value::float(3.2)), Value::float(1.0));
        assert!(binary(BinaryOp::Mod, Value::int(5), Value::int(0)).is_err());
        assert!(binary(BinaryOp::Mod, Value::int(5), Value::float(0.5)).is_err());
    }

    #[test]
    fn test_division_by_zero() {
        let err = binary(BinaryOp::Div, Value::str("10"), Value::int(0)).unwrap_err();
        assert_eq!(err.msg, "Division by zero");
        assert!(binary(BinaryOp::Div, Value::int(1), Value::str("zero")).is_err());
    }

    #[test]
    fn test_equality_requires_same_kind() {
        assert_eq!(bin(BinaryOp::Eq, Value::int(3), Value::float(3.0)), Value::Bool(true));
        assert_eq!(bin(BinaryOp::Eq, Value::int(1), Value::str("1")), Value::Bool(false));
        assert_eq!(bin(BinaryOp::Ne, Value::int(1), Value::str("1")), Value::Bool(true));
        assert_eq!(bin(BinaryOp::Eq, Value::Bool(true), Value::int(1)), Value::Bool(false));
        assert_eq!(bin(BinaryOp::Eq, Value::str("a"), Value::str("a")), Value::Bool(true));
    }

    #[test]
    fn test_relational_coerces_to_numbers() {
        assert_eq!(bin(BinaryOp::Lt, Value::str("2"), Value::int(10)), Value::Bool(true));
        assert_eq!(bin(BinaryOp::Ge, Value::Bool(true), Value::int(1)), Value::Bool(true));
        assert_eq!(bin(BinaryOp::Gt, Value::str("abc"), Value::int(0)), Value::Bool(false));
    }

    #[test]
    fn test_logical_operators_coerce_to_bool() {
        assert_eq!(bin(BinaryOp::And, Value::int(1), Value::str("x")), Value::Bool(true));
        assert_eq!(bin(BinaryOp::And, Value::int(1), Value::str("")), Value::Bool(false));
        assert_eq!(bin(BinaryOp::Or, Value::int(0), Value::Bool(false)), Value::Bool(false));
        assert_eq!(bin(BinaryOp::Or, Value::int(0), Value::float(0.1)), Value::Bool(true));
    }

    #[test]
    fn test_unary() {
        assert_eq!(unary(UnaryOp::Neg, Value::int(5)), Value::float(-5.0));
        assert_eq!(unary(UnaryOp::Neg, Value::str("2.5")), Value::float(-2.5));
        assert_eq!(unary(UnaryOp::Not, Value::int(0)), Value::Bool(true));
        assert_eq!(unary(UnaryOp::Not, Value::str("x")), Value::Bool(false));
    }
}
