//! Typed operand values
//!
//! Operands produce either a 32-bit unsigned integer or a float. Arithmetic
//! promotes to float as soon as either side is float; integer arithmetic
//! wraps modulo 2^32 by design, which is how "greater-than via wraparound"
//! comparison idioms are expressed.

/// A value flowing through comparisons and accumulator chains.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Int(u32),
    Float(f64),
}

impl Value {
    pub fn is_float(self) -> bool {
        matches!(self, Value::Float(_))
    }

    /// Truncate (never round) to an unsigned 32-bit value.
    pub fn as_u32(self) -> u32 {
        match self {
            Value::Int(v) => v,
            Value::Float(f) => f as i64 as u32,
        }
    }

    pub fn as_f64(self) -> f64 {
        match self {
            Value::Int(v) => f64::from(v),
            Value::Float(f) => f,
        }
    }

    pub fn add(self, other: Value) -> Value {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => Value::Int(a.wrapping_add(b)),
            _ => Value::Float(self.as_f64() + other.as_f64()),
        }
    }

    pub fn sub(self, other: Value) -> Value {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => Value::Int(a.wrapping_sub(b)),
            _ => Value::Float(self.as_f64() - other.as_f64()),
        }
    }

    pub fn mul(self, other: Value) -> Value {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => Value::Int(a.wrapping_mul(b)),
            _ => Value::Float(self.as_f64() * other.as_f64()),
        }
    }

    /// Division by zero yields 0 instead of failing.
    pub fn div(self, other: Value) -> Value {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => Value::Int(a.checked_div(b).unwrap_or(0)),
            _ => {
                let divisor = other.as_f64();
                if divisor == 0.0 {
                    Value::Float(0.0)
                } else {
                    Value::Float(self.as_f64() / divisor)
                }
            }
        }
    }

    /// Bitwise operations work in the integer domain; floats truncate first.
    pub fn bit_and(self, other: Value) -> Value {
        Value::Int(self.as_u32() & other.as_u32())
    }

    pub fn bit_xor(self, other: Value) -> Value {
        Value::Int(self.as_u32() ^ other.as_u32())
    }

    /// Modulus by zero yields 0.
    pub fn rem(self, other: Value) -> Value {
        Value::Int(self.as_u32().checked_rem(other.as_u32()).unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrapping_arithmetic() {
        assert_eq!(Value::Int(5).add(Value::Int(0xFFFF_FFFF)), Value::Int(4));
        assert_eq!(Value::Int(8).sub(Value::Int(18)), Value::Int(0xFFFF_FFF6));
        assert_eq!(
            Value::Int(2).mul(Value::Int(0xFFFF_FFFF)),
            Value::Int(0xFFFF_FFFE)
        );
    }

    #[test]
    fn test_float_promotion() {
        assert_eq!(Value::Int(8).mul(Value::Float(0.75)), Value::Float(6.0));
        assert_eq!(Value::Float(0.5).add(Value::Int(2)), Value::Float(2.5));
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(Value::Int(7).div(Value::Int(0)), Value::Int(0));
        assert_eq!(Value::Float(7.0).div(Value::Int(0)), Value::Float(0.0));
        assert_eq!(Value::Int(7).rem(Value::Int(0)), Value::Int(0));
    }

    #[test]
    fn test_truncation() {
        assert_eq!(Value::Float(22.25).as_u32(), 22);
        assert_eq!(Value::Float(22.99).as_u32(), 22);
        assert_eq!(Value::Float(-1.5).as_u32(), 0xFFFF_FFFF);
    }
}
