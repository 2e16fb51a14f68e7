//! Operand parsing and evaluation
//!
//! An operand is a typed value source: a view of a memory cell (current,
//! delta, prior, BCD-decoded, or bit-inverted), or an immediate constant.
//! Memory operands borrow a shared [`RefHandle`]; constants stand alone.

use crate::error::{ParseError, ParseResult};
use crate::memory::{MemRefTable, MemSize, RefHandle};

use super::scanner::Scanner;
use super::value::Value;

/// A typed value producer.
#[derive(Debug, Clone)]
pub enum Operand {
    /// Current value of a memory cell
    Address(RefHandle),
    /// Previous tick's value
    Delta(RefHandle),
    /// Value before the most recent change
    Prior(RefHandle),
    /// Nibbles reinterpreted as decimal digits
    Bcd(RefHandle),
    /// Bitwise inversion within the size's mask
    Inverted(RefHandle),
    /// Unsigned 32-bit constant (signed literals stored two's-complement)
    Const(u32),
    /// Floating-point constant
    Float(f64),
}

impl Operand {
    /// Resolve the operand against already-refreshed memory.
    pub fn value(&self) -> Value {
        match self {
            Operand::Address(r) => decode(r, r.value()),
            Operand::Delta(r) => decode(r, r.delta()),
            Operand::Prior(r) => decode(r, r.prior()),
            // BCD and inversion degrade to plain reads on float cells
            Operand::Bcd(r) => {
                if r.size().is_float() {
                    decode(r, r.value())
                } else {
                    Value::Int(r.size().bcd(r.value()))
                }
            }
            Operand::Inverted(r) => {
                if r.size().is_float() {
                    decode(r, r.value())
                } else {
                    Value::Int(r.value() ^ r.size().invert_mask())
                }
            }
            Operand::Const(v) => Value::Int(*v),
            Operand::Float(f) => Value::Float(*f),
        }
    }

    /// The memory cell this operand observes, if any.
    pub fn memref(&self) -> Option<&RefHandle> {
        match self {
            Operand::Address(r)
            | Operand::Delta(r)
            | Operand::Prior(r)
            | Operand::Bcd(r)
            | Operand::Inverted(r) => Some(r),
            _ => None,
        }
    }

    /// Whether this operand produces float-typed values.
    pub fn is_float(&self) -> bool {
        match self {
            Operand::Float(_) => true,
            Operand::Const(_) => false,
            _ => self.memref().map_or(false, |r| r.size().is_float()),
        }
    }

    /// Parse one operand, leaving the cursor at the first unconsumed
    /// character. On error the cursor does not advance.
    pub(crate) fn parse(
        sc: &mut Scanner<'_>,
        table: &mut MemRefTable,
        indirect: bool,
    ) -> ParseResult<Operand> {
        let start = sc.pos();
        let result = Self::parse_inner(sc, table, indirect);
        if result.is_err() {
            sc.rewind(start);
        }
        result
    }

    fn parse_inner(
        sc: &mut Scanner<'_>,
        table: &mut MemRefTable,
        indirect: bool,
    ) -> ParseResult<Operand> {
        let first = sc.peek().ok_or(ParseError::InvalidMemoryOperand)?;
        match first {
            b'd' | b'D' if memref_follows(sc, 1) => {
                sc.bump();
                Ok(Operand::Delta(parse_memref(sc, table, indirect)?))
            }
            b'p' | b'P' if memref_follows(sc, 1) => {
                sc.bump();
                Ok(Operand::Prior(parse_memref(sc, table, indirect)?))
            }
            b'b' | b'B' if memref_follows(sc, 1) => {
                sc.bump();
                Ok(Operand::Bcd(parse_memref(sc, table, indirect)?))
            }
            b'~' => {
                sc.bump();
                Ok(Operand::Inverted(parse_memref(sc, table, indirect)?))
            }
            b'h' | b'H' => {
                sc.bump();
                let value = sc.hex_u32().ok_or(ParseError::InvalidConstOperand)?;
                Ok(Operand::Const(value))
            }
            b'v' | b'V' => {
                sc.bump();
                parse_decimal_const(sc, true).ok_or(ParseError::InvalidConstOperand)
            }
            b'0' if matches!(sc.peek_at(1), Some(b'x') | Some(b'X')) => {
                Ok(Operand::Address(parse_memref(sc, table, indirect)?))
            }
            b'f' | b'F' if memref_follows(sc, 0) => {
                Ok(Operand::Address(parse_memref(sc, table, indirect)?))
            }
            b'f' | b'F' => {
                sc.bump();
                parse_float_const(sc)
            }
            b'0'..=b'9' | b'+' | b'-' => {
                parse_decimal_const(sc, false).ok_or(ParseError::InvalidConstOperand)
            }
            _ => Err(ParseError::InvalidMemoryOperand),
        }
    }
}

fn decode(handle: &RefHandle, stored: u32) -> Value {
    let size = handle.size();
    if size.is_float() {
        Value::Float(size.decode_float(stored))
    } else {
        Value::Int(stored)
    }
}

fn is_hex(b: u8) -> bool {
    b.is_ascii_hexdigit()
}

/// Lookahead: does a memory reference start at `offset`?
///
/// Accepts the `0x` integer forms and the `fF`/`fM` float forms. The float
/// forms require a hex address so that `f0.5` stays a constant.
fn memref_follows(sc: &Scanner<'_>, offset: usize) -> bool {
    match (sc.peek_at(offset), sc.peek_at(offset + 1)) {
        (Some(b'0'), Some(b'x') | Some(b'X')) => true,
        (Some(b'f') | Some(b'F'), Some(b'f') | Some(b'F') | Some(b'm') | Some(b'M')) => {
            sc.peek_at(offset + 2).is_some_and(is_hex)
        }
        _ => false,
    }
}

fn parse_memref(
    sc: &mut Scanner<'_>,
    table: &mut MemRefTable,
    indirect: bool,
) -> ParseResult<RefHandle> {
    let size = if sc.eat_ci(b'f') {
        if sc.eat_ci(b'f') {
            MemSize::Float
        } else if sc.eat_ci(b'm') {
            MemSize::Mbf32
        } else {
            return Err(ParseError::InvalidMemoryOperand);
        }
    } else if sc.eat(b'0') && sc.eat_ci(b'x') {
        parse_size_letter(sc)
    } else {
        return Err(ParseError::InvalidMemoryOperand);
    };

    // the historical parser read addresses with strtoul, which tolerates a
    // redundant "0x" prefix ("0xL0x0004")
    if sc.peek() == Some(b'0')
        && matches!(sc.peek_at(1), Some(b'x') | Some(b'X'))
        && sc.peek_at(2).is_some_and(is_hex)
    {
        sc.bump();
        sc.bump();
    }

    let address = sc.hex_u32().ok_or(ParseError::InvalidMemoryOperand)?;
    if indirect {
        Ok(table.intern_indirect(address, size))
    } else {
        Ok(table.intern(address, size))
    }
}

/// The letter between `0x` and the address. Absent (a hex digit follows
/// directly) or a space selects the legacy 16-bit default.
fn parse_size_letter(sc: &mut Scanner<'_>) -> MemSize {
    let size = match sc.peek().map(|b| b.to_ascii_lowercase()) {
        Some(b'h') => MemSize::U8,
        Some(b' ') => MemSize::U16,
        Some(b'w') => MemSize::U24,
        Some(b'x') => MemSize::U32,
        Some(b'i') => MemSize::U16Be,
        Some(b'j') => MemSize::U24Be,
        Some(b'g') => MemSize::U32Be,
        Some(b'l') => MemSize::NibbleLow,
        Some(b'u') => MemSize::NibbleHigh,
        Some(b'm') => MemSize::Bit0,
        Some(b'n') => MemSize::Bit1,
        Some(b'o') => MemSize::Bit2,
        Some(b'p') => MemSize::Bit3,
        Some(b'q') => MemSize::Bit4,
        Some(b'r') => MemSize::Bit5,
        Some(b's') => MemSize::Bit6,
        Some(b't') => MemSize::Bit7,
        Some(b'k') => MemSize::BitCount,
        _ => return MemSize::U16,
    };
    sc.bump();
    size
}

/// Decimal constant with optional sign, stored as two's-complement `u32`.
///
/// Unsigned literals clamp to `u32::MAX`; signed ones (an explicit sign, or
/// any `v`-prefixed literal) clamp to the `i32` magnitude range.
fn parse_decimal_const(sc: &mut Scanner<'_>, force_signed: bool) -> Option<Operand> {
    let (explicit_sign, negative) = match sc.peek() {
        Some(b'-') => {
            sc.bump();
            (true, true)
        }
        Some(b'+') => {
            sc.bump();
            (true, false)
        }
        _ => (false, false),
    };
    let magnitude = sc.dec_u64()?;
    let value = if negative {
        (-(magnitude.min(i32::MAX as u64) as i64)) as i32 as u32
    } else if force_signed || explicit_sign {
        magnitude.min(i32::MAX as u64) as u32
    } else {
        magnitude.min(u64::from(u32::MAX)) as u32
    };
    Some(Operand::Const(value))
}

/// Float literal after the `f` prefix: optional sign, optional integer
/// digits, and at most one decimal point. Without a point the literal is an
/// integer constant.
fn parse_float_const(sc: &mut Scanner<'_>) -> ParseResult<Operand> {
    let negative = if sc.eat(b'-') {
        true
    } else {
        sc.eat(b'+');
        false
    };
    let int_digits = sc.digits();

    if sc.peek() == Some(b'.') {
        sc.bump();
        let frac_digits = sc.digits().ok_or(ParseError::InvalidFpOperand)?;
        if sc.peek() == Some(b'.') {
            return Err(ParseError::InvalidFpOperand);
        }
        let text = format!("{}.{}", int_digits.unwrap_or("0"), frac_digits);
        let value: f64 = text.parse().map_err(|_| ParseError::InvalidFpOperand)?;
        Ok(Operand::Float(if negative { -value } else { value }))
    } else {
        let digits = int_digits.ok_or(ParseError::InvalidFpOperand)?;
        let magnitude: u64 = digits.parse().unwrap_or(u64::MAX);
        if negative {
            Ok(Operand::Const(
                (-(magnitude.min(i32::MAX as u64) as i64)) as i32 as u32,
            ))
        } else {
            Ok(Operand::Const(magnitude.min(u64::from(u32::MAX)) as u32))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryPeek;

    fn parse(text: &str) -> ParseResult<(Operand, usize, MemRefTable)> {
        let mut table = MemRefTable::new();
        let mut sc = Scanner::new(text);
        let op = Operand::parse(&mut sc, &mut table, false)?;
        Ok((op, sc.pos(), table))
    }

    fn assert_memref(text: &str, size: MemSize, address: u32) {
        let (op, consumed, _) = parse(text).unwrap();
        assert_eq!(consumed, text.len(), "whole input consumed for {text}");
        let r = op.memref().expect("memory operand");
        assert_eq!(r.size(), size);
        assert_eq!(r.address(), address);
    }

    fn assert_const(text: &str, value: u32) {
        let (op, _, _) = parse(text).unwrap();
        match op {
            Operand::Const(v) => assert_eq!(v, value),
            other => panic!("expected const for {text}, got {other:?}"),
        }
    }

    fn assert_float(text: &str, value: f64) {
        let (op, _, _) = parse(text).unwrap();
        match op {
            Operand::Float(f) => assert!((f - value).abs() < 1e-9),
            other => panic!("expected float for {text}, got {other:?}"),
        }
    }

    fn assert_error(text: &str, expected: ParseError) {
        let mut table = MemRefTable::new();
        let mut sc = Scanner::new(text);
        let err = Operand::parse(&mut sc, &mut table, false).unwrap_err();
        assert_eq!(err, expected);
        assert_eq!(sc.pos(), 0, "cursor must not advance on error");
    }

    fn evaluate(text: &str, ram: &[u8]) -> Value {
        let (op, _, mut table) = parse(text).unwrap();
        table.refresh_all(&ram[..]);
        if let Some(r) = op.memref() {
            if r.is_indirect() {
                r.refresh_indirect(&ram[..], 0);
            }
        }
        op.value()
    }

    #[test]
    fn test_parse_sizes() {
        assert_memref("0xH1234", MemSize::U8, 0x1234);
        assert_memref("0x 1234", MemSize::U16, 0x1234);
        assert_memref("0x1234", MemSize::U16, 0x1234);
        assert_memref("0xW1234", MemSize::U24, 0x1234);
        assert_memref("0xX1234", MemSize::U32, 0x1234);
        assert_memref("0xI1234", MemSize::U16Be, 0x1234);
        assert_memref("0xJ1234", MemSize::U24Be, 0x1234);
        assert_memref("0xG1234", MemSize::U32Be, 0x1234);
        assert_memref("0xL1234", MemSize::NibbleLow, 0x1234);
        assert_memref("0xU1234", MemSize::NibbleHigh, 0x1234);
        assert_memref("0xM1234", MemSize::Bit0, 0x1234);
        assert_memref("0xN1234", MemSize::Bit1, 0x1234);
        assert_memref("0xO1234", MemSize::Bit2, 0x1234);
        assert_memref("0xP1234", MemSize::Bit3, 0x1234);
        assert_memref("0xQ1234", MemSize::Bit4, 0x1234);
        assert_memref("0xR1234", MemSize::Bit5, 0x1234);
        assert_memref("0xS1234", MemSize::Bit6, 0x1234);
        assert_memref("0xT1234", MemSize::Bit7, 0x1234);
        assert_memref("0xK1234", MemSize::BitCount, 0x1234);
        assert_memref("fF1234", MemSize::Float, 0x1234);
        assert_memref("fM1234", MemSize::Mbf32, 0x1234);
    }

    #[test]
    fn test_parse_sizes_ignore_case() {
        assert_memref("0Xh1234", MemSize::U8, 0x1234);
        assert_memref("0xx1234", MemSize::U32, 0x1234);
        assert_memref("0xt1234", MemSize::Bit7, 0x1234);
        assert_memref("ff1234", MemSize::Float, 0x1234);
        assert_memref("fm1234", MemSize::Mbf32, 0x1234);
        assert_memref("0xhabcd", MemSize::U8, 0xABCD);
    }

    #[test]
    fn test_parse_redundant_address_prefix() {
        assert_memref("0xL0x0004", MemSize::NibbleLow, 0x0004);
        assert_memref("0xN0x0001", MemSize::Bit1, 0x0001);
        assert_memref("0xH0012", MemSize::U8, 0x0012);
    }

    #[test]
    fn test_parse_accessors() {
        for (text, want_delta, want_prior) in [
            ("d0xH1234", true, false),
            ("p0xH1234", false, true),
            ("D0Xh1234", true, false),
            ("pfM1234", false, true),
        ] {
            let (op, _, _) = parse(text).unwrap();
            assert_eq!(matches!(op, Operand::Delta(_)), want_delta, "{text}");
            assert_eq!(matches!(op, Operand::Prior(_)), want_prior, "{text}");
        }
        let (op, _, _) = parse("b0xX1234").unwrap();
        assert!(matches!(op, Operand::Bcd(_)));
        let (op, _, _) = parse("~0x 1234").unwrap();
        assert!(matches!(op, Operand::Inverted(_)));
    }

    #[test]
    fn test_parse_unsigned_constants() {
        assert_const("123", 123);
        assert_const("0000000000", 0);
        assert_const("4294967295", 4294967295);
        // wider than 32 bits clamps
        assert_const("4294967296", 4294967295);
    }

    #[test]
    fn test_parse_signed_constants() {
        assert_const("v100", 100);
        assert_const("V+1", 1);
        assert_const("V-1", 0xFFFFFFFF);
        assert_const("V-2", 0xFFFFFFFE);
        assert_const("V9876543210", 0x7FFFFFFF);
        assert_const("V-9876543210", 0x80000001);
        assert_const("-1", 0xFFFFFFFF);
        assert_const("+1", 1);
        assert_const("+9876543210", 0x7FFFFFFF);
        assert_const("-9876543210", 0x80000001);
    }

    #[test]
    fn test_parse_hex_constants() {
        assert_const("H123", 0x123);
        assert_const("habcd", 0xABCD);
        assert_const("HFFFFFFFF", 0xFFFFFFFF);
    }

    #[test]
    fn test_parse_float_constants() {
        assert_float("f0.5", 0.5);
        assert_float("F0.5", 0.5);
        assert_float("f+0.5", 0.5);
        assert_float("f-0.5", -0.5);
        assert_float("f1.0", 1.0);
        assert_float("f1.000001", 1.000001);
        assert_float("f.12345", 0.12345);
        // no decimal point degrades to an integer constant
        assert_const("f1", 1);
    }

    #[test]
    fn test_parse_float_stops_at_unconsumed() {
        let (op, consumed, _) = parse("f1,23").unwrap();
        assert!(matches!(op, Operand::Const(1)));
        assert_eq!(consumed, 2);

        let (op, consumed, _) = parse("0.5").unwrap();
        assert!(matches!(op, Operand::Const(0)));
        assert_eq!(consumed, 1);
    }

    #[test]
    fn test_parse_errors() {
        assert_error("v", ParseError::InvalidConstOperand);
        assert_error("vabcd", ParseError::InvalidConstOperand);
        assert_error("f", ParseError::InvalidFpOperand);
        assert_error("fabcd", ParseError::InvalidFpOperand);
        assert_error("f1.d", ParseError::InvalidFpOperand);
        assert_error("f1..0", ParseError::InvalidFpOperand);
        assert_error("ABCD", ParseError::InvalidMemoryOperand);
        assert_error("", ParseError::InvalidMemoryOperand);
        assert_error("0xZ123", ParseError::InvalidMemoryOperand);
    }

    #[test]
    fn test_memrefs_shared_across_accessors() {
        let mut table = MemRefTable::new();
        let mut sc = Scanner::new("0xH0001");
        Operand::parse(&mut sc, &mut table, false).unwrap();
        let mut sc = Scanner::new("d0xH0001");
        Operand::parse(&mut sc, &mut table, false).unwrap();
        let mut sc = Scanner::new("p0xH0001");
        Operand::parse(&mut sc, &mut table, false).unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_evaluate_integer_sizes() {
        let ram = [0x00u8, 0x12, 0x34, 0xAB, 0x56];
        assert_eq!(evaluate("0xh1", &ram), Value::Int(0x12));
        assert_eq!(evaluate("0xh5", &ram), Value::Int(0)); // out of range
        assert_eq!(evaluate("0x 0", &ram), Value::Int(0x1200));
        assert_eq!(evaluate("0x 3", &ram), Value::Int(0x56AB));
        assert_eq!(evaluate("0xw0", &ram), Value::Int(0x341200));
        assert_eq!(evaluate("0xw3", &ram), Value::Int(0x0056AB));
        assert_eq!(evaluate("0xx0", &ram), Value::Int(0xAB341200));
        assert_eq!(evaluate("0xx3", &ram), Value::Int(0x000056AB));
        assert_eq!(evaluate("0xi0", &ram), Value::Int(0x0012));
        assert_eq!(evaluate("0xi3", &ram), Value::Int(0xAB56));
        assert_eq!(evaluate("0xj0", &ram), Value::Int(0x001234));
        assert_eq!(evaluate("0xj1", &ram), Value::Int(0x1234AB));
        assert_eq!(evaluate("0xj3", &ram), Value::Int(0xAB5600));
        assert_eq!(evaluate("0xg0", &ram), Value::Int(0x001234AB));
        assert_eq!(evaluate("0xg3", &ram), Value::Int(0xAB560000));
        assert_eq!(evaluate("0xu4", &ram), Value::Int(0x5));
        assert_eq!(evaluate("0xl4", &ram), Value::Int(0x6));
        assert_eq!(evaluate("0xm3", &ram), Value::Int(1));
        assert_eq!(evaluate("0xo3", &ram), Value::Int(0));
        assert_eq!(evaluate("0xk3", &ram), Value::Int(5));
    }

    #[test]
    fn test_evaluate_inverted() {
        let ram = [0x00u8, 0x12, 0x34, 0xAB, 0x56];
        assert_eq!(evaluate("~0xh4", &ram), Value::Int(0xA9));
        assert_eq!(evaluate("~0x 3", &ram), Value::Int(0xA954));
        assert_eq!(evaluate("~0xw2", &ram), Value::Int(0xA954CB));
        assert_eq!(evaluate("~0xx1", &ram), Value::Int(0xA954CBED));
        assert_eq!(evaluate("~0xx3", &ram), Value::Int(0xFFFFA954));
        assert_eq!(evaluate("~0xi3", &ram), Value::Int(0x54A9));
        assert_eq!(evaluate("~0xg1", &ram), Value::Int(0xEDCB54A9));
        assert_eq!(evaluate("~0xu4", &ram), Value::Int(0xA));
        assert_eq!(evaluate("~0xm0", &ram), Value::Int(1));
        assert_eq!(evaluate("~0xm3", &ram), Value::Int(0));
    }

    #[test]
    fn test_evaluate_bcd() {
        let ram = [0x00u8, 0x12, 0x34, 0x56, 0x78];
        assert_eq!(evaluate("b0xh1", &ram), Value::Int(12));
        assert_eq!(evaluate("b0x 1", &ram), Value::Int(3412));
        assert_eq!(evaluate("b0xw1", &ram), Value::Int(563412));
        assert_eq!(evaluate("b0xx1", &ram), Value::Int(78563412));
        assert_eq!(evaluate("b0xi1", &ram), Value::Int(1234));
        assert_eq!(evaluate("b0xj1", &ram), Value::Int(123456));
        assert_eq!(evaluate("b0xg1", &ram), Value::Int(12345678));
        // 0xAB is not valid BCD, digits are still summed
        let ram = [0x00u8, 0x12, 0x34, 0xAB, 0x56];
        assert_eq!(evaluate("b0xh3", &ram), Value::Int(111));
    }

    #[test]
    fn test_evaluate_floats() {
        let ram = [0x00u8, 0x00, 0x80, 0x3F, 0x81, 0x00, 0x00, 0x00];
        assert_eq!(evaluate("fF0", &ram), Value::Float(1.0));
        assert_eq!(evaluate("fM4", &ram), Value::Float(1.0));
        // BCD and inversion are not defined for floats, they read through
        assert_eq!(evaluate("bfF0", &ram), Value::Float(1.0));
        assert_eq!(evaluate("~fM4", &ram), Value::Float(1.0));

        let ram = [0x00u8, 0x00, 0x00, 0x40, 0x83, 0x40, 0x00, 0x00];
        assert_eq!(evaluate("fF0", &ram), Value::Float(2.0));
        assert_eq!(evaluate("fM4", &ram), Value::Float(6.0));
    }

    #[test]
    fn test_evaluate_delta_and_prior() {
        let mut table = MemRefTable::new();
        let mut sc = Scanner::new("d0xh1");
        let delta = Operand::parse(&mut sc, &mut table, false).unwrap();
        let mut sc = Scanner::new("p0xh1");
        let prior = Operand::parse(&mut sc, &mut table, false).unwrap();
        let mut ram = [0x00u8, 0x12];

        table.refresh_all(&ram[..]);
        assert_eq!(delta.value(), Value::Int(0));
        assert_eq!(prior.value(), Value::Int(0));

        table.refresh_all(&ram[..]);
        assert_eq!(delta.value(), Value::Int(0x12));
        assert_eq!(prior.value(), Value::Int(0));

        ram[1] = 0x13;
        table.refresh_all(&ram[..]);
        assert_eq!(delta.value(), Value::Int(0x12));
        assert_eq!(prior.value(), Value::Int(0x12));

        table.refresh_all(&ram[..]);
        assert_eq!(delta.value(), Value::Int(0x13));
        assert_eq!(prior.value(), Value::Int(0x12));
    }

    #[test]
    fn test_evaluate_delta_float() {
        let mut table = MemRefTable::new();
        let mut sc = Scanner::new("dff0");
        let delta = Operand::parse(&mut sc, &mut table, false).unwrap();
        let mut ram = [0x00u8, 0x00, 0x80, 0x3F];

        table.refresh_all(&ram[..]);
        assert_eq!(delta.value(), Value::Float(0.0));

        table.refresh_all(&ram[..]);
        assert_eq!(delta.value(), Value::Float(1.0));

        ram[3] = 0x40;
        table.refresh_all(&ram[..]);
        assert_eq!(delta.value(), Value::Float(1.0));

        table.refresh_all(&ram[..]);
        assert_eq!(delta.value(), Value::Float(2.0));
    }

    #[test]
    fn test_peek_width_matches_size() {
        // the peek callback sees the documented widths
        let ram = [0u8; 8];
        let _ = MemoryPeek::peek(&ram[..], 0, 1);
        assert_eq!(MemSize::U8.peek_bytes(), 1);
        assert_eq!(MemSize::U16Be.peek_bytes(), 2);
        assert_eq!(MemSize::U24.peek_bytes(), 4);
        assert_eq!(MemSize::Float.peek_bytes(), 4);
    }
}
