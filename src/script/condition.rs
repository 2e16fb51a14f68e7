//! Conditions: one parsed script line
//!
//! A condition couples a flag, a left operand, an optional comparison or
//! modifier operation, a hit target, and the live hit counter that persists
//! across ticks. Combinator flags carry state to the syntactically next
//! condition instead of contributing a truth value of their own.

use serde::{Deserialize, Serialize};

use crate::error::{ParseError, ParseResult};
use crate::memory::{MemRefTable, MemoryPeek};

use super::operand::Operand;
use super::scanner::Scanner;
use super::value::Value;

/// Condition flag, selected by a letter prefix before `:`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConditionType {
    /// No prefix: an ordinary comparison
    Standard,
    /// `P:` pause the group while true
    PauseIf,
    /// `R:` zero every hit counter in the trigger while true
    ResetIf,
    /// `Z:` zero the next condition's hit counter while true
    ResetNextIf,
    /// `A:` add the left value into the accumulator for the next condition
    AddSource,
    /// `B:` subtract the left value from the accumulator
    SubSource,
    /// `C:` add this condition's hit count into the carried total
    AddHits,
    /// `D:` subtract this condition's hit count from the carried total
    SubHits,
    /// `N:` AND this condition's truth into the next condition
    AndNext,
    /// `O:` OR this condition's truth into the next condition
    OrNext,
    /// `I:` offset the next condition's addresses by the left value
    AddAddress,
    /// `M:` expose a progress value
    Measured,
    /// `G:` expose a progress value displayed as a percentage
    MeasuredPercent,
    /// `Q:` gate whether Measured conditions report this tick
    MeasuredIf,
    /// `T:` required for firing but excluded from primed detection
    Trigger,
}

impl ConditionType {
    /// Flags that carry state forward and yield no truth value of their own.
    pub fn is_combining(self) -> bool {
        matches!(
            self,
            ConditionType::AddSource
                | ConditionType::SubSource
                | ConditionType::AddHits
                | ConditionType::SubHits
                | ConditionType::AndNext
                | ConditionType::OrNext
                | ConditionType::AddAddress
                | ConditionType::ResetNextIf
        )
    }

    /// Flags whose operation is arithmetic rather than a comparison.
    pub fn is_modifier(self) -> bool {
        matches!(
            self,
            ConditionType::AddSource | ConditionType::SubSource | ConditionType::AddAddress
        )
    }

    pub fn is_measured(self) -> bool {
        matches!(self, ConditionType::Measured | ConditionType::MeasuredPercent)
    }

    fn from_prefix(letter: u8) -> Option<Self> {
        match letter.to_ascii_lowercase() {
            b'p' => Some(ConditionType::PauseIf),
            b'r' => Some(ConditionType::ResetIf),
            b'z' => Some(ConditionType::ResetNextIf),
            b'a' => Some(ConditionType::AddSource),
            b'b' => Some(ConditionType::SubSource),
            b'c' => Some(ConditionType::AddHits),
            b'd' => Some(ConditionType::SubHits),
            b'n' => Some(ConditionType::AndNext),
            b'o' => Some(ConditionType::OrNext),
            b'i' => Some(ConditionType::AddAddress),
            b'm' => Some(ConditionType::Measured),
            b'g' => Some(ConditionType::MeasuredPercent),
            b'q' => Some(ConditionType::MeasuredIf),
            b't' => Some(ConditionType::Trigger),
            _ => None,
        }
    }
}

/// Comparison and modifier operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    Mult,
    Div,
    BitAnd,
    BitXor,
    Mod,
}

impl Operator {
    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            Operator::Eq | Operator::Ne | Operator::Lt | Operator::Le | Operator::Gt | Operator::Ge
        )
    }

    /// Compare two values; floats win the type promotion.
    pub fn test(self, lhs: Value, rhs: Value) -> bool {
        if lhs.is_float() || rhs.is_float() {
            let (a, b) = (lhs.as_f64(), rhs.as_f64());
            match self {
                Operator::Eq => a == b,
                Operator::Ne => a != b,
                Operator::Lt => a < b,
                Operator::Le => a <= b,
                Operator::Gt => a > b,
                Operator::Ge => a >= b,
                _ => false,
            }
        } else {
            let (a, b) = (lhs.as_u32(), rhs.as_u32());
            match self {
                Operator::Eq => a == b,
                Operator::Ne => a != b,
                Operator::Lt => a < b,
                Operator::Le => a <= b,
                Operator::Gt => a > b,
                Operator::Ge => a >= b,
                _ => false,
            }
        }
    }

    /// Apply a modifier operation.
    pub fn apply(self, lhs: Value, rhs: Value) -> Value {
        match self {
            Operator::Mult => lhs.mul(rhs),
            Operator::Div => lhs.div(rhs),
            Operator::BitAnd => lhs.bit_and(rhs),
            Operator::BitXor => lhs.bit_xor(rhs),
            Operator::Mod => lhs.rem(rhs),
            _ => lhs,
        }
    }

    fn parse(sc: &mut Scanner<'_>) -> ParseResult<Option<Self>> {
        let op = match sc.peek() {
            Some(b'=') => {
                sc.bump();
                sc.eat(b'=');
                Operator::Eq
            }
            Some(b'!') => {
                sc.bump();
                if !sc.eat(b'=') {
                    return Err(ParseError::InvalidOperator);
                }
                Operator::Ne
            }
            Some(b'<') => {
                sc.bump();
                if sc.eat(b'=') {
                    Operator::Le
                } else {
                    Operator::Lt
                }
            }
            Some(b'>') => {
                sc.bump();
                if sc.eat(b'=') {
                    Operator::Ge
                } else {
                    Operator::Gt
                }
            }
            Some(b'*') => {
                sc.bump();
                Operator::Mult
            }
            Some(b'/') => {
                sc.bump();
                Operator::Div
            }
            Some(b'&') => {
                sc.bump();
                Operator::BitAnd
            }
            Some(b'^') => {
                sc.bump();
                Operator::BitXor
            }
            Some(b'%') => {
                sc.bump();
                Operator::Mod
            }
            _ => return Ok(None),
        };
        Ok(Some(op))
    }
}

/// One parsed script line with its live hit counter.
#[derive(Debug, Clone)]
pub struct Condition {
    pub(crate) flag: ConditionType,
    pub(crate) lhs: Operand,
    pub(crate) oper: Option<Operator>,
    pub(crate) rhs: Option<Operand>,
    pub(crate) hit_target: u32,
    pub(crate) current_hits: u32,
    /// Set when this condition feeds a PauseIf and evaluates in the pause pass
    pub(crate) pause_chain: bool,
}

impl Condition {
    pub fn flag(&self) -> ConditionType {
        self.flag
    }

    pub fn hit_target(&self) -> u32 {
        self.hit_target
    }

    /// Accumulated count of ticks this condition was effectively true.
    ///
    /// Monotone non-decreasing except on an explicit reset; stops
    /// incrementing once the hit target is reached.
    pub fn current_hits(&self) -> u32 {
        self.current_hits
    }

    pub fn lhs(&self) -> &Operand {
        &self.lhs
    }

    pub fn rhs(&self) -> Option<&Operand> {
        self.rhs.as_ref()
    }

    /// Re-read any pointer-chased cells at this tick's effective address.
    pub(crate) fn refresh_indirect<P: MemoryPeek + ?Sized>(&self, peek: &P, offset: u32) {
        for operand in std::iter::once(&self.lhs).chain(self.rhs.iter()) {
            if let Some(cell) = operand.memref() {
                if cell.is_indirect() {
                    cell.refresh_indirect(peek, offset);
                }
            }
        }
    }

    /// Value contributed by an AddSource/SubSource/AddAddress condition.
    pub(crate) fn modifier_value(&self) -> Value {
        let lhs = self.lhs.value();
        match (self.oper, &self.rhs) {
            (Some(op), Some(rhs)) => op.apply(lhs, rhs.value()),
            _ => lhs,
        }
    }

    /// Raw comparison result plus the resolved left-hand value.
    ///
    /// An inbound accumulator is added to the left side first; if that
    /// promotes an integer-typed operand to float, the sum is truncated back
    /// to u32 before comparing. That truncation is deliberate legacy behavior
    /// and must not be "fixed" into rounding.
    pub(crate) fn compare(&self, accumulator: Option<Value>) -> (bool, Value) {
        let mut lhs = self.lhs.value();
        if let Some(acc) = accumulator {
            lhs = acc.add(lhs);
            if lhs.is_float() && !self.lhs.is_float() {
                lhs = Value::Int(lhs.as_u32());
            }
        }
        let raw = match (self.oper, &self.rhs) {
            (Some(op), Some(rhs)) => op.test(lhs, rhs.value()),
            // value-only Measured has no comparison and is always true
            _ => true,
        };
        (raw, lhs)
    }

    /// Parse one condition. `indirect` marks operands as pointer-chased
    /// because the previous condition in the group was an AddAddress.
    pub(crate) fn parse(
        sc: &mut Scanner<'_>,
        table: &mut MemRefTable,
        indirect: bool,
    ) -> ParseResult<Condition> {
        let flag = if sc.peek_at(1) == Some(b':') {
            let letter = sc.peek().unwrap_or(0);
            let flag =
                ConditionType::from_prefix(letter).ok_or(ParseError::InvalidConditionType)?;
            sc.bump();
            sc.bump();
            flag
        } else {
            ConditionType::Standard
        };

        let lhs = Operand::parse(sc, table, indirect)?;

        let mut oper = Operator::parse(sc)?;
        let mut rhs = match oper {
            Some(_) => Some(Operand::parse(sc, table, indirect)?),
            None => None,
        };

        if flag.is_modifier() {
            // legacy serializers left comparisons on converted modifier
            // conditions; the operation is dropped, not rejected
            if oper.is_some_and(|op| op.is_comparison()) {
                oper = None;
                rhs = None;
            }
        } else {
            match oper {
                Some(op) if !op.is_comparison() => return Err(ParseError::InvalidOperator),
                None if !flag.is_measured() => return Err(ParseError::InvalidOperator),
                _ => {}
            }
        }

        let hit_target = parse_hit_target(sc)?;
        if hit_target != 0 && flag.is_modifier() {
            return Err(ParseError::InvalidRequiredHits);
        }

        Ok(Condition {
            flag,
            lhs,
            oper,
            rhs,
            hit_target,
            current_hits: 0,
            pause_chain: false,
        })
    }
}

/// Trailing `(N)` or `.N.` hit target; 0 (or absence) means unbounded.
fn parse_hit_target(sc: &mut Scanner<'_>) -> ParseResult<u32> {
    if sc.eat(b'(') {
        let count = sc.dec_u64().ok_or(ParseError::InvalidRequiredHits)?;
        if !sc.eat(b')') {
            return Err(ParseError::InvalidRequiredHits);
        }
        Ok(count.min(u64::from(u32::MAX)) as u32)
    } else if sc.eat(b'.') {
        let count = sc.dec_u64().ok_or(ParseError::InvalidRequiredHits)?;
        if !sc.eat(b'.') {
            return Err(ParseError::InvalidRequiredHits);
        }
        Ok(count.min(u64::from(u32::MAX)) as u32)
    } else {
        Ok(0)
    }
}
