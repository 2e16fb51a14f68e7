//! The script engine: operands, conditions, groups, and triggers
//!
//! The grammar is fixed, flat, and line-oriented. A script is one core
//! AND-group plus optional `S`-separated alternates; each condition is a flag
//! prefix, a comparison, and an optional hit target. This module owns both
//! the parser and the per-tick interpreter.

mod condition;
mod condset;
mod operand;
mod scanner;
mod trigger;
mod value;

pub use condition::{Condition, ConditionType, Operator};
pub use condset::ConditionGroup;
pub use operand::Operand;
pub use trigger::{Trigger, TriggerState};
pub use value::Value;
