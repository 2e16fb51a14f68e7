//! Framewatch
//!
//! A frame-tick trigger engine: small text-encoded predicate scripts are
//! evaluated against a running process's memory image once per simulation
//! tick, to decide whether a user-defined in-game condition currently holds
//! and to track progress and hit counts across ticks.
//!
//! The caller supplies memory through a [`MemoryPeek`] callback; the engine
//! interns every observed `(address, size)` pair into a shared cell with
//! current/previous/prior history, refreshes all cells once per tick, then
//! walks each condition group in strict declaration order. Evaluation is
//! single-threaded, synchronous, and allocation-free per tick.
//!
//! ```
//! use framewatch::{Trigger, TriggerState};
//!
//! let ram = [0u8, 0x12, 0x34];
//! let mut trigger = Trigger::parse("0xH0001=18_0xH0002=52(2)").unwrap();
//! trigger.set_state(TriggerState::Active);
//!
//! assert_eq!(trigger.evaluate(&ram[..]), TriggerState::Active);
//! assert_eq!(trigger.evaluate(&ram[..]), TriggerState::Triggered);
//! ```

pub mod error;
pub mod memory;
pub mod script;
pub mod snapshot;

pub use error::{ParseError, ParseResult};
pub use memory::{MemRefTable, MemSize, MemoryPeek, RefHandle};
pub use script::{
    Condition, ConditionGroup, ConditionType, Operand, Operator, Trigger, TriggerState, Value,
};
pub use snapshot::TriggerSnapshot;
