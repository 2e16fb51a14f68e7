//! Serializable views of live engine state
//!
//! The orchestration layer that persists triggers lives outside this crate;
//! what it needs from the engine is a lossless, tick-free view of the mutable
//! state: lifecycle state, per-condition hit counters, and per-reference
//! value history. These types are that view.

use serde::{Deserialize, Serialize};

use crate::memory::MemSize;
use crate::script::{ConditionType, TriggerState};

/// Point-in-time view of a trigger's live state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerSnapshot {
    pub state: TriggerState,
    pub has_hits: bool,
    pub measured_value: u32,
    pub measured_target: u32,
    pub measured_as_percent: bool,
    /// Core group first, then alternates in declaration order
    pub groups: Vec<GroupSnapshot>,
    pub memrefs: Vec<MemRefSnapshot>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupSnapshot {
    pub conditions: Vec<ConditionSnapshot>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConditionSnapshot {
    pub flag: ConditionType,
    pub hit_target: u32,
    pub current_hits: u32,
}

/// One memory cell's observation history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemRefSnapshot {
    pub address: u32,
    pub size: MemSize,
    pub value: u32,
    pub delta: u32,
    pub prior: u32,
    pub changed: bool,
    pub indirect: bool,
}
