//! Triggers: one core group plus alternatives, exposed as a state machine

use serde::{Deserialize, Serialize};

use crate::error::{ParseError, ParseResult};
use crate::memory::{MemRefTable, MemoryPeek};
use crate::snapshot::{ConditionSnapshot, GroupSnapshot, MemRefSnapshot, TriggerSnapshot};

use super::condition::ConditionType;
use super::condset::{ConditionGroup, TickContext};
use super::operand::Operand;
use super::scanner::Scanner;

/// Lifecycle state of a trigger.
///
/// `Reset` and `Triggered` are one-shot notifications returned by
/// [`Trigger::evaluate`]; the persistent state never holds `Reset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TriggerState {
    /// Not being processed; memory still refreshes so deltas stay correct
    Inactive,
    /// Armed, but firing is suppressed until the trigger has been observed
    /// false once (guards against firing from stale or pre-set memory)
    Waiting,
    Active,
    /// This tick's core-or-alternate evaluation reported paused
    Paused,
    /// True except for its Trigger-flagged conditions
    Primed,
    /// Hit counters were cleared this tick (one-shot notification)
    Reset,
    /// Fired; further ticks report `Inactive` with no hit accumulation
    Triggered,
    /// Set externally, e.g. on address-space invalidation
    Disabled,
}

struct TickOutcome {
    truth: bool,
    paused: bool,
    primed: bool,
    was_reset: bool,
    was_cond_reset: bool,
}

/// A parsed script: core group, alternate groups, and the memory cells they
/// observe.
#[derive(Debug)]
pub struct Trigger {
    core: ConditionGroup,
    alts: Vec<ConditionGroup>,
    table: MemRefTable,
    state: TriggerState,
    has_hits: bool,
    measured_value: u32,
    measured_target: u32,
    measured_from_hits: bool,
    measured_as_percent: bool,
}

impl Trigger {
    /// Parse a script into a live trigger.
    ///
    /// `_` separates conditions, `S` starts an alternate group. Empty groups
    /// are legal and vacuously true. Parsing stops at the first character
    /// that cannot continue the grammar.
    pub fn parse(script: &str) -> ParseResult<Trigger> {
        let mut sc = Scanner::new(script);
        let mut table = MemRefTable::new();
        let core = ConditionGroup::parse(&mut sc, &mut table)?;
        let mut alts = Vec::new();
        while sc.eat_ci(b's') {
            alts.push(ConditionGroup::parse(&mut sc, &mut table)?);
        }

        let mut trigger = Trigger {
            core,
            alts,
            table,
            state: TriggerState::Waiting,
            has_hits: false,
            measured_value: 0,
            measured_target: 0,
            measured_from_hits: false,
            measured_as_percent: false,
        };
        trigger.resolve_measured()?;
        Ok(trigger)
    }

    /// Size in bytes of the materialized trigger tree for a script.
    ///
    /// The two-phase entry point for callers that budget storage before
    /// realizing the trigger.
    pub fn size(script: &str) -> ParseResult<usize> {
        let trigger = Self::parse(script)?;
        Ok(trigger.footprint())
    }

    fn resolve_measured(&mut self) -> ParseResult<()> {
        let mut target: Option<(u32, bool)> = None;
        let mut as_percent = false;
        for group in std::iter::once(&self.core).chain(self.alts.iter()) {
            for cond in group.conditions() {
                if !cond.flag().is_measured() {
                    continue;
                }
                as_percent |= cond.flag() == ConditionType::MeasuredPercent;
                let from_hits = cond.hit_target() != 0;
                let value = if from_hits {
                    cond.hit_target()
                } else {
                    match cond.rhs() {
                        Some(Operand::Const(v)) => *v,
                        Some(Operand::Float(f)) => *f as u32,
                        None => 0,
                        Some(_) => return Err(ParseError::InvalidMeasuredTarget),
                    }
                };
                match target {
                    None => target = Some((value, from_hits)),
                    Some((existing, _)) if existing != value => {
                        return Err(ParseError::MultipleMeasuredTargets)
                    }
                    Some(_) => {}
                }
            }
        }
        if let Some((value, from_hits)) = target {
            self.measured_target = value;
            self.measured_from_hits = from_hits;
        }
        self.measured_as_percent = as_percent;
        Ok(())
    }

    /// One tick of raw evaluation with no state machine: refresh memory,
    /// evaluate every group in order, propagate resets, update measured
    /// progress, and return the overall boolean.
    pub fn test<P: MemoryPeek + ?Sized>(&mut self, peek: &P) -> bool {
        let outcome = self.process_tick(peek);
        if outcome.was_reset {
            self.apply_reset();
            return false;
        }
        self.has_hits = self.any_hits();
        outcome.truth
    }

    /// One tick of the full state machine.
    pub fn evaluate<P: MemoryPeek + ?Sized>(&mut self, peek: &P) -> TriggerState {
        match self.state {
            TriggerState::Triggered | TriggerState::Disabled => return TriggerState::Inactive,
            TriggerState::Inactive => {
                // keep deltas current so a later activation sees sane history
                self.table.refresh_all(peek);
                return TriggerState::Inactive;
            }
            _ => {}
        }

        let outcome = self.process_tick(peek);
        let mut truth = outcome.truth;
        let notify_reset;
        if outcome.was_reset {
            // a reset observed while waiting is what the trigger was
            // waiting for; swallow the notification
            notify_reset = self.state != TriggerState::Waiting && self.has_hits;
            self.apply_reset();
            truth = false;
        } else {
            notify_reset = outcome.was_cond_reset;
            self.has_hits = self.any_hits();
        }

        if truth {
            if self.state == TriggerState::Waiting {
                // true on first sight is suspect; insist on seeing the
                // trigger false once before arming
                self.reset_hit_counts();
                self.has_hits = false;
                return TriggerState::Waiting;
            }
            log::debug!("trigger fired");
            self.state = TriggerState::Triggered;
            return TriggerState::Triggered;
        }

        let next = if outcome.paused {
            TriggerState::Paused
        } else if outcome.primed {
            TriggerState::Primed
        } else {
            TriggerState::Active
        };
        if next != self.state {
            log::trace!("trigger state {:?} -> {:?}", self.state, next);
        }
        self.state = next;
        if notify_reset {
            TriggerState::Reset
        } else {
            next
        }
    }

    fn process_tick<P: MemoryPeek + ?Sized>(&mut self, peek: &P) -> TickOutcome {
        self.table.refresh_all(peek);
        let mut ctx = TickContext::new(peek);

        let core = self.core.evaluate(&mut ctx);
        let mut truth = core.truth;
        let mut paused = core.paused;
        let mut primed = core.primed;
        let mut measured = core.measured;

        if !self.alts.is_empty() {
            let mut any_true = false;
            let mut any_primed = false;
            let mut all_paused = true;
            for alt in &mut self.alts {
                let eval = alt.evaluate(&mut ctx);
                any_true |= eval.truth;
                any_primed |= eval.primed;
                all_paused &= eval.paused;
                if let Some(value) = eval.measured {
                    measured = Some(measured.map_or(value, |m| m.max(value)));
                }
            }
            truth &= any_true;
            primed &= any_primed;
            paused |= all_paused;
        }

        // paused groups report no measurement; the last captured value
        // stands until an unpaused group measures again
        if let Some(value) = measured {
            self.measured_value = value;
        }

        TickOutcome {
            truth,
            paused,
            primed,
            was_reset: ctx.was_reset,
            was_cond_reset: ctx.was_cond_reset,
        }
    }

    fn apply_reset(&mut self) {
        if self.measured_from_hits {
            self.measured_value = 0;
        }
        self.reset_hit_counts();
        self.has_hits = false;
        log::trace!("hit counters cleared by reset");
    }

    fn reset_hit_counts(&mut self) {
        self.core.reset_hits();
        for alt in &mut self.alts {
            alt.reset_hits();
        }
    }

    fn any_hits(&self) -> bool {
        self.core.any_hits() || self.alts.iter().any(|a| a.any_hits())
    }

    /// Zero all hit counters and measured progress and re-arm to `Waiting`.
    pub fn reset(&mut self) {
        self.reset_hit_counts();
        self.has_hits = false;
        if self.measured_from_hits {
            self.measured_value = 0;
        }
        if !matches!(self.state, TriggerState::Disabled | TriggerState::Inactive) {
            self.state = TriggerState::Waiting;
        }
    }

    /// Permanently disable the trigger if it observes `address`.
    ///
    /// This is the external invalidation path: the engine never detects bad
    /// addresses on its own. The parsed definition is retained, so the
    /// caller can re-arm with [`Trigger::set_state`] after remapping.
    pub fn invalidate_address(&mut self, address: u32) -> bool {
        if self.table.contains_address(address) {
            log::debug!("disabling trigger: address {address:#010x} invalidated");
            self.state = TriggerState::Disabled;
            true
        } else {
            false
        }
    }

    pub fn state(&self) -> TriggerState {
        self.state
    }

    /// Force a lifecycle state; used by orchestration layers on activation
    /// and when restoring persisted state.
    pub fn set_state(&mut self, state: TriggerState) {
        debug_assert!(state != TriggerState::Reset);
        self.state = state;
    }

    /// Whether any condition carried a nonzero hit counter after the last
    /// tick.
    pub fn has_hits(&self) -> bool {
        self.has_hits
    }

    /// Current measured progress as `(value, target)`; target 0 means
    /// unbounded.
    pub fn measured(&self) -> (u32, u32) {
        (self.measured_value, self.measured_target)
    }

    pub fn measured_as_percent(&self) -> bool {
        self.measured_as_percent
    }

    /// Group count including the core group (index 0).
    pub fn group_count(&self) -> usize {
        1 + self.alts.len()
    }

    fn group(&self, index: usize) -> Option<&ConditionGroup> {
        if index == 0 {
            Some(&self.core)
        } else {
            self.alts.get(index - 1)
        }
    }

    fn group_mut(&mut self, index: usize) -> Option<&mut ConditionGroup> {
        if index == 0 {
            Some(&mut self.core)
        } else {
            self.alts.get_mut(index - 1)
        }
    }

    pub fn conditions(&self, group: usize) -> Option<&[super::condition::Condition]> {
        self.group(group).map(|g| g.conditions())
    }

    /// Hit counter of one condition; group 0 is the core group.
    pub fn hits(&self, group: usize, index: usize) -> Option<u32> {
        self.group(group).and_then(|g| g.hits(index))
    }

    /// Restore one condition's hit counter (serialization support).
    pub fn set_hits(&mut self, group: usize, index: usize, hits: u32) -> bool {
        self.group_mut(group).is_some_and(|g| g.set_hits(index, hits))
    }

    /// Memory cells observed by this trigger.
    pub fn memrefs(&self) -> &MemRefTable {
        &self.table
    }

    /// Queryable live state for the serialization layer; never ticks.
    pub fn snapshot(&self) -> TriggerSnapshot {
        TriggerSnapshot {
            state: self.state,
            has_hits: self.has_hits,
            measured_value: self.measured_value,
            measured_target: self.measured_target,
            measured_as_percent: self.measured_as_percent,
            groups: std::iter::once(&self.core)
                .chain(self.alts.iter())
                .map(|group| GroupSnapshot {
                    conditions: group
                        .conditions()
                        .iter()
                        .map(|cond| ConditionSnapshot {
                            flag: cond.flag(),
                            hit_target: cond.hit_target(),
                            current_hits: cond.current_hits(),
                        })
                        .collect(),
                })
                .collect(),
            memrefs: self
                .table
                .iter()
                .map(|cell| MemRefSnapshot {
                    address: cell.address(),
                    size: cell.size(),
                    value: cell.value(),
                    delta: cell.delta(),
                    prior: cell.prior(),
                    changed: cell.changed(),
                    indirect: cell.is_indirect(),
                })
                .collect(),
        }
    }

    fn footprint(&self) -> usize {
        use std::mem::size_of;
        let conditions: usize = std::iter::once(&self.core)
            .chain(self.alts.iter())
            .map(|g| g.conditions().len())
            .sum();
        size_of::<Trigger>()
            + self.alts.len() * size_of::<ConditionGroup>()
            + conditions * size_of::<super::condition::Condition>()
            + self.table.len() * size_of::<crate::memory::MemRef>()
    }
}
