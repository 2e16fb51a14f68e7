//! Condition groups: ordered AND-group evaluation
//!
//! Evaluation is a strict sequential fold over the declaration order. The
//! accumulator chains (AddSource, AddHits, AndNext, ResetNextIf, AddAddress)
//! and the PauseIf short-circuit are order-dependent by design; none of this
//! may be reordered or restructured into a tree.

use crate::error::ParseResult;
use crate::memory::{MemRefTable, MemoryPeek};

use super::condition::{Condition, ConditionType};
use super::scanner::Scanner;
use super::value::Value;

/// Shared per-tick signals raised during group evaluation.
pub(crate) struct TickContext<'a, P: MemoryPeek + ?Sized> {
    pub peek: &'a P,
    /// A ResetIf fired in an unpaused group
    pub was_reset: bool,
    /// A ResetNextIf zeroed a nonzero hit counter
    pub was_cond_reset: bool,
}

impl<'a, P: MemoryPeek + ?Sized> TickContext<'a, P> {
    pub fn new(peek: &'a P) -> Self {
        Self {
            peek,
            was_reset: false,
            was_cond_reset: false,
        }
    }
}

/// Result of evaluating one group for one tick.
#[derive(Debug, Clone, Copy)]
pub(crate) struct GroupEval {
    pub truth: bool,
    pub paused: bool,
    /// All non-Trigger conditions held
    pub primed: bool,
    /// Progress value reported by a Measured condition, if the group has one
    /// and was not paused this tick
    pub measured: Option<u32>,
}

/// Carry state threaded between consecutive conditions.
struct Chain {
    add_value: Option<Value>,
    add_hits: i64,
    add_address: u32,
    and_next: bool,
    or_next: bool,
    reset_next: bool,
}

impl Chain {
    fn new() -> Self {
        Self {
            add_value: None,
            add_hits: 0,
            add_address: 0,
            and_next: true,
            or_next: false,
            reset_next: false,
        }
    }
}

struct SubsetEval {
    truth: bool,
    primed: bool,
    paused: bool,
    can_measure: bool,
    measured: Option<u32>,
}

/// An ordered list of conditions evaluated as one AND-group.
#[derive(Debug)]
pub struct ConditionGroup {
    conditions: Vec<Condition>,
    has_pause: bool,
}

impl ConditionGroup {
    /// Parse a group up to the next `S` separator or end of input.
    pub(crate) fn parse(sc: &mut Scanner<'_>, table: &mut MemRefTable) -> ParseResult<Self> {
        let mut conditions = Vec::new();
        if !sc.is_empty() && !matches!(sc.peek(), Some(b'S') | Some(b's')) {
            let mut indirect = false;
            loop {
                let cond = Condition::parse(sc, table, indirect)?;
                indirect = cond.flag() == ConditionType::AddAddress;
                conditions.push(cond);
                if !sc.eat(b'_') {
                    break;
                }
            }
        }

        // a run of combining conditions belongs to the terminator that ends
        // it; chains ending in a PauseIf evaluate in the pause pass
        let mut has_pause = false;
        let mut chain_start = 0;
        for i in 0..conditions.len() {
            if conditions[i].flag().is_combining() {
                continue;
            }
            if conditions[i].flag() == ConditionType::PauseIf {
                has_pause = true;
                for cond in &mut conditions[chain_start..=i] {
                    cond.pause_chain = true;
                }
            }
            chain_start = i + 1;
        }

        Ok(Self {
            conditions,
            has_pause,
        })
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub(crate) fn reset_hits(&mut self) {
        for cond in &mut self.conditions {
            cond.current_hits = 0;
        }
    }

    pub(crate) fn any_hits(&self) -> bool {
        self.conditions.iter().any(|c| c.current_hits > 0)
    }

    pub(crate) fn hits(&self, index: usize) -> Option<u32> {
        self.conditions.get(index).map(|c| c.current_hits)
    }

    pub(crate) fn set_hits(&mut self, index: usize, hits: u32) -> bool {
        match self.conditions.get_mut(index) {
            Some(cond) => {
                cond.current_hits = hits;
                true
            }
            None => false,
        }
    }

    /// Evaluate the group for this tick.
    ///
    /// The pause pass runs first and wins: a paused group reports false,
    /// suppresses its ResetIf conditions entirely, and skips all hit
    /// accounting for the tick, though pointer-chased cells still refresh so
    /// delta/prior tracking stays current.
    pub(crate) fn evaluate<P: MemoryPeek + ?Sized>(
        &mut self,
        ctx: &mut TickContext<'_, P>,
    ) -> GroupEval {
        if self.conditions.is_empty() {
            return GroupEval {
                truth: true,
                paused: false,
                primed: true,
                measured: None,
            };
        }

        if self.has_pause && self.run_subset(true, ctx).paused {
            self.update_indirect_only(ctx);
            return GroupEval {
                truth: false,
                paused: true,
                primed: false,
                measured: None,
            };
        }

        let main = self.run_subset(false, ctx);
        let measured = if main.can_measure {
            main.measured
        } else {
            // a false MeasuredIf reports zero rather than holding the value
            main.measured.map(|_| 0)
        };
        GroupEval {
            truth: main.truth,
            paused: false,
            primed: main.primed,
            measured,
        }
    }

    /// Walk one subset (pause chains or everything else) in declaration
    /// order, resolving carry state and tallying hits.
    fn run_subset<P: MemoryPeek + ?Sized>(
        &mut self,
        pause_pass: bool,
        ctx: &mut TickContext<'_, P>,
    ) -> SubsetEval {
        let mut chain = Chain::new();
        let mut truth = true;
        let mut primed = true;
        let mut can_measure = true;
        let mut measured: Option<u32> = None;

        for cond in self
            .conditions
            .iter_mut()
            .filter(|c| c.pause_chain == pause_pass)
        {
            cond.refresh_indirect(ctx.peek, chain.add_address);

            match cond.flag() {
                ConditionType::AddSource => {
                    let value = cond.modifier_value();
                    let acc = chain.add_value.take().unwrap_or(Value::Int(0));
                    chain.add_value = Some(acc.add(value));
                    chain.add_address = 0;
                    continue;
                }
                ConditionType::SubSource => {
                    let value = cond.modifier_value();
                    let acc = chain.add_value.take().unwrap_or(Value::Int(0));
                    chain.add_value = Some(acc.sub(value));
                    chain.add_address = 0;
                    continue;
                }
                ConditionType::AddAddress => {
                    chain.add_address = cond.modifier_value().as_u32();
                    continue;
                }
                _ => {}
            }

            let (raw, lhs) = cond.compare(chain.add_value.take());
            chain.add_address = 0;

            let mut valid = (raw && chain.and_next) || chain.or_next;
            chain.and_next = true;
            chain.or_next = false;

            // STEP: hit accounting. An active ResetNextIf forbids tallying
            // and zeroes whatever was accumulated.
            if chain.reset_next {
                if cond.current_hits > 0 {
                    cond.current_hits = 0;
                    ctx.was_cond_reset = true;
                }
                valid = false;
            } else if valid && (cond.hit_target == 0 || cond.current_hits < cond.hit_target) {
                cond.current_hits += 1;
            }

            // STEP: effective truth. Once a target is met the condition
            // stays true regardless of the raw comparison, until reset.
            // Combining conditions latch on their own counter; terminators
            // fold in the carried AddHits/SubHits total, which is signed.
            let effective = if cond.hit_target == 0 {
                valid
            } else if cond.flag().is_combining() {
                cond.current_hits >= cond.hit_target
            } else {
                chain.add_hits + i64::from(cond.current_hits) >= i64::from(cond.hit_target)
            };

            match cond.flag() {
                ConditionType::AndNext => {
                    chain.and_next = effective;
                    continue;
                }
                ConditionType::OrNext => {
                    chain.or_next = effective;
                    continue;
                }
                ConditionType::ResetNextIf => {
                    chain.reset_next = effective;
                    continue;
                }
                ConditionType::AddHits => {
                    chain.add_hits += i64::from(cond.current_hits);
                    chain.reset_next = false;
                    continue;
                }
                ConditionType::SubHits => {
                    chain.add_hits -= i64::from(cond.current_hits);
                    chain.reset_next = false;
                    continue;
                }
                _ => {}
            }

            // terminating condition: chain state is consumed here
            let total = chain.add_hits;
            chain = Chain::new();

            match cond.flag() {
                ConditionType::PauseIf => {
                    if effective {
                        // stop the scan outright; later pause chains do not
                        // get to tally their own hits this tick
                        return SubsetEval {
                            truth: false,
                            primed: false,
                            paused: true,
                            can_measure,
                            measured,
                        };
                    }
                    // an unmatched PauseIf without a target forgets its hit
                    if cond.hit_target == 0 {
                        cond.current_hits = 0;
                    }
                }
                ConditionType::ResetIf => {
                    if effective {
                        ctx.was_reset = true;
                        truth = false;
                        primed = false;
                    }
                }
                ConditionType::Trigger => {
                    // required for firing, invisible to primed detection
                    truth &= effective;
                }
                ConditionType::MeasuredIf => {
                    truth &= effective;
                    primed &= effective;
                    can_measure &= effective;
                }
                ConditionType::Measured | ConditionType::MeasuredPercent => {
                    truth &= effective;
                    primed &= effective;
                    let value = if cond.hit_target != 0 {
                        (total + i64::from(cond.current_hits)).max(0) as u32
                    } else {
                        lhs.as_u32()
                    };
                    measured = Some(measured.map_or(value, |m| m.max(value)));
                }
                _ => {
                    truth &= effective;
                    primed &= effective;
                }
            }
        }

        SubsetEval {
            truth,
            primed,
            paused: false,
            can_measure,
            measured,
        }
    }

    /// While paused, walk the skipped conditions' AddAddress chains so their
    /// pointer-chased cells keep tracking the dereferenced values.
    fn update_indirect_only<P: MemoryPeek + ?Sized>(&mut self, ctx: &mut TickContext<'_, P>) {
        let mut offset = 0u32;
        for cond in self.conditions.iter().filter(|c| !c.pause_chain) {
            cond.refresh_indirect(ctx.peek, offset);
            offset = if cond.flag() == ConditionType::AddAddress {
                cond.modifier_value().as_u32()
            } else {
                0
            };
        }
    }
}
