use std::collections::{BTreeMap, BTreeSet};

use super::{EntityId, Tick};

/// One pending activation: `entity` acts once the clock reaches `ready_at`.
///
/// Ordering is by time, then by entity id, so equal-time entries always
/// resolve in ascending id order (the player, id 0, goes first).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScheduledTurn {
    pub ready_at: Tick,
    pub entity: EntityId,
}

/// Timeline state: the game clock and the priority queue of pending turns.
///
/// Holds at most one entry per entity. The clock only moves when an entry is
/// popped and never runs backwards.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct TurnState {
    /// Current timeline clock.
    pub clock: Tick,

    /// The entity currently taking its turn, set by the last pop.
    pub current_actor: Option<EntityId>,

    queue: BTreeSet<ScheduledTurn>,
    pending: BTreeMap<EntityId, Tick>,
}

impl TurnState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues `entity` at `ready_at`. Returns `false` if it already has an entry.
    pub fn schedule(&mut self, entity: EntityId, ready_at: Tick) -> bool {
        if self.pending.contains_key(&entity) {
            return false;
        }
        self.pending.insert(entity, ready_at);
        self.queue.insert(ScheduledTurn { ready_at, entity });
        true
    }

    /// Drops the entry for `entity`, returning when it would have acted.
    pub fn unschedule(&mut self, entity: EntityId) -> Option<Tick> {
        let ready_at = self.pending.remove(&entity)?;
        self.queue.remove(&ScheduledTurn { ready_at, entity });
        Some(ready_at)
    }

    /// Removes the soonest entry and advances the clock to its time.
    pub fn pop_next(&mut self) -> Option<ScheduledTurn> {
        let next = self.queue.pop_first()?;
        self.pending.remove(&next.entity);
        self.clock = self.clock.max(next.ready_at);
        self.current_actor = Some(next.entity);
        Some(next)
    }

    pub fn peek_next(&self) -> Option<ScheduledTurn> {
        self.queue.first().copied()
    }

    pub fn is_scheduled(&self, entity: EntityId) -> bool {
        self.pending.contains_key(&entity)
    }

    pub fn ready_at(&self, entity: EntityId) -> Option<Tick> {
        self.pending.get(&entity).copied()
    }

    /// Pending entries in activation order.
    pub fn iter(&self) -> impl Iterator<Item = ScheduledTurn> + '_ {
        self.queue.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
