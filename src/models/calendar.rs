//! Faculty availability calendar.
//!
//! Records slots in which a faculty member is already committed outside
//! the timetable being generated (e.g. teaching another batch). Blocked
//! slots are treated as occupied by the constraint store, so the
//! generator never places that faculty member there.
//!
//! # Precedence
//! A faculty slot is available iff it is not blocked here AND not
//! occupied by a session committed during the current search.

use std::collections::{BTreeMap, BTreeSet};

use super::Slot;

/// Blocked slots per faculty member.
///
/// Ordered maps keep iteration deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacultyCalendar {
    blocked: BTreeMap<String, BTreeSet<Slot>>,
}

impl FacultyCalendar {
    /// Creates an empty calendar (everyone always available).
    pub fn new() -> Self {
        Self::default()
    }

    /// Blocks a slot for a faculty member.
    pub fn block(&mut self, faculty_id: impl Into<String>, slot: Slot) {
        self.blocked.entry(faculty_id.into()).or_default().insert(slot);
    }

    /// Builder form of [`block`](Self::block).
    pub fn with_blocked(mut self, faculty_id: impl Into<String>, slot: Slot) -> Self {
        self.block(faculty_id, slot);
        self
    }

    /// Whether a faculty member is blocked at a slot.
    pub fn is_blocked(&self, faculty_id: &str, slot: Slot) -> bool {
        self.blocked
            .get(faculty_id)
            .is_some_and(|slots| slots.contains(&slot))
    }

    /// Blocked slots of one faculty member, in grid order.
    pub fn blocked_slots(&self, faculty_id: &str) -> impl Iterator<Item = Slot> + '_ {
        self.blocked.get(faculty_id).into_iter().flatten().copied()
    }

    /// Number of blocked slots for a faculty member.
    pub fn blocked_count(&self, faculty_id: &str) -> usize {
        self.blocked.get(faculty_id).map_or(0, BTreeSet::len)
    }

    /// Faculty members with at least one blocked slot.
    pub fn faculty_ids(&self) -> impl Iterator<Item = &str> {
        self.blocked.keys().map(String::as_str)
    }

    /// Whether nothing is blocked.
    pub fn is_empty(&self) -> bool {
        self.blocked.values().all(BTreeSet::is_empty)
    }
}
