//! Slot assignment (raw search solution).
//!
//! A weekly assignment maps every placed task to its slot. It is what the
//! search engine produces on success and what the assembler projects into
//! per-faculty and per-section views.
//!
//! # Invariants
//! For a solution produced by the search engine:
//! - at most one placement per (slot, faculty)
//! - at most one placement per (slot, section)
//! - one placement per generated task

use std::collections::HashSet;

use super::{Slot, Task};

/// One task placed in one slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    /// Assigned slot.
    pub slot: Slot,
    /// Placed task.
    pub task: Task,
}

/// A mapping from slots to placed tasks.
///
/// Placements are kept in task order (the order the task builder
/// produced them), not in slot order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeeklyAssignment {
    placements: Vec<Placement>,
}

/// A double-booking found in an assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Clash {
    /// A faculty member is placed twice in one slot.
    Faculty { faculty_id: String, slot: Slot },
    /// A section is placed twice in one slot.
    Section { section_id: String, slot: Slot },
}

impl Placement {
    /// Creates a placement.
    pub fn new(slot: Slot, task: Task) -> Self {
        Self { slot, task }
    }
}

impl WeeklyAssignment {
    /// Creates an empty assignment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a placement.
    pub fn place(&mut self, slot: Slot, task: Task) {
        self.placements.push(Placement::new(slot, task));
    }

    /// All placements in task order.
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Number of placed tasks.
    pub fn len(&self) -> usize {
        self.placements.len()
    }

    /// Whether nothing is placed.
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Tasks placed in a slot.
    pub fn tasks_at(&self, slot: Slot) -> Vec<&Task> {
        self.placements
            .iter()
            .filter(|p| p.slot == slot)
            .map(|p| &p.task)
            .collect()
    }

    /// Placements of one faculty member.
    pub fn for_faculty(&self, faculty_id: &str) -> Vec<&Placement> {
        self.placements
            .iter()
            .filter(|p| p.task.faculty_id == faculty_id)
            .collect()
    }

    /// Placements of one section.
    pub fn for_section(&self, section_id: &str) -> Vec<&Placement> {
        self.placements
            .iter()
            .filter(|p| p.task.section_id == section_id)
            .collect()
    }

    /// Scans every slot for double-bookings.
    ///
    /// Returns an empty list for any solution the search engine produced.
    pub fn clashes(&self) -> Vec<Clash> {
        let mut faculty_seen: HashSet<(Slot, &str)> = HashSet::new();
        let mut section_seen: HashSet<(Slot, &str)> = HashSet::new();
        let mut clashes = Vec::new();

        for p in &self.placements {
            if !faculty_seen.insert((p.slot, p.task.faculty_id.as_str())) {
                clashes.push(Clash::Faculty {
                    faculty_id: p.task.faculty_id.clone(),
                    slot: p.slot,
                });
            }
            if !section_seen.insert((p.slot, p.task.section_id.as_str())) {
                clashes.push(Clash::Section {
                    section_id: p.task.section_id.clone(),
                    slot: p.slot,
                });
            }
        }

        clashes
    }

    /// Whether the assignment has no double-bookings.
    pub fn is_conflict_free(&self) -> bool {
        self.clashes().is_empty()
    }
}
