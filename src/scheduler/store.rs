//! Constraint store.
//!
//! Tracks which faculty members and sections occupy each slot while the
//! search runs, plus the per-day counters behind the spreading
//! heuristic. Every mutation is reversible: `uncommit` is the exact
//! inverse of `commit`, so the store after a commit/uncommit pair
//! compares equal to the store before it.
//!
//! # Representation
//! Faculty, section and subject IDs are interned to dense indices when a
//! task is registered. Occupancy is one `u64` bitmask per faculty and per
//! section, bit `i` standing for the slot with grid index `i`. Freedom
//! checks and candidate counts are therefore a few bit operations.
//!
//! # Candidate Order
//! Free slots are ranked into three tiers, stable within a tier:
//! 0. the section has nothing on that day yet
//! 1. the day is in use, but this subject stays under the daily soft cap
//! 2. placing here would exceed the soft cap
//!
//! Tier 2 slots remain candidates so the search always has a value to try.

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::config::GeneratorConfig;
use crate::models::{FacultyCalendar, Slot, Task, DAYS_PER_WEEK, SLOTS_PER_WEEK};

const WEEK_MASK: u64 = (1u64 << SLOTS_PER_WEEK) - 1;

/// Interned indices of a task's faculty, section and subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskKey {
    pub faculty: usize,
    pub section: usize,
    pub subject: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Interner {
    index: HashMap<String, usize>,
    ids: Vec<String>,
}

impl Interner {
    fn intern(&mut self, id: &str) -> usize {
        if let Some(&i) = self.index.get(id) {
            return i;
        }
        let i = self.ids.len();
        self.index.insert(id.to_string(), i);
        self.ids.push(id.to_string());
        i
    }

    fn get(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    fn len(&self) -> usize {
        self.ids.len()
    }
}

/// Reversible per-slot occupancy of faculty and sections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintStore {
    faculty: Interner,
    sections: Interner,
    subjects: Interner,
    faculty_busy: Vec<u64>,
    faculty_blocked: Vec<u64>,
    section_busy: Vec<u64>,
    /// (faculty, section) pairs per slot index.
    occupants: Vec<Vec<(usize, usize)>>,
    /// [section][subject][day] session counts.
    subject_day: Vec<Vec<[u32; DAYS_PER_WEEK]>>,
    /// [section][day] session counts.
    section_day: Vec<[u32; DAYS_PER_WEEK]>,
    slot_order: Vec<Slot>,
    max_subject_per_day: u32,
    committed: usize,
}

impl ConstraintStore {
    /// Creates an empty store.
    pub fn new(config: &GeneratorConfig) -> Self {
        Self {
            faculty: Interner::default(),
            sections: Interner::default(),
            subjects: Interner::default(),
            faculty_busy: Vec::new(),
            faculty_blocked: Vec::new(),
            section_busy: Vec::new(),
            occupants: vec![Vec::new(); SLOTS_PER_WEEK],
            subject_day: Vec::new(),
            section_day: Vec::new(),
            slot_order: base_slot_order(config.shuffle_seed),
            max_subject_per_day: config.max_subject_per_day,
            committed: 0,
        }
    }

    /// Interns a task's IDs and returns its key.
    ///
    /// Registering the same IDs again returns the same key.
    pub fn register(&mut self, task: &Task) -> TaskKey {
        let faculty = self.intern_faculty(&task.faculty_id);
        let section = self.sections.intern(&task.section_id);
        let subject = self.subjects.intern(&task.subject_id);

        self.section_busy.resize(self.sections.len(), 0);
        self.section_day.resize(self.sections.len(), [0; DAYS_PER_WEEK]);
        self.subject_day.resize_with(self.sections.len(), Vec::new);
        let subject_count = self.subjects.len();
        for per_section in &mut self.subject_day {
            per_section.resize(subject_count, [0; DAYS_PER_WEEK]);
        }

        TaskKey {
            faculty,
            section,
            subject,
        }
    }

    /// Marks a faculty slot as unavailable before search.
    pub fn block_faculty(&mut self, faculty_id: &str, slot: Slot) {
        let f = self.intern_faculty(faculty_id);
        self.faculty_blocked[f] |= slot.mask();
    }

    /// Blocks every slot listed in a calendar.
    pub fn apply_calendar(&mut self, calendar: &FacultyCalendar) {
        for faculty_id in calendar.faculty_ids() {
            for slot in calendar.blocked_slots(faculty_id) {
                self.block_faculty(faculty_id, slot);
            }
        }
    }

    /// True iff neither the faculty nor the section is occupied at `slot`.
    #[inline]
    pub fn is_free(&self, slot: Slot, faculty: usize, section: usize) -> bool {
        self.occupied_mask(faculty, section) & slot.mask() == 0
    }

    /// Records a task at a slot.
    pub fn commit(&mut self, slot: Slot, key: TaskKey) {
        debug_assert!(self.is_free(slot, key.faculty, key.section));
        let day = slot.day().index();
        self.faculty_busy[key.faculty] |= slot.mask();
        self.section_busy[key.section] |= slot.mask();
        self.occupants[slot.index()].push((key.faculty, key.section));
        self.subject_day[key.section][key.subject][day] += 1;
        self.section_day[key.section][day] += 1;
        self.committed += 1;
    }

    /// Exact inverse of [`commit`](Self::commit).
    pub fn uncommit(&mut self, slot: Slot, key: TaskKey) {
        let day = slot.day().index();
        self.faculty_busy[key.faculty] &= !slot.mask();
        self.section_busy[key.section] &= !slot.mask();
        let occupants = &mut self.occupants[slot.index()];
        if let Some(pos) = occupants
            .iter()
            .rposition(|&pair| pair == (key.faculty, key.section))
        {
            occupants.remove(pos);
        }
        self.subject_day[key.section][key.subject][day] -= 1;
        self.section_day[key.section][day] -= 1;
        self.committed -= 1;
    }

    /// Number of free slots for a task. Equals `candidate_slots(key).len()`.
    #[inline]
    pub fn candidate_count(&self, key: TaskKey) -> usize {
        (!self.occupied_mask(key.faculty, key.section) & WEEK_MASK).count_ones() as usize
    }

    /// Every free slot for a task, best first.
    pub fn candidate_slots(&self, key: TaskKey) -> Vec<Slot> {
        let occupied = self.occupied_mask(key.faculty, key.section);
        let mut ranked: Vec<(u8, Slot)> = self
            .slot_order
            .iter()
            .filter(|slot| occupied & slot.mask() == 0)
            .map(|&slot| (self.preference(slot, key), slot))
            .collect();
        ranked.sort_by_key(|&(tier, _)| tier);
        ranked.into_iter().map(|(_, slot)| slot).collect()
    }

    /// (faculty ID, section ID) pairs occupying a slot.
    pub fn occupants(&self, slot: Slot) -> Vec<(&str, &str)> {
        self.occupants[slot.index()]
            .iter()
            .map(|&(f, s)| {
                (
                    self.faculty.ids[f].as_str(),
                    self.sections.ids[s].as_str(),
                )
            })
            .collect()
    }

    /// Number of tasks currently committed.
    pub fn committed(&self) -> usize {
        self.committed
    }

    /// Slots blocked for a faculty member before search.
    pub fn blocked_count(&self, faculty_id: &str) -> usize {
        self.faculty
            .get(faculty_id)
            .map_or(0, |f| self.faculty_blocked[f].count_ones() as usize)
    }

    /// Sessions of `key`'s subject already on `slot`'s day for its section.
    pub fn subject_sessions_on_day(&self, key: TaskKey, slot: Slot) -> u32 {
        self.subject_day[key.section][key.subject][slot.day().index()]
    }

    fn intern_faculty(&mut self, faculty_id: &str) -> usize {
        let f = self.faculty.intern(faculty_id);
        self.faculty_busy.resize(self.faculty.len(), 0);
        self.faculty_blocked.resize(self.faculty.len(), 0);
        f
    }

    #[inline]
    fn occupied_mask(&self, faculty: usize, section: usize) -> u64 {
        self.faculty_busy[faculty] | self.faculty_blocked[faculty] | self.section_busy[section]
    }

    fn preference(&self, slot: Slot, key: TaskKey) -> u8 {
        let day = slot.day().index();
        if self.section_day[key.section][day] == 0 {
            0
        } else if self.subject_day[key.section][key.subject][day] < self.max_subject_per_day {
            1
        } else {
            2
        }
    }
}

/// Grid order, or a seeded permutation of it.
fn base_slot_order(seed: Option<u64>) -> Vec<Slot> {
    let mut order: Vec<Slot> = Slot::week().collect();
    if let Some(seed) = seed {
        let mut rng = StdRng::seed_from_u64(seed);
        order.shuffle(&mut rng);
    }
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Day, SessionKind};

    fn slot(day: Day, period: u8) -> Slot {
        Slot::new(day, period).unwrap()
    }

    fn task(subject: &str, faculty: &str, section: &str) -> Task {
        Task::new(subject, SessionKind::Theory, faculty, section)
    }

    fn store() -> ConstraintStore {
        ConstraintStore::new(&GeneratorConfig::default())
    }

    #[test]
    fn test_register_is_stable() {
        let mut s = store();
        let a = s.register(&task("S1", "F1", "A"));
        let b = s.register(&task("S2", "F1", "B"));
        let a2 = s.register(&task("S1", "F1", "A"));

        assert_eq!(a, a2);
        assert_eq!(a.faculty, b.faculty);
        assert_ne!(a.section, b.section);
        assert_ne!(a.subject, b.subject);
    }

    #[test]
    fn test_is_free_tracks_faculty_and_section() {
        let mut s = store();
        let a = s.register(&task("S1", "F1", "A"));
        let b = s.register(&task("S2", "F2", "A"));
        let c = s.register(&task("S3", "F1", "B"));
        let d = s.register(&task("S4", "F3", "B"));
        let mon1 = slot(Day::Mon, 1);

        s.commit(mon1, a);
        assert!(!s.is_free(mon1, b.faculty, b.section)); // section A busy
        assert!(!s.is_free(mon1, c.faculty, c.section)); // faculty F1 busy
        assert!(s.is_free(mon1, d.faculty, d.section));
        assert!(s.is_free(slot(Day::Mon, 2), a.faculty, a.section));
        assert_eq!(s.occupants(mon1), vec![("F1", "A")]);
    }

    #[test]
    fn test_uncommit_restores_state() {
        let mut s = store();
        let a = s.register(&task("S1", "F1", "A"));
        let b = s.register(&task("S2", "F2", "B"));
        s.commit(slot(Day::Tue, 3), a);

        let before = s.clone();
        s.commit(slot(Day::Tue, 3), b);
        s.commit(slot(Day::Wed, 1), a);
        assert_eq!(s.committed(), 3);
        s.uncommit(slot(Day::Wed, 1), a);
        s.uncommit(slot(Day::Tue, 3), b);

        assert_eq!(s, before);
    }

    #[test]
    fn test_candidates_prefer_unused_days() {
        let mut s = store();
        let key = s.register(&task("S1", "F1", "A"));
        s.commit(slot(Day::Mon, 1), key);

        let candidates = s.candidate_slots(key);
        assert_eq!(candidates.len(), 39);
        assert_eq!(s.candidate_count(key), 39);
        // Tue..Fri (32 slots) come before the remaining Monday slots
        assert!(candidates[..32].iter().all(|c| c.day() != Day::Mon));
        assert!(candidates[32..].iter().all(|c| c.day() == Day::Mon));
        assert_eq!(candidates[0], slot(Day::Tue, 1));
    }

    #[test]
    fn test_soft_cap_demotes_but_keeps_slots() {
        let mut s = store();
        let key = s.register(&task("S1", "F1", "A"));
        let other = s.register(&task("S2", "F2", "A"));

        // Every day in use by section A
        for day in [Day::Tue, Day::Wed, Day::Thu, Day::Fri] {
            s.commit(slot(day, 8), other);
        }
        // Subject S1 at the cap on Monday
        s.commit(slot(Day::Mon, 1), key);
        s.commit(slot(Day::Mon, 2), key);
        assert_eq!(s.subject_sessions_on_day(key, slot(Day::Mon, 3)), 2);

        let candidates = s.candidate_slots(key);
        assert_eq!(candidates.len(), 34);
        let first_monday = candidates
            .iter()
            .position(|c| c.day() == Day::Mon)
            .unwrap();
        assert_eq!(first_monday, 28);
        assert!(candidates[28..].iter().all(|c| c.day() == Day::Mon));
    }

    #[test]
    fn test_blocked_faculty_slots() {
        let mut s = store();
        let key = s.register(&task("S1", "F1", "A"));
        let calendar = FacultyCalendar::new()
            .with_blocked("F1", slot(Day::Mon, 1))
            .with_blocked("F1", slot(Day::Fri, 8));
        s.apply_calendar(&calendar);

        assert_eq!(s.blocked_count("F1"), 2);
        assert_eq!(s.blocked_count("F9"), 0);
        assert!(!s.is_free(slot(Day::Mon, 1), key.faculty, key.section));
        assert_eq!(s.candidate_count(key), 38);
        assert!(!s.candidate_slots(key).contains(&slot(Day::Fri, 8)));
    }

    #[test]
    fn test_seeded_order_is_reproducible() {
        let config = GeneratorConfig::default().with_shuffle_seed(42);
        let mut s1 = ConstraintStore::new(&config);
        let mut s2 = ConstraintStore::new(&config);
        let k1 = s1.register(&task("S1", "F1", "A"));
        let k2 = s2.register(&task("S1", "F1", "A"));

        let natural: Vec<Slot> = Slot::week().collect();
        assert_eq!(s1.candidate_slots(k1), s2.candidate_slots(k2));
        assert_ne!(s1.candidate_slots(k1), natural);
        assert_eq!(store_with_default_order(), natural);
    }

    fn store_with_default_order() -> Vec<Slot> {
        let mut s = store();
        let key = s.register(&task("S1", "F1", "A"));
        s.candidate_slots(key)
    }
}
