//! Backtracking search engine.
//!
//! # Algorithm
//!
//! Minimum-remaining-values (MRV) backtracking over the task list:
//! 1. Count the free slots of every unplaced task. Any task with zero
//!    free slots makes the branch a dead end.
//! 2. Branch on the task with the fewest free slots; ties go to the
//!    task that comes first in builder order.
//! 3. Try its candidate slots in the store's preference order: commit,
//!    descend, and on failure uncommit and try the next slot.
//! 4. An empty task list is a solution.
//!
//! Exhausting the root's candidates proves infeasibility. A node budget
//! and a cooperative cancellation flag, both checked once per node, stop
//! pathological searches with an explicit "don't know".
//!
//! Branching decisions live on a heap-allocated frame stack rather than
//! the call stack, so search depth is limited only by the task count.
//!
//! # Determinism
//! Given the same task list, calendar and configuration, the search
//! visits nodes in the same order and returns the same result.
//!
//! # Complexity
//! Exponential in the worst case. Each node costs O(n) bitmask counts
//! plus O(40 log 40) to rank the chosen task's candidates.
//!
//! # Reference
//! Russell & Norvig (2021), "Artificial Intelligence: A Modern Approach",
//! Ch. 6.3 (Backtracking Search for CSPs)

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, trace};

use super::store::{ConstraintStore, TaskKey};
use crate::config::GeneratorConfig;
use crate::error::{AbortReason, TimetableError};
use crate::models::{FacultyCalendar, SearchStats, Slot, Task, WeeklyAssignment, SLOTS_PER_WEEK};

/// Cooperative cancellation flag shared between a caller and a search.
///
/// Cloning shares the flag. The search polls it once per node.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Creates an unset token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// Lifecycle of a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    /// Not finished.
    Searching,
    /// Every task is placed.
    Success,
    /// The root ran out of candidates.
    Infeasible,
    /// Stopped by the budget or the caller.
    Aborted(AbortReason),
}

enum Step {
    Found,
    DeadEnd,
    Abort(AbortReason),
}

/// Necessary slot-count conditions, checked before any search.
///
/// In order:
/// 1. total tasks ≤ `SLOTS_PER_WEEK` × distinct sections
/// 2. tasks per section ≤ `SLOTS_PER_WEEK`
/// 3. tasks per faculty ≤ `SLOTS_PER_WEEK` − blocked slots
///
/// The first violated condition is reported.
pub fn preflight(tasks: &[Task], calendar: &FacultyCalendar) -> Result<(), TimetableError> {
    let mut per_section: BTreeMap<&str, usize> = BTreeMap::new();
    let mut per_faculty: BTreeMap<&str, usize> = BTreeMap::new();
    for task in tasks {
        *per_section.entry(task.section_id.as_str()).or_insert(0) += 1;
        *per_faculty.entry(task.faculty_id.as_str()).or_insert(0) += 1;
    }

    let available = SLOTS_PER_WEEK * per_section.len();
    debug!(
        required = tasks.len(),
        available,
        sections = per_section.len(),
        faculty = per_faculty.len(),
        "preflight capacity check"
    );
    if tasks.len() > available {
        return Err(TimetableError::CapacityExceeded {
            required: tasks.len(),
            available,
        });
    }

    if let Some((_, &required)) = per_section.iter().find(|(_, &n)| n > SLOTS_PER_WEEK) {
        return Err(TimetableError::CapacityExceeded {
            required,
            available: SLOTS_PER_WEEK,
        });
    }

    for (faculty_id, &required) in &per_faculty {
        let available = SLOTS_PER_WEEK.saturating_sub(calendar.blocked_count(faculty_id));
        if required > available {
            return Err(TimetableError::CapacityExceeded {
                required,
                available,
            });
        }
    }

    Ok(())
}

/// MRV backtracking search over one term's tasks.
///
/// # Example
/// ```
/// use u_timetable::config::GeneratorConfig;
/// use u_timetable::models::{SessionKind, Task};
/// use u_timetable::scheduler::{BacktrackingSearch, SearchState};
///
/// let tasks = vec![
///     Task::new("S1", SessionKind::Theory, "F1", "A"),
///     Task::new("S1", SessionKind::Lab, "F1", "A"),
/// ];
/// let mut search = BacktrackingSearch::new(&tasks, &GeneratorConfig::default());
/// let (assignment, stats) = search.run().unwrap();
/// assert_eq!(assignment.len(), 2);
/// assert_eq!(stats.backtracks, 0);
/// assert_eq!(search.state(), SearchState::Success);
/// ```
pub struct BacktrackingSearch<'a> {
    tasks: &'a [Task],
    keys: Vec<TaskKey>,
    store: ConstraintStore,
    placed: Vec<Option<Slot>>,
    node_budget: Option<u64>,
    cancel: Option<CancellationToken>,
    stats: SearchStats,
    state: SearchState,
}

/// One branching decision: a task taken out of the remaining list and
/// the candidate slots still to try for it.
struct Frame {
    task: usize,
    /// Position the task held in the remaining list.
    pos: usize,
    candidates: Vec<Slot>,
    next: usize,
}

impl<'a> BacktrackingSearch<'a> {
    /// Prepares a search with a fresh constraint store.
    pub fn new(tasks: &'a [Task], config: &GeneratorConfig) -> Self {
        let mut store = ConstraintStore::new(config);
        let keys = tasks.iter().map(|t| store.register(t)).collect();
        Self {
            tasks,
            keys,
            store,
            placed: vec![None; tasks.len()],
            node_budget: config.node_budget,
            cancel: None,
            stats: SearchStats::default(),
            state: SearchState::Searching,
        }
    }

    /// Blocks faculty slots committed elsewhere.
    pub fn with_calendar(mut self, calendar: &FacultyCalendar) -> Self {
        self.store.apply_calendar(calendar);
        self
    }

    /// Attaches a cancellation token.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// `Searching` until [`run`](Self::run) returns, then the verdict.
    pub fn state(&self) -> SearchState {
        self.state
    }

    /// Counters of the last run.
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Runs the search to completion.
    ///
    /// Every run starts from the store as configured, so running again
    /// repeats the same search and verdict.
    ///
    /// # Returns
    /// The complete assignment and search counters, or
    /// [`TimetableError::Infeasible`] / [`TimetableError::SearchAborted`].
    pub fn run(&mut self) -> Result<(WeeklyAssignment, SearchStats), TimetableError> {
        self.stats = SearchStats::default();
        self.state = SearchState::Searching;

        let outcome = self.search();

        let mut assignment = WeeklyAssignment::new();
        if matches!(outcome, Step::Found) {
            for (task, slot) in self.tasks.iter().zip(&self.placed) {
                if let Some(slot) = slot {
                    assignment.place(*slot, task.clone());
                }
            }
            debug_assert_eq!(assignment.len(), self.tasks.len());
        }
        self.unwind();

        match outcome {
            Step::Found => {
                self.state = SearchState::Success;
                Ok((assignment, self.stats))
            }
            Step::DeadEnd => {
                self.state = SearchState::Infeasible;
                Err(TimetableError::Infeasible { stats: self.stats })
            }
            Step::Abort(reason) => {
                self.state = SearchState::Aborted(reason);
                Err(TimetableError::SearchAborted {
                    reason,
                    stats: self.stats,
                })
            }
        }
    }

    /// Depth-first search over an explicit stack of frames.
    ///
    /// Each loop iteration visits one node; stack depth equals the number
    /// of tasks placed at that node.
    fn search(&mut self) -> Step {
        let mut remaining: Vec<usize> = (0..self.tasks.len()).collect();
        let mut stack: Vec<Frame> = Vec::with_capacity(self.tasks.len());

        loop {
            self.stats.nodes_visited += 1;
            self.stats.max_depth = self.stats.max_depth.max(stack.len());

            if let Some(reason) = self.abort_reason() {
                return Step::Abort(reason);
            }
            if remaining.is_empty() {
                return Step::Found;
            }

            if let Some(pos) = self.select_task(&remaining) {
                let task = remaining.remove(pos);
                stack.push(Frame {
                    task,
                    pos,
                    candidates: self.store.candidate_slots(self.keys[task]),
                    next: 0,
                });
            }

            // Commit the next untried candidate of the deepest open frame,
            // undoing its previous attempt and closing exhausted frames.
            loop {
                let depth = stack.len().saturating_sub(1);
                let Some(frame) = stack.last_mut() else {
                    return Step::DeadEnd;
                };
                let key = self.keys[frame.task];

                if let Some(slot) = self.placed[frame.task].take() {
                    self.store.uncommit(slot, key);
                    self.stats.backtracks += 1;
                    trace!(task = frame.task, %slot, depth, "backtrack");
                }

                if let Some(&slot) = frame.candidates.get(frame.next) {
                    frame.next += 1;
                    self.store.commit(slot, key);
                    self.placed[frame.task] = Some(slot);
                    break;
                }

                let (task, pos) = (frame.task, frame.pos);
                remaining.insert(pos, task);
                stack.pop();
            }
        }
    }

    /// Uncommits every placed task, returning the store to its
    /// pre-search contents.
    fn unwind(&mut self) {
        for (key, slot) in self.keys.iter().zip(self.placed.iter_mut()) {
            if let Some(slot) = slot.take() {
                self.store.uncommit(slot, *key);
            }
        }
        debug_assert_eq!(self.store.committed(), 0);
    }

    /// Position in `remaining` of the task with the fewest free slots,
    /// or `None` if some task has none.
    fn select_task(&self, remaining: &[usize]) -> Option<usize> {
        let mut best: Option<(usize, usize)> = None;
        for (pos, &task) in remaining.iter().enumerate() {
            let count = self.store.candidate_count(self.keys[task]);
            if count == 0 {
                return None;
            }
            if best.map_or(true, |(_, fewest)| count < fewest) {
                best = Some((pos, count));
            }
        }
        best.map(|(pos, _)| pos)
    }

    fn abort_reason(&self) -> Option<AbortReason> {
        if self
            .node_budget
            .is_some_and(|budget| self.stats.nodes_visited > budget)
        {
            return Some(AbortReason::BudgetExhausted);
        }
        if self.cancel.as_ref().is_some_and(CancellationToken::is_cancelled) {
            return Some(AbortReason::Cancelled);
        }
        None
    }
}
