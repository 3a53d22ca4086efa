//! Timetable generator.
//!
//! Orchestrates one generation request:
//!
//! 1. Validate the input and build session tasks.
//! 2. Pre-flight slot-count check.
//! 3. MRV backtracking search.
//! 4. Assemble faculty and section views.
//!
//! Any failure returns a [`TimetableError`]; no partial timetable is ever
//! produced.
//!
//! # Department requests
//! [`TimetableGenerator::generate_department`] generates several terms in
//! order. Faculty slots used by earlier terms are blocked for later ones,
//! so a faculty member teaching in two batches is never double-booked.

use tracing::{info, warn};

use super::assemble::assemble;
use super::search::{preflight, BacktrackingSearch, CancellationToken};
use super::tasks::build_tasks;
use crate::config::GeneratorConfig;
use crate::error::TimetableError;
use crate::models::{FacultyCalendar, TermInput, Timetable};

/// Weekly timetable generator.
///
/// Holds only configuration. Every request builds its own constraint
/// store, so one generator can serve concurrent requests.
///
/// # Example
/// ```
/// use u_timetable::models::{FacultyAssignment, Section, Subject, TermInput};
/// use u_timetable::TimetableGenerator;
///
/// let term = TermInput::new("2024-odd", "CSE-2022")
///     .with_section(Section::new("A", "CSE A"))
///     .with_subject(
///         Subject::new("DS", "Data Structures")
///             .with_assignment(FacultyAssignment::new("F1").with_section("A")),
///     );
///
/// let timetable = TimetableGenerator::new().generate(&term).unwrap();
/// assert_eq!(timetable.session_count(), 5);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TimetableGenerator {
    config: GeneratorConfig,
}

impl TimetableGenerator {
    /// Creates a generator with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a generator with the given configuration.
    pub fn with_config(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generates the timetable of one term.
    pub fn generate(&self, term: &TermInput) -> Result<Timetable, TimetableError> {
        self.generate_with(term, &FacultyCalendar::new(), None)
    }

    /// Generates one term around pre-blocked faculty slots.
    ///
    /// # Arguments
    /// * `calendar` - Faculty slots that must stay free (committed elsewhere).
    /// * `cancel` - Optional token; setting it stops the search at its next node.
    pub fn generate_with(
        &self,
        term: &TermInput,
        calendar: &FacultyCalendar,
        cancel: Option<CancellationToken>,
    ) -> Result<Timetable, TimetableError> {
        let tasks = build_tasks(term)?;
        info!(
            term_id = %term.term_id,
            batch_id = %term.batch_id,
            tasks = tasks.len(),
            "generating timetable"
        );

        if let Err(err) = preflight(&tasks, calendar) {
            warn!(term_id = %term.term_id, error = %err, "capacity check failed");
            return Err(err);
        }

        let mut search = BacktrackingSearch::new(&tasks, &self.config).with_calendar(calendar);
        if let Some(token) = cancel {
            search = search.with_cancellation(token);
        }

        let (assignment, stats) = match search.run() {
            Ok(found) => found,
            Err(err) => {
                warn!(term_id = %term.term_id, error = %err, "search failed");
                return Err(err);
            }
        };

        info!(
            term_id = %term.term_id,
            nodes = stats.nodes_visited,
            backtracks = stats.backtracks,
            "timetable generated"
        );
        Ok(assemble(term, &assignment, stats))
    }

    /// Generates several terms in order with no cross-term faculty clash.
    ///
    /// The first failing term aborts the request; its error is wrapped in
    /// [`TimetableError::Term`] and no timetables are returned.
    pub fn generate_department(
        &self,
        terms: &[TermInput],
    ) -> Result<Vec<Timetable>, TimetableError> {
        let mut calendar = FacultyCalendar::new();
        let mut timetables = Vec::with_capacity(terms.len());

        for term in terms {
            let timetable =
                self.generate_with(term, &calendar, None)
                    .map_err(|source| TimetableError::Term {
                        term_id: term.term_id.clone(),
                        source: Box::new(source),
                    })?;

            for schedule in &timetable.faculty_schedules {
                for slot in schedule.entries.iter().filter_map(|e| e.slot()) {
                    calendar.block(schedule.faculty_id.as_str(), slot);
                }
            }
            timetables.push(timetable);
        }

        Ok(timetables)
    }
}
