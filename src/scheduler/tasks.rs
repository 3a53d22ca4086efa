//! Task builder.
//!
//! Expands a term's subject/faculty/section assignment records into the
//! flat list of session tasks the search places.
//!
//! # Order
//! Subjects in input order, then faculty assignments in input order,
//! then sections in assignment order; per triple, theory sessions before
//! lab sessions. The search breaks MRV ties by this order, so it is part
//! of the determinism contract.

use crate::error::TimetableError;
use crate::models::{SessionKind, Task, TermInput, LAB_SESSIONS, SESSIONS_PER_WEEK, THEORY_SESSIONS};
use crate::validation::validate_input;

/// Builds all session tasks for a term.
///
/// Validates the input first; any problem fails with
/// [`TimetableError::Validation`] before a single task is produced.
///
/// The result holds exactly [`expected_task_count`] tasks.
pub fn build_tasks(term: &TermInput) -> Result<Vec<Task>, TimetableError> {
    validate_input(term).map_err(TimetableError::Validation)?;

    let mut tasks = Vec::with_capacity(expected_task_count(term));
    for subject in &term.subjects {
        for fa in &subject.faculty_assignments {
            for section_id in &fa.section_ids {
                let session = |kind| {
                    Task::new(&subject.id, kind, &fa.faculty_id, section_id)
                        .with_subject_label(&subject.name, &subject.code)
                        .with_faculty_name(&fa.faculty_name)
                };
                tasks.extend((0..THEORY_SESSIONS).map(|_| session(SessionKind::Theory)));
                tasks.extend((0..LAB_SESSIONS).map(|_| session(SessionKind::Lab)));
            }
        }
    }

    Ok(tasks)
}

/// Number of tasks [`build_tasks`] produces for valid input.
///
/// `SESSIONS_PER_WEEK × Σ(sections per faculty assignment per subject)`.
pub fn expected_task_count(term: &TermInput) -> usize {
    SESSIONS_PER_WEEK * term.teaching_triples()
}
