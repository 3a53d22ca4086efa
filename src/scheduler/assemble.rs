//! Schedule assembler.
//!
//! Projects a complete slot assignment into the per-faculty and
//! per-section views of a [`Timetable`]. No validation happens here: the
//! assignment is already conflict-free and complete.
//!
//! Schedules appear in first-seen order while walking placements in task
//! order; entries within a schedule are ordered by (day, period).

use std::collections::HashMap;

use crate::models::{
    FacultySchedule, Placement, SearchStats, SectionSchedule, TermInput, Timetable,
    TimetableEntry, WeeklyAssignment,
};

/// Builds the timetable views for a term from its assignment.
///
/// Each placement yields one entry in its faculty's schedule and one in
/// its section's schedule.
pub fn assemble(term: &TermInput, assignment: &WeeklyAssignment, stats: SearchStats) -> Timetable {
    let mut faculty_schedules: Vec<FacultySchedule> = Vec::new();
    let mut section_schedules: Vec<SectionSchedule> = Vec::new();
    let mut faculty_pos: HashMap<&str, usize> = HashMap::new();
    let mut section_pos: HashMap<&str, usize> = HashMap::new();

    for placement in assignment.placements() {
        let task = &placement.task;
        let entry = entry_for(term, placement);

        let f = *faculty_pos.entry(task.faculty_id.as_str()).or_insert_with(|| {
            faculty_schedules.push(FacultySchedule {
                faculty_id: task.faculty_id.clone(),
                faculty_name: task.faculty_name.clone(),
                entries: Vec::new(),
            });
            faculty_schedules.len() - 1
        });
        let s = *section_pos.entry(task.section_id.as_str()).or_insert_with(|| {
            section_schedules.push(SectionSchedule {
                section_id: task.section_id.clone(),
                section_name: term.section_name(&task.section_id).to_string(),
                entries: Vec::new(),
            });
            section_schedules.len() - 1
        });

        faculty_schedules[f].entries.push(entry.clone());
        section_schedules[s].entries.push(entry);
    }

    for schedule in &mut faculty_schedules {
        schedule.entries.sort_by_key(|e| (e.day, e.period));
    }
    for schedule in &mut section_schedules {
        schedule.entries.sort_by_key(|e| (e.day, e.period));
    }

    Timetable {
        term_id: term.term_id.clone(),
        batch_id: term.batch_id.clone(),
        faculty_schedules,
        section_schedules,
        stats,
    }
}

fn entry_for(term: &TermInput, placement: &Placement) -> TimetableEntry {
    let task = &placement.task;
    TimetableEntry {
        day: placement.slot.day(),
        period: placement.slot.period(),
        subject_id: task.subject_id.clone(),
        subject_name: task.subject_name.clone(),
        subject_code: task.subject_code.clone(),
        faculty_id: task.faculty_id.clone(),
        faculty_name: task.faculty_name.clone(),
        section_id: task.section_id.clone(),
        section_name: term.section_name(&task.section_id).to_string(),
        kind: task.kind,
    }
}
