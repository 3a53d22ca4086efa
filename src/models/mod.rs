//! Timetabling domain models.
//!
//! Provides the data types for describing a term's teaching load and
//! the generated weekly timetable.
//!
//! # Domain Mappings
//!
//! | u-timetable | Scheduling term | Meaning |
//! |-------------|-----------------|---------|
//! | Slot | Time bucket | One (day, period) cell of the week |
//! | Task | Activity | One class session to place |
//! | Faculty | Resource | Teacher, one session per slot |
//! | Section | Resource | Student group, one session per slot |
//! | Timetable | Schedule | Per-faculty and per-section views |

mod assignment;
mod calendar;
mod input;
mod slot;
mod task;
mod timetable;

pub use assignment::{Clash, Placement, WeeklyAssignment};
pub use calendar::FacultyCalendar;
pub use input::{FacultyAssignment, Section, Subject, TermInput};
pub use slot::{Day, Slot, DAYS_PER_WEEK, PERIODS_PER_DAY, SLOTS_PER_WEEK};
pub use task::{SessionKind, Task, LAB_SESSIONS, SESSIONS_PER_WEEK, THEORY_SESSIONS};
pub use timetable::{
    FacultySchedule, GridCell, SearchStats, SectionSchedule, Timetable, TimetableEntry, WeekGrid,
};
