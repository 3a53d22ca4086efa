//! Timetable generation and KPI evaluation.
//!
//! # Pipeline
//!
//! `tasks` expands assignment records into session tasks, `search` runs a
//! pre-flight capacity check and MRV backtracking over a bitmask
//! `ConstraintStore`, and `assemble` projects the result into faculty and
//! section views. `TimetableGenerator` drives the whole pipeline for one
//! term or a department of terms.
//!
//! # KPI
//!
//! `TimetableKpi` reports days used, idle gaps and same-day subject
//! clustering of a finished timetable.
//!
//! # References
//!
//! - Russell & Norvig (2021), "Artificial Intelligence: A Modern Approach", Ch. 6
//! - Schaerf (1999), "A Survey of Automated Timetabling"

mod assemble;
mod generator;
mod kpi;
mod search;
mod store;
mod tasks;

pub use assemble::assemble;
pub use generator::TimetableGenerator;
pub use kpi::TimetableKpi;
pub use search::{preflight, BacktrackingSearch, CancellationToken, SearchState};
pub use store::{ConstraintStore, TaskKey};
pub use tasks::{build_tasks, expected_task_count};
