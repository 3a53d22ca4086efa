//! Weekly class-timetable generation for academic departments.
//!
//! Places every theory and lab session of a term onto a 5-day × 8-period
//! grid so that no faculty member and no section is ever in two places at
//! once. Generation either returns a complete timetable or a typed error;
//! partial timetables are never produced.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Slot`, `TermInput`, `Task`,
//!   `FacultyCalendar`, `WeeklyAssignment`, `Timetable`
//! - **`scheduler`**: Task builder, constraint store, backtracking search,
//!   assembler, generator and KPIs
//! - **`validation`**: Input integrity checks (duplicate IDs, section refs)
//! - **`config`**: `GeneratorConfig` (node budget, daily soft cap, shuffle seed)
//! - **`error`**: `TimetableError`
//!
//! # Example
//!
//! ```
//! use u_timetable::models::{FacultyAssignment, Section, Subject, TermInput};
//! use u_timetable::{GeneratorConfig, TimetableGenerator};
//!
//! let term = TermInput::new("2024-even", "ECE-2023")
//!     .with_section(Section::new("A", "ECE A"))
//!     .with_section(Section::new("B", "ECE B"))
//!     .with_subject(
//!         Subject::new("SIG", "Signals and Systems")
//!             .with_assignment(FacultyAssignment::new("F7").with_sections(["A", "B"])),
//!     );
//!
//! let generator = TimetableGenerator::with_config(GeneratorConfig::default());
//! let timetable = generator.generate(&term).unwrap();
//! assert_eq!(timetable.faculty("F7").unwrap().entries.len(), 10);
//! ```
//!
//! # References
//!
//! - Schaerf (1999), "A Survey of Automated Timetabling"
//! - Russell & Norvig (2021), "Artificial Intelligence: A Modern Approach", Ch. 6

pub mod config;
pub mod error;
pub mod models;
pub mod scheduler;
pub mod validation;

pub use config::GeneratorConfig;
pub use error::TimetableError;
pub use scheduler::TimetableGenerator;
