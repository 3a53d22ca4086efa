//! Session task model.
//!
//! A task is one required class session awaiting placement: a subject,
//! taught as theory or lab, by one faculty member, to one section.
//! Tasks carry no identity beyond their attributes. Identical tasks
//! (e.g. the three theory sessions of one subject for one section) are
//! interchangeable.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Theory sessions per (subject, faculty, section) triple per week.
pub const THEORY_SESSIONS: usize = 3;

/// Lab sessions per (subject, faculty, section) triple per week.
pub const LAB_SESSIONS: usize = 2;

/// Total weekly sessions per teaching triple.
pub const SESSIONS_PER_WEEK: usize = THEORY_SESSIONS + LAB_SESSIONS;

/// Session kind.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum SessionKind {
    Theory,
    Lab,
}

impl SessionKind {
    /// Lowercase name, as stored by the timetable collaborator.
    pub fn as_str(self) -> &'static str {
        match self {
            SessionKind::Theory => "theory",
            SessionKind::Lab => "lab",
        }
    }
}

impl fmt::Display for SessionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One class session to be placed in the weekly grid.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Subject identifier.
    pub subject_id: String,
    /// Subject display name.
    pub subject_name: String,
    /// Subject catalogue code.
    pub subject_code: String,
    /// Theory or lab.
    pub kind: SessionKind,
    /// Teaching faculty.
    pub faculty_id: String,
    /// Faculty display name.
    pub faculty_name: String,
    /// Receiving section.
    pub section_id: String,
}

impl Task {
    /// Creates a task with empty display names.
    pub fn new(
        subject_id: impl Into<String>,
        kind: SessionKind,
        faculty_id: impl Into<String>,
        section_id: impl Into<String>,
    ) -> Self {
        Self {
            subject_id: subject_id.into(),
            subject_name: String::new(),
            subject_code: String::new(),
            kind,
            faculty_id: faculty_id.into(),
            faculty_name: String::new(),
            section_id: section_id.into(),
        }
    }

    /// Sets the subject display name and code.
    pub fn with_subject_label(mut self, name: impl Into<String>, code: impl Into<String>) -> Self {
        self.subject_name = name.into();
        self.subject_code = code.into();
        self
    }

    /// Sets the faculty display name.
    pub fn with_faculty_name(mut self, name: impl Into<String>) -> Self {
        self.faculty_name = name.into();
        self
    }

    /// Whether this task conflicts with `other` when placed in the same slot.
    ///
    /// Two sessions clash if they share a faculty member or a section.
    pub fn clashes_with(&self, other: &Task) -> bool {
        self.faculty_id == other.faculty_id || self.section_id == other.section_id
    }
}
