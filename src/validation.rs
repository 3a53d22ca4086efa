//! Input validation for timetable generation.
//!
//! Checks structural integrity of a term before any task is built.
//! Detects:
//! - Duplicate section or subject IDs
//! - Subjects with no faculty assignment
//! - Faculty assignments with no sections
//! - Section references missing from the batch roster
//! - An empty roster for a term that has teaching load
//!
//! All problems are collected, not just the first, so the caller can fix
//! the input in one pass.

use crate::models::TermInput;
use std::collections::HashSet;
use std::fmt;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two sections or two subjects share the same ID.
    DuplicateId,
    /// A subject has no faculty assignment.
    MissingFacultyAssignment,
    /// A faculty assignment lists no sections.
    EmptySectionList,
    /// A faculty assignment references a section not in the roster.
    UnknownSection,
    /// The roster is empty but subjects are listed.
    EmptyRoster,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Validates a term's input records.
///
/// Checks:
/// 1. No duplicate section IDs
/// 2. No duplicate subject IDs
/// 3. Roster is non-empty when subjects exist
/// 4. Every subject has at least one faculty assignment
/// 5. Every faculty assignment lists at least one section
/// 6. Every listed section exists in the roster
/// 7. A subject is taught to each section at most once
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(term: &TermInput) -> ValidationResult {
    let mut errors = Vec::new();

    let mut section_ids = HashSet::new();
    for section in &term.sections {
        if !section_ids.insert(section.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate section ID: {}", section.id),
            ));
        }
    }

    if term.sections.is_empty() && !term.subjects.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyRoster,
            format!("Batch '{}' has no sections", term.batch_id),
        ));
    }

    let mut subject_ids = HashSet::new();
    for subject in &term.subjects {
        if !subject_ids.insert(subject.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate subject ID: {}", subject.id),
            ));
        }

        if subject.faculty_assignments.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::MissingFacultyAssignment,
                format!("Subject '{}' has no faculty assigned", subject.id),
            ));
        }

        let mut taught = HashSet::new();
        for fa in &subject.faculty_assignments {
            if fa.section_ids.is_empty() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::EmptySectionList,
                    format!(
                        "Faculty '{}' is assigned to subject '{}' without sections",
                        fa.faculty_id, subject.id
                    ),
                ));
            }

            for section_id in &fa.section_ids {
                if !taught.insert(section_id.as_str()) {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::DuplicateId,
                        format!(
                            "Subject '{}' is assigned to section '{}' more than once",
                            subject.id, section_id
                        ),
                    ));
                }
                if !section_ids.contains(section_id.as_str()) {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::UnknownSection,
                        format!(
                            "Subject '{}' (faculty '{}') references unknown section '{}'",
                            subject.id, fa.faculty_id, section_id
                        ),
                    ));
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
