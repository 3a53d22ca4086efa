//! Term input records.
//!
//! These are the records supplied by the academic-records side: a term
//! of one batch, the batch's section roster, and the subjects taught in
//! the term with their faculty assignments. The generator treats them as
//! read-only input.
//!
//! All records deserialize from camelCase JSON so they can be fed
//! straight from a document store export.

use serde::{Deserialize, Serialize};

/// A section of a batch (e.g. "A", "B").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    /// Unique section identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
}

/// One faculty member teaching a subject to a set of sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacultyAssignment {
    /// Faculty identifier.
    pub faculty_id: String,
    /// Faculty display name.
    #[serde(default)]
    pub faculty_name: String,
    /// Sections this faculty teaches the subject to.
    pub section_ids: Vec<String>,
}

/// A subject taught during the term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    /// Unique subject identifier.
    pub id: String,
    /// Subject name.
    pub name: String,
    /// Catalogue code (e.g. "CS101").
    #[serde(default)]
    pub code: String,
    /// Who teaches this subject to which sections.
    #[serde(default)]
    pub faculty_assignments: Vec<FacultyAssignment>,
}

/// Everything needed to generate one batch's weekly timetable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TermInput {
    /// Term identifier.
    pub term_id: String,
    /// Batch identifier.
    pub batch_id: String,
    /// The batch's section roster.
    pub sections: Vec<Section>,
    /// Subjects with their faculty assignments.
    #[serde(default)]
    pub subjects: Vec<Subject>,
}

impl Section {
    /// Creates a section.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

impl FacultyAssignment {
    /// Creates an assignment with no sections.
    pub fn new(faculty_id: impl Into<String>) -> Self {
        Self {
            faculty_id: faculty_id.into(),
            faculty_name: String::new(),
            section_ids: Vec::new(),
        }
    }

    /// Sets the faculty display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.faculty_name = name.into();
        self
    }

    /// Adds a section.
    pub fn with_section(mut self, section_id: impl Into<String>) -> Self {
        self.section_ids.push(section_id.into());
        self
    }

    /// Adds several sections.
    pub fn with_sections<I, S>(mut self, section_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.section_ids
            .extend(section_ids.into_iter().map(Into::into));
        self
    }
}

impl Subject {
    /// Creates a subject with no assignments.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            code: String::new(),
            faculty_assignments: Vec::new(),
        }
    }

    /// Sets the catalogue code.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    /// Adds a faculty assignment.
    pub fn with_assignment(mut self, assignment: FacultyAssignment) -> Self {
        self.faculty_assignments.push(assignment);
        self
    }
}

impl TermInput {
    /// Creates an empty term for a batch.
    pub fn new(term_id: impl Into<String>, batch_id: impl Into<String>) -> Self {
        Self {
            term_id: term_id.into(),
            batch_id: batch_id.into(),
            sections: Vec::new(),
            subjects: Vec::new(),
        }
    }

    /// Adds a section to the roster.
    pub fn with_section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    /// Adds a subject.
    pub fn with_subject(mut self, subject: Subject) -> Self {
        self.subjects.push(subject);
        self
    }

    /// Looks up a section by ID.
    pub fn section(&self, section_id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == section_id)
    }

    /// Display name of a section, empty if unknown.
    pub fn section_name(&self, section_id: &str) -> &str {
        self.section(section_id).map_or("", |s| s.name.as_str())
    }

    /// Number of (subject, faculty, section) teaching triples.
    pub fn teaching_triples(&self) -> usize {
        self.subjects
            .iter()
            .flat_map(|s| &s.faculty_assignments)
            .map(|fa| fa.section_ids.len())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_term_builder() {
        let term = TermInput::new("T1", "B1")
            .with_section(Section::new("A", "Section A"))
            .with_section(Section::new("B", "Section B"))
            .with_subject(
                Subject::new("S1", "Algorithms")
                    .with_code("CS201")
                    .with_assignment(
                        FacultyAssignment::new("F1")
                            .with_name("Dr. Rao")
                            .with_sections(["A", "B"]),
                    ),
            );

        assert_eq!(term.sections.len(), 2);
        assert_eq!(term.section_name("B"), "Section B");
        assert_eq!(term.section_name("Z"), "");
        assert_eq!(term.teaching_triples(), 2);
        assert_eq!(term.subjects[0].code, "CS201");
    }

    #[test]
    fn test_deserialize_camel_case() {
        let json = r#"{
            "termId": "T1",
            "batchId": "B1",
            "sections": [{ "id": "A", "name": "A" }],
            "subjects": [{
                "id": "S1",
                "name": "Networks",
                "facultyAssignments": [{ "facultyId": "F1", "sectionIds": ["A"] }]
            }]
        }"#;

        let term: TermInput = serde_json::from_str(json).unwrap();
        assert_eq!(term.term_id, "T1");
        assert_eq!(term.subjects[0].code, "");
        assert_eq!(term.subjects[0].faculty_assignments[0].faculty_name, "");
        assert_eq!(term.teaching_triples(), 1);
    }
}
