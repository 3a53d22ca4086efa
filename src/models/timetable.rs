//! Timetable output document.
//!
//! The denormalized views handed to the persistence/UI side: one
//! schedule per faculty member and one per section, each a list of
//! entries ordered by (day, period). Both views are projections of the
//! same placements, so together they hold every placed session twice.
//!
//! Serializes to camelCase JSON. Collections are `Vec`s in a fixed
//! order, so two identical generations serialize byte-identically.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Day, SessionKind, Slot, PERIODS_PER_DAY};

/// One placed session as seen from a faculty or section schedule.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimetableEntry {
    pub day: Day,
    pub period: u8,
    pub subject_id: String,
    pub subject_name: String,
    pub subject_code: String,
    pub faculty_id: String,
    pub faculty_name: String,
    pub section_id: String,
    pub section_name: String,
    pub kind: SessionKind,
}

/// Weekly schedule of one faculty member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacultySchedule {
    pub faculty_id: String,
    pub faculty_name: String,
    pub entries: Vec<TimetableEntry>,
}

/// Weekly schedule of one section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionSchedule {
    pub section_id: String,
    pub section_name: String,
    pub entries: Vec<TimetableEntry>,
}

/// Search effort counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchStats {
    /// Recursive search calls made.
    pub nodes_visited: u64,
    /// Candidate slots undone after a failed subtree.
    pub backtracks: u64,
    /// Deepest search level reached (= tasks placed at once).
    pub max_depth: usize,
}

/// A generated weekly timetable for one term of one batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timetable {
    pub term_id: String,
    pub batch_id: String,
    pub faculty_schedules: Vec<FacultySchedule>,
    pub section_schedules: Vec<SectionSchedule>,
    pub stats: SearchStats,
}

/// One cell of a rendered week grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridCell<'a> {
    /// Nothing scheduled.
    Free,
    /// A scheduled session.
    Session(&'a TimetableEntry),
}

/// A full days × periods view over a schedule's entries.
///
/// `Display` renders a plain-text table, one row per day.
#[derive(Clone)]
pub struct WeekGrid<'a> {
    title: String,
    cells: Vec<GridCell<'a>>,
    label: fn(&TimetableEntry) -> String,
}

impl TimetableEntry {
    /// The entry's slot, if `period` is on the grid.
    pub fn slot(&self) -> Option<Slot> {
        Slot::new(self.day, self.period)
    }
}

impl FacultySchedule {
    /// Full week grid labelled with subject code and section.
    pub fn grid(&self) -> WeekGrid<'_> {
        WeekGrid::new(
            format!("Faculty {}", display_name(&self.faculty_name, &self.faculty_id)),
            &self.entries,
            |e| {
                format!(
                    "{} {} ({})",
                    subject_label(e),
                    display_name(&e.section_name, &e.section_id),
                    kind_tag(e.kind)
                )
            },
        )
    }
}

impl SectionSchedule {
    /// Full week grid labelled with subject code and faculty.
    pub fn grid(&self) -> WeekGrid<'_> {
        WeekGrid::new(
            format!("Section {}", display_name(&self.section_name, &self.section_id)),
            &self.entries,
            |e| {
                format!(
                    "{} {} ({})",
                    subject_label(e),
                    display_name(&e.faculty_name, &e.faculty_id),
                    kind_tag(e.kind)
                )
            },
        )
    }
}

impl Timetable {
    /// Faculty schedule by ID.
    pub fn faculty(&self, faculty_id: &str) -> Option<&FacultySchedule> {
        self.faculty_schedules
            .iter()
            .find(|f| f.faculty_id == faculty_id)
    }

    /// Section schedule by ID.
    pub fn section(&self, section_id: &str) -> Option<&SectionSchedule> {
        self.section_schedules
            .iter()
            .find(|s| s.section_id == section_id)
    }

    /// Sessions across all section schedules.
    pub fn session_count(&self) -> usize {
        self.section_schedules.iter().map(|s| s.entries.len()).sum()
    }
}

impl<'a> WeekGrid<'a> {
    fn new(
        title: String,
        entries: &'a [TimetableEntry],
        label: fn(&TimetableEntry) -> String,
    ) -> Self {
        let mut cells = vec![GridCell::Free; Slot::week().count()];
        for entry in entries {
            if let Some(slot) = entry.slot() {
                cells[slot.index()] = GridCell::Session(entry);
            }
        }
        Self { title, cells, label }
    }

    /// Cell at a slot.
    pub fn cell(&self, slot: Slot) -> GridCell<'a> {
        self.cells[slot.index()]
    }

    /// Number of free cells.
    pub fn free_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|c| matches!(c, GridCell::Free))
            .count()
    }
}

impl fmt::Display for WeekGrid<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        write!(f, "{:<4}", "")?;
        for period in 1..=PERIODS_PER_DAY {
            write!(f, " | P{period}")?;
        }
        writeln!(f)?;

        for slot in Slot::week() {
            if slot.period() == 1 {
                write!(f, "{:<4}", slot.day())?;
            }
            match self.cell(slot) {
                GridCell::Free => write!(f, " | free")?,
                GridCell::Session(entry) => write!(f, " | {}", (self.label)(entry))?,
            }
            if slot.period() == PERIODS_PER_DAY {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

fn display_name<'a>(name: &'a str, id: &'a str) -> &'a str {
    if name.is_empty() {
        id
    } else {
        name
    }
}

fn subject_label(entry: &TimetableEntry) -> &str {
    if entry.subject_code.is_empty() {
        display_name(&entry.subject_name, &entry.subject_id)
    } else {
        &entry.subject_code
    }
}

fn kind_tag(kind: SessionKind) -> &'static str {
    match kind {
        SessionKind::Theory => "T",
        SessionKind::Lab => "L",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(day: Day, period: u8, kind: SessionKind) -> TimetableEntry {
        TimetableEntry {
            day,
            period,
            subject_id: "S1".into(),
            subject_name: "Compilers".into(),
            subject_code: "CS402".into(),
            faculty_id: "F1".into(),
            faculty_name: "Dr. Menon".into(),
            section_id: "A".into(),
            section_name: "Section A".into(),
            kind,
        }
    }

    fn sample_section() -> SectionSchedule {
        SectionSchedule {
            section_id: "A".into(),
            section_name: "Section A".into(),
            entries: vec![
                entry(Day::Mon, 1, SessionKind::Theory),
                entry(Day::Wed, 4, SessionKind::Lab),
            ],
        }
    }

    #[test]
    fn test_grid_cells() {
        let section = sample_section();
        let grid = section.grid();

        assert_eq!(grid.free_count(), 38);
        let mon1 = Slot::new(Day::Mon, 1).unwrap();
        assert!(matches!(grid.cell(mon1), GridCell::Session(e) if e.kind == SessionKind::Theory));
        let fri8 = Slot::new(Day::Fri, 8).unwrap();
        assert_eq!(grid.cell(fri8), GridCell::Free);
    }

    #[test]
    fn test_grid_display() {
        let section = sample_section();
        let rendered = section.grid().to_string();
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines.len(), 7); // title + header + 5 days
        assert_eq!(lines[0], "Section Section A");
        assert!(lines[2].starts_with("Mon"));
        assert!(lines[2].contains("CS402 Dr. Menon (T)"));
        assert!(lines[4].contains("CS402 Dr. Menon (L)"));
        assert_eq!(lines[6].matches("free").count(), 8);
    }

    #[test]
    fn test_faculty_grid_labels_section() {
        let faculty = FacultySchedule {
            faculty_id: "F1".into(),
            faculty_name: String::new(),
            entries: vec![entry(Day::Tue, 2, SessionKind::Lab)],
        };
        let rendered = faculty.grid().to_string();
        assert!(rendered.starts_with("Faculty F1"));
        assert!(rendered.contains("CS402 Section A (L)"));
    }

    #[test]
    fn test_timetable_lookup_and_json() {
        let timetable = Timetable {
            term_id: "T1".into(),
            batch_id: "B1".into(),
            faculty_schedules: vec![],
            section_schedules: vec![sample_section()],
            stats: SearchStats::default(),
        };

        assert_eq!(timetable.session_count(), 2);
        assert!(timetable.section("A").is_some());
        assert!(timetable.faculty("F1").is_none());

        let json = serde_json::to_string(&timetable).unwrap();
        assert!(json.contains("\"sectionSchedules\""));
        assert!(json.contains("\"kind\":\"lab\""));
        let back: Timetable = serde_json::from_str(&json).unwrap();
        assert_eq!(back, timetable);
    }
}
