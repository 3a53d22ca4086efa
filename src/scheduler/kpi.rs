//! Timetable quality metrics (KPIs).
//!
//! Computes indicators of how well a generated timetable spreads its
//! sessions. The generator does not optimize any of these; they are
//! reported so callers can compare seeds or spot crowded days.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Sessions | Placed sessions (section view) |
//! | Days used | Distinct days with a class, per section |
//! | Subject clustering | Max sessions of one subject, one section, one day |
//! | Soft-cap overruns | (section, subject, day) groups above the daily cap |
//! | Faculty idle periods | Free periods between a faculty's first and last class of a day |
//! | Faculty daily peak | Most sessions one faculty teaches on one day |

use std::collections::HashMap;

use crate::models::{Day, Timetable, DAYS_PER_WEEK};

/// Timetable quality indicators.
#[derive(Debug, Clone)]
pub struct TimetableKpi {
    /// Placed sessions.
    pub total_sessions: usize,
    /// Distinct teaching days per section.
    pub days_used_by_section: HashMap<String, usize>,
    /// Mean of `days_used_by_section` (0.0 if no sections).
    pub avg_days_per_section: f64,
    /// Largest per-(section, subject, day) session count.
    pub max_subject_sessions_per_day: usize,
    /// Per-(section, subject, day) groups exceeding the cap given to `calculate`.
    pub soft_cap_overruns: usize,
    /// Idle periods summed over all faculty and days.
    pub total_faculty_idle_periods: usize,
    /// Most sessions any faculty teaches on a single day.
    pub max_faculty_daily_load: usize,
}

impl TimetableKpi {
    /// Computes KPIs from a timetable.
    ///
    /// # Arguments
    /// * `timetable` - A generated timetable.
    /// * `max_subject_per_day` - The soft cap the overrun count is measured against.
    pub fn calculate(timetable: &Timetable, max_subject_per_day: u32) -> Self {
        let mut days_used_by_section = HashMap::new();
        let mut subject_day: HashMap<(&str, &str, Day), usize> = HashMap::new();

        for section in &timetable.section_schedules {
            let mut days = [false; DAYS_PER_WEEK];
            for e in &section.entries {
                days[e.day.index()] = true;
                *subject_day
                    .entry((e.section_id.as_str(), e.subject_id.as_str(), e.day))
                    .or_insert(0) += 1;
            }
            days_used_by_section.insert(
                section.section_id.clone(),
                days.iter().filter(|&&used| used).count(),
            );
        }

        let avg_days_per_section = if days_used_by_section.is_empty() {
            0.0
        } else {
            days_used_by_section.values().sum::<usize>() as f64
                / days_used_by_section.len() as f64
        };

        let max_subject_sessions_per_day = subject_day.values().copied().max().unwrap_or(0);
        let soft_cap_overruns = subject_day
            .values()
            .filter(|&&n| n > max_subject_per_day as usize)
            .count();

        let mut total_faculty_idle_periods = 0;
        let mut max_faculty_daily_load = 0;
        for faculty in &timetable.faculty_schedules {
            for day in Day::ALL {
                let periods: Vec<u8> = faculty
                    .entries
                    .iter()
                    .filter(|e| e.day == day)
                    .map(|e| e.period)
                    .collect();
                total_faculty_idle_periods += idle_periods(&periods);
                max_faculty_daily_load = max_faculty_daily_load.max(periods.len());
            }
        }

        Self {
            total_sessions: timetable.session_count(),
            days_used_by_section,
            avg_days_per_section,
            max_subject_sessions_per_day,
            soft_cap_overruns,
            total_faculty_idle_periods,
            max_faculty_daily_load,
        }
    }

    /// Whether no subject exceeds the daily soft cap anywhere.
    pub fn respects_soft_cap(&self) -> bool {
        self.soft_cap_overruns == 0
    }
}

/// Free periods strictly between the first and last class of one day.
///
/// Repeated periods count once.
fn idle_periods(periods: &[u8]) -> usize {
    let mut distinct = periods.to_vec();
    distinct.sort_unstable();
    distinct.dedup();
    match (distinct.first(), distinct.last()) {
        (Some(&first), Some(&last)) => (last - first + 1) as usize - distinct.len(),
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FacultySchedule, SearchStats, SectionSchedule, SessionKind, TimetableEntry};

    fn entry(day: Day, period: u8, subject: &str, faculty: &str, section: &str) -> TimetableEntry {
        TimetableEntry {
            day,
            period,
            subject_id: subject.into(),
            subject_name: String::new(),
            subject_code: String::new(),
            faculty_id: faculty.into(),
            faculty_name: String::new(),
            section_id: section.into(),
            section_name: String::new(),
            kind: SessionKind::Theory,
        }
    }

    fn timetable(entries: Vec<TimetableEntry>) -> Timetable {
        let mut faculty: Vec<FacultySchedule> = Vec::new();
        let mut sections: Vec<SectionSchedule> = Vec::new();
        for e in entries {
            match faculty.iter_mut().find(|f| f.faculty_id == e.faculty_id) {
                Some(f) => f.entries.push(e.clone()),
                None => faculty.push(FacultySchedule {
                    faculty_id: e.faculty_id.clone(),
                    faculty_name: String::new(),
                    entries: vec![e.clone()],
                }),
            }
            match sections.iter_mut().find(|s| s.section_id == e.section_id) {
                Some(s) => s.entries.push(e),
                None => sections.push(SectionSchedule {
                    section_id: e.section_id.clone(),
                    section_name: String::new(),
                    entries: vec![e],
                }),
            }
        }
        Timetable {
            term_id: "T1".into(),
            batch_id: "B1".into(),
            faculty_schedules: faculty,
            section_schedules: sections,
            stats: SearchStats::default(),
        }
    }

    #[test]
    fn test_kpi_basic() {
        let t = timetable(vec![
            entry(Day::Mon, 1, "S1", "F1", "A"),
            entry(Day::Tue, 1, "S1", "F1", "A"),
            entry(Day::Mon, 2, "S2", "F2", "B"),
        ]);

        let kpi = TimetableKpi::calculate(&t, 2);
        assert_eq!(kpi.total_sessions, 3);
        assert_eq!(kpi.days_used_by_section["A"], 2);
        assert_eq!(kpi.days_used_by_section["B"], 1);
        assert!((kpi.avg_days_per_section - 1.5).abs() < 1e-10);
        assert_eq!(kpi.max_subject_sessions_per_day, 1);
        assert!(kpi.respects_soft_cap());
    }

    #[test]
    fn test_kpi_soft_cap_overrun() {
        let t = timetable(vec![
            entry(Day::Wed, 1, "S1", "F1", "A"),
            entry(Day::Wed, 2, "S1", "F1", "A"),
            entry(Day::Wed, 3, "S1", "F1", "A"),
        ]);

        let kpi = TimetableKpi::calculate(&t, 2);
        assert_eq!(kpi.max_subject_sessions_per_day, 3);
        assert_eq!(kpi.soft_cap_overruns, 1);
        assert!(!kpi.respects_soft_cap());
        assert!(TimetableKpi::calculate(&t, 3).respects_soft_cap());
    }

    #[test]
    fn test_kpi_faculty_idle_periods() {
        // F1 on Thu: P1, P4, P5 → idle P2, P3
        let t = timetable(vec![
            entry(Day::Thu, 1, "S1", "F1", "A"),
            entry(Day::Thu, 4, "S2", "F1", "B"),
            entry(Day::Thu, 5, "S3", "F1", "C"),
            entry(Day::Fri, 8, "S1", "F1", "A"),
        ]);

        let kpi = TimetableKpi::calculate(&t, 2);
        assert_eq!(kpi.total_faculty_idle_periods, 2);
        assert_eq!(kpi.max_faculty_daily_load, 3);
    }

    #[test]
    fn test_kpi_empty() {
        let kpi = TimetableKpi::calculate(&timetable(vec![]), 2);
        assert_eq!(kpi.total_sessions, 0);
        assert!((kpi.avg_days_per_section - 0.0).abs() < 1e-10);
        assert_eq!(kpi.max_subject_sessions_per_day, 0);
        assert_eq!(kpi.total_faculty_idle_periods, 0);
    }

    #[test]
    fn test_idle_periods_helper() {
        assert_eq!(idle_periods(&[]), 0);
        assert_eq!(idle_periods(&[3]), 0);
        assert_eq!(idle_periods(&[8, 1]), 6);
    }

    #[test]
    fn test_kpi_tolerates_double_booked_input() {
        // A hand-edited timetable may list the same faculty twice in one period.
        let t = timetable(vec![
            entry(Day::Tue, 2, "S1", "F1", "A"),
            entry(Day::Tue, 2, "S2", "F1", "B"),
            entry(Day::Tue, 2, "S3", "F1", "C"),
        ]);

        let kpi = TimetableKpi::calculate(&t, 2);
        assert_eq!(kpi.total_faculty_idle_periods, 0);
        assert_eq!(kpi.max_faculty_daily_load, 3);
        assert_eq!(idle_periods(&[2, 2, 4]), 1);
    }
}
