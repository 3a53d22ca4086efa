//! Error types for timetable generation.

use thiserror::Error;

use crate::models::SearchStats;
use crate::validation::ValidationError;

/// Why a search stopped without a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortReason {
    /// The configured node budget ran out.
    BudgetExhausted,
    /// The caller cancelled the search.
    Cancelled,
}

/// Timetable generation failure.
///
/// No variant ever carries a partial timetable.
#[derive(Debug, Error)]
pub enum TimetableError {
    /// Malformed or incomplete input. The search never started.
    #[error("invalid input: {}", join_messages(.0))]
    Validation(Vec<ValidationError>),

    /// A necessary slot-count condition failed before search.
    #[error("not enough total slots: required {required}, available {available}")]
    CapacityExceeded { required: usize, available: usize },

    /// The search exhausted every branch. Provably no timetable exists.
    #[error("no valid assignment found after exhausting all branches")]
    Infeasible { stats: SearchStats },

    /// The search stopped early. Feasibility is unknown.
    #[error("search aborted ({reason:?}) after {} nodes", .stats.nodes_visited)]
    SearchAborted {
        reason: AbortReason,
        stats: SearchStats,
    },

    /// A term of a multi-term request failed.
    #[error("term '{term_id}': {source}")]
    Term {
        term_id: String,
        #[source]
        source: Box<TimetableError>,
    },
}

impl TimetableError {
    /// Search counters, if a search actually ran.
    ///
    /// `None` for failures detected before search (validation, capacity).
    pub fn stats(&self) -> Option<&SearchStats> {
        match self {
            TimetableError::Infeasible { stats } | TimetableError::SearchAborted { stats, .. } => {
                Some(stats)
            }
            TimetableError::Term { source, .. } => source.stats(),
            TimetableError::Validation(_) | TimetableError::CapacityExceeded { .. } => None,
        }
    }

    /// The innermost error, unwrapping [`TimetableError::Term`].
    pub fn root(&self) -> &TimetableError {
        match self {
            TimetableError::Term { source, .. } => source.root(),
            other => other,
        }
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
