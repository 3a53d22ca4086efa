//! Weekly slot grid.
//!
//! The scheduling universe is a fixed grid of five teaching days with
//! eight periods each. A [`Slot`] is one cell of that grid. Slots are
//! plain `Copy` values used as lookup keys; the grid never changes at
//! runtime.
//!
//! # Indexing
//! Every slot has a dense index in `0..SLOTS_PER_WEEK`, day-major:
//! `Mon P1 = 0`, `Mon P8 = 7`, `Tue P1 = 8`, ..., `Fri P8 = 39`.
//! The constraint store keys its bitmasks on this index.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Teaching days per week.
pub const DAYS_PER_WEEK: usize = 5;

/// Periods per teaching day.
pub const PERIODS_PER_DAY: u8 = 8;

/// Total slots in the weekly grid.
pub const SLOTS_PER_WEEK: usize = DAYS_PER_WEEK * PERIODS_PER_DAY as usize;

/// A teaching day.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Day {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
}

impl Day {
    /// All teaching days in week order.
    pub const ALL: [Day; DAYS_PER_WEEK] = [Day::Mon, Day::Tue, Day::Wed, Day::Thu, Day::Fri];

    /// Zero-based position in the week.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Day at a zero-based position, if any.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Short display name ("Mon", "Tue", ...).
    pub fn as_str(self) -> &'static str {
        match self {
            Day::Mon => "Mon",
            Day::Tue => "Tue",
            Day::Wed => "Wed",
            Day::Thu => "Thu",
            Day::Fri => "Fri",
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// One (day, period) cell of the weekly grid.
///
/// Periods are 1-based (`1..=PERIODS_PER_DAY`). Construction is checked,
/// so every `Slot` value lies on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Slot {
    day: Day,
    period: u8,
}

impl Slot {
    /// Creates a slot, or `None` if `period` is off the grid.
    pub fn new(day: Day, period: u8) -> Option<Self> {
        (1..=PERIODS_PER_DAY)
            .contains(&period)
            .then_some(Self { day, period })
    }

    /// Slot at a dense grid index, or `None` if out of range.
    pub fn from_index(index: usize) -> Option<Self> {
        let day = Day::from_index(index / PERIODS_PER_DAY as usize)?;
        let period = (index % PERIODS_PER_DAY as usize) as u8 + 1;
        Some(Self { day, period })
    }

    /// Teaching day.
    #[inline]
    pub fn day(&self) -> Day {
        self.day
    }

    /// 1-based period within the day.
    #[inline]
    pub fn period(&self) -> u8 {
        self.period
    }

    /// Dense grid index (day-major).
    #[inline]
    pub fn index(&self) -> usize {
        self.day.index() * PERIODS_PER_DAY as usize + (self.period - 1) as usize
    }

    /// Single-bit mask for this slot, used by occupancy bitsets.
    #[inline]
    pub(crate) fn mask(&self) -> u64 {
        1u64 << self.index()
    }

    /// Iterates the whole week in grid order.
    pub fn week() -> impl Iterator<Item = Slot> {
        (0..SLOTS_PER_WEEK).filter_map(Slot::from_index)
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} P{}", self.day, self.period)
    }
}
