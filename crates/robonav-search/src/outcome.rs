use std::fmt;

use robonav_core::{Direction, Point};

/// One move along a path.
///
/// `distance` is only recorded for jump-capable agents; it then appears as a
/// suffix in the token (`up_3`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Step {
    pub direction: Direction,
    pub distance: Option<i32>,
}

impl Step {
    /// A single-cell move without a distance suffix.
    pub const fn walk(direction: Direction) -> Self {
        Self {
            direction,
            distance: None,
        }
    }

    /// A move of `distance` cells, printed with its suffix.
    pub const fn jump(direction: Direction, distance: i32) -> Self {
        Self {
            direction,
            distance: Some(distance),
        }
    }

    /// Number of cells covered by this move.
    pub fn cells(&self) -> i32 {
        self.distance.unwrap_or(1)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.distance {
            Some(d) => write!(f, "{}_{}", self.direction, d),
            None => write!(f, "{}", self.direction),
        }
    }
}

/// Whether a search stops at the first goal or visits them all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    FirstGoal,
    AllGoals,
}

/// A successful search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Found {
    /// Moves from the start, in order. In all-goals mode this is the
    /// concatenation of every leg.
    pub path: Vec<Step>,
    /// Goals reached, in visiting order. Holds exactly one goal in
    /// single-goal mode.
    pub goals: Vec<Point>,
    /// The start cell plus every cell newly added to a frontier.
    pub visited: usize,
}

impl Found {
    /// The last goal reached.
    pub fn goal(&self) -> Option<Point> {
        self.goals.last().copied()
    }
}

/// Result of one search call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Found(Found),
    /// The frontier emptied, or a resource ceiling was hit, before the
    /// required goals were reached.
    Exhausted { visited: usize },
}

impl SearchOutcome {
    pub fn visited(&self) -> usize {
        match self {
            SearchOutcome::Found(f) => f.visited,
            SearchOutcome::Exhausted { visited } => *visited,
        }
    }

    pub fn found(&self) -> Option<&Found> {
        match self {
            SearchOutcome::Found(f) => Some(f),
            SearchOutcome::Exhausted { .. } => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, SearchOutcome::Found(_))
    }
}
