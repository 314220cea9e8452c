use robonav_core::{Direction, Grid, MapError, MapSpec, Point, manhattan};

use crate::error::Result;
use crate::outcome::Step;
use crate::space::SearchSpace;

/// Which way [`Agent::trace_path`] emits moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceOrder {
    /// Root to cell: the moves that walk the recorded path forwards.
    Backward,
    /// Cell to root: the moves that walk from the cell back along its parent
    /// links. Used for the goal-side half of a bidirectional path.
    Forward,
}

/// A start position and a set of goals on a grid.
///
/// The goal list is fixed at construction. Multi-goal searches track the
/// goals they still need in their own state.
#[derive(Debug, Clone)]
pub struct Agent<'g> {
    grid: &'g Grid,
    start: Point,
    goals: Vec<Point>,
    can_jump: bool,
}

impl<'g> Agent<'g> {
    /// Create an agent at `start`.
    ///
    /// Every coordinate must lie inside the grid and at least one goal is
    /// required. Repeated goals are kept once, at their first position.
    pub fn new(grid: &'g Grid, start: Point, goals: &[Point], can_jump: bool) -> Result<Self> {
        check_in_bounds(grid, "agent start", start)?;
        let mut unique = Vec::with_capacity(goals.len());
        for &g in goals {
            check_in_bounds(grid, "goal", g)?;
            if !unique.contains(&g) {
                unique.push(g);
            }
        }
        if unique.is_empty() {
            return Err(MapError::NoGoals.into());
        }
        Ok(Self {
            grid,
            start,
            goals: unique,
            can_jump,
        })
    }

    /// Create an agent from a parsed map file, on a grid built from it.
    pub fn from_map(grid: &'g Grid, spec: &MapSpec, can_jump: bool) -> Result<Self> {
        Self::new(grid, spec.start, &spec.goals, can_jump)
    }

    #[inline]
    pub fn grid(&self) -> &'g Grid {
        self.grid
    }

    #[inline]
    pub fn start(&self) -> Point {
        self.start
    }

    #[inline]
    pub fn goals(&self) -> &[Point] {
        &self.goals
    }

    /// Whether the agent may move several cells in one step.
    #[inline]
    pub fn can_jump(&self) -> bool {
        self.can_jump
    }

    /// The goal closest to the start by Manhattan distance. Ties go to the
    /// goal listed first.
    pub fn nearest_goal(&self) -> Point {
        // `new` guarantees at least one goal.
        nearest(self.start, &self.goals).unwrap_or(self.start)
    }

    /// The goal among `remaining` closest to `from`, first one on ties.
    /// Multi-goal searches call this with the goals they still need.
    pub fn nearest_goal_from(&self, from: Point, remaining: &[Point]) -> Option<Point> {
        nearest(from, remaining)
    }

    /// The move from `from` to `to`, with a distance suffix when the agent
    /// can jump.
    pub fn step(&self, from: Point, to: Point) -> Step {
        let dir = Direction::between(from, to);
        if self.can_jump {
            Step::jump(dir, manhattan(from, to))
        } else {
            Step::walk(dir)
        }
    }

    /// Follow parent links from `cell` to the root of its search tree,
    /// emitting one move per link.
    pub fn trace_path(&self, space: &SearchSpace, cell: Point, order: TraceOrder) -> Vec<Step> {
        let mut path = Vec::new();
        let Some(mut ci) = space.idx(cell) else {
            return path;
        };
        while let Some(pi) = space.parent(ci) {
            let (c, p) = (space.point(ci), space.point(pi));
            path.push(match order {
                TraceOrder::Backward => self.step(p, c),
                TraceOrder::Forward => self.step(c, p),
            });
            ci = pi;
            debug_assert!(path.len() <= space.nodes.len(), "parent links form a cycle");
        }
        if order == TraceOrder::Backward {
            path.reverse();
        }
        path
    }
}

/// The candidate closest to `from` by Manhattan distance, first one on ties.
fn nearest(from: Point, candidates: &[Point]) -> Option<Point> {
    // min_by_key keeps the last minimum; scan manually to keep the first.
    let mut best: Option<(i32, Point)> = None;
    for &c in candidates {
        let d = manhattan(from, c);
        if best.is_none_or(|(bd, _)| d < bd) {
            best = Some((d, c));
        }
    }
    best.map(|(_, c)| c)
}

fn check_in_bounds(grid: &Grid, what: &'static str, point: Point) -> Result<()> {
    if grid.contains(point) {
        Ok(())
    } else {
        Err(MapError::OutOfBounds {
            what,
            point,
            width: grid.width(),
            height: grid.height(),
        }
        .into())
    }
}
