use robonav_core::{Point, manhattan};

use crate::agent::{Agent, TraceOrder};
use crate::algorithm::Reached;
use crate::frontier::Frontier;
use crate::outcome::SearchOutcome;
use crate::space::SearchSpace;

/// Frontier ordering of a best-first search.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum Priority {
    /// `g + h`, with relaxation of cheaper paths (A*).
    Cost,
    /// `h` alone, first discovery wins (greedy).
    Heuristic,
}

impl Priority {
    #[inline]
    pub(crate) fn key(self, g: i32, h: i32) -> i32 {
        match self {
            Priority::Cost => g + h,
            Priority::Heuristic => h,
        }
    }
}

impl SearchSpace {
    /// A* search to the first goal.
    ///
    /// The heuristic is the Manhattan distance to the goal nearest the start;
    /// that target is fixed for the whole run. Reaching any other goal first
    /// also ends the search.
    pub fn astar(&mut self, agent: &Agent<'_>) -> SearchOutcome {
        self.first_goal(agent, |s, a, o, g, v| {
            s.best_first_leg(a, o, g, v, Priority::Cost)
        })
    }

    /// A* through every goal, re-targeting the nearest remaining goal after
    /// each one reached.
    pub fn astar_all(&mut self, agent: &Agent<'_>) -> SearchOutcome {
        self.all_goals(agent, |s, a, o, g, v| {
            s.best_first_leg(a, o, g, v, Priority::Cost)
        })
    }

    pub(crate) fn best_first_leg(
        &mut self,
        agent: &Agent<'_>,
        origin: Point,
        goals: &[Point],
        visited: &mut usize,
        priority: Priority,
    ) -> Option<Reached> {
        self.reset();
        let root = self.idx(origin)?;
        let target = agent.nearest_goal_from(origin, goals)?;
        let h = manhattan(origin, target);
        self.touch(root).h = h;

        let grid = agent.grid();
        let mut open = Frontier::new();
        open.push(root, priority.key(0, h));
        let mut nbuf = std::mem::take(&mut self.nbuf);
        let mut reached = None;

        while let Some(ci) = open.pop() {
            let cp = self.point(ci);
            let node = self.touch(ci);
            node.closed = true;
            let g = node.g;
            if goals.contains(&cp) {
                reached = Some(cp);
                break;
            }

            nbuf.clear();
            grid.neighbors(cp, agent.can_jump(), &mut nbuf);
            for &np in nbuf.iter() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                if grid.is_blocked(np) || self.is_closed(ni) {
                    continue;
                }
                let tentative = g + 1;
                if !self.is_seen(ni) {
                    *visited += 1;
                    let h = manhattan(np, target);
                    let n = self.touch(ni);
                    n.g = tentative;
                    n.h = h;
                    n.parent = ci;
                    open.push(ni, priority.key(tentative, h));
                } else if priority == Priority::Cost && tentative < self.touch(ni).g {
                    let n = self.touch(ni);
                    n.g = tentative;
                    n.parent = ci;
                    open.push(ni, n.f());
                }
            }
        }

        self.nbuf = nbuf;
        let goal = reached?;
        Some(Reached {
            goal,
            path: agent.trace_path(self, goal, TraceOrder::Backward),
        })
    }
}
