use robonav_core::{Point, manhattan};

use crate::agent::{Agent, TraceOrder};
use crate::algorithm::Reached;
use crate::outcome::SearchOutcome;
use crate::space::SearchSpace;

impl SearchSpace {
    /// Beam search to the first goal.
    ///
    /// After every expansion the open list is sorted by `g + h` and cut to
    /// `width` cells. Cells cut off are closed for the rest of the run, so
    /// the search may miss reachable goals.
    pub fn beam(&mut self, agent: &Agent<'_>, width: usize) -> SearchOutcome {
        self.first_goal(agent, |s, a, o, g, v| s.beam_leg(a, o, g, v, width))
    }

    /// Beam search through every goal.
    pub fn beam_all(&mut self, agent: &Agent<'_>, width: usize) -> SearchOutcome {
        self.all_goals(agent, |s, a, o, g, v| s.beam_leg(a, o, g, v, width))
    }

    fn beam_leg(
        &mut self,
        agent: &Agent<'_>,
        origin: Point,
        goals: &[Point],
        visited: &mut usize,
        width: usize,
    ) -> Option<Reached> {
        self.reset();
        let root = self.idx(origin)?;
        let target = agent.nearest_goal_from(origin, goals)?;
        self.touch(root).h = manhattan(origin, target);

        let grid = agent.grid();
        let mut open = vec![root];
        let mut nbuf = std::mem::take(&mut self.nbuf);
        let mut reached = None;

        while !open.is_empty() {
            let ci = open.remove(0);
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
                    let n = self.touch(ni);
                    n.g = tentative;
                    n.h = manhattan(np, target);
                    n.parent = ci;
                    open.push(ni);
                } else if tentative < self.nodes[ni].g {
                    let n = self.touch(ni);
                    n.g = tentative;
                    n.parent = ci;
                }
            }

            open.sort_by_key(|&i| self.nodes[i].f());
            if open.len() > width {
                for &i in &open[width..] {
                    self.nodes[i].closed = true;
                }
                open.truncate(width);
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
