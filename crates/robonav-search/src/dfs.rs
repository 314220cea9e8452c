use robonav_core::Point;

use crate::agent::{Agent, TraceOrder};
use crate::algorithm::Reached;
use crate::outcome::SearchOutcome;
use crate::space::SearchSpace;

impl SearchSpace {
    /// Depth-first search to the first goal. The path is whatever the
    /// up/left/down/right preference stumbles on first.
    pub fn dfs(&mut self, agent: &Agent<'_>) -> SearchOutcome {
        self.first_goal(agent, Self::dfs_leg)
    }

    /// Depth-first search through every goal.
    pub fn dfs_all(&mut self, agent: &Agent<'_>) -> SearchOutcome {
        self.all_goals(agent, Self::dfs_leg)
    }

    fn dfs_leg(
        &mut self,
        agent: &Agent<'_>,
        origin: Point,
        goals: &[Point],
        visited: &mut usize,
    ) -> Option<Reached> {
        self.reset();
        let root = self.idx(origin)?;
        self.touch(root);

        let grid = agent.grid();
        let mut stack = vec![root];
        let mut nbuf = std::mem::take(&mut self.nbuf);
        let mut reached = None;

        while let Some(ci) = stack.pop() {
            let cp = self.point(ci);
            if goals.contains(&cp) {
                reached = Some(cp);
                break;
            }
            let g = self.touch(ci).g;

            nbuf.clear();
            grid.neighbors(cp, agent.can_jump(), &mut nbuf);
            // Reversed so the preferred direction ends up on top.
            for &np in nbuf.iter().rev() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                if grid.is_blocked(np) || self.is_seen(ni) {
                    continue;
                }
                let n = self.touch(ni);
                n.g = g + 1;
                n.parent = ci;
                *visited += 1;
                stack.push(ni);
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
