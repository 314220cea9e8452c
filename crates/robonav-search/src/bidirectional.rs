use robonav_core::{Grid, Point, manhattan};

use crate::agent::{Agent, TraceOrder};
use crate::algorithm::Reached;
use crate::frontier::Frontier;
use crate::outcome::SearchOutcome;
use crate::space::{SearchSpace, Side};

/// One half of a bidirectional search.
struct Half {
    side: Side,
    open: Frontier,
    /// Root of the other half, used for the heuristic.
    toward: Point,
}

impl SearchSpace {
    /// Bidirectional search between the start and its nearest goal.
    ///
    /// Two A*-ordered searches grow from either end, one expansion each per
    /// round, until one discovers a cell the other has already reached. The
    /// path is not guaranteed to be shortest.
    pub fn bidirectional(&mut self, agent: &Agent<'_>) -> SearchOutcome {
        self.first_goal(agent, Self::bidirectional_leg)
    }

    /// Bidirectional search through every goal, nearest remaining first.
    pub fn bidirectional_all(&mut self, agent: &Agent<'_>) -> SearchOutcome {
        self.all_goals(agent, Self::bidirectional_leg)
    }

    fn bidirectional_leg(
        &mut self,
        agent: &Agent<'_>,
        origin: Point,
        goals: &[Point],
        visited: &mut usize,
    ) -> Option<Reached> {
        self.reset();
        let target = agent.nearest_goal_from(origin, goals)?;
        let fi = self.idx(origin)?;
        let bi = self.idx(target)?;
        if fi == bi {
            self.touch(fi);
            return Some(Reached {
                goal: target,
                path: Vec::new(),
            });
        }

        let h = manhattan(origin, target);
        let mut fwd = self.half(fi, Side::Forward, h, target);
        let mut bwd = self.half(bi, Side::Backward, h, origin);
        // The goal-side root counts as discovered.
        *visited += 1;

        let grid = agent.grid();
        let jump = agent.can_jump();
        let mut nbuf = std::mem::take(&mut self.nbuf);

        let path = loop {
            let (Some(cf), Some(cb)) = (fwd.open.pop(), bwd.open.pop()) else {
                break None;
            };
            if let Some(m) = self.expand_half(grid, jump, &mut nbuf, cf, &mut fwd, visited) {
                let (cp, mp) = (self.point(cf), self.point(m));
                let mut path = agent.trace_path(self, cp, TraceOrder::Backward);
                path.push(agent.step(cp, mp));
                path.extend(agent.trace_path(self, mp, TraceOrder::Forward));
                break Some(path);
            }
            if let Some(m) = self.expand_half(grid, jump, &mut nbuf, cb, &mut bwd, visited) {
                let (cp, mp) = (self.point(cb), self.point(m));
                let mut path = agent.trace_path(self, mp, TraceOrder::Backward);
                path.push(agent.step(mp, cp));
                path.extend(agent.trace_path(self, cp, TraceOrder::Forward));
                break Some(path);
            }
        };

        self.nbuf = nbuf;
        Some(Reached {
            goal: target,
            path: path?,
        })
    }

    fn half(&mut self, root: usize, side: Side, h: i32, toward: Point) -> Half {
        let n = self.touch(root);
        n.h = h;
        n.side = side;
        let mut open = Frontier::new();
        open.push(root, h);
        Half { side, open, toward }
    }

    /// Close `ci` and open its neighbours for `half`. Returns the first
    /// neighbour already owned by the other half.
    fn expand_half(
        &mut self,
        grid: &Grid,
        jump: bool,
        nbuf: &mut Vec<Point>,
        ci: usize,
        half: &mut Half,
        visited: &mut usize,
    ) -> Option<usize> {
        let node = self.touch(ci);
        node.closed = true;
        let g = node.g;

        nbuf.clear();
        grid.neighbors(self.point(ci), jump, nbuf);
        for &np in nbuf.iter() {
            let Some(ni) = self.idx(np) else {
                continue;
            };
            if grid.is_blocked(np) {
                continue;
            }
            let tentative = g + 1;
            match self.node(ni).map(|n| (n.side, n.closed, n.g)) {
                Some((side, ..)) if side != half.side => return Some(ni),
                Some((_, closed, g)) if closed || tentative >= g => {}
                Some(_) => {
                    let n = self.touch(ni);
                    n.g = tentative;
                    n.parent = ci;
                    half.open.push(ni, n.f());
                }
                None => {
                    *visited += 1;
                    let n = self.touch(ni);
                    n.g = tentative;
                    n.h = manhattan(np, half.toward);
                    n.parent = ci;
                    n.side = half.side;
                    half.open.push(ni, n.f());
                }
            }
        }
        None
    }
}
