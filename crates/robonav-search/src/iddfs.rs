use robonav_core::{Grid, Point};

use crate::agent::{Agent, TraceOrder};
use crate::algorithm::Reached;
use crate::outcome::SearchOutcome;
use crate::space::SearchSpace;

/// Result of one depth-limited pass.
enum Pass {
    Found(Point),
    NotFound,
    /// The visited ceiling was hit; deeper passes are pointless.
    LimitReached,
}

/// One level of the explicit recursion stack. Its unexplored neighbours are
/// `pending[next..end]`.
struct Frame {
    idx: usize,
    remaining: usize,
    start: usize,
    next: usize,
    end: usize,
}

impl SearchSpace {
    /// Iterative deepening depth-first search to the first goal.
    ///
    /// Runs depth-limited searches with limits 1, 2, 3, ... up to the number
    /// of free cells. Each pass only forbids revisiting cells on the current
    /// path, so `visited` grows quickly; once it reaches `limit` the search
    /// gives up and reports [`SearchOutcome::Exhausted`].
    pub fn iddfs(&mut self, agent: &Agent<'_>, limit: usize) -> SearchOutcome {
        self.first_goal(agent, |s, a, o, g, v| s.iddfs_leg(a, o, g, v, limit))
    }

    /// Iterative deepening through every goal. The visited ceiling applies
    /// to the whole run, not to each leg.
    pub fn iddfs_all(&mut self, agent: &Agent<'_>, limit: usize) -> SearchOutcome {
        self.all_goals(agent, |s, a, o, g, v| s.iddfs_leg(a, o, g, v, limit))
    }

    fn iddfs_leg(
        &mut self,
        agent: &Agent<'_>,
        origin: Point,
        goals: &[Point],
        visited: &mut usize,
        limit: usize,
    ) -> Option<Reached> {
        self.reset();
        let root = self.idx(origin)?;
        self.touch(root);
        if goals.contains(&origin) {
            return Some(Reached {
                goal: origin,
                path: Vec::new(),
            });
        }

        let mut frames = Vec::new();
        for depth in 1..=agent.grid().net_area() {
            log::trace!("iddfs depth {depth}, {visited} visited so far");
            match self.depth_limited(agent, root, goals, depth, visited, limit, &mut frames) {
                Pass::Found(goal) => {
                    self.link_frames(&frames, goal);
                    return Some(Reached {
                        goal,
                        path: agent.trace_path(self, goal, TraceOrder::Backward),
                    });
                }
                Pass::NotFound => {}
                Pass::LimitReached => {
                    log::debug!("iddfs: visit limit {limit} reached at depth {depth}");
                    return None;
                }
            }
        }
        None
    }

    /// Depth-first search from `root` at most `depth` moves deep. On success
    /// `frames` holds the path from `root` to the goal's parent.
    #[allow(clippy::too_many_arguments)]
    fn depth_limited(
        &mut self,
        agent: &Agent<'_>,
        root: usize,
        goals: &[Point],
        depth: usize,
        visited: &mut usize,
        limit: usize,
        frames: &mut Vec<Frame>,
    ) -> Pass {
        let grid = agent.grid();
        let jump = agent.can_jump();
        let mut on_path = vec![false; self.nodes.len()];
        let mut pending = Vec::new();
        let mut nbuf = std::mem::take(&mut self.nbuf);
        frames.clear();

        on_path[root] = true;
        frames.push(self.frame(grid, jump, &mut nbuf, &mut pending, root, depth));

        let result = loop {
            let Some(top) = frames.last_mut() else {
                break Pass::NotFound;
            };
            if top.next == top.end {
                on_path[top.idx] = false;
                pending.truncate(top.start);
                frames.pop();
                continue;
            }
            let ni = pending[top.next];
            top.next += 1;
            let remaining = top.remaining;

            if *visited >= limit {
                break Pass::LimitReached;
            }
            let np = self.point(ni);
            if grid.is_blocked(np) || on_path[ni] {
                continue;
            }
            *visited += 1;
            if goals.contains(&np) {
                break Pass::Found(np);
            }
            if remaining > 1 {
                on_path[ni] = true;
                frames.push(self.frame(grid, jump, &mut nbuf, &mut pending, ni, remaining - 1));
            }
        };

        self.nbuf = nbuf;
        result
    }

    /// Queue the neighbours of `idx` on `pending` and describe them as a new
    /// stack level.
    fn frame(
        &self,
        grid: &Grid,
        jump: bool,
        nbuf: &mut Vec<Point>,
        pending: &mut Vec<usize>,
        idx: usize,
        remaining: usize,
    ) -> Frame {
        let start = pending.len();
        nbuf.clear();
        grid.neighbors(self.point(idx), jump, nbuf);
        pending.extend(nbuf.iter().filter_map(|&p| self.idx(p)));
        Frame {
            idx,
            remaining,
            start,
            next: start,
            end: pending.len(),
        }
    }

    /// Turn the stack left by a successful pass into parent links ending at
    /// `goal`.
    fn link_frames(&mut self, frames: &[Frame], goal: Point) {
        let Some(goal) = self.idx(goal) else {
            return;
        };
        let mut prev = None;
        for (g, idx) in frames.iter().map(|f| f.idx).chain([goal]).enumerate() {
            let n = self.touch(idx);
            n.g = g as i32;
            if let Some(p) = prev {
                n.parent = p;
            }
            prev = Some(idx);
        }
    }
}
