use std::collections::VecDeque;

use robonav_core::Point;

use crate::agent::{Agent, TraceOrder};
use crate::algorithm::Reached;
use crate::outcome::SearchOutcome;
use crate::space::SearchSpace;

impl SearchSpace {
    /// Breadth-first search to the first goal.
    ///
    /// The returned path is shortest in number of moves.
    pub fn bfs(&mut self, agent: &Agent<'_>) -> SearchOutcome {
        self.first_goal(agent, Self::bfs_leg)
    }

    /// Breadth-first search through every goal, restarting from each one
    /// reached.
    pub fn bfs_all(&mut self, agent: &Agent<'_>) -> SearchOutcome {
        self.all_goals(agent, Self::bfs_leg)
    }

    fn bfs_leg(
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
        let mut queue = VecDeque::from([root]);
        let mut nbuf = std::mem::take(&mut self.nbuf);
        let mut reached = None;

        while let Some(ci) = queue.pop_front() {
            let cp = self.point(ci);
            if goals.contains(&cp) {
                reached = Some(cp);
                break;
            }
            let g = self.touch(ci).g;

            nbuf.clear();
            grid.neighbors(cp, agent.can_jump(), &mut nbuf);
            for &np in nbuf.iter() {
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
                queue.push_back(ni);
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

#[cfg(test)]
mod tests {
    use super::*;
    use robonav_core::{Grid, Range};

    fn tokens(out: &SearchOutcome) -> Vec<String> {
        out.found()
            .map(|f| f.path.iter().map(ToString::to_string).collect())
            .unwrap_or_default()
    }

    #[test]
    fn open_grid_corner_to_corner() {
        let grid = Grid::open(5, 5).unwrap();
        let agent = Agent::new(&grid, Point::ZERO, &[Point::new(4, 4)], false).unwrap();
        let mut space = SearchSpace::new(&grid);
        let out = space.bfs(&agent);
        // Up and left are out of bounds at the origin, so down is tried
        // before right at every tie.
        assert_eq!(
            tokens(&out),
            ["down", "down", "down", "down", "right", "right", "right", "right"]
        );
        assert!(out.visited() <= 25);
        assert_eq!(space.cell(Point::new(4, 4)).map(|c| c.g), Some(8));
    }

    #[test]
    fn walls_force_detour() {
        // Column x=1 blocked except at the bottom row.
        let grid = Grid::new(3, 3, &[Range::from_rect(1, 0, 1, 2)]).unwrap();
        let agent = Agent::new(&grid, Point::ZERO, &[Point::new(2, 0)], false).unwrap();
        let out = SearchSpace::new(&grid).bfs(&agent);
        assert_eq!(tokens(&out), ["down", "down", "right", "right", "up", "up"]);
    }

    #[test]
    fn enclosed_goal_counts_reachable_cells() {
        // Goal at (4, 0) is walled off by column x=3.
        let grid = Grid::new(3, 5, &[Range::from_rect(3, 0, 1, 3)]).unwrap();
        let agent = Agent::new(&grid, Point::ZERO, &[Point::new(4, 0)], false).unwrap();
        let out = SearchSpace::new(&grid).bfs(&agent);
        assert_eq!(out, SearchOutcome::Exhausted { visited: 9 });
    }

    #[test]
    fn jumping_agent_reaches_goal_in_one_move() {
        let grid = Grid::open(1, 6).unwrap();
        let agent = Agent::new(&grid, Point::ZERO, &[Point::new(5, 0)], true).unwrap();
        let out = SearchSpace::new(&grid).bfs(&agent);
        assert_eq!(tokens(&out), ["right_5"]);
    }

    #[test]
    fn all_goals_visits_nearest_first() {
        let grid = Grid::open(1, 6).unwrap();
        let far = Point::new(5, 0);
        let near = Point::new(2, 0);
        let agent = Agent::new(&grid, Point::ZERO, &[far, near], false).unwrap();
        let out = SearchSpace::new(&grid).bfs_all(&agent);
        let found = out.found().unwrap();
        assert_eq!(found.goals, vec![near, far]);
        assert_eq!(found.path.len(), 5);
    }

    #[test]
    fn all_goals_takes_adjacent_goal_first() {
        let grid = Grid::open(3, 4).unwrap();
        let adjacent = Point::new(1, 0);
        let far = Point::new(3, 2);
        let agent = Agent::new(&grid, Point::ZERO, &[far, adjacent], false).unwrap();
        let out = SearchSpace::new(&grid).bfs_all(&agent);
        let found = out.found().unwrap();
        assert_eq!(found.goals, vec![adjacent, far]);
        assert_eq!(found.path[0].to_string(), "right");
        assert_eq!(found.path.len(), 1 + 4);
    }

    #[test]
    fn space_built_for_smaller_grid_is_refitted() {
        let small = Grid::open(2, 2).unwrap();
        let grid = Grid::open(5, 5).unwrap();
        let agent = Agent::new(&grid, Point::ZERO, &[Point::new(4, 4)], false).unwrap();
        let mut space = SearchSpace::new(&small);
        let out = space.bfs(&agent);
        assert_eq!(out.found().map(|f| f.path.len()), Some(8));
        assert_eq!(out, SearchSpace::new(&grid).bfs(&agent));
    }

    #[test]
    fn rerun_is_identical() {
        let grid = Grid::new(4, 6, &[Range::from_rect(2, 1, 2, 2)]).unwrap();
        let agent = Agent::new(&grid, Point::new(0, 2), &[Point::new(5, 1)], false).unwrap();
        let mut space = SearchSpace::new(&grid);
        let first = space.bfs(&agent);
        let second = space.bfs(&agent);
        assert_eq!(first, second);
    }
}
