use crate::agent::Agent;
use crate::astar::Priority;
use crate::outcome::SearchOutcome;
use crate::space::SearchSpace;

impl SearchSpace {
    /// Greedy best-first search: the frontier is ordered by the heuristic
    /// alone, and a cell keeps the parent it was discovered from.
    pub fn greedy(&mut self, agent: &Agent<'_>) -> SearchOutcome {
        self.first_goal(agent, |s, a, o, g, v| {
            s.best_first_leg(a, o, g, v, Priority::Heuristic)
        })
    }

    pub fn greedy_all(&mut self, agent: &Agent<'_>) -> SearchOutcome {
        self.all_goals(agent, |s, a, o, g, v| {
            s.best_first_leg(a, o, g, v, Priority::Heuristic)
        })
    }
}
