use std::fmt;
use std::str::FromStr;

use robonav_core::Point;

use crate::agent::Agent;
use crate::config::SearchConfig;
use crate::error::{Result, SearchError};
use crate::outcome::{Found, Mode, SearchOutcome, Step};
use crate::space::SearchSpace;

/// The selectable search strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Algorithm {
    Bfs,
    Dfs,
    Iddfs,
    Astar,
    Greedy,
    Beam,
    Bidirectional,
}

impl Algorithm {
    /// Uninformed strategies first, then informed ones.
    pub const ALL: [Algorithm; 7] = [
        Algorithm::Bfs,
        Algorithm::Dfs,
        Algorithm::Iddfs,
        Algorithm::Astar,
        Algorithm::Greedy,
        Algorithm::Beam,
        Algorithm::Bidirectional,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Algorithm::Bfs => "bfs",
            Algorithm::Dfs => "dfs",
            Algorithm::Iddfs => "iddfs",
            Algorithm::Astar => "astar",
            Algorithm::Greedy => "greedy",
            Algorithm::Beam => "beam",
            Algorithm::Bidirectional => "bidirectional",
        }
    }

    /// Whether the strategy uses a distance heuristic.
    pub const fn is_informed(self) -> bool {
        !matches!(self, Algorithm::Bfs | Algorithm::Dfs | Algorithm::Iddfs)
    }

    /// Comma-separated list of every algorithm name.
    pub fn available() -> String {
        Self::ALL.map(Algorithm::name).join(", ")
    }

    /// Run this strategy on `space`.
    ///
    /// `config` is assumed valid; see [`SearchConfig::validate`].
    pub fn run(
        self,
        space: &mut SearchSpace,
        agent: &Agent<'_>,
        config: &SearchConfig,
        mode: Mode,
    ) -> SearchOutcome {
        log::debug!(
            "{self} ({mode:?}) from {} toward {} goal(s)",
            agent.start(),
            agent.goals().len()
        );
        let outcome = match (self, mode) {
            (Algorithm::Bfs, Mode::FirstGoal) => space.bfs(agent),
            (Algorithm::Bfs, Mode::AllGoals) => space.bfs_all(agent),
            (Algorithm::Dfs, Mode::FirstGoal) => space.dfs(agent),
            (Algorithm::Dfs, Mode::AllGoals) => space.dfs_all(agent),
            (Algorithm::Iddfs, Mode::FirstGoal) => space.iddfs(agent, config.visit_limit),
            (Algorithm::Iddfs, Mode::AllGoals) => space.iddfs_all(agent, config.visit_limit),
            (Algorithm::Astar, Mode::FirstGoal) => space.astar(agent),
            (Algorithm::Astar, Mode::AllGoals) => space.astar_all(agent),
            (Algorithm::Greedy, Mode::FirstGoal) => space.greedy(agent),
            (Algorithm::Greedy, Mode::AllGoals) => space.greedy_all(agent),
            (Algorithm::Beam, Mode::FirstGoal) => space.beam(agent, config.beam_width),
            (Algorithm::Beam, Mode::AllGoals) => space.beam_all(agent, config.beam_width),
            (Algorithm::Bidirectional, Mode::FirstGoal) => space.bidirectional(agent),
            (Algorithm::Bidirectional, Mode::AllGoals) => space.bidirectional_all(agent),
        };
        match &outcome {
            SearchOutcome::Found(f) => log::debug!(
                "{self}: reached {} goal(s) in {} move(s), {} visited",
                f.goals.len(),
                f.path.len(),
                f.visited
            ),
            SearchOutcome::Exhausted { visited } => {
                log::debug!("{self}: no goal reachable, {visited} visited")
            }
        }
        outcome
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|a| a.name() == wanted)
            .ok_or_else(|| SearchError::UnknownAlgorithm {
                name: s.to_string(),
                available: Self::available(),
            })
    }
}

/// Validate `config`, then run `algorithm` on a fresh [`SearchSpace`].
pub fn search(
    agent: &Agent<'_>,
    algorithm: Algorithm,
    config: &SearchConfig,
    mode: Mode,
) -> Result<SearchOutcome> {
    config.validate()?;
    let mut space = SearchSpace::new(agent.grid());
    Ok(algorithm.run(&mut space, agent, config, mode))
}

// ---------------------------------------------------------------------------
// Goal sequencing shared by every strategy
// ---------------------------------------------------------------------------

/// A goal reached by one leg of a search, with the moves that led there.
pub(crate) struct Reached {
    pub(crate) goal: Point,
    pub(crate) path: Vec<Step>,
}

impl SearchSpace {
    /// Single-goal driver.
    ///
    /// `leg(space, agent, origin, goals, visited)` searches from `origin`
    /// until it reaches any of `goals`, adding newly discovered cells to
    /// `visited`.
    pub(crate) fn first_goal<F>(&mut self, agent: &Agent<'_>, mut leg: F) -> SearchOutcome
    where
        F: FnMut(&mut Self, &Agent<'_>, Point, &[Point], &mut usize) -> Option<Reached>,
    {
        self.fit(agent.grid());
        let start = agent.start();
        if agent.goals().contains(&start) {
            self.reset();
            return SearchOutcome::Found(Found {
                path: Vec::new(),
                goals: vec![start],
                visited: 1,
            });
        }
        let mut visited = 1;
        match leg(self, agent, start, agent.goals(), &mut visited) {
            Some(r) => SearchOutcome::Found(Found {
                path: r.path,
                goals: vec![r.goal],
                visited,
            }),
            None => SearchOutcome::Exhausted { visited },
        }
    }

    /// All-goals driver: runs `leg` repeatedly, each time from the goal the
    /// previous leg reached, until no goal remains or a leg fails.
    pub(crate) fn all_goals<F>(&mut self, agent: &Agent<'_>, mut leg: F) -> SearchOutcome
    where
        F: FnMut(&mut Self, &Agent<'_>, Point, &[Point], &mut usize) -> Option<Reached>,
    {
        self.fit(agent.grid());
        let mut remaining = agent.goals().to_vec();
        let mut origin = agent.start();
        let mut visited = 1;
        let mut path = Vec::new();
        let mut reached = Vec::with_capacity(remaining.len());

        while !remaining.is_empty() {
            let Some(r) = leg(self, agent, origin, &remaining, &mut visited) else {
                log::trace!(
                    "{} goal(s) left unreached after {visited} visited",
                    remaining.len()
                );
                return SearchOutcome::Exhausted { visited };
            };
            log::trace!("reached {} after {} move(s)", r.goal, r.path.len());
            remaining.retain(|&g| g != r.goal);
            path.extend(r.path);
            reached.push(r.goal);
            origin = r.goal;
        }

        SearchOutcome::Found(Found {
            path,
            goals: reached,
            visited,
        })
    }
}
