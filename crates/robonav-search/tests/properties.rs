//! Cross-algorithm properties checked on fixed and randomly generated grids.

use std::collections::VecDeque;

use rand::rngs::SmallRng;
use rand::{Rng, RngExt, SeedableRng};
use robonav_core::{Grid, MapSpec, Point, Range};
use robonav_search::{Agent, Algorithm, Mode, SearchConfig, SearchOutcome, SearchSpace, Step};

const SAMPLE: &str = "\
[5,11]
(0,1)
(7,0) | (10,3)
(2,0,2,2)
(8,0,1,2)
(10,0,1,1)
(2,3,1,2)
(3,4,3,1)
(9,3,1,1)
(8,4,2,1)
";

/// A random grid with roughly a quarter of its cells walled, plus a free
/// start and one to three free goals.
struct Scenario {
    grid: Grid,
    start: Point,
    goals: Vec<Point>,
}

fn scenario(rng: &mut impl Rng, max_side: i32) -> Scenario {
    let height = rng.random_range(2..=max_side);
    let width = rng.random_range(2..=max_side);
    let mut walls = Vec::new();
    for y in 0..height {
        for x in 0..width {
            if rng.random_range(0..4) == 0 {
                walls.push(Range::from_rect(x, y, 1, 1));
            }
        }
    }
    let mut grid = Grid::new(height, width, &walls).unwrap();
    if grid.net_area() == 0 {
        grid = Grid::open(height, width).unwrap();
    }
    scenario_on(grid, rng)
}

fn scenario_on(grid: Grid, rng: &mut impl Rng) -> Scenario {
    let free: Vec<Point> = grid.bounds().iter().filter(|&p| !grid.is_blocked(p)).collect();
    let start = free[rng.random_range(0..free.len())];
    let n = rng.random_range(1..=3);
    let goals = (0..n)
        .map(|_| free[rng.random_range(0..free.len())])
        .collect();
    Scenario { grid, start, goals }
}

/// Shortest walking distance from `from` to every cell, `None` where
/// unreachable.
fn distances(grid: &Grid, from: Point) -> Vec<Option<usize>> {
    let mut dist = vec![None; grid.len()];
    let mut queue = VecDeque::new();
    if let Some(i) = grid.index(from) {
        dist[i] = Some(0);
        queue.push_back(from);
    }
    let mut buf = Vec::new();
    while let Some(p) = queue.pop_front() {
        let d = grid.index(p).and_then(|i| dist[i]).unwrap();
        buf.clear();
        grid.neighbors(p, false, &mut buf);
        for &n in &buf {
            let i = grid.index(n).unwrap();
            if !grid.is_blocked(n) && dist[i].is_none() {
                dist[i] = Some(d + 1);
                queue.push_back(n);
            }
        }
    }
    dist
}

/// Walk `path` from `start`, panicking if it leaves the grid or enters a
/// wall. Returns every cell landed on.
fn replay(grid: &Grid, start: Point, path: &[Step]) -> Vec<Point> {
    let mut at = start;
    let mut landed = vec![start];
    for step in path {
        at = at.step(step.direction, step.cells());
        assert!(grid.contains(at), "{step} leaves the grid at {at}");
        assert!(!grid.is_blocked(at), "{step} lands on a wall at {at}");
        landed.push(at);
    }
    landed
}

fn check_found(grid: &Grid, agent: &Agent<'_>, out: &SearchOutcome, mode: Mode, label: &str) {
    let Some(found) = out.found() else {
        return;
    };
    let landed = replay(grid, agent.start(), &found.path);
    assert_eq!(landed.last().copied(), found.goal(), "{label}");
    match mode {
        Mode::FirstGoal => {
            assert_eq!(found.goals.len(), 1, "{label}");
            assert!(agent.goals().contains(&found.goals[0]), "{label}");
        }
        Mode::AllGoals => {
            let mut want = agent.goals().to_vec();
            want.sort_by_key(|p| (p.y, p.x));
            let mut got = found.goals.clone();
            got.sort_by_key(|p| (p.y, p.x));
            assert_eq!(got, want, "{label}");
            // Goals are landed on in the reported order.
            let mut rest = landed.iter();
            for g in &found.goals {
                assert!(rest.any(|p| p == g), "{label}: {g} out of order");
            }
        }
    }
    if !agent.can_jump() {
        for s in &found.path {
            assert_eq!(s.distance, None, "{label}");
        }
    }
}

#[test]
fn paths_replay_onto_their_goals() {
    let mut rng = SmallRng::seed_from_u64(42);
    let config = SearchConfig {
        visit_limit: 20_000,
        ..Default::default()
    };
    for round in 0..150 {
        let sc = scenario(&mut rng, 7);
        for jump in [false, true] {
            let agent = Agent::new(&sc.grid, sc.start, &sc.goals, jump).unwrap();
            let mut space = SearchSpace::new(&sc.grid);
            for algorithm in Algorithm::ALL {
                for mode in [Mode::FirstGoal, Mode::AllGoals] {
                    let out = algorithm.run(&mut space, &agent, &config, mode);
                    let label = format!("round {round} {algorithm} {mode:?} jump={jump}");
                    check_found(&sc.grid, &agent, &out, mode, &label);
                    assert!(out.visited() >= 1, "{label}");
                }
            }
        }
    }
}

#[test]
fn breadth_first_and_iterative_deepening_are_shortest() {
    let mut rng = SmallRng::seed_from_u64(7);
    let config = SearchConfig::default();
    for round in 0..150 {
        let sc = scenario(&mut rng, 5);
        let agent = Agent::new(&sc.grid, sc.start, &sc.goals, false).unwrap();
        let dist = distances(&sc.grid, sc.start);
        let best = agent
            .goals()
            .iter()
            .filter_map(|&g| dist[sc.grid.index(g).unwrap()])
            .min();
        let mut space = SearchSpace::new(&sc.grid);
        for algorithm in [Algorithm::Bfs, Algorithm::Iddfs] {
            let out = algorithm.run(&mut space, &agent, &config, Mode::FirstGoal);
            match (out.found(), best) {
                (Some(found), Some(best)) => {
                    assert_eq!(found.path.len(), best, "round {round} {algorithm}")
                }
                (None, Some(_)) => {
                    // Iterative deepening may only give up at its visit limit.
                    assert_eq!(algorithm, Algorithm::Iddfs, "round {round}");
                    assert!(out.visited() >= config.visit_limit, "round {round}");
                }
                (Some(_), None) => panic!("round {round} {algorithm}: found an unreachable goal"),
                (None, None) => {}
            }
        }
    }
}

#[test]
fn astar_is_shortest_toward_a_single_goal() {
    let mut rng = SmallRng::seed_from_u64(1234);
    for round in 0..200 {
        let sc = scenario(&mut rng, 8);
        let goal = sc.goals[0];
        let agent = Agent::new(&sc.grid, sc.start, &[goal], false).unwrap();
        let dist = distances(&sc.grid, sc.start)[sc.grid.index(goal).unwrap()];
        let out = SearchSpace::new(&sc.grid).astar(&agent);
        assert_eq!(out.found().map(|f| f.path.len()), dist, "round {round}");
    }
}

#[test]
fn complete_algorithms_agree_on_reachability() {
    let mut rng = SmallRng::seed_from_u64(99);
    let config = SearchConfig::default();
    for round in 0..200 {
        let sc = scenario(&mut rng, 8);
        let agent = Agent::new(&sc.grid, sc.start, &sc.goals, false).unwrap();
        let mut space = SearchSpace::new(&sc.grid);
        let reference = space.bfs(&agent).is_found();
        for algorithm in Algorithm::ALL {
            let out = algorithm.run(&mut space, &agent, &config, Mode::FirstGoal);
            if out.is_found() {
                assert!(reference, "round {round} {algorithm}");
            }
            if matches!(
                algorithm,
                Algorithm::Dfs | Algorithm::Astar | Algorithm::Greedy
            ) {
                assert_eq!(out.is_found(), reference, "round {round} {algorithm}");
            }
        }
    }
}

#[test]
fn rerunning_gives_identical_results() {
    let mut rng = SmallRng::seed_from_u64(5);
    let config = SearchConfig::default();
    for _ in 0..50 {
        let sc = scenario(&mut rng, 6);
        let agent = Agent::new(&sc.grid, sc.start, &sc.goals, false).unwrap();
        let mut shared = SearchSpace::new(&sc.grid);
        for algorithm in Algorithm::ALL {
            for mode in [Mode::FirstGoal, Mode::AllGoals] {
                let first = algorithm.run(&mut shared, &agent, &config, mode);
                let again = algorithm.run(&mut shared, &agent, &config, mode);
                let fresh = algorithm.run(&mut SearchSpace::new(&sc.grid), &agent, &config, mode);
                assert_eq!(first, again, "{algorithm} {mode:?}");
                assert_eq!(first, fresh, "{algorithm} {mode:?}");
            }
        }
    }
}

#[test]
fn enclosed_goal_visits_the_reachable_region() {
    // Goal at (6, 1) sealed inside a box of walls.
    let walls = [
        Range::from_rect(5, 0, 3, 1),
        Range::from_rect(5, 2, 3, 1),
        Range::from_rect(5, 1, 1, 1),
        Range::from_rect(7, 1, 1, 1),
    ];
    let grid = Grid::new(4, 8, &walls).unwrap();
    let agent = Agent::new(&grid, Point::ZERO, &[Point::new(6, 1)], false).unwrap();
    let reachable = distances(&grid, Point::ZERO)
        .iter()
        .filter(|d| d.is_some())
        .count();
    assert_eq!(reachable, 32 - 9);
    let mut space = SearchSpace::new(&grid);
    for algorithm in [
        Algorithm::Bfs,
        Algorithm::Dfs,
        Algorithm::Astar,
        Algorithm::Greedy,
    ] {
        let out = algorithm.run(&mut space, &agent, &SearchConfig::default(), Mode::FirstGoal);
        assert_eq!(
            out,
            SearchOutcome::Exhausted { visited: reachable },
            "{algorithm}"
        );
    }
    for algorithm in [Algorithm::Iddfs, Algorithm::Beam, Algorithm::Bidirectional] {
        let config = SearchConfig {
            visit_limit: 5_000,
            ..Default::default()
        };
        assert!(!algorithm.run(&mut space, &agent, &config, Mode::FirstGoal).is_found());
    }
}

#[test]
fn sample_map_shortest_routes() {
    let spec = MapSpec::parse(SAMPLE).unwrap();
    let grid = spec.grid().unwrap();
    let agent = Agent::from_map(&grid, &spec, false).unwrap();
    let config = SearchConfig::default();
    let mut space = SearchSpace::new(&grid);
    for algorithm in [Algorithm::Bfs, Algorithm::Iddfs, Algorithm::Astar] {
        let out = algorithm.run(&mut space, &agent, &config, Mode::FirstGoal);
        let found = out.found().unwrap();
        assert_eq!(found.goal(), Some(Point::new(7, 0)), "{algorithm}");
        assert_eq!(found.path.len(), 10, "{algorithm}");
    }
    for algorithm in Algorithm::ALL {
        let out = algorithm.run(&mut space, &agent, &config, Mode::AllGoals);
        if let Some(found) = out.found() {
            assert_eq!(found.goals.len(), 2, "{algorithm}");
            replay(&grid, agent.start(), &found.path);
        } else {
            assert!(
                matches!(algorithm, Algorithm::Iddfs | Algorithm::Beam),
                "{algorithm}"
            );
        }
    }
}

#[test]
fn all_goals_from_a_goal_records_it_first() {
    let grid = Grid::open(3, 3).unwrap();
    let other = Point::new(2, 2);
    let agent = Agent::new(&grid, Point::ZERO, &[other, Point::ZERO], false).unwrap();
    let config = SearchConfig::default();
    for algorithm in Algorithm::ALL {
        let out = algorithm.run(
            &mut SearchSpace::new(&grid),
            &agent,
            &config,
            Mode::AllGoals,
        );
        let found = out.found().unwrap();
        assert_eq!(found.goals, vec![Point::ZERO, other], "{algorithm}");
        assert_eq!(found.path.len(), 4, "{algorithm}");
    }
}
