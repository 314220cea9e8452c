//! `robonav-analyze`: time every algorithm on every map in a directory.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use env_logger::Env;
use memory_stats::memory_stats;
use robonav::maps::available_maps;
use robonav_core::{Grid, MapSpec};
use robonav_search::{Agent, Algorithm, Mode, SearchConfig, SearchSpace};

#[derive(Parser)]
#[command(version)]
/// Report the mean run time and memory use of each search algorithm on each
/// map.
struct Args {
    #[arg(help = "Algorithms to time [default: all]")]
    algorithms: Vec<Algorithm>,
    #[arg(help = "Runs averaged per measurement", long = "runs", default_value_t = 100)]
    runs: u32,
    #[arg(help = "Directory holding the maps", long = "maps-dir", default_value = "maps")]
    maps_dir: PathBuf,
}

const VARIANTS: [(Mode, bool, &str); 4] = [
    (Mode::FirstGoal, false, "one goal, cannot jump"),
    (Mode::AllGoals, false, "all goals, cannot jump"),
    (Mode::FirstGoal, true, "one goal, can jump"),
    (Mode::AllGoals, true, "all goals, can jump"),
];

fn main() {
    env_logger::init_from_env(Env::default().default_filter_or("warn"));
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => e.exit(),
    };
    let algorithms = if args.algorithms.is_empty() {
        Algorithm::ALL.to_vec()
    } else {
        args.algorithms.clone()
    };
    let runs = args.runs.max(1);

    let maps = available_maps(&args.maps_dir);
    if maps.is_empty() {
        println!("No maps found in {}", args.maps_dir.display());
        return;
    }

    for name in maps {
        let spec = match MapSpec::load(args.maps_dir.join(&name)) {
            Ok(spec) => spec,
            Err(e) => {
                println!("{name}: skipped ({e})");
                continue;
            }
        };
        let grid = match spec.grid() {
            Ok(grid) => grid,
            Err(e) => {
                println!("{name}: skipped ({e})");
                continue;
            }
        };
        println!("{name}");
        for &algorithm in &algorithms {
            println!("  {algorithm}");
            for (mode, jump, label) in VARIANTS {
                match measure(&grid, &spec, algorithm, mode, jump, runs) {
                    Ok(m) => {
                        println!("    {label}: {} visited", m.visited);
                        println!(
                            "      time: {:.4} ms (mean of {runs} runs)",
                            m.mean.as_secs_f64() * 1000.0
                        );
                        match m.memory_kib {
                            Some(kib) => println!("      memory used: {kib} KiB"),
                            None => println!("      memory used: unavailable"),
                        }
                    }
                    Err(e) => println!("    {label}: {e}"),
                }
            }
        }
    }
}

struct Measurement {
    mean: Duration,
    /// Visited count of the last run.
    visited: usize,
    /// Growth of the process's resident memory over the runs, including the
    /// search arena.
    memory_kib: Option<usize>,
}

/// Time `runs` searches sharing one [`SearchSpace`].
fn measure(
    grid: &Grid,
    spec: &MapSpec,
    algorithm: Algorithm,
    mode: Mode,
    jump: bool,
    runs: u32,
) -> robonav_search::Result<Measurement> {
    let agent = Agent::from_map(grid, spec, jump)?;
    let config = SearchConfig::default();
    let before = memory_stats().map(|usage| usage.physical_mem);
    let mut space = SearchSpace::new(grid);
    let mut visited = 0;
    let started = Instant::now();
    for _ in 0..runs {
        visited = algorithm.run(&mut space, &agent, &config, mode).visited();
    }
    let mean = started.elapsed() / runs;
    let after = memory_stats().map(|usage| usage.physical_mem);
    let memory_kib = before
        .zip(after)
        .map(|(before, after)| after.saturating_sub(before) / 1024);
    log::debug!("{algorithm} {mode:?} jump={jump}: memory {before:?} -> {after:?} bytes");
    Ok(Measurement {
        mean,
        visited,
        memory_kib,
    })
}
