//! The `robonav` command: load a map, run one search, print the result.

use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use robonav_core::{MapSpec, render_map};
use robonav_search::{Agent, Algorithm, Mode, SearchConfig, search};

use crate::error::CliError;
use crate::maps::resolve_map;
use crate::report::write_outcome;

/// Printed after argument errors.
pub const EXAMPLE: &str = "robonav RobotNav-test.txt dfs";

#[derive(Parser, Debug)]
#[command(version)]
/// Search a grid map for a path from the agent to its goals.
pub struct Cli {
    #[arg(help = "Map file, as a path or a file name in the maps directory")]
    pub map: String,
    #[arg(help = "Search algorithm (bfs, dfs, iddfs, astar, greedy, beam, bidirectional)")]
    pub method: String,
    #[arg(help = "Visited-cell ceiling for iddfs [default: 100000]")]
    pub limit: Option<usize>,
    #[arg(help = "Visit every goal instead of stopping at the first", long = "all")]
    pub all: bool,
    #[arg(help = "Let the agent move several cells per step", long = "jump")]
    pub jump: bool,
    #[arg(
        help = "Cells kept per step by beam search",
        long = "beam-width",
        id = "WIDTH",
        default_value_t = SearchConfig::DEFAULT_BEAM_WIDTH
    )]
    pub beam_width: usize,
    #[arg(
        help = "Directory searched for map names",
        long = "maps-dir",
        id = "DIR",
        default_value = "maps"
    )]
    pub maps_dir: PathBuf,
    #[arg(help = "Print the map before searching", long = "show-map")]
    pub show_map: bool,
}

impl Cli {
    pub fn mode(&self) -> Mode {
        if self.all { Mode::AllGoals } else { Mode::FirstGoal }
    }

    pub fn config(&self) -> SearchConfig {
        SearchConfig {
            beam_width: self.beam_width,
            visit_limit: self.limit.unwrap_or(SearchConfig::DEFAULT_VISIT_LIMIT),
        }
    }
}

/// Run one search as described by `cli`, writing the report to `out`.
pub fn run(cli: &Cli, out: &mut impl Write) -> Result<(), CliError> {
    let algorithm: Algorithm = cli.method.parse()?;
    let path = resolve_map(&cli.map, &cli.maps_dir)?;
    let spec = MapSpec::load(&path)?;
    let grid = spec.grid()?;
    let agent = Agent::from_map(&grid, &spec, cli.jump)?;

    if cli.limit.is_some() && algorithm != Algorithm::Iddfs {
        log::warn!("visit limit only applies to iddfs; ignored for {algorithm}");
    }

    if cli.show_map {
        write!(out, "{}", render_map(&spec))?;
    }
    writeln!(out, "{} {}", cli.map, cli.method.to_ascii_lowercase())?;
    let outcome = search(&agent, algorithm, &cli.config(), cli.mode())?;
    write_outcome(out, &outcome, cli.mode())?;
    Ok(())
}
