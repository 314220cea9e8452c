//! `robonav-view <MAP> [METHOD]`: show a map, and optionally a found path,
//! in a window.

use std::path::PathBuf;

use clap::Parser;
use env_logger::Env;
use robonav::maps::resolve_map;
use robonav::report::format_path;
use robonav_core::MapSpec;
use robonav_search::{Agent, Algorithm, Mode, SearchConfig, search};
use robonav_viewer::{MapCanvas, ViewerConfig, run_viewer, trace_cells};

#[derive(Parser)]
#[command(version)]
/// Open a map in a window, highlighting the path a search finds.
struct Args {
    #[arg(help = "Map file, as a path or a file name in the maps directory")]
    map: String,
    #[arg(help = "Search algorithm whose path is drawn")]
    method: Option<Algorithm>,
    #[arg(help = "Visit every goal instead of stopping at the first", long = "all")]
    all: bool,
    #[arg(help = "Let the agent move several cells per step", long = "jump")]
    jump: bool,
    #[arg(help = "Directory searched for map names", long = "maps-dir", default_value = "maps")]
    maps_dir: PathBuf,
    #[arg(help = "Tile size in pixels", long = "cell-size", default_value_t = 40)]
    cell_size: u32,
}

fn main() {
    env_logger::init_from_env(Env::default().default_filter_or("warn"));
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => e.exit(),
    };
    if let Err(e) = view(&args) {
        println!("{e}");
    }
}

fn view(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let path = match resolve_map(&args.map, &args.maps_dir) {
        Ok(path) => path,
        Err(e) => {
            if let Some(hint) = e.hint() {
                println!("{hint}");
            }
            return Err(e.into());
        }
    };
    let spec = MapSpec::load(&path)?;
    let mut canvas = MapCanvas::new(&spec)?;

    if let Some(algorithm) = args.method {
        let grid = spec.grid()?;
        let agent = Agent::from_map(&grid, &spec, args.jump)?;
        let mode = if args.all { Mode::AllGoals } else { Mode::FirstGoal };
        match search(&agent, algorithm, &SearchConfig::default(), mode)?.found() {
            Some(found) => {
                println!("{algorithm}: {}", format_path(&found.path));
                canvas = canvas.with_path(&trace_cells(spec.start, &found.path));
            }
            None => println!("{algorithm}: no goal is reachable"),
        }
    }

    let title = match args.method {
        Some(algorithm) => format!("Robot Navigation: {} ({algorithm})", args.map),
        None => format!("Robot Navigation: {}", args.map),
    };
    run_viewer(
        ViewerConfig {
            title,
            cell_size: args.cell_size,
        },
        canvas,
    )?;
    Ok(())
}
