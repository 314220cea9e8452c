//! `robonav <MAP> <METHOD> [LIMIT]`: run one search and print the path.

use std::io;

use clap::Parser;
use clap::error::ErrorKind;
use env_logger::Env;
use robonav::{Cli, cli::EXAMPLE};

fn main() {
    env_logger::init_from_env(Env::default().default_filter_or("warn"));

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            // Argument problems are reported, not treated as failures.
            let _ = e.print();
            println!("Example: {EXAMPLE}");
            return;
        }
    };

    let mut out = io::stdout().lock();
    if let Err(e) = robonav::run(&cli, &mut out) {
        println!("{e}");
        if let Some(hint) = e.hint() {
            println!("{hint}");
        }
    }
}
