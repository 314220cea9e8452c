//! Text output of a search run.

use std::io::Write;

use robonav_core::Point;
use robonav_search::{Mode, SearchOutcome, Step};

/// `[up, left_2, down]`
pub fn format_path(path: &[Step]) -> String {
    let tokens: Vec<String> = path.iter().map(ToString::to_string).collect();
    format!("[{}]", tokens.join(", "))
}

/// A single goal as `(x, y)`; all-goals mode lists them as `[(x, y), ...]`.
pub fn format_goals(goals: &[Point], mode: Mode) -> String {
    match (mode, goals) {
        (Mode::FirstGoal, [goal]) => goal.to_string(),
        _ => {
            let items: Vec<String> = goals.iter().map(ToString::to_string).collect();
            format!("[{}]", items.join(", "))
        }
    }
}

/// Write the result lines that follow the `<map> <method>` header.
pub fn write_outcome(out: &mut impl Write, outcome: &SearchOutcome, mode: Mode) -> std::io::Result<()> {
    match outcome {
        SearchOutcome::Found(found) => {
            writeln!(out, "{} {}", format_goals(&found.goals, mode), found.visited)?;
            writeln!(out, "{}", format_path(&found.path))
        }
        SearchOutcome::Exhausted { visited } => writeln!(out, "No goal is reachable; {visited}"),
    }
}
