//! Classical search algorithms over a blocked-cell grid.
//!
//! Seven strategies share one [`Agent`] and one per-run annotation arena,
//! [`SearchSpace`]:
//!
//! | Algorithm | Frontier | Optimal |
//! |---|---|---|
//! | breadth-first ([`SearchSpace::bfs`]) | FIFO queue | yes (edges) |
//! | depth-first ([`SearchSpace::dfs`]) | LIFO stack | no |
//! | iterative deepening ([`SearchSpace::iddfs`]) | depth-limited stack | yes (edges) |
//! | A\* ([`SearchSpace::astar`]) | min-heap on `g + h` | yes, toward its target |
//! | greedy best-first ([`SearchSpace::greedy`]) | min-heap on `h` | no |
//! | beam ([`SearchSpace::beam`]) | `f`-sorted list cut to the beam width | no |
//! | bidirectional ([`SearchSpace::bidirectional`]) | two min-heaps | no |
//!
//! Every algorithm has a single-goal entry point that stops at the first goal
//! and an `_all` entry point that visits every goal in turn, restarting from
//! each goal it reaches. [`Algorithm`] selects one by name at runtime.
//!
//! Neighbours are always expanded in the order up, left, down, right, so
//! results are reproducible.

mod agent;
mod algorithm;
mod astar;
mod beam;
mod bfs;
mod bidirectional;
mod config;
mod dfs;
mod error;
mod frontier;
mod greedy;
mod iddfs;
mod outcome;
mod space;

pub use agent::{Agent, TraceOrder};
pub use algorithm::{Algorithm, search};
pub use config::SearchConfig;
pub use error::{Result, SearchError};
pub use outcome::{Found, Mode, SearchOutcome, Step};
pub use space::{Cell, SearchSpace};
