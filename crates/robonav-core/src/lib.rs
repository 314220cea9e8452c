//! **robonav-core** — grid and map types for robot navigation search.
//!
//! This crate provides the foundational types shared by the search
//! algorithms, the CLI and the viewer: geometry primitives, the
//! blocked-cell [`Grid`] built from wall rectangles, and the text map-file
//! format ([`MapSpec`]) with its console rendering.

pub mod error;
pub mod geom;
pub mod grid;
pub mod map;

pub use error::{MapError, Result};
pub use geom::{Direction, Point, Range, manhattan};
pub use grid::Grid;
pub use map::{MapSpec, print_map, render_map};
