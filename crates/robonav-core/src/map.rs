//! Map files: loading, parsing and console rendering.
//!
//! A map file is line oriented:
//!
//! ```text
//! [5,11]              grid size as (height, width)
//! (0,1)               agent start as (x, y)
//! (7,0) | (10,3)      goals, pipe separated
//! (2,0,2,2)           zero or more walls as (x, y, width, height)
//! ```
//!
//! Parentheses and square brackets are interchangeable and whitespace is
//! ignored. Blank lines are skipped.

use std::path::Path;

use crate::error::{MapError, Result};
use crate::geom::{Point, Range};
use crate::grid::Grid;

/// Console character for a free cell.
pub const FREE: char = '0';
/// Console character for the agent's start cell.
pub const AGENT: char = 'A';
/// Console character for a goal cell.
pub const GOAL: char = 'G';
/// Console character for a wall cell.
pub const WALL: char = '1';

/// The parsed contents of a map file.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapSpec {
    pub height: i32,
    pub width: i32,
    pub start: Point,
    pub goals: Vec<Point>,
    pub walls: Vec<Range>,
}

impl MapSpec {
    /// Read and parse a map file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| MapError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let spec = Self::parse(&text)?;
        log::debug!(
            "loaded {}: {}x{} grid, {} goal(s), {} wall(s)",
            path.display(),
            spec.height,
            spec.width,
            spec.goals.len(),
            spec.walls.len()
        );
        Ok(spec)
    }

    /// Parse map text.
    pub fn parse(text: &str) -> Result<Self> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(i, l)| (i + 1, l.trim()))
            .filter(|(_, l)| !l.is_empty());

        let (n, size_line) = lines.next().ok_or(MapError::Missing("grid size"))?;
        let [height, width] = parse_tuple::<2>(size_line, n)?;
        Grid::check_size(height, width)?;

        let (n, start_line) = lines.next().ok_or(MapError::Missing("agent start"))?;
        let [x, y] = parse_tuple::<2>(start_line, n)?;
        let start = Point::new(x, y);

        let (n, goal_line) = lines.next().ok_or(MapError::Missing("goal"))?;
        let goals = goal_line
            .split('|')
            .map(|g| parse_tuple::<2>(g, n).map(|[x, y]| Point::new(x, y)))
            .collect::<Result<Vec<_>>>()?;

        let mut walls = Vec::new();
        for (n, wall_line) in lines {
            let [x, y, w, h] = parse_tuple::<4>(wall_line, n)?;
            if w < 0 || h < 0 {
                return Err(MapError::Syntax {
                    line: n,
                    reason: format!("wall `{wall_line}` has a negative size"),
                });
            }
            let (Some(x1), Some(y1)) = (x.checked_add(w), y.checked_add(h)) else {
                return Err(MapError::Syntax {
                    line: n,
                    reason: format!("wall `{wall_line}` reaches past the coordinate range"),
                });
            };
            walls.push(Range::new(x, y, x1, y1));
        }

        let spec = Self {
            height,
            width,
            start,
            goals,
            walls,
        };
        spec.check_in_bounds("agent start", spec.start)?;
        for &g in &spec.goals {
            spec.check_in_bounds("goal", g)?;
        }
        Ok(spec)
    }

    /// Build the blocked-cell grid described by this map.
    pub fn grid(&self) -> Result<Grid> {
        Grid::new(self.height, self.width, &self.walls)
    }

    fn check_in_bounds(&self, what: &'static str, point: Point) -> Result<()> {
        if Range::new(0, 0, self.width, self.height).contains(point) {
            Ok(())
        } else {
            Err(MapError::OutOfBounds {
                what,
                point,
                width: self.width,
                height: self.height,
            })
        }
    }

    fn is_wall(&self, p: Point) -> bool {
        self.walls.iter().any(|w| w.contains(p))
    }
}

/// Parse a literal such as `(1, 2)` or `[1,2]` holding exactly `N` integers.
fn parse_tuple<const N: usize>(text: &str, line: usize) -> Result<[i32; N]> {
    let syntax = |reason: String| MapError::Syntax { line, reason };
    let t = text.trim();
    let inner = t
        .strip_prefix('(')
        .and_then(|s| s.strip_suffix(')'))
        .or_else(|| t.strip_prefix('[').and_then(|s| s.strip_suffix(']')))
        .ok_or_else(|| syntax(format!("expected a bracketed tuple, found `{t}`")))?;

    let mut out = [0; N];
    let mut count = 0;
    for part in inner.split(',') {
        let part = part.trim();
        if count == N {
            return Err(syntax(format!("expected {N} values in `{t}`")));
        }
        out[count] = part
            .parse()
            .map_err(|_| syntax(format!("`{part}` is not an integer")))?;
        count += 1;
    }
    if count != N {
        return Err(syntax(format!("expected {N} values in `{t}`")));
    }
    Ok(out)
}

/// Render the map as rows of sentinel characters, one row per line.
///
/// When cells coincide, the agent wins over a goal and a goal over a wall.
pub fn render_map(spec: &MapSpec) -> String {
    let rows = spec.height.max(0) as usize;
    let mut out = String::with_capacity((spec.width.max(0) as usize + 1) * rows);
    for y in 0..spec.height {
        for x in 0..spec.width {
            let p = Point::new(x, y);
            let ch = if p == spec.start {
                AGENT
            } else if spec.goals.contains(&p) {
                GOAL
            } else if spec.is_wall(p) {
                WALL
            } else {
                FREE
            };
            out.push(ch);
        }
        out.push('\n');
    }
    out
}

/// Print [`render_map`] to stdout.
pub fn print_map(spec: &MapSpec) {
    print!("{}", render_map(spec));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

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

    #[test]
    fn parses_sample_map() {
        let m = MapSpec::parse(SAMPLE).unwrap();
        assert_eq!((m.height, m.width), (5, 11));
        assert_eq!(m.start, Point::new(0, 1));
        assert_eq!(m.goals, vec![Point::new(7, 0), Point::new(10, 3)]);
        assert_eq!(m.walls.len(), 7);
        assert_eq!(m.walls[0], Range::from_rect(2, 0, 2, 2));
    }

    #[test]
    fn parses_loose_whitespace_and_blank_lines() {
        let m = MapSpec::parse("( 3 , 4 )\n\n(0, 0)\n( 3,2 )\n\n").unwrap();
        assert_eq!((m.height, m.width), (3, 4));
        assert_eq!(m.goals, vec![Point::new(3, 2)]);
        assert!(m.walls.is_empty());
    }

    #[test]
    fn reports_syntax_line() {
        let err = MapSpec::parse("(5,5)\n(0,0)\n(4,4)\n(1,1,x,1)\n").unwrap_err();
        match err {
            MapError::Syntax { line, .. } => assert_eq!(line, 4),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn rejects_wrong_arity() {
        assert!(matches!(
            MapSpec::parse("(5,5,5)\n(0,0)\n(1,1)"),
            Err(MapError::Syntax { line: 1, .. })
        ));
        assert!(matches!(
            MapSpec::parse("(5,5)\n(0,0)\n(1,1)\n(1,1,1)"),
            Err(MapError::Syntax { line: 4, .. })
        ));
    }

    #[test]
    fn extreme_wall_is_a_syntax_error() {
        let err = MapSpec::parse("(5,5)\n(0,0)\n(1,1)\n(2147483647,0,1,1)\n").unwrap_err();
        assert!(matches!(err, MapError::Syntax { line: 4, .. }), "{err:?}");
        let err = MapSpec::parse("(5,5)\n(0,0)\n(1,1)\n\n(0,2147483000,1,5000)\n").unwrap_err();
        assert!(matches!(err, MapError::Syntax { line: 5, .. }), "{err:?}");
    }

    #[test]
    fn oversized_grid_is_rejected() {
        let err = MapSpec::parse("(2147483647,2147483647)\n(0,0)\n(1,1)\n").unwrap_err();
        assert!(matches!(err, MapError::InvalidSize { .. }), "{err:?}");
        let err = MapSpec::parse("(5000,5000)\n(0,0)\n(1,1)\n").unwrap_err();
        assert!(matches!(err, MapError::InvalidSize { height: 5000, width: 5000 }));
    }

    #[test]
    fn reports_missing_sections() {
        assert!(matches!(MapSpec::parse(""), Err(MapError::Missing(_))));
        assert!(matches!(
            MapSpec::parse("(5,5)\n(0,0)\n"),
            Err(MapError::Missing("goal"))
        ));
    }

    #[test]
    fn rejects_points_outside_grid() {
        let err = MapSpec::parse("(5,5)\n(0,0)\n(5,1)").unwrap_err();
        assert!(matches!(err, MapError::OutOfBounds { what: "goal", .. }));
        let err = MapSpec::parse("(5,5)\n(-1,0)\n(1,1)").unwrap_err();
        assert!(matches!(err, MapError::OutOfBounds { what: "agent start", .. }));
    }

    #[test]
    fn renders_sentinels() {
        let m = MapSpec::parse(SAMPLE).unwrap();
        let rendered = render_map(&m);
        let rows: Vec<_> = rendered.lines().collect();
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0], "0011000G101");
        assert_eq!(rows[1], "A0110000100");
        assert_eq!(rows[2], "00000000000");
        assert_eq!(rows[3], "0010000001G");
        assert_eq!(rows[4], "00111100110");
    }

    #[test]
    fn grid_from_spec() {
        let m = MapSpec::parse(SAMPLE).unwrap();
        let g = m.grid().unwrap();
        assert_eq!(g.net_area(), 55 - 15);
        assert!(g.is_blocked(Point::new(9, 3)));
    }

    #[test]
    fn load_from_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(SAMPLE.as_bytes()).unwrap();
        let m = MapSpec::load(f.path()).unwrap();
        assert_eq!(m.start, Point::new(0, 1));
    }

    #[test]
    fn load_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = MapSpec::load(dir.path().join("nope.txt")).unwrap_err();
        assert!(err.is_not_found());
    }
}
